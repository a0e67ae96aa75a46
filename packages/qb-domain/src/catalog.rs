use std::sync::LazyLock;

use crate::recipe::Recipe;

static REFERENCE_CATALOG: LazyLock<Vec<Recipe>> = LazyLock::new(|| {
	vec![
		entry(CatalogEntry {
			id: "1",
			title: "Lemon Herb Grilled Chicken",
			ready_in_minutes: 25,
			ingredients: &["chicken breast", "lemon", "garlic", "rosemary", "olive oil"],
			instructions: &[
				"Marinate chicken with lemon, garlic, and herbs for 15 minutes",
				"Preheat grill to medium-high heat",
				"Grill chicken for 6-7 minutes per side until cooked through",
				"Let rest for 5 minutes before serving",
			],
			source_url: "https://example.com/lemon-herb-chicken",
			cost_estimate: 350.0,
			protein_score: 8.0,
			protein_per_cost: 0.023,
			match_score: 0.92,
			explanation: &["Ready in under 30 minutes", "High protein", "Budget-friendly"],
		}),
		entry(CatalogEntry {
			id: "2",
			title: "Quick Teriyaki Salmon Bowl",
			ready_in_minutes: 18,
			ingredients: &["salmon", "rice", "soy sauce", "ginger", "broccoli"],
			instructions: &[
				"Cook rice according to package directions",
				"Pan-sear salmon with teriyaki glaze for 4-5 minutes per side",
				"Steam broccoli for 5 minutes",
				"Assemble bowl with rice, salmon, and broccoli",
			],
			source_url: "https://example.com/teriyaki-salmon",
			cost_estimate: 550.0,
			protein_score: 9.0,
			protein_per_cost: 0.016,
			match_score: 0.88,
			explanation: &["Under 20 minutes", "High protein", "Uses common ingredients"],
		}),
		entry(CatalogEntry {
			id: "3",
			title: "Mediterranean Chickpea Salad",
			ready_in_minutes: 15,
			ingredients: &["chickpeas", "cucumber", "tomatoes", "feta", "olives"],
			instructions: &[
				"Drain and rinse chickpeas",
				"Chop cucumber, tomatoes, and olives",
				"Combine all ingredients in a bowl",
				"Dress with olive oil and lemon juice",
			],
			source_url: "https://example.com/chickpea-salad",
			cost_estimate: 200.0,
			protein_score: 5.0,
			protein_per_cost: 0.025,
			match_score: 0.85,
			explanation: &["No cooking required", "Light & refreshing", "Meal prep friendly"],
		}),
		entry(CatalogEntry {
			id: "4",
			title: "Spicy Shrimp Stir-Fry",
			ready_in_minutes: 20,
			ingredients: &["shrimp", "bell peppers", "snap peas", "garlic", "chili flakes"],
			instructions: &[
				"Heat oil in a wok over high heat",
				"Stir-fry shrimp until pink, about 3 minutes",
				"Add vegetables and garlic, cook for 5 minutes",
				"Season with chili flakes and soy sauce",
			],
			source_url: "https://example.com/shrimp-stirfry",
			cost_estimate: 450.0,
			protein_score: 8.0,
			protein_per_cost: 0.018,
			match_score: 0.90,
			explanation: &["Ready in 20 minutes", "High protein", "Low carb"],
		}),
		entry(CatalogEntry {
			id: "5",
			title: "One-Pan Garlic Butter Pasta",
			ready_in_minutes: 22,
			ingredients: &["pasta", "garlic", "butter", "parmesan", "parsley"],
			instructions: &[
				"Boil pasta in salted water until al dente",
				"In the same pan, melt butter and sauté garlic",
				"Toss cooked pasta with garlic butter",
				"Top with parmesan and fresh parsley",
			],
			source_url: "https://example.com/garlic-butter-pasta",
			cost_estimate: 180.0,
			protein_score: 4.0,
			protein_per_cost: 0.022,
			match_score: 0.78,
			explanation: &["Minimal cleanup", "5 ingredients", "Comfort food"],
		}),
	]
});

struct CatalogEntry {
	id: &'static str,
	title: &'static str,
	ready_in_minutes: u32,
	ingredients: &'static [&'static str],
	instructions: &'static [&'static str],
	source_url: &'static str,
	cost_estimate: f64,
	protein_score: f64,
	protein_per_cost: f64,
	match_score: f64,
	explanation: &'static [&'static str],
}

/// The fixed offline catalog. Its order is the relevance ranking.
pub fn reference_catalog() -> &'static [Recipe] {
	&REFERENCE_CATALOG
}

fn entry(raw: CatalogEntry) -> Recipe {
	let owned = |items: &[&str]| items.iter().map(ToString::to_string).collect::<Vec<_>>();

	Recipe {
		id: Some(raw.id.to_string()),
		ready_in_minutes: Some(raw.ready_in_minutes),
		ingredients: owned(raw.ingredients),
		instructions: owned(raw.instructions),
		explanation: owned(raw.explanation),
		protein_score: Some(raw.protein_score),
		match_score: Some(raw.match_score),
		cost_estimate: Some(raw.cost_estimate),
		protein_per_cost: Some(raw.protein_per_cost),
		source_url: Some(raw.source_url.to_string()),
		..Recipe::new(raw.title)
	}
}
