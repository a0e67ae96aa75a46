use std::fmt::Write;

use qb_domain::{PersonaTag, Recipe};
use qb_service::{SearchOutcome, SearchStatus};

const INGREDIENT_PREVIEW: usize = 5;

pub fn render_outcome(outcome: &SearchOutcome, persona: PersonaTag) -> String {
	let mut out = String::new();

	match outcome.status {
		SearchStatus::Idle => {},
		SearchStatus::Loading => out.push_str("Finding the best recipes for you…\n"),
		SearchStatus::Error => {
			let detail = outcome.error_detail.as_deref().unwrap_or("Something went wrong.");

			let _ = writeln!(out, "{detail}");
		},
		SearchStatus::Empty => {
			let headline = outcome.advisory_message.as_deref().unwrap_or("No recipes matched your search");

			let _ = writeln!(out, "{headline}");
			out.push_str("Try different ingredients or adjust your filters.\n");
		},
		SearchStatus::Success => {
			let _ = writeln!(out, "Optimized for {}", persona.display_name());

			if let Some(notice) = outcome.broadened_notice() {
				let _ = writeln!(out, "Note: {notice}");
			}

			for (index, recipe) in outcome.recipes.iter().enumerate() {
				out.push('\n');
				out.push_str(&render_recipe(index + 1, recipe));
			}
		},
	}

	out
}

pub fn render_recipe(rank: usize, recipe: &Recipe) -> String {
	let mut out = String::new();
	let _ = writeln!(out, "{rank}. {} · {}", recipe.title, recipe.ready_in_label());

	if !recipe.ingredients.is_empty() {
		let _ = writeln!(out, "   {}", recipe.ingredient_preview(INGREDIENT_PREVIEW));
	}
	if !recipe.explanation.is_empty() {
		let _ = writeln!(out, "   Why this recipe? {}", recipe.explanation.join(" · "));
	}
	if let Some(url) = recipe.source_url.as_deref() {
		let _ = writeln!(out, "   {url}");
	}

	out
}

pub fn render_side_fact(fact: &str) -> String {
	format!("Did you know? {fact}")
}
