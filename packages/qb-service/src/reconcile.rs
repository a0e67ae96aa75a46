use std::collections::HashSet;

use serde_json::Value;

use crate::SearchResponse;
use qb_domain::Recipe;

/// A search response made display-ready.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciled {
	pub recipes: Vec<Recipe>,
	pub parsed_intent: Option<Value>,
	pub advisory_message: Option<String>,
}

pub fn reconcile(response: SearchResponse) -> Reconciled {
	let received = response.recipes.len();
	let recipes = dedup_recipes(response.recipes);

	if recipes.len() != received {
		tracing::debug!(received, kept = recipes.len(), "Dropped repeated recipes.");
	}

	Reconciled { recipes, parsed_intent: response.parsed_intent, advisory_message: response.message }
}

/// Drops exact repeats and nothing else. The service owns ordering, so survivors keep their
/// relative order and the first occurrence wins.
pub fn dedup_recipes(recipes: Vec<Recipe>) -> Vec<Recipe> {
	let mut seen_ids = HashSet::new();
	let mut seen_fallbacks = HashSet::new();

	recipes
		.into_iter()
		.filter(|recipe| match recipe.id.as_deref() {
			Some(id) => seen_ids.insert(id.to_string()),
			None => seen_fallbacks.insert(fallback_key(recipe)),
		})
		.collect()
}

/// Identity for recipes without an id: title and source URL, with an empty suffix when the URL
/// is missing.
pub fn fallback_key(recipe: &Recipe) -> String {
	format!("{}-{}", recipe.title, recipe.source_url.as_deref().unwrap_or_default())
}
