//! Local matching used offline and as the reference semantics for "matching".
//!
//! Every stage narrows the candidate set and none of them reorders it, so all predicates can be
//! applied in a single pass over the catalog.

use crate::{
	filter::{FilterSelection, GoalBucket},
	recipe::Recipe,
};

pub const LOCAL_RESULT_LIMIT: usize = 5;
pub const HIGH_PROTEIN_MIN_SCORE: f64 = 7.0;

pub fn search_catalog(catalog: &[Recipe], query: &str, filters: &FilterSelection) -> Vec<Recipe> {
	let needle = query.trim().to_lowercase();
	let wanted: Vec<String> =
		filters.ingredients().iter().map(|ingredient| ingredient.to_lowercase()).collect();

	catalog
		.iter()
		.filter(|recipe| matches_text(recipe, &needle))
		.filter(|recipe| within_time(recipe, filters))
		.filter(|recipe| meets_goal(recipe, filters))
		.filter(|recipe| uses_any_ingredient(recipe, &wanted))
		.take(LOCAL_RESULT_LIMIT)
		.cloned()
		.collect()
}

fn matches_text(recipe: &Recipe, needle: &str) -> bool {
	if needle.is_empty() {
		return true;
	}

	recipe.title.to_lowercase().contains(needle)
		|| recipe.ingredients.iter().any(|ingredient| ingredient.to_lowercase().contains(needle))
		|| recipe.explanation.iter().any(|reason| reason.to_lowercase().contains(needle))
}

fn within_time(recipe: &Recipe, filters: &FilterSelection) -> bool {
	let Some(max) = filters.time.as_ref().and_then(|time| time.max_minutes()) else {
		return true;
	};

	recipe.ready_in_minutes.is_some_and(|minutes| minutes <= max)
}

fn meets_goal(recipe: &Recipe, filters: &FilterSelection) -> bool {
	if filters.goal != Some(GoalBucket::HighProtein) {
		return true;
	}

	recipe.protein_score.is_some_and(|score| score >= HIGH_PROTEIN_MIN_SCORE)
}

// Any selected ingredient matching any recipe ingredient is enough.
fn uses_any_ingredient(recipe: &Recipe, wanted: &[String]) -> bool {
	if wanted.is_empty() {
		return true;
	}

	recipe.ingredients.iter().map(|ingredient| ingredient.to_lowercase()).any(|ingredient| {
		wanted.iter().any(|selected| ingredient.contains(selected.as_str()))
	})
}
