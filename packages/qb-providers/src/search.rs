use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};
use qb_config::Remote;
use qb_domain::{FilterSelection, PersonaTag, Recipe, SearchQuery};

/// Canonical shape of a ranking-service response, whichever field carried the recipes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
	pub recipes: Vec<Recipe>,
	pub parsed_intent: Option<Value>,
	pub message: Option<String>,
}

#[derive(Debug, Serialize)]
struct SearchBody<'a> {
	query: &'a str,
	persona: PersonaTag,
	filters: &'a FilterSelection,
}

#[derive(Debug, Deserialize)]
struct WireSearchResponse {
	#[serde(default)]
	recipes: Option<Vec<Recipe>>,
	#[serde(default)]
	results: Option<Vec<Recipe>>,
	#[serde(default)]
	parsed_intent: Option<Value>,
	#[serde(default)]
	message: Option<String>,
}

pub async fn search(cfg: &Remote, query: &SearchQuery) -> Result<SearchResponse> {
	let client = crate::client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, cfg.search_path);
	let body = SearchBody { query: &query.composed, persona: query.persona, filters: &query.filters };

	tracing::debug!(%url, query = %query.composed, persona = %query.persona, "Sending recipe search.");

	let res = client
		.post(url)
		.headers(crate::default_headers(&cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_search_response(json)
}

/// The service may put recipes under `recipes` or `results`; the first non-empty one wins and
/// neither being present is an empty result.
pub fn parse_search_response(json: Value) -> Result<SearchResponse> {
	if !json.is_object() {
		return Err(Error::InvalidResponse {
			message: "Search response must be a JSON object.".to_string(),
		});
	}

	let wire: WireSearchResponse = serde_json::from_value(json)?;
	let recipes = [wire.recipes, wire.results]
		.into_iter()
		.flatten()
		.find(|recipes| !recipes.is_empty())
		.unwrap_or_default();

	Ok(SearchResponse { recipes, parsed_intent: wire.parsed_intent, message: wire.message })
}
