//! Search lifecycle: `idle -> loading -> success | empty | error`, re-enterable from any state.
//!
//! Every submit bumps the outcome's generation. A primary response or side fact only lands if
//! its generation is still the current one, so a slow earlier request can never overwrite a
//! newer search.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;

use crate::{Error, Providers, Result, SearchResponse, reconcile};
use qb_config::Config;
use qb_domain::{FilterSelection, PersonaTag, Recipe, SearchQuery};
use qb_storage::{FilePersonaStore, PersonaStore};

pub const GENERIC_SEARCH_ERROR: &str = "Failed to fetch recipes. Is the backend running?";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
	#[default]
	Idle,
	Loading,
	Success,
	Empty,
	Error,
}

/// Snapshot of the session as presentation sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchOutcome {
	pub status: SearchStatus,
	/// Meaningful only in `Success` and `Empty`.
	pub recipes: Vec<Recipe>,
	pub parsed_intent: Option<Value>,
	pub advisory_message: Option<String>,
	pub error_detail: Option<String>,
	pub side_fact: Option<String>,
	/// Generation of the submit this outcome belongs to; zero before the first submit.
	pub generation: u64,
}
impl SearchOutcome {
	pub fn is_loading(&self) -> bool {
		self.status == SearchStatus::Loading
	}

	/// The advisory message, when it reports that the search was widened to find results.
	pub fn broadened_notice(&self) -> Option<&str> {
		if self.status != SearchStatus::Success {
			return None;
		}

		self.advisory_message.as_deref().filter(|message| message.to_lowercase().contains("broader"))
	}
}

pub struct SearchSession {
	providers: Providers,
	persona_store: Arc<dyn PersonaStore>,
	default_persona: PersonaTag,
	filters: Mutex<FilterSelection>,
	outcome: Arc<watch::Sender<SearchOutcome>>,
}
impl SearchSession {
	pub fn new(
		providers: Providers,
		persona_store: Arc<dyn PersonaStore>,
		default_persona: PersonaTag,
	) -> Self {
		let (outcome, _) = watch::channel(SearchOutcome::default());

		Self {
			providers,
			persona_store,
			default_persona,
			filters: Mutex::new(FilterSelection::default()),
			outcome: Arc::new(outcome),
		}
	}

	pub fn from_config(cfg: &Config) -> Result<Self> {
		let default_persona = cfg
			.persona
			.default
			.parse::<PersonaTag>()
			.map_err(|err| Error::InvalidConfig { message: err.to_string() })?;
		let providers = match cfg.search.mode.as_str() {
			"local" => Providers::local(),
			_ => Providers::remote(cfg.remote.clone()),
		};
		let persona_store = Arc::new(FilePersonaStore::new(&cfg.persona.store_path));

		Ok(Self::new(providers, persona_store, default_persona))
	}

	pub fn snapshot(&self) -> SearchOutcome {
		self.outcome.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<SearchOutcome> {
		self.outcome.subscribe()
	}

	pub fn filters(&self) -> FilterSelection {
		self.filters.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn update_filters<F, R>(&self, update: F) -> R
	where
		F: FnOnce(&mut FilterSelection) -> R,
	{
		let mut filters = self.filters.lock().unwrap_or_else(|err| err.into_inner());

		update(&mut *filters)
	}

	pub fn clear_filters(&self) {
		self.update_filters(FilterSelection::clear);
	}

	/// The stored persona, or the configured default when none is stored. Never writes back.
	pub fn resolve_persona(&self) -> PersonaTag {
		match self.persona_store.get() {
			Ok(Some(persona)) => persona,
			Ok(None) => self.default_persona,
			Err(err) => {
				tracing::warn!(error = %err, "Persona store unavailable; using default persona.");

				self.default_persona
			},
		}
	}

	/// Runs one search and returns the outcome once the primary response has been applied.
	///
	/// If a newer submit started meanwhile, this submit's response is discarded and the returned
	/// snapshot belongs to the newer one.
	pub async fn submit(&self, raw_query: &str) -> SearchOutcome {
		let generation = self.begin();

		self.spawn_side_fact(generation);

		let persona = self.resolve_persona();
		let query = SearchQuery::new(raw_query, self.filters(), persona);

		tracing::info!(generation, query = %query.composed, %persona, "Search submitted.");

		let result = self.providers.search.search(&query).await;

		self.finish(generation, result);

		self.snapshot()
	}

	fn begin(&self) -> u64 {
		let mut generation = 0;

		self.outcome.send_modify(|outcome| {
			outcome.generation += 1;
			outcome.status = SearchStatus::Loading;
			outcome.error_detail = None;
			outcome.side_fact = None;

			generation = outcome.generation;
		});

		generation
	}

	fn spawn_side_fact(&self, generation: u64) {
		let fact = Arc::clone(&self.providers.fact);
		let outcome = Arc::clone(&self.outcome);

		tokio::spawn(async move {
			let text = match fact.random_fact().await {
				Ok(Some(text)) => text,
				Ok(None) => return,
				Err(err) => {
					tracing::debug!(generation, error = %err, "Side fact unavailable.");

					return;
				},
			};

			outcome.send_if_modified(|current| {
				if current.generation != generation {
					return false;
				}

				current.side_fact = Some(text);

				true
			});
		});
	}

	fn finish(&self, generation: u64, result: Result<SearchResponse>) {
		let reconciled = match result {
			Ok(response) => Ok(reconcile(response)),
			Err(err) => {
				tracing::warn!(generation, error = %err, "Search failed.");

				Err(err)
			},
		};
		let applied = self.outcome.send_if_modified(|current| {
			if current.generation != generation {
				return false;
			}

			match reconciled {
				Ok(reconciled) => {
					current.status = if reconciled.recipes.is_empty() {
						SearchStatus::Empty
					} else {
						SearchStatus::Success
					};
					current.recipes = reconciled.recipes;
					current.parsed_intent = reconciled.parsed_intent;
					current.advisory_message = reconciled.advisory_message;
					current.error_detail = None;
				},
				Err(_) => {
					current.status = SearchStatus::Error;
					current.recipes.clear();
					current.parsed_intent = None;
					current.advisory_message = None;
					current.error_detail = Some(GENERIC_SEARCH_ERROR.to_string());
				},
			}

			true
		});

		if applied {
			let current = self.outcome.borrow();

			tracing::info!(generation, status = ?current.status, recipes = current.recipes.len(), "Search finished.");
		} else {
			tracing::debug!(generation, "Discarded stale search response.");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn broadened_notice_requires_success_and_keyword() {
		let mut outcome = SearchOutcome {
			status: SearchStatus::Success,
			advisory_message: Some("We used Broader terms to find these".to_string()),
			..Default::default()
		};

		assert_eq!(outcome.broadened_notice(), Some("We used Broader terms to find these"));

		outcome.advisory_message = Some("Recipes fetched successfully".to_string());

		assert_eq!(outcome.broadened_notice(), None);

		outcome.advisory_message = Some("Try broader terms".to_string());
		outcome.status = SearchStatus::Empty;

		assert_eq!(outcome.broadened_notice(), None);
	}

	#[test]
	fn default_outcome_is_idle() {
		let outcome = SearchOutcome::default();

		assert_eq!(outcome.status, SearchStatus::Idle);
		assert_eq!(outcome.generation, 0);
		assert!(!outcome.is_loading());
	}
}
