use std::{
	collections::VecDeque,
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use tokio::sync::Notify;

use qb_domain::{PersonaTag, Recipe, SearchQuery, TimeBucket};
use qb_service::{
	BoxFuture, Error, FactProvider, GENERIC_SEARCH_ERROR, Providers, Result, SearchOutcome,
	SearchProvider, SearchResponse, SearchSession, SearchStatus,
};
use qb_storage::{MemoryPersonaStore, PersonaStore};

struct SearchStep {
	gate: Option<Arc<Notify>>,
	result: Result<SearchResponse>,
}

#[derive(Default)]
struct ScriptedSearch {
	steps: Mutex<VecDeque<SearchStep>>,
	queries: Mutex<Vec<SearchQuery>>,
}
impl ScriptedSearch {
	fn push(&self, result: Result<SearchResponse>) {
		self.push_step(SearchStep { gate: None, result });
	}

	fn push_gated(&self, result: Result<SearchResponse>) -> Arc<Notify> {
		let gate = Arc::new(Notify::new());

		self.push_step(SearchStep { gate: Some(gate.clone()), result });

		gate
	}

	fn push_step(&self, step: SearchStep) {
		self.steps.lock().unwrap_or_else(|err| err.into_inner()).push_back(step);
	}

	fn queries(&self) -> Vec<SearchQuery> {
		self.queries.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	fn call_count(&self) -> usize {
		self.queries.lock().unwrap_or_else(|err| err.into_inner()).len()
	}
}
impl SearchProvider for ScriptedSearch {
	fn search<'a>(&'a self, query: &'a SearchQuery) -> BoxFuture<'a, Result<SearchResponse>> {
		self.queries.lock().unwrap_or_else(|err| err.into_inner()).push(query.clone());

		let step = self
			.steps
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.pop_front()
			.unwrap_or(SearchStep { gate: None, result: Ok(SearchResponse::default()) });

		Box::pin(async move {
			if let Some(gate) = step.gate {
				gate.notified().await;
			}

			step.result
		})
	}
}

struct FactStep {
	delay: Duration,
	result: Result<Option<String>>,
}

#[derive(Default)]
struct ScriptedFact {
	steps: Mutex<VecDeque<FactStep>>,
	calls: AtomicUsize,
}
impl ScriptedFact {
	fn push(&self, delay_ms: u64, result: Result<Option<String>>) {
		self.steps
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.push_back(FactStep { delay: Duration::from_millis(delay_ms), result });
	}
}
impl FactProvider for ScriptedFact {
	fn random_fact<'a>(&'a self) -> BoxFuture<'a, Result<Option<String>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let step = self
			.steps
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.pop_front()
			.unwrap_or(FactStep { delay: Duration::ZERO, result: Ok(None) });

		Box::pin(async move {
			tokio::time::sleep(step.delay).await;

			step.result
		})
	}
}

struct Harness {
	session: Arc<SearchSession>,
	search: Arc<ScriptedSearch>,
	fact: Arc<ScriptedFact>,
	store: Arc<MemoryPersonaStore>,
}

fn harness() -> Harness {
	let search = Arc::new(ScriptedSearch::default());
	let fact = Arc::new(ScriptedFact::default());
	let store = Arc::new(MemoryPersonaStore::new());
	let providers = Providers::new(search.clone(), fact.clone());
	let session =
		Arc::new(SearchSession::new(providers, store.clone(), PersonaTag::BusyProfessional));

	Harness { session, search, fact, store }
}

fn recipe(id: Option<&str>, title: &str) -> Recipe {
	Recipe { id: id.map(ToString::to_string), ..Recipe::new(title) }
}

fn response(recipes: Vec<Recipe>) -> SearchResponse {
	SearchResponse { recipes, parsed_intent: None, message: None }
}

fn provider_error() -> Error {
	Error::Provider { message: "HTTP status server error (500 Internal Server Error)".to_string() }
}

fn titles(outcome: &SearchOutcome) -> Vec<&str> {
	outcome.recipes.iter().map(|recipe| recipe.title.as_str()).collect()
}

async fn wait_for_calls(search: &ScriptedSearch, count: usize) {
	tokio::time::timeout(Duration::from_secs(2), async {
		while search.call_count() < count {
			tokio::task::yield_now().await;
		}
	})
	.await
	.expect("Search provider was never called.");
}

#[tokio::test]
async fn starts_idle() {
	let h = harness();

	assert_eq!(h.session.snapshot(), SearchOutcome::default());
}

#[tokio::test]
async fn empty_submit_still_enters_loading() {
	let h = harness();
	let gate = h.search.push_gated(Ok(response(vec![recipe(Some("1"), "Omelette")])));
	let mut rx = h.session.subscribe();
	let task = tokio::spawn({
		let session = h.session.clone();

		async move { session.submit("").await }
	});

	{
		let loading = tokio::time::timeout(
			Duration::from_secs(2),
			rx.wait_for(|outcome| outcome.status == SearchStatus::Loading),
		)
		.await
		.expect("Timed out waiting for loading.")
		.expect("Outcome channel closed.");

		assert_eq!(loading.generation, 1);
	}

	gate.notify_one();

	let outcome = task.await.expect("Submit task panicked.");

	assert_eq!(outcome.status, SearchStatus::Success);
	assert_eq!(h.search.queries()[0].composed, "");
}

#[tokio::test]
async fn non_empty_response_is_success_and_deduplicated() {
	let h = harness();

	h.search.push(Ok(SearchResponse {
		recipes: vec![
			recipe(Some("1"), "Egg Fried Rice"),
			recipe(None, "Congee"),
			recipe(Some("1"), "Egg Fried Rice (again)"),
			recipe(None, "Congee"),
		],
		parsed_intent: Some(serde_json::json!({ "ingredients": ["rice"] })),
		message: Some("Recipes fetched successfully".to_string()),
	}));

	let outcome = h.session.submit("rice").await;

	assert_eq!(outcome.status, SearchStatus::Success);
	assert_eq!(titles(&outcome), vec!["Egg Fried Rice", "Congee"]);
	assert_eq!(outcome.parsed_intent, Some(serde_json::json!({ "ingredients": ["rice"] })));
	assert_eq!(outcome.advisory_message.as_deref(), Some("Recipes fetched successfully"));
	assert_eq!(outcome.error_detail, None);
}

#[tokio::test]
async fn zero_recipes_is_empty_not_error() {
	let h = harness();

	h.search.push(Ok(SearchResponse {
		recipes: Vec::new(),
		parsed_intent: None,
		message: Some("No recipes found".to_string()),
	}));

	let outcome = h.session.submit("durian").await;

	assert_eq!(outcome.status, SearchStatus::Empty);
	assert!(outcome.recipes.is_empty());
	assert_eq!(outcome.error_detail, None);
	assert_eq!(outcome.advisory_message.as_deref(), Some("No recipes found"));
}

#[tokio::test]
async fn failure_is_error_with_generic_message_and_no_recipes() {
	let h = harness();

	h.search.push(Ok(response(vec![recipe(Some("1"), "Salad")])));
	h.search.push(Err(provider_error()));

	let first = h.session.submit("salad").await;

	assert_eq!(first.status, SearchStatus::Success);

	let second = h.session.submit("salad").await;

	assert_eq!(second.status, SearchStatus::Error);
	assert!(second.recipes.is_empty());
	assert_eq!(second.error_detail.as_deref(), Some(GENERIC_SEARCH_ERROR));
	assert_eq!(second.generation, 2);
}

#[tokio::test]
async fn new_submit_clears_previous_error() {
	let h = harness();

	h.search.push(Err(provider_error()));
	h.search.push(Ok(response(vec![recipe(Some("1"), "Salad")])));

	assert_eq!(h.session.submit("salad").await.status, SearchStatus::Error);

	let retried = h.session.submit("salad").await;

	assert_eq!(retried.status, SearchStatus::Success);
	assert_eq!(retried.error_detail, None);
}

#[tokio::test]
async fn stale_response_never_overwrites_newer_search() {
	let h = harness();
	let slow_gate = h.search.push_gated(Ok(response(vec![recipe(Some("old"), "Old result")])));

	h.search.push(Ok(response(vec![recipe(Some("new"), "New result")])));

	let slow = tokio::spawn({
		let session = h.session.clone();

		async move { session.submit("first").await }
	});

	wait_for_calls(&h.search, 1).await;

	let fresh = h.session.submit("second").await;

	assert_eq!(fresh.generation, 2);
	assert_eq!(titles(&fresh), vec!["New result"]);

	slow_gate.notify_one();

	let returned = slow.await.expect("Submit task panicked.");

	assert_eq!(returned.generation, 2);
	assert_eq!(titles(&returned), vec!["New result"]);
	assert_eq!(titles(&h.session.snapshot()), vec!["New result"]);
}

#[tokio::test]
async fn side_fact_failure_leaves_outcome_untouched() {
	let h = harness();

	h.fact.push(0, Err(Error::Provider { message: "connection refused".to_string() }));
	h.search.push(Ok(response(vec![recipe(Some("1"), "Soup")])));

	let outcome = h.session.submit("soup").await;

	tokio::time::sleep(Duration::from_millis(50)).await;

	let later = h.session.snapshot();

	assert_eq!(outcome.status, SearchStatus::Success);
	assert_eq!(later.status, SearchStatus::Success);
	assert_eq!(later.recipes, outcome.recipes);
	assert_eq!(later.side_fact, None);
	assert_eq!(h.fact.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn side_fact_lands_after_primary_without_changing_status() {
	let h = harness();

	h.fact.push(30, Ok(Some("Honey never spoils.".to_string())));
	h.search.push(Ok(response(Vec::new())));

	let outcome = h.session.submit("honey").await;

	assert_eq!(outcome.status, SearchStatus::Empty);

	let mut rx = h.session.subscribe();
	let with_fact = tokio::time::timeout(
		Duration::from_secs(2),
		rx.wait_for(|outcome| outcome.side_fact.is_some()),
	)
	.await
	.expect("Timed out waiting for side fact.")
	.expect("Outcome channel closed.")
	.clone();

	assert_eq!(with_fact.side_fact.as_deref(), Some("Honey never spoils."));
	assert_eq!(with_fact.status, SearchStatus::Empty);
}

#[tokio::test]
async fn side_fact_from_older_submit_is_discarded() {
	let h = harness();

	h.fact.push(80, Ok(Some("Stale fact.".to_string())));
	h.fact.push(0, Ok(None));
	h.search.push(Ok(response(vec![recipe(Some("1"), "A")])));
	h.search.push(Ok(response(vec![recipe(Some("2"), "B")])));

	h.session.submit("a").await;

	tokio::time::timeout(Duration::from_secs(2), async {
		while h.fact.calls.load(Ordering::SeqCst) < 1 {
			tokio::task::yield_now().await;
		}
	})
	.await
	.expect("Side fact was never requested.");

	h.session.submit("b").await;

	tokio::time::sleep(Duration::from_millis(150)).await;

	let outcome = h.session.snapshot();

	assert_eq!(outcome.generation, 2);
	assert_eq!(outcome.side_fact, None);
}

#[tokio::test]
async fn default_persona_is_sent_but_not_persisted() {
	let h = harness();

	h.session.submit("tacos").await;

	assert_eq!(h.search.queries()[0].persona, PersonaTag::BusyProfessional);
	assert_eq!(h.store.get().expect("get failed"), None);
}

#[tokio::test]
async fn stored_persona_is_resolved_at_submit_time() {
	let h = harness();

	h.store.set(PersonaTag::Student).expect("set failed");
	h.session.submit("ramen").await;

	assert_eq!(h.search.queries()[0].persona, PersonaTag::Student);
}

#[tokio::test]
async fn filters_are_composed_and_sent_structurally() {
	let h = harness();

	h.session.update_filters(|filters| {
		filters.time = Some(TimeBucket::Under30Min);
		filters.add_ingredient("Egg");
	});
	h.session.submit(" breakfast ").await;

	let queries = h.search.queries();
	let query = &queries[0];

	assert_eq!(query.text, "breakfast");
	assert_eq!(query.composed, "breakfast, Under 30 min, egg");
	assert_eq!(query.filters.ingredients(), ["egg"]);

	h.session.clear_filters();

	assert!(h.session.filters().is_empty());
}

#[tokio::test]
async fn local_catalog_serves_offline_searches() {
	let session = SearchSession::new(
		Providers::local(),
		Arc::new(MemoryPersonaStore::new()),
		PersonaTag::default(),
	);
	let outcome = session.submit("shrimp").await;

	assert_eq!(outcome.status, SearchStatus::Success);
	assert_eq!(titles(&outcome), vec!["Spicy Shrimp Stir-Fry"]);
	assert_eq!(outcome.side_fact, None);

	session.update_filters(|filters| filters.time = Some(TimeBucket::Under20Min));

	let outcome = session.submit("").await;
	let minutes: Vec<_> = outcome.recipes.iter().map(|recipe| recipe.ready_in_minutes).collect();

	assert_eq!(minutes, vec![Some(18), Some(15), Some(20)]);

	let outcome = session.submit("durian").await;

	assert_eq!(outcome.status, SearchStatus::Empty);
}
