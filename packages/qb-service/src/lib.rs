pub mod lifecycle;
pub mod reconcile;

mod error;

pub use error::{Error, Result};
pub use lifecycle::{GENERIC_SEARCH_ERROR, SearchOutcome, SearchSession, SearchStatus};
pub use qb_providers::SearchResponse;
pub use reconcile::{Reconciled, reconcile};

use std::{future::Future, pin::Pin, sync::Arc};

use qb_config::Remote;
use qb_domain::{SearchQuery, catalog::reference_catalog, matching::search_catalog};
use qb_providers::{fact, search};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait SearchProvider
where
	Self: Send + Sync,
{
	fn search<'a>(&'a self, query: &'a SearchQuery) -> BoxFuture<'a, Result<SearchResponse>>;
}

/// Source of the cosmetic side fact shown while a search is loading.
pub trait FactProvider
where
	Self: Send + Sync,
{
	fn random_fact<'a>(&'a self) -> BoxFuture<'a, Result<Option<String>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub search: Arc<dyn SearchProvider>,
	pub fact: Arc<dyn FactProvider>,
}
impl Providers {
	pub fn new(search: Arc<dyn SearchProvider>, fact: Arc<dyn FactProvider>) -> Self {
		Self { search, fact }
	}

	pub fn remote(cfg: Remote) -> Self {
		let remote = Arc::new(RemoteProvider { cfg });

		Self { search: remote.clone(), fact: remote }
	}

	pub fn local() -> Self {
		let local = Arc::new(LocalCatalog);

		Self { search: local.clone(), fact: local }
	}
}

/// Talks to the ranking service over HTTP.
pub struct RemoteProvider {
	cfg: Remote,
}
impl SearchProvider for RemoteProvider {
	fn search<'a>(&'a self, query: &'a SearchQuery) -> BoxFuture<'a, Result<SearchResponse>> {
		Box::pin(async move { Ok(search::search(&self.cfg, query).await?) })
	}
}

impl FactProvider for RemoteProvider {
	fn random_fact<'a>(&'a self) -> BoxFuture<'a, Result<Option<String>>> {
		Box::pin(async move { Ok(fact::random_fact(&self.cfg).await?) })
	}
}

/// Offline provider backed by the reference catalog. It has no side facts.
pub struct LocalCatalog;
impl SearchProvider for LocalCatalog {
	fn search<'a>(&'a self, query: &'a SearchQuery) -> BoxFuture<'a, Result<SearchResponse>> {
		let recipes = search_catalog(reference_catalog(), &query.text, &query.filters);

		Box::pin(async move { Ok(SearchResponse { recipes, parsed_intent: None, message: None }) })
	}
}

impl FactProvider for LocalCatalog {
	fn random_fact<'a>(&'a self) -> BoxFuture<'a, Result<Option<String>>> {
		Box::pin(async { Ok(None) })
	}
}
