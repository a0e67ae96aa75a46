pub mod fact;
pub mod search;

mod error;

pub use error::{Error, Result};
pub use search::SearchResponse;

use std::time::Duration;

use reqwest::{
	Client,
	header::{HeaderMap, HeaderName, HeaderValue},
};
use serde_json::{Map, Value};

pub fn default_headers(configured: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	for (key, value) in configured {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: format!("Default header '{key}' must be a string."),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, HeaderValue::from_str(raw)?);
	}

	Ok(headers)
}

fn client(timeout_ms: u64) -> Result<Client> {
	Ok(Client::builder().timeout(Duration::from_millis(timeout_ms)).build()?)
}
