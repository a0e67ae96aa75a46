use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub remote: Remote,
	pub persona: Persona,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

/// The remote recipe-ranking service and its side-fact endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Remote {
	/// Base URL without a trailing slash, e.g. "http://localhost:8000/api/recipes".
	pub api_base: String,
	#[serde(default = "default_search_path")]
	pub search_path: String,
	#[serde(default = "default_fact_path")]
	pub fact_path: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	/// The side fact is cosmetic, so it gets a much shorter budget than the search itself.
	#[serde(default = "default_fact_timeout_ms")]
	pub fact_timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Persona {
	pub store_path: PathBuf,
	#[serde(default = "default_persona")]
	pub default: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	/// "remote" or "local".
	#[serde(default = "default_search_mode")]
	pub mode: String,
}
impl Default for Search {
	fn default() -> Self {
		Self { mode: default_search_mode() }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_search_path() -> String {
	"/search".to_string()
}

fn default_fact_path() -> String {
	"/random-fact".to_string()
}

fn default_timeout_ms() -> u64 {
	15_000
}

fn default_fact_timeout_ms() -> u64 {
	3_000
}

fn default_persona() -> String {
	"busy_professional".to_string()
}

fn default_search_mode() -> String {
	"remote".to_string()
}
