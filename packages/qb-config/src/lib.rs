mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Persona, Remote, Search, Service};

use std::{fs, path::Path};

pub const PERSONA_TAGS: [&str; 4] = ["busy_professional", "student", "health_focused", "family_cook"];

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(path, &raw)
}

pub fn parse(path: &Path, raw: &str) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let api_base = cfg.remote.api_base.as_str();

	if api_base.is_empty() {
		return Err(Error::Validation {
			key: "remote.api_base",
			message: "must be non-empty.".to_string(),
		});
	}
	if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
		return Err(Error::Validation {
			key: "remote.api_base",
			message: format!("must start with http:// or https://, got '{api_base}'."),
		});
	}

	for (key, path) in
		[("remote.search_path", &cfg.remote.search_path), ("remote.fact_path", &cfg.remote.fact_path)]
	{
		if !path.starts_with('/') {
			return Err(Error::Validation { key, message: "must start with '/'.".to_string() });
		}
	}
	for (key, timeout_ms) in
		[("remote.timeout_ms", cfg.remote.timeout_ms), ("remote.fact_timeout_ms", cfg.remote.fact_timeout_ms)]
	{
		if timeout_ms == 0 {
			return Err(Error::Validation { key, message: "must be greater than zero.".to_string() });
		}
	}
	for (key, value) in &cfg.remote.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				key: "remote.default_headers",
				message: format!("value for '{key}' must be a string."),
			});
		}
	}

	if cfg.persona.store_path.as_os_str().is_empty() {
		return Err(Error::Validation {
			key: "persona.store_path",
			message: "must be non-empty.".to_string(),
		});
	}
	if !PERSONA_TAGS.contains(&cfg.persona.default.as_str()) {
		return Err(Error::Validation {
			key: "persona.default",
			message: format!("must be one of {}.", PERSONA_TAGS.join(", ")),
		});
	}
	if !matches!(cfg.search.mode.as_str(), "remote" | "local") {
		return Err(Error::Validation {
			key: "search.mode",
			message: "must be one of remote or local.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.remote.api_base.trim().trim_end_matches('/').to_string();

	cfg.remote.api_base = trimmed;
	cfg.persona.default = cfg.persona.default.trim().to_ascii_lowercase();
	cfg.search.mode = cfg.search.mode.trim().to_ascii_lowercase();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
