use std::{
	fs, io,
	path::{Path, PathBuf},
	sync::Mutex,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};
use qb_domain::PersonaTag;

pub const PERSONA_KEY: &str = "user_persona";

/// Durable slot holding the user's persona. Absent until something sets it.
pub trait PersonaStore
where
	Self: Send + Sync,
{
	fn get(&self) -> Result<Option<PersonaTag>>;

	fn set(&self, persona: PersonaTag) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersonaDocument {
	#[serde(default, rename = "user_persona")]
	persona: Option<String>,
}

/// Stores the persona as `{ "user_persona": "<tag>" }` in a JSON file.
#[derive(Debug, Clone)]
pub struct FilePersonaStore {
	path: PathBuf,
}
impl FilePersonaStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn read_document(&self) -> Result<Option<PersonaDocument>> {
		let raw = match fs::read_to_string(&self.path) {
			Ok(raw) => raw,
			Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
			Err(err) => return Err(Error::Io { path: self.path.clone(), source: err }),
		};

		if raw.trim().is_empty() {
			return Ok(None);
		}

		serde_json::from_str(&raw)
			.map(Some)
			.map_err(|err| Error::SerdeJson { path: self.path.clone(), source: err })
	}
}
impl PersonaStore for FilePersonaStore {
	fn get(&self) -> Result<Option<PersonaTag>> {
		let Some(document) = self.read_document()? else {
			return Ok(None);
		};
		let Some(raw) = document.persona else {
			return Ok(None);
		};

		match raw.parse::<PersonaTag>() {
			Ok(persona) => Ok(Some(persona)),
			Err(err) => {
				tracing::warn!(path = %self.path.display(), error = %err, "Ignoring stored persona.");

				Ok(None)
			},
		}
	}

	fn set(&self, persona: PersonaTag) -> Result<()> {
		let io_err = |source| Error::Io { path: self.path.clone(), source };

		if let Some(parent) = self.path.parent()
			&& !parent.as_os_str().is_empty()
		{
			fs::create_dir_all(parent).map_err(io_err)?;
		}

		let document = PersonaDocument { persona: Some(persona.as_str().to_string()) };
		let payload = serde_json::to_vec_pretty(&document)
			.map_err(|err| Error::SerdeJson { path: self.path.clone(), source: err })?;
		let staging = self.path.with_extension("json.tmp");

		fs::write(&staging, payload).map_err(io_err)?;
		fs::rename(&staging, &self.path).map_err(io_err)?;

		tracing::debug!(path = %self.path.display(), %persona, "Persona stored.");

		Ok(())
	}
}

#[derive(Debug, Default)]
pub struct MemoryPersonaStore {
	slot: Mutex<Option<PersonaTag>>,
}
impl MemoryPersonaStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_persona(persona: PersonaTag) -> Self {
		Self { slot: Mutex::new(Some(persona)) }
	}
}
impl PersonaStore for MemoryPersonaStore {
	fn get(&self) -> Result<Option<PersonaTag>> {
		Ok(*self.slot.lock().unwrap_or_else(|err| err.into_inner()))
	}

	fn set(&self, persona: PersonaTag) -> Result<()> {
		*self.slot.lock().unwrap_or_else(|err| err.into_inner()) = Some(persona);

		Ok(())
	}
}
