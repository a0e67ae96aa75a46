mod error;

pub mod persona;

pub use error::{Error, Result};
pub use persona::{FilePersonaStore, MemoryPersonaStore, PERSONA_KEY, PersonaStore};
