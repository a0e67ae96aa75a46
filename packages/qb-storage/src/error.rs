pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Persona store I/O failed at {path:?}.")]
	Io { path: std::path::PathBuf, source: std::io::Error },
	#[error("Persona store at {path:?} is not valid JSON.")]
	SerdeJson { path: std::path::PathBuf, source: serde_json::Error },
}
