pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid config: {message}")]
	InvalidConfig { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<qb_providers::Error> for Error {
	fn from(err: qb_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<qb_storage::Error> for Error {
	fn from(err: qb_storage::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}
