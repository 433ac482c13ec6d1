pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("Text index responded with HTTP {status}.")]
	Status { status: u16 },
	#[error("{message}")]
	InvalidResponse { message: String },
}
impl Error {
	/// Whether the backend could not be reached or is not serving, as opposed to answering with
	/// something unusable.
	pub fn is_unavailable(&self) -> bool {
		match self {
			Self::Reqwest(err) => err.is_connect() || err.is_timeout() || err.is_request(),
			Self::Status { status } => *status >= 500 || *status == 429,
			Self::SerdeJson(_) | Self::InvalidResponse { .. } => false,
		}
	}
}
