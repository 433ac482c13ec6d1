pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid test DSN: {0}")]
	InvalidDsn(String),
	#[error("No admin database accepted the connection: {0}")]
	NoAdminDatabase(String),
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
}
