//! Disposable Postgres databases and catalog fixtures for integration tests.

mod error;

pub use error::{Error, Result};

use std::{env, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor, PgPool, Postgres, QueryBuilder,
	postgres::{PgConnectOptions, PgConnection},
};
use uuid::Uuid;

pub const DSN_ENV: &str = "EVOLF_PG_DSN";

const ADMIN_DATABASES: [&str; 2] = ["postgres", "template1"];

/// Reads the base DSN for database-backed tests. `None` means those tests should skip.
pub fn env_dsn() -> Option<String> {
	env::var(DSN_ENV).ok().filter(|dsn| !dsn.trim().is_empty())
}

/// A freshly created database, dropped again when the value goes away.
pub struct TestDatabase {
	name: String,
	dsn: String,
	admin: PgConnectOptions,
	dropped: bool,
}
impl TestDatabase {
	pub async fn new(base_dsn: &str) -> Result<Self> {
		let base = PgConnectOptions::from_str(base_dsn)
			.map_err(|err| Error::InvalidDsn(err.to_string()))?;
		let (admin, mut conn) = connect_admin(&base).await?;
		let name = format!("evolf_test_{}", Uuid::new_v4().simple());

		conn.execute(format!(r#"CREATE DATABASE "{name}""#).as_str()).await?;

		let dsn = base.database(&name).to_url_lossy().to_string();

		Ok(Self { name, dsn, admin, dropped: false })
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	/// Drops the database now and reports failures, instead of best effort on drop.
	pub async fn cleanup(mut self) -> Result<()> {
		drop_database(&self.name, &self.admin).await?;

		self.dropped = true;

		Ok(())
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let name = self.name.clone();
		let admin = self.admin.clone();
		// Drop may run inside a runtime, so the cleanup gets its own thread and runtime.
		let worker = thread::spawn(move || {
			let runtime =
				match tokio::runtime::Builder::new_current_thread().enable_all().build() {
					Ok(runtime) => runtime,
					Err(err) => {
						eprintln!("Skipping cleanup of {name}: {err}.");

						return;
					},
				};

			if let Err(err) = runtime.block_on(drop_database(&name, &admin)) {
				eprintln!("Failed to drop {name}: {err}.");
			}
		});

		let _ = worker.join();
	}
}

/// The attributes catalog tests usually care about. Everything else stays empty.
#[derive(Clone, Debug, Default)]
pub struct SeedRecord<'a> {
	pub evolf_id: &'a str,
	pub receptor: &'a str,
	pub ligand: &'a str,
	pub species: &'a str,
	pub class: &'a str,
	pub mutation_status: &'a str,
}

/// Inserts `records` in order, so `row_id` order matches slice order.
pub async fn seed_records(pool: &PgPool, records: &[SeedRecord<'_>]) -> Result<()> {
	if records.is_empty() {
		return Ok(());
	}

	let mut builder = QueryBuilder::<Postgres>::new(
		"INSERT INTO evolf_records (evolf_id, receptor, ligand, species, class, mutation_status) ",
	);

	builder.push_values(records, |mut row, record| {
		row.push_bind(record.evolf_id)
			.push_bind(record.receptor)
			.push_bind(record.ligand)
			.push_bind(record.species)
			.push_bind(record.class)
			.push_bind(record.mutation_status);
	});
	builder.build().execute(pool).await?;

	Ok(())
}

async fn connect_admin(base: &PgConnectOptions) -> Result<(PgConnectOptions, PgConnection)> {
	let mut failures = Vec::new();

	for database in ADMIN_DATABASES {
		let options = base.clone().database(database);

		match PgConnection::connect_with(&options).await {
			Ok(conn) => return Ok((options, conn)),
			Err(err) => failures.push(format!("{database}: {err}")),
		}
	}

	Err(Error::NoAdminDatabase(failures.join("; ")))
}

async fn drop_database(name: &str, admin: &PgConnectOptions) -> Result<()> {
	let mut conn = PgConnection::connect_with(admin).await?;

	// Pooled connections from the test may still be open.
	sqlx::query(
		"\
SELECT pg_terminate_backend(pid)
FROM pg_stat_activity
WHERE datname = $1 AND pid <> pg_backend_pid()",
	)
	.bind(name)
	.execute(&mut conn)
	.await?;
	conn.execute(format!(r#"DROP DATABASE IF EXISTS "{name}""#).as_str()).await?;

	Ok(())
}
