use super::{from_sqlx, CredentialStore, NewCredential, StoreError, StoredCredential};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Connection, PgPool, Row};
use std::time::Duration;
use tracing::{info, info_span, Instrument};

const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

/// `admin_users` backed by Postgres.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool to `dsn`.
    ///
    /// # Errors
    /// Returns an error if the database is unreachable.
    pub async fn connect(dsn: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(max_connections)
            .max_lifetime(Duration::from_secs(60 * 2))
            .test_before_acquire(true)
            .connect(dsn)
            .await
            .context("Failed to connect to database")?;

        Ok(Self::new(pool))
    }

    /// Create `admin_users` if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the schema statements fail.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&self.pool)
            .await
            .context("Failed to apply admin_users schema")?;

        info!("admin_users schema applied");

        Ok(())
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn find(&self, email: &str) -> Result<StoredCredential, StoreError> {
        let query = "SELECT email, name, password_hash FROM admin_users WHERE email = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );

        let row = sqlx::query(query)
            .bind(email)
            .fetch_one(&self.pool)
            .instrument(span)
            .await
            .map_err(from_sqlx)?;

        Ok(StoredCredential {
            email: row.try_get("email").map_err(from_sqlx)?,
            name: row.try_get("name").map_err(from_sqlx)?,
            password_hash: row.try_get("password_hash").map_err(from_sqlx)?,
        })
    }

    async fn insert(&self, credential: NewCredential) -> Result<(), StoreError> {
        let query = "INSERT INTO admin_users (email, name, password_hash) VALUES ($1, $2, $3)";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );

        sqlx::query(query)
            .bind(&credential.email)
            .bind(&credential.name)
            .bind(&credential.password_hash)
            .execute(&self.pool)
            .instrument(span)
            .await
            .map_err(from_sqlx)?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let acquire_span = info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self
            .pool
            .acquire()
            .instrument(acquire_span)
            .await
            .map_err(from_sqlx)?;

        let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping().instrument(ping_span).await.map_err(from_sqlx)
    }
}
