use crate::{
    api,
    cli::telemetry,
    service::CredentialService,
    store::{CredentialStore, MemoryStore, PgStore},
};
use anyhow::Result;
use std::{fmt, sync::Arc};
use tracing::{info, warn};
use url::Url;

pub enum StoreBackend {
    Memory,
    Postgres {
        dsn: String,
        max_connections: u32,
        migrate: bool,
    },
}

impl fmt::Debug for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("Memory"),
            Self::Postgres {
                dsn,
                max_connections,
                migrate,
            } => f
                .debug_struct("Postgres")
                .field("dsn", &redact_dsn(dsn))
                .field("max_connections", max_connections)
                .field("migrate", migrate)
                .finish(),
        }
    }
}

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub store: StoreBackend,
}

/// Hide the password of a connection string for logging.
#[must_use]
pub fn redact_dsn(dsn: &str) -> String {
    match Url::parse(dsn) {
        Ok(mut url) => {
            if url.password().is_some() && url.set_password(Some("***")).is_err() {
                return "***".to_string();
            }
            url.to_string()
        }
        Err(_) => "***".to_string(),
    }
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database cannot be reached or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    info!("Starting with {:?}", args);

    let store: Arc<dyn CredentialStore> = match args.store {
        StoreBackend::Memory => {
            warn!("Using in-memory credential store, admins are lost on exit");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Postgres {
            dsn,
            max_connections,
            migrate,
        } => {
            let store = PgStore::connect(&dsn, max_connections).await?;
            if migrate {
                store.migrate().await?;
            }
            Arc::new(store)
        }
    };

    let result = api::new(args.port, CredentialService::new(store)).await;

    telemetry::shutdown_tracer();

    result
}
