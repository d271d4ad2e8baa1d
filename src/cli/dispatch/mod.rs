//! Map validated CLI arguments to the action the binary runs.

use crate::cli::actions::{
    server::{Args, StoreBackend},
    Action,
};
use crate::cli::commands::{ARG_DSN, ARG_MAX_CONNECTIONS, ARG_MEMORY, ARG_MIGRATE, ARG_PORT};
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);

    let store = if matches.get_flag(ARG_MEMORY) {
        StoreBackend::Memory
    } else {
        let dsn = matches
            .get_one::<String>(ARG_DSN)
            .cloned()
            .context("missing required argument: --dsn")?;

        StoreBackend::Postgres {
            dsn,
            max_connections: matches
                .get_one::<u32>(ARG_MAX_CONNECTIONS)
                .copied()
                .unwrap_or(5),
            migrate: matches.get_flag(ARG_MIGRATE),
        }
    };

    Ok(Action::Server(Args { port, store }))
}
