//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action executed by the binary.

use crate::cli::actions::Action;
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;
    let cors_origin = matches
        .get_one::<String>("cors-origin")
        .cloned()
        .unwrap_or_else(|| "http://localhost:3000".to_string());

    Ok(Action::Server {
        port,
        dsn,
        cors_origin,
    })
}
