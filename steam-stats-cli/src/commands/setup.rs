use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use steam_stats_core::names::{NAMESPACE, TABLES};
use steam_stats_db::DocumentStore;

use crate::CliError;

/// Create the namespace and its tables.
pub(crate) fn run_setup(store: &dyn DocumentStore) -> Result<(), CliError> {
    let report = steam_stats_jobs::setup(store, NAMESPACE, &TABLES)?;

    let namespace_state = if report.namespace_created {
        "created".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "exists".if_supports_color(Stdout, |t| t.dimmed()).to_string()
    };
    log::info!("  Namespace {}: {}", NAMESPACE, namespace_state);

    for table in &report.tables_created {
        log::info!(
            "  Table {}.{}: {}",
            NAMESPACE,
            table,
            "created".if_supports_color(Stdout, |t| t.green()),
        );
    }
    for table in &report.tables_existing {
        log::info!(
            "  Table {}.{}: {}",
            NAMESPACE,
            table,
            "exists".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    Ok(())
}
