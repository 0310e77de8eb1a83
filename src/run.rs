//! Application execution logic.
//!
//! One run: read the previous file, fetch, parse, reconcile, render and
//! replace the file.

use thiserror::Error;

use prisma_edl::api::{AddressApi, ApiError, HttpClient, HttpError, ReqwestClient};
use prisma_edl::config::{ValidatedConfig, defaults};
use prisma_edl::edl::{self, ParseError, RenderOptions};
use prisma_edl::state::{FileStateStore, LoadResult, PersistedState, StateError, StateStore};
use prisma_edl::time::{Clock, SystemClock};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] HttpError),

    /// The API request failed.
    #[error("API request failed: {0}")]
    Api(#[source] ApiError),

    /// The API response could not be understood.
    #[error("Failed to parse API response: {0}")]
    Parse(#[source] ParseError),

    /// Failed to write the output file.
    #[error("Failed to save output file: {0}")]
    StateSave(#[source] StateError),
}

/// Executes one run against the production collaborators.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the request or parse
/// fails, or the output file cannot be written.
///
/// Excluded from coverage - requires network access.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let client =
        ReqwestClient::with_timeout(defaults::request_timeout()).map_err(RunError::Client)?;
    let store = FileStateStore::new(&config.output);

    execute_with(client, &store, &SystemClock, config).await
}

/// Executes one run with injected collaborators.
///
/// The previous file is read before the request is sent, and the new file
/// is written only after the response has been fully parsed, so a failed
/// request leaves the previous file untouched.
async fn execute_with<H, S, C>(
    client: H,
    store: &S,
    clock: &C,
    config: ValidatedConfig,
) -> Result<(), RunError>
where
    H: HttpClient,
    S: StateStore,
    C: Clock,
{
    let previous = load_previous(store);

    let api = AddressApi::new(client, config.endpoint, config.key);
    let raw = api.fetch(&config.request).await.map_err(RunError::Api)?;
    let retrieved_at = clock.now();

    let fetch = edl::parse(&raw, config.request, retrieved_at).map_err(RunError::Parse)?;
    tracing::info!(
        "Retrieved {} address(es) in {} zone(s)",
        fetch.address_set().len(),
        fetch.zones.len()
    );

    let reconciliation = edl::reconcile(&previous, fetch);
    for alert in &reconciliation.alerts {
        if alert.is_critical() {
            tracing::error!("{alert}");
        } else {
            tracing::warn!("{alert}");
        }
    }

    let contents = reconciliation
        .document
        .to_file_contents(RenderOptions::new(config.suppress_comments));

    store.save(contents).await.map_err(RunError::StateSave)?;
    tracing::info!(
        "Wrote iteration {} ({})",
        reconciliation.state.iteration,
        reconciliation.document.last_change
    );

    Ok(())
}

/// Reads the previous file, logging how it went.
fn load_previous(store: &impl StateStore) -> PersistedState {
    let result = store.load();
    match &result {
        LoadResult::Loaded(state) => {
            tracing::info!(
                "Previous iteration {} with {} address(es), last change: {}",
                state.iteration,
                state.addresses.len(),
                state.last_changed_at.as_deref().unwrap_or("unknown"),
            );
        }
        LoadResult::NotFound => {
            tracing::warn!("Previous file not found. Creating a new one.");
        }
        LoadResult::Foreign { first_line } => {
            tracing::warn!(
                "Previous file not written by prisma-edl (first line '{first_line}'), overwriting"
            );
        }
        LoadResult::Unreadable { reason } => {
            tracing::warn!("Previous file unreadable ({reason}), starting from iteration 0");
        }
    }
    result.into_state()
}
