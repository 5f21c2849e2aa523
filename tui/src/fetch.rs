//! One-shot loading of the listings collection.
//!
//! [`FetchController`] owns the request lifecycle for a mounted screen:
//! `Idle -> Loading -> (Success | Error)`. The request runs on a spawned task
//! and reports back through the app event channel; the controller applies a
//! completion only if the screen is still mounted and the completion belongs
//! to the request in flight.

use std::sync::Arc;

use anuncios_async_utils::Liveness;
use anuncios_async_utils::MountScope;
use anuncios_backend_client::BackendClient;
use anuncios_backend_client::ClientSettings;
use anuncios_backend_client::FetchError;
use anuncios_backend_client::FetchErrorKind;
use anuncios_backend_client::ListingSource;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::app_event::AppEvent;
use crate::app_event::FetchOutcome;
use crate::app_event_sender::AppEventSender;
use crate::listing::ListingRecord;
use crate::normalize::normalize_listings;

pub const SERVER_ERROR_MESSAGE: &str = "server error while loading listings.";
pub const UNREACHABLE_MESSAGE: &str = "cannot reach server; verify endpoint and connectivity.";
pub const UNEXPECTED_MESSAGE: &str = "unexpected error.";

/// User-facing text for each failure category.
pub fn user_message(kind: FetchErrorKind) -> &'static str {
    match kind {
        FetchErrorKind::ServerError => SERVER_ERROR_MESSAGE,
        FetchErrorKind::NetworkUnreachable => UNREACHABLE_MESSAGE,
        FetchErrorKind::UnexpectedError => UNEXPECTED_MESSAGE,
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success(Vec<ListingRecord>),
    /// Carries the user-facing message, never the technical cause.
    Error(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn records(&self) -> Option<&[ListingRecord]> {
        match self {
            Self::Success(records) => Some(records),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }
}

/// Build the production [`ListingSource`] for `settings`.
pub fn source_from_settings(
    settings: &ClientSettings,
) -> Result<Arc<dyn ListingSource>, FetchError> {
    let client = BackendClient::new(settings.clone())?;
    Ok(Arc::new(client))
}

#[derive(Debug, Default)]
pub struct FetchController {
    state: FetchState,
    /// Attempts issued so far; the current one is `attempt`.
    attempt: u64,
    /// Attempt whose completion is still awaited.
    in_flight: Option<u64>,
    scope: MountScope,
}

impl FetchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    pub fn is_mounted(&self) -> bool {
        self.scope.is_alive()
    }

    /// Start the single fetch for this mount.
    ///
    /// The state is `Loading` before this returns. Returns the attempt number,
    /// or `None` if a fetch was already started.
    pub fn mount(&mut self, source: Arc<dyn ListingSource>, tx: AppEventSender) -> Option<u64> {
        let attempt = self.begin()?;
        debug!(attempt, endpoint = %source.endpoint(), "listings fetch started");

        let liveness = self.scope.liveness();
        tokio::spawn(async move {
            let mut guard = CompletionGuard::new(attempt, tx, liveness.clone());
            match liveness.run_while_alive(source.fetch_listings()).await {
                Ok(outcome) => guard.complete(outcome),
                Err(_) => {
                    guard.disarm();
                    debug!(attempt, "screen unmounted before listings arrived");
                }
            }
        });
        Some(attempt)
    }

    /// The request could not even be set up. Goes straight through `Loading`
    /// to the error state.
    pub fn mount_failed(&mut self, err: FetchError) -> Option<u64> {
        let attempt = self.begin()?;
        self.finish(attempt, Err(err));
        Some(attempt)
    }

    fn begin(&mut self) -> Option<u64> {
        if !matches!(self.state, FetchState::Idle) || !self.scope.is_alive() {
            debug!(state = self.state.label(), "listings fetch already started");
            return None;
        }
        self.attempt += 1;
        self.in_flight = Some(self.attempt);
        self.state = FetchState::Loading;
        Some(self.attempt)
    }

    /// Apply a completion. Returns whether the state changed.
    ///
    /// Ignored after unmount and for any attempt other than the one in
    /// flight, so each attempt updates state at most once.
    pub fn finish(&mut self, attempt: u64, outcome: FetchOutcome) -> bool {
        if !self.scope.is_alive() {
            debug!(attempt, "dropping listings completion after unmount");
            return false;
        }
        if self.in_flight != Some(attempt) {
            debug!(attempt, current = self.attempt, "ignoring stale listings completion");
            return false;
        }

        self.in_flight = None;
        self.state = match outcome {
            Ok(raw) => {
                let records = normalize_listings(&raw);
                if !raw.is_array() {
                    warn!(attempt, "listings payload is not an array; showing none");
                }
                info!(attempt, count = records.len(), "listings loaded");
                FetchState::Success(records)
            }
            Err(err) => {
                let kind = err.kind();
                warn!(
                    attempt,
                    kind = kind.as_str(),
                    error = %err.chain(),
                    "failed to load listings"
                );
                FetchState::Error(user_message(kind).to_string())
            }
        };
        true
    }

    /// End the mount. Later completions are discarded. Idempotent.
    pub fn unmount(&self) {
        self.scope.unmount();
    }
}

/// Reports a failure if the fetch task ends without delivering a result,
/// including when it panics, so the screen never stays in `Loading`.
struct CompletionGuard {
    attempt: u64,
    tx: Option<AppEventSender>,
    liveness: Liveness,
}

impl CompletionGuard {
    fn new(attempt: u64, tx: AppEventSender, liveness: Liveness) -> Self {
        Self {
            attempt,
            tx: Some(tx),
            liveness,
        }
    }

    fn complete(&mut self, outcome: FetchOutcome) {
        if let Some(tx) = self.tx.take() {
            tx.send(AppEvent::ListingsFetched {
                attempt: self.attempt,
                outcome,
            });
        }
    }

    fn disarm(&mut self) {
        self.tx = None;
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        let Some(tx) = self.tx.take() else {
            return;
        };
        if !self.liveness.is_alive() {
            return;
        }
        warn!(attempt = self.attempt, "listings task ended without a result");
        tx.send(AppEvent::ListingsFetched {
            attempt: self.attempt,
            outcome: Err(FetchError::unexpected("listings task ended without a result")),
        });
    }
}
