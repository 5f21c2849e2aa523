use anuncios_backend_client::FetchError;
use serde_json::Value;

/// Raw result of one listings request, before normalization.
pub type FetchOutcome = Result<Value, FetchError>;

#[derive(Debug)]
pub enum AppEvent {
    /// A listings request settled. `attempt` ties the result to the request
    /// that produced it.
    ListingsFetched { attempt: u64, outcome: FetchOutcome },

    /// Leave the main loop (e.g. on SIGINT while not in raw mode).
    ExitRequest,
}
