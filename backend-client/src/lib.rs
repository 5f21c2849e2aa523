//! HTTP access to the listings collection (`GET /anuncios`).
//!
//! The client hands back the raw JSON payload and classifies every failure
//! into a [`FetchErrorKind`]; shaping the payload into records is the
//! caller's job.

mod client;
mod error;

pub use client::BackendClient;
pub use client::ClientSettings;
pub use client::DEFAULT_BASE_URL;
pub use client::DEFAULT_LISTINGS_PATH;
pub use client::ListingSource;
pub use client::decode_body;
pub use client::listings_url;
pub use error::FetchError;
pub use error::FetchErrorKind;
pub use error::Result;
