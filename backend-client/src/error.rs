//! Failure taxonomy for the listings request.
//!
//! Three categories, each recoverable by the caller: the server answered
//! with a failure status, no response arrived at all, or the request could
//! not be built or dispatched.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Category of a [`FetchError`], for log fields and message selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// A response arrived with a non-success status.
    ServerError,
    /// The request went out but no (complete) response came back.
    NetworkUnreachable,
    /// Anything local: bad URL, client construction, dispatch failure.
    UnexpectedError,
}

impl FetchErrorKind {
    /// Machine-readable code for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServerError => "SERVER_ERROR",
            Self::NetworkUnreachable => "NETWORK_UNREACHABLE",
            Self::UnexpectedError => "UNEXPECTED_ERROR",
        }
    }
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("server responded with HTTP {status}")]
    Server { status: u16 },

    #[error("no response from {url}")]
    Unreachable {
        url: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("could not issue request: {message}")]
    Unexpected {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Server { .. } => FetchErrorKind::ServerError,
            Self::Unreachable { .. } => FetchErrorKind::NetworkUnreachable,
            Self::Unexpected { .. } => FetchErrorKind::UnexpectedError,
        }
    }

    pub fn server(status: u16) -> Self {
        Self::Server { status }
    }

    pub fn unreachable(url: impl Into<String>) -> Self {
        Self::Unreachable {
            url: url.into(),
            source: None,
        }
    }

    pub fn unreachable_with_source(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Unreachable {
            url: url.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
            source: None,
        }
    }

    pub fn unexpected_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Unexpected {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The error and every `source()` below it, joined for one log field.
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut next = std::error::Error::source(self);
        while let Some(err) = next {
            out.push_str(": ");
            out.push_str(&err.to_string());
            next = err.source();
        }
        out
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kinds_map_one_to_one() {
        assert_eq!(FetchError::server(500).kind(), FetchErrorKind::ServerError);
        assert_eq!(
            FetchError::unreachable("http://x").kind(),
            FetchErrorKind::NetworkUnreachable
        );
        assert_eq!(
            FetchError::unexpected("bad url").kind(),
            FetchErrorKind::UnexpectedError
        );
    }

    #[test]
    fn chain_includes_sources() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = FetchError::unreachable_with_source("http://localhost:3000/anuncios", io);
        assert_eq!(
            err.chain(),
            "no response from http://localhost:3000/anuncios: refused"
        );
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(FetchErrorKind::ServerError.as_str(), "SERVER_ERROR");
        assert_eq!(FetchErrorKind::NetworkUnreachable.to_string(), "NETWORK_UNREACHABLE");
        assert_eq!(FetchErrorKind::UnexpectedError.as_str(), "UNEXPECTED_ERROR");
    }
}
