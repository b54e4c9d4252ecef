//! Failure taxonomy shared by every stage of the pipeline.
//!
//! Each stage reports its own narrow error type; [`Error`] joins them so a
//! caller can tell "no such place" from "network is down" from "the provider
//! changed its format".

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("could not parse {context} data: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not parse {context} data: {reason}")]
    Invalid {
        context: &'static str,
        reason: String,
    },
}

impl ParseError {
    pub(crate) fn invalid(context: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            context,
            reason: reason.into(),
        }
    }
}

/// The geocoder could not answer at all, as opposed to answering "no match".
#[derive(Debug, thiserror::Error)]
pub enum LookupFailed {
    #[error("location lookup failed: {0}")]
    Transport(#[from] TransportError),

    #[error("location lookup failed: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no location found for '{place}'")]
    NotFound { place: String },

    #[error(transparent)]
    LookupFailed(#[from] LookupFailed),

    #[error("weather request failed: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Cut a response body down to something that fits in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
