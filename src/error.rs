//! Error types surfaced by lookup calls.

use thiserror::Error;

/// Errors returned to the caller of a lookup.
///
/// Nothing is retried or swallowed internally; every failure maps to exactly
/// one of these kinds and is returned from the call that hit it.
#[derive(Debug, Error)]
pub enum Error {
    /// The request was rejected before any network I/O.
    #[error("invalid lookup request: {0}")]
    Validation(String),

    /// The HTTP round trip itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered with a well-formed error envelope.
    #[error("remote API error {code}: {message}")]
    RemoteApi { code: String, message: String },

    /// The response body could not be interpreted.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// HTTP-level failures: connection errors, timeouts, non-success statuses.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failure or timeout from the HTTP client.
    #[error("request failed: {0}")]
    Request(#[from] wreq::Error),

    /// The endpoint answered with a non-success status code.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

/// Response-body failures: invalid XML or an envelope missing the elements
/// the ItemLookup schema guarantees.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body was not deserializable XML.
    #[error("invalid XML response: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// The XML was valid but an expected element was absent.
    #[error("response is missing element {0}")]
    MissingElement(&'static str),
}
