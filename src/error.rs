//! Crate-wide error type.
//!
//! Errors fall into four groups: configuration (missing API keys, checked
//! before any network call), network/API (transport failures and non-success
//! statuses from the standings or background-removal services), image
//! decode/encode, and input validation (empty entry lists, bad font data).
//! None of them are retried; each aborts only the operation that raised it.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An API key required for the requested feature is unset or empty.
    #[error("missing {0} API key")]
    MissingApiKey(&'static str),

    /// The HTTP transport failed (DNS, connect, TLS, ...).
    #[error("request failed: {0}")]
    Http(Box<ureq::Error>),

    /// A service answered with a non-success status.
    #[error("{service} returned status {status}: {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// A response arrived but did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The input image could not be decoded.
    #[error("failed to decode image: {0}")]
    ImageDecode(image::ImageError),

    /// The output image could not be encoded.
    #[error("failed to encode image: {0}")]
    ImageEncode(image::ImageError),

    /// The font data could not be parsed.
    #[error("invalid font data")]
    FontData,

    /// The renderer was given nothing to draw.
    #[error("no entries to render")]
    NoEntries,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Self::Http(Box::new(err))
    }
}
