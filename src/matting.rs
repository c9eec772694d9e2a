//! Background-removal HTTP client.
//!
//! The service takes a multipart upload of the image and answers with the
//! matted image blob, or a JSON error payload on failure. The call is never
//! retried; any failure aborts the filter operation that requested it.

use std::io::Read;

use crate::error::{Error, Result};

/// Capability to strip the background from an encoded image.
///
/// The filter engine depends on this trait rather than a concrete HTTP
/// client so the pixel passes can be tested with a stub.
pub trait BackgroundRemover {
    /// Returns the image with its background removed, re-encoded.
    fn remove_background(&self, image: &[u8]) -> Result<Vec<u8>>;
}

// ============================================================================
// RemoveBgClient
// ============================================================================

const DEFAULT_ENDPOINT: &str = "https://api.remove.bg/v1.0/removebg";
const BOUNDARY: &str = "----top8-renderer-multipart";

/// Client for the remove.bg API.
pub struct RemoveBgClient {
    api_key: String,
    endpoint: String,
}

impl RemoveBgClient {
    /// Creates a client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Creates a client from the `REMOVEBG_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var("REMOVEBG_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(Error::MissingApiKey("background removal"))?;
        Ok(Self::new(key))
    }

    /// Overrides the endpoint URL. Intended for tests.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl BackgroundRemover for RemoveBgClient {
    fn remove_background(&self, image: &[u8]) -> Result<Vec<u8>> {
        if self.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey("background removal"));
        }

        log::info!("requesting background removal ({} bytes)", image.len());

        let body = multipart_body(image);
        let response = ureq::post(&self.endpoint)
            .set("X-Api-Key", &self.api_key)
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .send_bytes(&body);

        let response = match response {
            Ok(resp) => resp,
            Err(ureq::Error::Status(status, resp)) => {
                // Error payloads are JSON; surface their text verbatim.
                let message = resp
                    .into_string()
                    .unwrap_or_else(|_| "unreadable error body".to_string());
                return Err(Error::Api {
                    service: "background removal",
                    status,
                    message,
                });
            }
            Err(err) => return Err(err.into()),
        };

        let mut bytes = Vec::new();
        response.into_reader().read_to_end(&mut bytes)?;
        log::info!("background removal returned {} bytes", bytes.len());
        Ok(bytes)
    }
}

/// Builds the multipart form: the image file plus `size=auto` and `type=auto`.
fn multipart_body(image: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(image.len() + 512);
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"image_file\"; filename=\"image.png\"\r\n\
          Content-Type: application/octet-stream\r\n\r\n",
    );
    body.extend_from_slice(image);
    body.extend_from_slice(b"\r\n");

    for (name, value) in [("size", "auto"), ("type", "auto")] {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_fails_before_any_call() {
        let client = RemoveBgClient::new("  ").with_endpoint("http://127.0.0.1:1/unused");
        let err = client.remove_background(b"png").unwrap_err();
        assert!(matches!(err, Error::MissingApiKey(_)));
    }

    #[test]
    fn multipart_body_contains_all_fields() {
        let body = multipart_body(b"IMAGEBYTES");
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("name=\"image_file\""));
        assert!(text.contains("IMAGEBYTES"));
        assert!(text.contains("name=\"size\"\r\n\r\nauto"));
        assert!(text.contains("name=\"type\"\r\n\r\nauto"));
        assert!(text.ends_with(&format!("--{BOUNDARY}--\r\n")));
    }
}
