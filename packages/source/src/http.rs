//! Single-shot HTTP helper.
//!
//! All fetchers go through [`send_text`] instead of calling
//! `reqwest::RequestBuilder::send()` directly, so status checks, timeout
//! classification, and failure logging behave the same for every source.
//! Requests are never retried.

use std::time::Duration;

use crate::SourceError;

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 500;

/// Sends a request and returns the response body as a `String`.
///
/// `timeout` is only used to describe a transport timeout; the deadline
/// itself is enforced by the client.
///
/// # Errors
///
/// Returns [`SourceError::Timeout`] if the client deadline elapsed,
/// [`SourceError::Status`] for a non-2xx response, and
/// [`SourceError::Http`] for any other transport or body-read failure.
pub async fn send_text(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<String, SourceError> {
    let response = request
        .send()
        .await
        .map_err(|e| classify_transport_error(e, timeout))?;

    let url = response.url().to_string();
    let status = response.status();

    if !status.is_success() {
        let preview = response
            .text()
            .await
            .map(|body| preview(&body))
            .unwrap_or_default();
        log::error!(
            "Request failed.\n  \
             url: {url}\n  \
             status: {status}\n  \
             body preview: {preview}"
        );
        return Err(SourceError::Status { status, url });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    match response.text().await {
        Ok(text) => {
            log::debug!(
                "Fetched {} bytes from {url} (content-type: {content_type:?})",
                text.len()
            );
            Ok(text)
        }
        Err(e) => {
            log::error!(
                "Response body read failed.\n  \
                 url: {url}\n  \
                 status: {status}\n  \
                 content-type: {content_type:?}\n  \
                 error: {e}"
            );
            Err(classify_transport_error(e, timeout))
        }
    }
}

fn classify_transport_error(e: reqwest::Error, timeout: Duration) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout { after: timeout }
    } else {
        SourceError::Http(e)
    }
}

/// First [`BODY_PREVIEW_LEN`] bytes of `text`, cut on a char boundary.
#[must_use]
pub fn preview(text: &str) -> String {
    if text.len() <= BODY_PREVIEW_LEN {
        return text.to_string();
    }
    let mut end = BODY_PREVIEW_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_not_truncated() {
        assert_eq!(preview("{\"error\":\"bad\"}"), "{\"error\":\"bad\"}");
    }

    #[test]
    fn long_bodies_truncate_on_char_boundary() {
        let body = "é".repeat(400);
        let p = preview(&body);
        assert!(p.ends_with("..."));
        assert!(p.len() <= BODY_PREVIEW_LEN + 3);
        assert!(p.trim_end_matches("...").chars().all(|c| c == 'é'));
    }
}
