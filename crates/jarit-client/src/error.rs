//! Error types for the JarIt API client.

use thiserror::Error;

/// Fixed notice written to the session store when the backend returns 401.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

/// Fixed message for any login failure; backend detail is never leaked here.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// Generic fallback when no usable message can be extracted.
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";

/// Fallback for transport failures with no message of their own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Errors returned by the JarIt client.
#[derive(Error, Debug)]
pub enum JaritError {
    /// HTTP transport failed before a response was obtained.
    #[error("{}", transport_message(.0))]
    Http(#[from] reqwest::Error),

    /// Backend returned 401; the session token has been cleared.
    #[error("{SESSION_EXPIRED_MESSAGE}")]
    Unauthorized,

    /// Login endpoint returned a non-success status.
    #[error("{INVALID_CREDENTIALS_MESSAGE}")]
    InvalidCredentials,

    /// Backend returned a non-2xx response.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body (or status text).
        message: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for JarIt client operations.
pub type Result<T> = std::result::Result<T, JaritError>;

pub(crate) fn transport_message(err: &reqwest::Error) -> String {
    let message = err.to_string();
    if message.is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

/// Extract a human-readable message from a backend error body.
///
/// FastAPI error payloads come in several shapes; precedence is:
/// `detail` as a list (first element's `msg`, else the element itself),
/// `detail` as a scalar, then `message`, then the status line, then a
/// generic fallback. An unparseable or empty body also falls through to
/// the status line.
pub(crate) fn extract_api_message(body: &str, status_text: &str) -> String {
    let fallback = || {
        if status_text.is_empty() {
            REQUEST_FAILED_MESSAGE.to_string()
        } else {
            status_text.to_string()
        }
    };

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback();
    };

    if let Some(detail) = value.get("detail") {
        if let Some(items) = detail.as_array() {
            let Some(first) = items.first() else {
                return REQUEST_FAILED_MESSAGE.to_string();
            };
            if let Some(msg) = first.get("msg").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            return stringify(first);
        }
        return stringify(detail);
    }

    if let Some(message) = value.get("message") {
        return stringify(message);
    }

    REQUEST_FAILED_MESSAGE.to_string()
}

fn stringify(value: &serde_json::Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_list_uses_msg_field() {
        let body = r#"{"detail":[{"msg":"field required","loc":["body","url"]}]}"#;
        assert_eq!(extract_api_message(body, "Unprocessable Entity"), "field required");
    }

    #[test]
    fn detail_list_falls_back_to_first_element() {
        let body = r#"{"detail":["something broke"]}"#;
        assert_eq!(extract_api_message(body, ""), "something broke");
    }

    #[test]
    fn empty_detail_list_is_generic() {
        assert_eq!(extract_api_message(r#"{"detail":[]}"#, ""), REQUEST_FAILED_MESSAGE);
    }

    #[test]
    fn scalar_detail_is_verbatim() {
        let body = r#"{"detail":"bad request"}"#;
        assert_eq!(extract_api_message(body, "Bad Request"), "bad request");
    }

    #[test]
    fn message_field_is_used_when_no_detail() {
        let body = r#"{"message":"rate limited"}"#;
        assert_eq!(extract_api_message(body, ""), "rate limited");
    }

    #[test]
    fn unparseable_body_uses_status_text() {
        assert_eq!(
            extract_api_message("<html>oops</html>", "Internal Server Error"),
            "Internal Server Error"
        );
    }

    #[test]
    fn unparseable_body_without_status_text_is_generic() {
        assert_eq!(extract_api_message("", ""), REQUEST_FAILED_MESSAGE);
    }

    #[test]
    fn json_body_without_known_fields_is_generic() {
        assert_eq!(extract_api_message(r#"{"oops":1}"#, "Bad Gateway"), REQUEST_FAILED_MESSAGE);
    }
}
