//! Error types for the sync client.
//!
//! Failures fall into three families: no response at all (`Network`), a
//! non-2xx response (`NotFound`, `Server`) and an undecodable body
//! (`Parse`). `NotFound` is split out because callers tell "the item is gone"
//! apart from other server failures.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SyncError {
    /// No response was received.
    #[error("could not reach the todo server: {0}")]
    Network(String),

    /// The server returned 404.
    #[error("todo not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("todo server returned HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("could not read the todo server's response: {0}")]
    Parse(String),

    /// The request payload could not be encoded.
    #[error("could not encode request: {0}")]
    Serialization(String),

    /// Submit was called with nothing but whitespace in the draft.
    #[error("nothing to add: the draft is empty")]
    EmptyDraft,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_message_carries_status() {
        let err = SyncError::Server {
            status: 409,
            body: "duplicate".to_string(),
        };
        assert_eq!(err.to_string(), "todo server returned HTTP 409: duplicate");
    }
}
