//! Store backend protocol types.
//!
//! Defines the JSON protocol used for communication between the evently
//! engine and store backend binaries over stdin/stdout. Timestamps on the
//! wire are RFC 3339 strings or `{seconds, nanoseconds}` maps (see
//! `event::instant`).

use serde::{Deserialize, Serialize};

/// Commands that store backends must implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Return every document in a collection.
    Query,
    /// Write a new document; the store assigns its id.
    Set,
}

/// Request sent from the engine to a backend.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from a backend to the engine.
///
/// `code` on the error arm is the store's own error identifier (e.g.
/// `permission-denied`), passed through opaquely into error signals.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { code: String, message: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap()
    }
}

impl Response<()> {
    pub fn error(code: &str, message: &str) -> String {
        serde_json::to_string(&Response::<()>::Error {
            code: code.to_string(),
            message: message.to_string(),
        })
        .unwrap()
    }
}

/// A raw store document: the store-assigned id plus an untyped field map.
/// Typed decoding into `Event` happens at the store client boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub fields: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_roundtrip() {
        let ok: Response<Vec<Document>> = serde_json::from_str(
            r#"{"status":"success","data":[{"id":"a1","fields":{"title":"Picnic"}}]}"#,
        )
        .unwrap();
        match ok {
            Response::Success { data } => {
                assert_eq!(data.len(), 1);
                assert_eq!(data[0].id, "a1");
            }
            Response::Error { .. } => panic!("expected success arm"),
        }

        let err: Response<Vec<Document>> =
            serde_json::from_str(&Response::error("unavailable", "backend down")).unwrap();
        match err {
            Response::Error { code, message } => {
                assert_eq!(code, "unavailable");
                assert_eq!(message, "backend down");
            }
            Response::Success { .. } => panic!("expected error arm"),
        }
    }
}
