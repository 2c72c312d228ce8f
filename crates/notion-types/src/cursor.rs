//! Pagination cursor for `loadPageChunk`.
//!
//! The client never interprets a cursor beyond "is the stack empty". It must
//! echo back exactly what the server sent, so positions keep their numbers as
//! `serde_json::Number` and carry any unrecognised keys along.

use serde::{Deserialize, Serialize};

/// A position within a list of entities (usually blocks).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Opaque pagination state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub stack: Vec<Vec<StackPosition>>,
}

impl Cursor {
    /// The cursor sent with the first chunk request.
    pub fn start() -> Self {
        Self::default()
    }

    /// An empty stack means the server has no more chunks.
    pub fn is_terminal(&self) -> bool {
        self.stack.is_empty()
    }
}
