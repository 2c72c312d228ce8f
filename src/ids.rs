//! Page id parsing.
//!
//! Accepts the forms users copy around: a hyphenated id, the bare 32-hex
//! form, or a page URL whose last path segment ends in the 32-hex id
//! (`https://www.notion.so/Some-Title-4c6a54c68b3e4ea2af9cfaabcc88d58d`).

use crate::error::{NotionError, Result};
use uuid::Uuid;

const HEX_ID_LEN: usize = 32;

/// Canonical (lowercase, hyphenated) block id for `input`.
pub fn parse_page_id(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let invalid = || NotionError::InvalidId {
        input: input.to_string(),
    };

    if let Ok(id) = Uuid::parse_str(trimmed) {
        return Ok(id.hyphenated().to_string());
    }

    let path = trimmed
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    let segment = path.rsplit('/').next().unwrap_or_default();
    if segment.len() < HEX_ID_LEN || !segment.is_char_boundary(segment.len() - HEX_ID_LEN) {
        return Err(invalid());
    }

    let tail = &segment[segment.len() - HEX_ID_LEN..];
    if !tail.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    Uuid::parse_str(tail)
        .map(|id| id.hyphenated().to_string())
        .map_err(|_| invalid())
}
