//! Chunked page loading
//!
//! `loadPageChunk` returns a page a few dozen blocks at a time. Each response
//! carries a record-map fragment and the cursor to send next; an empty cursor
//! stack ends the page. Rounds are strictly sequential since the next cursor
//! only exists once the previous response has arrived.

use crate::error::{NotionError, Result};
use crate::transport::{Method, Transport};
use notion_types::de::null_default;
use notion_types::{Cursor, RecordMap};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const LOAD_PAGE_CHUNK: &str = "loadPageChunk";

/// Request body of `loadPageChunk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadPageChunkRequest {
    pub page_id: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub limit: u32,
    pub cursor: Cursor,
    pub vertical_columns: bool,
}

fn is_zero(limit: &u32) -> bool {
    *limit == 0
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadPageChunkResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub record_map: RecordMap,
    #[serde(default, deserialize_with = "null_default")]
    pub cursor: Cursor,
}

/// Fetch a single chunk.
pub async fn load_page_chunk<T>(
    transport: &T,
    page_id: &str,
    limit: u32,
    cursor: Cursor,
) -> Result<LoadPageChunkResponse>
where
    T: Transport + ?Sized,
{
    let request = LoadPageChunkRequest {
        page_id: page_id.to_string(),
        limit,
        cursor,
        vertical_columns: false,
    };
    let body = serde_json::to_vec(&request)
        .map_err(|e| NotionError::decode("loadPageChunk request", e))?;
    let bytes = transport
        .send(Method::POST, LOAD_PAGE_CHUNK, Some(body))
        .await?;
    serde_json::from_slice(&bytes).map_err(|e| NotionError::decode("loadPageChunk response", e))
}

/// Drives `loadPageChunk` until the server reports the last chunk.
pub struct ChunkPaginator<'a, T: Transport + ?Sized> {
    transport: &'a T,
    limit: u32,
    max_rounds: usize,
}

impl<'a, T: Transport + ?Sized> ChunkPaginator<'a, T> {
    pub fn new(transport: &'a T, limit: u32, max_rounds: usize) -> Self {
        Self {
            transport,
            limit,
            max_rounds,
        }
    }

    /// Collect one record-map fragment per round, in fetch order.
    ///
    /// Any failing round aborts the whole fetch and the fragments gathered so
    /// far are dropped. Stops with an error if the round limit is hit or the
    /// server hands back a cursor it already sent.
    pub async fn fetch_all(&self, page_id: &str) -> Result<Vec<RecordMap>> {
        let mut fragments = Vec::new();
        let mut cursor = Cursor::start();
        let mut seen_cursors: HashSet<String> = HashSet::new();

        loop {
            if fragments.len() >= self.max_rounds {
                return Err(NotionError::PaginationLimit {
                    page_id: page_id.to_string(),
                    rounds: self.max_rounds,
                });
            }
            let round = fragments.len() + 1;

            let response = load_page_chunk(self.transport, page_id, self.limit, cursor).await?;
            tracing::debug!(
                page_id,
                round,
                blocks = response.record_map.blocks.len(),
                "loaded page chunk"
            );

            fragments.push(response.record_map);
            cursor = response.cursor;
            if cursor.is_terminal() {
                break;
            }

            let key = serde_json::to_string(&cursor)
                .map_err(|e| NotionError::decode("loadPageChunk cursor", e))?;
            if !seen_cursors.insert(key) {
                return Err(NotionError::PaginationStalled {
                    page_id: page_id.to_string(),
                    round,
                });
            }
        }

        Ok(fragments)
    }
}
