//! notion.so client
//!
//! Read-only access to pages through the private v3 API:
//! chunked fetch -> merge -> resolve. A client holds no per-page state, so
//! one instance can serve concurrent fetches from separate tasks.

use crate::block::Block;
use crate::config::ClientConfig;
use crate::error::{NotionError, Result};
use crate::ids::parse_page_id;
use crate::merge::merge_record_maps;
use crate::paginator::{self, ChunkPaginator, LoadPageChunkResponse};
use crate::resolve::{PageTree, Resolver};
use crate::transport::{HttpTransport, Method, Transport};
use notion_types::de::null_default;
use notion_types::{
    Collection, CollectionView, Cursor, RawBlock, RecordMap, RecordRequest, Space, User,
    WithRole,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

pub const GET_RECORD_VALUES: &str = "getRecordValues";

/// A fetched page: the resolved block tree plus the other record tables
/// that came back with it.
#[derive(Debug)]
pub struct Page {
    pub tree: PageTree,
    pub spaces: HashMap<String, WithRole<Space>>,
    pub users: HashMap<String, WithRole<User>>,
    pub collections: HashMap<String, WithRole<Collection>>,
    pub collection_views: HashMap<String, WithRole<CollectionView>>,
}

#[derive(Debug, Serialize)]
struct GetRecordValuesRequest<'a> {
    requests: &'a [RecordRequest],
}

#[derive(Debug, Deserialize)]
struct GetRecordValuesResponse {
    #[serde(default, deserialize_with = "null_default")]
    results: Vec<WithRole<Value>>,
}

#[derive(Clone)]
pub struct NotionClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl NotionClient {
    /// Client over HTTP, configured by `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport<T>(config: ClientConfig, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch every chunk of a page and resolve it into a tree.
    #[instrument(skip(self))]
    pub async fn get_page(&self, page_id: &str) -> Result<Page> {
        let fragments = ChunkPaginator::new(
            self.transport.as_ref(),
            self.config.page_limit,
            self.config.max_rounds,
        )
        .fetch_all(page_id)
        .await?;
        let rounds = fragments.len();

        let RecordMap {
            blocks,
            spaces,
            users,
            collections,
            collection_views,
        } = merge_record_maps(fragments);

        let blocks: HashMap<String, Block> = blocks
            .into_iter()
            .filter_map(|(id, record)| record.value.map(|raw| (id, Block::from(raw))))
            .collect();
        let tree = Resolver::new(blocks).into_tree(page_id)?;

        if !tree.decode_errors().is_empty() {
            tracing::warn!(
                failures = tree.decode_errors().len(),
                "some blocks could not be fully decoded"
            );
        }
        tracing::info!(rounds, blocks = tree.len(), "page loaded");

        Ok(Page {
            tree,
            spaces,
            users,
            collections,
            collection_views,
        })
    }

    /// One `loadPageChunk` round.
    pub async fn load_page_chunk(
        &self,
        page_id: &str,
        limit: u32,
        cursor: Cursor,
    ) -> Result<LoadPageChunkResponse> {
        paginator::load_page_chunk(self.transport.as_ref(), page_id, limit, cursor).await
    }

    /// Fetch records by table and id, in request order.
    pub async fn get_record_values(
        &self,
        requests: &[RecordRequest],
    ) -> Result<Vec<WithRole<Value>>> {
        let body = serde_json::to_vec(&GetRecordValuesRequest { requests })
            .map_err(|e| NotionError::decode("getRecordValues request", e))?;
        let bytes = self
            .transport
            .send(Method::POST, GET_RECORD_VALUES, Some(body))
            .await?;
        let response: GetRecordValuesResponse = serde_json::from_slice(&bytes)
            .map_err(|e| NotionError::decode("getRecordValues response", e))?;
        Ok(response.results)
    }

    /// Fetch raw blocks by id. Unreadable blocks come back with no value.
    pub async fn get_blocks<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<WithRole<RawBlock>>> {
        let requests: Vec<RecordRequest> =
            ids.iter().map(|id| RecordRequest::block(id.as_ref())).collect();

        self.get_record_values(&requests)
            .await?
            .into_iter()
            .map(|record| {
                let value = record
                    .value
                    .map(serde_json::from_value::<RawBlock>)
                    .transpose()
                    .map_err(|e| NotionError::decode("block record", e))?;
                Ok(WithRole {
                    role: record.role,
                    value,
                })
            })
            .collect()
    }

    /// Canonical id of the page named by `input` (id or page URL), checking
    /// the caller can read it.
    #[instrument(skip(self))]
    pub async fn resolve_page_id(&self, input: &str) -> Result<String> {
        let id = parse_page_id(input)?;
        let record = self.get_blocks(&[id.as_str()]).await?.into_iter().next();

        match record {
            Some(WithRole {
                value: Some(block), ..
            }) if !block.id.is_empty() => Ok(block.id),
            Some(WithRole { value: Some(_), .. }) => Ok(id),
            Some(WithRole { role, value: None }) => Err(NotionError::AccessDenied { id, role }),
            None => Err(NotionError::AccessDenied {
                id,
                role: String::new(),
            }),
        }
    }
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("base_url", &self.config.base_url)
            .field("page_limit", &self.config.page_limit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notion_types::TABLE_BLOCK;
    use serde_json::json;

    #[test]
    fn test_record_values_request_shape() {
        let requests = [RecordRequest::block("b1")];
        let body = serde_json::to_value(GetRecordValuesRequest {
            requests: &requests,
        })
        .unwrap();
        assert_eq!(body, json!({"requests": [{"table": TABLE_BLOCK, "id": "b1"}]}));
    }

    #[test]
    fn test_debug_hides_token() {
        let config = ClientConfig::new().with_token("secret");
        let client = NotionClient::new(config).unwrap();
        assert!(!format!("{client:?}").contains("secret"));
    }
}
