//! Typed block: a raw block record plus the fields decoded from its
//! `properties` and `format` documents.

use notion_types::{BlockFormat, BlockType, InlineSpan, RawBlock};
use serde::Serialize;
use serde_json::{Map, Value};

/// Where a block is in tree resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveState {
    /// Not visited yet; properties and format are still undecoded
    #[default]
    Unresolved,
    /// Normalized, children being resolved
    InProgress,
    /// Normalized and children compacted; never touched again
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub parent_id: String,
    pub parent_table: String,
    /// Child ids; after resolution only the ids that resolved, in order
    pub content_ids: Vec<String>,
    pub alive: bool,
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<i64>,

    /// Untyped `properties` as received
    #[serde(skip)]
    pub properties: Map<String, Value>,
    /// Untyped `format` as received
    #[serde(skip)]
    pub format_raw: Option<Value>,

    /// Plain-text title; only set for `page`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Code body; only set for `code`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub code: String,
    /// Rich text for every other type that has a `title` property
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inline_content: Vec<InlineSpan>,
    /// `to_do` checkbox state
    pub is_checked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Proxied URL of `source`, for image blocks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<BlockFormat>,

    #[serde(skip)]
    pub(crate) state: ResolveState,
}

impl Block {
    pub fn state(&self) -> ResolveState {
        self.state
    }

    pub fn is_resolved(&self) -> bool {
        self.state == ResolveState::Resolved
    }
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        Self {
            id: raw.id,
            block_type: raw.block_type,
            parent_id: raw.parent_id,
            parent_table: raw.parent_table,
            content_ids: raw.content,
            alive: raw.alive,
            version: raw.version,
            space_id: raw.space_id,
            created_by: raw.created_by,
            created_time: raw.created_time,
            last_edited_by: raw.last_edited_by,
            last_edited_time: raw.last_edited_time,
            properties: raw.properties,
            format_raw: raw.format,
            title: String::new(),
            code: String::new(),
            inline_content: Vec::new(),
            is_checked: false,
            description: None,
            link: None,
            source: None,
            image_url: None,
            code_language: None,
            file_size: None,
            format: None,
            state: ResolveState::Unresolved,
        }
    }
}
