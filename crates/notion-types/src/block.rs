//! Raw block records and the block type tag.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Block type tag.
///
/// Known tags get their own variant; anything the server invents later lands
/// in `Other` and round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    Page,
    Text,
    Bookmark,
    Gist,
    BulletedList,
    NumberedList,
    Toggle,
    Todo,
    Divider,
    Image,
    Header,
    SubHeader,
    SubSubHeader,
    Quote,
    Comment,
    Code,
    /// Multi-column container; its children are `Column` blocks
    ColumnList,
    Column,
    Table,
    CollectionView,
    CollectionViewPage,
    Video,
    File,
    Embed,
    Callout,
    Other(String),
}

impl BlockType {
    /// Wire tag for this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Page => "page",
            Self::Text => "text",
            Self::Bookmark => "bookmark",
            Self::Gist => "gist",
            Self::BulletedList => "bulleted_list",
            Self::NumberedList => "numbered_list",
            Self::Toggle => "toggle",
            Self::Todo => "to_do",
            Self::Divider => "divider",
            Self::Image => "image",
            Self::Header => "header",
            Self::SubHeader => "sub_header",
            Self::SubSubHeader => "sub_sub_header",
            Self::Quote => "quote",
            Self::Comment => "comment",
            Self::Code => "code",
            Self::ColumnList => "column_list",
            Self::Column => "column",
            Self::Table => "table",
            Self::CollectionView => "collection_view",
            Self::CollectionViewPage => "collection_view_page",
            Self::Video => "video",
            Self::File => "file",
            Self::Embed => "embed",
            Self::Callout => "callout",
            Self::Other(tag) => tag,
        }
    }

    /// Whether the block's `source` refers to an image that should be proxied.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image)
    }
}

impl From<&str> for BlockType {
    fn from(tag: &str) -> Self {
        match tag {
            "page" => Self::Page,
            "text" => Self::Text,
            "bookmark" => Self::Bookmark,
            "gist" => Self::Gist,
            "bulleted_list" => Self::BulletedList,
            "numbered_list" => Self::NumberedList,
            "toggle" => Self::Toggle,
            "to_do" => Self::Todo,
            "divider" => Self::Divider,
            "image" => Self::Image,
            "header" => Self::Header,
            "sub_header" => Self::SubHeader,
            "sub_sub_header" => Self::SubSubHeader,
            "quote" => Self::Quote,
            "comment" => Self::Comment,
            "code" => Self::Code,
            "column_list" => Self::ColumnList,
            "column" => Self::Column,
            "table" => Self::Table,
            "collection_view" => Self::CollectionView,
            "collection_view_page" => Self::CollectionViewPage,
            "video" => Self::Video,
            "file" => Self::File,
            "embed" => Self::Embed,
            "callout" => Self::Callout,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for BlockType {
    fn from(tag: String) -> Self {
        match Self::from(tag.as_str()) {
            Self::Other(_) => Self::Other(tag),
            known => known,
        }
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for BlockType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for BlockType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

/// A block record exactly as the server returned it.
///
/// `properties` and `format` are left untyped; their shape depends on
/// `block_type` and is decoded later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "crate::de::null_default")]
    pub block_type: BlockType,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub parent_id: String,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub parent_table: String,
    /// Ordered child ids
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub content: Vec<String>,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub properties: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub alive: bool,
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub version: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<String>,
    /// Epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<i64>,
}

impl RawBlock {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_time.and_then(millis_to_utc)
    }

    pub fn last_edited_at(&self) -> Option<DateTime<Utc>> {
        self.last_edited_time.and_then(millis_to_utc)
    }
}

fn millis_to_utc(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}
