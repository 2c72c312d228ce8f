//! Collections (databases) and their views.

use crate::inline::InlineSpan;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A collection describes the schema and rows container of a database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collection {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub alive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<CollectionFormat>,
    /// Collection name as styled text runs
    #[serde(deserialize_with = "crate::de::null_default")]
    pub name: Vec<InlineSpan>,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub parent_id: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub parent_table: String,
    #[serde(rename = "schema", deserialize_with = "crate::de::null_default")]
    pub collection_schema: HashMap<String, CollectionColumnInfo>,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub version: i64,
}

impl Collection {
    /// Plain-text name (all runs concatenated).
    pub fn plain_name(&self) -> String {
        self.name.iter().map(|span| span.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionFormat {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub collection_page_properties: Vec<CollectionPageProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionPageProperty {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub property: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub visible: bool,
}

/// One column of a collection schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionColumnInfo {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub name: String,
    /// `title`, `text`, `number`, `multi_select`, ...
    #[serde(rename = "type", deserialize_with = "crate::de::null_default")]
    pub column_type: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub options: Vec<CollectionColumnOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionColumnOption {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub color: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub value: String,
}

/// A view (table, board, list, ...) onto a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionView {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub alive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<CollectionViewFormat>,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub page_sort: Vec<String>,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub parent_id: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub parent_table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<CollectionViewQuery>,
    #[serde(rename = "type", deserialize_with = "crate::de::null_default")]
    pub view_type: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub version: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionViewFormat {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub table_properties: Vec<crate::format::TableProperty>,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub table_wrap: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionViewQuery {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub aggregate: Vec<AggregateQuery>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateQuery {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub aggregation_type: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub property: String,
    #[serde(rename = "type", deserialize_with = "crate::de::null_default")]
    pub query_type: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub view_type: String,
}
