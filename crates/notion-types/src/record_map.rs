//! Record maps: the multi-table snapshot returned by chunk and record loads.

use crate::block::RawBlock;
use crate::collection::{Collection, CollectionView};
use crate::space::Space;
use crate::user::User;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A record paired with the caller's role on it.
///
/// `value` is `None` when the caller has no access to the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithRole<T> {
    #[serde(default, deserialize_with = "crate::de::null_default")]
    pub role: String,
    #[serde(default)]
    pub value: Option<T>,
}

impl<T> WithRole<T> {
    pub fn new(role: impl Into<String>, value: T) -> Self {
        Self {
            role: role.into(),
            value: Some(value),
        }
    }
}

/// Blocks, spaces, users, collections and collection views keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMap {
    #[serde(rename = "block", default, deserialize_with = "crate::de::null_default")]
    pub blocks: HashMap<String, WithRole<RawBlock>>,
    #[serde(rename = "space", default, deserialize_with = "crate::de::null_default")]
    pub spaces: HashMap<String, WithRole<Space>>,
    #[serde(rename = "notion_user", default, deserialize_with = "crate::de::null_default")]
    pub users: HashMap<String, WithRole<User>>,
    #[serde(rename = "collection", default, deserialize_with = "crate::de::null_default")]
    pub collections: HashMap<String, WithRole<Collection>>,
    #[serde(rename = "collection_view", default, deserialize_with = "crate::de::null_default")]
    pub collection_views: HashMap<String, WithRole<CollectionView>>,
}

impl RecordMap {
    /// Total number of records across all tables.
    pub fn len(&self) -> usize {
        self.blocks.len()
            + self.spaces.len()
            + self.users.len()
            + self.collections.len()
            + self.collection_views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Readable block for `id`, if present and not access-denied.
    pub fn block(&self, id: &str) -> Option<&RawBlock> {
        self.blocks.get(id).and_then(|b| b.value.as_ref())
    }
}

/// One entry of a `getRecordValues` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRequest {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub table: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub id: String,
}

impl RecordRequest {
    pub fn block(id: impl Into<String>) -> Self {
        Self {
            table: crate::TABLE_BLOCK.to_string(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_map_tolerates_missing_tables_and_null_values() {
        let rm: RecordMap = serde_json::from_value(json!({
            "block": {
                "p1": {"role": "reader", "value": {"id": "p1", "type": "page", "alive": true}},
                "hidden": {"role": "none"}
            }
        }))
        .unwrap();

        assert_eq!(rm.blocks.len(), 2);
        assert!(rm.spaces.is_empty());
        assert!(rm.block("p1").is_some());
        assert!(rm.block("hidden").is_none());
        assert_eq!(rm.len(), 2);
    }

    #[test]
    fn test_nulls_in_every_table_decode_as_defaults() {
        let rm: RecordMap = serde_json::from_value(json!({
            "block": {
                "b1": {"role": "reader", "value": {"id": "b1", "type": "text", "content": null, "parent_id": null}},
                "b2": {"role": null, "value": null}
            },
            "space": {
                "s1": {"role": "editor", "value": {"id": "s1", "name": null, "pages": null, "permissions": [{"role": "editor", "type": null, "user_id": null}]}}
            },
            "notion_user": {
                "u1": {"role": "reader", "value": {"id": "u1", "email": "a@example.com", "profile_photo": null, "locale": null, "onboarding_completed": null}}
            },
            "collection": {
                "c1": {"role": "reader", "value": {"id": "c1", "name": null, "schema": {"title": {"name": "Name", "type": "title", "options": null}}, "format": null}}
            },
            "collection_view": {
                "v1": {"role": "reader", "value": {"id": "v1", "type": "table", "page_sort": null, "format": {"table_properties": null, "table_wrap": null}, "query": {"aggregate": null}}}
            }
        }))
        .unwrap();

        assert!(rm.block("b1").unwrap().content.is_empty());
        assert_eq!(rm.blocks["b2"].role, "");
        assert!(rm.block("b2").is_none());

        let space = rm.spaces["s1"].value.as_ref().unwrap();
        assert!(space.pages.is_empty());
        assert_eq!(space.permissions[0].permission_type, "");

        let user = rm.users["u1"].value.as_ref().unwrap();
        assert_eq!(user.profile_photo, "");
        assert_eq!(user.display_name(), "a@example.com");

        let collection = rm.collections["c1"].value.as_ref().unwrap();
        assert!(collection.name.is_empty());
        assert!(collection.collection_schema["title"].options.is_empty());

        let view = rm.collection_views["v1"].value.as_ref().unwrap();
        assert!(view.page_sort.is_empty());
        assert!(view.format.as_ref().unwrap().table_properties.is_empty());
        assert!(view.query.as_ref().unwrap().aggregate.is_empty());
    }

    #[test]
    fn test_null_tables_decode_as_empty() {
        let rm: RecordMap = serde_json::from_value(json!({
            "block": null,
            "space": null,
            "notion_user": null
        }))
        .unwrap();
        assert!(rm.is_empty());
    }
}
