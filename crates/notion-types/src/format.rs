//! Typed shapes of the per-block `format` document.
//!
//! Which struct applies is decided by the block's type tag; the selection
//! itself lives in the normalizer. Every field is optional on the wire, but a
//! field present with the wrong JSON type is a decode error.

use serde::{Deserialize, Serialize};

/// Decoded `format` document, one variant per type tag that carries one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockFormat {
    Page(FormatPage),
    Bookmark(FormatBookmark),
    Image(FormatImage),
    Column(FormatColumn),
    Table(FormatTable),
    Text(FormatText),
    Video(FormatVideo),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatPage {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub page_full_width: bool,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub page_small_text: bool,
    /// Vertical offset of the cover, 0.0..=1.0
    #[serde(deserialize_with = "crate::de::null_default")]
    pub page_cover_position: f64,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_locked: bool,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_locked_by: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub page_cover: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub page_icon: String,
    /// Proxied cover URL, derived from `page_cover`
    #[serde(skip_deserializing)]
    pub page_cover_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatBookmark {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub bookmark_icon: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub bookmark_cover: String,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatImage {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_aspect_ratio: f64,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_full_width: bool,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_page_width: bool,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_preserve_scale: bool,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_width: f64,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_height: f64,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub display_source: String,
    /// Proxied display URL, derived from `display_source`
    #[serde(skip_deserializing)]
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatColumn {
    /// Share of the row this column takes, 0.0..=1.0
    #[serde(deserialize_with = "crate::de::null_default")]
    pub column_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatTable {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub table_wrap: bool,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub table_properties: Vec<TableProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableProperty {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub width: f64,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub visible: bool,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub property: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatText {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatVideo {
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_aspect_ratio: f64,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_full_width: bool,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_page_width: bool,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_preserve_scale: bool,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_width: f64,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub block_height: f64,
    #[serde(deserialize_with = "crate::de::null_default")]
    pub display_source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_null_fields_decode_as_defaults() {
        let page: FormatPage = serde_json::from_value(json!({
            "page_cover": null,
            "page_icon": "x",
            "page_cover_position": null,
            "page_full_width": null
        }))
        .unwrap();
        assert_eq!(page.page_cover, "");
        assert_eq!(page.page_icon, "x");
        assert_eq!(page.page_cover_position, 0.0);

        let bookmark: FormatBookmark =
            serde_json::from_value(json!({"bookmark_icon": null, "bookmark_cover": null, "block_color": null}))
                .unwrap();
        assert_eq!(bookmark, FormatBookmark::default());

        let image: FormatImage = serde_json::from_value(json!({
            "block_width": null,
            "block_height": 240,
            "display_source": null,
            "block_preserve_scale": null
        }))
        .unwrap();
        assert_eq!(image.block_height, 240.0);
        assert_eq!(image.display_source, "");

        let column: FormatColumn = serde_json::from_value(json!({"column_ratio": null})).unwrap();
        assert_eq!(column, FormatColumn::default());

        let table: FormatTable = serde_json::from_value(json!({
            "table_wrap": null,
            "table_properties": [{"property": "title", "visible": null, "width": null}]
        }))
        .unwrap();
        assert_eq!(table.table_properties[0].property, "title");
        assert!(!table.table_properties[0].visible);

        let text: FormatText = serde_json::from_value(json!({"block_color": null})).unwrap();
        assert_eq!(text, FormatText::default());

        let video: FormatVideo =
            serde_json::from_value(json!({"display_source": null, "block_aspect_ratio": null})).unwrap();
        assert_eq!(video, FormatVideo::default());
    }

    #[test]
    fn test_wrong_type_is_still_rejected() {
        assert!(serde_json::from_value::<FormatBookmark>(json!({"bookmark_icon": 42})).is_err());
    }
}
