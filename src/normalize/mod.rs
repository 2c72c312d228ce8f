//! Block normalization
//!
//! Turns a block's untyped `properties` and `format` documents into typed
//! fields. Decoding is two-phase: the documents arrive as neutral
//! `serde_json::Value` trees, and only once the type tag is known are they
//! extracted into the shape that tag implies.
//!
//! Order matters and is fixed:
//! 1. properties (`title` first, then the optional text properties)
//! 2. format, through the tag -> decoder lookup table

pub mod inline;
pub mod media;

use crate::block::Block;
use crate::error::NormalizeError;
use notion_types::{
    BlockFormat, BlockType, FormatBookmark, FormatColumn, FormatImage, FormatPage, FormatTable,
    FormatText, FormatVideo,
};
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use inline::{decode_runs, first_run_text};
use media::media_url;

/// Decodes one block type's `format` document.
pub type FormatDecoder = fn(&Value) -> Result<BlockFormat, serde_json::Error>;

static FORMAT_DECODERS: Lazy<HashMap<&'static str, FormatDecoder>> = Lazy::new(|| {
    let mut decoders: HashMap<&'static str, FormatDecoder> = HashMap::new();
    decoders.insert(BlockType::Page.as_str(), decode_page_format);
    decoders.insert(BlockType::Bookmark.as_str(), decode_bookmark_format);
    decoders.insert(BlockType::Image.as_str(), decode_image_format);
    decoders.insert(BlockType::Column.as_str(), decode_column_format);
    decoders.insert(BlockType::Table.as_str(), decode_table_format);
    decoders.insert(BlockType::Text.as_str(), decode_text_format);
    decoders.insert(BlockType::Video.as_str(), decode_video_format);
    decoders
});

/// Format decoder registered for a type tag, if any.
pub fn format_decoder(block_type: &BlockType) -> Option<FormatDecoder> {
    FORMAT_DECODERS.get(block_type.as_str()).copied()
}

/// Decode `properties` then `format` into the block's typed fields.
pub fn normalize_block(block: &mut Block) -> Result<(), NormalizeError> {
    let properties = std::mem::take(&mut block.properties);
    let decoded = decode_properties(block, &properties);
    block.properties = properties;
    decoded?;

    decode_format(block)
}

fn decode_properties(block: &mut Block, props: &Map<String, Value>) -> Result<(), NormalizeError> {
    if let Some(title) = props.get("title") {
        let decoded = match block.block_type {
            BlockType::Page => first_run_text(title).map(|text| block.title = text),
            BlockType::Code => first_run_text(title).map(|text| block.code = text),
            _ => decode_runs(title).map(|spans| block.inline_content = spans),
        };
        decoded.map_err(|source| {
            tracing::warn!(
                block_id = %block.id,
                block_type = %block.block_type,
                raw = %title,
                error = %source,
                "failed to decode title property"
            );
            NormalizeError::Property {
                block_id: block.id.clone(),
                property: "title".to_string(),
                raw: title.to_string(),
                source,
            }
        })?;
    }

    if block.block_type == BlockType::Todo {
        if let Some(checked) = text_property(props, "checked") {
            block.is_checked = checked.eq_ignore_ascii_case("Yes");
        }
    }

    // bookmark
    if let Some(description) = text_property(props, "description") {
        block.description = Some(description);
    }
    if let Some(link) = text_property(props, "link") {
        block.link = Some(link);
    }

    // bookmark, image, gist, file
    if block.source.is_none() {
        block.source = text_property(props, "source");
    }
    if block.block_type.is_image() {
        if let Some(source) = block.source.as_deref().filter(|s| !s.is_empty()) {
            block.image_url = Some(media_url(source));
        }
    }

    if let Some(language) = text_property(props, "language") {
        block.code_language = Some(language);
    }
    if block.block_type == BlockType::File {
        if let Some(size) = text_property(props, "size") {
            block.file_size = Some(size);
        }
    }

    Ok(())
}

/// First run of an optional text property; malformed values count as absent.
fn text_property(props: &Map<String, Value>, name: &str) -> Option<String> {
    props.get(name).and_then(|value| first_run_text(value).ok())
}

fn decode_format(block: &mut Block) -> Result<(), NormalizeError> {
    let raw = match &block.format_raw {
        Some(raw) if !raw.is_null() => raw,
        _ => return Ok(()),
    };
    let Some(decoder) = format_decoder(&block.block_type) else {
        return Ok(());
    };

    match decoder(raw) {
        Ok(format) => {
            block.format = Some(format);
            Ok(())
        }
        Err(source) => {
            tracing::warn!(
                block_id = %block.id,
                block_type = %block.block_type,
                raw = %raw,
                error = %source,
                "failed to decode block format"
            );
            Err(NormalizeError::Format {
                block_id: block.id.clone(),
                block_type: block.block_type.to_string(),
                raw: raw.to_string(),
                source,
            })
        }
    }
}

// =============================================================================
// Per-type format decoders
// =============================================================================

fn decode_page_format(raw: &Value) -> Result<BlockFormat, serde_json::Error> {
    let mut format = FormatPage::deserialize(raw)?;
    format.page_cover_url = media_url(&format.page_cover);
    Ok(BlockFormat::Page(format))
}

fn decode_bookmark_format(raw: &Value) -> Result<BlockFormat, serde_json::Error> {
    FormatBookmark::deserialize(raw).map(BlockFormat::Bookmark)
}

fn decode_image_format(raw: &Value) -> Result<BlockFormat, serde_json::Error> {
    let mut format = FormatImage::deserialize(raw)?;
    format.image_url = media_url(&format.display_source);
    Ok(BlockFormat::Image(format))
}

fn decode_column_format(raw: &Value) -> Result<BlockFormat, serde_json::Error> {
    FormatColumn::deserialize(raw).map(BlockFormat::Column)
}

fn decode_table_format(raw: &Value) -> Result<BlockFormat, serde_json::Error> {
    FormatTable::deserialize(raw).map(BlockFormat::Table)
}

fn decode_text_format(raw: &Value) -> Result<BlockFormat, serde_json::Error> {
    FormatText::deserialize(raw).map(BlockFormat::Text)
}

fn decode_video_format(raw: &Value) -> Result<BlockFormat, serde_json::Error> {
    FormatVideo::deserialize(raw).map(BlockFormat::Video)
}
