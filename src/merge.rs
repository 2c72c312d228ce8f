//! Record-map merging
//!
//! Fragments from successive chunk rounds overlap (the page block itself
//! usually comes back every round). Merging is last-write-wins per id and per
//! table: a later fragment's record replaces an earlier one wholesale, with
//! no field-level merge.

use notion_types::{RecordMap, WithRole};
use std::collections::HashMap;

/// Expected number of blocks per chunk, used to pre-size the block table.
const EXPECTED_BLOCKS_PER_FRAGMENT: usize = 50;

/// Merge fragments in fetch order into one canonical record map.
pub fn merge_record_maps<I>(fragments: I) -> RecordMap
where
    I: IntoIterator<Item = RecordMap>,
{
    let fragments = fragments.into_iter();
    let (lower, _) = fragments.size_hint();

    let mut merged = RecordMap {
        blocks: HashMap::with_capacity(lower * EXPECTED_BLOCKS_PER_FRAGMENT),
        ..RecordMap::default()
    };

    for fragment in fragments {
        overwrite(&mut merged.blocks, fragment.blocks);
        overwrite(&mut merged.spaces, fragment.spaces);
        overwrite(&mut merged.users, fragment.users);
        overwrite(&mut merged.collections, fragment.collections);
        overwrite(&mut merged.collection_views, fragment.collection_views);
    }

    merged
}

fn overwrite<T>(into: &mut HashMap<String, WithRole<T>>, from: HashMap<String, WithRole<T>>) {
    into.extend(from);
}
