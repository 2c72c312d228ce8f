//! Tree resolution
//!
//! Turns the flat, id-keyed block table into a tree rooted at the page
//! block. Each block is normalized exactly once; child ids that cannot be
//! resolved are spliced out of `content_ids` so the result only links
//! blocks that exist.
//!
//! The tree is an arena: [`PageTree`] owns every resolved [`Block`] by id,
//! and [`BlockRef`] is a borrowed view that follows `content_ids` through
//! the arena. A block referenced by two parents is stored once and shows up
//! under both.

use crate::block::{Block, ResolveState};
use crate::error::{NormalizeError, NotionError, Result};
use crate::normalize::normalize_block;
use notion_types::RecordMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::ops::Deref;

/// Deepest nesting followed below the root before children are dropped.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Outcome of visiting one id.
enum Visit {
    /// Not in the block table
    Missing,
    /// Below the depth limit
    TooDeep,
    /// Currently being resolved higher up the stack
    Cycle,
    /// Resolved and linkable; carries the node's own decode failure, if any
    Linked(Option<NormalizeError>),
}

/// Depth-first resolver over a canonical block table.
#[derive(Debug)]
pub struct Resolver {
    blocks: HashMap<String, Block>,
    decode_errors: Vec<NormalizeError>,
    max_depth: usize,
}

impl Resolver {
    pub fn new(blocks: HashMap<String, Block>) -> Self {
        Self {
            blocks,
            decode_errors: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Children nested deeper than `max_depth` below the resolved node are
    /// treated as unresolved.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Typed copy of the merged block table. Entries the caller cannot read
    /// (`null` value) are dropped.
    pub fn from_record_map(record_map: &RecordMap) -> Self {
        let blocks = record_map
            .blocks
            .iter()
            .filter_map(|(id, record)| {
                record
                    .value
                    .as_ref()
                    .map(|raw| (id.clone(), Block::from(raw.clone())))
            })
            .collect();
        Self::new(blocks)
    }

    pub fn get(&self, id: &str) -> Option<&Block> {
        self.blocks.get(id)
    }

    /// Failures recorded for descendants while resolving.
    pub fn decode_errors(&self) -> &[NormalizeError] {
        &self.decode_errors
    }

    /// Resolve `id` and everything reachable from it.
    ///
    /// Returns `Ok(false)` when `id` is absent (or is already on the
    /// resolution stack). A failure to normalize `id` itself comes back as
    /// an error once its subtree has been resolved anyway.
    pub fn resolve_node(&mut self, id: &str) -> Result<bool> {
        match self.visit(id, 0) {
            Visit::Missing | Visit::TooDeep | Visit::Cycle => Ok(false),
            Visit::Linked(None) => Ok(true),
            Visit::Linked(Some(err)) => Err(err.into()),
        }
    }

    /// Resolve from `root_id` and hand the resolved blocks over as a tree.
    pub fn into_tree(mut self, root_id: &str) -> Result<PageTree> {
        if !self.resolve_node(root_id)? {
            return Err(NotionError::MissingRoot {
                id: root_id.to_string(),
            });
        }

        self.blocks.retain(|_, block| block.is_resolved());
        let root = self
            .blocks
            .remove(root_id)
            .ok_or_else(|| NotionError::MissingRoot {
                id: root_id.to_string(),
            })?;
        Ok(PageTree {
            root_id: root_id.to_string(),
            root,
            blocks: self.blocks,
            decode_errors: self.decode_errors,
        })
    }

    fn visit(&mut self, id: &str, depth: usize) -> Visit {
        let Some(block) = self.blocks.get_mut(id) else {
            tracing::trace!(block_id = id, "block not in record map");
            return Visit::Missing;
        };
        if depth > self.max_depth && block.state != ResolveState::Resolved {
            tracing::warn!(block_id = id, depth, "block nested too deep, dropping it");
            return Visit::TooDeep;
        }

        match block.state {
            ResolveState::Resolved => return Visit::Linked(None),
            ResolveState::InProgress => {
                tracing::warn!(block_id = id, "cycle in block tree, dropping back-edge");
                return Visit::Cycle;
            }
            ResolveState::Unresolved => {}
        }

        block.state = ResolveState::InProgress;
        let own_error = normalize_block(block).err();
        let children = std::mem::take(&mut block.content_ids);

        let mut kept = Vec::with_capacity(children.len());
        for child_id in children {
            match self.visit(&child_id, depth + 1) {
                Visit::Missing | Visit::TooDeep | Visit::Cycle => {}
                Visit::Linked(child_error) => {
                    if let Some(err) = child_error {
                        tracing::debug!(block_id = %child_id, error = %err, "recorded block decode failure");
                        self.decode_errors.push(err);
                    }
                    kept.push(child_id);
                }
            }
        }

        if let Some(block) = self.blocks.get_mut(id) {
            block.content_ids = kept;
            block.state = ResolveState::Resolved;
        }
        Visit::Linked(own_error)
    }
}

/// Resolve the merged record map into a tree rooted at `root_id`.
pub fn resolve_tree(record_map: &RecordMap, root_id: &str) -> Result<PageTree> {
    Resolver::from_record_map(record_map).into_tree(root_id)
}

// =============================================================================
// PageTree
// =============================================================================

/// Resolved blocks of one page, rooted at the page block.
#[derive(Debug)]
pub struct PageTree {
    root_id: String,
    root: Block,
    /// Every resolved block except the root
    blocks: HashMap<String, Block>,
    decode_errors: Vec<NormalizeError>,
}

impl PageTree {
    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn root(&self) -> BlockRef<'_> {
        BlockRef {
            tree: self,
            block: &self.root,
        }
    }

    pub fn get(&self, id: &str) -> Option<BlockRef<'_>> {
        if id == self.root_id {
            return Some(self.root());
        }
        self.blocks.get(id).map(|block| BlockRef { tree: self, block })
    }

    /// Number of distinct resolved blocks, root included.
    pub fn len(&self) -> usize {
        self.blocks.len() + 1
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Descendants whose `properties` or `format` failed to decode. Those
    /// blocks are still in the tree with the affected fields unset.
    pub fn decode_errors(&self) -> &[NormalizeError] {
        &self.decode_errors
    }

    /// Pre-order walk from the root, yielding each block with its depth.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(self.root(), 0)],
        }
    }

    /// Deep copy into a self-contained owned tree.
    pub fn to_owned_tree(&self) -> OwnedBlock {
        self.root().to_owned_tree()
    }
}

/// Borrowed view of one block inside a [`PageTree`].
#[derive(Debug, Clone, Copy)]
pub struct BlockRef<'a> {
    tree: &'a PageTree,
    block: &'a Block,
}

impl<'a> BlockRef<'a> {
    pub fn block(&self) -> &'a Block {
        self.block
    }

    pub fn children(&self) -> impl Iterator<Item = BlockRef<'a>> + 'a {
        let tree = self.tree;
        self.block
            .content_ids
            .iter()
            .filter_map(move |id| tree.get(id))
    }

    pub fn to_owned_tree(&self) -> OwnedBlock {
        OwnedBlock {
            block: self.block.clone(),
            children: self.children().map(|child| child.to_owned_tree()).collect(),
        }
    }
}

impl Deref for BlockRef<'_> {
    type Target = Block;

    fn deref(&self) -> &Block {
        self.block
    }
}

impl Serialize for BlockRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Node<'a> {
            #[serde(flatten)]
            block: &'a Block,
            children: Vec<BlockRef<'a>>,
        }

        Node {
            block: self.block,
            children: self.children().collect(),
        }
        .serialize(serializer)
    }
}

/// Pre-order iterator over a [`PageTree`].
pub struct Walk<'a> {
    stack: Vec<(BlockRef<'a>, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (BlockRef<'a>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        let children: Vec<_> = node.children().collect();
        self.stack
            .extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        Some((node, depth))
    }
}

/// Owned tree node, detached from any arena.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedBlock {
    #[serde(flatten)]
    pub block: Block,
    pub children: Vec<OwnedBlock>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use notion_types::{BlockType, RawBlock, WithRole};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw(id: &str, block_type: &str, content: &[&str]) -> RawBlock {
        serde_json::from_value(json!({
            "id": id,
            "type": block_type,
            "content": content,
            "alive": true,
        }))
        .unwrap()
    }

    fn record_map(blocks: Vec<RawBlock>) -> RecordMap {
        let mut map = RecordMap::default();
        for block in blocks {
            map.blocks
                .insert(block.id.clone(), WithRole::new("reader", block));
        }
        map
    }

    fn ids(tree: &PageTree) -> Vec<(String, usize)> {
        tree.walk()
            .map(|(block, depth)| (block.id.clone(), depth))
            .collect()
    }

    #[test]
    fn test_missing_children_are_compacted_in_order() {
        let map = record_map(vec![
            raw("p", "page", &["x", "y", "z"]),
            raw("x", "text", &[]),
            raw("z", "text", &[]),
        ]);

        let tree = resolve_tree(&map, "p").unwrap();
        assert_eq!(tree.root().content_ids, vec!["x", "z"]);
        assert_eq!(tree.len(), 3);
        assert!(tree.decode_errors().is_empty());
    }

    #[test]
    fn test_walk_is_pre_order_with_depth() {
        let map = record_map(vec![
            raw("p", "page", &["a", "b"]),
            raw("a", "toggle", &["a1", "a2"]),
            raw("a1", "text", &[]),
            raw("a2", "text", &[]),
            raw("b", "text", &[]),
        ]);

        let tree = resolve_tree(&map, "p").unwrap();
        assert_eq!(
            ids(&tree),
            vec![
                ("p".to_string(), 0),
                ("a".to_string(), 1),
                ("a1".to_string(), 2),
                ("a2".to_string(), 2),
                ("b".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_missing_root() {
        let map = record_map(vec![raw("x", "text", &[])]);
        let err = resolve_tree(&map, "p").unwrap_err();
        assert!(matches!(err, NotionError::MissingRoot { ref id } if id == "p"));
    }

    #[test]
    fn test_denied_entries_are_dropped() {
        let mut map = record_map(vec![raw("p", "page", &["hidden"])]);
        map.blocks.insert(
            "hidden".to_string(),
            WithRole {
                role: "none".to_string(),
                value: None,
            },
        );

        let tree = resolve_tree(&map, "p").unwrap();
        assert!(tree.root().content_ids.is_empty());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let map = record_map(vec![raw("p", "page", &["x", "gone"]), raw("x", "text", &[])]);
        let mut resolver = Resolver::from_record_map(&map);

        assert!(resolver.resolve_node("p").unwrap());
        let first = resolver.get("p").unwrap().clone();
        assert!(resolver.resolve_node("p").unwrap());
        assert_eq!(resolver.get("p").unwrap(), &first);
        assert_eq!(first.content_ids, vec!["x"]);
    }

    #[test]
    fn test_resolved_node_is_not_decoded_again() {
        let map = record_map(vec![raw("p", "page", &[])]);
        let mut resolver = Resolver::from_record_map(&map);
        resolver.resolve_node("p").unwrap();

        // a fresh malformed title would fail if decoding ran again
        if let Some(block) = resolver.blocks.get_mut("p") {
            block.properties.insert("title".to_string(), json!("oops"));
        }
        assert!(resolver.resolve_node("p").unwrap());
    }

    #[test]
    fn test_sibling_decode_failure_does_not_abort() {
        let mut bad = raw("bad", "bookmark", &["under_bad"]);
        bad.format = Some(json!({"bookmark_icon": 42}));
        let map = record_map(vec![
            raw("p", "page", &["bad", "good"]),
            bad,
            raw("under_bad", "text", &[]),
            raw("good", "text", &[]),
        ]);

        let tree = resolve_tree(&map, "p").unwrap();
        assert_eq!(tree.root().content_ids, vec!["bad", "good"]);
        assert_eq!(tree.decode_errors().len(), 1);
        assert_eq!(tree.decode_errors()[0].block_id(), "bad");

        let bad = tree.get("bad").unwrap();
        assert!(bad.format.is_none());
        assert_eq!(bad.content_ids, vec!["under_bad"]);
    }

    #[test]
    fn test_root_decode_failure_is_an_error() {
        let mut root = raw("p", "page", &[]);
        root.properties.insert("title".to_string(), json!(17));
        let map = record_map(vec![root]);

        let err = resolve_tree(&map, "p").unwrap_err();
        assert_eq!(err.code(), "NORMALIZE");
    }

    #[test]
    fn test_cycle_back_edge_is_dropped() {
        let map = record_map(vec![
            raw("p", "page", &["a"]),
            raw("a", "toggle", &["b"]),
            raw("b", "toggle", &["a", "p"]),
        ]);

        let tree = resolve_tree(&map, "p").unwrap();
        assert_eq!(tree.get("b").unwrap().content_ids, Vec::<String>::new());
        assert_eq!(ids(&tree).len(), 3);
    }

    #[test]
    fn test_self_reference_is_dropped() {
        let map = record_map(vec![raw("p", "page", &["p"])]);
        let tree = resolve_tree(&map, "p").unwrap();
        assert!(tree.root().content_ids.is_empty());
    }

    #[test]
    fn test_nesting_below_depth_limit_is_dropped() {
        let map = record_map(vec![
            raw("p", "page", &["a"]),
            raw("a", "toggle", &["b"]),
            raw("b", "toggle", &["c"]),
            raw("c", "text", &[]),
        ]);

        let tree = Resolver::from_record_map(&map)
            .with_max_depth(2)
            .into_tree("p")
            .unwrap();
        assert_eq!(tree.get("b").unwrap().content_ids, Vec::<String>::new());
        assert!(tree.get("c").is_none());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_very_deep_chain_is_cut_at_default_limit() {
        let ids: Vec<String> = (0..5_000).map(|i| format!("n{i}")).collect();
        let mut blocks = vec![raw("p", "page", &["n0"])];
        for (i, id) in ids.iter().enumerate() {
            let next: Vec<&str> = ids.get(i + 1).map(|n| vec![n.as_str()]).unwrap_or_default();
            blocks.push(raw(id, "toggle", &next));
        }

        let tree = resolve_tree(&record_map(blocks), "p").unwrap();
        assert_eq!(tree.len(), DEFAULT_MAX_DEPTH + 1);
        assert_eq!(tree.walk().map(|(_, depth)| depth).max(), Some(DEFAULT_MAX_DEPTH));
    }

    #[test]
    fn test_root_is_reachable_by_id() {
        let map = record_map(vec![raw("p", "page", &[])]);
        let tree = resolve_tree(&map, "p").unwrap();
        assert_eq!(tree.get("p").unwrap().id, tree.root().id);
        assert_eq!(tree.root_id(), "p");
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_shared_child_is_linked_under_both_parents() {
        let map = record_map(vec![
            raw("p", "page", &["a", "b"]),
            raw("a", "toggle", &["shared"]),
            raw("b", "toggle", &["shared"]),
            raw("shared", "text", &[]),
        ]);

        let tree = resolve_tree(&map, "p").unwrap();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.get("a").unwrap().content_ids, vec!["shared"]);
        assert_eq!(tree.get("b").unwrap().content_ids, vec!["shared"]);
        assert_eq!(ids(&tree).len(), 5);
    }

    #[test]
    fn test_unreachable_blocks_are_not_in_tree() {
        let map = record_map(vec![raw("p", "page", &[]), raw("orphan", "text", &[])]);
        let tree = resolve_tree(&map, "p").unwrap();
        assert!(tree.get("orphan").is_none());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_serialize_nests_children() {
        let mut page = raw("p", "page", &["t"]);
        page.properties.insert("title".to_string(), json!([["Doc"]]));
        let mut text = raw("t", "text", &[]);
        text.properties.insert("title".to_string(), json!([["hi"]]));
        let map = record_map(vec![page, text]);

        let tree = resolve_tree(&map, "p").unwrap();
        let value = serde_json::to_value(tree.root()).unwrap();
        assert_eq!(value["title"], "Doc");
        assert_eq!(value["children"][0]["id"], "t");
        assert_eq!(value["children"][0]["inline_content"], json!([["hi"]]));
        assert_eq!(value["children"][0]["children"], json!([]));
    }

    #[test]
    fn test_owned_tree_matches_walk() {
        let map = record_map(vec![
            raw("p", "page", &["a"]),
            raw("a", "toggle", &["b"]),
            raw("b", "text", &[]),
        ]);

        let tree = resolve_tree(&map, "p").unwrap();
        let owned = tree.to_owned_tree();
        assert_eq!(owned.block.block_type, BlockType::Page);
        assert_eq!(owned.children[0].block.id, "a");
        assert_eq!(owned.children[0].children[0].block.id, "b");
        assert_eq!(
            serde_json::to_value(&owned).unwrap(),
            serde_json::to_value(tree.root()).unwrap()
        );
    }
}
