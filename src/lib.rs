//! notion-reader - read-only client for notion.so pages.
//!
//! Fetches a page through the private v3 API and turns it into a typed
//! block tree:
//!
//! ```text
//! loadPageChunk x N ──> Vec<RecordMap> ──merge──> RecordMap
//!                                                    │
//!                                   resolve + normalize (once per block)
//!                                                    │
//!                                                    v
//!                                                PageTree
//! ```
//!
//! - [`paginator`] - sequential `loadPageChunk` rounds driven by the cursor
//! - [`merge`] - last-write-wins union of record-map fragments
//! - [`normalize`] - typed decoding of `properties` and `format`
//! - [`resolve`] - depth-first tree building with child-id compaction
//! - [`client`] - [`NotionClient`] tying it together over a [`Transport`]
//!
//! # Example
//!
//! ```no_run
//! use notion_reader::{ClientConfig, NotionClient};
//!
//! # async fn run() -> notion_reader::Result<()> {
//! let client = NotionClient::new(ClientConfig::from_env()?)?;
//! let id = client.resolve_page_id("https://www.notion.so/Test-4c6a54c68b3e4ea2af9cfaabcc88d58d").await?;
//! let page = client.get_page(&id).await?;
//! for (block, depth) in page.tree.walk() {
//!     println!("{}{} {}", "  ".repeat(depth), block.block_type, block.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod block;
pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod merge;
pub mod normalize;
pub mod paginator;
pub mod render;
pub mod resolve;
pub mod transport;

pub use block::{Block, ResolveState};
pub use client::{NotionClient, Page};
pub use config::ClientConfig;
pub use error::{NormalizeError, NotionError, Result};
pub use ids::parse_page_id;
pub use merge::merge_record_maps;
pub use normalize::normalize_block;
pub use paginator::ChunkPaginator;
pub use render::render_outline;
pub use resolve::{resolve_tree, BlockRef, OwnedBlock, PageTree, Resolver};
pub use transport::{HttpTransport, Transport};

pub use notion_types;
