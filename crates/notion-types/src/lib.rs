//! Wire types for the notion.so v3 API
//!
//! Everything here mirrors what the server sends or expects on the wire.
//! Nothing in this crate performs I/O or interprets `properties`/`format`
//! documents - those stay as untyped `serde_json::Value` until the
//! normalizer in `notion-reader` knows the block's type tag.
//!
//! ## Tables
//!
//! ```text
//! RecordMap
//! ├── block            { id -> WithRole<RawBlock> }
//! ├── space            { id -> WithRole<Space> }
//! ├── notion_user      { id -> WithRole<User> }
//! ├── collection       { id -> WithRole<Collection> }
//! └── collection_view  { id -> WithRole<CollectionView> }
//! ```

pub mod block;
pub mod collection;
pub mod cursor;
pub mod de;
pub mod format;
pub mod inline;
pub mod record_map;
pub mod space;
pub mod user;

pub use block::{BlockType, RawBlock};
pub use collection::{
    AggregateQuery, Collection, CollectionColumnInfo, CollectionColumnOption, CollectionFormat,
    CollectionPageProperty, CollectionView, CollectionViewFormat, CollectionViewQuery,
};
pub use cursor::{Cursor, StackPosition};
pub use format::{
    BlockFormat, FormatBookmark, FormatColumn, FormatImage, FormatPage, FormatTable, FormatText,
    FormatVideo, TableProperty,
};
pub use inline::{InlineSpan, TextStyle};
pub use record_map::{RecordMap, RecordRequest, WithRole};
pub use space::{Permission, Space};
pub use user::User;

/// Table name for blocks in `getRecordValues` requests and `parent_table`.
pub const TABLE_BLOCK: &str = "block";
/// Table name for workspaces.
pub const TABLE_SPACE: &str = "space";
/// Table name for collections (databases).
pub const TABLE_COLLECTION: &str = "collection";

/// Role returned for records the caller can read.
pub const ROLE_READER: &str = "reader";
/// Role returned for records the caller can edit.
pub const ROLE_EDITOR: &str = "editor";
