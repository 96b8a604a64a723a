//! # dmslibrary
//!
//! Library collaborators consumed by the DMS ContentDirectory engine.
//!
//! The engine never owns media: it asks a set of collaborators for items,
//! aggregates and per-user state. This crate defines those collaborators as
//! async traits, the item and query model they exchange, and
//! [`MemoryLibrary`], an in-memory implementation of all of them used by
//! tests and demos.
//!
//! ## Collaborators
//!
//! - [`LibraryManager`]: item lookup, queries, aggregates (genres, artists)
//! - [`UserDataManager`]: per-user playback state and favorites
//! - [`UserViewManager`]: recently added items
//! - [`TvSeriesManager`]: next episode to watch
//!
//! ## Usage
//!
//! ```rust
//! use dmslibrary::{BaseItem, CollectionType, ItemKind, MemoryLibrary};
//!
//! let library = MemoryLibrary::new();
//! let music = library.add_child(
//!     &library.root(),
//!     BaseItem::new(ItemKind::CollectionFolder, "Music")
//!         .with_collection_type(CollectionType::Music),
//! );
//! assert_eq!(library.len(), 2);
//! assert_eq!(music.parent_id, Some(library.root().id));
//! ```

mod ids;
mod memory;
mod model;
mod query;

pub use ids::{ItemId, UserId};
pub use memory::MemoryLibrary;
pub use model::{
    BaseItem, CollectionType, ItemKind, MediaType, TICKS_PER_SECOND, UserDataSaveReason,
    UserItemData,
};
pub use query::{
    ItemSortBy, ItemsQuery, LatestItems, LatestItemsQuery, NextUpQuery, QueryResult, SortOrder,
};

use async_trait::async_trait;
use std::fmt::Debug;

/// Error types for library operations
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Feature not supported: {0}")]
    NotSupported(String),
}

impl LibraryError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LibraryError::ItemNotFound(_) | LibraryError::UserNotFound(_)
        )
    }
}

/// Result type for library operations
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Access to the item tree and its queries.
///
/// Implementations must be `Send + Sync`: one instance is shared by every
/// concurrent control request.
#[async_trait]
pub trait LibraryManager: Debug + Send + Sync {
    /// Looks an item up by id. `Ok(None)` when it does not exist.
    async fn get_item_by_id(&self, id: ItemId) -> Result<Option<BaseItem>>;

    /// Root folder of the user's library tree
    async fn get_user_root_folder(&self, user_id: UserId) -> Result<BaseItem>;

    /// Direct children of `parent` visible to the user, in storage order
    async fn get_children(&self, parent: &BaseItem, user_id: UserId) -> Result<Vec<BaseItem>>;

    /// Runs a generic item query
    async fn get_items(&self, query: &ItemsQuery) -> Result<QueryResult<BaseItem>>;

    /// Video genres used by the items the query selects
    async fn get_genres(&self, query: &ItemsQuery) -> Result<QueryResult<BaseItem>>;

    /// Music genres used by the items the query selects
    async fn get_music_genres(&self, query: &ItemsQuery) -> Result<QueryResult<BaseItem>>;

    /// Track and album artists credited by the items the query selects
    async fn get_artists(&self, query: &ItemsQuery) -> Result<QueryResult<BaseItem>>;

    /// Album artists credited by the items the query selects
    async fn get_album_artists(&self, query: &ItemsQuery) -> Result<QueryResult<BaseItem>>;
}

/// Per-user item state
#[async_trait]
pub trait UserDataManager: Debug + Send + Sync {
    /// Returns the user's data for `item`, or the default state when none was saved
    async fn get_user_data(&self, user_id: UserId, item: &BaseItem) -> Result<UserItemData>;

    async fn save_user_data(
        &self,
        user_id: UserId,
        item: &BaseItem,
        data: UserItemData,
        reason: UserDataSaveReason,
    ) -> Result<()>;
}

#[async_trait]
pub trait UserViewManager: Debug + Send + Sync {
    /// Recently added items, newest first
    async fn get_latest_items(&self, query: &LatestItemsQuery) -> Result<Vec<LatestItems>>;
}

#[async_trait]
pub trait TvSeriesManager: Debug + Send + Sync {
    /// Next unwatched episode of each series found under `parents`
    async fn get_next_up(
        &self,
        query: &NextUpQuery,
        parents: &[BaseItem],
    ) -> Result<QueryResult<BaseItem>>;
}
