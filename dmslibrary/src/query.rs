//! Query descriptions handed to the library collaborators.

use crate::ids::{ItemId, UserId};
use crate::model::{BaseItem, ItemKind, MediaType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSortBy {
    SortName,
    Name,
    DateCreated,
    DatePlayed,
    ProductionYear,
    IndexNumber,
}

/// Generic item query.
///
/// Every `Option` filter left to `None` is not applied. When neither
/// `parent_id` nor `ancestor_ids` is set, the query is global.
#[derive(Debug, Clone, Default)]
pub struct ItemsQuery {
    pub user_id: Option<UserId>,
    pub parent_id: Option<ItemId>,
    pub ancestor_ids: Vec<ItemId>,
    pub recursive: bool,
    pub include_item_types: Vec<ItemKind>,
    pub exclude_item_types: Vec<ItemKind>,
    pub media_types: Vec<MediaType>,
    pub is_folder: Option<bool>,
    pub is_favorite: Option<bool>,
    pub is_resumable: Option<bool>,
    pub is_virtual_item: Option<bool>,
    pub is_placeholder: Option<bool>,
    pub is_missing: Option<bool>,
    /// Items tagged with any of these genres
    pub genre_ids: Vec<ItemId>,
    /// Items credited to any of these artists
    pub artist_ids: Vec<ItemId>,
    pub order_by: Vec<(ItemSortBy, SortOrder)>,
    pub start_index: Option<usize>,
    /// `Some(0)` asks for the total count only
    pub limit: Option<usize>,
}

impl ItemsQuery {
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }
}

/// A page of results together with the total number of matches
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    pub items: Vec<T>,
    pub total_record_count: usize,
}

impl<T> Default for QueryResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_record_count: 0,
        }
    }
}

impl<T> QueryResult<T> {
    pub fn new(items: Vec<T>, total_record_count: usize) -> Self {
        Self {
            items,
            total_record_count,
        }
    }

    /// Unpaged result: the total is the number of items
    pub fn from_items(items: Vec<T>) -> Self {
        let total_record_count = items.len();
        Self {
            items,
            total_record_count,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> QueryResult<U> {
        QueryResult {
            items: self.items.into_iter().map(f).collect(),
            total_record_count: self.total_record_count,
        }
    }
}

/// Query for recently added items
#[derive(Debug, Clone)]
pub struct LatestItemsQuery {
    pub user_id: UserId,
    pub parent_id: Option<ItemId>,
    pub include_item_types: Vec<ItemKind>,
    pub limit: usize,
    /// Group items sharing an album or a series under one entry
    pub group_items: bool,
}

/// One entry of a latest-items listing.
///
/// `parent` is the grouping item (album, series) when grouping applied.
#[derive(Debug, Clone)]
pub struct LatestItems {
    pub parent: Option<BaseItem>,
    pub items: Vec<BaseItem>,
}

impl LatestItems {
    /// The item shown for this entry: the group parent, else the first member
    pub fn primary(&self) -> Option<&BaseItem> {
        self.parent.as_ref().or_else(|| self.items.first())
    }
}

/// Query for the next episode to watch in each series
#[derive(Debug, Clone)]
pub struct NextUpQuery {
    pub user_id: UserId,
    pub series_id: Option<ItemId>,
    pub start_index: Option<usize>,
    pub limit: Option<usize>,
}
