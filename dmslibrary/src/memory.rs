//! In-memory implementation of every library collaborator.
//!
//! Items live in a flat vector in insertion order; the tree is rebuilt from
//! `parent_id` links on each query. Adding an item that carries genre or
//! artist names registers the matching named entities (`Genre`,
//! `MusicGenre`, `MusicArtist`) on the fly, outside the folder tree.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::{
    BaseItem, ItemId, ItemKind, ItemSortBy, ItemsQuery, LatestItems, LatestItemsQuery,
    LibraryManager, MediaType, NextUpQuery, QueryResult, Result, SortOrder, TvSeriesManager,
    UserDataManager, UserDataSaveReason, UserId, UserItemData, UserViewManager,
};

/// Guard against `parent_id` cycles
const MAX_DEPTH: usize = 64;

type UserDataMap = HashMap<(UserId, ItemId), UserItemData>;

#[derive(Debug)]
pub struct MemoryLibrary {
    root: BaseItem,
    items: RwLock<Vec<BaseItem>>,
    user_data: RwLock<UserDataMap>,
}

impl Default for MemoryLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLibrary {
    /// Creates a library holding only its root folder
    pub fn new() -> Self {
        let root = BaseItem::new(ItemKind::UserRootFolder, "Media Folders");
        Self {
            items: RwLock::new(vec![root.clone()]),
            root,
            user_data: RwLock::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> BaseItem {
        self.root.clone()
    }

    /// Stores an item and returns it.
    ///
    /// An item with an id already present replaces the stored one.
    pub fn add(&self, item: BaseItem) -> BaseItem {
        let mut items = self.items.write();
        register_named_entities(&mut items, &item);
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        item
    }

    /// Stores `item` as a direct child of `parent`
    pub fn add_child(&self, parent: &BaseItem, item: BaseItem) -> BaseItem {
        self.add(item.with_parent(parent.id))
    }

    pub fn get(&self, id: ItemId) -> Option<BaseItem> {
        self.items.read().iter().find(|i| i.id == id).cloned()
    }

    /// Finds a named entity (genre, artist...) by kind and name, ignoring case
    pub fn find_by_name(&self, kind: ItemKind, name: &str) -> Option<BaseItem> {
        self.items
            .read()
            .iter()
            .find(|i| i.kind == kind && i.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Number of stored items, root and named entities included
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set_user_data(&self, user_id: UserId, item_id: ItemId, data: UserItemData) {
        self.user_data.write().insert((user_id, item_id), data);
    }

    pub fn user_data(&self, user_id: UserId, item_id: ItemId) -> UserItemData {
        self.user_data
            .read()
            .get(&(user_id, item_id))
            .cloned()
            .unwrap_or_default()
    }

    fn aggregate(
        &self,
        query: &ItemsQuery,
        entity_kind: ItemKind,
        source: fn(&BaseItem) -> bool,
        names: fn(&BaseItem) -> Vec<&str>,
    ) -> QueryResult<BaseItem> {
        let items = self.items.read();
        let user_data = self.user_data.read();
        let view = View {
            root_id: self.root.id,
            items: &items,
            user_data: &user_data,
        };

        let scope = ItemsQuery {
            user_id: query.user_id,
            parent_id: query.parent_id,
            ancestor_ids: query.ancestor_ids.clone(),
            recursive: query.recursive,
            ..Default::default()
        };

        let mut used: Vec<String> = Vec::new();
        for item in items.iter().filter(|i| source(i) && view.matches(&scope, i)) {
            for name in names(item) {
                let lowered = name.to_lowercase();
                if !used.contains(&lowered) {
                    used.push(lowered);
                }
            }
        }

        let mut entities: Vec<BaseItem> = items
            .iter()
            .filter(|i| i.kind == entity_kind && used.contains(&i.name.to_lowercase()))
            .filter(|i| match query.is_favorite {
                Some(wanted) => view.data(query.user_id, i.id).is_favorite == wanted,
                None => true,
            })
            .cloned()
            .collect();

        let order_by = if query.order_by.is_empty() {
            vec![(ItemSortBy::SortName, SortOrder::Ascending)]
        } else {
            query.order_by.clone()
        };
        entities.sort_by(|a, b| view.compare(a, b, &order_by, query.user_id));
        page(entities, query.start_index, query.limit)
    }
}

fn is_music(item: &BaseItem) -> bool {
    matches!(
        item.kind,
        ItemKind::Audio | ItemKind::MusicAlbum | ItemKind::MusicVideo
    )
}

fn register_named_entities(items: &mut Vec<BaseItem>, item: &BaseItem) {
    let genre_kind = if is_music(item) {
        ItemKind::MusicGenre
    } else {
        ItemKind::Genre
    };

    let mut wanted: Vec<(ItemKind, &str)> = item.genres.iter().map(|g| (genre_kind, g.as_str())).collect();
    if is_music(item) {
        wanted.extend(
            item.artists
                .iter()
                .chain(item.album_artists.iter())
                .map(|a| (ItemKind::MusicArtist, a.as_str())),
        );
    }

    for (kind, name) in wanted {
        let known = items
            .iter()
            .any(|i| i.kind == kind && i.name.eq_ignore_ascii_case(name));
        if !known {
            debug!("📇 Registering {} '{}'", kind.name(), name);
            items.push(BaseItem::new(kind, name));
        }
    }
}

fn page(items: Vec<BaseItem>, start: Option<usize>, limit: Option<usize>) -> QueryResult<BaseItem> {
    let total = items.len();
    let start = start.unwrap_or(0);
    let page: Vec<BaseItem> = match limit {
        Some(limit) => items.into_iter().skip(start).take(limit).collect(),
        None => items.into_iter().skip(start).collect(),
    };
    QueryResult::new(page, total)
}

/// Read-locked snapshot used while evaluating a query
struct View<'a> {
    root_id: ItemId,
    items: &'a [BaseItem],
    user_data: &'a UserDataMap,
}

impl View<'_> {
    fn find(&self, id: ItemId) -> Option<&BaseItem> {
        self.items.iter().find(|i| i.id == id)
    }

    fn data(&self, user_id: Option<UserId>, item_id: ItemId) -> UserItemData {
        user_id
            .and_then(|user| self.user_data.get(&(user, item_id)).cloned())
            .unwrap_or_default()
    }

    fn is_descendant(&self, item: &BaseItem, ancestor: ItemId) -> bool {
        let mut current = item.parent_id;
        let mut depth = 0;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            depth += 1;
            if depth > MAX_DEPTH {
                return false;
            }
            current = self.find(parent).and_then(|p| p.parent_id);
        }
        false
    }

    fn names_of(&self, ids: &[ItemId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| self.find(*id))
            .map(|i| i.name.to_lowercase())
            .collect()
    }

    fn matches(&self, query: &ItemsQuery, item: &BaseItem) -> bool {
        if item.id == self.root_id {
            return false;
        }

        if let Some(parent) = query.parent_id {
            let scoped = if query.recursive {
                self.is_descendant(item, parent)
            } else {
                item.parent_id == Some(parent)
            };
            if !scoped {
                return false;
            }
        }

        if !query.ancestor_ids.is_empty()
            && !query
                .ancestor_ids
                .iter()
                .any(|a| self.is_descendant(item, *a))
        {
            return false;
        }

        if !query.include_item_types.is_empty() && !query.include_item_types.contains(&item.kind) {
            return false;
        }
        if query.exclude_item_types.contains(&item.kind) {
            return false;
        }
        if !query.media_types.is_empty() {
            let media: Option<MediaType> = item.media_type();
            if !media.is_some_and(|m| query.media_types.contains(&m)) {
                return false;
            }
        }

        let flags = [
            (query.is_folder, item.is_folder()),
            (query.is_virtual_item, item.is_virtual_item),
            (query.is_placeholder, item.is_placeholder),
            (query.is_missing, item.is_missing),
        ];
        if flags
            .iter()
            .any(|(wanted, actual)| wanted.is_some_and(|w| w != *actual))
        {
            return false;
        }

        if query.is_favorite.is_some() || query.is_resumable.is_some() {
            let data = self.data(query.user_id, item.id);
            if query.is_favorite.is_some_and(|w| w != data.is_favorite) {
                return false;
            }
            if query.is_resumable.is_some_and(|w| w != data.is_resumable()) {
                return false;
            }
        }

        if !query.genre_ids.is_empty() {
            let genres = self.names_of(&query.genre_ids);
            if !item
                .genres
                .iter()
                .any(|g| genres.contains(&g.to_lowercase()))
            {
                return false;
            }
        }

        if !query.artist_ids.is_empty() {
            let artists = self.names_of(&query.artist_ids);
            if !item
                .artists
                .iter()
                .chain(item.album_artists.iter())
                .any(|a| artists.contains(&a.to_lowercase()))
            {
                return false;
            }
        }

        true
    }

    fn compare(
        &self,
        a: &BaseItem,
        b: &BaseItem,
        order_by: &[(ItemSortBy, SortOrder)],
        user_id: Option<UserId>,
    ) -> Ordering {
        for (by, order) in order_by {
            let ordering = match by {
                ItemSortBy::SortName => a.sort_name.cmp(&b.sort_name),
                ItemSortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                ItemSortBy::DateCreated => a.date_created.cmp(&b.date_created),
                ItemSortBy::DatePlayed => self
                    .data(user_id, a.id)
                    .last_played_date
                    .cmp(&self.data(user_id, b.id).last_played_date),
                ItemSortBy::ProductionYear => a.production_year.cmp(&b.production_year),
                ItemSortBy::IndexNumber => (a.parent_index_number, a.index_number)
                    .cmp(&(b.parent_index_number, b.index_number)),
            };
            let ordering = match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

#[async_trait]
impl LibraryManager for MemoryLibrary {
    async fn get_item_by_id(&self, id: ItemId) -> Result<Option<BaseItem>> {
        Ok(self.get(id))
    }

    async fn get_user_root_folder(&self, _user_id: UserId) -> Result<BaseItem> {
        Ok(self.root())
    }

    async fn get_children(&self, parent: &BaseItem, _user_id: UserId) -> Result<Vec<BaseItem>> {
        Ok(self
            .items
            .read()
            .iter()
            .filter(|i| i.parent_id == Some(parent.id))
            .cloned()
            .collect())
    }

    async fn get_items(&self, query: &ItemsQuery) -> Result<QueryResult<BaseItem>> {
        let items = self.items.read();
        let user_data = self.user_data.read();
        let view = View {
            root_id: self.root.id,
            items: &items,
            user_data: &user_data,
        };

        let mut selected: Vec<BaseItem> = items
            .iter()
            .filter(|i| view.matches(query, i))
            .cloned()
            .collect();
        if !query.order_by.is_empty() {
            selected.sort_by(|a, b| view.compare(a, b, &query.order_by, query.user_id));
        }

        let result = page(selected, query.start_index, query.limit);
        debug!(
            "🔎 Items query returned {}/{} items",
            result.items.len(),
            result.total_record_count
        );
        Ok(result)
    }

    async fn get_genres(&self, query: &ItemsQuery) -> Result<QueryResult<BaseItem>> {
        Ok(self.aggregate(
            query,
            ItemKind::Genre,
            |i| !is_music(i),
            |i| i.genres.iter().map(String::as_str).collect(),
        ))
    }

    async fn get_music_genres(&self, query: &ItemsQuery) -> Result<QueryResult<BaseItem>> {
        Ok(self.aggregate(
            query,
            ItemKind::MusicGenre,
            is_music,
            |i| i.genres.iter().map(String::as_str).collect(),
        ))
    }

    async fn get_artists(&self, query: &ItemsQuery) -> Result<QueryResult<BaseItem>> {
        Ok(self.aggregate(query, ItemKind::MusicArtist, is_music, |i| {
            i.artists
                .iter()
                .chain(i.album_artists.iter())
                .map(String::as_str)
                .collect()
        }))
    }

    async fn get_album_artists(&self, query: &ItemsQuery) -> Result<QueryResult<BaseItem>> {
        Ok(self.aggregate(query, ItemKind::MusicArtist, is_music, |i| {
            i.album_artists.iter().map(String::as_str).collect()
        }))
    }
}

#[async_trait]
impl UserDataManager for MemoryLibrary {
    async fn get_user_data(&self, user_id: UserId, item: &BaseItem) -> Result<UserItemData> {
        Ok(self.user_data(user_id, item.id))
    }

    async fn save_user_data(
        &self,
        user_id: UserId,
        item: &BaseItem,
        data: UserItemData,
        reason: UserDataSaveReason,
    ) -> Result<()> {
        debug!(
            "💾 Saving user data for '{}' ({:?}): position={} ticks",
            item.name, reason, data.playback_position_ticks
        );
        self.set_user_data(user_id, item.id, data);
        Ok(())
    }
}

#[async_trait]
impl UserViewManager for MemoryLibrary {
    async fn get_latest_items(&self, query: &LatestItemsQuery) -> Result<Vec<LatestItems>> {
        let items = self.items.read();
        let user_data = self.user_data.read();
        let view = View {
            root_id: self.root.id,
            items: &items,
            user_data: &user_data,
        };

        let mut candidates: Vec<&BaseItem> = items
            .iter()
            .filter(|i| !i.is_folder() && !i.kind.is_item_by_name() && !i.is_virtual_item)
            .filter(|i| {
                query.include_item_types.is_empty() || query.include_item_types.contains(&i.kind)
            })
            .filter(|i| query.parent_id.is_none_or(|p| view.is_descendant(i, p)))
            .collect();
        candidates.sort_by(|a, b| b.date_created.cmp(&a.date_created));

        let mut groups: Vec<LatestItems> = Vec::new();
        let mut positions: HashMap<ItemId, usize> = HashMap::new();
        for item in candidates {
            let key = if query.group_items {
                item.album_id.or(item.series_id)
            } else {
                None
            };

            if let Some(key) = key {
                if let Some(&pos) = positions.get(&key) {
                    groups[pos].items.push(item.clone());
                    continue;
                }
            }
            if groups.len() >= query.limit {
                continue;
            }
            if let Some(key) = key {
                positions.insert(key, groups.len());
            }
            groups.push(LatestItems {
                parent: key.and_then(|k| view.find(k)).cloned(),
                items: vec![item.clone()],
            });
        }

        Ok(groups)
    }
}

#[async_trait]
impl TvSeriesManager for MemoryLibrary {
    async fn get_next_up(
        &self,
        query: &NextUpQuery,
        parents: &[BaseItem],
    ) -> Result<QueryResult<BaseItem>> {
        let items = self.items.read();
        let user_data = self.user_data.read();
        let view = View {
            root_id: self.root.id,
            items: &items,
            user_data: &user_data,
        };
        let user = Some(query.user_id);

        let series: Vec<&BaseItem> = items
            .iter()
            .filter(|i| i.kind == ItemKind::Series)
            .filter(|i| query.series_id.is_none_or(|s| s == i.id))
            .filter(|i| {
                parents.is_empty()
                    || parents
                        .iter()
                        .any(|p| p.id == i.id || view.is_descendant(i, p.id))
            })
            .collect();

        let mut next_up = Vec::new();
        for show in series {
            let mut episodes: Vec<&BaseItem> = items
                .iter()
                .filter(|i| i.kind == ItemKind::Episode && i.series_id == Some(show.id))
                .filter(|i| !i.is_missing && !i.is_virtual_item)
                .collect();
            episodes.sort_by_key(|e| (e.parent_index_number, e.index_number));

            let Some(last) = episodes
                .iter()
                .rposition(|e| view.data(user, e.id).played)
            else {
                continue;
            };
            let last_played = view.data(user, episodes[last].id).last_played_date;
            if let Some(next) = episodes[last + 1..]
                .iter()
                .find(|e| !view.data(user, e.id).played)
            {
                next_up.push(((*next).clone(), last_played));
            }
        }

        next_up.sort_by(|a, b| b.1.cmp(&a.1));
        let next_up = next_up.into_iter().map(|(episode, _)| episode).collect();
        Ok(page(next_up, query.start_index, query.limit))
    }
}
