//! Stratégies de listing des catégories.
//!
//! Chaque stratégie traduit un container (réel ou virtuel) en une requête
//! vers les collaborateurs de la bibliothèque, puis emballe les items obtenus
//! en [`ServerItem`].

use dmslibrary::{
    BaseItem, ItemId, ItemKind, ItemSortBy, ItemsQuery, LatestItemsQuery, NextUpQuery,
    QueryResult, SortOrder, UserId,
};
use tracing::debug;

use crate::contentdirectory::criteria::SortCriteria;
use crate::contentdirectory::errors::ContentDirectoryError;
use crate::contentdirectory::paging::ResultPaginator;
use crate::contentdirectory::resolver::LibraryServices;
use crate::contentdirectory::server_item::ServerItem;
use crate::contentdirectory::stubs::StubType;
use crate::options::DlnaOptions;

/// Périmètre d'une requête d'items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Descendants de l'ancre
    Anchor,
    /// Toute la bibliothèque de l'utilisateur
    Global,
}

/// Étiquette portée par les items d'une entité nommée
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Genre,
    Artist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Derniers ajouts, limités par `DlnaOptions::latest_items_limit`
    Latest { kind: ItemKind, group_items: bool },
    /// Items en cours de lecture, les plus récents d'abord
    ContinueWatching,
    /// Prochain épisode de chaque série
    NextUp,
    Items {
        kind: ItemKind,
        favorites: bool,
        scope: Scope,
    },
    Genres,
    MusicGenres,
    Artists { favorites: bool },
    AlbumArtists,
    /// Dossiers de premier niveau, présentés comme dossiers simples
    TopLevelFolders,
    LiveTvChannels,
    /// Items étiquetés par l'ancre (genre ou artiste)
    Tagged {
        tag: TagKind,
        kinds: &'static [ItemKind],
    },
}

/// Paramètres d'exécution d'une stratégie
#[derive(Debug)]
pub struct StrategyContext<'a> {
    pub services: &'a LibraryServices,
    pub options: &'a DlnaOptions,
    pub user_id: UserId,
    pub sort: &'a SortCriteria,
    pub start_index: usize,
    /// `Some(0)` : comptage seul
    pub limit: Option<usize>,
}

impl StrategyContext<'_> {
    fn items_query(&self) -> ItemsQuery {
        ItemsQuery {
            start_index: Some(self.start_index),
            limit: self.limit,
            ..ItemsQuery::for_user(self.user_id)
        }
    }

    fn aggregate_query(&self, anchor: ItemId, favorites: bool) -> ItemsQuery {
        ItemsQuery {
            ancestor_ids: vec![anchor],
            is_favorite: favorites.then_some(true),
            ..self.items_query()
        }
    }
}

impl Strategy {
    /// Exécute la stratégie pour le container `anchor`
    pub async fn run(
        &self,
        ctx: &StrategyContext<'_>,
        anchor: &BaseItem,
    ) -> Result<QueryResult<ServerItem>, ContentDirectoryError> {
        debug!("🧭 Running {:?} under '{}'", self, anchor.name);

        let library = &ctx.services.library;
        let result = match *self {
            Strategy::Latest { kind, group_items } => {
                let query = LatestItemsQuery {
                    user_id: ctx.user_id,
                    parent_id: Some(anchor.id),
                    include_item_types: vec![kind],
                    limit: ctx.options.latest_items_limit,
                    group_items,
                };
                let latest = ctx.services.user_views.get_latest_items(&query).await?;
                let items: Vec<ServerItem> = latest
                    .iter()
                    .filter_map(|entry| entry.primary())
                    .cloned()
                    .map(ServerItem::new)
                    .collect();
                return Ok(ResultPaginator::apply(items, ctx.start_index, ctx.limit));
            }

            Strategy::ContinueWatching => {
                let cap = ctx.options.continue_watching_limit;
                let query = ItemsQuery {
                    parent_id: Some(anchor.id),
                    recursive: true,
                    is_resumable: Some(true),
                    order_by: vec![
                        (ItemSortBy::DatePlayed, SortOrder::Descending),
                        (ItemSortBy::SortName, SortOrder::Ascending),
                    ],
                    limit: Some(ctx.limit.map_or(cap, |limit| limit.min(cap))),
                    ..ctx.items_query()
                };
                library.get_items(&query).await?
            }

            Strategy::NextUp => {
                let query = NextUpQuery {
                    user_id: ctx.user_id,
                    series_id: None,
                    start_index: Some(ctx.start_index),
                    limit: ctx.limit,
                };
                ctx.services
                    .tv_series
                    .get_next_up(&query, std::slice::from_ref(anchor))
                    .await?
            }

            Strategy::Items {
                kind,
                favorites,
                scope,
            } => {
                let query = ItemsQuery {
                    parent_id: match scope {
                        Scope::Anchor => Some(anchor.id),
                        Scope::Global => None,
                    },
                    recursive: true,
                    include_item_types: vec![kind],
                    is_favorite: favorites.then_some(true),
                    order_by: ctx.sort.order_by(false),
                    ..ctx.items_query()
                };
                library.get_items(&query).await?
            }

            Strategy::Genres => library.get_genres(&ctx.aggregate_query(anchor.id, false)).await?,
            Strategy::MusicGenres => {
                library
                    .get_music_genres(&ctx.aggregate_query(anchor.id, false))
                    .await?
            }
            Strategy::Artists { favorites } => {
                library
                    .get_artists(&ctx.aggregate_query(anchor.id, favorites))
                    .await?
            }
            Strategy::AlbumArtists => {
                library
                    .get_album_artists(&ctx.aggregate_query(anchor.id, false))
                    .await?
            }

            Strategy::TopLevelFolders => {
                let root = library.get_user_root_folder(ctx.user_id).await?;
                let mut folders = library.get_children(&root, ctx.user_id).await?;
                folders.sort_by(|a, b| a.sort_name.cmp(&b.sort_name));
                let items: Vec<ServerItem> = folders
                    .into_iter()
                    .map(|folder| ServerItem::Stub {
                        anchor: folder,
                        stub: StubType::Folder,
                    })
                    .collect();
                return Ok(ResultPaginator::apply(items, ctx.start_index, ctx.limit));
            }

            Strategy::LiveTvChannels => {
                let query = ItemsQuery {
                    include_item_types: vec![ItemKind::LiveTvChannel],
                    order_by: ctx.sort.order_by(false),
                    ..ctx.items_query()
                };
                library.get_items(&query).await?
            }

            Strategy::Tagged { tag, kinds } => {
                let mut query = ItemsQuery {
                    recursive: true,
                    include_item_types: kinds.to_vec(),
                    order_by: ctx.sort.order_by(false),
                    ..ctx.items_query()
                };
                match tag {
                    TagKind::Genre => query.genre_ids = vec![anchor.id],
                    TagKind::Artist => query.artist_ids = vec![anchor.id],
                }
                library.get_items(&query).await?
            }
        };

        Ok(result.map(ServerItem::new))
    }
}
