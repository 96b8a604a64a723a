//! Résolution des enfants d'un container.
//!
//! Le choix de la stratégie se fait sur une table de règles ordonnée ; la
//! première règle qui s'applique l'emporte.

use std::sync::Arc;

use dmslibrary::{
    BaseItem, ItemKind, ItemsQuery, LibraryManager, MediaType, QueryResult, TvSeriesManager,
    UserDataManager, UserId, UserViewManager,
};
use tracing::debug;

use crate::contentdirectory::criteria::{SearchCriteria, SearchType, SortCriteria};
use crate::contentdirectory::errors::ContentDirectoryError;
use crate::contentdirectory::paging::ResultPaginator;
use crate::contentdirectory::server_item::ServerItem;
use crate::contentdirectory::strategies::{Strategy, StrategyContext};
use crate::contentdirectory::stubs::{self, Category, CategoryLayout, StubType};
use crate::options::DlnaOptions;

/// Types jamais exposés par le listing de dossiers ni par la recherche
const HIDDEN_KINDS: [ItemKind; 2] = [ItemKind::Game, ItemKind::Book];

/// Collaborateurs de la bibliothèque partagés par toutes les requêtes
#[derive(Debug, Clone)]
pub struct LibraryServices {
    pub library: Arc<dyn LibraryManager>,
    pub user_data: Arc<dyn UserDataManager>,
    pub user_views: Arc<dyn UserViewManager>,
    pub tv_series: Arc<dyn TvSeriesManager>,
}

impl LibraryServices {
    pub fn new(
        library: Arc<dyn LibraryManager>,
        user_data: Arc<dyn UserDataManager>,
        user_views: Arc<dyn UserViewManager>,
        tv_series: Arc<dyn TvSeriesManager>,
    ) -> Self {
        Self {
            library,
            user_data,
            user_views,
            tv_series,
        }
    }

    /// Un seul objet qui implémente tous les collaborateurs
    pub fn from_shared<T>(shared: Arc<T>) -> Self
    where
        T: LibraryManager + UserDataManager + UserViewManager + TvSeriesManager + 'static,
    {
        Self {
            library: shared.clone(),
            user_data: shared.clone(),
            user_views: shared.clone(),
            tv_series: shared,
        }
    }
}

/// Chemin de résolution d'un container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Genre ou artiste : les items qui le portent
    NamedEntity(Strategy),
    /// Collection avec menu ou listing dédié
    Category(Category),
    /// Stub sans contenu pour cet item
    EmptyStub,
    /// Enfants directs du dossier
    PlainFolder,
}

type Rule = fn(&BaseItem, Option<StubType>) -> Option<Route>;

const RULES: [Rule; 4] = [named_entity_rule, category_rule, empty_stub_rule, plain_folder_rule];

fn named_entity_rule(item: &BaseItem, _stub: Option<StubType>) -> Option<Route> {
    stubs::named_entity_strategy(item.kind).map(Route::NamedEntity)
}

fn category_rule(item: &BaseItem, stub: Option<StubType>) -> Option<Route> {
    if stub == Some(StubType::Folder) {
        return None;
    }
    item.collection_type
        .and_then(Category::from_collection_type)
        .map(Route::Category)
}

fn empty_stub_rule(_item: &BaseItem, stub: Option<StubType>) -> Option<Route> {
    stub.filter(|s| *s != StubType::Folder)
        .map(|_| Route::EmptyStub)
}

fn plain_folder_rule(_item: &BaseItem, _stub: Option<StubType>) -> Option<Route> {
    Some(Route::PlainFolder)
}

impl Route {
    pub fn select(item: &BaseItem, stub: Option<StubType>) -> Route {
        RULES
            .iter()
            .find_map(|rule| rule(item, stub))
            .unwrap_or(Route::PlainFolder)
    }
}

/// Résout les enfants des containers pour un utilisateur
#[derive(Debug)]
pub struct CategoryResolver<'a> {
    services: &'a LibraryServices,
    options: &'a DlnaOptions,
    user_id: UserId,
}

impl<'a> CategoryResolver<'a> {
    pub fn new(services: &'a LibraryServices, options: &'a DlnaOptions, user_id: UserId) -> Self {
        Self {
            services,
            options,
            user_id,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Une page des enfants de `node`, avec le total
    pub async fn resolve(
        &self,
        node: &ServerItem,
        sort: &SortCriteria,
        start_index: usize,
        limit: Option<usize>,
    ) -> Result<QueryResult<ServerItem>, ContentDirectoryError> {
        let item = node.item();
        let stub = node.stub();
        let route = Route::select(item, stub);
        debug!("🧭 '{}' ({:?}) routed to {:?}", item.name, stub, route);

        let ctx = StrategyContext {
            services: self.services,
            options: self.options,
            user_id: self.user_id,
            sort,
            start_index,
            limit,
        };

        match route {
            Route::NamedEntity(strategy) => strategy.run(&ctx, item).await,
            Route::Category(category) => {
                let layout = category.layout();
                if let Some(strategy) = stub.and_then(|s| layout.strategy_for(s)) {
                    return strategy.run(&ctx, item).await;
                }
                match layout {
                    CategoryLayout::Fixed(strategy) => strategy.run(&ctx, item).await,
                    CategoryLayout::Menu(_) => {
                        let entries: Vec<ServerItem> = layout
                            .menu()
                            .into_iter()
                            .map(|stub| ServerItem::Stub {
                                anchor: item.clone(),
                                stub,
                            })
                            .collect();
                        Ok(ResultPaginator::apply(entries, start_index, limit))
                    }
                }
            }
            Route::EmptyStub => Ok(QueryResult::empty()),
            Route::PlainFolder => {
                let query = ItemsQuery {
                    parent_id: Some(item.id),
                    is_virtual_item: Some(false),
                    is_placeholder: Some(false),
                    exclude_item_types: HIDDEN_KINDS.to_vec(),
                    order_by: sort.order_by(item.is_pre_sorted),
                    start_index: Some(start_index),
                    limit,
                    ..ItemsQuery::for_user(self.user_id)
                };
                let result = self.services.library.get_items(&query).await?;
                Ok(result.map(ServerItem::new))
            }
        }
    }

    /// Nombre d'enfants de `node` (requête de comptage seul)
    pub async fn child_count(&self, node: &ServerItem) -> Result<usize, ContentDirectoryError> {
        let result = self
            .resolve(node, &SortCriteria::default(), 0, Some(0))
            .await?;
        Ok(result.total_record_count)
    }

    /// Descendants de `container` correspondant au critère de recherche
    pub async fn search_children(
        &self,
        container: &BaseItem,
        criteria: &SearchCriteria,
        sort: &SortCriteria,
        start_index: usize,
        limit: Option<usize>,
    ) -> Result<QueryResult<BaseItem>, ContentDirectoryError> {
        let mut query = ItemsQuery {
            parent_id: Some(container.id),
            recursive: true,
            is_missing: Some(false),
            exclude_item_types: HIDDEN_KINDS.to_vec(),
            order_by: sort.order_by(container.is_pre_sorted),
            start_index: Some(start_index),
            limit,
            ..ItemsQuery::for_user(self.user_id)
        };

        match criteria.search_type {
            SearchType::Audio => {
                query.media_types = vec![MediaType::Audio];
                query.is_folder = Some(false);
            }
            SearchType::Video => {
                query.media_types = vec![MediaType::Video];
                query.is_folder = Some(false);
            }
            SearchType::Image => {
                query.media_types = vec![MediaType::Photo];
                query.is_folder = Some(false);
            }
            SearchType::Playlist => {
                query.is_folder = Some(true);
            }
            SearchType::MusicAlbum => {
                query.is_folder = Some(true);
            }
            SearchType::Unknown => {}
        }

        debug!(
            "🔍 Searching {:?} under '{}'",
            criteria.search_type, container.name
        );
        Ok(self.services.library.get_items(&query).await?)
    }

    /// Nombre de descendants de `container` qui satisfont le même critère
    pub async fn search_child_count(
        &self,
        container: &BaseItem,
        criteria: &SearchCriteria,
    ) -> Result<usize, ContentDirectoryError> {
        let result = self
            .search_children(container, criteria, &SortCriteria::default(), 0, Some(0))
            .await?;
        Ok(result.total_record_count)
    }
}
