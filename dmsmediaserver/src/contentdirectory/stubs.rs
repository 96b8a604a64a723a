//! Containers virtuels ("stubs") et catalogue des menus par collection.
//!
//! Un stub n'a pas d'identité propre : il n'existe qu'accroché à un item réel
//! (son ancre). Le catalogue est une table statique : pour chaque catégorie de
//! collection, la liste ordonnée des stubs du menu et la stratégie qui produit
//! le contenu de chacun.

use dmslibrary::{CollectionType, ItemKind};

use crate::contentdirectory::strategies::{Scope, Strategy, TagKind};

/// Types de containers virtuels.
///
/// Les discriminants sont figés ; la valeur 1 n'est pas utilisée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StubType {
    Folder = 0,
    Latest = 2,
    Playlists = 3,
    Albums = 4,
    AlbumArtists = 5,
    Artists = 6,
    Songs = 7,
    Genres = 8,
    FavoriteSongs = 9,
    FavoriteArtists = 10,
    FavoriteAlbums = 11,
    ContinueWatching = 12,
    Movies = 13,
    Collections = 14,
    Favorites = 15,
    NextUp = 16,
    Series = 17,
    FavoriteSeries = 18,
    FavoriteEpisodes = 19,
}

impl StubType {
    /// Tous les stubs, dans l'ordre de déclaration
    pub const ALL: [StubType; 19] = [
        StubType::Folder,
        StubType::Latest,
        StubType::Playlists,
        StubType::Albums,
        StubType::AlbumArtists,
        StubType::Artists,
        StubType::Songs,
        StubType::Genres,
        StubType::FavoriteSongs,
        StubType::FavoriteArtists,
        StubType::FavoriteAlbums,
        StubType::ContinueWatching,
        StubType::Movies,
        StubType::Collections,
        StubType::Favorites,
        StubType::NextUp,
        StubType::Series,
        StubType::FavoriteSeries,
        StubType::FavoriteEpisodes,
    ];

    /// Nom utilisé comme préfixe d'identifiant
    pub fn name(&self) -> &'static str {
        match self {
            StubType::Folder => "Folder",
            StubType::Latest => "Latest",
            StubType::Playlists => "Playlists",
            StubType::Albums => "Albums",
            StubType::AlbumArtists => "AlbumArtists",
            StubType::Artists => "Artists",
            StubType::Songs => "Songs",
            StubType::Genres => "Genres",
            StubType::FavoriteSongs => "FavoriteSongs",
            StubType::FavoriteArtists => "FavoriteArtists",
            StubType::FavoriteAlbums => "FavoriteAlbums",
            StubType::ContinueWatching => "ContinueWatching",
            StubType::Movies => "Movies",
            StubType::Collections => "Collections",
            StubType::Favorites => "Favorites",
            StubType::NextUp => "NextUp",
            StubType::Series => "Series",
            StubType::FavoriteSeries => "FavoriteSeries",
            StubType::FavoriteEpisodes => "FavoriteEpisodes",
        }
    }

    /// Titre affiché par les clients. `None` pour `Folder`, qui garde le nom de l'ancre.
    pub fn title(&self) -> Option<&'static str> {
        let title = match self {
            StubType::Folder => return None,
            StubType::Latest => "Latest",
            StubType::Playlists => "Playlists",
            StubType::Albums => "Albums",
            StubType::AlbumArtists => "Album Artists",
            StubType::Artists => "Artists",
            StubType::Songs => "Songs",
            StubType::Genres => "Genres",
            StubType::FavoriteSongs => "Favorite Songs",
            StubType::FavoriteArtists => "Favorite Artists",
            StubType::FavoriteAlbums => "Favorite Albums",
            StubType::ContinueWatching => "Continue Watching",
            StubType::Movies => "Movies",
            StubType::Collections => "Collections",
            StubType::Favorites => "Favorites",
            StubType::NextUp => "Next Up",
            StubType::Series => "Series",
            StubType::FavoriteSeries => "Favorite Series",
            StubType::FavoriteEpisodes => "Favorite Episodes",
        };
        Some(title)
    }

    /// Reconnaît un préfixe `"<Stub>_"` (sans tenir compte de la casse).
    ///
    /// Retourne le stub et le reste de l'identifiant après le premier `_`.
    pub fn strip_prefix(id: &str) -> Option<(StubType, &str)> {
        Self::ALL.into_iter().find_map(|stub| {
            let name = stub.name();
            let prefix = id.get(..name.len())?;
            let rest = id.get(name.len()..)?.strip_prefix('_')?;
            prefix.eq_ignore_ascii_case(name).then_some((stub, rest))
        })
    }
}

/// Catégories de collection ayant un traitement dédié
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Music,
    Movies,
    TvShows,
    Folders,
    LiveTv,
}

impl Category {
    pub fn from_collection_type(collection_type: CollectionType) -> Option<Self> {
        match collection_type {
            CollectionType::Music => Some(Category::Music),
            CollectionType::Movies => Some(Category::Movies),
            CollectionType::TvShows => Some(Category::TvShows),
            CollectionType::Folders => Some(Category::Folders),
            CollectionType::LiveTv => Some(Category::LiveTv),
            _ => None,
        }
    }

    pub fn layout(&self) -> CategoryLayout {
        match self {
            Category::Music => CategoryLayout::Menu(MUSIC_MENU),
            Category::Movies => CategoryLayout::Menu(MOVIES_MENU),
            Category::TvShows => CategoryLayout::Menu(TV_MENU),
            Category::Folders => CategoryLayout::Fixed(Strategy::TopLevelFolders),
            Category::LiveTv => CategoryLayout::Fixed(Strategy::LiveTvChannels),
        }
    }
}

/// Organisation d'une catégorie
#[derive(Debug, Clone, Copy)]
pub enum CategoryLayout {
    /// Menu de stubs : sans stub sélectionné, le menu lui-même est listé
    Menu(&'static [(StubType, Strategy)]),
    /// Une seule stratégie, quel que soit le stub
    Fixed(Strategy),
}

impl CategoryLayout {
    /// Stratégie associée à un stub du menu
    pub fn strategy_for(&self, stub: StubType) -> Option<Strategy> {
        match self {
            CategoryLayout::Menu(entries) => entries
                .iter()
                .find(|(candidate, _)| *candidate == stub)
                .map(|(_, strategy)| *strategy),
            CategoryLayout::Fixed(strategy) => Some(*strategy),
        }
    }

    /// Stubs du menu, dans l'ordre de présentation
    pub fn menu(&self) -> Vec<StubType> {
        match self {
            CategoryLayout::Menu(entries) => entries.iter().map(|(stub, _)| *stub).collect(),
            CategoryLayout::Fixed(_) => Vec::new(),
        }
    }
}

const fn items(kind: ItemKind) -> Strategy {
    Strategy::Items {
        kind,
        favorites: false,
        scope: Scope::Anchor,
    }
}

const fn favorites(kind: ItemKind) -> Strategy {
    Strategy::Items {
        kind,
        favorites: true,
        scope: Scope::Anchor,
    }
}

const fn global(kind: ItemKind) -> Strategy {
    Strategy::Items {
        kind,
        favorites: false,
        scope: Scope::Global,
    }
}

static MUSIC_MENU: &[(StubType, Strategy)] = &[
    (
        StubType::Latest,
        Strategy::Latest {
            kind: ItemKind::Audio,
            group_items: true,
        },
    ),
    (StubType::Playlists, global(ItemKind::Playlist)),
    (StubType::Albums, items(ItemKind::MusicAlbum)),
    (StubType::AlbumArtists, Strategy::AlbumArtists),
    (StubType::Artists, Strategy::Artists { favorites: false }),
    (StubType::Songs, items(ItemKind::Audio)),
    (StubType::Genres, Strategy::MusicGenres),
    (StubType::FavoriteArtists, Strategy::Artists { favorites: true }),
    (StubType::FavoriteAlbums, favorites(ItemKind::MusicAlbum)),
    (StubType::FavoriteSongs, favorites(ItemKind::Audio)),
];

static MOVIES_MENU: &[(StubType, Strategy)] = &[
    (StubType::ContinueWatching, Strategy::ContinueWatching),
    (
        StubType::Latest,
        Strategy::Latest {
            kind: ItemKind::Movie,
            group_items: true,
        },
    ),
    (StubType::Movies, items(ItemKind::Movie)),
    (StubType::Collections, global(ItemKind::BoxSet)),
    (StubType::Favorites, favorites(ItemKind::Movie)),
    (StubType::Genres, Strategy::Genres),
];

static TV_MENU: &[(StubType, Strategy)] = &[
    (StubType::ContinueWatching, Strategy::ContinueWatching),
    (StubType::NextUp, Strategy::NextUp),
    (
        StubType::Latest,
        Strategy::Latest {
            kind: ItemKind::Episode,
            group_items: false,
        },
    ),
    (StubType::Series, items(ItemKind::Series)),
    (StubType::FavoriteSeries, favorites(ItemKind::Series)),
    (StubType::FavoriteEpisodes, favorites(ItemKind::Episode)),
    (StubType::Genres, Strategy::Genres),
];

/// Stratégie des entités nommées (genres, artistes) : les items qui les portent
pub fn named_entity_strategy(kind: ItemKind) -> Option<Strategy> {
    match kind {
        ItemKind::MusicGenre => Some(Strategy::Tagged {
            tag: TagKind::Genre,
            kinds: &[ItemKind::MusicAlbum],
        }),
        ItemKind::MusicArtist => Some(Strategy::Tagged {
            tag: TagKind::Artist,
            kinds: &[ItemKind::MusicAlbum],
        }),
        ItemKind::Genre => Some(Strategy::Tagged {
            tag: TagKind::Genre,
            kinds: &[ItemKind::Movie, ItemKind::Series],
        }),
        _ => None,
    }
}
