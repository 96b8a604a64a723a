//! Library item model.

use chrono::{DateTime, Utc};

use crate::ids::ItemId;

/// Number of 100ns ticks in one second
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Concrete kind of a library item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    UserRootFolder,
    CollectionFolder,
    Folder,
    UserView,
    Movie,
    Trailer,
    Series,
    Season,
    Episode,
    Video,
    MusicVideo,
    Audio,
    MusicAlbum,
    MusicArtist,
    MusicGenre,
    Genre,
    Studio,
    Person,
    Playlist,
    BoxSet,
    Photo,
    PhotoAlbum,
    Game,
    Book,
    LiveTvChannel,
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::UserRootFolder => "UserRootFolder",
            ItemKind::CollectionFolder => "CollectionFolder",
            ItemKind::Folder => "Folder",
            ItemKind::UserView => "UserView",
            ItemKind::Movie => "Movie",
            ItemKind::Trailer => "Trailer",
            ItemKind::Series => "Series",
            ItemKind::Season => "Season",
            ItemKind::Episode => "Episode",
            ItemKind::Video => "Video",
            ItemKind::MusicVideo => "MusicVideo",
            ItemKind::Audio => "Audio",
            ItemKind::MusicAlbum => "MusicAlbum",
            ItemKind::MusicArtist => "MusicArtist",
            ItemKind::MusicGenre => "MusicGenre",
            ItemKind::Genre => "Genre",
            ItemKind::Studio => "Studio",
            ItemKind::Person => "Person",
            ItemKind::Playlist => "Playlist",
            ItemKind::BoxSet => "BoxSet",
            ItemKind::Photo => "Photo",
            ItemKind::PhotoAlbum => "PhotoAlbum",
            ItemKind::Game => "Game",
            ItemKind::Book => "Book",
            ItemKind::LiveTvChannel => "LiveTvChannel",
        }
    }

    /// Items of this kind can hold children
    pub fn is_folder(&self) -> bool {
        matches!(
            self,
            ItemKind::UserRootFolder
                | ItemKind::CollectionFolder
                | ItemKind::Folder
                | ItemKind::UserView
                | ItemKind::Series
                | ItemKind::Season
                | ItemKind::MusicAlbum
                | ItemKind::MusicArtist
                | ItemKind::Playlist
                | ItemKind::BoxSet
                | ItemKind::PhotoAlbum
        )
    }

    /// Named entities whose "children" are the items tagged with them
    pub fn is_item_by_name(&self) -> bool {
        matches!(
            self,
            ItemKind::MusicArtist
                | ItemKind::MusicGenre
                | ItemKind::Genre
                | ItemKind::Studio
                | ItemKind::Person
        )
    }

    pub fn media_type(&self) -> Option<MediaType> {
        match self {
            ItemKind::Movie
            | ItemKind::Trailer
            | ItemKind::Episode
            | ItemKind::Video
            | ItemKind::MusicVideo
            | ItemKind::LiveTvChannel => Some(MediaType::Video),
            ItemKind::Audio => Some(MediaType::Audio),
            ItemKind::Photo => Some(MediaType::Photo),
            ItemKind::Book => Some(MediaType::Book),
            ItemKind::Game => Some(MediaType::Game),
            _ => None,
        }
    }
}

/// Media type of a playable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Audio,
    Video,
    Photo,
    Book,
    Game,
}

/// Collection type of a library view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionType {
    Music,
    Movies,
    TvShows,
    Folders,
    LiveTv,
    Photos,
    HomeVideos,
    MusicVideos,
    Playlists,
    BoxSets,
    Books,
}

impl CollectionType {
    const ALL: [CollectionType; 11] = [
        CollectionType::Music,
        CollectionType::Movies,
        CollectionType::TvShows,
        CollectionType::Folders,
        CollectionType::LiveTv,
        CollectionType::Photos,
        CollectionType::HomeVideos,
        CollectionType::MusicVideos,
        CollectionType::Playlists,
        CollectionType::BoxSets,
        CollectionType::Books,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionType::Music => "music",
            CollectionType::Movies => "movies",
            CollectionType::TvShows => "tvshows",
            CollectionType::Folders => "folders",
            CollectionType::LiveTv => "livetv",
            CollectionType::Photos => "photos",
            CollectionType::HomeVideos => "homevideos",
            CollectionType::MusicVideos => "musicvideos",
            CollectionType::Playlists => "playlists",
            CollectionType::BoxSets => "boxsets",
            CollectionType::Books => "books",
        }
    }

    /// Case-insensitive lookup of a collection tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(tag))
    }
}

/// An item of the media library
#[derive(Debug, Clone, PartialEq)]
pub struct BaseItem {
    pub id: ItemId,
    pub name: String,
    pub sort_name: String,
    pub kind: ItemKind,
    pub parent_id: Option<ItemId>,
    pub collection_type: Option<CollectionType>,
    pub is_virtual_item: bool,
    pub is_placeholder: bool,
    pub is_missing: bool,
    /// Children are already in display order and must not be re-sorted
    pub is_pre_sorted: bool,
    pub date_created: DateTime<Utc>,
    pub production_year: Option<i32>,
    pub run_time_ticks: Option<i64>,
    pub genres: Vec<String>,
    pub artists: Vec<String>,
    pub album_artists: Vec<String>,
    pub album: Option<String>,
    pub album_id: Option<ItemId>,
    pub series_id: Option<ItemId>,
    pub series_name: Option<String>,
    /// Track or episode number
    pub index_number: Option<i32>,
    /// Disc or season number
    pub parent_index_number: Option<i32>,
    pub mime_type: Option<String>,
    pub size: Option<u64>,
}

impl BaseItem {
    pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: ItemId::new(),
            sort_name: name.to_lowercase(),
            name,
            kind,
            parent_id: None,
            collection_type: None,
            is_virtual_item: false,
            is_placeholder: false,
            is_missing: false,
            is_pre_sorted: false,
            date_created: Utc::now(),
            production_year: None,
            run_time_ticks: None,
            genres: Vec::new(),
            artists: Vec::new(),
            album_artists: Vec::new(),
            album: None,
            album_id: None,
            series_id: None,
            series_name: None,
            index_number: None,
            parent_index_number: None,
            mime_type: None,
            size: None,
        }
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    pub fn with_parent(mut self, parent: ItemId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    pub fn with_sort_name(mut self, sort_name: impl Into<String>) -> Self {
        self.sort_name = sort_name.into();
        self
    }

    pub fn with_collection_type(mut self, collection_type: CollectionType) -> Self {
        self.collection_type = Some(collection_type);
        self
    }

    pub fn with_date_created(mut self, date: DateTime<Utc>) -> Self {
        self.date_created = date;
        self
    }

    pub fn with_genres<S: Into<String>>(mut self, genres: impl IntoIterator<Item = S>) -> Self {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_artists<S: Into<String>>(mut self, artists: impl IntoIterator<Item = S>) -> Self {
        self.artists = artists.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_album_artists<S: Into<String>>(
        mut self,
        artists: impl IntoIterator<Item = S>,
    ) -> Self {
        self.album_artists = artists.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_album(mut self, album: &BaseItem) -> Self {
        self.album = Some(album.name.clone());
        self.album_id = Some(album.id);
        self
    }

    pub fn with_series(mut self, series: &BaseItem) -> Self {
        self.series_name = Some(series.name.clone());
        self.series_id = Some(series.id);
        self
    }

    pub fn with_index(mut self, parent_index: Option<i32>, index: i32) -> Self {
        self.parent_index_number = parent_index;
        self.index_number = Some(index);
        self
    }

    pub fn with_run_time_ticks(mut self, ticks: i64) -> Self {
        self.run_time_ticks = Some(ticks);
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_production_year(mut self, year: i32) -> Self {
        self.production_year = Some(year);
        self
    }

    pub fn virtual_item(mut self) -> Self {
        self.is_virtual_item = true;
        self
    }

    pub fn placeholder(mut self) -> Self {
        self.is_placeholder = true;
        self
    }

    pub fn missing(mut self) -> Self {
        self.is_missing = true;
        self
    }

    pub fn pre_sorted(mut self) -> Self {
        self.is_pre_sorted = true;
        self
    }

    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Rendered as a container by DLNA clients
    pub fn is_displayed_as_folder(&self) -> bool {
        self.kind.is_folder() || self.kind.is_item_by_name()
    }

    pub fn media_type(&self) -> Option<MediaType> {
        self.kind.media_type()
    }
}

/// Per-user state of an item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserItemData {
    pub playback_position_ticks: i64,
    pub play_count: u32,
    pub played: bool,
    pub is_favorite: bool,
    pub last_played_date: Option<DateTime<Utc>>,
}

impl UserItemData {
    pub fn is_resumable(&self) -> bool {
        self.playback_position_ticks > 0
    }
}

/// Why user data is being saved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDataSaveReason {
    PlaybackStart,
    PlaybackProgress,
    PlaybackFinished,
    TogglePlayed,
    UpdateUserRating,
    Import,
}
