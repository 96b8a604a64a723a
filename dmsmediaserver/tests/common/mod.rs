//! Bibliothèque de test partagée par les tests d'intégration.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use dmsdidl::DIDLLite;
use dmslibrary::{
    BaseItem, CollectionType, ItemKind, MemoryLibrary, TICKS_PER_SECOND, UserId, UserItemData,
};
use dmsmediaserver::{ContentHandler, ControlParams, DlnaOptions, Headers, LibraryServices};

pub const SERVER_NAME: &str = "Test Server";
pub const BASE_URL: &str = "http://media.local:8096";

pub struct Fixture {
    pub library: Arc<MemoryLibrary>,
    pub handler: ContentHandler,
    pub user_id: UserId,
    pub root: BaseItem,
    pub music: BaseItem,
    pub album: BaseItem,
    pub tracks: Vec<BaseItem>,
    pub movies: BaseItem,
    pub heat: BaseItem,
    pub alien: BaseItem,
    pub tv: BaseItem,
    pub series: BaseItem,
    pub episodes: Vec<BaseItem>,
    pub shelf: BaseItem,
    pub home_video: BaseItem,
    pub folders: BaseItem,
    pub live_tv: BaseItem,
}

fn collection(name: &str, collection_type: CollectionType) -> BaseItem {
    BaseItem::new(ItemKind::CollectionFolder, name).with_collection_type(collection_type)
}

/// Racine
/// ├── Music (12 pistes dans un album)
/// ├── Movies (Heat, Alien)
/// ├── TV (The Wire, saison 1, 3 épisodes)
/// ├── Shelf (un jeu, un livre, une vidéo)
/// ├── Folders (collection de type "folders")
/// └── Live TV (2 chaînes)
pub fn fixture() -> Fixture {
    let library = Arc::new(MemoryLibrary::new());
    let root = library.root();
    let user_id = UserId::new();

    let music = library.add_child(&root, collection("Music", CollectionType::Music));
    let album = library.add_child(
        &music,
        BaseItem::new(ItemKind::MusicAlbum, "Kind of Blue")
            .with_album_artists(["Miles Davis"])
            .with_genres(["Jazz"])
            .with_production_year(1959),
    );
    let tracks = (1..=12)
        .map(|n| {
            library.add_child(
                &album,
                BaseItem::new(ItemKind::Audio, format!("Track {:02}", n))
                    .with_album(&album)
                    .with_artists(["Miles Davis"])
                    .with_album_artists(["Miles Davis"])
                    .with_genres(["Jazz"])
                    .with_index(Some(1), n)
                    .with_run_time_ticks(300 * TICKS_PER_SECOND)
                    .with_mime_type("audio/flac"),
            )
        })
        .collect();

    let movies = library.add_child(&root, collection("Movies", CollectionType::Movies));
    let heat = library.add_child(
        &movies,
        BaseItem::new(ItemKind::Movie, "Heat")
            .with_genres(["Crime"])
            .with_production_year(1995),
    );
    let alien = library.add_child(
        &movies,
        BaseItem::new(ItemKind::Movie, "Alien")
            .with_genres(["Science Fiction"])
            .with_production_year(1979),
    );

    let tv = library.add_child(&root, collection("TV", CollectionType::TvShows));
    let series = library.add_child(
        &tv,
        BaseItem::new(ItemKind::Series, "The Wire").with_genres(["Crime"]),
    );
    let season = library.add_child(
        &series,
        BaseItem::new(ItemKind::Season, "Season 1")
            .with_series(&series)
            .with_index(None, 1),
    );
    let episodes = ["The Target", "The Detail", "The Buys"]
        .iter()
        .enumerate()
        .map(|(n, title)| {
            library.add_child(
                &season,
                BaseItem::new(ItemKind::Episode, *title)
                    .with_series(&series)
                    .with_index(Some(1), n as i32 + 1),
            )
        })
        .collect();

    let shelf = library.add_child(&root, BaseItem::new(ItemKind::Folder, "Shelf"));
    library.add_child(&shelf, BaseItem::new(ItemKind::Game, "Doom"));
    library.add_child(&shelf, BaseItem::new(ItemKind::Book, "Dune"));
    let home_video = library.add_child(&shelf, BaseItem::new(ItemKind::Video, "Holidays"));

    let folders = library.add_child(&root, collection("Folders", CollectionType::Folders));

    let live_tv = library.add_child(&root, collection("Live TV", CollectionType::LiveTv));
    library.add_child(&live_tv, BaseItem::new(ItemKind::LiveTvChannel, "Channel 1"));
    library.add_child(&live_tv, BaseItem::new(ItemKind::LiveTvChannel, "Channel 2"));

    let options = DlnaOptions {
        base_url: BASE_URL.to_string(),
        server_name: SERVER_NAME.to_string(),
        ..DlnaOptions::default()
    }
    .with_user(user_id);
    let handler = ContentHandler::new(LibraryServices::from_shared(library.clone()), options);

    Fixture {
        library,
        handler,
        user_id,
        root,
        music,
        album,
        tracks,
        movies,
        heat,
        alien,
        tv,
        series,
        episodes,
        shelf,
        home_video,
        folders,
        live_tv,
    }
}

impl Fixture {
    /// Marque un item comme lu il y a `minutes_ago` minutes
    pub fn mark_played(&self, item: &BaseItem, minutes_ago: i64) {
        self.library.set_user_data(
            self.user_id,
            item.id,
            UserItemData {
                played: true,
                play_count: 1,
                last_played_date: Some(Utc::now() - Duration::minutes(minutes_ago)),
                ..Default::default()
            },
        );
    }

    /// Position de lecture en cours
    pub fn mark_resumable(&self, item: &BaseItem, seconds: i64, minutes_ago: i64) {
        self.library.set_user_data(
            self.user_id,
            item.id,
            UserItemData {
                playback_position_ticks: seconds * TICKS_PER_SECOND,
                last_played_date: Some(Utc::now() - Duration::minutes(minutes_ago)),
                ..Default::default()
            },
        );
    }
}

pub fn params(pairs: &[(&str, &str)]) -> ControlParams {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

pub fn browse_params(object_id: &str, flag: &str, start: &str, count: &str) -> ControlParams {
    params(&[
        ("ObjectID", object_id),
        ("BrowseFlag", flag),
        ("Filter", "*"),
        ("StartingIndex", start),
        ("RequestedCount", count),
        ("SortCriteria", ""),
    ])
}

pub fn header<'a>(headers: &'a Headers, name: &str) -> &'a str {
    headers
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .unwrap_or_else(|| panic!("missing header {}", name))
}

pub fn count(headers: &Headers, name: &str) -> usize {
    header(headers, name).parse().unwrap()
}

pub fn didl(headers: &Headers) -> DIDLLite {
    DIDLLite::parse(header(headers, "Result")).unwrap()
}

/// Browse BrowseDirectChildren sans pagination
pub async fn children(fixture: &Fixture, object_id: &str) -> Headers {
    fixture
        .handler
        .dispatch(
            "Browse",
            &browse_params(object_id, "BrowseDirectChildren", "0", "0"),
        )
        .await
        .unwrap()
}
