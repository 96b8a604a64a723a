//! Construction des éléments DIDL-Lite à partir des items de la bibliothèque.

use std::fmt::Debug;

use dmsdidl::{Container, DidlError, DidlWriter, Item, Resource};
use dmslibrary::{BaseItem, ItemKind, MediaType, TICKS_PER_SECOND};

use crate::contentdirectory::criteria::Filter;
use crate::contentdirectory::object_id::{self, ROOT_ID};
use crate::contentdirectory::server_item::ServerItem;
use crate::contentdirectory::stubs::StubType;

/// Parent déclaré par la racine
const ROOT_PARENT_ID: &str = "-1";

/// Écrit un élément `<container>` ou `<item>` pour un nœud.
///
/// Le moteur ne connaît rien des métadonnées détaillées ; il délègue
/// l'écriture de chaque élément à cette interface.
pub trait DidlElementWriter: Debug + Send + Sync {
    /// `requested_id` : identifiant demandé par le client, repris tel quel
    /// en mode métadonnées.
    fn write_folder_element(
        &self,
        writer: &mut DidlWriter,
        node: &ServerItem,
        context: Option<&BaseItem>,
        child_count: usize,
        filter: &Filter,
        requested_id: Option<&str>,
    ) -> Result<(), DidlError>;

    /// `context_stub` : stub du container parcouru (Latest, NextUp...)
    fn write_item_element(
        &self,
        writer: &mut DidlWriter,
        item: &BaseItem,
        context: Option<&BaseItem>,
        context_stub: Option<StubType>,
        filter: &Filter,
    ) -> Result<(), DidlError>;
}

/// Implémentation par défaut
#[derive(Debug, Clone)]
pub struct BasicDidlBuilder {
    base_url: String,
    server_name: String,
}

impl BasicDidlBuilder {
    pub fn new(base_url: impl Into<String>, server_name: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            server_name: server_name.into(),
        }
    }

    fn client_id(item: &BaseItem) -> String {
        if item.kind == ItemKind::UserRootFolder {
            ROOT_ID.to_string()
        } else {
            object_id::encode(item.id, None)
        }
    }

    fn parent_id(item: &BaseItem, context: Option<&BaseItem>) -> String {
        match (context, item.parent_id) {
            (Some(context), _) => Self::client_id(context),
            (None, Some(parent)) => object_id::encode(parent, None),
            (None, None) => ROOT_ID.to_string(),
        }
    }

    fn stream_url(&self, item: &BaseItem, media_type: MediaType) -> Option<String> {
        let segment = match media_type {
            MediaType::Audio => "Audio",
            MediaType::Video => "Videos",
            MediaType::Photo => "Images",
            _ => return None,
        };
        Some(format!("{}/{}/{}/stream", self.base_url, segment, item.id))
    }

    fn resource(&self, item: &BaseItem, filter: &Filter) -> Option<Resource> {
        let media_type = item.media_type()?;
        let url = self.stream_url(item, media_type)?;
        let mime = item
            .mime_type
            .clone()
            .unwrap_or_else(|| default_mime(media_type).to_string());

        Some(Resource {
            protocol_info: format!("http-get:*:{}:*", mime),
            duration: item
                .run_time_ticks
                .filter(|_| filter.contains("res@duration"))
                .map(format_duration),
            size: item
                .size
                .filter(|_| filter.contains("res@size"))
                .map(|s| s.to_string()),
            bitrate: None,
            url,
        })
    }
}

impl DidlElementWriter for BasicDidlBuilder {
    fn write_folder_element(
        &self,
        writer: &mut DidlWriter,
        node: &ServerItem,
        context: Option<&BaseItem>,
        child_count: usize,
        filter: &Filter,
        requested_id: Option<&str>,
    ) -> Result<(), DidlError> {
        let item = node.item();
        let stub = node.stub().filter(|s| *s != StubType::Folder);
        let is_root = item.kind == ItemKind::UserRootFolder && stub.is_none();

        let parent_id = if is_root {
            ROOT_PARENT_ID.to_string()
        } else if stub.is_some() {
            Self::client_id(item)
        } else {
            Self::parent_id(item, context)
        };

        let title = match stub.and_then(|s| s.title()) {
            Some(title) => title.to_string(),
            None if is_root => self.server_name.clone(),
            None => item.name.clone(),
        };

        let class = match stub {
            Some(_) => "object.container.storageFolder",
            None => container_class(item.kind),
        };

        let album = item.kind == ItemKind::MusicAlbum && stub.is_none();
        let container = Container {
            id: requested_id
                .map(str::to_string)
                .unwrap_or_else(|| node.object_id()),
            parent_id,
            restricted: Some("1".to_string()),
            searchable: Some("1".to_string()),
            child_count: Some(child_count.to_string()),
            title,
            artist: album
                .then(|| item.album_artists.first().cloned())
                .flatten()
                .filter(|_| filter.contains("upnp:artist")),
            genre: album
                .then(|| item.genres.first().cloned())
                .flatten()
                .filter(|_| filter.contains("upnp:genre")),
            date: item
                .production_year
                .filter(|_| stub.is_none() && filter.contains("dc:date"))
                .map(|y| format!("{:04}-01-01", y)),
            class: class.to_string(),
            containers: Vec::new(),
            items: Vec::new(),
        };

        writer.write_container(&container)
    }

    fn write_item_element(
        &self,
        writer: &mut DidlWriter,
        item: &BaseItem,
        context: Option<&BaseItem>,
        context_stub: Option<StubType>,
        filter: &Filter,
    ) -> Result<(), DidlError> {
        let title = match (&item.series_name, context_stub) {
            (
                Some(series),
                Some(StubType::NextUp | StubType::ContinueWatching | StubType::Latest),
            ) if item.kind == ItemKind::Episode => format!("{} - {}", series, item.name),
            _ => item.name.clone(),
        };

        let artist = item
            .artists
            .first()
            .or_else(|| item.album_artists.first())
            .cloned();

        let didl_item = Item {
            id: object_id::encode(item.id, None),
            parent_id: Self::parent_id(item, context),
            restricted: Some("1".to_string()),
            title,
            creator: artist.clone().filter(|_| filter.contains("dc:creator")),
            class: item_class(item.kind).to_string(),
            artist: artist.filter(|_| filter.contains("upnp:artist")),
            album: item
                .album
                .clone()
                .filter(|_| filter.contains("upnp:album")),
            genre: item
                .genres
                .first()
                .cloned()
                .filter(|_| filter.contains("upnp:genre")),
            album_art: None,
            date: item
                .production_year
                .filter(|_| filter.contains("dc:date"))
                .map(|y| format!("{:04}-01-01", y)),
            original_track_number: item
                .index_number
                .filter(|_| item.kind == ItemKind::Audio)
                .filter(|_| filter.contains("upnp:originalTrackNumber"))
                .map(|n| n.to_string()),
            episode_number: item
                .index_number
                .filter(|_| item.kind == ItemKind::Episode)
                .filter(|_| filter.contains("upnp:episodeNumber"))
                .map(|n| n.to_string()),
            resources: self.resource(item, filter).into_iter().collect(),
        };

        writer.write_item(&didl_item)
    }
}

fn container_class(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::MusicAlbum => "object.container.album.musicAlbum",
        ItemKind::MusicArtist => "object.container.person.musicArtist",
        ItemKind::Person => "object.container.person",
        ItemKind::MusicGenre => "object.container.genre.musicGenre",
        ItemKind::Genre => "object.container.genre",
        ItemKind::Playlist => "object.container.playlistContainer",
        ItemKind::PhotoAlbum => "object.container.album.photoAlbum",
        _ => "object.container.storageFolder",
    }
}

fn item_class(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Audio => "object.item.audioItem.musicTrack",
        ItemKind::Movie => "object.item.videoItem.movie",
        ItemKind::MusicVideo => "object.item.videoItem.musicVideoClip",
        ItemKind::LiveTvChannel => "object.item.videoItem.videoBroadcast",
        ItemKind::Photo => "object.item.imageItem.photo",
        ItemKind::Episode | ItemKind::Video | ItemKind::Trailer => "object.item.videoItem",
        ItemKind::Book => "object.item.textItem",
        _ => "object.item",
    }
}

fn default_mime(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Audio => "audio/mpeg",
        MediaType::Video => "video/mp4",
        MediaType::Photo => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Durée au format `H:MM:SS.mmm`
fn format_duration(ticks: i64) -> String {
    let millis = ticks.max(0) / (TICKS_PER_SECOND / 1000);
    let (seconds, millis) = (millis / 1000, millis % 1000);
    format!(
        "{}:{:02}:{:02}.{:03}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60,
        millis
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmsdidl::DIDLLite;

    fn builder() -> BasicDidlBuilder {
        BasicDidlBuilder::new("http://host:8096/", "Living Room")
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00:00.000");
        assert_eq!(format_duration(90 * TICKS_PER_SECOND + 5_000_000), "0:01:30.500");
        assert_eq!(format_duration(3_723 * TICKS_PER_SECOND), "1:02:03.000");
    }

    #[test]
    fn test_root_folder_element() {
        let root = BaseItem::new(ItemKind::UserRootFolder, "Media Folders");
        let mut writer = DidlWriter::new(&[]).unwrap();
        builder()
            .write_folder_element(
                &mut writer,
                &ServerItem::new(root),
                None,
                3,
                &Filter::all(),
                Some("0"),
            )
            .unwrap();

        let didl = DIDLLite::parse(&writer.finish().unwrap()).unwrap();
        let container = &didl.containers[0];
        assert_eq!(container.id, "0");
        assert_eq!(container.parent_id, "-1");
        assert_eq!(container.title, "Living Room");
        assert_eq!(container.child_count.as_deref(), Some("3"));
    }

    #[test]
    fn test_stub_folder_element() {
        let music = BaseItem::new(ItemKind::CollectionFolder, "Music");
        let node = ServerItem::Stub {
            anchor: music.clone(),
            stub: StubType::AlbumArtists,
        };
        let mut writer = DidlWriter::new(&[]).unwrap();
        builder()
            .write_folder_element(&mut writer, &node, Some(&music), 0, &Filter::all(), None)
            .unwrap();

        let didl = DIDLLite::parse(&writer.finish().unwrap()).unwrap();
        let container = &didl.containers[0];
        assert_eq!(container.id, format!("AlbumArtists_{}", music.id));
        assert_eq!(container.parent_id, music.id.to_string());
        assert_eq!(container.title, "Album Artists");
        assert_eq!(container.class, "object.container.storageFolder");
    }

    #[test]
    fn test_audio_item_element() {
        let album = BaseItem::new(ItemKind::MusicAlbum, "Kind of Blue");
        let track = BaseItem::new(ItemKind::Audio, "So What")
            .with_album(&album)
            .with_artists(["Miles Davis"])
            .with_index(None, 1)
            .with_run_time_ticks(545 * TICKS_PER_SECOND)
            .with_mime_type("audio/flac");

        let mut writer = DidlWriter::new(&[]).unwrap();
        builder()
            .write_item_element(&mut writer, &track, Some(&album), None, &Filter::all())
            .unwrap();

        let didl = DIDLLite::parse(&writer.finish().unwrap()).unwrap();
        let item = &didl.items[0];
        assert_eq!(item.parent_id, album.id.to_string());
        assert_eq!(item.class, "object.item.audioItem.musicTrack");
        assert_eq!(item.artist.as_deref(), Some("Miles Davis"));
        assert_eq!(item.original_track_number.as_deref(), Some("1"));

        let res = &item.resources[0];
        assert_eq!(res.protocol_info, "http-get:*:audio/flac:*");
        assert_eq!(res.url, format!("http://host:8096/Audio/{}/stream", track.id));
        assert_eq!(res.duration.as_deref(), Some("0:09:05.000"));
    }

    #[test]
    fn test_filter_hides_optional_properties() {
        let track = BaseItem::new(ItemKind::Audio, "Blue in Green")
            .with_artists(["Bill Evans"])
            .with_run_time_ticks(10 * TICKS_PER_SECOND);

        let mut writer = DidlWriter::new(&[]).unwrap();
        builder()
            .write_item_element(
                &mut writer,
                &track,
                None,
                None,
                &Filter::parse("dc:title"),
            )
            .unwrap();

        let didl = DIDLLite::parse(&writer.finish().unwrap()).unwrap();
        let item = &didl.items[0];
        assert!(item.artist.is_none());
        assert!(item.resources[0].duration.is_none());
    }

    #[test]
    fn test_episode_title_in_next_up() {
        let series = BaseItem::new(ItemKind::Series, "The Wire");
        let episode = BaseItem::new(ItemKind::Episode, "The Target").with_series(&series);

        for (stub, expected) in [
            (Some(StubType::NextUp), "The Wire - The Target"),
            (None, "The Target"),
        ] {
            let mut writer = DidlWriter::new(&[]).unwrap();
            builder()
                .write_item_element(&mut writer, &episode, None, stub, &Filter::all())
                .unwrap();
            let didl = DIDLLite::parse(&writer.finish().unwrap()).unwrap();
            assert_eq!(didl.items[0].title, expected);
        }
    }
}
