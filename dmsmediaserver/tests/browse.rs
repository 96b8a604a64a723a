//! Tests d'intégration de l'action Browse.

mod common;

use common::*;
use dmslibrary::{BaseItem, CollectionType, ItemKind};

#[tokio::test]
async fn test_root_metadata() {
    let f = fixture();
    let headers = f
        .handler
        .dispatch("Browse", &browse_params("0", "BrowseMetadata", "0", "0"))
        .await
        .unwrap();

    let names: Vec<&str> = headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, ["Result", "NumberReturned", "TotalMatches", "UpdateID"]);
    assert_eq!(count(&headers, "NumberReturned"), 1);
    assert_eq!(count(&headers, "TotalMatches"), 1);

    let didl = didl(&headers);
    assert_eq!(didl.containers.len(), 1);
    assert!(didl.items.is_empty());
    let root = &didl.containers[0];
    assert_eq!(root.id, "0");
    assert_eq!(root.parent_id, "-1");
    assert_eq!(root.title, SERVER_NAME);
    assert_eq!(root.child_count.as_deref(), Some("6"));
}

#[tokio::test]
async fn test_root_sentinels_are_equivalent() {
    let f = fixture();
    for id in ["", "  ", "1"] {
        let headers = f
            .handler
            .dispatch("Browse", &browse_params(id, "BrowseMetadata", "0", "0"))
            .await
            .unwrap();
        let didl = didl(&headers);
        let root = &didl.containers[0];
        assert_eq!(root.title, SERVER_NAME, "sentinel {:?}", id);
        assert_eq!(root.parent_id, "-1");
    }
}

#[tokio::test]
async fn test_root_children_are_sorted_by_name() {
    let f = fixture();
    let headers = children(&f, "0").await;
    assert_eq!(count(&headers, "NumberReturned"), 6);
    assert_eq!(count(&headers, "TotalMatches"), 6);

    let didl = didl(&headers);
    let titles: Vec<&str> = didl.containers.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["Folders", "Live TV", "Movies", "Music", "Shelf", "TV"]);
    assert!(didl.containers.iter().all(|c| c.parent_id == "0"));
}

#[tokio::test]
async fn test_music_menu() {
    let f = fixture();
    let headers = children(&f, &f.music.id.to_string()).await;
    assert_eq!(count(&headers, "NumberReturned"), 10);
    assert_eq!(count(&headers, "TotalMatches"), 10);

    let didl = didl(&headers);
    let titles: Vec<&str> = didl.containers.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Latest",
            "Playlists",
            "Albums",
            "Album Artists",
            "Artists",
            "Songs",
            "Genres",
            "Favorite Artists",
            "Favorite Albums",
            "Favorite Songs",
        ]
    );

    let music_id = f.music.id.to_string();
    let latest = &didl.containers[0];
    assert_eq!(latest.id, format!("Latest_{}", music_id));
    assert_eq!(latest.parent_id, music_id);
    assert_eq!(latest.class, "object.container.storageFolder");
}

#[tokio::test]
async fn test_menu_paging() {
    let f = fixture();
    let headers = f
        .handler
        .dispatch(
            "Browse",
            &browse_params(&f.tv.id.to_string(), "BrowseDirectChildren", "2", "3"),
        )
        .await
        .unwrap();
    assert_eq!(count(&headers, "NumberReturned"), 3);
    assert_eq!(count(&headers, "TotalMatches"), 7);

    let titles: Vec<String> = didl(&headers)
        .containers
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(titles, ["Latest", "Series", "Favorite Series"]);
}

#[tokio::test]
async fn test_songs_stub_paging() {
    let f = fixture();
    let id = format!("Songs_{}", f.music.id);
    let headers = f
        .handler
        .dispatch("Browse", &browse_params(&id, "BrowseDirectChildren", "10", "5"))
        .await
        .unwrap();

    assert_eq!(count(&headers, "NumberReturned"), 2);
    assert_eq!(count(&headers, "TotalMatches"), 12);
    let didl = didl(&headers);
    let titles: Vec<&str> = didl.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Track 11", "Track 12"]);
    assert!(
        didl.items
            .iter()
            .all(|i| i.class == "object.item.audioItem.musicTrack")
    );
}

#[tokio::test]
async fn test_stub_prefix_is_case_insensitive() {
    let f = fixture();
    let headers = children(&f, &format!("songs_{}", f.music.id)).await;
    assert_eq!(count(&headers, "TotalMatches"), 12);
}

#[tokio::test]
async fn test_negative_starting_index_is_zero() {
    let f = fixture();
    let id = f.music.id.to_string();
    let negative = f
        .handler
        .dispatch("Browse", &browse_params(&id, "BrowseDirectChildren", "-4", "3"))
        .await
        .unwrap();
    let zero = f
        .handler
        .dispatch("Browse", &browse_params(&id, "BrowseDirectChildren", "0", "3"))
        .await
        .unwrap();

    assert_eq!(header(&negative, "Result"), header(&zero, "Result"));
    assert_eq!(count(&negative, "NumberReturned"), 3);
}

#[tokio::test]
async fn test_number_returned_never_exceeds_total() {
    let f = fixture();
    let ids = [
        "0".to_string(),
        f.music.id.to_string(),
        format!("Albums_{}", f.music.id),
        format!("Genres_{}", f.movies.id),
        f.shelf.id.to_string(),
        f.live_tv.id.to_string(),
    ];
    for id in &ids {
        for (start, requested) in [("0", "0"), ("0", "1"), ("3", "2"), ("50", "10")] {
            let headers = f
                .handler
                .dispatch(
                    "Browse",
                    &browse_params(id, "BrowseDirectChildren", start, requested),
                )
                .await
                .unwrap();
            let returned = count(&headers, "NumberReturned");
            let total = count(&headers, "TotalMatches");
            assert!(returned <= total, "{} [{}, {}]", id, start, requested);
            assert_eq!(didl(&headers).len(), returned);
        }
    }
}

#[tokio::test]
async fn test_music_genre_drills_down_to_albums() {
    let f = fixture();
    let headers = children(&f, &format!("Genres_{}", f.music.id)).await;
    let genres = didl(&headers);
    assert_eq!(genres.containers.len(), 1);
    let jazz = &genres.containers[0];
    assert_eq!(jazz.title, "Jazz");
    assert_eq!(jazz.class, "object.container.genre.musicGenre");
    assert_eq!(jazz.child_count.as_deref(), Some("1"));

    let headers = children(&f, &jazz.id).await;
    let albums = didl(&headers);
    assert_eq!(albums.containers.len(), 1);
    assert_eq!(albums.containers[0].title, "Kind of Blue");
    assert_eq!(albums.containers[0].class, "object.container.album.musicAlbum");
}

#[tokio::test]
async fn test_movie_genres() {
    let f = fixture();
    let headers = children(&f, &format!("Genres_{}", f.movies.id)).await;
    let titles: Vec<String> = didl(&headers)
        .containers
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(titles, ["Crime", "Science Fiction"]);
}

#[tokio::test]
async fn test_album_artists() {
    let f = fixture();
    let headers = children(&f, &format!("AlbumArtists_{}", f.music.id)).await;
    let didl = didl(&headers);
    assert_eq!(didl.containers.len(), 1);
    assert_eq!(didl.containers[0].title, "Miles Davis");
    assert_eq!(didl.containers[0].class, "object.container.person.musicArtist");
}

#[tokio::test]
async fn test_favorite_songs() {
    let f = fixture();
    let empty = children(&f, &format!("FavoriteSongs_{}", f.music.id)).await;
    assert_eq!(count(&empty, "TotalMatches"), 0);

    f.library.set_user_data(
        f.user_id,
        f.tracks[3].id,
        dmslibrary::UserItemData {
            is_favorite: true,
            ..Default::default()
        },
    );
    let headers = children(&f, &format!("FavoriteSongs_{}", f.music.id)).await;
    let didl = didl(&headers);
    assert_eq!(didl.items.len(), 1);
    assert_eq!(didl.items[0].title, "Track 04");
}

#[tokio::test]
async fn test_latest_music_is_grouped_by_album() {
    let f = fixture();
    let headers = children(&f, &format!("Latest_{}", f.music.id)).await;
    assert_eq!(count(&headers, "TotalMatches"), 1);
    let didl = didl(&headers);
    assert_eq!(didl.containers[0].title, "Kind of Blue");
}

#[tokio::test]
async fn test_playlists_are_listed_from_the_whole_library() {
    let f = fixture();
    f.library
        .add_child(&f.root, BaseItem::new(ItemKind::Playlist, "Road Trip"));

    let headers = children(&f, &format!("Playlists_{}", f.music.id)).await;
    assert_eq!(count(&headers, "TotalMatches"), 1);
    let didl = didl(&headers);
    assert_eq!(didl.containers.len(), 1);
    assert_eq!(didl.containers[0].title, "Road Trip");
}

#[tokio::test]
async fn test_box_sets_are_listed_from_the_whole_library() {
    let f = fixture();
    f.library
        .add_child(&f.root, BaseItem::new(ItemKind::BoxSet, "Alien Anthology"));

    let headers = children(&f, &format!("Collections_{}", f.movies.id)).await;
    assert_eq!(count(&headers, "TotalMatches"), 1);
    assert_eq!(didl(&headers).containers[0].title, "Alien Anthology");
}

#[tokio::test]
async fn test_category_listing_ignores_pre_sorted_anchor() {
    let f = fixture();
    let mixtapes = f.library.add_child(
        &f.root,
        BaseItem::new(ItemKind::CollectionFolder, "Mixtapes")
            .with_collection_type(CollectionType::Music)
            .pre_sorted(),
    );
    let tape = f
        .library
        .add_child(&mixtapes, BaseItem::new(ItemKind::MusicAlbum, "Tape"));
    for side in ["Side A", "Side B"] {
        f.library
            .add_child(&tape, BaseItem::new(ItemKind::Audio, side).with_album(&tape));
    }

    let id = format!("Songs_{}", mixtapes.id);
    let headers = f
        .handler
        .dispatch(
            "Browse",
            &params(&[
                ("ObjectID", id.as_str()),
                ("BrowseFlag", "BrowseDirectChildren"),
                ("Filter", "*"),
                ("StartingIndex", "0"),
                ("RequestedCount", "0"),
                ("SortCriteria", "-dc:title"),
            ]),
        )
        .await
        .unwrap();

    let didl = didl(&headers);
    let titles: Vec<&str> = didl.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Side B", "Side A"]);
}

#[tokio::test]
async fn test_shelf_hides_games_and_books() {
    let f = fixture();
    let headers = children(&f, &f.shelf.id.to_string()).await;
    assert_eq!(count(&headers, "TotalMatches"), 1);

    let didl = didl(&headers);
    assert_eq!(didl.items.len(), 1);
    assert_eq!(didl.items[0].title, f.home_video.name);
    assert_eq!(didl.items[0].class, "object.item.videoItem");
    assert_eq!(didl.items[0].parent_id, f.shelf.id.to_string());
}

#[tokio::test]
async fn test_folders_collection_lists_top_level_folders() {
    let f = fixture();
    let headers = children(&f, &f.folders.id.to_string()).await;
    assert_eq!(count(&headers, "TotalMatches"), 6);

    let didl = didl(&headers);
    let music = didl
        .containers
        .iter()
        .find(|c| c.title == "Music")
        .unwrap();
    assert_eq!(music.id, format!("Folder_{}", f.music.id));

    // Un stub Folder sur une collection donne ses enfants réels, pas son menu
    let headers = children(&f, &music.id).await;
    let albums = common::didl(&headers);
    assert_eq!(albums.containers.len(), 1);
    assert_eq!(albums.containers[0].title, "Kind of Blue");
}

#[tokio::test]
async fn test_live_tv_channels() {
    let f = fixture();
    let headers = children(&f, &f.live_tv.id.to_string()).await;
    let didl = didl(&headers);
    let titles: Vec<&str> = didl.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Channel 1", "Channel 2"]);
    assert!(
        didl.items
            .iter()
            .all(|i| i.class == "object.item.videoItem.videoBroadcast")
    );
}

#[tokio::test]
async fn test_empty_stub_on_plain_folder() {
    let f = fixture();
    let headers = children(&f, &format!("NextUp_{}", f.shelf.id)).await;
    assert_eq!(count(&headers, "NumberReturned"), 0);
    assert_eq!(count(&headers, "TotalMatches"), 0);
    assert!(didl(&headers).is_empty());
}

#[tokio::test]
async fn test_track_metadata() {
    let f = fixture();
    let track = &f.tracks[0];
    let id = track.id.to_string();
    let headers = f
        .handler
        .dispatch("Browse", &browse_params(&id, "BrowseMetadata", "0", "0"))
        .await
        .unwrap();
    assert_eq!(count(&headers, "NumberReturned"), 1);

    let didl = didl(&headers);
    let item = &didl.items[0];
    assert_eq!(item.id, id);
    assert_eq!(item.parent_id, f.album.id.to_string());
    assert_eq!(item.album.as_deref(), Some("Kind of Blue"));
    assert_eq!(item.original_track_number.as_deref(), Some("1"));

    let res = &item.resources[0];
    assert_eq!(res.url, format!("{}/Audio/{}/stream", BASE_URL, id));
    assert_eq!(res.protocol_info, "http-get:*:audio/flac:*");
    assert_eq!(res.duration.as_deref(), Some("0:05:00.000"));
}

#[tokio::test]
async fn test_filter_limits_optional_fields() {
    let f = fixture();
    let id = f.tracks[0].id.to_string();
    let params = params(&[
        ("ObjectID", id.as_str()),
        ("BrowseFlag", "BrowseMetadata"),
        ("Filter", "dc:title,upnp:album"),
    ]);
    let headers = f.handler.dispatch("Browse", &params).await.unwrap();

    let didl = didl(&headers);
    let item = &didl.items[0];
    assert_eq!(item.title, "Track 01");
    assert_eq!(item.album.as_deref(), Some("Kind of Blue"));
    assert!(item.artist.is_none());
    assert!(item.genre.is_none());
    assert!(item.resources[0].duration.is_none());
}

#[tokio::test]
async fn test_malformed_ids_fall_back_to_root() {
    let f = fixture();
    let unknown = dmslibrary::ItemId::new().to_string();
    for id in ["not-an-id", "Latest_", "Params=a;b;c", unknown.as_str()] {
        let headers = f
            .handler
            .dispatch("Browse", &browse_params(id, "BrowseMetadata", "0", "0"))
            .await
            .unwrap();
        let didl = didl(&headers);
        let root = &didl.containers[0];
        assert_eq!(root.title, SERVER_NAME, "id {:?}", id);
        assert_eq!(root.id, id);
    }
}

#[tokio::test]
async fn test_params_block_decodes_field_23() {
    let f = fixture();
    let mut fields = vec!["x"; 30];
    let album_id = f.album.id.to_string();
    fields[23] = &album_id;
    let raw = format!("Params={}", fields.join(";"));

    let headers = children(&f, &raw).await;
    assert_eq!(count(&headers, "TotalMatches"), 12);
}

#[tokio::test]
async fn test_named_entity_metadata_is_a_container() {
    let f = fixture();
    let jazz = f.library.find_by_name(ItemKind::MusicGenre, "Jazz").unwrap();
    let id = format!("Folder_{}", jazz.id);
    let headers = f
        .handler
        .dispatch("Browse", &browse_params(&id, "BrowseMetadata", "0", "0"))
        .await
        .unwrap();
    let didl = didl(&headers);
    assert_eq!(didl.containers.len(), 1);
    assert_eq!(didl.containers[0].id, id);
    assert_eq!(didl.containers[0].child_count.as_deref(), Some("1"));
}
