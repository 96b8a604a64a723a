//! Tests d'intégration de Search et X_BrowseByLetter.

mod common;

use common::*;
use dmsmediaserver::{ContentDirectoryError, ControlParams};

fn search_params(container: &str, criteria: &str, start: &str, count: &str) -> ControlParams {
    params(&[
        ("ContainerID", container),
        ("SearchCriteria", criteria),
        ("Filter", "*"),
        ("StartingIndex", start),
        ("RequestedCount", count),
        ("SortCriteria", "+dc:title"),
    ])
}

#[tokio::test]
async fn test_audio_search_is_paged() {
    let f = fixture();
    let headers = f
        .handler
        .dispatch(
            "Search",
            &search_params(
                &f.music.id.to_string(),
                r#"upnp:class derivedfrom "object.item.audioItem""#,
                "0",
                "5",
            ),
        )
        .await
        .unwrap();

    assert_eq!(count(&headers, "NumberReturned"), 5);
    assert_eq!(count(&headers, "TotalMatches"), 12);

    let didl = didl(&headers);
    assert!(didl.containers.is_empty());
    assert_eq!(didl.items.len(), 5);
    assert!(
        didl.items
            .iter()
            .all(|i| i.class == "object.item.audioItem.musicTrack")
    );
    assert_eq!(didl.items[0].title, "Track 01");
}

#[tokio::test]
async fn test_video_search_from_root() {
    let f = fixture();
    let headers = f
        .handler
        .dispatch(
            "Search",
            &search_params(
                "0",
                r#"(upnp:class = "object.item.videoItem") and (dc:title contains "x")"#,
                "0",
                "0",
            ),
        )
        .await
        .unwrap();

    assert_eq!(count(&headers, "TotalMatches"), 8);
    let didl = didl(&headers);
    assert_eq!(didl.items.len(), 8);
    assert!(
        didl.items
            .iter()
            .all(|i| i.class.starts_with("object.item.videoItem"))
    );
    assert!(didl.items.iter().all(|i| i.parent_id == "0"));
}

#[tokio::test]
async fn test_album_search_returns_containers() {
    let f = fixture();
    let headers = f
        .handler
        .dispatch(
            "Search",
            &search_params(
                &f.music.id.to_string(),
                r#"upnp:class = "object.container.album.musicAlbum""#,
                "0",
                "0",
            ),
        )
        .await
        .unwrap();

    let didl = didl(&headers);
    assert!(didl.items.is_empty());
    assert_eq!(didl.containers.len(), 1);
    assert_eq!(didl.containers[0].title, "Kind of Blue");
    // Les enfants comptés sont ceux de la même recherche : aucun sous-dossier
    assert_eq!(didl.containers[0].child_count.as_deref(), Some("0"));
}

#[tokio::test]
async fn test_container_class_search_matches_any_folder() {
    let f = fixture();
    let headers = f
        .handler
        .dispatch(
            "Search",
            &search_params(
                &f.tv.id.to_string(),
                r#"upnp:class = "object.container.playlistContainer""#,
                "0",
                "0",
            ),
        )
        .await
        .unwrap();

    let didl = didl(&headers);
    assert!(didl.items.is_empty());
    let titles: Vec<&str> = didl.containers.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["Season 1", "The Wire"]);
}

#[tokio::test]
async fn test_search_child_counts_are_recursive() {
    let f = fixture();
    let headers = f
        .handler
        .dispatch("Search", &search_params("0", "*", "0", "0"))
        .await
        .unwrap();

    let didl = didl(&headers);
    let child_count = |title: &str| {
        didl.containers
            .iter()
            .find(|c| c.title == title)
            .and_then(|c| c.child_count.clone())
            .unwrap()
    };
    assert_eq!(child_count("Music"), "13");
    assert_eq!(child_count("Kind of Blue"), "12");
    assert_eq!(child_count("Shelf"), "1");
}

#[tokio::test]
async fn test_untyped_search_hides_games_and_books() {
    let f = fixture();
    let headers = f
        .handler
        .dispatch(
            "Search",
            &search_params(&f.shelf.id.to_string(), "*", "0", "0"),
        )
        .await
        .unwrap();

    assert_eq!(count(&headers, "TotalMatches"), 1);
    assert_eq!(didl(&headers).items[0].title, f.home_video.name);
}

#[tokio::test]
async fn test_browse_by_letter_behaves_like_search() {
    let f = fixture();
    let criteria = r#"upnp:class derivedfrom "object.item.audioItem""#;
    let container = f.album.id.to_string();

    let search = f
        .handler
        .dispatch("Search", &search_params(&container, criteria, "2", "4"))
        .await
        .unwrap();
    let by_letter = f
        .handler
        .dispatch(
            "X_BrowseByLetter",
            &search_params(&container, criteria, "2", "4"),
        )
        .await
        .unwrap();

    assert_eq!(header(&search, "Result"), header(&by_letter, "Result"));
    assert_eq!(count(&by_letter, "NumberReturned"), 4);
    assert_eq!(count(&by_letter, "TotalMatches"), 12);
}

#[tokio::test]
async fn test_search_without_container_is_invalid_args() {
    let f = fixture();
    let err = f
        .handler
        .dispatch("Search", &params(&[("SearchCriteria", "*")]))
        .await
        .unwrap_err();

    assert!(matches!(err, ContentDirectoryError::MissingArgument("ContainerID")));
    assert_eq!(err.upnp_error_code(), 402);
}

#[tokio::test]
async fn test_search_in_unknown_container_uses_root() {
    let f = fixture();
    let headers = f
        .handler
        .dispatch(
            "Search",
            &search_params(
                "Albums_garbage",
                r#"upnp:class derivedfrom "object.item.audioItem""#,
                "0",
                "0",
            ),
        )
        .await
        .unwrap();
    assert_eq!(count(&headers, "TotalMatches"), 12);
}
