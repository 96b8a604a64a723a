use dmsdidl::{Container, DIDLLite, DidlWriter, Item, Resource};

fn main() {
    let mut writer = DidlWriter::new(&[]).expect("Failed to open DIDL-Lite root");

    writer
        .write_container(&Container {
            id: "Latest_0f8fad5bd9cb469fa16570867728950e".to_string(),
            parent_id: "0".to_string(),
            restricted: Some("1".to_string()),
            child_count: Some("12".to_string()),
            title: "Latest".to_string(),
            class: "object.container.storageFolder".to_string(),
            ..Default::default()
        })
        .expect("Failed to write container");

    writer
        .write_item(&Item {
            id: "7c9e6679742540de944be07fc1f90ae7".to_string(),
            parent_id: "0f8fad5bd9cb469fa16570867728950e".to_string(),
            restricted: Some("1".to_string()),
            title: "Test Song".to_string(),
            class: "object.item.audioItem.musicTrack".to_string(),
            artist: Some("Test Artist".to_string()),
            resources: vec![Resource {
                protocol_info: "http-get:*:audio/flac:*".to_string(),
                duration: Some("0:03:00.000".to_string()),
                url: "http://localhost:8096/Audio/7c9e6679742540de944be07fc1f90ae7/stream"
                    .to_string(),
                ..Default::default()
            }],
            ..Default::default()
        })
        .expect("Failed to write item");

    let xml = writer.finish().expect("Failed to close DIDL-Lite root");
    println!("{}", xml);

    let parsed = DIDLLite::parse(&xml).expect("Failed to parse back");
    println!(
        "containers: {}, items: {}",
        parsed.containers.len(),
        parsed.items.len()
    );
}
