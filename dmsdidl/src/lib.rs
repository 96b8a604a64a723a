//! # dmsdidl - DIDL-Lite
//!
//! Modèle de données et écriture du format DIDL-Lite utilisé dans UPnP/DLNA.
//!
//! - [`DIDLLite`], [`Container`], [`Item`], [`Resource`] : structures serde
//!   (sérialisation et parsing via `quick-xml`)
//! - [`DidlWriter`] : écriture en flux d'un fragment `<DIDL-Lite>` tel qu'il est
//!   embarqué dans l'argument `Result` d'une réponse Browse/Search

mod writer;

pub use writer::DidlWriter;

use serde::{Deserialize, Serialize};

/// Namespace racine DIDL-Lite
pub const NS_DIDL: &str = "urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/";
/// Namespace Dublin Core
pub const NS_DC: &str = "http://purl.org/dc/elements/1.1/";
/// Namespace des métadonnées DLNA
pub const NS_DLNA: &str = "urn:schemas-dlna-org:metadata-1-0/";
/// Namespace UPnP AV
pub const NS_UPNP: &str = "urn:schemas-upnp-org:metadata-1-0/upnp/";

/// Erreurs de sérialisation ou de parsing DIDL-Lite
#[derive(Debug, thiserror::Error)]
pub enum DidlError {
    #[error("Failed to write DIDL-Lite: {0}")]
    Write(String),

    #[error("Failed to serialize <{element}>: {message}")]
    Serialize { element: &'static str, message: String },

    #[error("Failed to parse DIDL-Lite: {0}")]
    Parse(String),

    #[error("DIDL-Lite output is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

// ============= Structures DIDL-Lite =============

/// Racine d'un document DIDL-Lite
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "DIDL-Lite")]
pub struct DIDLLite {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,

    #[serde(rename = "@xmlns:upnp", skip_serializing_if = "Option::is_none")]
    pub xmlns_upnp: Option<String>,

    #[serde(rename = "@xmlns:dc", skip_serializing_if = "Option::is_none")]
    pub xmlns_dc: Option<String>,

    #[serde(rename = "@xmlns:dlna", skip_serializing_if = "Option::is_none")]
    pub xmlns_dlna: Option<String>,

    #[serde(rename = "container", default)]
    pub containers: Vec<Container>,

    #[serde(rename = "item", default)]
    pub items: Vec<Item>,
}

/// Container pouvant contenir d'autres containers ou items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Container {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@parentID")]
    pub parent_id: String,

    #[serde(rename = "@restricted", skip_serializing_if = "Option::is_none")]
    pub restricted: Option<String>,

    #[serde(rename = "@searchable", skip_serializing_if = "Option::is_none")]
    pub searchable: Option<String>,

    #[serde(rename = "@childCount", skip_serializing_if = "Option::is_none")]
    pub child_count: Option<String>,

    #[serde(rename = "dc:title", alias = "title")]
    pub title: String,

    #[serde(
        rename = "upnp:artist",
        alias = "artist",
        skip_serializing_if = "Option::is_none"
    )]
    pub artist: Option<String>,

    #[serde(
        rename = "upnp:genre",
        alias = "genre",
        skip_serializing_if = "Option::is_none"
    )]
    pub genre: Option<String>,

    #[serde(
        rename = "dc:date",
        alias = "date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,

    #[serde(rename = "upnp:class", alias = "class")]
    pub class: String,

    #[serde(rename = "container", default, skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<Container>,

    #[serde(rename = "item", default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
}

/// Item représentant un objet média lisible
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@parentID")]
    pub parent_id: String,

    #[serde(rename = "@restricted", skip_serializing_if = "Option::is_none")]
    pub restricted: Option<String>,

    #[serde(rename = "dc:title", alias = "title")]
    pub title: String,

    #[serde(
        rename = "dc:creator",
        alias = "creator",
        skip_serializing_if = "Option::is_none"
    )]
    pub creator: Option<String>,

    #[serde(rename = "upnp:class", alias = "class")]
    pub class: String,

    #[serde(
        rename = "upnp:artist",
        alias = "artist",
        skip_serializing_if = "Option::is_none"
    )]
    pub artist: Option<String>,

    #[serde(
        rename = "upnp:album",
        alias = "album",
        skip_serializing_if = "Option::is_none"
    )]
    pub album: Option<String>,

    #[serde(
        rename = "upnp:genre",
        alias = "genre",
        skip_serializing_if = "Option::is_none"
    )]
    pub genre: Option<String>,

    #[serde(
        rename = "upnp:albumArtURI",
        alias = "albumArtURI",
        skip_serializing_if = "Option::is_none"
    )]
    pub album_art: Option<String>,

    #[serde(
        rename = "dc:date",
        alias = "date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,

    #[serde(
        rename = "upnp:originalTrackNumber",
        alias = "originalTrackNumber",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_track_number: Option<String>,

    #[serde(
        rename = "upnp:episodeNumber",
        alias = "episodeNumber",
        skip_serializing_if = "Option::is_none"
    )]
    pub episode_number: Option<String>,

    #[serde(rename = "res", default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
}

/// Ressource média (flux servi par le serveur)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "@protocolInfo")]
    pub protocol_info: String,

    #[serde(rename = "@duration", skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(rename = "@size", skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(rename = "@bitrate", skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<String>,

    #[serde(rename = "$text")]
    pub url: String,
}

impl DIDLLite {
    /// Parse un document ou fragment DIDL-Lite
    pub fn parse(input: &str) -> Result<Self, DidlError> {
        quick_xml::de::from_str(input).map_err(|e| DidlError::Parse(e.to_string()))
    }

    /// Nombre d'objets de premier niveau (containers + items)
    pub fn len(&self) -> usize {
        self.containers.len() + self.items.len()
    }

    /// Vrai si le document ne contient aucun objet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Trouve un container de premier niveau par ID
    pub fn get_container_by_id(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    /// Trouve un item de premier niveau par ID
    pub fn get_item_by_id(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }
}

impl Item {
    /// Retourne la ressource principale (première disponible)
    pub fn primary_resource(&self) -> Option<&Resource> {
        self.resources.first()
    }
}
