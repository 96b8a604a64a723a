//! # ContentDirectory Service - Moteur de contrôle et de requête
//!
//! Ce module implémente la partie "contrôle" du service ContentDirectory:1 :
//! il reçoit une action UPnP (nom + arguments) et produit la liste ordonnée
//! des arguments de sortie.
//!
//! ## Architecture
//!
//! ```text
//! Action UPnP (nom, arguments)
//!       ↓
//! ContentHandler - table des actions
//!       ↓
//! criteria / object_id - décodage des paramètres et des identifiants
//!       ↓
//! CategoryResolver - choix de la stratégie (table de règles, première qui s'applique)
//!       ↓
//! strategies - requêtes déléguées à la bibliothèque
//!       ↓
//! DidlResponseAssembler - fragment DIDL-Lite + NumberReturned/TotalMatches/UpdateID
//! ```
//!
//! ## Actions
//!
//! - ✅ Browse, Search, X_BrowseByLetter (alias de Search)
//! - ✅ GetSearchCapabilities, GetSortCapabilities, GetSortExtensionCapabilities
//! - ✅ GetSystemUpdateID
//! - ✅ X_GetFeatureList, GetFeatureList
//! - ✅ X_SetBookmark
//!
//! ## Identifiants d'objets
//!
//! Les containers virtuels ("stubs" : Latest, Favorites, NextUp...) n'existent
//! pas dans la bibliothèque. Ils sont identifiés par `"<Stub>_<anchor>"`, où
//! l'ancre est l'item réel sous lequel ils sont rattachés (voir [`object_id`]).

pub mod actions;
pub mod criteria;
pub mod didl_builder;
pub mod errors;
pub mod object_id;
pub mod paging;
pub mod resolver;
pub mod response;
pub mod server_item;
pub mod state;
pub mod strategies;
pub mod stubs;

pub use actions::{ActionSpec, ControlAction, ControlParams};
pub use criteria::{BrowseFlag, Filter, SearchCriteria, SearchType, SortCriteria};
pub use didl_builder::{BasicDidlBuilder, DidlElementWriter};
pub use errors::ContentDirectoryError;
pub use object_id::DecodedId;
pub use paging::ResultPaginator;
pub use resolver::{CategoryResolver, LibraryServices, Route};
pub use response::{BrowseResponse, DidlResponseAssembler, Headers};
pub use server_item::ServerItem;
pub use strategies::Strategy;
pub use stubs::{Category, StubType};

/// URN du service
pub const SERVICE_URN: &str = "urn:schemas-upnp-org:service:ContentDirectory:1";

/// Valeur de `SearchCaps`
pub const SEARCH_CAPABILITIES: &str = "res@resolution,res@size,res@duration,dc:title,dc:creator,upnp:actor,upnp:artist,upnp:genre,upnp:album,dc:date,upnp:class,@id,@refID,@protocolInfo,upnp:author,dc:description,pv:avKeywords";

/// Valeur de `SortCaps` et de `SortExtensionCaps`
pub const SORT_CAPABILITIES: &str = "res@duration,res@size,res@bitrate,dc:date,dc:title,dc:size,upnp:album,upnp:artist,upnp:albumArtist,upnp:episodeNumber,upnp:genre,upnp:originalTrackNumber,upnp:rating";

/// Document retourné par `X_GetFeatureList` / `GetFeatureList` (vue basique Samsung)
pub const FEATURE_LIST: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    r#"<Features xmlns="urn:schemas-upnp-org:av:avs" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="urn:schemas-upnp-org:av:avs http://www.upnp.org/schemas/av/avs.xsd">"#,
    r#"<Feature name="samsung.com_BASICVIEW" version="1">"#,
    r#"<container id="I" type="object.item.imageItem"/>"#,
    r#"<container id="A" type="object.item.audioItem"/>"#,
    r#"<container id="V" type="object.item.videoItem"/>"#,
    r#"</Feature>"#,
    r#"</Features>"#,
);
