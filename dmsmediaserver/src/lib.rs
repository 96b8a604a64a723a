//! Moteur ContentDirectory d'un MediaServer DLNA.
//!
//! Ce crate implémente la partie contrôle/requête du service
//! ContentDirectory:1 : il reçoit une action UPnP (Browse, Search,
//! X_SetBookmark...) et répond avec les arguments de sortie, dont le
//! fragment DIDL-Lite décrivant les containers et items demandés.
//!
//! # Architecture
//!
//! - [`ContentHandler`] : table des actions et résolution des identifiants
//! - [`contentdirectory`] : critères, stubs, stratégies, assemblage DIDL-Lite
//! - [`soap`] / [`control`] : décodage des enveloppes SOAP et réponses/faults
//! - [`logs`] : initialisation de `tracing` à partir de la configuration
//!
//! La bibliothèque elle-même (items, données utilisateur, derniers ajouts,
//! épisodes suivants) est fournie par les collaborateurs de `dmslibrary`.
//!
//! # Utilisation de base
//!
//! ```no_run
//! use std::sync::Arc;
//! use dmslibrary::MemoryLibrary;
//! use dmsmediaserver::{ContentHandler, DlnaOptions, LibraryServices, process_control_request};
//!
//! # async fn run(body: &[u8]) -> anyhow::Result<()> {
//! let config = dmsconfig::get_config();
//! let _logs = dmsmediaserver::logs::init_logging(&config)?;
//!
//! let library = Arc::new(MemoryLibrary::new());
//! let handler = ContentHandler::new(
//!     LibraryServices::from_shared(library),
//!     DlnaOptions::from_config(&config)?,
//! );
//!
//! let response = process_control_request(&handler, body).await;
//! println!("{}", response.xml);
//! # Ok(())
//! # }
//! ```

pub mod content_handler;
pub mod contentdirectory;
pub mod control;
pub mod logs;
pub mod options;
pub mod profile;
pub mod soap;

pub use content_handler::ContentHandler;
pub use contentdirectory::{
    ContentDirectoryError, ControlParams, DidlElementWriter, Headers, LibraryServices,
};
pub use control::{ControlResponse, process_control_request};
pub use options::DlnaOptions;
pub use profile::DeviceProfile;
