//! # ContentDirectory Handler - Point d'entrée des actions de contrôle
//!
//! [`ContentHandler`] reçoit le nom d'une action UPnP et ses arguments, et
//! retourne la liste ordonnée des arguments de sortie.
//!
//! ## Fonctionnalités
//!
//! - **Table des actions** : nom comparé sans tenir compte de la casse
//! - **Browse / Search** : résolution des containers et assemblage DIDL-Lite
//! - **Bookmarks** : enregistrement de la position de lecture
//! - **Update ID** : un instantané par requête
//!
//! ## Exemple
//!
//! ```
//! use std::sync::Arc;
//! use dmslibrary::MemoryLibrary;
//! use dmsmediaserver::{ContentHandler, ControlParams, DlnaOptions, LibraryServices};
//!
//! # tokio_test::block_on(async {
//! let library = Arc::new(MemoryLibrary::new());
//! let handler = ContentHandler::new(LibraryServices::from_shared(library), DlnaOptions::default());
//!
//! let params: ControlParams = [("ObjectID", "0"), ("BrowseFlag", "BrowseMetadata")]
//!     .into_iter()
//!     .collect();
//! let headers = handler.dispatch("Browse", &params).await.unwrap();
//! assert_eq!(headers[1], ("NumberReturned".to_string(), "1".to_string()));
//! # });
//! ```

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::contentdirectory::actions::{
    self, ActionSpec, ControlAction, ControlParams,
};
use crate::contentdirectory::didl_builder::{BasicDidlBuilder, DidlElementWriter};
use crate::contentdirectory::errors::ContentDirectoryError;
use crate::contentdirectory::object_id::{self, DecodedId};
use crate::contentdirectory::resolver::{CategoryResolver, LibraryServices};
use crate::contentdirectory::response::{DidlResponseAssembler, Headers};
use crate::contentdirectory::server_item::ServerItem;
use crate::options::DlnaOptions;
use crate::profile::DeviceProfile;

/// Gestionnaire des actions du service ContentDirectory.
///
/// Sans état propre entre deux requêtes : une même instance peut servir
/// des requêtes concurrentes.
#[derive(Debug, Clone)]
pub struct ContentHandler {
    services: LibraryServices,
    options: DlnaOptions,
    profile: DeviceProfile,
    elements: Arc<dyn DidlElementWriter>,
}

impl ContentHandler {
    /// Crée un handler avec le profil générique et le builder DIDL par défaut
    pub fn new(services: LibraryServices, options: DlnaOptions) -> Self {
        let elements = Arc::new(BasicDidlBuilder::new(
            options.base_url.clone(),
            options.server_name.clone(),
        ));
        Self {
            services,
            options,
            profile: DeviceProfile::default(),
            elements,
        }
    }

    pub fn with_profile(mut self, profile: DeviceProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_element_writer(mut self, elements: Arc<dyn DidlElementWriter>) -> Self {
        self.elements = elements;
        self
    }

    pub fn services(&self) -> &LibraryServices {
        &self.services
    }

    pub fn options(&self) -> &DlnaOptions {
        &self.options
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub(crate) fn resolver(&self) -> CategoryResolver<'_> {
        CategoryResolver::new(&self.services, &self.options, self.options.user_id)
    }

    pub(crate) fn assembler(&self) -> DidlResponseAssembler<'_> {
        DidlResponseAssembler::new(self.resolver(), self.elements.as_ref(), &self.profile)
    }

    /// Exécute une action et retourne ses arguments de sortie, dans l'ordre.
    ///
    /// # Errors
    ///
    /// - [`ContentDirectoryError::UnsupportedAction`] pour un nom inconnu
    /// - [`ContentDirectoryError::MissingArgument`] si un argument obligatoire manque
    /// - toute erreur remontée par la bibliothèque
    pub async fn dispatch(
        &self,
        action: &str,
        params: &ControlParams,
    ) -> Result<Headers, ContentDirectoryError> {
        let Some(spec) = ActionSpec::find(action) else {
            warn!("❌ Unsupported ContentDirectory action: {}", action);
            return Err(ContentDirectoryError::UnsupportedAction(action.to_string()));
        };
        debug!("📨 ContentDirectory action {} ({} args)", spec.name, params.len());
        spec.check_required(params)?;

        let result = match spec.action {
            ControlAction::GetSearchCapabilities => Ok(actions::getsearchcapabilities::execute()),
            ControlAction::GetSortCapabilities => Ok(actions::getsortcapabilities::execute()),
            ControlAction::GetSortExtensionCapabilities => {
                Ok(actions::getsortextensioncapabilities::execute())
            }
            ControlAction::GetSystemUpdateId => Ok(actions::getsystemupdateid::execute()),
            ControlAction::GetFeatureList => Ok(actions::getfeaturelist::execute()),
            ControlAction::Browse => actions::browse::execute(self, params).await,
            ControlAction::Search | ControlAction::BrowseByLetter => {
                actions::search::execute(self, params).await
            }
            ControlAction::SetBookmark => actions::xsetbookmark::execute(self, params).await,
        };

        if let Err(e) = &result {
            error!("❌ {} failed: {}", spec.name, e);
        }
        result
    }

    /// Retrouve le nœud désigné par un identifiant client.
    ///
    /// Un identifiant illisible, ou qui désigne un item disparu, est remplacé
    /// par la racine de l'utilisateur.
    pub async fn resolve_object_id(&self, raw: &str) -> Result<ServerItem, ContentDirectoryError> {
        let library = &self.services.library;
        match object_id::decode(raw) {
            DecodedId::Root => {}
            DecodedId::Item { id, stub } => match library.get_item_by_id(id).await? {
                Some(item) => return Ok(ServerItem::decoded(item, stub)),
                None => warn!("⚠️ Unknown item {} in object id {:?}, using root", id, raw),
            },
            DecodedId::Malformed(part) => {
                warn!("⚠️ Malformed object id {:?} ({:?}), using root", raw, part)
            }
        }

        let root = library.get_user_root_folder(self.options.user_id).await?;
        Ok(ServerItem::Real(root))
    }
}
