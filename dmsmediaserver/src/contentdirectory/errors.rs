use dmsdidl::DidlError;
use dmslibrary::LibraryError;
use thiserror::Error;

/// Codes d'erreur de contrôle UPnP
pub mod error_codes {
    /// Action invalide
    pub const INVALID_ACTION: u16 = 401;

    /// Arguments invalides
    pub const INVALID_ARGS: u16 = 402;

    /// Action échouée
    pub const ACTION_FAILED: u16 = 501;
}

#[derive(Error, Debug)]
pub enum ContentDirectoryError {
    #[error("Unexpected control request name: {0}")]
    UnsupportedAction(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidArgument { name: &'static str, value: String },

    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    #[error("DIDL-Lite error: {0}")]
    Didl(#[from] DidlError),
}

impl ContentDirectoryError {
    /// Code d'erreur UPnP reporté dans le `<UPnPError>` du fault
    pub fn upnp_error_code(&self) -> u16 {
        match self {
            ContentDirectoryError::UnsupportedAction(_) => error_codes::INVALID_ACTION,
            ContentDirectoryError::MissingArgument(_)
            | ContentDirectoryError::InvalidArgument { .. } => error_codes::INVALID_ARGS,
            _ => error_codes::ACTION_FAILED,
        }
    }

    /// Description normalisée associée au code UPnP
    pub fn upnp_error_description(&self) -> &'static str {
        match self.upnp_error_code() {
            error_codes::INVALID_ACTION => "Invalid Action",
            error_codes::INVALID_ARGS => "Invalid Args",
            _ => "Action Failed",
        }
    }

    /// L'action demandée n'existe pas (équivalent "ressource introuvable")
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentDirectoryError::UnsupportedAction(_))
    }
}
