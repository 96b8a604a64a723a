//! Traitement d'une requête de contrôle SOAP complète.

use tracing::{debug, warn};

use crate::content_handler::ContentHandler;
use crate::contentdirectory::SERVICE_URN;
use crate::contentdirectory::errors::error_codes;
use crate::soap::{SoapFault, build_soap_response, parse_soap_action};

/// Réponse à renvoyer par la couche HTTP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlResponse {
    /// En-têtes HTTP additionnels
    pub headers: Vec<(String, String)>,
    pub xml: String,
    pub is_successful: bool,
}

impl ControlResponse {
    fn new(xml: String, is_successful: bool) -> Self {
        Self {
            headers: vec![("EXT".to_string(), String::new())],
            xml,
            is_successful,
        }
    }

    fn fault(code: u16, description: &str) -> Self {
        match SoapFault::client(code, description).to_xml() {
            Ok(xml) => Self::new(xml, false),
            Err(e) => {
                warn!("❌ Failed to build SOAP fault: {}", e);
                Self::new(String::new(), false)
            }
        }
    }
}

/// Décode l'enveloppe, exécute l'action et produit la réponse ou le fault
pub async fn process_control_request(handler: &ContentHandler, body: &[u8]) -> ControlResponse {
    let action = match parse_soap_action(body) {
        Ok(action) => action,
        Err(e) => {
            warn!("❌ Invalid SOAP request: {}", e);
            return ControlResponse::fault(error_codes::INVALID_ACTION, "Invalid Action");
        }
    };
    debug!("📨 Control request {} ({:?})", action.name, action.namespace);

    match handler.dispatch(&action.name, &action.args).await {
        Ok(headers) => match build_soap_response(SERVICE_URN, &action.name, headers) {
            Ok(xml) => ControlResponse::new(xml, true),
            Err(e) => {
                warn!("❌ Failed to build SOAP response: {}", e);
                ControlResponse::fault(error_codes::ACTION_FAILED, "Action Failed")
            }
        },
        Err(e) => ControlResponse::fault(e.upnp_error_code(), e.upnp_error_description()),
    }
}
