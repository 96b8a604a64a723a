//! Parser SOAP pour les actions de contrôle

use std::io::BufReader;

use xmltree::Element;

use crate::contentdirectory::ControlParams;

/// Action UPnP extraite d'une enveloppe SOAP
#[derive(Debug, Clone)]
pub struct SoapAction {
    /// Nom local de l'action (ex: "Browse")
    pub name: String,

    /// Namespace de l'action (URN du service)
    pub namespace: Option<String>,

    /// Arguments, dans l'ordre du document
    pub args: ControlParams,
}

/// Erreur de parsing SOAP
#[derive(Debug, thiserror::Error)]
pub enum SoapParseError {
    #[error("XML parse error: {0}")]
    XmlError(#[from] xmltree::ParseError),

    #[error("Missing SOAP Envelope")]
    MissingEnvelope,

    #[error("Missing SOAP Body")]
    MissingBody,

    #[error("No action found in SOAP Body")]
    NoAction,
}

/// Parse une action SOAP à partir de bytes XML
pub fn parse_soap_action(xml: &[u8]) -> Result<SoapAction, SoapParseError> {
    let root = Element::parse(BufReader::new(xml))?;
    if root.name != "Envelope" {
        return Err(SoapParseError::MissingEnvelope);
    }

    let body = root
        .children
        .iter()
        .filter_map(|n| n.as_element())
        .find(|e| e.name == "Body")
        .ok_or(SoapParseError::MissingBody)?;

    // <u:ActionName xmlns:u="service-urn">...</u:ActionName>
    let action = body
        .children
        .iter()
        .find_map(|n| n.as_element())
        .ok_or(SoapParseError::NoAction)?;

    let args = action
        .children
        .iter()
        .filter_map(|n| n.as_element())
        .map(|arg| {
            (
                arg.name.clone(),
                arg.get_text().unwrap_or_default().to_string(),
            )
        })
        .collect();

    Ok(SoapAction {
        name: action.name.clone(),
        namespace: action.namespace.clone(),
        args,
    })
}
