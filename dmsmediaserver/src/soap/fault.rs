//! SOAP Faults pour UPnP

use xmltree::{Element, XMLNode};

use super::builder::write_envelope;

/// Namespace du détail `UPnPError`
const UPNP_CONTROL_NS: &str = "urn:schemas-upnp-org:control-1-0";

/// Erreur SOAP (Fault)
#[derive(Debug, Clone)]
pub struct SoapFault {
    /// Code d'erreur (ex: "s:Client")
    pub fault_code: String,

    pub fault_string: String,

    /// Détails UPnP optionnels
    pub upnp_error: Option<UpnpError>,
}

/// Erreur UPnP spécifique
#[derive(Debug, Clone)]
pub struct UpnpError {
    /// Code d'erreur UPnP (ex: 401, 501)
    pub error_code: u16,

    pub error_description: String,
}

impl SoapFault {
    /// Fault client avec détail UPnP
    pub fn client(error_code: u16, error_description: impl Into<String>) -> Self {
        Self {
            fault_code: "s:Client".to_string(),
            fault_string: "UPnPError".to_string(),
            upnp_error: Some(UpnpError {
                error_code,
                error_description: error_description.into(),
            }),
        }
    }

    pub fn to_xml(&self) -> Result<String, xmltree::Error> {
        build_soap_fault(
            &self.fault_code,
            &self.fault_string,
            self.upnp_error.as_ref(),
        )
    }
}

fn text_element(name: &str, text: String) -> Element {
    let mut element = Element::new(name);
    element.children.push(XMLNode::Text(text));
    element
}

/// Construit un SOAP Fault XML
pub fn build_soap_fault(
    fault_code: &str,
    fault_string: &str,
    upnp_error: Option<&UpnpError>,
) -> Result<String, xmltree::Error> {
    let mut fault = Element::new("s:Fault");
    fault
        .children
        .push(XMLNode::Element(text_element("faultcode", fault_code.to_string())));
    fault.children.push(XMLNode::Element(text_element(
        "faultstring",
        fault_string.to_string(),
    )));

    if let Some(error) = upnp_error {
        let mut upnp = Element::new("UPnPError");
        upnp.attributes
            .insert("xmlns".to_string(), UPNP_CONTROL_NS.to_string());
        upnp.children.push(XMLNode::Element(text_element(
            "errorCode",
            error.error_code.to_string(),
        )));
        upnp.children.push(XMLNode::Element(text_element(
            "errorDescription",
            error.error_description.clone(),
        )));

        let mut detail = Element::new("detail");
        detail.children.push(XMLNode::Element(upnp));
        fault.children.push(XMLNode::Element(detail));
    }

    write_envelope(fault)
}
