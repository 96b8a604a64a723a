//! # Module SOAP - pont entre les requêtes de contrôle et le ContentHandler
//!
//! - ✅ Parsing d'enveloppes SOAP (action + arguments, ordre conservé)
//! - ✅ Construction de réponses `u:{Action}Response`
//! - ✅ SOAP Faults avec détail `UPnPError`
//!
//! ```
//! use dmsmediaserver::soap::parse_soap_action;
//!
//! let body = r#"<?xml version="1.0"?>
//! <s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
//!   <s:Body>
//!     <u:Browse xmlns:u="urn:schemas-upnp-org:service:ContentDirectory:1">
//!       <ObjectID>0</ObjectID>
//!       <BrowseFlag>BrowseMetadata</BrowseFlag>
//!     </u:Browse>
//!   </s:Body>
//! </s:Envelope>"#;
//!
//! let action = parse_soap_action(body.as_bytes()).unwrap();
//! assert_eq!(action.name, "Browse");
//! assert_eq!(action.args.get("ObjectID"), Some("0"));
//! ```

mod builder;
mod fault;
mod parser;

pub use builder::build_soap_response;
pub use fault::{SoapFault, UpnpError, build_soap_fault};
pub use parser::{SoapAction, SoapParseError, parse_soap_action};

/// Namespace des enveloppes SOAP
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Style d'encodage déclaré sur les enveloppes
pub const SOAP_ENCODING_STYLE: &str = "http://schemas.xmlsoap.org/soap/encoding/";
