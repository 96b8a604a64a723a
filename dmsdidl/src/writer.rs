//! Écriture en flux d'un fragment DIDL-Lite.
//!
//! Le fragment n'a pas de prologue XML : il est embarqué tel quel dans
//! l'enveloppe SOAP par la couche de transport.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use crate::{Container, DidlError, Item, NS_DC, NS_DIDL, NS_DLNA, NS_UPNP};

const ROOT: &str = "DIDL-Lite";

/// Writer streaming pour un fragment `<DIDL-Lite>`.
///
/// ```
/// use dmsdidl::{Container, DidlWriter};
///
/// let mut writer = DidlWriter::new(&[]).unwrap();
/// writer
///     .write_container(&Container {
///         id: "0".to_string(),
///         parent_id: "-1".to_string(),
///         title: "Root".to_string(),
///         class: "object.container".to_string(),
///         ..Default::default()
///     })
///     .unwrap();
/// let xml = writer.finish().unwrap();
/// assert!(xml.starts_with("<DIDL-Lite"));
/// assert!(xml.ends_with("</DIDL-Lite>"));
/// ```
pub struct DidlWriter {
    writer: Writer<Vec<u8>>,
    elements: usize,
}

impl DidlWriter {
    /// Ouvre l'élément racine avec les trois namespaces fixes, suivis des
    /// attributs supplémentaires (ceux qu'exige le profil du client).
    pub fn new(root_attributes: &[(String, String)]) -> Result<Self, DidlError> {
        let mut root = BytesStart::new(ROOT);
        root.push_attribute(("xmlns", NS_DIDL));
        root.push_attribute(("xmlns:dc", NS_DC));
        root.push_attribute(("xmlns:dlna", NS_DLNA));
        root.push_attribute(("xmlns:upnp", NS_UPNP));
        for (name, value) in root_attributes {
            root.push_attribute((name.as_str(), value.as_str()));
        }

        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Start(root))
            .map_err(|e| DidlError::Write(e.to_string()))?;

        Ok(Self {
            writer,
            elements: 0,
        })
    }

    /// Écrit un élément `<container>`
    pub fn write_container(&mut self, container: &Container) -> Result<(), DidlError> {
        self.writer
            .write_serializable("container", container)
            .map_err(|e| DidlError::Serialize {
                element: "container",
                message: e.to_string(),
            })?;
        self.elements += 1;
        Ok(())
    }

    /// Écrit un élément `<item>`
    pub fn write_item(&mut self, item: &Item) -> Result<(), DidlError> {
        self.writer
            .write_serializable("item", item)
            .map_err(|e| DidlError::Serialize {
                element: "item",
                message: e.to_string(),
            })?;
        self.elements += 1;
        Ok(())
    }

    /// Nombre d'éléments écrits sous la racine
    pub fn element_count(&self) -> usize {
        self.elements
    }

    /// Ferme la racine (toujours par une balise de fin complète) et retourne le XML
    pub fn finish(mut self) -> Result<String, DidlError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(ROOT)))
            .map_err(|e| DidlError::Write(e.to_string()))?;
        Ok(String::from_utf8(self.writer.into_inner())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DIDLLite, Resource};

    #[test]
    fn test_empty_fragment_has_full_end_tag_and_no_prolog() {
        let xml = DidlWriter::new(&[]).unwrap().finish().unwrap();
        assert!(!xml.starts_with("<?xml"));
        assert!(xml.ends_with("></DIDL-Lite>"));
        assert!(xml.contains(r#"xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/""#));
        assert!(xml.contains(r#"xmlns:dc="http://purl.org/dc/elements/1.1/""#));
        assert!(xml.contains(r#"xmlns:dlna="urn:schemas-dlna-org:metadata-1-0/""#));
        assert!(xml.contains(r#"xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/""#));
    }

    #[test]
    fn test_root_attributes_follow_namespaces() {
        let attrs = vec![(
            "xmlns:sec".to_string(),
            "http://www.sec.co.kr/".to_string(),
        )];
        let xml = DidlWriter::new(&attrs).unwrap().finish().unwrap();
        let upnp = xml.find("xmlns:upnp").unwrap();
        let sec = xml.find("xmlns:sec").unwrap();
        assert!(upnp < sec);
    }

    #[test]
    fn test_written_elements_parse_back() {
        let mut writer = DidlWriter::new(&[]).unwrap();
        writer
            .write_container(&Container {
                id: "Latest_abc".to_string(),
                parent_id: "0".to_string(),
                restricted: Some("1".to_string()),
                child_count: Some("4".to_string()),
                title: "Latest".to_string(),
                class: "object.container.storageFolder".to_string(),
                ..Default::default()
            })
            .unwrap();
        writer
            .write_item(&Item {
                id: "def".to_string(),
                parent_id: "abc".to_string(),
                restricted: Some("1".to_string()),
                title: "Rock & Roll".to_string(),
                class: "object.item.audioItem.musicTrack".to_string(),
                resources: vec![Resource {
                    protocol_info: "http-get:*:audio/flac:*".to_string(),
                    url: "http://host/Audio/def/stream".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            })
            .unwrap();
        assert_eq!(writer.element_count(), 2);

        let xml = writer.finish().unwrap();
        assert!(xml.contains("Rock &amp; Roll"));

        let didl = DIDLLite::parse(&xml).unwrap();
        assert_eq!(didl.containers.len(), 1);
        assert_eq!(didl.items.len(), 1);
        assert_eq!(didl.items[0].title, "Rock & Roll");
        assert_eq!(didl.containers[0].child_count.as_deref(), Some("4"));
    }
}
