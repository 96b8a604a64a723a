/// Particularités d'un client DLNA prises en compte dans les réponses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    pub name: String,
    /// Attributs ajoutés à la racine `<DIDL-Lite>`, après les namespaces fixes
    pub xml_root_attributes: Vec<(String, String)>,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            name: "Generic Device".to_string(),
            xml_root_attributes: Vec::new(),
        }
    }
}

impl DeviceProfile {
    /// Téléviseurs Samsung : namespace `sec` requis sur la racine
    pub fn samsung() -> Self {
        Self {
            name: "Samsung Smart TV".to_string(),
            xml_root_attributes: vec![(
                "xmlns:sec".to_string(),
                "http://www.sec.co.kr/".to_string(),
            )],
        }
    }
}
