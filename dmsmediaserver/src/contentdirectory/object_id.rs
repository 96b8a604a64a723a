//! Codec des identifiants d'objets DLNA.
//!
//! Formes acceptées :
//!
//! - racine : chaîne vide, `"0"` ou `"1"`
//! - item : identifiant de la bibliothèque (`ItemId`)
//! - stub : `"<Stub>_<ItemId>"`
//! - bloc `Params=` (MediaMonkey après un PlayTo) : champs séparés par `;`,
//!   l'identifiant effectif est le 24e champ

use dmslibrary::ItemId;

use crate::contentdirectory::stubs::StubType;

/// Identifiant de la racine émis dans les réponses
pub const ROOT_ID: &str = "0";

const PARAMS_MARKER: &str = "params=";
const PARAMS_ID_FIELD: usize = 23;

/// Résultat du décodage d'un identifiant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedId {
    Root,
    Item { id: ItemId, stub: Option<StubType> },
    /// Identifiant inexploitable ; l'appelant se rabat sur la racine
    Malformed(String),
}

/// Vrai si l'identifiant désigne la racine
pub fn is_root_id(id: &str) -> bool {
    let id = id.trim();
    id.is_empty() || id == "0" || id == "1"
}

pub fn decode(raw: &str) -> DecodedId {
    if is_root_id(raw) {
        return DecodedId::Root;
    }

    let mut id = raw;
    if let Some(pos) = raw.to_ascii_lowercase().find(PARAMS_MARKER) {
        match raw[pos + PARAMS_MARKER.len()..].split(';').nth(PARAMS_ID_FIELD) {
            Some(field) => id = field,
            None => return DecodedId::Malformed(raw.to_string()),
        }
    }

    let (stub, rest) = match StubType::strip_prefix(id) {
        Some((stub, rest)) => (Some(stub), rest),
        None => (None, id),
    };

    match rest.parse::<ItemId>() {
        Ok(id) => DecodedId::Item { id, stub },
        Err(_) => DecodedId::Malformed(rest.to_string()),
    }
}

/// Identifiant d'un item, éventuellement préfixé par un stub
pub fn encode(id: ItemId, stub: Option<StubType>) -> String {
    match stub {
        Some(stub) => format!("{}_{}", stub.name(), id),
        None => id.to_string(),
    }
}
