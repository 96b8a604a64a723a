use dmslibrary::{BaseItem, ItemKind};

use crate::contentdirectory::object_id::{self, ROOT_ID};
use crate::contentdirectory::stubs::StubType;

/// Élément présenté aux clients : un item réel, ou un container virtuel
/// accroché à un item réel.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerItem {
    Real(BaseItem),
    Stub { anchor: BaseItem, stub: StubType },
}

impl ServerItem {
    /// Emballe un item retourné par la bibliothèque.
    ///
    /// Les entités nommées qui ne sont pas des dossiers (genres, studios,
    /// personnes) sont marquées `Folder` pour être parcourues comme tels.
    pub fn new(item: BaseItem) -> Self {
        if item.kind.is_item_by_name() && !item.is_folder() {
            ServerItem::Stub {
                anchor: item,
                stub: StubType::Folder,
            }
        } else {
            ServerItem::Real(item)
        }
    }

    /// Reconstruit l'élément désigné par un identifiant décodé
    pub fn decoded(item: BaseItem, stub: Option<StubType>) -> Self {
        match stub {
            Some(stub) => ServerItem::Stub { anchor: item, stub },
            None => ServerItem::new(item),
        }
    }

    /// L'item réel (l'ancre pour un stub)
    pub fn item(&self) -> &BaseItem {
        match self {
            ServerItem::Real(item) => item,
            ServerItem::Stub { anchor, .. } => anchor,
        }
    }

    pub fn stub(&self) -> Option<StubType> {
        match self {
            ServerItem::Real(_) => None,
            ServerItem::Stub { stub, .. } => Some(*stub),
        }
    }

    pub fn is_displayed_as_folder(&self) -> bool {
        self.stub().is_some() || self.item().is_displayed_as_folder()
    }

    /// Identifiant DIDL de l'élément
    pub fn object_id(&self) -> String {
        match self {
            ServerItem::Real(item) if item.kind == ItemKind::UserRootFolder => ROOT_ID.to_string(),
            ServerItem::Real(item) => object_id::encode(item.id, None),
            ServerItem::Stub { anchor, stub } => object_id::encode(anchor.id, Some(*stub)),
        }
    }
}
