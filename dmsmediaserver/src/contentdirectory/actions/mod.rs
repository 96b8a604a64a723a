//! Actions du service ContentDirectory.
//!
//! Chaque action est décrite par un [`ActionSpec`] statique (nom UPnP,
//! arguments d'entrée et de sortie) déclaré avec `define_action!` dans son
//! propre fichier, à côté de la fonction qui l'exécute.

use std::collections::HashMap;

use crate::contentdirectory::errors::ContentDirectoryError;

/// Déclare la description statique d'une action.
///
/// ```ignore
/// define_action! {
///     pub static BROWSE = "Browse" as Browse {
///         in "ObjectID",
///         opt "Filter",
///         out "Result",
///     }
/// }
/// ```
///
/// `in` : argument obligatoire, `opt` : argument facultatif, `out` : sortie.
macro_rules! define_action {
    (pub static $name:ident = $action_name:literal as $action:ident {
        $(
            $direction:ident $arg_name:literal
        ),* $(,)?
    }) => {
        pub static $name: $crate::contentdirectory::actions::ActionSpec =
            $crate::contentdirectory::actions::ActionSpec {
                name: $action_name,
                action: $crate::contentdirectory::actions::ControlAction::$action,
                arguments: &[
                    $( define_action!(@arg $direction $arg_name) ),*
                ],
            };
    };

    (@arg in $name:literal) => {
        $crate::contentdirectory::actions::Argument::required($name)
    };

    (@arg opt $name:literal) => {
        $crate::contentdirectory::actions::Argument::optional($name)
    };

    (@arg out $name:literal) => {
        $crate::contentdirectory::actions::Argument::output($name)
    };
}

pub(crate) mod browse;
pub(crate) mod getfeaturelist;
pub(crate) mod getsearchcapabilities;
pub(crate) mod getsortcapabilities;
pub(crate) mod getsortextensioncapabilities;
pub(crate) mod getsystemupdateid;
pub(crate) mod search;
pub(crate) mod xbrowsebyletter;
pub(crate) mod xsetbookmark;

pub use browse::BROWSE;
pub use getfeaturelist::{GETFEATURELIST, X_GETFEATURELIST};
pub use getsearchcapabilities::GETSEARCHCAPABILITIES;
pub use getsortcapabilities::GETSORTCAPABILITIES;
pub use getsortextensioncapabilities::GETSORTEXTENSIONCAPABILITIES;
pub use getsystemupdateid::GETSYSTEMUPDATEID;
pub use search::SEARCH;
pub use xbrowsebyletter::X_BROWSEBYLETTER;
pub use xsetbookmark::X_SETBOOKMARK;

/// Table des actions reconnues
pub static ACTIONS: [&ActionSpec; 10] = [
    &GETSEARCHCAPABILITIES,
    &GETSORTCAPABILITIES,
    &GETSORTEXTENSIONCAPABILITIES,
    &GETSYSTEMUPDATEID,
    &BROWSE,
    &X_GETFEATURELIST,
    &GETFEATURELIST,
    &X_SETBOOKMARK,
    &SEARCH,
    &X_BROWSEBYLETTER,
];

/// Opération exécutée par une action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    GetSearchCapabilities,
    GetSortCapabilities,
    GetSortExtensionCapabilities,
    GetSystemUpdateId,
    Browse,
    GetFeatureList,
    SetBookmark,
    Search,
    BrowseByLetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argument {
    pub name: &'static str,
    pub direction: ArgumentDirection,
    pub required: bool,
}

impl Argument {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            direction: ArgumentDirection::In,
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            direction: ArgumentDirection::In,
            required: false,
        }
    }

    pub const fn output(name: &'static str) -> Self {
        Self {
            name,
            direction: ArgumentDirection::Out,
            required: false,
        }
    }
}

/// Description d'une action UPnP
#[derive(Debug)]
pub struct ActionSpec {
    pub name: &'static str,
    pub action: ControlAction,
    pub arguments: &'static [Argument],
}

impl ActionSpec {
    /// Recherche une action par nom, sans tenir compte de la casse
    pub fn find(name: &str) -> Option<&'static ActionSpec> {
        let name = name.trim();
        ACTIONS
            .iter()
            .copied()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
    }

    pub fn inputs(&self) -> impl Iterator<Item = &'static Argument> {
        self.arguments
            .iter()
            .filter(|arg| arg.direction == ArgumentDirection::In)
    }

    /// Noms des arguments de sortie, dans l'ordre de la réponse
    pub fn outputs(&self) -> Vec<&'static str> {
        self.arguments
            .iter()
            .filter(|arg| arg.direction == ArgumentDirection::Out)
            .map(|arg| arg.name)
            .collect()
    }

    /// Vérifie la présence des arguments obligatoires
    pub fn check_required(&self, params: &ControlParams) -> Result<(), ContentDirectoryError> {
        match self
            .inputs()
            .find(|arg| arg.required && params.get(arg.name).is_none())
        {
            Some(missing) => Err(ContentDirectoryError::MissingArgument(missing.name)),
            None => Ok(()),
        }
    }
}

/// Arguments d'une requête de contrôle.
///
/// L'ordre de réception est conservé ; les noms sont comparés sans tenir
/// compte de la casse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlParams(Vec<(String, String)>);

impl ControlParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Valeur du premier argument portant ce nom
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ControlParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<HashMap<String, String>> for ControlParams {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}
