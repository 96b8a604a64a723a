//! Décodage des arguments de Browse et Search.
//!
//! Les arguments numériques invalides ne sont pas des erreurs : ils prennent
//! leur valeur par défaut (début de liste, pas de limite).

use dmslibrary::{ItemSortBy, SortOrder};

use crate::contentdirectory::actions::ControlParams;
use crate::contentdirectory::errors::ContentDirectoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseFlag {
    Metadata,
    DirectChildren,
}

impl BrowseFlag {
    /// Seule la valeur exacte `BrowseMetadata` sélectionne le mode métadonnées
    pub fn parse(raw: &str) -> Self {
        if raw == "BrowseMetadata" {
            BrowseFlag::Metadata
        } else {
            BrowseFlag::DirectChildren
        }
    }
}

/// Champs optionnels demandés par le client (`Filter`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    all: bool,
    fields: Vec<String>,
}

impl Default for Filter {
    fn default() -> Self {
        Self::all()
    }
}

impl Filter {
    pub fn all() -> Self {
        Self {
            all: true,
            fields: Vec::new(),
        }
    }

    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == "*" {
            return Self::all();
        }
        Self {
            all: false,
            fields: raw
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.all
    }

    /// `res@size` est accepté sous sa forme complète ou sous la forme `@size`
    pub fn contains(&self, field: &str) -> bool {
        if self.all {
            return true;
        }
        self.fields.iter().any(|wanted| {
            wanted.eq_ignore_ascii_case(field)
                || (wanted.starts_with('@')
                    && field
                        .to_ascii_lowercase()
                        .ends_with(&wanted.to_ascii_lowercase()))
        })
    }
}

/// Critère de tri (`SortCriteria`).
///
/// Seul le sens du premier champ est retenu ; le tri effectif se fait
/// toujours sur le nom de tri.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortCriteria {
    pub sort_order: SortOrder,
    pub fields: Vec<String>,
}

impl SortCriteria {
    pub fn parse(raw: &str) -> Self {
        let mut fields = Vec::new();
        let mut sort_order = None;
        for field in raw.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            let (order, name) = match field.as_bytes()[0] {
                b'-' => (SortOrder::Descending, &field[1..]),
                b'+' => (SortOrder::Ascending, &field[1..]),
                _ => (SortOrder::Ascending, field),
            };
            sort_order.get_or_insert(order);
            fields.push(name.trim().to_string());
        }
        Self {
            sort_order: sort_order.unwrap_or_default(),
            fields,
        }
    }

    /// Tri appliqué aux requêtes ; vide quand le dossier est déjà ordonné
    pub fn order_by(&self, pre_sorted: bool) -> Vec<(ItemSortBy, SortOrder)> {
        if pre_sorted {
            Vec::new()
        } else {
            vec![(ItemSortBy::SortName, self.sort_order)]
        }
    }
}

/// Type d'objet recherché
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    #[default]
    Unknown,
    Audio,
    Image,
    Video,
    Playlist,
    MusicAlbum,
}

/// Critère de recherche : seule la classe UPnP est interprétée
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchCriteria {
    pub search_type: SearchType,
}

impl SearchCriteria {
    pub fn parse(raw: &str) -> Self {
        let mut search_type = SearchType::Unknown;
        for factor in split_factors(raw) {
            let factor = factor.trim_matches(|c| c == '(' || c == ')').trim();
            let mut parts = factor.splitn(3, char::is_whitespace);
            let (Some(property), Some(op), Some(value)) = (parts.next(), parts.next(), parts.next())
            else {
                continue;
            };

            if !property.eq_ignore_ascii_case("upnp:class")
                || !(op == "=" || op.eq_ignore_ascii_case("derivedfrom"))
            {
                continue;
            }

            if let Some(found) = class_search_type(value.trim().trim_matches('"')) {
                search_type = found;
            }
        }
        Self { search_type }
    }
}

/// Découpe le critère sur les opérateurs `and` / `or` isolés par des blancs
fn split_factors(raw: &str) -> Vec<String> {
    let mut factors = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for token in raw.split_whitespace() {
        if token.eq_ignore_ascii_case("and") || token.eq_ignore_ascii_case("or") {
            if !current.is_empty() {
                factors.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(token);
        }
    }
    if !current.is_empty() {
        factors.push(current.join(" "));
    }
    factors
}

fn class_search_type(class: &str) -> Option<SearchType> {
    const CLASSES: [(&str, SearchType); 6] = [
        ("object.item.imageItem", SearchType::Image),
        ("object.item.imageItem.photo", SearchType::Image),
        ("object.item.videoItem", SearchType::Video),
        ("object.item.audioItem", SearchType::Audio),
        ("object.container.playlistContainer", SearchType::Playlist),
        ("object.container.album.musicAlbum", SearchType::MusicAlbum),
    ];
    CLASSES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(class))
        .map(|(_, search_type)| *search_type)
}

/// `RequestedCount` : une valeur nulle, négative ou illisible signifie "pas de limite"
pub fn parse_requested_count(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|count| *count > 0)
        .and_then(|count| usize::try_from(count).ok())
}

/// `StartingIndex` : une valeur négative ou illisible vaut 0
pub fn parse_starting_index(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|index| usize::try_from(index).ok())
        .unwrap_or(0)
}

fn required<'a>(
    params: &'a ControlParams,
    name: &'static str,
) -> Result<&'a str, ContentDirectoryError> {
    params
        .get(name)
        .ok_or(ContentDirectoryError::MissingArgument(name))
}

/// Arguments d'un Browse
#[derive(Debug, Clone)]
pub struct BrowseRequest {
    pub object_id: String,
    pub flag: BrowseFlag,
    pub filter: Filter,
    pub start_index: usize,
    pub requested_count: Option<usize>,
    pub sort: SortCriteria,
}

impl BrowseRequest {
    pub fn from_params(params: &ControlParams) -> Result<Self, ContentDirectoryError> {
        Ok(Self {
            object_id: required(params, "ObjectID")?.to_string(),
            flag: BrowseFlag::parse(required(params, "BrowseFlag")?),
            filter: Filter::parse(params.get("Filter").unwrap_or("*")),
            start_index: parse_starting_index(params.get("StartingIndex")),
            requested_count: parse_requested_count(params.get("RequestedCount")),
            sort: SortCriteria::parse(params.get("SortCriteria").unwrap_or_default()),
        })
    }
}

/// Arguments d'un Search (et de X_BrowseByLetter)
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub container_id: String,
    pub criteria: SearchCriteria,
    pub filter: Filter,
    pub start_index: usize,
    pub requested_count: Option<usize>,
    pub sort: SortCriteria,
}

impl SearchRequest {
    pub fn from_params(params: &ControlParams) -> Result<Self, ContentDirectoryError> {
        Ok(Self {
            container_id: required(params, "ContainerID")?.to_string(),
            criteria: SearchCriteria::parse(params.get("SearchCriteria").unwrap_or_default()),
            filter: Filter::parse(params.get("Filter").unwrap_or("*")),
            start_index: parse_starting_index(params.get("StartingIndex")),
            requested_count: parse_requested_count(params.get("RequestedCount")),
            sort: SortCriteria::parse(params.get("SortCriteria").unwrap_or_default()),
        })
    }
}
