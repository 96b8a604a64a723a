use crate::contentdirectory::SORT_CAPABILITIES;
use crate::contentdirectory::response::Headers;

define_action! {
    pub static GETSORTEXTENSIONCAPABILITIES =
        "GetSortExtensionCapabilities" as GetSortExtensionCapabilities {
        out "SortExtensionCaps",
    }
}

pub(crate) fn execute() -> Headers {
    vec![(
        "SortExtensionCaps".to_string(),
        SORT_CAPABILITIES.to_string(),
    )]
}
