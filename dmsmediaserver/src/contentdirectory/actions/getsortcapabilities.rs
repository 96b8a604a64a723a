use crate::contentdirectory::SORT_CAPABILITIES;
use crate::contentdirectory::response::Headers;

define_action! {
    pub static GETSORTCAPABILITIES = "GetSortCapabilities" as GetSortCapabilities {
        out "SortCaps",
    }
}

pub(crate) fn execute() -> Headers {
    vec![("SortCaps".to_string(), SORT_CAPABILITIES.to_string())]
}
