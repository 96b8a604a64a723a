use crate::contentdirectory::SEARCH_CAPABILITIES;
use crate::contentdirectory::response::Headers;

define_action! {
    pub static GETSEARCHCAPABILITIES = "GetSearchCapabilities" as GetSearchCapabilities {
        out "SearchCaps",
    }
}

pub(crate) fn execute() -> Headers {
    vec![("SearchCaps".to_string(), SEARCH_CAPABILITIES.to_string())]
}
