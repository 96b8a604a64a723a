use crate::contentdirectory::response::Headers;
use crate::contentdirectory::state;

define_action! {
    pub static GETSYSTEMUPDATEID = "GetSystemUpdateID" as GetSystemUpdateId {
        out "Id",
    }
}

pub(crate) fn execute() -> Headers {
    vec![("Id".to_string(), state::system_update_id().to_string())]
}
