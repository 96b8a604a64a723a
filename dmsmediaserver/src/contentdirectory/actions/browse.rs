use tracing::debug;

use crate::content_handler::ContentHandler;
use crate::contentdirectory::actions::ControlParams;
use crate::contentdirectory::criteria::BrowseRequest;
use crate::contentdirectory::errors::ContentDirectoryError;
use crate::contentdirectory::response::Headers;
use crate::contentdirectory::state;

define_action! {
    pub static BROWSE = "Browse" as Browse {
        in "ObjectID",
        in "BrowseFlag",
        opt "Filter",
        opt "StartingIndex",
        opt "RequestedCount",
        opt "SortCriteria",
        out "Result",
        out "NumberReturned",
        out "TotalMatches",
        out "UpdateID",
    }
}

pub(crate) async fn execute(
    handler: &ContentHandler,
    params: &ControlParams,
) -> Result<Headers, ContentDirectoryError> {
    let request = BrowseRequest::from_params(params)?;
    let update_id = state::system_update_id();
    debug!(
        object_id = %request.object_id,
        flag = ?request.flag,
        start = request.start_index,
        count = ?request.requested_count,
        "ContentDirectory::Browse"
    );

    let node = handler.resolve_object_id(&request.object_id).await?;
    let response = handler
        .assembler()
        .browse(&node, &request, update_id)
        .await?;
    Ok(response.into_headers())
}
