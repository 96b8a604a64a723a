use tracing::debug;

use crate::content_handler::ContentHandler;
use crate::contentdirectory::actions::ControlParams;
use crate::contentdirectory::criteria::SearchRequest;
use crate::contentdirectory::errors::ContentDirectoryError;
use crate::contentdirectory::response::Headers;
use crate::contentdirectory::state;

define_action! {
    pub static SEARCH = "Search" as Search {
        in "ContainerID",
        opt "SearchCriteria",
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
    let request = SearchRequest::from_params(params)?;
    let update_id = state::system_update_id();
    debug!(
        container_id = %request.container_id,
        search_type = ?request.criteria.search_type,
        "ContentDirectory::Search"
    );

    let container = handler.resolve_object_id(&request.container_id).await?;
    let response = handler
        .assembler()
        .search(&container, &request, update_id)
        .await?;
    Ok(response.into_headers())
}
