use dmslibrary::{TICKS_PER_SECOND, UserDataSaveReason};
use tracing::{debug, warn};

use crate::content_handler::ContentHandler;
use crate::contentdirectory::actions::ControlParams;
use crate::contentdirectory::errors::ContentDirectoryError;
use crate::contentdirectory::response::Headers;

define_action! {
    pub static X_SETBOOKMARK = "X_SetBookmark" as SetBookmark {
        in "ObjectID",
        opt "ContentType",
        opt "CategoryType",
        opt "RID",
        in "PosSecond",
    }
}

/// Enregistre la position de lecture (en secondes) de l'item désigné
pub(crate) async fn execute(
    handler: &ContentHandler,
    params: &ControlParams,
) -> Result<Headers, ContentDirectoryError> {
    let object_id = params
        .get("ObjectID")
        .ok_or(ContentDirectoryError::MissingArgument("ObjectID"))?;
    let raw_position = params
        .get("PosSecond")
        .ok_or(ContentDirectoryError::MissingArgument("PosSecond"))?;
    let seconds: i64 = raw_position.trim().parse().map_err(|_| {
        warn!("❌ Invalid PosSecond {:?} for {}", raw_position, object_id);
        ContentDirectoryError::InvalidArgument {
            name: "PosSecond",
            value: raw_position.to_string(),
        }
    })?;

    let node = handler.resolve_object_id(object_id).await?;
    let item = node.item();
    let user_id = handler.options().user_id;
    let user_data = &handler.services().user_data;

    let mut data = user_data.get_user_data(user_id, item).await?;
    data.playback_position_ticks = seconds.saturating_mul(TICKS_PER_SECOND);
    user_data
        .save_user_data(user_id, item, data, UserDataSaveReason::TogglePlayed)
        .await?;

    debug!("🔖 Bookmark '{}' at {}s", item.name, seconds);
    Ok(Vec::new())
}
