use tracing::{debug, info};

use crate::ApiError;
use crate::hash::{digest, identity_text};
use crate::storage::Storage;
use crate::types::api::{
    CreatePaste, CreatedPaste, DeletePaste, ReadPaste, ReadResult, ALL_PASTES,
};

pub async fn create(
    storage: &mut impl Storage,
    req: CreatePaste,
) -> crate::ApiResult<CreatedPaste> {
    if req.user_id.is_null() {
        return Err(ApiError::MalformedBody {
            reason: "user_id must not be null".into(),
        });
    }

    let user_id = digest(&identity_text(&req.user_id));
    let paste_id = digest(&req.paste);

    info!(
        "new paste: user='{user_id}', paste_id='{paste_id}', size={size}",
        size = req.paste.len()
    );

    let paste = storage.insert_paste(&user_id, &req.paste, &paste_id).await?;

    Ok(CreatedPaste {
        user_id: paste.user_id,
        paste_id: paste.paste_id,
    })
}

pub async fn read(storage: &mut impl Storage, req: ReadPaste) -> crate::ApiResult<ReadResult> {
    let user_id = req.user_id.as_str();

    match req.paste_id.as_ref().map(|id| id.as_str()) {
        None => {
            debug!("reading latest paste of '{user_id}'");
            let paste = storage
                .latest_paste(user_id)
                .await?
                .ok_or(ApiError::NotFound)?;
            Ok(ReadResult::Paste(paste.into()))
        }
        Some(ALL_PASTES) => {
            debug!("listing pastes of '{user_id}'");
            let pastes = storage.list_pastes(user_id).await?;
            Ok(ReadResult::List(pastes.into_iter().map(Into::into).collect()))
        }
        Some(paste_id) => {
            debug!("reading paste '{paste_id}' for '{user_id}'");
            let paste = storage
                .find_paste(paste_id, user_id)
                .await?
                .ok_or(ApiError::NotFound)?;
            if paste.user_id != user_id {
                return Err(ApiError::Forbidden);
            }
            Ok(ReadResult::Paste(paste.into()))
        }
    }
}

pub async fn delete(storage: &mut impl Storage, req: DeletePaste) -> crate::ApiResult<()> {
    let user_id = req.user_id.as_str();
    let paste_id = req.paste_id.as_str();

    let deleted = storage.delete_paste(paste_id, user_id).await?;
    if deleted > 0 {
        info!("deleted paste: user='{user_id}', paste_id='{paste_id}', rows={deleted}");
        return Ok(());
    }

    // nothing of theirs went; tell apart someone else's paste from no paste
    if storage.paste_exists(paste_id).await? {
        Err(ApiError::Forbidden)
    } else {
        Err(ApiError::NotFound)
    }
}
