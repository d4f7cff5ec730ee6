use charybdis::types::Uuid;
use chrono::Utc;
use log::error;
use serde::Serialize;

use crate::errors::EnamoriumError;
use crate::models::like::Like;
use crate::models::user::CurrentUser;
use crate::store::LikeStore;

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LikeState {
    pub target_user_id: Uuid,
    pub liked: bool,
}

impl Like {
    /// Deletes the like when `is_liked` is set, creates it otherwise.
    ///
    /// `is_liked` is the caller's view of the current state. Both branches are a
    /// single conditional mutation in the store, so a stale view fails with
    /// `Conflict` (already liked) or `NotFound` (not liked) and nothing is
    /// written. Errors are logged and returned as they are.
    pub async fn toggle<S: LikeStore + ?Sized>(
        store: &S,
        current_user: &CurrentUser,
        target_user_id: Uuid,
        is_liked: bool,
    ) -> Result<LikeState, EnamoriumError> {
        let res = if is_liked {
            store.delete_like(current_user.id, target_user_id).await
        } else {
            let like = Like {
                source_user_id: current_user.id,
                target_user_id,
                created_at: Utc::now(),
            };

            store.create_like(&like).await
        };

        res.inspect_err(|e| {
            error!(
                "Failed to toggle like {} -> {} (is_liked: {}): {}",
                current_user.id, target_user_id, is_liked, e
            );
        })?;

        Ok(LikeState {
            target_user_id,
            liked: !is_liked,
        })
    }
}
