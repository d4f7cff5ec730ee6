mod toggle;

use charybdis::macros::charybdis_model;
use charybdis::types::{Timestamp, Uuid};
use log::error;
use serde::{Deserialize, Serialize};

use crate::errors::EnamoriumError;
use crate::models::user::CurrentUser;
use crate::store::LikeStore;

/// `source_user_id` likes `target_user_id`. The row carries no state of its own,
/// its existence is the like.
#[charybdis_model(
    table_name = likes,
    partition_keys = [source_user_id],
    clustering_keys = [target_user_id],
    global_secondary_indexes = []
)]
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub source_user_id: Uuid,
    pub target_user_id: Uuid,

    #[serde(default = "chrono::Utc::now")]
    pub created_at: Timestamp,
}

impl Like {
    pub const LIKE_IF_NOT_LIKED_QUERY: &'static str = "
        INSERT INTO likes (source_user_id, target_user_id, created_at)
        VALUES (?, ?, ?)
        IF NOT EXISTS
    ";

    pub const UNLIKE_IF_LIKED_QUERY: &'static str = "
        DELETE FROM likes
        WHERE source_user_id = ? AND target_user_id = ?
        IF EXISTS
    ";

    /// Ids of every user the current user likes. Order is whatever the store yields.
    pub async fn liked_ids<S: LikeStore + ?Sized>(
        store: &S,
        current_user: &CurrentUser,
    ) -> Result<Vec<Uuid>, EnamoriumError> {
        store.liked_ids(current_user.id).await.inspect_err(|e| {
            error!("Failed to fetch liked ids for user {}: {}", current_user.id, e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::collections::HashSet;

    fn current_user() -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@email.com".to_string(),
        }
    }

    #[tokio::test]
    async fn liked_ids_is_empty_without_likes() {
        let store = MemoryStore::default();

        let ids = Like::liked_ids(&store, &current_user()).await.unwrap();

        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn liked_ids_returns_exactly_the_liked_targets() {
        let store = MemoryStore::default();
        let cu = current_user();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        Like::toggle(&store, &cu, a, false).await.unwrap();
        Like::toggle(&store, &cu, b, false).await.unwrap();

        // someone else's like must not leak into the result
        Like::toggle(&store, &current_user(), Uuid::new_v4(), false)
            .await
            .unwrap();

        let ids: HashSet<Uuid> = Like::liked_ids(&store, &cu).await.unwrap().into_iter().collect();

        assert_eq!(ids, HashSet::from([a, b]));
    }
}
