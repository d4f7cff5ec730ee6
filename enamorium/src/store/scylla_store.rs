use async_trait::async_trait;
use charybdis::operations::{Find, Insert};
use charybdis::types::Uuid;
use log::{error, warn};
use scylla::client::caching_session::CachingSession;
use scylla::response::query_result::QueryResult;
use scylla::value::{CqlValue, Row};

use crate::errors::EnamoriumError;
use crate::models::like::Like;
use crate::models::user::{Member, User};
use crate::models::user_email::UserEmail;
use crate::store::{already_liked, email_taken, like_not_found, LikeStore, UserStore};

pub struct ScyllaStore {
    db_session: CachingSession,
}

impl ScyllaStore {
    pub fn new(db_session: CachingSession) -> Self {
        Self { db_session }
    }
}

/// Reads the `[applied]` column every LWT response starts with. When the
/// condition fails Scylla appends the current row, so the row is read untyped.
fn lwt_applied(result: QueryResult) -> Result<bool, EnamoriumError> {
    let rows = result
        .into_rows_result()
        .map_err(|e| EnamoriumError::InternalServerError(format!("LWT returned no rows: {}", e)))?;

    let row = rows
        .maybe_first_row::<Row>()
        .map_err(|e| EnamoriumError::InternalServerError(format!("Could not read LWT row: {}", e)))?;

    match row.and_then(|row| row.columns.into_iter().next().flatten()) {
        Some(CqlValue::Boolean(applied)) => Ok(applied),
        _ => Err(EnamoriumError::InternalServerError(
            "LWT row is missing the [applied] column".to_string(),
        )),
    }
}

#[async_trait]
impl LikeStore for ScyllaStore {
    async fn create_like(&self, like: &Like) -> Result<(), EnamoriumError> {
        let res = self
            .db_session
            .execute_unpaged(
                Like::LIKE_IF_NOT_LIKED_QUERY,
                (like.source_user_id, like.target_user_id, like.created_at),
            )
            .await?;

        if !lwt_applied(res)? {
            return Err(already_liked(like.source_user_id, like.target_user_id));
        }

        Ok(())
    }

    async fn delete_like(&self, source_user_id: Uuid, target_user_id: Uuid) -> Result<(), EnamoriumError> {
        let res = self
            .db_session
            .execute_unpaged(Like::UNLIKE_IF_LIKED_QUERY, (source_user_id, target_user_id))
            .await?;

        if !lwt_applied(res)? {
            return Err(like_not_found(source_user_id, target_user_id));
        }

        Ok(())
    }

    async fn liked_ids(&self, source_user_id: Uuid) -> Result<Vec<Uuid>, EnamoriumError> {
        let likes = Like::find_by_partition_key_value((source_user_id,))
            .execute(&self.db_session)
            .await?
            .try_collect()
            .await?;

        Ok(likes.into_iter().map(|like| like.target_user_id).collect())
    }
}

#[async_trait]
impl UserStore for ScyllaStore {
    async fn insert_user(&self, user: &User) -> Result<(), EnamoriumError> {
        let claim = self
            .db_session
            .execute_unpaged(UserEmail::CLAIM_QUERY, (&user.email, user.id))
            .await?;

        if !lwt_applied(claim)? {
            return Err(email_taken(&user.email));
        }

        if let Err(e) = user.insert().execute(&self.db_session).await {
            // give the email back, otherwise it stays claimed by a user that never existed
            let release = self
                .db_session
                .execute_unpaged(UserEmail::RELEASE_QUERY, (&user.email, user.id))
                .await;

            if let Err(release_err) = release {
                warn!("Could not release email claim for {}: {}", user.email, release_err);
            }

            error!("Failed to insert user {}: {}", user.id, e);

            return Err(e.into());
        }

        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, EnamoriumError> {
        let user = User::maybe_find_by_primary_key_value((id,))
            .execute(&self.db_session)
            .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, EnamoriumError> {
        let user_email = UserEmail::maybe_find_by_primary_key_value((email.to_string(),))
            .execute(&self.db_session)
            .await?;

        match user_email {
            Some(user_email) => self.find_user(user_email.user_id).await,
            None => Ok(None),
        }
    }

    async fn members(&self) -> Result<Vec<Member>, EnamoriumError> {
        let members = Member::find(Member::FIND_ALL_QUERY, ())
            .execute(&self.db_session)
            .await?
            .try_collect()
            .await?;

        Ok(members)
    }
}
