use crate::errors::EnamoriumError;
use crate::models::user::{partial_user, CurrentUser, User};
use crate::store::UserStore;
use charybdis::types::{Text, Timestamp, Uuid};
use log::error;
use serde::{Deserialize, Serialize};

partial_user!(Member, id, name, image, created_at);

impl Member {
    pub const FIND_ALL_QUERY: &'static str = "SELECT id, name, image, created_at FROM users";

    /// Everyone but the current user, newest first.
    pub async fn all_except<S: UserStore + ?Sized>(
        store: &S,
        current_user: &CurrentUser,
    ) -> Result<Vec<Member>, EnamoriumError> {
        let mut members: Vec<Member> = store
            .members()
            .await
            .inspect_err(|e| error!("Failed to fetch members: {}", e))?
            .into_iter()
            .filter(|member| member.id != current_user.id)
            .collect();

        members.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        Ok(members)
    }

    pub async fn fetch<S: UserStore + ?Sized>(store: &S, id: Uuid) -> Result<Member, EnamoriumError> {
        let user = store
            .find_user(id)
            .await
            .inspect_err(|e| error!("Failed to fetch member {}: {}", id, e))?;

        match user {
            Some(user) => Ok(Member::from(&user)),
            None => Err(EnamoriumError::NotFound(format!("Member {} not found", id))),
        }
    }
}

impl From<&User> for Member {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            image: user.image.clone(),
            created_at: user.created_at,
        }
    }
}
