use async_trait::async_trait;
use charybdis::types::Uuid;
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};

use crate::errors::EnamoriumError;
use crate::models::like::Like;
use crate::models::user::{Member, User};
use crate::store::{already_liked, email_taken, like_not_found, LikeStore, UserStore};

/// In-process store with the same conditional-write semantics as `ScyllaStore`.
/// Used by tests and by `store = "memory"` for local runs.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    user_emails: DashMap<String, Uuid>,
    likes: DashSet<(Uuid, Uuid)>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}

#[async_trait]
impl LikeStore for MemoryStore {
    async fn create_like(&self, like: &Like) -> Result<(), EnamoriumError> {
        if !self.likes.insert((like.source_user_id, like.target_user_id)) {
            return Err(already_liked(like.source_user_id, like.target_user_id));
        }

        Ok(())
    }

    async fn delete_like(&self, source_user_id: Uuid, target_user_id: Uuid) -> Result<(), EnamoriumError> {
        match self.likes.remove(&(source_user_id, target_user_id)) {
            Some(_) => Ok(()),
            None => Err(like_not_found(source_user_id, target_user_id)),
        }
    }

    async fn liked_ids(&self, source_user_id: Uuid) -> Result<Vec<Uuid>, EnamoriumError> {
        let ids = self
            .likes
            .iter()
            .filter(|pair| pair.0 == source_user_id)
            .map(|pair| pair.1)
            .collect();

        Ok(ids)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), EnamoriumError> {
        match self.user_emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(email_taken(&user.email)),
            Entry::Vacant(entry) => {
                entry.insert(user.id);
                self.users.insert(user.id, user.clone());

                Ok(())
            }
        }
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, EnamoriumError> {
        Ok(self.users.get(&id).map(|user| user.clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, EnamoriumError> {
        let id = match self.user_emails.get(email) {
            Some(id) => *id,
            None => return Ok(None),
        };

        self.find_user(id).await
    }

    async fn members(&self) -> Result<Vec<Member>, EnamoriumError> {
        Ok(self.users.iter().map(|user| Member::from(user.value())).collect())
    }
}
