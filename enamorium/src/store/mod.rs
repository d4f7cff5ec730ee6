//! Persistence seam. Handlers and model operations only see these traits; the
//! app picks `ScyllaStore` or `MemoryStore` from config at startup.
//!
//! Mutations that guard an invariant (one like per pair, one user per email)
//! must be a single conditional write, never a read followed by a write.

mod memory_store;
pub mod schema;
mod scylla_store;

use async_trait::async_trait;
use charybdis::types::Uuid;

use crate::errors::EnamoriumError;
use crate::models::like::Like;
use crate::models::user::{Member, User};

pub use memory_store::MemoryStore;
pub use scylla_store::ScyllaStore;

#[async_trait]
pub trait LikeStore: Send + Sync {
    /// Fails with `Conflict` if the pair is already liked.
    async fn create_like(&self, like: &Like) -> Result<(), EnamoriumError>;

    /// Fails with `NotFound` if the pair is not liked.
    async fn delete_like(&self, source_user_id: Uuid, target_user_id: Uuid) -> Result<(), EnamoriumError>;

    async fn liked_ids(&self, source_user_id: Uuid) -> Result<Vec<Uuid>, EnamoriumError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` if the email is taken. `user.email` must already be normalized.
    async fn insert_user(&self, user: &User) -> Result<(), EnamoriumError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, EnamoriumError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, EnamoriumError>;

    async fn members(&self) -> Result<Vec<Member>, EnamoriumError>;
}

pub trait Store: LikeStore + UserStore {}

impl<T: LikeStore + UserStore> Store for T {}

pub(crate) fn already_liked(source_user_id: Uuid, target_user_id: Uuid) -> EnamoriumError {
    EnamoriumError::Conflict(format!("User {} already likes {}", source_user_id, target_user_id))
}

pub(crate) fn like_not_found(source_user_id: Uuid, target_user_id: Uuid) -> EnamoriumError {
    EnamoriumError::NotFound(format!("User {} does not like {}", source_user_id, target_user_id))
}

pub(crate) fn email_taken(email: &str) -> EnamoriumError {
    EnamoriumError::Conflict(format!("Email {} is already registered", email))
}
