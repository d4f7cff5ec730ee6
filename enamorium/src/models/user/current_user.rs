use crate::models::user::{partial_user, User};
use charybdis::types::{Text, Uuid};
use serde::{Deserialize, Serialize};

// Lives in the client session; keep it small.
partial_user!(CurrentUser, id, name, email);

impl CurrentUser {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
