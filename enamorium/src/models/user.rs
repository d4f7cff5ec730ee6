mod current_user;
mod forms;
mod member;

use bcrypt::{hash, verify};
use charybdis::macros::charybdis_model;
use charybdis::types::{Text, Timestamp, Uuid};
use chrono::Utc;
use log::error;
use serde::{Deserialize, Serialize};

use crate::errors::EnamoriumError;
use crate::store::UserStore;

pub use current_user::CurrentUser;
pub use forms::{LoginForm, RegisterForm};
pub use member::Member;

const BCRYPT_COST: u32 = 6;

#[charybdis_model(
    table_name = users,
    partition_keys = [id],
    clustering_keys = [],
    global_secondary_indexes = []
)]
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    pub name: Text,

    pub email: Text,

    #[serde(skip_serializing)]
    pub password: Text,

    #[serde(default)]
    pub image: Option<Text>,

    #[serde(default = "chrono::Utc::now")]
    pub created_at: Timestamp,

    #[serde(default = "chrono::Utc::now")]
    pub updated_at: Timestamp,
}

impl User {
    pub async fn register<S: UserStore + ?Sized>(store: &S, form: RegisterForm) -> Result<User, EnamoriumError> {
        form.validate()?;

        let now = Utc::now();
        let mut user = User {
            id: Uuid::new_v4(),
            name: form.name.trim().to_string(),
            email: normalize_email(&form.email),
            password: form.password,
            image: None,
            created_at: now,
            updated_at: now,
        };

        user.set_password()?;

        store.insert_user(&user).await.inspect_err(|e| {
            error!("Failed to register user {}: {}", user.email, e);
        })?;

        Ok(user)
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn authenticate<S: UserStore + ?Sized>(store: &S, form: LoginForm) -> Result<User, EnamoriumError> {
        form.validate()?;

        let user = store
            .find_user_by_email(&normalize_email(&form.email))
            .await
            .inspect_err(|e| error!("Failed to find user by email: {}", e))?;

        match user {
            Some(user) if user.verify_password(&form.password)? => Ok(user),
            _ => Err(EnamoriumError::Unauthorized("Invalid credentials")),
        }
    }

    pub fn verify_password(&self, password: &str) -> Result<bool, EnamoriumError> {
        verify(password, &self.password).map_err(|e| {
            error!("Could not verify password for user {}: {}", self.id, e);

            EnamoriumError::InternalServerError("Could not verify password".to_string())
        })
    }

    fn set_password(&mut self) -> Result<(), EnamoriumError> {
        self.password = hash(&self.password, BCRYPT_COST)?;

        Ok(())
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
