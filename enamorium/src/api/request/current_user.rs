use std::future::{ready, Ready};

use actix_session::{Session, SessionExt};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use log::error;

use crate::constants::CURRENT_USER_SESSION_KEY;
use crate::errors::EnamoriumError;
use crate::models::user::{CurrentUser, User};
use crate::store::UserStore;

/// Resolved from the session alone, so a request without a session is
/// rejected before any handler reaches the store.
impl FromRequest for CurrentUser {
    type Error = EnamoriumError;
    type Future = Ready<Result<CurrentUser, EnamoriumError>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let client_session = req.get_session();

        match get_current_user(&client_session) {
            Some(user) => ready(Ok(user)),
            None => ready(Err(EnamoriumError::Unauthorized(
                "You must be logged in to perform this action!",
            ))),
        }
    }
}

pub fn set_current_user(client_session: &Session, current_user: &CurrentUser) -> Result<(), EnamoriumError> {
    client_session
        .insert(CURRENT_USER_SESSION_KEY, current_user)
        .map_err(|e| {
            error!("Could not set current user. {}", e);

            EnamoriumError::ClientSessionError("Could not set current user.".to_string())
        })?;

    Ok(())
}

pub fn remove_current_user(client_session: &Session) {
    client_session.remove(CURRENT_USER_SESSION_KEY);
}

pub fn get_current_user(client_session: &Session) -> Option<CurrentUser> {
    client_session
        .get::<CurrentUser>(CURRENT_USER_SESSION_KEY)
        .map_err(|e| error!("Could not get current user. {}", e))
        .ok()
        .flatten()
}

/// Reloads the session user from the store. A user that no longer exists is logged out.
pub async fn refresh_current_user<S: UserStore + ?Sized>(
    client_session: &Session,
    store: &S,
    current_user: &CurrentUser,
) -> Result<User, EnamoriumError> {
    let user = store
        .find_user(current_user.id)
        .await
        .inspect_err(|e| error!("Failed to refresh current user {}: {}", current_user.id, e))?;

    match user {
        Some(user) => {
            set_current_user(client_session, &CurrentUser::from_user(&user))?;

            Ok(user)
        }
        None => {
            remove_current_user(client_session);

            Err(EnamoriumError::Unauthorized("Session user no longer exists"))
        }
    }
}
