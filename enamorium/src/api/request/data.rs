use std::future::{ready, Ready};

use actix_session::SessionExt;
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::api::current_user::get_current_user;
use crate::app::App;
use crate::errors::EnamoriumError;
use crate::models::user::CurrentUser;
use crate::store::Store;

/// Shared app state plus the authenticated user, for handlers that need both.
#[derive(Clone)]
pub struct RequestData {
    pub app: web::Data<App>,
    pub current_user: CurrentUser,
}

impl RequestData {
    pub fn store(&self) -> &dyn Store {
        self.app.store.as_ref()
    }
}

impl FromRequest for RequestData {
    type Error = EnamoriumError;
    type Future = Ready<Result<RequestData, EnamoriumError>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let client_session = req.get_session();

        match get_current_user(&client_session) {
            Some(current_user) => match req.app_data::<web::Data<App>>() {
                Some(app) => ready(Ok(RequestData {
                    app: web::Data::clone(app),
                    current_user,
                })),
                None => ready(Err(EnamoriumError::InternalServerError(
                    "Could not get app data".to_string(),
                ))),
            },
            None => ready(Err(EnamoriumError::Unauthorized(
                "You must be logged in to perform this action!",
            ))),
        }
    }
}
