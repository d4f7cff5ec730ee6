use actix_web::HttpResponse;

use crate::errors::EnamoriumError;

pub type Response = Result<HttpResponse, EnamoriumError>;
