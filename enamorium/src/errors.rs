use actix_web::{HttpResponse, ResponseError};
use charybdis::errors::CharybdisError;
use log::error;
use scylla::errors::ExecutionError;
use serde_json::json;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum EnamoriumError {
    // 400s
    Unauthorized(&'static str),
    ValidationError((String, String)),
    NotFound(String),
    Conflict(String),
    // 400 | 500
    CharybdisError(CharybdisError),
    // 500
    ScyllaError(ExecutionError),
    ClientSessionError(String),
    ConfigError(String),
    InternalServerError(String),
}

impl fmt::Display for EnamoriumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnamoriumError::Unauthorized(e) => write!(f, "Unauthorized: {}", e),
            EnamoriumError::ValidationError((field, message)) => {
                write!(f, "Validation Error: {}: {}", field, message)
            }
            EnamoriumError::NotFound(e) => write!(f, "Not Found: {}", e),
            EnamoriumError::Conflict(e) => write!(f, "Conflict: {}", e),
            EnamoriumError::CharybdisError(e) => write!(f, "Charybdis Error: \n{}", e),
            EnamoriumError::ScyllaError(e) => write!(f, "Scylla Error: \n{}", e),
            EnamoriumError::ClientSessionError(e) => write!(f, "Session Error: {}", e),
            EnamoriumError::ConfigError(e) => write!(f, "Config Error: {}", e),
            EnamoriumError::InternalServerError(e) => write!(f, "InternalServerError: \n{}", e),
        }
    }
}

impl Error for EnamoriumError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EnamoriumError::CharybdisError(e) => Some(e),
            EnamoriumError::ScyllaError(e) => Some(e),
            EnamoriumError::Unauthorized(_)
            | EnamoriumError::ValidationError(_)
            | EnamoriumError::NotFound(_)
            | EnamoriumError::Conflict(_)
            | EnamoriumError::ClientSessionError(_)
            | EnamoriumError::ConfigError(_)
            | EnamoriumError::InternalServerError(_) => None,
        }
    }
}

impl ResponseError for EnamoriumError {
    fn error_response(&self) -> HttpResponse {
        match self {
            EnamoriumError::Unauthorized(e) => HttpResponse::Unauthorized().json(json!({
                "status": 401,
                "message": e
            })),
            EnamoriumError::ValidationError((field, message)) => HttpResponse::BadRequest().json(json!({
                "status": 400,
                "message": {field: message}
            })),
            EnamoriumError::NotFound(e) => HttpResponse::NotFound().json(json!({
                "status": 404,
                "message": e
            })),
            EnamoriumError::Conflict(e) => HttpResponse::Conflict().json(json!({
                "status": 409,
                "message": e
            })),
            EnamoriumError::CharybdisError(CharybdisError::NotFoundError(e)) => HttpResponse::NotFound().json(json!({
                "status": 404,
                "message": e.to_string()
            })),
            _ => {
                error!("Internal Server Error: {}", self);

                HttpResponse::InternalServerError().json(json!({
                    "status": 500,
                    "message": "Something went wrong"
                }))
            }
        }
    }
}

impl From<CharybdisError> for EnamoriumError {
    fn from(e: CharybdisError) -> Self {
        EnamoriumError::CharybdisError(e)
    }
}

impl From<ExecutionError> for EnamoriumError {
    fn from(e: ExecutionError) -> Self {
        EnamoriumError::ScyllaError(e)
    }
}

impl From<bcrypt::BcryptError> for EnamoriumError {
    fn from(e: bcrypt::BcryptError) -> Self {
        EnamoriumError::InternalServerError(format!("Bcrypt Error: {}", e))
    }
}

impl From<toml::de::Error> for EnamoriumError {
    fn from(e: toml::de::Error) -> Self {
        EnamoriumError::ConfigError(e.to_string())
    }
}
