use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use eventide_domain::FieldError;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventideError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("Validation error")]
    InvalidFields(Vec<FieldError>),
    #[error("There was a conflict with the request. Error message: `{0}`")]
    Conflict(String),
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("Forbidden request. Error message: `{0}`")]
    Forbidden(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
}

impl actix_web::error::ResponseError for EventideError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::InvalidFields(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::InvalidFields(errors) => {
                let field_errors = errors
                    .iter()
                    .map(|e| (e.field.clone(), e.message.clone()))
                    .collect::<HashMap<_, _>>();
                HttpResponse::build(self.status_code()).json(serde_json::json!({
                    "message": self.to_string(),
                    "fieldErrors": field_errors,
                }))
            }
            _ => HttpResponse::build(self.status_code())
                .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
                .body(self.to_string()),
        }
    }
}
