use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // client-side failures
    #[error("validation failed")]
    Validation(serde_json::Value),
    #[error("email already registered")]
    AlreadyExists,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account disabled")]
    AccountDisabled,
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Token expired")]
    TokenExpired,
    #[error("Not authorized")]
    Forbidden,
    #[error("Invalid or expired code")]
    InvalidCode,
    #[error("not found")]
    NotFound,

    // infra things
    #[error("could not issue token")]
    TokenIssuance,
    #[error(transparent)]
    Db(DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        match &e {
            DbErr::RecordNotFound(_) => AppError::NotFound,
            _ => AppError::Db(e),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::AlreadyExists => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidCredentials
            | Self::AccountDisabled
            | Self::Unauthenticated
            | Self::TokenExpired => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InvalidCode => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::TokenIssuance | Self::Db(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // Validation failures carry the field-keyed error map.
            Self::Validation(fields) => HttpResponse::build(self.status_code())
                .json(json!({ "message": fields })),
            Self::AlreadyExists => HttpResponse::build(self.status_code())
                .json(json!({ "message": { "email": ["has already been taken"] } })),
            Self::TokenIssuance => {
                log::error!("token issuance failed");
                HttpResponse::build(self.status_code())
                    .json(ErrorBody { message: "Could not create token" })
            }
            Self::Db(e) => {
                log::error!("database error: {e}");
                HttpResponse::build(self.status_code())
                    .json(ErrorBody { message: "Internal server error" })
            }
            Self::Internal(detail) => {
                log::error!("internal error: {detail}");
                HttpResponse::build(self.status_code())
                    .json(ErrorBody { message: "Internal server error" })
            }
            other => HttpResponse::build(self.status_code())
                .json(ErrorBody { message: &other.to_string() }),
        }
    }
}
