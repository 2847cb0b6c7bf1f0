use actix_web::{
    error,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use derive_more::derive::Display;

use log::error;

pub trait APIRequest: Sized {
    fn ok(&self) -> bool;
    fn sanity(&self) -> Result<(), APIError> {
        if self.ok() {
            Ok(())
        } else {
            Err(APIError::InvalidFormData)
        }
    }
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum APIError {
    #[display("Invalid form data")]
    InvalidFormData,

    // The submitted secret matches no level. A normal negative result,
    // surfaced to the submitter and never persisted.
    #[display("Invalid password")]
    InvalidPassword,

    #[display("Unauthorized access")]
    Unauthorized,

    #[display("Submission store unavailable: {msg}")]
    StoreUnavailable { msg: String },

    #[display("Write rejected by store access policy")]
    PermissionDenied,

    #[display("Value rejected by store constraint: {constraint}")]
    ConstraintViolation { constraint: String },

    #[display("Reset incomplete, {remaining} submissions remain")]
    ResetIncomplete { remaining: i64 },

    #[display("Server error at {location}, ref[{refnum}]: {msg}")]
    ServerError {
        location: &'static str,
        msg: &'static str,
        refnum: uuid::Uuid,
    },
}

impl APIError {
    pub fn set_location(self, location: &'static str) -> Self {
        match self {
            APIError::ServerError {
                location: _,
                msg,
                refnum,
            } => APIError::ServerError {
                location,
                msg,
                refnum,
            },
            _ => self,
        }
    }

    pub fn log(&self) {
        if let APIError::ServerError {
            location,
            msg,
            refnum,
        } = self
        {
            error!("Server error at {location}, ref[{refnum}]: {msg}");
        }
    }
}

impl From<DieselError> for APIError {
    fn from(e: DieselError) -> Self {
        classify_store_error(e)
    }
}

impl error::ResponseError for APIError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::html())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            APIError::InvalidFormData => StatusCode::NOT_ACCEPTABLE,
            APIError::Unauthorized => StatusCode::UNAUTHORIZED,
            APIError::PermissionDenied => StatusCode::FORBIDDEN,
            APIError::StoreUnavailable { msg: _ } => StatusCode::SERVICE_UNAVAILABLE,
            APIError::ResetIncomplete { remaining: _ } => StatusCode::INTERNAL_SERVER_ERROR,
            APIError::ServerError {
                location: _,
                msg: _,
                refnum: _,
            } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Sorts a store-layer failure into the error taxonomy. An absent table or a
/// dead connection is an operational problem, a rejected write is either a
/// policy or a data problem; each gets a distinct, actionable message instead
/// of one generic failure.
pub fn classify_store_error(e: DieselError) -> APIError {
    match e {
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
            APIError::ConstraintViolation {
                constraint: info
                    .constraint_name()
                    .unwrap_or(info.message())
                    .to_string(),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            APIError::StoreUnavailable {
                msg: info.message().to_string(),
            }
        }
        DieselError::DatabaseError(_, info) if info.message().contains("does not exist") => {
            APIError::StoreUnavailable {
                msg: info.message().to_string(),
            }
        }
        DieselError::DatabaseError(_, info) if info.message().contains("permission denied") => {
            APIError::PermissionDenied
        }
        other => new_unlocated_server_error(other, ERROR_DB_UNKNOWN),
    }
}

pub fn new_unlocated_server_error<E>(error: E, msg: &'static str) -> APIError
where
    E: std::fmt::Display,
{
    let refnum = uuid::Uuid::new_v4();
    error!("Error [{refnum}]: {error}");
    APIError::ServerError {
        location: LOCATION_UNKNOWN,
        msg,
        refnum,
    }
}

pub static ERROR_DB_UNKNOWN: &str = "database_unknown";

pub static LOCATION_UNKNOWN: &str = "[unknown]";
