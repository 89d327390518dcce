use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use thiserror::Error;

use std::io::Cursor;
use std::sync::PoisonError;

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("database connection lock poisoned")]
    LockPoisoned,
    #[error("{0}")]
    Other(String),
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(_: PoisonError<T>) -> InternalError {
        InternalError::LockPoisoned
    }
}

impl From<&str> for InternalError {
    fn from(s: &str) -> InternalError {
        InternalError::Other(s.to_string())
    }
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, _request: &'r Request<'_>) -> response::Result<'static> {
        let body = self.to_string();

        Response::build()
            .status(Status::InternalServerError)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

pub type InternalResult<T> = Result<T, InternalError>;
