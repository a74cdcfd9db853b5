use std::sync::{Arc, OnceLock};

use aide::OperationOutput;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Request,
    },
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{db, edit};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not_found")]
    NotFound(String),

    #[error("conflict")]
    Conflict(String),

    // validation
    #[error("validation")]
    Validation(String),
    #[error("validation")]
    JsonValidation(#[from] JsonRejection),
    #[error("validation")]
    QueryValidation(#[from] QueryRejection),
    #[error("validation")]
    PathValidation(#[from] PathRejection),

    #[error(transparent)]
    DB(db::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("unexpected")]
    Unexpected(String),
}

impl From<db::Error> for Error {
    fn from(error: db::Error) -> Self {
        match error {
            db::Error::NotFound(msg) => Self::NotFound(msg),
            error => Self::DB(error),
        }
    }
}

impl From<edit::Error> for Error {
    fn from(error: edit::Error) -> Self {
        match error {
            edit::Error::NotFound(_) => Self::NotFound("Note not found".into()),
            edit::Error::Validation(error) => Self::Validation(error.to_string()),
            error @ edit::Error::SessionClosed => Self::Conflict(error.to_string()),
        }
    }
}

impl From<edit::ValidationError> for Error {
    fn from(error: edit::ValidationError) -> Self {
        Self::Validation(error.to_string())
    }
}

/// crate::Error <--> tokio_rusqlite::Error
///
/// Handlers can fail with a crate error from inside `DB::call`; it is boxed on
/// the way out and unboxed here.
pub mod db_mappers {
    use super::*;
    use crate::db::{rusqlite, tokio_rusqlite};

    impl From<tokio_rusqlite::Error> for Error {
        fn from(error: tokio_rusqlite::Error) -> Self {
            match error {
                tokio_rusqlite::Error::Other(err) if err.is::<Error>() => match err.downcast::<Error>() {
                    Ok(error) => *error,
                    Err(err) => Error::from(db::Error::from(tokio_rusqlite::Error::Other(err))),
                },
                error => Error::from(db::Error::from(error)),
            }
        }
    }

    impl From<rusqlite::Error> for Error {
        fn from(error: rusqlite::Error) -> Self {
            Error::from(db::Error::from(error))
        }
    }

    impl From<Error> for tokio_rusqlite::Error {
        fn from(error: Error) -> Self {
            tokio_rusqlite::Error::Other(error.into())
        }
    }
}

// Response

/// Typed error responses, one per kind.
/// ```ignore
/// error_responses! {
///     not_found: 404,
///     unexpected: 500
/// }
/// // errors().not_found.with_message("Note not found")
/// ```
macro_rules! error_responses {
    (
        $($name:ident: $code:expr),* $(,)?
    ) => {
        #[derive(Debug, Clone, Serialize)]
        struct Responses {
            $(
                $name: ErrorResponse,
            )*
        }

        static ERRORS: OnceLock<Responses> = OnceLock::new();

        fn errors() -> &'static Responses {
            ERRORS.get_or_init(|| Responses {
                $(
                    $name: ErrorResponse::new(stringify!($name), $code),
                )*
            })
        }
    };
}

#[derive(Debug, Serialize, Clone, Default, JsonSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: Option<String>,
    pub status: u16,
    pub details: Option<Map<String, Value>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, status: u16) -> Self {
        Self {
            error: error.into(),
            status,
            ..Default::default()
        }
    }

    pub fn with_message(&self, message: impl Into<String>) -> Self {
        let mut res = self.clone();
        res.message = Some(message.into());
        res
    }
}

error_responses! {
    not_found: 404,
    conflict: 409,
    validation: 422,
    path_validation: 400,
    query_validation: 400,
    json_validation: 400,
    unexpected: 500
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        let errors = errors();
        match error {
            Error::NotFound(message) => errors.not_found.with_message(message),
            Error::Conflict(message) => errors.conflict.with_message(message),
            Error::Validation(message) => errors.validation.with_message(message),
            Error::JsonValidation(error) => errors.json_validation.with_message(error.body_text()),
            Error::QueryValidation(error) => errors.query_validation.with_message(error.body_text()),
            Error::PathValidation(error) => errors.path_validation.with_message(error.body_text()),
            Error::Unexpected(message) => errors.unexpected.with_message(message),
            _ => errors.unexpected.with_message("Unexpected"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let error = Arc::new(self);

        let error_res = ErrorResponse::from(error.as_ref());
        let status = error_res.status;

        let mut res = axum::Json(error_res).into_response();
        res.extensions_mut().insert(error);

        *res.status_mut() = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        res
    }
}

impl OperationOutput for Error {
    type Inner = ErrorResponse;
}

pub async fn on_error(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let error = response.extensions().get::<Arc<Error>>().map(Arc::as_ref);
    match error {
        Some(error) if matches!(error, Error::DB(_) | Error::Io(_) | Error::Unexpected(_)) => {
            tracing::error!("{:?}", error)
        }
        Some(error) => tracing::warn!("{:?}", error),
        None => {}
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_errors_map_to_statuses() {
        let status = |error: edit::Error| ErrorResponse::from(&Error::from(error)).status;

        assert_eq!(status(edit::Error::NotFound(3)), 404);
        assert_eq!(status(edit::Error::Validation(edit::ValidationError::EmptyTitle)), 422);
        assert_eq!(status(edit::Error::SessionClosed), 409);
    }

    #[test]
    fn validation_message_is_kept() {
        let response = ErrorResponse::from(&Error::from(edit::ValidationError::EmptyTitle));

        assert_eq!(response.error, "validation");
        assert_eq!(response.message.as_deref(), Some("Title is needed to update note"));
    }

    #[test]
    fn crate_errors_survive_the_db_boundary() {
        use crate::db::tokio_rusqlite;

        let boxed = tokio_rusqlite::Error::from(Error::Conflict("taken".into()));

        assert!(matches!(Error::from(boxed), Error::Conflict(message) if message == "taken"));
    }
}
