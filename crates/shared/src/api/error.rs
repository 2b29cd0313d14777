use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub error_messages: Vec<String>,
}

impl ValidationError {
    /// Ok when no messages were collected
    pub fn from_messages(error_messages: Vec<String>) -> Result<(), Self> {
        if error_messages.is_empty() {
            Ok(())
        } else {
            Err(Self { error_messages })
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_messages.join("; "))
    }
}

/// Error returned by server routes. `Inner` carries a domain error with the
/// status code it maps to, `Other` is everything the client can't act on
#[derive(Debug)]
pub enum ServerError<T> {
    Inner { code: StatusCode, inner: T },
    Other { message: String },
}

impl<T> ServerError<T> {
    pub fn code(&self) -> StatusCode {
        match self {
            Self::Inner { code, .. } => *code,
            Self::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn inner(&self) -> Option<&T> {
        match self {
            Self::Inner { inner, .. } => Some(inner),
            Self::Other { .. } => None,
        }
    }
}

impl<T: fmt::Debug> fmt::Display for ServerError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inner { code, inner } => write!(f, "{code}: {inner:?}"),
            Self::Other { message } => write!(f, "{message}"),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for ServerError<T> {}

#[cfg(feature = "backend")]
mod backend {
    use axum::{
        response::{IntoResponse, Response},
        Json,
    };
    use serde::Serialize;
    use tracing::error;

    use super::ServerError;

    impl<T: Serialize> IntoResponse for ServerError<T> {
        fn into_response(self) -> Response {
            match self {
                Self::Inner { code, inner } => (code, Json(inner)).into_response(),
                Self::Other { message } => {
                    error!("{message}");
                    let code = http::StatusCode::INTERNAL_SERVER_ERROR;
                    (code, format!("Something went wrong: {message}")).into_response()
                },
            }
        }
    }
}
