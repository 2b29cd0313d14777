//! The boundary between the services and the storage engine.
//!
//! A [`Gateway`] exposes typed single record operations for one [`Record`]
//! type. Each call is atomic on its own; nothing spans multiple calls.

use async_trait::async_trait;
use shared::{
    api::error::ServerError,
    model::{Filter, Record},
    types::Uuid,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no row with the given id")]
    NotFound,
    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for GatewayError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.into())
    }
}

// Only reached once the caller has handled `NotFound` itself
impl<T> From<GatewayError> for ServerError<T> {
    fn from(err: GatewayError) -> Self {
        ServerError::Other { message: err.to_string() }
    }
}

#[async_trait]
pub trait Gateway<R: Record>: Send + Sync {
    /// Inserts a new row, returning it with its generated id
    async fn create(&self, fields: R::New) -> Result<R, GatewayError>;

    async fn find_one(&self, id: &Uuid) -> Result<R, GatewayError>;

    /// All rows matching `filter`, in insertion order
    async fn find_many(&self, filter: Option<Filter<R::Field>>) -> Result<Vec<R>, GatewayError>;

    async fn update(&self, id: &Uuid, changes: R::Changes) -> Result<R, GatewayError>;

    async fn delete(&self, id: &Uuid) -> Result<(), GatewayError>;
}

pub trait GatewayResultExt<R> {
    /// Maps [`GatewayError::NotFound`] to the caller's own not found error
    fn or_not_found<T, F>(self, not_found: F) -> Result<R, ServerError<T>>
    where
        F: FnOnce() -> T,
        ServerError<T>: From<T>;
}

impl<R> GatewayResultExt<R> for Result<R, GatewayError> {
    fn or_not_found<T, F>(self, not_found: F) -> Result<R, ServerError<T>>
    where
        F: FnOnce() -> T,
        ServerError<T>: From<T>,
    {
        match self {
            Ok(v) => Ok(v),
            Err(GatewayError::NotFound) => Err(not_found().into()),
            Err(e) => Err(e.into()),
        }
    }
}
