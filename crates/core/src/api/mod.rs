//! # Catalog API Collaborator
//!
//! The remote surface the engine talks to. The engine only ever sees the
//! `CatalogApi` trait; `HttpCatalogApi` is the production implementation.

pub mod http;

pub use http::HttpCatalogApi;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::model::{Game, GameDraft};

/// Outcome of a remote partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// At least one field changed on the server.
    Updated,
    /// No field changed; a successful no-op, not a failure.
    NotModified,
}

/// Remote catalog operations consumed by the engine.
///
/// Implementations issue at most one request per call and never retry;
/// the engine translates every failure into a notification.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch `limit` items starting at `offset`, in server order.
    async fn fetch_page(&self, offset: u64, limit: u64) -> ApiResult<Vec<Game>>;

    /// Create a new item; the server assigns the identifier.
    async fn create(&self, draft: &GameDraft) -> ApiResult<()>;

    /// Partially update an existing item.
    async fn update(&self, id: &str, draft: &GameDraft) -> ApiResult<UpdateOutcome>;

    /// Delete an item by identifier.
    async fn delete(&self, id: &str) -> ApiResult<()>;

    /// Authoritative next identifier for a category code.
    async fn next_identifier(&self, category_code: &str) -> ApiResult<String>;
}
