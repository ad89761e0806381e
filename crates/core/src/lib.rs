//! # Gamedex Core
//!
//! Catalog state engine for the gamedex client - the single source of truth
//! for the game list shown to the user. It fetches pages from the remote
//! catalog API, applies client-side filters, and serializes create/update/
//! delete mutations through an explicit stage/confirm/cancel step.
//!
//! ## Architecture
//!
//! - `api/` - `CatalogApi` collaborator trait + reqwest-backed implementation
//! - `config` - environment-derived API endpoint and category-code map
//! - `engine/` - `CatalogStateEngine`: list state, filtering, staged mutations
//! - `ident` - client-side identifier preview (`GAME<code><seq>`)
//! - `model` - wire types for catalog items and mutation payloads
//! - `notify` - user-facing notification sink
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gamedex_core::api::HttpCatalogApi;
//! use gamedex_core::config::ApiConfig;
//! use gamedex_core::engine::CatalogStateEngine;
//! use gamedex_core::notify::TracingSink;
//! use std::sync::Arc;
//!
//! let api = Arc::new(HttpCatalogApi::new(&ApiConfig::from_env()?)?);
//! let mut engine = CatalogStateEngine::new(api, Arc::new(TracingSink));
//! engine.load_initial(12).await;
//! ```

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod ident;
pub mod model;
pub mod notify;

pub use api::{CatalogApi, HttpCatalogApi, UpdateOutcome};
pub use config::{ApiConfig, CategoryMap};
pub use engine::{CatalogState, CatalogStateEngine, Filter, Settlement, StateChange};
pub use error::{ApiError, EngineError};
pub use ident::preview_next_identifier;
pub use model::{Game, GameDraft, ImageSource};
pub use notify::{NoteKind, NotificationSink, TracingSink};
