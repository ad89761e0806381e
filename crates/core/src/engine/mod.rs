//! # Catalog State Engine
//!
//! Single source of truth for the catalog list shown to the user.
//!
//! ## Flow
//!
//! ```text
//! load_initial/load_more ──> items (server order)
//! set_filter ──────────────> visible_items (derived view)
//! stage_* ──> confirm_* ───> remote call ──> reconcile + notify
//!        └──> cancel_* ────> slot cleared, no network
//! ```

pub mod catalog;
pub mod events;
pub mod state;

pub use catalog::{CatalogStateEngine, Settlement};
pub use events::{ChangeKind, StateChange};
pub use state::{CatalogState, Filter, Pending};
