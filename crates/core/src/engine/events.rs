//! # State Change Events
//!
//! Broadcast payloads emitted after every engine state mutation so a view
//! layer can re-render without polling. Pull-style access stays available
//! through `CatalogStateEngine::state()` and `revision()`.

use serde::Serialize;

/// Which part of the catalog state changed.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// `items` was replaced, extended, or shrunk.
    Items,
    /// The active filter changed; the visible view must be recomputed.
    Filter,
    /// A staged mutation slot changed (staged, confirmed, or cancelled).
    PendingMutation,
}

/// One state mutation, in emission order.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StateChange {
    /// Monotonic revision; bumps by one per mutation.
    pub revision: u64,
    pub kind: ChangeKind,
}
