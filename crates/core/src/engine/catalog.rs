//! # Engine
//!
//! Mediates between server fetches, user filters, and mutation
//! confirmations. Every remote outcome settles as exactly one of:
//! state mutation + success notification, or no mutation + failure
//! notification (with a session-expired settlement for 401s).
//!
//! Methods take `&mut self`, so the engine never has two remote calls in
//! flight; multi-threaded callers put it behind one exclusive section.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::api::{CatalogApi, UpdateOutcome};
use crate::error::{ApiError, EngineError};
use crate::model::GameDraft;
use crate::notify::{NoteKind, NotificationSink};

use super::events::{ChangeKind, StateChange};
use super::state::{CatalogState, Filter};

/// Generic message for failures the user cannot act on.
const GENERIC_FAILURE: &str = "something went wrong";

/// Capacity of the state-change broadcast channel. Laggy subscribers drop
/// old revisions and re-pull via `state()`.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// How a remote-backed operation settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The remote call succeeded and local state reflects it.
    Applied,
    /// Nothing to do: a successful no-op (filtered `load_more`, update
    /// that changed no fields).
    NoChange,
    /// The remote call failed; local items are untouched.
    Rejected,
    /// The session is no longer accepted. The surrounding shell should
    /// send the user back to login.
    SessionExpired,
}

impl Settlement {
    /// True when the caller must re-authenticate.
    pub fn session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

/// Single source of truth for the catalog list.
pub struct CatalogStateEngine {
    api: Arc<dyn CatalogApi>,
    sink: Arc<dyn NotificationSink>,
    state: CatalogState,
    revision: u64,
    changes: broadcast::Sender<StateChange>,
}

impl CatalogStateEngine {
    /// Engine with empty state; populate with `load_initial`.
    pub fn new(api: Arc<dyn CatalogApi>, sink: Arc<dyn NotificationSink>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            api,
            sink,
            state: CatalogState::default(),
            revision: 0,
            changes,
        }
    }

    /// Current state, pull-style.
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Monotonic revision counter; bumps once per state mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Subscribe to state-change events.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.changes.subscribe()
    }

    fn bump(&mut self, kind: ChangeKind) {
        self.revision += 1;
        // No subscribers is fine; pull-style callers read state() directly.
        let _ = self.changes.send(StateChange {
            revision: self.revision,
            kind,
        });
    }

    /// Translate a remote failure into a notification and a settlement.
    /// Never mutates `items`.
    fn report_failure(&self, err: &ApiError) -> Settlement {
        match err {
            ApiError::Unauthorized => {
                self.sink
                    .notify(NoteKind::Error, "session expired, please log in again");
                Settlement::SessionExpired
            }
            ApiError::Validation { message } => {
                self.sink.notify(NoteKind::Error, message);
                Settlement::Rejected
            }
            ApiError::Server { message } => {
                tracing::error!("catalog api server failure: {message}");
                self.sink.notify(NoteKind::Error, GENERIC_FAILURE);
                Settlement::Rejected
            }
            ApiError::Network { message } => {
                tracing::warn!("catalog api unreachable: {message}");
                self.sink.notify(NoteKind::Error, GENERIC_FAILURE);
                Settlement::Rejected
            }
        }
    }

    // === Loading ===

    /// Fetch the first page and replace `items` with it.
    ///
    /// On failure `items` is left untouched and the failure is notified;
    /// a 401 settles as `SessionExpired`.
    pub async fn load_initial(&mut self, page_size: u64) -> Settlement {
        let result = self.api.fetch_page(0, page_size).await;
        match result {
            Ok(games) => {
                self.state.items = games;
                self.bump(ChangeKind::Items);
                Settlement::Applied
            }
            Err(err) => self.report_failure(&err),
        }
    }

    /// Fetch the next page at `offset = items.len()` and append it.
    ///
    /// A no-op while a filter is active: pagination and filtering are
    /// mutually exclusive, matching the policy that the load-more
    /// affordance is hidden whenever a filter is set. The caller
    /// guarantees the server returns a disjoint page; no de-duplication
    /// happens here.
    pub async fn load_more(&mut self, page_size: u64) -> Settlement {
        if !self.state.filter.is_empty() {
            return Settlement::NoChange;
        }
        let offset = self.state.items.len() as u64;
        let result = self.api.fetch_page(offset, page_size).await;
        match result {
            Ok(games) => {
                self.state.items.extend(games);
                self.bump(ChangeKind::Items);
                Settlement::Applied
            }
            Err(err) => self.report_failure(&err),
        }
    }

    // === Filtering ===

    /// Replace the filter atomically; `items` is untouched and the visible
    /// view derives from the new filter. Empty strings count as absent.
    pub fn set_filter(
        &mut self,
        category_prefix: Option<String>,
        name_substring: Option<String>,
    ) {
        self.state.filter = Filter {
            category_prefix: category_prefix.filter(|s| !s.is_empty()),
            name_substring: name_substring.filter(|s| !s.is_empty()),
        };
        self.bump(ChangeKind::Filter);
    }

    /// Drop both predicates.
    pub fn clear_filter(&mut self) {
        self.set_filter(None, None);
    }

    // === Deletion: stage -> confirm | cancel ===

    /// Stage an item for deletion. Pure local state change.
    pub fn stage_deletion(&mut self, id: &str) -> Result<(), EngineError> {
        if self.state.pending.deletion.is_some() {
            return Err(EngineError::invalid_state("a deletion is already staged"));
        }
        if !self.state.contains(id) {
            return Err(EngineError::invalid_state(format!("unknown item: {id}")));
        }
        self.state.pending.deletion = Some(id.to_string());
        self.bump(ChangeKind::PendingMutation);
        Ok(())
    }

    /// Issue the remote delete for the staged identifier.
    ///
    /// The item leaves `items` only after the server confirms. The slot is
    /// cleared on every settlement; a failed attempt is abandoned, not
    /// retried.
    pub async fn confirm_deletion(&mut self) -> Result<Settlement, EngineError> {
        let id = self
            .state
            .pending
            .deletion
            .take()
            .ok_or_else(|| EngineError::invalid_state("no deletion is staged"))?;
        self.bump(ChangeKind::PendingMutation);

        let result = self.api.delete(&id).await;
        let settlement = match result {
            Ok(()) => {
                self.state.items.retain(|game| game.id != id);
                self.bump(ChangeKind::Items);
                self.sink
                    .notify(NoteKind::Success, "Successfully deleted game!");
                Settlement::Applied
            }
            Err(err) => self.report_failure(&err),
        };
        Ok(settlement)
    }

    /// Clear the staged deletion without any network call. Idempotent.
    pub fn cancel_deletion(&mut self) {
        if self.state.pending.deletion.take().is_some() {
            self.bump(ChangeKind::PendingMutation);
        }
    }

    // === Creation: stage -> confirm | cancel ===

    /// Capture a create payload without touching `items`.
    pub fn stage_creation(&mut self, draft: GameDraft) -> Result<(), EngineError> {
        if self.state.pending.creation.is_some() {
            return Err(EngineError::invalid_state("a creation is already staged"));
        }
        self.state.pending.creation = Some(draft);
        self.bump(ChangeKind::PendingMutation);
        Ok(())
    }

    /// Issue the remote create for the staged draft.
    ///
    /// On success the new item is NOT appended locally: the server owns
    /// the generated identifier, so the list is refreshed by a later
    /// `load_initial`/`load_more` instead of local synthesis.
    pub async fn confirm_creation(&mut self) -> Result<Settlement, EngineError> {
        let draft = self
            .state
            .pending
            .creation
            .take()
            .ok_or_else(|| EngineError::invalid_state("no creation is staged"))?;
        self.bump(ChangeKind::PendingMutation);

        let result = self.api.create(&draft).await;
        let settlement = match result {
            Ok(()) => {
                self.sink
                    .notify(NoteKind::Success, "Successfully added game!");
                Settlement::Applied
            }
            Err(err) => self.report_failure(&err),
        };
        Ok(settlement)
    }

    /// Clear the staged creation without any network call. Idempotent.
    pub fn cancel_creation(&mut self) {
        if self.state.pending.creation.take().is_some() {
            self.bump(ChangeKind::PendingMutation);
        }
    }

    // === Update: stage -> confirm | cancel ===

    /// Capture a partial-update payload for an already-loaded item.
    pub fn stage_update(&mut self, id: &str, draft: GameDraft) -> Result<(), EngineError> {
        if self.state.pending.update.is_some() {
            return Err(EngineError::invalid_state("an update is already staged"));
        }
        if !self.state.contains(id) {
            return Err(EngineError::invalid_state(format!("unknown item: {id}")));
        }
        self.state.pending.update = Some((id.to_string(), draft));
        self.bump(ChangeKind::PendingMutation);
        Ok(())
    }

    /// Issue the remote partial update for the staged payload.
    ///
    /// `NotModified` settles as a successful no-op, distinct from failure.
    /// Loaded items are not patched locally; the shell reloads.
    pub async fn confirm_update(&mut self) -> Result<Settlement, EngineError> {
        let (id, draft) = self
            .state
            .pending
            .update
            .take()
            .ok_or_else(|| EngineError::invalid_state("no update is staged"))?;
        self.bump(ChangeKind::PendingMutation);

        let result = self.api.update(&id, &draft).await;
        let settlement = match result {
            Ok(UpdateOutcome::Updated) => {
                self.sink
                    .notify(NoteKind::Success, "Successfully updated game!");
                Settlement::Applied
            }
            Ok(UpdateOutcome::NotModified) => {
                self.sink.notify(NoteKind::Success, "Nothing to update.");
                Settlement::NoChange
            }
            Err(err) => self.report_failure(&err),
        };
        Ok(settlement)
    }

    /// Clear the staged update without any network call. Idempotent.
    pub fn cancel_update(&mut self) {
        if self.state.pending.update.take().is_some() {
            self.bump(ChangeKind::PendingMutation);
        }
    }
}
