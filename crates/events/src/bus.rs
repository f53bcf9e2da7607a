//! In-process revalidation bus backed by a `tokio::sync::broadcast` channel.
//!
//! Handlers publish a [`RevalidationEvent`] after a mutation commits. The
//! publish never blocks and never fails the request; delivery happens on
//! the [`Revalidator`](crate::revalidator::Revalidator) task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use vowreel_core::content::ContentKind;
use vowreel_core::types::DbId;

// ---------------------------------------------------------------------------
// RevalidationEvent
// ---------------------------------------------------------------------------

/// What happened to the content row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationAction {
    Created,
    Updated,
    Deleted,
    PublishToggled,
    FeatureToggled,
}

/// A request to recompute the listed public routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevalidationEvent {
    pub kind: ContentKind,
    pub action: MutationAction,
    pub entity_id: DbId,
    /// Public routes to recompute, without duplicates.
    pub paths: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl RevalidationEvent {
    /// Build the signal for a mutation of `kind` touching `slugs`.
    ///
    /// Pass both the old and the new slug when an update renamed the row.
    pub fn new<'a>(
        kind: ContentKind,
        action: MutationAction,
        entity_id: DbId,
        slugs: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            kind,
            action,
            entity_id,
            paths: kind.affected_paths(slugs),
            timestamp: Utc::now(),
        }
    }

    /// Add routes of related content (e.g. the venue a film was shot at).
    pub fn with_paths(mut self, extra: impl IntoIterator<Item = String>) -> Self {
        for path in extra {
            if !self.paths.contains(&path) {
                self.paths.push(path);
            }
        }
        self
    }
}

// ---------------------------------------------------------------------------
// RevalidationBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out bus for [`RevalidationEvent`]s.
///
/// Shared via `Arc<RevalidationBus>` in the application state.
pub struct RevalidationBus {
    sender: broadcast::Sender<RevalidationEvent>,
}

impl RevalidationBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest signals are dropped and slow
    /// receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a signal to all current subscribers.
    ///
    /// With no subscriber the signal is dropped.
    pub fn publish(&self, event: RevalidationEvent) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to every signal published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<RevalidationEvent> {
        self.sender.subscribe()
    }
}

impl Default for RevalidationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
