//! Ordered list of uploaded assets held by the admin client.
//!
//! The gallery editor keeps `{url, key, preview}` entries in memory while the
//! operator arranges them; nothing is persisted until the owning film or
//! venue is saved. These are plain array manipulations: an out-of-range index
//! or a move past either end leaves the list untouched.

use serde::{Deserialize, Serialize};

/// One entry of a client-side asset list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub url: String,
    pub key: String,
    /// Client-side preview handle (e.g. an object URL). Opaque to the server.
    #[serde(default)]
    pub preview: Option<String>,
}

/// A single arrangement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "index")]
pub enum ArrangeAction {
    MoveUp(usize),
    MoveDown(usize),
    Remove(usize),
}

/// Swap the entry at `index` with the one before it.
///
/// Returns `true` if the list changed.
pub fn move_up<T>(items: &mut [T], index: usize) -> bool {
    if index == 0 || index >= items.len() {
        return false;
    }
    items.swap(index - 1, index);
    true
}

/// Swap the entry at `index` with the one after it.
///
/// Returns `true` if the list changed.
pub fn move_down<T>(items: &mut [T], index: usize) -> bool {
    if index >= items.len().saturating_sub(1) {
        return false;
    }
    items.swap(index, index + 1);
    true
}

/// Remove and return the entry at `index`, if any.
pub fn remove<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    (index < items.len()).then(|| items.remove(index))
}

/// Apply one [`ArrangeAction`] and return the resulting list.
pub fn apply(mut items: Vec<AssetEntry>, action: ArrangeAction) -> Vec<AssetEntry> {
    match action {
        ArrangeAction::MoveUp(index) => {
            move_up(&mut items, index);
        }
        ArrangeAction::MoveDown(index) => {
            move_down(&mut items, index);
        }
        ArrangeAction::Remove(index) => {
            remove(&mut items, index);
        }
    }
    items
}
