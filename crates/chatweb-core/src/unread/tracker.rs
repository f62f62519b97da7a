use std::collections::HashMap;

use tracing::debug;

/// Emitted on every Idle/Unread transition, and only on transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttentionChange {
    /// Profile whose state changed.
    pub profile_id: String,
    /// New state.
    pub unread: bool,
}

/// Per-profile unread flags.
#[derive(Debug, Default)]
pub struct UnreadTracker {
    states: HashMap<String, bool>,
}

impl UnreadTracker {
    /// Empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Route an evaluation result to [`set_unread`](Self::set_unread) or
    /// [`clear_unread`](Self::clear_unread).
    pub fn apply(&mut self, profile_id: &str, unread: bool) -> Option<AttentionChange> {
        if unread {
            self.set_unread(profile_id)
        } else {
            self.clear_unread(profile_id)
        }
    }

    /// Mark a profile unread. No-op when it already is.
    pub fn set_unread(&mut self, profile_id: &str) -> Option<AttentionChange> {
        let previous = self.states.insert(profile_id.to_string(), true);
        if previous == Some(true) {
            return None;
        }
        debug!(profile_id, "Profile became unread");
        Some(AttentionChange {
            profile_id: profile_id.to_string(),
            unread: true,
        })
    }

    /// Clear a profile's unread flag. No-op when it is already idle.
    pub fn clear_unread(&mut self, profile_id: &str) -> Option<AttentionChange> {
        if self.states.remove(profile_id) != Some(true) {
            return None;
        }
        debug!(profile_id, "Profile became idle");
        Some(AttentionChange {
            profile_id: profile_id.to_string(),
            unread: false,
        })
    }

    /// Current state.
    pub fn is_unread(&self, profile_id: &str) -> bool {
        self.states.get(profile_id).copied().unwrap_or(false)
    }

    /// Every profile currently unread.
    pub fn unread_ids(&self) -> impl Iterator<Item = &str> {
        self.states
            .iter()
            .filter(|(_, unread)| **unread)
            .map(|(id, _)| id.as_str())
    }
}
