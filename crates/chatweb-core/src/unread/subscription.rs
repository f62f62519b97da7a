use crate::{Profile, unread};

/// The unread-detection listener bundle attached to one window.
///
/// Holds the profile snapshot taken at attach time so title events are judged
/// against the configuration the window was loaded with. A window owns at most
/// one; attaching a new one drops the old.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadSubscription {
    profile: Profile,
    generation: u64,
}

impl UnreadSubscription {
    pub(crate) fn new(profile: Profile, generation: u64) -> Self {
        Self {
            profile,
            generation,
        }
    }

    /// Profile this subscription evaluates for.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Monotonic attach counter for the owning window.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Evaluate a title observation.
    pub fn evaluate_title(&self, title: &str, current_url: &str) -> bool {
        unread::evaluate(title, &self.profile, current_url)
    }

    /// Whether a page notification from `current_url` counts.
    pub fn accepts_notification(&self, current_url: &str) -> bool {
        unread::matches_attention_targets(&self.profile, current_url)
    }
}
