use crate::{Profile, UnreadSubscription, WindowBounds};

use std::time::Instant;

/// Lifecycle state of a profile's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// No live window (never shown, or destroyed).
    Absent,
    /// Shown on screen.
    Visible,
    /// Alive but hidden to the tray.
    Hidden,
}

/// Result of the close path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Window hidden to the tray.
    Hidden,
    /// Window torn down.
    Destroyed,
    /// No window for that profile.
    Missing,
}

#[derive(Debug, Clone)]
pub(crate) struct PendingBounds {
    pub(crate) deadline: Instant,
    pub(crate) bounds: WindowBounds,
}

#[derive(Debug, Clone)]
pub(crate) struct PendingNavigation {
    pub(crate) deadline: Instant,
    pub(crate) url: String,
    pub(crate) user_agent: Option<String>,
}

/// A live window exclusively owned by the [`WindowManager`](crate::WindowManager).
pub struct WindowHandle<W> {
    pub(crate) native: W,
    pub(crate) visible: bool,
    pub(crate) force_close: bool,
    pub(crate) subscription: Option<UnreadSubscription>,
    pub(crate) attach_count: u64,
    pub(crate) pending_bounds: Option<PendingBounds>,
    pub(crate) pending_navigation: Option<PendingNavigation>,
    pub(crate) showing_placeholder: bool,
}

impl<W> WindowHandle<W> {
    pub(crate) fn new(native: W) -> Self {
        Self {
            native,
            visible: true,
            force_close: false,
            subscription: None,
            attach_count: 0,
            pending_bounds: None,
            pending_navigation: None,
            showing_placeholder: false,
        }
    }

    /// Native window resource.
    pub fn native(&self) -> &W {
        &self.native
    }

    /// Visible or hidden.
    pub fn state(&self) -> WindowState {
        if self.visible {
            WindowState::Visible
        } else {
            WindowState::Hidden
        }
    }

    /// Whether the next close destroys instead of hiding.
    pub fn force_close(&self) -> bool {
        self.force_close
    }

    /// Active unread-detection subscription.
    pub fn subscription(&self) -> Option<&UnreadSubscription> {
        self.subscription.as_ref()
    }

    /// Whether a geometry write is waiting for its debounce delay.
    pub fn has_pending_bounds(&self) -> bool {
        self.pending_bounds.is_some()
    }

    /// Whether the endpoint navigation is still scheduled.
    pub fn has_pending_navigation(&self) -> bool {
        self.pending_navigation.is_some()
    }

    /// Whether the built-in placeholder is up instead of the profile's page.
    /// Its text is not page content and never feeds unread detection.
    pub fn is_showing_placeholder(&self) -> bool {
        self.showing_placeholder
    }

    /// Replace the unread subscription, dropping the previous one first.
    pub(crate) fn attach(&mut self, profile: Profile) -> &UnreadSubscription {
        self.dispose_subscription();
        self.attach_count += 1;
        self.subscription
            .insert(UnreadSubscription::new(profile, self.attach_count))
    }

    /// Drop the unread subscription. Safe to call when none is attached.
    pub(crate) fn dispose_subscription(&mut self) -> Option<UnreadSubscription> {
        self.subscription.take()
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        let bounds = self.pending_bounds.as_ref().map(|p| p.deadline);
        let navigation = self.pending_navigation.as_ref().map(|p| p.deadline);
        match (bounds, navigation) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
