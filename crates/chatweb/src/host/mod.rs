//! Native implementation of the engine's host traits.
//!
//! A [`NativeHost`] is built per event-loop callback around the borrowed
//! window target, so the engine can create windows without owning the loop.

mod tray;
mod window;

pub use window::NativeWindow;

use crate::ShellEvent;

use chatweb_core::{Clock, CoreError};

use std::{collections::HashMap, panic::Location, time::Instant};

use error_location::ErrorLocation;

use tao::{
    event_loop::{EventLoopProxy, EventLoopWindowTarget},
    window::WindowId,
};

/// Window backend failure located at the caller.
#[track_caller]
pub(crate) fn window_error(profile_id: &str, reason: impl Into<String>) -> CoreError {
    CoreError::WindowBackend {
        profile_id: profile_id.to_string(),
        reason: reason.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Navigation failure located at the caller.
#[track_caller]
pub(crate) fn navigation_error(url: &str, reason: impl Into<String>) -> CoreError {
    CoreError::Navigation {
        url: url.to_string(),
        reason: reason.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Host-side bookkeeping that outlives a single callback.
#[derive(Debug, Default)]
pub struct HostState {
    window_profiles: HashMap<WindowId, String>,
    titles: HashMap<String, String>,
}

impl HostState {
    /// Profile owning a native window.
    pub fn profile_for(&self, window_id: WindowId) -> Option<&str> {
        self.window_profiles.get(&window_id).map(String::as_str)
    }

    /// Remember the page title last reported for a profile.
    pub fn record_title(&mut self, profile_id: &str, title: &str) {
        self.titles
            .insert(profile_id.to_string(), title.to_string());
    }
}

/// Window, tray and clock backend for one event-loop callback.
pub struct NativeHost<'a> {
    target: &'a EventLoopWindowTarget<ShellEvent>,
    proxy: &'a EventLoopProxy<ShellEvent>,
    state: &'a mut HostState,
}

impl<'a> NativeHost<'a> {
    /// Wrap the loop's window target for the duration of a callback.
    pub fn new(
        target: &'a EventLoopWindowTarget<ShellEvent>,
        proxy: &'a EventLoopProxy<ShellEvent>,
        state: &'a mut HostState,
    ) -> Self {
        Self {
            target,
            proxy,
            state,
        }
    }
}

impl Clock for NativeHost<'_> {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
