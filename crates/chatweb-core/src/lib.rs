//! Chat Web Core
//!
//! Reconciliation and attention engine for a desktop shell that hosts one web
//! window and one tray icon per configured profile.
//!
//! The engine owns the profile registry and the id → window / tray / timer
//! mappings; the platform is reached only through the [`Host`] traits, so
//! everything here runs (and is tested) without a display.
//!
//! # Example
//!
//! ```no_run
//! use chatweb_core::{ConfigService, Host, JsonConfigStore, Reconciler, ShellRequest};
//!
//! fn run<H: Host>(host: &mut H) {
//!     let store = JsonConfigStore::new("user_data/config.json");
//!     let mut shell = Reconciler::new(ConfigService::load(Box::new(store)));
//!
//!     if shell.start(host) == Some(ShellRequest::OpenConfig) {
//!         // show the configuration surface
//!     }
//!
//!     // on every event loop wake-up:
//!     shell.poll(host);
//! }
//! ```

mod blink;
mod clock;
mod config;
mod error;
mod icon;
mod profile;
mod reconciler;
mod tray;
mod unread;
mod window;

pub use {
    blink::{BLINK_INTERVAL, BlinkScheduler},
    clock::{Clock, Host},
    config::{
        CONFIG_FILE_NAME, ConfigDocument, ConfigService, ConfigStore, JsonConfigStore,
        MemoryConfigStore, USER_DATA_ENV,
    },
    error::{CoreError, Result as CoreResult},
    icon::{IconPurpose, IconRequest, IconSource, IconVariant, resolve_icon, tray_icon_size},
    profile::{
        DEFAULT_PROFILE_NAME, DEFAULT_TITLE, Profile, ProfileDraft,
        ProfileRegistry, WindowBounds,
    },
    reconciler::{Reconciler, ShellRequest, Timing},
    tray::{MenuAction, MenuEntry, MenuSpec, TrayBackend, TrayHandle, TrayManager, build_menu},
    unread::{
        AttentionChange, UnreadSubscription, UnreadTracker, evaluate, matches_attention_targets,
        title_indicates_unread,
    },
    window::{
        BoundsWrite, CloseOutcome, GEOMETRY_DEBOUNCE, NAVIGATION_DELAY, Placeholder,
        WindowBackend, WindowEvent, WindowHandle, WindowManager, WindowSpec, WindowState,
    },
};

#[cfg(test)]
mod tests;
