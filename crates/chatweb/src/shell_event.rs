use crate::{ConfigRequest, PageMessage};

/// Events posted to the main thread's event loop.
///
/// Tray, menu and web view callbacks may fire on other threads or while the
/// engine is borrowed, so they only post one of these and the event loop
/// routes it once it regains control.
#[derive(Debug, Clone)]
pub enum ShellEvent {
    /// A tray context menu item was clicked.
    Menu(String),
    /// A profile's tray icon was left-clicked.
    TrayClicked(String),
    /// A profile page posted a bridge message.
    Page {
        /// Profile owning the page.
        profile_id: String,
        /// Parsed message.
        message: PageMessage,
    },
    /// A profile page changed its document title.
    TitleChanged {
        /// Profile owning the page.
        profile_id: String,
        /// New title.
        title: String,
    },
    /// A profile page finished loading.
    PageLoaded {
        /// Profile owning the page.
        profile_id: String,
    },
    /// The configuration surface sent a request.
    Config(ConfigRequest),
}
