use crate::profile::DEFAULT_TITLE;

use serde::{Deserialize, Serialize};

/// Last known window geometry in physical pixels: outer position, inner size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

/// One normalized profile.
///
/// Name and title are resolved through their fallback chains. The tray title
/// is stored only when set explicitly; [`Profile::tray_tooltip`] resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Stable identifier, generated once.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Window title.
    pub title: String,
    /// Explicit tray tooltip. Empty means "follow the window title".
    pub tray_title: String,
    /// Service endpoint. Empty means "not configured yet".
    pub url: String,
    /// Custom user agent. Empty means the web view default.
    pub user_agent: String,
    /// Override for the idle icon.
    pub icon_path: Option<String>,
    /// Override for the notify icon.
    pub icon_notify_path: Option<String>,
    /// Geometry persisted from the last move or resize.
    pub window_bounds: Option<WindowBounds>,
    /// Lowercased substrings that scope unread tracking to matching URLs.
    #[serde(default)]
    pub attention_keywords: Vec<String>,
}

impl Profile {
    /// Title applied to the profile's window.
    pub fn window_title(&self) -> &str {
        if self.title.is_empty() {
            if self.name.is_empty() { DEFAULT_TITLE } else { &self.name }
        } else {
            &self.title
        }
    }

    /// Tooltip applied to the profile's tray.
    pub fn tray_tooltip(&self) -> &str {
        if self.tray_title.is_empty() {
            self.window_title()
        } else {
            &self.tray_title
        }
    }

    /// Label used for this profile in menus.
    pub fn menu_label(&self) -> &str {
        if self.name.is_empty() {
            self.window_title()
        } else {
            &self.name
        }
    }

    /// Configured endpoint, if any.
    pub fn endpoint(&self) -> Option<&str> {
        Some(self.url.as_str()).filter(|u| !u.is_empty())
    }

    /// Configured user agent, if any.
    pub fn custom_user_agent(&self) -> Option<&str> {
        Some(self.user_agent.as_str()).filter(|ua| !ua.is_empty())
    }
}
