use crate::profile::WindowBounds;

use serde::{Deserialize, Serialize};

/// A profile as written by hand or submitted by the configuration surface.
///
/// All fields are optional; [`ProfileRegistry`](crate::ProfileRegistry)
/// normalizes drafts into [`Profile`](crate::Profile)s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    /// Existing id, if the profile was saved before.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Window title.
    #[serde(default)]
    pub title: Option<String>,
    /// Tray tooltip.
    #[serde(default)]
    pub tray_title: Option<String>,
    /// Service endpoint.
    #[serde(default)]
    pub url: Option<String>,
    /// Custom user agent.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Idle icon override.
    #[serde(default)]
    pub icon_path: Option<String>,
    /// Notify icon override.
    #[serde(default)]
    pub icon_notify_path: Option<String>,
    /// Persisted geometry.
    #[serde(default)]
    pub window_bounds: Option<WindowBounds>,
    /// Unread tracking keyword filter.
    #[serde(default)]
    pub attention_keywords: Option<Vec<String>>,
}

impl From<&crate::Profile> for ProfileDraft {
    fn from(profile: &crate::Profile) -> Self {
        Self {
            id: Some(profile.id.clone()),
            name: Some(profile.name.clone()),
            title: Some(profile.title.clone()),
            tray_title: Some(profile.tray_title.clone()),
            url: Some(profile.url.clone()),
            user_agent: Some(profile.user_agent.clone()),
            icon_path: profile.icon_path.clone(),
            icon_notify_path: profile.icon_notify_path.clone(),
            window_bounds: profile.window_bounds,
            attention_keywords: Some(profile.attention_keywords.clone()),
        }
    }
}
