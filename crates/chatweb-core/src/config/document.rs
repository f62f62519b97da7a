use crate::{ProfileDraft, ProfileRegistry};

use serde::{Deserialize, Serialize};

/// Raw configuration document, as stored on disk or submitted as a partial
/// update.
///
/// Only `profiles` is written back; the top-level legacy fields are read so
/// that old single-profile files keep working.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    /// Profile list. `None` in a partial update means "keep the current one".
    #[serde(default)]
    pub profiles: Option<Vec<ProfileDraft>>,
    /// Legacy single-profile id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Legacy single-profile endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Legacy single-profile user agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Legacy single-profile window title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Legacy single-profile tray title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tray_title: Option<String>,
    /// Legacy single-profile icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
}

impl ConfigDocument {
    /// Document holding exactly the given profiles.
    pub fn with_profiles(profiles: Vec<ProfileDraft>) -> Self {
        Self {
            profiles: Some(profiles),
            ..Self::default()
        }
    }

    /// Overlay `partial` on `self`: every key present in `partial` wins.
    pub fn merged_with(self, partial: ConfigDocument) -> Self {
        Self {
            profiles: partial.profiles.or(self.profiles),
            id: partial.id.or(self.id),
            url: partial.url.or(self.url),
            user_agent: partial.user_agent.or(self.user_agent),
            title: partial.title.or(self.title),
            tray_title: partial.tray_title.or(self.tray_title),
            icon_path: partial.icon_path.or(self.icon_path),
        }
    }
}

impl From<&ProfileRegistry> for ConfigDocument {
    fn from(registry: &ProfileRegistry) -> Self {
        Self::with_profiles(registry.to_drafts())
    }
}
