use crate::{
    ConfigDocument, Profile, ProfileDraft, WindowBounds,
    profile::{DEFAULT_PROFILE_NAME, DEFAULT_TITLE, trimmed},
};

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

/// The normalized, desired list of profiles.
///
/// Pure data: nothing here touches windows, trays or disk. Ids are unique and
/// order is preserved (the first profile is the primary one).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileRegistry {
    profiles: Vec<Profile>,
}

impl ProfileRegistry {
    /// Normalize a raw configuration document.
    ///
    /// A legacy single-profile document (top-level `url`, `title`, ...) is
    /// converted into one profile when `profiles` is empty.
    pub fn from_document(document: &ConfigDocument) -> Self {
        let mut drafts = document.profiles.clone().unwrap_or_default();

        if drafts.is_empty() {
            if let Some(legacy) = document.legacy_profile() {
                drafts.push(legacy);
            }
        }

        Self::from_drafts(&drafts)
    }

    /// Normalize a list of drafts, generating missing ids and resolving
    /// display fallbacks.
    pub fn from_drafts(drafts: &[ProfileDraft]) -> Self {
        let mut seen = HashSet::new();
        let mut profiles = Vec::with_capacity(drafts.len());

        for (idx, draft) in drafts.iter().enumerate() {
            let mut profile = normalize_profile(draft, idx);
            if !seen.insert(profile.id.clone()) {
                let replacement = generate_id(idx);
                warn!(
                    duplicate_id = %profile.id,
                    new_id = %replacement,
                    "Duplicate profile id, assigning a new one"
                );
                profile.id = replacement;
                seen.insert(profile.id.clone());
            }
            profiles.push(profile);
        }

        Self { profiles }
    }

    /// All profiles in configured order.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Look up one profile.
    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// First profile, if any.
    pub fn primary(&self) -> Option<&Profile> {
        self.profiles.first()
    }

    /// Whether a profile with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Ids in configured order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.id.as_str())
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether no profile is configured.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Replace the persisted geometry of one profile. Returns `false` when the
    /// profile is unknown.
    pub fn set_bounds(&mut self, id: &str, bounds: WindowBounds) -> bool {
        match self.profiles.iter_mut().find(|p| p.id == id) {
            Some(profile) => {
                profile.window_bounds = Some(bounds);
                true
            }
            None => false,
        }
    }

    /// Drafts that re-normalize to this registry.
    pub fn to_drafts(&self) -> Vec<ProfileDraft> {
        self.profiles.iter().map(ProfileDraft::from).collect()
    }
}

fn normalize_profile(draft: &ProfileDraft, idx: usize) -> Profile {
    let position = idx + 1;

    let id = trimmed(draft.id.as_deref()).unwrap_or_else(|| generate_id(idx));
    let raw_title = trimmed(draft.title.as_deref());
    let name = trimmed(draft.name.as_deref())
        .or_else(|| raw_title.clone())
        .unwrap_or_else(|| format!("Profile {position}"));
    let title = raw_title.unwrap_or_else(|| name.clone());

    let attention_keywords = draft
        .attention_keywords
        .iter()
        .flatten()
        .filter_map(|k| trimmed(Some(k.as_str())))
        .map(|k| k.to_lowercase())
        .collect();

    Profile {
        id,
        title: non_empty_or(title, DEFAULT_TITLE),
        tray_title: trimmed(draft.tray_title.as_deref()).unwrap_or_default(),
        name,
        url: trimmed(draft.url.as_deref()).unwrap_or_default(),
        user_agent: trimmed(draft.user_agent.as_deref()).unwrap_or_default(),
        icon_path: trimmed(draft.icon_path.as_deref()),
        icon_notify_path: trimmed(draft.icon_notify_path.as_deref()),
        window_bounds: draft.window_bounds,
        attention_keywords,
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

fn generate_id(idx: usize) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("profile-{}-{}", idx + 1, &suffix[..8])
}

impl ConfigDocument {
    pub(crate) fn legacy_profile(&self) -> Option<ProfileDraft> {
        let has_legacy = [
            &self.url,
            &self.user_agent,
            &self.title,
            &self.tray_title,
            &self.icon_path,
        ]
        .iter()
        .any(|field| trimmed(field.as_deref()).is_some());

        if !has_legacy {
            return None;
        }

        let name = trimmed(self.title.as_deref())
            .or_else(|| trimmed(self.tray_title.as_deref()))
            .unwrap_or_else(|| DEFAULT_PROFILE_NAME.to_string());

        Some(ProfileDraft {
            id: trimmed(self.id.as_deref()).or_else(|| Some("profile-1".to_string())),
            name: Some(name),
            title: self.title.clone(),
            tray_title: self.tray_title.clone(),
            url: self.url.clone(),
            user_agent: self.user_agent.clone(),
            icon_path: self.icon_path.clone(),
            ..ProfileDraft::default()
        })
    }
}
