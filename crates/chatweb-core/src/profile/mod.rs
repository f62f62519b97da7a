mod draft;
#[allow(clippy::module_inception)]
mod profile;
mod registry;

pub use {
    draft::ProfileDraft,
    profile::{Profile, WindowBounds},
    registry::ProfileRegistry,
};

/// Window title used when a profile has neither title nor name.
pub const DEFAULT_TITLE: &str = "Chat Web Desktop";
/// Profile name given to a converted legacy single-profile document.
pub const DEFAULT_PROFILE_NAME: &str = "Chat Profile";

pub(crate) fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
