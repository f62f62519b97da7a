//! Icon selection.
//!
//! The engine never decodes images. It hands the host an ordered candidate
//! list and the host uses the first one that loads; built-in assets always
//! load, so resolution cannot fail.

use crate::Profile;

use std::path::{Path, PathBuf};

/// Which frame of a profile icon to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconVariant {
    /// No pending attention.
    Idle,
    /// Unread messages.
    Notify,
}

impl IconVariant {
    /// The alternate frame.
    pub fn other(self) -> Self {
        match self {
            IconVariant::Idle => IconVariant::Notify,
            IconVariant::Notify => IconVariant::Idle,
        }
    }
}

/// Where an icon will be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconPurpose {
    /// Tray icon, resized to the platform tray size.
    Tray,
    /// Window icon, used at its native size.
    Window,
}

/// One place an icon may be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    /// User-provided image file.
    File(PathBuf),
    /// Asset shipped with the application.
    BuiltIn(IconVariant),
}

/// Ordered icon candidates plus the size to render at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    /// Try in order; the first that loads wins.
    pub candidates: Vec<IconSource>,
    /// Square pixel size, or `None` to keep the image size.
    pub size: Option<u32>,
}

/// Tray icon edge length for the current platform.
pub fn tray_icon_size() -> u32 {
    if cfg!(target_os = "windows") { 16 } else { 24 }
}

/// Candidate list for `variant` of `profile`'s icon.
///
/// Order: the profile's override for the requested variant, its override for
/// the other variant, the built-in asset for the requested variant, the
/// built-in idle asset.
pub fn resolve_icon(
    profile: Option<&Profile>,
    variant: IconVariant,
    purpose: IconPurpose,
) -> IconRequest {
    let mut candidates = Vec::with_capacity(4);

    if let Some(profile) = profile {
        for wanted in [variant, variant.other()] {
            if let Some(path) = override_path(profile, wanted) {
                candidates.push(IconSource::File(path));
            }
        }
    }

    candidates.push(IconSource::BuiltIn(variant));
    if variant != IconVariant::Idle {
        candidates.push(IconSource::BuiltIn(IconVariant::Idle));
    }

    let size = match purpose {
        IconPurpose::Tray => Some(tray_icon_size()),
        IconPurpose::Window => None,
    };

    IconRequest { candidates, size }
}

fn override_path(profile: &Profile, variant: IconVariant) -> Option<PathBuf> {
    let raw = match variant {
        IconVariant::Idle => profile.icon_path.as_deref(),
        IconVariant::Notify => profile.icon_notify_path.as_deref(),
    }?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let path = Path::new(raw);
    if path.is_absolute() {
        return Some(path.to_path_buf());
    }

    // Relative overrides are resolved against the working directory.
    match std::env::current_dir() {
        Ok(cwd) => Some(cwd.join(path)),
        Err(_) => Some(path.to_path_buf()),
    }
}
