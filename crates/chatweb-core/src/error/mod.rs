use error_location::ErrorLocation;
use thiserror::Error;

/// Engine errors with source location tracking.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Reading the persisted configuration failed.
    #[error("Failed to read config: {reason} {location}")]
    ConfigRead {
        /// Description of the read failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Writing the persisted configuration failed.
    #[error("Failed to write config: {reason} {location}")]
    ConfigWrite {
        /// Description of the write failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// JSON (de)serialization failed.
    #[error("Serialization error: {source} {location}")]
    Serialization {
        /// Underlying serde_json error.
        #[source]
        source: serde_json::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A native window operation failed.
    #[error("Window error for profile {profile_id}: {reason} {location}")]
    WindowBackend {
        /// Profile owning the window.
        profile_id: String,
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A native tray operation failed.
    #[error("Tray error for profile {profile_id}: {reason} {location}")]
    TrayBackend {
        /// Profile owning the tray.
        profile_id: String,
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Loading a page into a window failed.
    #[error("Navigation to {url} failed: {reason} {location}")]
    Navigation {
        /// Target URL.
        url: String,
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    Io {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for CoreError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        CoreError::Io {
            source,
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        CoreError::Serialization {
            source,
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
