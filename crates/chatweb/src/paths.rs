//! User data directory resolution.

use crate::{AppError, AppResult};

use chatweb_core::{CONFIG_FILE_NAME, USER_DATA_ENV};

use std::{
    fs,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use tracing::{debug, info, warn};

/// Directory name used next to the executable.
pub const PORTABLE_DIR_NAME: &str = "user_data";

/// Log directory inside the user data directory.
pub const LOG_DIR_NAME: &str = "logs";

/// Resolved on-disk locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Root of everything the application writes.
    pub user_data: PathBuf,
}

impl AppPaths {
    /// Resolve and create the user data directory from the process
    /// environment.
    #[track_caller]
    pub fn resolve() -> AppResult<Self> {
        let override_dir = std::env::var_os(USER_DATA_ENV).map(PathBuf::from);
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let platform_dir = ProjectDirs::from("com", "chatweb", "Chat Web Desktop")
            .map(|dirs| dirs.data_dir().to_path_buf());

        let candidates = candidate_dirs(override_dir, exe_dir, platform_dir);

        for dir in candidates {
            match fs::create_dir_all(&dir) {
                Ok(()) if is_writable(&dir) => {
                    info!(user_data = ?dir, "User data directory ready");
                    return Ok(Self { user_data: dir });
                }
                Ok(()) => debug!(dir = ?dir, "Directory not writable, trying next"),
                Err(e) => warn!(dir = ?dir, error = %e, "Could not create user data directory"),
            }
        }

        Err(AppError::UserData {
            reason: "no writable location found".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Profile configuration document.
    pub fn config_file(&self) -> PathBuf {
        self.user_data.join(CONFIG_FILE_NAME)
    }

    /// Rolling log files.
    pub fn log_dir(&self) -> PathBuf {
        self.user_data.join(LOG_DIR_NAME)
    }

    /// Create the log directory and return it.
    #[track_caller]
    pub fn ensure_log_dir(&self) -> AppResult<PathBuf> {
        let dir = self.log_dir();
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

/// Ordered user data candidates: explicit override, portable directory next
/// to the executable, platform data directory.
///
/// A relative override is resolved against the working directory.
pub fn candidate_dirs(
    override_dir: Option<PathBuf>,
    exe_dir: Option<PathBuf>,
    platform_dir: Option<PathBuf>,
) -> Vec<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        let dir = if dir.is_absolute() {
            dir
        } else {
            std::env::current_dir().map_or(dir.clone(), |cwd| cwd.join(&dir))
        };
        return vec![dir];
    }

    exe_dir
        .map(|d| d.join(PORTABLE_DIR_NAME))
        .into_iter()
        .chain(platform_dir)
        .collect()
}

fn is_writable(dir: &Path) -> bool {
    fs::metadata(dir).is_ok_and(|m| !m.permissions().readonly())
}
