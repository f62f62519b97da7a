use crate::{ConfigDocument, CoreError, CoreResult, ProfileRegistry};

use std::{
    cell::{Cell, RefCell},
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

/// Persistence for the profile document.
pub trait ConfigStore {
    /// Read the stored document. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> CoreResult<Option<ConfigDocument>>;

    /// Persist the normalized registry as `{"profiles": [...]}`.
    fn save(&self, registry: &ProfileRegistry) -> CoreResult<()>;

    /// Remove the stored document. Removing a missing document succeeds.
    fn clear(&self) -> CoreResult<()>;
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[track_caller]
fn write_error(path: &Path, e: &std::io::Error) -> CoreError {
    CoreError::ConfigWrite {
        reason: format!("{}: {}", path.display(), e),
        location: ErrorLocation::from(Location::caller()),
    }
}

impl ConfigStore for JsonConfigStore {
    #[track_caller]
    #[instrument(skip(self), fields(path = ?self.path))]
    fn load(&self) -> CoreResult<Option<ConfigDocument>> {
        if !self.path.exists() {
            debug!("No config file yet");
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| CoreError::ConfigRead {
            reason: format!("Failed to read {}: {}", self.path.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let document = serde_json::from_str(&contents).map_err(|e| CoreError::ConfigRead {
            reason: format!("Failed to parse {}: {}", self.path.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!("Configuration loaded");
        Ok(Some(document))
    }

    /// Writes to a temporary file first, then renames over the target so a
    /// crash mid-write never leaves a truncated document.
    #[track_caller]
    #[instrument(skip(self, registry), fields(path = ?self.path))]
    fn save(&self, registry: &ProfileRegistry) -> CoreResult<()> {
        let contents = serde_json::to_string_pretty(registry)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");

        let mut temp_file =
            fs::File::create(&temp_path).map_err(|e| write_error(&temp_path, &e))?;
        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| write_error(&temp_path, &e))?;
        temp_file
            .sync_all()
            .map_err(|e| write_error(&temp_path, &e))?;

        fs::rename(&temp_path, &self.path).map_err(|e| CoreError::ConfigWrite {
            reason: format!("Failed to replace {}: {}", self.path.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(profiles = registry.len(), "Configuration saved (atomic write)");
        Ok(())
    }

    #[track_caller]
    #[instrument(skip(self), fields(path = ?self.path))]
    fn clear(&self) -> CoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Configuration cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::ConfigWrite {
                reason: format!("Failed to remove {}: {}", self.path.display(), e),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// In-memory store, used by tests and as a scratch store when no writable
/// location exists.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    contents: RefCell<Option<String>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryConfigStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with raw JSON text.
    pub fn with_contents(json: impl Into<String>) -> Self {
        let store = Self::default();
        *store.contents.borrow_mut() = Some(json.into());
        store
    }

    /// Currently stored JSON text.
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    /// Make subsequent saves fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful saves.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl ConfigStore for MemoryConfigStore {
    #[track_caller]
    fn load(&self) -> CoreResult<Option<ConfigDocument>> {
        match self.contents.borrow().as_deref() {
            None => Ok(None),
            Some(json) => serde_json::from_str(json).map(Some).map_err(|e| {
                CoreError::ConfigRead {
                    reason: format!("Failed to parse stored config: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                }
            }),
        }
    }

    #[track_caller]
    fn save(&self, registry: &ProfileRegistry) -> CoreResult<()> {
        if self.fail_writes.get() {
            return Err(CoreError::ConfigWrite {
                reason: "store is read-only".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        let json = serde_json::to_string_pretty(registry)?;
        *self.contents.borrow_mut() = Some(json);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn clear(&self) -> CoreResult<()> {
        *self.contents.borrow_mut() = None;
        Ok(())
    }
}

impl<S: ConfigStore + ?Sized> ConfigStore for std::rc::Rc<S> {
    fn load(&self) -> CoreResult<Option<ConfigDocument>> {
        (**self).load()
    }

    fn save(&self, registry: &ProfileRegistry) -> CoreResult<()> {
        (**self).save(registry)
    }

    fn clear(&self) -> CoreResult<()> {
        (**self).clear()
    }
}
