use crate::{ConfigDocument, ConfigStore, ProfileRegistry, WindowBounds};

use tracing::{error, info, instrument, warn};

/// Cached view of the profile configuration backed by a [`ConfigStore`].
///
/// The in-memory registry is always the source of truth: a failed write is
/// logged and the new registry is kept anyway.
pub struct ConfigService {
    store: Box<dyn ConfigStore>,
    registry: ProfileRegistry,
}

impl ConfigService {
    /// Load the stored document, falling back to an empty registry when it is
    /// missing or unreadable.
    #[instrument(skip(store))]
    pub fn load(store: Box<dyn ConfigStore>) -> Self {
        let registry = match store.load() {
            Ok(Some(document)) => ProfileRegistry::from_document(&document),
            Ok(None) => ProfileRegistry::default(),
            Err(e) => {
                warn!(error = %e, "Could not read config, starting with no profiles");
                ProfileRegistry::default()
            }
        };

        info!(profiles = registry.len(), "Profile registry ready");

        Self { store, registry }
    }

    /// Current registry.
    pub fn get(&self) -> &ProfileRegistry {
        &self.registry
    }

    /// Merge a partial document over the current configuration, normalize it
    /// and persist it.
    #[instrument(skip(self, partial))]
    pub fn set(&mut self, partial: ConfigDocument) -> &ProfileRegistry {
        let merged = ConfigDocument::from(&self.registry).merged_with(partial);
        self.registry = ProfileRegistry::from_document(&merged);
        self.persist();
        &self.registry
    }

    /// Drop the stored document and reset to an empty registry.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> &ProfileRegistry {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear config");
        }
        self.registry = ProfileRegistry::default();
        &self.registry
    }

    /// Persist new geometry for one profile. Unknown ids are ignored.
    #[instrument(skip(self))]
    pub fn update_bounds(&mut self, profile_id: &str, bounds: WindowBounds) {
        if self.registry.set_bounds(profile_id, bounds) {
            self.persist();
        } else {
            warn!(profile_id, "Dropping geometry for unknown profile");
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.registry) {
            error!(error = %e, "Failed to write config, keeping in-memory copy");
        }
    }
}
