use crate::{
    CoreResult, IconPurpose, IconVariant, MenuSpec, Profile, ProfileRegistry, TrayBackend,
    build_menu, resolve_icon,
};

use std::collections::HashMap;

use tracing::{info, instrument, warn};

/// A live tray exclusively owned by the [`TrayManager`].
pub struct TrayHandle<T> {
    native: T,
    menu: MenuSpec,
    icon: IconVariant,
}

impl<T> TrayHandle<T> {
    /// Native tray resource.
    pub fn native(&self) -> &T {
        &self.native
    }

    /// Menu last applied.
    pub fn menu(&self) -> &MenuSpec {
        &self.menu
    }

    /// Icon frame last painted.
    pub fn icon(&self) -> IconVariant {
        self.icon
    }
}

/// Owns the profile id → live tray mapping.
pub struct TrayManager<T> {
    trays: HashMap<String, TrayHandle<T>>,
}

impl<T> Default for TrayManager<T> {
    fn default() -> Self {
        Self {
            trays: HashMap::new(),
        }
    }
}

impl<T> TrayManager<T> {
    /// Empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Live tray for a profile.
    pub fn get(&self, profile_id: &str) -> Option<&TrayHandle<T>> {
        self.trays.get(profile_id)
    }

    /// Whether a live tray exists.
    pub fn contains(&self, profile_id: &str) -> bool {
        self.trays.contains_key(profile_id)
    }

    /// Ids with a live tray, in no particular order.
    pub fn ids(&self) -> Vec<String> {
        self.trays.keys().cloned().collect()
    }

    /// Number of live trays.
    pub fn len(&self) -> usize {
        self.trays.len()
    }

    /// Whether no tray is alive.
    pub fn is_empty(&self) -> bool {
        self.trays.is_empty()
    }

    /// Return the profile's tray, creating it (idle icon, tooltip, menu) when
    /// missing. Returns `true` when a tray was created.
    #[instrument(skip(self, host, profile, registry), fields(profile_id = %profile.id))]
    pub fn get_or_create<H>(
        &mut self,
        host: &mut H,
        profile: &Profile,
        registry: &ProfileRegistry,
    ) -> CoreResult<bool>
    where
        H: TrayBackend<Tray = T>,
    {
        if self.trays.contains_key(&profile.id) {
            return Ok(false);
        }

        let icon = resolve_icon(Some(profile), IconVariant::Idle, IconPurpose::Tray);
        let native = host.create_tray(&profile.id, profile.tray_tooltip(), &icon)?;

        let menu = build_menu(profile, registry.profiles());
        if let Err(e) = host.set_tray_menu(&native, &menu) {
            warn!(error = %e, "Failed to set tray menu");
        }

        self.trays.insert(
            profile.id.clone(),
            TrayHandle {
                native,
                menu,
                icon: IconVariant::Idle,
            },
        );

        info!("Tray created");
        Ok(true)
    }

    /// Paint one frame on a profile's tray. Returns `false` when the profile
    /// has no tray; paint failures are logged.
    pub fn apply_icon<H>(
        &mut self,
        host: &mut H,
        profile_id: &str,
        profile: Option<&Profile>,
        variant: IconVariant,
    ) -> bool
    where
        H: TrayBackend<Tray = T>,
    {
        let Some(handle) = self.trays.get_mut(profile_id) else {
            return false;
        };

        let icon = resolve_icon(profile, variant, IconPurpose::Tray);
        match host.set_tray_icon(&handle.native, &icon) {
            Ok(()) => handle.icon = variant,
            Err(e) => warn!(profile_id, error = %e, "Could not apply tray icon"),
        }
        true
    }

    /// Paint every tray in the registry with the frame chosen by `frame`.
    pub fn apply_icon_all<H, F>(&mut self, host: &mut H, registry: &ProfileRegistry, frame: F)
    where
        H: TrayBackend<Tray = T>,
        F: Fn(&str) -> IconVariant,
    {
        for profile in registry.profiles() {
            self.apply_icon(host, &profile.id, Some(profile), frame(&profile.id));
        }
    }

    /// Rebuild tooltip and menu for one profile's tray.
    pub fn apply_menu<H>(&mut self, host: &mut H, profile: &Profile, registry: &ProfileRegistry)
    where
        H: TrayBackend<Tray = T>,
    {
        let Some(handle) = self.trays.get_mut(&profile.id) else {
            return;
        };

        if let Err(e) = host.set_tray_tooltip(&handle.native, profile.tray_tooltip()) {
            warn!(profile_id = %profile.id, error = %e, "Could not apply tray tooltip");
        }

        let menu = build_menu(profile, registry.profiles());
        match host.set_tray_menu(&handle.native, &menu) {
            Ok(()) => handle.menu = menu,
            Err(e) => warn!(profile_id = %profile.id, error = %e, "Failed to set tray menu"),
        }
    }

    /// Rebuild tooltip and menu for every tray in the registry.
    pub fn apply_menu_all<H>(&mut self, host: &mut H, registry: &ProfileRegistry)
    where
        H: TrayBackend<Tray = T>,
    {
        for profile in registry.profiles() {
            self.apply_menu(host, profile, registry);
        }
    }

    /// Remove a profile's tray. Returns `false` when there was none.
    pub fn destroy<H>(&mut self, host: &mut H, profile_id: &str) -> bool
    where
        H: TrayBackend<Tray = T>,
    {
        match self.trays.remove(profile_id) {
            Some(handle) => {
                host.destroy_tray(handle.native);
                info!(profile_id, "Tray destroyed");
                true
            }
            None => false,
        }
    }

    /// Remove every tray.
    pub fn destroy_all<H>(&mut self, host: &mut H)
    where
        H: TrayBackend<Tray = T>,
    {
        for (_, handle) in self.trays.drain() {
            host.destroy_tray(handle.native);
        }
    }
}
