//! Convergence of live windows and trays with the profile registry.

use crate::{
    AttentionChange, BLINK_INTERVAL, BlinkScheduler, CloseOutcome, ConfigDocument, ConfigService,
    Host, IconVariant, MenuAction, Profile, ProfileRegistry, TrayManager, UnreadTracker,
    WindowEvent, WindowManager, GEOMETRY_DEBOUNCE, NAVIGATION_DELAY,
};

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

/// Timer settings for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Trailing delay before geometry is persisted.
    pub geometry_debounce: Duration,
    /// Delay between placeholder and endpoint navigation.
    pub navigation_delay: Duration,
    /// Time between blink frames.
    pub blink_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            geometry_debounce: GEOMETRY_DEBOUNCE,
            navigation_delay: NAVIGATION_DELAY,
            blink_interval: BLINK_INTERVAL,
        }
    }
}

/// Work the engine needs the presentation layer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellRequest {
    /// Open (or focus) the configuration surface.
    OpenConfig,
    /// Leave the event loop.
    Exit,
}

/// Drives windows, trays, unread tracking and blinking from the registry.
///
/// Every entry point is idempotent and infallible: per-profile failures are
/// logged and the remaining profiles still converge.
pub struct Reconciler<W, T> {
    config: ConfigService,
    windows: WindowManager<W>,
    trays: TrayManager<T>,
    unread: UnreadTracker,
    blink: BlinkScheduler,
    quitting: bool,
    last_active: Option<String>,
}

impl<W, T> Reconciler<W, T> {
    /// Engine with default timers.
    pub fn new(config: ConfigService) -> Self {
        Self::with_timing(config, Timing::default())
    }

    /// Engine with explicit timers.
    pub fn with_timing(config: ConfigService, timing: Timing) -> Self {
        Self {
            config,
            windows: WindowManager::new(timing.geometry_debounce, timing.navigation_delay),
            trays: TrayManager::new(),
            unread: UnreadTracker::new(),
            blink: BlinkScheduler::new(timing.blink_interval),
            quitting: false,
            last_active: None,
        }
    }

    /// Desired profiles.
    pub fn registry(&self) -> &ProfileRegistry {
        self.config.get()
    }

    /// Live windows.
    pub fn windows(&self) -> &WindowManager<W> {
        &self.windows
    }

    /// Live trays.
    pub fn trays(&self) -> &TrayManager<T> {
        &self.trays
    }

    /// Unread flags.
    pub fn unread(&self) -> &UnreadTracker {
        &self.unread
    }

    /// Blink timers.
    pub fn blink(&self) -> &BlinkScheduler {
        &self.blink
    }

    /// Whether closing a window now destroys it.
    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    /// Profile most recently shown or focused.
    pub fn last_active(&self) -> Option<&str> {
        self.last_active.as_deref()
    }

    /// Earliest timer deadline across windows and blink timers.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.windows.next_deadline(), self.blink.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Initial convergence. Asks for the configuration surface when no
    /// profile is configured.
    #[instrument(skip(self, host))]
    pub fn start<H>(&mut self, host: &mut H) -> Option<ShellRequest>
    where
        H: Host<Window = W, Tray = T>,
    {
        self.sync_windows(host, true);
        self.sync_trays(host);
        self.update_attention(host);

        info!(profiles = self.config.get().len(), "Shell started");

        self.config
            .get()
            .is_empty()
            .then_some(ShellRequest::OpenConfig)
    }

    /// Destroy windows of removed profiles, then create missing windows (when
    /// `create_missing`) and reload existing ones.
    #[instrument(skip(self, host))]
    pub fn sync_windows<H>(&mut self, host: &mut H, create_missing: bool)
    where
        H: Host<Window = W, Tray = T>,
    {
        let registry = self.config.get().clone();
        let now = host.now();

        for id in self.windows.ids() {
            if !registry.contains(&id) {
                self.destroy_window(host, &id);
            }
        }

        for profile in registry.profiles() {
            if self.windows.contains(&profile.id) {
                self.windows.reload(host, profile, now);
                self.reattach_unread(host, profile);
            } else if create_missing {
                match self.windows.create(host, profile, now) {
                    Ok(()) => self.reattach_unread(host, profile),
                    Err(e) => warn!(profile_id = %profile.id, error = %e, "Skipping window"),
                }
            }
        }

        debug!(live = self.windows.len(), "Windows synced");
    }

    /// Destroy trays of removed profiles, create missing trays and reapply
    /// icon, tooltip and menu on existing ones.
    #[instrument(skip(self, host))]
    pub fn sync_trays<H>(&mut self, host: &mut H)
    where
        H: Host<Window = W, Tray = T>,
    {
        let registry = self.config.get().clone();

        for id in self.trays.ids() {
            if !registry.contains(&id) {
                self.destroy_tray(host, &id);
            }
        }

        for profile in registry.profiles() {
            if self.trays.contains(&profile.id) {
                let frame = self.current_frame(&profile.id);
                self.trays
                    .apply_icon(host, &profile.id, Some(profile), frame);
                self.trays.apply_menu(host, profile, &registry);
            } else if let Err(e) = self.trays.get_or_create(host, profile, &registry) {
                warn!(profile_id = %profile.id, error = %e, "Skipping tray");
            }
        }

        debug!(live = self.trays.len(), "Trays synced");
    }

    /// Reapply tooltip, menu and current icon frame on every tray.
    pub fn refresh_trays<H>(&mut self, host: &mut H)
    where
        H: Host<Window = W, Tray = T>,
    {
        let blink = &self.blink;
        let registry = self.config.get();
        self.trays.apply_menu_all(host, registry);
        self.trays.apply_icon_all(host, registry, |id| {
            blink.frame(id).unwrap_or(IconVariant::Idle)
        });
    }

    /// Bring blinking in line with the unread flags of every tray.
    pub fn update_attention<H>(&mut self, host: &mut H)
    where
        H: Host<Window = W, Tray = T>,
    {
        let now = host.now();
        let mut ids = self.trays.ids();
        for id in self.unread.unread_ids() {
            if !ids.iter().any(|known| known == id) {
                ids.push(id.to_string());
            }
        }

        let registry = self.config.get();
        for id in ids {
            if self.unread.is_unread(&id) {
                self.blink.start(host, &id, &mut self.trays, registry, now);
            } else if self.blink.is_blinking(&id) {
                self.blink.stop(host, &id, &mut self.trays, registry);
            }
        }
    }

    /// Save a partial configuration and converge everything to it.
    #[instrument(skip(self, host, partial))]
    pub fn apply_config<H>(&mut self, host: &mut H, partial: ConfigDocument) -> ProfileRegistry
    where
        H: Host<Window = W, Tray = T>,
    {
        self.config.set(partial);
        self.sync_windows(host, true);
        self.sync_trays(host);
        self.update_attention(host);
        self.config.get().clone()
    }

    /// Clear the configuration and tear down whatever it no longer names.
    #[instrument(skip(self, host))]
    pub fn clear_config<H>(&mut self, host: &mut H) -> Option<ShellRequest>
    where
        H: Host<Window = W, Tray = T>,
    {
        self.config.clear();
        self.sync_windows(host, false);
        self.sync_trays(host);
        self.update_attention(host);

        self.config
            .get()
            .is_empty()
            .then_some(ShellRequest::OpenConfig)
    }

    /// Reveal (creating if needed) a profile's window and make sure its tray
    /// exists.
    #[instrument(skip(self, host))]
    pub fn show<H>(&mut self, host: &mut H, profile_id: &str)
    where
        H: Host<Window = W, Tray = T>,
    {
        let Some(profile) = self.config.get().get(profile_id).cloned() else {
            warn!("Show requested for unknown profile");
            return;
        };
        let now = host.now();

        match self.windows.show(host, &profile, now) {
            Ok(_) => self.reattach_unread(host, &profile),
            Err(e) => warn!(error = %e, "Could not create window"),
        }

        self.ensure_tray(host, &profile);
        self.last_active = Some(profile.id);
    }

    /// Hide a profile's window.
    pub fn hide<H>(&mut self, host: &mut H, profile_id: &str)
    where
        H: Host<Window = W, Tray = T>,
    {
        self.windows.hide(host, profile_id);
    }

    /// Reload a profile's window, showing it first if it does not exist.
    #[instrument(skip(self, host))]
    pub fn reload<H>(&mut self, host: &mut H, profile_id: &str)
    where
        H: Host<Window = W, Tray = T>,
    {
        let Some(profile) = self.config.get().get(profile_id).cloned() else {
            return;
        };
        let now = host.now();

        if self.windows.reload(host, &profile, now) {
            self.reattach_unread(host, &profile);
        } else {
            self.show(host, profile_id);
        }
    }

    /// Show every configured profile.
    pub fn show_all<H>(&mut self, host: &mut H)
    where
        H: Host<Window = W, Tray = T>,
    {
        let ids: Vec<String> = self.config.get().ids().map(str::to_string).collect();
        for id in ids {
            self.show(host, &id);
        }
    }

    /// Hide every configured profile.
    pub fn hide_all<H>(&mut self, host: &mut H)
    where
        H: Host<Window = W, Tray = T>,
    {
        for id in self.config.get().ids() {
            self.windows.hide(host, id);
        }
    }

    /// Tear down one profile's window and tray. Exits the application when
    /// nothing is left.
    #[instrument(skip(self, host))]
    pub fn quit_profile<H>(&mut self, host: &mut H, profile_id: &str) -> Option<ShellRequest>
    where
        H: Host<Window = W, Tray = T>,
    {
        self.destroy_window(host, profile_id);
        self.destroy_tray(host, profile_id);

        if self.last_active.as_deref() == Some(profile_id) {
            self.last_active = None;
        }

        if self.trays.is_empty() && self.windows.is_empty() {
            info!("Last profile quit, exiting");
            self.quitting = true;
            return Some(ShellRequest::Exit);
        }
        None
    }

    /// Tear everything down and exit.
    pub fn quit_all<H>(&mut self, host: &mut H) -> ShellRequest
    where
        H: Host<Window = W, Tray = T>,
    {
        self.shutdown(host);
        ShellRequest::Exit
    }

    /// Set the quitting flag and release every window, tray and timer.
    #[instrument(skip(self, host))]
    pub fn shutdown<H>(&mut self, host: &mut H)
    where
        H: Host<Window = W, Tray = T>,
    {
        self.quitting = true;
        self.blink.cancel_all();

        for id in self.trays.ids() {
            self.destroy_tray(host, &id);
        }
        for id in self.windows.ids() {
            self.destroy_window(host, &id);
        }

        info!("All windows and trays released");
    }

    /// Platform "reopen": show the last active profile, else the primary one,
    /// else ask for the configuration surface.
    pub fn activate<H>(&mut self, host: &mut H) -> Option<ShellRequest>
    where
        H: Host<Window = W, Tray = T>,
    {
        let registry = self.config.get();
        let target = self
            .last_active
            .as_deref()
            .and_then(|id| registry.get(id))
            .or_else(|| registry.primary())
            .map(|p| p.id.clone());

        match target {
            Some(id) => {
                self.show(host, &id);
                None
            }
            None => Some(ShellRequest::OpenConfig),
        }
    }

    /// A tray icon was clicked.
    pub fn handle_tray_click<H>(&mut self, host: &mut H, profile_id: &str)
    where
        H: Host<Window = W, Tray = T>,
    {
        self.show(host, profile_id);
    }

    /// A tray menu item was clicked.
    #[instrument(skip(self, host))]
    pub fn handle_menu_action<H>(&mut self, host: &mut H, action: MenuAction) -> Option<ShellRequest>
    where
        H: Host<Window = W, Tray = T>,
    {
        match action {
            MenuAction::Show(id) => self.show(host, &id),
            MenuAction::Hide(id) => self.hide(host, &id),
            MenuAction::Reload(id) => self.reload(host, &id),
            MenuAction::SwitchTo(id) => {
                if let Some(profile) = self.config.get().get(&id).cloned() {
                    self.ensure_tray(host, &profile);
                }
                self.show(host, &id);
            }
            MenuAction::ShowAll => self.show_all(host),
            MenuAction::HideAll => self.hide_all(host),
            MenuAction::Configure => return Some(ShellRequest::OpenConfig),
            MenuAction::QuitAll => return Some(self.quit_all(host)),
            MenuAction::QuitProfile(id) => return self.quit_profile(host, &id),
        }
        None
    }

    /// Route a native window event.
    pub fn handle_window_event<H>(&mut self, host: &mut H, profile_id: &str, event: WindowEvent)
    where
        H: Host<Window = W, Tray = T>,
    {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Minimized => {
                if self.windows.close(host, profile_id, self.quitting) == CloseOutcome::Destroyed {
                    self.clear_unread(host, profile_id);
                }
            }
            WindowEvent::Resized(bounds) | WindowEvent::Moved(bounds) => {
                let now = host.now();
                self.windows.geometry_changed(profile_id, bounds, now);
            }
            WindowEvent::Focused => {
                if self.windows.contains(profile_id) {
                    self.last_active = Some(profile_id.to_string());
                }
                self.observe_title(host, profile_id, None);
            }
            WindowEvent::TitleChanged(title) => self.observe_title(host, profile_id, Some(&title)),
            WindowEvent::PageLoaded => self.observe_title(host, profile_id, None),
        }
    }

    /// The embedded page fired a notification. Forces Unread when the
    /// profile passes its keyword filter.
    #[instrument(skip(self, host, title))]
    pub fn report_notification<H>(&mut self, host: &mut H, profile_id: &str, title: &str, url: &str)
    where
        H: Host<Window = W, Tray = T>,
    {
        let accepted = self
            .windows
            .subscription(profile_id)
            .is_some_and(|sub| sub.accepts_notification(url));
        if !accepted {
            debug!("Notification ignored");
            return;
        }

        debug!(title, "Page notification");
        let change = self.unread.set_unread(profile_id);
        self.dispatch(host, change);
    }

    /// Fire due timers: delayed navigations, debounced geometry writes and
    /// blink frames.
    pub fn poll<H>(&mut self, host: &mut H)
    where
        H: Host<Window = W, Tray = T>,
    {
        let now = host.now();

        for write in self.windows.poll(host, now) {
            self.config.update_bounds(&write.profile_id, write.bounds);
        }

        self.blink
            .poll(host, &mut self.trays, self.config.get(), now);
    }

    fn ensure_tray<H>(&mut self, host: &mut H, profile: &Profile)
    where
        H: Host<Window = W, Tray = T>,
    {
        let registry = self.config.get();
        match self.trays.get_or_create(host, profile, registry) {
            Ok(true) if self.unread.is_unread(&profile.id) => {
                let now = host.now();
                self.blink
                    .start(host, &profile.id, &mut self.trays, registry, now);
            }
            Ok(_) => {}
            Err(e) => warn!(profile_id = %profile.id, error = %e, "Could not create tray"),
        }
    }

    fn destroy_window<H>(&mut self, host: &mut H, profile_id: &str)
    where
        H: Host<Window = W, Tray = T>,
    {
        self.windows.destroy(host, profile_id);
        self.clear_unread(host, profile_id);
    }

    fn destroy_tray<H>(&mut self, host: &mut H, profile_id: &str)
    where
        H: Host<Window = W, Tray = T>,
    {
        self.blink.cancel(profile_id);
        self.trays.destroy(host, profile_id);
        // No tray left to repaint, so the transition needs no dispatch.
        let _ = self.unread.clear_unread(profile_id);
    }

    fn clear_unread<H>(&mut self, host: &mut H, profile_id: &str)
    where
        H: Host<Window = W, Tray = T>,
    {
        let change = self.unread.clear_unread(profile_id);
        self.dispatch(host, change);
    }

    fn reattach_unread<H>(&mut self, host: &mut H, profile: &Profile)
    where
        H: Host<Window = W, Tray = T>,
    {
        if self.windows.attach_unread(profile).is_some() {
            self.observe_title(host, &profile.id, None);
        }
    }

    /// Re-evaluate a window's unread state from `title`, or from the page's
    /// current title when `None`.
    fn observe_title<H>(&mut self, host: &mut H, profile_id: &str, title: Option<&str>)
    where
        H: Host<Window = W, Tray = T>,
    {
        let Some(handle) = self.windows.get(profile_id) else {
            return;
        };
        let Some(subscription) = handle.subscription() else {
            return;
        };
        if handle.is_showing_placeholder() {
            debug!(profile_id, "Placeholder showing, unread state kept");
            return;
        }

        let current_title;
        let title = match title {
            Some(title) => title,
            None => {
                current_title = host.current_title(handle.native());
                &current_title
            }
        };
        let url = host.current_url(handle.native());
        let unread = subscription.evaluate_title(title, &url);

        let change = self.unread.apply(profile_id, unread);
        self.dispatch(host, change);
    }

    fn dispatch<H>(&mut self, host: &mut H, change: Option<AttentionChange>)
    where
        H: Host<Window = W, Tray = T>,
    {
        if let Some(change) = change {
            let now = host.now();
            self.blink
                .on_attention(host, &change, &mut self.trays, self.config.get(), now);
        }
    }

    fn current_frame(&self, profile_id: &str) -> IconVariant {
        self.blink.frame(profile_id).unwrap_or(IconVariant::Idle)
    }
}
