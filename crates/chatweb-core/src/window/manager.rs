use crate::{
    CloseOutcome, CoreResult, IconPurpose, IconVariant, Placeholder, Profile, UnreadSubscription,
    WindowBackend, WindowBounds, WindowHandle, WindowSpec, WindowState, resolve_icon,
    window::{
        DEFAULT_WINDOW_SIZE, GEOMETRY_DEBOUNCE, NAVIGATION_DELAY,
        handle::{PendingBounds, PendingNavigation},
    },
};

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use tracing::{debug, error, info, instrument, warn};

/// Geometry that survived its debounce window and should be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundsWrite {
    /// Profile owning the window.
    pub profile_id: String,
    /// Last observed geometry.
    pub bounds: WindowBounds,
}

/// Owns the profile id → live window mapping.
pub struct WindowManager<W> {
    windows: HashMap<String, WindowHandle<W>>,
    geometry_debounce: Duration,
    navigation_delay: Duration,
}

impl<W> Default for WindowManager<W> {
    fn default() -> Self {
        Self::new(GEOMETRY_DEBOUNCE, NAVIGATION_DELAY)
    }
}

impl<W> WindowManager<W> {
    /// Manager with explicit timer delays.
    pub fn new(geometry_debounce: Duration, navigation_delay: Duration) -> Self {
        Self {
            windows: HashMap::new(),
            geometry_debounce,
            navigation_delay,
        }
    }

    /// Live window for a profile.
    pub fn get(&self, profile_id: &str) -> Option<&WindowHandle<W>> {
        self.windows.get(profile_id)
    }

    /// Whether a live window exists.
    pub fn contains(&self, profile_id: &str) -> bool {
        self.windows.contains_key(profile_id)
    }

    /// Lifecycle state for a profile.
    pub fn state(&self, profile_id: &str) -> WindowState {
        self.windows
            .get(profile_id)
            .map_or(WindowState::Absent, WindowHandle::state)
    }

    /// Ids with a live window, in no particular order.
    pub fn ids(&self) -> Vec<String> {
        self.windows.keys().cloned().collect()
    }

    /// Number of live windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no window is alive.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Active unread subscription of a profile's window.
    pub fn subscription(&self, profile_id: &str) -> Option<&UnreadSubscription> {
        self.windows
            .get(profile_id)
            .and_then(WindowHandle::subscription)
    }

    /// Earliest pending debounce or navigation deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.windows
            .values()
            .filter_map(WindowHandle::next_deadline)
            .min()
    }

    /// Reveal the profile's window, creating it if needed. Returns `true` when
    /// a window was created.
    #[instrument(skip(self, host, profile), fields(profile_id = %profile.id))]
    pub fn show<H>(&mut self, host: &mut H, profile: &Profile, now: Instant) -> CoreResult<bool>
    where
        H: WindowBackend<Window = W>,
    {
        match self.windows.get_mut(&profile.id) {
            Some(handle) => {
                host.show_window(&handle.native);
                host.focus_window(&handle.native);
                handle.visible = true;
                Ok(false)
            }
            None => {
                self.create(host, profile, now)?;
                Ok(true)
            }
        }
    }

    /// Create a window for `profile`: persisted geometry, icon, placeholder,
    /// then the delayed navigation.
    #[instrument(skip(self, host, profile), fields(profile_id = %profile.id))]
    pub fn create<H>(&mut self, host: &mut H, profile: &Profile, now: Instant) -> CoreResult<()>
    where
        H: WindowBackend<Window = W>,
    {
        if self.windows.contains_key(&profile.id) {
            debug!("Window already exists");
            return Ok(());
        }

        let spec = WindowSpec {
            title: profile.window_title().to_string(),
            bounds: profile.window_bounds,
            default_size: DEFAULT_WINDOW_SIZE,
            icon: resolve_icon(Some(profile), IconVariant::Idle, IconPurpose::Window),
            user_agent: profile.custom_user_agent().map(str::to_string),
        };

        let native = host.create_window(&profile.id, &spec)?;
        let mut handle = WindowHandle::new(native);
        self.load_content(host, &mut handle, profile, now);
        self.windows.insert(profile.id.clone(), handle);

        info!("Window created");
        Ok(())
    }

    /// Hide a profile's window. Missing windows are ignored.
    pub fn hide<H>(&mut self, host: &mut H, profile_id: &str)
    where
        H: WindowBackend<Window = W>,
    {
        if let Some(handle) = self.windows.get_mut(profile_id) {
            host.hide_window(&handle.native);
            handle.visible = false;
        }
    }

    /// Reapply title and icon and load the endpoint again. Returns `false` when
    /// the profile has no window.
    #[instrument(skip(self, host, profile), fields(profile_id = %profile.id))]
    pub fn reload<H>(&mut self, host: &mut H, profile: &Profile, now: Instant) -> bool
    where
        H: WindowBackend<Window = W>,
    {
        let Some(mut handle) = self.windows.remove(&profile.id) else {
            return false;
        };
        self.load_content(host, &mut handle, profile, now);
        self.windows.insert(profile.id.clone(), handle);
        true
    }

    /// Tear the window down regardless of its state. Returns `false` when
    /// there was nothing to destroy.
    pub fn destroy<H>(&mut self, host: &mut H, profile_id: &str) -> bool
    where
        H: WindowBackend<Window = W>,
    {
        match self.windows.get_mut(profile_id) {
            Some(handle) => handle.force_close = true,
            None => return false,
        }
        self.close(host, profile_id, false) == CloseOutcome::Destroyed
    }

    /// Close path for the close button and minimize: hide to the tray unless
    /// the application is quitting or the window was marked for teardown.
    #[instrument(skip(self, host))]
    pub fn close<H>(&mut self, host: &mut H, profile_id: &str, quitting: bool) -> CloseOutcome
    where
        H: WindowBackend<Window = W>,
    {
        let Some(handle) = self.windows.get_mut(profile_id) else {
            return CloseOutcome::Missing;
        };

        if !quitting && !handle.force_close {
            host.hide_window(&handle.native);
            handle.visible = false;
            return CloseOutcome::Hidden;
        }

        if let Some(mut handle) = self.windows.remove(profile_id) {
            handle.dispose_subscription();
            host.destroy_window(handle.native);
        }
        info!("Window destroyed");
        CloseOutcome::Destroyed
    }

    /// Attach a fresh unread subscription, disposing the previous one.
    pub fn attach_unread(&mut self, profile: &Profile) -> Option<&UnreadSubscription> {
        self.windows
            .get_mut(&profile.id)
            .map(|handle| handle.attach(profile.clone()))
    }

    /// Record a move/resize and restart the debounce delay.
    pub fn geometry_changed(&mut self, profile_id: &str, bounds: WindowBounds, now: Instant) {
        if let Some(handle) = self.windows.get_mut(profile_id) {
            handle.pending_bounds = Some(PendingBounds {
                deadline: now + self.geometry_debounce,
                bounds,
            });
        }
    }

    /// Fire due timers: delayed navigations run, debounced geometry is
    /// returned for persistence unless the window is minimized or maximized.
    pub fn poll<H>(&mut self, host: &mut H, now: Instant) -> Vec<BoundsWrite>
    where
        H: WindowBackend<Window = W>,
    {
        let mut due_bounds = Vec::new();

        for (profile_id, handle) in self.windows.iter_mut() {
            if handle
                .pending_navigation
                .as_ref()
                .is_some_and(|p| p.deadline <= now)
            {
                if let Some(nav) = handle.pending_navigation.take() {
                    match host.navigate(&mut handle.native, &nav.url, nav.user_agent.as_deref()) {
                        Ok(()) => handle.showing_placeholder = false,
                        Err(e) => {
                            error!(profile_id = %profile_id, error = %e, "Error loading target URL");
                        }
                    }
                }
            }

            if handle
                .pending_bounds
                .as_ref()
                .is_some_and(|p| p.deadline <= now)
            {
                if let Some(pending) = handle.pending_bounds.take() {
                    if host.is_minimized(&handle.native) || host.is_maximized(&handle.native) {
                        debug!(profile_id = %profile_id, "Skipping geometry of minimized/maximized window");
                    } else {
                        due_bounds.push(BoundsWrite {
                            profile_id: profile_id.clone(),
                            bounds: pending.bounds,
                        });
                    }
                }
            }
        }

        due_bounds
    }

    fn load_content<H>(
        &self,
        host: &mut H,
        handle: &mut WindowHandle<W>,
        profile: &Profile,
        now: Instant,
    ) where
        H: WindowBackend<Window = W>,
    {
        let title = profile.window_title();
        host.set_window_title(&handle.native, title);
        host.set_window_icon(
            &handle.native,
            &resolve_icon(Some(profile), IconVariant::Idle, IconPurpose::Window),
        );

        let Some(url) = profile.endpoint() else {
            handle.pending_navigation = None;
            let page = Placeholder {
                title: title.to_string(),
                subtitle: format!("{} has no service URL configured", profile.menu_label()),
                hint: "Use Configure to set your chat service URL, title, icon, and optional User-Agent."
                    .to_string(),
                show_actions: true,
            };
            if let Err(e) = host.load_placeholder(&mut handle.native, &page) {
                warn!(profile_id = %profile.id, error = %e, "Error loading placeholder");
            }
            handle.showing_placeholder = true;
            return;
        };

        let page = Placeholder {
            title: title.to_string(),
            subtitle: format!("Loading {}...", profile.menu_label()),
            hint: url.to_string(),
            show_actions: false,
        };
        if let Err(e) = host.load_placeholder(&mut handle.native, &page) {
            warn!(profile_id = %profile.id, error = %e, "Error loading placeholder");
        }
        handle.showing_placeholder = true;

        handle.pending_navigation = Some(PendingNavigation {
            deadline: now + self.navigation_delay,
            url: url.to_string(),
            user_agent: profile.custom_user_agent().map(str::to_string),
        });
    }
}
