//! In-memory host used by the engine tests.

use crate::{
    Clock, ConfigDocument, ConfigService, CoreError, CoreResult, IconRequest, IconSource,
    IconVariant, MemoryConfigStore, MenuSpec, NAVIGATION_DELAY, Placeholder, ProfileDraft,
    Reconciler, Timing, TrayBackend, WindowBackend, WindowBounds, WindowSpec,
};

use std::{
    collections::{HashMap, HashSet},
    panic::Location,
    rc::Rc,
    time::{Duration, Instant},
};

use error_location::ErrorLocation;

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeWindow {
    pub(crate) title: String,
    pub(crate) visible: bool,
    pub(crate) focus_count: usize,
    pub(crate) page_title: String,
    pub(crate) url: String,
    pub(crate) placeholder: Option<Placeholder>,
    pub(crate) navigations: Vec<(String, Option<String>)>,
    pub(crate) bounds: Option<WindowBounds>,
    pub(crate) minimized: bool,
    pub(crate) maximized: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeTray {
    pub(crate) tooltip: String,
    pub(crate) frames: Vec<IconVariant>,
    pub(crate) menu: Option<MenuSpec>,
}

impl FakeTray {
    pub(crate) fn current_frame(&self) -> Option<IconVariant> {
        self.frames.last().copied()
    }
}

pub(crate) struct FakeHost {
    pub(crate) windows: HashMap<String, FakeWindow>,
    pub(crate) trays: HashMap<String, FakeTray>,
    pub(crate) windows_created: usize,
    pub(crate) windows_destroyed: usize,
    pub(crate) trays_created: usize,
    pub(crate) trays_destroyed: usize,
    pub(crate) fail_windows_for: HashSet<String>,
    pub(crate) fail_trays_for: HashSet<String>,
    pub(crate) fail_navigation: bool,
    now: Instant,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self {
            windows: HashMap::new(),
            trays: HashMap::new(),
            windows_created: 0,
            windows_destroyed: 0,
            trays_created: 0,
            trays_destroyed: 0,
            fail_windows_for: HashSet::new(),
            fail_trays_for: HashSet::new(),
            fail_navigation: false,
            now: Instant::now(),
        }
    }

    pub(crate) fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub(crate) fn advance_ms(&mut self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub(crate) fn window_ids(&self) -> HashSet<String> {
        self.windows.keys().cloned().collect()
    }

    pub(crate) fn tray_ids(&self) -> HashSet<String> {
        self.trays.keys().cloned().collect()
    }

    pub(crate) fn tray_frame(&self, id: &str) -> Option<IconVariant> {
        self.trays.get(id).and_then(FakeTray::current_frame)
    }
}

fn requested_variant(icon: &IconRequest) -> IconVariant {
    icon.candidates
        .iter()
        .find_map(|c| match c {
            IconSource::BuiltIn(variant) => Some(*variant),
            IconSource::File(_) => None,
        })
        .unwrap_or(IconVariant::Idle)
}

impl Clock for FakeHost {
    fn now(&self) -> Instant {
        self.now
    }
}

impl WindowBackend for FakeHost {
    type Window = String;

    fn create_window(&mut self, profile_id: &str, spec: &WindowSpec) -> CoreResult<String> {
        if self.fail_windows_for.contains(profile_id) {
            return Err(CoreError::WindowBackend {
                profile_id: profile_id.to_string(),
                reason: "refused by test".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.windows.insert(
            profile_id.to_string(),
            FakeWindow {
                title: spec.title.clone(),
                visible: true,
                bounds: spec.bounds,
                ..FakeWindow::default()
            },
        );
        self.windows_created += 1;
        Ok(profile_id.to_string())
    }

    fn show_window(&mut self, window: &String) {
        if let Some(w) = self.windows.get_mut(window) {
            w.visible = true;
        }
    }

    fn focus_window(&mut self, window: &String) {
        if let Some(w) = self.windows.get_mut(window) {
            w.focus_count += 1;
        }
    }

    fn hide_window(&mut self, window: &String) {
        if let Some(w) = self.windows.get_mut(window) {
            w.visible = false;
        }
    }

    fn destroy_window(&mut self, window: String) {
        if self.windows.remove(&window).is_some() {
            self.windows_destroyed += 1;
        }
    }

    fn set_window_title(&mut self, window: &String, title: &str) {
        if let Some(w) = self.windows.get_mut(window) {
            w.title = title.to_string();
        }
    }

    fn set_window_icon(&mut self, _window: &String, _icon: &IconRequest) {}

    fn load_placeholder(&mut self, window: &mut String, page: &Placeholder) -> CoreResult<()> {
        if let Some(w) = self.windows.get_mut(window.as_str()) {
            w.placeholder = Some(page.clone());
            w.page_title = String::new();
            w.url = "about:blank".to_string();
        }
        Ok(())
    }

    fn navigate(
        &mut self,
        window: &mut String,
        url: &str,
        user_agent: Option<&str>,
    ) -> CoreResult<()> {
        if self.fail_navigation {
            return Err(CoreError::Navigation {
                url: url.to_string(),
                reason: "offline".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if let Some(w) = self.windows.get_mut(window.as_str()) {
            w.navigations
                .push((url.to_string(), user_agent.map(str::to_string)));
            w.url = url.to_string();
        }
        Ok(())
    }

    fn current_title(&self, window: &String) -> String {
        self.windows
            .get(window)
            .map(|w| w.page_title.clone())
            .unwrap_or_default()
    }

    fn current_url(&self, window: &String) -> String {
        self.windows
            .get(window)
            .map(|w| w.url.clone())
            .unwrap_or_default()
    }

    fn window_bounds(&self, window: &String) -> Option<WindowBounds> {
        self.windows.get(window).and_then(|w| w.bounds)
    }

    fn is_minimized(&self, window: &String) -> bool {
        self.windows.get(window).is_some_and(|w| w.minimized)
    }

    fn is_maximized(&self, window: &String) -> bool {
        self.windows.get(window).is_some_and(|w| w.maximized)
    }
}

impl TrayBackend for FakeHost {
    type Tray = String;

    fn create_tray(
        &mut self,
        profile_id: &str,
        tooltip: &str,
        icon: &IconRequest,
    ) -> CoreResult<String> {
        if self.fail_trays_for.contains(profile_id) {
            return Err(CoreError::TrayBackend {
                profile_id: profile_id.to_string(),
                reason: "refused by test".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.trays.insert(
            profile_id.to_string(),
            FakeTray {
                tooltip: tooltip.to_string(),
                frames: vec![requested_variant(icon)],
                menu: None,
            },
        );
        self.trays_created += 1;
        Ok(profile_id.to_string())
    }

    fn set_tray_icon(&mut self, tray: &String, icon: &IconRequest) -> CoreResult<()> {
        if let Some(t) = self.trays.get_mut(tray) {
            t.frames.push(requested_variant(icon));
        }
        Ok(())
    }

    fn set_tray_tooltip(&mut self, tray: &String, tooltip: &str) -> CoreResult<()> {
        if let Some(t) = self.trays.get_mut(tray) {
            t.tooltip = tooltip.to_string();
        }
        Ok(())
    }

    fn set_tray_menu(&mut self, tray: &String, menu: &MenuSpec) -> CoreResult<()> {
        if let Some(t) = self.trays.get_mut(tray) {
            t.menu = Some(menu.clone());
        }
        Ok(())
    }

    fn destroy_tray(&mut self, tray: String) {
        if self.trays.remove(&tray).is_some() {
            self.trays_destroyed += 1;
        }
    }
}

pub(crate) type TestShell = Reconciler<String, String>;

pub(crate) fn draft(id: &str, name: &str, url: &str) -> ProfileDraft {
    ProfileDraft {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        url: Some(url.to_string()),
        ..ProfileDraft::default()
    }
}

pub(crate) fn document(drafts: Vec<ProfileDraft>) -> ConfigDocument {
    ConfigDocument::with_profiles(drafts)
}

/// Shell over a memory store pre-loaded with `drafts`; the store handle is
/// returned so tests can inspect writes.
pub(crate) fn shell_with(drafts: Vec<ProfileDraft>) -> (TestShell, Rc<MemoryConfigStore>) {
    let store = Rc::new(MemoryConfigStore::new());
    let mut service = ConfigService::load(Box::new(Rc::clone(&store)));
    if !drafts.is_empty() {
        service.set(document(drafts));
    }
    (Reconciler::with_timing(service, Timing::default()), store)
}

/// Start `shell` and let the delayed navigations run, so windows show their
/// pages instead of the placeholder.
pub(crate) fn start_loaded(shell: &mut TestShell, host: &mut FakeHost) {
    shell.start(host);
    host.advance(NAVIGATION_DELAY);
    shell.poll(host);
}
