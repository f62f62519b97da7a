use crate::{
    ConfigCall, ConfigRequest, ConfigWindow, HostState, NativeHost, NativeWindow, PageMessage,
    ShellEvent, config_window,
};

use chatweb_core::{MenuAction, Reconciler, ShellRequest, WindowEvent};

use serde_json::{Value, json};
use tao::{
    event::{Event, StartCause, WindowEvent as TaoWindowEvent},
    event_loop::{ControlFlow, EventLoopProxy, EventLoopWindowTarget},
    window::WindowId,
};
use tracing::{debug, error, info, instrument};
use tray_icon::TrayIcon;

/// Main application state.
///
/// Lives inside the event loop closure on the main thread, which owns every
/// window, web view and tray icon.
pub struct App {
    pub(crate) shell: Reconciler<NativeWindow, TrayIcon>,
    pub(crate) host_state: HostState,
    pub(crate) proxy: EventLoopProxy<ShellEvent>,
    pub(crate) config_window: Option<ConfigWindow>,
}

impl App {
    /// Route one event-loop event, then fire due timers and schedule the next
    /// wake-up.
    pub(crate) fn handle_event(
        &mut self,
        event: Event<'_, ShellEvent>,
        target: &EventLoopWindowTarget<ShellEvent>,
        control_flow: &mut ControlFlow,
    ) {
        match event {
            Event::NewEvents(StartCause::Init) => {
                info!("Chat Web Desktop starting");
                let mut host = NativeHost::new(target, &self.proxy, &mut self.host_state);
                let request = self.shell.start(&mut host);
                self.apply_request(request, target, control_flow);
            }
            Event::UserEvent(event) => self.handle_shell_event(event, target, control_flow),
            Event::WindowEvent {
                window_id, event, ..
            } => self.handle_window_event(window_id, event, target),
            Event::Reopen { .. } => {
                let mut host = NativeHost::new(target, &self.proxy, &mut self.host_state);
                let request = self.shell.activate(&mut host);
                self.apply_request(request, target, control_flow);
            }
            Event::LoopDestroyed => {
                let mut host = NativeHost::new(target, &self.proxy, &mut self.host_state);
                self.shell.shutdown(&mut host);
                self.config_window = None;
                info!("Event loop finished");
                return;
            }
            _ => {}
        }

        if matches!(control_flow, ControlFlow::Exit | ControlFlow::ExitWithCode(_)) {
            return;
        }

        let mut host = NativeHost::new(target, &self.proxy, &mut self.host_state);
        self.shell.poll(&mut host);

        *control_flow = match self.shell.next_deadline() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
    }

    #[instrument(skip(self, target, control_flow))]
    fn handle_shell_event(
        &mut self,
        event: ShellEvent,
        target: &EventLoopWindowTarget<ShellEvent>,
        control_flow: &mut ControlFlow,
    ) {
        if let ShellEvent::TitleChanged { profile_id, title } = &event {
            self.host_state.record_title(profile_id, title);
        }

        let mut host = NativeHost::new(target, &self.proxy, &mut self.host_state);

        match event {
            ShellEvent::Menu(id) => match MenuAction::parse(&id) {
                Some(action) => {
                    let request = self.shell.handle_menu_action(&mut host, action);
                    self.apply_request(request, target, control_flow);
                }
                None => debug!(menu_id = %id, "Ignoring unknown menu item"),
            },
            ShellEvent::TrayClicked(profile_id) => {
                self.shell.handle_tray_click(&mut host, &profile_id);
            }
            ShellEvent::Page {
                profile_id,
                message,
            } => match message {
                PageMessage::Notification { title, url } => {
                    self.shell
                        .report_notification(&mut host, &profile_id, &title, &url);
                }
                PageMessage::OpenConfig => self.open_config(target),
                PageMessage::ClearConfig => {
                    let request = self.shell.clear_config(&mut host);
                    self.apply_request(request, target, control_flow);
                }
            },
            ShellEvent::TitleChanged { profile_id, title } => {
                self.shell
                    .handle_window_event(&mut host, &profile_id, WindowEvent::TitleChanged(title));
            }
            ShellEvent::PageLoaded { profile_id } => {
                self.shell
                    .handle_window_event(&mut host, &profile_id, WindowEvent::PageLoaded);
            }
            ShellEvent::Config(request) => self.handle_config_request(request, target),
        }
    }

    fn handle_window_event(
        &mut self,
        window_id: WindowId,
        event: TaoWindowEvent<'_>,
        target: &EventLoopWindowTarget<ShellEvent>,
    ) {
        if self
            .config_window
            .as_ref()
            .is_some_and(|window| window.id() == window_id)
        {
            if matches!(event, TaoWindowEvent::CloseRequested) {
                self.config_window = None;
                debug!("Configuration window closed");
            }
            return;
        }

        let Some(profile_id) = self.host_state.profile_for(window_id).map(str::to_string) else {
            return;
        };
        let native = self
            .shell
            .windows()
            .get(&profile_id)
            .map(|handle| handle.native());

        let translated = match event {
            TaoWindowEvent::CloseRequested => Some(WindowEvent::CloseRequested),
            TaoWindowEvent::Resized(_) => native.and_then(|window| {
                if window.is_minimized() {
                    Some(WindowEvent::Minimized)
                } else {
                    window.bounds().map(WindowEvent::Resized)
                }
            }),
            TaoWindowEvent::Moved(_) => native
                .and_then(NativeWindow::bounds)
                .map(WindowEvent::Moved),
            TaoWindowEvent::Focused(true) => Some(WindowEvent::Focused),
            _ => None,
        };

        if let Some(event) = translated {
            let mut host = NativeHost::new(target, &self.proxy, &mut self.host_state);
            self.shell.handle_window_event(&mut host, &profile_id, event);
        }
    }

    #[instrument(skip(self, request, target), fields(id = request.id))]
    fn handle_config_request(
        &mut self,
        request: ConfigRequest,
        target: &EventLoopWindowTarget<ShellEvent>,
    ) {
        let mut host = NativeHost::new(target, &self.proxy, &mut self.host_state);

        let response = match request.call {
            ConfigCall::Get => Some(self.registry_json()),
            ConfigCall::Set(document) => {
                self.shell.apply_config(&mut host, document);
                Some(self.registry_json())
            }
            ConfigCall::Clear => {
                // The surface is already open; it reopens on close if empty.
                let _ = self.shell.clear_config(&mut host);
                Some(self.registry_json())
            }
            ConfigCall::ChooseIcon => Some(config_window::choose_icon()),
            ConfigCall::Close => {
                self.config_window = None;
                if self.shell.registry().is_empty() {
                    info!("No profiles left, reopening configuration");
                    self.open_config(target);
                }
                None
            }
        };

        if let (Some(value), Some(window)) = (response, &self.config_window) {
            window.respond(request.id, &value);
        }
    }

    fn registry_json(&self) -> Value {
        serde_json::to_value(self.shell.registry()).unwrap_or_else(|e| {
            error!(error = %e, "Failed to serialize profiles");
            json!({ "profiles": [] })
        })
    }

    fn apply_request(
        &mut self,
        request: Option<ShellRequest>,
        target: &EventLoopWindowTarget<ShellEvent>,
        control_flow: &mut ControlFlow,
    ) {
        match request {
            Some(ShellRequest::OpenConfig) => self.open_config(target),
            Some(ShellRequest::Exit) => {
                info!("Exit requested");
                self.config_window = None;
                *control_flow = ControlFlow::Exit;
            }
            None => {}
        }
    }

    /// Open the configuration surface, or focus it when already open.
    fn open_config(&mut self, target: &EventLoopWindowTarget<ShellEvent>) {
        if let Some(window) = &self.config_window {
            window.focus();
            return;
        }

        match ConfigWindow::open(target, &self.proxy) {
            Ok(window) => self.config_window = Some(window),
            Err(e) => error!(error = %e, "Failed to open configuration window"),
        }
    }
}
