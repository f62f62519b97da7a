//! Chat Web Desktop: chat web apps wrapped in desktop windows, one tray icon
//! per profile.

mod app;
mod config_window;
mod error;
mod host;
mod icons;
mod logging;
mod page_bridge;
mod paths;
mod placeholder;
mod shell_event;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    config_window::{ConfigCall, ConfigRequest, ConfigWindow},
    error::{AppError, Result as AppResult},
    host::{HostState, NativeHost, NativeWindow},
    page_bridge::PageMessage,
    paths::AppPaths,
    shell_event::ShellEvent,
};

use chatweb_core::{ConfigService, JsonConfigStore, Reconciler};

use tao::event_loop::{EventLoopBuilder, EventLoopProxy};
use tracing::{debug, info};
use tray_icon::{MouseButton, MouseButtonState, TrayIconEvent, menu::MenuEvent};

/// Application entry point.
fn main() {
    let paths = match AppPaths::resolve() {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("Failed to prepare a user data directory: {e}");
            std::process::exit(1);
        }
    };

    let log_guard = logging::init(&paths);
    info!(user_data = ?paths.user_data, "User data directory ready");

    let store = JsonConfigStore::new(paths.config_file());
    let shell = Reconciler::new(ConfigService::load(Box::new(store)));

    let event_loop = EventLoopBuilder::<ShellEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();
    forward_tray_events(&proxy);

    let mut app = App {
        shell,
        host_state: HostState::default(),
        proxy,
        config_window: None,
    };

    event_loop.run(move |event, target, control_flow| {
        app.handle_event(event, target, control_flow);

        // Flushes the log file when the loop closure is dropped.
        let _ = &log_guard;
    });
}

/// Tray and menu callbacks run outside the loop; forward them as user events.
fn forward_tray_events(proxy: &EventLoopProxy<ShellEvent>) {
    let menu_proxy = proxy.clone();
    MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
        if menu_proxy.send_event(ShellEvent::Menu(event.id.0)).is_err() {
            debug!("Event loop closed, dropping menu event");
        }
    }));

    let tray_proxy = proxy.clone();
    TrayIconEvent::set_event_handler(Some(move |event: TrayIconEvent| {
        if let TrayIconEvent::Click {
            id,
            button: MouseButton::Left,
            button_state: MouseButtonState::Up,
            ..
        } = event
        {
            if tray_proxy.send_event(ShellEvent::TrayClicked(id.0)).is_err() {
                debug!("Event loop closed, dropping tray click");
            }
        }
    }));
}
