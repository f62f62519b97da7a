//! The configuration surface: one web view window editing the profile list.

use crate::{AppError, AppResult, ShellEvent};

use chatweb_core::{ConfigDocument, IconPurpose, IconVariant, resolve_icon};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::Deserialize;
use serde_json::{Value, json};
use tao::{
    dpi::LogicalSize,
    event_loop::{EventLoopProxy, EventLoopWindowTarget},
    window::{Window, WindowBuilder, WindowId},
};
use tracing::{debug, info, instrument, warn};
use wry::{WebView, WebViewBuilder};

const CONFIG_HTML: &str = include_str!("../resources/config.html");

/// A call from the configuration page.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigCall {
    /// Current profiles.
    Get,
    /// Save a (partial) document.
    Set(ConfigDocument),
    /// Drop every profile.
    Clear,
    /// Pick an icon file.
    ChooseIcon,
    /// The page is done.
    Close,
}

/// A numbered call; the answer is delivered back under the same id.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRequest {
    /// Correlation id chosen by the page.
    pub id: u64,
    /// What the page asked for.
    pub call: ConfigCall,
}

#[derive(Deserialize)]
struct RawRequest {
    id: u64,
    method: String,
    #[serde(default)]
    payload: Value,
}

impl ConfigRequest {
    /// Parse a raw IPC body. Malformed or unknown requests are dropped.
    pub fn parse(raw: &str) -> Option<Self> {
        let request: RawRequest = match serde_json::from_str(raw) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "Ignoring malformed config request");
                return None;
            }
        };

        let call = match request.method.as_str() {
            "get" => ConfigCall::Get,
            "set" => match serde_json::from_value(request.payload) {
                Ok(document) => ConfigCall::Set(document),
                Err(e) => {
                    warn!(error = %e, "Rejecting config payload");
                    return None;
                }
            },
            "clear" => ConfigCall::Clear,
            "chooseIcon" => ConfigCall::ChooseIcon,
            "close" => ConfigCall::Close,
            other => {
                debug!(method = other, "Ignoring unknown config request");
                return None;
            }
        };

        Some(Self {
            id: request.id,
            call,
        })
    }
}

/// Script delivering `value` as the answer to request `id`.
pub fn response_script(id: u64, value: &Value) -> String {
    format!("window.chatWebConfig && window.chatWebConfig.resolve({id}, {value});")
}

/// Ask the user for an icon file. `{}` when cancelled.
pub fn choose_icon() -> Value {
    let picked = rfd::FileDialog::new()
        .set_title("Select icon")
        .add_filter("Images", &["png", "ico", "icns"])
        .add_filter("All Files", &["*"])
        .pick_file();

    match picked {
        Some(path) => json!({ "path": path.display().to_string() }),
        None => json!({}),
    }
}

/// The open configuration window.
pub struct ConfigWindow {
    window: Window,
    webview: WebView,
}

impl ConfigWindow {
    /// Open the configuration window.
    #[track_caller]
    #[instrument(skip(target, proxy))]
    pub fn open(
        target: &EventLoopWindowTarget<ShellEvent>,
        proxy: &EventLoopProxy<ShellEvent>,
    ) -> AppResult<Self> {
        let icon = crate::icons::window_icon(&resolve_icon(
            None,
            IconVariant::Idle,
            IconPurpose::Window,
        ))
        .ok();

        let window = WindowBuilder::new()
            .with_title("Configure Profiles")
            .with_inner_size(LogicalSize::new(980, 760))
            .with_min_inner_size(LogicalSize::new(640, 600))
            .with_window_icon(icon)
            .build(target)
            .map_err(|e| AppError::Window {
                reason: format!("Failed to create config window: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let ipc_proxy = proxy.clone();
        let builder = WebViewBuilder::new()
            .with_html(CONFIG_HTML)
            .with_ipc_handler(move |request: wry::http::Request<String>| {
                if let Some(request) = ConfigRequest::parse(request.body()) {
                    let _ = ipc_proxy.send_event(ShellEvent::Config(request));
                }
            })
            .with_new_window_req_handler(|url| {
                if let Err(e) = open::that(&url) {
                    warn!(url = %url, error = %e, "Failed to open link in browser");
                }
                false
            });

        #[cfg(not(any(
            target_os = "linux",
            target_os = "dragonfly",
            target_os = "freebsd",
            target_os = "netbsd",
            target_os = "openbsd"
        )))]
        let webview = builder.build(&window);

        #[cfg(any(
            target_os = "linux",
            target_os = "dragonfly",
            target_os = "freebsd",
            target_os = "netbsd",
            target_os = "openbsd"
        ))]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            use wry::WebViewBuilderExtUnix;
            let vbox = window.default_vbox().ok_or_else(|| AppError::Window {
                reason: "config window has no GTK container".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;
            builder.build_gtk(vbox)
        };

        let webview = webview.map_err(|e| AppError::Window {
            reason: format!("Failed to create config web view: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!("Configuration window opened");
        Ok(Self { window, webview })
    }

    /// Native id used to route window events.
    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    /// Bring the window to the front.
    pub fn focus(&self) {
        self.window.set_visible(true);
        if self.window.is_minimized() {
            self.window.set_minimized(false);
        }
        self.window.set_focus();
    }

    /// Deliver the answer to request `id`.
    pub fn respond(&self, id: u64, value: &Value) {
        if let Err(e) = self.webview.evaluate_script(&response_script(id, value)) {
            warn!(id, error = %e, "Failed to answer config request");
        }
    }
}
