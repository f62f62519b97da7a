use super::{NativeHost, navigation_error, window_error};
use crate::{AppError, AppResult, PageMessage, ShellEvent, icons, page_bridge, placeholder};

use chatweb_core::{CoreResult, IconRequest, Placeholder, WindowBackend, WindowBounds, WindowSpec};

use std::panic::Location;

use error_location::ErrorLocation;
use tao::{
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event_loop::EventLoopProxy,
    window::{Window, WindowBuilder, WindowId},
};
use tracing::{debug, info, instrument, warn};
use wry::{PageLoadEvent, WebView, WebViewBuilder};

/// A profile's top-level window and the web view filling it.
pub struct NativeWindow {
    profile_id: String,
    window: Window,
    webview: Option<WebView>,
    user_agent: Option<String>,
}

impl NativeWindow {
    /// Native id used to route window events.
    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    /// Outer position and inner size, when the platform reports a position.
    pub fn bounds(&self) -> Option<WindowBounds> {
        let position = self.window.outer_position().ok()?;
        let size = self.window.inner_size();
        Some(WindowBounds {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        })
    }

    /// Whether the window is minimized.
    pub fn is_minimized(&self) -> bool {
        self.window.is_minimized()
    }
}

enum Content<'a> {
    Html(&'a str),
    Url(&'a str),
}

/// Build a web view wired to the page bridge.
#[track_caller]
fn build_webview(
    window: &Window,
    profile_id: &str,
    proxy: &EventLoopProxy<ShellEvent>,
    user_agent: Option<&str>,
    content: Content<'_>,
) -> AppResult<WebView> {
    let ipc_proxy = proxy.clone();
    let ipc_profile = profile_id.to_string();
    let title_proxy = proxy.clone();
    let title_profile = profile_id.to_string();
    let load_proxy = proxy.clone();
    let load_profile = profile_id.to_string();

    let mut builder = WebViewBuilder::new()
        .with_initialization_script(page_bridge::INIT_SCRIPT)
        .with_ipc_handler(move |request: wry::http::Request<String>| {
            if let Some(message) = PageMessage::parse(request.body()) {
                let _ = ipc_proxy.send_event(ShellEvent::Page {
                    profile_id: ipc_profile.clone(),
                    message,
                });
            }
        })
        .with_document_title_changed_handler(move |title| {
            let _ = title_proxy.send_event(ShellEvent::TitleChanged {
                profile_id: title_profile.clone(),
                title,
            });
        })
        .with_on_page_load_handler(move |event, _url| {
            if matches!(event, PageLoadEvent::Finished) {
                let _ = load_proxy.send_event(ShellEvent::PageLoaded {
                    profile_id: load_profile.clone(),
                });
            }
        })
        .with_new_window_req_handler(|url| {
            // External links go to the system browser, never a new in-app window.
            if let Err(e) = open::that(&url) {
                warn!(url = %url, error = %e, "Failed to open link in browser");
            }
            false
        });

    if let Some(user_agent) = user_agent {
        builder = builder.with_user_agent(user_agent);
    }

    builder = match content {
        Content::Html(html) => builder.with_html(html),
        Content::Url(url) => builder.with_url(url),
    };

    #[cfg(not(any(
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd"
    )))]
    let webview = builder.build(window);

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
            reason: "window has no GTK container".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;
        builder.build_gtk(vbox)
    };

    webview.map_err(|e| AppError::Window {
        reason: format!("Failed to create web view: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}

impl WindowBackend for NativeHost<'_> {
    type Window = NativeWindow;

    #[instrument(skip(self, spec))]
    fn create_window(&mut self, profile_id: &str, spec: &WindowSpec) -> CoreResult<NativeWindow> {
        let mut builder = WindowBuilder::new().with_title(&spec.title);

        builder = match spec.bounds {
            Some(bounds) => builder
                .with_position(PhysicalPosition::new(bounds.x, bounds.y))
                .with_inner_size(PhysicalSize::new(bounds.width, bounds.height)),
            None => builder.with_inner_size(LogicalSize::new(spec.default_size.0, spec.default_size.1)),
        };

        match icons::window_icon(&spec.icon) {
            Ok(icon) => builder = builder.with_window_icon(Some(icon)),
            Err(e) => warn!(error = %e, "Window icon unavailable"),
        }

        let window = builder
            .build(self.target)
            .map_err(|e| window_error(profile_id, format!("Failed to create window: {}", e)))?;

        let webview = build_webview(
            &window,
            profile_id,
            self.proxy,
            spec.user_agent.as_deref(),
            Content::Html(""),
        )
        .map_err(|e| window_error(profile_id, e.to_string()))?;

        self.state
            .window_profiles
            .insert(window.id(), profile_id.to_string());
        self.state.record_title(profile_id, &spec.title);

        info!("Native window created");
        Ok(NativeWindow {
            profile_id: profile_id.to_string(),
            window,
            webview: Some(webview),
            user_agent: spec.user_agent.clone(),
        })
    }

    fn show_window(&mut self, window: &NativeWindow) {
        window.window.set_visible(true);
    }

    fn focus_window(&mut self, window: &NativeWindow) {
        if window.window.is_minimized() {
            window.window.set_minimized(false);
        }
        window.window.set_focus();
    }

    fn hide_window(&mut self, window: &NativeWindow) {
        window.window.set_visible(false);
    }

    fn destroy_window(&mut self, mut window: NativeWindow) {
        self.state.window_profiles.remove(&window.window.id());
        self.state.titles.remove(&window.profile_id);
        // The web view must go before its parent window.
        drop(window.webview.take());
        debug!(profile_id = %window.profile_id, "Native window dropped");
    }

    fn set_window_title(&mut self, window: &NativeWindow, title: &str) {
        window.window.set_title(title);
    }

    fn set_window_icon(&mut self, window: &NativeWindow, icon: &IconRequest) {
        match icons::window_icon(icon) {
            Ok(icon) => window.window.set_window_icon(Some(icon)),
            Err(e) => warn!(profile_id = %window.profile_id, error = %e, "Window icon unavailable"),
        }
    }

    fn load_placeholder(&mut self, window: &mut NativeWindow, page: &Placeholder) -> CoreResult<()> {
        let html = placeholder::render(page);
        // The placeholder has no document title of its own.
        self.state.record_title(&window.profile_id, "");

        match &window.webview {
            Some(webview) => webview
                .load_html(&html)
                .map_err(|e| window_error(&window.profile_id, e.to_string())),
            None => {
                let webview = build_webview(
                    &window.window,
                    &window.profile_id,
                    self.proxy,
                    window.user_agent.as_deref(),
                    Content::Html(&html),
                )
                .map_err(|e| window_error(&window.profile_id, e.to_string()))?;
                window.webview = Some(webview);
                Ok(())
            }
        }
    }

    /// A changed user agent needs a fresh web view; otherwise the existing one
    /// navigates in place.
    fn navigate(
        &mut self,
        window: &mut NativeWindow,
        url: &str,
        user_agent: Option<&str>,
    ) -> CoreResult<()> {
        if let Some(webview) = &window.webview {
            if window.user_agent.as_deref() == user_agent {
                return webview
                    .load_url(url)
                    .map_err(|e| navigation_error(url, e.to_string()));
            }
        }

        drop(window.webview.take());
        let webview = build_webview(
            &window.window,
            &window.profile_id,
            self.proxy,
            user_agent,
            Content::Url(url),
        )
        .map_err(|e| navigation_error(url, e.to_string()))?;

        window.webview = Some(webview);
        window.user_agent = user_agent.map(str::to_string);
        debug!(profile_id = %window.profile_id, "Web view rebuilt for user agent");
        Ok(())
    }

    fn current_title(&self, window: &NativeWindow) -> String {
        self.state
            .titles
            .get(&window.profile_id)
            .cloned()
            .unwrap_or_default()
    }

    fn current_url(&self, window: &NativeWindow) -> String {
        window
            .webview
            .as_ref()
            .and_then(|webview| webview.url().ok())
            .unwrap_or_default()
    }

    fn window_bounds(&self, window: &NativeWindow) -> Option<WindowBounds> {
        window.bounds()
    }

    fn is_minimized(&self, window: &NativeWindow) -> bool {
        window.window.is_minimized()
    }

    fn is_maximized(&self, window: &NativeWindow) -> bool {
        window.window.is_maximized()
    }
}
