use crate::{CoreResult, IconRequest, WindowBounds};

/// Parameters for a new native window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    /// Initial title.
    pub title: String,
    /// Persisted geometry, if any.
    pub bounds: Option<WindowBounds>,
    /// Size used when `bounds` is `None`.
    pub default_size: (u32, u32),
    /// Window icon.
    pub icon: IconRequest,
    /// User agent the web view starts with.
    pub user_agent: Option<String>,
}

/// Transitional page shown while the endpoint loads, or instead of it when no
/// endpoint is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Headline.
    pub title: String,
    /// Status line.
    pub subtitle: String,
    /// Small print.
    pub hint: String,
    /// Offer "configure" / "clear" buttons.
    pub show_actions: bool,
}

/// Native window events routed to the engine, keyed by profile id by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    /// The user pressed the close button.
    CloseRequested,
    /// The window was minimized.
    Minimized,
    /// The window was resized to these bounds.
    Resized(WindowBounds),
    /// The window was moved to these bounds.
    Moved(WindowBounds),
    /// The window gained focus.
    Focused,
    /// The page title changed.
    TitleChanged(String),
    /// A page finished loading.
    PageLoaded,
}

/// Native window operations.
///
/// The engine owns each `Window` value exclusively through its
/// [`WindowHandle`](crate::WindowHandle); dropping it into
/// [`destroy_window`](Self::destroy_window) must release the OS window.
pub trait WindowBackend {
    /// Native window resource.
    type Window;

    /// Create and show a window for `profile_id`.
    fn create_window(&mut self, profile_id: &str, spec: &WindowSpec) -> CoreResult<Self::Window>;

    /// Make the window visible.
    fn show_window(&mut self, window: &Self::Window);

    /// Bring the window to the foreground.
    fn focus_window(&mut self, window: &Self::Window);

    /// Hide the window without destroying it.
    fn hide_window(&mut self, window: &Self::Window);

    /// Release the window.
    fn destroy_window(&mut self, window: Self::Window);

    /// Change the title bar text.
    fn set_window_title(&mut self, window: &Self::Window, title: &str);

    /// Change the window icon.
    fn set_window_icon(&mut self, window: &Self::Window, icon: &IconRequest);

    /// Render the placeholder page.
    fn load_placeholder(&mut self, window: &mut Self::Window, page: &Placeholder) -> CoreResult<()>;

    /// Navigate to `url`. `None` user agent means the web view default.
    fn navigate(
        &mut self,
        window: &mut Self::Window,
        url: &str,
        user_agent: Option<&str>,
    ) -> CoreResult<()>;

    /// Title of the loaded page.
    fn current_title(&self, window: &Self::Window) -> String;

    /// URL of the loaded page.
    fn current_url(&self, window: &Self::Window) -> String;

    /// Current geometry.
    fn window_bounds(&self, window: &Self::Window) -> Option<WindowBounds>;

    /// Whether the window is minimized.
    fn is_minimized(&self, window: &Self::Window) -> bool;

    /// Whether the window is maximized.
    fn is_maximized(&self, window: &Self::Window) -> bool;
}
