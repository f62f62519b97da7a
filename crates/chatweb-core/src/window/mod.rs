mod backend;
mod handle;
mod manager;

pub use {
    backend::{Placeholder, WindowBackend, WindowEvent, WindowSpec},
    handle::{CloseOutcome, WindowHandle, WindowState},
    manager::{BoundsWrite, WindowManager},
};

use std::time::Duration;

/// Trailing-edge delay before a burst of move/resize events is persisted.
pub const GEOMETRY_DEBOUNCE: Duration = Duration::from_millis(500);
/// Delay between showing the placeholder and navigating to the endpoint.
pub const NAVIGATION_DELAY: Duration = Duration::from_millis(120);
/// Size used for a window with no persisted geometry.
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (1200, 800);
