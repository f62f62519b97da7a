use crate::{TrayBackend, WindowBackend};

use std::time::Instant;

/// Source of the current time for engine timers.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Everything the engine needs from the platform.
pub trait Host: WindowBackend + TrayBackend + Clock {}

impl<H> Host for H where H: WindowBackend + TrayBackend + Clock {}
