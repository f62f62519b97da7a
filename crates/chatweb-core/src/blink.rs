//! Tray icon animation while a profile is unread.

use crate::{AttentionChange, IconVariant, ProfileRegistry, TrayBackend, TrayManager};

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use tracing::debug;

/// Time between blink frames.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(900);

#[derive(Debug, Clone, Copy)]
struct BlinkTimer {
    notify_frame: bool,
    next_tick: Instant,
}

/// Owns at most one blink timer per profile.
#[derive(Debug)]
pub struct BlinkScheduler {
    timers: HashMap<String, BlinkTimer>,
    interval: Duration,
}

impl Default for BlinkScheduler {
    fn default() -> Self {
        Self::new(BLINK_INTERVAL)
    }
}

impl BlinkScheduler {
    /// Scheduler ticking every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            timers: HashMap::new(),
            interval,
        }
    }

    /// Whether a timer runs for this profile.
    pub fn is_blinking(&self, profile_id: &str) -> bool {
        self.timers.contains_key(profile_id)
    }

    /// Number of running timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Frame currently painted by a running timer.
    pub fn frame(&self, profile_id: &str) -> Option<IconVariant> {
        self.timers.get(profile_id).map(|t| {
            if t.notify_frame {
                IconVariant::Notify
            } else {
                IconVariant::Idle
            }
        })
    }

    /// Earliest pending tick.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|t| t.next_tick).min()
    }

    /// React to an attention transition.
    pub fn on_attention<H, T>(
        &mut self,
        host: &mut H,
        change: &AttentionChange,
        trays: &mut TrayManager<T>,
        registry: &ProfileRegistry,
        now: Instant,
    ) where
        H: TrayBackend<Tray = T>,
    {
        if change.unread {
            self.start(host, &change.profile_id, trays, registry, now);
        } else {
            self.stop(host, &change.profile_id, trays, registry);
        }
    }

    /// Start blinking: paint the notify frame now and schedule the next tick.
    /// Does nothing without a tray or when a timer already runs.
    pub fn start<H, T>(
        &mut self,
        host: &mut H,
        profile_id: &str,
        trays: &mut TrayManager<T>,
        registry: &ProfileRegistry,
        now: Instant,
    ) where
        H: TrayBackend<Tray = T>,
    {
        if !trays.contains(profile_id) || self.timers.contains_key(profile_id) {
            return;
        }

        trays.apply_icon(
            host,
            profile_id,
            registry.get(profile_id),
            IconVariant::Notify,
        );
        self.timers.insert(
            profile_id.to_string(),
            BlinkTimer {
                notify_frame: true,
                next_tick: now + self.interval,
            },
        );
        debug!(profile_id, "Blink started");
    }

    /// Stop blinking and leave the idle frame painted. A missing tray is
    /// tolerated.
    pub fn stop<H, T>(
        &mut self,
        host: &mut H,
        profile_id: &str,
        trays: &mut TrayManager<T>,
        registry: &ProfileRegistry,
    ) where
        H: TrayBackend<Tray = T>,
    {
        if self.timers.remove(profile_id).is_some() {
            debug!(profile_id, "Blink stopped");
        }
        trays.apply_icon(host, profile_id, registry.get(profile_id), IconVariant::Idle);
    }

    /// Drop a timer without repainting, for trays about to be destroyed.
    pub fn cancel(&mut self, profile_id: &str) {
        if self.timers.remove(profile_id).is_some() {
            debug!(profile_id, "Blink cancelled");
        }
    }

    /// Drop every timer without repainting.
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Advance every due timer by one frame. Timers whose tray vanished are
    /// discarded.
    pub fn poll<H, T>(
        &mut self,
        host: &mut H,
        trays: &mut TrayManager<T>,
        registry: &ProfileRegistry,
        now: Instant,
    ) where
        H: TrayBackend<Tray = T>,
    {
        let interval = self.interval;
        let mut orphaned = Vec::new();

        for (profile_id, timer) in self.timers.iter_mut() {
            if timer.next_tick > now {
                continue;
            }
            if !trays.contains(profile_id) {
                orphaned.push(profile_id.clone());
                continue;
            }

            timer.notify_frame = !timer.notify_frame;
            timer.next_tick = now + interval;
            let variant = if timer.notify_frame {
                IconVariant::Notify
            } else {
                IconVariant::Idle
            };
            trays.apply_icon(host, profile_id, registry.get(profile_id), variant);
        }

        for profile_id in orphaned {
            self.timers.remove(&profile_id);
            debug!(profile_id = %profile_id, "Blink dropped, tray is gone");
        }
    }
}
