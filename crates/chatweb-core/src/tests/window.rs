use crate::{
    Clock, CloseOutcome, NAVIGATION_DELAY, ProfileRegistry, WindowBounds, WindowManager, WindowState,
    tests::support::{FakeHost, draft},
};

use std::time::Duration;

fn bounds(x: i32) -> WindowBounds {
    WindowBounds {
        x,
        y: 10,
        width: 900,
        height: 700,
    }
}

/// WHAT: New window shows a loading placeholder, then navigates after the delay
/// WHY: The window must paint something before the service responds
#[test]
#[allow(clippy::unwrap_used)]
fn given_profile_with_url_when_created_then_placeholder_then_navigation() {
    // Given: A profile with a URL and custom user agent
    let mut d = draft("a", "Work", "https://chat.example");
    d.user_agent = Some("UA/2".to_string());
    let registry = ProfileRegistry::from_drafts(&[d]);
    let mut host = FakeHost::new();
    let mut windows = WindowManager::default();

    // When: Creating the window
    let now = host.now();
    windows.create(&mut host, registry.primary().unwrap(), now).unwrap();

    // Then: Placeholder is up and navigation is pending
    let window = &host.windows["a"];
    assert_eq!(window.title, "Work");
    assert_eq!(
        window.placeholder.as_ref().map(|p| p.subtitle.as_str()),
        Some("Loading Work...")
    );
    assert!(window.navigations.is_empty());
    assert!(windows.get("a").unwrap().has_pending_navigation());

    // When: The delay elapses
    host.advance(NAVIGATION_DELAY);
    let now = host.now();
    windows.poll(&mut host, now);

    // Then: The endpoint is loaded with the user agent
    assert_eq!(
        host.windows["a"].navigations,
        vec![("https://chat.example".to_string(), Some("UA/2".to_string()))]
    );
    assert!(!windows.get("a").unwrap().has_pending_navigation());
}

/// WHAT: Profile without URL gets the configure placeholder and no navigation
/// WHY: The user needs a pointer to the configuration surface
#[test]
#[allow(clippy::unwrap_used)]
fn given_profile_without_url_when_created_then_configure_placeholder() {
    let registry = ProfileRegistry::from_drafts(&[draft("a", "Work", "")]);
    let mut host = FakeHost::new();
    let mut windows = WindowManager::default();

    let now = host.now();
    windows.create(&mut host, registry.primary().unwrap(), now).unwrap();

    let page = host.windows["a"].placeholder.clone().unwrap();
    assert!(page.show_actions);
    assert_eq!(page.subtitle, "Work has no service URL configured");
    assert_eq!(windows.next_deadline(), None);
}

/// WHAT: A burst of geometry events produces one write with the last bounds
/// WHY: Dragging a window must not hammer the config file
#[test]
#[allow(clippy::unwrap_used)]
fn given_ten_moves_when_debounce_elapses_then_single_write() {
    // Given: A live window
    let registry = ProfileRegistry::from_drafts(&[draft("a", "Work", "")]);
    let mut host = FakeHost::new();
    let mut windows = WindowManager::new(Duration::from_millis(500), NAVIGATION_DELAY);
    let now = host.now();
    windows.create(&mut host, registry.primary().unwrap(), now).unwrap();

    // When: Ten moves 50ms apart, polling between each
    let mut writes = Vec::new();
    for i in 0..10 {
        let now = host.now();
        windows.geometry_changed("a", bounds(i), now);
        writes.extend(windows.poll(&mut host, now));
        host.advance_ms(50);
    }
    host.advance_ms(500);
    let now = host.now();
    writes.extend(windows.poll(&mut host, now));

    // Then: Exactly one write, carrying the last geometry
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].profile_id, "a");
    assert_eq!(writes[0].bounds, bounds(9));
}

/// WHAT: Geometry of a maximized window is not persisted
/// WHY: Restoring would otherwise open a giant window
#[test]
#[allow(clippy::unwrap_used)]
fn given_maximized_window_when_debounce_elapses_then_no_write() {
    let registry = ProfileRegistry::from_drafts(&[draft("a", "Work", "")]);
    let mut host = FakeHost::new();
    let mut windows = WindowManager::default();
    let now = host.now();
    windows.create(&mut host, registry.primary().unwrap(), now).unwrap();
    host.windows.get_mut("a").unwrap().maximized = true;

    windows.geometry_changed("a", bounds(1), now);
    host.advance_ms(600);
    let now = host.now();
    let writes = windows.poll(&mut host, now);

    assert!(writes.is_empty());
    assert!(!windows.get("a").unwrap().has_pending_bounds());
}

/// WHAT: Close hides unless quitting
/// WHY: Closing a chat window should keep it running in the tray
#[test]
#[allow(clippy::unwrap_used)]
fn given_live_window_when_closed_then_hidden_unless_quitting() {
    // Given: A live window
    let registry = ProfileRegistry::from_drafts(&[draft("a", "Work", "")]);
    let mut host = FakeHost::new();
    let mut windows = WindowManager::default();
    let now = host.now();
    windows.create(&mut host, registry.primary().unwrap(), now).unwrap();

    // When/Then: Normal close hides
    assert_eq!(windows.close(&mut host, "a", false), CloseOutcome::Hidden);
    assert_eq!(windows.state("a"), WindowState::Hidden);
    assert!(!host.windows["a"].visible);

    // When/Then: Close while quitting destroys
    assert_eq!(windows.close(&mut host, "a", true), CloseOutcome::Destroyed);
    assert_eq!(windows.state("a"), WindowState::Absent);
    assert!(host.windows.is_empty());
    assert_eq!(windows.close(&mut host, "a", true), CloseOutcome::Missing);
}

/// WHAT: Show reveals a hidden window instead of creating another
/// WHY: One window per profile
#[test]
#[allow(clippy::unwrap_used)]
fn given_hidden_window_when_shown_then_reused_and_focused() {
    let registry = ProfileRegistry::from_drafts(&[draft("a", "Work", "")]);
    let profile = registry.primary().unwrap();
    let mut host = FakeHost::new();
    let mut windows = WindowManager::default();
    let now = host.now();

    assert!(windows.show(&mut host, profile, now).unwrap());
    windows.hide(&mut host, "a");
    assert!(!windows.show(&mut host, profile, now).unwrap());

    assert_eq!(host.windows_created, 1);
    assert!(host.windows["a"].visible);
    assert_eq!(host.windows["a"].focus_count, 1);
    assert_eq!(windows.state("a"), WindowState::Visible);
}

/// WHAT: Destroy bypasses hide-to-tray
/// WHY: Removed profiles must not leave hidden windows behind
#[test]
#[allow(clippy::unwrap_used)]
fn given_live_window_when_destroyed_then_gone() {
    let registry = ProfileRegistry::from_drafts(&[draft("a", "Work", "")]);
    let mut host = FakeHost::new();
    let mut windows = WindowManager::default();
    let now = host.now();
    windows.create(&mut host, registry.primary().unwrap(), now).unwrap();
    windows.attach_unread(registry.primary().unwrap());

    assert!(windows.destroy(&mut host, "a"));
    assert!(!windows.destroy(&mut host, "a"));
    assert_eq!(host.windows_destroyed, 1);
    assert!(windows.subscription("a").is_none());
}

/// WHAT: Attaching again replaces the previous subscription
/// WHY: Reloads must not stack listeners
#[test]
#[allow(clippy::unwrap_used)]
fn given_attached_window_when_reattached_then_single_newer_subscription() {
    let registry = ProfileRegistry::from_drafts(&[draft("a", "Work", "")]);
    let mut host = FakeHost::new();
    let mut windows = WindowManager::default();
    let now = host.now();
    windows.create(&mut host, registry.primary().unwrap(), now).unwrap();

    let first = windows.attach_unread(registry.primary().unwrap()).unwrap().generation();
    let second = windows.attach_unread(registry.primary().unwrap()).unwrap().generation();

    assert!(second > first);
    assert_eq!(windows.subscription("a").unwrap().generation(), second);
}

/// WHAT: Navigation failures are logged, not propagated
/// WHY: One offline service must not break the other windows
#[test]
#[allow(clippy::unwrap_used)]
fn given_navigation_failure_when_polled_then_window_survives() {
    let registry = ProfileRegistry::from_drafts(&[draft("a", "Work", "https://chat.example")]);
    let mut host = FakeHost::new();
    host.fail_navigation = true;
    let mut windows = WindowManager::default();
    let now = host.now();
    windows.create(&mut host, registry.primary().unwrap(), now).unwrap();

    host.advance(NAVIGATION_DELAY);
    let now = host.now();
    windows.poll(&mut host, now);

    assert!(windows.contains("a"));
    assert!(!windows.get("a").unwrap().has_pending_navigation());
}
