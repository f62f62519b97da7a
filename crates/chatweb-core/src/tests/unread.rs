use crate::{
    AttentionChange, ProfileRegistry, UnreadTracker, evaluate, matches_attention_targets,
    title_indicates_unread,
    tests::support::draft,
    unread::{BADGE_PATTERNS, badge_patterns},
};

/// WHAT: Every badge pattern compiles into the shared set
/// WHY: A pattern that fails to compile would silently disable unread detection
#[test]
#[allow(clippy::panic)]
fn given_badge_patterns_when_compiled_then_all_present() {
    // Given/When: The lazily compiled set
    let badges = match badge_patterns() {
        Ok(badges) => badges,
        Err(e) => panic!("badge patterns failed to compile: {e}"),
    };

    // Then: Nothing was dropped
    assert_eq!(badges.len(), BADGE_PATTERNS.len());
}

/// WHAT: Every badge shape seen in chat titles is recognized
/// WHY: Tray blinking is driven entirely by these patterns
#[test]
fn given_badged_titles_when_checked_then_unread() {
    // Given: Titles using each badge convention
    let titles = [
        "(3) Chat",
        "Chat ( 12 )",
        "5 Chat",
        "  7 - Messenger",
        "Inbox 4 - Mail",
        "INBOX12",
        "Team - 2 new",
        "Team - 9 UNREAD messages",
    ];

    // When/Then: All are recognized
    for title in titles {
        assert!(title_indicates_unread(title), "expected unread: {title}");
    }
}

/// WHAT: Plain titles are not mistaken for badges
/// WHY: False positives make the tray blink forever
#[test]
fn given_plain_titles_when_checked_then_idle() {
    // Given: Titles without a count
    let titles = ["", "   ", "Chat", "Messenger - Team", "New messages", "Room2"];

    // When/Then: None is unread
    for title in titles {
        assert!(!title_indicates_unread(title), "expected idle: {title}");
    }
}

/// WHAT: Empty keyword filter scopes every profile in
/// WHY: Most profiles never configure keywords
#[test]
fn given_no_keywords_when_matching_then_every_url_in_scope() {
    // Given: A profile without keywords
    let registry = ProfileRegistry::from_drafts(&[draft("a", "A", "https://chat.example")]);
    let profile = &registry.profiles()[0];

    // When/Then: Any URL matches
    assert!(matches_attention_targets(profile, "https://elsewhere.example"));
    assert!(matches_attention_targets(profile, ""));
}

/// WHAT: Keywords match the configured or current URL case-insensitively
/// WHY: Services redirect to other hosts after login
#[test]
fn given_keywords_when_matching_then_configured_or_current_url_counts() {
    // Given: A profile filtered on "Teams"
    let mut d = draft("a", "A", "https://chat.example");
    d.attention_keywords = Some(vec!["  Teams ".to_string()]);
    let registry = ProfileRegistry::from_drafts(&[d]);
    let profile = &registry.profiles()[0];

    // When/Then: Only a URL carrying the keyword matches
    assert!(matches_attention_targets(profile, "https://TEAMS.example/chat"));
    assert!(!matches_attention_targets(profile, "https://mail.example"));
    assert!(evaluate("(2) Chat", profile, "https://teams.example"));
    assert!(!evaluate("(2) Chat", profile, "https://mail.example"));
}

/// WHAT: Tracker only reports real transitions
/// WHY: Repeated title events must not restart blink timers
#[test]
fn given_tracker_when_state_repeats_then_no_change_reported() {
    // Given: A fresh tracker
    let mut tracker = UnreadTracker::new();

    // When: Marking unread twice, then clearing twice
    let first = tracker.set_unread("a");
    let second = tracker.set_unread("a");
    let cleared = tracker.clear_unread("a");
    let cleared_again = tracker.clear_unread("a");

    // Then: Only the transitions are reported
    assert_eq!(
        first,
        Some(AttentionChange {
            profile_id: "a".to_string(),
            unread: true
        })
    );
    assert_eq!(second, None);
    assert_eq!(
        cleared,
        Some(AttentionChange {
            profile_id: "a".to_string(),
            unread: false
        })
    );
    assert_eq!(cleared_again, None);
    assert!(!tracker.is_unread("a"));
}

/// WHAT: Clearing a profile that was never unread is silent
/// WHY: Window teardown always clears, whatever the state
#[test]
fn given_idle_profile_when_cleared_then_no_change() {
    let mut tracker = UnreadTracker::new();

    assert_eq!(tracker.apply("a", false), None);
    assert_eq!(tracker.unread_ids().count(), 0);
}
