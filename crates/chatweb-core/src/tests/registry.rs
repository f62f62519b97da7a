use crate::{
    ConfigDocument, DEFAULT_PROFILE_NAME, ProfileDraft, ProfileRegistry, WindowBounds,
    tests::support::draft,
};

/// WHAT: Display fields fall back name → title → position
/// WHY: Users often fill in only one of name or title
#[test]
#[allow(clippy::unwrap_used)]
fn given_partial_drafts_when_normalized_then_fallbacks_apply() {
    // Given: One draft with only a title, one with nothing
    let drafts = [
        ProfileDraft {
            id: Some("a".to_string()),
            title: Some("  Team Chat ".to_string()),
            ..ProfileDraft::default()
        },
        ProfileDraft {
            id: Some("b".to_string()),
            ..ProfileDraft::default()
        },
    ];

    // When: Normalizing
    let registry = ProfileRegistry::from_drafts(&drafts);

    // Then: Name, title and tray title are all resolved
    let a = registry.get("a").unwrap();
    assert_eq!(a.name, "Team Chat");
    assert_eq!(a.title, "Team Chat");
    assert_eq!(a.tray_tooltip(), "Team Chat");

    let b = registry.get("b").unwrap();
    assert_eq!(b.name, "Profile 2");
    assert_eq!(b.title, "Profile 2");
    assert_eq!(b.tray_tooltip(), "Profile 2");
    assert!(b.endpoint().is_none());
}

/// WHAT: Tray title prefers its own value, then the window title
/// WHY: The tooltip may be shorter than the window title
#[test]
#[allow(clippy::unwrap_used)]
fn given_tray_title_when_normalized_then_kept() {
    let mut d = draft("a", "Work", "https://chat.example");
    d.title = Some("Work Chat".to_string());
    d.tray_title = Some("W".to_string());

    let registry = ProfileRegistry::from_drafts(&[d]);
    let profile = registry.primary().unwrap();

    assert_eq!(profile.tray_tooltip(), "W");
    assert_eq!(profile.window_title(), "Work Chat");
    assert_eq!(profile.menu_label(), "Work");
}

/// WHAT: Without its own tray title the tooltip follows the window title
/// WHY: Renaming a profile after a save must still rename its tooltip
#[test]
#[allow(clippy::unwrap_used)]
fn given_saved_profile_without_tray_title_when_retitled_then_tooltip_follows() {
    // Given: A profile saved once, round-tripped through drafts
    let mut d = draft("a", "Work", "https://chat.example");
    d.title = Some("Work Chat".to_string());
    let saved = ProfileRegistry::from_drafts(&[d]);
    assert_eq!(saved.primary().unwrap().tray_title, "");

    // When: The window title is edited on the stored drafts
    let mut drafts = saved.to_drafts();
    drafts[0].title = Some("Team Room".to_string());
    let edited = ProfileRegistry::from_drafts(&drafts);

    // Then: The tooltip follows the new title
    let profile = edited.primary().unwrap();
    assert_eq!(profile.tray_tooltip(), "Team Room");
    assert_eq!(profile.tray_title, "");
}

/// WHAT: Missing and duplicate ids are replaced with generated ones
/// WHY: Windows and trays are keyed by id
#[test]
fn given_missing_and_duplicate_ids_when_normalized_then_ids_unique() {
    // Given: A missing id and a duplicate
    let drafts = [
        draft("same", "A", ""),
        draft("same", "B", ""),
        ProfileDraft::default(),
    ];

    // When: Normalizing
    let registry = ProfileRegistry::from_drafts(&drafts);

    // Then: All ids are distinct and generated ids carry their position
    let ids: Vec<&str> = registry.ids().collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids[0], "same");
    assert_ne!(ids[1], "same");
    assert!(ids[1].starts_with("profile-2-"));
    assert!(ids[2].starts_with("profile-3-"));
    assert_ne!(ids[1], ids[2]);
}

/// WHAT: Normalizing a normalized registry changes nothing
/// WHY: Every save round-trips through the drafts
#[test]
#[allow(clippy::unwrap_used)]
fn given_normalized_registry_when_renormalized_then_identical() {
    let mut d = draft("a", "A", " https://chat.example ");
    d.attention_keywords = Some(vec!["Chat".to_string(), "  ".to_string()]);
    d.window_bounds = Some(WindowBounds {
        x: 10,
        y: 20,
        width: 800,
        height: 600,
    });
    let registry = ProfileRegistry::from_drafts(&[d, ProfileDraft::default()]);

    let again = ProfileRegistry::from_drafts(&registry.to_drafts());

    assert_eq!(again, registry);
    assert_eq!(registry.primary().unwrap().url, "https://chat.example");
    assert_eq!(registry.primary().unwrap().attention_keywords, vec!["chat"]);
}

/// WHAT: A legacy single-profile document becomes one profile
/// WHY: Files written before multi-profile support must keep working
#[test]
#[allow(clippy::unwrap_used)]
fn given_legacy_document_when_loaded_then_single_profile() {
    // Given: Top-level fields and no profiles list
    let document: ConfigDocument = serde_json::from_str(
        r#"{"url": "https://chat.example", "title": "Old Chat", "userAgent": "UA/1"}"#,
    )
    .unwrap();

    // When: Building the registry
    let registry = ProfileRegistry::from_document(&document);

    // Then: One profile with the legacy values
    assert_eq!(registry.len(), 1);
    let profile = registry.primary().unwrap();
    assert_eq!(profile.id, "profile-1");
    assert_eq!(profile.name, "Old Chat");
    assert_eq!(profile.url, "https://chat.example");
    assert_eq!(profile.custom_user_agent(), Some("UA/1"));
}

/// WHAT: Legacy profile without a title gets the default name
/// WHY: The tray menu needs a label
#[test]
#[allow(clippy::unwrap_used)]
fn given_legacy_url_only_when_loaded_then_default_name() {
    let document: ConfigDocument =
        serde_json::from_str(r#"{"profiles": [], "url": "https://chat.example"}"#).unwrap();

    let registry = ProfileRegistry::from_document(&document);

    assert_eq!(registry.primary().unwrap().name, DEFAULT_PROFILE_NAME);
}

/// WHAT: An empty document yields no profiles
/// WHY: First launch opens the configuration surface instead
#[test]
fn given_empty_document_when_loaded_then_empty_registry() {
    let registry = ProfileRegistry::from_document(&ConfigDocument::default());

    assert!(registry.is_empty());
    assert!(registry.primary().is_none());
}

/// WHAT: Geometry updates only touch known profiles
/// WHY: A stale debounce may fire after the profile was removed
#[test]
fn given_unknown_id_when_setting_bounds_then_rejected() {
    let mut registry = ProfileRegistry::from_drafts(&[draft("a", "A", "")]);
    let bounds = WindowBounds {
        x: 0,
        y: 0,
        width: 100,
        height: 100,
    };

    assert!(registry.set_bounds("a", bounds));
    assert!(!registry.set_bounds("ghost", bounds));
    assert_eq!(registry.get("a").and_then(|p| p.window_bounds), Some(bounds));
}
