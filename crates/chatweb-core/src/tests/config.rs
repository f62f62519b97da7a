use crate::{
    CONFIG_FILE_NAME, ConfigDocument, ConfigService, ConfigStore, JsonConfigStore,
    MemoryConfigStore, ProfileRegistry, WindowBounds,
    tests::support::{document, draft},
};

use std::{fs, path::PathBuf, rc::Rc};

use uuid::Uuid;

fn temp_config_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("chatweb-test-{}", Uuid::new_v4()))
        .join(CONFIG_FILE_NAME)
}

/// WHAT: Saved registry is written as a profiles document and reloads intact
/// WHY: Profiles must survive restarts
#[test]
#[allow(clippy::unwrap_used)]
fn given_json_store_when_saved_then_reloads_same_registry() {
    // Given: A store in a directory that does not exist yet
    let path = temp_config_path();
    let store = JsonConfigStore::new(&path);
    let registry = ProfileRegistry::from_drafts(&[
        draft("a", "A", "https://a.example"),
        draft("b", "B", ""),
    ]);

    // When: Saving then loading
    store.save(&registry).unwrap();
    let loaded = store.load().unwrap().unwrap();

    // Then: The document round-trips and no temp file is left behind
    assert_eq!(ProfileRegistry::from_document(&loaded), registry);
    assert!(!path.with_extension("json.tmp").exists());
    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"profiles\""));
    assert!(raw.contains("\"trayTitle\""));

    fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

/// WHAT: Missing file loads as nothing and clearing it succeeds
/// WHY: First launch and double clears are normal
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_file_when_loading_or_clearing_then_ok() {
    let store = JsonConfigStore::new(temp_config_path());

    assert!(store.load().unwrap().is_none());
    assert!(store.clear().is_ok());
}

/// WHAT: Corrupt file is reported as a read error
/// WHY: The service must fall back to an empty registry, not crash
#[test]
#[allow(clippy::unwrap_used)]
fn given_corrupt_file_when_loading_then_service_starts_empty() {
    // Given: A file that is not JSON
    let path = temp_config_path();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ not json").unwrap();
    let store = JsonConfigStore::new(&path);

    // When: Loading directly and through the service
    let direct = store.load();
    let service = ConfigService::load(Box::new(store));

    // Then: Error surfaced directly, empty registry through the service
    assert!(direct.is_err());
    assert!(service.get().is_empty());

    fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

/// WHAT: Partial updates keep keys they do not mention
/// WHY: The configuration surface may submit only some fields
#[test]
#[allow(clippy::unwrap_used)]
fn given_partial_document_when_set_then_merged_and_persisted() {
    // Given: A service with one profile
    let store = Rc::new(MemoryConfigStore::new());
    let mut service = ConfigService::load(Box::new(Rc::clone(&store)));
    service.set(document(vec![draft("a", "A", "https://a.example")]));

    // When: Submitting a document without profiles
    let registry = service
        .set(ConfigDocument {
            title: Some("ignored legacy".to_string()),
            ..ConfigDocument::default()
        })
        .clone();

    // Then: The profile list is unchanged and was written twice
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.primary().unwrap().id, "a");
    assert_eq!(store.write_count(), 2);
    assert!(store.contents().unwrap().contains("https://a.example"));
}

/// WHAT: Write failures keep the new registry in memory
/// WHY: A read-only disk must not undo the user's change for this session
#[test]
fn given_failing_store_when_set_then_cache_updated() {
    let store = Rc::new(MemoryConfigStore::new());
    store.set_fail_writes(true);
    let mut service = ConfigService::load(Box::new(Rc::clone(&store)));

    service.set(document(vec![draft("a", "A", "")]));

    assert!(service.get().contains("a"));
    assert_eq!(store.write_count(), 0);
    assert!(store.contents().is_none());
}

/// WHAT: Clear drops the stored document and the cache
/// WHY: Reset must leave no profiles behind
#[test]
fn given_profiles_when_cleared_then_store_and_cache_empty() {
    let store = Rc::new(MemoryConfigStore::new());
    let mut service = ConfigService::load(Box::new(Rc::clone(&store)));
    service.set(document(vec![draft("a", "A", "")]));

    service.clear();

    assert!(service.get().is_empty());
    assert!(store.contents().is_none());
}

/// WHAT: Geometry for unknown profiles is dropped without a write
/// WHY: Debounced writes may outlive the profile
#[test]
fn given_unknown_profile_when_updating_bounds_then_nothing_written() {
    let store = Rc::new(MemoryConfigStore::new());
    let mut service = ConfigService::load(Box::new(Rc::clone(&store)));
    service.set(document(vec![draft("a", "A", "")]));
    let bounds = WindowBounds {
        x: 1,
        y: 2,
        width: 300,
        height: 400,
    };

    service.update_bounds("ghost", bounds);
    service.update_bounds("a", bounds);

    assert_eq!(store.write_count(), 2);
    assert_eq!(
        service.get().get("a").and_then(|p| p.window_bounds),
        Some(bounds)
    );
}

/// WHAT: Stored JSON is loaded on startup
/// WHY: The service is the single reader of the store
#[test]
fn given_stored_contents_when_loaded_then_registry_populated() {
    let store = MemoryConfigStore::with_contents(
        r#"{"profiles": [{"id": "a", "name": "A", "attentionKeywords": ["Teams"]}]}"#,
    );

    let service = ConfigService::load(Box::new(store));

    let profile = service.get().get("a");
    assert_eq!(
        profile.map(|p| p.attention_keywords.clone()),
        Some(vec!["teams".to_string()])
    );
}
