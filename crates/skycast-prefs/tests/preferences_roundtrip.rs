//! Preferences written by one store instance must come back unchanged in the next.

use std::sync::Arc;

use serde_json::json;
use skycast_core::TemperatureUnit;
use skycast_prefs::{
    FavoriteCity, FileStore, KeyValueStore, MemoryStore, PreferenceStore, SqliteStore,
    FAVORITES_SLOT, RECENT_SEARCHES_SLOT, UNIT_SLOT,
};

fn london() -> FavoriteCity {
    serde_json::from_value(json!({
        "id": 2643743,
        "name": "London",
        "sys": {"country": "GB", "sunrise": 1700000000, "sunset": 1700030000},
        "main": {"temp": 11.4, "feels_like": 10.1, "humidity": 81},
        "weather": [{"main": "Clouds", "description": "broken clouds", "icon": "04d"}]
    }))
    .unwrap()
}

fn tokyo() -> FavoriteCity {
    serde_json::from_value(json!({"id": 1850147, "name": "Tokyo", "sys": {"country": "JP"}})).unwrap()
}

fn populate(prefs: &mut PreferenceStore) {
    prefs.add_to_favorites(london());
    prefs.add_to_favorites(tokyo());
    prefs.toggle_unit();
    for city in ["Paris", "Tokyo", "Lima", "Paris"] {
        prefs.add_to_recent_searches(city);
    }
}

fn assert_same_state(a: &PreferenceStore, b: &PreferenceStore) {
    assert_eq!(a.favorites(), b.favorites());
    assert_eq!(a.unit(), b.unit());
    assert_eq!(a.recent_searches(), b.recent_searches());
}

#[test]
fn test_roundtrip_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let backing: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));

    let mut first = PreferenceStore::open(backing.clone());
    populate(&mut first);

    let second = PreferenceStore::open(Arc::new(FileStore::new(dir.path())));
    assert_same_state(&first, &second);
    assert_eq!(second.unit(), TemperatureUnit::Fahrenheit);
    assert_eq!(second.recent_searches(), ["Paris", "Lima", "Tokyo"]);
}

#[test]
fn test_roundtrip_through_sqlite_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.db");

    let mut first = PreferenceStore::open(Arc::new(SqliteStore::open(&path).unwrap()));
    populate(&mut first);
    drop(first);

    let mut reference = PreferenceStore::open(Arc::new(MemoryStore::new()));
    populate(&mut reference);

    let second = PreferenceStore::open(Arc::new(SqliteStore::open(&path).unwrap()));
    assert_same_state(&reference, &second);
}

#[test]
fn test_slot_layout_matches_documented_shapes() {
    let backing = Arc::new(MemoryStore::new());
    let mut prefs = PreferenceStore::open(backing.clone());
    populate(&mut prefs);

    let favorites: serde_json::Value =
        serde_json::from_str(&backing.raw(FAVORITES_SLOT).unwrap()).unwrap();
    assert_eq!(favorites[0]["id"], json!(2643743));
    assert_eq!(favorites[0]["main"]["temp"], json!(11.4));
    assert_eq!(favorites[1]["name"], json!("Tokyo"));

    assert_eq!(backing.raw(UNIT_SLOT).as_deref(), Some(r#""F""#));
    assert_eq!(
        backing.raw(RECENT_SEARCHES_SLOT).as_deref(),
        Some(r#"["Paris","Lima","Tokyo"]"#)
    );
}

#[test]
fn test_reads_slots_written_by_browser_build() {
    let backing = Arc::new(
        MemoryStore::new()
            .with_slot(FAVORITES_SLOT, r#"[{"id":524901,"name":"Moscow","coord":{"lon":37.62,"lat":55.75}}]"#)
            .with_slot(UNIT_SLOT, r#""F""#)
            .with_slot(RECENT_SEARCHES_SLOT, r#"["Moscow","Kyiv"]"#),
    );
    let prefs = PreferenceStore::open(backing);

    assert!(prefs.is_favorite(524901));
    assert_eq!(prefs.favorite_names(), vec!["Moscow"]);
    assert_eq!(prefs.unit(), TemperatureUnit::Fahrenheit);
    assert_eq!(prefs.recent_searches(), ["Moscow", "Kyiv"]);
}

#[test]
fn test_unreadable_storage_yields_defaults() {
    let backing = Arc::new(
        MemoryStore::new()
            .with_slot(UNIT_SLOT, r#""F""#)
            .with_slot(RECENT_SEARCHES_SLOT, r#"["Paris"]"#),
    );
    backing.set_fail_reads(true);

    let mut prefs = PreferenceStore::open(backing.clone());
    assert!(prefs.favorites().is_empty());
    assert_eq!(prefs.unit(), TemperatureUnit::Celsius);
    assert!(prefs.recent_searches().is_empty());

    prefs.add_to_recent_searches("Oslo");
    assert_eq!(backing.raw(RECENT_SEARCHES_SLOT).as_deref(), Some(r#"["Oslo"]"#));
}

#[test]
fn test_corrupt_slot_only_resets_that_slot() {
    let backing = Arc::new(
        MemoryStore::new()
            .with_slot(FAVORITES_SLOT, "{{not json")
            .with_slot(UNIT_SLOT, r#""F""#),
    );
    let prefs = PreferenceStore::open(backing);

    assert!(prefs.favorites().is_empty());
    assert_eq!(prefs.unit(), TemperatureUnit::Fahrenheit);
}
