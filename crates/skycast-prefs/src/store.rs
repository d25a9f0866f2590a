use std::collections::HashSet;
use std::sync::Arc;

use skycast_core::TemperatureUnit;

use crate::binding::PersistentBinding;
use crate::storage::KeyValueStore;
use crate::types::FavoriteCity;

pub const FAVORITES_SLOT: &str = "weatherFavorites";
pub const UNIT_SLOT: &str = "temperatureUnit";
pub const RECENT_SEARCHES_SLOT: &str = "recentSearches";

/// Recent search history is capped at this many entries.
pub const MAX_RECENT_SEARCHES: usize = 5;

/// User preferences: favorite cities, temperature unit and recent searches.
///
/// Each field is bound to its own slot. Mutations go through the methods
/// below only, and each one that changes state writes its slot once.
/// Storage faults are logged by the bindings and never returned.
#[derive(Debug)]
pub struct PreferenceStore {
    favorites: PersistentBinding<Vec<FavoriteCity>>,
    unit: PersistentBinding<TemperatureUnit>,
    recent_searches: PersistentBinding<Vec<String>>,
}

impl PreferenceStore {
    /// Seed all three slots from `store`.
    ///
    /// Stored data that breaks an invariant (duplicate ids, repeated or excess
    /// searches) is repaired in memory; the slot is rewritten on the next mutation.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let favorites = PersistentBinding::new(store.clone(), FAVORITES_SLOT, Vec::new())
            .normalized(dedup_favorites);
        let unit = PersistentBinding::new(store.clone(), UNIT_SLOT, TemperatureUnit::default());
        let recent_searches = PersistentBinding::new(store, RECENT_SEARCHES_SLOT, Vec::new())
            .normalized(dedup_searches);

        tracing::debug!(
            favorites = favorites.get().len(),
            unit = unit.get().symbol(),
            recent = recent_searches.get().len(),
            "Preferences loaded"
        );

        Self {
            favorites,
            unit,
            recent_searches,
        }
    }

    pub fn favorites(&self) -> &[FavoriteCity] {
        self.favorites.get()
    }

    pub fn unit(&self) -> TemperatureUnit {
        *self.unit.get()
    }

    pub fn recent_searches(&self) -> &[String] {
        self.recent_searches.get()
    }

    pub fn is_favorite(&self, city_id: i64) -> bool {
        self.favorites.get().iter().any(|fav| fav.id == city_id)
    }

    /// Append `city` unless a favorite with the same id exists.
    ///
    /// Returns whether it was added. A duplicate is a silent no-op and does not write.
    pub fn add_to_favorites(&mut self, city: FavoriteCity) -> bool {
        if self.is_favorite(city.id) {
            tracing::debug!(city_id = city.id, "Already a favorite");
            return false;
        }
        tracing::info!(city_id = city.id, name = city.name().unwrap_or("?"), "Adding favorite");
        self.favorites.update(|favs| favs.push(city));
        true
    }

    /// Remove the favorite with `city_id`, if any. The slot is written either way.
    pub fn remove_from_favorites(&mut self, city_id: i64) -> bool {
        let removed = self.favorites.update(|favs| {
            let before = favs.len();
            favs.retain(|fav| fav.id != city_id);
            favs.len() != before
        });
        if removed {
            tracing::info!(city_id, "Removed favorite");
        }
        removed
    }

    /// Names recorded in the favorite snapshots, in favorite order.
    pub fn favorite_names(&self) -> Vec<&str> {
        self.favorites
            .get()
            .iter()
            .filter_map(FavoriteCity::name)
            .collect()
    }

    /// Flip between Celsius and Fahrenheit, returning the new unit.
    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        let next = self.unit().toggled();
        self.unit.set(next);
        tracing::info!(unit = next.symbol(), "Temperature unit changed");
        next
    }

    /// Record a search: drop any earlier identical entry, put this one first,
    /// then keep the newest [`MAX_RECENT_SEARCHES`].
    pub fn add_to_recent_searches(&mut self, city_name: impl Into<String>) {
        let city_name = city_name.into();
        self.recent_searches.update(|searches| {
            searches.retain(|s| *s != city_name);
            searches.insert(0, city_name);
            searches.truncate(MAX_RECENT_SEARCHES);
        });
    }
}

fn dedup_favorites(favorites: &mut Vec<FavoriteCity>) {
    let mut seen = HashSet::new();
    let before = favorites.len();
    favorites.retain(|fav| seen.insert(fav.id));
    if favorites.len() != before {
        tracing::warn!(
            dropped = before - favorites.len(),
            "Stored favorites contained duplicate ids"
        );
    }
}

fn dedup_searches(searches: &mut Vec<String>) {
    let mut seen = HashSet::new();
    searches.retain(|s| seen.insert(s.clone()));
    searches.truncate(MAX_RECENT_SEARCHES);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::{json, Map};

    fn city(id: i64, name: &str) -> FavoriteCity {
        let mut snapshot = Map::new();
        snapshot.insert("name".into(), json!(name));
        FavoriteCity::new(id, snapshot)
    }

    fn fresh() -> (Arc<MemoryStore>, PreferenceStore) {
        let backing = Arc::new(MemoryStore::new());
        let prefs = PreferenceStore::open(backing.clone());
        (backing, prefs)
    }

    #[test]
    fn test_defaults() {
        let (_, prefs) = fresh();
        assert!(prefs.favorites().is_empty());
        assert_eq!(prefs.unit(), TemperatureUnit::Celsius);
        assert!(prefs.recent_searches().is_empty());
    }

    #[test]
    fn test_duplicate_favorite_is_noop() {
        let (backing, mut prefs) = fresh();

        assert!(prefs.add_to_favorites(city(1, "London")));
        let mut other = city(1, "Londres");
        other.snapshot.insert("temp".into(), json!(3.5));
        assert!(!prefs.add_to_favorites(other));

        assert!(prefs.is_favorite(1));
        assert_eq!(prefs.favorites().len(), 1);
        assert_eq!(prefs.favorites()[0].name(), Some("London"));
        assert_eq!(backing.write_attempts(), 1);
    }

    #[test]
    fn test_favorites_keep_insertion_order() {
        let (_, mut prefs) = fresh();
        for (id, name) in [(30, "Oslo"), (10, "Lima"), (20, "Rome")] {
            prefs.add_to_favorites(city(id, name));
        }
        let ids: Vec<i64> = prefs.favorites().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
        assert_eq!(prefs.favorite_names(), vec!["Oslo", "Lima", "Rome"]);
    }

    #[test]
    fn test_dedup_holds_for_any_sequence() {
        let (_, mut prefs) = fresh();
        for id in [3, 1, 3, 2, 1, 1, 4, 2, 3] {
            prefs.add_to_favorites(city(id, "x"));
        }
        let ids: Vec<i64> = prefs.favorites().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_remove_favorite() {
        let (backing, mut prefs) = fresh();
        prefs.add_to_favorites(city(1, "London"));
        prefs.add_to_favorites(city(2, "Paris"));

        assert!(prefs.remove_from_favorites(1));
        assert!(!prefs.is_favorite(1));
        assert!(prefs.is_favorite(2));

        assert!(!prefs.remove_from_favorites(42));
        assert_eq!(prefs.favorites().len(), 1);
        assert_eq!(backing.write_attempts(), 4);
    }

    #[test]
    fn test_toggle_unit_twice_restores() {
        let (backing, mut prefs) = fresh();
        assert_eq!(prefs.toggle_unit(), TemperatureUnit::Fahrenheit);
        assert_eq!(backing.raw(UNIT_SLOT).as_deref(), Some(r#""F""#));
        assert_eq!(prefs.toggle_unit(), TemperatureUnit::Celsius);
        assert_eq!(backing.raw(UNIT_SLOT).as_deref(), Some(r#""C""#));
    }

    #[test]
    fn test_recent_search_moves_to_front() {
        let backing = Arc::new(MemoryStore::new().with_slot(RECENT_SEARCHES_SLOT, r#"["Paris"]"#));
        let mut prefs = PreferenceStore::open(backing.clone());

        prefs.add_to_recent_searches("Tokyo");
        prefs.add_to_recent_searches("Paris");

        assert_eq!(prefs.recent_searches(), ["Paris", "Tokyo"]);
        assert_eq!(
            backing.raw(RECENT_SEARCHES_SLOT).as_deref(),
            Some(r#"["Paris","Tokyo"]"#)
        );
    }

    #[test]
    fn test_recent_searches_capped_at_five() {
        let (_, mut prefs) = fresh();
        for name in ["A", "B", "C", "D", "E", "F", "G"] {
            prefs.add_to_recent_searches(name);
        }
        assert_eq!(prefs.recent_searches(), ["G", "F", "E", "D", "C"]);
    }

    #[test]
    fn test_search_that_fell_off_returns_to_front() {
        let (_, mut prefs) = fresh();
        for name in ["A", "B", "C", "D", "E", "F"] {
            prefs.add_to_recent_searches(name);
        }
        assert!(!prefs.recent_searches().iter().any(|s| s == "A"));

        prefs.add_to_recent_searches("A");
        assert_eq!(prefs.recent_searches(), ["A", "F", "E", "D", "C"]);
    }

    #[test]
    fn test_recent_searches_are_case_sensitive() {
        let (_, mut prefs) = fresh();
        prefs.add_to_recent_searches("paris");
        prefs.add_to_recent_searches("Paris");
        assert_eq!(prefs.recent_searches(), ["Paris", "paris"]);
    }

    #[test]
    fn test_open_repairs_stored_invariants() {
        let backing = Arc::new(
            MemoryStore::new()
                .with_slot(FAVORITES_SLOT, r#"[{"id":1,"name":"A"},{"id":1,"name":"B"},{"id":2}]"#)
                .with_slot(RECENT_SEARCHES_SLOT, r#"["a","b","a","c","d","e","f","g"]"#),
        );
        let prefs = PreferenceStore::open(backing.clone());

        let ids: Vec<i64> = prefs.favorites().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(prefs.favorites()[0].name(), Some("A"));
        assert_eq!(prefs.recent_searches(), ["a", "b", "c", "d", "e"]);
        assert_eq!(backing.write_attempts(), 0);
    }

    #[test]
    fn test_invalid_unit_falls_back_to_celsius() {
        let backing = Arc::new(MemoryStore::new().with_slot(UNIT_SLOT, r#""K""#));
        let prefs = PreferenceStore::open(backing);
        assert_eq!(prefs.unit(), TemperatureUnit::Celsius);
    }

    #[test]
    fn test_write_faults_do_not_break_invariants() {
        let (backing, mut prefs) = fresh();
        backing.set_fail_writes(true);

        prefs.add_to_favorites(city(1, "London"));
        prefs.add_to_favorites(city(1, "London"));
        prefs.add_to_recent_searches("London");
        prefs.toggle_unit();

        assert_eq!(prefs.favorites().len(), 1);
        assert_eq!(prefs.recent_searches(), ["London"]);
        assert_eq!(prefs.unit(), TemperatureUnit::Fahrenheit);
        assert!(backing.raw(FAVORITES_SLOT).is_none());
    }
}
