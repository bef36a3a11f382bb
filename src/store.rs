//! Flat-file persistence of named trip profiles, keyed by username.
//!
//! The entire collection lives in one JSON file
//! (`~/.roadtrip/saved_trips.json` unless overridden in config): a map of
//! username -> map of trip name -> trip record. Reads fail open — a missing
//! or undecodable file is an empty collection. Writes replace the whole file
//! atomically.
//!
//! No locking. Two sessions for the same user can race; the later `save_all`
//! wins. Each mutating operation reloads from disk first so a stale
//! in-memory copy is never the base of a write.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::types::{Config, TripProfile};

/// Reserved selector entry meaning "no trip selected / start fresh".
/// Never a valid save target and never listed as a saved name.
pub const NEW_TRIP_SENTINEL: &str = "<New Trip>";

/// One user's trips, keyed by trip name. BTreeMap keeps listings sorted.
pub type UserTrips = BTreeMap<String, TripProfile>;

/// The whole durable collection, keyed by username.
pub type AllTrips = BTreeMap<String, UserTrips>;

// =============================================================================
// Per-user access
// =============================================================================

/// Trips for a single user, or an empty map if the user has none.
pub fn get_user_trips(all: &AllTrips, username: &str) -> UserTrips {
    all.get(username).cloned().unwrap_or_default()
}

/// Replace a single user's trips in the whole collection.
pub fn set_user_trips(all: &mut AllTrips, username: &str, trips: UserTrips) {
    all.insert(username.to_string(), trips);
}

// =============================================================================
// Naming
// =============================================================================

/// Resolve a collision-safe trip name.
///
/// Returns `base` unchanged when it is free; otherwise appends " (1)",
/// " (2)", ... until the candidate is unused. The counter starts at 1.
pub fn unique_trip_name(base: &str, existing: &BTreeSet<String>) -> String {
    if !existing.contains(base) {
        return base.to_string();
    }

    let mut counter = 1u64;
    loop {
        let candidate = format!("{} ({})", base, counter);
        if !existing.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

// =============================================================================
// Store
// =============================================================================

/// Handle to the saved-trips file. Holds only the path; all state lives on
/// disk and is re-read by every operation.
#[derive(Debug, Clone)]
pub struct TripStore {
    path: PathBuf,
}

impl TripStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Canonical location: ~/.roadtrip/saved_trips.json
    pub fn default_path() -> Result<PathBuf, String> {
        let home = dirs::home_dir().ok_or("Could not find home directory")?;
        Ok(home.join(".roadtrip").join("saved_trips.json"))
    }

    /// Resolve the store from config (`dataFile` override) or the default path.
    pub fn from_config(config: Option<&Config>) -> Result<Self, String> {
        match config.and_then(|c| c.data_file.as_deref()) {
            Some(path) => Ok(Self::new(PathBuf::from(path))),
            None => Ok(Self::new(Self::default_path()?)),
        }
    }

    /// Load the entire collection. Missing file or decode failure yields an
    /// empty collection; decode failures are logged, never surfaced.
    pub fn load_all(&self) -> AllTrips {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return AllTrips::new(),
        };
        match serde_json::from_str(&content) {
            Ok(all) => all,
            Err(e) => {
                log::warn!(
                    "Unreadable trips file {} ({}). Starting from an empty collection.",
                    self.path.display(),
                    e
                );
                AllTrips::new()
            }
        }
    }

    /// Write the entire collection back, replacing prior contents.
    pub fn save_all(&self, all: &AllTrips) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        let content =
            serde_json::to_string_pretty(all).map_err(|e| format!("Serialize error: {}", e))?;
        crate::util::atomic_write_str(&self.path, &content)
            .map_err(|e| format!("Error saving trips: {}", e))
    }

    /// Sorted names of a user's saved trips. The sentinel is excluded
    /// defensively even though it is never a valid save target.
    pub fn list_trip_names(&self, username: &str) -> Vec<String> {
        let all = self.load_all();
        get_user_trips(&all, username)
            .keys()
            .filter(|name| name.as_str() != NEW_TRIP_SENTINEL)
            .cloned()
            .collect()
    }

    /// Fetch one stored trip. The record's `trip_name` is forced to its map
    /// key so a record saved under a uniquified name reads back consistently.
    pub fn get_trip(&self, username: &str, name: &str) -> Option<TripProfile> {
        let all = self.load_all();
        all.get(username).and_then(|trips| trips.get(name)).map(|t| {
            let mut trip = t.clone();
            trip.trip_name = name.to_string();
            trip
        })
    }

    /// Persist a trip under a collision-safe name and return the name it
    /// was stored as. Reloads from disk before mutating so a concurrent
    /// session's saves of other trips are not clobbered by a stale copy.
    pub fn save_trip(&self, username: &str, trip: &TripProfile) -> Result<String, String> {
        let base = trip.trip_name.trim();
        if base.is_empty() {
            return Err("Please enter a trip name before saving.".to_string());
        }
        if base == NEW_TRIP_SENTINEL {
            return Err(format!("'{}' is a reserved name.", NEW_TRIP_SENTINEL));
        }

        let mut all = self.load_all();
        let mut user_trips = get_user_trips(&all, username);
        let existing: BTreeSet<String> = user_trips.keys().cloned().collect();
        let stored_name = unique_trip_name(base, &existing);

        let mut stored = trip.clone();
        stored.trip_name = stored_name.clone();
        user_trips.insert(stored_name.clone(), stored);
        set_user_trips(&mut all, username, user_trips);
        self.save_all(&all)?;

        Ok(stored_name)
    }

    /// Delete a stored trip. A name that is not present signals "not found"
    /// and leaves the file untouched.
    pub fn delete_trip(&self, username: &str, name: &str) -> Result<(), String> {
        let mut all = self.load_all();
        let removed = all
            .get_mut(username)
            .map(|trips| trips.remove(name).is_some())
            .unwrap_or(false);
        if !removed {
            return Err(format!("Trip '{}' not found.", name));
        }
        self.save_all(&all)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, TripStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TripStore::new(dir.path().join("saved_trips.json"));
        (dir, store)
    }

    fn named(name: &str) -> TripProfile {
        TripProfile {
            trip_name: name.to_string(),
            ..Default::default()
        }
    }

    // Naming resolver

    #[test]
    fn test_unique_name_free_base_unchanged() {
        let existing: BTreeSet<String> =
            ["Other".to_string(), "Another".to_string()].into_iter().collect();
        assert_eq!(unique_trip_name("Trip", &existing), "Trip");
    }

    #[test]
    fn test_unique_name_first_collision() {
        let existing: BTreeSet<String> = ["Trip".to_string()].into_iter().collect();
        assert_eq!(unique_trip_name("Trip", &existing), "Trip (1)");
    }

    #[test]
    fn test_unique_name_second_collision() {
        let existing: BTreeSet<String> =
            ["Trip".to_string(), "Trip (1)".to_string()].into_iter().collect();
        assert_eq!(unique_trip_name("Trip", &existing), "Trip (2)");
    }

    #[test]
    fn test_unique_name_skips_holes() {
        // A freed-up middle slot is reused: the search always starts at 1.
        let existing: BTreeSet<String> =
            ["Trip".to_string(), "Trip (2)".to_string()].into_iter().collect();
        assert_eq!(unique_trip_name("Trip", &existing), "Trip (1)");
    }

    #[test]
    fn test_unique_name_never_in_existing() {
        let existing: BTreeSet<String> = (0..50)
            .map(|i| if i == 0 { "Trip".to_string() } else { format!("Trip ({})", i) })
            .collect();
        let result = unique_trip_name("Trip", &existing);
        assert!(!existing.contains(&result));
        assert_eq!(result, "Trip (50)");
    }

    // Per-user access

    #[test]
    fn test_get_set_user_trips_round_trip() {
        let mut all = AllTrips::new();
        let mut trips = UserTrips::new();
        trips.insert("Beach Week".to_string(), named("Beach Week"));

        set_user_trips(&mut all, "tim", trips.clone());
        assert_eq!(get_user_trips(&all, "tim"), trips);
        assert!(get_user_trips(&all, "buddy").is_empty());
    }

    // Store

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let (dir, _) = temp_store();
        let path = dir.path().join("saved_trips.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = TripStore::new(path);
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let (_dir, store) = temp_store();
        let mut all = AllTrips::new();
        let mut trips = UserTrips::new();
        trips.insert("Beach Week".to_string(), named("Beach Week"));
        set_user_trips(&mut all, "tim", trips);

        store.save_all(&all).unwrap();
        assert_eq!(store.load_all(), all);
    }

    #[test]
    fn test_save_trip_assigns_unique_names() {
        let (_dir, store) = temp_store();

        let first = store.save_trip("tim", &named("Beach Week")).unwrap();
        let second = store.save_trip("tim", &named("Beach Week")).unwrap();

        assert_eq!(first, "Beach Week");
        assert_eq!(second, "Beach Week (1)");

        let names = store.list_trip_names("tim");
        assert_eq!(names, vec!["Beach Week".to_string(), "Beach Week (1)".to_string()]);
        // The stored record carries the uniquified name.
        let stored = store.get_trip("tim", "Beach Week (1)").unwrap();
        assert_eq!(stored.trip_name, "Beach Week (1)");
    }

    #[test]
    fn test_save_trip_rejects_blank_and_sentinel_names() {
        let (_dir, store) = temp_store();
        assert!(store.save_trip("tim", &named("   ")).is_err());
        assert!(store.save_trip("tim", &named(NEW_TRIP_SENTINEL)).is_err());
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_user_namespaces_are_isolated() {
        let (_dir, store) = temp_store();
        store.save_trip("tim", &named("Beach Week")).unwrap();
        store.save_trip("buddy", &named("Beach Week")).unwrap();

        // Same name for both users, no collision suffix across namespaces.
        assert_eq!(store.list_trip_names("tim"), vec!["Beach Week".to_string()]);
        assert_eq!(store.list_trip_names("buddy"), vec!["Beach Week".to_string()]);
        assert!(store.list_trip_names("stranger").is_empty());
    }

    #[test]
    fn test_delete_trip() {
        let (_dir, store) = temp_store();
        store.save_trip("tim", &named("Beach Week")).unwrap();

        store.delete_trip("tim", "Beach Week").unwrap();
        assert!(store.list_trip_names("tim").is_empty());
    }

    #[test]
    fn test_delete_missing_trip_signals_not_found() {
        let (_dir, store) = temp_store();
        store.save_trip("tim", &named("Beach Week")).unwrap();
        let before = store.load_all();

        let result = store.delete_trip("tim", "Ski Trip");
        assert!(result.is_err());
        assert_eq!(store.load_all(), before);

        // Unknown user, same signal.
        assert!(store.delete_trip("nobody", "Beach Week").is_err());
    }

    #[test]
    fn test_get_trip_forces_name_to_key() {
        let (_dir, store) = temp_store();
        let mut all = AllTrips::new();
        let mut trips = UserTrips::new();
        // Simulate a hand-edited file where the record name drifted from the key.
        trips.insert("Coast Run".to_string(), named("Old Name"));
        set_user_trips(&mut all, "tim", trips);
        store.save_all(&all).unwrap();

        let trip = store.get_trip("tim", "Coast Run").unwrap();
        assert_eq!(trip.trip_name, "Coast Run");
    }
}
