//! The form's command surface.
//!
//! Each command is one user action: log in, pick or save a trip, add a
//! stop, ask for an itinerary. Commands validate, delegate to the store or
//! planner, and return messages the form shows inline — nothing here
//! panics the session.

use std::sync::Arc;

use tauri::State;

use crate::planner::{self, PlannerStatus};
use crate::state::{reload_config, AppState, Session};
use crate::store::NEW_TRIP_SENTINEL;
use crate::types::{Config, PointOfInterest, TripProfile};

/// Get current configuration
#[tauri::command]
pub fn get_config(state: State<Arc<AppState>>) -> Result<Config, String> {
    let guard = state.config.lock().map_err(|_| "Lock poisoned")?;
    guard
        .clone()
        .ok_or_else(|| "No configuration loaded. Create ~/.roadtrip/config.json".to_string())
}

/// Reload configuration from disk
#[tauri::command]
pub fn reload_configuration(state: State<Arc<AppState>>) -> Result<Config, String> {
    reload_config(&state)
}

// =============================================================================
// Session
// =============================================================================

/// Log in against the configured user map. Success creates the session and
/// returns the normalized username.
#[tauri::command]
pub fn login(
    username: String,
    password: String,
    state: State<Arc<AppState>>,
) -> Result<String, String> {
    let config = state
        .config_snapshot()?
        .ok_or_else(|| "No configuration loaded. Create ~/.roadtrip/config.json".to_string())?;

    let user = crate::auth::authenticate(&config.users, &username, &password)?;
    log::info!("User '{}' logged in", user);

    let mut guard = state.session.lock().map_err(|_| "Lock poisoned")?;
    *guard = Some(Session {
        username: user.clone(),
    });
    Ok(user)
}

/// Drop the session.
#[tauri::command]
pub fn logout(state: State<Arc<AppState>>) -> Result<(), String> {
    let mut guard = state.session.lock().map_err(|_| "Lock poisoned")?;
    if let Some(session) = guard.take() {
        log::info!("User '{}' logged out", session.username);
    }
    Ok(())
}

/// Username of the active session, if any.
#[tauri::command]
pub fn current_user(state: State<Arc<AppState>>) -> Result<Option<String>, String> {
    Ok(state
        .session
        .lock()
        .map_err(|_| "Lock poisoned")?
        .as_ref()
        .map(|s| s.username.clone()))
}

// =============================================================================
// Trips
// =============================================================================

/// A fresh starter profile for the "<New Trip>" selection.
#[tauri::command]
pub fn new_trip() -> TripProfile {
    TripProfile::default()
}

/// Sorted names of the session user's saved trips.
#[tauri::command]
pub fn list_trips(state: State<Arc<AppState>>) -> Result<Vec<String>, String> {
    let user = state.require_user()?;
    Ok(state.trip_store()?.list_trip_names(&user))
}

/// Load one saved trip for editing.
#[tauri::command]
pub fn load_trip(name: String, state: State<Arc<AppState>>) -> Result<TripProfile, String> {
    let user = state.require_user()?;
    state
        .trip_store()?
        .get_trip(&user, &name)
        .ok_or_else(|| "Selected trip not found.".to_string())
}

/// Save the edited trip under a collision-safe name; returns the name it
/// was stored as so the form can reselect it.
#[tauri::command]
pub fn save_trip(mut trip: TripProfile, state: State<Arc<AppState>>) -> Result<String, String> {
    let user = state.require_user()?;
    trip.normalize();
    let stored_name = state.trip_store()?.save_trip(&user, &trip)?;
    log::info!("Saved trip '{}' for '{}'", stored_name, user);
    Ok(stored_name)
}

/// Delete a saved trip. The "<New Trip>" selection has nothing to delete.
#[tauri::command]
pub fn delete_trip(name: String, state: State<Arc<AppState>>) -> Result<(), String> {
    let user = state.require_user()?;
    if name == NEW_TRIP_SENTINEL {
        return Err("There is no saved trip to delete. Select a saved trip first.".to_string());
    }
    state.trip_store()?.delete_trip(&user, &name)?;
    log::info!("Deleted trip '{}' for '{}'", name, user);
    Ok(())
}

/// Append a new stop to the edited trip. The trip is returned (not
/// persisted) — edits only become durable on save.
#[tauri::command]
pub fn add_point_of_interest(
    mut trip: TripProfile,
    poi: PointOfInterest,
) -> Result<TripProfile, String> {
    if poi.label.trim().is_empty() {
        return Err("Please give the stop a title.".to_string());
    }
    trip.points_of_interest.push(poi.normalized_for_insert());
    Ok(trip)
}

// =============================================================================
// Planner
// =============================================================================

/// Whether the planner is usable, and why not when it isn't.
#[tauri::command]
pub fn planner_status(state: State<Arc<AppState>>) -> Result<PlannerStatus, String> {
    let config = state.config_snapshot()?;
    Ok(planner::status(
        config.as_ref(),
        std::env::var("OPENAI_API_KEY").ok(),
    ))
}

/// Ask the model to plan the trip. Always resolves to text: either the
/// itinerary or a prefixed disabled/error message rendered in its place.
#[tauri::command]
pub async fn plan_trip(
    mut trip: TripProfile,
    state: State<'_, Arc<AppState>>,
) -> Result<String, String> {
    state.require_user()?;
    trip.normalize();
    let config = state.config_snapshot()?;
    Ok(planner::generate_itinerary(
        config.as_ref(),
        std::env::var("OPENAI_API_KEY").ok(),
        &trip,
    )
    .await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trip_is_default_profile() {
        assert_eq!(new_trip(), TripProfile::default());
    }

    #[test]
    fn test_add_point_of_interest_requires_title() {
        let trip = TripProfile::default();
        let poi = PointOfInterest {
            label: "   ".to_string(),
            ..Default::default()
        };
        let err = add_point_of_interest(trip.clone(), poi).unwrap_err();
        assert_eq!(err, "Please give the stop a title.");
    }

    #[test]
    fn test_add_point_of_interest_appends_in_order() {
        let trip = TripProfile::default();
        let trip = add_point_of_interest(
            trip,
            PointOfInterest {
                label: "Asheville".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        let trip = add_point_of_interest(
            trip,
            PointOfInterest {
                label: " Savannah ".to_string(),
                location_hint: Some("".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let labels: Vec<&str> = trip
            .points_of_interest
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Asheville", "Savannah"]);
        assert_eq!(trip.points_of_interest[1].location_hint, None);
    }
}
