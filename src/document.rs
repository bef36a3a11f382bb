//! The configuration document sent to the planner model.
//!
//! The user never sees this document; it exists to give the model one
//! stable, fully populated description of the trip. Key order follows
//! struct declaration order and must stay fixed — the planner prompt is
//! tuned against it.

use serde::Serialize;

use crate::types::{
    DiscoveryCategory, DrivingBalance, LodgingStyle, OutputDetailLevel, OvernightStyle,
    PlanningFocus, PointOfInterest, TripDirection, TripProfile,
};

pub const DOCUMENT_VERSION: &str = "1.1";
pub const AGENT_NAME: &str = "roadtrip_trip_planner";
pub const DOCUMENT_DESCRIPTION: &str = "User-provided configuration for a road-trip planner AI.";

/// Top-level document shape: fixed envelope plus the full trip config.
#[derive(Debug, Serialize)]
pub struct TripDocument {
    pub version: &'static str,
    pub agent_name: &'static str,
    pub description: &'static str,
    pub trip_config: TripConfig,
}

/// All trip fields in their fixed external order. Declaration order here is
/// the document key order.
#[derive(Debug, Serialize)]
pub struct TripConfig {
    pub trip_name: String,
    pub origin: String,
    pub destination: String,
    pub trip_direction: TripDirection,
    pub total_days_available: u32,
    pub max_daily_drive_hours: f64,
    pub driving_days_preference: DrivingBalance,
    pub overnight_stop_distance_style: OvernightStyle,
    pub overall_trip_budget: Option<f64>,
    pub lodging_budget_per_night: Option<f64>,
    pub food_budget_per_day_per_person: Option<f64>,
    pub lodging_style: LodgingStyle,
    pub travelers_description: String,
    pub mobility_or_special_needs: String,
    pub auto_discovery_categories: Vec<DiscoveryCategory>,
    pub default_max_detour_hours: f64,
    pub points_of_interest: Vec<PointOfInterest>,
    pub planning_focus: PlanningFocus,
    pub output_detail_level: OutputDetailLevel,
}

/// Build the document for one trip.
///
/// Pure reflection: defaults were already substituted when the profile was
/// decoded, and per-POI detour fallback is a read-time concern that stays
/// out of the serialized document.
pub fn to_document(trip: &TripProfile) -> TripDocument {
    TripDocument {
        version: DOCUMENT_VERSION,
        agent_name: AGENT_NAME,
        description: DOCUMENT_DESCRIPTION,
        trip_config: TripConfig {
            trip_name: trip.trip_name.clone(),
            origin: trip.origin.clone(),
            destination: trip.destination.clone(),
            trip_direction: trip.trip_direction,
            total_days_available: trip.total_days_available,
            max_daily_drive_hours: trip.max_daily_drive_hours,
            driving_days_preference: trip.driving_days_preference,
            overnight_stop_distance_style: trip.overnight_stop_distance_style,
            overall_trip_budget: trip.overall_trip_budget,
            lodging_budget_per_night: trip.lodging_budget_per_night,
            food_budget_per_day_per_person: trip.food_budget_per_day_per_person,
            lodging_style: trip.lodging_style,
            travelers_description: trip.travelers_description.clone(),
            mobility_or_special_needs: trip.mobility_or_special_needs.clone(),
            auto_discovery_categories: trip.auto_discovery_categories.clone(),
            default_max_detour_hours: trip.default_max_detour_hours,
            points_of_interest: trip.points_of_interest.clone(),
            planning_focus: trip.planning_focus,
            output_detail_level: trip.output_detail_level,
        },
    }
}

/// Render the document as YAML with stable key order.
pub fn to_yaml(document: &TripDocument) -> Result<String, String> {
    serde_yaml::to_string(document).map_err(|e| format!("Serialize error: {}", e))
}
