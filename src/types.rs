use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration stored in ~/.roadtrip/config.json
///
/// Holds the static login map, the planner API key, and optional overrides.
/// The file is hand-edited; the app only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// username -> password. Usernames are matched case-insensitively;
    /// passwords are case-sensitive.
    #[serde(default)]
    pub users: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    /// Model used for itinerary generation.
    #[serde(default = "default_planner_model")]
    pub planner_model: String,
    /// Override for the saved-trips file. Defaults to ~/.roadtrip/saved_trips.json.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            openai_api_key: None,
            planner_model: default_planner_model(),
            data_file: None,
        }
    }
}

fn default_planner_model() -> String {
    "gpt-5.1".to_string()
}

// =============================================================================
// Trip enums
// =============================================================================
//
// Every enum-like string in the saved-trips file is a closed variant set.
// The serde snake_case names are the on-disk and document key values, so
// renaming a variant is a data-format change.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripDirection {
    #[default]
    RoundTrip,
    OneWay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrivingBalance {
    MostlyDriving,
    #[default]
    Balanced,
    MostlyActivities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvernightStyle {
    #[default]
    EvenlySpread,
    PushFarOnFirstDay,
    ShortFirstDayThenEven,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LodgingStyle {
    Budget,
    MidRange,
    #[default]
    Upscale,
    LuxuryResort,
}

/// Fixed 12-tag vocabulary for "what should the AI look for along the way".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryCategory {
    MichelinStarDining,
    OtherHighEndDining,
    HistoricBlackCultureSites,
    MuseumsAndCulture,
    Waterfalls,
    HikingTrails,
    BeachesOrOceanAccess,
    LakesAndWaterfronts,
    ScenicDrivesOrOverlooks,
    ThemeParks,
    Nightlife,
    Golf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningFocus {
    MinimizeDrivingTime,
    MaximizeScenicOrInterestingStops,
    #[default]
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputDetailLevel {
    HighLevelOverview,
    #[default]
    DailyOutline,
    DetailedDailyPlan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiKind {
    SpecificStop,
    #[default]
    CityOrRegion,
    CategoryAlongRoute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiPriority {
    MustDo,
    #[default]
    NiceToHave,
}

// =============================================================================
// Point of interest
// =============================================================================

/// One stop or idea within a trip. Order within the trip is meaningful:
/// it is the display and iteration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "poi_kind")]
    pub kind: PoiKind,
    #[serde(default)]
    pub location_hint: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    /// None means "use the trip's default_max_detour_hours" — resolved at
    /// read time, not when the trip is serialized.
    #[serde(default)]
    pub max_detour_hours: Option<f64>,
    #[serde(default)]
    pub min_time_on_site_hours: Option<f64>,
    #[serde(default)]
    pub priority: PoiPriority,
}

impl PointOfInterest {
    /// Detour budget for this stop, falling back to the trip-wide default.
    pub fn effective_max_detour_hours(&self, trip_default: f64) -> f64 {
        self.max_detour_hours.unwrap_or(trip_default)
    }

    /// Normalize a freshly entered stop: trim the label, coerce empty
    /// optional strings to None, and treat zero hour values as unset.
    pub fn normalized_for_insert(mut self) -> Self {
        self.label = self.label.trim().to_string();
        self.location_hint = crate::util::trimmed_or_none(self.location_hint.take());
        self.category = crate::util::trimmed_or_none(self.category.take());
        self.details = crate::util::trimmed_or_none(self.details.take());
        self.max_detour_hours = self.max_detour_hours.filter(|v| *v != 0.0);
        self.min_time_on_site_hours = self.min_time_on_site_hours.filter(|v| *v != 0.0);
        self
    }
}

// =============================================================================
// Trip profile
// =============================================================================

/// One trip's full configuration.
///
/// Field names double as the external key names in saved_trips.json and in
/// the configuration document sent to the planner, so no serde renames are
/// applied here. Every field carries a default so records written by older
/// builds still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripProfile {
    #[serde(default)]
    pub trip_name: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub trip_direction: TripDirection,
    #[serde(default = "default_total_days")]
    pub total_days_available: u32,
    #[serde(default = "default_max_daily_drive_hours")]
    pub max_daily_drive_hours: f64,
    #[serde(default)]
    pub driving_days_preference: DrivingBalance,
    #[serde(default)]
    pub overnight_stop_distance_style: OvernightStyle,
    #[serde(default)]
    pub overall_trip_budget: Option<f64>,
    #[serde(default)]
    pub lodging_budget_per_night: Option<f64>,
    #[serde(default)]
    pub food_budget_per_day_per_person: Option<f64>,
    #[serde(default)]
    pub lodging_style: LodgingStyle,
    #[serde(default)]
    pub travelers_description: String,
    #[serde(default)]
    pub mobility_or_special_needs: String,
    #[serde(default)]
    pub auto_discovery_categories: Vec<DiscoveryCategory>,
    #[serde(default = "default_max_detour_hours")]
    pub default_max_detour_hours: f64,
    #[serde(default)]
    pub points_of_interest: Vec<PointOfInterest>,
    #[serde(default)]
    pub planning_focus: PlanningFocus,
    #[serde(default)]
    pub output_detail_level: OutputDetailLevel,
}

fn default_total_days() -> u32 {
    10
}

fn default_max_daily_drive_hours() -> f64 {
    5.0
}

fn default_max_detour_hours() -> f64 {
    2.0
}

impl Default for TripProfile {
    /// The "<New Trip>" starter profile. Pure constructor: range and enum
    /// validation is the form's job, not the model's.
    fn default() -> Self {
        Self {
            trip_name: String::new(),
            origin: "Bowie, MD".to_string(),
            destination: "Miami, FL".to_string(),
            trip_direction: TripDirection::RoundTrip,
            total_days_available: default_total_days(),
            max_daily_drive_hours: default_max_daily_drive_hours(),
            driving_days_preference: DrivingBalance::Balanced,
            overnight_stop_distance_style: OvernightStyle::EvenlySpread,
            overall_trip_budget: None,
            lodging_budget_per_night: None,
            food_budget_per_day_per_person: None,
            lodging_style: LodgingStyle::Upscale,
            travelers_description: "2 adults, no kids".to_string(),
            mobility_or_special_needs: String::new(),
            auto_discovery_categories: Vec::new(),
            default_max_detour_hours: default_max_detour_hours(),
            points_of_interest: Vec::new(),
            planning_focus: PlanningFocus::Balanced,
            output_detail_level: OutputDetailLevel::DailyOutline,
        }
    }
}

impl TripProfile {
    /// Normalize a profile arriving from the form before it is persisted
    /// or serialized: trim the name, coerce zero budgets to None (a budget
    /// is either set or absent, never zero), and clean optional POI strings.
    pub fn normalize(&mut self) {
        self.trip_name = self.trip_name.trim().to_string();
        self.overall_trip_budget = self.overall_trip_budget.filter(|v| *v != 0.0);
        self.lodging_budget_per_night = self.lodging_budget_per_night.filter(|v| *v != 0.0);
        self.food_budget_per_day_per_person =
            self.food_budget_per_day_per_person.filter(|v| *v != 0.0);
        for poi in &mut self.points_of_interest {
            poi.label = poi.label.trim().to_string();
            poi.location_hint = crate::util::trimmed_or_none(poi.location_hint.take());
            poi.category = crate::util::trimmed_or_none(poi.category.take());
            poi.details = crate::util::trimmed_or_none(poi.details.take());
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
