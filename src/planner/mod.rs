//! AI planner integration.
//!
//! The trip is serialized into the YAML configuration document and sent to
//! the model in a single blocking request. Nothing here is fatal: a missing
//! key or a failed call comes back as a distinctly prefixed message string
//! that the form renders as plain text where the itinerary would go.

pub mod client;
pub mod prompts;

use serde::Serialize;

pub use client::{resolve_api_key, PlannerClient, PlannerError};

use crate::types::{Config, TripProfile};

/// Ready/disabled indicator for the planner, shown next to the plan button.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerStatus {
    pub ready: bool,
    pub message: String,
}

/// Report whether the planner is usable with the current config/environment.
pub fn status(config: Option<&Config>, env_key: Option<String>) -> PlannerStatus {
    match resolve_api_key(config, env_key) {
        Ok(_) => PlannerStatus {
            ready: true,
            message: "Trip planner AI is ready.".to_string(),
        },
        Err(e) => PlannerStatus {
            ready: false,
            message: format!("Trip planner AI is not configured. {}", e),
        },
    }
}

/// Serialize the trip and ask the model for an itinerary.
///
/// Always produces text: the itinerary on success, otherwise a
/// "(Trip planner AI disabled)" or "Error calling trip planner AI:" message.
pub async fn generate_itinerary(
    config: Option<&Config>,
    env_key: Option<String>,
    trip: &TripProfile,
) -> String {
    let api_key = match resolve_api_key(config, env_key) {
        Ok(key) => key,
        Err(e) => return format!("(Trip planner AI disabled) {}", e),
    };
    let model = config
        .map(|c| c.planner_model.clone())
        .unwrap_or_else(|| Config::default().planner_model);

    let document = crate::document::to_document(trip);
    let yaml = match crate::document::to_yaml(&document) {
        Ok(yaml) => yaml,
        Err(e) => return format!("Error calling trip planner AI: {}", e),
    };

    let client = PlannerClient::new(api_key, model);
    match client.plan_itinerary(&yaml).await {
        Ok(itinerary) => itinerary,
        Err(e) => format!("Error calling trip planner AI: {}", e),
    }
}
