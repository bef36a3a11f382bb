//! HTTP client for the itinerary model (OpenAI Responses API).
//!
//! One POST per planning request, bearer auth, no retry, no timeout, no
//! cancellation — the session waits until the remote call returns or errors
//! (accepted by design; planning is the only slow operation in the app).

use serde::{Deserialize, Serialize};

use crate::types::Config;

/// Errors from planner API operations.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error(
        "OpenAI API key not set. Add \"openaiApiKey\" to ~/.roadtrip/config.json \
         or set the OPENAI_API_KEY environment variable."
    )]
    NotConfigured,
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("API returned status {status}: {body}")]
    ApiStatus { status: u16, body: String },
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),
}

/// Resolve the API key: config first, then the environment. Blank values
/// count as absent. Pure — the caller supplies the environment lookup.
pub fn resolve_api_key(
    config: Option<&Config>,
    env_key: Option<String>,
) -> Result<String, PlannerError> {
    if let Some(key) = config
        .and_then(|c| c.openai_api_key.clone())
        .filter(|k| !k.trim().is_empty())
    {
        return Ok(key);
    }
    env_key
        .filter(|k| !k.trim().is_empty())
        .ok_or(PlannerError::NotConfigured)
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

const RESPONSES_URL: &str = "https://api.openai.com/v1/responses";

/// Client for the planner model.
pub struct PlannerClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl PlannerClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    /// Send the configuration document and return the model's itinerary
    /// text. Joins all `output_text` parts of the response with newlines.
    pub async fn plan_itinerary(&self, yaml_text: &str) -> Result<String, PlannerError> {
        let request = ResponsesRequest {
            model: &self.model,
            input: vec![
                InputMessage {
                    role: "system",
                    content: super::prompts::SYSTEM_PROMPT.to_string(),
                },
                InputMessage {
                    role: "user",
                    content: super::prompts::user_prompt(yaml_text),
                },
            ],
        };

        log::info!("Requesting itinerary from model {}", self.model);
        let response = self
            .http
            .post(RESPONSES_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PlannerError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlannerError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ResponsesReply = response
            .json()
            .await
            .map_err(|e| PlannerError::UnexpectedResponse(e.to_string()))?;

        let texts: Vec<&str> = reply
            .output
            .iter()
            .flat_map(|item| item.content.iter())
            .filter(|part| part.kind == "output_text")
            .map(|part| part.text.as_str())
            .collect();

        if texts.is_empty() {
            return Err(PlannerError::UnexpectedResponse(
                "no output_text content in response".to_string(),
            ));
        }
        Ok(texts.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_key_prefers_config() {
        let config = Config {
            openai_api_key: Some("sk-config".to_string()),
            ..Default::default()
        };
        let key = resolve_api_key(Some(&config), Some("sk-env".to_string())).unwrap();
        assert_eq!(key, "sk-config");
    }

    #[test]
    fn test_resolve_key_falls_back_to_env() {
        let key = resolve_api_key(None, Some("sk-env".to_string())).unwrap();
        assert_eq!(key, "sk-env");

        let blank = Config {
            openai_api_key: Some("   ".to_string()),
            ..Default::default()
        };
        let key = resolve_api_key(Some(&blank), Some("sk-env".to_string())).unwrap();
        assert_eq!(key, "sk-env");
    }

    #[test]
    fn test_resolve_key_missing_everywhere() {
        let err = resolve_api_key(None, None).unwrap_err();
        assert!(matches!(err, PlannerError::NotConfigured));
        // The message tells the operator both places to put the key.
        let msg = err.to_string();
        assert!(msg.contains("openaiApiKey"));
        assert!(msg.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_reply_parsing_collects_output_text() {
        let reply: ResponsesReply = serde_json::from_str(
            r#"{
                "output": [
                    {"content": [{"type": "output_text", "text": "Day 1: drive south."}]},
                    {"content": [{"type": "reasoning", "text": "ignored"},
                                 {"type": "output_text", "text": "Day 2: the coast."}]}
                ]
            }"#,
        )
        .unwrap();

        let texts: Vec<&str> = reply
            .output
            .iter()
            .flat_map(|item| item.content.iter())
            .filter(|part| part.kind == "output_text")
            .map(|part| part.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Day 1: drive south.", "Day 2: the coast."]);
    }
}
