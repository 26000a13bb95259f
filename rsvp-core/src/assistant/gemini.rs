//! Gemini `generateContent` client.

use serde::{Deserialize, Serialize};

use crate::app_config::AssistantConfig;
use crate::assistant::message::{ChatMessage, Role};
use crate::constants::REMOTE_TIMEOUT;
use crate::error::{RsvpError, RsvpResult};
use crate::tour::Tour;

const CONNECTION_ERROR_REPLY: &str =
    "I am having trouble connecting right now. Please try again in a moment.";

const TEMPERATURE: f64 = 0.7;
const TOP_K: u32 = 40;
const TOP_P: f64 = 0.95;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl<'a> Content<'a> {
    fn from_message(message: &'a ChatMessage) -> Self {
        Content {
            role: Some(message.role),
            parts: vec![Part {
                text: &message.text,
            }],
        }
    }
}

/// Stateless request/response wrapper around the hosted model.
pub struct GeminiAssistant {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    system_instruction: String,
    empty_reply: String,
}

impl GeminiAssistant {
    pub fn new(config: &AssistantConfig, tour: &Tour) -> RsvpResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REMOTE_TIMEOUT * 3)
            .build()
            .map_err(|e| RsvpError::Assistant(e.to_string()))?;

        Ok(GeminiAssistant {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.resolved_api_key(),
            system_instruction: tour.system_instruction(),
            empty_reply: format!(
                "I'm sorry, I couldn't process that. Please try again or contact {} directly.",
                tour.contact
            ),
        })
    }

    /// Answer `prompt` given the conversation so far. Always returns
    /// something to show: failures become a fixed apology.
    pub async fn reply(&self, history: &[ChatMessage], prompt: &str) -> String {
        match self.generate(history, prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => self.empty_reply.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "Gemini API error");
                CONNECTION_ERROR_REPLY.to_string()
            }
        }
    }

    /// Raw model call. Returns the concatenated text of the first candidate.
    pub async fn generate(&self, history: &[ChatMessage], prompt: &str) -> RsvpResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| RsvpError::Assistant("No API key configured".into()))?;

        let prompt_message = ChatMessage::user(prompt);
        let contents = history
            .iter()
            .chain(std::iter::once(&prompt_message))
            .map(Content::from_message)
            .collect();

        let request = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &self.system_instruction,
                }],
            },
            contents,
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
            },
        };

        let resp = self
            .http
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RsvpError::Assistant(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(RsvpError::Assistant(format!("HTTP {status}: {body}")));
        }

        let response: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| RsvpError::Assistant(format!("Failed to parse response: {e}")))?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn assistant_for(server: &MockServer, api_key: Option<&str>) -> GeminiAssistant {
        let config = AssistantConfig {
            api_key: api_key.map(str::to_string),
            model: "gemini-test".into(),
            base_url: server.base_url(),
        };
        GeminiAssistant::new(&config, &Tour::default()).unwrap()
    }

    #[tokio::test]
    async fn test_reply_sends_history_and_instruction() {
        let server = MockServer::start();
        let history = vec![ChatMessage::model("Welcome!")];

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-test:generateContent")
                .header("x-goog-api-key", "secret")
                .body_includes(
                    r#""contents":[{"role":"model","parts":[{"text":"Welcome!"}]},{"role":"user","parts":[{"text":"Is lunch included?"}]}]"#,
                )
                .body_includes(r#""generationConfig":{"temperature":0.7,"topK":40,"topP":0.95}"#)
                .body_includes("Buffalo Trace, Woodford Reserve, Castle & Key");
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "Yes, " }, { "text": "lunch is included." }]
                    }
                }]
            }));
        });

        let assistant = assistant_for(&server, Some("secret"));
        let reply = assistant.reply(&history, "Is lunch included?").await;

        mock.assert();
        assert_eq!(reply, "Yes, lunch is included.");
    }

    #[tokio::test]
    async fn test_empty_reply_apologizes() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({ "candidates": [] }));
        });

        let reply = assistant_for(&server, Some("secret")).reply(&[], "Hello").await;
        assert_eq!(
            reply,
            "I'm sorry, I couldn't process that. Please try again or contact JBailey@Spocgrid.com directly."
        );
    }

    #[tokio::test]
    async fn test_http_failure_falls_back() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(503).body("overloaded");
        });

        let assistant = assistant_for(&server, Some("secret"));
        assert!(matches!(
            assistant.generate(&[], "Hello").await,
            Err(RsvpError::Assistant(_))
        ));
        assert_eq!(assistant.reply(&[], "Hello").await, CONNECTION_ERROR_REPLY);
    }
}
