//! Generation client: one bounded call to the external text service
//!
//! Every failure (no credential, transport, status, body shape) comes back
//! as [`Unavailable`]. Nothing escapes this boundary as a panic.
//!
//! The service's reply envelope is not fixed. Two shapes are accepted:
//! - a JSON object with a string `text` field, whose content may itself be
//!   encoded JSON (optionally wrapped in a markdown code fence); this is
//!   unwrapped in both modes
//! - any other JSON value, used directly

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::fallback;
use crate::types::{
    GenerationSettings, NormalizedMood, SupportMessage, Unavailable, AFFIRMATION_COUNT,
};

lazy_static! {
    static ref RE_CODE_FENCE: Regex = Regex::new(
        r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$"
    ).unwrap();
}

/// Which kind of reply to ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// One or two sentences of plain text
    Text,
    /// JSON with `supportive` and three `affirmations`
    Structured,
}

impl GenerationMode {
    pub fn max_tokens(&self) -> u32 {
        match self {
            GenerationMode::Text => 120,
            GenerationMode::Structured => 300,
        }
    }
}

/// Outbound request body
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
}

/// Build the prompt for a check-in
pub fn build_prompt(mode: GenerationMode, input: &NormalizedMood) -> String {
    match mode {
        GenerationMode::Text => format!(
            "You are a calm, empathetic mental health support companion.\n\n\
             Mood: {}\n\
             User note: {}\n\n\
             Respond with ONE short, warm, human message (1-2 sentences).\n\
             Do not mention AI.\n",
            input.mood,
            input.note.as_deref().unwrap_or("No additional note"),
        ),
        GenerationMode::Structured => format!(
            "You are a calm empathetic assistant. Create a supportive message and 3 short affirmations in JSON:\n\
             {{ \"supportive\": \"...\", \"affirmations\": [\"a\",\"b\",\"c\"] }}\n\
             Mood: {}\n\
             Note: {}\n\
             Return strictly valid JSON only.",
            input.mood,
            input.note_or_empty(),
        ),
    }
}

/// Reply envelope variants
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope {
    /// Body was the payload itself
    Direct(Value),
    /// Body was `{"text": "..."}`
    TextWrapped(String),
}

impl ResponseEnvelope {
    /// Classify a response body. Non-JSON bodies are malformed.
    pub fn parse(body: &str) -> Result<Self, Unavailable> {
        let value: Value = serde_json::from_str(body.trim())
            .map_err(|e| Unavailable::Malformed(e.to_string()))?;

        if let Some(text) = value.get("text").and_then(Value::as_str) {
            return Ok(ResponseEnvelope::TextWrapped(text.to_string()));
        }
        Ok(ResponseEnvelope::Direct(value))
    }

    /// Turn the envelope into a support message for the requested mode
    pub fn interpret(self, mode: GenerationMode, mood: &str) -> Result<SupportMessage, Unavailable> {
        match mode {
            GenerationMode::Text => {
                let text = match self {
                    ResponseEnvelope::TextWrapped(text) => unwrap_text(&text),
                    ResponseEnvelope::Direct(Value::String(text)) => Some(text),
                    ResponseEnvelope::Direct(value) => value
                        .get("supportive")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                };
                text.map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .map(SupportMessage::Text)
                    .ok_or(Unavailable::EmptyReply)
            }
            GenerationMode::Structured => {
                let value = match self {
                    ResponseEnvelope::TextWrapped(text) => {
                        let inner = strip_code_fence(&text);
                        serde_json::from_str(inner)
                            .map_err(|e| Unavailable::Malformed(format!("wrapped text: {}", e)))?
                    }
                    ResponseEnvelope::Direct(value) => value,
                };
                structured_from_value(&value, mood)
            }
        }
    }
}

/// Text-mode payload of a `{"text": ...}` envelope. Encoded JSON inside
/// the field is unwrapped; anything that does not parse is plain text.
fn unwrap_text(text: &str) -> Option<String> {
    let inner = strip_code_fence(text);
    match serde_json::from_str::<Value>(inner) {
        Ok(Value::String(s)) => Some(s),
        Ok(value @ Value::Object(_)) => value
            .get("supportive")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => Some(inner.to_string()),
    }
}

/// Remove a surrounding markdown code fence, if any
pub fn strip_code_fence(text: &str) -> &str {
    match RE_CODE_FENCE.captures(text).and_then(|c| c.get(1)) {
        Some(m) => m.as_str(),
        None => text.trim(),
    }
}

/// Build a structured message. Requires a non-empty `supportive`;
/// affirmations are capped at three and padded from the catalog.
fn structured_from_value(value: &Value, mood: &str) -> Result<SupportMessage, Unavailable> {
    let supportive = value
        .get("supportive")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(Unavailable::EmptyReply)?
        .to_string();

    let mut affirmations: Vec<String> = value
        .get("affirmations")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    affirmations.truncate(AFFIRMATION_COUNT);
    let entry = fallback::lookup(mood);
    for extra in entry.affirmations.iter().skip(affirmations.len()) {
        affirmations.push(extra.to_string());
    }

    Ok(SupportMessage::Structured { supportive, affirmations })
}

/// Client for the generation service
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: Client,
    settings: GenerationSettings,
}

impl GenerationClient {
    /// Create a client. A missing credential is reported here, once.
    pub fn new(settings: GenerationSettings) -> Self {
        if settings.credential().is_none() {
            warn!("generation credential not set, using fallback support only");
        }
        Self {
            http: Client::new(),
            settings,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.credential().is_some()
    }

    /// Request a support message. Failures are logged and returned as values.
    pub async fn generate(
        &self,
        input: &NormalizedMood,
        mode: GenerationMode,
    ) -> Result<SupportMessage, Unavailable> {
        let result = self.try_generate(input, mode).await;
        match &result {
            Ok(_) => debug!(mood = %input.mood, ?mode, "generation succeeded"),
            Err(Unavailable::MissingCredential) => {}
            Err(e) => warn!(mood = %input.mood, ?mode, error = %e, "generation unavailable"),
        }
        result
    }

    async fn try_generate(
        &self,
        input: &NormalizedMood,
        mode: GenerationMode,
    ) -> Result<SupportMessage, Unavailable> {
        let api_key = self.settings.credential().ok_or(Unavailable::MissingCredential)?;
        let prompt = build_prompt(mode, input);

        let response = self
            .http
            .post(self.settings.endpoint_url())
            .bearer_auth(api_key)
            .timeout(self.settings.timeout)
            .json(&GenerateRequest {
                prompt: &prompt,
                max_tokens: mode.max_tokens(),
            })
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(Unavailable::Status(status.as_u16()));
        }

        let body = response.text().await?;
        ResponseEnvelope::parse(&body)?.interpret(mode, &input.mood)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mood(m: &str, note: Option<&str>) -> NormalizedMood {
        NormalizedMood {
            mood: m.to_string(),
            note: note.map(str::to_string),
        }
    }

    #[test]
    fn test_text_prompt_mentions_missing_note() {
        let prompt = build_prompt(GenerationMode::Text, &mood("sad", None));
        assert!(prompt.contains("Mood: sad"));
        assert!(prompt.contains("No additional note"));
        assert!(prompt.contains("Do not mention AI"));
    }

    #[test]
    fn test_structured_prompt_asks_for_json() {
        let prompt = build_prompt(GenerationMode::Structured, &mood("stressed", Some("exam tomorrow")));
        assert!(prompt.contains("Note: exam tomorrow"));
        assert!(prompt.contains("Return strictly valid JSON only."));
    }

    #[test]
    fn test_envelope_text_wrapped() {
        let env = ResponseEnvelope::parse(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(env, ResponseEnvelope::TextWrapped("hello".to_string()));
    }

    #[test]
    fn test_envelope_direct() {
        let env = ResponseEnvelope::parse(r#"{"supportive": "hi", "affirmations": []}"#).unwrap();
        assert!(matches!(env, ResponseEnvelope::Direct(_)));
    }

    #[test]
    fn test_envelope_non_json_is_malformed() {
        let err = ResponseEnvelope::parse("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, Unavailable::Malformed(_)));
    }

    #[test]
    fn test_text_mode_trims() {
        let msg = ResponseEnvelope::TextWrapped("  Congrats!  \n".to_string())
            .interpret(GenerationMode::Text, "happy")
            .unwrap();
        assert_eq!(msg, SupportMessage::Text("Congrats!".to_string()));
    }

    #[test]
    fn test_text_mode_blank_is_empty_reply() {
        let err = ResponseEnvelope::TextWrapped("   ".to_string())
            .interpret(GenerationMode::Text, "happy")
            .unwrap_err();
        assert!(matches!(err, Unavailable::EmptyReply));
    }

    #[test]
    fn test_text_mode_unwraps_nested_json() {
        let body = r#"{"text": "{\"supportive\": \"You are doing great.\"}"}"#;
        let env = ResponseEnvelope::parse(body).unwrap();
        let msg = env.interpret(GenerationMode::Text, "happy").unwrap();
        assert_eq!(msg, SupportMessage::Text("You are doing great.".to_string()));

        let msg = ResponseEnvelope::TextWrapped("\"Keep going.\"".to_string())
            .interpret(GenerationMode::Text, "tired")
            .unwrap();
        assert_eq!(msg, SupportMessage::Text("Keep going.".to_string()));
    }

    #[test]
    fn test_text_mode_strips_fence() {
        let msg = ResponseEnvelope::TextWrapped("```json\n\"Hang in there.\"\n```".to_string())
            .interpret(GenerationMode::Text, "sad")
            .unwrap();
        assert_eq!(msg, SupportMessage::Text("Hang in there.".to_string()));

        let msg = ResponseEnvelope::TextWrapped("```\nYou are not alone.\n```".to_string())
            .interpret(GenerationMode::Text, "sad")
            .unwrap();
        assert_eq!(msg, SupportMessage::Text("You are not alone.".to_string()));
    }

    #[test]
    fn test_text_mode_object_without_supportive_is_empty_reply() {
        let err = ResponseEnvelope::TextWrapped(r#"{"message": "hi"}"#.to_string())
            .interpret(GenerationMode::Text, "happy")
            .unwrap_err();
        assert!(matches!(err, Unavailable::EmptyReply));
    }

    #[test]
    fn test_structured_unwraps_nested_json() {
        let inner = json!({"supportive": "You can do this.", "affirmations": ["a", "b", "c"]}).to_string();
        let msg = ResponseEnvelope::TextWrapped(inner)
            .interpret(GenerationMode::Structured, "stressed")
            .unwrap();
        assert_eq!(msg.supportive_text(), "You can do this.");
        assert_eq!(msg.affirmations(), &["a", "b", "c"]);
    }

    #[test]
    fn test_structured_strips_code_fence() {
        let wrapped = "```json\n{\"supportive\": \"Breathe.\", \"affirmations\": [\"x\", \"y\", \"z\"]}\n```";
        let msg = ResponseEnvelope::TextWrapped(wrapped.to_string())
            .interpret(GenerationMode::Structured, "anxious")
            .unwrap();
        assert_eq!(msg.supportive_text(), "Breathe.");
    }

    #[test]
    fn test_structured_wrapped_garbage_is_malformed() {
        let err = ResponseEnvelope::TextWrapped("not json at all".to_string())
            .interpret(GenerationMode::Structured, "sad")
            .unwrap_err();
        assert!(matches!(err, Unavailable::Malformed(_)));
    }

    #[test]
    fn test_structured_pads_affirmations() {
        let msg = ResponseEnvelope::Direct(json!({"supportive": "Rest now.", "affirmations": ["Only one."]}))
            .interpret(GenerationMode::Structured, "tired")
            .unwrap();
        let expected = fallback::lookup("tired");
        assert_eq!(msg.affirmations().len(), AFFIRMATION_COUNT);
        assert_eq!(msg.affirmations()[0], "Only one.");
        assert_eq!(msg.affirmations()[1], expected.affirmations[1]);
        assert_eq!(msg.affirmations()[2], expected.affirmations[2]);
    }

    #[test]
    fn test_structured_caps_affirmations() {
        let msg = ResponseEnvelope::Direct(json!({
            "supportive": "Well done.",
            "affirmations": ["1", "2", "3", "4", "5"]
        }))
        .interpret(GenerationMode::Structured, "happy")
        .unwrap();
        assert_eq!(msg.affirmations(), &["1", "2", "3"]);
    }

    #[test]
    fn test_structured_without_supportive_is_empty_reply() {
        let err = ResponseEnvelope::Direct(json!({"affirmations": ["a"]}))
            .interpret(GenerationMode::Structured, "happy")
            .unwrap_err();
        assert!(matches!(err, Unavailable::EmptyReply));
    }

    #[test]
    fn test_strip_code_fence_passthrough() {
        assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[tokio::test]
    async fn test_missing_credential_is_unavailable() {
        let client = GenerationClient::new(GenerationSettings::default());
        assert!(!client.is_enabled());
        let err = client
            .generate(&mood("sad", None), GenerationMode::Text)
            .await
            .unwrap_err();
        assert!(matches!(err, Unavailable::MissingCredential));
    }
}
