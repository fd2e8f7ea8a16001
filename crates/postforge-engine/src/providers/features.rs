use anyhow::{Context, Result};
use postforge_contracts::error::ProviderFailure;
use reqwest::blocking::Client as HttpClient;
use serde_json::{json, Value};
use tracing::debug;

use super::{ContentProvider, ImageGenerationRequest, TextCompletionRequest};
use crate::config::EngineConfig;

const PROVIDER_NAME: &str = "features-api";
const FEATURES_PATH: &str = "/api/features";
const API_KEY_HEADER: &str = "API-KEY";
const ERROR_BODY_MAX_CHARS: usize = 512;

/// Client for a `POST /api/features` style gateway that serves both text and
/// image generation behind one endpoint, switched by the `type` field.
pub struct FeaturesApiProvider {
    api_base: String,
    api_key: String,
    text_model: String,
    image_model: String,
    http: HttpClient,
}

impl FeaturesApiProvider {
    pub fn new(config: &EngineConfig, api_key: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.http_timeout)
            .build()
            .context("failed to build provider HTTP client")?;
        Ok(Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            http,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{FEATURES_PATH}", self.api_base)
    }

    pub fn text_payload(&self, request: &TextCompletionRequest) -> Value {
        json!({
            "type": "TEXT_GENERATION",
            "model": self.text_model,
            "promptObject": {
                "messages": [
                    { "role": "system", "content": request.system },
                    { "role": "user", "content": request.prompt },
                ],
                "temperature": request.temperature,
                "max_tokens": request.max_tokens,
            }
        })
    }

    pub fn image_payload(&self, request: &ImageGenerationRequest) -> Value {
        json!({
            "type": "IMAGE_GENERATION",
            "model": self.image_model,
            "promptObject": {
                "prompt": request.prompt,
                "n": request.n,
                "size": request.size,
                "quality": request.quality,
            }
        })
    }

    fn post_json(&self, payload: &Value) -> Result<Value, ProviderFailure> {
        let endpoint = self.endpoint();
        debug!(endpoint = %endpoint, kind = ?payload.get("type"), "posting provider request");
        let response = self
            .http
            .post(&endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(payload)
            .send()
            .map_err(|err| ProviderFailure::network(PROVIDER_NAME, error_chain_text(&err)))?;

        let status = response.status();
        debug!(endpoint = %endpoint, status = status.as_u16(), "provider responded");
        let body = response
            .text()
            .map_err(|err| ProviderFailure::network(PROVIDER_NAME, error_chain_text(&err)))?;
        if !status.is_success() {
            return Err(ProviderFailure::status(
                PROVIDER_NAME,
                status.as_u16(),
                truncate_text(&body, ERROR_BODY_MAX_CHARS),
            ));
        }
        serde_json::from_str(&body)
            .map_err(|err| ProviderFailure::malformed(PROVIDER_NAME, format!("invalid JSON: {err}")))
    }
}

impl ContentProvider for FeaturesApiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn complete_text(&self, request: &TextCompletionRequest) -> Result<String, ProviderFailure> {
        let response = self.post_json(&self.text_payload(request))?;
        extract_completion(&response)
            .ok_or_else(|| ProviderFailure::malformed(PROVIDER_NAME, "no completion in response"))
    }

    fn generate_image(&self, request: &ImageGenerationRequest) -> Result<String, ProviderFailure> {
        let response = self.post_json(&self.image_payload(request))?;
        extract_image_url(&response)
            .ok_or_else(|| ProviderFailure::malformed(PROVIDER_NAME, "no image URL in response"))
    }
}

/// Accepts `result.choices[0].message.content` or a plain string `result`.
pub fn extract_completion(payload: &Value) -> Option<String> {
    let result = payload.get("result")?;
    let text = match result.get("choices").and_then(Value::as_array) {
        Some(choices) if !choices.is_empty() => choices[0]
            .get("message")
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str),
        _ => result.as_str(),
    }?;
    non_blank(text)
}

/// Reads `result.data[0].url`.
pub fn extract_image_url(payload: &Value) -> Option<String> {
    let url = payload
        .get("result")?
        .get("data")?
        .as_array()?
        .first()?
        .get("url")?
        .as_str()?;
    non_blank(url)
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }
    Some(value.to_string())
}

fn error_chain_text(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut current = Some(err);
    while let Some(cause) = current {
        let text = cause.to_string();
        let trimmed = text.trim();
        if !trimmed.is_empty() && parts.last().map(String::as_str) != Some(trimmed) {
            parts.push(trimmed.to_string());
        }
        current = cause.source();
    }
    truncate_text(&parts.join(" | caused by: "), ERROR_BODY_MAX_CHARS)
}

/// Cuts `value` after `max_chars` scalar values, marking the cut with `…`.
fn truncate_text(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &value[..cut]),
        None => value.to_string(),
    }
}
