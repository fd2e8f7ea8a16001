use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::fallback::DEFAULT_STOCK_PHOTO_BASE;

pub const DEFAULT_API_BASE: &str = "https://api.1min.ai";
pub const DEFAULT_TEXT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Runtime settings for the dispatcher and its HTTP provider.
///
/// Read from `POSTFORGE_*` environment variables; blank values count as unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub text_model: String,
    pub image_model: String,
    /// `None` leaves requests without a transport deadline.
    pub http_timeout: Option<Duration>,
    pub stock_photo_base: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            http_timeout: None,
            stock_photo_base: DEFAULT_STOCK_PHOTO_BASE.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let http_timeout = match read("POSTFORGE_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .with_context(|| format!("POSTFORGE_HTTP_TIMEOUT_SECS is not a number: {raw}"))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_key: read("POSTFORGE_API_KEY").or_else(|| read("ONEMIN_API_KEY")),
            api_base: read("POSTFORGE_API_BASE")
                .map(|value| value.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            text_model: read("POSTFORGE_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: read("POSTFORGE_IMAGE_MODEL").unwrap_or(defaults.image_model),
            http_timeout,
            stock_photo_base: read("POSTFORGE_STOCK_PHOTO_BASE")
                .map(|value| value.trim_end_matches('/').to_string())
                .unwrap_or(defaults.stock_photo_base),
        })
    }
}
