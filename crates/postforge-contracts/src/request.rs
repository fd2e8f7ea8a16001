use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Requested output modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Image,
    Video,
    Audio,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Text,
        ContentType::Image,
        ContentType::Video,
        ContentType::Audio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Image => "image",
            ContentType::Video => "video",
            ContentType::Audio => "audio",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = RequestError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        ContentType::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RequestError::UnsupportedContentType(raw.to_string()))
    }
}

/// One generation request as received from the caller.
///
/// `content_type` stays the raw wire string so that an unknown modality is
/// still representable and can be rejected by the dispatcher instead of
/// failing deserialization upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub prompt: String,
    pub platform: String,
    pub content_type: String,
}

impl GenerationRequest {
    pub fn new(
        prompt: impl Into<String>,
        platform: impl Into<String>,
        content_type: ContentType,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            platform: platform.into(),
            content_type: content_type.as_str().to_string(),
        }
    }

    /// Builds a request from an untyped modality name without validating it.
    pub fn from_raw(
        prompt: impl Into<String>,
        platform: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            platform: platform.into(),
            content_type: content_type.into(),
        }
    }

    pub fn content_type(&self) -> Result<ContentType, RequestError> {
        self.content_type.parse()
    }
}
