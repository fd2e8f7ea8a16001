mod features;

use postforge_contracts::error::ProviderFailure;

pub use features::{extract_completion, extract_image_url, FeaturesApiProvider};

pub const TEXT_TEMPERATURE: f64 = 0.7;
pub const TEXT_MAX_TOKENS: u32 = 500;
pub const IMAGE_SIZE: &str = "1024x1024";
pub const IMAGE_QUALITY: &str = "standard";

#[derive(Debug, Clone, PartialEq)]
pub struct TextCompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl TextCompletionRequest {
    pub fn for_platform(platform: &str, prompt: &str) -> Self {
        Self {
            system: format!(
                "You are a social media content creator for {platform}. Create engaging content \
                 based on the user's prompt. Make it appropriate for the platform's style and format."
            ),
            prompt: prompt.to_string(),
            temperature: TEXT_TEMPERATURE,
            max_tokens: TEXT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub n: u32,
    pub size: String,
    pub quality: String,
}

impl ImageGenerationRequest {
    pub fn for_platform(platform: &str, prompt: &str) -> Self {
        Self {
            prompt: format!("Create a social media image for {platform} about: {prompt}"),
            n: 1,
            size: IMAGE_SIZE.to_string(),
            quality: IMAGE_QUALITY.to_string(),
        }
    }
}

/// A live generation backend. Implementations make a single attempt per call
/// and classify every failure.
pub trait ContentProvider: Send + Sync {
    fn name(&self) -> &str;
    fn complete_text(&self, request: &TextCompletionRequest) -> Result<String, ProviderFailure>;
    /// Returns the URI of the first generated image.
    fn generate_image(&self, request: &ImageGenerationRequest) -> Result<String, ProviderFailure>;
}

/// Stand-in used when no credentials are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProvider;

impl ContentProvider for OfflineProvider {
    fn name(&self) -> &str {
        "offline"
    }

    fn complete_text(&self, _request: &TextCompletionRequest) -> Result<String, ProviderFailure> {
        Err(ProviderFailure::not_configured(self.name(), "no API key set"))
    }

    fn generate_image(&self, _request: &ImageGenerationRequest) -> Result<String, ProviderFailure> {
        Err(ProviderFailure::not_configured(self.name(), "no API key set"))
    }
}

#[cfg(test)]
mod tests {
    use postforge_contracts::error::FailureKind;

    use super::*;

    #[test]
    fn text_request_embeds_platform_in_system_turn() {
        let request = TextCompletionRequest::for_platform("Instagram", "sunset hike");
        assert!(request
            .system
            .starts_with("You are a social media content creator for Instagram."));
        assert!(request.system.contains("based on the user's prompt"));
        assert_eq!(request.prompt, "sunset hike");
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 500);
    }

    #[test]
    fn image_request_is_a_single_square_image() {
        let request = ImageGenerationRequest::for_platform("TikTok", "dance trends");
        assert_eq!(
            request.prompt,
            "Create a social media image for TikTok about: dance trends"
        );
        assert_eq!(request.n, 1);
        assert_eq!(request.size, "1024x1024");
        assert_eq!(request.quality, "standard");
    }

    #[test]
    fn offline_provider_reports_unavailable() {
        let provider = OfflineProvider;
        let failure = provider
            .complete_text(&TextCompletionRequest::for_platform("X", "hi"))
            .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::Unavailable);
        assert_eq!(failure.provider(), "offline");
        assert!(provider
            .generate_image(&ImageGenerationRequest::for_platform("X", "hi"))
            .is_err());
    }
}
