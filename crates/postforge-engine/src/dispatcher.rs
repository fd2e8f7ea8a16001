use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use anyhow::Result;
use postforge_contracts::error::{ProviderFailure, RequestError};
use postforge_contracts::outcome::{FallbackReason, GenerationOutcome};
use postforge_contracts::platforms::PlatformRegistry;
use postforge_contracts::request::{ContentType, GenerationRequest};
use rand::Rng;
use tracing::{error, info, warn};

use crate::config::EngineConfig;
use crate::fallback::FallbackSynthesizer;
use crate::providers::{
    ContentProvider, FeaturesApiProvider, ImageGenerationRequest, OfflineProvider,
    TextCompletionRequest,
};

const PROMPT_PREVIEW_CHARS: usize = 100;

/// Turns one [`GenerationRequest`] into one piece of displayable content.
///
/// Each call makes at most one provider request. Provider failures are never
/// returned to the caller; they are replaced with synthesized content. The only
/// error is an unsupported content type.
///
/// A panic inside provider or synthesis code is caught and returned as the
/// failure-marker string with an `error!` event. The process panic hook still
/// runs first, so with the default hook the panic message is also printed to
/// stderr. Install a quieter hook with [`std::panic::set_hook`] if that output
/// is unwanted.
pub struct Dispatcher {
    provider: Box<dyn ContentProvider>,
    fallback: FallbackSynthesizer,
}

impl Dispatcher {
    pub fn new<P: ContentProvider + 'static>(provider: P, fallback: FallbackSynthesizer) -> Self {
        Self {
            provider: Box::new(provider),
            fallback,
        }
    }

    /// Uses the HTTP provider when an API key is configured, otherwise every
    /// request is served from the fallback synthesizer.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let fallback =
            FallbackSynthesizer::new(PlatformRegistry::default(), config.stock_photo_base.clone());
        let dispatcher = match config.api_key.as_deref() {
            Some(api_key) => Self::new(FeaturesApiProvider::new(config, api_key)?, fallback),
            None => {
                warn!("no provider API key configured; generation will use synthetic content");
                Self::new(OfflineProvider, fallback)
            }
        };
        Ok(dispatcher)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(&EngineConfig::from_env()?)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn generate(&self, request: &GenerationRequest) -> Result<String, RequestError> {
        self.dispatch(request).into_result()
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> Result<String, RequestError> {
        self.dispatch_with_rng(request, rng).into_result()
    }

    pub fn dispatch(&self, request: &GenerationRequest) -> GenerationOutcome {
        self.dispatch_with_rng(request, &mut rand::thread_rng())
    }

    pub fn dispatch_with_rng<R: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> GenerationOutcome {
        let content_type = match request.content_type() {
            Ok(content_type) => content_type,
            Err(err) => {
                warn!(content_type = %request.content_type, "rejecting generation request");
                return GenerationOutcome::Rejected(err);
            }
        };
        info!(
            content_type = %content_type,
            platform = %request.platform,
            prompt = %prompt_preview(&request.prompt),
            provider = self.provider.name(),
            "generating content"
        );

        let attempt = panic::catch_unwind(AssertUnwindSafe(|| match content_type {
            ContentType::Text => self.generate_text(request, rng),
            ContentType::Image => self.generate_image(request, rng),
            ContentType::Video | ContentType::Audio => self.pick_sample(content_type, rng),
        }));
        match attempt {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = panic_message(&*payload);
                error!(
                    content_type = %content_type,
                    error = %message,
                    "generation failed unexpectedly"
                );
                GenerationOutcome::recovered(message)
            }
        }
    }

    fn generate_text<R: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> GenerationOutcome {
        let completion = TextCompletionRequest::for_platform(&request.platform, &request.prompt);
        let failure = match self.provider.complete_text(&completion) {
            Ok(text) if !text.trim().is_empty() => return GenerationOutcome::ProviderSuccess(text),
            Ok(_) => ProviderFailure::malformed(self.provider.name(), "empty completion"),
            Err(failure) => failure,
        };
        warn!(kind = ?failure.kind(), error = %failure, "text provider failed; synthesizing");
        let content = self
            .fallback
            .synthesize_with_rng(&request.platform, &request.prompt, rng);
        GenerationOutcome::fallback(content, FallbackReason::Provider(failure))
    }

    fn generate_image<R: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> GenerationOutcome {
        let image = ImageGenerationRequest::for_platform(&request.platform, &request.prompt);
        let failure = match self.provider.generate_image(&image) {
            Ok(url) if !url.trim().is_empty() => return GenerationOutcome::ProviderSuccess(url),
            Ok(_) => ProviderFailure::malformed(self.provider.name(), "empty image URL"),
            Err(failure) => failure,
        };
        warn!(kind = ?failure.kind(), error = %failure, "image provider failed; using stock photo");
        let url = self.fallback.stock_photo_url(&request.platform, rng);
        GenerationOutcome::fallback(url, FallbackReason::Provider(failure))
    }

    fn pick_sample<R: Rng + ?Sized>(
        &self,
        content_type: ContentType,
        rng: &mut R,
    ) -> GenerationOutcome {
        match self.fallback.sample_media(content_type, rng) {
            Some(uri) => GenerationOutcome::fallback(uri, FallbackReason::NoLiveProvider),
            None => GenerationOutcome::recovered(format!("no sample media for {content_type}")),
        }
    }
}

fn prompt_preview(prompt: &str) -> String {
    if prompt.chars().count() <= PROMPT_PREVIEW_CHARS {
        return prompt.to_string();
    }
    prompt.chars().take(PROMPT_PREVIEW_CHARS).collect::<String>() + "..."
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        return (*text).to_string();
    }
    if let Some(text) = payload.downcast_ref::<String>() {
        return text.clone();
    }
    "Unknown error".to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use postforge_contracts::error::FailureKind;
    use postforge_contracts::outcome::FAILURE_MARKER;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::fallback::{AUDIO_SAMPLES, VIDEO_SAMPLES};

    #[derive(Clone)]
    struct StubProvider {
        text: Result<String, ProviderFailure>,
        image: Result<String, ProviderFailure>,
        calls: Arc<AtomicUsize>,
    }

    impl StubProvider {
        fn answering(text: &str, image: &str) -> Self {
            Self {
                text: Ok(text.to_string()),
                image: Ok(image.to_string()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing(failure: ProviderFailure) -> Self {
            Self {
                text: Err(failure.clone()),
                image: Err(failure),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl ContentProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn complete_text(&self, _request: &TextCompletionRequest) -> Result<String, ProviderFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.text.clone()
        }

        fn generate_image(
            &self,
            _request: &ImageGenerationRequest,
        ) -> Result<String, ProviderFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.image.clone()
        }
    }

    struct PanickingProvider;

    impl ContentProvider for PanickingProvider {
        fn name(&self) -> &str {
            "panicking"
        }

        fn complete_text(&self, _request: &TextCompletionRequest) -> Result<String, ProviderFailure> {
            panic!("transport exploded");
        }

        fn generate_image(
            &self,
            _request: &ImageGenerationRequest,
        ) -> Result<String, ProviderFailure> {
            panic!("{}", String::from("image transport exploded"));
        }
    }

    fn dispatcher_with(provider: impl ContentProvider + 'static) -> Dispatcher {
        Dispatcher::new(provider, FallbackSynthesizer::default())
    }

    fn offline_failure() -> ProviderFailure {
        ProviderFailure::network("stub", "connection refused")
    }

    #[test]
    fn provider_text_is_returned_untouched() {
        let stub = StubProvider::answering("Grand opening this Friday!", "https://cdn.test/a.png");
        let calls = stub.calls.clone();
        let dispatcher = dispatcher_with(stub);
        let request = GenerationRequest::new("grand opening", "Instagram", ContentType::Text);

        let outcome = dispatcher.dispatch(&request);
        assert_eq!(
            outcome,
            GenerationOutcome::ProviderSuccess("Grand opening this Friday!".to_string())
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn provider_image_url_is_returned() {
        let dispatcher = dispatcher_with(StubProvider::answering("unused", "https://cdn.test/a.png"));
        let request = GenerationRequest::new("latte art", "Instagram", ContentType::Image);
        assert_eq!(
            dispatcher.generate(&request),
            Ok("https://cdn.test/a.png".to_string())
        );
    }

    #[test]
    fn linkedin_text_falls_back_on_provider_failure() {
        let dispatcher = dispatcher_with(StubProvider::failing(offline_failure()));
        let request = GenerationRequest::new("new coffee shop", "LinkedIn", ContentType::Text);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let outcome = dispatcher.dispatch_with_rng(&request, &mut rng);
        assert_eq!(
            outcome.fallback_reason(),
            Some(&FallbackReason::Provider(offline_failure()))
        );
        let text = outcome.into_result().unwrap_or_default();
        assert!(text.contains("#ProfessionalDevelopment"));
        assert!(["#LinkedIn", "#Professional", "#Business"]
            .iter()
            .any(|tag| text.contains(tag)));
        assert_eq!(text.matches("New coffee shop").count(), 1);
    }

    #[test]
    fn malformed_and_empty_completions_fall_back() {
        let malformed = ProviderFailure::malformed("stub", "no completion in response");
        let dispatcher = dispatcher_with(StubProvider::failing(malformed));
        let request = GenerationRequest::new("weekend sale", "Facebook", ContentType::Text);
        let outcome = dispatcher.dispatch(&request);
        match outcome.fallback_reason() {
            Some(FallbackReason::Provider(failure)) => {
                assert_eq!(failure.kind(), FailureKind::MalformedResponse)
            }
            other => panic!("unexpected reason {other:?}"),
        }

        let dispatcher = dispatcher_with(StubProvider::answering("   ", "https://cdn.test/a.png"));
        let text = dispatcher.generate(&request).unwrap_or_default();
        assert!(text.contains("Weekend sale"));
        assert!(text.split_whitespace().any(|token| token.starts_with('#')));
    }

    #[test]
    fn text_fallback_always_echoes_prompt_and_hashtag() {
        let dispatcher = dispatcher_with(StubProvider::failing(offline_failure()));
        let platforms = [
            "Instagram",
            "Facebook",
            "Twitter/X",
            "LinkedIn",
            "TikTok",
            "YouTube",
            "Pinterest",
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for platform in platforms {
            let request = GenerationRequest::new("summer menu launch", platform, ContentType::Text);
            let text = dispatcher
                .generate_with_rng(&request, &mut rng)
                .unwrap_or_default();
            assert!(!text.is_empty());
            assert!(text.contains("Summer menu launch"), "platform {platform}");
            assert!(
                text.split_whitespace().any(|token| token.starts_with('#')),
                "platform {platform}"
            );
        }
    }

    #[test]
    fn tiktok_image_falls_back_to_stock_query() {
        let dispatcher = dispatcher_with(StubProvider::failing(ProviderFailure::status(
            "stub", 500, "boom",
        )));
        let request = GenerationRequest::new("dance challenge", "TikTok", ContentType::Image);
        let url = dispatcher.generate(&request).unwrap_or_default();
        assert!(url.starts_with("https://source.unsplash.com/random/800x600/?"));
        assert!(url.contains("tiktok%20video%20content%20creation"));
        assert!(url.contains("&random="));
    }

    #[test]
    fn unknown_platform_image_uses_default_term() {
        let dispatcher = dispatcher_with(OfflineProvider);
        let request = GenerationRequest::new("pins", "Pinterest", ContentType::Image);
        let url = dispatcher.generate(&request).unwrap_or_default();
        assert!(url.contains("?pinterest%20social%20media&random="));
    }

    #[test]
    fn video_and_audio_never_call_the_provider() {
        let stub = StubProvider::answering("unused", "unused");
        let calls = stub.calls.clone();
        let dispatcher = dispatcher_with(stub);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..50 {
            let video = GenerationRequest::new("vlog", "YouTube", ContentType::Video);
            let uri = dispatcher.generate_with_rng(&video, &mut rng).unwrap_or_default();
            assert!(VIDEO_SAMPLES.contains(&uri.as_str()));

            let audio = GenerationRequest::new("beat", "TikTok", ContentType::Audio);
            let outcome = dispatcher.dispatch_with_rng(&audio, &mut rng);
            assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::NoLiveProvider));
            let uri = outcome.into_result().unwrap_or_default();
            assert!(AUDIO_SAMPLES.contains(&uri.as_str()));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsupported_content_type_is_rejected_without_provider_call() {
        let stub = StubProvider::answering("unused", "unused");
        let calls = stub.calls.clone();
        let dispatcher = dispatcher_with(stub);
        let request = GenerationRequest::from_raw("anything", "Instagram", "unsupported");

        assert_eq!(
            dispatcher.dispatch(&request),
            GenerationOutcome::Rejected(RequestError::UnsupportedContentType(
                "unsupported".to_string()
            ))
        );
        assert!(dispatcher.generate(&request).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn panics_become_marker_string() {
        let dispatcher = dispatcher_with(PanickingProvider);

        let text = GenerationRequest::new("anything", "Instagram", ContentType::Text);
        assert_eq!(
            dispatcher.generate(&text),
            Ok(format!("{FAILURE_MARKER} transport exploded"))
        );

        let image = GenerationRequest::new("anything", "Instagram", ContentType::Image);
        let outcome = dispatcher.dispatch(&image);
        assert_eq!(
            outcome.fallback_reason(),
            Some(&FallbackReason::Recovered("image transport exploded".to_string()))
        );
    }

    #[test]
    fn missing_api_key_selects_offline_provider() -> anyhow::Result<()> {
        let dispatcher = Dispatcher::from_config(&EngineConfig::default())?;
        assert_eq!(dispatcher.provider_name(), "offline");

        let request = GenerationRequest::new("rainy day reads", "Twitter", ContentType::Text);
        let text = dispatcher.generate(&request).unwrap_or_default();
        assert!(text.contains("Rainy day reads"));
        assert!(text.contains("#Twitter #Trending"));
        Ok(())
    }

    #[test]
    fn configured_key_selects_http_provider_and_degrades_when_unreachable() -> anyhow::Result<()> {
        let config = EngineConfig {
            api_key: Some("test-key".to_string()),
            api_base: "http://127.0.0.1:1".to_string(),
            ..EngineConfig::default()
        };
        let dispatcher = Dispatcher::from_config(&config)?;
        assert_eq!(dispatcher.provider_name(), "features-api");

        let request = GenerationRequest::new("open mic night", "Facebook", ContentType::Text);
        let outcome = dispatcher.dispatch(&request);
        assert!(outcome.is_fallback());
        assert!(outcome
            .content()
            .is_some_and(|text| text.contains("Just published: Open mic night")));
        Ok(())
    }

    #[test]
    fn prompt_preview_truncates_long_prompts() {
        let long = "a".repeat(140);
        assert_eq!(prompt_preview(&long).chars().count(), 103);
        assert_eq!(prompt_preview("short"), "short");
    }
}
