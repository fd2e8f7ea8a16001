//! Locally synthesized content for when no provider answer is available.

mod media;
mod text;

use postforge_contracts::platforms::PlatformRegistry;
use postforge_contracts::request::ContentType;
use rand::Rng;

pub use media::{
    encode_uri_component, pick_sample, sample_pool, stock_photo_url, AUDIO_SAMPLES,
    DEFAULT_STOCK_PHOTO_BASE, VIDEO_SAMPLES,
};
pub use text::{capitalize_first, derive_hashtags, draw_emoji, keyword_tags, EMOJI_POOL};

#[derive(Debug, Clone)]
pub struct FallbackSynthesizer {
    platforms: PlatformRegistry,
    stock_photo_base: String,
}

impl Default for FallbackSynthesizer {
    fn default() -> Self {
        Self::new(PlatformRegistry::default(), DEFAULT_STOCK_PHOTO_BASE)
    }
}

impl FallbackSynthesizer {
    pub fn new(platforms: PlatformRegistry, stock_photo_base: impl Into<String>) -> Self {
        Self {
            platforms,
            stock_photo_base: stock_photo_base.into(),
        }
    }

    pub fn hashtags(&self, platform: &str, prompt: &str) -> Vec<String> {
        derive_hashtags(&self.platforms, platform, prompt)
    }

    pub fn synthesize(&self, platform: &str, prompt: &str) -> String {
        self.synthesize_with_rng(platform, prompt, &mut rand::thread_rng())
    }

    /// Platform-styled post echoing `prompt`, with derived hashtags and three
    /// random emoji.
    pub fn synthesize_with_rng<R: Rng + ?Sized>(
        &self,
        platform: &str,
        prompt: &str,
        rng: &mut R,
    ) -> String {
        let hashtags = self.hashtags(platform, prompt);
        let emoji = draw_emoji(rng);
        text::render(self.platforms.template(platform), prompt, &hashtags, emoji)
    }

    pub fn stock_photo_url<R: Rng + ?Sized>(&self, platform: &str, rng: &mut R) -> String {
        let term = self.platforms.image_search_term(platform);
        stock_photo_url(&self.stock_photo_base, &term, rng)
    }

    pub fn sample_media<R: Rng + ?Sized>(
        &self,
        content_type: ContentType,
        rng: &mut R,
    ) -> Option<&'static str> {
        pick_sample(content_type, rng)
    }
}
