use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use postforge_contracts::request::ContentType;
use rand::Rng;

pub const DEFAULT_STOCK_PHOTO_BASE: &str = "https://source.unsplash.com";

pub static VIDEO_SAMPLES: [&str; 3] = [
    "https://assets.mixkit.co/videos/preview/mixkit-woman-typing-on-a-laptop-in-a-cafe-2558-large.mp4",
    "https://assets.mixkit.co/videos/preview/mixkit-young-woman-talking-on-a-smartphone-4353-large.mp4",
    "https://assets.mixkit.co/videos/preview/mixkit-young-woman-vlogging-about-her-new-laptop-42634-large.mp4",
];

pub static AUDIO_SAMPLES: [&str; 3] = [
    "https://assets.mixkit.co/music/preview/mixkit-tech-house-vibes-130.mp3",
    "https://assets.mixkit.co/music/preview/mixkit-hip-hop-02-738.mp3",
    "https://assets.mixkit.co/music/preview/mixkit-raising-me-higher-34.mp3",
];

// Same reserved set as JavaScript's encodeURIComponent.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const CACHE_BUST_RANGE: u32 = 1000;

pub fn sample_pool(content_type: ContentType) -> Option<&'static [&'static str]> {
    match content_type {
        ContentType::Video => Some(VIDEO_SAMPLES.as_slice()),
        ContentType::Audio => Some(AUDIO_SAMPLES.as_slice()),
        ContentType::Text | ContentType::Image => None,
    }
}

pub fn pick_sample<R: Rng + ?Sized>(content_type: ContentType, rng: &mut R) -> Option<&'static str> {
    let pool = sample_pool(content_type)?;
    Some(pool[rng.gen_range(0..pool.len())])
}

pub fn encode_uri_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

/// Random stock photo for `search_term`, with a cache-busting parameter.
pub fn stock_photo_url<R: Rng + ?Sized>(base: &str, search_term: &str, rng: &mut R) -> String {
    let cache_bust = rng.gen_range(0..CACHE_BUST_RANGE);
    format!(
        "{}/random/800x600/?{}&random={cache_bust}",
        base.trim_end_matches('/'),
        encode_uri_component(search_term)
    )
}
