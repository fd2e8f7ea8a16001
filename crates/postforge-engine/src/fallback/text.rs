use indexmap::IndexSet;
use postforge_contracts::platforms::{PlatformRegistry, TemplateId, DEFAULT_BASE_TAGS};
use rand::Rng;

pub const EMOJI_POOL: [&str; 29] = [
    "✨", "🔥", "👀", "💯", "🚀", "💪", "🎯", "💡", "🌟", "👏", "❤️", "😊", "🎉", "👋", "💬",
    "📊", "💼", "📈", "🔗", "👔", "🎵", "💃", "🕺", "✌️", "😂", "📹", "🎬", "🎥", "🔔",
];

const MAX_KEYWORD_TAGS: usize = 3;
const MIN_KEYWORD_CHARS: usize = 4;

pub fn capitalize_first(prompt: &str) -> String {
    let mut chars = prompt.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `#word` tags for the first three prompt words longer than three characters.
pub fn keyword_tags(prompt: &str) -> Vec<String> {
    prompt
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_KEYWORD_CHARS)
        .take(MAX_KEYWORD_TAGS)
        .map(|word| format!("#{word}"))
        .collect()
}

/// Platform base tags followed by keyword tags, first occurrence wins.
pub fn derive_hashtags(platforms: &PlatformRegistry, platform: &str, prompt: &str) -> Vec<String> {
    let tags: IndexSet<String> = platforms
        .base_tags(platform)
        .into_iter()
        .chain(keyword_tags(prompt))
        .collect();
    tags.into_iter().collect()
}

pub fn draw_emoji<R: Rng + ?Sized>(rng: &mut R) -> [&'static str; 3] {
    std::array::from_fn(|_| EMOJI_POOL[rng.gen_range(0..EMOJI_POOL.len())])
}

pub fn render(template: TemplateId, prompt: &str, hashtags: &[String], emoji: [&str; 3]) -> String {
    let topic = capitalize_first(prompt);
    let [e0, e1, e2] = emoji;
    let all_tags = join_tags(hashtags, hashtags.len());

    match template {
        TemplateId::Instagram => format!(
            "✨ {e0} New Post {e0} ✨\n\n{topic}\n\n{e1} Double tap if you agree!\n{e2} Tag friends who need to see this\n\n{all_tags}"
        ),
        TemplateId::Facebook => format!(
            "{e0} Just published: {topic}\n\n{e1} What do you think? Let me know in the comments!\n\n{}",
            join_tags(hashtags, 3)
        ),
        TemplateId::Twitter => format!("{e0} {topic}\n\n{} {e1}", join_tags(hashtags, 2)),
        TemplateId::LinkedIn => {
            let lead = hashtags
                .first()
                .map(String::as_str)
                .unwrap_or(DEFAULT_BASE_TAGS[0]);
            format!(
                "I'm excited to share my thoughts on {topic}\n\n{e0} Key takeaways:\n- Professional insight 1\n- Strategic approach 2\n- Future outlook\n\nWhat's your experience? I'd love to hear your perspective in the comments.\n\n#ProfessionalDevelopment {lead}"
            )
        }
        TemplateId::TikTok => format!(
            "{e0} When you discover {topic} {e1}\n\nFollow for more content like this! {e2}\n\n{all_tags}"
        ),
        TemplateId::Generic => format!(
            "{e0} Check out this amazing content about {topic}!\n\n{e1} Let me know your thoughts in the comments.\n\n{all_tags}"
        ),
    }
}

fn join_tags(hashtags: &[String], limit: usize) -> String {
    hashtags
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<&str>>()
        .join(" ")
}
