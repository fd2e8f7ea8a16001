use indexmap::IndexMap;

/// Base tags for platforms without a profile.
pub const DEFAULT_BASE_TAGS: [&str; 2] = ["#Content", "#SocialMedia"];

/// Wrapper copy used by the text synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Instagram,
    Facebook,
    Twitter,
    LinkedIn,
    TikTok,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformProfile {
    pub key: String,
    pub base_tags: Vec<String>,
    pub image_search_term: String,
    pub template: TemplateId,
}

/// Lower-cases and drops every character outside `a-z`.
///
/// `"Twitter/X"` becomes `"twitterx"`, `"LinkedIn "` becomes `"linkedin"`.
pub fn normalize_platform_key(platform: &str) -> String {
    platform
        .chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect()
}

/// Static platform style table keyed by normalized platform key.
///
/// Hashtags resolve through [`normalize_platform_key`]; templates and image
/// search terms match the lower-cased name exactly.
#[derive(Debug, Clone)]
pub struct PlatformRegistry {
    profiles: IndexMap<String, PlatformProfile>,
    aliases: IndexMap<String, String>,
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PlatformRegistry {
    pub fn new(profiles: Option<IndexMap<String, PlatformProfile>>) -> Self {
        let (profiles, aliases) = match profiles {
            Some(profiles) => (profiles, IndexMap::new()),
            None => (default_profiles(), default_aliases()),
        };
        Self { profiles, aliases }
    }

    /// Registers `alias` as another name for `key`.
    ///
    /// The alias answers both lookups: its normalized form for tags and its
    /// lower-cased spelling for templates and search terms.
    pub fn with_alias(mut self, alias: &str, key: &str) -> Self {
        self.aliases
            .insert(alias.to_lowercase(), normalize_platform_key(key));
        self
    }

    /// Looks up a profile by normalized key, so `"Tik Tok"` finds `tiktok`.
    pub fn resolve(&self, platform: &str) -> Option<&PlatformProfile> {
        let key = normalize_platform_key(platform);
        if let Some(profile) = self.profiles.get(&key) {
            return Some(profile);
        }
        let (_, target) = self
            .aliases
            .iter()
            .find(|(alias, _)| normalize_platform_key(alias) == key)?;
        self.profiles.get(target)
    }

    /// Looks up a profile by case-insensitive name, so `"Tik Tok"` finds nothing.
    pub fn resolve_name(&self, platform: &str) -> Option<&PlatformProfile> {
        let name = platform.to_lowercase();
        if let Some(profile) = self.profiles.get(&name) {
            return Some(profile);
        }
        let target = self.aliases.get(&name)?;
        self.profiles.get(target)
    }

    pub fn list(&self) -> impl Iterator<Item = &PlatformProfile> {
        self.profiles.values()
    }

    pub fn base_tags(&self, platform: &str) -> Vec<String> {
        match self.resolve(platform) {
            Some(profile) => profile.base_tags.clone(),
            None => DEFAULT_BASE_TAGS.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    pub fn image_search_term(&self, platform: &str) -> String {
        match self.resolve_name(platform) {
            Some(profile) => profile.image_search_term.clone(),
            None => format!("{} social media", platform.to_lowercase()),
        }
    }

    pub fn template(&self, platform: &str) -> TemplateId {
        self.resolve_name(platform)
            .map(|profile| profile.template)
            .unwrap_or(TemplateId::Generic)
    }
}

fn default_profiles() -> IndexMap<String, PlatformProfile> {
    let mut map = IndexMap::new();

    let mut insert = |key: &str, base_tags: &[&str], image_search_term: &str, template| {
        map.insert(
            key.to_string(),
            PlatformProfile {
                key: key.to_string(),
                base_tags: base_tags.iter().map(|tag| (*tag).to_string()).collect(),
                image_search_term: image_search_term.to_string(),
                template,
            },
        );
    };

    insert(
        "instagram",
        &["#Instagram", "#Content", "#Marketing"],
        "instagram social media photography",
        TemplateId::Instagram,
    );
    insert(
        "facebook",
        &["#Facebook", "#Sharing", "#Community"],
        "facebook social media marketing",
        TemplateId::Facebook,
    );
    insert(
        "twitter",
        &["#Twitter", "#Trending", "#News"],
        "twitter social media post",
        TemplateId::Twitter,
    );
    insert(
        "linkedin",
        &["#LinkedIn", "#Professional", "#Business"],
        "linkedin professional business",
        TemplateId::LinkedIn,
    );
    insert(
        "tiktok",
        &["#TikTok", "#Trending", "#Viral"],
        "tiktok video content creation",
        TemplateId::TikTok,
    );
    // No dedicated copy for YouTube; tags and search term only.
    insert(
        "youtube",
        &["#YouTube", "#Video", "#Content"],
        "youtube video content creator",
        TemplateId::Generic,
    );

    map
}

fn default_aliases() -> IndexMap<String, String> {
    let mut map = IndexMap::new();
    map.insert("twitter/x".to_string(), "twitter".to_string());
    map.insert("x".to_string(), "twitter".to_string());
    map
}
