mod registry;

pub use registry::{
    normalize_platform_key, PlatformProfile, PlatformRegistry, TemplateId, DEFAULT_BASE_TAGS,
};
