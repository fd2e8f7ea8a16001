pub mod error;
pub mod outcome;
pub mod platforms;
pub mod request;

pub use error::{FailureKind, ProviderFailure, RequestError};
pub use outcome::{FallbackReason, GenerationOutcome};
pub use platforms::{normalize_platform_key, PlatformProfile, PlatformRegistry, TemplateId};
pub use request::{ContentType, GenerationRequest};
