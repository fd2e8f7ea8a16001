//! Content generation for social posts.
//!
//! [`Dispatcher`] routes a [`GenerationRequest`] to a live provider by
//! modality and, when the provider cannot answer, substitutes content from
//! [`FallbackSynthesizer`]. Every accepted request yields a non-empty string.
//!
//! ```rust,ignore
//! use postforge_engine::{ContentType, Dispatcher, GenerationRequest};
//!
//! let dispatcher = Dispatcher::from_env()?;
//! let request = GenerationRequest::new("new coffee shop", "LinkedIn", ContentType::Text);
//! let post = dispatcher.generate(&request)?;
//! ```

pub mod config;
pub mod dispatcher;
pub mod fallback;
pub mod providers;

pub use config::EngineConfig;
pub use dispatcher::Dispatcher;
pub use fallback::FallbackSynthesizer;
pub use postforge_contracts::{
    ContentType, FallbackReason, GenerationOutcome, GenerationRequest, ProviderFailure,
    RequestError,
};
pub use providers::{ContentProvider, FeaturesApiProvider, OfflineProvider};
