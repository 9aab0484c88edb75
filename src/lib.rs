//! # AutoMarketer
//!
//! Generates a marketing post for a business and platform by asking every
//! configured LLM provider at once, scoring each candidate for virality and
//! returning the best one. The same content can then be published or
//! scheduled around each platform's peak hours.
//!
//! ## Crates
//!
//! - **[core]**: platforms, requests, results, formatter, fallback templates
//! - **[providers]**: provider adapters and the virality analyzer
//! - **[router]**: fan-out, scoring and selection
//! - **[publish]**: publishers, peak hours and the post scheduler
//! - **[http]**: the JSON API
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use automarketer::{BusinessContext, ContentRouter, GenerationRequest, Platform};
//!
//! # async fn run() -> Result<(), automarketer::RouterError> {
//! let router = ContentRouter::from_env()?;
//! let request = GenerationRequest::new(
//!     Platform::LinkedIn,
//!     BusinessContext::new("Bean There", "coffee"),
//! )
//! .with_topic("autumn blend launch");
//!
//! let outcome = router.generate_best(&request).await;
//! println!("{} scored {}", outcome.best_model.id(), outcome.best_score);
//! # Ok(())
//! # }
//! ```

pub use automarketer_core as core;
pub use automarketer_http as http;
pub use automarketer_providers as providers;
pub use automarketer_publish as publish;
pub use automarketer_router as router;

pub use automarketer_core::{
    BusinessContext, ContentSource, GenerationError, GenerationRequest, ModelSource, Platform,
    ProviderKind, ProviderResult, RankedOutcome,
};
pub use automarketer_publish::{PostScheduler, PublishRequest, Publisher};
pub use automarketer_router::{ContentRouter, RouterConfig, RouterError};
