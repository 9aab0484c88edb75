//! # AutoMarketer Router
//!
//! The multi-provider generation-and-selection pipeline:
//!
//! ```text
//! Availability ─▶ Fan-Out (N adapters, one deadline) ─▶ Scorer ─▶ Selector ─▶ Formatter
//!                         │ zero usable results                      ▲
//!                         └──────────── template fallback ───────────┘
//! ```
//!
//! Adapter failures, panics and timeouts are isolated and logged; the caller
//! always receives a [`RankedOutcome`](automarketer_core::RankedOutcome).

pub mod availability;
pub mod config;
pub mod error;
pub mod fanout;
pub mod pipeline;
pub mod scoring;
pub mod selector;

pub use availability::{eligible_kinds, resolve_available};
pub use config::{RouterConfig, RouterConfigBuilder};
pub use error::{RouterError, RouterResult};
pub use fanout::{FanOutReport, FanOutScheduler, ProviderFailure};
pub use pipeline::{ContentRouter, GenerationReport};
pub use scoring::{is_valid_score, Scorer};
pub use selector::{rank, Selection};
