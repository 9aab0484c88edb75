//! # AutoMarketer Publish
//!
//! Delivers finished content and schedules it around peak hours.
//!
//! | Platform | Publisher |
//! |----------|-----------|
//! | Twitter, LinkedIn, Instagram, Facebook, TikTok | [`AyrsharePublisher`] |
//! | Blog | [`BloggerPublisher`] |
//! | Email | [`BrevoPublisher`] |
//!
//! [`PlatformPublisher`] routes each request to the right one, and
//! [`PostScheduler`] owns the scheduled-post queue, the [`PeakHours`] table
//! and the auto-posting loop.

pub mod ayrshare;
pub mod blogger;
pub mod brevo;
pub mod config;
pub mod error;
mod http;
pub mod peak_hours;
pub mod platform;
pub mod publisher;
pub mod scheduler;
pub mod types;

pub use ayrshare::AyrsharePublisher;
pub use blogger::BloggerPublisher;
pub use brevo::BrevoPublisher;
pub use config::{EmailSender, PublishConfig, PublishConfigBuilder};
pub use error::{PublishError, PublishResult, SchedulerError, SchedulerResult};
pub use peak_hours::PeakHours;
pub use platform::{publish_many, PlatformPublisher};
pub use publisher::Publisher;
pub use scheduler::{
    AutoPostJob, Clock, PostScheduler, PostStatus, ScheduledPost, SchedulerStatus, system_clock,
};
pub use types::{BatchReceipt, Media, PlatformOutcome, PublishReceipt, PublishRequest};
