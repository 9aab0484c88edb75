//! Ready-made requests, credentials and clocks for tests.

use automarketer_core::{
    BusinessContext, CredentialSource, GenerationRequest, Platform, ProviderKind, StaticCredentials,
};
use automarketer_publish::Clock;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

/// A coffee shop, the business every test markets.
pub fn sample_business() -> BusinessContext {
    BusinessContext::new("Bean There", "coffee").with_description("Small-batch roastery and cafe")
}

pub fn sample_request(platform: Platform) -> GenerationRequest {
    GenerationRequest::new(platform, sample_business()).with_topic("autumn blend launch")
}

/// Credentials holding a dummy key for each of `kinds`.
pub fn credentials_for(kinds: &[ProviderKind]) -> Arc<dyn CredentialSource> {
    let credentials = kinds.iter().fold(StaticCredentials::new(), |creds, kind| {
        creds.with_key(*kind, format!("test-key-{}", kind.id()))
    });
    Arc::new(credentials)
}

pub fn all_credentials() -> Arc<dyn CredentialSource> {
    credentials_for(&ProviderKind::ALL)
}

/// A clock frozen at `now`.
pub fn fixed_clock(now: DateTime<Utc>) -> Clock {
    Arc::new(move || now)
}

/// A clock frozen on 2026-06-01 at `hour:minute` UTC.
pub fn clock_at(hour: u32, minute: u32) -> Clock {
    let now = Utc
        .with_ymd_and_hms(2026, 6, 1, hour, minute, 0)
        .single()
        .unwrap_or_else(Utc::now);
    fixed_clock(now)
}
