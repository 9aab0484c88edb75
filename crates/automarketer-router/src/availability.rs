//! Availability Resolver: which registered adapters may run.
//!
//! A pure function of configuration state. Missing credentials shrink the
//! eligible set; no network calls are made.

use automarketer_core::{CredentialSource, ProviderKind};
use automarketer_providers::ContentProvider;
use std::sync::Arc;
use tracing::debug;

/// Eligible kinds among `registered`, in declaration order.
pub fn eligible_kinds<F>(registered: &[ProviderKind], has_credentials: F) -> Vec<ProviderKind>
where
    F: Fn(ProviderKind) -> bool,
{
    let mut eligible: Vec<ProviderKind> = registered
        .iter()
        .copied()
        .filter(|kind| has_credentials(*kind))
        .collect();
    eligible.sort_by_key(|kind| kind.declaration_index());
    eligible.dedup();
    eligible
}

/// Adapters from `providers` whose kind has credentials, in declaration order.
pub fn resolve_available(
    providers: &[Arc<dyn ContentProvider>],
    credentials: &dyn CredentialSource,
) -> Vec<Arc<dyn ContentProvider>> {
    let mut available: Vec<Arc<dyn ContentProvider>> = providers
        .iter()
        .filter(|provider| {
            let present = credentials.has_credentials(provider.kind());
            if !present {
                debug!(provider = %provider.kind(), "Skipping provider without credentials");
            }
            present
        })
        .cloned()
        .collect();
    available.sort_by_key(|provider| provider.kind().declaration_index());
    available
}
