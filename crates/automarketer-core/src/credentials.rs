//! Credential sources for provider API keys.

use crate::secret::SecretString;
use crate::types::ProviderKind;
use std::collections::HashMap;
use std::fmt;

/// Supplies the API key for each provider kind.
///
/// Adapters look their key up on every call, so a key added to the source at
/// runtime takes effect on the next request.
pub trait CredentialSource: Send + Sync + fmt::Debug {
    /// The key for `kind`, or `None` when absent or blank.
    fn api_key(&self, kind: ProviderKind) -> Option<SecretString>;

    /// Whether `kind` has a usable key.
    fn has_credentials(&self, kind: ProviderKind) -> bool {
        self.api_key(kind).is_some()
    }
}

/// Reads keys from the process environment (see [`ProviderKind::env_var`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn api_key(&self, kind: ProviderKind) -> Option<SecretString> {
        std::env::var(kind.env_var())
            .ok()
            .map(SecretString::from)
            .filter(|key| !key.is_empty())
    }
}

/// Fixed in-memory key table.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    keys: HashMap<ProviderKind, SecretString>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_key(mut self, kind: ProviderKind, key: impl Into<SecretString>) -> Self {
        self.keys.insert(kind, key.into());
        self
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl CredentialSource for StaticCredentials {
    fn api_key(&self, kind: ProviderKind) -> Option<SecretString> {
        self.keys.get(&kind).filter(|key| !key.is_empty()).cloned()
    }
}
