use serde::{Deserialize, Serialize};

pub const DEFAULT_POLICY_VERSION: u32 = 1;

/// Versioned feature flags for the checkout guards, passed by value into each evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionPolicy {
    pub version: u32,
    /// Off: the registration window guard passes unconditionally.
    pub enforce_registration_window: bool,
    /// Off: agreements are collected at sign-up, so checkout does not re-check them.
    pub require_agreements: bool,
    pub required_agreements: Vec<String>,
}

impl AdmissionPolicy {
    pub fn default_agreements() -> Vec<String> {
        ["terms", "privacy", "refund"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            version: DEFAULT_POLICY_VERSION,
            enforce_registration_window: false,
            require_agreements: false,
            required_agreements: Self::default_agreements(),
        }
    }
}
