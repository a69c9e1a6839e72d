//! Checkout-time authorization: an ordered chain of independent guards with first-failure
//! short-circuit.

mod policy;
mod rules;

pub use policy::{AdmissionPolicy, DEFAULT_POLICY_VERSION};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Company, GlobalSettings, GuardResult, ProductCatalog, UserContext};

/// Immutable input bundle every guard reads from.
#[derive(Debug, Clone)]
pub struct CheckoutContext<'a> {
    pub settings: &'a GlobalSettings,
    pub company: &'a Company,
    pub user: &'a UserContext,
    pub catalog: &'a ProductCatalog,
    pub policy: AdmissionPolicy,
    pub evaluated_at: DateTime<Utc>,
}

/// A pure check that can block checkout.
pub trait Guard {
    fn evaluate(&self, ctx: &CheckoutContext<'_>) -> GuardResult;
}

/// Built-in guards, listed in default priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardKind {
    CompanyActive,
    CompanyMatch,
    RegistrationWindow,
    FcfsCapacity,
    WhitelistVerified,
    ProductSelected,
    ProductsActive,
    LockerActive,
    Agreements,
}

impl GuardKind {
    /// Default order. Later guards assume earlier ones passed.
    pub fn ordered() -> [GuardKind; 9] {
        [
            GuardKind::CompanyActive,
            GuardKind::CompanyMatch,
            GuardKind::RegistrationWindow,
            GuardKind::FcfsCapacity,
            GuardKind::WhitelistVerified,
            GuardKind::ProductSelected,
            GuardKind::ProductsActive,
            GuardKind::LockerActive,
            GuardKind::Agreements,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            GuardKind::CompanyActive => "company_active",
            GuardKind::CompanyMatch => "company_match",
            GuardKind::RegistrationWindow => "registration_window",
            GuardKind::FcfsCapacity => "fcfs_capacity",
            GuardKind::WhitelistVerified => "whitelist_verified",
            GuardKind::ProductSelected => "product_selected",
            GuardKind::ProductsActive => "products_active",
            GuardKind::LockerActive => "locker_active",
            GuardKind::Agreements => "agreements",
        }
    }
}

impl Guard for GuardKind {
    fn evaluate(&self, ctx: &CheckoutContext<'_>) -> GuardResult {
        match self {
            GuardKind::CompanyActive => rules::company_active(ctx),
            GuardKind::CompanyMatch => rules::company_match(ctx),
            GuardKind::RegistrationWindow => rules::registration_window(ctx),
            GuardKind::FcfsCapacity => rules::fcfs_capacity(ctx),
            GuardKind::WhitelistVerified => rules::whitelist_verified(ctx),
            GuardKind::ProductSelected => rules::product_selected(ctx),
            GuardKind::ProductsActive => ctx
                .user
                .selected_products
                .iter()
                .map(|product_id| rules::product_active(ctx, product_id))
                .find(|result| !result.can_pass)
                .unwrap_or_else(|| GuardResult::pass("Selected products are on sale")),
            GuardKind::LockerActive => rules::locker_active(ctx),
            GuardKind::Agreements => rules::agreements(ctx),
        }
    }
}

impl fmt::Display for GuardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown guard '{0}'")]
pub struct UnknownGuard(pub String);

impl FromStr for GuardKind {
    type Err = UnknownGuard;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase().replace('-', "_");
        GuardKind::ordered()
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| UnknownGuard(value.trim().to_string()))
    }
}

/// Ordered guard list; editing the list is the only way to change evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardChain {
    guards: Vec<GuardKind>,
}

impl GuardChain {
    pub fn standard() -> Self {
        Self::from_order(GuardKind::ordered())
    }

    pub fn from_order(guards: impl IntoIterator<Item = GuardKind>) -> Self {
        Self {
            guards: guards.into_iter().collect(),
        }
    }

    pub fn guards(&self) -> &[GuardKind] {
        &self.guards
    }

    /// The first guard that blocks, in chain order.
    pub fn first_failure(&self, ctx: &CheckoutContext<'_>) -> Option<(GuardKind, GuardResult)> {
        self.guards.iter().find_map(|guard| {
            let result = guard.evaluate(ctx);
            (!result.can_pass).then_some((*guard, result))
        })
    }

    pub fn evaluate(&self, ctx: &CheckoutContext<'_>) -> GuardResult {
        self.first_failure(ctx)
            .map(|(_, result)| result)
            .unwrap_or_else(chain_passed)
    }
}

pub(crate) fn chain_passed() -> GuardResult {
    GuardResult::pass("All checks passed, proceeding to payment")
}

impl Default for GuardChain {
    fn default() -> Self {
        Self::standard()
    }
}
