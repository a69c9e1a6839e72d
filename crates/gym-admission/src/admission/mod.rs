//! Eligibility and checkout guard engine for quota- and lottery-gated membership sales.
//!
//! Every decision is computed from read-only snapshots and returned as a [`GuardResult`];
//! nothing in here fails or mutates shared state.

pub mod domain;
pub mod eligibility;
pub mod guards;
pub mod normalizer;
pub mod service;
pub mod status;
pub mod whitelist;

#[cfg(test)]
mod tests;

pub use domain::{
    AdmissionMode, CatalogProduct, Company, CompanyStatus, GlobalSettings, GuardResult,
    MembershipToggles, PricingSettings, ProductCatalog, ProductCounts, ProductStatus,
    ProductType, RegistrationPeriod, RegistrationStatus, Severity, UserContext, WhitelistEntry,
};
pub use eligibility::{check_eligibility, check_fcfs, check_whl, Eligibility};
pub use guards::{AdmissionPolicy, CheckoutContext, Guard, GuardChain, GuardKind, UnknownGuard};
pub use service::{AdmissionService, CheckoutVerdict};
pub use whitelist::{
    CapacityCheck, InMemoryWhitelistStore, WhitelistExportError, WhitelistLookup,
};
