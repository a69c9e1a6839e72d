use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::status;

/// Membership time slot sold under a company quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductType {
    FullDay,
    Morning,
    Evening,
}

impl ProductType {
    /// Fixed enumeration order used whenever products are listed.
    pub fn ordered() -> [ProductType; 3] {
        [ProductType::FullDay, ProductType::Morning, ProductType::Evening]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductType::FullDay => "full-day",
            ProductType::Morning => "morning",
            ProductType::Evening => "evening",
        }
    }
}

/// Admission policy run by a subsidiary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionMode {
    /// First-come-first-served against the numeric quota.
    #[serde(rename = "FCFS")]
    FirstComeFirstServed,
    /// Pre-approved lottery/whitelist.
    #[serde(rename = "WHL")]
    Whitelist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Active,
    Inactive,
}

/// Per-product integer counts (quota or sold).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCounts {
    #[serde(default, deserialize_with = "lenient_count")]
    pub full_day: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub morning: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub evening: u32,
}

impl ProductCounts {
    pub fn new(full_day: u32, morning: u32, evening: u32) -> Self {
        Self {
            full_day,
            morning,
            evening,
        }
    }

    pub fn get(&self, product: ProductType) -> u32 {
        match product {
            ProductType::FullDay => self.full_day,
            ProductType::Morning => self.morning,
            ProductType::Evening => self.evening,
        }
    }

    pub fn total(&self) -> u64 {
        ProductType::ordered()
            .into_iter()
            .map(|product| u64::from(self.get(product)))
            .sum()
    }
}

/// Read-only snapshot of a subsidiary's registration state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub code: String,
    pub name: String,
    pub mode: AdmissionMode,
    pub status: CompanyStatus,
    #[serde(default)]
    pub quota: ProductCounts,
    #[serde(default, alias = "paid")]
    pub paid_counts: ProductCounts,
    #[serde(default)]
    pub available_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub available_until: Option<DateTime<Utc>>,
}

impl Company {
    pub fn is_active(&self) -> bool {
        self.status == CompanyStatus::Active
    }

    pub fn total_quota(&self) -> u64 {
        self.quota.total()
    }

    pub fn total_paid(&self) -> u64 {
        self.paid_counts.total()
    }

    /// Share of the total quota already sold, in `[0, 1]`.
    pub fn registration_rate(&self) -> f64 {
        status::registration_rate(self.total_paid(), self.total_quota())
    }

    /// Quota minus sold slots; negative when the company is oversold.
    pub fn remaining(&self) -> i64 {
        self.total_quota() as i64 - self.total_paid() as i64
    }

    /// Remaining slots for display, clamped at zero.
    pub fn remaining_slots(&self) -> u64 {
        self.remaining().max(0) as u64
    }
}

/// Global enable flags for memberships and the locker add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipToggles {
    #[serde(default = "enabled")]
    pub full_day: bool,
    #[serde(default = "enabled")]
    pub morning: bool,
    #[serde(default = "enabled")]
    pub evening: bool,
}

impl MembershipToggles {
    pub fn is_enabled(&self, product: ProductType) -> bool {
        match product {
            ProductType::FullDay => self.full_day,
            ProductType::Morning => self.morning,
            ProductType::Evening => self.evening,
        }
    }
}

impl Default for MembershipToggles {
    fn default() -> Self {
        Self {
            full_day: true,
            morning: true,
            evening: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStatus {
    #[serde(default)]
    pub memberships: MembershipToggles,
    #[serde(default = "enabled")]
    pub locker: bool,
}

impl Default for ProductStatus {
    fn default() -> Self {
        Self {
            memberships: MembershipToggles::default(),
            locker: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPeriod {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

/// Prices and membership length, carried through untouched by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSettings {
    #[serde(default)]
    pub memberships: ProductCounts,
    #[serde(default, deserialize_with = "lenient_count")]
    pub locker: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub membership_months: u32,
}

/// Admin-managed settings snapshot supplied to every evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    #[serde(default)]
    pub product_status: ProductStatus,
    #[serde(default)]
    pub registration_period: RegistrationPeriod,
    #[serde(default)]
    pub pricing: PricingSettings,
}

/// One admitted employee for a company and product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistEntry {
    pub id: String,
    pub company_code: String,
    pub company_name: String,
    pub name: String,
    pub product_type: ProductType,
    pub created_at: DateTime<Utc>,
}

/// Three-level capacity badge, always recomputed from counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Available,
    Imminent,
    Full,
}

impl RegistrationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RegistrationStatus::Available => "available",
            RegistrationStatus::Imminent => "imminent",
            RegistrationStatus::Full => "full",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Success,
}

/// Verdict of a single check, suitable for direct display to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardResult {
    pub can_pass: bool,
    pub reason: String,
    pub severity: Severity,
}

impl GuardResult {
    pub fn pass(reason: impl Into<String>) -> Self {
        Self {
            can_pass: true,
            reason: reason.into(),
            severity: Severity::Success,
        }
    }

    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            can_pass: false,
            reason: reason.into(),
            severity: Severity::Error,
        }
    }

    pub fn warn(reason: impl Into<String>) -> Self {
        Self {
            can_pass: false,
            reason: reason.into(),
            severity: Severity::Warning,
        }
    }
}

/// Purchasable membership product as listed at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: String,
    pub product_type: ProductType,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCatalog(pub Vec<CatalogProduct>);

impl ProductCatalog {
    pub fn resolve(&self, product_id: &str) -> Option<&CatalogProduct> {
        self.0.iter().find(|product| product.id == product_id)
    }
}

/// Authenticated session state at the moment checkout starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub company_id: String,
    pub name: String,
    #[serde(default)]
    pub selected_products: Vec<String>,
    #[serde(default)]
    pub selected_locker: bool,
    #[serde(default)]
    pub is_whitelist_verified: bool,
    #[serde(default)]
    pub agreement_checks: BTreeMap<String, bool>,
}

fn enabled() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Integer(i64),
    Float(f64),
    Text(String),
    #[allow(dead_code)]
    Other(serde::de::IgnoredAny),
}

/// Admin-entered counts are often blank or malformed; anything unusable reads as zero.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCount>::deserialize(deserializer)?;
    let value = match raw {
        Some(RawCount::Integer(value)) => value,
        Some(RawCount::Float(value)) if value.is_finite() => value.trunc() as i64,
        Some(RawCount::Text(text)) => text.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    Ok(value.clamp(0, i64::from(u32::MAX)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_default_to_zero_when_missing_or_malformed() {
        let counts: ProductCounts =
            serde_json::from_value(json!({ "fullDay": null, "morning": "7", "evening": "n/a" }))
                .expect("lenient counts decode");
        assert_eq!(counts, ProductCounts::new(0, 7, 0));

        let counts: ProductCounts =
            serde_json::from_value(json!({ "fullDay": -3 })).expect("negative decodes");
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn company_accepts_paid_alias_and_reports_oversell() {
        let company: Company = serde_json::from_value(json!({
            "code": "ACME",
            "name": "Acme",
            "mode": "FCFS",
            "status": "active",
            "quota": { "fullDay": 5 },
            "paid": { "fullDay": 7 }
        }))
        .expect("company decodes");

        assert_eq!(company.mode, AdmissionMode::FirstComeFirstServed);
        assert_eq!(company.remaining(), -2);
        assert_eq!(company.remaining_slots(), 0);
        assert_eq!(company.registration_rate(), 1.0);
    }

    #[test]
    fn company_rate_is_zero_without_quota() {
        let company: Company = serde_json::from_value(json!({
            "code": "ACME",
            "name": "Acme",
            "mode": "FCFS",
            "status": "active",
            "paid": { "morning": 3 }
        }))
        .expect("company decodes");

        assert_eq!(company.total_quota(), 0);
        assert_eq!(company.registration_rate(), 0.0);
    }
}
