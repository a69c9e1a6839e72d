use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use gym_admission::admission::{
    Company, GlobalSettings, InMemoryWhitelistStore, ProductCatalog, ProductType, UserContext,
    WhitelistEntry,
};
use gym_admission::error::AppError;
use serde::Deserialize;

/// Everything one evaluation reads, as exported by the admin console.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snapshot {
    pub(crate) company: Company,
    #[serde(default)]
    pub(crate) settings: GlobalSettings,
    pub(crate) user: UserContext,
    #[serde(default)]
    pub(crate) catalog: ProductCatalog,
    #[serde(default)]
    pub(crate) whitelist: Vec<WhitelistEntry>,
    #[serde(default)]
    pub(crate) evaluated_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub(crate) fn load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Group the embedded whitelist into per-company, per-product lists.
    pub(crate) fn whitelist_store(&self) -> InMemoryWhitelistStore {
        let mut lists: BTreeMap<(String, ProductType), Vec<WhitelistEntry>> = BTreeMap::new();
        for entry in &self.whitelist {
            lists
                .entry((entry.company_code.clone(), entry.product_type))
                .or_default()
                .push(entry.clone());
        }

        let store = InMemoryWhitelistStore::default();
        for ((company_code, product_type), entries) in lists {
            store.replace(&company_code, product_type, entries);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gym_admission::admission::{AdmissionMode, WhitelistLookup};

    const LOTTERY: &str = include_str!("../fixtures/lottery_snapshot.json");

    #[test]
    fn fixture_decodes_with_lenient_counts() {
        let snapshot: Snapshot = serde_json::from_str(LOTTERY).expect("fixture decodes");

        assert_eq!(snapshot.company.mode, AdmissionMode::Whitelist);
        assert_eq!(snapshot.company.total_paid(), 4);
        assert_eq!(snapshot.catalog.0.len(), 3);
        assert!(snapshot.evaluated_at.is_some());
    }

    #[test]
    fn whitelist_store_groups_by_company_and_product() {
        let snapshot: Snapshot = serde_json::from_str(LOTTERY).expect("fixture decodes");
        let store = snapshot.whitelist_store();

        assert_eq!(store.lookup("HB01", ProductType::FullDay).len(), 1);
        assert!(store.lookup("HB01", ProductType::Morning).is_empty());
    }
}
