use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::super::domain::{ProductType, WhitelistEntry};
use super::parse;

/// Storage seam so the engine never depends on where lists are kept.
pub trait WhitelistLookup: Send + Sync {
    fn lookup(&self, company_code: &str, product_type: ProductType) -> Vec<WhitelistEntry>;
}

/// Process-local list store; entries persist until replaced.
#[derive(Debug, Default, Clone)]
pub struct InMemoryWhitelistStore {
    lists: Arc<Mutex<HashMap<(String, ProductType), Vec<WhitelistEntry>>>>,
}

impl InMemoryWhitelistStore {
    pub fn replace(
        &self,
        company_code: &str,
        product_type: ProductType,
        entries: Vec<WhitelistEntry>,
    ) -> Option<Vec<WhitelistEntry>> {
        let mut guard = self.lists.lock().unwrap_or_else(PoisonError::into_inner);
        guard.insert((company_code.to_string(), product_type), entries)
    }

    /// Parse a bulk paste and store it as the list for the company and product.
    pub fn import_text(
        &self,
        text: &str,
        company_code: &str,
        company_name: &str,
        product_type: ProductType,
    ) -> usize {
        let entries = parse(text, company_code, company_name, product_type);
        let count = entries.len();
        self.replace(company_code, product_type, entries);
        count
    }
}

impl WhitelistLookup for InMemoryWhitelistStore {
    fn lookup(&self, company_code: &str, product_type: ProductType) -> Vec<WhitelistEntry> {
        let guard = self.lists.lock().unwrap_or_else(PoisonError::into_inner);
        guard
            .get(&(company_code.to_string(), product_type))
            .cloned()
            .unwrap_or_default()
    }
}
