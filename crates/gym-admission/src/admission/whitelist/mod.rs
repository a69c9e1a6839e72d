//! Per-company, per-product admission lists for lottery (WHL) companies.

mod export;
mod lookup;

pub use export::{export_csv, WhitelistExportError};
pub use lookup::{InMemoryWhitelistStore, WhitelistLookup};

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{ProductType, WhitelistEntry};
use super::normalizer::{normalize_company_name, normalize_name};

/// Build entries from a bulk paste, one name per line, stamped with the current time.
pub fn parse(
    text: &str,
    company_code: &str,
    company_name: &str,
    product_type: ProductType,
) -> Vec<WhitelistEntry> {
    parse_at(text, company_code, company_name, product_type, Utc::now())
}

pub fn parse_at(
    text: &str,
    company_code: &str,
    company_name: &str,
    product_type: ProductType,
    created_at: DateTime<Utc>,
) -> Vec<WhitelistEntry> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| WhitelistEntry {
            id: Uuid::new_v4().to_string(),
            company_code: company_code.to_string(),
            company_name: company_name.to_string(),
            name: line.to_string(),
            product_type,
            created_at,
        })
        .collect()
}

/// First entry admitting `name` for the company code and product.
///
/// Company codes compare exactly; names compare in normalized form. When two employees share
/// a normalized name the first entry wins.
pub fn find<'a>(
    entries: &'a [WhitelistEntry],
    company_code: &str,
    name: &str,
    product_type: ProductType,
) -> Option<&'a WhitelistEntry> {
    let wanted = normalize_name(name);
    entries.iter().find(|entry| {
        entry.company_code == company_code
            && entry.product_type == product_type
            && normalize_name(&entry.name) == wanted
    })
}

/// Products the user appears on, in `ProductType::ordered()` order.
pub fn find_all_products_for_user<L>(lookup: &L, company_code: &str, name: &str) -> Vec<ProductType>
where
    L: WhitelistLookup + ?Sized,
{
    ProductType::ordered()
        .into_iter()
        .filter(|product| {
            let entries = lookup.lookup(company_code, *product);
            find(&entries, company_code, name, *product).is_some()
        })
        .collect()
}

/// Drop repeated (company name, person name) pairs, keeping the first occurrence.
pub fn dedup(entries: Vec<WhitelistEntry>) -> Vec<WhitelistEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| {
            seen.insert((
                normalize_company_name(&entry.company_name),
                normalize_name(&entry.name),
            ))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityCheck {
    pub valid: bool,
    pub message: String,
}

/// An import may not admit more people than the company has slots for.
pub fn validate_capacity(entries: &[WhitelistEntry], allocated_total: u64) -> CapacityCheck {
    let count = entries.len();
    if count as u64 > allocated_total {
        CapacityCheck {
            valid: false,
            message: format!(
                "whitelist has {count} entries but only {allocated_total} slots are allocated"
            ),
        }
    } else {
        CapacityCheck {
            valid: true,
            message: format!("{count} entries fit within {allocated_total} allocated slots"),
        }
    }
}
