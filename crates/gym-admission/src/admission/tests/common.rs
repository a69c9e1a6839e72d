use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};

use crate::admission::domain::{
    AdmissionMode, CatalogProduct, Company, CompanyStatus, GlobalSettings, ProductCatalog,
    ProductCounts, ProductType, UserContext, WhitelistEntry,
};
use crate::admission::guards::{AdmissionPolicy, CheckoutContext};

pub(super) fn evaluated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn fcfs_company(code: &str, quota: u32, paid: u32) -> Company {
    Company {
        code: code.to_string(),
        name: format!("{code} Holdings"),
        mode: AdmissionMode::FirstComeFirstServed,
        status: CompanyStatus::Active,
        quota: ProductCounts::new(quota, 0, 0),
        paid_counts: ProductCounts::new(paid, 0, 0),
        available_from: None,
        available_until: None,
    }
}

pub(super) fn whl_company(code: &str) -> Company {
    Company {
        mode: AdmissionMode::Whitelist,
        ..fcfs_company(code, 20, 4)
    }
}

pub(super) fn catalog() -> ProductCatalog {
    ProductCatalog(vec![
        CatalogProduct {
            id: "gym-full".to_string(),
            product_type: ProductType::FullDay,
            label: "Full-day membership".to_string(),
        },
        CatalogProduct {
            id: "gym-am".to_string(),
            product_type: ProductType::Morning,
            label: "Morning membership".to_string(),
        },
        CatalogProduct {
            id: "gym-pm".to_string(),
            product_type: ProductType::Evening,
            label: "Evening membership".to_string(),
        },
    ])
}

pub(super) fn user(company_id: &str) -> UserContext {
    UserContext {
        company_id: company_id.to_string(),
        name: "Kim Chul Soo".to_string(),
        selected_products: vec!["gym-full".to_string()],
        selected_locker: false,
        is_whitelist_verified: false,
        agreement_checks: BTreeMap::new(),
    }
}

pub(super) fn context<'a>(
    settings: &'a GlobalSettings,
    company: &'a Company,
    user: &'a UserContext,
    catalog: &'a ProductCatalog,
) -> CheckoutContext<'a> {
    CheckoutContext {
        settings,
        company,
        user,
        catalog,
        policy: AdmissionPolicy::default(),
        evaluated_at: evaluated_at(),
    }
}

pub(super) fn entry(company_name: &str, name: &str) -> WhitelistEntry {
    WhitelistEntry {
        id: format!("{company_name}-{name}"),
        company_code: "ACME".to_string(),
        company_name: company_name.to_string(),
        name: name.to_string(),
        product_type: ProductType::FullDay,
        created_at: evaluated_at(),
    }
}
