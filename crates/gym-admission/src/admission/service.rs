use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::domain::{
    AdmissionMode, Company, GlobalSettings, GuardResult, ProductCatalog, ProductType, UserContext,
};
use super::eligibility::{check_eligibility, Eligibility};
use super::guards::{chain_passed, AdmissionPolicy, CheckoutContext, GuardChain, GuardKind};
use super::whitelist::{find_all_products_for_user, WhitelistLookup};

/// Checkout verdict plus the guard that produced it, if any blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutVerdict {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_by: Option<GuardKind>,
    #[serde(flatten)]
    pub result: GuardResult,
}

/// Facade composing whitelist storage, the display-time evaluator, and the checkout chain.
///
/// Holds no mutable state. Callers must still commit the purchase atomically against storage,
/// since two requests can pass the chain on the same snapshot.
pub struct AdmissionService<L> {
    lookup: Arc<L>,
    policy: AdmissionPolicy,
    chain: GuardChain,
}

impl<L> AdmissionService<L>
where
    L: WhitelistLookup + 'static,
{
    pub fn new(lookup: Arc<L>, policy: AdmissionPolicy) -> Self {
        Self::with_chain(lookup, policy, GuardChain::standard())
    }

    pub fn with_chain(lookup: Arc<L>, policy: AdmissionPolicy, chain: GuardChain) -> Self {
        Self {
            lookup,
            policy,
            chain,
        }
    }

    pub fn policy(&self) -> &AdmissionPolicy {
        &self.policy
    }

    pub fn chain(&self) -> &GuardChain {
        &self.chain
    }

    pub fn whitelisted_products(&self, company_code: &str, name: &str) -> Vec<ProductType> {
        find_all_products_for_user(self.lookup.as_ref(), company_code, name)
    }

    /// Pre-checkout badge and verdict for a user browsing the company page.
    pub fn eligibility(&self, company: &Company, user_name: &str) -> Eligibility {
        let is_in_whitelist = company.mode == AdmissionMode::Whitelist
            && !self.whitelisted_products(&company.code, user_name).is_empty();

        let eligibility = check_eligibility(company, is_in_whitelist);
        if eligibility.can_pass() {
            debug!(
                company = %company.code,
                status = eligibility.status.label(),
                remaining = eligibility.remaining,
                "eligibility evaluated"
            );
        } else {
            info!(
                company = %company.code,
                status = eligibility.status.label(),
                reason = %eligibility.result.reason,
                "eligibility blocked"
            );
        }
        eligibility
    }

    /// Run the checkout chain against one snapshot.
    pub fn authorize_checkout(
        &self,
        settings: &GlobalSettings,
        company: &Company,
        user: &UserContext,
        catalog: &ProductCatalog,
        evaluated_at: DateTime<Utc>,
    ) -> CheckoutVerdict {
        let ctx = CheckoutContext {
            settings,
            company,
            user,
            catalog,
            policy: self.policy.clone(),
            evaluated_at,
        };

        match self.chain.first_failure(&ctx) {
            Some((guard, result)) => {
                info!(
                    company = %company.code,
                    guard = %guard,
                    severity = ?result.severity,
                    reason = %result.reason,
                    "checkout blocked"
                );
                CheckoutVerdict {
                    blocked_by: Some(guard),
                    result,
                }
            }
            None => {
                debug!(
                    company = %company.code,
                    policy_version = self.policy.version,
                    "checkout authorized"
                );
                CheckoutVerdict {
                    blocked_by: None,
                    result: chain_passed(),
                }
            }
        }
    }
}
