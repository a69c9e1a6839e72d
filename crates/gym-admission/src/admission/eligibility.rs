use serde::{Deserialize, Serialize};

use super::domain::{AdmissionMode, Company, GuardResult, RegistrationStatus};
use super::status::company_status;

/// Display-time verdict together with the capacity badge it was computed from.
///
/// Advisory only: checkout re-validates against a fresh snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    #[serde(flatten)]
    pub result: GuardResult,
    pub status: RegistrationStatus,
    /// Unclamped quota minus paid; negative when oversold.
    pub remaining: i64,
}

impl Eligibility {
    pub fn can_pass(&self) -> bool {
        self.result.can_pass
    }

    fn new(company: &Company, result: GuardResult) -> Self {
        Self {
            result,
            status: company_status(company),
            remaining: company.remaining(),
        }
    }
}

pub fn check_fcfs(company: &Company) -> Eligibility {
    if !company.is_active() {
        return Eligibility::new(company, not_in_period());
    }

    let status = company_status(company);
    let remaining = company.remaining();
    let result = match status {
        RegistrationStatus::Full => GuardResult::block("Registration is closed: all slots are taken"),
        RegistrationStatus::Imminent => {
            GuardResult::pass(format!("Closing soon: {remaining} slots left, payment available"))
        }
        RegistrationStatus::Available => GuardResult::pass("Payment available"),
    };

    Eligibility {
        result,
        status,
        remaining,
    }
}

pub fn check_whl(company: &Company, is_in_whitelist: bool) -> Eligibility {
    let result = if !company.is_active() {
        not_in_period()
    } else if !is_in_whitelist {
        GuardResult::block("You are not on the lottery list for this company")
    } else {
        GuardResult::pass("Lottery winner confirmed, payment available")
    };

    Eligibility::new(company, result)
}

/// Single display-time entry point, dispatching on the company's admission mode.
pub fn check_eligibility(company: &Company, is_in_whitelist: bool) -> Eligibility {
    match company.mode {
        AdmissionMode::Whitelist => check_whl(company, is_in_whitelist),
        AdmissionMode::FirstComeFirstServed => check_fcfs(company),
    }
}

fn not_in_period() -> GuardResult {
    GuardResult::block("This company is not in its registration period")
}
