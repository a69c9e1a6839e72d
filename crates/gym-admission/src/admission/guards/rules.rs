use super::super::domain::{AdmissionMode, GuardResult};
use super::CheckoutContext;

pub(crate) fn company_active(ctx: &CheckoutContext<'_>) -> GuardResult {
    if ctx.company.is_active() {
        GuardResult::pass("Company is open for registration")
    } else {
        GuardResult::block("This company is not in its registration period")
    }
}

pub(crate) fn company_match(ctx: &CheckoutContext<'_>) -> GuardResult {
    if ctx.user.company_id == ctx.company.code {
        GuardResult::pass("Company affiliation confirmed")
    } else {
        GuardResult::block("Your account is not registered with this company")
    }
}

pub(crate) fn registration_window(ctx: &CheckoutContext<'_>) -> GuardResult {
    if !ctx.policy.enforce_registration_window {
        return GuardResult::pass("Registration window not enforced");
    }

    let now = ctx.evaluated_at;
    let period = &ctx.settings.registration_period;
    let (global_start, global_end) = if period.enabled {
        (period.start_date, period.end_date)
    } else {
        (None, None)
    };

    for start in [global_start, ctx.company.available_from].into_iter().flatten() {
        if now < start {
            return GuardResult::block(format!(
                "Registration opens at {}",
                start.format("%Y-%m-%d %H:%M UTC")
            ));
        }
    }

    for end in [global_end, ctx.company.available_until].into_iter().flatten() {
        if now > end {
            return GuardResult::block("The registration period has ended");
        }
    }

    GuardResult::pass("Within the registration period")
}

pub(crate) fn fcfs_capacity(ctx: &CheckoutContext<'_>) -> GuardResult {
    if ctx.company.mode != AdmissionMode::FirstComeFirstServed {
        return GuardResult::pass("Capacity is not gated for lottery companies");
    }

    let remaining = ctx.company.remaining();
    if remaining <= 0 {
        GuardResult::block("Registration is closed: all slots are taken")
    } else {
        GuardResult::pass(format!("{remaining} slots remaining"))
    }
}

pub(crate) fn whitelist_verified(ctx: &CheckoutContext<'_>) -> GuardResult {
    if ctx.company.mode != AdmissionMode::Whitelist {
        return GuardResult::pass("Lottery verification not required");
    }

    if ctx.user.is_whitelist_verified {
        GuardResult::pass("Lottery winner confirmed")
    } else {
        GuardResult::block("You are not on the lottery list for this company")
    }
}

pub(crate) fn product_selected(ctx: &CheckoutContext<'_>) -> GuardResult {
    if ctx.user.selected_products.is_empty() {
        GuardResult::warn("Please select a membership product")
    } else {
        GuardResult::pass("Membership product selected")
    }
}

pub(crate) fn product_active(ctx: &CheckoutContext<'_>, product_id: &str) -> GuardResult {
    let Some(product) = ctx.catalog.resolve(product_id) else {
        return GuardResult::block(format!("Product '{product_id}' could not be found"));
    };

    if ctx
        .settings
        .product_status
        .memberships
        .is_enabled(product.product_type)
    {
        GuardResult::pass(format!("{} is on sale", product.label))
    } else {
        GuardResult::block(format!("{} is currently not on sale", product.label))
    }
}

pub(crate) fn locker_active(ctx: &CheckoutContext<'_>) -> GuardResult {
    if ctx.user.selected_locker && !ctx.settings.product_status.locker {
        GuardResult::block("Locker rental is currently not available")
    } else {
        GuardResult::pass("Locker selection accepted")
    }
}

pub(crate) fn agreements(ctx: &CheckoutContext<'_>) -> GuardResult {
    if !ctx.policy.require_agreements {
        return GuardResult::pass("Agreements were accepted at registration");
    }

    let missing: Vec<&str> = ctx
        .policy
        .required_agreements
        .iter()
        .filter(|key| !ctx.user.agreement_checks.get(*key).copied().unwrap_or(false))
        .map(String::as_str)
        .collect();

    if missing.is_empty() {
        GuardResult::pass("Required agreements accepted")
    } else {
        GuardResult::block(format!(
            "Please accept the required agreements: {}",
            missing.join(", ")
        ))
    }
}
