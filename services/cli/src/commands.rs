use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::Args;
use gym_admission::admission::whitelist::{dedup, export_csv, parse, validate_capacity};
use gym_admission::admission::{AdmissionMode, AdmissionService, ProductType};
use gym_admission::config::AppConfig;
use gym_admission::error::AppError;
use serde::Serialize;
use tracing::{debug, info};

use crate::snapshot::Snapshot;

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// JSON snapshot with company, settings, user, and optional whitelist
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Print the verdict as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CheckoutArgs {
    /// JSON snapshot with company, settings, user, catalog, and optional whitelist
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Evaluation instant (RFC 3339). Defaults to the snapshot's value, then now.
    #[arg(long, value_parser = parse_instant)]
    pub(crate) at: Option<DateTime<Utc>>,
    /// Print the verdict as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct WhitelistSource {
    /// Text file with one name per line
    #[arg(long)]
    pub(crate) input: PathBuf,
    #[arg(long)]
    pub(crate) company_code: String,
    #[arg(long)]
    pub(crate) company_name: String,
    /// fullDay, morning, or evening
    #[arg(long, value_parser = parse_product)]
    pub(crate) product: ProductType,
}

#[derive(Args, Debug)]
pub(crate) struct WhitelistExportArgs {
    #[command(flatten)]
    pub(crate) source: WhitelistSource,
    /// Keep repeated names instead of dropping them
    #[arg(long)]
    pub(crate) keep_duplicates: bool,
}

#[derive(Args, Debug)]
pub(crate) struct WhitelistValidateArgs {
    #[command(flatten)]
    pub(crate) source: WhitelistSource,
    /// Slots allocated to the company for this product
    #[arg(long)]
    pub(crate) allocated: u64,
}

pub(crate) fn run_eligibility(config: &AppConfig, args: EligibilityArgs) -> Result<(), AppError> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let service = AdmissionService::with_chain(
        Arc::new(snapshot.whitelist_store()),
        config.policy.clone(),
        config.guard_chain(),
    );

    let eligibility = service.eligibility(&snapshot.company, &snapshot.user.name);
    if args.json {
        return print_json(&eligibility);
    }

    println!("{} ({})", snapshot.company.name, snapshot.company.code);
    println!("  status    : {}", eligibility.status.label());
    println!(
        "  remaining : {} of {}",
        snapshot.company.remaining_slots(),
        snapshot.company.total_quota()
    );
    println!(
        "  verdict   : {} [{:?}]",
        if eligibility.can_pass() { "allowed" } else { "blocked" },
        eligibility.result.severity
    );
    println!("  reason    : {}", eligibility.result.reason);
    if snapshot.company.mode == AdmissionMode::Whitelist {
        let products = service
            .whitelisted_products(&snapshot.company.code, &snapshot.user.name)
            .iter()
            .map(ProductType::label)
            .collect::<Vec<_>>();
        println!("  products  : {}", product_list(&products));
    }
    Ok(())
}

pub(crate) fn run_checkout(config: &AppConfig, args: CheckoutArgs) -> Result<(), AppError> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let service = AdmissionService::with_chain(
        Arc::new(snapshot.whitelist_store()),
        config.policy.clone(),
        config.guard_chain(),
    );
    let evaluated_at = args
        .at
        .or(snapshot.evaluated_at)
        .unwrap_or_else(Utc::now);
    debug!(
        policy_version = service.policy().version,
        guards = ?service.chain().guards(),
        %evaluated_at,
        "running checkout chain"
    );

    let verdict = service.authorize_checkout(
        &snapshot.settings,
        &snapshot.company,
        &snapshot.user,
        &snapshot.catalog,
        evaluated_at,
    );
    if args.json {
        return print_json(&verdict);
    }

    match verdict.blocked_by {
        Some(guard) => println!("blocked by {guard} [{:?}]", verdict.result.severity),
        None => println!("checkout authorized"),
    }
    println!("  reason : {}", verdict.result.reason);
    Ok(())
}

pub(crate) fn run_whitelist_export(args: WhitelistExportArgs) -> Result<(), AppError> {
    let entries = read_entries(&args.source)?;
    let imported = entries.len();
    let entries = if args.keep_duplicates {
        entries
    } else {
        dedup(entries)
    };

    info!(
        company = %args.source.company_code,
        imported,
        kept = entries.len(),
        "whitelist exported"
    );
    print!("{}", export_csv(&entries)?);
    Ok(())
}

pub(crate) fn run_whitelist_validate(args: WhitelistValidateArgs) -> Result<(), AppError> {
    let entries = dedup(read_entries(&args.source)?);
    let check = validate_capacity(&entries, args.allocated);

    println!(
        "{}: {}",
        if check.valid { "ok" } else { "over capacity" },
        check.message
    );
    Ok(())
}

fn read_entries(
    source: &WhitelistSource,
) -> Result<Vec<gym_admission::admission::WhitelistEntry>, AppError> {
    let text = fs::read_to_string(&source.input)?;
    Ok(parse(
        &text,
        &source.company_code,
        &source.company_name,
        source.product,
    ))
}

fn product_list(labels: &[&str]) -> String {
    if labels.is_empty() {
        "none".to_string()
    } else {
        labels.join(", ")
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as RFC 3339 ({err})"))
}

fn parse_product(raw: &str) -> Result<ProductType, String> {
    match raw.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
        "fullday" | "full" => Ok(ProductType::FullDay),
        "morning" | "am" => Ok(ProductType::Morning),
        "evening" | "pm" => Ok(ProductType::Evening),
        _ => Err(format!("unknown product '{raw}' (expected fullDay, morning, or evening)")),
    }
}
