use std::env;
use std::fmt;

use crate::admission::guards::{AdmissionPolicy, GuardChain, GuardKind, DEFAULT_POLICY_VERSION};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub policy: AdmissionPolicy,
    pub guard_order: Vec<GuardKind>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let show_targets = read_flag("APP_LOG_TARGETS", false)?;

        let version = match env::var("ADMISSION_POLICY_VERSION") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidVersion(raw))?,
            Err(_) => DEFAULT_POLICY_VERSION,
        };

        let required_agreements = match env::var("ADMISSION_REQUIRED_AGREEMENTS") {
            Ok(raw) => split_list(&raw).map(str::to_string).collect(),
            Err(_) => AdmissionPolicy::default_agreements(),
        };

        let policy = AdmissionPolicy {
            version,
            enforce_registration_window: read_flag(
                "ADMISSION_ENFORCE_REGISTRATION_WINDOW",
                false,
            )?,
            require_agreements: read_flag("ADMISSION_REQUIRE_AGREEMENTS", false)?,
            required_agreements,
        };

        let guard_order = match env::var("ADMISSION_GUARD_ORDER") {
            Ok(raw) => parse_guard_order(&raw)?,
            Err(_) => GuardKind::ordered().to_vec(),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig {
                log_level,
                show_targets,
            },
            policy,
            guard_order,
        })
    }

    pub fn guard_chain(&self) -> GuardChain {
        GuardChain::from_order(self.guard_order.iter().copied())
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub show_targets: bool,
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty())
}

/// An override must name every guard exactly once and keep `company_active` first.
fn parse_guard_order(raw: &str) -> Result<Vec<GuardKind>, ConfigError> {
    let order = split_list(raw)
        .map(|name| name.parse::<GuardKind>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| ConfigError::UnknownGuard(err.0))?;

    match order.first() {
        None => return Err(ConfigError::EmptyGuardOrder),
        Some(GuardKind::CompanyActive) => {}
        Some(other) => return Err(ConfigError::GuardOrderStart(*other)),
    }

    for kind in GuardKind::ordered() {
        match order.iter().filter(|guard| **guard == kind).count() {
            1 => {}
            0 => return Err(ConfigError::MissingGuard(kind)),
            _ => return Err(ConfigError::DuplicateGuard(kind)),
        }
    }

    Ok(order)
}

fn read_flag(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };

    let normalized = raw.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { name, value: raw }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFlag { name: &'static str, value: String },
    InvalidVersion(String),
    UnknownGuard(String),
    EmptyGuardOrder,
    GuardOrderStart(GuardKind),
    MissingGuard(GuardKind),
    DuplicateGuard(GuardKind),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be a boolean flag, found '{value}'")
            }
            ConfigError::InvalidVersion(value) => {
                write!(f, "ADMISSION_POLICY_VERSION must be a valid u32, found '{value}'")
            }
            ConfigError::UnknownGuard(name) => {
                write!(f, "ADMISSION_GUARD_ORDER names unknown guard '{name}'")
            }
            ConfigError::EmptyGuardOrder => {
                write!(f, "ADMISSION_GUARD_ORDER is set but lists no guards")
            }
            ConfigError::GuardOrderStart(kind) => {
                write!(f, "ADMISSION_GUARD_ORDER must start with company_active, found '{kind}'")
            }
            ConfigError::MissingGuard(kind) => {
                write!(f, "ADMISSION_GUARD_ORDER is missing guard '{kind}'")
            }
            ConfigError::DuplicateGuard(kind) => {
                write!(f, "ADMISSION_GUARD_ORDER lists guard '{kind}' more than once")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
