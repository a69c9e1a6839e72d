use super::domain::{Company, RegistrationStatus};

/// Lower bound (inclusive) of the "closing soon" band.
pub const IMMINENT_THRESHOLD: f64 = 0.7;
/// Lower bound (inclusive) of the "full" band.
pub const FULL_THRESHOLD: f64 = 1.0;

/// Share of quota already sold, clamped to `[0, 1]`.
///
/// A zero quota means no capacity has been configured yet and reads as 0, not as full.
pub fn registration_rate(registered: u64, quota: u64) -> f64 {
    if quota == 0 {
        return 0.0;
    }

    (registered as f64 / quota as f64).min(1.0)
}

pub fn classify(rate: f64) -> RegistrationStatus {
    if rate >= FULL_THRESHOLD {
        RegistrationStatus::Full
    } else if rate >= IMMINENT_THRESHOLD {
        RegistrationStatus::Imminent
    } else {
        RegistrationStatus::Available
    }
}

/// Classifies a company on its totals across every product.
pub fn company_status(company: &Company) -> RegistrationStatus {
    classify(company.registration_rate())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_is_zero_without_quota() {
        assert_eq!(registration_rate(0, 0), 0.0);
        assert_eq!(registration_rate(12, 0), 0.0);
    }

    #[test]
    fn rate_is_clamped_when_oversold() {
        assert_eq!(registration_rate(15, 10), 1.0);
        assert_eq!(registration_rate(5, 10), 0.5);
    }

    #[test]
    fn rate_stays_within_unit_interval() {
        for quota in 0..25u64 {
            for registered in 0..40u64 {
                let rate = registration_rate(registered, quota);
                assert!((0.0..=1.0).contains(&rate), "{registered}/{quota} gave {rate}");
            }
        }
    }

    #[test]
    fn thresholds_are_inclusive_at_lower_bound() {
        assert_eq!(classify(0.0), RegistrationStatus::Available);
        assert_eq!(classify(0.69), RegistrationStatus::Available);
        assert_eq!(classify(0.70), RegistrationStatus::Imminent);
        assert_eq!(classify(0.999), RegistrationStatus::Imminent);
        assert_eq!(classify(1.0), RegistrationStatus::Full);
        assert_eq!(classify(1.5), RegistrationStatus::Full);
    }

    #[test]
    fn exact_seventy_percent_from_counts_is_imminent() {
        assert_eq!(classify(registration_rate(7, 10)), RegistrationStatus::Imminent);
        assert_eq!(classify(registration_rate(14, 20)), RegistrationStatus::Imminent);
    }
}
