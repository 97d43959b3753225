use crate::core::{HealthStatus, TechnicalDebt};

const HEALTHY_MIN: u32 = 80;
const NEEDS_IMPROVEMENT_MIN: u32 = 50;

/// Round half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn technical_debt(total_findings: usize, minutes_per_finding: u64) -> TechnicalDebt {
    let minutes = (total_findings as u64).saturating_mul(minutes_per_finding);
    TechnicalDebt {
        minutes,
        hours: round_one_decimal(minutes as f64 / 60.0),
        formatted: format_duration(minutes),
    }
}

/// `"Hh Mm"` once there is at least an hour, otherwise `"Mm"`.
pub fn format_duration(minutes: u64) -> String {
    if minutes >= 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}

pub fn health_status(quality: u32) -> HealthStatus {
    if quality >= HEALTHY_MIN {
        HealthStatus::Healthy
    } else if quality >= NEEDS_IMPROVEMENT_MIN {
        HealthStatus::NeedsImprovement
    } else {
        HealthStatus::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technical_debt_under_an_hour() {
        let debt = technical_debt(3, 15);
        assert_eq!(debt.minutes, 45);
        assert_eq!(debt.hours, 0.8);
        assert_eq!(debt.formatted, "45m");
    }

    #[test]
    fn test_technical_debt_over_an_hour() {
        let debt = technical_debt(5, 15);
        assert_eq!(debt.minutes, 75);
        assert_eq!(debt.hours, 1.3);
        assert_eq!(debt.formatted, "1h 15m");
    }

    #[test]
    fn test_exact_hours_keep_minute_component() {
        assert_eq!(format_duration(120), "2h 0m");
        assert_eq!(format_duration(0), "0m");
    }

    #[test]
    fn test_health_boundaries() {
        assert_eq!(health_status(100), HealthStatus::Healthy);
        assert_eq!(health_status(80), HealthStatus::Healthy);
        assert_eq!(health_status(79), HealthStatus::NeedsImprovement);
        assert_eq!(health_status(50), HealthStatus::NeedsImprovement);
        assert_eq!(health_status(49), HealthStatus::Critical);
    }

    #[test]
    fn test_round_one_decimal_half_away_from_zero() {
        assert_eq!(round_one_decimal(2.25), 2.3);
        assert_eq!(round_one_decimal(3.0), 3.0);
    }
}
