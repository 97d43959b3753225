//! Toxicity: weighted finding mass, normalized against a fixed ceiling.

use crate::core::{Finding, FunctionRecord, Severity, SmellType};

static SEVERITY_WEIGHTS: &[(Severity, f64)] = &[
    (Severity::Critical, 10.0),
    (Severity::High, 10.0),
    (Severity::Medium, 5.0),
    (Severity::Low, 2.0),
];

static TYPE_MULTIPLIERS: &[(SmellType, f64)] = &[
    (SmellType::HighComplexity, 1.5),
    (SmellType::DeepNesting, 1.3),
    (SmellType::LongFunction, 1.2),
    (SmellType::MissingErrorHandling, 1.1),
];

/// Twenty findings at the heaviest weight and multiplier.
pub const TOXICITY_CEILING: f64 = 20.0 * 10.0 * 1.5;

pub fn severity_weight(severity: Severity) -> f64 {
    SEVERITY_WEIGHTS
        .iter()
        .find(|(s, _)| *s == severity)
        .map(|(_, w)| *w)
        .unwrap_or(0.0)
}

pub fn type_multiplier(smell_type: SmellType) -> f64 {
    TYPE_MULTIPLIERS
        .iter()
        .find(|(t, _)| *t == smell_type)
        .map(|(_, m)| *m)
        .unwrap_or(1.0)
}

fn finding_weight(finding: &Finding) -> f64 {
    severity_weight(finding.severity) * type_multiplier(finding.smell_type)
}

pub fn toxicity(functions: &[FunctionRecord]) -> u32 {
    if functions.is_empty() {
        return 0;
    }
    let raw: f64 = functions
        .iter()
        .flat_map(|f| f.smells.iter())
        .map(finding_weight)
        .sum();
    (raw / TOXICITY_CEILING * 100.0).clamp(0.0, 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(smell_type: SmellType, severity: Severity) -> Finding {
        Finding {
            smell_type,
            severity,
            message: String::new(),
            suggestion: String::new(),
            line: 1,
        }
    }

    fn with_findings(findings: Vec<Finding>) -> FunctionRecord {
        let mut record = FunctionRecord::new("f".to_string(), 1, 30);
        record.smells = findings;
        record
    }

    #[test]
    fn test_no_functions_zero() {
        assert_eq!(toxicity(&[]), 0);
    }

    #[test]
    fn test_clean_function_zero() {
        assert_eq!(toxicity(&[with_findings(vec![])]), 0);
    }

    #[test]
    fn test_weighted_sum() {
        let func = with_findings(vec![
            finding(SmellType::ModerateFunction, Severity::Medium),
            finding(SmellType::TooManyParameters, Severity::High),
            finding(SmellType::MissingErrorHandling, Severity::Medium),
        ]);
        // 5 + 10 + 5.5 = 20.5 -> 6.83 -> 7
        assert_eq!(toxicity(&[func]), 7);
    }

    #[test]
    fn test_ceiling_clamps_to_hundred() {
        let findings = vec![finding(SmellType::HighComplexity, Severity::Critical); 40];
        assert_eq!(toxicity(&[with_findings(findings)]), 100);
    }

    #[test]
    fn test_multiplier_defaults() {
        assert_eq!(type_multiplier(SmellType::MagicNumbers), 1.0);
        assert_eq!(type_multiplier(SmellType::HighComplexity), 1.5);
        assert_eq!(severity_weight(Severity::Low), 2.0);
    }
}
