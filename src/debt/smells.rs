use crate::analyzers::python::literals::{magic_numbers, NumericLiteral};
use crate::analyzers::python::syntax::{any_descendant, SyntaxKind};
use crate::config::SmellThresholds;
use crate::core::{Finding, FunctionRecord, Severity, SmellType};
use tree_sitter::Node;

const LENGTH_SUGGESTION: &str = "Extract logical blocks into separate functions";
const NESTING_SUGGESTION: &str = "Use early returns or extract nested logic into helper functions";
const COMPLEXITY_SUGGESTION: &str = "Simplify logic or break into smaller functions";
const PARAMETER_SUGGESTION: &str = "Consider using a configuration object or dataclass";
const MAGIC_NUMBER_SUGGESTION: &str = "Extract magic numbers into named constants";
const ERROR_HANDLING_SUGGESTION: &str = "Add try-except blocks for potential errors";

/// Values listed in a low-severity magic number message
const MAX_LISTED_MAGIC_NUMBERS: usize = 3;

fn finding(
    record: &FunctionRecord,
    smell_type: SmellType,
    severity: Severity,
    message: String,
    suggestion: &str,
) -> Finding {
    Finding {
        smell_type,
        severity,
        message,
        suggestion: suggestion.to_string(),
        line: record.start_line,
    }
}

/// Detect long functions
pub fn detect_long_function(
    record: &FunctionRecord,
    thresholds: &SmellThresholds,
) -> Option<Finding> {
    let (smell_type, severity) = if record.length > thresholds.length_critical {
        (SmellType::LongFunction, Severity::Critical)
    } else if record.length > thresholds.length_high {
        (SmellType::LongFunction, Severity::High)
    } else if record.length > thresholds.length_medium {
        (SmellType::ModerateFunction, Severity::Medium)
    } else {
        return None;
    };

    Some(finding(
        record,
        smell_type,
        severity,
        format!(
            "Function '{}' is {} lines long (threshold: {})",
            record.name, record.length, thresholds.length_medium
        ),
        LENGTH_SUGGESTION,
    ))
}

/// Detect deep nesting in functions
pub fn detect_deep_nesting(
    record: &FunctionRecord,
    thresholds: &SmellThresholds,
) -> Option<Finding> {
    let severity = if record.nesting_depth > thresholds.nesting_high {
        Severity::High
    } else if record.nesting_depth > thresholds.nesting_medium {
        Severity::Medium
    } else {
        return None;
    };

    Some(finding(
        record,
        SmellType::DeepNesting,
        severity,
        format!(
            "Function '{}' has nesting depth of {} (threshold: {})",
            record.name, record.nesting_depth, thresholds.nesting_medium
        ),
        NESTING_SUGGESTION,
    ))
}

pub fn detect_high_complexity(
    record: &FunctionRecord,
    thresholds: &SmellThresholds,
) -> Option<Finding> {
    let severity = if record.complexity > thresholds.complexity_critical {
        Severity::Critical
    } else if record.complexity > thresholds.complexity_high {
        Severity::High
    } else if record.complexity > thresholds.complexity_medium {
        Severity::Medium
    } else {
        return None;
    };

    Some(finding(
        record,
        SmellType::HighComplexity,
        severity,
        format!(
            "Function '{}' has cyclomatic complexity of {} ({} decision points)",
            record.name, record.complexity, record.branch_count
        ),
        COMPLEXITY_SUGGESTION,
    ))
}

/// Detect long parameter lists in functions
pub fn detect_too_many_parameters(
    record: &FunctionRecord,
    thresholds: &SmellThresholds,
) -> Option<Finding> {
    let severity = if record.param_count > thresholds.params_high {
        Severity::High
    } else if record.param_count > thresholds.params_medium {
        Severity::Medium
    } else {
        return None;
    };

    Some(finding(
        record,
        SmellType::TooManyParameters,
        severity,
        format!(
            "Function '{}' has {} parameters (threshold: {})",
            record.name, record.param_count, thresholds.params_medium
        ),
        PARAMETER_SUGGESTION,
    ))
}

/// Many distinct literals are reported by count; a few are listed by value.
pub fn detect_magic_numbers(
    record: &FunctionRecord,
    literals: &[NumericLiteral],
    thresholds: &SmellThresholds,
) -> Option<Finding> {
    if literals.is_empty() {
        return None;
    }

    if literals.len() > thresholds.magic_numbers_many {
        return Some(finding(
            record,
            SmellType::MagicNumbers,
            Severity::Medium,
            format!(
                "Function '{}' contains {} magic numbers",
                record.name,
                literals.len()
            ),
            MAGIC_NUMBER_SUGGESTION,
        ));
    }

    let listed: Vec<String> = literals
        .iter()
        .take(MAX_LISTED_MAGIC_NUMBERS)
        .map(|literal| literal.to_string())
        .collect();
    Some(finding(
        record,
        SmellType::MagicNumbers,
        Severity::Low,
        format!(
            "Function '{}' contains magic numbers: {}",
            record.name,
            listed.join(", ")
        ),
        MAGIC_NUMBER_SUGGESTION,
    ))
}

/// Any try/with anywhere in the function counts as error handling.
pub fn detect_missing_error_handling(
    record: &FunctionRecord,
    subtree: Node,
    thresholds: &SmellThresholds,
) -> Option<Finding> {
    if record.length <= thresholds.error_handling_min_length {
        return None;
    }
    if any_descendant(subtree, |n| SyntaxKind::of(n).is_structural_scope()) {
        return None;
    }

    Some(finding(
        record,
        SmellType::MissingErrorHandling,
        Severity::Medium,
        format!(
            "Function '{}' is {} lines long and lacks error handling",
            record.name, record.length
        ),
        ERROR_HANDLING_SUGGESTION,
    ))
}

/// Analyze a function for all code smells, in fixed rule order.
pub fn analyze_function_smells(
    record: &FunctionRecord,
    subtree: Node,
    source: &str,
    thresholds: &SmellThresholds,
) -> Vec<Finding> {
    let literals = magic_numbers(subtree, source);

    [
        detect_long_function(record, thresholds),
        detect_deep_nesting(record, thresholds),
        detect_high_complexity(record, thresholds),
        detect_too_many_parameters(record, thresholds),
        detect_magic_numbers(record, &literals, thresholds),
        detect_missing_error_handling(record, subtree, thresholds),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(length: usize) -> FunctionRecord {
        FunctionRecord::new("target".to_string(), 10, 10 + length - 1)
    }

    #[test]
    fn test_length_tiers() {
        let thresholds = SmellThresholds::default();

        assert!(detect_long_function(&record(20), &thresholds).is_none());

        let medium = detect_long_function(&record(21), &thresholds).unwrap();
        assert_eq!(medium.smell_type, SmellType::ModerateFunction);
        assert_eq!(medium.severity, Severity::Medium);
        assert_eq!(medium.line, 10);

        let high = detect_long_function(&record(51), &thresholds).unwrap();
        assert_eq!(high.smell_type, SmellType::LongFunction);
        assert_eq!(high.severity, Severity::High);

        let critical = detect_long_function(&record(101), &thresholds).unwrap();
        assert_eq!(critical.severity, Severity::Critical);
        assert!(critical.message.contains("'target'"));
        assert!(critical.message.contains("101"));
    }

    #[test]
    fn test_nesting_tiers() {
        let thresholds = SmellThresholds::default();
        let mut func = record(5);

        func.nesting_depth = 3;
        assert!(detect_deep_nesting(&func, &thresholds).is_none());
        func.nesting_depth = 4;
        assert_eq!(
            detect_deep_nesting(&func, &thresholds).unwrap().severity,
            Severity::Medium
        );
        func.nesting_depth = 5;
        assert_eq!(
            detect_deep_nesting(&func, &thresholds).unwrap().severity,
            Severity::High
        );
    }

    #[test]
    fn test_complexity_tiers() {
        let thresholds = SmellThresholds::default();
        let mut func = record(5);

        func.complexity = 7;
        assert!(detect_high_complexity(&func, &thresholds).is_none());
        func.complexity = 8;
        assert_eq!(
            detect_high_complexity(&func, &thresholds).unwrap().severity,
            Severity::Medium
        );
        func.complexity = 11;
        assert_eq!(
            detect_high_complexity(&func, &thresholds).unwrap().severity,
            Severity::High
        );
        func.complexity = 21;
        assert_eq!(
            detect_high_complexity(&func, &thresholds).unwrap().severity,
            Severity::Critical
        );
    }

    #[test]
    fn test_parameter_tiers() {
        let thresholds = SmellThresholds::default();
        let mut func = record(5);

        func.param_count = 3;
        assert!(detect_too_many_parameters(&func, &thresholds).is_none());
        func.param_count = 4;
        assert_eq!(
            detect_too_many_parameters(&func, &thresholds)
                .unwrap()
                .severity,
            Severity::Medium
        );
        func.param_count = 6;
        let high = detect_too_many_parameters(&func, &thresholds).unwrap();
        assert_eq!(high.severity, Severity::High);
        assert_eq!(high.suggestion, PARAMETER_SUGGESTION);
    }

    #[test]
    fn test_magic_numbers_few_are_listed() {
        let thresholds = SmellThresholds::default();
        let literals = [NumericLiteral::Int(7), NumericLiteral::Float(2.5)];
        let found = detect_magic_numbers(&record(5), &literals, &thresholds).unwrap();

        assert_eq!(found.severity, Severity::Low);
        assert_eq!(found.message, "Function 'target' contains magic numbers: 7, 2.5");
    }

    #[test]
    fn test_magic_numbers_many_are_counted() {
        let thresholds = SmellThresholds::default();
        let literals: Vec<NumericLiteral> = (2..14).map(NumericLiteral::Int).collect();
        let found = detect_magic_numbers(&record(5), &literals, &thresholds).unwrap();

        assert_eq!(found.severity, Severity::Medium);
        assert_eq!(found.message, "Function 'target' contains 12 magic numbers");
    }

    #[test]
    fn test_no_magic_numbers() {
        let thresholds = SmellThresholds::default();
        assert!(detect_magic_numbers(&record(5), &[], &thresholds).is_none());
    }
}
