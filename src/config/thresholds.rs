use serde::{Deserialize, Serialize};

/// Smell detection tiers. A value strictly greater than a tier's threshold
/// earns that tier's severity; the highest matching tier wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmellThresholds {
    #[serde(default = "default_length_medium")]
    pub length_medium: usize,
    #[serde(default = "default_length_high")]
    pub length_high: usize,
    #[serde(default = "default_length_critical")]
    pub length_critical: usize,

    #[serde(default = "default_nesting_medium")]
    pub nesting_medium: u32,
    #[serde(default = "default_nesting_high")]
    pub nesting_high: u32,

    #[serde(default = "default_complexity_medium")]
    pub complexity_medium: u32,
    #[serde(default = "default_complexity_high")]
    pub complexity_high: u32,
    #[serde(default = "default_complexity_critical")]
    pub complexity_critical: u32,

    #[serde(default = "default_params_medium")]
    pub params_medium: usize,
    #[serde(default = "default_params_high")]
    pub params_high: usize,

    /// More distinct magic numbers than this is reported as medium
    #[serde(default = "default_magic_numbers_many")]
    pub magic_numbers_many: usize,

    /// Functions longer than this need a try/with somewhere in their body
    #[serde(default = "default_error_handling_min_length")]
    pub error_handling_min_length: usize,
}

impl Default for SmellThresholds {
    fn default() -> Self {
        Self {
            length_medium: default_length_medium(),
            length_high: default_length_high(),
            length_critical: default_length_critical(),
            nesting_medium: default_nesting_medium(),
            nesting_high: default_nesting_high(),
            complexity_medium: default_complexity_medium(),
            complexity_high: default_complexity_high(),
            complexity_critical: default_complexity_critical(),
            params_medium: default_params_medium(),
            params_high: default_params_high(),
            magic_numbers_many: default_magic_numbers_many(),
            error_handling_min_length: default_error_handling_min_length(),
        }
    }
}

impl SmellThresholds {
    // Pure function: tiers must be strictly increasing
    fn validate_tiers<T: PartialOrd + std::fmt::Display>(
        name: &str,
        tiers: &[T],
    ) -> Result<(), String> {
        if tiers.windows(2).all(|pair| pair[0] < pair[1]) {
            Ok(())
        } else {
            let listed: Vec<String> = tiers.iter().map(|t| t.to_string()).collect();
            Err(format!(
                "{} thresholds must increase by tier, got [{}]",
                name,
                listed.join(", ")
            ))
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        Self::validate_tiers(
            "length",
            &[self.length_medium, self.length_high, self.length_critical],
        )?;
        Self::validate_tiers("nesting", &[self.nesting_medium, self.nesting_high])?;
        Self::validate_tiers(
            "complexity",
            &[
                self.complexity_medium,
                self.complexity_high,
                self.complexity_critical,
            ],
        )?;
        Self::validate_tiers("parameter", &[self.params_medium, self.params_high])?;
        Ok(())
    }
}

fn default_length_medium() -> usize {
    20
}
fn default_length_high() -> usize {
    50
}
fn default_length_critical() -> usize {
    100
}
fn default_nesting_medium() -> u32 {
    3
}
fn default_nesting_high() -> u32 {
    4
}
fn default_complexity_medium() -> u32 {
    7
}
fn default_complexity_high() -> u32 {
    10
}
fn default_complexity_critical() -> u32 {
    20
}
fn default_params_medium() -> usize {
    3
}
fn default_params_high() -> usize {
    5
}
fn default_magic_numbers_many() -> usize {
    3
}
fn default_error_handling_min_length() -> usize {
    15
}

/// Technical debt estimation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtConfig {
    #[serde(default = "default_minutes_per_finding")]
    pub minutes_per_finding: u64,
}

impl Default for DebtConfig {
    fn default() -> Self {
        Self {
            minutes_per_finding: default_minutes_per_finding(),
        }
    }
}

fn default_minutes_per_finding() -> u64 {
    15
}

/// Refactor suggester eligibility and output limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// A function spanning at least this many lines is eligible
    #[serde(default = "default_min_function_lines")]
    pub min_function_lines: usize,

    /// A function holding at least this many statements (nested included) is eligible
    #[serde(default = "default_min_statement_count")]
    pub min_statement_count: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            min_function_lines: default_min_function_lines(),
            min_statement_count: default_min_statement_count(),
        }
    }
}

fn default_max_suggestions() -> usize {
    2
}
fn default_min_function_lines() -> usize {
    10
}
fn default_min_statement_count() -> usize {
    8
}
