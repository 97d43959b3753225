pub mod ast;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-function structural facts gathered in a single traversal.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub length: usize,
    pub nesting_depth: u32,
    pub branch_count: u32,
    pub param_count: usize,
    pub is_async: bool,
    pub complexity: u32,
    pub smells: Vec<Finding>,
}

impl FunctionRecord {
    pub fn new(name: String, start_line: usize, end_line: usize) -> Self {
        Self {
            name,
            start_line,
            end_line,
            length: span_length(start_line, end_line),
            nesting_depth: 0,
            branch_count: 0,
            param_count: 0,
            is_async: false,
            complexity: 1,
            smells: Vec::new(),
        }
    }
}

/// Inclusive line span, never less than one line.
pub fn span_length(start_line: usize, end_line: usize) -> usize {
    if end_line >= start_line {
        end_line - start_line + 1
    } else {
        1
    }
}

/// A single graded observation about a function.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    #[serde(rename = "type")]
    pub smell_type: SmellType,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
    pub line: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Copy, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SmellType {
    LongFunction,
    ModerateFunction,
    DeepNesting,
    HighComplexity,
    TooManyParameters,
    MagicNumbers,
    MissingErrorHandling,
}

impl SmellType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmellType::LongFunction => "long_function",
            SmellType::ModerateFunction => "moderate_function",
            SmellType::DeepNesting => "deep_nesting",
            SmellType::HighComplexity => "high_complexity",
            SmellType::TooManyParameters => "too_many_parameters",
            SmellType::MagicNumbers => "magic_numbers",
            SmellType::MissingErrorHandling => "missing_error_handling",
        }
    }
}

impl std::fmt::Display for SmellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Copy, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(Severity, &str)] = &[
            (Severity::Low, "low"),
            (Severity::Medium, "medium"),
            (Severity::High, "high"),
            (Severity::Critical, "critical"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(s, _)| s == self)
            .map(|(_, s)| *s)
            .unwrap_or("unknown");

        write!(f, "{display_str}")
    }
}

/// Whole-file result of the metrics and scoring pipeline.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub import_count: usize,
    pub functions: Vec<FunctionRecord>,
    pub total_smells: usize,
    pub smells_by_type: BTreeMap<SmellType, usize>,
    pub quality_score: u32,
    pub toxicity: u32,
    pub maintainability_index: u32,
    pub technical_debt: TechnicalDebt,
    pub summary: AnalysisSummary,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TechnicalDebt {
    pub minutes: u64,
    pub hours: f64,
    pub formatted: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_functions: usize,
    pub average_length: usize,
    pub average_complexity: f64,
    pub health_status: HealthStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Copy)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    NeedsImprovement,
    Critical,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::NeedsImprovement => "needs_improvement",
            HealthStatus::Critical => "critical",
        };
        write!(f, "{s}")
    }
}
