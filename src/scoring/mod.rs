//! File-level scores derived from function records.
//!
//! Everything here is a pure reduction over [`FunctionRecord`]s: quality,
//! toxicity, maintainability index, technical debt and health status. An
//! empty function list scores as a perfect file.

pub mod debt;
pub mod quality;
pub mod toxicity;

pub use debt::{format_duration, health_status, round_one_decimal, technical_debt};
pub use quality::{file_quality, function_quality, PERFECT_SCORE};
pub use toxicity::{severity_weight, toxicity, type_multiplier, TOXICITY_CEILING};

use crate::analyzers::CollectedMetrics;
use crate::config::DebtConfig;
use crate::core::{AnalysisResult, AnalysisSummary, FunctionRecord, SmellType};
use std::collections::BTreeMap;

const COMPLEXITY_SCALE: f64 = 5.0;

fn mean(functions: &[FunctionRecord], value: impl Fn(&FunctionRecord) -> f64) -> f64 {
    if functions.is_empty() {
        return 0.0;
    }
    functions.iter().map(value).sum::<f64>() / functions.len() as f64
}

/// `0.5·quality + 0.3·(100 − toxicity) + 0.2·(100 − min(100, 5·avgComplexity))`
pub fn maintainability_index(quality: u32, toxicity: u32, average_complexity: f64) -> u32 {
    let complexity_term = 100.0 - (average_complexity * COMPLEXITY_SCALE).min(100.0);
    let index = 0.5 * f64::from(quality)
        + 0.3 * (100.0 - f64::from(toxicity))
        + 0.2 * complexity_term;
    index.round().clamp(0.0, 100.0) as u32
}

pub fn count_smells_by_type(functions: &[FunctionRecord]) -> BTreeMap<SmellType, usize> {
    functions
        .iter()
        .flat_map(|f| f.smells.iter())
        .fold(BTreeMap::new(), |mut acc, finding| {
            *acc.entry(finding.smell_type).or_insert(0) += 1;
            acc
        })
}

/// Reduce collected metrics to the complete file result.
pub fn build_analysis_result(metrics: CollectedMetrics, debt_config: &DebtConfig) -> AnalysisResult {
    let functions = metrics.functions;

    let smells_by_type = count_smells_by_type(&functions);
    let total_smells: usize = smells_by_type.values().sum();

    let quality_score = file_quality(&functions);
    let toxicity_score = toxicity(&functions);
    let average_complexity = mean(&functions, |f| f64::from(f.complexity));
    let average_length = mean(&functions, |f| f.length as f64);

    let summary = AnalysisSummary {
        total_functions: functions.len(),
        average_length: average_length.round() as usize,
        average_complexity: round_one_decimal(average_complexity),
        health_status: health_status(quality_score),
    };

    AnalysisResult {
        import_count: metrics.import_count,
        total_smells,
        smells_by_type,
        quality_score,
        toxicity: toxicity_score,
        maintainability_index: maintainability_index(
            quality_score,
            toxicity_score,
            average_complexity,
        ),
        technical_debt: technical_debt(total_smells, debt_config.minutes_per_finding),
        summary,
        functions,
    }
}
