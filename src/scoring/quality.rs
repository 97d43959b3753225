//! Per-function quality scoring, averaged over the file.

use crate::core::FunctionRecord;

/// (value strictly above, penalty) pairs, highest tier first.
type PenaltyTiers = &'static [(usize, i64)];

static COMPLEXITY_PENALTIES: PenaltyTiers = &[(20, 30), (10, 20), (7, 10), (4, 5)];
static LENGTH_PENALTIES: PenaltyTiers = &[(100, 25), (50, 15), (20, 8)];
static NESTING_PENALTIES: PenaltyTiers = &[(4, 20), (3, 12), (2, 6)];
static PARAMETER_PENALTIES: PenaltyTiers = &[(5, 10), (3, 5)];

const FINDING_PENALTY: i64 = 3;
const CONCISE_BONUS: i64 = 5;
const CONCISE_MAX_LENGTH: usize = 15;
const CONCISE_MAX_COMPLEXITY: u32 = 5;

pub const PERFECT_SCORE: u32 = 100;

fn tier_penalty(tiers: PenaltyTiers, value: usize) -> i64 {
    tiers
        .iter()
        .find(|(threshold, _)| value > *threshold)
        .map(|(_, penalty)| *penalty)
        .unwrap_or(0)
}

/// Score one function in `[0, 100]`.
pub fn function_quality(record: &FunctionRecord) -> u32 {
    let mut score = i64::from(PERFECT_SCORE);
    score -= tier_penalty(COMPLEXITY_PENALTIES, record.complexity as usize);
    score -= tier_penalty(LENGTH_PENALTIES, record.length);
    score -= tier_penalty(NESTING_PENALTIES, record.nesting_depth as usize);
    score -= tier_penalty(PARAMETER_PENALTIES, record.param_count);
    score -= FINDING_PENALTY.saturating_mul(record.smells.len() as i64);

    if record.length < CONCISE_MAX_LENGTH && record.complexity < CONCISE_MAX_COMPLEXITY {
        score += CONCISE_BONUS;
    }

    score.clamp(0, i64::from(PERFECT_SCORE)) as u32
}

/// Rounded mean of per-function scores; a file without functions is perfect.
pub fn file_quality(functions: &[FunctionRecord]) -> u32 {
    if functions.is_empty() {
        return PERFECT_SCORE;
    }
    let total: f64 = functions.iter().map(|f| f64::from(function_quality(f))).sum();
    let mean = total / functions.len() as f64;
    mean.round().clamp(0.0, f64::from(PERFECT_SCORE)) as u32
}
