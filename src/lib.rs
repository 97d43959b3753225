//! Static analysis for Python source: per-function metrics, smell findings,
//! file-level quality scores and extract-function suggestions.
//!
//! ```rust
//! use debtlens::{analyze_source, suggest_refactorings};
//!
//! let source = "def add(a, b):\n    return a + b\n";
//! let result = analyze_source(source, Some("add.py")).unwrap();
//! assert_eq!(result.functions.len(), 1);
//! assert_eq!(result.quality_score, 100);
//!
//! let report = suggest_refactorings(source, Some("add.py")).unwrap();
//! assert!(report.suggestions.is_empty());
//! ```

pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod debt;
pub mod errors;
pub mod refactoring;
pub mod scoring;

pub use crate::analyzers::{analyze_file, Analyzer, CollectedMetrics, PythonAnalyzer};
pub use crate::config::{load_config, load_config_from, EngineConfig};
pub use crate::core::{
    AnalysisResult, AnalysisSummary, Finding, FunctionRecord, HealthStatus, Severity, SmellType,
    TechnicalDebt,
};
pub use crate::errors::{EngineError, ErrorReport, Result};
pub use crate::refactoring::{RefactorReport, RefactorSuggester, Suggestion};

use crate::analyzers::python::parse_source;
use crate::core::ast::DEFAULT_LABEL;

/// Analysis entry point carrying its configuration. Every call builds fresh
/// traversal state, so one engine may serve any number of inputs.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Metrics, findings and scores for one source text.
    pub fn analyze(&self, source: &str, label: Option<&str>) -> Result<AnalysisResult> {
        let span = tracing::debug_span!("analyze", label = label.unwrap_or(DEFAULT_LABEL));
        let _enter = span.enter();

        let analyzer = PythonAnalyzer::with_thresholds(self.config.thresholds.clone());
        let metrics = analyze_file(source, label, &analyzer)?;
        let result = scoring::build_analysis_result(metrics, &self.config.debt);

        tracing::debug!(
            functions = result.functions.len(),
            smells = result.total_smells,
            quality = result.quality_score,
            "Analysis complete"
        );
        Ok(result)
    }

    /// Extract-function suggestions for one source text.
    pub fn suggest(&self, source: &str, label: Option<&str>) -> Result<RefactorReport> {
        let span = tracing::debug_span!("suggest", label = label.unwrap_or(DEFAULT_LABEL));
        let _enter = span.enter();

        let ast = parse_source(source, label)?;
        let report = RefactorSuggester::new(&ast, &self.config.suggestions).suggest();

        tracing::debug!(
            suggestions = report.summary.total,
            eligible = report.summary.functions_analyzed,
            "Suggestions complete"
        );
        Ok(report)
    }
}

/// Analyze with the built-in thresholds.
pub fn analyze_source(source: &str, label: Option<&str>) -> Result<AnalysisResult> {
    Engine::default().analyze(source, label)
}

/// Suggest refactorings with the built-in limits.
pub fn suggest_refactorings(source: &str, label: Option<&str>) -> Result<RefactorReport> {
    Engine::default().suggest(source, label)
}
