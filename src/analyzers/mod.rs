use crate::core::ast::PythonAst;
use crate::errors::Result;

pub mod python;

pub use python::{CollectedMetrics, PythonAnalyzer};

pub trait Analyzer {
    fn parse(&self, content: &str, label: Option<&str>) -> Result<PythonAst>;
    fn analyze(&self, ast: &PythonAst) -> CollectedMetrics;
}

/// Parse and measure one source text. A syntax error short-circuits before
/// any metrics are collected.
pub fn analyze_file(
    content: &str,
    label: Option<&str>,
    analyzer: &dyn Analyzer,
) -> Result<CollectedMetrics> {
    analyzer
        .parse(content, label)
        .map(|ast| analyzer.analyze(&ast))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_file_collects_functions() {
        let analyzer = PythonAnalyzer::new();
        let metrics = analyze_file("def f():\n    pass\n", Some("f.py"), &analyzer).unwrap();
        assert_eq!(metrics.functions.len(), 1);
    }

    #[test]
    fn test_analyze_file_short_circuits_on_syntax_error() {
        let analyzer = PythonAnalyzer::new();
        let err = analyze_file("def f(:\n", Some("f.py"), &analyzer).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_custom_thresholds_flow_into_findings() {
        let thresholds = crate::config::SmellThresholds {
            params_medium: 1,
            params_high: 2,
            ..Default::default()
        };
        let analyzer = PythonAnalyzer::with_thresholds(thresholds);
        let metrics = analyze_file("def f(a, b):\n    return a\n", None, &analyzer).unwrap();
        assert_eq!(metrics.functions[0].smells.len(), 1);
    }
}
