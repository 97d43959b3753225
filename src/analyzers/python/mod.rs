//! Python source code analysis
//!
//! - Parsing through tree-sitter with structured syntax errors
//! - Per-function structural metrics (length, nesting, branches, parameters)
//! - Smell findings attached to each function record
//!
//! # Example
//!
//! ```rust
//! use debtlens::analyzers::python::PythonAnalyzer;
//! use debtlens::analyzers::Analyzer;
//!
//! let analyzer = PythonAnalyzer::new();
//! let ast = analyzer.parse("def f(a):\n    return a\n", Some("demo.py")).unwrap();
//! let metrics = analyzer.analyze(&ast);
//! assert_eq!(metrics.functions.len(), 1);
//! ```

pub mod indentation;
pub mod literals;
pub mod metrics;
pub mod parser;
pub mod syntax;

pub use metrics::{CollectedMetrics, MetricsCollector};
pub use parser::parse_source;

use crate::config::SmellThresholds;
use crate::core::ast::PythonAst;
use crate::errors::Result;

use super::Analyzer;

#[derive(Debug, Clone, Default)]
pub struct PythonAnalyzer {
    thresholds: SmellThresholds,
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: SmellThresholds) -> Self {
        Self { thresholds }
    }
}

impl Analyzer for PythonAnalyzer {
    fn parse(&self, content: &str, label: Option<&str>) -> Result<PythonAst> {
        parse_source(content, label)
    }

    fn analyze(&self, ast: &PythonAst) -> CollectedMetrics {
        MetricsCollector::new(&ast.source, &self.thresholds).collect(ast.root())
    }
}
