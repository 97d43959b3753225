//! Extract-function suggestions.
//!
//! The suggester walks the module independently of the metrics pipeline.
//! For every function large enough to be worth splitting it:
//!
//! 1. picks a block of top-level statements ([`selection`]),
//! 2. finds which of the function's parameters the block reads ([`variables`]),
//! 3. names the block ([`naming`]),
//! 4. renders the extracted function and the patched module ([`synthesis`]).
//!
//! The output is a best-effort text transform. It is never written to disk.

pub mod naming;
pub mod selection;
pub mod synthesis;
pub mod variables;

use crate::analyzers::python::syntax::{
    body_statements, count_statements, function_name, is_async_function, parameter_names,
    walk_preorder, SyntaxKind,
};
use crate::config::SuggestionConfig;
use crate::core::ast::{node_end_line, node_line, node_text, PythonAst};
use crate::core::span_length;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tree_sitter::Node;

pub use naming::ExtractedNameInferrer;
pub use selection::{select_block, ExtractionCandidate};
pub use variables::VariableFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    ExtractFunction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub source_function: String,
    pub extracted_name: String,
    pub parameters: Vec<String>,
    pub lines_extracted: usize,
    pub extracted_code: String,
    pub patched_code: String,
    pub description: String,
    pub benefit: String,
    pub risk: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactorSummary {
    pub total: usize,
    pub functions_analyzed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefactorReport {
    pub suggestions: Vec<Suggestion>,
    pub summary: RefactorSummary,
}

pub struct RefactorSuggester<'a> {
    ast: &'a PythonAst,
    config: &'a SuggestionConfig,
}

impl<'a> RefactorSuggester<'a> {
    pub fn new(ast: &'a PythonAst, config: &'a SuggestionConfig) -> Self {
        Self { ast, config }
    }

    /// Suggestions in tree order, truncated to the configured maximum.
    pub fn suggest(&self) -> RefactorReport {
        let source = self.ast.source.as_str();
        let taken = module_identifiers(self.ast.root(), source);
        let namer = ExtractedNameInferrer::new(source, &taken);

        let eligible: Vec<Node> = function_nodes(self.ast.root())
            .into_iter()
            .filter(|func| self.is_eligible(func))
            .collect();

        let mut suggestions: Vec<Suggestion> = eligible
            .iter()
            .filter_map(|func| self.suggest_for_function(func, &namer))
            .collect();
        suggestions.truncate(self.config.max_suggestions);

        RefactorReport {
            summary: RefactorSummary {
                total: suggestions.len(),
                functions_analyzed: eligible.len(),
            },
            suggestions,
        }
    }

    /// Long enough by span, or busy enough by statement count.
    pub fn is_eligible(&self, func: &Node) -> bool {
        let span = span_length(node_line(func), node_end_line(func));
        if span >= self.config.min_function_lines {
            return true;
        }
        func.child_by_field_name("body")
            .is_some_and(|body| count_statements(body) >= self.config.min_statement_count)
    }

    fn suggest_for_function(
        &self,
        func: &Node,
        namer: &ExtractedNameInferrer,
    ) -> Option<Suggestion> {
        let source = self.ast.source.as_str();
        let function = function_name(func, source);
        let body = body_statements(func);

        let Some((strategy, candidate)) = select_block(&body) else {
            tracing::debug!(function = %function, "No extractable block");
            return None;
        };
        tracing::debug!(
            function = %function,
            strategy,
            start_line = candidate.start_line,
            end_line = candidate.end_line,
            "Selected extraction block"
        );

        let declared = parameter_names(func, source);
        let parameters =
            VariableFlow::analyze(&candidate.statements, source).inbound_parameters(&declared);
        let extracted_name = namer.infer_name(&candidate.statements);
        let is_async = is_async_function(func);

        let extracted_code = synthesis::render_extracted_function(
            &extracted_name,
            &parameters,
            &candidate.statements,
            source,
            is_async,
        );
        let call = synthesis::render_call(&extracted_name, &parameters, is_async);
        let patched_code = synthesis::patch_source(
            source,
            candidate.start_line,
            candidate.end_line,
            &call,
            &extracted_code,
        );

        let lines_extracted = candidate.line_span();
        Some(Suggestion {
            kind: SuggestionKind::ExtractFunction,
            description: format!(
                "Extract {} statements ({} lines) into {}()",
                candidate.statements.len(),
                lines_extracted,
                extracted_name
            ),
            benefit: format!(
                "Simplifies {} and improves readability by separating concerns",
                function
            ),
            risk: RiskLevel::Low,
            source_function: function,
            extracted_name,
            parameters,
            lines_extracted,
            extracted_code,
            patched_code,
        })
    }
}

/// Every function definition in pre-order, nested and methods included.
fn function_nodes(root: Node) -> Vec<Node> {
    let mut functions = Vec::new();
    walk_preorder(root, |node| {
        if SyntaxKind::of(&node) == SyntaxKind::Function {
            functions.push(node);
        }
    });
    functions
}

fn module_identifiers(root: Node, source: &str) -> HashSet<String> {
    let mut names = HashSet::new();
    walk_preorder(root, |node| {
        if SyntaxKind::of(&node) == SyntaxKind::Identifier {
            names.insert(node_text(&node, source).to_string());
        }
    });
    names
}
