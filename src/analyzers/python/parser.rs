//! Tree-sitter parser integration for Python
//!
//! tree-sitter always produces a tree, recovering from bad input with
//! `ERROR` and `MISSING` nodes. This adapter turns the first such node into a
//! structured parse error so no caller ever sees a partial tree.
//!
//! The grammar also accepts a few constructs Python 3 rejects without marking
//! them as errors: Python 2 `print`/`exec` statements and dedents to an
//! unknown indentation level. Those are reported the same way.

use crate::core::ast::{node_column, node_line, PythonAst, DEFAULT_LABEL};
use crate::errors::{EngineError, Result};
use tree_sitter::{Node, Parser, Tree};

use super::indentation::first_inconsistent_dedent;
use super::syntax::walk_preorder;

/// Python 2 statement forms and the keyword each one misuses.
const LEGACY_STATEMENTS: &[(&str, &str)] =
    &[("print_statement", "print"), ("exec_statement", "exec")];

/// Parse Python source code into a tree-sitter AST
pub fn parse_source(content: &str, label: Option<&str>) -> Result<PythonAst> {
    let label = label.unwrap_or(DEFAULT_LABEL);
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_python::LANGUAGE.into())?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| EngineError::internal("Python parser returned no syntax tree"))?;

    let error = first_syntax_error(&tree, label)
        .or_else(|| first_legacy_statement(&tree, label))
        .or_else(|| first_indentation_error(&tree, content, label));
    if let Some(err) = error {
        tracing::warn!(label, "Rejecting input with syntax errors: {}", err);
        return Err(err);
    }

    Ok(PythonAst {
        tree,
        source: content.to_string(),
        label: label.to_string(),
    })
}

/// Check if a parse tree has errors
pub fn has_parse_errors(tree: &Tree) -> bool {
    tree.root_node().has_error()
}

fn first_syntax_error(tree: &Tree, label: &str) -> Option<EngineError> {
    if !has_parse_errors(tree) {
        return None;
    }

    let mut offending: Option<Node> = None;
    walk_preorder(tree.root_node(), |node| {
        if offending.is_none() && (node.is_error() || node.is_missing()) {
            offending = Some(node);
        }
    });

    let (line, column) = offending
        .map(|node| (node_line(&node), node_column(&node)))
        .unwrap_or((1, 1));
    let message = match offending {
        Some(node) if node.is_missing() => {
            format!("expected '{}' ({}, line {})", node.kind(), label, line)
        }
        _ => format!("invalid syntax ({}, line {})", label, line),
    };

    Some(EngineError::parse(message, label, line, column))
}

fn first_legacy_statement(tree: &Tree, label: &str) -> Option<EngineError> {
    let mut found: Option<(Node, &str)> = None;
    walk_preorder(tree.root_node(), |node| {
        if found.is_none() {
            found = LEGACY_STATEMENTS
                .iter()
                .find(|(kind, _)| node.kind() == *kind)
                .map(|(_, keyword)| (node, *keyword));
        }
    });

    let (node, keyword) = found?;
    let line = node_line(&node);
    Some(EngineError::parse(
        format!(
            "Missing parentheses in call to '{}' ({}, line {})",
            keyword, label, line
        ),
        label,
        line,
        node_column(&node),
    ))
}

fn first_indentation_error(tree: &Tree, source: &str, label: &str) -> Option<EngineError> {
    let (row, column) = first_inconsistent_dedent(tree.root_node(), source)?;
    let line = row + 1;
    Some(EngineError::parse(
        format!(
            "unindent does not match any outer indentation level ({}, line {})",
            label, line
        ),
        label,
        line,
        column + 1,
    ))
}
