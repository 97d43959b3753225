//! Indentation consistency across logical lines.
//!
//! tree-sitter-python accepts a dedent to a column that no enclosing block
//! opened at, without recording an error. Python rejects such input, so a
//! cleanly parsed tree is replayed against an indentation stack here.

use std::collections::BTreeMap;
use tree_sitter::Node;

use super::syntax::walk_preorder;

const TAB_SIZE: usize = 8;

/// Clause headers that sit on their own line at their statement's indentation.
const CLAUSE_KINDS: &[&str] = &[
    "elif_clause",
    "else_clause",
    "except_clause",
    "except_group_clause",
    "finally_clause",
    "case_clause",
];

/// 0-based row and visual column of the first dedent that matches no
/// enclosing indentation level.
pub fn first_inconsistent_dedent(root: Node, source: &str) -> Option<(usize, usize)> {
    let mut levels = vec![0usize];

    for (row, column) in logical_line_starts(root, source) {
        let top = levels.last().copied().unwrap_or(0);
        if column > top {
            levels.push(column);
            continue;
        }
        while levels.last().is_some_and(|&level| column < level) {
            levels.pop();
        }
        if levels.last() != Some(&column) {
            return Some((row, column));
        }
    }
    None
}

/// Indentation of every line that begins a statement or clause, keyed by row.
fn logical_line_starts(root: Node, source: &str) -> BTreeMap<usize, usize> {
    let lines: Vec<&str> = source.split('\n').collect();
    let mut starts = BTreeMap::new();

    walk_preorder(root, |node| {
        if !opens_logical_line(&node) {
            return;
        }
        let position = node.start_position();
        let Some(prefix) = lines
            .get(position.row)
            .and_then(|line| line.get(..position.column))
        else {
            return;
        };
        if prefix.chars().all(|c| matches!(c, ' ' | '\t' | '\x0c')) {
            starts
                .entry(position.row)
                .or_insert_with(|| visual_width(prefix));
        }
    });
    starts
}

fn opens_logical_line(node: &Node) -> bool {
    if !node.is_named() || node.kind() == "comment" {
        return false;
    }
    if CLAUSE_KINDS.contains(&node.kind()) {
        return true;
    }
    node.parent().is_some_and(|parent| {
        matches!(parent.kind(), "module" | "block" | "decorated_definition")
    })
}

/// Tabs advance to the next multiple of eight; a form feed resets the count.
fn visual_width(prefix: &str) -> usize {
    prefix.chars().fold(0, |width, c| match c {
        '\t' => (width / TAB_SIZE + 1) * TAB_SIZE,
        '\x0c' => 0,
        _ => width + 1,
    })
}
