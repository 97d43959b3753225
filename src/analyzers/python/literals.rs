//! Numeric literal extraction for magic-number detection.

use crate::core::ast::node_text;
use std::cmp::Ordering;
use std::fmt;
use tree_sitter::Node;

use super::syntax::{walk_preorder, SyntaxKind};

/// A literal that can appear in the magic-number exemption set.
///
/// Booleans are folded in with the numbers: `True`/`False` are always exempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericLiteral {
    Int(i128),
    Float(f64),
    Bool(bool),
}

const EXEMPT_VALUES: &[f64] = &[0.0, 1.0, -1.0, 100.0];

impl NumericLiteral {
    pub fn value(&self) -> f64 {
        match self {
            NumericLiteral::Int(v) => *v as f64,
            NumericLiteral::Float(v) => *v,
            NumericLiteral::Bool(b) => f64::from(u8::from(*b)),
        }
    }

    pub fn is_exempt(&self) -> bool {
        match self {
            NumericLiteral::Bool(_) => true,
            _ => EXEMPT_VALUES.contains(&self.value()),
        }
    }

    /// Parse the source text of a literal node. Complex literals (`3j`) are
    /// not numbers for this purpose.
    pub fn from_node(node: &Node, source: &str) -> Option<Self> {
        let text = node_text(node, source);
        match SyntaxKind::of(node) {
            SyntaxKind::Integer => parse_integer(text),
            SyntaxKind::Float => parse_float(text),
            SyntaxKind::Boolean => Some(NumericLiteral::Bool(node.kind() == "true")),
            _ => None,
        }
    }
}

impl fmt::Display for NumericLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericLiteral::Int(v) => write!(f, "{v}"),
            NumericLiteral::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            NumericLiteral::Float(v) => write!(f, "{v}"),
            NumericLiteral::Bool(true) => write!(f, "True"),
            NumericLiteral::Bool(false) => write!(f, "False"),
        }
    }
}

fn is_complex(cleaned: &str) -> bool {
    cleaned.ends_with('j')
}

fn parse_integer(text: &str) -> Option<NumericLiteral> {
    let cleaned = text.replace('_', "").to_ascii_lowercase();
    if is_complex(&cleaned) {
        return None;
    }
    let cleaned = cleaned.trim_end_matches('l');

    let radix_parsed = [("0x", 16), ("0o", 8), ("0b", 2)]
        .iter()
        .find_map(|(prefix, radix)| {
            cleaned
                .strip_prefix(prefix)
                .map(|digits| i128::from_str_radix(digits, *radix))
        });

    match radix_parsed {
        Some(Ok(v)) => Some(NumericLiteral::Int(v)),
        Some(Err(_)) => None,
        None => match cleaned.parse::<i128>() {
            Ok(v) => Some(NumericLiteral::Int(v)),
            // Arbitrary-precision integers still count, approximately.
            Err(_) => cleaned.parse::<f64>().ok().map(NumericLiteral::Float),
        },
    }
}

fn parse_float(text: &str) -> Option<NumericLiteral> {
    let cleaned = text.replace('_', "").to_ascii_lowercase();
    if is_complex(&cleaned) {
        return None;
    }
    cleaned.parse::<f64>().ok().map(NumericLiteral::Float)
}

/// Distinct non-exempt numeric literals in `node`'s subtree, sorted by value.
pub fn magic_numbers(node: Node, source: &str) -> Vec<NumericLiteral> {
    let mut found: Vec<NumericLiteral> = Vec::new();
    walk_preorder(node, |n| {
        if let Some(literal) = NumericLiteral::from_node(&n, source) {
            if !literal.is_exempt() && !found.iter().any(|seen| seen.value() == literal.value()) {
                found.push(literal);
            }
        }
    });
    found.sort_by(|a, b| a.value().partial_cmp(&b.value()).unwrap_or(Ordering::Equal));
    found
}
