//! Block selection for function extraction.
//!
//! Each strategy looks at the top-level statements of one function body and
//! either proposes a contiguous run of them or passes. Strategies are tried
//! in table order and the first candidate wins.

use crate::analyzers::python::syntax::SyntaxKind;
use crate::core::ast::{node_end_line, node_line};
use crate::core::span_length;
use tree_sitter::Node;

/// Minimum span for any proposed block
const MIN_BLOCK_LINES: usize = 3;
/// Minimum span for a single compound statement or a leading slice
const MIN_COMPOUND_LINES: usize = 5;
/// Statements preceding a loop needed before they are extracted instead of it
const MIN_LOOP_PRELUDE: usize = 2;
/// Body size needed for the middle slice
const MIN_MIDDLE_SLICE_BODY: usize = 6;
/// Exclusive upper index of the middle slice
const MIDDLE_SLICE_END: usize = 4;
/// Body size needed for the leading slice
const MIN_LEADING_SLICE_BODY: usize = 3;
const LEADING_SLICE_LEN: usize = 2;

/// A contiguous, non-empty run of top-level statements in one function body.
#[derive(Debug, Clone)]
pub struct ExtractionCandidate<'t> {
    pub start_line: usize,
    pub end_line: usize,
    pub statements: Vec<Node<'t>>,
}

impl<'t> ExtractionCandidate<'t> {
    pub fn from_statements(statements: &[Node<'t>]) -> Option<Self> {
        let first = statements.first()?;
        let last = statements.last()?;
        Some(Self {
            start_line: node_line(first),
            end_line: node_end_line(last),
            statements: statements.to_vec(),
        })
    }

    pub fn line_span(&self) -> usize {
        span_length(self.start_line, self.end_line)
    }

    fn at_least(self, min_lines: usize) -> Option<Self> {
        (self.line_span() >= min_lines).then_some(self)
    }
}

pub type SelectionStrategy = for<'t> fn(&[Node<'t>]) -> Option<ExtractionCandidate<'t>>;

/// Strategies in priority order.
pub static STRATEGIES: &[(&str, SelectionStrategy)] = &[
    ("complex_conditional", complex_conditional),
    ("loop_adjacent", loop_adjacent),
    ("middle_slice", middle_slice),
    ("leading_slice", leading_slice),
];

/// Run every strategy in order; returns the winning strategy's name with its block.
pub fn select_block<'t>(body: &[Node<'t>]) -> Option<(&'static str, ExtractionCandidate<'t>)> {
    STRATEGIES
        .iter()
        .find_map(|(name, strategy)| strategy(body).map(|candidate| (*name, candidate)))
}

fn statement_span(node: &Node) -> usize {
    span_length(node_line(node), node_end_line(node))
}

/// First top-level `if` spanning at least five lines.
pub fn complex_conditional<'t>(body: &[Node<'t>]) -> Option<ExtractionCandidate<'t>> {
    body.iter()
        .enumerate()
        .filter(|(_, stmt)| SyntaxKind::of(stmt) == SyntaxKind::Conditional)
        .find(|(_, stmt)| statement_span(stmt) >= MIN_COMPOUND_LINES)
        .and_then(|(i, _)| ExtractionCandidate::from_statements(&body[i..=i]))
}

/// The statements leading up to the first loop, or the loop itself.
pub fn loop_adjacent<'t>(body: &[Node<'t>]) -> Option<ExtractionCandidate<'t>> {
    let index = body.iter().position(|stmt| SyntaxKind::of(stmt).is_loop())?;

    let prelude = &body[..index];
    if prelude.len() >= MIN_LOOP_PRELUDE {
        if let Some(candidate) =
            ExtractionCandidate::from_statements(prelude).and_then(|c| c.at_least(MIN_BLOCK_LINES))
        {
            return Some(candidate);
        }
    }

    ExtractionCandidate::from_statements(&body[index..=index])
        .and_then(|c| c.at_least(MIN_COMPOUND_LINES))
}

/// Skip the setup statement and keep at least one trailing statement.
pub fn middle_slice<'t>(body: &[Node<'t>]) -> Option<ExtractionCandidate<'t>> {
    if body.len() < MIN_MIDDLE_SLICE_BODY {
        return None;
    }
    let end = MIDDLE_SLICE_END.min(body.len() - 2);
    ExtractionCandidate::from_statements(&body[1..end]).and_then(|c| c.at_least(MIN_BLOCK_LINES))
}

/// The first statements of the body, never including a trailing `return`.
pub fn leading_slice<'t>(body: &[Node<'t>]) -> Option<ExtractionCandidate<'t>> {
    if body.len() < MIN_LEADING_SLICE_BODY {
        return None;
    }
    let usable = match body.last() {
        Some(last) if SyntaxKind::of(last) == SyntaxKind::Return => body.len() - 1,
        _ => body.len(),
    };
    let take = LEADING_SLICE_LEN.min(usable);
    ExtractionCandidate::from_statements(&body[..take]).and_then(|c| c.at_least(MIN_COMPOUND_LINES))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::python::parser::parse_source;
    use crate::analyzers::python::syntax::body_statements;
    use crate::core::ast::PythonAst;
    use indoc::indoc;

    fn with_body<R>(source: &str, check: impl FnOnce(&[Node]) -> R) -> R {
        let ast: PythonAst = parse_source(source, None).unwrap();
        let func = ast.root().named_child(0).unwrap();
        let body = body_statements(&func);
        check(&body)
    }

    #[test]
    fn test_complex_conditional_picks_first_large_if() {
        let source = indoc! {"
            def f(x):
                if x:
                    return 1
                if x > 10:
                    a = 2
                    b = 3
                    c = 4
                    return a + b + c
                return 0
        "};
        with_body(source, |body| {
            let candidate = complex_conditional(body).unwrap();
            assert_eq!(candidate.start_line, 4);
            assert_eq!(candidate.end_line, 8);
            assert_eq!(candidate.statements.len(), 1);
        });
    }

    #[test]
    fn test_loop_adjacent_prefers_prelude() {
        let source = indoc! {"
            def f(items):
                total = 0
                count = 0
                scale = 2
                for item in items:
                    total += item
                return total
        "};
        with_body(source, |body| {
            let candidate = loop_adjacent(body).unwrap();
            assert_eq!(candidate.statements.len(), 3);
            assert_eq!((candidate.start_line, candidate.end_line), (2, 4));
        });
    }

    #[test]
    fn test_loop_adjacent_falls_back_to_loop() {
        let source = indoc! {"
            def f(items):
                total = 0
                for item in items:
                    if item:
                        total += item
                    else:
                        total -= 1
                return total
        "};
        with_body(source, |body| {
            let candidate = loop_adjacent(body).unwrap();
            assert_eq!(candidate.statements.len(), 1);
            assert_eq!(candidate.statements[0].kind(), "for_statement");
            assert_eq!((candidate.start_line, candidate.end_line), (3, 7));
        });
    }

    #[test]
    fn test_middle_slice_bounds() {
        let source = indoc! {"
            def f(a):
                b = a
                c = b
                d = c
                e = d
                g = e
                return g
        "};
        with_body(source, |body| {
            let candidate = middle_slice(body).unwrap();
            assert_eq!(candidate.statements.len(), 3);
            assert_eq!((candidate.start_line, candidate.end_line), (3, 5));
        });
    }

    #[test]
    fn test_middle_slice_needs_six_statements() {
        let source = "def f(a):\n    b = a\n    c = b\n    d = c\n    return d\n";
        with_body(source, |body| assert!(middle_slice(body).is_none()));
    }

    #[test]
    fn test_leading_slice_requires_five_lines() {
        let source = indoc! {"
            def f(a):
                b = [
                    a,
                    a,
                ]
                c = (
                    b
                )
                return c
        "};
        with_body(source, |body| {
            let candidate = leading_slice(body).unwrap();
            assert_eq!(candidate.statements.len(), 2);
            assert_eq!((candidate.start_line, candidate.end_line), (2, 8));
        });

        let short = "def f(a):\n    b = a\n    c = b\n    return c\n";
        with_body(short, |body| assert!(leading_slice(body).is_none()));
    }

    #[test]
    fn test_select_block_reports_strategy() {
        let source = indoc! {"
            def f(a):
                b = a
                c = b
                d = c
                e = d
                g = e
                return g
        "};
        with_body(source, |body| {
            let (strategy, _) = select_block(body).unwrap();
            assert_eq!(strategy, "middle_slice");
        });
    }

    #[test]
    fn test_no_strategy_matches_tiny_body() {
        with_body("def f():\n    return 1\n", |body| assert!(select_block(body).is_none()));
    }
}
