//! Text synthesis for extracted functions and the patched caller.
//!
//! Works on source slices and line arrays only; nothing here inspects the
//! tree beyond a statement's byte range and starting column.

use crate::core::ast::node_text;
use tree_sitter::Node;

const INDENT: &str = "    ";

/// Source text of one statement with continuation lines dedented so the
/// statement starts at column zero.
pub fn render_statement(statement: &Node, source: &str) -> Vec<String> {
    let column = statement.start_position().column;
    node_text(statement, source)
        .trim_end()
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                strip_indent(line, column).to_string()
            }
        })
        .collect()
}

/// Remove up to `width` bytes of leading blanks.
fn strip_indent(line: &str, width: usize) -> &str {
    let blanks = line
        .bytes()
        .take(width)
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();
    &line[blanks..]
}

fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

/// `def name(a, b):` followed by every statement indented one level.
pub fn render_extracted_function(
    name: &str,
    params: &[String],
    statements: &[Node],
    source: &str,
    is_async: bool,
) -> String {
    let qualifier = if is_async { "async " } else { "" };
    let mut lines = vec![format!("{qualifier}def {name}({}):", params.join(", "))];

    for statement in statements {
        lines.extend(render_statement(statement, source).into_iter().map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        }));
    }

    lines.join("\n")
}

/// The statement that replaces the extracted block.
pub fn render_call(name: &str, params: &[String], is_async: bool) -> String {
    let call = format!("{name}({})", params.join(", "));
    if is_async {
        format!("await {call}")
    } else {
        call
    }
}

/// Replace lines `start_line..=end_line` (1-based) with `call` at the first
/// line's indentation, then append a blank line and `extracted`.
pub fn patch_source(
    source: &str,
    start_line: usize,
    end_line: usize,
    call: &str,
    extracted: &str,
) -> String {
    let mut lines: Vec<String> = source.split('\n').map(str::to_string).collect();

    let start = start_line.saturating_sub(1).min(lines.len().saturating_sub(1));
    let end = end_line.saturating_sub(1).clamp(start, lines.len().saturating_sub(1));

    if let Some(first) = lines.get(start) {
        let call_line = format!("{}{}", leading_whitespace(first), call);
        lines.splice(start..=end, std::iter::once(call_line));
    }

    lines.push(String::new());
    lines.push(extracted.to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::python::parser::parse_source;
    use crate::analyzers::python::syntax::body_statements;
    use indoc::indoc;

    #[test]
    fn test_render_statement_dedents_continuation_lines() {
        let source = indoc! {"
            def f(items):
                for item in items:
                    if item:
                        print(item)
        "};
        let ast = parse_source(source, None).unwrap();
        let func = ast.root().named_child(0).unwrap();
        let body = body_statements(&func);

        assert_eq!(
            render_statement(&body[0], &ast.source),
            vec!["for item in items:", "    if item:", "        print(item)"]
        );
    }

    #[test]
    fn test_render_extracted_function() {
        let source = "def f(a, b):\n    total = a + b\n    total *= 2\n    return total\n";
        let ast = parse_source(source, None).unwrap();
        let func = ast.root().named_child(0).unwrap();
        let body = body_statements(&func);
        let params = vec!["a".to_string(), "b".to_string()];

        let code =
            render_extracted_function("calculate_total", &params, &body[..2], &ast.source, false);
        assert_eq!(
            code,
            "def calculate_total(a, b):\n    total = a + b\n    total *= 2"
        );

        let code =
            render_extracted_function("calculate_total", &[], &body[..1], &ast.source, true);
        assert_eq!(code, "async def calculate_total():\n    total = a + b");
    }

    #[test]
    fn test_render_call() {
        let params = vec!["x".to_string(), "y".to_string()];
        assert_eq!(render_call("step", &params, false), "step(x, y)");
        assert_eq!(render_call("step", &[], true), "await step()");
    }

    #[test]
    fn test_patch_source_replaces_range_and_appends() {
        let source = "def f(x):\n    a = x\n    b = a\n    c = b\n    return c\n";
        let patched = patch_source(source, 2, 3, "step(x)", "def step(x):\n    pass");

        assert_eq!(
            patched,
            "def f(x):\n    step(x)\n    c = b\n    return c\n\n\ndef step(x):\n    pass"
        );
    }

    #[test]
    fn test_patch_source_clamps_out_of_range_lines() {
        let patched = patch_source("a = 1", 1, 9, "go()", "def go():\n    pass");
        assert_eq!(patched, "go()\n\ndef go():\n    pass");
    }
}
