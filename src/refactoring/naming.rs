use crate::analyzers::python::syntax::{
    any_descendant, unwrap_expression_statement, walk_preorder, SyntaxKind,
};
use crate::core::ast::node_text;
use std::collections::HashSet;
use tree_sitter::Node;
use uuid::Uuid;

/// Calls too common to say anything about what a block does
const BUILTIN_CALLS: &[&str] = &[
    "print", "len", "range", "str", "int", "float", "bool", "list", "dict", "set", "tuple",
    "append", "extend", "format", "isinstance", "enumerate", "zip", "super", "get", "items",
    "keys", "values", "sorted", "min", "max", "sum", "open",
];

const MIN_TOKEN_LEN: usize = 3;
const MAX_NAME_TOKENS: usize = 2;
const COLLISION_SUFFIX: &str = "_block";
const RANDOM_PREFIX: &str = "extracted_";
const RANDOM_SUFFIX_LEN: usize = 8;

/// Derives a name for an extracted block from what its statements do.
pub struct ExtractedNameInferrer<'a> {
    source: &'a str,
    taken: &'a HashSet<String>,
}

impl<'a> ExtractedNameInferrer<'a> {
    /// `taken` holds every identifier already used in the module.
    pub fn new(source: &'a str, taken: &'a HashSet<String>) -> Self {
        Self { source, taken }
    }

    pub fn infer_name(&self, statements: &[Node]) -> String {
        let tokens = self.keyword_tokens(statements);
        let parts: Vec<&str> = tokens
            .iter()
            .map(String::as_str)
            .filter(|token| is_name_token(token))
            .fold(Vec::new(), |mut acc, token| {
                if acc.len() < MAX_NAME_TOKENS && !acc.contains(&token) {
                    acc.push(token);
                }
                acc
            });

        if !parts.is_empty() {
            return self.avoid_collision(parts.join("_"));
        }

        match generic_name(statements) {
            Some(name) => self.avoid_collision(name.to_string()),
            None => random_name(),
        }
    }

    /// Statement keywords and called names, in source order.
    pub fn keyword_tokens(&self, statements: &[Node]) -> Vec<String> {
        let mut tokens = Vec::new();
        for statement in statements {
            if let Some(keyword) = self.statement_keyword(statement) {
                tokens.push(keyword);
            }
            tokens.extend(self.called_names(*statement));
        }
        tokens
    }

    fn statement_keyword(&self, statement: &Node) -> Option<String> {
        let node = unwrap_expression_statement(statement);
        match SyntaxKind::of(&node) {
            SyntaxKind::ForLoop => {
                let var = node
                    .child_by_field_name("left")
                    .filter(|left| SyntaxKind::of(left) == SyntaxKind::Identifier)
                    .map(|left| node_text(&left, self.source))
                    .filter(|name| !name.starts_with('_'));
                Some(match var {
                    Some(name) => format!("process_{name}"),
                    None => "loop".to_string(),
                })
            }
            SyntaxKind::WhileLoop => Some("loop".to_string()),
            SyntaxKind::Conditional => {
                let exits = node.child_by_field_name("consequence").is_some_and(|body| {
                    any_descendant(body, |n| {
                        matches!(SyntaxKind::of(n), SyntaxKind::Return | SyntaxKind::Raise)
                    })
                });
                Some(if exits { "validate" } else { "check" }.to_string())
            }
            SyntaxKind::Assignment | SyntaxKind::AugmentedAssignment => {
                let target = node.child_by_field_name("left")?;
                let name = match SyntaxKind::of(&target) {
                    SyntaxKind::Identifier => Some(node_text(&target, self.source)),
                    SyntaxKind::Attribute => target
                        .child_by_field_name("attribute")
                        .map(|attr| node_text(&attr, self.source)),
                    _ => None,
                };
                name.map(|n| format!("calculate_{n}"))
            }
            SyntaxKind::Return => Some("compute_result".to_string()),
            _ => None,
        }
    }

    fn called_names(&self, statement: Node) -> Vec<String> {
        let mut names = Vec::new();
        walk_preorder(statement, |node| {
            if SyntaxKind::of(&node) != SyntaxKind::Call {
                return;
            }
            let Some(function) = node.child_by_field_name("function") else {
                return;
            };
            let callee = match SyntaxKind::of(&function) {
                SyntaxKind::Identifier => Some(function),
                SyntaxKind::Attribute => function.child_by_field_name("attribute"),
                _ => None,
            };
            if let Some(callee) = callee {
                let name = node_text(&callee, self.source);
                if !BUILTIN_CALLS.contains(&name) {
                    names.push(name.to_string());
                }
            }
        });
        names
    }

    fn avoid_collision(&self, mut name: String) -> String {
        while self.taken.contains(&name) {
            name.push_str(COLLISION_SUFFIX);
        }
        name
    }
}

fn is_name_token(token: &str) -> bool {
    token.chars().count() >= MIN_TOKEN_LEN && !token.starts_with('_')
}

/// Fallback from the kinds of statements alone.
pub fn generic_name(statements: &[Node]) -> Option<&'static str> {
    let kinds: Vec<SyntaxKind> = statements
        .iter()
        .map(|s| SyntaxKind::of(&unwrap_expression_statement(s)))
        .collect();

    if kinds.iter().any(|k| k.is_loop()) {
        Some("process_loop_logic")
    } else if kinds.contains(&SyntaxKind::Conditional) {
        Some("validate_conditions")
    } else if kinds
        .iter()
        .any(|k| matches!(k, SyntaxKind::Assignment | SyntaxKind::AugmentedAssignment))
    {
        Some("calculate_values")
    } else {
        None
    }
}

/// Last resort: unique but meaningless.
pub fn random_name() -> String {
    let id = Uuid::new_v4().simple().to_string();
    let suffix: String = id.chars().take(RANDOM_SUFFIX_LEN).collect();
    format!("{RANDOM_PREFIX}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::python::parser::parse_source;
    use crate::analyzers::python::syntax::body_statements;

    fn name_for(source: &str, taken: &[&str]) -> String {
        let ast = parse_source(source, None).unwrap();
        let func = ast.root().named_child(0).unwrap();
        let body = body_statements(&func);
        let taken: HashSet<String> = taken.iter().map(|s| s.to_string()).collect();
        ExtractedNameInferrer::new(&ast.source, &taken).infer_name(&body)
    }

    #[test]
    fn test_loop_variable_and_call() {
        let source = "def f(orders):\n    for order in orders:\n        ship(order)\n";
        assert_eq!(name_for(source, &[]), "process_order_ship");
    }

    #[test]
    fn test_conditional_with_exit_is_validate() {
        let source = "def f(x):\n    if x is None:\n        raise ValueError('x')\n";
        assert_eq!(name_for(source, &[]), "validate_ValueError");
    }

    #[test]
    fn test_conditional_without_exit_is_check() {
        let source = "def f(x):\n    if x:\n        x = 2\n";
        assert_eq!(name_for(source, &[]), "check");
    }

    #[test]
    fn test_assignment_and_builtins_skipped() {
        let source = "def f(items):\n    total = sum(items)\n    count = len(items)\n";
        assert_eq!(name_for(source, &[]), "calculate_total_calculate_count");
    }

    #[test]
    fn test_private_assignment_target_keeps_underscore() {
        let source = "def f(x):\n    _x = x + 1\n";
        assert_eq!(name_for(source, &[]), "calculate__x");
    }

    #[test]
    fn test_attribute_calls_use_method_name() {
        let source = "def f(db):\n    db.session.commit()\n    db.refresh()\n";
        assert_eq!(name_for(source, &[]), "commit_refresh");
    }

    #[test]
    fn test_short_and_private_tokens_filtered() {
        let source = "def f(x):\n    go(x)\n    _hidden(x)\n    run(x)\n";
        assert_eq!(name_for(source, &[]), "run");
    }

    #[test]
    fn test_collision_gets_suffix() {
        let source = "def f(x):\n    while x:\n        x -= 1\n";
        assert_eq!(name_for(source, &["loop"]), "loop_block");
    }

    #[test]
    fn test_generic_fallback_for_unnamed_assignment() {
        let source = "def f(x):\n    a, b = x\n    print(a)\n";
        assert_eq!(name_for(source, &[]), "calculate_values");
    }

    #[test]
    fn test_random_fallback_shape() {
        let source = "def f(x):\n    print(x)\n    pass\n";
        let name = name_for(source, &[]);
        assert!(name.starts_with("extracted_"));
        assert_eq!(name.len(), "extracted_".len() + 8);
        assert!(name["extracted_".len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }
}
