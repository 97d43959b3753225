//! Node classification for the tree-sitter Python grammar.
//!
//! Every traversal in the crate dispatches on [`SyntaxKind`] instead of raw
//! grammar strings, so supporting a new construct means adding a variant and
//! a `match` arm in [`SyntaxKind::of`].

use crate::core::ast::node_text;
use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxKind {
    Function,
    Conditional,
    ElseIf,
    ForLoop,
    WhileLoop,
    Try,
    With,
    Import,
    Return,
    Raise,
    ExpressionStatement,
    Assignment,
    AugmentedAssignment,
    Call,
    Attribute,
    Identifier,
    Integer,
    Float,
    Boolean,
    Comment,
    Other,
}

impl SyntaxKind {
    pub fn of(node: &Node) -> Self {
        match node.kind() {
            "function_definition" => SyntaxKind::Function,
            "if_statement" => SyntaxKind::Conditional,
            "elif_clause" => SyntaxKind::ElseIf,
            "for_statement" => SyntaxKind::ForLoop,
            "while_statement" => SyntaxKind::WhileLoop,
            "try_statement" => SyntaxKind::Try,
            "with_statement" => SyntaxKind::With,
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                SyntaxKind::Import
            }
            "return_statement" => SyntaxKind::Return,
            "raise_statement" => SyntaxKind::Raise,
            "expression_statement" => SyntaxKind::ExpressionStatement,
            "assignment" => SyntaxKind::Assignment,
            "augmented_assignment" => SyntaxKind::AugmentedAssignment,
            "call" => SyntaxKind::Call,
            "attribute" => SyntaxKind::Attribute,
            "identifier" => SyntaxKind::Identifier,
            "integer" => SyntaxKind::Integer,
            "float" => SyntaxKind::Float,
            "true" | "false" => SyntaxKind::Boolean,
            "comment" => SyntaxKind::Comment,
            _ => SyntaxKind::Other,
        }
    }

    /// Decision points: conditionals and loops.
    pub fn is_branch(self) -> bool {
        matches!(
            self,
            SyntaxKind::Conditional
                | SyntaxKind::ElseIf
                | SyntaxKind::ForLoop
                | SyntaxKind::WhileLoop
        )
    }

    /// Exception and resource scopes add depth without a decision point.
    pub fn is_structural_scope(self) -> bool {
        matches!(self, SyntaxKind::Try | SyntaxKind::With)
    }

    pub fn is_loop(self) -> bool {
        matches!(self, SyntaxKind::ForLoop | SyntaxKind::WhileLoop)
    }
}

const STATEMENT_KINDS: &[&str] = &[
    "expression_statement",
    "return_statement",
    "pass_statement",
    "break_statement",
    "continue_statement",
    "delete_statement",
    "raise_statement",
    "assert_statement",
    "global_statement",
    "nonlocal_statement",
    "import_statement",
    "import_from_statement",
    "future_import_statement",
    "type_alias_statement",
    "if_statement",
    "elif_clause",
    "for_statement",
    "while_statement",
    "try_statement",
    "with_statement",
    "match_statement",
    "function_definition",
    "class_definition",
];

pub fn is_statement(node: &Node) -> bool {
    STATEMENT_KINDS.contains(&node.kind())
}

/// Pre-order walk over `node` and all of its descendants.
pub fn walk_preorder<'t>(node: Node<'t>, mut visit: impl FnMut(Node<'t>)) {
    let mut cursor = node.walk();
    loop {
        visit(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// True when any node in the subtree (root included) satisfies `predicate`.
pub fn any_descendant(node: Node, predicate: impl Fn(&Node) -> bool) -> bool {
    let mut found = false;
    walk_preorder(node, |n| {
        if !found && predicate(&n) {
            found = true;
        }
    });
    found
}

/// Number of statements nested anywhere below `node`.
pub fn count_statements(node: Node) -> usize {
    let mut count = 0;
    walk_preorder(node, |n| {
        if n.id() != node.id() && is_statement(&n) {
            count += 1;
        }
    });
    count
}

/// `async def` is a `function_definition` whose first token is `async`.
pub fn is_async_function(node: &Node) -> bool {
    node.child(0).is_some_and(|first| first.kind() == "async")
}

pub fn function_name(node: &Node, source: &str) -> String {
    node.child_by_field_name("name")
        .map(|name| node_text(&name, source).to_string())
        .unwrap_or_else(|| "<anonymous>".to_string())
}

/// Top-level statements of a function body, comments excluded.
pub fn body_statements<'t>(function: &Node<'t>) -> Vec<Node<'t>> {
    let Some(body) = function.child_by_field_name("body") else {
        return Vec::new();
    };
    let mut cursor = body.walk();
    let statements = body
        .named_children(&mut cursor)
        .filter(|child| SyntaxKind::of(child) != SyntaxKind::Comment)
        .collect();
    statements
}

/// Positional-or-keyword parameter names in order.
///
/// Positional-only parameters (before `/`) and everything from the first
/// `*`, `*args` or `**kwargs` onwards are left out.
pub fn parameter_names(function: &Node, source: &str) -> Vec<String> {
    let Some(parameters) = function.child_by_field_name("parameters") else {
        return Vec::new();
    };
    let mut names = Vec::new();
    let mut cursor = parameters.walk();
    for param in parameters.named_children(&mut cursor) {
        match param.kind() {
            "positional_separator" => names.clear(),
            "keyword_separator" | "list_splat_pattern" | "dictionary_splat_pattern" => break,
            _ => names.extend(
                parameter_binding(&param).map(|ident| node_text(&ident, source).to_string()),
            ),
        }
    }
    names
}

fn parameter_binding<'t>(param: &Node<'t>) -> Option<Node<'t>> {
    match param.kind() {
        "identifier" => Some(*param),
        "default_parameter" | "typed_default_parameter" => param
            .child_by_field_name("name")
            .and_then(|name| parameter_binding(&name)),
        "typed_parameter" => {
            let mut cursor = param.walk();
            let first = param.named_children(&mut cursor).next();
            first.and_then(|inner| parameter_binding(&inner))
        }
        _ => None,
    }
}

/// Names introduced by one import statement.
pub fn import_name_count(node: &Node) -> usize {
    let mut cursor = node.walk();
    let named = node.children_by_field_name("name", &mut cursor).count();
    if named > 0 {
        return named;
    }
    let mut cursor = node.walk();
    let has_wildcard = node
        .named_children(&mut cursor)
        .any(|child| child.kind() == "wildcard_import");
    usize::from(has_wildcard)
}

/// The node wrapped by an expression statement, or the node itself.
pub fn unwrap_expression_statement<'t>(node: &Node<'t>) -> Node<'t> {
    if SyntaxKind::of(node) == SyntaxKind::ExpressionStatement {
        if let Some(inner) = node.named_child(0) {
            return inner;
        }
    }
    *node
}
