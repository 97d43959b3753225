//! Def/use classification of names inside an extracted block.

use crate::analyzers::python::syntax::{walk_preorder, SyntaxKind};
use crate::core::ast::node_text;
use std::collections::BTreeSet;
use tree_sitter::Node;

/// Wrappers a binding target can sit inside (`a, (b, *c) = ...`).
const TARGET_WRAPPERS: &[&str] = &[
    "pattern_list",
    "tuple_pattern",
    "list_pattern",
    "list_splat_pattern",
    "list_splat",
    "parenthesized_expression",
    "tuple",
    "list",
    "expression_list",
];

/// Nodes whose identifiers declare parameters of a nested def or lambda.
const PARAMETER_CONTAINERS: &[&str] = &["parameters", "lambda_parameters"];

const PARAMETER_FORMS: &[&str] = &[
    "default_parameter",
    "typed_default_parameter",
    "typed_parameter",
    "list_splat_pattern",
    "dictionary_splat_pattern",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameUse {
    Defined,
    Referenced,
    /// Not a variable access: attribute names, keyword labels, def names,
    /// imports, declarations.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableFlow {
    pub defined: BTreeSet<String>,
    pub referenced: BTreeSet<String>,
}

impl VariableFlow {
    pub fn analyze(statements: &[Node], source: &str) -> Self {
        let mut flow = Self::default();
        for statement in statements {
            walk_preorder(*statement, |node| {
                if SyntaxKind::of(&node) != SyntaxKind::Identifier {
                    return;
                }
                let name = node_text(&node, source).to_string();
                match classify_identifier(&node) {
                    NameUse::Defined => {
                        flow.defined.insert(name);
                    }
                    NameUse::Referenced => {
                        flow.referenced.insert(name);
                    }
                    NameUse::Ignored => {}
                }
            });
        }
        flow
    }

    /// Names read in the block but never assigned in it.
    pub fn free_variables(&self) -> BTreeSet<String> {
        self.referenced.difference(&self.defined).cloned().collect()
    }

    /// Free variables that are declared parameters of the enclosing function,
    /// in declaration order.
    pub fn inbound_parameters(&self, declared: &[String]) -> Vec<String> {
        let free = self.free_variables();
        let mut params: Vec<String> = Vec::new();
        for name in declared {
            if free.contains(name) && !params.contains(name) {
                params.push(name.clone());
            }
        }
        params
    }
}

fn is_field<'t>(parent: &Node<'t>, field: &str, child: &Node<'t>) -> bool {
    parent
        .child_by_field_name(field)
        .is_some_and(|n| n.id() == child.id())
}

fn is_import_or_declaration(node: &Node) -> bool {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        match ancestor.kind() {
            "import_statement"
            | "import_from_statement"
            | "future_import_statement"
            | "global_statement"
            | "nonlocal_statement" => return true,
            "block" | "module" => return false,
            _ => current = ancestor.parent(),
        }
    }
    false
}

fn is_parameter_binding(node: &Node) -> bool {
    let mut child = *node;
    let mut current = node.parent();
    while let Some(parent) = current {
        if PARAMETER_CONTAINERS.contains(&parent.kind()) {
            return true;
        }
        if !PARAMETER_FORMS.contains(&parent.kind()) {
            return false;
        }
        // Only the declared name, never the default value or annotation.
        let is_name = match parent.kind() {
            "default_parameter" | "typed_default_parameter" => is_field(&parent, "name", &child),
            _ => parent.named_child(0).is_some_and(|n| n.id() == child.id()),
        };
        if !is_name {
            return false;
        }
        child = parent;
        current = parent.parent();
    }
    false
}

/// Decide whether one identifier node binds, reads, or is not a variable.
pub fn classify_identifier(node: &Node) -> NameUse {
    let Some(parent) = node.parent() else {
        return NameUse::Referenced;
    };

    match parent.kind() {
        "attribute" if is_field(&parent, "attribute", node) => return NameUse::Ignored,
        "keyword_argument" if is_field(&parent, "name", node) => return NameUse::Ignored,
        "function_definition" | "class_definition" if is_field(&parent, "name", node) => {
            return NameUse::Ignored
        }
        "as_pattern_target" => return NameUse::Defined,
        "except_clause" => {
            let after_as = node.prev_sibling().is_some_and(|prev| prev.kind() == "as");
            if after_as {
                return NameUse::Defined;
            }
        }
        _ => {}
    }

    if is_parameter_binding(node) || is_import_or_declaration(node) {
        return NameUse::Ignored;
    }

    // Climb out of destructuring wrappers to the construct that owns the target.
    let mut child = *node;
    let mut owner = parent;
    while TARGET_WRAPPERS.contains(&owner.kind()) {
        match owner.parent() {
            Some(next) => {
                child = owner;
                owner = next;
            }
            None => return NameUse::Referenced,
        }
    }

    let binds = match owner.kind() {
        "assignment" | "augmented_assignment" | "for_statement" | "for_in_clause" => {
            is_field(&owner, "left", &child)
        }
        "named_expression" => is_field(&owner, "name", &child),
        "as_pattern" => is_field(&owner, "alias", &child),
        _ => false,
    };

    if binds {
        NameUse::Defined
    } else {
        NameUse::Referenced
    }
}
