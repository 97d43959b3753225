use tree_sitter::{Node, Tree};

/// Label used when the caller does not name its input.
pub const DEFAULT_LABEL: &str = "<input>";

/// A parsed Python module: owned source text plus its syntax tree.
#[derive(Clone, Debug)]
pub struct PythonAst {
    pub tree: Tree,
    pub source: String,
    pub label: String,
}

impl PythonAst {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Get the last line a node occupies (1-indexed).
///
/// A node whose end position sits at column 0 of a later row only owns the
/// newline of the row before it.
pub fn node_end_line(node: &Node) -> usize {
    let start = node.start_position();
    let end = node.end_position();
    if end.column == 0 && end.row > start.row {
        end.row
    } else {
        end.row + 1
    }
}

/// Get the column number for a tree-sitter node (1-indexed)
pub fn node_column(node: &Node) -> usize {
    node.start_position().column + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn parse(source: &str) -> Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    #[test]
    fn test_node_text_and_lines() {
        let source = "x = 1\ny = 2\n";
        let tree = parse(source);
        let root = tree.root_node();
        let second = root.named_child(1).unwrap();

        assert_eq!(node_text(&second, source), "y = 2");
        assert_eq!(node_line(&second), 2);
        assert_eq!(node_end_line(&second), 2);
        assert_eq!(node_column(&second), 1);
    }

    #[test]
    fn test_multiline_end_line() {
        let source = "def f():\n    a = 1\n    return a\n";
        let tree = parse(source);
        let func = tree.root_node().named_child(0).unwrap();

        assert_eq!(node_line(&func), 1);
        assert_eq!(node_end_line(&func), 3);
    }
}
