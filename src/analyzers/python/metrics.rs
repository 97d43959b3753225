//! Single-pass metrics collection over a Python module.
//!
//! The walk emits enter/exit events for every node. Each function gets its
//! own frame on an explicit stack, so a nested function never disturbs the
//! nesting counter of the function that encloses it.

use crate::config::SmellThresholds;
use crate::core::ast::{node_end_line, node_line};
use crate::core::FunctionRecord;
use crate::debt::smells::analyze_function_smells;
use tree_sitter::Node;

use super::syntax::{
    function_name, import_name_count, is_async_function, parameter_names, SyntaxKind,
};

/// Output of one traversal: function records in pre-order plus the flat
/// import counter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedMetrics {
    pub functions: Vec<FunctionRecord>,
    pub import_count: usize,
}

struct FunctionFrame<'t> {
    slot: usize,
    node: Node<'t>,
    record: FunctionRecord,
    nesting: u32,
    max_nesting: u32,
}

#[derive(Default)]
struct TraversalState<'t> {
    frames: Vec<FunctionFrame<'t>>,
    slots: Vec<Option<FunctionRecord>>,
    import_count: usize,
}

pub struct MetricsCollector<'a> {
    source: &'a str,
    thresholds: &'a SmellThresholds,
}

impl<'a> MetricsCollector<'a> {
    pub fn new(source: &'a str, thresholds: &'a SmellThresholds) -> Self {
        Self { source, thresholds }
    }

    pub fn collect(&self, root: Node) -> CollectedMetrics {
        let mut state = TraversalState::default();
        let mut cursor = root.walk();

        'walk: loop {
            self.enter(cursor.node(), &mut state);
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                self.exit(cursor.node(), &mut state);
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }

        CollectedMetrics {
            functions: state.slots.into_iter().flatten().collect(),
            import_count: state.import_count,
        }
    }

    fn enter<'t>(&self, node: Node<'t>, state: &mut TraversalState<'t>) {
        let kind = SyntaxKind::of(&node);
        match kind {
            SyntaxKind::Function => {
                let mut record = FunctionRecord::new(
                    function_name(&node, self.source),
                    node_line(&node),
                    node_end_line(&node),
                );
                record.param_count = parameter_names(&node, self.source).len();
                record.is_async = is_async_function(&node);

                // Reserve the pre-order position now; the record is filled on exit.
                state.frames.push(FunctionFrame {
                    slot: state.slots.len(),
                    node,
                    record,
                    nesting: 0,
                    max_nesting: 0,
                });
                state.slots.push(None);
            }
            SyntaxKind::Import => state.import_count += import_name_count(&node),
            _ if kind.is_branch() || kind.is_structural_scope() => {
                if let Some(frame) = state.frames.last_mut() {
                    if kind.is_branch() {
                        frame.record.branch_count += 1;
                    }
                    frame.nesting += 1;
                    frame.max_nesting = frame.max_nesting.max(frame.nesting);
                }
            }
            _ => {}
        }
    }

    fn exit<'t>(&self, node: Node<'t>, state: &mut TraversalState<'t>) {
        let kind = SyntaxKind::of(&node);
        if kind == SyntaxKind::Function {
            if let Some(frame) = state.frames.pop() {
                let slot = frame.slot;
                let record = self.finalize(frame);
                state.slots[slot] = Some(record);
            }
        } else if kind.is_branch() || kind.is_structural_scope() {
            if let Some(frame) = state.frames.last_mut() {
                frame.nesting = frame.nesting.saturating_sub(scope_depth(&node, kind) as u32);
            }
        }
    }

    fn finalize(&self, frame: FunctionFrame) -> FunctionRecord {
        let mut record = frame.record;
        record.nesting_depth = frame.max_nesting;
        record.complexity = record.branch_count + 1;
        record.smells = analyze_function_smells(&record, frame.node, self.source, self.thresholds);
        tracing::trace!(
            function = %record.name,
            complexity = record.complexity,
            smells = record.smells.len(),
            "Collected function metrics"
        );
        record
    }
}

/// Levels a scope adds while open. Each `elif` opens one level below the
/// previous arm and stays open until its `if` statement closes.
fn scope_depth(node: &Node, kind: SyntaxKind) -> usize {
    match kind {
        SyntaxKind::ElseIf => 0,
        SyntaxKind::Conditional => {
            let mut cursor = node.walk();
            let elifs = node
                .named_children(&mut cursor)
                .filter(|child| SyntaxKind::of(child) == SyntaxKind::ElseIf)
                .count();
            1 + elifs
        }
        _ => 1,
    }
}
