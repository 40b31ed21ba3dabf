//! Search tracing for visualization
//!
//! [`record_trace`] runs the same pruning policy as [`AlphaBeta`](super::AlphaBeta) over a
//! narrow slice of the tree (the top [`TRACE_WIDTH`] ordered moves per node) and keeps every
//! decision: the window each node was entered with, its value, and which siblings a cutoff
//! skipped. Skipped siblings stay in the tree as [`TraceKind::Pruned`] placeholders.
//!
//! Node ids are handed out in creation order, so identical inputs produce identical traces.

use super::make_unmake::Played;
use super::ordering::order_moves;
use crate::constants::{BREADTH_LIMIT_DEPTH, TRACE_WIDTH};
use crate::evaluation::evaluate;
use crate::position::{ChessMove, Position};
use crate::score::{Score, Window};
use serde::Serialize;

/// What became of a traced node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceKind {
    Leaf { value: Score },
    Internal { value: Score, children: Vec<TraceNode> },
    /// Never explored, so it has no value.
    Pruned,
}

/// One node of a recorded search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceNode {
    pub id: usize,
    /// Move leading here; `None` at the root.
    pub move_label: Option<String>,
    pub alpha: Score,
    pub beta: Score,
    #[serde(flatten)]
    pub kind: TraceKind,
}

impl TraceNode {
    pub fn value(&self) -> Option<Score> {
        match &self.kind {
            TraceKind::Leaf { value } | TraceKind::Internal { value, .. } => Some(*value),
            TraceKind::Pruned => None,
        }
    }

    pub fn children(&self) -> &[TraceNode] {
        match &self.kind {
            TraceKind::Internal { children, .. } => children.as_slice(),
            TraceKind::Leaf { .. } | TraceKind::Pruned => &[],
        }
    }

    pub fn is_pruned(&self) -> bool {
        matches!(self.kind, TraceKind::Pruned)
    }

    /// Explored nodes in this subtree, this one included.
    pub fn explored_count(&self) -> usize {
        let own = usize::from(!self.is_pruned());
        own + self.children().iter().map(TraceNode::explored_count).sum::<usize>()
    }

    /// Pruned placeholders in this subtree.
    pub fn pruned_count(&self) -> usize {
        let own = usize::from(self.is_pruned());
        own + self.children().iter().map(TraceNode::pruned_count).sum::<usize>()
    }

    /// Structural equality ignoring node ids.
    pub fn same_shape(&self, other: &TraceNode) -> bool {
        self.move_label == other.move_label
            && self.alpha == other.alpha
            && self.beta == other.beta
            && self.value() == other.value()
            && self.is_pruned() == other.is_pruned()
            && self.children().len() == other.children().len()
            && self
                .children()
                .iter()
                .zip(other.children())
                .all(|(a, b)| a.same_shape(b))
    }
}

/// A recorded search and the root move it settled on
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTrace<M> {
    pub root: TraceNode,
    pub best_move: Option<M>,
}

impl<M> SearchTrace<M> {
    pub fn value(&self) -> Option<Score> {
        self.root.value()
    }
}

/// Trace a `depth`-ply search from `pos`.
pub fn record_trace<P: Position>(
    pos: &mut P,
    depth: u32,
    maximizing: bool,
) -> SearchTrace<P::Move> {
    let mut recorder = Recorder::default();
    let (root, root_value) = recorder.record(pos, None, depth, Window::FULL, maximizing);

    // Children were created in this same order, pruned ones after the explored ones
    let root_moves = traced_moves(pos, depth);
    let best_move = root
        .children()
        .iter()
        .zip(root_moves)
        .find(|(child, _)| !child.is_pruned() && child.value() == Some(root_value))
        .map(|(_, mv)| mv);

    SearchTrace { root, best_move }
}

fn traced_moves<P: Position>(pos: &mut P, depth: u32) -> Vec<P::Move> {
    if depth == 0 || pos.terminal_status().is_terminal() {
        return Vec::new();
    }
    let mut moves = order_moves(pos, depth < BREADTH_LIMIT_DEPTH);
    moves.truncate(TRACE_WIDTH);
    moves
}

#[derive(Default)]
struct Recorder {
    next_id: usize,
}

impl Recorder {
    fn allocate_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn record<P: Position>(
        &mut self,
        pos: &mut P,
        move_label: Option<String>,
        depth: u32,
        entry: Window,
        maximizing: bool,
    ) -> (TraceNode, Score) {
        let id = self.allocate_id();
        let moves = traced_moves(pos, depth);

        if moves.is_empty() {
            let value = evaluate(pos);
            let node = TraceNode {
                id,
                move_label,
                alpha: entry.alpha,
                beta: entry.beta,
                kind: TraceKind::Leaf { value },
            };
            return (node, value);
        }

        let mut window = entry;
        let mut best_value = if maximizing {
            Score::NEG_INFINITY
        } else {
            Score::INFINITY
        };
        let mut children = Vec::with_capacity(moves.len());

        for (index, mv) in moves.iter().enumerate() {
            let (child, value) = {
                let mut played = Played::new(pos, mv);
                self.record(&mut *played, Some(mv.uci()), depth - 1, window, !maximizing)
            };
            children.push(child);

            let improves = if maximizing {
                value > best_value
            } else {
                value < best_value
            };
            if improves {
                best_value = value;
            }

            window.tighten(best_value, maximizing);
            if window.is_closed() {
                for skipped in &moves[index + 1..] {
                    children.push(TraceNode {
                        id: self.allocate_id(),
                        move_label: Some(skipped.uci()),
                        alpha: window.alpha,
                        beta: window.beta,
                        kind: TraceKind::Pruned,
                    });
                }
                break;
            }
        }

        let node = TraceNode {
            id,
            move_label,
            alpha: entry.alpha,
            beta: entry.beta,
            kind: TraceKind::Internal {
                value: best_value,
                children,
            },
        };
        (node, best_value)
    }
}
