//! Hand-checkable game trees
//!
//! A [`FixtureTree`] is a small explicit graph of max, min and leaf nodes with labelled
//! edges. It runs the same pruning policy as the position search ("adopt strictly better,
//! tighten, stop once `beta <= alpha`") without any game rules underneath, so the values
//! and pruned edges can be checked by hand.
//!
//! [`FixtureTree::standard`] builds the reference tree:
//!
//! ```text
//!                       0 (max)
//!               L /             \ R
//!             1 (min)             2 (min)
//!         L /     \ R         L /     \ R
//!      3 (max)   4 (max)   5 (max)   6 (max)
//!       / \       / \       / \       / \
//!      3   5     6   9     1   2     0  -1
//! ```
//!
//! The leaves are nodes 7 to 14, left to right. The root is worth 5,
//! a full-window search prunes `(4, 10)` and `(2, 6)`, and the principal path runs
//! `0 -> 1 -> 3 -> 8`.

use crate::error::{FixtureError, FixtureResult};
use crate::score::{Score, Window};
use std::collections::{BTreeSet, HashMap};

pub type NodeId = usize;

/// `(parent, child)`
pub type Edge = (NodeId, NodeId);

/// Node 0 is always the root.
pub const ROOT: NodeId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Max,
    Min,
    Leaf(i32),
}

/// Number of leaves each algorithm has evaluated since the last reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationCount {
    pub minimax: u64,
    pub alpha_beta: u64,
}

#[derive(Debug, Clone)]
struct FixtureNode {
    role: NodeRole,
    value: Option<Score>,
    children: Vec<NodeId>,
    has_parent: bool,
}

#[derive(Debug, Clone)]
pub struct FixtureTree {
    nodes: Vec<FixtureNode>,
    labels: HashMap<Edge, String>,
    evaluations: EvaluationCount,
}

impl FixtureTree {
    pub fn builder() -> FixtureTreeBuilder {
        FixtureTreeBuilder::default()
    }

    /// The fifteen-node reference tree described in the module docs.
    pub fn standard() -> Self {
        let mut builder = Self::builder();
        let roles = [NodeRole::Max, NodeRole::Min, NodeRole::Min];
        for role in roles {
            builder.add_node(role);
        }
        for _ in 3..=6 {
            builder.add_node(NodeRole::Max);
        }
        for value in [3, 5, 6, 9, 1, 2, 0, -1] {
            builder.add_node(NodeRole::Leaf(value));
        }
        for parent in 0..=6 {
            builder.link(parent, 2 * parent + 1, "L");
            builder.link(parent, 2 * parent + 2, "R");
        }
        builder.finish()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn role(&self, node: NodeId) -> Option<NodeRole> {
        self.nodes.get(node).map(|n| n.role)
    }

    /// Value written by the last [`FixtureTree::minimax_value`] or [`FixtureTree::alpha_beta`]
    /// pass. Nodes a pruning pass never reached stay `None`.
    pub fn value(&self, node: NodeId) -> Option<Score> {
        self.nodes.get(node).and_then(|n| n.value)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn edge_label(&self, parent: NodeId, child: NodeId) -> Option<&str> {
        self.labels.get(&(parent, child)).map(String::as_str)
    }

    pub fn evaluations(&self) -> EvaluationCount {
        self.evaluations
    }

    pub fn reset_evaluations(&mut self) {
        self.evaluations = EvaluationCount::default();
    }

    /// Exhaustive minimax. Every visited node gets its value written back.
    pub fn minimax_value(&mut self, node: NodeId, maximizing: bool) -> FixtureResult<Score> {
        let (role, children) = self.expand(node)?;
        let value = match role {
            NodeRole::Leaf(value) => {
                self.evaluations.minimax += 1;
                Score::from_centipawns(value)
            }
            NodeRole::Max | NodeRole::Min => {
                let mut best = if maximizing {
                    Score::NEG_INFINITY
                } else {
                    Score::INFINITY
                };
                for child in children {
                    let value = self.minimax_value(child, !maximizing)?;
                    best = if maximizing {
                        best.max(value)
                    } else {
                        best.min(value)
                    };
                }
                best
            }
        };

        self.store(node, value);
        Ok(value)
    }

    /// Follow the first child whose stored value equals its parent's, down to a leaf.
    ///
    /// Needs a prior valuing pass; an unvalued node ends the path.
    pub fn best_path(&self, start: NodeId) -> Vec<Edge> {
        let mut path = Vec::new();
        let mut current = start;

        while let Some(value) = self.value(current) {
            let next = self
                .children(current)
                .iter()
                .copied()
                .find(|&child| self.value(child) == Some(value));
            match next {
                Some(child) => {
                    path.push((current, child));
                    current = child;
                }
                None => break,
            }
        }

        path
    }

    /// Alpha-beta over the tree. Skipped `(parent, sibling)` edges are added to `pruned`.
    ///
    /// Visited nodes get their (fail-hard) value written back, so [`FixtureTree::best_path`]
    /// works on the result the same way it does after minimax.
    pub fn alpha_beta(
        &mut self,
        node: NodeId,
        window: Window,
        maximizing: bool,
        pruned: &mut BTreeSet<Edge>,
    ) -> FixtureResult<Score> {
        let (role, children) = self.expand(node)?;
        if let NodeRole::Leaf(value) = role {
            self.evaluations.alpha_beta += 1;
            let value = Score::from_centipawns(value);
            self.store(node, value);
            return Ok(value);
        }

        let mut window = window;
        let mut best = if maximizing {
            Score::NEG_INFINITY
        } else {
            Score::INFINITY
        };

        for (index, &child) in children.iter().enumerate() {
            let value = self.alpha_beta(child, window, !maximizing, pruned)?;
            let improves = if maximizing {
                value > best
            } else {
                value < best
            };
            if improves {
                best = value;
            }

            window.tighten(best, maximizing);
            if window.is_closed() {
                pruned.extend(children[index + 1..].iter().map(|&sibling| (node, sibling)));
                break;
            }
        }

        self.store(node, best);
        Ok(best)
    }

    fn expand(&self, node: NodeId) -> FixtureResult<(NodeRole, Vec<NodeId>)> {
        self.nodes
            .get(node)
            .map(|n| (n.role, n.children.clone()))
            .ok_or(FixtureError::UnknownNode { node })
    }

    fn store(&mut self, node: NodeId, value: Score) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.value = Some(value);
        }
    }
}

/// Incremental construction of a [`FixtureTree`]
#[derive(Debug, Default)]
pub struct FixtureTreeBuilder {
    nodes: Vec<FixtureNode>,
    labels: HashMap<Edge, String>,
}

impl FixtureTreeBuilder {
    /// Node ids are handed out sequentially, starting at [`ROOT`].
    pub fn add_node(&mut self, role: NodeRole) -> NodeId {
        self.nodes.push(FixtureNode {
            role,
            value: None,
            children: Vec::new(),
            has_parent: false,
        });
        self.nodes.len() - 1
    }

    /// Children are visited in the order their edges were added.
    pub fn add_edge(
        &mut self,
        parent: NodeId,
        child: NodeId,
        label: impl Into<String>,
    ) -> FixtureResult<()> {
        let parent_role = self
            .nodes
            .get(parent)
            .map(|n| n.role)
            .ok_or(FixtureError::UnknownNode { node: parent })?;
        let child_node = self
            .nodes
            .get(child)
            .ok_or(FixtureError::UnknownNode { node: child })?;

        if matches!(parent_role, NodeRole::Leaf(_)) {
            return Err(FixtureError::LeafParent { node: parent });
        }
        if child == ROOT || child_node.has_parent {
            return Err(FixtureError::SecondParent { node: child });
        }

        self.link(parent, child, label);
        Ok(())
    }

    pub fn build(self) -> FixtureResult<FixtureTree> {
        if self.nodes.is_empty() {
            return Err(FixtureError::UnknownNode { node: ROOT });
        }
        if let Some(node) = self.nodes.iter().position(|n| {
            !matches!(n.role, NodeRole::Leaf(_)) && n.children.is_empty()
        }) {
            return Err(FixtureError::Childless { node });
        }
        Ok(self.finish())
    }

    fn link(&mut self, parent: NodeId, child: NodeId, label: impl Into<String>) {
        self.nodes[parent].children.push(child);
        self.nodes[child].has_parent = true;
        self.labels.insert((parent, child), label.into());
    }

    fn finish(self) -> FixtureTree {
        FixtureTree {
            nodes: self.nodes,
            labels: self.labels,
            evaluations: EvaluationCount::default(),
        }
    }
}
