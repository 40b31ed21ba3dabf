//! Graphviz serialization of fixture trees
//!
//! Internal nodes are ellipses labelled with their id, role and stored value; leaves are
//! green boxes. An optional path is drawn thick and blue, pruned edges dashed red.

use search_kernel::fixture::{Edge, FixtureTree, NodeRole};
use search_kernel::Score;
use std::collections::BTreeSet;
use std::fmt::Write as _;

const INTERNAL_FILL: &str = "lightblue";
const LEAF_FILL: &str = "lightgreen";
const PATH_EDGE: &str = "blue";
const PRUNED_EDGE: &str = "red";

/// Render `tree` as a `digraph` titled `title`.
pub fn render_fixture_dot(
    tree: &FixtureTree,
    title: &str,
    path: &[Edge],
    pruned: &BTreeSet<Edge>,
) -> String {
    let mut dot = String::new();
    dot.push_str("digraph FixtureTree {\n");
    dot.push_str("    rankdir=TB;\n");
    let _ = writeln!(dot, "    label=\"{}\";", title.replace('"', "\\\""));

    for node in 0..tree.len() {
        let Some(role) = tree.role(node) else {
            continue;
        };
        let (shape, fill) = match role {
            NodeRole::Leaf(_) => ("box", LEAF_FILL),
            NodeRole::Max | NodeRole::Min => ("ellipse", INTERNAL_FILL),
        };
        let _ = writeln!(
            dot,
            "    \"{}\" [label=\"{}\", shape={}, style=filled, fillcolor={}];",
            node,
            node_label(tree, node, role),
            shape,
            fill
        );
    }

    for parent in 0..tree.len() {
        for &child in tree.children(parent) {
            let edge = (parent, child);
            let label = tree.edge_label(parent, child).unwrap_or("");
            let style = if pruned.contains(&edge) {
                format!(", color={PRUNED_EDGE}, style=dashed, penwidth=2")
            } else if path.contains(&edge) {
                format!(", color={PATH_EDGE}, penwidth=3")
            } else {
                String::new()
            };
            let _ = writeln!(
                dot,
                "    \"{}\" -> \"{}\" [label=\"{}\"{}];",
                parent, child, label, style
            );
        }
    }

    dot.push_str("}\n");
    dot
}

/// Leaves always show their static value; internal nodes only once a pass has valued them.
fn node_label(tree: &FixtureTree, node: usize, role: NodeRole) -> String {
    let (kind, value) = match role {
        NodeRole::Max => ("MAX", tree.value(node)),
        NodeRole::Min => ("MIN", tree.value(node)),
        NodeRole::Leaf(value) => ("LEAF", Some(Score::from_centipawns(value))),
    };
    match value {
        Some(value) => format!("{node}\\n{kind}\\nvalue={value}"),
        None => format!("{node}\\n{kind}"),
    }
}
