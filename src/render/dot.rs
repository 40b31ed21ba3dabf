//! Graphviz serialization of search traces
//!
//! Every node is a box labelled with the move that reached it, its value and the window it
//! was searched with. Pruned placeholders are filled light gray and the edges into them are
//! red.

use search_kernel::TraceNode;
use std::fmt::Write as _;
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::debug;

const PRUNED_FILL: &str = "lightgray";
const EXPLORED_FILL: &str = "white";
const PRUNED_EDGE: &str = "red";

/// Render a trace as a `digraph`.
pub fn render_dot(root: &TraceNode, best_move: Option<&str>) -> String {
    let mut dot = String::new();
    dot.push_str("digraph MinimaxTree {\n");
    dot.push_str("    rankdir=TB;\n");

    let value = root.value().map_or_else(|| "None".to_string(), |v| v.to_string());
    let _ = writeln!(
        dot,
        "    label=\"{}\";",
        escape(&format!(
            "Final Minimax Value: {} | Best Move: {}",
            value,
            best_move.unwrap_or("None")
        ))
    );

    write_node(&mut dot, root, None);
    dot.push_str("}\n");
    dot
}

fn write_node(dot: &mut String, node: &TraceNode, parent: Option<usize>) {
    let fill = if node.is_pruned() {
        PRUNED_FILL
    } else {
        EXPLORED_FILL
    };
    let _ = writeln!(
        dot,
        "    \"{}\" [label=\"{}\", shape=box, style=filled, fillcolor={}];",
        node.id,
        escape(&node_label(node)),
        fill
    );

    if let Some(parent) = parent {
        let label = escape(node.move_label.as_deref().unwrap_or(""));
        if node.is_pruned() {
            let _ = writeln!(
                dot,
                "    \"{}\" -> \"{}\" [label=\"{}\", color={}];",
                parent, node.id, label, PRUNED_EDGE
            );
        } else {
            let _ = writeln!(dot, "    \"{}\" -> \"{}\" [label=\"{}\"];", parent, node.id, label);
        }
    }

    for child in node.children() {
        write_node(dot, child, Some(node.id));
    }
}

fn node_label(node: &TraceNode) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(mv) = &node.move_label {
        parts.push(format!("move={mv}"));
    }
    if let Some(value) = node.value() {
        parts.push(format!("score={value}"));
    }
    parts.push(format!("alpha={}, beta={}", node.alpha, node.beta));
    parts.join("\n")
}

/// Quote-safe DOT string contents; newlines become `\n` escapes.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Run `dot -Tpng`. `Ok(false)` means Graphviz is not installed.
pub fn try_render_png(dot_path: &Path, png_path: &Path) -> io::Result<bool> {
    let status = Command::new("dot")
        .arg("-Tpng")
        .arg(dot_path)
        .arg("-o")
        .arg(png_path)
        .status();

    match status {
        Ok(status) if status.success() => Ok(true),
        Ok(status) => Err(io::Error::other(format!("dot exited with {status}"))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("[DRAW] Graphviz 'dot' not found on PATH");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
