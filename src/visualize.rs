//! One-shot `draw` mode
//!
//! Records a narrow alpha-beta search from a fixed position, prints a short summary, and
//! writes the trace as a Graphviz file. PNG rendering is attempted when Graphviz is
//! installed; otherwise the command to run by hand is printed.
//!
//! [`draw_fixture`] does the same for the hand-checkable fixture tree, in three stages: the
//! bare tree, the minimax result, and the alpha-beta result with its pruned edges.

use crate::config::EngineSettings;
use crate::render::{render_dot, render_fixture_dot, try_render_png};
use anyhow::Context;
use search_kernel::fixture::{Edge, ROOT};
use search_kernel::{
    record_trace, ChessBoard, ChessMove, FixtureTree, Position, Score, TraceNode, Window,
};
use serde::Serialize;
use shakmaty::Color;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct DrawOptions {
    pub depth: u32,
    pub fen: String,
    pub output: PathBuf,
    /// Also dump the trace as JSON here.
    pub json: Option<PathBuf>,
    pub render_image: bool,
}

impl DrawOptions {
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self {
            depth: settings.trace_depth,
            fen: settings.trace_fen.clone(),
            output: settings.trace_output.clone(),
            json: None,
            render_image: true,
        }
    }
}

/// What happened to the PNG step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Rendered(PathBuf),
    /// Graphviz is not installed.
    Unavailable,
    /// Rendering was turned off.
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawReport {
    pub value: Option<Score>,
    pub best_move: Option<String>,
    pub dot_path: PathBuf,
    pub image: ImageOutcome,
}

#[derive(Serialize)]
struct TraceDump<'a> {
    fen: &'a str,
    depth: u32,
    value: Option<Score>,
    best_move: Option<&'a str>,
    root: &'a TraceNode,
}

/// Run the draw mode, printing the summary to `out`.
pub fn draw<W: Write>(options: &DrawOptions, out: &mut W) -> anyhow::Result<DrawReport> {
    let mut board = ChessBoard::from_fen(&options.fen)?;
    let maximizing = board.side_to_move() == Color::White;

    info!(
        "[DRAW] Tracing depth {} from {}",
        options.depth, options.fen
    );
    let trace = record_trace(&mut board, options.depth, maximizing);
    let best_move = trace.best_move.as_ref().map(|mv| mv.uci());
    let value = trace.value();

    writeln!(out, "=== Minimax Tree Visualization ===")?;
    writeln!(
        out,
        "Root Evaluation: {}",
        value.map_or_else(|| "None".to_string(), |v| v.to_string())
    )?;
    writeln!(
        out,
        "Chosen best move: {}",
        best_move.as_deref().unwrap_or("None")
    )?;
    info!(
        "[DRAW] {} explored nodes, {} pruned",
        trace.root.explored_count(),
        trace.root.pruned_count()
    );

    let dot = render_dot(&trace.root, best_move.as_deref());
    fs::write(&options.output, dot)
        .with_context(|| format!("failed to write {}", options.output.display()))?;
    writeln!(out, "Dot file created: {}", options.output.display())?;

    if let Some(json_path) = &options.json {
        let dump = TraceDump {
            fen: &options.fen,
            depth: options.depth,
            value,
            best_move: best_move.as_deref(),
            root: &trace.root,
        };
        write_json(json_path, &dump)?;
        writeln!(out, "Trace JSON created: {}", json_path.display())?;
    }

    let image = render_image(out, &options.output, options.render_image)?;

    Ok(DrawReport {
        value,
        best_move,
        dot_path: options.output.clone(),
        image,
    })
}

/// File stems and graph titles of the three fixture renderings, in output order.
pub const FIXTURE_STAGES: [&str; 3] = ["Initial_Game_Tree", "Minimax_Result", "AlphaBeta_Result"];

#[derive(Debug, Clone, PartialEq)]
pub struct FixtureReport {
    pub minimax_value: Score,
    pub alpha_beta_value: Score,
    pub pruned: BTreeSet<Edge>,
    pub minimax_path: Vec<Edge>,
    pub alpha_beta_path: Vec<Edge>,
    /// One per entry of [`FIXTURE_STAGES`].
    pub dot_paths: Vec<PathBuf>,
}

/// Solve the fixture tree both ways and write each stage as `<dir>/<stage>.dot`.
pub fn draw_fixture<W: Write>(
    dir: &Path,
    render_images: bool,
    out: &mut W,
) -> anyhow::Result<FixtureReport> {
    let initial = FixtureTree::standard();

    let mut minimax = FixtureTree::standard();
    let minimax_value = minimax.minimax_value(ROOT, true)?;
    let minimax_path = minimax.best_path(ROOT);

    let mut alpha_beta = FixtureTree::standard();
    let mut pruned = BTreeSet::new();
    let alpha_beta_value = alpha_beta.alpha_beta(ROOT, Window::FULL, true, &mut pruned)?;
    let alpha_beta_path = alpha_beta.best_path(ROOT);

    writeln!(out, "=== Fixture Tree Visualization ===")?;
    writeln!(out, "Minimax value at root: {minimax_value}")?;
    writeln!(out, "Minimax best path: {}", format_path(&minimax_path))?;
    writeln!(out, "Alpha-Beta value at root: {alpha_beta_value}")?;
    writeln!(out, "Pruned edges: {}", format_edges(&pruned))?;
    writeln!(out, "Alpha-Beta best path: {}", format_path(&alpha_beta_path))?;
    info!(
        "[DRAW] Fixture leaves evaluated: {} by minimax, {} by alpha-beta",
        minimax.evaluations().minimax,
        alpha_beta.evaluations().alpha_beta
    );

    let no_pruning = BTreeSet::new();
    let stages = [
        (&initial, &[][..], &no_pruning),
        (&minimax, &minimax_path[..], &no_pruning),
        (&alpha_beta, &alpha_beta_path[..], &pruned),
    ];

    let mut dot_paths = Vec::with_capacity(FIXTURE_STAGES.len());
    for (title, (tree, path, pruned)) in FIXTURE_STAGES.iter().zip(stages) {
        let dot_path = dir.join(format!("{title}.dot"));
        fs::write(&dot_path, render_fixture_dot(tree, title, path, pruned))
            .with_context(|| format!("failed to write {}", dot_path.display()))?;
        writeln!(out, "Dot file created: {}", dot_path.display())?;
        render_image(out, &dot_path, render_images)?;
        dot_paths.push(dot_path);
    }

    Ok(FixtureReport {
        minimax_value,
        alpha_beta_value,
        pruned,
        minimax_path,
        alpha_beta_path,
        dot_paths,
    })
}

/// `0 -> 1 -> 3`; an empty path is just the root.
fn format_path(path: &[Edge]) -> String {
    let mut nodes = vec![path.first().map_or(ROOT, |&(parent, _)| parent).to_string()];
    nodes.extend(path.iter().map(|&(_, child)| child.to_string()));
    nodes.join(" -> ")
}

fn format_edges(edges: &BTreeSet<Edge>) -> String {
    if edges.is_empty() {
        return "None".to_string();
    }
    edges
        .iter()
        .map(|(parent, child)| format!("({parent}, {child})"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// PNG step shared by both modes.
fn render_image<W: Write>(out: &mut W, dot: &Path, enabled: bool) -> anyhow::Result<ImageOutcome> {
    let png = dot.with_extension("png");
    if !enabled {
        print_manual_command(out, dot, &png)?;
        return Ok(ImageOutcome::Skipped);
    }
    if try_render_png(dot, &png)? {
        writeln!(out, "Image created: {}", png.display())?;
        Ok(ImageOutcome::Rendered(png))
    } else {
        warn!("[DRAW] Graphviz is not installed, skipping image rendering");
        print_manual_command(out, dot, &png)?;
        Ok(ImageOutcome::Unavailable)
    }
}

fn write_json(path: &Path, dump: &TraceDump<'_>) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, dump)?;
    writer.flush()?;
    Ok(())
}

fn print_manual_command<W: Write>(out: &mut W, dot: &Path, png: &Path) -> anyhow::Result<()> {
    writeln!(out, "Use: dot -Tpng {} -o {}", dot.display(), png.display())?;
    Ok(())
}
