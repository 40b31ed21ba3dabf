use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use minimax_uci::visualize::{self, DrawOptions};
use minimax_uci::{EngineSettings, Session};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// UCI chess engine. Reads commands on stdin and replies on stdout.
#[derive(Parser, Debug)]
#[command(name = "minimax-uci", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<SubCommands>,

    /// JSON settings file
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Deepest iteration to search [default: 3]
    #[arg(long)]
    depth: Option<u32>,

    /// Time budget in seconds, checked between iterations [default: 1.0]
    #[arg(long, value_name = "SECS")]
    time: Option<f64>,

    /// Seed for the random fallback move
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum SubCommands {
    /// Trace a search and write it as a Graphviz graph
    Draw {
        /// Plies to trace [default: 4]
        #[arg(long)]
        depth: Option<u32>,

        /// Position to trace [default: Queen's Gambit Declined]
        #[arg(long)]
        fen: Option<String>,

        /// DOT output file [default: minimax_tree.dot]
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also write the trace as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// Do not invoke Graphviz
        #[arg(long)]
        no_image: bool,

        /// Draw the fixed fifteen-node fixture tree instead, next to the output file
        #[arg(long, conflicts_with_all = ["depth", "fen", "json"])]
        fixture: bool,
    },
}

fn init_tracing() {
    // stdout carries the protocol, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Cli::parse();

    let mut settings = EngineSettings::load(args.config.as_deref());
    if let Some(depth) = args.depth {
        settings.max_depth = depth;
    }
    if let Some(time) = args.time {
        settings.time_budget_secs = time;
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }

    match args.command {
        Some(SubCommands::Draw {
            depth,
            fen,
            output,
            json,
            no_image,
            fixture,
        }) => {
            let mut options = DrawOptions::from_settings(&settings);
            if let Some(depth) = depth {
                options.depth = depth;
            }
            if let Some(fen) = fen {
                options.fen = fen;
            }
            if let Some(output) = output {
                options.output = output;
            }
            options.json = json;
            options.render_image = !no_image;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            let result = if fixture {
                let dir = options
                    .output
                    .parent()
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .unwrap_or(Path::new("."));
                visualize::draw_fixture(dir, options.render_image, &mut out).map(|_| ())
            } else {
                visualize::draw(&options, &mut out).map(|_| ())
            };
            match result {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("[DRAW] {:#}", e);
                    eprintln!("Error: {e:#}");
                    ExitCode::FAILURE
                }
            }
        }
        None => run_uci(settings),
    }
}

fn run_uci(settings: EngineSettings) -> ExitCode {
    let stdin = io::stdin();
    let mut session = Session::new(settings, io::stdout());

    match session.run(stdin.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("[UCI] {}", e);
            let mut out = session.into_output();
            let _ = writeln!(out, "info string Error: {e}");
            let _ = out.flush();
            ExitCode::FAILURE
        }
    }
}
