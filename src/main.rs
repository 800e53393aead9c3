use std::fs::File;
use std::io::Read;
use std::path::Path;

use clap::Parser;
use gvdraw::render::{DotSource, Engine, Rendered};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gvdraw", about = "Build B-tree and ER diagrams as Graphviz graphs")]
struct Cli {
    /// Diagram script (reads from stdin if not provided)
    file: Option<std::path::PathBuf>,

    /// Graphviz layout engine
    #[arg(long, short = 'e', value_enum)]
    engine: Option<Engine>,

    /// Render through the layout engine in this format (svg, png, ...) instead of printing DOT
    #[arg(long, short = 'T')]
    format: Option<String>,

    /// Preferred edge length for ER diagrams
    #[arg(long)]
    edge_len: Option<f64>,

    /// Extra graph attribute as KEY=VALUE, may be repeated
    #[arg(long = "graph-attr", short = 'G', value_parser = gvdraw::parse_graph_attr)]
    graph_attr: Vec<(String, String)>,

    /// Log every declaration and engine run
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "gvdraw=debug" } else { "gvdraw=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = read_script(cli.file.as_deref()).and_then(|script| {
        let options = gvdraw::Options {
            engine: cli.engine,
            edge_len: cli.edge_len,
            graph_attr: cli.graph_attr,
        };
        let diagram = gvdraw::build(&script, &options).map_err(|e| e.to_string())?;
        let stdout = std::io::stdout().lock();
        let drawn = match cli.format {
            Some(format) => diagram.draw(&mut Rendered::new(stdout, format)),
            None => diagram.draw(&mut DotSource(stdout)),
        };
        drawn.map_err(|e| e.to_string())
    });

    if let Err(message) = result {
        eprintln!("ERROR: {message}");
        std::process::exit(1);
    }
}

/// The whole script, from `file` or else from stdin.
fn read_script(file: Option<&Path>) -> Result<String, String> {
    let mut script = String::new();
    let read = match file {
        Some(path) => File::open(path).and_then(|mut f| f.read_to_string(&mut script)),
        None => std::io::stdin().lock().read_to_string(&mut script),
    };
    match read {
        Ok(_) => Ok(script),
        Err(e) => {
            let source = file.map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
            Err(format!("failed to read {source}: {e}"))
        }
    }
}
