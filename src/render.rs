use std::io::Write;
use std::process::{Command, Stdio};

use crate::dot::Graph;
use crate::error::{Error, Result};

/// Graphviz layout engines. Each one is a binary of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Engine {
    #[default]
    Dot,
    Neato,
    Fdp,
    Sfdp,
    Circo,
    Twopi,
    Osage,
    Patchwork,
}

impl Engine {
    pub fn as_str(self) -> &'static str {
        match self {
            Engine::Dot => "dot",
            Engine::Neato => "neato",
            Engine::Fdp => "fdp",
            Engine::Sfdp => "sfdp",
            Engine::Circo => "circo",
            Engine::Twopi => "twopi",
            Engine::Osage => "osage",
            Engine::Patchwork => "patchwork",
        }
    }
}

/// Lay out and render `graph` with its engine, returning the engine's
/// output in `format` (e.g. `svg`, `png`).
pub fn pipe(graph: &Graph, format: &str) -> Result<Vec<u8>> {
    let engine = graph.engine.as_str();
    tracing::debug!(engine, format, graph = %graph.name, "running layout engine");

    let mut command = Command::new(engine);
    command.arg(format!("-T{format}"));
    run(command, engine, &graph.to_dot())
}

/// Feed `input` to `command` and collect its stdout. A non-zero exit is
/// reported as [`Error::EngineFailed`] even when the engine stopped reading
/// early and the write failed.
fn run(mut command: Command, engine: &'static str, input: &str) -> Result<Vec<u8>> {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| Error::EngineSpawn { engine, source })?;

    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(input.as_bytes()),
        None => Ok(()),
    };

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(Error::EngineFailed {
            engine,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    if let Err(e) = written {
        tracing::warn!(engine, error = %e, "engine exited cleanly without reading all input");
        return Err(e.into());
    }
    Ok(output.stdout)
}

/// Where `draw()` sends a finished graph.
pub trait Sink {
    fn show(&mut self, graph: &Graph) -> Result<()>;
}

/// Writes the DOT source itself.
pub struct DotSource<W>(pub W);

impl<W: Write> Sink for DotSource<W> {
    fn show(&mut self, graph: &Graph) -> Result<()> {
        writeln!(self.0, "{graph}")?;
        Ok(())
    }
}

/// Writes the engine's rendering of the graph in a fixed output format.
pub struct Rendered<W> {
    out: W,
    format: String,
}

impl<W: Write> Rendered<W> {
    pub fn new(out: W, format: impl Into<String>) -> Self {
        Self {
            out,
            format: format.into(),
        }
    }
}

impl<W: Write> Sink for Rendered<W> {
    fn show(&mut self, graph: &Graph) -> Result<()> {
        let bytes = pipe(graph, &self.format)?;
        self.out.write_all(&bytes)?;
        Ok(())
    }
}
