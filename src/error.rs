use std::process::ExitStatus;

use thiserror::Error;

/// Errors produced while parsing diagram scripts or running a layout engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown diagram type: {0}")]
    UnknownDiagram(String),

    #[error("syntax error in {kind} diagram: unexpected `{context}`")]
    Syntax { kind: &'static str, context: String },

    #[error("invalid graph attribute `{0}`, expected KEY=VALUE")]
    InvalidGraphAttr(String),

    #[error("failed to run layout engine `{engine}`: {source}")]
    EngineSpawn {
        engine: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("layout engine `{engine}` exited with {status}: {stderr}")]
    EngineFailed {
        engine: &'static str,
        status: ExitStatus,
        stderr: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
