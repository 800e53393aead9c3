pub mod btree;
pub mod dot;
pub mod er;
pub mod error;
pub mod label;
pub mod render;
pub mod script_ast;
pub mod script_parser;

use btree::BTreeDiagram;
use dot::Graph;
use er::{ErConfig, ErDiagram};
use render::{Engine, Sink};
use script_ast::{BTreeStmt, ErStmt};

pub use error::{Error, Result};

/// Overrides applied when building a diagram from a script.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub engine: Option<Engine>,
    /// Only used by ER diagrams.
    pub edge_len: Option<f64>,
    pub graph_attr: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub enum Diagram {
    BTree(BTreeDiagram),
    Er(ErDiagram),
}

impl Diagram {
    pub fn get_graph(&self) -> &Graph {
        match self {
            Diagram::BTree(d) => d.get_graph(),
            Diagram::Er(d) => d.get_graph(),
        }
    }

    pub fn draw(&self, sink: &mut impl Sink) -> Result<()> {
        match self {
            Diagram::BTree(d) => d.draw(sink),
            Diagram::Er(d) => d.draw(sink),
        }
    }
}

/// Parse a diagram script and return its DOT source.
pub fn render(input: &str) -> Result<String> {
    render_with_options(input, &Options::default())
}

pub fn render_with_options(input: &str, options: &Options) -> Result<String> {
    Ok(build(input, options)?.get_graph().to_dot())
}

pub fn build(input: &str, options: &Options) -> Result<Diagram> {
    let first_word = input.split_whitespace().next().unwrap_or("(empty)");
    match first_word {
        "btree" => {
            let stmts = script_parser::parse_btree(input)?;
            Ok(Diagram::BTree(build_btree(stmts, options)))
        }
        "er" => {
            let stmts = script_parser::parse_er(input)?;
            Ok(Diagram::Er(build_er(stmts, options)))
        }
        other => Err(Error::UnknownDiagram(other.to_string())),
    }
}

fn build_btree(stmts: Vec<BTreeStmt>, options: &Options) -> BTreeDiagram {
    let mut diagram = BTreeDiagram::with_engine(options.engine.unwrap_or_default());
    for (key, value) in &options.graph_attr {
        diagram.graph_mut().graph_attr.set(key, value.as_str());
    }
    for stmt in stmts {
        match stmt {
            BTreeStmt::Node { name, keys } => {
                diagram.add_node(&name, keys);
            }
            BTreeStmt::Edge {
                parent,
                child,
                slot,
            } => {
                diagram.add_edge(&parent, &child, slot);
            }
        }
    }
    diagram
}

fn build_er(stmts: Vec<ErStmt>, options: &Options) -> ErDiagram {
    let defaults = ErConfig::default();
    let config = ErConfig {
        engine: options.engine.unwrap_or(defaults.engine),
        edge_len: options.edge_len.unwrap_or(defaults.edge_len),
        graph_attr: options.graph_attr.clone(),
    };
    let mut diagram = ErDiagram::with_config(config);
    for stmt in stmts {
        match stmt {
            ErStmt::Entity { name, style } => {
                diagram.add_node(&name, style);
            }
            ErStmt::Attribute { entity, attribute } => {
                diagram.add_attribute(&entity, attribute);
            }
            ErStmt::Relation(relation) => {
                diagram.add_relation(relation);
            }
            ErStmt::IsA(is_a) => {
                diagram.add_is_a(is_a);
            }
        }
    }
    diagram
}

/// Parse a `KEY=VALUE` graph attribute.
pub fn parse_graph_attr(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(Error::InvalidGraphAttr(s.to_string())),
    }
}
