use std::fmt;

use crate::dot::{Attrs, Endpoint, Graph};
use crate::error::Result;
use crate::render::{Engine, Sink};

/// A key stored in a B-tree node. Anything that is not an integer is still
/// drawn, but reported as a warning.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Int(i64),
    Other(String),
}

impl From<i64> for Key {
    fn from(k: i64) -> Self {
        Key::Int(k)
    }
}

impl From<i32> for Key {
    fn from(k: i32) -> Self {
        Key::Int(i64::from(k))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Other(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Other(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(k) => write!(f, "{k}"),
            Key::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Record-shaped B-tree nodes connected through numbered child slots.
#[derive(Debug, Clone)]
pub struct BTreeDiagram {
    graph: Graph,
    warnings: Vec<String>,
}

impl Default for BTreeDiagram {
    fn default() -> Self {
        Self::new()
    }
}

impl BTreeDiagram {
    pub fn new() -> Self {
        Self::with_engine(Engine::Dot)
    }

    pub fn with_engine(engine: Engine) -> Self {
        let mut graph = Graph::new("btree", engine);
        graph.graph_attr.set("splines", "line");
        graph.node_attr = Attrs::new()
            .with("shape", "record")
            .with("height", ".05")
            .with("fontsize", "10")
            .with("style", "filled")
            .with("fillcolor", "#FFFFFF");
        Self {
            graph,
            warnings: Vec::new(),
        }
    }

    /// Declare node `name` holding `keys` in order.
    pub fn add_node<I>(&mut self, name: &str, keys: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
        for key in &keys {
            if let Key::Other(raw) = key {
                let warning = format!("{raw} should be an integer.");
                tracing::warn!(node = name, "{warning}");
                self.warnings.push(warning);
            }
        }
        let label = record_label(&keys);
        self.graph.node(name, Attrs::new().with("label", label));
        self
    }

    /// Connect child slot `slot` of `parent` to `child`. Slots are numbered
    /// from 1; a node with `n` keys has slots `1..=n+1`. The range is not
    /// checked here.
    pub fn add_edge(&mut self, parent: &str, child: &str, slot: usize) -> &mut Self {
        self.graph.edge(
            Endpoint::port(parent, format!("f{slot}")),
            child,
            Attrs::new(),
        );
        self
    }

    pub fn draw(&self, sink: &mut impl Sink) -> Result<()> {
        sink.show(&self.graph)
    }

    pub fn get_graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Warnings collected from non-integer keys, oldest first.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// `<f1> |k1|<f2> |k2|<f3> ` for keys `[k1, k2]`.
pub fn record_label(keys: &[Key]) -> String {
    let mut label = String::from("<f1> ");
    for (i, key) in keys.iter().enumerate() {
        label.push_str(&format!("|{key}|<f{}> ", i + 2));
    }
    label
}
