//! In-memory Graphviz graph description and its DOT serialization.
//!
//! Builders only ever append statements here; layout and drawing are left
//! to whichever engine eventually consumes the DOT text.

use std::collections::HashSet;
use std::fmt;

use crate::render::Engine;

/// An attribute value or node label.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Quoted string.
    Text(String),
    /// HTML-like label, written between `<` and `>` without quoting.
    Html(String),
}

impl Value {
    pub fn as_str(&self) -> &str {
        match self {
            Value::Text(s) | Value::Html(s) => s,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", quote(s)),
            Value::Html(s) => write!(f, "<{s}>"),
        }
    }
}

/// Ordered attribute list. Setting a key that is already present replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs(Vec<(String, Value)>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Shorthand for the string content of `key`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).map(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for Attrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{key}={value}")?;
        }
        write!(f, "]")
    }
}

/// One side of an edge: a node id, optionally narrowed to a record port.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub node: String,
    pub port: Option<String>,
}

impl Endpoint {
    pub fn node(id: impl Into<String>) -> Self {
        Self {
            node: id.into(),
            port: None,
        }
    }

    pub fn port(id: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            node: id.into(),
            port: Some(port.into()),
        }
    }
}

impl From<&str> for Endpoint {
    fn from(id: &str) -> Self {
        Endpoint::node(id)
    }
}

impl From<String> for Endpoint {
    fn from(id: String) -> Self {
        Endpoint::node(id)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.node))?;
        if let Some(port) = &self.port {
            write!(f, ":{}", quote(port))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub attrs: Attrs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub tail: Endpoint,
    pub head: Endpoint,
    pub attrs: Attrs,
}

impl Edge {
    /// Node the arrowhead visually points at. `dir=back` draws the arrow at
    /// the tail instead of the head.
    pub fn arrow_target(&self) -> &str {
        match self.attrs.get_str("dir") {
            Some("back") => &self.tail.node,
            _ => &self.head.node,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Node(Node),
    Edge(Edge),
}

/// A directed graph in declaration order.
#[derive(Debug, Clone)]
pub struct Graph {
    pub name: String,
    pub engine: Engine,
    pub graph_attr: Attrs,
    pub node_attr: Attrs,
    body: Vec<Stmt>,
    declared: HashSet<String>,
}

impl Graph {
    pub fn new(name: impl Into<String>, engine: Engine) -> Self {
        Self {
            name: name.into(),
            engine,
            graph_attr: Attrs::new(),
            node_attr: Attrs::new(),
            body: Vec::new(),
            declared: HashSet::new(),
        }
    }

    pub fn node(&mut self, id: impl Into<String>, attrs: Attrs) {
        let id = id.into();
        tracing::debug!(graph = %self.name, node = %id, "declare node");
        self.declared.insert(id.clone());
        self.body.push(Stmt::Node(Node { id, attrs }));
    }

    pub fn edge(&mut self, tail: impl Into<Endpoint>, head: impl Into<Endpoint>, attrs: Attrs) {
        let (tail, head) = (tail.into(), head.into());
        tracing::debug!(graph = %self.name, tail = %tail.node, head = %head.node, "declare edge");
        self.body.push(Stmt::Edge(Edge { tail, head, attrs }));
    }

    /// Whether a node statement with this id has been emitted.
    pub fn contains_node(&self, id: &str) -> bool {
        self.declared.contains(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.body.iter().filter_map(|s| match s {
            Stmt::Node(n) => Some(n),
            Stmt::Edge(_) => None,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.body.iter().filter_map(|s| match s {
            Stmt::Edge(e) => Some(e),
            Stmt::Node(_) => None,
        })
    }

    /// Latest node statement for `id`; later statements override earlier ones.
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes().filter(|n| n.id == id).last()
    }

    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges().filter(move |e| e.tail.node == id)
    }

    pub fn to_dot(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {} {{", quote(&self.name))?;
        for (kind, attrs) in [
            ("graph", &self.graph_attr),
            ("node", &self.node_attr),
        ] {
            if !attrs.is_empty() {
                writeln!(f, "\t{kind} {attrs}")?;
            }
        }
        for stmt in &self.body {
            match stmt {
                Stmt::Node(node) => {
                    write!(f, "\t{}", quote(&node.id))?;
                    if !node.attrs.is_empty() {
                        write!(f, " {}", node.attrs)?;
                    }
                }
                Stmt::Edge(edge) => {
                    write!(f, "\t{} -> {}", edge.tail, edge.head)?;
                    if !edge.attrs.is_empty() {
                        write!(f, " {}", edge.attrs)?;
                    }
                }
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

/// DOT double-quoted string. Backslashes followed by `"` or by the closing
/// quote are doubled; other backslashes are left alone so escapes such as
/// `\n` and `\l` keep working.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut backslashes = 0;
    for ch in s.chars() {
        if ch == '\\' {
            backslashes += 1;
            continue;
        }
        let run = if ch == '"' {
            backslashes * 2 + 1
        } else {
            backslashes
        };
        out.extend(std::iter::repeat_n('\\', run));
        out.push(ch);
        backslashes = 0;
    }
    out.extend(std::iter::repeat_n('\\', backslashes * 2));
    out.push('"');
    out
}
