//! Entity-Relationship diagrams in the Chen notation: boxes for entities,
//! ellipses for attributes, diamonds for relations and inverted triangles
//! for is-a hierarchies.

use crate::dot::{Attrs, Graph};
use crate::error::Result;
use crate::label::format_label;
use crate::render::{Engine, Sink};

const ENTITY_FILL: &str = "#CCCCFF";
const ENTITY_COLOR: &str = "#0000FF";
const ATTRIBUTE_FILL: &str = "#FFFBD6";
const ATTRIBUTE_COLOR: &str = "#656354";
const RELATION_FILL: &str = "#FFCCCC";
const RELATION_COLOR: &str = "#BA2128";
const IS_A_FILL: &str = "#CCFFCC";
const IS_A_COLOR: &str = "#506550";

/// Layout settings carried over by [`ErDiagram::copy_from`].
#[derive(Debug, Clone, PartialEq)]
pub struct ErConfig {
    pub engine: Engine,
    /// Preferred edge length, honoured by the spring-model engines.
    pub edge_len: f64,
    pub graph_attr: Vec<(String, String)>,
}

impl Default for ErConfig {
    fn default() -> Self {
        Self {
            engine: Engine::Dot,
            edge_len: 1.5,
            graph_attr: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeStyle {
    pub is_multiple: bool,
    pub is_weak: bool,
}

impl NodeStyle {
    pub const PLAIN: NodeStyle = NodeStyle {
        is_multiple: false,
        is_weak: false,
    };
    pub const MULTIPLE: NodeStyle = NodeStyle {
        is_multiple: true,
        is_weak: false,
    };
    pub const WEAK: NodeStyle = NodeStyle {
        is_multiple: false,
        is_weak: true,
    };

    fn peripheries(self) -> &'static str {
        if self.is_multiple || self.is_weak { "2" } else { "1" }
    }
}

/// An entity and the attributes recorded for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ErNode {
    pub name: String,
    pub is_multiple: bool,
    pub is_weak: bool,
    pub attributes: Vec<Attribute>,
}

impl ErNode {
    pub fn style(&self) -> NodeStyle {
        NodeStyle {
            is_multiple: self.is_multiple,
            is_weak: self.is_weak,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub attr_name: String,
    pub is_pk: bool,
    pub is_multiple: bool,
    /// Together with `is_pk`: partial key of a weak entity.
    pub is_weak: bool,
    /// Sub-attributes of a composite attribute, one level deep.
    pub composed_of: Vec<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            attr_name: name.into(),
            is_pk: false,
            is_multiple: false,
            is_weak: false,
            composed_of: Vec::new(),
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.is_pk = true;
        self
    }

    pub fn multiple(mut self) -> Self {
        self.is_multiple = true;
        self
    }

    pub fn weak(mut self) -> Self {
        self.is_weak = true;
        self
    }

    pub fn composed_of<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.composed_of = parts.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    /// Empty when the relation has no source entity.
    pub from_edge: String,
    pub relation_label: String,
    pub to_edge: String,
    pub from_label: String,
    pub to_label: String,
    /// Identifying relationship of a weak entity on the `to_edge` side.
    pub is_weak: bool,
}

impl Relation {
    pub fn new(
        from_edge: impl Into<String>,
        relation_label: impl Into<String>,
        to_edge: impl Into<String>,
        from_label: impl Into<String>,
        to_label: impl Into<String>,
    ) -> Self {
        Self {
            from_edge: from_edge.into(),
            relation_label: relation_label.into(),
            to_edge: to_edge.into(),
            from_label: from_label.into(),
            to_label: to_label.into(),
            is_weak: false,
        }
    }

    pub fn weak(mut self) -> Self {
        self.is_weak = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsA {
    pub superclass: String,
    pub subclass: Vec<String>,
    pub super_label: String,
    pub sub_label: String,
    /// Disjoint subclasses get arrows pointing away from the junction,
    /// overlapping ones get arrows pointing into it.
    pub is_disjunct: bool,
}

impl IsA {
    pub fn new<I, S>(superclass: impl Into<String>, subclasses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            superclass: superclass.into(),
            subclass: subclasses.into_iter().map(Into::into).collect(),
            super_label: String::new(),
            sub_label: String::new(),
            is_disjunct: true,
        }
    }

    pub fn single(superclass: impl Into<String>, subclass: impl Into<String>) -> Self {
        Self::new(superclass, [subclass.into()])
    }

    pub fn super_label(mut self, label: impl Into<String>) -> Self {
        self.super_label = label.into();
        self
    }

    pub fn sub_label(mut self, label: impl Into<String>) -> Self {
        self.sub_label = label.into();
        self
    }

    pub fn overlapping(mut self) -> Self {
        self.is_disjunct = false;
        self
    }
}

/// One public builder call, as the caller made it.
#[derive(Debug, Clone, PartialEq)]
enum Step {
    Node(String, NodeStyle),
    Attribute(String, Attribute),
    /// The relation before its label was made unique.
    Relation(Relation),
    IsA(IsA),
}

#[derive(Debug, Clone)]
pub struct ErDiagram {
    config: ErConfig,
    graph: Graph,
    nodes: Vec<ErNode>,
    relations: Vec<Relation>,
    is_as: Vec<IsA>,
    history: Vec<Step>,
    attr_count: usize,
    sub_count: usize,
}

impl Default for ErDiagram {
    fn default() -> Self {
        Self::new()
    }
}

impl ErDiagram {
    pub fn new() -> Self {
        Self::with_config(ErConfig::default())
    }

    pub fn with_config(config: ErConfig) -> Self {
        let mut graph = Graph::new("ER", config.engine);
        for (key, value) in &config.graph_attr {
            graph.graph_attr.set(key, value.as_str());
        }
        Self {
            config,
            graph,
            nodes: Vec::new(),
            relations: Vec::new(),
            is_as: Vec::new(),
            history: Vec::new(),
            attr_count: 0,
            sub_count: 0,
        }
    }

    /// Build an independent diagram with `source`'s configuration and
    /// replay everything recorded in it.
    pub fn copy_from(source: &ErDiagram) -> Self {
        Self::copy_from_with(source, source.config.clone())
    }

    /// Like [`ErDiagram::copy_from`], but laid out with a different configuration.
    ///
    /// Calls are replayed in the order the source received them, so every
    /// generated id and padded relation label comes out the same.
    pub fn copy_from_with(source: &ErDiagram, config: ErConfig) -> Self {
        let mut diagram = Self::with_config(config);
        for step in &source.history {
            match step.clone() {
                Step::Node(label, style) => {
                    diagram.add_node(&label, style);
                }
                Step::Attribute(node, attribute) => {
                    diagram.add_attribute(&node, attribute);
                }
                Step::Relation(relation) => {
                    diagram.add_relation(relation);
                }
                Step::IsA(is_a) => {
                    diagram.add_is_a(is_a);
                }
            }
        }
        diagram
    }

    /// Declare an entity. Declaring it again replaces its style and keeps
    /// its attributes.
    pub fn add_node(&mut self, label: &str, style: NodeStyle) -> &mut Self {
        self.history.push(Step::Node(label.to_string(), style));
        self.declare_node(label, style);
        self
    }

    fn declare_node(&mut self, label: &str, style: NodeStyle) {
        self.graph.node(
            label,
            Attrs::new()
                .with("shape", "box")
                .with("style", "filled")
                .with("fillcolor", ENTITY_FILL)
                .with("color", ENTITY_COLOR)
                .with("peripheries", style.peripheries()),
        );
        match self.nodes.iter_mut().find(|n| n.name == label) {
            Some(node) => {
                node.is_multiple = style.is_multiple;
                node.is_weak = style.is_weak;
            }
            None => self.nodes.push(ErNode {
                name: label.to_string(),
                is_multiple: style.is_multiple,
                is_weak: style.is_weak,
                attributes: Vec::new(),
            }),
        }
    }

    pub fn add_attribute(&mut self, node_label: &str, attribute: Attribute) -> &mut Self {
        self.history
            .push(Step::Attribute(node_label.to_string(), attribute.clone()));
        self.ensure_node(node_label, NodeStyle::PLAIN);

        let style = attribute_style(attribute.is_multiple);
        let id = self.next_attr_id();
        self.graph.node(
            id.as_str(),
            style
                .clone()
                .with("label", format_label(&attribute.attr_name, attribute.is_weak, attribute.is_pk)),
        );
        self.graph
            .edge(node_label, id.as_str(), Attrs::new().with("arrowhead", "none"));

        for part in &attribute.composed_of {
            let sub_id = self.next_attr_id();
            self.graph.node(
                sub_id.as_str(),
                style
                    .clone()
                    .with("label", format_label(part, attribute.is_weak, attribute.is_pk)),
            );
            self.graph
                .edge(id.as_str(), sub_id, Attrs::new().with("arrowhead", "none"));
        }

        if let Some(node) = self.nodes.iter_mut().find(|n| n.name == node_label) {
            node.attributes.push(attribute);
        }
        self
    }

    /// Declare a relation and return the label it ended up under. A label
    /// that is already taken by another node gets trailing spaces until it
    /// is unique.
    pub fn add_relation(&mut self, mut relation: Relation) -> String {
        self.history.push(Step::Relation(relation.clone()));
        if !relation.from_edge.is_empty() {
            self.ensure_node(&relation.from_edge, NodeStyle::PLAIN);
        }
        let to_style = if relation.is_weak {
            NodeStyle::WEAK
        } else {
            NodeStyle::PLAIN
        };
        self.ensure_node(&relation.to_edge, to_style);

        while self.graph.contains_node(&relation.relation_label) {
            tracing::debug!(label = %relation.relation_label, "relation label taken, padding");
            relation.relation_label.push(' ');
        }

        let peripheries = if relation.is_weak { "2" } else { "1" };
        self.graph.node(
            relation.relation_label.as_str(),
            Attrs::new()
                .with("shape", "diamond")
                .with("style", "filled")
                .with("fillcolor", RELATION_FILL)
                .with("color", RELATION_COLOR)
                .with("peripheries", peripheries),
        );

        let len = self.config.edge_len.to_string();
        if !relation.from_edge.is_empty() {
            self.graph.edge(
                relation.from_edge.as_str(),
                relation.relation_label.as_str(),
                Attrs::new()
                    .with("label", relation.from_label.as_str())
                    .with("len", len.as_str())
                    .with("arrowhead", "none"),
            );
        }
        let color = if relation.is_weak {
            "black:invis:black"
        } else {
            "black"
        };
        self.graph.edge(
            relation.relation_label.as_str(),
            relation.to_edge.as_str(),
            Attrs::new()
                .with("label", relation.to_label.as_str())
                .with("len", len.as_str())
                .with("arrowhead", "none")
                .with("color", color),
        );

        let label = relation.relation_label.clone();
        self.relations.push(relation);
        label
    }

    /// Declare an is-a hierarchy and return the id of its junction node.
    pub fn add_is_a(&mut self, is_a: IsA) -> String {
        self.history.push(Step::IsA(is_a.clone()));
        self.ensure_node(&is_a.superclass, NodeStyle::PLAIN);
        for sub in &is_a.subclass {
            self.ensure_node(sub, NodeStyle::PLAIN);
        }

        let junction = self.next_is_a_id();
        self.graph.node(
            junction.as_str(),
            Attrs::new()
                .with("label", "isA")
                .with("shape", "invtriangle")
                .with("style", "filled")
                .with("fillcolor", IS_A_FILL)
                .with("color", IS_A_COLOR)
                .with("peripheries", "1"),
        );

        let len = self.config.edge_len.to_string();
        self.graph.edge(
            is_a.superclass.as_str(),
            junction.as_str(),
            Attrs::new()
                .with("label", is_a.super_label.as_str())
                .with("len", len.as_str())
                .with("arrowhead", "none"),
        );
        for sub in &is_a.subclass {
            let mut attrs = Attrs::new()
                .with("label", is_a.sub_label.as_str())
                .with("len", len.as_str())
                .with("arrowhead", "normal");
            if !is_a.is_disjunct {
                attrs.set("dir", "back");
            }
            self.graph.edge(junction.as_str(), sub.as_str(), attrs);
        }

        self.is_as.push(is_a);
        junction
    }

    pub fn draw(&self, sink: &mut impl Sink) -> Result<()> {
        sink.show(&self.graph)
    }

    pub fn get_graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &ErConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[ErNode] {
        &self.nodes
    }

    pub fn node(&self, name: &str) -> Option<&ErNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn is_as(&self) -> &[IsA] {
        &self.is_as
    }

    fn ensure_node(&mut self, label: &str, style: NodeStyle) {
        if self.node(label).is_none() {
            self.declare_node(label, style);
        }
    }

    fn next_attr_id(&mut self) -> String {
        loop {
            let id = format!("attr_{}", self.attr_count);
            self.attr_count += 1;
            if !self.graph.contains_node(&id) {
                return id;
            }
        }
    }

    fn next_is_a_id(&mut self) -> String {
        loop {
            let id = format!("is_A{}", self.sub_count);
            self.sub_count += 1;
            if !self.graph.contains_node(&id) {
                return id;
            }
        }
    }
}

fn attribute_style(is_multiple: bool) -> Attrs {
    Attrs::new()
        .with("shape", "ellipse")
        .with("style", "filled")
        .with("fillcolor", ATTRIBUTE_FILL)
        .with("color", ATTRIBUTE_COLOR)
        .with("peripheries", if is_multiple { "2" } else { "1" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dot::Value;
    use pretty_assertions::assert_eq;

    fn attr<'a>(diagram: &'a ErDiagram, id: &str, key: &str) -> Option<&'a str> {
        diagram
            .get_graph()
            .find_node(id)
            .and_then(|n| n.attrs.get_str(key))
    }

    #[test]
    fn entity_double_border_when_weak_or_multiple() {
        let mut er = ErDiagram::new();
        er.add_node("A", NodeStyle::PLAIN)
            .add_node("B", NodeStyle::WEAK)
            .add_node("C", NodeStyle::MULTIPLE);
        assert_eq!(attr(&er, "A", "peripheries"), Some("1"));
        assert_eq!(attr(&er, "B", "peripheries"), Some("2"));
        assert_eq!(attr(&er, "C", "peripheries"), Some("2"));
        assert_eq!(attr(&er, "A", "shape"), Some("box"));
    }

    #[test]
    fn redeclaring_entity_overwrites_style_keeps_attributes() {
        let mut er = ErDiagram::new();
        er.add_node("A", NodeStyle::PLAIN)
            .add_attribute("A", Attribute::new("id").primary_key())
            .add_node("A", NodeStyle::WEAK);
        assert_eq!(er.nodes().len(), 1);
        let node = er.node("A").unwrap();
        assert!(node.is_weak);
        assert_eq!(node.attributes.len(), 1);
        assert_eq!(attr(&er, "A", "peripheries"), Some("2"));
    }

    #[test]
    fn attribute_on_unknown_entity_creates_it() {
        let mut er = ErDiagram::new();
        er.add_attribute("Person", Attribute::new("Name"));
        assert_eq!(
            er.nodes(),
            &[ErNode {
                name: "Person".into(),
                is_multiple: false,
                is_weak: false,
                attributes: vec![Attribute::new("Name")],
            }]
        );
        assert_eq!(attr(&er, "attr_0", "label"), Some("Name"));
        let edge = er.get_graph().edges_from("Person").next().unwrap();
        assert_eq!(edge.head.node, "attr_0");
        assert_eq!(edge.attrs.get_str("arrowhead"), Some("none"));
    }

    #[test]
    fn primary_key_attribute_label_is_underlined() {
        let mut er = ErDiagram::new();
        er.add_attribute("E", Attribute::new("X").primary_key());
        let node = er.get_graph().find_node("attr_0").unwrap();
        assert_eq!(node.attrs.get("label"), Some(&Value::Html("<U>X</U>".into())));
    }

    #[test]
    fn partial_key_attribute_label_alternates() {
        let mut er = ErDiagram::new();
        er.add_attribute("E", Attribute::new("XY").primary_key().weak());
        let node = er.get_graph().find_node("attr_0").unwrap();
        assert_eq!(node.attrs.get("label"), Some(&Value::Html("<u>X</u>Y".into())));
    }

    #[test]
    fn multiple_attribute_has_double_outline() {
        let mut er = ErDiagram::new();
        er.add_attribute("E", Attribute::new("Phone").multiple());
        assert_eq!(attr(&er, "attr_0", "peripheries"), Some("2"));
        assert_eq!(attr(&er, "attr_0", "shape"), Some("ellipse"));
    }

    #[test]
    fn composite_attribute_children_hang_off_parent() {
        let mut er = ErDiagram::new();
        er.add_attribute(
            "Person",
            Attribute::new("Adresse").composed_of(["Strasse", "Ort"]),
        );
        assert_eq!(attr(&er, "attr_1", "label"), Some("Strasse"));
        assert_eq!(attr(&er, "attr_2", "label"), Some("Ort"));
        let children: Vec<&str> = er
            .get_graph()
            .edges_from("attr_0")
            .map(|e| e.head.node.as_str())
            .collect();
        assert_eq!(children, vec!["attr_1", "attr_2"]);
    }

    #[test]
    fn composed_of_is_owned_per_attribute() {
        let mut er = ErDiagram::new();
        er.add_attribute("A", Attribute::new("a").composed_of(["x"]))
            .add_attribute("A", Attribute::new("b"));
        let node = er.node("A").unwrap();
        assert_eq!(node.attributes[0].composed_of, vec!["x".to_string()]);
        assert!(node.attributes[1].composed_of.is_empty());
    }

    #[test]
    fn attribute_ids_skip_taken_entity_names() {
        let mut er = ErDiagram::new();
        er.add_node("attr_0", NodeStyle::PLAIN)
            .add_attribute("attr_0", Attribute::new("a"));
        assert_eq!(attr(&er, "attr_1", "label"), Some("a"));
    }

    #[test]
    fn relation_edges_and_labels() {
        let mut er = ErDiagram::new();
        let label = er.add_relation(Relation::new("Hersteller", "entwickelt", "Modell", "1", "n"));
        assert_eq!(label, "entwickelt");
        assert_eq!(attr(&er, "entwickelt", "shape"), Some("diamond"));

        let from: Vec<_> = er.get_graph().edges_from("Hersteller").collect();
        assert_eq!(from.len(), 1);
        assert_eq!(from[0].attrs.get_str("label"), Some("1"));
        assert_eq!(from[0].attrs.get_str("len"), Some("1.5"));

        let to: Vec<_> = er.get_graph().edges_from("entwickelt").collect();
        assert_eq!(to[0].head.node, "Modell");
        assert_eq!(to[0].attrs.get_str("label"), Some("n"));
        assert_eq!(to[0].attrs.get_str("color"), Some("black"));
    }

    #[test]
    fn weak_relation_creates_weak_target() {
        let mut er = ErDiagram::new();
        er.add_relation(Relation::new("Gebaeude", "hat", "Raum", "1", "n").weak());
        assert!(er.node("Raum").unwrap().is_weak);
        assert!(!er.node("Gebaeude").unwrap().is_weak);
        assert_eq!(attr(&er, "hat", "peripheries"), Some("2"));
        let to = er.get_graph().edges_from("hat").next().unwrap();
        assert_eq!(to.attrs.get_str("color"), Some("black:invis:black"));
    }

    #[test]
    fn relation_without_source() {
        let mut er = ErDiagram::new();
        er.add_relation(Relation::new("", "r", "B", "", "1"));
        assert_eq!(er.nodes().len(), 1);
        assert_eq!(er.get_graph().edges().count(), 1);
    }

    #[test]
    fn duplicate_relation_label_gets_trailing_space() {
        let mut er = ErDiagram::new();
        let first = er.add_relation(Relation::new("A", "has", "B", "1", "n"));
        let second = er.add_relation(Relation::new("C", "has", "D", "1", "n"));
        assert_eq!(first, "has");
        assert_eq!(second, "has ");
        assert_eq!(er.relations()[1].relation_label, "has ");
    }

    #[test]
    fn third_duplicate_relation_label_is_still_unique() {
        let mut er = ErDiagram::new();
        for _ in 0..3 {
            er.add_relation(Relation::new("A", "has", "B", "1", "n"));
        }
        let labels: Vec<&str> = er
            .relations()
            .iter()
            .map(|r| r.relation_label.as_str())
            .collect();
        assert_eq!(labels, vec!["has", "has ", "has  "]);
    }

    #[test]
    fn relation_label_colliding_with_entity_is_padded() {
        let mut er = ErDiagram::new();
        er.add_node("Ort", NodeStyle::PLAIN);
        let label = er.add_relation(Relation::new("A", "Ort", "B", "1", "1"));
        assert_eq!(label, "Ort ");
    }

    #[test]
    fn is_a_disjoint_points_at_subclasses() {
        let mut er = ErDiagram::new();
        let junction = er.add_is_a(IsA::new("E", ["F", "G"]));
        assert_eq!(junction, "is_A0");
        assert_eq!(attr(&er, "is_A0", "label"), Some("isA"));
        let targets: Vec<&str> = er
            .get_graph()
            .edges_from("is_A0")
            .map(|e| e.arrow_target())
            .collect();
        assert_eq!(targets, vec!["F", "G"]);
    }

    #[test]
    fn is_a_overlapping_points_at_junction() {
        let mut er = ErDiagram::new();
        er.add_is_a(IsA::new("E", ["F", "G"]).overlapping());
        let edges: Vec<_> = er.get_graph().edges_from("is_A0").collect();
        assert_eq!(edges.len(), 2);
        for edge in edges {
            assert_eq!(edge.arrow_target(), "is_A0");
            assert_eq!(edge.attrs.get_str("arrowhead"), Some("normal"));
        }
    }

    #[test]
    fn is_a_super_edge_is_undirected_and_labelled() {
        let mut er = ErDiagram::new();
        er.add_is_a(IsA::single("Modell", "3D").super_label("p").sub_label("x"));
        let sup = er.get_graph().edges_from("Modell").next().unwrap();
        assert_eq!(sup.head.node, "is_A0");
        assert_eq!(sup.attrs.get_str("label"), Some("p"));
        assert_eq!(sup.attrs.get_str("arrowhead"), Some("none"));
        let sub = er.get_graph().edges_from("is_A0").next().unwrap();
        assert_eq!(sub.attrs.get_str("label"), Some("x"));
        assert_eq!(er.is_as()[0].subclass, vec!["3D".to_string()]);
    }

    #[test]
    fn is_a_counter_advances_per_hierarchy() {
        let mut er = ErDiagram::new();
        let first = er.add_is_a(IsA::single("A", "B"));
        let second = er.add_is_a(IsA::single("A", "C"));
        assert_eq!((first.as_str(), second.as_str()), ("is_A0", "is_A1"));
        assert_eq!(er.nodes().len(), 3);
    }

    #[test]
    fn counters_are_per_instance() {
        let mut a = ErDiagram::new();
        let mut b = ErDiagram::new();
        a.add_attribute("X", Attribute::new("x"));
        b.add_attribute("Y", Attribute::new("y"));
        assert!(a.get_graph().contains_node("attr_0"));
        assert!(b.get_graph().contains_node("attr_0"));
    }

    #[test]
    fn config_applies_engine_edge_len_and_graph_attr() {
        let config = ErConfig {
            engine: Engine::Neato,
            edge_len: 2.0,
            graph_attr: vec![("rankdir".into(), "LR".into())],
        };
        let mut er = ErDiagram::with_config(config);
        er.add_relation(Relation::new("A", "r", "B", "1", "1"));
        let graph = er.get_graph();
        assert_eq!(graph.engine, Engine::Neato);
        assert_eq!(graph.graph_attr.get_str("rankdir"), Some("LR"));
        let edge = graph.edges_from("A").next().unwrap();
        assert_eq!(edge.attrs.get_str("len"), Some("2"));
    }

    #[test]
    fn copy_from_replays_model() {
        let mut source = ErDiagram::new();
        source
            .add_node("A", NodeStyle::PLAIN)
            .add_node("B", NodeStyle::WEAK)
            .add_attribute("A", Attribute::new("id").primary_key());
        source.add_relation(Relation::new("A", "r", "B", "1", "n"));
        source.add_is_a(IsA::new("A", ["B", "C"]));

        let mut copy = ErDiagram::copy_from(&source);
        assert_eq!(copy.nodes(), source.nodes());
        assert_eq!(copy.relations(), source.relations());
        assert_eq!(copy.is_as(), source.is_as());
        assert_eq!(copy.config(), source.config());

        copy.add_relation(Relation::new("A", "s", "C", "1", "1"));
        copy.add_attribute("C", Attribute::new("c"));
        assert_eq!(source.relations().len(), 1);
        assert!(source.node("C").unwrap().attributes.is_empty());
    }

    #[test]
    fn copy_from_keeps_disambiguated_labels() {
        let mut source = ErDiagram::new();
        source.add_relation(Relation::new("A", "r", "B", "1", "n"));
        source.add_relation(Relation::new("B", "r", "C", "1", "n"));
        let copy = ErDiagram::copy_from(&source);
        assert_eq!(copy.relations(), source.relations());
        assert!(copy.get_graph().contains_node("r "));
    }

    #[test]
    fn copy_from_with_new_config() {
        let mut source = ErDiagram::new();
        source.add_relation(Relation::new("A", "r", "B", "1", "n"));
        let config = ErConfig {
            engine: Engine::Fdp,
            ..ErConfig::default()
        };
        let copy = ErDiagram::copy_from_with(&source, config);
        assert_eq!(copy.get_graph().engine, Engine::Fdp);
        assert_eq!(source.get_graph().engine, Engine::Dot);
        assert_eq!(copy.relations(), source.relations());
    }

    #[test]
    fn copy_from_keeps_relation_named_like_later_attribute_id() {
        let mut source = ErDiagram::new();
        source.add_relation(Relation::new("A", "attr_0", "B", "1", "n"));
        source.add_attribute("A", Attribute::new("id"));
        assert_eq!(source.relations()[0].relation_label, "attr_0");

        let copy = ErDiagram::copy_from(&source);
        assert_eq!(copy.relations(), source.relations());
        assert_eq!(copy.nodes(), source.nodes());
        assert_eq!(attr(&copy, "attr_0", "shape"), Some("diamond"));
        assert_eq!(attr(&copy, "attr_1", "label"), Some("id"));
    }

    #[test]
    fn copy_from_keeps_relation_declared_before_same_named_entity() {
        let mut source = ErDiagram::new();
        source.add_relation(Relation::new("A", "X", "B", "1", "n"));
        source.add_node("X", NodeStyle::PLAIN);
        assert_eq!(source.relations()[0].relation_label, "X");

        let copy = ErDiagram::copy_from(&source);
        assert_eq!(copy.relations(), source.relations());
        assert_eq!(copy.nodes(), source.nodes());
        assert_eq!(copy.get_graph().to_dot(), source.get_graph().to_dot());
    }
}
