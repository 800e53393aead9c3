use crate::btree::Key;
use crate::er::{Attribute, IsA, NodeStyle, Relation};

#[derive(Debug, Clone, PartialEq)]
pub enum BTreeStmt {
    Node { name: String, keys: Vec<Key> },
    Edge { parent: String, child: String, slot: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErStmt {
    Entity { name: String, style: NodeStyle },
    Attribute { entity: String, attribute: Attribute },
    Relation(Relation),
    IsA(IsA),
}
