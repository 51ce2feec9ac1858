//! Bound-parameter extraction.

use indexmap::IndexSet;
use tinkerglot_adapters::query::gremlin::ast::{Collection, Node, Query};

use crate::vocabulary::vocabulary;

/// Returns the names of the bound parameters a canonical query refers to,
/// in order of first appearance.
///
/// Only bare identifiers are considered; literal values are never
/// inspected.
pub fn extract_parameters(query: &Query) -> IndexSet<String> {
    let mut found = IndexSet::new();
    if let Some(root) = &query.root {
        collect(root, &mut found);
    }
    found
}

fn collect(node: &Node, found: &mut IndexSet<String>) {
    match node {
        Node::Identifier(name) => {
            if !vocabulary().contains(name) && !found.contains(name) {
                found.insert(name.clone());
            }
        }
        Node::Call(call) => {
            if let Some(receiver) = &call.receiver {
                collect(receiver, found);
            }
            for arg in &call.args {
                collect(arg, found);
            }
        }
        Node::Anonymous(inner) => collect(inner, found),
        Node::Collection(Collection::List(items) | Collection::Set(items)) => {
            for item in items {
                collect(item, found);
            }
        }
        Node::Collection(Collection::Map(entries)) => {
            for entry in entries {
                collect(&entry.key, found);
                collect(&entry.value, found);
            }
        }
        Node::Strategy(config) => {
            for (_, value) in &config.entries {
                collect(value, found);
            }
        }
        Node::Vertex(vertex) => {
            collect(&vertex.id, found);
            if let Some(label) = &vertex.label {
                collect(label, found);
            }
        }
        Node::Literal(_) | Node::EnumRef(_) | Node::TypeRef(_) => {}
    }
}
