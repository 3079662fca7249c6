//! Footnote numbering.
//!
//! Definitions are numbered by the order of their first reference. After
//! numbering, referenced definitions are moved to the end of the document in
//! that order and unreferenced ones are dropped.

use std::collections::HashMap;

use markly_ast::{Arena, Node, NodeData, NodeId, NodeType};
use tracing::debug;

/// Numbers references and definitions under `doc` and moves the definitions
/// to the end of the document.
pub(crate) fn process(arena: &mut Arena, doc: NodeId) {
    let mut definitions: HashMap<String, NodeId> = HashMap::new();
    let mut all_definitions = Vec::new();
    let mut references = Vec::new();
    for node in arena.walk(doc) {
        match arena.data(node) {
            NodeData::FootnoteDefinition(def) => {
                definitions.entry(normalize(&def.label)).or_insert(node);
                all_definitions.push(node);
            }
            NodeData::FootnoteReference(_) => references.push(node),
            _ => {}
        }
    }

    if all_definitions.is_empty() && references.is_empty() {
        return;
    }

    let mut ordered: Vec<NodeId> = Vec::new();
    // Definition to (ordinal, reference count).
    let mut counts: HashMap<NodeId, (u32, u32)> = HashMap::new();

    for reference in references {
        let NodeData::FootnoteReference(data) = arena.data(reference) else {
            continue;
        };
        let Some(&definition) = definitions.get(&normalize(&data.label)) else {
            let literal = format!("[^{}]", data.label);
            debug!("Footnote reference {literal} has no definition");
            let text = arena.alloc(
                Node::new(NodeType::Text)
                    .with_literal(literal)
                    .with_position(arena.position(reference)),
            );
            arena.insert_before(reference, text);
            arena.unlink(reference);
            continue;
        };

        let (ordinal, count) = counts.entry(definition).or_insert_with(|| {
            ordered.push(definition);
            (ordered.len() as u32, 0)
        });
        *count += 1;
        let (ordinal, ref_index) = (*ordinal, *count);

        let NodeData::FootnoteDefinition(def) = arena.data(definition).clone() else {
            continue;
        };
        if let NodeData::FootnoteReference(data) = arena.data_mut(reference) {
            data.label = def.label;
            data.ordinal = ordinal;
            data.ref_index = ref_index;
        }
    }

    for definition in all_definitions {
        arena.unlink(definition);
    }
    for definition in ordered {
        let reference_count = counts.get(&definition).map_or(0, |&(_, count)| count);
        if let NodeData::FootnoteDefinition(def) = arena.data_mut(definition) {
            def.reference_count = reference_count;
        }
        arena.append_child(doc, definition);
    }

    debug!("Numbered {} footnote definitions", counts.len());
}

/// Labels match case-insensitively with collapsed whitespace.
fn normalize(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
