//! Shared test utilities for outline testing

use crate::{forest::Forest, node::OutlineNode, provider::outline, source::TextDocument};
use std::collections::{BTreeSet, HashSet};

/// Initialize logging for tests
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Build a document whose line `i` is `lines[i]`.
pub fn document(lines: &[&str]) -> TextDocument {
    TextDocument::new(&lines.join("\n"))
}

/// Place each `(line, text)` at its line index, padding the gaps with code.
pub fn sparse_document(entries: &[(usize, &str)]) -> TextDocument {
    let len = entries.iter().map(|(line, _)| line + 1).max().unwrap_or(0);
    let mut lines: Vec<String> = (0..len).map(|i| format!("let v{i} = {i};")).collect();
    for (line, text) in entries {
        lines[*line] = text.to_string();
    }
    TextDocument::new(&lines.join("\n"))
}

pub fn outline_of(entries: &[(usize, &str)]) -> Forest {
    outline(&sparse_document(entries))
}

pub fn labels(nodes: &[OutlineNode]) -> Vec<&str> {
    nodes.iter().map(OutlineNode::label).collect()
}

/// Check the structural invariants every forest must satisfy, returning a description of
/// each violation.
pub fn built_in_test(forest: &Forest) -> Vec<String> {
    let mut errors = Vec::new();
    let mut container_keys = HashSet::new();
    errors.extend(order_violations("<root>", forest.roots()));
    for (_, node) in forest.walk() {
        let mut sibling_keys = BTreeSet::new();
        for child in node.children() {
            if !sibling_keys.insert(child.key()) {
                errors.push(format!("{:?} has duplicate child key {:?}", node.key(), child.key()));
            }
        }
        if node.has_children() && !container_keys.insert(node.key()) {
            errors.push(format!("container {:?} appears more than once", node.key()));
        }
        errors.extend(order_violations(node.key(), node.children()));
    }
    errors
}

fn order_violations(parent: &str, nodes: &[OutlineNode]) -> Vec<String> {
    nodes
        .windows(2)
        .filter(|pair| pair[0].line() > pair[1].line())
        .map(|pair| {
            format!(
                "children of {parent:?} out of first-seen order: {:?} before {:?}",
                pair[0].key(),
                pair[1].key()
            )
        })
        .collect()
}
