//! Assembly of annotations into an outline forest.
//!
//! Labels containing the separator (`::` by default) are paths: every segment but the
//! last names a container, the last names a leaf. Containers are identified by their
//! accumulated path string, so `G :: Sub :: a` on one line and `G :: Sub :: b` fifty
//! lines later share the `G` and `G :: Sub` nodes. Leaves are never shared; their key
//! carries the line they were found on. Labels without the separator are flat roots.
//!
//! The builder works on an arena of pending nodes addressed by index, with the
//! container index mapping keys to arena slots. [`ForestBuilder::finish`] turns the
//! arena into owned [`OutlineNode`] trees, so a [`Forest`] is only ever observed
//! complete.

use crate::{
    config::DEFAULT_SEPARATOR,
    error::OutlineError,
    node::{container_key, key_joiner, leaf_key, OutlineNode},
    scanner::RawAnnotation,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

/// The ordered top-level entries of an outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<OutlineNode>,
}

impl Forest {
    pub fn roots(&self) -> &[OutlineNode] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<OutlineNode> {
        self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes at every depth.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(OutlineNode::size).sum()
    }

    pub fn find(&self, key: &str) -> Option<&OutlineNode> {
        self.roots.iter().find_map(|root| root.find(key))
    }

    pub fn to_json(&self) -> Result<String, OutlineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Pre-order traversal yielding each node with its depth (roots are depth 0).
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.roots.iter().rev().map(|node| (0, node)).collect(),
        }
    }
}

impl Display for Forest {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (depth, node) in self.walk() {
            writeln!(
                f,
                "{:indent$}{} (line {})",
                "",
                node.label(),
                node.line() + 1,
                indent = depth * 2
            )?;
        }
        Ok(())
    }
}

pub struct Walk<'a> {
    stack: Vec<(usize, &'a OutlineNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a OutlineNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

#[derive(Debug)]
struct PendingNode {
    label: String,
    line: usize,
    key: String,
    children: Vec<usize>,
}

/// Incrementally folds annotations, in line order, into a [`Forest`].
#[derive(Debug)]
pub struct ForestBuilder {
    separator: String,
    joiner: String,
    arena: Vec<PendingNode>,
    roots: Vec<usize>,
    containers: HashMap<String, usize>,
}

impl Default for ForestBuilder {
    fn default() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }
}

impl ForestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder splitting path labels on `separator`. An empty separator would match
    /// every label, so it falls back to the default.
    pub fn with_separator(separator: &str) -> Self {
        let separator = if separator.is_empty() {
            tracing::warn!("Empty path separator, using {DEFAULT_SEPARATOR:?}");
            DEFAULT_SEPARATOR
        } else {
            separator
        };
        ForestBuilder {
            separator: separator.to_string(),
            joiner: key_joiner(separator),
            arena: Vec::new(),
            roots: Vec::new(),
            containers: HashMap::new(),
        }
    }

    fn alloc(&mut self, label: &str, line: usize, key: String) -> usize {
        self.arena.push(PendingNode {
            label: label.to_string(),
            line,
            key,
            children: Vec::new(),
        });
        self.arena.len() - 1
    }

    /// Find the container registered under `key`, creating it at `line` if this is its
    /// first occurrence.
    fn container(&mut self, label: &str, line: usize, key: String) -> (usize, bool) {
        if let Some(&idx) = self.containers.get(&key) {
            return (idx, false);
        }
        let idx = self.alloc(label, line, key.clone());
        self.containers.insert(key, idx);
        (idx, true)
    }

    fn has_child(&self, parent: usize, key: &str) -> bool {
        self.arena[parent]
            .children
            .iter()
            .any(|&child| self.arena[child].key == key)
    }

    /// Add one annotation. Annotations must arrive in ascending line order.
    pub fn push(&mut self, label: &str, line: usize) {
        if !label.contains(self.separator.as_str()) {
            let idx = self.alloc(label, line, label.to_string());
            self.roots.push(idx);
            return;
        }

        let segments: Vec<&str> = label.split(self.separator.as_str()).map(str::trim).collect();
        let Some((top, rest)) = segments.split_first() else {
            return;
        };

        let (mut parent, created) = self.container(top, line, top.to_string());
        if created {
            self.roots.push(parent);
        }
        let mut parent_key = top.to_string();

        for (j, segment) in rest.iter().enumerate() {
            if j + 1 == rest.len() {
                let leaf = self.alloc(segment, line, leaf_key(&parent_key, segment, line, &self.joiner));
                self.arena[parent].children.push(leaf);
            } else {
                let key = container_key(&parent_key, segment, &self.joiner);
                let (idx, _) = self.container(segment, line, key.clone());
                if !self.has_child(parent, &key) {
                    self.arena[parent].children.push(idx);
                }
                parent = idx;
                parent_key = key;
            }
        }
    }

    pub fn push_annotation(&mut self, annotation: &RawAnnotation) {
        self.push(&annotation.label, annotation.line);
    }

    /// Materialise the arena into owned trees, consuming the builder.
    pub fn finish(self) -> Forest {
        let mut slots: Vec<Option<PendingNode>> = self.arena.into_iter().map(Some).collect();
        let roots = self
            .roots
            .iter()
            .filter_map(|&idx| materialise(&mut slots, idx))
            .collect();
        Forest { roots }
    }
}

impl Extend<RawAnnotation> for ForestBuilder {
    fn extend<I: IntoIterator<Item = RawAnnotation>>(&mut self, iter: I) {
        for annotation in iter {
            self.push_annotation(&annotation);
        }
    }
}

fn materialise(slots: &mut [Option<PendingNode>], idx: usize) -> Option<OutlineNode> {
    let pending = slots.get_mut(idx)?.take()?;
    let children = pending
        .children
        .iter()
        .filter_map(|&child| materialise(slots, child))
        .collect();
    Some(OutlineNode::new(pending.label, pending.line, pending.key).with_children(children))
}

/// Build a forest from annotations in line order, using the default `::` separator.
pub fn build_forest<I>(annotations: I) -> Forest
where
    I: IntoIterator<Item = RawAnnotation>,
{
    let mut builder = ForestBuilder::new();
    builder.extend(annotations);
    builder.finish()
}
