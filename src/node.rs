use serde::{Deserialize, Serialize};

/// Joins path segments inside node keys under the default `::` separator.
pub const KEY_JOINER: &str = " :: ";

/// Tag that precedes the line index in a leaf key.
pub const LEAF_LINE_TAG: &str = "line number ";

/// The key joiner for labels split on `separator`. Segments are split on the separator,
/// so no segment can contain the joiner and a joined key decodes one way only.
pub fn key_joiner(separator: &str) -> String {
    format!(" {separator} ")
}

/// Key of the container for `segment` under the container keyed `parent`.
pub fn container_key(parent: &str, segment: &str, joiner: &str) -> String {
    format!("{parent}{joiner}{segment}")
}

/// Key of a leaf. The line suffix keeps repeated leaf labels distinct.
pub fn leaf_key(parent: &str, segment: &str, line: usize, joiner: &str) -> String {
    format!("{parent}{joiner}{segment}{joiner}{LEAF_LINE_TAG}{line}")
}

/// One outline entry.
///
/// Flat annotations and path leaves have no children. Containers (path segments other
/// than the last) collect the entries sharing their prefix, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    label: String,
    line: usize,
    key: String,
    children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn new(label: impl Into<String>, line: usize, key: impl Into<String>) -> Self {
        OutlineNode {
            label: label.into(),
            line,
            key: key.into(),
            children: Vec::new(),
        }
    }

    pub(crate) fn with_children(mut self, children: Vec<OutlineNode>) -> Self {
        self.children = children;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Zero-based line the entry was first seen on. This is the jump target.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn children(&self) -> &[OutlineNode] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Depth-first search of this node and its descendants for `key`.
    pub fn find(&self, key: &str) -> Option<&OutlineNode> {
        if self.key == key {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(key))
    }

    /// Number of nodes in this subtree, self included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::size).sum::<usize>()
    }
}
