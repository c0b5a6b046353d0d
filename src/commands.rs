use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::node::OutlineNode;

/// Command interface between a host (tree view, key bindings, save hooks) and an
/// [`OutlineProvider`](crate::provider::OutlineProvider).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// Re-scan the whole document and rebuild the forest.
    Refresh,
    /// Move the caret to column 0 of a zero-based line.
    JumpToLine(usize),
    /// The top-level entries.
    GetRoots,
    /// Children of the node with this key, or the roots for `None`.
    GetChildren(Option<String>),
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Op::Refresh => write!(f, "Refresh"),
            Op::JumpToLine(line) => write!(f, "JumpToLine({line})"),
            Op::GetRoots => write!(f, "GetRoots"),
            Op::GetChildren(Some(key)) => write!(f, "GetChildren({key})"),
            Op::GetChildren(None) => write!(f, "GetChildren(<root>)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpResult {
    Refreshed,
    Jumped(JumpTarget),
    Nodes(Vec<OutlineNode>),
}

/// Where a jump lands: the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JumpTarget {
    pub line: usize,
    pub column: usize,
}

impl JumpTarget {
    pub fn line_start(line: usize) -> Self {
        JumpTarget { line, column: 0 }
    }
}

impl From<&OutlineNode> for JumpTarget {
    fn from(node: &OutlineNode) -> Self {
        JumpTarget::line_start(node.line())
    }
}

/// The editor side of navigation: place the caret at `target` and scroll it into view.
pub trait Navigator {
    fn jump_to_line(&mut self, target: JumpTarget);
}

/// A navigator that only remembers where it was sent. Useful for headless hosts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingNavigator {
    pub jumps: Vec<JumpTarget>,
}

impl RecordingNavigator {
    pub fn last(&self) -> Option<JumpTarget> {
        self.jumps.last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn jump_to_line(&mut self, target: JumpTarget) {
        self.jumps.push(target);
    }
}
