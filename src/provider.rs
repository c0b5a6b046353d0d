//! The stateful outline component.
//!
//! [`OutlineProvider`] owns a document and the forest derived from it. Every
//! [`refresh`](OutlineProvider::refresh) re-scans the whole document, builds a new
//! forest and swaps it in as one immutable snapshot, then notifies subscribers with
//! [`Event::ForestChanged`]. Nothing from the previous forest survives the swap.

use std::sync::{mpsc::Receiver, mpsc::Sender, Arc};

use crate::{
    commands::{JumpTarget, Navigator, Op, OpResult},
    config::{OutlineConfig, DEFAULT_SEPARATOR},
    error::OutlineError,
    event::{Event, Subscribers},
    forest::{Forest, ForestBuilder},
    node::OutlineNode,
    scanner::LineScanner,
    source::LineSource,
};

/// Scan `source` and build its forest with the stock syntax.
pub fn outline<S: LineSource + ?Sized>(source: &S) -> Forest {
    build(source, &LineScanner::new(), DEFAULT_SEPARATOR)
}

fn build<S: LineSource + ?Sized>(source: &S, scanner: &LineScanner, separator: &str) -> Forest {
    let mut builder = ForestBuilder::with_separator(separator);
    let mut annotations = 0usize;
    for annotation in scanner.scan(source) {
        builder.push_annotation(&annotation);
        annotations += 1;
    }
    let forest = builder.finish();
    tracing::debug!(
        "Outline pass over {} lines: {} annotations, {} roots",
        source.line_count(),
        annotations,
        forest.roots().len()
    );
    forest
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Collapsible {
    None,
    Collapsed,
}

/// How a host should render one node.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TreeItem {
    pub label: String,
    pub collapsible: Collapsible,
    pub command: Op,
}

impl From<&OutlineNode> for TreeItem {
    fn from(node: &OutlineNode) -> Self {
        TreeItem {
            label: node.label().to_string(),
            collapsible: if node.has_children() {
                Collapsible::Collapsed
            } else {
                Collapsible::None
            },
            command: Op::JumpToLine(node.line()),
        }
    }
}

pub struct OutlineProvider<S> {
    source: S,
    scanner: LineScanner,
    separator: String,
    forest: Arc<Forest>,
    generation: u64,
    subscribers: Subscribers,
}

impl<S: LineSource> OutlineProvider<S> {
    /// Wrap `source` and run the initial parse.
    pub fn new(source: S) -> Self {
        Self::from_parts(source, LineScanner::new(), DEFAULT_SEPARATOR.to_string())
    }

    pub fn with_config(source: S, config: &OutlineConfig) -> Result<Self, OutlineError> {
        let scanner = LineScanner::with_syntax(&config.syntax)?;
        Ok(Self::from_parts(
            source,
            scanner,
            config.syntax.separator.clone(),
        ))
    }

    fn from_parts(source: S, scanner: LineScanner, separator: String) -> Self {
        let forest = Arc::new(build(&source, &scanner, &separator));
        OutlineProvider {
            source,
            scanner,
            separator,
            forest,
            generation: 0,
            subscribers: Subscribers::new(),
        }
    }

    pub fn roots(&self) -> &[OutlineNode] {
        self.forest.roots()
    }

    /// Children of `node`, or the roots when `node` is `None`.
    pub fn children<'a>(&'a self, node: Option<&'a OutlineNode>) -> &'a [OutlineNode] {
        match node {
            Some(node) => node.children(),
            None => self.roots(),
        }
    }

    /// The current forest. The snapshot stays valid, unchanged, after later refreshes.
    pub fn snapshot(&self) -> Arc<Forest> {
        self.forest.clone()
    }

    pub fn find(&self, key: &str) -> Option<&OutlineNode> {
        self.forest.find(key)
    }

    pub fn tree_item(&self, node: &OutlineNode) -> TreeItem {
        TreeItem::from(node)
    }

    /// Number of completed refreshes since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the document. Changes are not reflected until the next refresh.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Receive an [`Event::ForestChanged`] after every completed refresh.
    pub fn subscribe(&mut self) -> Receiver<Event> {
        self.subscribers.subscribe()
    }

    pub fn attach(&mut self, tx: Sender<Event>) {
        self.subscribers.attach(tx);
    }

    /// Full re-scan and rebuild, then one change notification.
    pub fn refresh(&mut self) {
        self.forest = Arc::new(build(&self.source, &self.scanner, &self.separator));
        self.generation += 1;
        let delivered = self.subscribers.fire(Event::ForestChanged);
        tracing::debug!(
            "Outline refresh #{} notified {} subscriber(s)",
            self.generation,
            delivered
        );
    }

    pub fn execute(
        &mut self,
        op: Op,
        navigator: &mut dyn Navigator,
    ) -> Result<OpResult, OutlineError> {
        tracing::debug!("Executing {op}");
        match op {
            Op::Refresh => {
                self.refresh();
                Ok(OpResult::Refreshed)
            }
            Op::JumpToLine(line) => {
                let target = JumpTarget::line_start(line);
                navigator.jump_to_line(target);
                Ok(OpResult::Jumped(target))
            }
            Op::GetRoots | Op::GetChildren(None) => Ok(OpResult::Nodes(self.roots().to_vec())),
            Op::GetChildren(Some(key)) => self
                .find(&key)
                .map(|node| OpResult::Nodes(node.children().to_vec()))
                .ok_or_else(|| OutlineError::NotFound(format!("no outline node with key {key:?}"))),
        }
    }
}

/// Start outlining the active document. Declines when there is none.
pub fn activate<S: LineSource>(active: Option<S>) -> Option<OutlineProvider<S>> {
    match active {
        Some(source) => Some(OutlineProvider::new(source)),
        None => {
            tracing::debug!("No active document, outline not activated");
            None
        }
    }
}
