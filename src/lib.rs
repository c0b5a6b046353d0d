//! # comment-outline
//!
//! Builds a navigable outline of a document from specially-marked comments.
//!
//! ## Overview
//!
//! Any line of the form
//!
//! ```text
//! // #-- Setup :: load config
//! /* #-- Setup :: logging */
//! // #-- main loop
//! ```
//!
//! is an *annotation*. Labels containing `::` are paths and nest under shared
//! containers; other labels are flat top-level entries. The outline of the snippet above
//! is
//!
//! ```text
//! Setup
//!   load config
//!   logging
//! main loop
//! ```
//!
//! The hierarchy comes only from the labels, never from the host language's syntax, so
//! the same outline works for any language with `//` or `/* */` comments.
//!
//! ## Architecture
//!
//! - **[`scanner`]**: recognises annotation lines and yields `(label, line)` in line order
//! - **[`forest`]**: folds those pairs into a forest, merging containers by path
//! - **[`provider`]**: owns a document and its current forest, rebuilds on
//!   [`refresh`](provider::OutlineProvider::refresh) and notifies subscribers
//! - **[`commands`]**: the `Refresh` / `JumpToLine` / query command surface and the
//!   [`Navigator`](commands::Navigator) seam to the editor
//! - **[`watch`]** (feature `service`): refresh on every save of a file
//!
//! ## Quick Start
//!
//! ```rust
//! use comment_outline::{provider::OutlineProvider, source::TextDocument};
//!
//! let text = "// #-- G :: Sub :: step1\nlet a = 1;\n// #-- G :: Sub :: step2\n";
//! let mut provider = OutlineProvider::new(TextDocument::new(text));
//! let changes = provider.subscribe();
//!
//! let g = &provider.roots()[0];
//! assert_eq!(g.label(), "G");
//! assert_eq!(g.children()[0].children().len(), 2);
//!
//! provider.source_mut().set_text("fn main() {}\n");
//! provider.refresh();
//! assert!(provider.roots().is_empty());
//! assert!(changes.try_recv().is_ok());
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod event;
pub mod forest;
pub mod node;
pub mod provider;
pub mod scanner;
pub mod source;
#[cfg(test)]
mod tests;
#[cfg(feature = "service")]
pub mod watch;

pub use error::*;
pub use forest::{build_forest, Forest, ForestBuilder};
pub use node::OutlineNode;
pub use provider::{outline, OutlineProvider};
pub use scanner::{LineScanner, RawAnnotation};
pub use source::{LineSource, TextDocument};
