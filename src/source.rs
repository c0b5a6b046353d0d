//! Line-indexed text access.
//!
//! [`LineSource`] is the only view of a document the outline core needs: how many lines
//! there are and the text of each one. [`TextDocument`] is the in-memory buffer used by
//! the CLI and the watch service.

use crate::error::OutlineError;
use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

pub trait LineSource {
    fn line_count(&self) -> usize;

    /// Text of line `index` without its line terminator, `None` past the end.
    fn line_at(&self, index: usize) -> Option<&str>;
}

impl LineSource for [String] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_at(&self, index: usize) -> Option<&str> {
        self.get(index).map(String::as_str)
    }
}

impl LineSource for [&str] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_at(&self, index: usize) -> Option<&str> {
        self.get(index).copied()
    }
}

impl LineSource for Vec<String> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_at(&self, index: usize) -> Option<&str> {
        self.as_slice().line_at(index)
    }
}

impl LineSource for Vec<&str> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_at(&self, index: usize) -> Option<&str> {
        self.as_slice().line_at(index)
    }
}

impl<S: LineSource + ?Sized> LineSource for &S {
    fn line_count(&self) -> usize {
        (**self).line_count()
    }

    fn line_at(&self, index: usize) -> Option<&str> {
        (**self).line_at(index)
    }
}

/// Split `text` the way an editor counts lines: `\n`, `\r\n` and a lone `\r` each end a
/// line, a trailing break opens one more (empty) line, and an empty text is a single
/// empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(idx) = rest.find(['\r', '\n']) {
        lines.push(rest[..idx].to_string());
        let width = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[idx + width..];
    }
    lines.push(rest.to_string());
    lines
}

/// An in-memory document, optionally backed by a file on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDocument {
    path: Option<PathBuf>,
    lines: Vec<String>,
}

impl TextDocument {
    pub fn new(text: &str) -> Self {
        TextDocument {
            path: None,
            lines: split_lines(text),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, OutlineError> {
        let path = path.as_ref();
        tracing::debug!("Reading document {:?}", path);
        let text = read_to_string(path)?;
        Ok(TextDocument {
            path: Some(path.to_path_buf()),
            lines: split_lines(&text),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace the buffer contents, as an editor does before a save.
    pub fn set_text(&mut self, text: &str) {
        self.lines = split_lines(text);
    }

    /// Re-read the backing file. Documents without a path are left untouched.
    pub fn reload(&mut self) -> Result<(), OutlineError> {
        if let Some(path) = &self.path {
            let text = read_to_string(path)?;
            self.lines = split_lines(&text);
        }
        Ok(())
    }
}

impl From<&str> for TextDocument {
    fn from(text: &str) -> Self {
        TextDocument::new(text)
    }
}

impl LineSource for TextDocument {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_at(&self, index: usize) -> Option<&str> {
        self.lines.line_at(index)
    }
}
