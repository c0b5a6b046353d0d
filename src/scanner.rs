//! Recognition of annotation comments.
//!
//! An annotation is a single line of the form `// #-- payload` or `/* #-- payload */`,
//! with optional leading and trailing whitespace. The scanner yields the trimmed payload
//! of every such line, in line order; everything else is skipped.

use crate::{config::SyntaxConfig, error::OutlineError, source::LineSource};
use once_cell::sync::Lazy;
use regex::Regex;

const COMMENT_OPEN: &str = r"^\s*(//|/\*)\s*";
const PAYLOAD_TAIL: &str = r"\s*(.+?)\s*(\*/)?\s*$";

/// The stock annotation pattern, `#--` marker.
pub static DEFAULT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(//|/\*)\s*#--\s*(.+?)\s*(\*/)?\s*$")
        .expect("the default annotation pattern is valid")
});

/// One matched annotation: its raw payload and zero-based line index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAnnotation {
    pub label: String,
    pub line: usize,
}

impl RawAnnotation {
    pub fn new(label: impl Into<String>, line: usize) -> Self {
        RawAnnotation {
            label: label.into(),
            line,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LineScanner {
    pattern: Regex,
}

impl Default for LineScanner {
    fn default() -> Self {
        LineScanner {
            pattern: DEFAULT_PATTERN.clone(),
        }
    }
}

impl LineScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scanner for a configured marker token. The marker is matched literally.
    pub fn with_syntax(syntax: &SyntaxConfig) -> Result<Self, OutlineError> {
        if syntax.is_default() {
            return Ok(Self::default());
        }
        let pattern = Regex::new(&format!(
            "{COMMENT_OPEN}{}{PAYLOAD_TAIL}",
            regex::escape(syntax.marker.trim())
        ))?;
        Ok(LineScanner { pattern })
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// The trimmed payload of `text` when it is an annotation line.
    pub fn match_line<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(2))
            .map(|payload| payload.as_str().trim())
    }

    /// Every annotation of `source`, from line 0 to the last line.
    pub fn scan<'a, S>(&'a self, source: &'a S) -> impl Iterator<Item = RawAnnotation> + 'a
    where
        S: LineSource + ?Sized,
    {
        (0..source.line_count()).filter_map(move |line| {
            let text = source.line_at(line)?;
            let label = self.match_line(text)?;
            tracing::trace!("annotation on line {line}: {label:?}");
            Some(RawAnnotation::new(label, line))
        })
    }
}
