//! Per-line gutter marks.
//!
//! Breakpoints and bookmarks are anchored at the start of their line, so they move with the text
//! the same way fold regions do. A mark whose line is removed lands on the line that absorbed it.

use crate::anchor::Anchor;
use crate::document::Document;
use std::collections::BTreeSet;

/// Kind of line mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineMarkKind {
    /// Debugger breakpoint.
    Breakpoint,
    /// Navigation bookmark.
    Bookmark,
}

/// Breakpoints and bookmarks for one document.
#[derive(Debug, Clone, Default)]
pub struct LineMarks {
    marks: Vec<(LineMarkKind, Anchor)>,
}

impl LineMarks {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove a mark on `line`. Returns `true` if the line is now marked.
    ///
    /// Edits can move two marks of one kind onto the same line; removing clears all of them.
    pub fn toggle(&mut self, document: &mut Document, kind: LineMarkKind, line: usize) -> bool {
        let line = document.clamp_line(line);

        let before = self.marks.len();
        self.marks.retain(|&(k, anchor)| {
            let hit = k == kind && document.anchor_line(anchor) == Some(line);
            if hit {
                document.release_anchor(anchor);
            }
            !hit
        });
        if self.marks.len() < before {
            tracing::trace!(line, ?kind, "removed line mark");
            return false;
        }

        let anchor = document.create_anchor(document.line_start(line));
        self.marks.push((kind, anchor));
        tracing::trace!(line, ?kind, "added line mark");
        true
    }

    /// Returns `true` if `line` carries a mark of `kind`.
    pub fn contains(&self, document: &Document, kind: LineMarkKind, line: usize) -> bool {
        self.marks
            .iter()
            .any(|&(k, anchor)| k == kind && document.anchor_line(anchor) == Some(line))
    }

    /// Current lines marked with `kind`, sorted and deduplicated.
    pub fn lines(&self, document: &Document, kind: LineMarkKind) -> BTreeSet<usize> {
        self.marks
            .iter()
            .filter(|&&(k, _)| k == kind)
            .filter_map(|&(_, anchor)| document.anchor_line(anchor))
            .collect()
    }

    /// Number of marks, counting marks that edits merged onto one line separately.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if there are no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Remove every mark and release its anchor.
    pub fn clear(&mut self, document: &mut Document) {
        for (_, anchor) in self.marks.drain(..) {
            document.release_anchor(anchor);
        }
    }
}
