//! Reference host document.
//!
//! Text lives in a [`ropey::Rope`], which gives `O(log N)` line/offset conversion, and stable
//! offsets live in an [`AnchorTable`] that is shifted on every edit. All offsets are character
//! offsets unless a method name says `byte`.
//!
//! Every argument is clamped: a line past the end means the last line, an offset past the end
//! means the end of the text.

use crate::anchor::{Anchor, AnchorTable};
use crate::delta::TextEdit;
use ropey::Rope;
use std::ops::Range;

/// Mutable text with line primitives and edit-stable anchors.
#[derive(Debug, Clone)]
pub struct Document {
    rope: Rope,
    anchors: AnchorTable,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Create a document from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            anchors: AnchorTable::new(),
        }
    }

    /// Underlying rope.
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Complete text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Total line count. An empty document, or one ending in a newline, still has a last
    /// (empty) line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total byte count.
    pub fn byte_count(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Clamp a line number to the valid range.
    pub fn clamp_line(&self, line: usize) -> usize {
        line.min(self.line_count().saturating_sub(1))
    }

    /// Character offset of the first character of `line`.
    pub fn line_start(&self, line: usize) -> usize {
        self.rope.line_to_char(self.clamp_line(line))
    }

    /// Byte offset of the first byte of `line`.
    pub fn line_start_byte(&self, line: usize) -> usize {
        self.rope.line_to_byte(self.clamp_line(line))
    }

    /// Character range of `line`, including its line terminator.
    pub fn line_range(&self, line: usize) -> Range<usize> {
        let line = self.clamp_line(line);
        let start = self.rope.line_to_char(line);
        start..start + self.rope.line(line).len_chars()
    }

    /// Text of `line`, including its line terminator.
    pub fn line_text(&self, line: usize) -> String {
        self.rope.line(self.clamp_line(line)).to_string()
    }

    /// Line containing the character at `offset`.
    pub fn char_to_line(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset.min(self.rope.len_chars()))
    }

    /// Line containing the byte at `byte`.
    pub fn byte_to_line(&self, byte: usize) -> usize {
        self.rope.byte_to_line(byte.min(self.rope.len_bytes()))
    }

    /// Insert `text` at character `offset`, shifting anchors.
    pub fn insert(&mut self, offset: usize, text: &str) -> TextEdit {
        let offset = offset.min(self.rope.len_chars());
        let len = text.chars().count();
        if len > 0 {
            self.rope.insert(offset, text);
            self.anchors.apply_insert(offset, len);
        }
        TextEdit::Insert { offset, len }
    }

    /// Delete `len` characters starting at `offset`, shifting or clamping anchors.
    pub fn delete(&mut self, offset: usize, len: usize) -> TextEdit {
        let start = offset.min(self.rope.len_chars());
        let end = start.saturating_add(len).min(self.rope.len_chars());
        if start < end {
            self.rope.remove(start..end);
            self.anchors.apply_delete(start, end - start);
        }
        TextEdit::Delete {
            offset: start,
            len: end - start,
        }
    }

    /// Create an anchor at character `offset`.
    pub fn create_anchor(&mut self, offset: usize) -> Anchor {
        let offset = offset.min(self.rope.len_chars());
        self.anchors.create(offset)
    }

    /// Create an anchor at the start of `line`.
    pub fn anchor_line_start(&mut self, line: usize) -> Anchor {
        let offset = self.line_start(line);
        self.anchors.create(offset)
    }

    /// Current character offset of `anchor`, or `None` if it was released.
    pub fn anchor_offset(&self, anchor: Anchor) -> Option<usize> {
        self.anchors
            .offset(anchor)
            .map(|offset| offset.min(self.rope.len_chars()))
    }

    /// Line containing `anchor`, or `None` if it was released.
    pub fn anchor_line(&self, anchor: Anchor) -> Option<usize> {
        self.anchor_offset(anchor)
            .map(|offset| self.rope.char_to_line(offset))
    }

    /// Release an anchor.
    pub fn release_anchor(&mut self, anchor: Anchor) -> bool {
        self.anchors.release(anchor)
    }

    /// Anchor table (read-only).
    pub fn anchors(&self) -> &AnchorTable {
        &self.anchors
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_has_one_line() {
        let doc = Document::new();
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.char_count(), 0);
        assert_eq!(doc.line_start(5), 0);
    }

    #[test]
    fn test_line_primitives() {
        let doc = Document::from_text("ab\ncde\nf");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_start(1), 3);
        assert_eq!(doc.line_start(2), 7);
        assert_eq!(doc.line_range(1), 3..7);
        assert_eq!(doc.line_text(1), "cde\n");
        assert_eq!(doc.char_to_line(6), 1);
        assert_eq!(doc.char_to_line(100), 2);
        assert_eq!(doc.clamp_line(99), 2);
    }

    #[test]
    fn test_byte_and_char_offsets_differ_for_cjk() {
        let doc = Document::from_text("你好\n世界");
        assert_eq!(doc.line_start(1), 3);
        assert_eq!(doc.line_start_byte(1), 7);
        assert_eq!(doc.byte_to_line(7), 1);
        assert_eq!(doc.byte_to_line(6), 0);
    }

    #[test]
    fn test_anchor_follows_line_across_edits() {
        let mut doc = Document::from_text("a\nb\nc\n");
        let anchor = doc.anchor_line_start(2);
        assert_eq!(doc.anchor_line(anchor), Some(2));

        doc.insert(0, "x\ny\n");
        assert_eq!(doc.anchor_line(anchor), Some(4));
        assert_eq!(doc.text(), "x\ny\na\nb\nc\n");

        doc.delete(0, 4);
        assert_eq!(doc.anchor_line(anchor), Some(2));
    }

    #[test]
    fn test_anchor_clamps_when_range_deleted() {
        let mut doc = Document::from_text("line0\nline1\nline2\n");
        let anchor = doc.anchor_line_start(1); // offset 6
        doc.delete(4, 6); // removes "0\nline" incl. the anchored char
        assert_eq!(doc.anchor_offset(anchor), Some(4));
        assert_eq!(doc.anchor_line(anchor), Some(0));
    }

    #[test]
    fn test_edits_are_clamped() {
        let mut doc = Document::from_text("abc");
        assert_eq!(doc.insert(99, "d"), TextEdit::Insert { offset: 3, len: 1 });
        assert_eq!(doc.delete(2, 99), TextEdit::Delete { offset: 2, len: 2 });
        assert_eq!(doc.text(), "ab");
        assert_eq!(doc.delete(10, 1), TextEdit::Delete { offset: 2, len: 0 });
    }

    #[test]
    fn test_mid_line_anchor_tracks_character() {
        let mut doc = Document::from_text("abc\ndef\n");
        assert_eq!(doc.rope().len_lines(), 3);
        let anchor = doc.create_anchor(5); // 'e'

        let edit = doc.insert(4, "xy");
        assert_eq!(edit.char_delta(), 2);
        assert_eq!(doc.anchor_offset(anchor), Some(7));
        assert_eq!(doc.rope().char(7), 'e');

        let edit = doc.delete(0, 4);
        assert_eq!(edit.char_delta(), -4);
        assert_eq!(doc.anchor_offset(anchor), Some(3));
        assert_eq!(doc.anchor_line(anchor), Some(0));

        let past_end = doc.create_anchor(99);
        assert_eq!(doc.anchor_offset(past_end), Some(doc.char_count()));
    }
}
