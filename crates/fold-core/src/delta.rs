//! Edit notifications.
//!
//! The folding engine does not patch regions incrementally; it only needs to know *that* the
//! document changed so a rebuild can be scheduled. Edits are still recorded in a structured form
//! (character offsets, Unicode scalar values) so hosts can inspect what was coalesced.

/// A single document edit expressed in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    /// `len` characters inserted at `offset`.
    Insert {
        /// Character offset of the insertion.
        offset: usize,
        /// Inserted length in characters.
        len: usize,
    },
    /// `len` characters removed starting at `offset`.
    Delete {
        /// Character offset of the first removed character.
        offset: usize,
        /// Removed length in characters.
        len: usize,
    },
}

impl TextEdit {
    /// Start offset of the edit.
    pub fn offset(&self) -> usize {
        match *self {
            TextEdit::Insert { offset, .. } | TextEdit::Delete { offset, .. } => offset,
        }
    }

    /// Length of the edit in characters.
    pub fn len(&self) -> usize {
        match *self {
            TextEdit::Insert { len, .. } | TextEdit::Delete { len, .. } => len,
        }
    }

    /// Returns `true` if the edit changes nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Net change in document length (characters).
    pub fn char_delta(&self) -> isize {
        match *self {
            TextEdit::Insert { len, .. } => len as isize,
            TextEdit::Delete { len, .. } => -(len as isize),
        }
    }
}
