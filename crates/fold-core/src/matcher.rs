//! Delimiter matching.
//!
//! Each [`TriggerPair`] is scanned as an isolated stream over the whole text: the symbols of other
//! pairs are invisible to it. Scanning is split in two layers:
//!
//! - [`DelimiterScan`] is line-agnostic and yields the byte ranges of every matched
//!   opening/closing delimiter pair, lazily.
//! - [`RegionMatcher`] maps those ranges to lines through the [`Document`] and drops matches that
//!   open and close on the same line, since only multi-line spans can be folded.
//!
//! # Single-character pairs
//!
//! When both symbols are exactly one character, a stack of unmatched openers is kept. A closing
//! character pops the most recent opener (LIFO), and a closer with an empty stack is ignored. If
//! the start and end character are the same, the start test wins and nothing is ever matched.
//!
//! # Multi-character pairs
//!
//! The scan looks for a literal start symbol, then walks forward with a depth counter starting at
//! 1. At every position the end symbol is tested **first**; only if it does not match is the start
//! symbol tested. A closer that does not bring the depth to zero advances the scan by one
//! character, so overlapping closers (`)))` for `))`) are seen at every position. An opener that
//! reaches the end of the text with depth > 0 produces nothing, and the remainder of the text is
//! consumed by that attempt.

use crate::document::Document;
use crate::triggers::TriggerPair;
use std::ops::Range;
use std::str::CharIndices;

/// Byte ranges of a matched opening and closing delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterMatch {
    /// Byte range of the opening symbol.
    pub open: Range<usize>,
    /// Byte range of the closing symbol.
    pub close: Range<usize>,
}

/// A delimiter match spanning at least two lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRegion {
    /// Delimiter byte ranges.
    pub delimiters: DelimiterMatch,
    /// Line containing the opening symbol.
    pub start_line: usize,
    /// Line containing the last byte of the closing symbol.
    pub end_line: usize,
}

impl MatchedRegion {
    /// Byte offset of the opening symbol.
    pub fn start_offset(&self) -> usize {
        self.delimiters.open.start
    }

    /// Byte offset of the closing symbol.
    pub fn end_offset(&self) -> usize {
        self.delimiters.close.start
    }
}

enum ScanState<'a> {
    Single {
        chars: CharIndices<'a>,
        start: char,
        end: char,
        stack: Vec<usize>,
    },
    Multi {
        start: &'a str,
        end: &'a str,
        pos: usize,
    },
}

/// Lazy scan of one trigger pair over a text.
pub struct DelimiterScan<'a> {
    text: &'a str,
    state: ScanState<'a>,
}

impl<'a> DelimiterScan<'a> {
    /// Scan `text` for `pair`.
    pub fn new(text: &'a str, pair: &'a TriggerPair) -> Self {
        let state = match pair.single_chars() {
            Some((start, end)) => ScanState::Single {
                chars: text.char_indices(),
                start,
                end,
                stack: Vec::new(),
            },
            None => ScanState::Multi {
                start: pair.start(),
                end: pair.end(),
                pos: 0,
            },
        };
        Self { text, state }
    }
}

impl Iterator for DelimiterScan<'_> {
    type Item = DelimiterMatch;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            ScanState::Single {
                chars,
                start,
                end,
                stack,
            } => {
                for (idx, ch) in chars.by_ref() {
                    if ch == *start {
                        stack.push(idx);
                    } else if ch == *end {
                        if let Some(open_at) = stack.pop() {
                            return Some(DelimiterMatch {
                                open: open_at..open_at + start.len_utf8(),
                                close: idx..idx + end.len_utf8(),
                            });
                        }
                    }
                }
                None
            }
            ScanState::Multi { start, end, pos } => {
                let text = self.text;
                while *pos + start.len() <= text.len() {
                    if !text[*pos..].starts_with(*start) {
                        *pos = next_char_boundary(text, *pos);
                        continue;
                    }

                    let open = *pos..*pos + start.len();
                    *pos = open.end;
                    if let Some(close) = close_nested(text, start, end, pos) {
                        return Some(DelimiterMatch { open, close });
                    }
                }
                None
            }
        }
    }
}

/// Walk forward from `*pos` (just past an opener, depth 1) to the matching closer.
///
/// On success `*pos` is left just past the closer. On failure it is left where the closer could no
/// longer fit.
fn close_nested(text: &str, start: &str, end: &str, pos: &mut usize) -> Option<Range<usize>> {
    let mut depth = 1usize;
    while *pos + end.len() <= text.len() {
        let rest = &text[*pos..];
        if rest.starts_with(end) {
            depth -= 1;
            if depth == 0 {
                let close = *pos..*pos + end.len();
                *pos = close.end;
                return Some(close);
            }
        } else if rest.starts_with(start) {
            depth += 1;
            *pos += start.len();
            continue;
        }
        *pos = next_char_boundary(text, *pos);
    }
    None
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |ch| pos + ch.len_utf8())
}

/// Match a single region forward from an opener at byte `open_at`.
///
/// Used for on-demand folding of one line. Returns `None` if `pair`'s start symbol is not at
/// `open_at` or the opener is never closed.
pub fn match_forward(text: &str, open_at: usize, pair: &TriggerPair) -> Option<DelimiterMatch> {
    if !text.get(open_at..)?.starts_with(pair.start()) {
        return None;
    }
    let open = open_at..open_at + pair.start().len();

    if let Some((start, end)) = pair.single_chars() {
        let mut depth = 1usize;
        for (idx, ch) in text[open.end..].char_indices() {
            if ch == start {
                depth += 1;
            } else if ch == end {
                depth -= 1;
                if depth == 0 {
                    let at = open.end + idx;
                    return Some(DelimiterMatch {
                        open,
                        close: at..at + end.len_utf8(),
                    });
                }
            }
        }
        return None;
    }

    let mut pos = open.end;
    let close = close_nested(text, pair.start(), pair.end(), &mut pos)?;
    Some(DelimiterMatch { open, close })
}

/// Lazy scan of one trigger pair, yielding only matches that span more than one line.
pub struct RegionMatcher<'a> {
    scan: DelimiterScan<'a>,
    document: &'a Document,
}

impl<'a> RegionMatcher<'a> {
    /// Scan `text` (the current contents of `document`) for `pair`.
    pub fn new(document: &'a Document, text: &'a str, pair: &'a TriggerPair) -> Self {
        debug_assert_eq!(text.len(), document.byte_count());
        Self {
            scan: DelimiterScan::new(text, pair),
            document,
        }
    }
}

impl Iterator for RegionMatcher<'_> {
    type Item = MatchedRegion;

    fn next(&mut self) -> Option<Self::Item> {
        for delimiters in self.scan.by_ref() {
            if let Some(region) = to_region(self.document, delimiters) {
                return Some(region);
            }
        }
        None
    }
}

/// Attach lines to a delimiter match, or `None` if it does not span two lines.
pub fn to_region(document: &Document, delimiters: DelimiterMatch) -> Option<MatchedRegion> {
    let start_line = document.byte_to_line(delimiters.open.start);
    let end_line = document.byte_to_line(delimiters.close.end.saturating_sub(1));
    (end_line > start_line).then_some(MatchedRegion {
        delimiters,
        start_line,
        end_line,
    })
}
