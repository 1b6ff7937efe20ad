//! Headless gutter output.
//!
//! [`GutterModel`] turns a [`VisibilityModel`] plus the fold-start lines of a [`FoldIndex`] into
//! rows a renderer can paint directly: the line label, the fold marker, the "+N" badge and any
//! breakpoint or bookmark on the line. It also hit-tests clicks against the marker column.

use crate::document::Document;
use crate::folding::FoldIndex;
use crate::visibility::VisibilityModel;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

/// How line labels are numbered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LineNumberMode {
    /// 1-based display line number.
    #[default]
    Absolute,
    /// Distance in display rows from the caret line (`0` on the caret line).
    Relative,
}

/// Marker drawn on a fold start line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldMarker {
    /// Region is open.
    Expanded,
    /// Region is folded.
    Collapsed,
}

/// One painted gutter row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GutterRow {
    /// Document line.
    pub line: usize,
    /// 1-based display line number.
    pub display_number: usize,
    /// Text to draw.
    pub label: String,
    /// Fold marker, if a region starts here.
    pub marker: Option<FoldMarker>,
    /// Lines hidden directly above this row (0 if none).
    pub hidden_after: usize,
    /// Whether the caret is on this line.
    pub is_current: bool,
    /// Whether a breakpoint is set on this line.
    pub breakpoint: bool,
    /// Whether a bookmark is set on this line.
    pub bookmark: bool,
}

/// Pixel geometry used for hit-testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GutterLayout {
    /// Height of one row in pixels.
    pub line_height: u32,
    /// Horizontal extent of the clickable marker.
    pub marker_x: RangeInclusive<u32>,
}

impl Default for GutterLayout {
    fn default() -> Self {
        Self {
            line_height: 16,
            marker_x: 10..=28,
        }
    }
}

impl GutterLayout {
    /// Display row under the vertical position `y` of a viewport scrolled by `scroll_y`.
    pub fn row_at(&self, y: u32, scroll_y: u32) -> usize {
        match self.line_height {
            0 => 0,
            height => (y.saturating_add(scroll_y) / height) as usize,
        }
    }
}

/// Gutter contents for one document state.
#[derive(Debug, Clone)]
pub struct GutterModel {
    visibility: VisibilityModel,
    markers: BTreeMap<usize, FoldMarker>,
    mode: LineNumberMode,
    caret_line: usize,
    layout: GutterLayout,
    breakpoints: BTreeSet<usize>,
    bookmarks: BTreeSet<usize>,
}

impl GutterModel {
    /// Build from explicit parts. `markers` holds one entry per fold start line.
    pub fn new(
        visibility: VisibilityModel,
        markers: BTreeMap<usize, FoldMarker>,
        mode: LineNumberMode,
        caret_line: usize,
    ) -> Self {
        let caret_line = visibility.snap_caret_line(caret_line);
        Self {
            visibility,
            markers,
            mode,
            caret_line,
            layout: GutterLayout::default(),
            breakpoints: BTreeSet::new(),
            bookmarks: BTreeSet::new(),
        }
    }

    /// Build from a fold index. When several regions start on one line, the first one decides
    /// the marker.
    pub fn from_index(
        index: &FoldIndex,
        document: &Document,
        mode: LineNumberMode,
        caret_line: usize,
    ) -> Self {
        let spans = index.spans(document);
        let mut markers = BTreeMap::new();
        for span in &spans {
            markers.entry(span.start_line).or_insert(if span.collapsed {
                FoldMarker::Collapsed
            } else {
                FoldMarker::Expanded
            });
        }
        let visibility = VisibilityModel::new(spans, document.line_count());
        Self::new(visibility, markers, mode, caret_line)
    }

    /// Replace the hit-test geometry.
    pub fn with_layout(mut self, layout: GutterLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the breakpoint and bookmark lines. Marks on hidden lines are not painted.
    pub fn with_line_marks(
        mut self,
        breakpoints: BTreeSet<usize>,
        bookmarks: BTreeSet<usize>,
    ) -> Self {
        self.breakpoints = breakpoints;
        self.bookmarks = bookmarks;
        self
    }

    /// Hit-test geometry.
    pub fn layout(&self) -> &GutterLayout {
        &self.layout
    }

    /// Visibility snapshot the rows are built from.
    pub fn visibility(&self) -> &VisibilityModel {
        &self.visibility
    }

    /// Caret line after snapping out of hidden runs.
    pub fn caret_line(&self) -> usize {
        self.caret_line
    }

    /// Marker for `line`, if a region starts there.
    pub fn marker_at(&self, line: usize) -> Option<FoldMarker> {
        self.markers.get(&line).copied()
    }

    /// Rows for display rows `start_row..start_row + count`, stopping at the last visible line.
    pub fn rows(&self, start_row: usize, count: usize) -> Vec<GutterRow> {
        if count == 0 || start_row >= self.visibility.visible_line_count() {
            return Vec::new();
        }

        let first_line = self.visibility.line_for_display_row(start_row);
        let caret_display = self
            .visibility
            .display_line_number(self.caret_line)
            .unwrap_or(1);

        (first_line..self.visibility.line_count())
            .filter(|&line| self.visibility.is_line_visible(line))
            .take(count)
            .enumerate()
            .map(|(offset, line)| {
                let display_number = start_row + offset + 1;
                let is_current = line == self.caret_line;
                let label = match self.mode {
                    LineNumberMode::Absolute => display_number.to_string(),
                    LineNumberMode::Relative if is_current => "0".to_string(),
                    LineNumberMode::Relative => display_number.abs_diff(caret_display).to_string(),
                };
                GutterRow {
                    line,
                    display_number,
                    label,
                    marker: self.marker_at(line),
                    hidden_after: self.visibility.first_visible_after_fold(line),
                    is_current,
                    breakpoint: self.breakpoints.contains(&line),
                    bookmark: self.bookmarks.contains(&line),
                }
            })
            .collect()
    }

    /// Fold start line under a click at `(x, y)` in a viewport scrolled by `scroll_y`, if the
    /// click lands inside the marker column.
    pub fn hit_marker(&self, x: u32, y: u32, scroll_y: u32) -> Option<usize> {
        if !self.layout.marker_x.contains(&x) {
            return None;
        }
        let row = self.layout.row_at(y, scroll_y);
        if row >= self.visibility.visible_line_count() {
            return None;
        }
        let line = self.visibility.line_for_display_row(row);
        self.markers.contains_key(&line).then_some(line)
    }
}
