//! Line visibility under collapsed folds.
//!
//! A [`VisibilityModel`] is an immutable snapshot built from resolved [`FoldSpan`]s. Collapsed
//! spans are merged into disjoint *hidden runs* (overlapping and adjacent runs are joined) with a
//! prefix sum of hidden lines, so every line query is a binary search.
//!
//! Line `l` is hidden iff some collapsed span has `start < l <= end`. Display numbers are
//! 1-based and count only visible lines.

use crate::folding::FoldSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HiddenRun {
    /// Visible line that owns the run (start line of its first span).
    owner: usize,
    /// First hidden line (`owner + 1`).
    first: usize,
    /// Last hidden line (inclusive).
    last: usize,
}

impl HiddenRun {
    fn len(&self) -> usize {
        self.last + 1 - self.first
    }
}

/// Visibility snapshot for one document state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityModel {
    line_count: usize,
    /// Collapsed spans in index order, clamped to the document.
    collapsed: Vec<FoldSpan>,
    runs: Vec<HiddenRun>,
    /// `hidden_before[i]` = hidden lines in `runs[..i]`; one longer than `runs`.
    hidden_before: Vec<usize>,
    /// `visible_before[i]` = visible lines before `runs[i]`.
    visible_before: Vec<usize>,
}

impl VisibilityModel {
    /// Build from spans (any order, expanded spans are ignored) for a document of `line_count`
    /// lines. A zero line count is treated as one line.
    pub fn new(spans: impl IntoIterator<Item = FoldSpan>, line_count: usize) -> Self {
        let line_count = line_count.max(1);
        let last_line = line_count - 1;

        let collapsed: Vec<FoldSpan> = spans
            .into_iter()
            .filter(|s| s.collapsed)
            .map(|s| FoldSpan::new(s.start_line, s.end_line.min(last_line), true))
            .filter(|s| s.start_line < s.end_line)
            .collect();

        let mut sorted = collapsed.clone();
        sorted.sort_by_key(|s| (s.start_line, s.end_line));

        let mut runs: Vec<HiddenRun> = Vec::new();
        for span in sorted {
            let first = span.start_line + 1;
            match runs.last_mut() {
                Some(run) if first <= run.last + 1 => run.last = run.last.max(span.end_line),
                _ => runs.push(HiddenRun {
                    owner: span.start_line,
                    first,
                    last: span.end_line,
                }),
            }
        }

        let mut hidden_before = Vec::with_capacity(runs.len() + 1);
        let mut visible_before = Vec::with_capacity(runs.len());
        let mut total = 0usize;
        hidden_before.push(0);
        for run in &runs {
            visible_before.push(run.first - total);
            total += run.len();
            hidden_before.push(total);
        }

        Self {
            line_count,
            collapsed,
            runs,
            hidden_before,
            visible_before,
        }
    }

    /// Model with nothing hidden.
    pub fn unfolded(line_count: usize) -> Self {
        Self::new(std::iter::empty(), line_count)
    }

    /// Document line count the model was built for.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Collapsed spans in index order.
    pub fn collapsed_spans(&self) -> &[FoldSpan] {
        &self.collapsed
    }

    fn clamp(&self, line: usize) -> usize {
        line.min(self.line_count - 1)
    }

    /// Index of the first run that ends at or after `line`.
    fn run_index(&self, line: usize) -> usize {
        self.runs.partition_point(|r| r.last < line)
    }

    fn run_containing(&self, line: usize) -> Option<&HiddenRun> {
        self.runs
            .get(self.run_index(line))
            .filter(|r| r.first <= line)
    }

    /// Returns `true` unless some collapsed span hides `line`.
    pub fn is_line_visible(&self, line: usize) -> bool {
        self.run_containing(self.clamp(line)).is_none()
    }

    /// 1-based position of `line` among visible lines, or `None` if it is hidden.
    pub fn display_line_number(&self, line: usize) -> Option<usize> {
        let line = self.clamp(line);
        let index = self.run_index(line);
        if self.runs.get(index).is_some_and(|r| r.first <= line) {
            return None;
        }
        Some(line + 1 - self.hidden_before[index])
    }

    /// `end - start` of the first collapsed span starting at `line`, else 0.
    pub fn hidden_count_starting_at(&self, line: usize) -> usize {
        let line = self.clamp(line);
        self.collapsed
            .iter()
            .find(|s| s.start_line == line)
            .map_or(0, FoldSpan::hidden_line_count)
    }

    /// `end - start` of the first collapsed span whose end is `line - 1`, else 0.
    pub fn first_visible_after_fold(&self, line: usize) -> usize {
        let line = self.clamp(line);
        self.collapsed
            .iter()
            .find(|s| s.end_line + 1 == line)
            .map_or(0, FoldSpan::hidden_line_count)
    }

    /// Nearest visible line for a caret on `line`: the line itself when visible, otherwise the
    /// start line of the hidden run that covers it.
    pub fn snap_caret_line(&self, line: usize) -> usize {
        let line = self.clamp(line);
        self.run_containing(line).map_or(line, |r| r.owner)
    }

    /// Number of hidden lines.
    pub fn hidden_line_count(&self) -> usize {
        self.hidden_before.last().copied().unwrap_or(0)
    }

    /// Number of visible lines (at least 1).
    pub fn visible_line_count(&self) -> usize {
        self.line_count - self.hidden_line_count()
    }

    /// Document line shown at 0-based display `row`. Rows past the end map to the last visible
    /// line.
    pub fn line_for_display_row(&self, row: usize) -> usize {
        let row = row.min(self.visible_line_count() - 1);
        let index = self.visible_before.partition_point(|&visible| visible <= row);
        row + self.hidden_before[index]
    }

    /// Visible lines in ascending order.
    pub fn visible_lines(&self) -> impl Iterator<Item = usize> + '_ {
        let mut runs = self.runs.iter().peekable();
        (0..self.line_count).filter(move |&line| {
            while runs.next_if(|r| r.last < line).is_some() {}
            runs.peek().is_none_or(|r| line < r.first)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collapsed(start: usize, end: usize) -> FoldSpan {
        FoldSpan::new(start, end, true)
    }

    #[test]
    fn test_single_collapsed_region() {
        let model = VisibilityModel::new([collapsed(3, 7)], 10);

        for line in 0..=3 {
            assert!(model.is_line_visible(line));
        }
        for line in 4..=7 {
            assert!(!model.is_line_visible(line));
        }
        assert!(model.is_line_visible(8));
        assert!(model.is_line_visible(9));

        assert_eq!(model.display_line_number(3), Some(4));
        assert_eq!(model.display_line_number(8), Some(5));
        assert_eq!(model.display_line_number(9), Some(6));
        assert_eq!(model.display_line_number(5), None);

        assert_eq!(model.hidden_count_starting_at(3), 4);
        assert_eq!(model.hidden_count_starting_at(4), 0);
        assert_eq!(model.first_visible_after_fold(8), 4);
        assert_eq!(model.first_visible_after_fold(9), 0);

        assert_eq!(model.visible_line_count(), 6);
        assert_eq!(model.hidden_line_count(), 4);
    }

    #[test]
    fn test_expanded_spans_hide_nothing() {
        let model = VisibilityModel::new([FoldSpan::new(3, 7, false)], 10);
        assert!((0..10).all(|l| model.is_line_visible(l)));
        assert_eq!(model.display_line_number(9), Some(10));
        assert_eq!(model.hidden_count_starting_at(3), 0);
    }

    #[test]
    fn test_nested_and_overlapping_runs_merge() {
        let model = VisibilityModel::new([collapsed(5, 6), collapsed(2, 8), collapsed(7, 12)], 20);
        assert_eq!(model.hidden_line_count(), 10); // 3..=12
        assert_eq!(model.display_line_number(13), Some(4));
        assert_eq!(model.snap_caret_line(11), 2);
        assert_eq!(model.hidden_count_starting_at(5), 1);
    }

    #[test]
    fn test_adjacent_runs_snap_to_outer_owner() {
        // Line 7 is hidden by the first span, so the second run belongs to line 3.
        let model = VisibilityModel::new([collapsed(3, 7), collapsed(7, 9)], 12);
        assert_eq!(model.snap_caret_line(9), 3);
        assert_eq!(model.display_line_number(10), Some(5));
    }

    #[test]
    fn test_snap_caret_line() {
        let model = VisibilityModel::new([collapsed(3, 7)], 10);
        assert_eq!(model.snap_caret_line(2), 2);
        assert_eq!(model.snap_caret_line(3), 3);
        assert_eq!(model.snap_caret_line(6), 3);
        assert_eq!(model.snap_caret_line(8), 8);
    }

    #[test]
    fn test_display_rows_map_back_to_lines() {
        let model = VisibilityModel::new([collapsed(1, 2), collapsed(4, 6)], 9);
        let visible: Vec<usize> = model.visible_lines().collect();
        assert_eq!(visible, vec![0, 1, 3, 4, 7, 8]);

        for (row, line) in visible.iter().enumerate() {
            assert_eq!(model.line_for_display_row(row), *line);
            assert_eq!(model.display_line_number(*line), Some(row + 1));
        }
        assert_eq!(model.line_for_display_row(100), 8);
    }

    #[test]
    fn test_out_of_range_lines_are_clamped() {
        let model = VisibilityModel::new([collapsed(3, 50)], 10);
        assert_eq!(model.hidden_line_count(), 6);
        assert_eq!(model.collapsed_spans(), &[collapsed(3, 9)]);
        assert!(!model.is_line_visible(100));
        assert_eq!(model.display_line_number(100), None);
        assert_eq!(model.snap_caret_line(100), 3);
        assert_eq!(model.line_for_display_row(100), 3);
    }

    #[test]
    fn test_empty_document() {
        let model = VisibilityModel::unfolded(0);
        assert_eq!(model.line_count(), 1);
        assert!(model.is_line_visible(0));
        assert_eq!(model.display_line_number(0), Some(1));
        assert_eq!(model.visible_line_count(), 1);
    }
}
