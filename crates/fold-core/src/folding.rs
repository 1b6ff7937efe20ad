//! Fold regions and the fold index.
//!
//! A [`FoldRegion`] is anchored at the *line-start* offsets of its opening and closing lines, not
//! at the delimiters themselves, so its lines follow edits made before the next rebuild. The
//! [`FoldIndex`] is rebuilt wholesale from [`RegionMatcher`] output; collapse state is carried
//! across rebuilds by start line only (a region whose start line is deleted and retyped comes back
//! expanded).

use crate::anchor::Anchor;
use crate::document::Document;
use crate::matcher::{RegionMatcher, match_forward, to_region};
use crate::triggers::{TriggerPair, TriggerRegistry};
use crate::visibility::VisibilityModel;
use std::collections::{BTreeMap, HashSet};

/// Resolved, line-based view of a fold region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoldSpan {
    /// Opening line (always visible).
    pub start_line: usize,
    /// Closing line (inclusive, hidden when collapsed).
    pub end_line: usize,
    /// Whether the interior is hidden.
    pub collapsed: bool,
}

impl FoldSpan {
    /// Create a span.
    pub fn new(start_line: usize, end_line: usize, collapsed: bool) -> Self {
        Self {
            start_line,
            end_line,
            collapsed,
        }
    }

    /// Lines hidden when collapsed (`end_line - start_line`).
    pub fn hidden_line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line)
    }

    /// Returns `true` if `line` is hidden by this span (ignores the collapsed flag).
    pub fn covers(&self, line: usize) -> bool {
        line > self.start_line && line <= self.end_line
    }
}

/// One foldable block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldRegion {
    start: Anchor,
    end: Anchor,
    collapsed: bool,
    trigger: TriggerPair,
}

impl FoldRegion {
    /// Anchor at the start of the opening line.
    pub fn start_anchor(&self) -> Anchor {
        self.start
    }

    /// Anchor at the start of the closing line.
    pub fn end_anchor(&self) -> Anchor {
        self.end
    }

    /// Whether the region is collapsed.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Trigger pair that produced the region.
    pub fn trigger(&self) -> &TriggerPair {
        &self.trigger
    }

    /// Current opening line.
    pub fn start_line(&self, document: &Document) -> Option<usize> {
        document.anchor_line(self.start)
    }

    /// Current closing line.
    pub fn end_line(&self, document: &Document) -> Option<usize> {
        document.anchor_line(self.end)
    }

    /// Resolve to lines. `None` if an anchor was released or edits have collapsed the region onto
    /// a single line.
    pub fn span(&self, document: &Document) -> Option<FoldSpan> {
        let start_line = self.start_line(document)?;
        let end_line = self.end_line(document)?;
        (start_line < end_line).then_some(FoldSpan::new(start_line, end_line, self.collapsed))
    }

    fn starts_at(&self, document: &Document, line: usize) -> bool {
        self.span(document).is_some_and(|s| s.start_line == line)
    }
}

/// Result of [`FoldIndex::toggle_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// An existing region starting on the line was flipped.
    Flipped {
        /// New collapsed state.
        collapsed: bool,
    },
    /// No region started on the line; one was matched and inserted collapsed.
    Created,
    /// Nothing to fold on the line.
    NoMatch,
}

impl ToggleOutcome {
    /// Returns `true` if the index changed.
    pub fn changed(&self) -> bool {
        !matches!(self, ToggleOutcome::NoMatch)
    }
}

/// The set of fold regions for one document.
#[derive(Debug, Clone, Default)]
pub struct FoldIndex {
    regions: Vec<FoldRegion>,
}

impl FoldIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// All regions, ordered by trigger priority and then start line. Regions added by
    /// [`toggle_at`](Self::toggle_at) come last.
    pub fn regions(&self) -> &[FoldRegion] {
        &self.regions
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if there are no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Recompute every region from the document text, carrying collapse state forward by start
    /// line. Returns the number of regions built.
    ///
    /// Each pair is scanned independently. When one pair yields several regions starting on the
    /// same line, the first one the scan emits is kept. For single-char pairs that is the
    /// innermost, since a closer pops the most recent opener.
    pub fn rebuild(&mut self, document: &mut Document, registry: &TriggerRegistry) -> usize {
        let collapsed_starts: HashSet<usize> = self
            .regions
            .iter()
            .filter(|r| r.collapsed)
            .filter_map(|r| r.start_line(document))
            .collect();
        self.clear(document);

        let text = document.text();
        let mut carried = 0usize;
        for pair in registry.pairs() {
            let mut by_start: BTreeMap<usize, usize> = BTreeMap::new();
            for region in RegionMatcher::new(document, &text, &pair) {
                by_start.entry(region.start_line).or_insert(region.end_line);
            }

            for (start_line, end_line) in by_start {
                let collapsed = collapsed_starts.contains(&start_line);
                carried += usize::from(collapsed);
                self.regions.push(FoldRegion {
                    start: document.anchor_line_start(start_line),
                    end: document.anchor_line_start(end_line),
                    collapsed,
                    trigger: pair.clone(),
                });
            }
        }

        tracing::debug!(
            pairs = registry.len(),
            regions = self.regions.len(),
            carried,
            "rebuilt fold regions"
        );
        self.regions.len()
    }

    /// Flip the region starting at `line`, or fold `line` on demand.
    ///
    /// Without an existing region, the line's start-symbol candidates are tried in the registry's
    /// priority order and the first one with a multi-line forward match becomes a new collapsed
    /// region.
    pub fn toggle_at(
        &mut self,
        document: &mut Document,
        registry: &TriggerRegistry,
        line: usize,
    ) -> ToggleOutcome {
        let line = document.clamp_line(line);

        if let Some(region) = self.regions.iter_mut().find(|r| r.starts_at(document, line)) {
            region.collapsed = !region.collapsed;
            tracing::trace!(line, collapsed = region.collapsed, "toggled fold region");
            return ToggleOutcome::Flipped {
                collapsed: region.collapsed,
            };
        }

        let line_text = document.line_text(line);
        let line_byte = document.line_start_byte(line);
        let text = document.text();
        for candidate in registry.candidates_on_line(&line_text) {
            let Some(delimiters) = match_forward(&text, line_byte + candidate.column, &candidate.pair)
            else {
                continue;
            };
            let Some(matched) = to_region(document, delimiters) else {
                continue;
            };

            tracing::trace!(
                start_line = matched.start_line,
                end_line = matched.end_line,
                trigger = candidate.pair.start(),
                "created fold region on demand"
            );
            self.regions.push(FoldRegion {
                start: document.anchor_line_start(matched.start_line),
                end: document.anchor_line_start(matched.end_line),
                collapsed: true,
                trigger: candidate.pair,
            });
            return ToggleOutcome::Created;
        }

        ToggleOutcome::NoMatch
    }

    /// First region starting at `line`.
    pub fn region_starting_at(&self, document: &Document, line: usize) -> Option<&FoldRegion> {
        self.regions.iter().find(|r| r.starts_at(document, line))
    }

    /// Returns `true` if some region starts at `line`.
    pub fn is_fold_start(&self, document: &Document, line: usize) -> bool {
        self.region_starting_at(document, line).is_some()
    }

    /// Collapsed state of the first region starting at `line` (`false` if none).
    pub fn is_collapsed_at(&self, document: &Document, line: usize) -> bool {
        self.region_starting_at(document, line)
            .is_some_and(|r| r.collapsed)
    }

    /// Expand the first region starting at `line` if it is collapsed.
    pub fn expand_at(&mut self, document: &Document, line: usize) -> bool {
        match self.regions.iter_mut().find(|r| r.starts_at(document, line)) {
            Some(region) if region.collapsed => {
                region.collapsed = false;
                true
            }
            _ => false,
        }
    }

    /// Collapse every region.
    pub fn collapse_all(&mut self) {
        for region in &mut self.regions {
            region.collapsed = true;
        }
    }

    /// Expand every region.
    pub fn expand_all(&mut self) {
        for region in &mut self.regions {
            region.collapsed = false;
        }
    }

    /// Drop every region and release its anchors.
    pub fn clear(&mut self, document: &mut Document) {
        for region in self.regions.drain(..) {
            document.release_anchor(region.start);
            document.release_anchor(region.end);
        }
    }

    /// Resolved spans in index order, skipping regions that no longer span two lines.
    pub fn spans(&self, document: &Document) -> Vec<FoldSpan> {
        self.regions
            .iter()
            .filter_map(|r| r.span(document))
            .collect()
    }

    /// Visibility snapshot for the current state.
    pub fn visibility(&self, document: &Document) -> VisibilityModel {
        VisibilityModel::new(self.spans(document), document.line_count())
    }
}
