//! Folding editor state.
//!
//! [`FoldingEditor`] is what a host widget owns: the document, the trigger registry, the fold
//! index and the gutter's line marks, wired together with a debounced rebuild.
//!
//! # Overview
//!
//! - **Edits**: [`insert`](FoldingEditor::insert) and [`delete`](FoldingEditor::delete) update the
//!   document and anchors immediately and only *schedule* a rebuild.
//! - **Dispatch boundary**: the host calls [`end_dispatch`](FoldingEditor::end_dispatch) once per
//!   event batch; pending edits are coalesced into a single rebuild.
//! - **Version tracking**: every observable change bumps a version number. Nothing is pushed to
//!   the host; it polls [`has_changed_since`](FoldingEditor::has_changed_since).
//!
//! # Example
//!
//! ```rust
//! use fold_core::{FoldingEditor, LineNumberMode};
//!
//! let mut editor = FoldingEditor::new("fn main() {\n    body();\n}\n");
//! editor.end_dispatch();
//!
//! assert!(editor.toggle_at(0).changed());
//! assert!(!editor.visibility().is_line_visible(1));
//!
//! // Typing above the fold keeps it collapsed after the next rebuild.
//! let seen = editor.version();
//! editor.insert(0, "// header\n");
//! editor.end_dispatch();
//! assert!(editor.has_changed_since(seen));
//! assert!(editor.is_collapsed_at(1));
//!
//! let rows = editor.gutter(LineNumberMode::Absolute, 0).rows(0, 10);
//! assert_eq!(rows.len(), 3);
//! ```

use crate::delta::TextEdit;
use crate::document::Document;
use crate::folding::{FoldIndex, FoldRegion, ToggleOutcome};
use crate::gutter::{GutterModel, LineNumberMode};
use crate::marks::{LineMarkKind, LineMarks};
use crate::triggers::{StartPolicy, TriggerRegistry};
use crate::visibility::VisibilityModel;
use fold_core_lang::FoldConfig;
use std::collections::BTreeSet;

/// Kind of change recorded against the version counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateChangeType {
    /// Document text changed.
    DocumentModified,
    /// Fold regions were rebuilt, toggled or cleared.
    FoldingChanged,
    /// Trigger pairs or start policy changed.
    TriggersChanged,
    /// A breakpoint or bookmark was added or removed.
    MarksChanged,
}

/// Last recorded change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    /// Change type
    pub change_type: StateChangeType,
    /// Old version number
    pub old_version: u64,
    /// New version number
    pub new_version: u64,
}

/// Host-facing folding editor.
#[derive(Debug, Clone)]
pub struct FoldingEditor {
    document: Document,
    registry: TriggerRegistry,
    index: FoldIndex,
    marks: LineMarks,
    auto_fold: bool,
    pending_rebuild: bool,
    pending_edits: Vec<TextEdit>,
    version: u64,
    last_change: Option<StateChange>,
}

impl FoldingEditor {
    /// Create an editor with the C-like trigger preset.
    pub fn new(text: &str) -> Self {
        Self::with_config(text, &FoldConfig::c_like())
    }

    /// Create an editor from a config.
    pub fn with_config(text: &str, config: &FoldConfig) -> Self {
        Self {
            document: Document::from_text(text),
            registry: TriggerRegistry::from_config(config),
            index: FoldIndex::new(),
            marks: LineMarks::new(),
            auto_fold: config.auto_fold,
            pending_rebuild: config.auto_fold,
            pending_edits: Vec::new(),
            version: 0,
            last_change: None,
        }
    }

    /// Document (read-only).
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Fold index (read-only).
    pub fn index(&self) -> &FoldIndex {
        &self.index
    }

    /// Whether edits schedule automatic rebuilds.
    pub fn auto_fold(&self) -> bool {
        self.auto_fold
    }

    /// Insert text at a character offset and schedule a rebuild.
    pub fn insert(&mut self, offset: usize, text: &str) -> TextEdit {
        let edit = self.document.insert(offset, text);
        self.record_edit(edit);
        edit
    }

    /// Delete characters and schedule a rebuild.
    pub fn delete(&mut self, offset: usize, len: usize) -> TextEdit {
        let edit = self.document.delete(offset, len);
        self.record_edit(edit);
        edit
    }

    fn record_edit(&mut self, edit: TextEdit) {
        if edit.is_empty() {
            return;
        }
        self.pending_edits.push(edit);
        if self.auto_fold {
            self.pending_rebuild = true;
        }
        self.mark_modified(StateChangeType::DocumentModified);
    }

    /// Run the scheduled rebuild, if any. Returns `true` if it ran.
    pub fn end_dispatch(&mut self) -> bool {
        if !self.pending_rebuild {
            return false;
        }
        self.pending_rebuild = false;
        tracing::trace!(edits = self.pending_edits.len(), "running debounced fold rebuild");
        self.rebuild();
        true
    }

    /// Returns `true` if a rebuild is scheduled.
    pub fn has_pending_rebuild(&self) -> bool {
        self.pending_rebuild
    }

    /// Edits recorded since the last call.
    pub fn take_pending_edits(&mut self) -> Vec<TextEdit> {
        std::mem::take(&mut self.pending_edits)
    }

    /// Rebuild regions now, cancelling any scheduled rebuild.
    pub fn rebuild(&mut self) -> usize {
        self.pending_rebuild = false;
        let count = self.index.rebuild(&mut self.document, &self.registry);
        self.mark_modified(StateChangeType::FoldingChanged);
        count
    }

    fn triggers_changed(&mut self) {
        self.mark_modified(StateChangeType::TriggersChanged);
        if self.auto_fold {
            self.rebuild();
        }
    }

    /// Replace every trigger pair.
    pub fn set_triggers<I, S, E>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (S, E)>,
        S: Into<String>,
        E: Into<String>,
    {
        self.registry.set(pairs);
        self.triggers_changed();
    }

    /// Register or update one trigger pair.
    pub fn put_trigger(&mut self, start: &str, end: &str) -> bool {
        let changed = self.registry.put(start, end);
        if changed {
            self.triggers_changed();
        }
        changed
    }

    /// Remove a trigger pair by start symbol.
    pub fn remove_trigger(&mut self, start: &str) -> bool {
        let changed = self.registry.remove(start);
        if changed {
            self.triggers_changed();
        }
        changed
    }

    /// Trigger registry (read-only).
    pub fn triggers(&self) -> &TriggerRegistry {
        &self.registry
    }

    /// Change how on-demand folding picks a start symbol.
    pub fn set_start_policy(&mut self, policy: StartPolicy) {
        if self.registry.policy() != policy {
            self.registry.set_policy(policy);
            self.mark_modified(StateChangeType::TriggersChanged);
        }
    }

    /// Enable or disable automatic rebuilds. Disabling cancels a scheduled rebuild and keeps the
    /// current regions; enabling rebuilds.
    pub fn set_auto_fold(&mut self, enabled: bool) {
        if self.auto_fold == enabled {
            return;
        }
        self.auto_fold = enabled;
        if enabled {
            self.rebuild();
        } else {
            self.pending_rebuild = false;
        }
    }

    /// Toggle the fold at `line` (see [`FoldIndex::toggle_at`]).
    pub fn toggle_at(&mut self, line: usize) -> ToggleOutcome {
        let outcome = self
            .index
            .toggle_at(&mut self.document, &self.registry, line);
        if outcome.changed() {
            self.mark_modified(StateChangeType::FoldingChanged);
        }
        outcome
    }

    /// Expand the region starting at `line` if it is collapsed.
    pub fn expand_at(&mut self, line: usize) -> bool {
        let changed = self.index.expand_at(&self.document, line);
        if changed {
            self.mark_modified(StateChangeType::FoldingChanged);
        }
        changed
    }

    /// Collapse every region.
    pub fn collapse_all(&mut self) {
        self.index.collapse_all();
        self.mark_modified(StateChangeType::FoldingChanged);
    }

    /// Expand every region.
    pub fn expand_all(&mut self) {
        self.index.expand_all();
        self.mark_modified(StateChangeType::FoldingChanged);
    }

    /// Handle a gutter click with the default layout. Returns the toggled line.
    pub fn click_gutter(&mut self, x: u32, y: u32, scroll_y: u32) -> Option<usize> {
        let line = self
            .gutter(LineNumberMode::Absolute, 0)
            .hit_marker(x, y, scroll_y)?;
        self.toggle_at(line);
        Some(line)
    }

    /// Set or clear a breakpoint on `line`. Returns `true` if the line now has one.
    pub fn toggle_breakpoint(&mut self, line: usize) -> bool {
        self.toggle_mark(LineMarkKind::Breakpoint, line)
    }

    /// Set or clear a bookmark on `line`. Returns `true` if the line now has one.
    pub fn toggle_bookmark(&mut self, line: usize) -> bool {
        self.toggle_mark(LineMarkKind::Bookmark, line)
    }

    fn toggle_mark(&mut self, kind: LineMarkKind, line: usize) -> bool {
        let marked = self.marks.toggle(&mut self.document, kind, line);
        self.mark_modified(StateChangeType::MarksChanged);
        marked
    }

    /// Lines with a breakpoint.
    pub fn breakpoints(&self) -> BTreeSet<usize> {
        self.marks.lines(&self.document, LineMarkKind::Breakpoint)
    }

    /// Lines with a bookmark.
    pub fn bookmarks(&self) -> BTreeSet<usize> {
        self.marks.lines(&self.document, LineMarkKind::Bookmark)
    }

    /// Visibility snapshot of the current state.
    pub fn visibility(&self) -> VisibilityModel {
        self.index.visibility(&self.document)
    }

    /// Gutter rows for the current state.
    pub fn gutter(&self, mode: LineNumberMode, caret_line: usize) -> GutterModel {
        GutterModel::from_index(&self.index, &self.document, mode, caret_line)
            .with_line_marks(self.breakpoints(), self.bookmarks())
    }

    /// First region starting at `line`.
    pub fn region_starting_at(&self, line: usize) -> Option<&FoldRegion> {
        self.index.region_starting_at(&self.document, line)
    }

    /// Collapsed state of the first region starting at `line`.
    pub fn is_collapsed_at(&self, line: usize) -> bool {
        self.index.is_collapsed_at(&self.document, line)
    }

    /// Move a caret offset out of hidden lines. A caret on a hidden line goes to the start of the
    /// fold start line that hides it.
    pub fn snap_caret(&self, offset: usize) -> usize {
        let offset = offset.min(self.document.char_count());
        let line = self.document.char_to_line(offset);
        let snapped = self.visibility().snap_caret_line(line);
        if snapped == line {
            offset
        } else {
            self.document.line_start(snapped)
        }
    }

    /// Current version number.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Check if state has changed since a version.
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.version > version
    }

    /// Last recorded change, if any.
    pub fn last_change(&self) -> Option<StateChange> {
        self.last_change
    }

    fn mark_modified(&mut self, change_type: StateChangeType) {
        let old_version = self.version;
        self.version += 1;
        self.last_change = Some(StateChange {
            change_type,
            old_version,
            new_version: self.version,
        });
    }
}
