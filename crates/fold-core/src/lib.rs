#![warn(missing_docs)]
//! Fold Core - Headless Delimiter-Driven Code Folding Engine
//!
//! # Overview
//!
//! `fold-core` computes foldable regions of a text document from configurable delimiter pairs
//! (`{`/`}`, `/*`/`*/`, `begin`/`end`, ...), keeps them attached to the right lines while the
//! document is edited, and answers the visibility questions a renderer and gutter need. It does
//! not paint anything; hosts pull data out of it.
//!
//! # Core Features
//!
//! - **Ordered Triggers**: insertion-ordered delimiter pairs, order is match priority
//! - **Edit-Stable Regions**: regions anchored at line starts, following inserts and deletes
//! - **Two Matching Policies**: LIFO nesting for single-character pairs, counted nesting for words
//! - **Collapse Carry-Over**: collapse state survives rebuilds, keyed by start line
//! - **Fast Visibility**: merged hidden runs with prefix sums, `O(log n)` per line query
//! - **Headless Gutter**: line labels, fold markers and click hit-testing
//! - **Line Marks**: anchored breakpoints and bookmarks painted on visible rows
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  FoldingEditor (debounce + versions)        │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  GutterModel                                │  ← Rendering Data
//! ├─────────────────────────────────────────────┤
//! │  VisibilityModel                            │  ← Line Queries
//! ├─────────────────────────────────────────────┤
//! │  FoldIndex (regions + collapse state)       │  ← Folding
//! ├─────────────────────────────────────────────┤
//! │  RegionMatcher / TriggerRegistry            │  ← Delimiter Matching
//! ├─────────────────────────────────────────────┤
//! │  Document (Rope + AnchorTable)              │  ← Text and Anchors
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Using the Fold Index Directly
//!
//! ```rust
//! use fold_core::{Document, FoldIndex, TriggerRegistry};
//!
//! let mut document = Document::from_text("{\n  a\n  b\n}\nrest\n");
//! let mut registry = TriggerRegistry::new();
//! registry.put("{", "}");
//!
//! let mut index = FoldIndex::new();
//! index.rebuild(&mut document, &registry);
//! index.toggle_at(&mut document, &registry, 0);
//!
//! let visibility = index.visibility(&document);
//! assert!(!visibility.is_line_visible(2));
//! assert_eq!(visibility.display_line_number(4), Some(2));
//! ```
//!
//! ## Using the Editor Facade
//!
//! ```rust
//! use fold_core::{FoldingEditor, FoldConfig};
//!
//! let config = FoldConfig::for_language("pascal").unwrap();
//! let mut editor = FoldingEditor::with_config("begin\n  x := 1;\nend.\n", &config);
//! editor.end_dispatch();
//!
//! assert!(editor.region_starting_at(0).is_some());
//! ```
//!
//! # Module Description
//!
//! - [`anchor`] - Edit-stable position handles
//! - [`document`] - Rope-backed reference document
//! - [`triggers`] - Ordered trigger registry
//! - [`matcher`] - Delimiter scanning and region matching
//! - [`folding`] - Fold regions and the fold index
//! - [`visibility`] - Line visibility queries
//! - [`gutter`] - Headless gutter rows and hit-testing
//! - [`marks`] - Breakpoints and bookmarks
//! - [`state`] - Editor facade and version tracking
//!
//! # Unicode Support
//!
//! - Document offsets are Unicode scalar values; delimiter scanning works on UTF-8 bytes and never
//!   splits a character
//! - Delimiters may be any non-empty string, including CJK brackets such as `「`/`」`

pub mod anchor;
pub mod delta;
pub mod document;
pub mod folding;
pub mod gutter;
pub mod marks;
pub mod matcher;
pub mod state;
pub mod triggers;
pub mod visibility;

pub use anchor::{Anchor, AnchorTable};
pub use delta::TextEdit;
pub use document::Document;
pub use fold_core_lang::{FoldConfig, FoldConfigError, TriggerSpec};
pub use folding::{FoldIndex, FoldRegion, FoldSpan, ToggleOutcome};
pub use gutter::{FoldMarker, GutterLayout, GutterModel, GutterRow, LineNumberMode};
pub use marks::{LineMarkKind, LineMarks};
pub use matcher::{DelimiterMatch, DelimiterScan, MatchedRegion, RegionMatcher, match_forward};
pub use state::{FoldingEditor, StateChange, StateChangeType};
pub use triggers::{StartCandidate, StartPolicy, TriggerPair, TriggerRegistry};
pub use visibility::VisibilityModel;
