use fold_core::{FoldMarker, FoldingEditor, GutterLayout, LineNumberMode};
use pretty_assertions::assert_eq;

fn source(blocks: usize) -> String {
    let mut out = String::new();
    for i in 0..blocks {
        out.push_str(&format!("fn f{i}() {{\n    body();\n    more();\n}}\n"));
    }
    out
}

#[test]
fn test_badges_follow_collapsed_blocks() {
    let mut editor = FoldingEditor::new(&source(3));
    editor.end_dispatch();
    editor.toggle_at(4);

    let rows = editor.gutter(LineNumberMode::Absolute, 0).rows(0, 100);
    let summary: Vec<(usize, Option<FoldMarker>, usize)> = rows
        .iter()
        .map(|r| (r.line, r.marker, r.hidden_after))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, Some(FoldMarker::Expanded), 0),
            (1, None, 0),
            (2, None, 0),
            (3, None, 0),
            (4, Some(FoldMarker::Collapsed), 0),
            (8, Some(FoldMarker::Expanded), 3),
            (9, None, 0),
            (10, None, 0),
            (11, None, 0),
            (12, None, 0),
        ]
    );
    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);
}

#[test]
fn test_relative_numbers_count_display_rows() {
    let mut editor = FoldingEditor::new(&source(2));
    editor.end_dispatch();
    editor.toggle_at(0);

    // Caret on line 5, display row 3.
    let rows = editor.gutter(LineNumberMode::Relative, 5).rows(0, 5);
    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["2", "1", "0", "1", "2"]);
    assert!(rows[2].is_current);
}

#[test]
fn test_click_gutter_with_scroll_and_folds() {
    let mut editor = FoldingEditor::new(&source(20));
    editor.end_dispatch();
    editor.collapse_all();

    // Every block now takes one row; row 10 is the start of block 10 (line 40).
    let layout = GutterLayout::default();
    let scroll_y = 8 * layout.line_height;
    let y = 2 * layout.line_height + 3;
    assert_eq!(editor.click_gutter(15, y, scroll_y), Some(40));
    assert!(!editor.is_collapsed_at(40));

    // The expanded block pushes later blocks down by three rows.
    assert_eq!(editor.click_gutter(15, y + 4 * layout.line_height, scroll_y), Some(44));
    assert!(!editor.is_collapsed_at(44));

    // Outside the marker column nothing happens.
    let version = editor.version();
    assert_eq!(editor.click_gutter(40, y, scroll_y), None);
    assert!(!editor.has_changed_since(version));
}

#[test]
fn test_custom_layout_hit_region() {
    let mut editor = FoldingEditor::new(&source(1));
    editor.end_dispatch();

    let gutter = editor.gutter(LineNumberMode::Absolute, 0).with_layout(GutterLayout {
        line_height: 20,
        marker_x: 0..=8,
    });
    assert_eq!(gutter.layout().line_height, 20);
    assert_eq!(gutter.hit_marker(4, 19, 0), Some(0));
    assert_eq!(gutter.hit_marker(9, 19, 0), None);
    assert_eq!(gutter.hit_marker(4, 20, 0), None);
}
