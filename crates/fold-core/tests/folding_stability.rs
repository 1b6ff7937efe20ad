use fold_core::{FoldConfig, FoldingEditor, ToggleOutcome};
use pretty_assertions::assert_eq;

fn spans(editor: &FoldingEditor) -> Vec<(usize, usize, bool)> {
    editor
        .index()
        .spans(editor.document())
        .into_iter()
        .map(|s| (s.start_line, s.end_line, s.collapsed))
        .collect()
}

fn braces() -> FoldConfig {
    FoldConfig::with_triggers([("{", "}")])
}

#[test]
fn test_collapsed_fold_shifts_on_newline_insertion_above() {
    let mut editor = FoldingEditor::with_config("a\n{\nb\n}\ne", &braces());
    editor.end_dispatch();
    editor.toggle_at(1);

    editor.insert(0, "\n");
    // Before the rebuild the anchors already moved.
    assert_eq!(spans(&editor), vec![(2, 4, true)]);

    editor.end_dispatch();
    assert_eq!(spans(&editor), vec![(2, 4, true)]);
}

#[test]
fn test_collapsed_fold_grows_on_newline_insertion_inside_region() {
    let mut editor = FoldingEditor::with_config("a\n{\nb\n}\ne", &braces());
    editor.end_dispatch();
    editor.toggle_at(1);

    let offset = editor.document().line_start(2);
    editor.insert(offset, "\n");
    editor.end_dispatch();

    assert_eq!(spans(&editor), vec![(1, 4, true)]);
    assert_eq!(editor.visibility().hidden_line_count(), 3);
}

#[test]
fn test_collapsed_fold_shifts_on_newline_deletion_above() {
    let mut editor = FoldingEditor::with_config("a\nx\n{\nb\n}\ne", &braces());
    editor.end_dispatch();
    editor.toggle_at(2);

    // Merge line 0 and line 1.
    editor.delete(1, 1);
    editor.end_dispatch();

    assert_eq!(spans(&editor), vec![(1, 3, true)]);
}

#[test]
fn test_collapse_state_survives_edits_inside_region() {
    let mut editor = FoldingEditor::new("fn f() {\n    a();\n    b();\n}\n");
    editor.end_dispatch();
    editor.toggle_at(0);

    let offset = editor.document().line_start(2);
    editor.insert(offset, "    c();\n");
    editor.end_dispatch();

    assert_eq!(spans(&editor), vec![(0, 4, true)]);
}

#[test]
fn test_deleting_closer_removes_region_and_state() {
    let mut editor = FoldingEditor::with_config("{\na\n}\n", &braces());
    editor.end_dispatch();
    editor.toggle_at(0);

    let closer = editor.document().line_start(2);
    editor.delete(closer, 1);
    editor.end_dispatch();
    assert!(editor.index().is_empty());

    // Retyping the closer brings the region back, expanded.
    editor.insert(closer, "}");
    editor.end_dispatch();
    assert_eq!(spans(&editor), vec![(0, 2, false)]);
}

#[test]
fn test_rebuild_is_idempotent() {
    let text = "/* header\n * text\n */\nfn a() {\n  [\n    1,\n  ]\n}\n";
    let mut editor = FoldingEditor::new(text);
    editor.end_dispatch();
    editor.toggle_at(3);
    let first = spans(&editor);

    editor.rebuild();
    editor.rebuild();
    assert_eq!(spans(&editor), first);
    assert_eq!(first, vec![(3, 7, true), (0, 2, false), (4, 6, false)]);
}

#[test]
fn test_on_demand_region_follows_edits_without_auto_fold() {
    let config = FoldConfig {
        auto_fold: false,
        ..FoldConfig::with_triggers([("begin", "end")])
    };
    let mut editor = FoldingEditor::with_config("begin\n  x\nend\n", &config);

    assert_eq!(editor.toggle_at(0), ToggleOutcome::Created);
    editor.insert(0, "\n");
    assert!(!editor.end_dispatch());
    assert_eq!(spans(&editor), vec![(1, 3, true)]);
}

#[test]
fn test_anchor_count_stays_bounded_across_rebuilds() {
    let mut editor = FoldingEditor::new("{\n}\n{\n}\n");
    editor.end_dispatch();

    for i in 0..50 {
        editor.insert(0, if i % 2 == 0 { "x" } else { "\n" });
        editor.end_dispatch();
    }
    assert_eq!(editor.document().anchors().len(), 2 * editor.index().len());
}
