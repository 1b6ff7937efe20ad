//! Gutter example
//!
//! Folds a small file, sets a breakpoint and a bookmark, types above the fold and prints the
//! gutter a renderer would paint.

use fold_core::{FoldMarker, FoldingEditor, LineNumberMode};

fn main() {
    let mut editor = FoldingEditor::new(
        "/*\n * Demo file\n */\nfn main() {\n    let v = [\n        1,\n        2,\n    ];\n}\n",
    );
    editor.end_dispatch();

    editor.toggle_at(4);
    editor.toggle_breakpoint(3);
    editor.toggle_bookmark(8);
    println!("After folding the array:");
    print_gutter(&editor, 0);

    editor.insert(0, "// added line\n");
    editor.end_dispatch();
    println!("\nAfter typing above (fold follows the array):");
    print_gutter(&editor, 5);

    let clicked = editor.click_gutter(15, 0, 16);
    println!("\nClicked marker on line {clicked:?}:");
    print_gutter(&editor, 5);
}

fn print_gutter(editor: &FoldingEditor, caret_line: usize) {
    for row in editor.gutter(LineNumberMode::Relative, caret_line).rows(0, 40) {
        let marker = match row.marker {
            Some(FoldMarker::Collapsed) => '+',
            Some(FoldMarker::Expanded) => '-',
            None => ' ',
        };
        let badge = if row.hidden_after > 0 {
            format!("  (+{})", row.hidden_after)
        } else {
            String::new()
        };
        let mark = match (row.breakpoint, row.bookmark) {
            (true, _) => 'o',
            (false, true) => '#',
            (false, false) => ' ',
        };
        let text = editor.document().line_text(row.line);
        println!(
            "{mark}{:>3} {marker} | {}{badge}",
            row.label,
            text.trim_end_matches('\n')
        );
    }
}
