//! End-to-end scenarios: catalog discovery, theme cascade, and drawing
//! through the recording canvas.

use std::fs;
use std::path::Path;

use easel::doc::{Document, ElementData, ElementId};
use easel::geometry::{LogicalCanvas, Region, Size};
use easel::render::draw_subtree;
use easel::testing::{DrawOp, RecordingCanvas};
use easel::theme::{Applier, Catalog, RULES_FILE, PROPS_FILE};

fn write_theme(root: &Path, name: &str, rules: &str, props: Option<&str>) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(RULES_FILE), rules).unwrap();
    if let Some(props) = props {
        fs::write(dir.join(PROPS_FILE), props).unwrap();
    }
}

/// Two slides, one Title each.
fn deck() -> (Document, Vec<ElementId>, Vec<ElementId>) {
    let mut doc = Document::new();
    let s1 = doc.insert_slide(ElementData::new("Slide"));
    let s2 = doc.insert_slide(ElementData::new("Slide"));
    let t1 = doc.insert_child(s1, ElementData::new("Title").with_text("First"));
    let t2 = doc.insert_child(s2, ElementData::new("Title").with_text("Second"));
    (doc, vec![s1, s2], vec![t1, t2])
}

fn logical() -> LogicalCanvas {
    // 1200x900 output: 10 pixels per logical unit on both axes.
    LogicalCanvas::new(Size::new(1200, 900))
}

#[test]
fn catalog_discovers_and_describes_themes() {
    let tmp = tempfile::tempdir().unwrap();
    write_theme(tmp.path(), "red", "", Some("description \"Red accents\";\ndepends \"base\";"));
    write_theme(tmp.path(), "base", "", Some("abstract;"));
    fs::create_dir_all(tmp.path().join("not-a-theme")).unwrap();

    let catalog = Catalog::new([tmp.path().to_path_buf()]);
    let themes = catalog.themes();
    let names: Vec<_> = themes.iter().map(|e| e.name().to_string()).collect();
    assert_eq!(names, ["base", "red"]);
    assert!(themes[0].is_abstract());
    assert_eq!(themes[1].description(), Some("Red accents"));
    assert_eq!(themes[1].dependencies(), ["base"]);
}

#[test]
fn red_over_base_cascade() {
    let tmp = tempfile::tempdir().unwrap();
    write_theme(
        tmp.path(),
        "base",
        "match Slide / Title { foreground: blue; margin-left: 2; }\n\
         exit \"base is a building block\";\n\
         match Slide / Title { foreground: never; }",
        Some("abstract;"),
    );
    write_theme(
        tmp.path(),
        "red",
        "include \"base\";\n\
         match Slide / Title { foreground: red; }",
        None,
    );
    let catalog = Catalog::new([tmp.path().to_path_buf()]);
    let (mut doc, _, titles) = deck();

    let mut applier = Applier::new(&catalog, logical());
    assert!(applier.apply(&mut doc, "red"));

    for &title in &titles {
        let data = doc.get(title).unwrap();
        // base ran fully before red's remaining statements took over;
        // base's exit stopped only base.
        assert_eq!(data.prop("foreground"), Some("red"));
        assert_eq!(data.margin.left, 20);
    }
}

#[test]
fn themed_deck_draws_through_the_canvas() {
    let tmp = tempfile::tempdir().unwrap();
    write_theme(
        tmp.path(),
        "boxed",
        "match Slide / Title {\n\
         frame \"red\" 2px named \"box\";\n\
         mark \"*\" \"green\" named \"bullet\";\n\
         }",
        None,
    );
    let catalog = Catalog::new([tmp.path().to_path_buf()]);
    let (mut doc, slides, _) = deck();

    let mut applier = Applier::new(&catalog, logical());
    assert!(applier.apply(&mut doc, "boxed"));

    let mut canvas = RecordingCanvas::new();
    for &slide in &slides {
        draw_subtree(&mut doc, &mut canvas, logical(), slide, Region::new(0, 0, 1200, 900));
    }

    // One border and one glyph per title, despite the simulation pass.
    assert_eq!(canvas.rects().len(), 2);
    assert_eq!(canvas.texts().len(), 2);
    assert!(canvas.ops.iter().all(|op| match op {
        DrawOp::Rect { color, line_width, filled, .. } =>
            color == "red" && *line_width == 2 && !filled,
        DrawOp::Text { text, color, .. } => text == "*" && color == "green",
        DrawOp::Line { .. } => false,
    }));
}

#[test]
fn numbering_labels_are_sequential_across_slides() {
    let tmp = tempfile::tempdir().unwrap();
    write_theme(tmp.path(), "numbered", "match Slide / Title { number; }", None);
    let catalog = Catalog::new([tmp.path().to_path_buf()]);
    let (mut doc, slides, _) = deck();

    let mut applier = Applier::new(&catalog, logical());
    assert!(applier.apply(&mut doc, "numbered"));

    let mut canvas = RecordingCanvas::new();
    for &slide in &slides {
        draw_subtree(&mut doc, &mut canvas, logical(), slide, Region::new(0, 0, 1200, 900));
    }

    let labels: Vec<_> = canvas
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, ["1.", "2."]);
}

#[test]
fn numbering_is_stable_across_redraws() {
    let tmp = tempfile::tempdir().unwrap();
    write_theme(tmp.path(), "numbered", "match Slide / Title { number; }", None);
    let catalog = Catalog::new([tmp.path().to_path_buf()]);
    let (mut doc, slides, _) = deck();

    let mut applier = Applier::new(&catalog, logical());
    assert!(applier.apply(&mut doc, "numbered"));

    // Labels were fixed at apply time, so drawing twice repeats them
    // instead of counting on.
    for _ in 0..2 {
        let mut canvas = RecordingCanvas::new();
        for &slide in &slides {
            draw_subtree(&mut doc, &mut canvas, logical(), slide, Region::new(0, 0, 1200, 900));
        }
        assert!(matches!(&canvas.ops[0], DrawOp::Text { text, .. } if text == "1."));
    }
}

#[test]
fn broken_theme_is_absorbed() {
    let tmp = tempfile::tempdir().unwrap();
    write_theme(tmp.path(), "broken", "match Slide / Title { foreground red }", None);
    let catalog = Catalog::new([tmp.path().to_path_buf()]);
    let (mut doc, _, titles) = deck();

    let mut applier = Applier::new(&catalog, logical());
    // Parse failure: nothing applied, apply reports no change.
    assert!(!applier.apply(&mut doc, "broken"));
    assert_eq!(applier.dirty_count(), 0);
    assert!(doc.get(titles[0]).unwrap().prop("foreground").is_none());
}

#[test]
fn dirty_counter_drives_rerender_decisions() {
    let tmp = tempfile::tempdir().unwrap();
    write_theme(tmp.path(), "styling", "match Slide / Title { foreground: red; }", None);
    write_theme(tmp.path(), "inert", "exit;", None);
    let catalog = Catalog::new([tmp.path().to_path_buf()]);
    let (mut doc, _, _) = deck();

    let mut applier = Applier::new(&catalog, logical());
    assert!(applier.apply(&mut doc, "styling"));
    // A theme that evaluates no match patterns reports no change.
    assert!(!applier.apply(&mut doc, "inert"));
}
