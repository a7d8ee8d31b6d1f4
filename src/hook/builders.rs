//! Composite hook builders: the pre/commit pairs theme rules install.
//!
//! Each builder attaches a pre-draw hook that computes a geometry
//! adjustment (and any derived values) plus a post-draw hook that
//! performs the drawing side effect during commit. Derived values
//! travel from the pre hook to its paired post hook through shared
//! `Rc<RefCell<...>>` state, so the commit phase never re-measures.

use std::cell::RefCell;
use std::rc::Rc;

use crate::doc::{Document, ElementId};
use crate::geometry::{Offset, Region, Size, Spacing};
use crate::hook::{PostHook, PreHook};

/// Visual parameters for a bordered frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameStyle {
    /// Border color, passed through to the canvas untouched.
    pub color: String,
    /// Border line width in pixels.
    pub line_width: i32,
    /// Extra inner padding between the border and the content.
    pub padding: i32,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self { color: "black".into(), line_width: 1, padding: 0 }
    }
}

/// Install a pre-draw hook that shifts the element's content right by
/// `amount` pixels.
pub fn indent(doc: &mut Document, id: ElementId, amount: i32, name: Option<&str>) {
    if let Some(data) = doc.get_mut(id) {
        data.hooks_mut()
            .add_pre(PreHook::new(name, move |_, _, region, _| region.indent(amount)));
    }
}

/// Install a bordered-frame pair: the pre hook reserves border and
/// padding space and remembers the outer rectangle, the post hook
/// draws the border during commit.
pub fn frame(doc: &mut Document, id: ElementId, style: FrameStyle, name: Option<&str>) {
    let Some(data) = doc.get_mut(id) else { return };

    let outer: Rc<RefCell<Option<Region>>> = Rc::new(RefCell::new(None));
    let inset = Spacing::all(style.line_width + style.padding);

    let stored = Rc::clone(&outer);
    data.hooks_mut().add_pre(PreHook::new(name, move |_, _, region, _| {
        *stored.borrow_mut() = Some(region);
        region.shrink(inset)
    }));

    let stored = outer;
    let FrameStyle { color, line_width, .. } = style;
    data.hooks_mut().add_post(PostHook::new(name, move |ctx, _, _, phase| {
        if phase.is_simulation() {
            return;
        }
        if let Some(region) = *stored.borrow() {
            ctx.canvas.draw_rect(region, &color, line_width, false);
        }
    }));
}

/// Install a mark pair: prefix the element with a glyph. The pre hook
/// measures the glyph and indents the content past it; the post hook
/// draws the glyph at the original left edge during commit.
pub fn mark(doc: &mut Document, id: ElementId, glyph: &str, color: &str, name: Option<&str>) {
    prefix(doc, id, glyph.to_owned(), color.to_owned(), name);
}

/// Install an auto-numbering pair: prefix the element with a
/// precomputed label such as `"3."`.
///
/// Labels are assigned while rules are applied (the rule evaluator owns
/// the shared counter), not at draw time, so repeated simulate/commit
/// passes over the same element always show the same number.
pub fn numbering(doc: &mut Document, id: ElementId, label: String, color: &str, name: Option<&str>) {
    prefix(doc, id, label, color.to_owned(), name);
}

/// Shared implementation for glyph/label prefixes.
fn prefix(doc: &mut Document, id: ElementId, text: String, color: String, name: Option<&str>) {
    let Some(data) = doc.get_mut(id) else { return };

    let measured: Rc<RefCell<Option<(Offset, Size)>>> = Rc::new(RefCell::new(None));

    let stored = Rc::clone(&measured);
    let glyph = text.clone();
    data.hooks_mut().add_pre(PreHook::new(name, move |ctx, _, region, _| {
        let extent = ctx.canvas.text_extent(&glyph);
        *stored.borrow_mut() = Some((region.offset(), extent));
        region.indent(extent.width)
    }));

    let stored = measured;
    data.hooks_mut().add_post(PostHook::new(name, move |ctx, _, _, phase| {
        if phase.is_simulation() {
            return;
        }
        if let Some((pos, _)) = *stored.borrow() {
            ctx.canvas.draw_text(pos, &text, &color);
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::ElementData;
    use crate::geometry::LogicalCanvas;
    use crate::render::draw_element;
    use crate::testing::{DrawOp, RecordingCanvas};

    fn setup() -> (Document, ElementId, RecordingCanvas, LogicalCanvas) {
        let mut doc = Document::new();
        let slide = doc.insert_slide(ElementData::new("Slide"));
        let item = doc.insert_child(slide, ElementData::new("Item"));
        (doc, item, RecordingCanvas::new(), LogicalCanvas::new(Size::new(1200, 900)))
    }

    #[test]
    fn indent_shifts_content() {
        let (mut doc, item, mut canvas, logical) = setup();
        indent(&mut doc, item, 12, Some("indent"));
        let out = draw_element(&mut doc, &mut canvas, logical, item, Region::new(0, 0, 100, 20));
        assert_eq!(out, Region::new(12, 0, 88, 20));
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn frame_reserves_space_and_draws_border_on_commit_only() {
        let (mut doc, item, mut canvas, logical) = setup();
        frame(
            &mut doc,
            item,
            FrameStyle { color: "red".into(), line_width: 2, padding: 3 },
            Some("frame"),
        );

        let out = draw_element(&mut doc, &mut canvas, logical, item, Region::new(10, 10, 100, 50));
        assert_eq!(out, Region::new(15, 15, 90, 40));

        // Exactly one rect despite simulation + commit both running.
        assert_eq!(
            canvas.ops,
            vec![DrawOp::Rect {
                region: Region::new(10, 10, 100, 50),
                color: "red".into(),
                line_width: 2,
                filled: false,
            }],
        );
    }

    #[test]
    fn frame_reinstall_under_same_name_draws_once() {
        let (mut doc, item, mut canvas, logical) = setup();
        frame(&mut doc, item, FrameStyle::default(), Some("frame"));
        frame(
            &mut doc,
            item,
            FrameStyle { color: "blue".into(), ..FrameStyle::default() },
            Some("frame"),
        );

        draw_element(&mut doc, &mut canvas, logical, item, Region::new(0, 0, 50, 50));
        assert_eq!(canvas.rects().len(), 1);
        assert!(matches!(
            canvas.ops[0],
            DrawOp::Rect { ref color, .. } if color == "blue"
        ));
    }

    #[test]
    fn mark_indents_by_glyph_width_and_draws_glyph() {
        let (mut doc, item, mut canvas, logical) = setup();
        mark(&mut doc, item, "*", "green", Some("mark"));

        let out = draw_element(&mut doc, &mut canvas, logical, item, Region::new(5, 0, 100, 20));
        // "*" measures one 8px cell on the recording canvas.
        assert_eq!(out, Region::new(13, 0, 92, 20));
        assert_eq!(
            canvas.ops,
            vec![DrawOp::Text { pos: Offset::new(5, 0), text: "*".into(), color: "green".into() }],
        );
    }

    #[test]
    fn numbering_draws_fixed_label() {
        let (mut doc, item, mut canvas, logical) = setup();
        numbering(&mut doc, item, "3.".into(), "black", Some("number"));

        let out = draw_element(&mut doc, &mut canvas, logical, item, Region::new(0, 0, 100, 20));
        assert_eq!(out.x, 16); // two 8px cells
        assert!(matches!(
            canvas.ops[0],
            DrawOp::Text { ref text, .. } if text == "3."
        ));
    }

    #[test]
    fn builders_compose_in_registration_order() {
        let (mut doc, item, mut canvas, logical) = setup();
        frame(&mut doc, item, FrameStyle { color: "gray".into(), line_width: 1, padding: 0 }, None);
        mark(&mut doc, item, "-", "black", None);

        let out = draw_element(&mut doc, &mut canvas, logical, item, Region::new(0, 0, 100, 40));
        // Frame insets by 1, mark indents by 8 inside the frame.
        assert_eq!(out, Region::new(9, 1, 90, 38));
        // Commit order follows registration: rect, then text.
        assert!(matches!(canvas.ops[0], DrawOp::Rect { .. }));
        assert!(matches!(canvas.ops[1], DrawOp::Text { .. }));
    }

    #[test]
    fn missing_element_is_ignored() {
        let (doc, item, ..) = setup();
        let mut other = Document::new();
        // Installing on an id from another arena is a silent no-op.
        indent(&mut other, item, 5, None);
        frame(&mut other, item, FrameStyle::default(), None);
        assert!(doc.get(item).unwrap().hooks().is_empty());
    }
}
