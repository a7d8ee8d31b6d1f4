//! Two-phase draw driver: simulate, then commit.

use crate::doc::{Document, ElementId};
use crate::geometry::{LogicalCanvas, Region};
use crate::hook::Phase;
use crate::render::canvas::Canvas;

/// Everything a hook may touch while running: the document (for
/// geometry and property reads/writes) and the host canvas.
pub struct DrawContext<'a> {
    pub doc: &'a mut Document,
    pub canvas: &'a mut dyn Canvas,
    pub logical: LogicalCanvas,
}

/// Run one element's hooks through the full two-phase protocol.
///
/// The element's margin is applied to `region` first. The simulation
/// pass then runs pre hooks chained over the geometry and post hooks
/// with the simulation flag set (post hooks must no-op on it). The
/// commit pass re-runs the pre chain from the same starting geometry —
/// pre hooks are required to be deterministic, so both passes agree —
/// and finally runs post hooks, which may draw.
///
/// Returns the committed content region.
pub fn draw_element(
    doc: &mut Document,
    canvas: &mut dyn Canvas,
    logical: LogicalCanvas,
    id: ElementId,
    region: Region,
) -> Region {
    let margin = doc.get(id).map(|data| data.margin).unwrap_or_default();
    let start = region.shrink(margin);

    let mut hooks = doc.take_hooks(id);
    let committed;
    {
        let mut ctx = DrawContext { doc, canvas, logical };

        let mut sim = start;
        for hook in &mut hooks.pre {
            sim = (hook.f)(&mut ctx, id, sim, Phase::Simulation);
        }
        for hook in &mut hooks.post {
            (hook.f)(&mut ctx, id, sim, Phase::Simulation);
        }

        let mut out = start;
        for hook in &mut hooks.pre {
            out = (hook.f)(&mut ctx, id, out, Phase::Commit);
        }
        for hook in &mut hooks.post {
            (hook.f)(&mut ctx, id, out, Phase::Commit);
        }
        committed = out;
    }
    doc.put_hooks(id, hooks);

    if let Some(data) = doc.get_mut(id) {
        data.position = committed.offset();
        data.size = committed.size();
    }
    committed
}

/// Draw an element and its subtree depth-first.
///
/// The host layout normally assigns each child its own region; this
/// convenience reuses the parent's committed content region for every
/// descendant, which is enough for headless styling checks.
pub fn draw_subtree(
    doc: &mut Document,
    canvas: &mut dyn Canvas,
    logical: LogicalCanvas,
    id: ElementId,
    region: Region,
) -> Region {
    let content = draw_element(doc, canvas, logical, id, region);
    let children = doc.children(id).to_vec();
    for child in children {
        draw_subtree(doc, canvas, logical, child, content);
    }
    content
}
