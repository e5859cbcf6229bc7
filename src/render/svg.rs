//! SVG generation
//!
//! Builders for the primitives the renderers emit, plus the document
//! assembler that wraps rendered elements in a bounded canvas. Nodes are
//! `svg` crate elements; attribute values go through [`fmt_num`] so output
//! is stable across runs.

use glam::DVec2;
use svg::Document;
use svg::node::Node;
use svg::node::element::path::Data;
use svg::node::element::{Definitions, Group, Line, Marker, Path, Pattern, Polygon, Rectangle, Text};

use super::RenderOptions;
use super::context::RenderContext;
use super::defaults;
use crate::log;
use crate::model::{Drawing, DrawingElement};

// ============================================================================
// Number formatting
// ============================================================================

/// Format a number with 6 significant figures, trailing zeros trimmed.
///
/// Non-finite values are printed as-is so a broken scale shows up in the
/// output instead of collapsing to the origin.
pub(crate) fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        log::warn!(value, "non-finite coordinate in svg output");
        return value.to_string();
    }
    fmt_num_precision(value, 6)
}

fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    // Snap float noise (e.g. sin(180°)) so it prints as a clean zero
    if value.abs() < 1e-9 {
        return "0".to_string();
    }

    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// "x,y" pair for point lists
pub(crate) fn fmt_point(p: DVec2) -> String {
    format!("{},{}", fmt_num(p.x), fmt_num(p.y))
}

/// Path data starting at `p`
pub(crate) fn path_from(p: DVec2) -> Data {
    Data::new().move_to((p.x, p.y))
}

/// Append a circular arc of radius `r` ending at `p`. `sweep` true draws
/// clockwise on screen.
pub(crate) fn arc_to(data: Data, r: f64, large_arc: bool, sweep: bool, p: DVec2) -> Data {
    let flag = |b: bool| if b { 1.0 } else { 0.0 };
    data.elliptical_arc_to((r, r, 0.0, flag(large_arc), flag(sweep), p.x, p.y))
}

// ============================================================================
// Primitives
// ============================================================================

/// Stroke attributes shared by lines, paths and polygons
#[derive(Debug, Clone, Copy)]
pub(crate) struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    pub dash: Option<&'a str>,
}

impl<'a> Stroke<'a> {
    pub fn solid(color: &'a str, width: f64) -> Self {
        Self { color, width, dash: None }
    }

    pub fn dashed(color: &'a str, width: f64, dash: &'a str) -> Self {
        Self { color, width, dash: Some(dash) }
    }

    fn apply<N: Node>(&self, mut node: N) -> N {
        node.assign("stroke", self.color);
        node.assign("stroke-width", fmt_num(self.width));
        if let Some(dash) = self.dash {
            node.assign("stroke-dasharray", dash);
        }
        node
    }
}

pub(crate) fn line(a: DVec2, b: DVec2, stroke: Stroke<'_>) -> Line {
    stroke.apply(
        Line::new()
            .set("x1", fmt_num(a.x))
            .set("y1", fmt_num(a.y))
            .set("x2", fmt_num(b.x))
            .set("y2", fmt_num(b.y)),
    )
}

pub(crate) fn polygon(points: &[DVec2], fill: &str, stroke: Stroke<'_>) -> Polygon {
    let pts: Vec<String> = points.iter().map(|p| fmt_point(*p)).collect();
    stroke.apply(Polygon::new().set("points", pts.join(" ")).set("fill", fill))
}

pub(crate) fn path(d: Data, fill: &str, stroke: Stroke<'_>) -> Path {
    stroke.apply(Path::new().set("d", d).set("fill", fill))
}

pub(crate) fn rect(origin: DVec2, size: DVec2, fill: &str, stroke: Option<Stroke<'_>>) -> Rectangle {
    let r = Rectangle::new()
        .set("x", fmt_num(origin.x))
        .set("y", fmt_num(origin.y))
        .set("width", fmt_num(size.x))
        .set("height", fmt_num(size.y))
        .set("fill", fill);
    match stroke {
        Some(s) => s.apply(r),
        None => r,
    }
}

/// A line ending in the shared `arrowhead` marker
pub(crate) fn arrow(a: DVec2, b: DVec2, stroke: Stroke<'_>) -> Line {
    line(a, b, stroke).set("marker-end", "url(#arrowhead)")
}

/// Text anchoring for [`text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    Start,
    Middle,
}

pub(crate) fn text(at: DVec2, content: &str, font_size: f64, anchor: Anchor) -> Text {
    let t = Text::new(content)
        .set("x", fmt_num(at.x))
        .set("y", fmt_num(at.y))
        .set("font-family", defaults::FONT_FAMILY)
        .set("font-size", fmt_num(font_size))
        .set("fill", defaults::STROKE);
    match anchor {
        Anchor::Start => t,
        Anchor::Middle => t.set("text-anchor", "middle").set("dominant-baseline", "middle"),
    }
}

/// An element's hit-testable root group.
///
/// The group carries `data-id`, `data-type` and the `drawing-element`
/// class; `extra_class` adds a further marker class.
pub(crate) fn element_group(id: &str, kind: &str, extra_class: Option<&str>, transform: Option<&str>) -> Group {
    let class = match extra_class {
        Some(extra) => format!("drawing-element {extra}"),
        None => "drawing-element".to_string(),
    };
    let g = Group::new().set("class", class).set("data-id", id).set("data-type", kind);
    match transform {
        Some(t) => g.set("transform", t),
        None => g,
    }
}

// ============================================================================
// Document
// ============================================================================

/// Assemble the final SVG document.
///
/// Non-dimension elements are emitted first in sequence order, then every
/// dimension, so annotations always sit on top.
pub fn generate_svg(drawing: &Drawing, ctx: &RenderContext, options: &RenderOptions) -> String {
    let w = options.viewport.w;
    let h = options.viewport.h;

    let mut doc = Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("width", fmt_num(w))
        .set("height", fmt_num(h))
        .set("viewBox", format!("0 0 {} {}", fmt_num(w), fmt_num(h)))
        .add(defs())
        .add(rect(DVec2::ZERO, DVec2::new(w, h), "#ffffff", None));
    if options.grid {
        doc = doc.add(rect(DVec2::ZERO, DVec2::new(w, h), "url(#grid)", None));
    }
    let inset = defaults::BORDER_INSET;
    doc = doc.add(rect(
        DVec2::splat(inset),
        DVec2::new(w - 2.0 * inset, h - 2.0 * inset),
        "none",
        Some(Stroke::solid(defaults::STROKE, defaults::BORDER_WIDTH)),
    ));

    let mut content = Group::new()
        .set("class", "drawing-content")
        .set("transform", format!("translate({0},{0})", fmt_num(defaults::PADDING)));
    let (annotations, geometry): (Vec<&DrawingElement>, Vec<&DrawingElement>) =
        drawing.elements.iter().partition(|e| e.is_dimension());
    for element in geometry.into_iter().chain(annotations) {
        if let Some(group) = super::render_element(ctx, element) {
            content = content.add(group);
        }
    }
    doc = doc.add(content);

    if options.title_block {
        doc = doc.add(title_block(drawing, w, h));
    }

    let out = doc.to_string();
    log::debug!(bytes = out.len(), elements = drawing.elements.len(), "generated svg");
    out
}

fn defs() -> Definitions {
    let g = defaults::GRID_SPACING;
    let head = Polygon::new().set("points", "0,0 10,3.5 0,7").set("fill", defaults::STROKE);
    let marker = Marker::new()
        .set("id", "arrowhead")
        .set("markerWidth", "10")
        .set("markerHeight", "7")
        .set("refX", "9")
        .set("refY", "3.5")
        .set("orient", "auto")
        .add(head);
    let cell = path_from(DVec2::new(g, 0.0)).line_to((0.0, 0.0)).line_to((0.0, g));
    let pattern = Pattern::new()
        .set("id", "grid")
        .set("width", fmt_num(g))
        .set("height", fmt_num(g))
        .set("patternUnits", "userSpaceOnUse")
        .add(path(cell, "none", Stroke::solid(defaults::GRID_STROKE, 0.5)));
    Definitions::new().add(marker).add(pattern)
}

/// Fixed-size panel in the bottom-right corner with the drawing metadata.
fn title_block(drawing: &Drawing, w: f64, h: f64) -> Group {
    let origin = DVec2::new(
        w - defaults::BORDER_INSET - defaults::TITLE_BLOCK_WIDTH,
        h - defaults::BORDER_INSET - defaults::TITLE_BLOCK_HEIGHT,
    );
    let stroke = Stroke::solid(defaults::STROKE, 1.0);
    let left = origin.x + 10.0;

    let mut block = Group::new()
        .set("class", "title-block")
        .add(rect(
            origin,
            DVec2::new(defaults::TITLE_BLOCK_WIDTH, defaults::TITLE_BLOCK_HEIGHT),
            "#ffffff",
            Some(stroke),
        ))
        .add(text(DVec2::new(left, origin.y + 20.0), &drawing.title, 14.0, Anchor::Start).set("font-weight", "bold"))
        .add(line(
            DVec2::new(origin.x, origin.y + 28.0),
            DVec2::new(origin.x + defaults::TITLE_BLOCK_WIDTH, origin.y + 28.0),
            stroke,
        ));

    let date = drawing
        .updated_at
        .as_deref()
        .or(drawing.created_at.as_deref())
        .and_then(|ts| ts.split('T').next())
        .unwrap_or_default();
    let rows = [
        format!("Scale: {}", drawing.scale),
        format!("Units: {}", drawing.unit.label()),
        drawing
            .drawing_type
            .clone()
            .unwrap_or_else(|| defaults::DEFAULT_DRAWING_TYPE.to_string()),
        format!("Drawn by: {}", drawing.drawn_by.as_deref().unwrap_or("-")),
        format!("Date: {date}"),
    ];
    for (i, row) in rows.iter().enumerate() {
        let y = origin.y + 44.0 + i as f64 * defaults::TITLE_BLOCK_LINE_HEIGHT;
        block = block.add(text(DVec2::new(left, y), row, 10.0, Anchor::Start));
    }
    block
}
