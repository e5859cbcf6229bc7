//! Dimension annotations
//!
//! A dimension is drawn from six parts: two extension lines, the dimension
//! line, two ticks and a label on a background box. All of it is laid out
//! relative to the base segment `(x1,y1)-(x2,y2)` and its unit normal.
//!
//! The label shows the element's `value` (or its `label` override), which
//! is allowed to disagree with the drawn span.

use glam::DVec2;
use svg::node::element::Group;

use super::context::RenderContext;
use super::defaults;
use super::geometry::Segment;
use super::shapes::Shape;
use super::svg::{Anchor, Stroke, element_group, fmt_num, line, rect, text};
use crate::log;
use crate::model::Dimension;
use crate::types::{Angle, Length};
use crate::units::Unit;

/// Class that lets a viewer restrict hit-testing to editable annotations
pub const DIMENSION_CLASS: &str = "dimension-element";

/// Computed layout of a dimension, in canvas units
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionLayout {
    /// The dimension line, `offset` away from the measured segment
    pub line: Segment,
    /// Extension lines, from near the measured points to past `line`
    pub extensions: [Segment; 2],
    /// Short strokes across each end of `line`
    pub ticks: [Segment; 2],
    /// Center of the label
    pub label_at: DVec2,
    /// Label rotation, always in (-90, 90]
    pub rotation: Angle,
}

impl DimensionLayout {
    /// Lay out a dimension between `start` and `end` with the dimension line
    /// shifted `offset` along the base normal. None for a zero-length base.
    pub fn compute(start: DVec2, end: DVec2, offset: f64) -> Option<Self> {
        let base = Segment::new(start, end);
        let n = base.normal()?;
        let dim_line = base.shifted(n, offset);

        // extension lines grow away from the base on the offset's side
        let side = if offset < 0.0 { -1.0 } else { 1.0 };
        let gap = n * (side * defaults::EXTENSION_GAP);
        let reach = n * (offset + side * defaults::EXTENSION_OVERSHOOT);
        let extensions = [
            Segment::new(base.start + gap, base.start + reach),
            Segment::new(base.end + gap, base.end + reach),
        ];

        let tick = n * defaults::TICK_HALF_LENGTH;
        let ticks = [
            Segment::new(dim_line.start - tick, dim_line.start + tick),
            Segment::new(dim_line.end - tick, dim_line.end + tick),
        ];

        Some(Self {
            line: dim_line,
            extensions,
            ticks,
            label_at: dim_line.midpoint(),
            rotation: base.angle().upright(),
        })
    }
}

/// Text shown on a dimension: the override label, or `value` formatted in
/// the dimension's own unit, falling back to the drawing's.
pub fn label_text(dim: &Dimension, drawing_unit: Unit) -> String {
    match &dim.label {
        Some(label) => label.clone(),
        None => dim.unit.unwrap_or(drawing_unit).format(Length(dim.value)),
    }
}

impl Shape for Dimension {
    fn render_svg(&self, ctx: &RenderContext) -> Option<Group> {
        let Some(layout) = DimensionLayout::compute(
            ctx.point(self.start()),
            ctx.point(self.end()),
            ctx.px(self.offset),
        ) else {
            log::debug!(id = %self.id, "skipping zero-length dimension");
            return None;
        };

        let stroke = Stroke::solid(defaults::DIMENSION_STROKE, 1.0);
        let thin = Stroke::solid(defaults::DIMENSION_STROKE, 0.75);
        let mut group = element_group(&self.id, "dimension", Some(DIMENSION_CLASS), None);
        for ext in &layout.extensions {
            group = group.add(line(ext.start, ext.end, thin));
        }
        group = group.add(line(layout.line.start, layout.line.end, stroke));
        for tick in &layout.ticks {
            group = group.add(line(tick.start, tick.end, stroke));
        }
        Some(group.add(label_svg(&layout, &label_text(self, ctx.unit))))
    }
}

/// Label box and text, rotated together about the label center. The box
/// has a fixed size so editing the value changes nothing but the text.
fn label_svg(layout: &DimensionLayout, content: &str) -> Group {
    let at = layout.label_at;
    let size = DVec2::new(defaults::DIMENSION_LABEL_WIDTH, defaults::DIMENSION_LABEL_HEIGHT);
    let rotate = format!(
        "rotate({} {} {})",
        fmt_num(layout.rotation.0),
        fmt_num(at.x),
        fmt_num(at.y)
    );
    Group::new()
        .set("class", "dimension-label")
        .set("transform", rotate)
        .add(rect(at - size * 0.5, size, "#ffffff", None))
        .add(text(at, content, defaults::DIMENSION_FONT_SIZE, Anchor::Middle))
}
