//! SVG rendering for drawings
//!
//! This module is organized into submodules:
//! - `defaults`: design constants
//! - `context`: RenderContext shared by element renderers
//! - `geometry`: segments, normals and the scale fit
//! - `shapes`: one renderer per element kind
//! - `dimension`: dimension annotation layout
//! - `svg`: SVG primitives and document assembly
//!
//! The whole pipeline is pure: the same drawing and options always produce
//! the same string, and the input is never modified.

pub mod context;
pub mod defaults;
pub mod dimension;
pub mod geometry;
pub mod shapes;
pub mod svg;

pub use context::RenderContext;
pub use geometry::fit_scale;

use crate::errors::RenderError;
use crate::log;
use crate::model::{Drawing, DrawingElement};
use crate::types::{Scaler, Size};
use ::svg::node::element::Group;
use shapes::{MemberKind, MemberShape, Shape};

/// Options for a render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Canvas size; the output's width, height and viewBox
    pub viewport: Size<f64>,
    /// Draw the background reference grid
    pub grid: bool,
    /// Draw the title block
    pub title_block: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            viewport: Size::new(defaults::VIEWPORT_WIDTH, defaults::VIEWPORT_HEIGHT),
            grid: true,
            title_block: true,
        }
    }
}

impl RenderOptions {
    pub fn viewport(width: f64, height: f64) -> Self {
        Self {
            viewport: Size::new(width, height),
            ..Self::default()
        }
    }
}

/// Render a drawing into a `viewport_width` x `viewport_height` canvas.
pub fn render(drawing: &Drawing, viewport_width: f64, viewport_height: f64) -> String {
    render_with(drawing, &RenderOptions::viewport(viewport_width, viewport_height))
}

/// Render a drawing with explicit options.
pub fn render_with(drawing: &Drawing, options: &RenderOptions) -> String {
    let scaler = Scaler::fit(drawing.extent(), options.viewport, defaults::PADDING);
    log::debug!(
        factor = scaler.factor,
        width = drawing.width,
        height = drawing.height,
        "fit drawing to viewport"
    );
    let ctx = RenderContext::new(scaler, drawing.unit);
    svg::generate_svg(drawing, &ctx, options)
}

/// Fit scale for `drawing` in `viewport`, rejecting inputs that leave no
/// positive, finite factor: a bad extent, or a viewport no larger than the
/// padding.
pub fn checked_scaler(drawing: &Drawing, viewport: Size<f64>) -> Result<Scaler, RenderError> {
    drawing.check_extent()?;
    let fit = Scaler::fit(drawing.extent(), viewport, defaults::PADDING);
    Scaler::try_new(fit.factor).map_err(|cause| RenderError::InvalidScale { value: fit.factor, cause })
}

/// Render one element to its root group. None when it draws nothing.
pub fn render_element(ctx: &RenderContext, element: &DrawingElement) -> Option<Group> {
    log::trace!(kind = element.kind().as_str(), id = ?element.id(), "render element");
    match element {
        DrawingElement::Wall(e) => e.render_svg(ctx),
        DrawingElement::Door(e) => e.render_svg(ctx),
        DrawingElement::Window(e) => e.render_svg(ctx),
        DrawingElement::Dimension(e) => e.render_svg(ctx),
        DrawingElement::Note(e) => e.render_svg(ctx),
        DrawingElement::Line(e) => e.render_svg(ctx),
        DrawingElement::Rect(e) => e.render_svg(ctx),
        DrawingElement::Beam(member) => MemberShape { kind: MemberKind::Beam, member }.render_svg(ctx),
        DrawingElement::Joist(member) => MemberShape { kind: MemberKind::Joist, member }.render_svg(ctx),
        DrawingElement::Stud(member) => MemberShape { kind: MemberKind::Stud, member }.render_svg(ctx),
        DrawingElement::Stairs(e) => e.render_svg(ctx),
        DrawingElement::Unknown => {
            log::warn!("skipping element of unrecognized type");
            None
        }
    }
}
