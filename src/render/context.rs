//! Rendering context shared by every element renderer

use crate::types::{Length, Point, PtMm, Scaler};
use crate::units::Unit;
use glam::DVec2;

/// Immutable per-render state: the scale and the drawing's default unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    pub scaler: Scaler,
    pub unit: Unit,
}

impl RenderContext {
    pub fn new(scaler: Scaler, unit: Unit) -> Self {
        Self { scaler, unit }
    }

    /// Scale a raw millimeter value
    #[inline]
    pub fn px(&self, mm: f64) -> f64 {
        self.scaler.px(Length(mm))
    }

    /// Scale a model point
    #[inline]
    pub fn point(&self, p: PtMm) -> DVec2 {
        self.scaler.point(p)
    }

    /// Scale raw millimeter coordinates
    #[inline]
    pub fn xy(&self, x: f64, y: f64) -> DVec2 {
        self.point(Point::mm(x, y))
    }
}
