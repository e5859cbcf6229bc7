//! Geometry helpers: directed segments, normals and oriented rectangles.
//!
//! Everything here works in canvas units (already scaled).

use glam::DVec2;

use crate::types::{Angle, Length, Scaler, Size, UnitVec};

/// A directed segment in canvas units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    pub fn delta(&self) -> DVec2 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> DVec2 {
        (self.start + self.end) * 0.5
    }

    /// Unit direction; None for a zero-length segment.
    pub fn direction(&self) -> Option<UnitVec> {
        let d = self.delta();
        UnitVec::normalized(d.x, d.y)
    }

    /// Unit normal `(-dy, dx) / len`; None for a zero-length segment.
    pub fn normal(&self) -> Option<DVec2> {
        self.direction().map(|dir| dir.normal().as_dvec2())
    }

    /// The same segment moved `distance` along `normal`.
    pub fn shifted(&self, normal: DVec2, distance: f64) -> Segment {
        let shift = normal * distance;
        Segment::new(self.start + shift, self.end + shift)
    }

    /// Direction angle in degrees (y-down)
    pub fn angle(&self) -> Angle {
        Angle::of(self.delta())
    }
}

/// Four corners of a rectangle of the given thickness centered on `seg`,
/// ordered start-left, end-left, end-right, start-right.
///
/// None when the segment has zero length.
pub fn oriented_rect(seg: &Segment, thickness: f64) -> Option<[DVec2; 4]> {
    let n = seg.normal()?;
    let half = n * (thickness / 2.0);
    Some([seg.start + half, seg.end + half, seg.end - half, seg.start - half])
}

/// Scale factor that fits a `drawing_width` x `drawing_height` extent into
/// the viewport with `padding` on every side.
pub fn fit_scale(
    drawing_width: f64,
    drawing_height: f64,
    viewport_width: f64,
    viewport_height: f64,
    padding: f64,
) -> f64 {
    Scaler::fit(
        Size::new(Length(drawing_width), Length(drawing_height)),
        Size::new(viewport_width, viewport_height),
        padding,
    )
    .factor
}
