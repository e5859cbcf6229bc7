//! Strongly-typed numeric primitives (zero-cost newtypes).
//!
//! Model coordinates are always [`Length`] in millimeters. The only way to
//! get canvas units out of them is through a [`Scaler`], so scaled and
//! unscaled values never meet inside one shape.

use glam::{DVec2, dvec2};
use std::fmt;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Length in millimeters (the base unit of every drawing)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    /// Create a Length with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Length, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Length(val))
        }
    }

    /// Create a strictly positive Length with validation
    #[inline]
    pub fn try_positive(val: f64) -> Result<Length, NumericError> {
        let len = Self::try_new(val)?;
        if val == 0.0 {
            Err(NumericError::Zero)
        } else if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(len)
        }
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

/// Angle in degrees (rotation attributes are written in degrees)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Angle(pub f64);

impl Angle {
    /// Angle of a direction vector, in degrees, y-down screen convention.
    pub fn of(v: DVec2) -> Angle {
        Angle(v.y.atan2(v.x).to_degrees())
    }

    /// Bring the angle into (-90, 90] so text never reads upside-down.
    pub fn upright(self) -> Angle {
        let mut deg = self.0;
        if deg > 90.0 {
            deg -= 180.0;
        } else if deg <= -90.0 {
            deg += 180.0;
        }
        Angle(deg)
    }
}

/// Linear multiplier from base-unit millimeters to canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaler {
    pub factor: f64,
}

impl Scaler {
    /// Create a new Scaler (unchecked).
    /// Use `try_new` for computed or user-provided values.
    pub fn new(factor: f64) -> Self { Scaler { factor } }

    /// Create a Scaler with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(factor: f64) -> Result<Self, NumericError> {
        if factor.is_nan() {
            Err(NumericError::NaN)
        } else if factor.is_infinite() {
            Err(NumericError::Infinite)
        } else if factor == 0.0 {
            Err(NumericError::Zero)
        } else if factor < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Scaler { factor })
        }
    }

    /// Uniform scale that fits `extent` inside `viewport` minus `padding` on
    /// every side. The tighter axis wins, so aspect ratio is preserved.
    ///
    /// A zero or negative extent is not guarded here; see
    /// [`Drawing::check_extent`](crate::model::Drawing::check_extent).
    pub fn fit(extent: Size<Length>, viewport: Size<f64>, padding: f64) -> Self {
        let sx = (viewport.w - 2.0 * padding) / extent.w.0;
        let sy = (viewport.h - 2.0 * padding) / extent.h.0;
        Scaler { factor: sx.min(sy) }
    }

    /// Convert a length in millimeters to canvas units.
    #[inline]
    pub fn px(&self, l: Length) -> f64 { l.0 * self.factor }

    /// Convert a model point to a canvas point.
    #[inline]
    pub fn point(&self, p: Point<Length>) -> DVec2 {
        dvec2(self.px(p.x), self.px(p.y))
    }
}

/// Generic 2D point. Origin top-left, y increases downward.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl Point<Length> {
    /// Build a model point from raw millimeter coordinates
    pub fn mm(x: f64, y: f64) -> Self {
        Point { x: Length(x), y: Length(y) }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size<T> {
    pub w: T,
    pub h: T,
}

impl<T> Size<T> {
    pub fn new(w: T, h: T) -> Self { Size { w, h } }
}

/// A unit direction vector (dimensionless, normalized)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct UnitVec {
    dx: f64,
    dy: f64,
}

impl UnitVec {
    /// Create a normalized unit vector from components.
    /// Returns None if the input has zero length.
    pub fn normalized(dx: f64, dy: f64) -> Option<Self> {
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 || !len.is_finite() {
            None
        } else {
            Some(UnitVec { dx: dx / len, dy: dy / len })
        }
    }

    /// Left-hand normal `(-dy, dx)`; still unit length.
    pub fn normal(self) -> UnitVec {
        UnitVec { dx: -self.dy, dy: self.dx }
    }

    pub fn as_dvec2(self) -> DVec2 {
        dvec2(self.dx, self.dy)
    }
}

/// Convenient alias
pub type PtMm = Point<Length>;
