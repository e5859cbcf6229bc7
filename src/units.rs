//! Display units and length formatting.
//!
//! Every model length is stored in millimeters; [`Unit`] only decides how a
//! length is printed on a label.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::types::Length;

const MM_PER_INCH: f64 = 25.4;
const INCHES_PER_FOOT: f64 = 12.0;

/// Unit system used for human-readable labels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    #[default]
    Mm,
    Cm,
    M,
    In,
    Ft,
}

impl Unit {
    /// Parse a unit tag. Unrecognized tags fall back to millimeters.
    pub fn from_tag(tag: &str) -> Unit {
        match tag.trim() {
            "mm" => Unit::Mm,
            "cm" => Unit::Cm,
            "m" => Unit::M,
            "in" => Unit::In,
            "ft" => Unit::Ft,
            _ => Unit::Mm,
        }
    }

    /// The short tag this unit is serialized as
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::M => "m",
            Unit::In => "in",
            Unit::Ft => "ft",
        }
    }

    /// Long name for the title block
    pub fn label(self) -> &'static str {
        match self {
            Unit::Mm => "Millimeters",
            Unit::Cm => "Centimeters",
            Unit::M => "Meters",
            Unit::In => "Inches",
            Unit::Ft => "Feet",
        }
    }

    /// Format a base-unit length for display.
    ///
    /// Negative lengths are not rejected; they go through the same
    /// arithmetic and come out signed. Ties round away from zero.
    pub fn format(self, length: Length) -> String {
        let mm = length.raw();
        match self {
            Unit::Mm => format!("{}mm", rounded(mm, 1.0, 0)),
            Unit::Cm => format!("{:.1}cm", rounded(mm, 10.0, 1)),
            Unit::M => format!("{:.2}m", rounded(mm, 1000.0, 2)),
            Unit::In => format!("{:.1}\"", rounded(mm, MM_PER_INCH, 1)),
            Unit::Ft => {
                let total_inches = mm / MM_PER_INCH;
                let feet = (total_inches / INCHES_PER_FOOT).floor();
                // The remainder may round up to 12 without carrying into
                // the feet; labels like 0'12" are the established output.
                let inches = (total_inches % INCHES_PER_FOOT).round() + 0.0;
                format!("{feet}'{inches}\"")
            }
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Unit::from_tag(&tag))
    }
}

/// `mm` in units of `mm_per_unit`, rounded half away from zero to `places`
/// decimals. Adding zero turns a rounded `-0` into `0`.
fn rounded(mm: f64, mm_per_unit: f64, places: i32) -> f64 {
    let steps = 10f64.powi(places);
    (mm * steps / mm_per_unit).round() / steps + 0.0
}

/// Format a raw millimeter value for the unit named by `unit`.
///
/// Unknown unit tags format as millimeters.
pub fn format_length(value_mm: f64, unit: &str) -> String {
    Unit::from_tag(unit).format(Length(value_mm))
}
