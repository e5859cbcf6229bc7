//! Scaled SVG rendering of architectural drawings.
//!
//! A [`Drawing`] holds walls, openings, structural members, stairs, notes
//! and dimension annotations in millimeters. [`render`] fits the drawing's
//! nominal extent into a viewport and returns a self-contained SVG document
//! in which every element's root group carries `data-id` and `data-type`
//! attributes for hit-testing.
//!
//! ```
//! use plansvg::{Drawing, format_length, render};
//!
//! let drawing = Drawing::from_json(r#"{
//!     "title": "Shed", "scale": "1:20", "unit": "m", "width": 3000, "height": 2000,
//!     "elements": [
//!         {"type": "wall", "id": "w1", "x1": 0, "y1": 0, "x2": 3000, "y2": 0, "thickness": 100},
//!         {"type": "dimension", "id": "d1", "x1": 0, "y1": 0, "x2": 3000, "y2": 0, "value": 3000, "offset": -300}
//!     ]
//! }"#).unwrap();
//!
//! let svg = render(&drawing, 1200.0, 900.0);
//! assert!(svg.contains(r#"data-id="d1""#));
//! assert!(svg.contains(">3.00m<"));
//! assert_eq!(format_length(3000.0, "m"), "3.00m");
//! ```

pub mod errors;
pub mod log;
pub mod model;
pub mod render;
pub mod types;
pub mod units;

pub use errors::{DecodeError, RenderError};
pub use model::{Drawing, DrawingElement, ElementKind};
pub use render::{RenderOptions, fit_scale, render, render_with};
pub use units::{Unit, format_length};

/// Decode generator JSON and render it.
///
/// This is the checked entry point: the document must parse, its extent
/// must be positive and the viewport must leave room for a positive scale.
/// [`render`] itself never fails.
pub fn render_json(source: &str, viewport_width: f64, viewport_height: f64) -> Result<String, miette::Report> {
    let drawing = Drawing::from_json(source)?;
    render::checked_scaler(&drawing, types::Size::new(viewport_width, viewport_height))?;
    Ok(render(&drawing, viewport_width, viewport_height))
}
