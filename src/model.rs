//! Drawing documents as produced by the generator.
//!
//! All positional and size fields are millimeters, whatever the display
//! unit. Elements are internally tagged by `"type"`; unrecognized tags
//! decode into [`DrawingElement::Unknown`] and render as nothing.

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{DecodeError, RenderError};
use crate::types::{Length, Point, PtMm, Size};
use crate::units::Unit;

/// Stable element identifier, unique within a drawing
pub type ElementId = String;

/// A complete drawing: extent, display unit, metadata and elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    #[serde(default)]
    pub title: String,
    /// Descriptive scale label such as "1:50"; not used for geometry
    #[serde(default)]
    pub scale: String,
    #[serde(default)]
    pub unit: Unit,
    /// Nominal drawn extent, used for the fit-to-viewport scale
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub elements: Vec<DrawingElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawn_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawing_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Drawing {
    /// Create an empty drawing with the given nominal extent.
    pub fn new(title: impl Into<String>, unit: Unit, width: f64, height: f64) -> Self {
        Self {
            title: title.into(),
            scale: String::new(),
            unit,
            width,
            height,
            elements: Vec::new(),
            drawn_by: None,
            drawing_type: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Decode a drawing from generator JSON.
    pub fn from_json(source: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(source).map_err(|e| DecodeError::from_json("drawing.json", source, &e))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Nominal extent as typed lengths
    pub fn extent(&self) -> Size<Length> {
        Size::new(Length(self.width), Length(self.height))
    }

    /// Check the extent before scale-fitting. The renderer itself does not
    /// guard against zero or negative extents.
    pub fn check_extent(&self) -> Result<(), RenderError> {
        let invalid = |cause| RenderError::InvalidExtent {
            width: self.width,
            height: self.height,
            cause,
        };
        Length::try_positive(self.width).map_err(invalid)?;
        Length::try_positive(self.height).map_err(invalid)?;
        Ok(())
    }

    pub fn element(&self, id: &str) -> Option<&DrawingElement> {
        self.elements.iter().find(|e| e.id() == Some(id))
    }

    /// Replace the element that shares `element`'s id, keeping its position
    /// in the sequence, and stamp `updated_at`.
    ///
    /// Returns false (and changes nothing) when no element has that id or
    /// when the replacement would change the element's kind.
    pub fn replace_element(&mut self, element: DrawingElement, updated_at: impl Into<String>) -> bool {
        let Some(id) = element.id() else {
            return false;
        };
        let Some(slot) = self.elements.iter_mut().find(|e| e.id() == Some(id)) else {
            return false;
        };
        if slot.kind() != element.kind() {
            return false;
        }
        *slot = element;
        self.updated_at = Some(updated_at.into());
        true
    }

    /// Set the displayed measurement of a dimension element.
    pub fn set_dimension_value(&mut self, id: &str, value: f64, updated_at: impl Into<String>) -> bool {
        let Some(DrawingElement::Dimension(dim)) = self.element(id) else {
            return false;
        };
        let edited = DrawingElement::Dimension(Dimension {
            value,
            ..dim.clone()
        });
        self.replace_element(edited, updated_at)
    }
}

/// Kind tag of an element, as written to `data-type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Wall,
    Door,
    Window,
    Dimension,
    Note,
    Line,
    Rect,
    Beam,
    Joist,
    Stud,
    Stairs,
    Unknown,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Wall => "wall",
            ElementKind::Door => "door",
            ElementKind::Window => "window",
            ElementKind::Dimension => "dimension",
            ElementKind::Note => "note",
            ElementKind::Line => "line",
            ElementKind::Rect => "rect",
            ElementKind::Beam => "beam",
            ElementKind::Joist => "joist",
            ElementKind::Stud => "stud",
            ElementKind::Stairs => "stairs",
            ElementKind::Unknown => "unknown",
        }
    }
}

/// One element of a drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawingElement {
    Wall(Wall),
    Door(Door),
    Window(Window),
    Dimension(Dimension),
    Note(Note),
    Line(Line),
    Rect(Rect),
    Beam(Member),
    Joist(Member),
    Stud(Member),
    Stairs(Stairs),
    #[serde(other)]
    Unknown,
}

impl DrawingElement {
    pub fn id(&self) -> Option<&str> {
        let id = match self {
            DrawingElement::Wall(e) => &e.id,
            DrawingElement::Door(e) => &e.id,
            DrawingElement::Window(e) => &e.id,
            DrawingElement::Dimension(e) => &e.id,
            DrawingElement::Note(e) => &e.id,
            DrawingElement::Line(e) => &e.id,
            DrawingElement::Rect(e) => &e.id,
            DrawingElement::Beam(e) | DrawingElement::Joist(e) | DrawingElement::Stud(e) => &e.id,
            DrawingElement::Stairs(e) => &e.id,
            DrawingElement::Unknown => return None,
        };
        Some(id)
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            DrawingElement::Wall(_) => ElementKind::Wall,
            DrawingElement::Door(_) => ElementKind::Door,
            DrawingElement::Window(_) => ElementKind::Window,
            DrawingElement::Dimension(_) => ElementKind::Dimension,
            DrawingElement::Note(_) => ElementKind::Note,
            DrawingElement::Line(_) => ElementKind::Line,
            DrawingElement::Rect(_) => ElementKind::Rect,
            DrawingElement::Beam(_) => ElementKind::Beam,
            DrawingElement::Joist(_) => ElementKind::Joist,
            DrawingElement::Stud(_) => ElementKind::Stud,
            DrawingElement::Stairs(_) => ElementKind::Stairs,
            DrawingElement::Unknown => ElementKind::Unknown,
        }
    }

    pub fn is_dimension(&self) -> bool {
        matches!(self, DrawingElement::Dimension(_))
    }
}

// ============================================================================
// Element Types
// ============================================================================

/// A wall between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub id: ElementId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub thickness: f64,
}

impl Wall {
    pub fn start(&self) -> PtMm { Point::mm(self.x1, self.y1) }
    pub fn end(&self) -> PtMm { Point::mm(self.x2, self.y2) }
}

/// How a door leaf moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Swing {
    #[default]
    Left,
    Right,
    Double,
    Sliding,
}

impl Swing {
    /// Parse a swing tag. Unrecognized tags draw as a left swing.
    pub fn from_tag(tag: &str) -> Swing {
        match tag.trim() {
            "right" => Swing::Right,
            "double" => Swing::Double,
            "sliding" => Swing::Sliding,
            _ => Swing::Left,
        }
    }
}

impl<'de> Deserialize<'de> for Swing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Swing::from_tag(&tag))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Door {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    /// Rotation in degrees about (x, y)
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub swing: Swing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    /// Rotation in degrees about (x, y)
    #[serde(default)]
    pub angle: f64,
}

/// A dimension annotation. `value` is what the label shows; it may differ
/// from the distance between the two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub id: ElementId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub value: f64,
    /// Perpendicular distance of the dimension line; sign picks the side
    #[serde(default)]
    pub offset: f64,
    /// Display unit override; the drawing's unit applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    /// Literal label text, replacing the formatted value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Dimension {
    pub fn start(&self) -> PtMm { Point::mm(self.x1, self.y1) }
    pub fn end(&self) -> PtMm { Point::mm(self.x2, self.y2) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: ElementId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// SVG dash pattern, e.g. "6,4"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

impl Line {
    pub fn start(&self) -> PtMm { Point::mm(self.x1, self.y1) }
    pub fn end(&self) -> PtMm { Point::mm(self.x2, self.y2) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Beam, joist or stud: a member between two points, `width` thick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: ElementId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    /// Section depth; not drawn in plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Member {
    pub fn start(&self) -> PtMm { Point::mm(self.x1, self.y1) }
    pub fn end(&self) -> PtMm { Point::mm(self.x2, self.y2) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StairDirection {
    #[default]
    Up,
    Down,
}

impl StairDirection {
    /// Parse a direction tag. Anything but "down" climbs.
    pub fn from_tag(tag: &str) -> StairDirection {
        match tag.trim() {
            "down" => StairDirection::Down,
            _ => StairDirection::Up,
        }
    }
}

impl<'de> Deserialize<'de> for StairDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(StairDirection::from_tag(&tag))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stairs {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub length: f64,
    /// Tread count as sent; rounded and clamped when drawn
    pub steps: f64,
    #[serde(default)]
    pub direction: StairDirection,
    /// Rotation in degrees about the flight's center
    #[serde(default)]
    pub angle: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "title": "Ground floor",
        "scale": "1:50",
        "unit": "m",
        "width": 6000,
        "height": 4000,
        "drawnBy": "R. Okafor",
        "updatedAt": "2026-03-14T09:30:00Z",
        "elements": [
            {"type": "wall", "id": "w1", "x1": 0, "y1": 0, "x2": 6000, "y2": 0, "thickness": 200},
            {"type": "door", "id": "d1", "x": 1000, "y": 0, "width": 900, "swing": "right"},
            {"type": "dimension", "id": "dim1", "x1": 0, "y1": 0, "x2": 6000, "y2": 0, "value": 6000, "offset": -400},
            {"type": "joist", "id": "j1", "x1": 0, "y1": 1000, "x2": 6000, "y2": 1000, "width": 50, "depth": 200},
            {"type": "hologram", "id": "h1", "x": 5}
        ]
    }"#;

    #[test]
    fn decodes_generator_json() {
        let drawing = Drawing::from_json(SAMPLE).unwrap();
        assert_eq!(drawing.unit, Unit::M);
        assert_eq!(drawing.drawn_by.as_deref(), Some("R. Okafor"));
        assert_eq!(drawing.elements.len(), 5);

        let kinds: Vec<_> = drawing.elements.iter().map(DrawingElement::kind).collect();
        assert_eq!(
            kinds,
            [ElementKind::Wall, ElementKind::Door, ElementKind::Dimension, ElementKind::Joist, ElementKind::Unknown]
        );

        let DrawingElement::Door(door) = &drawing.elements[1] else {
            panic!("expected door");
        };
        assert_eq!(door.swing, Swing::Right);
        assert_eq!(door.angle, 0.0);
    }

    #[test]
    fn unknown_swing_and_direction_fall_back() {
        let drawing = Drawing::from_json(
            r#"{"width": 3000, "height": 3000, "elements": [
                {"type": "door", "id": "d", "x": 0, "y": 0, "width": 900, "swing": "pocket"},
                {"type": "stairs", "id": "s1", "x": 0, "y": 0, "width": 900, "length": 2800,
                 "steps": 12.0, "direction": "sideways"},
                {"type": "stairs", "id": "s2", "x": 0, "y": 0, "width": 900, "length": 2800,
                 "steps": -1, "direction": "down"}
            ]}"#,
        )
        .unwrap();
        let [DrawingElement::Door(door), DrawingElement::Stairs(s1), DrawingElement::Stairs(s2)] =
            drawing.elements.as_slice()
        else {
            panic!("unexpected elements: {:?}", drawing.elements);
        };
        assert_eq!(door.swing, Swing::Left);
        assert_eq!((s1.direction, s1.steps), (StairDirection::Up, 12.0));
        assert_eq!((s2.direction, s2.steps), (StairDirection::Down, -1.0));
    }

    #[test]
    fn unknown_element_has_no_id() {
        let drawing = Drawing::from_json(SAMPLE).unwrap();
        assert_eq!(drawing.elements[4].id(), None);
        assert!(drawing.element("h1").is_none());
    }

    #[test]
    fn bad_json_reports_decode_error() {
        let err = Drawing::from_json(r#"{"width": 10, "height": }"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid drawing document"));
    }

    #[test]
    fn set_dimension_value_replaces_in_place() {
        let mut drawing = Drawing::from_json(SAMPLE).unwrap();
        assert!(drawing.set_dimension_value("dim1", 5950.0, "2026-03-15T10:00:00Z"));

        let DrawingElement::Dimension(dim) = &drawing.elements[2] else {
            panic!("dimension moved");
        };
        assert_eq!(dim.value, 5950.0);
        assert_eq!(dim.offset, -400.0);
        assert_eq!(drawing.updated_at.as_deref(), Some("2026-03-15T10:00:00Z"));
    }

    #[test]
    fn set_dimension_value_ignores_other_kinds() {
        let mut drawing = Drawing::from_json(SAMPLE).unwrap();
        let before = drawing.clone();
        assert!(!drawing.set_dimension_value("w1", 1.0, "2026-03-15T10:00:00Z"));
        assert!(!drawing.set_dimension_value("missing", 1.0, "2026-03-15T10:00:00Z"));
        assert_eq!(drawing, before);
    }

    #[test]
    fn replace_element_keeps_kind() {
        let mut drawing = Drawing::from_json(SAMPLE).unwrap();
        let impostor = DrawingElement::Window(Window {
            id: "w1".into(),
            x: 0.0,
            y: 0.0,
            width: 900.0,
            angle: 0.0,
        });
        assert!(!drawing.replace_element(impostor, "2026-03-15T10:00:00Z"));
        assert_eq!(drawing.elements[0].kind(), ElementKind::Wall);
    }

    #[test]
    fn check_extent_rejects_empty_drawings() {
        assert!(Drawing::new("ok", Unit::Mm, 100.0, 50.0).check_extent().is_ok());
        assert!(Drawing::new("flat", Unit::Mm, 100.0, 0.0).check_extent().is_err());
        assert!(Drawing::new("neg", Unit::Mm, -1.0, 50.0).check_extent().is_err());
        assert!(Drawing::new("nan", Unit::Mm, f64::NAN, 50.0).check_extent().is_err());
    }

    #[test]
    fn json_round_trip_preserves_drawing() {
        let drawing = Drawing::from_json(SAMPLE).unwrap();
        let text = drawing.to_json().unwrap();
        let mut again = Drawing::from_json(&text).unwrap();
        // Unknown elements are not preserved on the way out.
        let mut expected = drawing.clone();
        expected.elements.retain(|e| e.kind() != ElementKind::Unknown);
        again.elements.retain(|e| e.kind() != ElementKind::Unknown);
        assert_eq!(again, expected);
    }
}
