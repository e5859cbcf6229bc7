//! Design constants (canvas units unless noted).
//!
//! These fix the look of every drawing and are compared against in visual
//! tests, so they are not configurable.

/// Space between the viewport edge and the drawing extent
pub const PADDING: f64 = 60.0;
/// Walls and members never draw thinner than this
pub const MIN_THICKNESS: f64 = 2.0;

/// Extension lines start this far from the measured geometry
pub const EXTENSION_GAP: f64 = 3.0;
/// Extension lines run this far past the dimension line
pub const EXTENSION_OVERSHOOT: f64 = 6.0;
/// Half length of the tick across each end of a dimension line
pub const TICK_HALF_LENGTH: f64 = 4.0;
pub const DIMENSION_LABEL_WIDTH: f64 = 48.0;
pub const DIMENSION_LABEL_HEIGHT: f64 = 16.0;
pub const DIMENSION_FONT_SIZE: f64 = 11.0;

pub const NOTE_FONT_SIZE: f64 = 10.0;
pub const LINE_STROKE_WIDTH: f64 = 1.0;
pub const LABEL_FONT_SIZE: f64 = 10.0;

/// Sliding door panels sit this far either side of the track
pub const SLIDING_PANEL_GAP: f64 = 3.0;
/// Fraction of the opening covered by each sliding panel
pub const SLIDING_PANEL_SPLIT: f64 = 0.6;
pub const DOOR_PANEL_DASH: &str = "4,2";
/// Half the depth of a window frame
pub const WINDOW_HALF_DEPTH: f64 = 4.0;

/// Clearance between a member's edge and its label
pub const MEMBER_LABEL_GAP: f64 = 8.0;
pub const MEMBER_HATCH_DASH: &str = "6,3";
pub const BEAM_FILL: &str = "#c8a27a";
pub const JOIST_FILL: &str = "#d9c08c";
pub const STUD_FILL: &str = "#e6d5b8";

/// Stair arrows stop this far short of the flight's end
pub const STAIR_ARROW_INSET: f64 = 8.0;
/// The UP/DN label sits this far beside the arrow
pub const STAIR_LABEL_OFFSET: f64 = 10.0;
/// Stair flights never draw more treads than this
pub const MAX_STAIR_STEPS: f64 = 200.0;

pub const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";
pub const STROKE: &str = "#1f2933";
pub const DIMENSION_STROKE: &str = "#2563eb";
pub const WALL_FILL: &str = "#374151";

pub const BORDER_INSET: f64 = 10.0;
pub const BORDER_WIDTH: f64 = 2.0;
pub const GRID_SPACING: f64 = 20.0;
pub const GRID_STROKE: &str = "#e5e7eb";

pub const TITLE_BLOCK_WIDTH: f64 = 240.0;
pub const TITLE_BLOCK_HEIGHT: f64 = 110.0;
pub const TITLE_BLOCK_LINE_HEIGHT: f64 = 15.0;
pub const DEFAULT_DRAWING_TYPE: &str = "FLOOR PLAN";

/// Viewport used when no explicit size is given
pub const VIEWPORT_WIDTH: f64 = 1200.0;
pub const VIEWPORT_HEIGHT: f64 = 900.0;
