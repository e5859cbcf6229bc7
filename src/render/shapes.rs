//! Element renderers
//!
//! Each element kind knows how to turn itself into SVG at the current
//! scale. Every renderer returns either one root `<g>` carrying the
//! element's hit-test attributes, or `None` when there is nothing to draw
//! (zero-length segments, zero-width openings).

use glam::{DVec2, dvec2};
use svg::node::element::Group;

use super::context::RenderContext;
use super::defaults;
use super::geometry::{Segment, oriented_rect};
use super::svg::{
    Anchor, Stroke, arc_to, arrow, element_group, fmt_num, line, path, path_from, polygon, rect, text,
};
use crate::log;
use crate::model::{Door, Line, Member, Note, Rect, StairDirection, Stairs, Swing, Wall, Window};

/// Common behavior for all renderable elements
pub trait Shape {
    /// Render to an SVG group in canvas units. None means nothing drawn.
    fn render_svg(&self, ctx: &RenderContext) -> Option<Group>;
}

/// `translate(x,y)` optionally followed by `rotate(angle)`
fn local_frame(origin: DVec2, angle: f64) -> String {
    let mut t = format!("translate({},{})", fmt_num(origin.x), fmt_num(origin.y));
    if angle != 0.0 {
        t.push_str(&format!(" rotate({})", fmt_num(angle)));
    }
    t
}

// ============================================================================
// Walls
// ============================================================================

impl Shape for Wall {
    fn render_svg(&self, ctx: &RenderContext) -> Option<Group> {
        let seg = Segment::new(ctx.point(self.start()), ctx.point(self.end()));
        let thickness = ctx.px(self.thickness).max(defaults::MIN_THICKNESS);
        let Some(corners) = oriented_rect(&seg, thickness) else {
            log::debug!(id = %self.id, "skipping zero-length wall");
            return None;
        };
        let body = polygon(&corners, defaults::WALL_FILL, Stroke::solid(defaults::STROKE, 1.0));
        Some(element_group(&self.id, "wall", None, None).add(body))
    }
}

// ============================================================================
// Openings
// ============================================================================

impl Shape for Door {
    /// Drawn in a local frame at (x, y): the opening runs along +x from the
    /// origin, leaves open toward -y.
    fn render_svg(&self, ctx: &RenderContext) -> Option<Group> {
        let w = ctx.px(self.width);
        if w == 0.0 {
            log::debug!(id = %self.id, "skipping zero-width door");
            return None;
        }
        let stroke = Stroke::solid(defaults::STROKE, 1.5);
        let arc_stroke = Stroke::solid(defaults::STROKE, 0.75);

        let frame = local_frame(ctx.xy(self.x, self.y), self.angle);
        let group = element_group(&self.id, "door", None, Some(&frame));
        let group = match self.swing {
            Swing::Sliding => {
                let gap = defaults::SLIDING_PANEL_GAP;
                let split = defaults::SLIDING_PANEL_SPLIT;
                let panel = Stroke::dashed(defaults::STROKE, 1.5, defaults::DOOR_PANEL_DASH);
                group
                    .add(line(dvec2(0.0, 0.0), dvec2(w, 0.0), arc_stroke))
                    .add(line(dvec2(0.0, -gap), dvec2(w * split, -gap), panel))
                    .add(line(dvec2(w * (1.0 - split), gap), dvec2(w, gap), panel))
            }
            Swing::Right => {
                // hinge at the far end, sweeping clockwise
                let swing = arc_to(path_from(dvec2(0.0, 0.0)), w, false, true, dvec2(w, -w));
                group
                    .add(line(dvec2(w, 0.0), dvec2(w, -w), stroke))
                    .add(path(swing, "none", arc_stroke))
            }
            Swing::Left | Swing::Double => {
                let swing = arc_to(path_from(dvec2(w, 0.0)), w, false, false, dvec2(0.0, -w));
                group
                    .add(line(dvec2(0.0, 0.0), dvec2(0.0, -w), stroke))
                    .add(path(swing, "none", arc_stroke))
            }
        };
        Some(group)
    }
}

impl Shape for Window {
    /// Frame lines, glazing line, end caps and a mid mullion: always six
    /// lines whatever the width.
    fn render_svg(&self, ctx: &RenderContext) -> Option<Group> {
        let w = ctx.px(self.width);
        if w == 0.0 {
            log::debug!(id = %self.id, "skipping zero-width window");
            return None;
        }
        let hd = defaults::WINDOW_HALF_DEPTH;
        let stroke = Stroke::solid(defaults::STROKE, 1.0);
        let frame = local_frame(ctx.xy(self.x, self.y), self.angle);
        let group = element_group(&self.id, "window", None, Some(&frame))
            .add(line(dvec2(0.0, -hd), dvec2(w, -hd), stroke))
            .add(line(dvec2(0.0, hd), dvec2(w, hd), stroke))
            .add(line(dvec2(0.0, 0.0), dvec2(w, 0.0), Stroke::solid(defaults::STROKE, 0.5)))
            .add(line(dvec2(0.0, -hd), dvec2(0.0, hd), stroke))
            .add(line(dvec2(w, -hd), dvec2(w, hd), stroke))
            .add(line(dvec2(w / 2.0, -hd), dvec2(w / 2.0, hd), stroke));
        Some(group)
    }
}

// ============================================================================
// Annotation and free-form primitives
// ============================================================================

impl Shape for Note {
    fn render_svg(&self, ctx: &RenderContext) -> Option<Group> {
        let size = self.font_size.unwrap_or(defaults::NOTE_FONT_SIZE);
        let body = text(ctx.xy(self.x, self.y), &self.text, size, Anchor::Start);
        Some(element_group(&self.id, "note", None, None).add(body))
    }
}

impl Shape for Line {
    fn render_svg(&self, ctx: &RenderContext) -> Option<Group> {
        let seg = Segment::new(ctx.point(self.start()), ctx.point(self.end()));
        if seg.direction().is_none() {
            log::debug!(id = %self.id, "skipping zero-length line");
            return None;
        }
        let width = self.stroke_width.unwrap_or(defaults::LINE_STROKE_WIDTH);
        let stroke = match self.dash.as_deref() {
            Some(dash) => Stroke::dashed(defaults::STROKE, width, dash),
            None => Stroke::solid(defaults::STROKE, width),
        };
        Some(element_group(&self.id, "line", None, None).add(line(seg.start, seg.end, stroke)))
    }
}

impl Shape for Rect {
    fn render_svg(&self, ctx: &RenderContext) -> Option<Group> {
        let origin = ctx.xy(self.x, self.y);
        let size = dvec2(ctx.px(self.width), ctx.px(self.height));
        let fill = self.fill.as_deref().unwrap_or("none");
        let mut group = element_group(&self.id, "rect", None, None)
            .add(rect(origin, size, fill, Some(Stroke::solid(defaults::STROKE, 1.0))));
        if let Some(label) = &self.label {
            group = group.add(text(origin + size * 0.5, label, defaults::LABEL_FONT_SIZE, Anchor::Middle));
        }
        Some(group)
    }
}

// ============================================================================
// Structural members
// ============================================================================

/// Which structural member a [`Member`] is; only the fill differs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Beam,
    Joist,
    Stud,
}

impl MemberKind {
    pub fn fill(self) -> &'static str {
        match self {
            MemberKind::Beam => defaults::BEAM_FILL,
            MemberKind::Joist => defaults::JOIST_FILL,
            MemberKind::Stud => defaults::STUD_FILL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Beam => "beam",
            MemberKind::Joist => "joist",
            MemberKind::Stud => "stud",
        }
    }
}

/// A [`Member`] paired with its kind for rendering
#[derive(Debug, Clone, Copy)]
pub struct MemberShape<'a> {
    pub kind: MemberKind,
    pub member: &'a Member,
}

impl Shape for MemberShape<'_> {
    fn render_svg(&self, ctx: &RenderContext) -> Option<Group> {
        let m = self.member;
        let seg = Segment::new(ctx.point(m.start()), ctx.point(m.end()));
        let thickness = ctx.px(m.width).max(defaults::MIN_THICKNESS);
        let (Some(corners), Some(n)) = (oriented_rect(&seg, thickness), seg.normal()) else {
            log::debug!(id = %m.id, kind = self.kind.as_str(), "skipping zero-length member");
            return None;
        };

        let mut group = element_group(&m.id, self.kind.as_str(), None, None)
            .add(polygon(&corners, self.kind.fill(), Stroke::solid(defaults::STROKE, 1.0)))
            .add(line(
                seg.start,
                seg.end,
                Stroke::dashed(defaults::STROKE, 0.75, defaults::MEMBER_HATCH_DASH),
            ));
        if let Some(label) = &m.label {
            let at = seg.midpoint() - n * (thickness / 2.0 + defaults::MEMBER_LABEL_GAP);
            group = group.add(text(at, label, defaults::LABEL_FONT_SIZE, Anchor::Middle));
        }
        Some(group)
    }
}

// ============================================================================
// Stairs
// ============================================================================

/// Tread count from a producer-supplied step count: rounded, at least one,
/// capped at `MAX_STAIR_STEPS`.
fn tread_count(steps: f64) -> u32 {
    if steps.is_nan() {
        return 1;
    }
    steps.round().clamp(1.0, defaults::MAX_STAIR_STEPS) as u32
}

impl Shape for Stairs {
    /// Outline, `steps + 1` treads, a direction arrow and an UP/DN label,
    /// rotated about the flight's center.
    fn render_svg(&self, ctx: &RenderContext) -> Option<Group> {
        let origin = ctx.xy(self.x, self.y);
        let w = ctx.px(self.width);
        let len = ctx.px(self.length);
        let center = origin + dvec2(w, len) * 0.5;
        let steps = tread_count(self.steps);
        let spacing = len / f64::from(steps);

        let transform = (self.angle != 0.0).then(|| {
            format!("rotate({} {} {})", fmt_num(self.angle), fmt_num(center.x), fmt_num(center.y))
        });
        let stroke = Stroke::solid(defaults::STROKE, 1.0);
        let mut group = element_group(&self.id, "stairs", None, transform.as_deref())
            .add(rect(origin, dvec2(w, len), "#ffffff", Some(stroke)));
        for i in 0..=steps {
            let y = origin.y + f64::from(i) * spacing;
            group = group.add(line(
                dvec2(origin.x, y),
                dvec2(origin.x + w, y),
                Stroke::solid(defaults::STROKE, 0.75),
            ));
        }

        let (tip, label) = match self.direction {
            StairDirection::Up => (dvec2(center.x, origin.y + defaults::STAIR_ARROW_INSET), "UP"),
            StairDirection::Down => (dvec2(center.x, origin.y + len - defaults::STAIR_ARROW_INSET), "DN"),
        };
        group = group
            .add(arrow(center, tip, Stroke::solid(defaults::STROKE, 1.25)))
            .add(text(
                center + dvec2(defaults::STAIR_LABEL_OFFSET, 0.0),
                label,
                defaults::LABEL_FONT_SIZE,
                Anchor::Start,
            ));
        Some(group)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::Scaler;
    use crate::units::Unit;

    fn ctx(scale: f64) -> RenderContext {
        RenderContext::new(Scaler::new(scale), Unit::Mm)
    }

    fn markup(shape: &impl Shape, scale: f64) -> String {
        shape.render_svg(&ctx(scale)).map(|g| g.to_string()).unwrap_or_default()
    }

    fn wall(x1: f64, y1: f64, x2: f64, y2: f64, thickness: f64) -> Wall {
        Wall { id: "w1".into(), x1, y1, x2, y2, thickness }
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    /// The start tag that contains `needle`
    pub(crate) fn tag_with<'a>(svg: &'a str, needle: &str) -> &'a str {
        let at = svg.find(needle).unwrap_or_else(|| panic!("{needle} not in {svg}"));
        let start = svg[..=at].rfind('<').unwrap();
        let end = at + svg[at..].find('>').unwrap();
        &svg[start..=end]
    }

    /// Path commands and numbers of the first `d` attribute, one space
    /// between tokens.
    fn path_tokens(svg: &str) -> String {
        let d = tag_with(svg, " d=\"");
        let start = d.find(" d=\"").unwrap() + 4;
        let value = &d[start..start + d[start..].find('"').unwrap()];
        let mut spaced = String::new();
        for c in value.chars() {
            match c {
                c if c.is_ascii_alphabetic() => {
                    spaced.push(' ');
                    spaced.push(c);
                    spaced.push(' ');
                }
                ',' => spaced.push(' '),
                c => spaced.push(c),
            }
        }
        spaced.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn wall_is_oriented_polygon() {
        let svg = markup(&wall(0.0, 0.0, 1000.0, 0.0, 200.0), 0.1);
        let poly = tag_with(&svg, "<polygon");
        assert!(poly.contains(r#"points="0,10 100,10 100,-10 0,-10""#), "{svg}");
        assert!(poly.contains(&format!(r#"fill="{}""#, defaults::WALL_FILL)));
        assert!(svg.contains(r#"data-id="w1""#) && svg.contains(r#"data-type="wall""#));
    }

    #[test]
    fn thin_wall_gets_minimum_thickness() {
        // 100mm at 0.01 would be 1 unit; floor is 2
        let svg = markup(&wall(0.0, 0.0, 1000.0, 0.0, 100.0), 0.01);
        assert!(svg.contains(r#"points="0,1 10,1 10,-1 0,-1""#), "{svg}");
    }

    #[test]
    fn degenerate_wall_renders_nothing() {
        assert!(wall(500.0, 500.0, 500.0, 500.0, 200.0).render_svg(&ctx(0.1)).is_none());
    }

    #[test]
    fn door_swing_direction() {
        let door = |swing| Door { id: "d1".into(), x: 1000.0, y: 0.0, width: 900.0, angle: 0.0, swing };

        let left = markup(&door(Swing::Left), 0.1);
        assert!(left.contains(r#"transform="translate(100,0)""#));
        assert_eq!(path_tokens(&left), "M 90 0 A 90 90 0 0 0 0 -90");

        let right = markup(&door(Swing::Right), 0.1);
        assert_eq!(path_tokens(&right), "M 0 0 A 90 90 0 0 1 90 -90");

        let double = markup(&door(Swing::Double), 0.1);
        assert_eq!(path_tokens(&double), path_tokens(&left));
    }

    #[test]
    fn sliding_door_has_no_arc() {
        let door = Door { id: "d2".into(), x: 0.0, y: 0.0, width: 1000.0, angle: 90.0, swing: Swing::Sliding };
        let svg = markup(&door, 0.1);
        assert!(!svg.contains("<path"));
        assert_eq!(count(&svg, "<line"), 3);
        assert_eq!(count(&svg, "stroke-dasharray"), 2);
        let front = tag_with(&svg, r#"y2="-3""#);
        assert!(front.contains(r#"x2="60""#), "{svg}");
        let back = tag_with(&svg, r#"y1="3""#);
        assert!(back.contains(r#"x1="40""#), "{svg}");
        assert!(svg.contains("rotate(90)"));
    }

    #[test]
    fn window_is_six_lines_at_any_width() {
        for width in [300.0, 900.0, 4000.0] {
            let win = Window { id: "win".into(), x: 0.0, y: 0.0, width, angle: 0.0 };
            assert_eq!(count(&markup(&win, 0.1), "<line"), 6);
        }
    }

    #[test]
    fn rotated_window_turns_its_local_frame() {
        let win = Window { id: "win".into(), x: 2000.0, y: 500.0, width: 1200.0, angle: 90.0 };
        let svg = markup(&win, 0.1);
        assert!(svg.contains(r#"transform="translate(200,50) rotate(90)""#), "{svg}");
        assert_eq!(count(&svg, "<line"), 6);
    }

    #[test]
    fn zero_width_openings_render_nothing() {
        let win = Window { id: "win".into(), x: 0.0, y: 0.0, width: 0.0, angle: 0.0 };
        assert!(win.render_svg(&ctx(0.1)).is_none());
        let door = Door { id: "d".into(), x: 0.0, y: 0.0, width: 0.0, angle: 0.0, swing: Swing::Left };
        assert!(door.render_svg(&ctx(0.1)).is_none());
    }

    #[test]
    fn note_defaults_font_size() {
        let note = Note { id: "n".into(), x: 100.0, y: 200.0, text: "Kitchen".into(), font_size: None };
        let svg = markup(&note, 0.5);
        let t = tag_with(&svg, "<text");
        assert!(t.contains(r#"x="50""#) && t.contains(r#"y="100""#), "{svg}");
        assert!(t.contains(r#"font-size="10""#));
        assert!(svg.contains(">Kitchen</text>"));
    }

    #[test]
    fn line_options() {
        let mut l = Line { id: "l".into(), x1: 0.0, y1: 0.0, x2: 100.0, y2: 0.0, stroke_width: None, dash: None };
        let svg = markup(&l, 1.0);
        assert!(svg.contains(r#"stroke-width="1""#));
        assert!(!svg.contains("dasharray"));

        l.stroke_width = Some(2.5);
        l.dash = Some("5,5".into());
        let svg = markup(&l, 1.0);
        assert!(svg.contains(r#"stroke-width="2.5""#));
        assert!(svg.contains(r#"stroke-dasharray="5,5""#));

        l.x2 = 0.0;
        assert!(l.render_svg(&ctx(1.0)).is_none());
    }

    #[test]
    fn rect_label_is_centered() {
        let r = Rect {
            id: "r".into(),
            x: 100.0,
            y: 100.0,
            width: 400.0,
            height: 200.0,
            fill: Some("#eef".into()),
            label: Some("Bath".into()),
        };
        let svg = markup(&r, 0.5);
        let outline = tag_with(&svg, "<rect");
        for attr in [r#"x="50""#, r#"y="50""#, r#"width="200""#, r#"height="100""#, r##"fill="#eef""##] {
            assert!(outline.contains(attr), "{attr} missing in {outline}");
        }
        let label = tag_with(&svg, "<text");
        assert!(label.contains(r#"x="150""#) && label.contains(r#"y="100""#), "{svg}");
    }

    fn member(x2: f64, label: Option<&str>) -> Member {
        Member {
            id: "m".into(),
            x1: 0.0,
            y1: 0.0,
            x2,
            y2: 0.0,
            width: 100.0,
            depth: Some(300.0),
            label: label.map(String::from),
        }
    }

    #[test]
    fn members_differ_only_in_fill() {
        let member = member(3000.0, None);
        let render = |kind| markup(&MemberShape { kind, member: &member }, 0.1);
        let beam = render(MemberKind::Beam);
        let joist = render(MemberKind::Joist);
        assert!(beam.contains(defaults::BEAM_FILL));
        assert!(joist.contains(defaults::JOIST_FILL));
        assert_eq!(
            beam.replace(defaults::BEAM_FILL, "F").replace("\"beam\"", "K"),
            joist.replace(defaults::JOIST_FILL, "F").replace("\"joist\"", "K"),
        );
        assert!(beam.contains(defaults::MEMBER_HATCH_DASH));
    }

    #[test]
    fn zero_length_member_renders_nothing() {
        let member = member(0.0, Some("J1"));
        for kind in [MemberKind::Beam, MemberKind::Joist, MemberKind::Stud] {
            assert!(MemberShape { kind, member: &member }.render_svg(&ctx(0.1)).is_none());
        }
    }

    #[test]
    fn member_label_sits_off_the_member() {
        let mut member = member(1000.0, Some("W8x10"));
        member.width = 200.0;
        let svg = markup(&MemberShape { kind: MemberKind::Beam, member: &member }, 0.1);
        // normal is +y, thickness 20: label at y = -(10 + 8)
        let label = tag_with(&svg, "<text");
        assert!(label.contains(r#"x="50""#) && label.contains(r#"y="-18""#), "{svg}");
    }

    fn stairs(steps: f64) -> Stairs {
        Stairs {
            id: "s".into(),
            x: 0.0,
            y: 0.0,
            width: 1000.0,
            length: 3000.0,
            steps,
            direction: StairDirection::Up,
            angle: 0.0,
        }
    }

    #[test]
    fn stairs_treads_and_direction() {
        let mut stairs = stairs(12.0);
        let up = markup(&stairs, 0.1);
        // 13 tread lines plus the arrow
        assert_eq!(count(&up, "<line"), 14);
        let arrow = tag_with(&up, "marker-end");
        for attr in [r#"x1="50""#, r#"y1="150""#, r#"x2="50""#, r#"y2="8""#] {
            assert!(arrow.contains(attr), "{attr} missing in {arrow}");
        }
        assert!(up.contains(">UP</text>"));
        assert!(!up.contains("rotate("));

        stairs.direction = StairDirection::Down;
        stairs.angle = 90.0;
        let down = markup(&stairs, 0.1);
        assert!(tag_with(&down, "marker-end").contains(r#"y2="292""#), "{down}");
        assert!(down.contains(">DN</text>"));
        assert!(down.contains(r#"transform="rotate(90 50 150)""#));
    }

    #[test]
    fn stairs_step_count_is_clamped() {
        for steps in [0.0, -1.0, f64::NAN] {
            let svg = markup(&stairs(steps), 0.1);
            assert!(!svg.contains("NaN") && !svg.contains("inf"));
            assert_eq!(count(&svg, "<line"), 3, "steps = {steps}");
        }
        // fractional counts round
        assert_eq!(count(&markup(&stairs(11.6), 0.1), "<line"), 14);
        assert_eq!(tread_count(1e12), defaults::MAX_STAIR_STEPS as u32);
    }
}
