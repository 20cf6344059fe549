//! Value types for the overlay's desktop coordinate space.
//!
//! Geometry is `kurbo`'s.  The space is **y-up**: the origin sits at the
//! bottom-left corner of the overlay and `y` grows upward, so the *top* edge
//! of a frame is `y1`.  Hosts with y-down widget coordinates convert at the
//! boundary with [`flip_y`].
//!
//! Colors are drawn as [`peniko::Color`] and stored as [`SerializableColor`].

pub use kurbo::{Point, Rect, Size, Vec2};
pub use peniko::Color;

use peniko::color::{parse_color, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mirror `y` inside a viewport of the given height.
///
/// Converts between y-down widget coordinates and the y-up desktop space;
/// applying it twice returns the original point.
pub fn flip_y(point: Point, viewport_height: f64) -> Point {
    Point::new(point.x, viewport_height - point.y)
}

/// Edge-inclusive containment.  A frame without area contains nothing.
///
/// `kurbo::Rect::contains` is half-open, which would make the top and right
/// borders miss.
pub fn contains_point(frame: &Rect, point: Point) -> bool {
    frame.width() > 0.0
        && frame.height() > 0.0
        && point.x >= frame.x0
        && point.x <= frame.x1
        && point.y >= frame.y0
        && point.y <= frame.y1
}

/// Serializable color representation (RGBA8).
///
/// On the wire a color is either a CSS color string (`"#ff8800"`,
/// `"#ff880080"`, `"orange"`, `"rgb(255 136 0)"`) or an object
/// `{"r": 255, "g": 136, "b": 0, "a": 255}` where `a` defaults to opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    /// The blue new rectangles get unless configured otherwise.
    pub const SYSTEM_BLUE: SerializableColor = SerializableColor::new(0, 122, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any CSS color.
    pub fn parse(s: &str) -> Result<Self, String> {
        let color = parse_color(s.trim())
            .map_err(|e| format!("invalid color {:?}: {}", s, e))?
            .to_alpha_color::<Srgb>();
        Ok(color.into())
    }

    /// The color with its alpha replaced by `opacity` (clamped to `[0, 1]`).
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Css(String),
    Rgba8 {
        r: u8,
        g: u8,
        b: u8,
        #[serde(default = "opaque")]
        a: u8,
    },
}

fn opaque() -> u8 {
    255
}

impl TryFrom<ColorRepr> for SerializableColor {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, String> {
        match repr {
            ColorRepr::Css(s) => SerializableColor::parse(&s),
            ColorRepr::Rgba8 { r, g, b, a } => Ok(SerializableColor::new(r, g, b, a)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_normalises_every_drag_direction() {
        let expected = Rect::from_origin_size((10.0, 10.0), (40.0, 40.0));
        let a = Point::new(10.0, 10.0);
        let b = Point::new(50.0, 50.0);
        assert_eq!(Rect::from_points(a, b), expected);
        assert_eq!(Rect::from_points(b, a), expected);
        assert_eq!(Rect::from_points((10.0, 50.0), (50.0, 10.0)), expected);
        assert_eq!(Rect::from_points((50.0, 10.0), (10.0, 50.0)), expected);
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let f = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(contains_point(&f, Point::new(50.0, 25.0)));
        assert!(contains_point(&f, Point::new(0.0, 0.0)));
        assert!(contains_point(&f, Point::new(100.0, 50.0)));
        assert!(contains_point(&f, Point::new(100.0, 0.0)));
        assert!(!contains_point(&f, Point::new(100.1, 25.0)));
        assert!(!contains_point(&f, Point::new(50.0, -0.1)));
    }

    #[test]
    fn zero_area_frame_contains_nothing() {
        let dot = Rect::from_origin_size((5.0, 5.0), (0.0, 0.0));
        assert!(!contains_point(&dot, Point::new(5.0, 5.0)));
        let line = Rect::new(0.0, 0.0, 10.0, 0.0);
        assert!(!contains_point(&line, Point::new(5.0, 0.0)));
    }

    #[test]
    fn flip_y_is_an_involution() {
        let p = Point::new(12.0, 30.0);
        assert_eq!(flip_y(p, 100.0), Point::new(12.0, 70.0));
        assert_eq!(flip_y(flip_y(p, 100.0), 100.0), p);
    }

    #[test]
    fn css_colors_parse() {
        assert_eq!(
            SerializableColor::parse("#ff8000"),
            Ok(SerializableColor::new(255, 128, 0, 255))
        );
        assert_eq!(
            SerializableColor::parse("#00000080"),
            Ok(SerializableColor::new(0, 0, 0, 128))
        );
        assert_eq!(
            SerializableColor::parse("white"),
            Ok(SerializableColor::new(255, 255, 255, 255))
        );
        assert!(SerializableColor::parse("#gggggg").is_err());
        assert!(SerializableColor::parse("#+f+f+f").is_err());
    }

    #[test]
    fn deserialize_color_from_string_or_object() {
        let c: SerializableColor = serde_json::from_str(r##""#000000""##).unwrap();
        assert_eq!(c, SerializableColor::new(0, 0, 0, 255));

        let c: SerializableColor = serde_json::from_str(r#"{"r": 128, "g": 64, "b": 255}"#).unwrap();
        assert_eq!(c, SerializableColor::new(128, 64, 255, 255));

        assert!(serde_json::from_str::<SerializableColor>(r#"{"r": 128}"#).is_err());
        assert!(serde_json::from_str::<SerializableColor>(r#"{"r": 300, "g": 0, "b": 0}"#).is_err());
        assert!(serde_json::from_str::<SerializableColor>(r#""not a color""#).is_err());
    }

    #[test]
    fn serialized_color_reads_back() {
        let c = SerializableColor::new(1, 2, 3, 4);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(serde_json::from_str::<SerializableColor>(&json).unwrap(), c);
    }

    #[test]
    fn with_opacity_replaces_alpha() {
        let c = SerializableColor::SYSTEM_BLUE.with_opacity(0.6);
        assert_eq!(c.a, 153);
        assert_eq!(c.b, 255);
        assert_eq!(SerializableColor::SYSTEM_BLUE.with_opacity(2.0).a, 255);
    }

    #[test]
    fn peniko_conversion_keeps_channels() {
        let c = SerializableColor::new(10, 20, 30, 40);
        let color: Color = c.into();
        assert_eq!(SerializableColor::from(color), c);
    }
}
