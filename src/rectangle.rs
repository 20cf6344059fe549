//! The overlay rectangle entity.
//!
//! A [`Rectangle`] is a colored, optionally labeled zone drawn over the
//! wallpaper.  It owns its geometry and style; the
//! [`Surface`](crate::surface::Surface) owns every rectangle.

use crate::geometry::{contains_point, Point, Rect, SerializableColor, Size};
use crate::handle::{ResizeHandle, HANDLE_HIT_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Padding around label text inside its pill.
pub const LABEL_PADDING: f64 = 6.0;

/// Corner radius of the label pill.
pub const LABEL_CORNER_RADIUS: f64 = 5.0;

/// Opaque, unique rectangle identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RectangleId(Uuid);

impl RectangleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RectangleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RectangleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Visual attributes shared by a rectangle and the defaults for new ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Border and fill color.
    pub color: SerializableColor,
    /// Border width in pixels.
    pub border_width: f64,
    /// Fill opacity in `[0.0, 1.0]`; replaces the color's alpha for the fill.
    pub fill_opacity: f64,
    /// Label font size in points.
    pub font_size: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: SerializableColor::SYSTEM_BLUE,
            border_width: 2.0,
            fill_opacity: 0.25,
            font_size: 14.0,
        }
    }
}

/// A user-drawn zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    id: RectangleId,
    /// Bounds in desktop coordinates; `y1` is the top edge.
    pub frame: Rect,
    pub style: Style,
    /// Label text; empty means no label pill is drawn.
    pub label: String,
}

impl Rectangle {
    /// Create an unlabeled rectangle with a fresh id.
    pub fn new(frame: Rect, style: Style) -> Self {
        Self {
            id: RectangleId::new(),
            frame,
            style,
            label: String::new(),
        }
    }

    pub fn id(&self) -> RectangleId {
        self.id
    }

    pub fn contains(&self, point: Point) -> bool {
        contains_point(&self.frame, point)
    }

    /// First handle (in [`ResizeHandle::ALL`] order) whose hit square
    /// contains `point`.
    ///
    /// Rectangles without area have no handles.
    pub fn hit_test_resize_handle(&self, point: Point) -> Option<ResizeHandle> {
        if self.frame.area() == 0.0 {
            return None;
        }
        ResizeHandle::ALL
            .into_iter()
            .find(|h| contains_point(&h.square(&self.frame, HANDLE_HIT_SIZE), point))
    }

    /// Where the label pill goes for text measuring `text_size`.
    pub fn label_pill(&self, text_size: Size) -> Rect {
        label_pill(&self.frame, text_size)
    }
}

/// Label pill for a rectangle with `frame` and text measuring `text_size`.
///
/// The pill is inset from the left edge and straddles the top border.
pub fn label_pill(frame: &Rect, text_size: Size) -> Rect {
    let width = text_size.width + LABEL_PADDING * 2.0;
    let height = text_size.height + LABEL_PADDING * 2.0;
    Rect::from_origin_size(
        (frame.x0 + LABEL_PADDING, frame.y1 - height / 2.0),
        (width, height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
        Rectangle::new(Rect::from_origin_size((x, y), (w, h)), Style::default())
    }

    #[test]
    fn ids_are_unique() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(0.0, 0.0, 10.0, 10.0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn hit_test_finds_corner_and_edge_handles() {
        let r = rect(100.0, 100.0, 200.0, 100.0);
        assert_eq!(
            r.hit_test_resize_handle(Point::new(102.0, 198.0)),
            Some(ResizeHandle::TopLeft)
        );
        assert_eq!(
            r.hit_test_resize_handle(Point::new(200.0, 104.0)),
            Some(ResizeHandle::Bottom)
        );
        assert_eq!(
            r.hit_test_resize_handle(Point::new(296.0, 150.0)),
            Some(ResizeHandle::Right)
        );
        assert_eq!(r.hit_test_resize_handle(Point::new(200.0, 150.0)), None);
        assert_eq!(r.hit_test_resize_handle(Point::new(94.0, 150.0)), None);
    }

    #[test]
    fn overlapping_handles_resolve_in_declared_order() {
        // Width 8: the top-left, top and top-right squares all overlap at
        // the top midpoint.  Top-left is declared first.
        let r = rect(0.0, 0.0, 8.0, 40.0);
        assert_eq!(
            r.hit_test_resize_handle(Point::new(4.0, 40.0)),
            Some(ResizeHandle::TopLeft)
        );
        // Height 8 on the right side: top-right precedes right and
        // bottom-right.
        let r = rect(0.0, 0.0, 40.0, 8.0);
        assert_eq!(
            r.hit_test_resize_handle(Point::new(40.0, 4.0)),
            Some(ResizeHandle::TopRight)
        );
    }

    #[test]
    fn degenerate_rectangle_has_no_handles() {
        let r = rect(50.0, 50.0, 0.0, 0.0);
        assert_eq!(r.hit_test_resize_handle(Point::new(50.0, 50.0)), None);
        assert!(!r.contains(Point::new(50.0, 50.0)));
    }

    #[test]
    fn label_pill_straddles_top_border() {
        let r = rect(100.0, 100.0, 200.0, 100.0);
        let pill = r.label_pill(Size::new(40.0, 12.0));
        assert_eq!(pill, Rect::new(106.0, 188.0, 158.0, 212.0));
        assert_eq!(pill.center().y, r.frame.y1);
    }

    #[test]
    fn style_defaults_from_partial_json() {
        let s: Style = serde_json::from_str(r#"{"border_width": 4.0}"#).unwrap();
        assert_eq!(s.border_width, 4.0);
        assert_eq!(s.fill_opacity, Style::default().fill_opacity);
        assert_eq!(s.color, SerializableColor::SYSTEM_BLUE);
    }
}
