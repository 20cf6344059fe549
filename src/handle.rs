//! The eight resize handles around a rectangle.
//!
//! Handles are derived, never stored: each position is a pure function of
//! the owning rectangle's frame.  During a resize drag the new frame is
//! always recomputed from the frame captured when the drag started, so
//! incremental pointer deltas never accumulate rounding error.

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest width or height a resize may produce.
pub const MIN_RESIZE_SIZE: f64 = 20.0;

/// Side of the square used to hit-test a handle.
pub const HANDLE_HIT_SIZE: f64 = 10.0;

/// Diameter of the circle drawn for a handle.
pub const HANDLE_DRAW_SIZE: f64 = 8.0;

/// One of the eight compass positions around a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

/// Cursor category shown while hovering or dragging a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeCursor {
    /// Top-left / bottom-right.
    DiagonalNwSe,
    /// Top-right / bottom-left.
    DiagonalNeSw,
    Vertical,
    Horizontal,
}

impl ResizeHandle {
    /// Every handle in hit-test order.
    ///
    /// The first handle whose square contains the pointer wins, so this
    /// order is also the tie-break priority where squares overlap.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Right,
        ResizeHandle::BottomRight,
        ResizeHandle::Bottom,
        ResizeHandle::BottomLeft,
        ResizeHandle::Left,
    ];

    /// Geometric anchor of this handle on `frame`.
    pub fn anchor(self, frame: &Rect) -> Point {
        let mid = frame.center();
        let (x, y) = match self {
            ResizeHandle::TopLeft => (frame.x0, frame.y1),
            ResizeHandle::Top => (mid.x, frame.y1),
            ResizeHandle::TopRight => (frame.x1, frame.y1),
            ResizeHandle::Right => (frame.x1, mid.y),
            ResizeHandle::BottomRight => (frame.x1, frame.y0),
            ResizeHandle::Bottom => (mid.x, frame.y0),
            ResizeHandle::BottomLeft => (frame.x0, frame.y0),
            ResizeHandle::Left => (frame.x0, mid.y),
        };
        Point::new(x, y)
    }

    /// Square of side `side` centred on this handle's anchor.
    pub fn square(self, frame: &Rect, side: f64) -> Rect {
        Rect::from_center_size(self.anchor(frame), (side, side))
    }

    /// Apply a drag delta to the frame captured at drag start.
    ///
    /// Each handle moves the edges it sits on.  Returns `None` when the
    /// candidate width or height would drop below [`MIN_RESIZE_SIZE`]; the
    /// caller must then leave the live frame untouched rather than clamp it.
    pub fn resize(self, start: &Rect, dx: f64, dy: f64) -> Option<Rect> {
        let mut f = *start;
        match self {
            ResizeHandle::TopLeft => {
                f.x0 += dx;
                f.y1 += dy;
            }
            ResizeHandle::Top => f.y1 += dy,
            ResizeHandle::TopRight => {
                f.x1 += dx;
                f.y1 += dy;
            }
            ResizeHandle::Right => f.x1 += dx,
            ResizeHandle::BottomRight => {
                f.x1 += dx;
                f.y0 += dy;
            }
            ResizeHandle::Bottom => f.y0 += dy,
            ResizeHandle::BottomLeft => {
                f.x0 += dx;
                f.y0 += dy;
            }
            ResizeHandle::Left => f.x0 += dx,
        }

        // Negated comparison so NaN sizes are rejected too.
        if !(f.width() >= MIN_RESIZE_SIZE && f.height() >= MIN_RESIZE_SIZE) {
            return None;
        }
        Some(f)
    }

    pub fn cursor(self) -> ResizeCursor {
        match self {
            ResizeHandle::TopLeft | ResizeHandle::BottomRight => ResizeCursor::DiagonalNwSe,
            ResizeHandle::TopRight | ResizeHandle::BottomLeft => ResizeCursor::DiagonalNeSw,
            ResizeHandle::Top | ResizeHandle::Bottom => ResizeCursor::Vertical,
            ResizeHandle::Left | ResizeHandle::Right => ResizeCursor::Horizontal,
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResizeHandle::TopLeft => "top-left",
            ResizeHandle::Top => "top",
            ResizeHandle::TopRight => "top-right",
            ResizeHandle::Right => "right",
            ResizeHandle::BottomRight => "bottom-right",
            ResizeHandle::Bottom => "bottom",
            ResizeHandle::BottomLeft => "bottom-left",
            ResizeHandle::Left => "left",
        };
        f.write_str(name)
    }
}
