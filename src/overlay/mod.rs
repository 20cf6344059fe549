//! Overlay hosts for the rectangle surface.
//!
//! When the `overlay-gtk` feature is enabled, [`gtk::run_main_loop`] takes
//! over the main thread, shows a full-screen layer-shell window below
//! regular windows and drives the [`Surface`](crate::surface::Surface)
//! from pointer, keyboard and socket input.

#[cfg(feature = "overlay-gtk")]
pub mod gtk;
#[cfg(feature = "overlay-gtk")]
pub mod painter;

use crate::handle::ResizeCursor;
use crate::surface::CursorKind;

/// CSS cursor name for a [`CursorKind`].
pub fn cursor_name(kind: CursorKind) -> &'static str {
    match kind {
        CursorKind::Default => "default",
        CursorKind::Crosshair => "crosshair",
        CursorKind::Grab => "grab",
        CursorKind::Resize(ResizeCursor::DiagonalNwSe) => "nwse-resize",
        CursorKind::Resize(ResizeCursor::DiagonalNeSw) => "nesw-resize",
        CursorKind::Resize(ResizeCursor::Vertical) => "ns-resize",
        CursorKind::Resize(ResizeCursor::Horizontal) => "ew-resize",
    }
}

/// Part of the overlay that receives pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRegion {
    /// Click-through: every event reaches the desktop below.
    Empty,
    /// The whole allocated overlay.
    Full { width: i32, height: i32 },
}

impl InputRegion {
    /// The region for a mode at the given widget size.
    ///
    /// `None` while an edit-mode overlay has no allocation yet; the caller
    /// retries once the size is known.
    pub fn for_mode(edit: bool, width: i32, height: i32) -> Option<Self> {
        if !edit {
            return Some(InputRegion::Empty);
        }
        (width > 0 && height > 0).then_some(InputRegion::Full { width, height })
    }
}
