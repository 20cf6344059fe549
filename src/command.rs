//! Commands shared by every control path.
//!
//! [`Command`] covers the outer control surface of the overlay (mode
//! toggle, style broadcast, clear-all) and the results of the host's
//! dialogs (label/color edit, delete confirmation).  Commands arrive from a
//! [`CommandSource`](crate::traits::CommandSource) such as the Unix socket,
//! or are produced by the overlay host itself, and are applied with
//! [`Surface::apply`](crate::surface::Surface::apply).
//!
//! # Wire format
//!
//! Unit variants are bare JSON strings, the rest are externally tagged:
//!
//! ```json
//! "ToggleEditMode"
//! {"SetEditMode":true}
//! {"ApplyOpacity":0.4}
//! {"ApplyColor":"#ff8800"}
//! {"ApplyColor":{"r":255,"g":128,"b":0}}
//! "ClearAll"
//! ```

use crate::geometry::SerializableColor;
use crate::rectangle::RectangleId;
use serde::{Deserialize, Serialize};

/// Every action that can be applied to the overlay from outside the
/// pointer/keyboard path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Enter (`true`) or leave (`false`) edit mode.
    SetEditMode(bool),

    /// Flip between edit mode and lock mode.
    ToggleEditMode,

    /// Show or hide the translucent fill of every rectangle.
    SetShowFill(bool),

    /// Flip fill visibility.
    ToggleFill,

    /// Set the fill opacity of every rectangle and of new ones.
    /// Values are clamped to `[0.0, 1.0]`.
    ApplyOpacity(f64),

    /// Set the border width of every rectangle and of new ones.
    /// Non-positive values are ignored.
    ApplyBorderWidth(f64),

    /// Recolor every rectangle and make the color the default for new ones.
    ApplyColor(SerializableColor),

    /// Ask for confirmation, then remove every rectangle.
    ///
    /// The surface answers with
    /// [`Effect::ConfirmClearAll`](crate::surface::Effect::ConfirmClearAll);
    /// the host sends [`ClearAllConfirmed`](Command::ClearAllConfirmed) once
    /// the user agrees.
    ClearAll,

    /// Remove every rectangle without asking.
    ClearAllConfirmed,

    /// Result of the edit dialog for one rectangle.
    EditRectangle {
        id: RectangleId,
        label: String,
        color: SerializableColor,
    },

    /// Result of the context menu's delete action.
    DeleteRectangle(RectangleId),

    /// Shut the overlay down.  Handled by the host loop.
    Quit,
}
