//! **deskzones**: colored, labeled rectangles drawn on an overlay that sits
//! above the wallpaper and below every window.
//!
//! The overlay has two modes.  In *lock mode* it is click-through and only
//! shows the rectangles.  In *edit mode* the pointer draws new rectangles,
//! moves and resizes existing ones, double-click edits a label and color,
//! and right click or Delete removes one.
//!
//! # Architecture
//!
//! * [`surface::Surface`] owns the rectangles and the gesture state
//!   machine.  It is toolkit-agnostic and works in a y-up coordinate space
//!   (see [`geometry`]).
//! * [`render`] turns a surface into draw commands and replays them on a
//!   [`traits::Painter`].
//! * [`traits::CommandSource`] abstracts the transport for outside
//!   control; [`ipc`] implements it over a Unix socket.
//! * [`overlay`] hosts everything in a GTK4 layer-shell window when the
//!   `overlay-gtk` feature is enabled.

pub mod command;
pub mod config;
pub mod geometry;
pub mod handle;
pub mod input;
pub mod ipc;
pub mod overlay;
pub mod rectangle;
pub mod render;
pub mod surface;
pub mod traits;
