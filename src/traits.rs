//! Core traits that decouple deskzones from any specific drawing toolkit or
//! transport mechanism.
//!
//! The [`Surface`](crate::surface::Surface) and
//! [`render`](crate::render) module only depend on these abstractions;
//! concrete implementations live in [`overlay`](crate::overlay) (cairo) and
//! [`ipc`](crate::ipc) (Unix socket).

use crate::command::Command;
use crate::geometry::{Color, Point, Rect, Size};
use std::sync::mpsc;

//  Painter

/// Font weight for overlay text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Semibold,
    Bold,
}

/// Font request for [`Painter::measure_text`] and [`Painter::draw_text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f64,
    pub weight: FontWeight,
}

/// A drawing backend.
///
/// All coordinates are in the y-up desktop space; implementations on y-down
/// toolkits flip internally.
pub trait Painter {
    /// The error type produced by this backend.
    type Error: std::error::Error + Send + 'static;

    /// Size of the drawable area.
    fn viewport(&self) -> Size;

    fn fill_rect(&mut self, frame: &Rect, color: Color) -> Result<(), Self::Error>;

    /// Stroke the outline of `frame` with a line of `width` centred on it.
    fn stroke_rect(&mut self, frame: &Rect, color: Color, width: f64) -> Result<(), Self::Error>;

    fn fill_rounded_rect(
        &mut self,
        frame: &Rect,
        radius: f64,
        color: Color,
    ) -> Result<(), Self::Error>;

    /// Filled circle with an outline.
    fn circle(
        &mut self,
        center: Point,
        radius: f64,
        fill: Color,
        stroke: Color,
        stroke_width: f64,
    ) -> Result<(), Self::Error>;

    /// Logical size of `text` set in `font`.
    fn measure_text(&mut self, text: &str, font: Font) -> Result<Size, Self::Error>;

    /// Draw `text` so its measured box has its bottom-left corner at `origin`.
    fn draw_text(
        &mut self,
        text: &str,
        font: Font,
        origin: Point,
        color: Color,
    ) -> Result<(), Self::Error>;
}

//  Command Source

/// A source of [`Command`]s.
///
/// Implementations listen on some transport (a Unix socket, an in-memory
/// channel, …) and forward parsed commands into the provided
/// [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Command`] into `sink`.
    ///
    /// This method blocks the calling thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error>;
}
