//! Scene construction and painting.
//!
//! [`render`] turns a [`Surface`] into a flat list of [`DrawCommand`]s
//! without touching any toolkit.  [`paint`] replays that list on a
//! [`Painter`], resolving the parts of the layout that depend on text
//! metrics (label pills, the mode banner).

use crate::geometry::{Color, Point, Rect, SerializableColor};
use crate::handle::{ResizeHandle, HANDLE_DRAW_SIZE};
use crate::rectangle::{label_pill, Rectangle, LABEL_CORNER_RADIUS, LABEL_PADDING};
use crate::surface::Surface;
use crate::traits::{Font, FontWeight, Painter};

/// Outline width of a resize handle.
pub const HANDLE_STROKE_WIDTH: f64 = 1.5;

pub const BANNER_TEXT: &str = "EDIT MODE";
pub const BANNER_FONT_SIZE: f64 = 12.0;
/// Padding inside the banner.
pub const BANNER_PADDING: f64 = 10.0;
/// Gap between the banner and the viewport corner.
pub const BANNER_MARGIN: f64 = 10.0;
pub const BANNER_CORNER_RADIUS: f64 = 6.0;
/// Black at 70 % opacity.
pub const BANNER_BACKGROUND: SerializableColor = SerializableColor::new(0, 0, 0, 179);

/// One drawing primitive, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        frame: Rect,
        color: SerializableColor,
    },
    StrokeRect {
        frame: Rect,
        color: SerializableColor,
        width: f64,
    },
    /// Label pill on the top border of the rectangle with `frame`.
    Label {
        frame: Rect,
        text: String,
        font_size: f64,
        color: SerializableColor,
    },
    Handle {
        center: Point,
        diameter: f64,
        stroke: SerializableColor,
    },
    /// Mode banner in the top-right corner of the viewport.
    ModeBanner,
}

/// Build the scene for `surface`.
///
/// Rectangles are drawn oldest first, the selection's handles right after
/// it (edit mode only), then the rectangle being drawn, then the banner.
pub fn render(surface: &Surface) -> Vec<DrawCommand> {
    let mut out = Vec::new();
    let edit = surface.is_edit_mode();

    for r in surface.rectangles() {
        draw_rectangle(&mut out, r, surface.show_fill());
        if edit && surface.selected() == Some(r.id()) {
            draw_resize_handles(&mut out, r);
        }
    }

    if let Some(transient) = surface.transient() {
        draw_rectangle(&mut out, transient, surface.show_fill());
    }

    if edit {
        out.push(DrawCommand::ModeBanner);
    }
    out
}

/// Border always; fill only when enabled and visible; label when non-empty.
pub fn draw_rectangle(out: &mut Vec<DrawCommand>, r: &Rectangle, show_fill: bool) {
    if show_fill && r.style.fill_opacity > 0.0 {
        out.push(DrawCommand::FillRect {
            frame: r.frame,
            color: r.style.color.with_opacity(r.style.fill_opacity),
        });
    }
    out.push(DrawCommand::StrokeRect {
        frame: r.frame,
        color: r.style.color,
        width: r.style.border_width,
    });
    if !r.label.is_empty() {
        out.push(DrawCommand::Label {
            frame: r.frame,
            text: r.label.clone(),
            font_size: r.style.font_size,
            color: r.style.color,
        });
    }
}

/// All eight handles of `r`, whatever the current mode.
pub fn draw_resize_handles(out: &mut Vec<DrawCommand>, r: &Rectangle) {
    for handle in ResizeHandle::ALL {
        out.push(DrawCommand::Handle {
            center: handle.anchor(&r.frame),
            diameter: HANDLE_DRAW_SIZE,
            stroke: r.style.color,
        });
    }
}

/// Replay `commands` on `painter`.
pub fn paint<P: Painter>(commands: &[DrawCommand], painter: &mut P) -> Result<(), P::Error> {
    for cmd in commands {
        match cmd {
            DrawCommand::FillRect { frame, color } => painter.fill_rect(frame, (*color).into())?,
            DrawCommand::StrokeRect {
                frame,
                color,
                width,
            } => painter.stroke_rect(frame, (*color).into(), *width)?,
            DrawCommand::Label {
                frame,
                text,
                font_size,
                color,
            } => {
                let font = Font {
                    size: *font_size,
                    weight: FontWeight::Semibold,
                };
                let size = painter.measure_text(text, font)?;
                let pill = label_pill(frame, size);
                painter.fill_rounded_rect(&pill, LABEL_CORNER_RADIUS, (*color).into())?;
                let origin = Point::new(pill.x0 + LABEL_PADDING, pill.y0 + LABEL_PADDING);
                painter.draw_text(text, font, origin, Color::WHITE)?;
            }
            DrawCommand::Handle {
                center,
                diameter,
                stroke,
            } => painter.circle(
                *center,
                diameter / 2.0,
                Color::WHITE,
                (*stroke).into(),
                HANDLE_STROKE_WIDTH,
            )?,
            DrawCommand::ModeBanner => paint_banner(painter)?,
        }
    }
    Ok(())
}

fn paint_banner<P: Painter>(painter: &mut P) -> Result<(), P::Error> {
    let font = Font {
        size: BANNER_FONT_SIZE,
        weight: FontWeight::Bold,
    };
    let text = painter.measure_text(BANNER_TEXT, font)?;
    let viewport = painter.viewport();
    let width = text.width + BANNER_PADDING * 2.0;
    let height = text.height + BANNER_PADDING * 2.0;
    let background = Rect::from_origin_size(
        (
            viewport.width - width - BANNER_MARGIN,
            viewport.height - height - BANNER_MARGIN,
        ),
        (width, height),
    );
    painter.fill_rounded_rect(
        &background,
        BANNER_CORNER_RADIUS,
        BANNER_BACKGROUND.into(),
    )?;
    let origin = Point::new(
        background.x0 + BANNER_PADDING,
        background.y0 + BANNER_PADDING,
    );
    painter.draw_text(BANNER_TEXT, font, origin, Color::WHITE)
}
