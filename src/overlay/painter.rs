//! Cairo [`Painter`] for the GTK overlay.
//!
//! Cairo draws y-down; every coordinate is flipped at the call site so text
//! stays upright.

use crate::geometry::{flip_y, Color, Point, Rect, Size};
use crate::traits::{Font, FontWeight, Painter};
use gtk4::cairo;
use std::f64::consts::PI;

const FONT_FACE: &str = "Sans";

pub struct CairoPainter<'a> {
    cr: &'a cairo::Context,
    viewport: Size,
}

impl<'a> CairoPainter<'a> {
    pub fn new(cr: &'a cairo::Context, width: i32, height: i32) -> Self {
        Self {
            cr,
            viewport: Size::new(width as f64, height as f64),
        }
    }

    /// Top edge of `frame` in cairo's y-down space.
    fn top(&self, frame: &Rect) -> f64 {
        self.viewport.height - frame.y1
    }

    fn set_color(&self, color: Color) {
        let [r, g, b, a] = color.components;
        self.cr
            .set_source_rgba(f64::from(r), f64::from(g), f64::from(b), f64::from(a));
    }

    fn set_font(&self, font: Font) {
        // The toy font API only knows normal and bold.
        let weight = match font.weight {
            FontWeight::Regular => cairo::FontWeight::Normal,
            FontWeight::Semibold | FontWeight::Bold => cairo::FontWeight::Bold,
        };
        self.cr
            .select_font_face(FONT_FACE, cairo::FontSlant::Normal, weight);
        self.cr.set_font_size(font.size);
    }
}

impl Painter for CairoPainter<'_> {
    type Error = cairo::Error;

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn fill_rect(&mut self, frame: &Rect, color: Color) -> Result<(), cairo::Error> {
        self.set_color(color);
        self.cr
            .rectangle(frame.x0, self.top(frame), frame.width(), frame.height());
        self.cr.fill()
    }

    fn stroke_rect(&mut self, frame: &Rect, color: Color, width: f64) -> Result<(), cairo::Error> {
        self.set_color(color);
        self.cr.set_line_width(width);
        self.cr
            .rectangle(frame.x0, self.top(frame), frame.width(), frame.height());
        self.cr.stroke()
    }

    fn fill_rounded_rect(
        &mut self,
        frame: &Rect,
        radius: f64,
        color: Color,
    ) -> Result<(), cairo::Error> {
        let x = frame.x0;
        let y = self.top(frame);
        let w = frame.width();
        let h = frame.height();
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);

        self.cr.new_sub_path();
        self.cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
        self.cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
        self.cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
        self.cr.arc(x + r, y + r, r, PI, 1.5 * PI);
        self.cr.close_path();
        self.set_color(color);
        self.cr.fill()
    }

    fn circle(
        &mut self,
        center: Point,
        radius: f64,
        fill: Color,
        stroke: Color,
        stroke_width: f64,
    ) -> Result<(), cairo::Error> {
        let c = flip_y(center, self.viewport.height);
        self.cr.new_sub_path();
        self.cr.arc(c.x, c.y, radius, 0.0, 2.0 * PI);
        self.set_color(fill);
        self.cr.fill_preserve()?;
        self.set_color(stroke);
        self.cr.set_line_width(stroke_width);
        self.cr.stroke()
    }

    fn measure_text(&mut self, text: &str, font: Font) -> Result<Size, cairo::Error> {
        self.set_font(font);
        let extents = self.cr.text_extents(text)?;
        Ok(Size::new(extents.width(), extents.height()))
    }

    fn draw_text(
        &mut self,
        text: &str,
        font: Font,
        origin: Point,
        color: Color,
    ) -> Result<(), cairo::Error> {
        self.set_font(font);
        let extents = self.cr.text_extents(text)?;
        // Bottom of the ink box in y-down space, then back to the baseline.
        let bottom = self.viewport.height - origin.y;
        let baseline = bottom - extents.height() - extents.y_bearing();
        self.cr.move_to(origin.x - extents.x_bearing(), baseline);
        self.set_color(color);
        self.cr.show_text(text)?;
        Ok(())
    }
}
