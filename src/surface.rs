//! The interaction surface: owner of every rectangle and the pointer-driven
//! state machine that creates, selects, moves, resizes and deletes them.
//!
//! [`Surface`] is toolkit-agnostic.  Hosts feed it [`InputEvent`]s through
//! [`handle_input`](Surface::handle_input) and [`Command`]s through
//! [`apply`](Surface::apply); both mutate the surface in place and may
//! return an [`Effect`] asking the host for a dialog.  Dialog results come
//! back as further commands.  Rendering reads the surface through
//! [`render`](crate::render::render).
//!
//! # Gesture states
//!
//! ```text
//!            down on empty space           up (size > 10×10: commit)
//!   Idle ───────────────────────▶ Creating ─────────────────────────▶ Idle
//!    │ down on selection handle            up
//!    ├───────────────────────────▶ Resizing ──────────────────────▶ Idle
//!    │ down inside a rectangle             up
//!    └───────────────────────────▶ Moving ────────────────────────▶ Idle
//! ```
//!
//! Double-click, context click and Delete/Backspace return to `Idle` from
//! any state.  Nothing happens while edit mode is off.

use crate::command::Command;
use crate::geometry::{Point, Rect, SerializableColor, Vec2};
use crate::handle::{ResizeCursor, ResizeHandle};
use crate::input::{Button, InputEvent, Key};
use crate::rectangle::{Rectangle, RectangleId, Style};
use log::{debug, info, warn};

/// A drawn box is kept only if both sides exceed this.
pub const MIN_CREATE_SIZE: f64 = 10.0;

/// The gesture currently in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    /// Drawing a new rectangle from `anchor` to the pointer.
    Creating { anchor: Point, transient: Rectangle },
    /// Dragging rectangle `id`; `offset` is pointer minus origin at press.
    Moving { id: RectangleId, offset: Vec2 },
    /// Dragging `handle` of rectangle `id`.
    Resizing {
        id: RectangleId,
        handle: ResizeHandle,
        start_frame: Rect,
        start_point: Point,
    },
}

/// Something the host must do on the surface's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Show the label/color editor for a rectangle.  Answer with
    /// [`Command::EditRectangle`] or nothing (cancel).
    OpenEditDialog {
        id: RectangleId,
        label: String,
        color: SerializableColor,
    },
    /// Offer a single "delete" action at `at`.  Answer with
    /// [`Command::DeleteRectangle`] or nothing.
    OpenContextMenu { id: RectangleId, at: Point },
    /// Ask before clearing.  Answer with [`Command::ClearAllConfirmed`] or
    /// nothing.
    ConfirmClearAll,
}

/// Pointer feedback for the current hover position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    /// Lock mode: the overlay does not take input.
    Default,
    /// Empty space: a press starts a new rectangle.
    Crosshair,
    /// Over a rectangle: a press starts a move.
    Grab,
    /// Over a handle of the selected rectangle.
    Resize(ResizeCursor),
}

/// Owns the rectangles, the selection and the gesture state.
#[derive(Debug, Clone)]
pub struct Surface {
    rectangles: Vec<Rectangle>,
    selected: Option<RectangleId>,
    gesture: Gesture,
    edit_mode: bool,
    show_fill: bool,
    defaults: Style,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(Style::default(), true)
    }
}

impl Surface {
    /// Empty surface in lock mode.  New rectangles get `defaults`.
    pub fn new(defaults: Style, show_fill: bool) -> Self {
        Self {
            rectangles: Vec::new(),
            selected: None,
            gesture: Gesture::Idle,
            edit_mode: false,
            show_fill,
            defaults,
        }
    }

    //  Accessors

    /// Every committed rectangle, oldest first (drawing order).
    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn rectangle(&self, id: RectangleId) -> Option<&Rectangle> {
        self.rectangles.iter().find(|r| r.id() == id)
    }

    pub fn selected(&self) -> Option<RectangleId> {
        self.selected
    }

    pub fn selected_rectangle(&self) -> Option<&Rectangle> {
        self.selected.and_then(|id| self.rectangle(id))
    }

    /// The rectangle being drawn, if a create gesture is in flight.
    pub fn transient(&self) -> Option<&Rectangle> {
        match &self.gesture {
            Gesture::Creating { transient, .. } => Some(transient),
            _ => None,
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn show_fill(&self) -> bool {
        self.show_fill
    }

    pub fn defaults(&self) -> &Style {
        &self.defaults
    }

    /// Topmost rectangle under `point`; later rectangles win ties.
    pub fn rectangle_at(&self, point: Point) -> Option<&Rectangle> {
        self.rectangles.iter().rev().find(|r| r.contains(point))
    }

    fn rectangle_mut(&mut self, id: RectangleId) -> Option<&mut Rectangle> {
        self.rectangles.iter_mut().find(|r| r.id() == id)
    }

    //  Input

    /// Advance the state machine by one input event.
    ///
    /// Ignored entirely while edit mode is off.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<Effect> {
        if !self.edit_mode {
            return None;
        }
        match event {
            InputEvent::PointerDown {
                point,
                button: Button::Primary,
                click_count,
            } => self.primary_down(point, click_count),
            InputEvent::PointerDown {
                point,
                button: Button::Secondary,
                ..
            } => self.secondary_down(point),
            InputEvent::PointerDrag { point } => {
                self.drag_to(point);
                None
            }
            InputEvent::PointerUp => {
                self.release();
                None
            }
            InputEvent::Key(Key::Delete | Key::Backspace) => {
                if let Some(id) = self.selected {
                    self.gesture = Gesture::Idle;
                    self.delete_rectangle(id);
                }
                None
            }
            InputEvent::Key(Key::Other) => None,
        }
    }

    fn primary_down(&mut self, point: Point, click_count: u32) -> Option<Effect> {
        if click_count == 2 {
            if let Some(r) = self.rectangle_at(point) {
                let effect = Effect::OpenEditDialog {
                    id: r.id(),
                    label: r.label.clone(),
                    color: r.style.color,
                };
                debug!("double-click on {}, opening editor", r.id());
                self.gesture = Gesture::Idle;
                return Some(effect);
            }
        }

        if let Some(selected) = self.selected_rectangle() {
            if let Some(handle) = selected.hit_test_resize_handle(point) {
                debug!("resize {} from {} handle", selected.id(), handle);
                self.gesture = Gesture::Resizing {
                    id: selected.id(),
                    handle,
                    start_frame: selected.frame,
                    start_point: point,
                };
                return None;
            }
        }

        if let Some(r) = self.rectangle_at(point) {
            let id = r.id();
            let offset = point - r.frame.origin();
            debug!("move {}", id);
            self.selected = Some(id);
            self.gesture = Gesture::Moving { id, offset };
            return None;
        }

        debug!("create at ({:.1}, {:.1})", point.x, point.y);
        self.selected = None;
        self.gesture = Gesture::Creating {
            anchor: point,
            transient: Rectangle::new(Rect::from_points(point, point), self.defaults.clone()),
        };
        None
    }

    fn secondary_down(&mut self, point: Point) -> Option<Effect> {
        let id = self.rectangle_at(point)?.id();
        self.gesture = Gesture::Idle;
        Some(Effect::OpenContextMenu { id, at: point })
    }

    fn drag_to(&mut self, point: Point) {
        if let Gesture::Creating { anchor, transient } = &mut self.gesture {
            transient.frame = Rect::from_points(*anchor, point);
            return;
        }

        match self.gesture {
            Gesture::Moving { id, offset } => {
                let origin = point - offset;
                if let Some(r) = self.rectangle_mut(id) {
                    r.frame = r.frame.with_origin(origin);
                }
            }
            Gesture::Resizing {
                id,
                handle,
                start_frame,
                start_point,
            } => {
                let dx = point.x - start_point.x;
                let dy = point.y - start_point.y;
                match handle.resize(&start_frame, dx, dy) {
                    Some(frame) => {
                        if let Some(r) = self.rectangle_mut(id) {
                            r.frame = frame;
                        }
                    }
                    None => debug!("resize of {} below minimum size, ignored", id),
                }
            }
            Gesture::Idle | Gesture::Creating { .. } => {}
        }
    }

    fn release(&mut self) {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Creating { transient, .. } => {
                let f = transient.frame;
                if f.width() > MIN_CREATE_SIZE && f.height() > MIN_CREATE_SIZE {
                    info!(
                        "created {} at ({:.0}, {:.0}) size {:.0}x{:.0}",
                        transient.id(),
                        f.min_x(),
                        f.min_y(),
                        f.width(),
                        f.height()
                    );
                    self.selected = Some(transient.id());
                    self.rectangles.push(transient);
                } else {
                    debug!("discarded {:.0}x{:.0} rectangle", f.width(), f.height());
                }
            }
            Gesture::Moving { id, .. } | Gesture::Resizing { id, .. } => {
                debug!("finished dragging {}", id);
            }
            Gesture::Idle => {}
        }
    }

    /// Pointer feedback for `point`.
    pub fn cursor_at(&self, point: Point) -> CursorKind {
        if !self.edit_mode {
            return CursorKind::Default;
        }
        if let Some(handle) = self
            .selected_rectangle()
            .and_then(|r| r.hit_test_resize_handle(point))
        {
            return CursorKind::Resize(handle.cursor());
        }
        if self.rectangle_at(point).is_some() {
            return CursorKind::Grab;
        }
        CursorKind::Crosshair
    }

    //  Commands

    /// Apply a [`Command`].
    ///
    /// [`Command::Quit`] belongs to the host and is a no-op here.
    pub fn apply(&mut self, cmd: Command) -> Option<Effect> {
        match cmd {
            Command::SetEditMode(on) => self.set_edit_mode(on),
            Command::ToggleEditMode => self.toggle_edit_mode(),
            Command::SetShowFill(show) => self.set_show_fill(show),
            Command::ToggleFill => self.toggle_fill(),
            Command::ApplyOpacity(v) => self.apply_opacity(v),
            Command::ApplyBorderWidth(v) => self.apply_border_width(v),
            Command::ApplyColor(c) => self.apply_color(c),
            Command::ClearAll => return Some(Effect::ConfirmClearAll),
            Command::ClearAllConfirmed => self.clear_all(),
            Command::EditRectangle { id, label, color } => {
                self.edit_rectangle(id, label, color);
            }
            Command::DeleteRectangle(id) => {
                self.delete_rectangle(id);
            }
            Command::Quit => {}
        }
        None
    }

    /// Enter or leave edit mode.
    ///
    /// Leaving cancels any gesture in flight; the selection survives.
    pub fn set_edit_mode(&mut self, on: bool) {
        if self.edit_mode == on {
            return;
        }
        self.edit_mode = on;
        if !on {
            self.gesture = Gesture::Idle;
        }
        info!("{} mode", if on { "edit" } else { "lock" });
    }

    pub fn toggle_edit_mode(&mut self) {
        self.set_edit_mode(!self.edit_mode);
    }

    pub fn set_show_fill(&mut self, show: bool) {
        self.show_fill = show;
    }

    pub fn toggle_fill(&mut self) {
        self.show_fill = !self.show_fill;
    }

    /// Set every rectangle's fill opacity (clamped to `[0, 1]`).
    pub fn apply_opacity(&mut self, value: f64) {
        if value.is_nan() {
            warn!("ignoring NaN opacity");
            return;
        }
        let value = value.clamp(0.0, 1.0);
        self.defaults.fill_opacity = value;
        for r in &mut self.rectangles {
            r.style.fill_opacity = value;
        }
    }

    /// Set every rectangle's border width; non-positive widths are ignored.
    pub fn apply_border_width(&mut self, value: f64) {
        if !(value.is_finite() && value > 0.0) {
            warn!("ignoring border width {}", value);
            return;
        }
        self.defaults.border_width = value;
        for r in &mut self.rectangles {
            r.style.border_width = value;
        }
    }

    /// Recolor every rectangle and use `color` for new ones.
    pub fn apply_color(&mut self, color: SerializableColor) {
        self.defaults.color = color;
        for r in &mut self.rectangles {
            r.style.color = color;
        }
    }

    /// Store an edit-dialog result.  Returns `false` for unknown ids.
    pub fn edit_rectangle(&mut self, id: RectangleId, label: String, color: SerializableColor) -> bool {
        match self.rectangle_mut(id) {
            Some(r) => {
                r.label = label;
                r.style.color = color;
                true
            }
            None => {
                warn!("edit for unknown rectangle {}", id);
                false
            }
        }
    }

    /// Remove a rectangle by identity.  Returns `false` for unknown ids.
    ///
    /// The selection is cleared only if it pointed at `id`.
    pub fn delete_rectangle(&mut self, id: RectangleId) -> bool {
        let Some(index) = self.rectangles.iter().position(|r| r.id() == id) else {
            warn!("delete for unknown rectangle {}", id);
            return false;
        };
        self.rectangles.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if matches!(
            self.gesture,
            Gesture::Moving { id: g, .. } | Gesture::Resizing { id: g, .. } if g == id
        ) {
            self.gesture = Gesture::Idle;
        }
        info!("deleted {}", id);
        true
    }

    /// Remove every rectangle and reset selection and gesture state.
    pub fn clear_all(&mut self) {
        info!("clearing {} rectangle(s)", self.rectangles.len());
        self.rectangles.clear();
        self.selected = None;
        self.gesture = Gesture::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::MIN_RESIZE_SIZE;

    const BLACK: SerializableColor = SerializableColor::new(0, 0, 0, 255);

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn frame(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::from_origin_size((x, y), (w, h))
    }

    fn editing() -> Surface {
        let mut s = Surface::default();
        s.set_edit_mode(true);
        s
    }

    /// Press, drag and release with the primary button.
    fn drag(s: &mut Surface, from: Point, to: Point) {
        s.handle_input(InputEvent::press(from));
        s.handle_input(InputEvent::PointerDrag { point: to });
        s.handle_input(InputEvent::PointerUp);
    }

    fn with_rect(from: Point, to: Point) -> (Surface, RectangleId) {
        let mut s = editing();
        drag(&mut s, from, to);
        let id = s.rectangles().last().unwrap().id();
        (s, id)
    }

    //  Creating

    #[test]
    fn drag_creates_normalised_rectangle() {
        let mut s = editing();
        drag(&mut s, p(50.0, 50.0), p(10.0, 10.0));
        assert_eq!(s.rectangles().len(), 1);
        assert_eq!(s.rectangles()[0].frame, frame(10.0, 10.0, 40.0, 40.0));
        assert_eq!(s.selected(), Some(s.rectangles()[0].id()));
        assert_eq!(s.gesture(), &Gesture::Idle);
    }

    #[test]
    fn every_drag_direction_gives_the_same_box() {
        let corners = [
            (p(10.0, 10.0), p(50.0, 50.0)),
            (p(50.0, 50.0), p(10.0, 10.0)),
            (p(10.0, 50.0), p(50.0, 10.0)),
            (p(50.0, 10.0), p(10.0, 50.0)),
        ];
        for (a, b) in corners {
            let (s, _) = with_rect(a, b);
            assert_eq!(s.rectangles()[0].frame, frame(10.0, 10.0, 40.0, 40.0));
        }
    }

    #[test]
    fn transient_tracks_pointer_until_release() {
        let mut s = editing();
        s.handle_input(InputEvent::press(p(100.0, 100.0)));
        assert_eq!(s.transient().unwrap().frame, Rect::from_points(p(100.0, 100.0), p(100.0, 100.0)));
        s.handle_input(InputEvent::PointerDrag { point: p(130.0, 80.0) });
        assert_eq!(s.transient().unwrap().frame, frame(100.0, 80.0, 30.0, 20.0));
        assert!(s.rectangles().is_empty());
        s.handle_input(InputEvent::PointerUp);
        assert!(s.transient().is_none());
        assert_eq!(s.rectangles().len(), 1);
    }

    #[test]
    fn small_drags_are_discarded() {
        let mut s = editing();
        drag(&mut s, p(0.0, 0.0), p(10.0, 100.0));
        drag(&mut s, p(200.0, 200.0), p(300.0, 210.0));
        drag(&mut s, p(400.0, 400.0), p(400.0, 400.0));
        assert!(s.rectangles().is_empty());
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn new_rectangles_use_current_defaults() {
        let mut s = editing();
        s.apply(Command::ApplyColor(BLACK));
        s.apply(Command::ApplyBorderWidth(5.0));
        drag(&mut s, p(0.0, 0.0), p(50.0, 50.0));
        let r = &s.rectangles()[0];
        assert_eq!(r.style.color, BLACK);
        assert_eq!(r.style.border_width, 5.0);
    }

    #[test]
    fn click_on_empty_space_clears_selection() {
        let (mut s, id) = with_rect(p(0.0, 0.0), p(50.0, 50.0));
        assert_eq!(s.selected(), Some(id));
        s.handle_input(InputEvent::press(p(300.0, 300.0)));
        assert_eq!(s.selected(), None);
        s.handle_input(InputEvent::PointerUp);
        assert_eq!(s.rectangles().len(), 1);
    }

    //  Moving

    #[test]
    fn move_translates_without_resizing() {
        let (mut s, id) = with_rect(p(10.0, 10.0), p(110.0, 60.0));
        drag(&mut s, p(30.0, 20.0), p(237.5, -13.25));
        let r = s.rectangle(id).unwrap();
        assert_eq!(r.frame.origin(), p(217.5, -23.25));
        assert_eq!(r.frame.width(), 100.0);
        assert_eq!(r.frame.height(), 50.0);
    }

    #[test]
    fn press_selects_topmost_rectangle() {
        let (mut s, first) = with_rect(p(0.0, 0.0), p(100.0, 100.0));
        drag(&mut s, p(200.0, 200.0), p(300.0, 300.0));
        let second = s.rectangles()[1].id();
        // Move the second rectangle over the first.
        drag(&mut s, p(250.0, 250.0), p(100.0, 100.0));
        assert_eq!(s.rectangle(second).unwrap().frame.origin(), p(50.0, 50.0));

        s.handle_input(InputEvent::press(p(75.0, 75.0)));
        assert_eq!(s.selected(), Some(second));
        s.handle_input(InputEvent::PointerUp);

        s.handle_input(InputEvent::press(p(25.0, 25.0)));
        assert_eq!(s.selected(), Some(first));
    }

    //  Resizing

    #[test]
    fn dragging_a_handle_of_the_selection_resizes() {
        let (mut s, id) = with_rect(p(100.0, 100.0), p(300.0, 200.0));
        // Bottom-right handle sits at (300, 100).
        drag(&mut s, p(301.0, 99.0), p(341.0, 89.0));
        assert_eq!(
            s.rectangle(id).unwrap().frame,
            frame(100.0, 90.0, 240.0, 110.0)
        );
    }

    #[test]
    fn handles_of_unselected_rectangles_are_inert() {
        let (mut s, id) = with_rect(p(100.0, 100.0), p(300.0, 200.0));
        s.handle_input(InputEvent::press(p(500.0, 500.0)));
        s.handle_input(InputEvent::PointerUp);
        assert_eq!(s.selected(), None);
        // Inside the rectangle near its top-right corner: a move, not a resize.
        drag(&mut s, p(298.0, 198.0), p(308.0, 208.0));
        assert_eq!(
            s.rectangle(id).unwrap().frame,
            frame(110.0, 110.0, 200.0, 100.0)
        );
    }

    #[test]
    fn resize_below_minimum_leaves_frame_untouched() {
        let (mut s, id) = with_rect(p(100.0, 100.0), p(300.0, 200.0));
        // Right handle at (300, 150).
        s.handle_input(InputEvent::press(p(300.0, 150.0)));
        s.handle_input(InputEvent::PointerDrag { point: p(250.0, 150.0) });
        let before = s.rectangle(id).unwrap().frame;
        assert_eq!(before.width(), 150.0);
        s.handle_input(InputEvent::PointerDrag { point: p(115.0, 150.0) });
        assert_eq!(s.rectangle(id).unwrap().frame, before);
        s.handle_input(InputEvent::PointerDrag { point: p(120.0, 150.0) });
        assert_eq!(s.rectangle(id).unwrap().frame.width(), MIN_RESIZE_SIZE);
        s.handle_input(InputEvent::PointerUp);
        let r = s.rectangle(id).unwrap();
        assert!(r.frame.width() >= MIN_RESIZE_SIZE && r.frame.height() >= MIN_RESIZE_SIZE);
    }

    #[test]
    fn resize_is_computed_from_drag_start() {
        let (mut s, id) = with_rect(p(0.0, 0.0), p(100.0, 100.0));
        s.handle_input(InputEvent::press(p(100.0, 50.0)));
        for x in [110.0, 120.0, 130.0, 125.0] {
            s.handle_input(InputEvent::PointerDrag { point: p(x, 50.0) });
        }
        assert_eq!(s.rectangle(id).unwrap().frame.width(), 125.0);
    }

    //  Double-click, context click, delete

    #[test]
    fn double_click_opens_editor_and_returns_to_idle() {
        let (mut s, id) = with_rect(p(0.0, 0.0), p(100.0, 100.0));
        s.handle_input(InputEvent::press(p(50.0, 50.0)));
        let effect = s.handle_input(InputEvent::PointerDown {
            point: p(50.0, 50.0),
            button: Button::Primary,
            click_count: 2,
        });
        assert_eq!(
            effect,
            Some(Effect::OpenEditDialog {
                id,
                label: String::new(),
                color: SerializableColor::SYSTEM_BLUE,
            })
        );
        assert_eq!(s.gesture(), &Gesture::Idle);

        s.apply(Command::EditRectangle {
            id,
            label: "Projects".into(),
            color: BLACK,
        });
        let r = s.rectangle(id).unwrap();
        assert_eq!(r.label, "Projects");
        assert_eq!(r.style.color, BLACK);
    }

    #[test]
    fn double_click_on_empty_space_starts_creating() {
        let mut s = editing();
        let effect = s.handle_input(InputEvent::PointerDown {
            point: p(10.0, 10.0),
            button: Button::Primary,
            click_count: 2,
        });
        assert_eq!(effect, None);
        assert!(s.transient().is_some());
    }

    #[test]
    fn triple_click_does_not_reopen_editor() {
        let (mut s, id) = with_rect(p(0.0, 0.0), p(100.0, 100.0));
        for click_count in 1..=2 {
            s.handle_input(InputEvent::PointerDown {
                point: p(50.0, 50.0),
                button: Button::Primary,
                click_count,
            });
        }
        let effect = s.handle_input(InputEvent::PointerDown {
            point: p(50.0, 50.0),
            button: Button::Primary,
            click_count: 3,
        });
        assert_eq!(effect, None);
        assert!(matches!(s.gesture(), Gesture::Moving { id: moving, .. } if *moving == id));
    }

    #[test]
    fn context_click_offers_delete() {
        let (mut s, id) = with_rect(p(0.0, 0.0), p(100.0, 100.0));
        let effect = s.handle_input(InputEvent::PointerDown {
            point: p(20.0, 20.0),
            button: Button::Secondary,
            click_count: 1,
        });
        assert_eq!(effect, Some(Effect::OpenContextMenu { id, at: p(20.0, 20.0) }));

        let miss = s.handle_input(InputEvent::PointerDown {
            point: p(500.0, 20.0),
            button: Button::Secondary,
            click_count: 1,
        });
        assert_eq!(miss, None);

        s.apply(Command::DeleteRectangle(id));
        assert!(s.rectangles().is_empty());
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn deleting_other_rectangle_keeps_selection() {
        let (mut s, first) = with_rect(p(0.0, 0.0), p(100.0, 100.0));
        drag(&mut s, p(200.0, 200.0), p(300.0, 300.0));
        let second = s.selected().unwrap();
        assert!(s.delete_rectangle(first));
        assert_eq!(s.selected(), Some(second));
        assert!(!s.delete_rectangle(first));
    }

    #[test]
    fn delete_key_removes_selection() {
        let (mut s, _) = with_rect(p(0.0, 0.0), p(100.0, 100.0));
        drag(&mut s, p(200.0, 200.0), p(300.0, 300.0));
        s.handle_input(InputEvent::Key(Key::Backspace));
        assert_eq!(s.rectangles().len(), 1);
        assert_eq!(s.selected(), None);
        // Nothing selected: no-op.
        s.handle_input(InputEvent::Key(Key::Delete));
        assert_eq!(s.rectangles().len(), 1);
    }

    #[test]
    fn deleting_the_dragged_rectangle_stops_the_drag() {
        let (mut s, id) = with_rect(p(0.0, 0.0), p(100.0, 100.0));
        s.handle_input(InputEvent::press(p(50.0, 50.0)));
        s.delete_rectangle(id);
        assert_eq!(s.gesture(), &Gesture::Idle);
        s.handle_input(InputEvent::PointerDrag { point: p(60.0, 60.0) });
        s.handle_input(InputEvent::PointerUp);
        assert!(s.rectangles().is_empty());
    }

    //  Modes and commands

    #[test]
    fn lock_mode_ignores_input() {
        let mut s = Surface::default();
        drag(&mut s, p(0.0, 0.0), p(100.0, 100.0));
        assert!(s.rectangles().is_empty());
        assert_eq!(s.cursor_at(p(0.0, 0.0)), CursorKind::Default);
    }

    #[test]
    fn leaving_edit_mode_cancels_gesture() {
        let mut s = editing();
        s.handle_input(InputEvent::press(p(0.0, 0.0)));
        s.handle_input(InputEvent::PointerDrag { point: p(100.0, 100.0) });
        s.apply(Command::ToggleEditMode);
        assert!(!s.is_edit_mode());
        assert!(s.transient().is_none());
        s.apply(Command::SetEditMode(true));
        s.handle_input(InputEvent::PointerUp);
        assert!(s.rectangles().is_empty());
    }

    #[test]
    fn clear_all_asks_first() {
        let (mut s, _) = with_rect(p(0.0, 0.0), p(100.0, 100.0));
        assert_eq!(s.apply(Command::ClearAll), Some(Effect::ConfirmClearAll));
        assert_eq!(s.rectangles().len(), 1);
        s.handle_input(InputEvent::press(p(300.0, 300.0)));
        s.apply(Command::ClearAllConfirmed);
        assert!(s.rectangles().is_empty());
        assert_eq!(s.selected(), None);
        assert!(s.transient().is_none());
        assert_eq!(s.gesture(), &Gesture::Idle);
    }

    #[test]
    fn unconfirmed_clear_all_never_clears() {
        let (mut s, id) = with_rect(p(0.0, 0.0), p(100.0, 100.0));
        for _ in 0..3 {
            assert_eq!(s.apply(Command::ClearAll), Some(Effect::ConfirmClearAll));
        }
        assert_eq!(s.rectangles().len(), 1);
        assert_eq!(s.selected(), Some(id));
    }

    #[test]
    fn style_broadcast_reaches_every_rectangle() {
        let (mut s, _) = with_rect(p(0.0, 0.0), p(100.0, 100.0));
        drag(&mut s, p(200.0, 200.0), p(300.0, 300.0));
        s.apply(Command::ApplyOpacity(1.7));
        s.apply(Command::ApplyBorderWidth(-1.0));
        for r in s.rectangles() {
            assert_eq!(r.style.fill_opacity, 1.0);
            assert_eq!(r.style.border_width, 2.0);
        }
        assert_eq!(s.defaults().fill_opacity, 1.0);

        s.apply(Command::ToggleFill);
        assert!(!s.show_fill());
        s.apply(Command::SetShowFill(true));
        assert!(s.show_fill());
    }

    #[test]
    fn cursor_feedback() {
        let (s, _) = with_rect(p(100.0, 100.0), p(300.0, 200.0));
        assert_eq!(
            s.cursor_at(p(100.0, 200.0)),
            CursorKind::Resize(ResizeCursor::DiagonalNwSe)
        );
        assert_eq!(
            s.cursor_at(p(200.0, 100.0)),
            CursorKind::Resize(ResizeCursor::Vertical)
        );
        assert_eq!(s.cursor_at(p(150.0, 150.0)), CursorKind::Grab);
        assert_eq!(s.cursor_at(p(10.0, 10.0)), CursorKind::Crosshair);
    }
}
