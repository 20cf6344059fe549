//! Pointer and keyboard input, as seen by the [`Surface`](crate::surface::Surface).
//!
//! Hosts translate toolkit events into [`InputEvent`]s in desktop
//! coordinates.  Double-clicks are expressed through `click_count`, which a
//! host can derive with a [`ClickTracker`] when its toolkit does not report
//! one.

use crate::geometry::Point;

/// Mouse button that started a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Primary,
    /// Right click / context click.
    Secondary,
}

/// Keys the surface reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Delete,
    Backspace,
    Other,
}

/// A single input event in desktop coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A button went down.  `click_count` is `2` for the second press of a
    /// double-click.
    PointerDown {
        point: Point,
        button: Button,
        click_count: u32,
    },
    /// The pointer moved while the primary button is held.
    PointerDrag { point: Point },
    /// The primary button was released.
    PointerUp,
    Key(Key),
}

impl InputEvent {
    /// Primary single click at `point`.
    pub fn press(point: Point) -> Self {
        InputEvent::PointerDown {
            point,
            button: Button::Primary,
            click_count: 1,
        }
    }
}

/// Counts consecutive presses that land close together in time and space.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    interval_ms: u32,
    max_distance: f64,
    last: Option<LastPress>,
}

#[derive(Debug, Clone, Copy)]
struct LastPress {
    time_ms: u32,
    point: Point,
    count: u32,
}

impl ClickTracker {
    /// Presses within `interval_ms` of each other and no further apart than
    /// `max_distance` are counted as one multi-click.
    pub fn new(interval_ms: u32, max_distance: f64) -> Self {
        Self {
            interval_ms,
            max_distance,
            last: None,
        }
    }

    /// Register a press and return its click count (1 for a fresh click).
    ///
    /// `time_ms` is a monotonic millisecond timestamp as delivered by the
    /// toolkit; wrap-around is tolerated.
    pub fn press(&mut self, time_ms: u32, point: Point) -> u32 {
        let count = match self.last {
            Some(last)
                if time_ms.wrapping_sub(last.time_ms) <= self.interval_ms
                    && last.point.distance(point) <= self.max_distance =>
            {
                last.count + 1
            }
            _ => 1,
        };
        self.last = Some(LastPress {
            time_ms,
            point,
            count,
        });
        count
    }

    /// Forget the previous press.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_presses_in_place_count_up() {
        let mut t = ClickTracker::new(400, 5.0);
        let p = Point::new(10.0, 10.0);
        assert_eq!(t.press(1000, p), 1);
        assert_eq!(t.press(1200, p), 2);
        assert_eq!(t.press(1300, Point::new(12.0, 11.0)), 3);
    }

    #[test]
    fn slow_or_distant_presses_start_over() {
        let mut t = ClickTracker::new(400, 5.0);
        let p = Point::new(10.0, 10.0);
        assert_eq!(t.press(1000, p), 1);
        assert_eq!(t.press(1500, p), 1);
        assert_eq!(t.press(1600, Point::new(30.0, 10.0)), 1);
    }

    #[test]
    fn timestamp_wraparound() {
        let mut t = ClickTracker::new(400, 5.0);
        let p = Point::new(0.0, 0.0);
        assert_eq!(t.press(u32::MAX - 100, p), 1);
        assert_eq!(t.press(100, p), 2);
    }

    #[test]
    fn reset_forgets_previous_press() {
        let mut t = ClickTracker::new(400, 5.0);
        let p = Point::new(0.0, 0.0);
        t.press(0, p);
        t.reset();
        assert_eq!(t.press(10, p), 1);
    }
}
