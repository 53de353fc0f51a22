//! Board viewport: the translation (and scale) between screen and board space.
//!
//! The invariant is `screen = board * scale + offset` for every rendered
//! note. Panning moves `offset` only; note positions never change when the
//! board is panned. The viewport also tracks the board point that should sit
//! at the visual center, so a resize keeps the same content centered.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in either screen or board space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both axes are within `threshold` of the origin (inclusive).
    #[must_use]
    pub fn within(self, threshold: f64) -> bool {
        self.x.abs() <= threshold && self.y.abs() <= threshold
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Offset that places `center` (board space) at the middle of a
/// `width` × `height` viewport.
#[must_use]
pub fn centering_offset(width: f64, height: f64, center: Point, scale: f64) -> Point {
    Point::new(width / 2.0 - center.x * scale, height / 2.0 - center.y * scale)
}

/// Client-only pan state. Never persisted.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Translation applied to the whole board layer, in screen pixels.
    pub offset: Point,
    /// Scale factor (1.0 = no zoom).
    pub scale: f64,
    /// Viewport width in screen pixels.
    pub width: f64,
    /// Viewport height in screen pixels.
    pub height: f64,
    /// Board point kept at the visual center across resizes.
    pub virtual_center: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { offset: Point::default(), scale: 1.0, width: 0.0, height: 0.0, virtual_center: Point::default() }
    }
}

impl Viewport {
    /// Convert a screen-space point to board coordinates.
    #[must_use]
    pub fn screen_to_board(&self, screen: Point) -> Point {
        Point::new((screen.x - self.offset.x) / self.scale, (screen.y - self.offset.y) / self.scale)
    }

    /// Convert a board-space point to screen coordinates.
    #[must_use]
    pub fn board_to_screen(&self, board: Point) -> Point {
        Point::new(board.x * self.scale + self.offset.x, board.y * self.scale + self.offset.y)
    }

    /// Convert a screen-space delta to a board-space delta.
    #[must_use]
    pub fn screen_delta_to_board(&self, delta: Point) -> Point {
        Point::new(delta.x / self.scale, delta.y / self.scale)
    }

    /// Pan by an incremental screen delta.
    pub fn pan(&mut self, delta: Point) {
        self.offset = self.offset + delta;
        self.virtual_center = self.virtual_center - self.screen_delta_to_board(delta);
    }

    /// Record new viewport dimensions and recenter on the virtual center.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.recenter();
    }

    /// Make `center` the board point shown at the middle of the viewport.
    pub fn center_on(&mut self, center: Point) {
        self.virtual_center = center;
        self.recenter();
    }

    /// Board point currently at the visual center of the viewport.
    #[must_use]
    pub fn visual_center(&self) -> Point {
        self.screen_to_board(Point::new(self.width / 2.0, self.height / 2.0))
    }

    fn recenter(&mut self) {
        self.offset = centering_offset(self.width, self.height, self.virtual_center, self.scale);
    }
}
