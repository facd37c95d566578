//! Canvas surface: the pannable, effectively infinite drawing area.
//!
//! The surface owns only geometry (where it sits in the window, how far it is
//! panned, the background grid). It never owns notes; it turns raw pointer
//! positions into board coordinates and hands them to the controller.

use crate::constants::{GRID_SIZE, MIN_GRID_SIZE};
use crate::geometry::{Point, Rect};
use crate::input::coords::{CoordinateContext, CoordinateConverter};
use crate::input::PointerEvent;

/// Events the surface raises on its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CanvasEvent {
    /// Double-click on empty canvas at a local point. The only way notes spawn.
    DoubleCreate(Point),
}

/// Grid lines visible in a viewport, in canvas-bounds coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLines {
    pub vertical: Vec<f32>,
    pub horizontal: Vec<f32>,
}

#[derive(Clone, Debug)]
pub struct CanvasSurface {
    bounds: Rect,
    pan_offset: Point,
    grid_size: f32,
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self::new(Rect::default())
    }
}

impl CanvasSurface {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            pan_offset: Point::ZERO,
            grid_size: GRID_SIZE,
        }
    }

    /// Zero or less hides the grid. Positive sizes are clamped to
    /// `MIN_GRID_SIZE`.
    pub fn with_grid_size(mut self, grid_size: f32) -> Self {
        self.grid_size = if grid_size > 0.0 {
            grid_size.max(MIN_GRID_SIZE)
        } else {
            0.0
        };
        self
    }

    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    /// Update the surface's client-space rectangle after a resize or scroll.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn pan_offset(&self) -> Point {
        self.pan_offset
    }

    pub fn pan_by(&mut self, delta: Point) {
        self.pan_offset = self.pan_offset + delta;
    }

    pub fn reset_pan(&mut self) {
        self.pan_offset = Point::ZERO;
    }

    pub fn coordinate_context(&self) -> CoordinateContext {
        CoordinateContext::new(self.bounds.origin, self.pan_offset)
    }

    /// Client coordinates to local board coordinates.
    pub fn pointer_to_local(&self, client: Point) -> Point {
        CoordinateConverter::client_to_local(client, &self.coordinate_context())
    }

    /// Local board coordinates to the drawn position inside the bounds.
    pub fn local_to_screen(&self, local: Point) -> Point {
        CoordinateConverter::local_to_screen(local, &self.coordinate_context())
    }

    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        CoordinateConverter::rect_local_to_screen(rect, &self.coordinate_context())
    }

    pub fn double_click(&self, event: &PointerEvent) -> CanvasEvent {
        CanvasEvent::DoubleCreate(self.pointer_to_local(event.client))
    }

    /// Grid line positions covering the current bounds, shifted by the pan
    /// offset so the grid moves with the board.
    pub fn grid_lines(&self) -> GridLines {
        if self.grid_size <= 0.0 {
            return GridLines::default();
        }
        GridLines {
            vertical: grid_axis(self.pan_offset.x, self.bounds.size.width, self.grid_size),
            horizontal: grid_axis(self.pan_offset.y, self.bounds.size.height, self.grid_size),
        }
    }
}

fn grid_axis(offset: f32, extent: f32, step: f32) -> Vec<f32> {
    let mut first = offset % step;
    if first < 0.0 {
        first += step;
    }
    let count = ((extent - first) / step).floor().max(-1.0) as i64 + 1;
    (0..count.max(0)).map(|i| first + i as f32 * step).collect()
}
