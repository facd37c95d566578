//! Coordinate conversion utilities for board interactions.
//!
//! Three spaces are in play:
//! - **client**: raw pointer coordinates reported by the host window
//! - **local**: logical board coordinates (project origin + task position)
//! - **screen**: where a local point is drawn inside the canvas bounds,
//!   i.e. local shifted by the pan offset
//!
//! Every conversion goes through here so geometry math and rendering agree.

use crate::geometry::{Point, Rect};

/// Context needed for coordinate conversions
pub struct CoordinateContext {
    pub bounds_origin: Point,
    pub pan_offset: Point,
}

impl CoordinateContext {
    #[inline]
    pub fn new(bounds_origin: Point, pan_offset: Point) -> Self {
        Self {
            bounds_origin,
            pan_offset,
        }
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Client position to logical board position
    #[inline]
    pub fn client_to_local(client: Point, ctx: &CoordinateContext) -> Point {
        client - ctx.bounds_origin - ctx.pan_offset
    }

    /// Logical board position to its drawn position inside the canvas
    #[inline]
    pub fn local_to_screen(local: Point, ctx: &CoordinateContext) -> Point {
        local + ctx.pan_offset
    }

    /// Drawn position inside the canvas to client coordinates
    #[inline]
    pub fn screen_to_client(screen: Point, ctx: &CoordinateContext) -> Point {
        screen + ctx.bounds_origin
    }

    #[inline]
    pub fn rect_local_to_screen(rect: Rect, ctx: &CoordinateContext) -> Rect {
        Rect::new(Self::local_to_screen(rect.origin, ctx), rect.size)
    }
}
