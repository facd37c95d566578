//! Pointer capture capability.
//!
//! A note drag must keep receiving moves even when the pointer leaves the
//! note's rectangle. Browsers do this with `setPointerCapture`; other hosts
//! route events their own way. The drag state machine only needs these three
//! calls, so hosts plug in whatever their platform offers.

use super::pointer::PointerId;
use std::collections::HashSet;

pub trait PointerCapture {
    /// Route all further events of `pointer` to the current target.
    fn begin_capture(&mut self, pointer: PointerId);

    /// Stop routing `pointer` exclusively.
    fn end_capture(&mut self, pointer: PointerId);

    fn is_captured(&self, pointer: PointerId) -> bool;
}

/// Headless capture: remembers which pointers are captured and nothing else.
#[derive(Debug, Default)]
pub struct NoCapture {
    captured: HashSet<PointerId>,
}

impl PointerCapture for NoCapture {
    fn begin_capture(&mut self, pointer: PointerId) {
        self.captured.insert(pointer);
    }

    fn end_capture(&mut self, pointer: PointerId) {
        self.captured.remove(&pointer);
    }

    fn is_captured(&self, pointer: PointerId) -> bool {
        self.captured.contains(&pointer)
    }
}
