//! Drag point bookkeeping, independent of any DOM
//!
//! Data flows: press → `begin` (captures drag point) → moves → `ghost_origin`
//! → release → `release` (clears drag point).

use crate::geometry::{Point, Rect, Size};

/// Ghost geometry at the moment a drag starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStart {
    pub ghost_size: Size,
    pub ghost_origin: Point,
}

#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    /// Pointer offset inside the pressed element, `None` while idle
    drag_point: Option<Point>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a drag from `pointer` pressed inside `target`.
    pub fn begin(&mut self, pointer: Point, target: Rect) -> DragStart {
        self.drag_point = Some(pointer.offset_from(target.origin()));
        DragStart {
            ghost_size: target.size(),
            ghost_origin: target.origin(),
        }
    }

    /// Where the ghost's top-left belongs for the current pointer position.
    pub fn ghost_origin(&self, pointer: Point) -> Option<Point> {
        self.drag_point.map(|drag_point| pointer.offset_from(drag_point))
    }

    /// Ends the drag; `false` when nothing was being dragged.
    pub fn release(&mut self) -> bool {
        self.drag_point.take().is_some()
    }

    pub fn reset(&mut self) {
        self.drag_point = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_point.is_some()
    }

    pub fn drag_point(&self) -> Option<Point> {
        self.drag_point
    }
}
