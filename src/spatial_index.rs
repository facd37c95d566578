//! Spatial Index Module
//!
//! R-tree over note bounding boxes in absolute canvas coordinates. Used for
//! hit testing pointer events and for resolving marquee selections without
//! scanning every note.

use crate::geometry::{Point, Rect};
use crate::types::TaskId;
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A note's absolute bounding box.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub task_id: TaskId,
    pub rect: Rect,
}

impl SpatialEntry {
    pub fn new(task_id: TaskId, rect: Rect) -> Self {
        Self { task_id, rect }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.rect.min_x(), self.rect.min_y()],
            [self.rect.max_x(), self.rect.max_y()],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.task_id == other.task_id
    }
}

/// Spatial index for notes.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<TaskId, Rect>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Build an index from `(id, absolute rect)` pairs.
    pub fn from_entries<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (TaskId, Rect)>,
    {
        let mut index = Self::new();
        index.rebuild(items);
        index
    }

    pub fn insert(&mut self, task_id: TaskId, rect: Rect) {
        self.remove(&task_id);
        self.tree.insert(SpatialEntry::new(task_id.clone(), rect));
        self.entries.insert(task_id, rect);
    }

    pub fn remove(&mut self, task_id: &str) -> bool {
        if let Some(rect) = self.entries.remove(task_id) {
            self.tree.remove(&SpatialEntry::new(task_id.to_string(), rect));
            true
        } else {
            false
        }
    }

    /// Ids of all notes containing the point (edges inclusive).
    pub fn query_point(&self, p: Point) -> Vec<TaskId> {
        let envelope = AABB::from_point([p.x, p.y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.rect.contains_point(p))
            .map(|entry| entry.task_id.clone())
            .collect()
    }

    /// Ids of all notes strictly overlapping `rect`.
    ///
    /// The R-tree treats touching envelopes as intersecting, so candidates are
    /// re-checked with the strict AABB test.
    pub fn query_rect(&self, rect: &Rect) -> Vec<TaskId> {
        let envelope = AABB::from_corners(
            [rect.min_x(), rect.min_y()],
            [rect.max_x(), rect.max_y()],
        );

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.rect.intersects(rect))
            .map(|entry| entry.task_id.clone())
            .collect()
    }

    pub fn rect(&self, task_id: &str) -> Option<Rect> {
        self.entries.get(task_id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rebuild<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (TaskId, Rect)>,
    {
        let entries: Vec<SpatialEntry> = items
            .into_iter()
            .map(|(id, rect)| SpatialEntry::new(id, rect))
            .collect();

        self.entries = entries
            .iter()
            .map(|e| (e.task_id.clone(), e.rect))
            .collect();
        self.tree = RTree::bulk_load(entries);
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
