//! Selection set: which notes are currently selected.
//!
//! Membership is ephemeral UI state and never persisted. Ids keep the order
//! in which they were selected so bulk operations run deterministically.

use crate::types::TaskId;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    ids: Vec<TaskId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[TaskId] {
        &self.ids
    }

    /// Plain click: the selection becomes exactly `{id}`. Never deselects.
    pub fn select_only(&mut self, id: TaskId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Modifier click: add if absent, remove if present.
    pub fn toggle(&mut self, id: TaskId) {
        if let Some(pos) = self.ids.iter().position(|s| *s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    /// Marquee result: replaces, never merges.
    pub fn replace<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = TaskId>,
    {
        self.ids.clear();
        for id in ids {
            if !self.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|s| s != id);
        self.ids.len() != before
    }

    /// Swap an id in place, used when a local note gets its stored id.
    pub fn rename(&mut self, from: &str, to: &str) {
        for id in &mut self.ids {
            if id == from {
                *id = to.to_string();
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Hand back every id, leaving the selection empty
    pub fn take(&mut self) -> Vec<TaskId> {
        std::mem::take(&mut self.ids)
    }
}
