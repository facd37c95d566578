//! Stacking order counter.
//!
//! Owned by the controller and never shared: reading and incrementing happen
//! in one synchronous call, so two commits can never observe the same value.

use crate::types::Task;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZCounter {
    current: i64,
}

impl ZCounter {
    pub fn new(start: i64) -> Self {
        Self { current: start }
    }

    /// Start at the highest z among `tasks` (or 0) so the next bump lands on top.
    pub fn seeded_from<'a, I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let max = tasks.into_iter().map(Task::z).max().unwrap_or(0);
        Self::new(max.max(0))
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    /// Increment once and return the new value.
    pub fn bump(&mut self) -> i64 {
        self.current += 1;
        self.current
    }
}
