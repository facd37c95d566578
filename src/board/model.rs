//! Board model: the locally cached projects and notes plus their spatial index.
//!
//! Positions are stored project-relative. Absolute board coordinates are
//! always `project.origin() + task.position()`, and the spatial index holds
//! those absolute boxes. Every helper that touches geometry goes through
//! [`BoardModel::absolute_rect`] so rendering and hit testing agree.

use crate::geometry::{Point, Rect};
use crate::spatial_index::SpatialIndex;
use crate::types::{Project, ProjectId, Task, TaskId};
use std::collections::HashMap;

#[derive(Default)]
pub struct BoardModel {
    projects: Vec<Project>,
    tasks: HashMap<ProjectId, Vec<Task>>,
    index: SpatialIndex,
}

impl BoardModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything. Tasks whose project is not in `projects` are dropped.
    pub fn load(&mut self, projects: Vec<Project>, mut tasks: HashMap<ProjectId, Vec<Task>>) {
        self.tasks = projects
            .iter()
            .map(|p| (p.id.clone(), tasks.remove(&p.id).unwrap_or_default()))
            .collect();
        if !tasks.is_empty() {
            tracing::debug!(orphans = tasks.len(), "Dropped tasks of unknown projects");
        }
        self.projects = projects;
        self.reindex();
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn tasks_of(&self, project_id: &str) -> &[Task] {
        self.tasks.get(project_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every note in board order: projects in load order, notes in insertion order.
    pub fn iter_tasks(&self) -> impl Iterator<Item = (&Project, &Task)> + '_ {
        self.projects
            .iter()
            .flat_map(move |p| self.tasks_of(&p.id).iter().map(move |t| (p, t)))
    }

    pub fn task_count(&self) -> usize {
        self.tasks.values().map(Vec::len).sum()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.values().flatten().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.values_mut().flatten().find(|t| t.id == id)
    }

    pub fn contains_task(&self, id: &str) -> bool {
        self.task(id).is_some()
    }

    pub fn absolute_position(&self, id: &str) -> Option<Point> {
        let task = self.task(id)?;
        let project = self.project(&task.project_id)?;
        Some(project.origin() + task.position())
    }

    pub fn absolute_rect(&self, id: &str) -> Option<Rect> {
        let task = self.task(id)?;
        let project = self.project(&task.project_id)?;
        Some(absolute_rect_of(project, task))
    }

    /// Highest z among loaded notes, if any
    pub fn max_z(&self) -> Option<i64> {
        self.tasks.values().flatten().map(Task::z).max()
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Append a note to its project. Returns false if the project is unknown.
    pub fn insert_task(&mut self, task: Task) -> bool {
        let Some(project) = self.project(&task.project_id) else {
            return false;
        };
        let rect = absolute_rect_of(project, &task);
        self.index.insert(task.id.clone(), rect);
        self.tasks.entry(task.project_id.clone()).or_default().push(task);
        true
    }

    /// Swap a note for `replacement`, keeping its slot in board order.
    pub fn replace_task(&mut self, id: &str, replacement: Task) -> bool {
        let new_id = replacement.id.clone();
        let Some(slot) = self.task_mut(id) else {
            return false;
        };
        *slot = replacement;
        self.index.remove(id);
        self.reindex_task_by_id(&new_id);
        true
    }

    /// Remove every note in `ids`. Returns the ones that existed.
    pub fn remove_tasks(&mut self, ids: &[TaskId]) -> Vec<Task> {
        let mut removed = Vec::new();
        for tasks in self.tasks.values_mut() {
            let (gone, kept): (Vec<Task>, Vec<Task>) =
                std::mem::take(tasks).into_iter().partition(|t| ids.contains(&t.id));
            *tasks = kept;
            removed.extend(gone);
        }
        for task in &removed {
            self.index.remove(&task.id);
        }
        removed
    }

    /// Shift the relative position of each note in `ids` by `delta`.
    ///
    /// The spatial index is left untouched; callers refresh it with
    /// [`BoardModel::reindex_tasks`] once the gesture ends.
    pub fn translate_tasks(&mut self, ids: &[TaskId], delta: Point) {
        for tasks in self.tasks.values_mut() {
            for task in tasks.iter_mut().filter(|t| ids.contains(&t.id)) {
                task.position_x += delta.x;
                task.position_y += delta.y;
            }
        }
    }

    /// Move a project container. Its notes follow because they are relative.
    pub fn move_project(&mut self, id: &str, delta: Point) -> Option<Point> {
        let project = self.projects.iter_mut().find(|p| p.id == id)?;
        let origin = project.origin() + delta;
        project.position_x = Some(origin.x);
        project.position_y = Some(origin.y);
        let ids: Vec<TaskId> = self.tasks_of(id).iter().map(|t| t.id.clone()).collect();
        self.reindex_tasks(&ids);
        Some(origin)
    }

    pub fn insert_project(&mut self, project: Project) {
        self.tasks.entry(project.id.clone()).or_default();
        self.projects.push(project);
    }

    pub fn project_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    /// Drop a project and its notes. Returns the ids of removed notes.
    pub fn remove_project(&mut self, id: &str) -> Vec<TaskId> {
        self.projects.retain(|p| p.id != id);
        let removed: Vec<TaskId> = self
            .tasks
            .remove(id)
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.id)
            .collect();
        for task_id in &removed {
            self.index.remove(task_id);
        }
        removed
    }

    // ------------------------------------------------------------------
    // Spatial queries
    // ------------------------------------------------------------------

    /// Topmost note under `point`: highest z, later board order breaking ties.
    pub fn topmost_at(&self, point: Point) -> Option<TaskId> {
        let hits = self.index.query_point(point);
        if hits.is_empty() {
            return None;
        }
        self.iter_tasks()
            .enumerate()
            .filter(|(_, (_, t))| hits.contains(&t.id))
            .max_by_key(|(order, (_, t))| (t.z(), *order))
            .map(|(_, (_, t))| t.id.clone())
    }

    /// Notes whose absolute box strictly overlaps `rect`, in board order.
    pub fn query_rect(&self, rect: &Rect) -> Vec<TaskId> {
        let hits = self.index.query_rect(rect);
        self.iter_tasks()
            .filter(|(_, t)| hits.contains(&t.id))
            .map(|(_, t)| t.id.clone())
            .collect()
    }

    pub fn reindex(&mut self) {
        let entries: Vec<(TaskId, Rect)> = self
            .iter_tasks()
            .map(|(p, t)| (t.id.clone(), absolute_rect_of(p, t)))
            .collect();
        self.index.rebuild(entries);
    }

    pub fn reindex_tasks(&mut self, ids: &[TaskId]) {
        for id in ids {
            self.reindex_task_by_id(id);
        }
    }

    fn reindex_task_by_id(&mut self, id: &str) {
        match self.absolute_rect(id) {
            Some(rect) => self.index.insert(id.to_string(), rect),
            None => {
                self.index.remove(id);
            }
        }
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }
}

fn absolute_rect_of(project: &Project, task: &Task) -> Rect {
    Rect::new(project.origin() + task.position(), task.size())
}
