//! Choosing where a double-clicked note belongs.

use crate::geometry::{Point, Rect, Size};
use crate::settings::NoteDefaults;
use crate::types::{Project, TaskDraft};

/// First project whose footprint contains `point` (edges inclusive), else
/// the first project. `None` only when there are no projects.
pub fn target_project<'a>(projects: &'a [Project], point: Point, footprint: Size) -> Option<&'a Project> {
    projects
        .iter()
        .find(|p| Rect::new(p.origin(), footprint).contains_point(point))
        .or_else(|| projects.first())
}

/// Draft for a note at absolute `point` inside `project`, styled by `defaults`.
pub fn note_draft(project: &Project, point: Point, defaults: &NoteDefaults) -> TaskDraft {
    let mut draft = TaskDraft::note(project.id.clone(), point - project.origin());
    draft.title = defaults.title.clone();
    draft.width = Some(defaults.width);
    draft.height = Some(defaults.height);
    draft.color = Some(defaults.color.clone());
    draft
}
