//! Built-in demo dataset served when the backend cannot be reached.

use crate::types::{Project, Task, Team};
use once_cell::sync::Lazy;

pub static DEMO_TEAMS: Lazy<Vec<Team>> = Lazy::new(|| {
    vec![
        team("demo-team-1", "Development Team", "Main development team"),
        team("demo-team-2", "Marketing Team", "Marketing and outreach"),
    ]
});

pub static DEMO_PROJECTS: Lazy<Vec<Project>> = Lazy::new(|| {
    vec![
        project("demo-prj-1", "demo-team-1", "Website Redesign", "#3b82f6", 100.0, 100.0),
        project("demo-prj-2", "demo-team-1", "Mobile App", "#10b981", 760.0, 100.0),
        project("demo-prj-3", "demo-team-2", "Q4 Campaign", "#f59e0b", 100.0, 560.0),
    ]
});

pub static DEMO_TASKS: Lazy<Vec<Task>> = Lazy::new(|| {
    vec![
        task("t1", "demo-prj-1", "Plan layout", "Wireframes", 40.0, 40.0, "#fde68a"),
        task("t2", "demo-prj-1", "Review content", "SEO", 280.0, 120.0, "#fef3c7"),
        task("t3", "demo-prj-2", "Prototype", "Login screen", 60.0, 70.0, "#e0f2fe"),
        task("t4", "demo-prj-3", "Brief", "Target audience", 100.0, 50.0, "#ffedd5"),
    ]
});

pub fn teams() -> Vec<Team> {
    DEMO_TEAMS.clone()
}

/// Demo projects, optionally limited to one team
pub fn projects(team_id: Option<&str>) -> Vec<Project> {
    DEMO_PROJECTS
        .iter()
        .filter(|p| team_id.is_none_or(|t| p.team_id.as_deref() == Some(t)))
        .cloned()
        .collect()
}

pub fn tasks(project_id: &str) -> Vec<Task> {
    DEMO_TASKS
        .iter()
        .filter(|t| t.project_id == project_id)
        .cloned()
        .collect()
}

fn team(id: &str, name: &str, description: &str) -> Team {
    Team {
        id: id.into(),
        name: name.into(),
        description: Some(description.into()),
        created_at: None,
        updated_at: None,
    }
}

fn project(id: &str, team_id: &str, name: &str, color: &str, x: f32, y: f32) -> Project {
    Project {
        id: id.into(),
        team_id: Some(team_id.into()),
        name: name.into(),
        description: None,
        color: Some(color.into()),
        position_x: Some(x),
        position_y: Some(y),
        created_at: None,
        updated_at: None,
    }
}

fn task(id: &str, project_id: &str, title: &str, content: &str, x: f32, y: f32, color: &str) -> Task {
    Task {
        id: id.into(),
        project_id: project_id.into(),
        title: title.into(),
        content: Some(content.into()),
        position_x: x,
        position_y: y,
        width: Some(200.0),
        height: Some(150.0),
        color: Some(color.into()),
        z_index: None,
        created_at: None,
        updated_at: None,
    }
}
