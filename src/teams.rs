//! Team overview board: one card per team on a fixed grid, each listing
//! that team's projects.

use crate::constants::{
    TEAM_CARD_SIZE, TEAM_GRID_COLUMNS, TEAM_GRID_ORIGIN, TEAM_GRID_STRIDE_X, TEAM_GRID_STRIDE_Y,
};
use crate::geometry::Rect;
use crate::types::{Project, ProjectId, Team, TeamId};
use serde::Serialize;
use std::collections::HashMap;

/// One line of a team card.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub project_id: ProjectId,
    pub name: String,
    /// Accent for the name; the default project color when unset
    pub color: String,
    pub description: Option<String>,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            project_id: project.id.clone(),
            name: project.name.clone(),
            color: project.color_or_default().to_string(),
            description: project.description.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TeamCard {
    pub team_id: TeamId,
    pub name: String,
    pub description: Option<String>,
    pub rect: Rect,
    pub projects: Vec<ProjectSummary>,
}

/// Cards in rows of three, left to right then top to bottom. Teams missing
/// from `projects_by_team` get an empty list.
pub fn layout_team_cards(
    teams: &[Team],
    projects_by_team: &HashMap<TeamId, Vec<Project>>,
) -> Vec<TeamCard> {
    teams
        .iter()
        .enumerate()
        .map(|(i, team)| {
            let col = (i % TEAM_GRID_COLUMNS) as f32;
            let row = (i / TEAM_GRID_COLUMNS) as f32;
            TeamCard {
                team_id: team.id.clone(),
                name: team.name.clone(),
                description: team.description.clone(),
                rect: Rect::from_xywh(
                    TEAM_GRID_ORIGIN.0 + col * TEAM_GRID_STRIDE_X,
                    TEAM_GRID_ORIGIN.1 + row * TEAM_GRID_STRIDE_Y,
                    TEAM_CARD_SIZE.0,
                    TEAM_CARD_SIZE.1,
                ),
                projects: projects_by_team
                    .get(&team.id)
                    .map(|list| list.iter().map(ProjectSummary::from).collect())
                    .unwrap_or_default(),
            }
        })
        .collect()
}
