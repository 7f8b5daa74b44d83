use serde::{Deserialize, Serialize};

use super::task::TaskStatus;
use super::{Classified, Entity, Patch};

/// Lifecycle state of a project as stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Running,
    Paused,
    Closed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Running => "running",
            ProjectStatus::Paused => "paused",
            ProjectStatus::Closed => "closed",
        }
    }

    /// Board column a project with this status is rendered in.
    pub fn column(self) -> TaskStatus {
        match self {
            ProjectStatus::Running => TaskStatus::Todo,
            ProjectStatus::Paused => TaskStatus::InProgress,
            ProjectStatus::Closed => TaskStatus::Done,
        }
    }

    /// Inverse of [`ProjectStatus::column`].
    pub fn from_column(column: TaskStatus) -> Self {
        match column {
            TaskStatus::Todo => ProjectStatus::Running,
            TaskStatus::InProgress => ProjectStatus::Paused,
            TaskStatus::Done => ProjectStatus::Closed,
        }
    }

    /// Column heading on the projects board
    pub fn column_title(self) -> &'static str {
        match self {
            ProjectStatus::Running => "In Progress",
            ProjectStatus::Paused => "Paused",
            ProjectStatus::Closed => "Done",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
}

impl Entity for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Classified for Project {
    type Status = ProjectStatus;

    fn status(&self) -> ProjectStatus {
        self.status
    }

    fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }
}

/// Creation payload; new projects always start out running
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ProjectStatus,
}

impl NewProject {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: ProjectStatus::Running,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        if !description.trim().is_empty() {
            self.description = Some(description);
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

impl ProjectPatch {
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl Patch<Project> for ProjectPatch {
    fn apply_to(&self, project: &mut Project) {
        if let Some(title) = &self.title {
            project.title = title.clone();
        }
        if let Some(description) = &self.description {
            project.description = Some(description.clone());
        }
        if let Some(status) = self.status {
            project.status = status;
        }
    }
}
