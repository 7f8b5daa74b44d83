use serde::{Deserialize, Deserializer, Serialize};

use super::{Entity, Patch};

pub const MAX_PROGRESS: u8 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// ISO-8601 date as sent by the backend
    #[serde(default)]
    pub due_date: String,
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub project_id: String,
}

impl Entity for Milestone {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Clamp any numeric progress into 0..=100.
pub fn clamp_progress(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, f64::from(MAX_PROGRESS)) as u8
}

fn deserialize_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(clamp_progress).unwrap_or(0))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMilestone {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub project_id: String,
    pub status: String,
}

impl NewMilestone {
    pub fn new(
        project_id: impl Into<String>,
        title: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date: due_date.into(),
            project_id: project_id.into(),
            status: "pending".to_string(),
        }
    }
}

/// Partial milestone update. The backend wants the owning project id alongside.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestonePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl MilestonePatch {
    pub fn for_project(project_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            ..Default::default()
        }
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = Some(clamp_progress(progress));
        self
    }
}

impl Patch<Milestone> for MilestonePatch {
    fn apply_to(&self, milestone: &mut Milestone) {
        if let Some(title) = &self.title {
            milestone.title = title.clone();
        }
        if let Some(description) = &self.description {
            milestone.description = description.clone();
        }
        if let Some(due_date) = &self.due_date {
            milestone.due_date = due_date.clone();
        }
        if let Some(progress) = self.progress {
            milestone.progress = progress.min(MAX_PROGRESS);
        }
        if let Some(status) = &self.status {
            milestone.status = Some(status.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_clamped_on_decode() {
        let over: Milestone = serde_json::from_str(
            r#"{"id":"m1","title":"Beta","dueDate":"2024-06-01","progress":140,"projectId":"p1"}"#,
        )
        .unwrap();
        let under: Milestone = serde_json::from_str(
            r#"{"id":"m2","title":"Alpha","dueDate":"2024-05-01","progress":-3,"projectId":"p1"}"#,
        )
        .unwrap();
        let missing: Milestone =
            serde_json::from_str(r#"{"id":"m3","title":"GA","projectId":"p1"}"#).unwrap();

        assert_eq!(over.progress, 100);
        assert_eq!(under.progress, 0);
        assert_eq!(missing.progress, 0);
        assert_eq!(missing.description, "");
    }

    #[test]
    fn test_patch_carries_project_id() {
        let patch = MilestonePatch::for_project("p1").with_progress(55.4);
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, serde_json::json!({ "progress": 55, "projectId": "p1" }));
    }

    #[test]
    fn test_new_milestone_is_pending() {
        let body = serde_json::to_value(NewMilestone::new("p1", "Launch", "2024-09-01")).unwrap();
        assert_eq!(body["status"], "pending");
        assert_eq!(body["dueDate"], "2024-09-01");
    }
}
