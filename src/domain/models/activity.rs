use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

/// Read-only activity log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub description: String,
    pub timestamp: String,
    pub user_id: String,
    pub project_id: String,
}

impl Entity for Activity {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Activity {
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }

    /// "March 4 at 09:15", or the raw timestamp when it does not parse
    pub fn display_time(&self) -> String {
        match self.occurred_at() {
            Some(at) => at.format("%B %-d at %H:%M").to_string(),
            None => self.timestamp.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(timestamp: &str) -> Activity {
        Activity {
            id: "act_1".into(),
            description: "created task: Docs".into(),
            timestamp: timestamp.into(),
            user_id: "u1".into(),
            project_id: "p1".into(),
        }
    }

    #[test]
    fn test_display_time_formats_rfc3339() {
        assert_eq!(activity("2024-03-04T09:15:00Z").display_time(), "March 4 at 09:15");
    }

    #[test]
    fn test_display_time_keeps_unparseable_value() {
        assert_eq!(activity("yesterday").display_time(), "yesterday");
    }
}
