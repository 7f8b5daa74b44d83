use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    #[default]
    Pending,
    Accepted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub id: String,
    pub project_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub status: InviteStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Entity for Invite {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of `POST /api/invites`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    pub project_id: String,
}

static EMAIL_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Loose `local@domain.tld` check used before sending an invite.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .as_ref()
        .is_some_and(|re| re.is_match(email.trim()))
}

impl InviteRequest {
    pub fn new(project_id: impl Into<String>, email: &str, name: &str) -> Self {
        let name = name.trim();
        Self {
            name: Some(name.to_string()).filter(|n| !n.is_empty()),
            email: email.trim().to_string(),
            project_id: project_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("  ada@example.co.uk "));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example@x.io"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_invite_request_trims_and_drops_blank_name() {
        let request = InviteRequest::new("p1", " bob@example.com ", "  ");
        assert_eq!(request.email, "bob@example.com");
        assert_eq!(request.name, None);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["projectId"], "p1");
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_invite_defaults_to_pending() {
        let invite: Invite =
            serde_json::from_str(r#"{"id":"i1","projectId":"p1","email":"a@b.io"}"#).unwrap();
        assert_eq!(invite.status, InviteStatus::Pending);
    }
}
