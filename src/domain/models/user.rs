use serde::{Deserialize, Serialize};

use super::{Entity, Patch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    #[default]
    Offline,
}

/// Membership role, only present on teammate listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Leader,
    Member,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub status: PresenceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl User {
    /// Initials from the backend, otherwise the first letter of up to two name words.
    pub fn display_initials(&self) -> String {
        if let Some(initials) = self.initials.as_deref().filter(|i| !i.trim().is_empty()) {
            return initials.to_string();
        }

        let from_name: String = self
            .name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();

        if from_name.is_empty() {
            self.email
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_else(|| "?".to_string())
        } else {
            from_name
        }
    }

    pub fn is_leader(&self) -> bool {
        self.role == Some(MemberRole::Leader)
    }

    /// Identifier used as chat sender: the id, or the email when the id is blank
    pub fn sender_id(&self) -> &str {
        if self.id.is_empty() { &self.email } else { &self.id }
    }
}

/// Self-service edit of the signed-in user: display name and presence.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePatch {
    pub name: String,
    pub status: PresenceStatus,
}

impl ProfilePatch {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            status: user.status,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Name is required");
        }
        Ok(())
    }
}

impl Patch<User> for ProfilePatch {
    fn apply_to(&self, user: &mut User) {
        user.name = self.name.trim().to_string();
        user.status = self.status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, initials: Option<&str>) -> User {
        User {
            id: "u1".into(),
            name: name.into(),
            email: "ada@example.com".into(),
            status: PresenceStatus::Online,
            avatar: None,
            initials: initials.map(String::from),
            role: None,
        }
    }

    #[test]
    fn test_initials_derived_from_name() {
        assert_eq!(user("ada lovelace byron", None).display_initials(), "AL");
        assert_eq!(user("Grace", None).display_initials(), "G");
    }

    #[test]
    fn test_backend_initials_win() {
        assert_eq!(user("Ada Lovelace", Some("AdL")).display_initials(), "AdL");
    }

    #[test]
    fn test_initials_fall_back_to_email() {
        assert_eq!(user("  ", None).display_initials(), "A");
    }

    #[test]
    fn test_status_defaults_to_offline() {
        let user: User =
            serde_json::from_str(r#"{"id":"u2","name":"Bo","email":"bo@example.com","role":"leader"}"#)
                .unwrap();
        assert_eq!(user.status, PresenceStatus::Offline);
        assert!(user.is_leader());
    }

    #[test]
    fn test_profile_patch_keeps_other_fields() {
        let mut me = user("Ada", Some("AL"));
        let patch = ProfilePatch {
            name: "  Ada King ".into(),
            status: PresenceStatus::Offline,
        };

        patch.apply_to(&mut me);

        assert_eq!(me.name, "Ada King");
        assert_eq!(me.status, PresenceStatus::Offline);
        assert_eq!(me.email, "ada@example.com");
        assert_eq!(me.initials.as_deref(), Some("AL"));
    }

    #[test]
    fn test_profile_name_required() {
        let patch = ProfilePatch {
            name: "   ".into(),
            status: PresenceStatus::Online,
        };
        assert_eq!(patch.validate(), Err("Name is required"));
    }
}
