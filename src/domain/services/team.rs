//! Project team: one leader plus members, and who may remove whom.

use serde::Deserialize;

use crate::domain::models::User;
use crate::shared::errors::RemovalDenied;

/// Name shown for activity entries whose author is not on the team
pub const UNKNOWN_MEMBER: &str = "Someone";

/// The two shapes the teammates endpoint answers with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TeammatesResponse {
    Flat(Vec<User>),
    Grouped {
        #[serde(default)]
        leader: Option<User>,
        #[serde(default)]
        members: Vec<User>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub leader: Option<User>,
    pub members: Vec<User>,
}

impl From<TeammatesResponse> for Team {
    fn from(response: TeammatesResponse) -> Self {
        match response {
            TeammatesResponse::Flat(users) => Team::from_flat(users),
            TeammatesResponse::Grouped { leader, members } => Team::new(leader, members),
        }
    }
}

impl Team {
    /// Members never repeat the leader.
    pub fn new(leader: Option<User>, members: Vec<User>) -> Self {
        let members = match &leader {
            Some(leader) => members.into_iter().filter(|m| m.id != leader.id).collect(),
            None => members,
        };
        Self { leader, members }
    }

    /// First user whose role is leader leads; everyone else is a member.
    pub fn from_flat(users: Vec<User>) -> Self {
        let leader_index = users.iter().position(User::is_leader);
        let mut users = users;
        let leader = leader_index.map(|index| users.remove(index));
        Self::new(leader, users)
    }

    /// Leader first, then members in server order
    pub fn roster(&self) -> Vec<&User> {
        self.leader.iter().chain(self.members.iter()).collect()
    }

    pub fn len(&self) -> usize {
        self.leader.iter().count() + self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, user_id: &str) -> Option<&User> {
        self.roster().into_iter().find(|user| user.id == user_id)
    }

    pub fn is_leader(&self, user_id: &str) -> bool {
        self.leader.as_ref().is_some_and(|leader| leader.id == user_id)
    }

    pub fn display_name(&self, user_id: &str) -> String {
        self.find(user_id)
            .map(|user| user.name.clone())
            .unwrap_or_else(|| UNKNOWN_MEMBER.to_string())
    }

    /// The leader can remove anyone but themselves; a member can only leave.
    pub fn check_removal(&self, actor_id: &str, target_id: &str) -> Result<(), RemovalDenied> {
        let leader = self.leader.as_ref().ok_or(RemovalDenied::NoLeader)?;

        if target_id == leader.id {
            return Err(RemovalDenied::TargetIsLeader);
        }
        if actor_id != leader.id && actor_id != target_id {
            return Err(RemovalDenied::NotPermitted);
        }
        Ok(())
    }

    /// Apply a removal the server already accepted.
    pub fn remove_member(&mut self, user_id: &str) -> Option<User> {
        let index = self.members.iter().position(|m| m.id == user_id)?;
        Some(self.members.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{MemberRole, PresenceStatus};

    fn user(id: &str, role: Option<MemberRole>) -> User {
        User {
            id: id.into(),
            name: format!("User {}", id),
            email: format!("{}@example.com", id),
            status: PresenceStatus::Offline,
            avatar: None,
            initials: None,
            role,
        }
    }

    fn team() -> Team {
        Team::new(
            Some(user("lead", Some(MemberRole::Leader))),
            vec![user("ann", Some(MemberRole::Member)), user("bob", None)],
        )
    }

    #[test]
    fn test_grouped_response_normalizes() {
        let json = r#"{
            "leader": {"id": "lead", "name": "Lea", "email": "lea@example.com", "status": "online"},
            "members": [{"id": "ann", "name": "Ann", "email": "ann@example.com", "status": "offline"}]
        }"#;

        let team: Team = serde_json::from_str::<TeammatesResponse>(json).unwrap().into();

        assert_eq!(team.leader.as_ref().map(|u| u.id.as_str()), Some("lead"));
        assert_eq!(team.members.len(), 1);
    }

    #[test]
    fn test_flat_response_picks_first_leader() {
        let json = r#"[
            {"id": "ann", "name": "Ann", "email": "ann@example.com", "status": "online", "role": "member"},
            {"id": "lead", "name": "Lea", "email": "lea@example.com", "status": "online", "role": "leader"},
            {"id": "bob", "name": "Bob", "email": "bob@example.com", "status": "offline"}
        ]"#;

        let team: Team = serde_json::from_str::<TeammatesResponse>(json).unwrap().into();

        assert_eq!(team.leader.as_ref().map(|u| u.id.as_str()), Some("lead"));
        let ids: Vec<&str> = team.members.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["ann", "bob"]);
    }

    #[test]
    fn test_flat_response_without_leader() {
        let team = Team::from_flat(vec![user("ann", None)]);
        assert!(team.leader.is_none());
        assert_eq!(team.len(), 1);
    }

    #[test]
    fn test_leader_not_repeated_in_members() {
        let team = Team::new(Some(user("lead", None)), vec![user("lead", None), user("ann", None)]);
        assert_eq!(team.members.len(), 1);
        assert_eq!(team.roster()[0].id, "lead");
    }

    #[test]
    fn test_removal_policy() {
        let team = team();

        assert_eq!(team.check_removal("lead", "ann"), Ok(()));
        assert_eq!(team.check_removal("ann", "ann"), Ok(()));
        assert_eq!(team.check_removal("ann", "bob"), Err(RemovalDenied::NotPermitted));
        assert_eq!(team.check_removal("lead", "lead"), Err(RemovalDenied::TargetIsLeader));
        assert_eq!(team.check_removal("ann", "lead"), Err(RemovalDenied::TargetIsLeader));
        assert_eq!(
            Team::default().check_removal("ann", "ann"),
            Err(RemovalDenied::NoLeader)
        );
    }

    #[test]
    fn test_display_name_falls_back() {
        let team = team();
        assert_eq!(team.display_name("ann"), "User ann");
        assert_eq!(team.display_name("ghost"), UNKNOWN_MEMBER);
    }

    #[test]
    fn test_remove_member() {
        let mut team = team();
        assert_eq!(team.remove_member("bob").map(|u| u.id), Some("bob".to_string()));
        assert_eq!(team.remove_member("lead"), None);
        assert_eq!(team.len(), 2);
    }
}
