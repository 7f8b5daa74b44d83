// Domain models (backend entities as seen by the client)
// Pure Rust, no framework dependencies

pub mod activity;
pub mod auth;
pub mod chat;
pub mod invite;
pub mod milestone;
pub mod project;
pub mod task;
pub mod user;

pub use activity::Activity;
pub use auth::{AuthResponse, Credentials, SignupRequest};
pub use chat::{ChatThread, Message};
pub use invite::{is_valid_email, Invite, InviteRequest, InviteStatus};
pub use milestone::{Milestone, MilestonePatch, NewMilestone};
pub use project::{NewProject, Project, ProjectPatch, ProjectStatus};
pub use task::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
pub use user::{MemberRole, PresenceStatus, ProfilePatch, User};

/// Anything held in an id-unique client collection.
pub trait Entity: Clone + PartialEq {
    fn id(&self) -> &str;
}

/// A partial update that can be applied locally before the server confirms it.
pub trait Patch<T> {
    fn apply_to(&self, entity: &mut T);
}

/// Entities that live in one board column at a time.
pub trait Classified: Entity {
    type Status: Copy + PartialEq + std::fmt::Debug;

    fn status(&self) -> Self::Status;

    fn set_status(&mut self, status: Self::Status);
}
