pub mod activity;
pub mod chat;
pub mod dashboard;
pub mod login;
pub mod milestones;
pub mod profile;
pub mod projects;
pub mod signup;
pub mod teammates;

pub use activity::ActivityPage;
pub use chat::ChatPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use milestones::MilestonesPage;
pub use profile::ProfilePage;
pub use projects::ProjectsPage;
pub use signup::SignupPage;
pub use teammates::TeammatesPage;
