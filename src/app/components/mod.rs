pub mod board;
pub mod button;
pub mod chat;
pub mod common;
pub mod delete_button;
pub mod dialogs;
pub mod milestone_card;
pub mod project_card;
pub mod sidebar;
pub mod task_card;
pub mod toast;

pub use board::{end_drag, start_drag, BoardColumn};
pub use button::{Button, ButtonVariant};
pub use chat::{ChatWindow, ThreadsSidebar};
pub use common::{EmptyState, ErrorMessage, LoadingText, PageHeader, ScopeNotice};
pub use delete_button::DeleteButton;
pub use dialogs::{
    MilestoneDialog, MilestoneForm, ProjectDialog, ProjectForm, TaskDialog, TaskForm,
};
pub use milestone_card::MilestoneCard;
pub use project_card::ProjectCard;
pub use sidebar::AppSidebar;
pub use task_card::TaskCard;
pub use toast::ToastViewport;
