// Custom Dioxus hooks
pub mod use_app;
pub mod use_chat_board;
pub mod use_collection;
pub mod use_toasts;

pub use use_app::{use_api, use_app, use_app_provider, use_current_user, AppContext};
pub use use_chat_board::{use_chat_board, ChatBoardState};
pub use use_collection::use_project_scope;
pub use use_toasts::{report_api_error, use_toasts, Toaster};
