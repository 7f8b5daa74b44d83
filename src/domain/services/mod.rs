// Business logic services
// Framework-agnostic, 100% testable

pub mod chat_board;
pub mod team;

pub use chat_board::{resolve_sender, ChatBoard};
pub use team::{Team, TeammatesResponse, UNKNOWN_MEMBER};
