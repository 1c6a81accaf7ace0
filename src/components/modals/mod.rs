mod bookmarks;
mod error;
mod help;
pub mod helpers;
mod manager;
mod operation_log;
mod text_input;
mod workspaces;

pub use bookmarks::BookmarkPickerModal;
pub use error::ErrorModal;
pub use help::{HelpModal, HELP_SECTIONS};
pub use manager::ModalManager;
pub use operation_log::OperationLogModal;
pub use text_input::TextInputModal;
pub use workspaces::WorkspacesModal;
