pub mod bookmarks;
pub mod history;
pub mod navigation;
pub mod ui;
pub mod vcs;
