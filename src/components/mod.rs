pub mod diff_view;
pub mod footer;
pub mod header;
pub mod modals;
pub mod revision_graph;
pub mod welcome;
