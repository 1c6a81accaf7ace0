//! Nerd Font code points used in the header and lists.

pub const REPO: &str = "\u{f401}";
pub const BOOKMARK: &str = "\u{f02e}";
pub const SEP_RIGHT: &str = "\u{e0b0}";
