#[derive(Debug, Clone, PartialEq)]
pub struct HeaderState {
    pub repo_text: String,
    pub bookmark_text: String,
    pub wc_text: String,
    pub op_text: String,
}

impl Default for HeaderState {
    fn default() -> Self {
        Self {
            repo_text: " no repo ".to_string(),
            bookmark_text: " (no bookmark) ".to_string(),
            wc_text: " Loading... ".to_string(),
            op_text: " OP: ........ ".to_string(),
        }
    }
}
