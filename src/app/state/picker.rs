/// What confirming a bookmark in the picker does.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PickerPurpose {
    /// Jump to the bookmark's edit target and `jj edit` it.
    Edit,
    /// `jj bookmark delete` the chosen name.
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkPickerState {
    pub names: Vec<String>,
    pub selected: usize,
    pub purpose: PickerPurpose,
}

impl BookmarkPickerState {
    #[must_use]
    pub fn new(names: Vec<String>, purpose: PickerPurpose) -> Self {
        Self {
            names,
            selected: 0,
            purpose,
        }
    }

    pub fn next(&mut self) {
        if !self.names.is_empty() {
            self.selected = (self.selected + 1) % self.names.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.names.is_empty() {
            self.selected = (self.selected + self.names.len() - 1) % self.names.len();
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.names.get(self.selected).map(String::as_str)
    }
}
