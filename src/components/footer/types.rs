#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterItem {
    pub key: &'static str,
    pub desc: &'static str,
    pub highlighted: bool,
}

impl FooterItem {
    #[must_use]
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self {
            key,
            desc,
            highlighted: false,
        }
    }

    #[must_use]
    pub const fn highlighted(mut self, on: bool) -> Self {
        self.highlighted = on;
        self
    }

    /// Columns taken by the key and description pills.
    #[must_use]
    pub fn width(&self) -> usize {
        self.key.chars().count() + self.desc.chars().count() + 4
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterGroup {
    pub name: &'static str,
    pub items: Vec<FooterItem>,
}
