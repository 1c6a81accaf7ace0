use crate::domain::models::{CommitId, Revision};

pub const VERTICAL: &str = "│";
pub const BLANK: &str = " ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphSymbol {
    WorkingCopy,
    Root,
    Revision,
}

impl GraphSymbol {
    #[must_use]
    pub fn for_revision(rev: &Revision) -> Self {
        if rev.is_working_copy {
            GraphSymbol::WorkingCopy
        } else if rev.is_root {
            GraphSymbol::Root
        } else {
            GraphSymbol::Revision
        }
    }

    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            GraphSymbol::WorkingCopy => "@",
            GraphSymbol::Root => "◆",
            GraphSymbol::Revision => "○",
        }
    }
}

/// Where one revision landed and what surrounds it on its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedRevision {
    pub column: usize,
    pub before: String,
    pub symbol: GraphSymbol,
    pub after: String,
}

impl PlacedRevision {
    #[must_use]
    pub fn line(&self) -> String {
        format!("{}{} {}", self.before, self.symbol.glyph(), self.after)
    }
}

/// Column assignment for one top-to-bottom rendering pass.
///
/// Each slot holds the id expected next in that column. Revisions must be
/// placed children first, in the order they are printed. Call [`reset`]
/// before rendering a different snapshot.
///
/// [`reset`]: GraphRenderer::reset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphRenderer {
    active_columns: Vec<Option<CommitId>>,
}

impl GraphRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.active_columns.clear();
    }

    #[must_use]
    pub fn active_columns(&self) -> &[Option<CommitId>] {
        &self.active_columns
    }

    pub fn place_revision(&mut self, rev: &Revision) -> PlacedRevision {
        let column = self.resolve_column(&rev.commit_id);

        let before = self.glyphs(0..column);
        let after = self.glyphs(column + 1..self.active_columns.len());
        let symbol = GraphSymbol::for_revision(rev);

        self.promote_parents(column, &rev.parents);
        self.compact();

        PlacedRevision {
            column,
            before,
            symbol,
            after,
        }
    }

    /// Spacer line between two revisions, without placing anything.
    #[must_use]
    pub fn connector_line(&self) -> String {
        self.glyphs(0..self.active_columns.len())
    }

    fn resolve_column(&self, id: &CommitId) -> usize {
        self.active_columns
            .iter()
            .position(|slot| slot.as_ref() == Some(id))
            .or_else(|| self.first_empty())
            .unwrap_or(self.active_columns.len())
    }

    fn first_empty(&self) -> Option<usize> {
        self.active_columns.iter().position(Option::is_none)
    }

    fn glyphs(&self, range: std::ops::Range<usize>) -> String {
        let mut out = String::new();
        for slot in range.filter_map(|i| self.active_columns.get(i)) {
            out.push_str(if slot.is_some() { VERTICAL } else { BLANK });
            out.push(' ');
        }
        out
    }

    fn promote_parents(&mut self, column: usize, parents: &[CommitId]) {
        if self.active_columns.len() <= column {
            self.active_columns.resize(column + 1, None);
        }
        self.active_columns[column] = None;

        let Some((first, rest)) = parents.split_first() else {
            return;
        };
        self.active_columns[column] = Some(first.clone());
        for parent in rest {
            match self.first_empty() {
                Some(idx) => self.active_columns[idx] = Some(parent.clone()),
                None => self.active_columns.push(Some(parent.clone())),
            }
        }
    }

    fn compact(&mut self) {
        while matches!(self.active_columns.last(), Some(None)) {
            self.active_columns.pop();
        }
    }
}

/// Single-column symbol and the connector drawn below it.
#[must_use]
pub fn simple_symbol(rev: &Revision, is_last: bool) -> (GraphSymbol, &'static str) {
    let connector = if is_last { BLANK } else { VERTICAL };
    (GraphSymbol::for_revision(rev), connector)
}
