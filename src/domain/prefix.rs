//! Shortest distinguishing prefixes over a set of identifiers.
//!
//! The table is rebuilt from scratch for every working set; nothing is
//! updated incrementally. Lengths are counted in characters.

use ratatui::{style::Style, text::Span};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniquePrefixIndex {
    lengths: HashMap<String, usize>,
}

impl UniquePrefixIndex {
    /// Computes the minimal prefix length for every non-empty id.
    ///
    /// Each id is compared against every other id except equal strings. The
    /// length needed against one other id is its shared leading run plus one;
    /// the final length is the maximum of those, at least 1 and at most the
    /// id's own length. An id that is a prefix of another therefore gets its
    /// whole length without actually being unique.
    pub fn build<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<Vec<char>> = ids
            .into_iter()
            .map(|s| s.as_ref().chars().collect::<Vec<_>>())
            .filter(|chars| !chars.is_empty())
            .collect();

        let mut lengths = HashMap::with_capacity(ids.len());
        for id in &ids {
            let mut needed = 1;
            for other in &ids {
                if other == id {
                    continue;
                }
                needed = needed.max(shared_run(id, other) + 1);
            }
            let len = needed.min(id.len());
            lengths.insert(id.iter().collect::<String>(), len);
        }

        Self { lengths }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<usize> {
        self.lengths.get(id).copied()
    }

    /// Prefix length for `id`, or 1 when it was not part of the set.
    #[must_use]
    pub fn prefix_len(&self, id: &str) -> usize {
        self.get(id).unwrap_or(1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}

fn shared_run(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Splits `id` after `prefix_len` characters. A zero length counts as 1, and
/// a length at or past the end yields the whole id as head.
#[must_use]
pub fn split_prefix(id: &str, prefix_len: usize) -> (&str, &str) {
    let prefix_len = prefix_len.max(1);
    match id.char_indices().nth(prefix_len) {
        Some((idx, _)) => id.split_at(idx),
        None => (id, ""),
    }
}

/// Styles the distinguishing head of `id` with `head` and the rest with `tail`.
#[must_use]
pub fn format_with_prefix(
    id: &str,
    prefix_len: usize,
    head: Style,
    tail: Style,
) -> Vec<Span<'static>> {
    if id.is_empty() {
        return Vec::new();
    }
    let (prefix, rest) = split_prefix(id, prefix_len);
    let mut spans = vec![Span::styled(prefix.to_string(), head)];
    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), tail));
    }
    spans
}
