use crate::domain::models::{CommitId, Revision};
use std::collections::{HashMap, HashSet, VecDeque};

/// Lookup structures over one snapshot, built fresh for each query batch.
pub struct Navigation<'a> {
    revisions: &'a [Revision],
    by_id: HashMap<&'a CommitId, &'a Revision>,
    children: HashMap<&'a CommitId, Vec<&'a CommitId>>,
}

impl<'a> Navigation<'a> {
    #[must_use]
    pub fn new(revisions: &'a [Revision]) -> Self {
        let mut by_id = HashMap::with_capacity(revisions.len());
        let mut children: HashMap<&CommitId, Vec<&CommitId>> = HashMap::new();
        for rev in revisions {
            by_id.insert(&rev.commit_id, rev);
            for parent in &rev.parents {
                children.entry(parent).or_default().push(&rev.commit_id);
            }
        }
        Self {
            revisions,
            by_id,
            children,
        }
    }

    /// First bookmark found walking breadth-first from the working copy
    /// through parent edges. The working copy itself is distance zero.
    #[must_use]
    pub fn find_nearest_bookmark(&self) -> Option<&'a str> {
        let start = self.revisions.iter().find(|r| r.is_working_copy)?;

        let mut visited: HashSet<&CommitId> = HashSet::new();
        let mut queue: VecDeque<&CommitId> = VecDeque::from([&start.commit_id]);

        while let Some(id) = queue.pop_front() {
            if !visited.insert(id) {
                continue;
            }
            let Some(&rev) = self.by_id.get(id) else {
                continue;
            };
            if let Some(name) = rev.bookmarks.first() {
                return Some(name.as_str());
            }
            queue.extend(rev.parents.iter());
        }
        None
    }

    /// The revision an edit of `bookmark` should land on: walk toward the tip
    /// through the first present child until there are no children or that
    /// child carries some other bookmark.
    #[must_use]
    pub fn find_bookmark_edit_target(&self, bookmark: &str) -> Option<&'a Revision> {
        let mut current = self.revisions.iter().find(|r| r.has_bookmark(bookmark))?;
        let mut visited: HashSet<&CommitId> = HashSet::from([&current.commit_id]);

        loop {
            let Some(next) = self.first_present_child(&current.commit_id) else {
                return Some(current);
            };
            if next.bookmarks.iter().any(|b| b != bookmark) {
                return Some(current);
            }
            if !visited.insert(&next.commit_id) {
                return Some(current);
            }
            current = next;
        }
    }

    /// Child ids of `id`, in snapshot order.
    #[must_use]
    pub fn children_of(&self, id: &CommitId) -> &[&'a CommitId] {
        self.children.get(id).map_or(&[], Vec::as_slice)
    }

    fn first_present_child(&self, id: &CommitId) -> Option<&'a Revision> {
        self.children_of(id)
            .iter()
            .find_map(|child| self.by_id.get(child).copied())
    }
}

#[must_use]
pub fn find_nearest_bookmark(revisions: &[Revision]) -> Option<&str> {
    Navigation::new(revisions).find_nearest_bookmark()
}

#[must_use]
pub fn find_bookmark_edit_target<'a>(
    revisions: &'a [Revision],
    bookmark: &str,
) -> Option<&'a Revision> {
    Navigation::new(revisions).find_bookmark_edit_target(bookmark)
}
