//! Insertion-ordered issue collection, unique by identity key.

use std::collections::HashSet;

use super::Issue;

/// Collects issues, dropping any whose identity was already seen.
///
/// Owned by a single parse call; never shared between calls.
#[derive(Debug, Default)]
pub struct IssueSet {
    seen: HashSet<String>,
    issues: Vec<Issue>,
}

impl IssueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an issue. Returns false when an identical issue was already present.
    pub fn insert(&mut self, issue: Issue) -> bool {
        if !self.seen.insert(issue.identity_key()) {
            return false;
        }
        self.issues.push(issue);
        true
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn into_vec(self) -> Vec<Issue> {
        self.issues
    }
}

impl Extend<Issue> for IssueSet {
    fn extend<T: IntoIterator<Item = Issue>>(&mut self, iter: T) {
        for issue in iter {
            self.insert(issue);
        }
    }
}

impl FromIterator<Issue> for IssueSet {
    fn from_iter<T: IntoIterator<Item = Issue>>(iter: T) -> Self {
        let mut set = IssueSet::new();
        set.extend(iter);
        set
    }
}
