//! Feed and dashboard queries over the issue collection.

use serde::{Deserialize, Serialize};
use std::slice;
use std::sync::Arc;

use crate::issue::{Issue, IssueKind, IssueStatus};

/// Criteria for [`IssueListing`]. Every criterion is optional.
///
/// Provided criteria combine with AND. The search term matches
/// case-insensitively against the description OR the address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    search: Option<String>,
    kind: Option<IssueKind>,
    status: Option<IssueStatus>,
}

impl IssueFilter {
    /// A filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl AsRef<str>) -> Self {
        self.search = Some(term.as_ref().to_lowercase());
        self
    }

    pub fn kind(mut self, kind: IssueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn status(mut self, status: IssueStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        if let Some(kind) = self.kind {
            if issue.kind != kind {
                return false;
            }
        }
        if let Some(status) = self.status {
            if issue.status != status {
                return false;
            }
        }
        match &self.search {
            Some(term) => {
                issue.description.to_lowercase().contains(term.as_str())
                    || issue.location.address.to_lowercase().contains(term.as_str())
            }
            None => true,
        }
    }
}

/// A filtered view over one snapshot of the collection.
///
/// Filtering happens lazily as the listing is iterated, and the listing can
/// be iterated any number of times. Mutations made to the store after the
/// listing was taken are not visible through it.
#[derive(Debug, Clone)]
pub struct IssueListing {
    snapshot: Arc<Vec<Issue>>,
    filter: IssueFilter,
}

impl IssueListing {
    pub fn new(snapshot: Arc<Vec<Issue>>, filter: IssueFilter) -> Self {
        Self { snapshot, filter }
    }

    /// Iterate matching issues in insertion order.
    pub fn iter(&self) -> ListingIter<'_> {
        ListingIter {
            inner: self.snapshot.iter(),
            filter: &self.filter,
        }
    }

    /// Number of matching issues. O(n).
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Clone the matching issues out of the snapshot.
    pub fn to_vec(&self) -> Vec<Issue> {
        self.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a IssueListing {
    type Item = &'a Issue;
    type IntoIter = ListingIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`IssueListing::iter`].
#[derive(Debug, Clone)]
pub struct ListingIter<'a> {
    inner: slice::Iter<'a, Issue>,
    filter: &'a IssueFilter,
}

impl<'a> Iterator for ListingIter<'a> {
    type Item = &'a Issue;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        self.inner.by_ref().find(|issue| filter.matches(issue))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Counters shown on the feed and the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub reported: usize,
    pub progress: usize,
    pub resolved: usize,
}

impl StatusCounts {
    pub fn tally<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Self {
        issues
            .into_iter()
            .fold(StatusCounts::default(), |mut counts, issue| {
                counts.total += 1;
                match issue.status {
                    IssueStatus::Reported => counts.reported += 1,
                    IssueStatus::Progress => counts.progress += 1,
                    IssueStatus::Resolved => counts.resolved += 1,
                }
                counts
            })
    }
}
