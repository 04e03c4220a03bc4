use time::{Duration, OffsetDateTime};

use super::undo::UndoSlot;
use crate::problems::{Problem, SortKey, Status};

pub const PAGE_SIZE: usize = 10;

/// Header counts, recomputed on every render rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub pending: usize,
    pub resolved: usize,
    /// Submissions in the 24 hours before `now`.
    pub recent: usize,
}

/// Keep a record when either field contains the term, case-insensitively.
pub fn filter_problems<'a>(problems: &'a [Problem], search: &str) -> Vec<&'a Problem> {
    let term = search.trim().to_lowercase();
    if term.is_empty() {
        return problems.iter().collect();
    }
    problems
        .iter()
        .filter(|p| {
            p.email.to_lowercase().contains(&term) || p.problem.to_lowercase().contains(&term)
        })
        .collect()
}

/// Must order exactly like the list endpoint; both sides key off the one
/// `SortKey` definition.
pub fn sort_problems(problems: &mut [&Problem], sort: SortKey) {
    match sort {
        SortKey::Newest => problems.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortKey::Oldest => problems.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        SortKey::Email => problems.sort_by(|a, b| a.email.cmp(&b.email)),
        SortKey::Status => problems.sort_by(|a, b| {
            status_rank(a.status)
                .cmp(&status_rank(b.status))
                .then(b.timestamp.cmp(&a.timestamp))
        }),
    }
}

fn status_rank(status: Status) -> u8 {
    match status {
        Status::Pending => 0,
        Status::Resolved => 1,
    }
}

/// State behind the dashboard list. The record array is the only mutable
/// client-side state; it is replaced wholesale after every mutation.
#[derive(Debug)]
pub struct ReviewState {
    problems: Vec<Problem>,
    search: String,
    sort: SortKey,
    page: usize,
    undo: Option<UndoSlot>,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewState {
    pub fn new() -> Self {
        Self {
            problems: Vec::new(),
            search: String::new(),
            sort: SortKey::Newest,
            page: 1,
            undo: None,
        }
    }

    /// Swap in a freshly fetched list; never patch the old one.
    pub fn replace(&mut self, problems: Vec<Problem>) {
        self.problems = problems;
        self.clamp_page();
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// A new term lands the view back on the first page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.page = 1;
        }
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        if sort != self.sort {
            self.sort = sort;
            self.page = 1;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.clamp_page();
    }

    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(PAGE_SIZE).max(1)
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.total_pages());
    }

    /// Filter and sort, the full result across all pages.
    pub fn filtered(&self) -> Vec<&Problem> {
        let mut filtered = filter_problems(&self.problems, &self.search);
        sort_problems(&mut filtered, self.sort);
        filtered
    }

    /// The whole pipeline: filter, sort, then the current page's slice.
    pub fn visible(&self) -> Vec<&Problem> {
        let start = (self.page - 1) * PAGE_SIZE;
        self.filtered()
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE)
            .collect()
    }

    pub fn stats(&self, now: OffsetDateTime) -> Stats {
        let day_ago = now - Duration::hours(24);
        Stats {
            total: self.problems.len(),
            pending: self
                .problems
                .iter()
                .filter(|p| p.status == Status::Pending)
                .count(),
            resolved: self
                .problems
                .iter()
                .filter(|p| p.status == Status::Resolved)
                .count(),
            recent: self.problems.iter().filter(|p| p.timestamp > day_ago).count(),
        }
    }

    /// Hold a just-deleted record so it can be offered back during the
    /// undo window.
    pub fn record_deleted(&mut self, problem: Problem) {
        self.undo = Some(UndoSlot::arm(problem));
    }

    pub fn undo_available(&self) -> bool {
        self.undo.as_ref().is_some_and(|slot| !slot.expired())
    }

    /// The deleted record, if the window is still open. Re-creating it
    /// goes through the normal submit path and yields a fresh id.
    pub fn take_undo(&mut self) -> Option<Problem> {
        self.undo.take().and_then(UndoSlot::take)
    }
}
