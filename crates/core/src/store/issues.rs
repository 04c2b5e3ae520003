//! Issue list slice: the working list plus board filter, sort and page state

use chrono_tz::Tz;
use ticketboard_domain::{
    BoardPage, FilterSpec, Issue, IssueId, PageLink, PageSpec, SortSpec,
};

use super::request::{RequestToken, RequestTracker};
use crate::board::{page_window, BoardEngine};

#[derive(Debug, Clone, PartialEq)]
pub enum IssuesAction {
    Loaded { token: RequestToken, issues: Vec<Issue> },
    LoadFailed { token: RequestToken, message: String },
    /// A create succeeded; newest issues go first
    IssueCreated(Issue),
    /// An edit or status change succeeded
    IssueUpdated(Issue),
    IssueRemoved(IssueId),
    /// A mutation failed; the list is left as it was
    MutationFailed(String),
    SetFilters(FilterSpec),
    SetSort(SortSpec),
    SetPage(usize),
    SetPageSize(usize),
    DismissError,
}

#[derive(Debug, Clone)]
pub struct IssuesState {
    pub issues: Vec<Issue>,
    pub filters: FilterSpec,
    pub sort: SortSpec,
    pub page: PageSpec,
    pub loading: bool,
    pub error: Option<String>,
    engine: BoardEngine,
    requests: RequestTracker<()>,
}

impl Default for IssuesState {
    fn default() -> Self {
        Self {
            issues: Vec::new(),
            filters: FilterSpec::default(),
            sort: SortSpec::default(),
            page: PageSpec::default(),
            loading: false,
            error: None,
            engine: BoardEngine::default(),
            requests: RequestTracker::new(),
        }
    }
}

impl IssuesState {
    pub fn new(tz: Tz, page_size: usize) -> Self {
        Self {
            engine: BoardEngine::with_timezone(tz),
            page: PageSpec::new(1, page_size),
            ..Self::default()
        }
    }

    /// Mark the list as loading and return the token its response must carry.
    pub fn begin_load(&mut self) -> RequestToken {
        self.loading = true;
        self.requests.begin(())
    }

    pub fn dispatch(&mut self, action: IssuesAction) {
        match action {
            IssuesAction::Loaded { token, issues } => {
                if self.requests.finish(&(), token) {
                    self.issues = issues;
                    self.loading = false;
                    self.error = None;
                }
            }
            IssuesAction::LoadFailed { token, message } => {
                if self.requests.finish(&(), token) {
                    self.loading = false;
                    self.error = Some(message);
                }
            }
            IssuesAction::IssueCreated(issue) => {
                self.issues.insert(0, issue);
                self.error = None;
            }
            IssuesAction::IssueUpdated(issue) => {
                if let Some(slot) = self.issues.iter_mut().find(|i| i.id == issue.id) {
                    *slot = issue;
                }
                self.error = None;
            }
            IssuesAction::IssueRemoved(id) => {
                self.issues.retain(|i| i.id != id);
                self.error = None;
            }
            IssuesAction::MutationFailed(message) => self.error = Some(message),
            IssuesAction::SetFilters(filters) => {
                self.filters = filters;
                self.page.page = 1;
            }
            IssuesAction::SetSort(sort) => self.sort = sort,
            IssuesAction::SetPage(page) => self.page.page = page.max(1),
            IssuesAction::SetPageSize(size) => {
                self.page.page_size = size.max(1);
                self.page.page = 1;
            }
            IssuesAction::DismissError => self.error = None,
        }
    }

    /// The current board page
    pub fn board(&self) -> BoardPage {
        self.engine.apply(&self.issues, &self.filters, self.sort, self.page)
    }

    /// Pagination control for the current board page
    pub fn page_links(&self) -> Vec<PageLink> {
        let board = self.board();
        page_window(board.page, board.total_pages)
    }

    pub fn find(&self, id: &IssueId) -> Option<&Issue> {
        self.issues.iter().find(|i| &i.id == id)
    }
}
