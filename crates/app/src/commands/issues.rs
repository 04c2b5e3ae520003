//! Home page, issue board and issue mutations

use serde::Serialize;
use ticketboard_core::issues::HomeSnapshot;
use ticketboard_core::store::IssuesAction;
use ticketboard_domain::{
    BoardPage, FilterSpec, Issue, IssueId, IssueStatus, IssueUpdate, NewIssue, PageLink, Result,
    SortSpec, TicketboardError,
};
use tracing::info;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Board request
///
/// An unset `page` keeps the current board position unless the filters or
/// the page size changed, which go back to page 1.
#[derive(Debug, Clone, Default)]
pub struct BoardQuery {
    pub filters: FilterSpec,
    pub sort: SortSpec,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// One board page plus its pagination control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub board: BoardPage,
    pub links: Vec<PageLink>,
}

/// Status counters and the newest issues
pub async fn get_home(ctx: &AppContext) -> std::result::Result<HomeSnapshot, String> {
    execute_command(ctx, "issues::get_home", || ctx.issues.home()).await
}

/// Reload the issue list and return the requested board page
pub async fn get_board(ctx: &AppContext, query: BoardQuery) -> std::result::Result<BoardView, String> {
    execute_command(ctx, "issues::get_board", || async {
        reload_issues(ctx).await?;

        let mut state = ctx.issue_board.lock().await;
        if state.filters != query.filters {
            state.dispatch(IssuesAction::SetFilters(query.filters));
        }
        state.dispatch(IssuesAction::SetSort(query.sort));
        if let Some(size) = query.page_size.filter(|size| *size != state.page.page_size) {
            state.dispatch(IssuesAction::SetPageSize(size));
        }
        if let Some(page) = query.page {
            state.dispatch(IssuesAction::SetPage(page));
        }

        let board = state.board();
        info!(
            matched = board.total_matched,
            page = board.page,
            total_pages = board.total_pages,
            "Board page computed"
        );
        Ok(BoardView { links: state.page_links(), board })
    })
    .await
}

pub async fn create_issue(ctx: &AppContext, issue: NewIssue) -> std::result::Result<Issue, String> {
    execute_command(ctx, "issues::create_issue", || async {
        let result = ctx.issues.create(issue).await;
        record_mutation(ctx, result, IssuesAction::IssueCreated).await
    })
    .await
}

pub async fn update_issue_status(
    ctx: &AppContext,
    id: IssueId,
    status: IssueStatus,
) -> std::result::Result<Issue, String> {
    execute_command(ctx, "issues::update_issue_status", || async {
        let current = current_issue(ctx, &id).await?;
        let result = ctx.issues.update_status(&current, status).await;
        record_mutation(ctx, result, IssuesAction::IssueUpdated).await
    })
    .await
}

/// Quick or full edit of one issue
pub async fn update_issue(
    ctx: &AppContext,
    id: IssueId,
    update: IssueUpdate,
) -> std::result::Result<Issue, String> {
    execute_command(ctx, "issues::update_issue", || async {
        let current = current_issue(ctx, &id).await?;
        let result = ctx.issues.update(&current, update).await;
        record_mutation(ctx, result, IssuesAction::IssueUpdated).await
    })
    .await
}

pub async fn delete_issue(ctx: &AppContext, id: IssueId) -> std::result::Result<(), String> {
    execute_command(ctx, "issues::delete_issue", || async {
        let result = ctx.issues.delete(&id).await.map(|()| id.clone());
        record_mutation(ctx, result, IssuesAction::IssueRemoved).await.map(|_| ())
    })
    .await
}

/// Load every issue into the board slice, dropping the response if a newer
/// load started meanwhile.
async fn reload_issues(ctx: &AppContext) -> Result<()> {
    let token = ctx.issue_board.lock().await.begin_load();
    let result = ctx.issues.list().await;

    let mut state = ctx.issue_board.lock().await;
    match result {
        Ok(issues) => {
            state.dispatch(IssuesAction::Loaded { token, issues });
            Ok(())
        }
        Err(err) => {
            state.dispatch(IssuesAction::LoadFailed { token, message: err.user_message(ctx.locale) });
            Err(err)
        }
    }
}

/// The issue as the board last saw it, loading the list when it is unknown
async fn current_issue(ctx: &AppContext, id: &IssueId) -> Result<Issue> {
    if let Some(issue) = ctx.issue_board.lock().await.find(id).cloned() {
        return Ok(issue);
    }
    reload_issues(ctx).await?;
    ctx.issue_board
        .lock()
        .await
        .find(id)
        .cloned()
        .ok_or_else(|| TicketboardError::NotFound(format!("issue {id}")))
}

/// Patch the board only after the backend accepted the mutation
async fn record_mutation<T: Clone>(
    ctx: &AppContext,
    result: Result<T>,
    action: fn(T) -> IssuesAction,
) -> Result<T> {
    let mut state = ctx.issue_board.lock().await;
    match result {
        Ok(value) => {
            state.dispatch(action(value.clone()));
            Ok(value)
        }
        Err(err) => {
            state.dispatch(IssuesAction::MutationFailed(err.user_message(ctx.locale)));
            Err(err)
        }
    }
}
