//! Ticketboard - issue tracking dashboard in the terminal
//!
//! Main entry point for the `ticketboard` binary.

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use ticketboard_domain::{
    CommentId, CommentUpdate, Config, ExportFormat, FilterSpec, IssueId, IssueStatus, IssueUpdate,
    NewComment, NewIssue, Priority, SortDirection, SortField, SortSpec, StatusFilter, TrendKind,
    UploadFile,
};
use ticketboard_lib::utils::logging::init_logging;
use ticketboard_lib::{render, AppContext, BoardQuery};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ticketboard", version, about = "Issue tracking dashboard")]
struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Configuration file (JSON or TOML); defaults to env vars, then probing
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Status counters and the most recent issues
    Home,
    /// Filtered, sorted and paginated issue board
    Board(BoardArgs),
    /// Create an issue
    Create(CreateArgs),
    /// Move an issue to another status
    Status { id: String, status: IssueStatus },
    /// Edit fields of an issue
    Edit(EditArgs),
    /// Delete an issue
    Delete { id: String },
    /// Comment thread of an issue
    Comments { issue_id: String },
    /// Add a comment to an issue
    Comment(CommentArgs),
    /// Edit a comment
    EditComment(EditCommentArgs),
    /// Delete a comment
    DeleteComment { id: String },
    /// Monthly dashboard (defaults to the current month)
    Monthly(MonthArgs),
    /// Stored monthly summary
    Stored(MonthArgs),
    /// Annual report, optionally against a comparison year
    Annual {
        year: Option<i32>,
        #[arg(long)]
        compare: Option<i32>,
    },
    /// Monthly issue and resolution counts for a year
    Trend {
        year: Option<i32>,
        #[arg(long, default_value = "immediate")]
        kind: TrendKind,
    },
    /// Analytics recomputed from the full issue list
    Analytics { year: Option<i32> },
    /// Download the monthly report
    Export {
        #[arg(long, default_value = "excel")]
        format: ExportFormat,
        #[command(flatten)]
        month: MonthArgs,
        /// Target file or directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// Only print the download link
        #[arg(long)]
        url_only: bool,
    },
}

#[derive(Args)]
struct BoardArgs {
    /// Matches customer, description or assignee
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value = "all")]
    status: StatusFilter,
    #[arg(long)]
    from: Option<NaiveDate>,
    #[arg(long)]
    to: Option<NaiveDate>,
    #[arg(long)]
    source: Option<String>,
    #[arg(long = "type")]
    issue_type: Option<String>,
    #[arg(long, default_value = "created_at")]
    sort: SortField,
    #[arg(long, default_value = "desc")]
    direction: SortDirection,
    #[arg(long)]
    page: Option<usize>,
    #[arg(long)]
    page_size: Option<usize>,
}

#[derive(Args)]
struct CreateArgs {
    /// Customer name
    title: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    source: Option<String>,
    #[arg(long = "type")]
    issue_type: Option<String>,
    #[arg(long)]
    status: Option<IssueStatus>,
    #[arg(long)]
    priority: Option<Priority>,
    #[arg(long)]
    assignee: Option<String>,
}

#[derive(Args)]
struct EditArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    source: Option<String>,
    #[arg(long = "type")]
    issue_type: Option<String>,
    #[arg(long)]
    status: Option<IssueStatus>,
    #[arg(long)]
    priority: Option<Priority>,
    #[arg(long)]
    assignee: Option<String>,
}

#[derive(Args)]
struct CommentArgs {
    issue_id: String,
    content: String,
    #[arg(long)]
    author: Option<String>,
    /// File to attach; repeatable
    #[arg(long = "attach")]
    attachments: Vec<PathBuf>,
}

#[derive(Args)]
struct EditCommentArgs {
    issue_id: String,
    comment_id: String,
    content: String,
    /// Stored attachment path to remove; repeatable
    #[arg(long = "remove")]
    remove: Vec<String>,
    #[arg(long = "attach")]
    attachments: Vec<PathBuf>,
}

#[derive(Args)]
struct MonthArgs {
    #[arg(long)]
    year: Option<i32>,
    #[arg(long)]
    month: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be applied before the config loader reads the environment
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.logging);
    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "Could not load .env file"),
    }
    info!("Ticketboard starting...");

    let ctx = AppContext::new_with_config(config).context("failed to initialise application")?;
    run(&ctx, cli.json, cli.command).await
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => ticketboard_infra::config::load_from_file(Some(path.clone())),
        None => ticketboard_infra::config::load(),
    }
    .context("failed to load configuration")?;
    if let Some(base_url) = &cli.base_url {
        config.api.base_url.clone_from(base_url);
    }
    Ok(config)
}

async fn run(ctx: &AppContext, json: bool, command: Command) -> Result<()> {
    let tz = ctx.timezone;
    match command {
        Command::Home => {
            let home = ticketboard_lib::get_home(ctx).await.map_err(anyhow::Error::msg)?;
            emit(json, &home, |h| render::home(h, tz))
        }
        Command::Board(args) => {
            let query = BoardQuery {
                filters: FilterSpec {
                    search: args.search,
                    status: args.status,
                    date_from: args.from,
                    date_to: args.to,
                    source: args.source,
                    issue_type: args.issue_type,
                },
                sort: SortSpec::new(args.sort, args.direction),
                page: args.page,
                page_size: args.page_size,
            };
            let view = ticketboard_lib::get_board(ctx, query).await.map_err(anyhow::Error::msg)?;
            emit(json, &view, |v| render::board(v, tz))
        }
        Command::Create(args) => {
            let mut issue = NewIssue::new(args.title);
            issue.description = args.description;
            if let Some(source) = args.source {
                issue.source = source;
            }
            if let Some(issue_type) = args.issue_type {
                issue.issue_type = issue_type;
            }
            if let Some(status) = args.status {
                issue.status = status;
            }
            if args.priority.is_some() {
                issue.priority = args.priority;
            }
            issue.assigned_to = args.assignee;
            let created = ticketboard_lib::create_issue(ctx, issue).await.map_err(anyhow::Error::msg)?;
            emit(json, &created, |i| render::issue(i, tz))
        }
        Command::Status { id, status } => {
            let updated = ticketboard_lib::update_issue_status(ctx, IssueId::from(id), status)
                .await
                .map_err(anyhow::Error::msg)?;
            emit(json, &updated, |i| render::issue(i, tz))
        }
        Command::Edit(args) => {
            let update = IssueUpdate {
                title: args.title,
                description: args.description,
                source: args.source,
                issue_type: args.issue_type,
                status: args.status,
                priority: args.priority,
                assigned_to: args.assignee,
                ..IssueUpdate::default()
            };
            let updated = ticketboard_lib::update_issue(ctx, IssueId::from(args.id), update)
                .await
                .map_err(anyhow::Error::msg)?;
            emit(json, &updated, |i| render::issue(i, tz))
        }
        Command::Delete { id } => {
            ticketboard_lib::delete_issue(ctx, IssueId::from(id.as_str())).await.map_err(anyhow::Error::msg)?;
            emit(json, &serde_json::json!({ "deleted": id }), |_| format!("Issue {id} deleted."))
        }
        Command::Comments { issue_id } => {
            let thread = ticketboard_lib::list_comments(ctx, IssueId::from(issue_id))
                .await
                .map_err(anyhow::Error::msg)?;
            emit(json, &thread, |c| render::comments(c, tz))
        }
        Command::Comment(args) => {
            let mut comment = NewComment::new(IssueId::from(args.issue_id), args.content);
            if let Some(author) = args.author {
                comment.created_by = author;
            }
            for path in &args.attachments {
                comment = comment.with_attachment(read_upload(path).await?);
            }
            let created = ticketboard_lib::add_comment(ctx, comment).await.map_err(anyhow::Error::msg)?;
            emit(json, &created, |c| render::comments(std::slice::from_ref(c), tz))
        }
        Command::EditComment(args) => {
            let mut update = CommentUpdate::content(args.content);
            for path in args.remove {
                update = update.remove(path);
            }
            for path in &args.attachments {
                update = update.with_attachment(read_upload(path).await?);
            }
            let edited = ticketboard_lib::edit_comment(
                ctx,
                IssueId::from(args.issue_id),
                CommentId::from(args.comment_id),
                update,
            )
            .await
            .map_err(anyhow::Error::msg)?;
            emit(json, &edited, |c| render::comments(std::slice::from_ref(c), tz))
        }
        Command::DeleteComment { id } => {
            ticketboard_lib::delete_comment(ctx, CommentId::from(id.as_str()))
                .await
                .map_err(anyhow::Error::msg)?;
            emit(json, &serde_json::json!({ "deleted": id }), |_| format!("Comment {id} deleted."))
        }
        Command::Monthly(args) => {
            let (year, month) = resolve_month(ctx, &args);
            let dashboard = ticketboard_lib::get_monthly_dashboard(ctx, year, month)
                .await
                .map_err(anyhow::Error::msg)?;
            emit(json, &dashboard, render::monthly)
        }
        Command::Stored(args) => {
            let (year, month) = resolve_month(ctx, &args);
            let stored = ticketboard_lib::get_stored_summary(ctx, year, month)
                .await
                .map_err(anyhow::Error::msg)?;
            emit(json, &stored, |summary| match summary {
                Some(summary) => render::monthly_summary(summary),
                None => format!("No stored summary for {year:04}-{month:02}."),
            })
        }
        Command::Annual { year, compare } => {
            let year = year.unwrap_or_else(|| current_year(ctx));
            let report = ticketboard_lib::get_annual_report(ctx, year, compare)
                .await
                .map_err(anyhow::Error::msg)?;
            emit(json, &report, render::annual)
        }
        Command::Trend { year, kind } => {
            let year = year.unwrap_or_else(|| current_year(ctx));
            let report =
                ticketboard_lib::get_annual_trend(ctx, year, kind).await.map_err(anyhow::Error::msg)?;
            emit(json, &report, render::trend)
        }
        Command::Analytics { year } => {
            let report = ticketboard_lib::get_analytics(ctx, year).await.map_err(anyhow::Error::msg)?;
            emit(json, &report, |r| render::analytics(r, ctx.locale))
        }
        Command::Export { format, month, out, url_only } => {
            let (year, month) = resolve_month(ctx, &month);
            if url_only {
                let url = ticketboard_lib::export_url(ctx, format, year, month)
                    .await
                    .map_err(anyhow::Error::msg)?;
                return emit(json, &serde_json::json!({ "url": url }), |_| url.clone());
            }
            let written = ticketboard_lib::export_monthly_report(ctx, format, year, month, &out)
                .await
                .map_err(anyhow::Error::msg)?;
            emit(json, &serde_json::json!({ "path": written }), |_| {
                format!("Report written to {}", written.display())
            })
        }
    }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text(value));
    }
    Ok(())
}

async fn read_upload(path: &Path) -> Result<UploadFile> {
    let bytes =
        tokio::fs::read(path).await.with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} is not a file", path.display()))?;
    Ok(UploadFile::new(filename, bytes))
}

fn current_year(ctx: &AppContext) -> i32 {
    chrono::Utc::now().with_timezone(&ctx.timezone).year()
}

fn resolve_month(ctx: &AppContext, args: &MonthArgs) -> (i32, u32) {
    let today = chrono::Utc::now().with_timezone(&ctx.timezone);
    let month = args.month.unwrap_or_else(|| today.month());
    if args.month.is_some() && args.year.is_none() {
        warn!(month, "No year given; using the current year");
    }
    (args.year.unwrap_or_else(|| today.year()), month)
}
