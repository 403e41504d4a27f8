//! Work log command-line harness.
//!
//! # Responsibility
//! - Feed content into the core sync use-case and print what was written.
//! - Act as the chat-layer collaborator: topic tag filter and content
//!   resolution happen here, never in core.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use worklog_core::{
    default_log_level, init_logging, Column, SheetRow, SyncOutcome, WorkLogConfig, WorkLogService,
    HEADER_ROW,
};

mod intake;

const DEMO_MESSAGES: [&str; 5] = [
    "Ta: 热水器又坏, 现象相同, 原因可能也相同, 这次灯会一直亮",
    "To: 研究自动添加qq docs 内容的方法， 希望发送内容到某处即可每日自动添加当日内容到 qq docs",
    "发现 anyrouter 已不可用",
    "Ta: 另一个任务测试",
    "测试普通描述内容",
];

#[derive(Parser)]
#[command(name = "worklog")]
#[command(version)]
#[command(about = "Collect daily work notes into a dated sheet", long_about = None)]
struct Cli {
    /// Sheet database file (overrides WORKLOG_PATH)
    #[arg(long, global = true)]
    path: Option<PathBuf>,

    /// Working sheet name (overrides WORKLOG_SHEET)
    #[arg(long, global = true)]
    sheet: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync one content string into today's row
    Sync {
        content: String,
        /// Topic tag; when any is given, one must be `work`
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Day to file under, as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Sync chat message content given as JSON (string or {"txt": ...})
    Ingest {
        json: String,
        /// Topic tag; one must be `work`
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Print every row of the sheet
    Show,
    /// Sync the built-in sample messages, then print the sheet
    Demo,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let mut config = WorkLogConfig::from_env();
    if let Some(path) = cli.path {
        config.path = path;
    }
    if let Some(sheet) = cli.sheet {
        config.sheet = sheet;
    }
    let service = WorkLogService::new(config)?;

    match cli.command {
        Commands::Sync {
            content,
            tags,
            date,
        } => {
            if !intake::should_sync(&tags, false) {
                info!("event=intake module=cli status=skipped reason=no_work_tag");
                println!("skipped: no `work` tag");
                return Ok(());
            }
            let outcome = match date {
                Some(date) => service.sync(&content, date)?,
                None => service.sync_today(&content)?,
            };
            print_outcome(&outcome);
        }
        Commands::Ingest { json, tags } => {
            if !intake::should_sync(&tags, true) {
                info!("event=intake module=cli status=skipped reason=no_work_tag");
                println!("skipped: no `work` tag");
                return Ok(());
            }
            let value: serde_json::Value = serde_json::from_str(&json)?;
            let Some(content) = intake::resolve_content(&value) else {
                info!("event=intake module=cli status=skipped reason=empty_content");
                println!("skipped: empty content");
                return Ok(());
            };
            print_outcome(&service.sync_today(&content)?);
        }
        Commands::Show => {
            print_rows(&service.rows()?);
        }
        Commands::Demo => {
            for (idx, message) in DEMO_MESSAGES.iter().enumerate() {
                println!("Message {}: {}", idx + 1, message);
                match service.sync_today(message) {
                    Ok(outcome) => print_outcome(&outcome),
                    Err(err) => eprintln!("Error: {err}"),
                }
                println!();
            }
            print_rows(&service.rows()?);
        }
    }

    Ok(())
}

fn print_outcome(outcome: &SyncOutcome) {
    let action = if outcome.inserted { "inserted" } else { "updated" };
    println!(
        "{action} row {} column {}: {}",
        outcome.row, outcome.column, outcome.value
    );
}

fn print_rows(rows: &[SheetRow]) {
    let rule = "-".repeat(50);
    println!("{}", "=".repeat(50));
    for (idx, row) in rows.iter().enumerate() {
        if idx == HEADER_ROW {
            let labels: Vec<&str> = Column::ALL.iter().map(|column| row.get(*column)).collect();
            println!("Headers: {}", labels.join(" | "));
            println!("{rule}");
            continue;
        }
        println!("Row {idx}:");
        for column in Column::ALL {
            println!("  {}: {}", rows[HEADER_ROW].get(column), row.get(column));
        }
        println!();
    }
}
