//! # CLI Layer
//!
//! One possible UI client for readz. This is the only place that knows about
//! stdout/stderr, prompts, file paths chosen by the user, and exit codes.
//!
//! Every invocation loads the stored list, runs one operation, and if the
//! list changed writes it back right away. The `shell` command keeps the list
//! in memory instead and saves through a debounced [`SaveQueue`].
//!
//! [`SaveQueue`]: readz::persist::SaveQueue

use super::print::{
    print_chapter_detail, print_chapters, print_header, print_messages, print_warning,
};
use super::setup::{Cli, Commands};
use super::shell;
use clap::Parser;
use readz::api::{CmdResult, LoadSource, TrackerApi};
use readz::config::{ReadzConfig, CONFIG_KEYS};
use readz::error::{ReadzError, Result};
use readz::logging;
use readz::model::ChapterDraft;
use readz::store::fs::FileStore;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

const HOME_ENV: &str = "READZ_HOME";
pub(super) const RESET_PROMPT: &str =
    "Are you sure you want to reset all progress? This cannot be undone. [y/N] ";

pub(super) struct AppContext {
    pub api: TrackerApi<FileStore>,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(if cli.verbose { "debug" } else { "warn" })?;

    let data_dir = data_dir()?;
    debug!(path = %data_dir.display(), "using data directory");

    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(&data_dir, key.as_deref(), value.as_deref());
    }

    let config = ReadzConfig::load(&data_dir).unwrap_or_else(|err| {
        warn!(error = %err, "ignoring unreadable config, using defaults");
        ReadzConfig::default()
    });
    let mut ctx = init_context(&data_dir, config).await;

    match cli.command {
        Some(Commands::List { notes }) => handle_list(&ctx, notes),
        Some(Commands::Show { id }) => handle_show(&ctx, id),
        Some(Commands::Add {
            title,
            number,
            pages,
        }) => handle_add(&mut ctx, title, number, pages).await,
        Some(Commands::Done { ids }) => handle_done(&mut ctx, &ids).await,
        Some(Commands::Delete { ids }) => handle_delete(&mut ctx, &ids).await,
        Some(Commands::Edit { id }) => handle_edit(&mut ctx, id).await,
        Some(Commands::Notes { id, text }) => handle_notes(&mut ctx, id, text).await,
        Some(Commands::Reset { yes }) => handle_reset(&mut ctx, yes).await,
        Some(Commands::Export { output }) => handle_export(&mut ctx, output).await,
        Some(Commands::Import { path }) => handle_import(&mut ctx, &path).await,
        Some(Commands::Shell) => shell::run(&mut ctx).await,
        Some(Commands::Config { .. }) => Ok(()),
        None => handle_list(&ctx, false),
    }
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    directories::ProjectDirs::from("com", "readz", "readz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            ReadzError::Store(format!(
                "Could not determine a data directory; set {}",
                HOME_ENV
            ))
        })
}

async fn init_context(data_dir: &Path, config: ReadzConfig) -> AppContext {
    let store = FileStore::new(data_dir);
    let mut api = TrackerApi::new(Arc::new(store), config);

    let (source, result) = api.load().await;
    if source != LoadSource::Stored {
        print_messages(&result.messages);
    }

    AppContext { api }
}

/// Writes the list back if `result` changed it, and reports how that went.
async fn persist(ctx: &mut AppContext, result: &CmdResult) {
    if !result.changed {
        return;
    }
    let (_, saved) = ctx.api.save().await;
    print_messages(&saved.messages);
}

fn handle_list(ctx: &AppContext, notes: bool) -> Result<()> {
    print_header(ctx.api.progress());
    print_chapters(ctx.api.chapters(), notes);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: u64) -> Result<()> {
    let chapter = ctx.api.chapter(id)?;
    print_chapter_detail(chapter);
    Ok(())
}

async fn handle_add(
    ctx: &mut AppContext,
    title: String,
    number: Option<String>,
    pages: Option<String>,
) -> Result<()> {
    let draft = ChapterDraft::new(title)
        .with_number(number.unwrap_or_default())
        .with_pages(pages.unwrap_or_default());
    let result = ctx.api.add_chapter(draft);
    if let Some(added) = result.affected_chapters.first() {
        println!("Added chapter {} ({}): {}", added.number, added.id, added.title);
    }
    persist(ctx, &result).await;
    Ok(())
}

async fn handle_done(ctx: &mut AppContext, ids: &[u64]) -> Result<()> {
    let mut combined = CmdResult::unchanged();
    for &id in ids {
        let result = ctx.api.toggle_complete(id);
        match result.affected_chapters.first() {
            Some(ch) if ch.completed => println!("Completed: {}", ch.title),
            Some(ch) => println!("Reopened: {}", ch.title),
            None => print_warning(&format!("No chapter with id {}", id)),
        }
        combined.merge(result);
    }
    persist(ctx, &combined).await;

    let progress = ctx.api.progress();
    println!(
        "{}/{} chapters ({}%)",
        progress.completed, progress.total, progress.percent
    );
    Ok(())
}

async fn handle_delete(ctx: &mut AppContext, ids: &[u64]) -> Result<()> {
    let mut combined = CmdResult::unchanged();
    for &id in ids {
        let result = ctx.api.delete_chapter(id);
        match result.affected_chapters.first() {
            Some(ch) => println!("Chapter deleted ({}): {}", ch.id, ch.title),
            None => print_warning(&format!("No chapter with id {}", id)),
        }
        combined.merge(result);
    }
    persist(ctx, &combined).await;
    Ok(())
}

async fn handle_edit(ctx: &mut AppContext, id: u64) -> Result<()> {
    let result = ctx.api.toggle_edit(id);
    match result.affected_chapters.first() {
        Some(ch) if ch.editing => println!("Editing notes: {}", ch.title),
        Some(ch) => println!("Finished editing: {}", ch.title),
        None => print_warning(&format!("No chapter with id {}", id)),
    }
    persist(ctx, &result).await;
    Ok(())
}

async fn handle_notes(ctx: &mut AppContext, id: u64, text: String) -> Result<()> {
    let result = ctx.api.update_notes(id, text);
    match result.affected_chapters.first() {
        Some(ch) if ch.notes.is_empty() => println!("Notes cleared: {}", ch.title),
        Some(ch) => println!("Notes updated: {}", ch.title),
        None => print_warning(&format!("No chapter with id {}", id)),
    }
    persist(ctx, &result).await;
    Ok(())
}

async fn handle_reset(ctx: &mut AppContext, yes: bool) -> Result<()> {
    let confirmed = yes || confirm(RESET_PROMPT)?;
    let result = ctx.api.reset_all(confirmed);
    print_messages(&result.messages);
    persist(ctx, &result).await;
    Ok(())
}

async fn handle_export(ctx: &mut AppContext, output: Option<PathBuf>) -> Result<()> {
    let (snapshot, result) = ctx.api.export()?;

    match output {
        Some(path) if path.as_os_str() == "-" => {
            println!("{}", snapshot.contents);
        }
        output => {
            let path = output.unwrap_or_else(|| PathBuf::from(&snapshot.filename));
            write_export(&path, &snapshot.contents).await?;
            print_messages(&result.messages);
            println!("{}", path.display());
        }
    }
    Ok(())
}

pub(super) async fn write_export(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await?;
    Ok(())
}

async fn handle_import(ctx: &mut AppContext, path: &Path) -> Result<()> {
    // read fresh each time so re-importing the same file always applies it
    let contents = tokio::fs::read_to_string(path).await?;
    let result = ctx.api.import(&contents);
    print_messages(&result.messages);
    if result.changed {
        println!("{} chapters imported from {}", ctx.api.chapters().len(), path.display());
    }
    persist(ctx, &result).await;
    Ok(())
}

fn handle_config(data_dir: &Path, key: Option<&str>, value: Option<&str>) -> Result<()> {
    let mut config = ReadzConfig::load(data_dir)?;

    match (key, value) {
        (None, _) => {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, config.get(key)?);
            }
        }
        (Some(key), None) => println!("{} = {}", key, config.get(key)?),
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save(data_dir)?;
            println!("{} = {}", key, config.get(key)?);
        }
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(is_yes(&input))
}

pub(super) fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
