//! Interactive session. The chapter list stays in memory between commands and
//! every change is handed to a [`SaveQueue`], so a burst of edits becomes one
//! write. Pending writes are flushed on `quit` or end of input.

use super::commands::{is_yes, write_export, AppContext, RESET_PROMPT};
use super::print::{
    print_chapter_detail, print_chapters, print_header, print_messages, print_status,
    print_warning,
};
use readz::api::CmdResult;
use readz::error::Result;
use readz::persist::SaveQueue;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

const HELP: &str = "\
Commands:
  list [notes]            Show chapters and progress
  show <id>               Show one chapter with its notes
  done <id>               Toggle completion
  delete <id>             Delete a chapter
  edit <id>               Toggle notes edit mode
  notes <id> <text...>    Replace notes (no text clears them)
  draft [clear]           Show or clear the new-chapter draft
  draft <field> <value>   Set number, title or pages of the draft
  add [title...]          Add the draft as a new chapter
  export [path]           Write a JSON backup
  import <path>           Replace progress with a JSON backup
  reset                   Reset to the default chapters
  status                  Show the current status message
  help                    Show this help
  quit                    Save pending changes and exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DraftField {
    Number,
    Title,
    Pages,
}

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Empty,
    List { notes: bool },
    Show(u64),
    Done(u64),
    Delete(u64),
    Edit(u64),
    Notes(u64, String),
    ShowDraft,
    ClearDraft,
    SetDraft(DraftField, String),
    Add(Option<String>),
    Export(Option<PathBuf>),
    Import(PathBuf),
    Reset,
    Status,
    Help,
    Quit,
}

fn parse(line: &str) -> std::result::Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let cmd = match word {
        "" => ShellCommand::Empty,
        "list" | "ls" => ShellCommand::List {
            notes: rest == "notes",
        },
        "show" | "v" => ShellCommand::Show(parse_id(rest)?),
        "done" | "d" => ShellCommand::Done(parse_id(rest)?),
        "delete" | "rm" => ShellCommand::Delete(parse_id(rest)?),
        "edit" | "e" => ShellCommand::Edit(parse_id(rest)?),
        "notes" => {
            let (id, text) = match rest.split_once(char::is_whitespace) {
                Some((id, text)) => (id, text.trim()),
                None => (rest, ""),
            };
            ShellCommand::Notes(parse_id(id)?, text.to_string())
        }
        "draft" => parse_draft(rest)?,
        "add" | "n" => ShellCommand::Add((!rest.is_empty()).then(|| rest.to_string())),
        "export" => ShellCommand::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "import" if !rest.is_empty() => ShellCommand::Import(PathBuf::from(rest)),
        "import" => return Err("Usage: import <path>".to_string()),
        "reset" => ShellCommand::Reset,
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command: {} (try `help`)", other)),
    };
    Ok(cmd)
}

fn parse_id(s: &str) -> std::result::Result<u64, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("Expected a chapter id, got {:?}", s))
}

fn parse_draft(rest: &str) -> std::result::Result<ShellCommand, String> {
    if rest.is_empty() {
        return Ok(ShellCommand::ShowDraft);
    }
    if rest == "clear" {
        return Ok(ShellCommand::ClearDraft);
    }
    let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let field = match field {
        "number" => DraftField::Number,
        "title" => DraftField::Title,
        "pages" => DraftField::Pages,
        other => return Err(format!("Unknown draft field: {}", other)),
    };
    Ok(ShellCommand::SetDraft(field, value.trim().to_string()))
}

pub(super) async fn run(ctx: &mut AppContext) -> Result<()> {
    let config = ctx.api.config();
    let mut queue = SaveQueue::spawn(
        ctx.api.store(),
        config.storage_key.clone(),
        config.save_debounce(),
    );
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("readz shell, `help` for commands");
    loop {
        show_reports(ctx, &mut queue);
        print!("readz> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let cmd = match parse(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(cmd) => cmd,
            Err(msg) => {
                print_warning(&msg);
                continue;
            }
        };

        match execute(ctx, cmd, &mut lines).await {
            Ok(result) if result.changed => {
                if let Some(snapshot) = ctx.api.pending_snapshot() {
                    queue.submit(snapshot);
                }
            }
            Ok(_) => {}
            Err(err) => print_warning(&err.to_string()),
        }
    }

    for report in queue.flush().await {
        ctx.api.post(&report.result);
        print_messages(&report.result.messages);
    }
    Ok(())
}

fn show_reports(ctx: &mut AppContext, queue: &mut SaveQueue) {
    for report in queue.drain_reports() {
        ctx.api.post(&report.result);
        print_messages(&report.result.messages);
    }
}

async fn execute<R>(
    ctx: &mut AppContext,
    cmd: ShellCommand,
    lines: &mut Lines<R>,
) -> Result<CmdResult>
where
    R: AsyncBufRead + Unpin,
{
    let api = &mut ctx.api;
    let result = match cmd {
        ShellCommand::Empty | ShellCommand::Quit => CmdResult::unchanged(),
        ShellCommand::Help => {
            println!("{}", HELP);
            CmdResult::unchanged()
        }
        ShellCommand::Status => {
            print_status(api.status());
            CmdResult::unchanged()
        }
        ShellCommand::List { notes } => {
            print_header(api.progress());
            print_chapters(api.chapters(), notes);
            CmdResult::unchanged()
        }
        ShellCommand::Show(id) => {
            print_chapter_detail(api.chapter(id)?);
            CmdResult::unchanged()
        }
        ShellCommand::Done(id) => {
            let result = api.toggle_complete(id);
            report_missing(&result, id);
            let p = api.progress();
            println!("{}/{} chapters ({}%)", p.completed, p.total, p.percent);
            result
        }
        ShellCommand::Delete(id) => {
            let result = api.delete_chapter(id);
            report_missing(&result, id);
            result
        }
        ShellCommand::Edit(id) => {
            let result = api.toggle_edit(id);
            report_missing(&result, id);
            result
        }
        ShellCommand::Notes(id, text) => {
            let result = api.update_notes(id, text);
            report_missing(&result, id);
            result
        }
        ShellCommand::ShowDraft => {
            let draft = api.draft();
            println!("number: {}", draft.number);
            println!("title:  {}", draft.title);
            println!("pages:  {}", draft.pages);
            CmdResult::unchanged()
        }
        ShellCommand::ClearDraft => {
            api.draft_mut().clear();
            CmdResult::unchanged()
        }
        ShellCommand::SetDraft(field, value) => {
            let draft = api.draft_mut();
            match field {
                DraftField::Number => draft.number = value,
                DraftField::Title => draft.title = value,
                DraftField::Pages => draft.pages = value,
            }
            CmdResult::unchanged()
        }
        ShellCommand::Add(title) => {
            if let Some(title) = title {
                api.draft_mut().title = title;
            }
            let result = api.add_from_draft();
            if let Some(added) = result.affected_chapters.first() {
                println!("Added chapter {} ({}): {}", added.number, added.id, added.title);
            }
            result
        }
        ShellCommand::Export(path) => {
            let (snapshot, result) = api.export()?;
            let path = path.unwrap_or_else(|| PathBuf::from(&snapshot.filename));
            write_export(&path, &snapshot.contents).await?;
            print_messages(&result.messages);
            println!("{}", path.display());
            result
        }
        ShellCommand::Import(path) => {
            let contents = tokio::fs::read_to_string(&path).await?;
            let result = api.import(&contents);
            print_messages(&result.messages);
            result
        }
        ShellCommand::Reset => {
            print!("{}", RESET_PROMPT);
            std::io::stdout().flush()?;
            let answer = lines.next_line().await?.unwrap_or_default();
            let result = api.reset_all(is_yes(&answer));
            print_messages(&result.messages);
            result
        }
    };
    Ok(result)
}

fn report_missing(result: &CmdResult, id: u64) {
    if result.affected_chapters.is_empty() {
        print_warning(&format!("No chapter with id {}", id));
    }
}
