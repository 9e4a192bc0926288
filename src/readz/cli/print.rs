use colored::Colorize;
use readz::api::{CmdMessage, MessageLevel};
use readz::model::{Chapter, Progress};
use readz::state::StatusMessage;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const PAGES_WIDTH: usize = 10;
const BAR_WIDTH: usize = 40;
const DONE_MARKER: &str = "✔";
const OPEN_MARKER: &str = "○";
const NOTES_MARKER: &str = "✎";

pub(super) const BOOK_TITLE: &str = "Power System Analysis & Design";
pub(super) const BOOK_EDITION: &str = "Sixth Edition";
pub(super) const BOOK_AUTHORS: &str =
    "J. Duncan Glover, Thomas J. Overbye, and Mulukutla S. Sarma";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        print_message(message.level, &message.content);
    }
}

pub(super) fn print_status(status: Option<&StatusMessage>) {
    if let Some(status) = status {
        print_message(status.level, &status.content);
    }
}

pub(super) fn print_warning(content: &str) {
    print_message(MessageLevel::Warning, content);
}

fn print_message(level: MessageLevel, content: &str) {
    match level {
        MessageLevel::Info => println!("{}", content.dimmed()),
        MessageLevel::Success => println!("{}", content.green()),
        MessageLevel::Warning => println!("{}", content.yellow()),
    }
}

pub(super) fn print_header(progress: Progress) {
    println!("{}", BOOK_TITLE.bold());
    println!("{}", format!("{} · {}", BOOK_EDITION, BOOK_AUTHORS).dimmed());
    println!();
    println!(
        "{} {}",
        progress_bar(progress).blue(),
        format!(
            "{}/{} chapters ({}%)",
            progress.completed, progress.total, progress.percent
        )
        .bold()
    );
    println!();
}

pub(super) fn progress_bar(progress: Progress) -> String {
    let filled = (progress.percent as usize * BAR_WIDTH + 50) / 100;
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH.saturating_sub(filled))
    )
}

pub(super) fn print_chapters(chapters: &[Chapter], with_notes: bool) {
    if chapters.is_empty() {
        println!("No chapters. Add one with `readz add`.");
        return;
    }

    for ch in chapters {
        println!("{}", chapter_line(ch));
        if with_notes && !ch.notes.is_empty() {
            for line in ch.notes.lines() {
                println!("        {}", line.dimmed());
            }
        }
    }
}

pub(super) fn print_chapter_detail(ch: &Chapter) {
    let heading = format!("Chapter {}: {}", ch.number, ch.title);
    if ch.completed {
        println!("{} {}", DONE_MARKER.green(), heading.dimmed().strikethrough());
    } else {
        println!("{} {}", OPEN_MARKER, heading.bold());
    }
    println!("  {} {}", "Pages:".dimmed(), ch.pages);
    println!("  {} {}", "Id:".dimmed(), ch.id);
    if ch.editing {
        println!("  {}", "(editing notes)".yellow());
    }
    println!("--------------------------------");
    if ch.notes.is_empty() {
        println!("{}", "No notes yet. Use `readz notes <id> <text>` to add some.".dimmed());
    } else {
        println!("{}", ch.notes);
    }
}

/// One fixed-width row: marker, id, "Chapter N: title", notes marker, pages.
fn chapter_line(ch: &Chapter) -> String {
    let marker = if ch.completed {
        DONE_MARKER.green()
    } else {
        OPEN_MARKER.normal()
    };
    let id_str = format!("{:>3}. ", ch.id);
    let notes_str = if ch.notes.is_empty() {
        "  ".to_string()
    } else {
        format!("{} ", NOTES_MARKER)
    };

    let fixed = 2 + id_str.width() + notes_str.width() + PAGES_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed);
    let heading = truncate_to_width(&format!("Chapter {}: {}", ch.number, ch.title), available);
    let padding = available.saturating_sub(heading.width());

    let heading = if ch.completed {
        heading.dimmed().strikethrough()
    } else {
        heading.normal()
    };

    format!(
        "{} {}{}{}{}{}",
        marker,
        id_str.yellow(),
        heading,
        " ".repeat(padding),
        notes_str.cyan(),
        format!("{:>width$}", ch.pages, width = PAGES_WIDTH).dimmed()
    )
}

pub(super) fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
