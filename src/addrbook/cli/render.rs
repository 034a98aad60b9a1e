use addrbook::api::{CmdMessage, ListedPerson, MessageLevel};
use addrbook::book::AddressBook;
use chrono::{DateTime, Utc};
use colored::Colorize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 28;
const PLACE_WIDTH: usize = 30;
const SELECTED_MARKER: &str = "›";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

pub(super) fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

/// One line per person: position, name, city/state/zip and phone.
/// Positions are shown 1-based.
pub(super) fn render_person_list(listed: &[ListedPerson], selected: Option<usize>) -> String {
    if listed.is_empty() {
        return "No one in the address book.\n".to_string();
    }

    let idx_width = listed
        .iter()
        .map(|lp| (lp.index + 1).to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for lp in listed {
        let p = &lp.person;
        let marker = if selected == Some(lp.index) {
            SELECTED_MARKER.yellow().to_string()
        } else {
            " ".to_string()
        };
        let idx = format!("{:>width$}.", lp.index + 1, width = idx_width);
        let name = pad_to_width(&p.full_name(), NAME_WIDTH);
        let place = pad_to_width(&place_line(p.city(), p.state(), p.zip()), PLACE_WIDTH);

        out.push_str(&format!(
            "{} {} {} {} {}\n",
            marker,
            idx.yellow(),
            name.bold(),
            place,
            p.phone().dimmed()
        ));
    }
    out
}

/// Every field of one person.
pub(super) fn render_person(lp: &ListedPerson) -> String {
    let p = &lp.person;
    let mut out = format!(
        "{} {}\n",
        format!("{}.", lp.index + 1).yellow(),
        p.full_name().bold()
    );
    out.push_str("--------------------------------\n");
    for (label, value) in [
        ("First Name", p.first_name()),
        ("Last Name", p.last_name()),
        ("Address", p.address()),
        ("City", p.city()),
        ("State", p.state()),
        ("ZIP", p.zip()),
        ("Phone", p.phone()),
    ] {
        let label = format!("{:<11}", format!("{}:", label));
        out.push_str(&format!("{} {}\n", label.dimmed(), value));
    }
    out
}

pub(super) fn render_status(book: &AddressBook) -> String {
    let mut out = format!("{}\n", book.title().bold());

    let file = book
        .file()
        .map(|f| f.display().to_string())
        .unwrap_or_else(|| "(not saved yet)".to_string());
    out.push_str(&format!("  file:    {}\n", file));
    out.push_str(&format!("  people:  {}\n", book.len()));

    let state = if book.is_dirty() {
        "unsaved changes".yellow()
    } else {
        "saved".green()
    };
    out.push_str(&format!("  state:   {}\n", state));

    if let Some(at) = book.last_saved() {
        out.push_str(&format!(
            "  saved:   {} ({})\n",
            format_time_ago(at),
            at.format("%Y-%m-%d %H:%M UTC").to_string().dimmed()
        ));
    }
    out
}

pub(super) fn render_text_list(lines: &[String], empty_message: &str) -> String {
    if lines.is_empty() {
        return format!("{}\n", empty_message);
    }
    lines.iter().map(|l| format!("{}\n", l)).collect()
}

fn place_line(city: &str, state: &str, zip: &str) -> String {
    let region = [state, zip]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    match (city.is_empty(), region.is_empty()) {
        (false, false) => format!("{}, {}", city, region),
        (false, true) => city.to_string(),
        _ => region,
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let text = truncate_to_width(s, width);
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
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

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
