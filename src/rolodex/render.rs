use crate::commands::{CmdMessage, CmdResult, MessageLevel};
use crate::dispatch::command_titles;
use crate::model::Contact;
use colored::Colorize;
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const HELP_CELL_WIDTH: usize = 20;
const MAX_CELL_WIDTH: usize = 30;
const HEADERS: [&str; 5] = ["Name", "Phone", "Email", "Birthday", "Notes"];

pub fn write_result<W: Write>(out: &mut W, result: &CmdResult) -> io::Result<()> {
    write_contacts(out, &result.listed_contacts)?;
    write_messages(out, &result.messages)
}

pub fn write_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        match message.level {
            MessageLevel::Info => writeln!(out, "{}", message.content.dimmed())?,
            MessageLevel::Success => writeln!(out, "{}", message.content.green())?,
            MessageLevel::Warning => writeln!(out, "{}", message.content.yellow())?,
            MessageLevel::Error => writeln!(out, "{}", message.content.red())?,
        }
    }
    Ok(())
}

/// Every command name, centered in a fixed-width cell.
pub fn write_help<W: Write>(out: &mut W) -> io::Result<()> {
    let line: Vec<String> = command_titles()
        .iter()
        .map(|title| format!("{:^width$}", title, width = HELP_CELL_WIDTH))
        .collect();
    writeln!(out, "{}", line.join(" "))
}

pub fn write_contacts<W: Write>(out: &mut W, contacts: &[Contact]) -> io::Result<()> {
    if contacts.is_empty() {
        return Ok(());
    }

    let rows: Vec<[String; 5]> = contacts
        .iter()
        .map(|c| {
            [
                c.name().to_string(),
                c.phone().to_string(),
                c.email().to_string(),
                c.birthday_text(),
                c.notes().unwrap_or("").replace('\n', " "),
            ]
            .map(|cell| truncate_to_width(&cell, MAX_CELL_WIDTH))
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }

    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| pad(h, *w))
        .collect();
    writeln!(out, "{}", header.join("  ").trim_end().bold())?;

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| pad(cell, *w))
            .collect();
        writeln!(out, "{}", cells.join("  ").trim_end())?;
    }
    Ok(())
}

fn pad(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
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
