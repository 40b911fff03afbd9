//! # Message Rendering
//!
//! Plain-text formatting of conversation turns for the terminal.

use chrono::Local;

use crate::app::{Message, Role, Scope};

fn label(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "bot",
    }
}

/// `[HH:MM] you: text`, continuation lines indented under the text
pub fn message(msg: &Message) -> String {
    let prefix = format!(
        "[{}] {}: ",
        msg.sent_at.with_timezone(&Local).format("%H:%M"),
        label(msg.role)
    );
    let indent = " ".repeat(prefix.chars().count());

    let mut out = prefix;
    for (i, line) in msg.content.lines().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    out
}

pub fn history(scope: &Scope, messages: &[Message]) -> String {
    if messages.is_empty() {
        return format!("(no messages in {} yet)", scope);
    }
    messages.iter().map(message).collect::<Vec<_>>().join("\n")
}

pub fn book_list(books: &[String], selected: Option<&str>) -> String {
    if books.is_empty() {
        return "No books available.".to_string();
    }
    books
        .iter()
        .enumerate()
        .map(|(i, book)| {
            let marker = if Some(book.as_str()) == selected { "*" } else { " " };
            format!("{} {:>3}. {}", marker, i + 1, book)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt shown before each input line
pub fn prompt(scope: Option<&Scope>) -> String {
    match scope {
        Some(Scope::General) => "general> ".to_string(),
        Some(Scope::Book(book)) => format!("{}> ", book),
        None => "book (none selected)> ".to_string(),
    }
}
