//! # Prompt Commands
//!
//! Parses one line typed at the chat prompt. Lines starting with `/` are
//! commands; everything else is a question for the bot.

use crate::app::ChatMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line, ignored
    Empty,
    Help,
    /// Switch between general and book-wise chat
    Mode(ChatMode),
    /// List available books
    Books,
    /// Select a book by name or by its number in `/books`
    Book(String),
    /// Start a new general conversation
    New,
    /// Reprint the active conversation
    History,
    WhoAmI,
    Logout,
    Quit,
    /// Question for the bot
    Ask(String),
    /// Malformed command, with a hint for the user
    Invalid(String),
}

pub const HELP: &str = "\
Commands:
  /mode general|book   switch chat mode
  /books               list available books
  /book <name|number>  select a book (switches to book mode)
  /new                 start a new general chat
  /history             show the current conversation
  /whoami              show the logged-in account
  /logout              log out
  /quit                exit
Anything else is sent as a question.";

pub fn parse(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    let Some(rest) = line.strip_prefix('/') else {
        return Command::Ask(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name.to_ascii_lowercase().as_str() {
        "help" | "h" | "?" => Command::Help,
        "mode" => match arg.to_ascii_lowercase().as_str() {
            "general" | "g" => Command::Mode(ChatMode::General),
            "book" | "books" | "bookwise" | "b" => Command::Mode(ChatMode::BookWise),
            _ => Command::Invalid("Usage: /mode general|book".to_string()),
        },
        "books" => Command::Books,
        "book" if arg.is_empty() => Command::Invalid("Usage: /book <name|number>".to_string()),
        "book" => Command::Book(arg.to_string()),
        "new" => Command::New,
        "history" => Command::History,
        "whoami" => Command::WhoAmI,
        "logout" => Command::Logout,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Invalid(format!("Unknown command '/{}', try /help", other)),
    }
}

/// Resolve what the user typed after `/book` against the known book list.
///
/// Accepts a 1-based index into `books` or a case-insensitive name. With an
/// empty list (listing failed) the input is taken as typed.
pub fn resolve_book(input: &str, books: &[String]) -> Option<String> {
    if books.is_empty() {
        return Some(input.to_string());
    }

    if let Ok(index) = input.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| books.get(i)).cloned();
    }

    books
        .iter()
        .find(|book| book.eq_ignore_ascii_case(input))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(parse("  What is love? "), Command::Ask("What is love?".to_string()));
        assert_eq!(parse(""), Command::Empty);
        assert_eq!(parse("   "), Command::Empty);
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse("/help"), Command::Help);
        assert_eq!(parse("/mode book"), Command::Mode(ChatMode::BookWise));
        assert_eq!(parse("/MODE General"), Command::Mode(ChatMode::General));
        assert_eq!(parse("/books"), Command::Books);
        assert_eq!(parse("/book Song of Songs"), Command::Book("Song of Songs".to_string()));
        assert_eq!(parse("/new"), Command::New);
        assert_eq!(parse("/logout"), Command::Logout);
        assert_eq!(parse("/exit"), Command::Quit);
    }

    #[test]
    fn test_invalid_commands() {
        assert!(matches!(parse("/mode"), Command::Invalid(_)));
        assert!(matches!(parse("/book"), Command::Invalid(_)));
        assert!(matches!(parse("/frobnicate"), Command::Invalid(_)));
    }

    #[test]
    fn test_resolve_book() {
        let books = vec!["Genesis".to_string(), "Exodus".to_string()];
        assert_eq!(resolve_book("2", &books).as_deref(), Some("Exodus"));
        assert_eq!(resolve_book("genesis", &books).as_deref(), Some("Genesis"));
        assert_eq!(resolve_book("0", &books), None);
        assert_eq!(resolve_book("3", &books), None);
        assert_eq!(resolve_book("Ruth", &books), None);
        assert_eq!(resolve_book("Ruth", &[]).as_deref(), Some("Ruth"));
    }
}
