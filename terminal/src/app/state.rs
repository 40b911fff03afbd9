//! # Session State Types
//!
//! Credentials, messages, and the two conversation tables the session store
//! owns. All mutation goes through the table methods so the reconciliation
//! rules live in one place.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use shared::{AuthData, BotId};

/// Chat mode selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatMode {
    /// One shared conversation with the general bot
    #[default]
    General,
    /// One conversation per book
    BookWise,
}

impl ChatMode {
    pub fn title(&self) -> &'static str {
        match self {
            ChatMode::General => "General Chat",
            ChatMode::BookWise => "Book Wise Chat",
        }
    }
}

/// Where a message is sent: the general conversation or one book's
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    General,
    Book(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::General => f.write_str("general"),
            Scope::Book(name) => write!(f, "book:{}", name),
        }
    }
}

/// Session credentials returned by a successful login
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub user_id: String,
    pub email: String,
}

impl From<AuthData> for Credentials {
    fn from(data: AuthData) -> Self {
        Self {
            token: data.token,
            user_id: data.user_id,
            email: data.email,
        }
    }
}

// Keep the bearer token out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One conversational turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Append-only message history.
///
/// Messages only enter in user/assistant pairs, so the length is always even.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a question and its answer as one unit.
    pub fn push_exchange(&mut self, question: Message, answer: Message) {
        debug_assert_eq!(question.role, Role::User);
        debug_assert_eq!(answer.role, Role::Assistant);
        self.messages.reserve(2);
        self.messages.push(question);
        self.messages.push(answer);
    }
}

/// General-mode conversations, keyed by the server-assigned bot id.
///
/// The table holds at most one live conversation: the one under
/// `current_bot_id`. When the server hands out a new id, the history moves to
/// the new key and the old key stops resolving.
#[derive(Debug, Clone, Default)]
pub struct GeneralConversations {
    current_bot_id: BotId,
    conversations: HashMap<BotId, Conversation>,
}

impl GeneralConversations {
    pub fn current_bot_id(&self) -> &BotId {
        &self.current_bot_id
    }

    /// History under the current bot id.
    pub fn current(&self) -> Option<&Conversation> {
        self.conversations.get(&self.current_bot_id)
    }

    pub fn get(&self, bot_id: &BotId) -> Option<&Conversation> {
        self.conversations.get(bot_id)
    }

    pub fn contains(&self, bot_id: &BotId) -> bool {
        self.conversations.contains_key(bot_id)
    }

    /// Number of keys in the table.
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Adopt the bot id the server answered with.
    ///
    /// An unassigned or unchanged id leaves everything as is. A different id
    /// becomes current and the history under the old id is moved to it; if
    /// the old id had no history the new key starts empty (an existing entry
    /// under the new key is kept). Returns `true` when the id changed.
    pub fn reconcile(&mut self, new_bot_id: &BotId) -> bool {
        if new_bot_id.is_unassigned() || *new_bot_id == self.current_bot_id {
            return false;
        }

        let old_bot_id = std::mem::replace(&mut self.current_bot_id, new_bot_id.clone());
        match self.conversations.remove(&old_bot_id) {
            Some(history) => {
                self.conversations.insert(new_bot_id.clone(), history);
            }
            None => {
                self.conversations.entry(new_bot_id.clone()).or_default();
            }
        }

        tracing::debug!(old = %old_bot_id, new = %new_bot_id, "General bot id reassigned");
        true
    }

    /// Append an exchange to the conversation under the current bot id.
    pub fn record_exchange(&mut self, question: Message, answer: Message) {
        self.conversations
            .entry(self.current_bot_id.clone())
            .or_default()
            .push_exchange(question, answer);
    }

    /// Forget every conversation and the current bot id.
    pub fn clear(&mut self) {
        self.current_bot_id = BotId::unassigned();
        self.conversations.clear();
    }
}

/// One book's conversation and the bot id the server tracks it under
#[derive(Debug, Clone, Default)]
pub struct BookConversation {
    pub bot_id: BotId,
    pub conversation: Conversation,
}

/// Book-wise conversations, keyed by book name.
///
/// Each book carries its own bot id alongside its history; the table key
/// never changes when the server reassigns an id.
#[derive(Debug, Clone, Default)]
pub struct BookConversations {
    selected: Option<String>,
    books: HashMap<String, BookConversation>,
}

impl BookConversations {
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn get(&self, book: &str) -> Option<&BookConversation> {
        self.books.get(book)
    }

    pub fn bot_id(&self, book: &str) -> Option<&BotId> {
        self.books.get(book).map(|entry| &entry.bot_id)
    }

    /// Switch to `book`.
    ///
    /// Switching resets the target book to an empty conversation with an
    /// unassigned bot id, even when it was visited before. Re-selecting the
    /// book that is already selected is not a switch and changes nothing.
    /// Other books are never touched. Returns `true` when a switch happened.
    pub fn select(&mut self, book: &str) -> bool {
        if self.selected.as_deref() == Some(book) {
            return false;
        }
        self.selected = Some(book.to_string());
        self.books.insert(book.to_string(), BookConversation::default());
        true
    }

    /// Track the bot id the server answered with for `book`. An unassigned
    /// id keeps the current one.
    pub fn reconcile(&mut self, book: &str, new_bot_id: &BotId) -> bool {
        if new_bot_id.is_unassigned() {
            return false;
        }
        let entry = self.books.entry(book.to_string()).or_default();
        if entry.bot_id == *new_bot_id {
            return false;
        }
        tracing::debug!(book, old = %entry.bot_id, new = %new_bot_id, "Book bot id reassigned");
        entry.bot_id = new_bot_id.clone();
        true
    }

    pub fn record_exchange(&mut self, book: &str, question: Message, answer: Message) {
        self.books
            .entry(book.to_string())
            .or_default()
            .conversation
            .push_exchange(question, answer);
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.books.clear();
    }
}
