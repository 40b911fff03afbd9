//! # Interactive Prompt
//!
//! Line-oriented front-end over a [`SessionStore`]. Generic over its input
//! and output so tests can drive it with in-memory buffers.
//!
//! ```text
//! Login ──ok──▶ Chat prompt ──/logout or session expired──▶ Login
//!   │                │
//!   └──EOF──▶ exit ◀─┴──/quit or EOF
//! ```

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use super::commands::{self, Command};
use super::{password, render};
use crate::app::{ChatMode, Scope, SessionStore};
use crate::core::AppError;
use crate::utils::validation::{validate_email, validate_password, validate_question};

pub struct Repl<R, W> {
    store: SessionStore,
    input: Lines<R>,
    out: W,
    mode: ChatMode,
    hide_password: bool,
}

impl<R, W> Repl<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(store: SessionStore, input: R, out: W) -> Self {
        Self {
            store,
            input: input.lines(),
            out,
            mode: ChatMode::default(),
            hide_password: false,
        }
    }

    /// Read the login password from the controlling terminal without echo.
    ///
    /// Only meaningful when the input is an interactive terminal; piped input
    /// is read line by line like everything else.
    pub fn hide_password_input(mut self, hide: bool) -> Self {
        self.hide_password = hide;
        self
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn into_parts(self) -> (SessionStore, W) {
        (self.store, self.out)
    }

    /// Run until `/quit` or end of input.
    pub async fn run(&mut self) -> std::io::Result<()> {
        loop {
            if !self.store.is_authenticated() {
                if !self.login_screen().await? {
                    return Ok(());
                }
                continue;
            }

            let scope = self.active_scope();
            self.write_prompt(&render::prompt(scope.as_ref()))?;
            let Some(line) = self.input.next_line().await? else {
                writeln!(self.out)?;
                return Ok(());
            };

            if !self.handle(commands::parse(&line), scope).await? {
                return Ok(());
            }
        }
    }

    /// One login attempt. Returns `false` when input ended.
    async fn login_screen(&mut self) -> std::io::Result<bool> {
        writeln!(self.out, "== BookChat Login ==")?;

        self.write_prompt("Email: ")?;
        let Some(email) = self.input.next_line().await? else {
            return Ok(false);
        };
        self.write_prompt("Password: ")?;
        let Some(password) = self.read_password().await? else {
            return Ok(false);
        };

        let email = email.trim();
        for check in [validate_email(email), validate_password(&password)] {
            if let Some(error) = check.error {
                writeln!(self.out, "{}", error)?;
                return Ok(true);
            }
        }

        match self.store.login(email, &password).await {
            Ok(()) => {
                let who = self
                    .store
                    .credentials()
                    .map(|c| c.email.clone())
                    .unwrap_or_default();
                writeln!(self.out, "Welcome, {}", who)?;
                writeln!(self.out, "Mode: {} (type /help for commands)", self.mode.title())?;
            }
            Err(err) => {
                tracing::debug!(error = %err, "Login attempt failed");
                writeln!(self.out, "{}: {}", err.user_message(), err)?;
            }
        }
        Ok(true)
    }

    /// Scope questions go to right now. `None` in book mode without a book.
    fn active_scope(&self) -> Option<Scope> {
        match self.mode {
            ChatMode::General => Some(Scope::General),
            ChatMode::BookWise => self
                .store
                .selected_book()
                .map(|book| Scope::Book(book.to_string())),
        }
    }

    /// Returns `false` to stop the loop.
    async fn handle(&mut self, command: Command, scope: Option<Scope>) -> std::io::Result<bool> {
        match command {
            Command::Empty => {}
            Command::Help => writeln!(self.out, "{}", commands::HELP)?,
            Command::Invalid(hint) => writeln!(self.out, "{}", hint)?,
            Command::Quit => return Ok(false),
            Command::Mode(mode) => {
                self.mode = mode;
                writeln!(self.out, "Mode: {}", mode.title())?;
                if mode == ChatMode::BookWise && self.store.selected_book().is_none() {
                    writeln!(self.out, "Pick a book with /book <name|number> (see /books)")?;
                }
            }
            Command::Books => {
                let books = self.store.list_books().await;
                if self.session_ended()? {
                    return Ok(true);
                }
                writeln!(self.out, "{}", render::book_list(&books, self.store.selected_book()))?;
            }
            Command::Book(input) => self.select_book(&input).await?,
            Command::New => match self.mode {
                ChatMode::General => {
                    self.store.new_conversation(ChatMode::General);
                    writeln!(self.out, "Started a new general chat.")?;
                }
                ChatMode::BookWise => {
                    self.store.new_conversation(ChatMode::BookWise);
                    writeln!(self.out, "Select a book again to restart its conversation.")?;
                }
            },
            Command::History => match scope {
                Some(scope) => {
                    let text = render::history(&scope, self.store.history(&scope));
                    writeln!(self.out, "{}", text)?;
                }
                None => writeln!(self.out, "No book selected.")?,
            },
            Command::WhoAmI => {
                if let Some(c) = self.store.credentials() {
                    writeln!(self.out, "{} (user {})", c.email, c.user_id)?;
                }
            }
            Command::Logout => {
                self.store.logout();
                self.mode = ChatMode::default();
                writeln!(self.out, "Logged out.")?;
            }
            Command::Ask(question) => self.ask(scope, &question).await?,
        }
        Ok(true)
    }

    async fn select_book(&mut self, input: &str) -> std::io::Result<()> {
        let books = self.store.list_books().await;
        if self.session_ended()? {
            return Ok(());
        }
        let Some(book) = commands::resolve_book(input, &books) else {
            writeln!(self.out, "Unknown book '{}'. Available:", input)?;
            writeln!(self.out, "{}", render::book_list(&books, self.store.selected_book()))?;
            return Ok(());
        };

        self.store.select_book(&book);
        self.mode = ChatMode::BookWise;
        writeln!(self.out, "Now chatting about {}.", book)?;
        Ok(())
    }

    async fn ask(&mut self, scope: Option<Scope>, question: &str) -> std::io::Result<()> {
        let Some(scope) = scope else {
            writeln!(self.out, "Select a book first with /book <name|number> (see /books).")?;
            return Ok(());
        };
        if let Some(error) = validate_question(question).error {
            writeln!(self.out, "{}", error)?;
            return Ok(());
        }

        writeln!(self.out, "Thinking...")?;
        self.out.flush()?;

        match self.store.send_message(&scope, question).await {
            Ok(answer) => writeln!(self.out, "{}", render::message(&answer))?,
            Err(err) if err.is_session_expired() => {
                self.mode = ChatMode::default();
                writeln!(self.out, "{}", err)?;
            }
            Err(err) if err.is_retryable() => writeln!(
                self.out,
                "{} ({}) Send the question again to retry.",
                err.user_message(),
                err
            )?,
            Err(err) => writeln!(self.out, "{} ({})", err.user_message(), err)?,
        }
        Ok(())
    }

    /// After a call that may have hit an expired token: report it and drop
    /// back to the login screen. Returns `true` when the session is gone.
    fn session_ended(&mut self) -> std::io::Result<bool> {
        if self.store.is_authenticated() {
            return Ok(false);
        }
        self.mode = ChatMode::default();
        writeln!(self.out, "{}", AppError::SessionExpired)?;
        Ok(true)
    }

    async fn read_password(&mut self) -> std::io::Result<Option<String>> {
        if !self.hide_password {
            return self.input.next_line().await;
        }
        let password = tokio::task::spawn_blocking(password::read_hidden_line)
            .await
            .map_err(std::io::Error::other)??;
        // Enter is not echoed in raw mode
        writeln!(self.out)?;
        Ok(password)
    }

    fn write_prompt(&mut self, prompt: &str) -> std::io::Result<()> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()
    }
}
