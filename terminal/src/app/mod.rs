//! # Session Store
//!
//! [`SessionStore`] owns everything a chat session knows: the login
//! credentials, the general conversation table and the per-book table. The
//! presentation layer calls its operations and renders what they return.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Presentation (ui::repl)                                 │
//! │   login / send / select book / new chat / logout         │
//! └───────────────┬──────────────────────────────────────────┘
//!                 │ &mut SessionStore
//! ┌───────────────▼──────────────────────────────────────────┐
//! │  SessionStore                                            │
//! │   credentials: Option<Credentials>                       │
//! │   general:     GeneralConversations (key = bot id)       │
//! │   books:       BookConversations    (key = book name)    │
//! └───────────────┬──────────────────────────────────────────┘
//!                 │ Arc<dyn ChatService>
//! ┌───────────────▼──────────────────────────────────────────┐
//! │  services::api::ApiClient (reqwest)                      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Transitions
//!
//! Every mutating operation takes `&mut self`, so at most one remote call per
//! store is ever outstanding. State is only touched after the call resolves,
//! and then in one synchronous step: a failed call leaves the store exactly
//! as it was (apart from the forced logout on [`AppError::SessionExpired`]).
//!
//! ```text
//!                login ok
//!   LoggedOut ─────────────▶ LoggedIn ──┐ send ok: reconcile bot id,
//!       ▲                      │  ▲     │          append user+assistant
//!       │ logout / 401         │  └─────┘ send err: unchanged
//!       └──────────────────────┘
//! ```
//!
//! ## Bot Id Reconciliation
//!
//! The service may answer a chat call with a different bot id than the one it
//! was sent. In general mode the conversation table is keyed by bot id, so
//! the history is moved to the new key (see
//! [`GeneralConversations::reconcile`]). In book mode the table is keyed by
//! book name and only the tracked id changes.

pub mod state;

pub use state::{
    BookConversation, BookConversations, ChatMode, Conversation, Credentials,
    GeneralConversations, Message, Role, Scope,
};

use std::sync::Arc;

use shared::{BookChatRequest, BotId, GeneralChatRequest};
use tracing::Instrument;

use crate::core::{AppError, ChatService, Result};
use crate::debug::operation_span;

/// Conversation session manager.
pub struct SessionStore {
    api: Arc<dyn ChatService>,
    credentials: Option<Credentials>,
    general: GeneralConversations,
    books: BookConversations,
}

impl SessionStore {
    pub fn new(api: Arc<dyn ChatService>) -> Self {
        Self {
            api,
            credentials: None,
            general: GeneralConversations::default(),
            books: BookConversations::default(),
        }
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn general(&self) -> &GeneralConversations {
        &self.general
    }

    pub fn books(&self) -> &BookConversations {
        &self.books
    }

    pub fn selected_book(&self) -> Option<&str> {
        self.books.selected()
    }

    /// Messages of the conversation `scope` resolves to. Empty when nothing
    /// has been said there yet.
    pub fn history(&self, scope: &Scope) -> &[Message] {
        match scope {
            Scope::General => self.general.current().map(Conversation::messages),
            Scope::Book(book) => self.books.get(book).map(|b| b.conversation.messages()),
        }
        .unwrap_or(&[])
    }

    /// Bot id a message to `scope` would currently be sent with.
    pub fn bot_id(&self, scope: &Scope) -> Option<&BotId> {
        match scope {
            Scope::General => Some(self.general.current_bot_id()),
            Scope::Book(book) => self.books.bot_id(book),
        }
    }

    /// Log in with email and password.
    ///
    /// On success the credentials are stored. Logging in as a different user
    /// also drops the previous user's conversations. On failure nothing
    /// changes.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        async {
            let data = self.api.authenticate(email, password).await?;
            let credentials = Credentials::from(data);

            let switched_user = self
                .credentials
                .as_ref()
                .is_some_and(|current| current.user_id != credentials.user_id);
            if switched_user {
                tracing::info!("Different user logged in, clearing conversations");
                self.general.clear();
                self.books.clear();
            }

            tracing::info!(user_id = %credentials.user_id, "Session started");
            self.credentials = Some(credentials);
            Ok(())
        }
        .instrument(operation_span("login"))
        .await
    }

    /// Drop credentials and every conversation. Idempotent.
    pub fn logout(&mut self) {
        if self.credentials.take().is_some() {
            tracing::info!("Session ended");
        }
        self.general.clear();
        self.books.clear();
    }

    /// Book names available for book-wise chat.
    ///
    /// Empty when logged out or when the listing fails. A rejected token
    /// ends the session like it does for [`send_message`](Self::send_message).
    pub async fn list_books(&mut self) -> Vec<String> {
        let Some(credentials) = self.credentials.as_ref() else {
            tracing::debug!("Book list requested while logged out");
            return Vec::new();
        };

        let outcome = self
            .api
            .list_namespaces(&credentials.token)
            .instrument(operation_span("list_books"))
            .await;

        match outcome {
            Ok(names) => names,
            Err(err) if err.is_session_expired() => {
                tracing::warn!("Session expired while listing books, logging out");
                self.logout();
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to list books");
                Vec::new()
            }
        }
    }

    /// Select the book used for book-wise chat.
    ///
    /// Switching to a different book resets that book's conversation and bot
    /// id. Returns `true` when the selection changed.
    pub fn select_book(&mut self, book: &str) -> bool {
        let switched = self.books.select(book);
        if switched {
            tracing::info!(book, "Book selected");
        }
        switched
    }

    /// Start over. In general mode the whole general table and the current
    /// bot id are discarded. Book-wise chat has no equivalent; selecting a
    /// book is what resets it.
    pub fn new_conversation(&mut self, mode: ChatMode) {
        match mode {
            ChatMode::General => {
                self.general.clear();
                tracing::info!("New general conversation");
            }
            ChatMode::BookWise => {
                tracing::debug!("New conversation requested in book mode, ignored");
            }
        }
    }

    /// Send `text` to the bot for `scope` and record the exchange.
    ///
    /// Returns the assistant's message. On any error the conversation is left
    /// untouched; [`AppError::SessionExpired`] additionally logs out.
    pub async fn send_message(&mut self, scope: &Scope, text: &str) -> Result<Message> {
        async {
            let credentials = self.credentials.as_ref().ok_or(AppError::Unauthenticated)?;
            if text.trim().is_empty() {
                return Err(AppError::ValidationFailed("question is empty".to_string()));
            }

            let token = credentials.token.clone();
            let user_id = credentials.user_id.clone();
            let bot_id = self.bot_id(scope).cloned().unwrap_or_default();
            tracing::info!(%scope, %bot_id, "Sending message");

            let outcome = match scope {
                Scope::General => {
                    let request = GeneralChatRequest {
                        user_id,
                        query: text.to_string(),
                        bot_id,
                    };
                    self.api.general_chat(&token, &request).await
                }
                Scope::Book(book) => {
                    let request = BookChatRequest {
                        user_id,
                        query: text.to_string(),
                        bot_id,
                        book_name: book.clone(),
                    };
                    self.api.book_chat(&token, &request).await
                }
            };

            let reply = match outcome {
                Ok(reply) if reply.response.trim().is_empty() => return Err(AppError::EmptyResponse),
                Ok(reply) => reply,
                Err(err) => {
                    if err.is_session_expired() {
                        tracing::warn!("Session expired, logging out");
                        self.logout();
                    } else {
                        tracing::warn!(error = %err, "Message not delivered");
                    }
                    return Err(err);
                }
            };

            let question = Message::user(text);
            let answer = Message::assistant(reply.response);
            match scope {
                Scope::General => {
                    self.general.reconcile(&reply.bot_id);
                    self.general.record_exchange(question, answer.clone());
                }
                Scope::Book(book) => {
                    self.books.reconcile(book, &reply.bot_id);
                    self.books.record_exchange(book, question, answer.clone());
                }
            }

            tracing::info!(%scope, bot_id = %reply.bot_id, "Exchange recorded");
            Ok(answer)
        }
        .instrument(operation_span("send_message"))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChatReply;
    use async_trait::async_trait;
    use shared::AuthData;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted ChatService: pops one canned result per chat call and
    /// records every request it sees.
    #[derive(Default)]
    struct ScriptedService {
        login: Mutex<Option<Result<AuthData>>>,
        namespaces: Mutex<Option<Result<Vec<String>>>>,
        replies: Mutex<VecDeque<Result<ChatReply>>>,
        general_requests: Mutex<Vec<GeneralChatRequest>>,
        book_requests: Mutex<Vec<BookChatRequest>>,
    }

    impl ScriptedService {
        fn with_login(self, result: Result<AuthData>) -> Self {
            *self.login.lock().unwrap() = Some(result);
            self
        }

        fn reply(&self, response: &str, bot_id: &str) {
            self.replies.lock().unwrap().push_back(Ok(ChatReply {
                response: response.to_string(),
                bot_id: BotId::from(bot_id),
            }));
        }

        fn fail(&self, err: AppError) {
            self.replies.lock().unwrap().push_back(Err(err));
        }

        fn general_requests(&self) -> Vec<GeneralChatRequest> {
            self.general_requests.lock().unwrap().clone()
        }

        fn book_requests(&self) -> Vec<BookChatRequest> {
            self.book_requests.lock().unwrap().clone()
        }

        fn next_reply(&self) -> Result<ChatReply> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected chat call")
        }
    }

    #[async_trait]
    impl ChatService for ScriptedService {
        async fn authenticate(&self, _email: &str, _password: &str) -> Result<AuthData> {
            self.login
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Err(AppError::AuthenticationFailed("no script".to_string())))
        }

        async fn list_namespaces(&self, _token: &str) -> Result<Vec<String>> {
            self.namespaces.lock().unwrap().clone().unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn general_chat(&self, _token: &str, request: &GeneralChatRequest) -> Result<ChatReply> {
            self.general_requests.lock().unwrap().push(request.clone());
            self.next_reply()
        }

        async fn book_chat(&self, _token: &str, request: &BookChatRequest) -> Result<ChatReply> {
            self.book_requests.lock().unwrap().push(request.clone());
            self.next_reply()
        }
    }

    fn auth_data(user_id: &str) -> AuthData {
        AuthData {
            token: "T".to_string(),
            user_id: user_id.to_string(),
            email: "reader@example.com".to_string(),
        }
    }

    async fn logged_in() -> (SessionStore, Arc<ScriptedService>) {
        let api = Arc::new(ScriptedService::default().with_login(Ok(auth_data("U1"))));
        let mut store = SessionStore::new(api.clone());
        store.login("reader@example.com", "pw").await.unwrap();
        (store, api)
    }

    // ========== Login / Logout ==========

    #[tokio::test]
    async fn test_login_stores_credentials() {
        let (store, _api) = logged_in().await;
        let credentials = store.credentials().unwrap();
        assert_eq!(credentials.token, "T");
        assert_eq!(credentials.user_id, "U1");
        assert_eq!(credentials.email, "reader@example.com");
    }

    #[tokio::test]
    async fn test_failed_login_leaves_state_untouched() {
        let api = Arc::new(
            ScriptedService::default()
                .with_login(Err(AppError::AuthenticationFailed("Invalid credentials".to_string()))),
        );
        let mut store = SessionStore::new(api);

        let err = store.login("reader@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationFailed(_)));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_relogin_as_other_user_drops_conversations() {
        let (mut store, api) = logged_in().await;
        api.reply("answer", "77");
        store.send_message(&Scope::General, "q").await.unwrap();

        *api.login.lock().unwrap() = Some(Ok(auth_data("U2")));
        store.login("other@example.com", "pw").await.unwrap();

        assert_eq!(store.credentials().unwrap().user_id, "U2");
        assert!(store.general().is_empty());
        assert!(store.history(&Scope::General).is_empty());
    }

    #[tokio::test]
    async fn test_logout_clears_everything_and_blocks_sending() {
        let (mut store, api) = logged_in().await;
        api.reply("answer", "77");
        store.send_message(&Scope::General, "q").await.unwrap();
        store.select_book("Genesis");

        store.logout();
        store.logout();

        assert!(store.credentials().is_none());
        assert!(store.general().is_empty());
        assert!(store.general().current_bot_id().is_unassigned());
        assert!(store.selected_book().is_none());

        let err = store.send_message(&Scope::General, "again").await.unwrap_err();
        assert_eq!(err, AppError::Unauthenticated);
        assert_eq!(api.general_requests().len(), 1);
    }

    // ========== General Chat ==========

    #[tokio::test]
    async fn test_first_and_follow_up_general_messages() {
        let (mut store, api) = logged_in().await;

        api.reply("Love is patient...", "77");
        let answer = store.send_message(&Scope::General, "What is love?").await.unwrap();
        assert_eq!(answer.role, Role::Assistant);
        assert_eq!(answer.content, "Love is patient...");

        let key = BotId::from("77");
        assert_eq!(store.general().current_bot_id(), &key);
        assert_eq!(store.general().get(&key).map(Conversation::len), Some(2));

        api.reply("Faith is the substance...", "77");
        store.send_message(&Scope::General, "And faith?").await.unwrap();
        assert_eq!(store.general().get(&key).map(Conversation::len), Some(4));
        assert_eq!(store.general().len(), 1);

        let requests = api.general_requests();
        assert!(requests[0].bot_id.is_unassigned());
        assert_eq!(requests[0].user_id, "U1");
        assert_eq!(requests[1].bot_id, key);

        let history = store.history(&Scope::General);
        let roles: Vec<Role> = history.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(history[2].content, "And faith?");
    }

    #[tokio::test]
    async fn test_new_bot_id_moves_history() {
        let (mut store, api) = logged_in().await;
        api.reply("a1", "77");
        store.send_message(&Scope::General, "q1").await.unwrap();

        api.reply("a2", "91");
        store.send_message(&Scope::General, "q2").await.unwrap();

        assert!(!store.general().contains(&BotId::from("77")));
        let moved = store.general().get(&BotId::from("91")).unwrap();
        assert_eq!(moved.len(), 4);
        assert_eq!(moved.messages()[0].content, "q1");
        assert_eq!(store.general().len(), 1);
    }

    #[tokio::test]
    async fn test_unassigned_reply_keeps_current_bot_id() {
        let (mut store, api) = logged_in().await;
        api.reply("a1", "77");
        store.send_message(&Scope::General, "q1").await.unwrap();

        api.reply("a2", "");
        store.send_message(&Scope::General, "q2").await.unwrap();

        assert_eq!(store.general().current_bot_id().as_str(), "77");
        assert_eq!(store.history(&Scope::General).len(), 4);
    }

    #[tokio::test]
    async fn test_message_count_is_twice_successful_sends() {
        let (mut store, api) = logged_in().await;
        let mut successes = 0;

        for i in 0..6 {
            if i % 3 == 1 {
                api.fail(AppError::RemoteUnavailable("HTTP 503".to_string()));
            } else if i % 3 == 2 {
                api.fail(AppError::EmptyResponse);
            } else {
                api.reply("answer", "77");
            }
            if store.send_message(&Scope::General, "question").await.is_ok() {
                successes += 1;
            }
            assert_eq!(store.history(&Scope::General).len(), successes * 2);
        }

        assert_eq!(successes, 2);
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_blank_reply_is_empty_response() {
        let (mut store, api) = logged_in().await;
        api.reply("   ", "77");

        let err = store.send_message(&Scope::General, "q").await.unwrap_err();
        assert_eq!(err, AppError::EmptyResponse);
        assert!(store.general().is_empty());
        assert!(store.general().current_bot_id().is_unassigned());
    }

    #[tokio::test]
    async fn test_validation_failure_keeps_session() {
        let (mut store, api) = logged_in().await;
        api.fail(AppError::ValidationFailed("field required".to_string()));

        let err = store.send_message(&Scope::General, "q").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationFailed(_)));
        assert!(store.is_authenticated());
        assert!(store.history(&Scope::General).is_empty());
    }

    #[tokio::test]
    async fn test_empty_question_is_not_sent() {
        let (mut store, api) = logged_in().await;
        let err = store.send_message(&Scope::General, "   ").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationFailed(_)));
        assert!(api.general_requests().is_empty());
    }

    #[tokio::test]
    async fn test_session_expired_logs_out() {
        let (mut store, api) = logged_in().await;
        api.reply("a1", "77");
        store.send_message(&Scope::General, "q1").await.unwrap();
        store.select_book("Psalms");

        api.fail(AppError::SessionExpired);
        let err = store.send_message(&Scope::General, "q2").await.unwrap_err();

        assert!(err.is_session_expired());
        assert!(store.credentials().is_none());
        assert!(store.general().is_empty());
        assert!(store.books().get("Psalms").is_none());
    }

    #[tokio::test]
    async fn test_new_conversation_resets_general_table() {
        let (mut store, api) = logged_in().await;
        api.reply("a1", "77");
        store.send_message(&Scope::General, "q1").await.unwrap();

        store.new_conversation(ChatMode::General);
        assert!(store.general().is_empty());
        assert!(store.general().current_bot_id().is_unassigned());

        api.reply("a2", "80");
        store.send_message(&Scope::General, "q2").await.unwrap();
        let requests = api.general_requests();
        assert!(requests[1].bot_id.is_unassigned());
        assert_eq!(store.history(&Scope::General).len(), 2);
    }

    #[tokio::test]
    async fn test_new_conversation_in_book_mode_is_noop() {
        let (mut store, api) = logged_in().await;
        store.select_book("Ruth");
        api.reply("a", "4");
        store.send_message(&Scope::Book("Ruth".to_string()), "q").await.unwrap();

        store.new_conversation(ChatMode::BookWise);
        assert_eq!(store.history(&Scope::Book("Ruth".to_string())).len(), 2);
    }

    // ========== Book-wise Chat ==========

    #[tokio::test]
    async fn test_book_chat_tracks_bot_id_per_book() {
        let (mut store, api) = logged_in().await;
        let genesis = Scope::Book("Genesis".to_string());
        let exodus = Scope::Book("Exodus".to_string());

        store.select_book("Genesis");
        api.reply("In the beginning...", "3");
        store.send_message(&genesis, "How does it start?").await.unwrap();

        api.reply("It was reassigned", "8");
        store.send_message(&genesis, "And then?").await.unwrap();

        store.select_book("Exodus");
        api.reply("Moses...", "5");
        store.send_message(&exodus, "Who leads?").await.unwrap();

        assert_eq!(store.bot_id(&genesis).map(BotId::as_str), Some("8"));
        assert_eq!(store.history(&genesis).len(), 4);
        assert_eq!(store.bot_id(&exodus).map(BotId::as_str), Some("5"));
        assert_eq!(store.history(&exodus).len(), 2);

        let requests = api.book_requests();
        assert_eq!(requests[0].book_name, "Genesis");
        assert!(requests[0].bot_id.is_unassigned());
        assert_eq!(requests[1].bot_id.as_str(), "3");
        assert_eq!(requests[2].book_name, "Exodus");
        assert!(requests[2].bot_id.is_unassigned());
        assert!(api.general_requests().is_empty());
    }

    #[tokio::test]
    async fn test_switching_back_to_book_resets_it() {
        let (mut store, api) = logged_in().await;
        let genesis = Scope::Book("Genesis".to_string());

        store.select_book("Genesis");
        api.reply("answer", "3");
        store.send_message(&genesis, "q").await.unwrap();

        store.select_book("Exodus");
        assert!(store.select_book("Genesis"));

        assert!(store.history(&genesis).is_empty());
        assert!(store.bot_id(&genesis).unwrap().is_unassigned());
    }

    #[tokio::test]
    async fn test_book_failure_leaves_book_unchanged() {
        let (mut store, api) = logged_in().await;
        let job = Scope::Book("Job".to_string());
        store.select_book("Job");

        api.fail(AppError::RemoteUnavailable("timeout".to_string()));
        assert!(store.send_message(&job, "Why?").await.is_err());
        assert!(store.history(&job).is_empty());
        assert!(store.bot_id(&job).unwrap().is_unassigned());
    }

    #[tokio::test]
    async fn test_book_session_expired_logs_out() {
        let (mut store, api) = logged_in().await;
        let job = Scope::Book("Job".to_string());
        store.select_book("Job");
        api.reply("Patience.", "5");
        store.send_message(&job, "Why?").await.unwrap();

        api.fail(AppError::SessionExpired);
        let err = store.send_message(&job, "And then?").await.unwrap_err();

        assert_eq!(err, AppError::SessionExpired);
        assert!(store.credentials().is_none());
        assert!(store.books().get("Job").is_none());
        assert!(store.selected_book().is_none());
        assert!(store.history(&job).is_empty());
        assert_eq!(api.book_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_list_books() {
        let (mut store, api) = logged_in().await;
        *api.namespaces.lock().unwrap() = Some(Ok(vec!["Genesis".to_string(), "Exodus".to_string()]));
        assert_eq!(store.list_books().await, vec!["Genesis", "Exodus"]);

        *api.namespaces.lock().unwrap() = Some(Err(AppError::RemoteUnavailable("HTTP 500".to_string())));
        assert!(store.list_books().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_books_requires_login() {
        let api = Arc::new(ScriptedService::default());
        *api.namespaces.lock().unwrap() = Some(Ok(vec!["Genesis".to_string()]));
        let mut store = SessionStore::new(api);
        assert!(store.list_books().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_books_with_expired_token_logs_out() {
        let (mut store, api) = logged_in().await;
        api.reply("Answer", "77");
        store.send_message(&Scope::General, "Q").await.unwrap();
        store.select_book("Genesis");

        *api.namespaces.lock().unwrap() = Some(Err(AppError::SessionExpired));
        assert!(store.list_books().await.is_empty());

        assert!(!store.is_authenticated());
        assert!(store.general().is_empty());
        assert!(store.selected_book().is_none());
    }
}
