//! Assistant chat transcripts.
//!
//! A transcript accepts one outstanding question at a time. Each question
//! gets a [`Ticket`]; an answer is appended only if its ticket is still the
//! newest one issued, so a reply that arrives after the question was
//! cancelled is dropped instead of landing out of order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use tracing::debug;

use handset_core::{ChatMessage, ConversationId};

/// Greeting that opens every transcript.
pub const GREETING: &str = "Hello! I'm your smartphone specialist. Ask me anything about the devices in our catalog.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("a request is already in flight for this conversation")]
    RequestInFlight,
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("conversation not found")]
    UnknownConversation,
}

/// Sequence number of an outstanding question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Append-only message log with an in-flight gate.
#[derive(Debug, Clone)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    issued: u64,
    pending: Option<u64>,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTranscript {
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            issued: 0,
            pending: None,
        }
    }

    /// Record a question and issue its ticket.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::RequestInFlight` while an earlier question is
    /// unanswered, and `ChatError::EmptyMessage` for blank input.
    pub fn begin(&mut self, text: &str) -> Result<Ticket, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if self.pending.is_some() {
            return Err(ChatError::RequestInFlight);
        }

        self.issued += 1;
        self.pending = Some(self.issued);
        self.messages.push(ChatMessage::user(text));
        Ok(Ticket(self.issued))
    }

    /// Append the answer for `ticket`.
    ///
    /// Returns `false`, leaving the transcript untouched, if the ticket is
    /// no longer the outstanding one.
    pub fn complete(&mut self, ticket: Ticket, text: impl Into<String>) -> bool {
        if self.pending != Some(ticket.0) {
            debug!(ticket = ticket.0, "Discarding stale assistant reply");
            return false;
        }
        self.pending = None;
        self.messages.push(ChatMessage::assistant(text));
        true
    }

    /// Abandon the outstanding question, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

/// Conversations held at once before the least used are evicted.
pub const MAX_CONVERSATIONS: u64 = 10_000;

type SharedTranscript = Arc<Mutex<ChatTranscript>>;

/// In-memory transcripts keyed by conversation.
///
/// Backed by a `moka` cache: a conversation left idle for the configured
/// time is dropped, as are the least used ones past `capacity`.
#[derive(Clone)]
pub struct ChatSessions {
    transcripts: Cache<ConversationId, SharedTranscript>,
}

impl ChatSessions {
    #[must_use]
    pub fn new(capacity: u64, idle_timeout: Duration) -> Self {
        let transcripts = Cache::builder()
            .max_capacity(capacity)
            .time_to_idle(idle_timeout)
            .build();
        Self { transcripts }
    }

    /// Start a question, creating the conversation if `id` is `None`.
    ///
    /// # Errors
    ///
    /// See [`ChatTranscript::begin`]; also `ChatError::UnknownConversation`
    /// for an id this process never issued or has evicted.
    pub async fn begin(
        &self,
        id: Option<ConversationId>,
        text: &str,
    ) -> Result<(ConversationId, Ticket), ChatError> {
        match id {
            Some(id) => {
                let transcript = self.get(id).await?;
                let ticket = lock(&transcript).begin(text)?;
                Ok((id, ticket))
            }
            None => {
                let mut transcript = ChatTranscript::new();
                let ticket = transcript.begin(text)?;
                let id = ConversationId::new_random();
                self.transcripts
                    .insert(id, Arc::new(Mutex::new(transcript)))
                    .await;
                debug!(%id, "Conversation started");
                Ok((id, ticket))
            }
        }
    }

    /// Deliver an answer. Returns the transcript as it stands afterwards
    /// and whether the answer was kept.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::UnknownConversation` if `id` is not held.
    pub async fn complete(
        &self,
        id: ConversationId,
        ticket: Ticket,
        text: impl Into<String>,
    ) -> Result<(Vec<ChatMessage>, bool), ChatError> {
        let transcript = self.get(id).await?;
        let mut transcript = lock(&transcript);
        let accepted = transcript.complete(ticket, text);
        Ok((transcript.messages().to_vec(), accepted))
    }

    /// Cancel the outstanding question of a conversation.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::UnknownConversation` if `id` is not held.
    pub async fn cancel(&self, id: ConversationId) -> Result<(), ChatError> {
        let transcript = self.get(id).await?;
        lock(&transcript).cancel();
        Ok(())
    }

    /// Copy of a conversation's messages.
    pub async fn messages(&self, id: ConversationId) -> Option<Vec<ChatMessage>> {
        let transcript = self.transcripts.get(&id).await?;
        let messages = lock(&transcript).messages().to_vec();
        Some(messages)
    }

    /// Number of conversations held, after pending evictions are applied.
    pub async fn conversation_count(&self) -> u64 {
        self.transcripts.run_pending_tasks().await;
        self.transcripts.entry_count()
    }

    async fn get(&self, id: ConversationId) -> Result<SharedTranscript, ChatError> {
        self.transcripts
            .get(&id)
            .await
            .ok_or(ChatError::UnknownConversation)
    }
}

fn lock(transcript: &Mutex<ChatTranscript>) -> MutexGuard<'_, ChatTranscript> {
    transcript.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use handset_core::ChatRole;

    use super::*;

    #[test]
    fn test_new_transcript_opens_with_greeting() {
        let transcript = ChatTranscript::new();
        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].role, ChatRole::Assistant);
        assert!(!transcript.is_loading());
    }

    #[test]
    fn test_question_and_answer() {
        let mut transcript = ChatTranscript::new();
        let ticket = transcript.begin("  best battery?  ").expect("begin");
        assert!(transcript.is_loading());
        assert_eq!(transcript.messages()[1].text, "best battery?");

        assert!(transcript.complete(ticket, "The S24 Ultra."));
        assert!(!transcript.is_loading());
        assert_eq!(transcript.messages().len(), 3);
    }

    #[test]
    fn test_duplicate_submission_rejected() {
        let mut transcript = ChatTranscript::new();
        transcript.begin("first").expect("begin");
        assert_eq!(transcript.begin("second"), Err(ChatError::RequestInFlight));
        assert_eq!(transcript.messages().len(), 2);
    }

    #[test]
    fn test_empty_message_rejected() {
        let mut transcript = ChatTranscript::new();
        assert_eq!(transcript.begin("   "), Err(ChatError::EmptyMessage));
        assert!(!transcript.is_loading());
    }

    #[test]
    fn test_stale_reply_discarded_after_cancel() {
        let mut transcript = ChatTranscript::new();
        let stale = transcript.begin("first").expect("begin");
        transcript.cancel();

        let fresh = transcript.begin("second").expect("begin again");
        assert!(!transcript.complete(stale, "late answer"));
        assert!(transcript.is_loading());

        assert!(transcript.complete(fresh, "on time"));
        let texts: Vec<_> = transcript.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts[1..], ["first", "second", "on time"]);
    }

    fn sessions() -> ChatSessions {
        ChatSessions::new(MAX_CONVERSATIONS, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_sessions_keep_conversations_apart() {
        let sessions = sessions();
        let (a, ticket_a) = sessions.begin(None, "hello").await.expect("a");
        let (b, _) = sessions.begin(None, "hi").await.expect("b");
        assert_ne!(a, b);

        let (messages, accepted) = sessions
            .complete(a, ticket_a, "answer")
            .await
            .expect("complete");
        assert!(accepted);
        assert_eq!(messages.len(), 3);
        assert_eq!(sessions.messages(b).await.map(|m| m.len()), Some(2));
    }

    #[tokio::test]
    async fn test_sessions_reject_unknown_conversation() {
        let sessions = sessions();
        let id = ConversationId::new_random();
        assert_eq!(
            sessions.begin(Some(id), "hello").await,
            Err(ChatError::UnknownConversation)
        );
        assert_eq!(sessions.cancel(id).await, Err(ChatError::UnknownConversation));
    }

    #[tokio::test]
    async fn test_blank_first_message_creates_no_conversation() {
        let sessions = sessions();
        assert_eq!(
            sessions.begin(None, "   ").await,
            Err(ChatError::EmptyMessage)
        );
        assert_eq!(sessions.conversation_count().await, 0);
    }

    #[tokio::test]
    async fn test_idle_conversation_is_evicted() {
        let sessions = ChatSessions::new(MAX_CONVERSATIONS, Duration::from_millis(100));
        let (id, ticket) = sessions.begin(None, "hello").await.expect("begin");

        tokio::time::sleep(Duration::from_millis(300)).await;

        assert!(sessions.messages(id).await.is_none());
        assert_eq!(
            sessions.complete(id, ticket, "late").await,
            Err(ChatError::UnknownConversation)
        );
        assert_eq!(sessions.conversation_count().await, 0);
    }

    #[tokio::test]
    async fn test_conversation_count_is_bounded() {
        let sessions = ChatSessions::new(8, Duration::from_secs(60));
        for i in 0..64 {
            sessions
                .begin(None, &format!("question {i}"))
                .await
                .expect("begin");
        }
        assert!(sessions.conversation_count().await <= 8);
    }
}
