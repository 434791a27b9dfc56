use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::models::{ChatMessage, ChatReply};
use crate::services::completion_client::{CompletionClient, CompletionOptions};
use crate::services::image_resolver::ImageResolver;
use crate::services::response_cleaner::clean_response;

pub const BASE_SYSTEM_PROMPT: &str = "You are Primal, an AI fitness assistant for Primal Fit.
Respond in a friendly, motivational tone with concise answers.
Format responses using clear bullet points and simple headings.
Never use markdown or special formatting.
Focus on fitness-related topics only.
Ask for user preferences to create personalized plans.";

/// Messages kept after the system prompt; older exchanges are dropped first
pub const MAX_HISTORY_MESSAGES: usize = 20;

/// Per-session chat transcripts.
///
/// A session without a transcript is treated as freshly started: reads and
/// writes both initialise it with the base system prompt.
#[derive(Debug, Clone, Default)]
pub struct ChatSessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Vec<ChatMessage>>>>,
}

impl ChatSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_transcript() -> Vec<ChatMessage> {
        vec![ChatMessage::system(BASE_SYSTEM_PROMPT)]
    }

    /// Snapshot of the session transcript
    pub async fn transcript(&self, session_id: Uuid) -> Vec<ChatMessage> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .cloned()
            .unwrap_or_else(Self::base_transcript)
    }

    /// Append one user/assistant exchange, keeping the system prompt plus
    /// the last [`MAX_HISTORY_MESSAGES`] messages
    pub async fn record_turn(&self, session_id: Uuid, user: ChatMessage, assistant: ChatMessage) {
        let mut sessions = self.sessions.write().await;
        let transcript = sessions
            .entry(session_id)
            .or_insert_with(Self::base_transcript);
        transcript.extend([user, assistant]);

        let overflow = transcript.len().saturating_sub(MAX_HISTORY_MESSAGES + 1);
        if overflow > 0 {
            transcript.drain(1..=overflow);
        }
    }

    pub async fn reset(&self, session_id: Uuid) {
        self.sessions
            .write()
            .await
            .insert(session_id, Self::base_transcript());
    }
}

#[derive(Debug, Clone)]
pub struct ChatService {
    completion: CompletionClient,
    images: ImageResolver,
    sessions: ChatSessionStore,
}

impl ChatService {
    pub fn new(completion: CompletionClient, images: ImageResolver, sessions: ChatSessionStore) -> Self {
        Self {
            completion,
            images,
            sessions,
        }
    }

    pub fn sessions(&self) -> &ChatSessionStore {
        &self.sessions
    }

    /// Run one chat turn. Completion failures become the assistant's reply.
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    pub async fn reply(&self, session_id: Uuid, message: &str) -> ChatReply {
        let mut messages = self.sessions.transcript(session_id).await;
        messages.push(ChatMessage::user(message));

        let response = match self.completion.complete(&messages, CompletionOptions::SHORT).await {
            Ok(content) => clean_response(&content),
            Err(e) => {
                warn!("Chat completion failed: {}", e);
                format!("Sorry, I encountered an error: {}", e)
            }
        };

        self.sessions
            .record_turn(
                session_id,
                ChatMessage::user(message),
                ChatMessage::assistant(response.clone()),
            )
            .await;

        let image = if message.to_lowercase().contains("workout") {
            Some(self.images.resolve(message).await)
        } else {
            None
        };

        ChatReply { response, image }
    }

    pub async fn clear(&self, session_id: Uuid) {
        self.sessions.reset(session_id).await;
    }
}
