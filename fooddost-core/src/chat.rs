//! Conversation session: append-only history plus the per-turn pipeline.
//!
//! Each user turn runs Extractor -> (time context) -> Composer and always
//! resolves to a user-visible reply. Failures never escape a turn.

use crate::clock::TimeContext;
use crate::compose::{compose_recommendations, ComposeError};
use crate::dataset::DatasetProvider;
use crate::extract::{extract_intent, ExtractError};
use crate::llm::LlmProvider;
use std::sync::Arc;

/// Greeting shown before the first user turn.
pub const GREETING: &str = "Hello! I'm your Mumbai Food Compass. Tell me your location, budget, and what you're craving, and I'll find the perfect meal for you!";

/// Reply when extraction succeeds but finds no location.
pub const LOCATION_CLARIFICATION_REPLY: &str =
    "I'm sorry, I couldn't understand your location. Could you please tell me where you are in Mumbai?";

fn extraction_apology(err: &ExtractError) -> String {
    format!("Sorry, I had trouble understanding that. Could you be a bit more specific? (Error: {err})")
}

fn composer_apology(err: &ComposeError) -> String {
    format!("Sorry, boss! Couldn't get a recommendation right now. Error: {err}")
}

/// Role of a message in the conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// A single user's conversation.
///
/// Owns the append-only history; the dataset provider is shared across
/// sessions. Taking `&mut self` per turn means a session processes one
/// utterance fully before accepting the next.
pub struct ChatSession {
    provider: Arc<dyn LlmProvider>,
    dataset: Arc<DatasetProvider>,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    /// Start a session. The greeting is the first history entry.
    pub fn new(provider: Arc<dyn LlmProvider>, dataset: Arc<DatasetProvider>) -> Self {
        Self {
            provider,
            dataset,
            history: vec![ChatMessage {
                role: Role::Assistant,
                content: GREETING.to_string(),
            }],
        }
    }

    /// Full message history, oldest first.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Process one user turn end to end and return the assistant's reply.
    ///
    /// Never errors: every failure mode resolves to a user-visible reply, and
    /// both it and the utterance are appended to the history.
    pub async fn respond(&mut self, utterance: &str) -> String {
        self.history.push(ChatMessage {
            role: Role::User,
            content: utterance.to_string(),
        });

        let reply = self.answer(utterance).await;

        self.history.push(ChatMessage {
            role: Role::Assistant,
            content: reply.clone(),
        });

        reply
    }

    async fn answer(&self, utterance: &str) -> String {
        let intent = match extract_intent(self.provider.as_ref(), utterance).await {
            Ok(intent) => intent,
            Err(e) => {
                tracing::warn!(error = %e, "intent extraction failed");
                return extraction_apology(&e);
            }
        };

        let location = match intent.location.as_deref() {
            Some(location) => location,
            None => {
                tracing::debug!("no location in utterance, asking for clarification");
                return LOCATION_CLARIFICATION_REPLY.to_string();
            }
        };

        let table = self.dataset.load().await;
        let time = TimeContext::now();

        match compose_recommendations(
            self.provider.as_ref(),
            location,
            intent.budget,
            &intent.craving,
            table,
            &time,
        )
        .await
        {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "recommendation composition failed");
                composer_apology(&e)
            }
        }
    }
}
