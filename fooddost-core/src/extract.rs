//! Intent extraction: first stage of the pipeline.
//!
//! One model call turns a free-text utterance into a structured
//! {location, budget, craving} intent. Defaults are applied for missing
//! budget and craving; location is deliberately left optional because the
//! caller decides whether the turn can proceed without one.

use crate::llm::{LlmError, LlmProvider};
use crate::prompts::extract_intent::{render_extract_intent_prompt, EXTRACT_INTENT_PROMPT_NAME};
use serde::Deserialize;
use thiserror::Error;

/// Budget in INR assumed when the user does not state one.
pub const DEFAULT_BUDGET_INR: u32 = 100;

/// Sentinel craving meaning "no specific preference".
pub const ANY_CRAVING: &str = "anything";

/// Error type for intent extraction.
///
/// The two kinds reach the same user-facing apology but are kept distinct
/// so logs can tell a transport failure from a malformed model reply.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Model reply was not valid intent JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Structured request distilled from one user utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    /// Where the user is. None when no location could be determined; the
    /// pipeline must not reach the recommendation stage without one.
    pub location: Option<String>,
    /// Budget in INR.
    pub budget: u32,
    /// What the user wants to eat; [`ANY_CRAVING`] when unspecified.
    pub craving: String,
}

/// Wire format of the model's extraction reply.
#[derive(Debug, Deserialize)]
struct RawIntent {
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    budget: Option<u32>,
    #[serde(default)]
    craving: Option<String>,
}

impl From<RawIntent> for Intent {
    fn from(raw: RawIntent) -> Self {
        Self {
            // An empty location is as unusable as a missing one
            location: raw.location.filter(|l| !l.trim().is_empty()),
            budget: raw.budget.unwrap_or(DEFAULT_BUDGET_INR),
            craving: raw
                .craving
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| ANY_CRAVING.to_string()),
        }
    }
}

/// Extract {location, budget, craving} from a free-text utterance.
///
/// Makes exactly one model call per invocation, with no caching or retry.
/// The model is instructed to reply with a bare JSON object; any code fences
/// it wraps around the JSON are stripped before parsing.
pub async fn extract_intent(
    provider: &dyn LlmProvider,
    utterance: &str,
) -> Result<Intent, ExtractError> {
    let prompt = render_extract_intent_prompt(utterance);

    tracing::debug!(
        prompt_name = EXTRACT_INTENT_PROMPT_NAME,
        model = provider.model_name(),
        "requesting intent extraction"
    );

    let reply = provider.complete(&prompt).await?;
    let raw: RawIntent = serde_json::from_str(strip_code_fences(&reply))?;
    let intent = Intent::from(raw);

    tracing::debug!(?intent, "extracted intent");

    Ok(intent)
}

/// Strip markdown code fences the model may wrap around a JSON reply.
fn strip_code_fences(reply: &str) -> &str {
    reply
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}
