//! Recommendation composition: second stage of the pipeline.

use crate::clock::TimeContext;
use crate::dataset::FoodTable;
use crate::llm::{LlmError, LlmProvider};
use crate::prompts::recommend::{render_recommend_prompt, RECOMMEND_PROMPT_NAME};
use thiserror::Error;

/// Fixed reply when the dataset could not be loaded.
pub const DATABASE_UNAVAILABLE_REPLY: &str = "Sorry, the food database is currently unavailable.";

/// Error type for recommendation composition.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Failed to serialize dataset for the prompt: {0}")]
    Dataset(#[from] serde_json::Error),
}

/// Compose up to three stall recommendations for a located user.
///
/// The whole table is embedded in the prompt as JSON records and all relevance
/// reasoning is delegated to the model; its reply is trusted and passed through
/// verbatim. An empty table short-circuits to the fixed unavailable reply
/// without a model call. At most one model call per invocation, no retry.
pub async fn compose_recommendations(
    provider: &dyn LlmProvider,
    location: &str,
    budget: u32,
    craving: &str,
    table: &FoodTable,
    time: &TimeContext,
) -> Result<String, ComposeError> {
    if table.is_empty() {
        return Ok(DATABASE_UNAVAILABLE_REPLY.to_string());
    }

    let database_json = table.to_prompt_json()?;
    let prompt =
        render_recommend_prompt(location, budget, craving, &time.to_string(), &database_json);

    tracing::debug!(
        prompt_name = RECOMMEND_PROMPT_NAME,
        model = provider.model_name(),
        rows = table.len(),
        "requesting recommendations"
    );

    let reply = provider.complete(&prompt).await?;

    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FakeProvider;
    use chrono::{TimeZone, Utc};

    fn sample_time() -> TimeContext {
        TimeContext::for_instant(Utc.with_ymd_and_hms(2025, 6, 14, 14, 15, 0).unwrap())
    }

    fn sample_table() -> FoodTable {
        FoodTable::new(vec![crate::dataset::FoodItem {
            dish_name: "Vada Pav".to_string(),
            stall_name: "Ashok Vada Pav".to_string(),
            price: "25".to_string(),
            landmark: "Kirti College Lane".to_string(),
            location_area: "Dadar West".to_string(),
            gmaps_link: "https://maps.google.com/?q=Ashok+Vada+Pav".to_string(),
            extra: Default::default(),
        }])
    }

    #[tokio::test]
    async fn test_compose_passes_reply_through() {
        let provider = FakeProvider::with_response("Food Dost", "**1. Vada Pav at Ashok**");

        let reply = compose_recommendations(
            &provider,
            "Dadar",
            150,
            "vada pav",
            &sample_table(),
            &sample_time(),
        )
        .await
        .unwrap();

        assert_eq!(reply, "**1. Vada Pav at Ashok**");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_compose_empty_table_short_circuits() {
        let provider = FakeProvider::new();

        let reply = compose_recommendations(
            &provider,
            "Dadar",
            150,
            "vada pav",
            &FoodTable::default(),
            &sample_time(),
        )
        .await
        .unwrap();

        assert_eq!(reply, DATABASE_UNAVAILABLE_REPLY);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_compose_transport_error() {
        // No response registered and no default: the model call fails
        let provider = FakeProvider::new();

        let err = compose_recommendations(
            &provider,
            "Dadar",
            150,
            "vada pav",
            &sample_table(),
            &sample_time(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ComposeError::Llm(_)));
    }
}
