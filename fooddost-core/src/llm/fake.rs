//! Fake LLM provider for testing.
//!
//! This provider returns deterministic responses based on prompt matching,
//! allowing tests to run without network access or API costs.

use super::{LlmError, LlmProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// A fake LLM provider for testing.
///
/// Responses are matched by checking if the prompt contains a registered
/// substring. If no match is found, returns a default response or error.
/// Every prompt passed to [`complete`](LlmProvider::complete) is recorded so
/// tests can assert what was sent and how many round-trips a turn performed.
#[derive(Debug)]
pub struct FakeProvider {
    /// Map of prompt substring -> response
    responses: RwLock<HashMap<String, String>>,
    /// Default response if no match found
    default_response: Option<String>,
    /// Prompts seen so far, in call order
    prompts: RwLock<Vec<String>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: Some("{}".to_string()),
            prompts: RwLock::new(Vec::new()),
        }
    }
}

#[allow(dead_code)]
impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
            prompts: RwLock::new(Vec::new()),
        }
    }

    /// Create a FakeProvider that returns a specific response for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(prompt_contains.to_string(), response.to_string());
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Number of complete() calls made against this provider.
    pub fn call_count(&self) -> usize {
        self.prompts.read().unwrap().len()
    }

    /// Prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    /// Create a FakeProvider with standard responses for pipeline testing.
    pub fn with_pipeline_responses() -> Self {
        let mut provider = Self::new();

        // Intent extraction response
        provider.add_response(
            "Extract location",
            r#"{"location": "Dadar", "budget": 150, "craving": "vada pav"}"#,
        );

        // Recommendation response
        provider.add_response(
            "Food Dost",
            "**1. Vada Pav at Ashok Vada Pav**\n\
             * **Price:** ₹25\n\
             * **Address:** Kirti College Lane, Dadar\n\
             * **Why it's Mast:** Ekdum crispy and legendary, boss.\n\
             * **Maps Link:** https://maps.google.com/?q=Ashok+Vada+Pav",
        );

        provider
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.write().unwrap().push(prompt.to_string());

        let responses = self.responses.read().unwrap();

        // Find first matching pattern (case-insensitive)
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        // Return default or error
        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                &prompt[..prompt.len().min(100)]
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_provider_matching() {
        let provider = FakeProvider::with_response("hello", "world");
        let result = provider.complete("Say hello to the user").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_provider_case_insensitive() {
        let provider = FakeProvider::with_response("HELLO", "world");
        let result = provider.complete("hello there").await.unwrap();
        assert_eq!(result, "world");
    }

    #[tokio::test]
    async fn test_fake_provider_no_match() {
        let provider = FakeProvider::new();
        let result = provider.complete("random prompt").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fake_provider_default_response() {
        let provider = FakeProvider::new().with_default_response("default");
        let result = provider.complete("random prompt").await.unwrap();
        assert_eq!(result, "default");
    }

    #[tokio::test]
    async fn test_fake_provider_records_prompts() {
        let provider = FakeProvider::new().with_default_response("ok");
        assert_eq!(provider.call_count(), 0);

        provider.complete("first prompt").await.unwrap();
        provider.complete("second prompt").await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.prompts(), vec!["first prompt", "second prompt"]);
    }

    #[tokio::test]
    async fn test_pipeline_responses() {
        let provider = FakeProvider::with_pipeline_responses();

        let result = provider
            .complete("Extract location, budget (in INR), and food craving")
            .await
            .unwrap();
        assert!(result.contains("Dadar"));

        let result = provider
            .complete("You are 'Food Dost,' a local Mumbaikar friend")
            .await
            .unwrap();
        assert!(result.contains("Vada Pav"));
    }
}
