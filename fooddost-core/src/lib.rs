pub mod chat;
pub mod clock;
pub mod compose;
pub mod config;
pub mod dataset;
pub mod extract;
pub mod llm;
pub mod prompts;

pub use chat::{ChatMessage, ChatSession, Role, GREETING};
pub use clock::TimeContext;
pub use compose::{compose_recommendations, ComposeError};
pub use config::{AppConfig, ConfigError};
pub use dataset::{
    DatasetFetcher, DatasetProvider, FoodItem, FoodTable, HttpFetcher, MockFetcher,
};
pub use extract::{extract_intent, ExtractError, Intent, ANY_CRAVING, DEFAULT_BUDGET_INR};
pub use llm::{FakeProvider, GeminiProvider, LlmError, LlmProvider};
