//! Prompt templates for the two model calls.

pub mod extract_intent;
pub mod recommend;

pub use extract_intent::render_extract_intent_prompt;
pub use recommend::render_recommend_prompt;
