//! Intent-extraction prompt: free text in, bare JSON object out.

/// Prompt name for log labels.
pub const EXTRACT_INTENT_PROMPT_NAME: &str = "extract_intent";

/// Render the extraction prompt for one user utterance.
///
/// The model is told to answer with nothing but a JSON object; the rules spell
/// out the defaulting contract so missing budget and craving come back filled
/// in while a missing location comes back as null.
pub fn render_extract_intent_prompt(utterance: &str) -> String {
    format!(
        r#"Extract location, budget (in INR), and food craving from the user's message.
Respond ONLY with a valid JSON object like {{"location": "...", "budget": ..., "craving": "..."}}.

RULES:
- The 'location' is mandatory. If you cannot find a location, set its value to null.
- **If the user does not mention a 'budget', assume it is 100 INR.**
- **If the user does not mention a specific 'craving', set the craving to "anything".**

USER MESSAGE: "{utterance}""#,
        utterance = utterance
    )
}
