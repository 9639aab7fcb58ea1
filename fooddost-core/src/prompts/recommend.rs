//! Recommendation prompt: intent plus the full dataset and a time context.

use crate::extract::ANY_CRAVING;

/// Prompt name for log labels.
pub const RECOMMEND_PROMPT_NAME: &str = "recommend";

/// Render the recommendation prompt.
///
/// `database_json` is the full table as JSON records; no rows are filtered out
/// locally. The craving instruction branches on the "anything" sentinel
/// (case-insensitive): with no stated preference the model is steered toward
/// popular picks for the location and time of day.
pub fn render_recommend_prompt(
    location: &str,
    budget: u32,
    craving: &str,
    time_display: &str,
    database_json: &str,
) -> String {
    let craving_instruction = if craving.eq_ignore_ascii_case(ANY_CRAVING) {
        "The user is open to anything, so recommend your most popular, iconic, or must-try dishes suitable for the location and time".to_string()
    } else {
        format!("The user is in the mood for '{craving}'", craving = craving)
    };

    format!(
        r#"You are 'Food Dost,' a local Mumbaikar friend who knows all the best khau gallis.
Your tone should be friendly, casual, and use some Hinglish or Mumbai slang (like 'boss', 'mast', 'ekdum', 'paisa vasool').
Keep your answers short because the user is hungry.

A user is near '{location}' with a budget of ₹{budget}.
It is currently {time} in Mumbai.
{craving_instruction}. Use this time context to make your recommendations more relevant (e.g., suggest breakfast in the morning, dinner spots in the evening, or late-night snacks after 10 PM).

From the JSON DATABASE below, recommend up to 3 of the best options.

Your goal is to give variety. If the user's budget allows, strongly prioritize recommending dishes from DIFFERENT stalls.

Respond ONLY with a list. For each recommendation, you MUST use the following format exactly, pulling the real link from the 'gmaps_link' field in the JSON:

**1. [Dish Name] at [Stall Name]**
* **Price:** ₹[Price]
* **Address:** [Landmark], [Location Area]
* **Why it's Mast:** [A very short, 1-sentence reason why it's a great choice for their specific craving and situation.]
* **Maps Link:** [Google Maps Link]

--- JSON DATABASE ---
{database_json}"#,
        location = location,
        budget = budget,
        time = time_display,
        craving_instruction = craving_instruction,
        database_json = database_json
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const DB_JSON: &str = r#"[{"dish_name": "Vada Pav", "gmaps_link": "https://maps.google.com/?q=Ashok"}]"#;

    #[test]
    fn test_render_prompt_with_craving() {
        let prompt =
            render_recommend_prompt("CST", 200, "cheesy", "7:45 PM on a Saturday", DB_JSON);

        assert!(prompt.contains("near 'CST' with a budget of ₹200"));
        assert!(prompt.contains("7:45 PM on a Saturday"));
        assert!(prompt.contains("in the mood for 'cheesy'"));
        assert!(prompt.contains("up to 3"));
        assert!(prompt.contains("'gmaps_link'"));
        assert!(prompt.contains(DB_JSON));
    }

    #[test]
    fn test_render_prompt_open_to_anything() {
        let prompt =
            render_recommend_prompt("Dadar", 100, "anything", "9:05 AM on a Monday", DB_JSON);

        assert!(prompt.contains("open to anything"));
        assert!(!prompt.contains("in the mood for"));
    }

    #[test]
    fn test_sentinel_is_case_insensitive() {
        let prompt =
            render_recommend_prompt("Dadar", 100, "Anything", "9:05 AM on a Monday", DB_JSON);

        assert!(prompt.contains("open to anything"));
    }
}
