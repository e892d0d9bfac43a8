//! Prompt templates and structured-output schema for the generative model

use crate::error::Result;
use crate::model::NewsItem;
use minijinja::{Environment, context};

/// Characters of the summary the generative model sees
pub const GEMINI_SUMMARY_CHARS: usize = 300;

/// Characters of the summary appended to each FinBERT text
pub const FINBERT_SUMMARY_CHARS: usize = 200;

const SYSTEM_PROMPT: &str =
    "You are a financial analyst with expertise in news sentiment analysis.";

const SENTIMENT_TEMPLATE: &str = r#"Task: Analyze the sentiment of this financial news. Focus PRIMARILY on the headline as it contains the main message.

MAIN HEADLINE: "{{ title }}"
{%- if summary %}
Supporting Context: "{{ summary }}"
{%- endif %}

Important Guidelines:
- The headline sentiment takes priority over any hypothetical scenarios in the context
- Words like "pleased", "stellar", "gain", "surge" indicate POSITIVE sentiment
- Words like "plunge", "loss", "crash", "disappointing" indicate NEGATIVE sentiment
- Don't be misled by hypothetical "what-if" scenarios mentioned in the context

Output Requirements:
1. sentiment: strictly "Positive", "Negative", or "Neutral" based on the headline's primary message.
2. confidenceScore: 0.0 to 1.0 based on how explicit the sentiment is.
3. explanation: A concise, professional 1-sentence rationale for the investor."#;

/// System instruction sent with every sentiment request
pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

/// Render the per-article sentiment prompt
pub fn sentiment_prompt(item: &NewsItem) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("sentiment", SENTIMENT_TEMPLATE)?;
    let template = env.get_template("sentiment")?;
    let rendered = template.render(context! {
        title => item.title.trim(),
        summary => truncate_chars(item.summary.trim(), GEMINI_SUMMARY_CHARS),
    })?;
    Ok(rendered)
}

/// Response schema constraining the model's JSON output
pub fn sentiment_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "sentiment": {
                "type": "STRING",
                "enum": ["Positive", "Negative", "Neutral"]
            },
            "confidenceScore": { "type": "NUMBER" },
            "explanation": { "type": "STRING" }
        },
        "required": ["sentiment", "confidenceScore", "explanation"]
    })
}

/// Headline-weighted input text for FinBERT
pub fn finbert_text(item: &NewsItem) -> String {
    format!(
        "HEADLINE: {title}. HEADLINE AGAIN: {title}. Additional context: {context}",
        title = item.title,
        context = truncate_chars(&item.summary, FINBERT_SUMMARY_CHARS),
    )
}

/// First `max` characters of `text`, cut on a char boundary
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
