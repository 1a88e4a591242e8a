//! Best-effort recovery of a JSON analysis from free-form model output

use std::sync::LazyLock;

use regex::Regex;

use crate::model::AiAnalysis;

/// Greedy: first `{` through last `}`
static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("static regex is valid"));

/// Merge whatever the reply yields onto `base`
///
/// Replies with no `{...}` span, invalid JSON, or a non-object value leave
/// `base` unchanged.
pub fn merge_reply(mut base: AiAnalysis, reply: &str) -> AiAnalysis {
    let Some(span) = JSON_OBJECT.find(reply) else {
        tracing::debug!("No JSON object found in model reply, using fallback");
        return base;
    };

    match serde_json::from_str::<serde_json::Value>(span.as_str()) {
        Ok(serde_json::Value::Object(object)) => {
            let merged = base.merge_object(object);
            tracing::debug!(merged_fields = merged, extra_fields = base.extra.len(), "Merged model reply");
        }
        Ok(_) => tracing::debug!("Model reply JSON is not an object, using fallback"),
        Err(e) => tracing::debug!(error = %e, "Failed to parse model reply as JSON, using fallback"),
    }

    base
}
