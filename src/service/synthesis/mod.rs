//! Narrative synthesis of collected evidence into an outreach analysis

pub mod extract;
pub mod prompts;

use crate::model::{AiAnalysis, JobSignal, NewsItem, TechStackItem};
use crate::service::llm::LlmClient;

use extract::merge_reply;
use prompts::{build_synthesis_prompt, SYNTHESIS_SYSTEM_PROMPT};

/// Inputs to one synthesis call
#[derive(Debug, Clone, Copy)]
pub struct SynthesisContext<'a> {
    pub company_name: &'a str,
    pub website: Option<&'a str>,
    pub domain: &'a str,
    pub user_intent: &'a str,
    pub news: &'a [NewsItem],
    pub jobs: &'a [JobSignal],
    pub tech_stack: &'a [TechStackItem],
}

/// Turns evidence into an [`AiAnalysis`] using the completion provider
///
/// Without a configured client every call returns the placeholder analysis.
pub struct NarrativeSynthesizer {
    llm: Option<LlmClient>,
}

impl NarrativeSynthesizer {
    pub fn new(llm: Option<LlmClient>) -> Self {
        if llm.is_none() {
            tracing::info!("GROQ_API_KEY not set, brief synthesis will use placeholder analysis");
        }
        Self { llm }
    }

    /// Synthesize an analysis; any provider or parse failure falls back to the placeholder
    pub async fn synthesize(&self, ctx: &SynthesisContext<'_>) -> AiAnalysis {
        let analysis = AiAnalysis::placeholder();

        let Some(llm) = &self.llm else {
            return analysis;
        };

        let start_time = std::time::Instant::now();
        let prompt = build_synthesis_prompt(ctx);

        tracing::debug!(
            company = %ctx.company_name,
            model = %llm.model(),
            prompt_length = prompt.len(),
            "Requesting brief synthesis"
        );

        match llm.complete(SYNTHESIS_SYSTEM_PROMPT, &prompt).await {
            Ok(reply) => {
                tracing::info!(
                    company = %ctx.company_name,
                    model = %llm.model(),
                    elapsed_ms = start_time.elapsed().as_millis(),
                    "Brief synthesis completed"
                );
                merge_reply(analysis, &reply)
            }
            Err(e) => {
                tracing::warn!(
                    company = %ctx.company_name,
                    model = %llm.model(),
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "Brief synthesis failed, using placeholder analysis"
                );
                analysis
            }
        }
    }
}
