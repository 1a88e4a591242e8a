//! Prompts for brief synthesis

use chrono::{DateTime, NaiveDateTime};

use super::SynthesisContext;

/// System prompt for brief synthesis
pub const SYNTHESIS_SYSTEM_PROMPT: &str = "You are an expert B2B strategist. Generate strategic insights in JSON format only, based on real data signals. Be specific and avoid generic business language.";

const NO_NEWS: &str = "No recent news found";
const NO_JOBS: &str = "No current job postings found";

/// Build the synthesis prompt from collected evidence
pub fn build_synthesis_prompt(ctx: &SynthesisContext<'_>) -> String {
    let news_context = if ctx.news.is_empty() {
        NO_NEWS.to_string()
    } else {
        ctx.news
            .iter()
            .map(|n| format!("\"{}\" ({}, {})", n.title, n.source, display_date(&n.published_at)))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let job_context = if ctx.jobs.is_empty() {
        NO_JOBS.to_string()
    } else {
        ctx.jobs
            .iter()
            .map(|j| format!("{} in {} ({})", j.title, j.location, j.employment_type))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let tech_context = ctx
        .tech_stack
        .iter()
        .map(|t| format!("{} ({})", t.name, t.confidence))
        .collect::<Vec<_>>()
        .join(", ");

    let website = ctx.website.unwrap_or("Not provided");
    let domain = if ctx.domain.is_empty() { "Unknown" } else { ctx.domain };

    format!(
        r#"You are an expert B2B strategist analyzing real company data. Generate a strategic brief based on ACTUAL signals, not generic assumptions.

COMPANY: {company}
WEBSITE: {website}
DOMAIN: {domain}
USER INTENT: {intent}

REAL-TIME NEWS HEADLINES:
{news_context}

HIRING SIGNALS (Current Job Postings):
{job_context}

DETECTED TECH STACK:
{tech_context}

Generate a strategic brief with these sections:

1. EXECUTIVE SUMMARY (2-3 sentences with specific "why now" timing based on actual signals)
2. KEY INSIGHTS (3-4 bullet points referencing real data from news/jobs)
3. STRATEGIC PITCH ANGLE (creative, specific to their current situation, avoid generic phrases)
4. EMAIL SUBJECT LINE (personalized, reference specific signal)
5. WHAT NOT TO PITCH (based on their actual stage/focus from signals)
6. SIGNAL TAG (descriptive label like "Scaling AI Team" or "Post-Funding Growth")

RULES:
- Reference specific news headlines, job titles, or tech signals
- Avoid generic phrases like "cutting-edge solution" or "ideal time to pitch"
- Use real market triggers and timing
- Be specific about WHY NOW based on actual data
- If no strong signals, be honest about limited data

Format as JSON with keys: summary, keyInsights, pitchAngle, subjectLine, whatNotToPitch, signalTag, confidenceNotes"#,
        company = ctx.company_name,
        intent = ctx.user_intent,
    )
}

/// Calendar date of a provider timestamp, or the raw value if it doesn't parse
fn display_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}
