//! Brief domain types: the incoming request, collected evidence, and the persisted record

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Fallback for `confidenceNotes` when the analysis ends up with none
pub const DEFAULT_CONFIDENCE_NOTES: &str = "Analysis based on available data";

/// Body of `POST /create-brief`
///
/// Required fields are optional at the serde level so that a missing or `null`
/// value is reported as a validation failure rather than a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BriefRequest {
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub user_intent: Option<String>,
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub company_name: String,
    pub website: Option<String>,
    pub user_intent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Company name and user intent are required")]
pub struct MissingRequiredFields;

impl BriefRequest {
    /// Reject requests without a company name or user intent; blank website is dropped
    pub fn validate(self) -> Result<ValidatedRequest, MissingRequiredFields> {
        let company_name = non_blank(self.company_name).ok_or(MissingRequiredFields)?;
        let user_intent = non_blank(self.user_intent).ok_or(MissingRequiredFields)?;

        Ok(ValidatedRequest {
            company_name,
            website: non_blank(self.website),
            user_intent,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A news headline about the company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub description: String,
    pub url: String,
    pub published_at: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

/// An open job posting attributed to the company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JobSignal {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub employment_type: String,
    pub posted: String,
}

/// Strength of a technology guess, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TechConfidence {
    Detected,
    Likely,
    Inferred,
}

impl TechConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            TechConfidence::Detected => "detected",
            TechConfidence::Likely => "likely",
            TechConfidence::Inferred => "inferred",
        }
    }
}

impl fmt::Display for TechConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A technology the company probably uses, with where the guess came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TechStackItem {
    pub name: String,
    pub confidence: TechConfidence,
    pub source: String,
}

impl TechStackItem {
    pub fn new(name: &str, confidence: TechConfidence, source: &str) -> Self {
        Self {
            name: name.to_string(),
            confidence,
            source: source.to_string(),
        }
    }
}

/// Narrative produced by the language model
///
/// Starts from [`AiAnalysis::placeholder`]; fields the model supplies replace the
/// placeholder one at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub summary: String,
    pub key_insights: Vec<String>,
    pub pitch_angle: String,
    pub subject_line: String,
    pub what_not_to_pitch: String,
    pub signal_tag: String,
    pub confidence_notes: String,
    /// Fields the model returned that are not part of the brief (not persisted)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[schema(value_type = Object)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl AiAnalysis {
    pub fn placeholder() -> Self {
        Self {
            summary: "Strategic analysis in progress...".to_string(),
            key_insights: Vec::new(),
            pitch_angle: "Personalized recommendations being generated...".to_string(),
            subject_line: "Crafting compelling subject line...".to_string(),
            what_not_to_pitch: "Risk assessment in progress...".to_string(),
            signal_tag: "Processing market signals...".to_string(),
            confidence_notes: "Analysis based on real-time data".to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Shallow-merge a decoded JSON object onto this analysis
    ///
    /// A known field is replaced only if its value decodes into the field's type;
    /// otherwise the current value stays. A null `confidenceNotes` clears the
    /// notes so the record falls back to [`DEFAULT_CONFIDENCE_NOTES`].
    /// Unknown keys land in `extra`. Returns the number of known fields that were replaced.
    pub fn merge_object(&mut self, object: serde_json::Map<String, serde_json::Value>) -> usize {
        let mut merged = 0;
        for (key, value) in object {
            let applied = match key.as_str() {
                "summary" => decode_into(&mut self.summary, value),
                "keyInsights" => decode_into(&mut self.key_insights, value),
                "pitchAngle" => decode_into(&mut self.pitch_angle, value),
                "subjectLine" => decode_into(&mut self.subject_line, value),
                "whatNotToPitch" => decode_into(&mut self.what_not_to_pitch, value),
                "signalTag" => decode_into(&mut self.signal_tag, value),
                "confidenceNotes" if value.is_null() => {
                    self.confidence_notes.clear();
                    true
                }
                "confidenceNotes" => decode_into(&mut self.confidence_notes, value),
                _ => {
                    self.extra.insert(key, value);
                    false
                }
            };
            if applied {
                merged += 1;
            }
        }
        merged
    }
}

impl Default for AiAnalysis {
    fn default() -> Self {
        Self::placeholder()
    }
}

fn decode_into<T: DeserializeOwned>(slot: &mut T, value: serde_json::Value) -> bool {
    match serde_json::from_value(value) {
        Ok(decoded) => {
            *slot = decoded;
            true
        }
        Err(_) => false,
    }
}

/// Domain and logo derived from the company website
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyIdentity {
    pub domain: String,
    pub logo: String,
}

/// Everything the evidence collector gathered for one request
#[derive(Debug, Clone, Default)]
pub struct Evidence {
    pub identity: CompanyIdentity,
    pub news: Vec<NewsItem>,
    pub jobs: Vec<JobSignal>,
}

/// A brief ready to be inserted; the store assigns `id` and `createdAt`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBrief {
    pub company_name: String,
    pub website: Option<String>,
    pub user_intent: String,
    pub summary: String,
    pub news: Vec<NewsItem>,
    /// Technology names only, kept alongside `techStackDetail` for list views
    pub tech_stack: Vec<String>,
    pub pitch_angle: String,
    pub subject_line: String,
    pub what_not_to_pitch: String,
    pub signal_tag: String,
    pub job_signals: Vec<JobSignal>,
    pub tech_stack_detail: Vec<TechStackItem>,
    pub key_insights: Vec<String>,
    pub confidence_notes: String,
    pub company_logo: String,
    pub company_domain: String,
}

impl NewBrief {
    pub fn assemble(
        request: ValidatedRequest,
        evidence: Evidence,
        tech_stack: Vec<TechStackItem>,
        analysis: AiAnalysis,
    ) -> Self {
        let confidence_notes = if analysis.confidence_notes.trim().is_empty() {
            DEFAULT_CONFIDENCE_NOTES.to_string()
        } else {
            analysis.confidence_notes
        };

        Self {
            company_name: request.company_name,
            website: request.website,
            user_intent: request.user_intent,
            summary: analysis.summary,
            news: evidence.news,
            tech_stack: tech_stack.iter().map(|t| t.name.clone()).collect(),
            pitch_angle: analysis.pitch_angle,
            subject_line: analysis.subject_line,
            what_not_to_pitch: analysis.what_not_to_pitch,
            signal_tag: analysis.signal_tag,
            job_signals: evidence.jobs,
            tech_stack_detail: tech_stack,
            key_insights: analysis.key_insights,
            confidence_notes,
            company_logo: evidence.identity.logo,
            company_domain: evidence.identity.domain,
        }
    }
}

/// A persisted brief
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Brief {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: NewBrief,
    pub created_at: DateTime<Utc>,
}
