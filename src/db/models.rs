//! Database models for briefs

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::model::{Brief, JobSignal, NewBrief, NewsItem, TechStackItem};

/// Database representation of a brief
#[derive(Debug, Clone, FromRow)]
pub struct BriefRow {
    pub id: Uuid,
    pub company_name: String,
    pub website: Option<String>,
    pub user_intent: String,
    pub summary: String,
    pub news: Json<Vec<NewsItem>>,
    pub tech_stack: Vec<String>,
    pub pitch_angle: String,
    pub subject_line: String,
    pub what_not_to_pitch: String,
    pub signal_tag: String,
    pub job_signals: Json<Vec<JobSignal>>,
    pub tech_stack_detail: Json<Vec<TechStackItem>>,
    pub key_insights: Json<Vec<String>>,
    pub confidence_notes: String,
    pub company_logo: String,
    pub company_domain: String,
    pub created_at: DateTime<Utc>,
}

impl BriefRow {
    /// Convert database row to domain model
    pub fn into_domain(self) -> Brief {
        Brief {
            id: self.id,
            fields: NewBrief {
                company_name: self.company_name,
                website: self.website,
                user_intent: self.user_intent,
                summary: self.summary,
                news: self.news.0,
                tech_stack: self.tech_stack,
                pitch_angle: self.pitch_angle,
                subject_line: self.subject_line,
                what_not_to_pitch: self.what_not_to_pitch,
                signal_tag: self.signal_tag,
                job_signals: self.job_signals.0,
                tech_stack_detail: self.tech_stack_detail.0,
                key_insights: self.key_insights.0,
                confidence_notes: self.confidence_notes,
                company_logo: self.company_logo,
                company_domain: self.company_domain,
            },
            created_at: self.created_at,
        }
    }
}
