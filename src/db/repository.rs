//! Repository for brief database operations

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use super::DbError;
use super::models::BriefRow;
use crate::model::{Brief, NewBrief};

/// Storage for briefs: insert-and-return plus newest-first listing
#[async_trait]
pub trait BriefStore: Send + Sync {
    /// Insert one brief and return the stored row
    async fn insert(&self, brief: &NewBrief) -> Result<Brief, DbError>;

    /// All briefs, newest first
    async fn list_all(&self) -> Result<Vec<Brief>, DbError>;
}

/// PostgreSQL-backed brief repository
#[derive(Clone)]
pub struct BriefRepository {
    pool: PgPool,
}

impl BriefRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BriefStore for BriefRepository {
    async fn insert(&self, brief: &NewBrief) -> Result<Brief, DbError> {
        let row: BriefRow = sqlx::query_as(
            r#"
            INSERT INTO briefs (
                company_name, website, user_intent, summary, news, tech_stack,
                pitch_angle, subject_line, what_not_to_pitch, signal_tag,
                job_signals, tech_stack_detail, key_insights, confidence_notes,
                company_logo, company_domain
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(&brief.company_name)
        .bind(&brief.website)
        .bind(&brief.user_intent)
        .bind(&brief.summary)
        .bind(Json(&brief.news))
        .bind(&brief.tech_stack)
        .bind(&brief.pitch_angle)
        .bind(&brief.subject_line)
        .bind(&brief.what_not_to_pitch)
        .bind(&brief.signal_tag)
        .bind(Json(&brief.job_signals))
        .bind(Json(&brief.tech_stack_detail))
        .bind(Json(&brief.key_insights))
        .bind(&brief.confidence_notes)
        .bind(&brief.company_logo)
        .bind(&brief.company_domain)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = %row.id, company = %row.company_name, "Inserted brief");
        Ok(row.into_domain())
    }

    async fn list_all(&self) -> Result<Vec<Brief>, DbError> {
        let rows: Vec<BriefRow> = sqlx::query_as(
            r#"
            SELECT * FROM briefs
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BriefRow::into_domain).collect())
    }
}
