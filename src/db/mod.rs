//! Database module for PostgreSQL persistence

#[cfg(test)]
pub mod memory;
pub mod models;
pub mod repository;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;

// Environment variable names
const ENV_POSTGRES_HOST: &str = "BRIEF_POSTGRES_HOST";
const ENV_POSTGRES_PORT: &str = "BRIEF_POSTGRES_PORT";
const ENV_POSTGRES_USER: &str = "BRIEF_POSTGRES_USER";
const ENV_POSTGRES_PASSWORD: &str = "BRIEF_POSTGRES_PASSWORD";
const ENV_POSTGRES_DB: &str = "BRIEF_POSTGRES_DB";

// Default values
const DEFAULT_POSTGRES_HOST: &str = "127.0.0.1";
const DEFAULT_POSTGRES_PORT: &str = "5432";
const DEFAULT_POSTGRES_USER: &str = "briefs";
const DEFAULT_POSTGRES_PASSWORD: &str = "briefs";
const DEFAULT_POSTGRES_DB: &str = "briefs";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Create a new database connection pool
pub async fn create_pool() -> Result<PgPool, DbError> {
    let host = env::var(ENV_POSTGRES_HOST).unwrap_or_else(|_| DEFAULT_POSTGRES_HOST.to_string());
    let port = env::var(ENV_POSTGRES_PORT).unwrap_or_else(|_| DEFAULT_POSTGRES_PORT.to_string());
    let user = env::var(ENV_POSTGRES_USER).unwrap_or_else(|_| DEFAULT_POSTGRES_USER.to_string());
    let password =
        env::var(ENV_POSTGRES_PASSWORD).unwrap_or_else(|_| DEFAULT_POSTGRES_PASSWORD.to_string());
    let database = env::var(ENV_POSTGRES_DB).unwrap_or_else(|_| DEFAULT_POSTGRES_DB.to_string());

    let database_url = format!(
        "postgres://{}:{}@{}:{}/{}",
        user, password, host, port, database
    );

    tracing::debug!(host = %host, port = %port, database = %database, "Connecting to PostgreSQL");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    tracing::info!(host = %host, port = %port, "PostgreSQL connection established");

    Ok(pool)
}

/// Initialize database schema
///
/// `id` and `created_at` are assigned by the database on insert.
pub async fn init_schema(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS briefs (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            company_name TEXT NOT NULL,
            website TEXT,
            user_intent TEXT NOT NULL,
            summary TEXT NOT NULL,
            news JSONB NOT NULL DEFAULT '[]',
            tech_stack TEXT[] NOT NULL DEFAULT '{}',
            pitch_angle TEXT NOT NULL,
            subject_line TEXT NOT NULL,
            what_not_to_pitch TEXT NOT NULL,
            signal_tag TEXT NOT NULL,
            job_signals JSONB NOT NULL DEFAULT '[]',
            tech_stack_detail JSONB NOT NULL DEFAULT '[]',
            key_insights JSONB NOT NULL DEFAULT '[]',
            confidence_notes TEXT NOT NULL DEFAULT '',
            company_logo TEXT NOT NULL DEFAULT '',
            company_domain TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_briefs_created_at ON briefs(created_at DESC)")
        .execute(pool)
        .await?;

    tracing::info!("Database schema initialized");

    Ok(())
}
