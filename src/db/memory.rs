//! In-memory brief store for handler and service tests

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::DbError;
use super::repository::BriefStore;
use crate::model::{Brief, NewBrief};

#[derive(Default)]
pub struct MemoryBriefStore {
    rows: Mutex<Vec<Brief>>,
    failure: Option<String>,
}

impl MemoryBriefStore {
    /// A store whose every operation fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            rows: Mutex::default(),
            failure: Some(message.to_string()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), DbError> {
        match &self.failure {
            Some(message) => Err(DbError::Sqlx(sqlx::Error::Protocol(message.clone()))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BriefStore for MemoryBriefStore {
    async fn insert(&self, brief: &NewBrief) -> Result<Brief, DbError> {
        self.check()?;
        let stored = Brief {
            id: Uuid::new_v4(),
            fields: brief.clone(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Brief>, DbError> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().rev().cloned().collect())
    }
}
