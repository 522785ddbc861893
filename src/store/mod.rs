// src/store/mod.rs
//! Read-side queries over the sentiment analytics store.
//!
//! Two relations, written by the upstream scoring pipeline: `transcripts`
//! (one row per release) and `transcript_sentences` (one row per scored
//! sentence). Publish dates are ISO-8601 text, so lexicographic comparison
//! is chronological and date filters are plain string comparisons.

pub mod migrations;

use anyhow::Result;
use serde::Serialize;
use sqlx::SqlitePool;

/// Canonical bank labels used by the scoring pipeline.
pub const BANK_FED: &str = "Fed";
pub const BANK_BOC: &str = "BoC";

/// Search hits returned per keyword query.
pub const SEARCH_RESULT_LIMIT: i64 = 20;

// ============================================================================
// Row types
// ============================================================================

/// Average stance across all of one bank's sentences on one date.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SentimentSummaryRow {
    pub date: String,
    pub avg_sentiment: f64,
    pub sentence_count: i64,
}

/// One transcript with its aggregate sentiment. `sentiment` is null when the
/// transcript has no scored sentences yet.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TranscriptRow {
    pub id: i64,
    pub bank: String,
    pub date: String,
    pub title: Option<String>,
    pub sentiment: Option<f64>,
    pub sentence_count: i64,
}

/// One scored sentence of a transcript.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SentenceRow {
    pub id: i64,
    pub text: String,
    pub score: f64,
    pub impact: f64,
    pub topic: String,
    pub reasoning: Option<String>,
}

/// One keyword search hit.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SearchHitRow {
    pub text: String,
    pub score: f64,
    pub topic: String,
    pub bank: String,
    pub date: String,
}

/// Average stance of one bank on one date, input to the divergence pivot.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyStanceRow {
    pub date: String,
    pub bank: String,
    pub sentiment: f64,
}

// ============================================================================
// Store
// ============================================================================

#[derive(Clone)]
pub struct SentimentStore {
    pool: SqlitePool,
}

impl SentimentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Average stance per publish date for one bank, ascending by date.
    pub async fn sentiment_summary(
        &self,
        bank: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<SentimentSummaryRow>> {
        let mut conditions = vec!["t.bank_name = ?"];
        if start_date.is_some() {
            conditions.push("t.publish_date >= ?");
        }
        if end_date.is_some() {
            conditions.push("t.publish_date <= ?");
        }
        let sql = format!(
            "SELECT t.publish_date AS date, AVG(ts.stance_score) AS avg_sentiment, \
                    COUNT(*) AS sentence_count \
             FROM transcript_sentences ts \
             JOIN transcripts t ON ts.transcript_id = t.id \
             WHERE {} \
             GROUP BY t.publish_date \
             ORDER BY t.publish_date",
            conditions.join(" AND ")
        );

        let mut query = sqlx::query_as::<_, SentimentSummaryRow>(&sql).bind(bank);
        if let Some(start) = start_date {
            query = query.bind(start);
        }
        if let Some(end) = end_date {
            query = query.bind(end);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Transcripts with their aggregate sentiment, newest first. The LEFT JOIN
    /// keeps transcripts that have no sentences: count 0, null sentiment.
    pub async fn transcripts(
        &self,
        bank: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        limit: i64,
    ) -> Result<Vec<TranscriptRow>> {
        let mut conditions: Vec<&str> = Vec::new();
        if bank.is_some() {
            conditions.push("t.bank_name = ?");
        }
        if start_date.is_some() {
            conditions.push("t.publish_date >= ?");
        }
        if end_date.is_some() {
            conditions.push("t.publish_date <= ?");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {} ", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT t.id, t.bank_name AS bank, t.publish_date AS date, t.title, \
                    AVG(ts.stance_score) AS sentiment, COUNT(ts.id) AS sentence_count \
             FROM transcripts t \
             LEFT JOIN transcript_sentences ts ON t.id = ts.transcript_id \
             {}GROUP BY t.id, t.bank_name, t.publish_date \
             ORDER BY t.publish_date DESC \
             LIMIT ?",
            where_clause
        );

        let mut query = sqlx::query_as::<_, TranscriptRow>(&sql);
        if let Some(bank) = bank {
            query = query.bind(bank);
        }
        if let Some(start) = start_date {
            query = query.bind(start);
        }
        if let Some(end) = end_date {
            query = query.bind(end);
        }
        Ok(query.bind(limit).fetch_all(&self.pool).await?)
    }

    /// Scored sentences of one transcript in insertion order. `limit` caps
    /// the rows handed to the model; `None` returns the full breakdown.
    pub async fn transcript_sentences(
        &self,
        transcript_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<SentenceRow>> {
        let mut sql = String::from(
            "SELECT ts.id, ts.sentence_text AS text, ts.stance_score AS score, \
                    ts.impact_weight AS impact, ts.topic, ts.reasoning \
             FROM transcript_sentences ts \
             WHERE ts.transcript_id = ? \
             ORDER BY ts.id ASC",
        );
        if limit.is_some() {
            sql.push_str(" LIMIT ?");
        }

        let mut query = sqlx::query_as::<_, SentenceRow>(&sql).bind(transcript_id);
        if let Some(limit) = limit {
            query = query.bind(limit);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Substring search over sentence text, newest first, capped at
    /// [`SEARCH_RESULT_LIMIT`] hits. SQLite LIKE is case-insensitive for
    /// ASCII, matching the original case-insensitive contract.
    pub async fn search_sentences(
        &self,
        keyword: &str,
        bank: Option<&str>,
        topic: Option<&str>,
    ) -> Result<Vec<SearchHitRow>> {
        let mut conditions = vec!["ts.sentence_text LIKE ?"];
        if bank.is_some() {
            conditions.push("t.bank_name = ?");
        }
        if topic.is_some() {
            conditions.push("ts.topic = ?");
        }
        let sql = format!(
            "SELECT ts.sentence_text AS text, ts.stance_score AS score, ts.topic, \
                    t.bank_name AS bank, t.publish_date AS date \
             FROM transcript_sentences ts \
             JOIN transcripts t ON ts.transcript_id = t.id \
             WHERE {} \
             ORDER BY t.publish_date DESC \
             LIMIT ?",
            conditions.join(" AND ")
        );

        let mut query =
            sqlx::query_as::<_, SearchHitRow>(&sql).bind(format!("%{}%", keyword));
        if let Some(bank) = bank {
            query = query.bind(bank);
        }
        if let Some(topic) = topic {
            query = query.bind(topic);
        }
        Ok(query.bind(SEARCH_RESULT_LIMIT).fetch_all(&self.pool).await?)
    }

    /// Average stance per (date, bank) pair, the input to the divergence
    /// pivot. Ordering is left to the pivot.
    pub async fn daily_stance(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<DailyStanceRow>> {
        let mut conditions: Vec<&str> = Vec::new();
        if start_date.is_some() {
            conditions.push("t.publish_date >= ?");
        }
        if end_date.is_some() {
            conditions.push("t.publish_date <= ?");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {} ", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT t.publish_date AS date, t.bank_name AS bank, \
                    AVG(ts.stance_score) AS sentiment \
             FROM transcript_sentences ts \
             JOIN transcripts t ON ts.transcript_id = t.id \
             {}GROUP BY t.publish_date, t.bank_name",
            where_clause
        );

        let mut query = sqlx::query_as::<_, DailyStanceRow>(&sql);
        if let Some(start) = start_date {
            query = query.bind(start);
        }
        if let Some(end) = end_date {
            query = query.bind(end);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}
