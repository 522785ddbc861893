// src/store/migrations.rs
//! Schema bootstrap for the sentiment store.
//!
//! The scoring pipeline owns the data in these tables; bootstrapping the
//! schema here keeps a fresh database usable without external tooling.

use anyhow::Result;
use sqlx::{Executor, SqlitePool};

/// One row per central bank release.
const CREATE_TRANSCRIPTS: &str = r#"
CREATE TABLE IF NOT EXISTS transcripts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bank_name TEXT NOT NULL,
    publish_date TEXT NOT NULL,
    title TEXT,
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#;

/// One row per scored sentence.
const CREATE_TRANSCRIPT_SENTENCES: &str = r#"
CREATE TABLE IF NOT EXISTS transcript_sentences (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    transcript_id INTEGER NOT NULL,
    sentence_text TEXT NOT NULL,
    topic TEXT NOT NULL,
    stance_score REAL NOT NULL,
    impact_weight REAL NOT NULL,
    reasoning TEXT,
    FOREIGN KEY (transcript_id) REFERENCES transcripts(id) ON DELETE CASCADE
);
"#;

const CREATE_INDICES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_sentences_transcript_id ON transcript_sentences(transcript_id);
CREATE INDEX IF NOT EXISTS idx_transcripts_publish_date ON transcripts(publish_date);
CREATE INDEX IF NOT EXISTS idx_transcripts_bank_name ON transcripts(bank_name);
"#;

/// Runs all migrations for the sentiment store.
/// Safe to call at every startup (idempotent).
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    pool.execute(CREATE_TRANSCRIPTS).await?;
    pool.execute(CREATE_TRANSCRIPT_SENTENCES).await?;
    pool.execute(CREATE_INDICES).await?;
    Ok(())
}
