// src/tools/divergence.rs
//! Fed-vs-BoC divergence pivot. Takes the per-(date, bank) daily averages and
//! folds them into one row per date with both banks side by side.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::store::{DailyStanceRow, BANK_BOC, BANK_FED};

/// One date in the divergence series. A bank with no transcripts that day is
/// omitted from the payload but counts as 0.0 in the divergence.
#[derive(Debug, Clone, Serialize)]
pub struct DivergenceEntry {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boc: Option<f64>,
    pub divergence: f64,
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Pivots daily per-bank stance rows into a date-ascending divergence series.
/// Divergence is computed from the already-rounded per-bank scores so the
/// reported sides always add back up to the reported difference.
pub fn divergence_series(rows: &[DailyStanceRow]) -> Vec<DivergenceEntry> {
    let mut by_date: BTreeMap<&str, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for row in rows {
        let entry = by_date.entry(row.date.as_str()).or_default();
        if row.bank == BANK_FED {
            entry.0 = Some(round3(row.sentiment));
        } else if row.bank == BANK_BOC {
            entry.1 = Some(round3(row.sentiment));
        }
    }

    by_date
        .into_iter()
        .map(|(date, (fed, boc))| DivergenceEntry {
            date: date.to_string(),
            fed,
            boc,
            divergence: round3(fed.unwrap_or(0.0) - boc.unwrap_or(0.0)),
        })
        .collect()
}
