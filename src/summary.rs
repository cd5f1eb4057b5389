use crate::scorer::ScoreRecord;
use serde::Serialize;

/// Composite bands used by the summary table, as `(label, lower bound)`.
pub const COMPOSITE_BANDS: [(&str, f64); 5] = [
    ("< 2", f64::NEG_INFINITY),
    ("2 - 4", 2.0),
    ("4 - 6", 4.0),
    ("6 - 8", 6.0),
    (">= 8", 8.0),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub distribution: [usize; 5],
}

impl ScoreSummary {
    pub fn from_records(records: &[ScoreRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let mut summary = Self {
            count: records.len(),
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            ..Default::default()
        };
        let mut total = 0.0;

        for r in records {
            let c = r.composite_score;
            total += c;
            summary.min = summary.min.min(c);
            summary.max = summary.max.max(c);
            summary.distribution[band_index(c)] += 1;
        }
        summary.mean = total / records.len() as f64;
        summary
    }
}

fn band_index(composite: f64) -> usize {
    COMPOSITE_BANDS
        .iter()
        .rposition(|(_, lower)| composite >= *lower)
        .unwrap_or(0)
}
