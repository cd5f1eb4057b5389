use super::types::{FeatureAttributes, ScoreRecord};
use super::weights::NormalizedWeights;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use strum_macros::{Display, EnumIter};
use tracing::{debug, info, warn};

/// Which dimension a diagnostic concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "snake_case")]
pub enum Dimension {
    SeparationLevel,
    StreetClassification,
    SpeedLimit,
}

/// Something the scorer had to paper over. None of these are errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringEvent<'a> {
    MissingAttribute {
        dimension: Dimension,
        default_key: &'a str,
    },
    UnknownCategory {
        dimension: Dimension,
        value: &'a str,
        default_key: &'a str,
    },
    UnparseableSpeed {
        raw: String,
    },
    /// The default category itself is absent, so the hardcoded score was used.
    MissingDefaultCategory {
        dimension: Dimension,
        default_key: &'a str,
        fallback: f64,
    },
    ZeroTotalWeight,
}

impl ScoringEvent<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            ScoringEvent::MissingAttribute { .. } => EventKind::MissingAttribute,
            ScoringEvent::UnknownCategory { .. } => EventKind::UnknownCategory,
            ScoringEvent::UnparseableSpeed { .. } => EventKind::UnparseableSpeed,
            ScoringEvent::MissingDefaultCategory { .. } => EventKind::MissingDefaultCategory,
            ScoringEvent::ZeroTotalWeight => EventKind::ZeroTotalWeight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    MissingAttribute,
    UnknownCategory,
    UnparseableSpeed,
    MissingDefaultCategory,
    ZeroTotalWeight,
}

/// Receives diagnostics from the scoring pipeline. Implementations must be
/// shareable across the rayon pool.
pub trait ScoreObserver: Send + Sync {
    fn on_event(&self, event: &ScoringEvent<'_>);

    fn on_scored(
        &self,
        _attrs: &FeatureAttributes,
        _weights: &NormalizedWeights,
        _record: &ScoreRecord,
    ) {
    }
}

pub struct NullObserver;

impl ScoreObserver for NullObserver {
    fn on_event(&self, _event: &ScoringEvent<'_>) {}
}

impl<A: ScoreObserver, B: ScoreObserver> ScoreObserver for (A, B) {
    fn on_event(&self, event: &ScoringEvent<'_>) {
        self.0.on_event(event);
        self.1.on_event(event);
    }

    fn on_scored(&self, attrs: &FeatureAttributes, weights: &NormalizedWeights, record: &ScoreRecord) {
        self.0.on_scored(attrs, weights, record);
        self.1.on_scored(attrs, weights, record);
    }
}

impl<T: ScoreObserver + ?Sized> ScoreObserver for &T {
    fn on_event(&self, event: &ScoringEvent<'_>) {
        (**self).on_event(event);
    }

    fn on_scored(&self, attrs: &FeatureAttributes, weights: &NormalizedWeights, record: &ScoreRecord) {
        (**self).on_scored(attrs, weights, record);
    }
}

/// Routes diagnostics to `tracing`. The first `sample_limit` scored
/// features are also logged with their inputs and intermediate scores.
pub struct TracingObserver {
    sample_limit: usize,
    sampled: AtomicUsize,
}

impl TracingObserver {
    pub fn new(sample_limit: usize) -> Self {
        Self {
            sample_limit,
            sampled: AtomicUsize::new(0),
        }
    }

    pub fn sampled(&self) -> usize {
        self.sampled.load(Ordering::Relaxed).min(self.sample_limit)
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new(crate::consts::DEFAULT_SAMPLE_LIMIT)
    }
}

impl ScoreObserver for TracingObserver {
    fn on_event(&self, event: &ScoringEvent<'_>) {
        match event {
            ScoringEvent::MissingAttribute {
                dimension,
                default_key,
            } => debug!(%dimension, default_key, "missing attribute, using default category"),
            ScoringEvent::UnknownCategory {
                dimension,
                value,
                default_key,
            } => warn!(%dimension, value, default_key, "unknown category, using default category"),
            ScoringEvent::UnparseableSpeed { raw } => {
                warn!(raw = raw.as_str(), "invalid maxspeed_int value, using default speed")
            }
            ScoringEvent::MissingDefaultCategory {
                dimension,
                default_key,
                fallback,
            } => warn!(
                %dimension,
                default_key,
                fallback,
                "default category not configured, using hardcoded score"
            ),
            ScoringEvent::ZeroTotalWeight => debug!("total weight is 0, composite score is 0"),
        }
    }

    fn on_scored(&self, attrs: &FeatureAttributes, weights: &NormalizedWeights, record: &ScoreRecord) {
        let n = self.sampled.fetch_add(1, Ordering::Relaxed);
        if n >= self.sample_limit {
            return;
        }
        info!(
            calculation = n + 1,
            separation_level = ?attrs.separation_level,
            street_classification = ?attrs.street_classification,
            maxspeed_int = ?attrs.maxspeed_int,
            separation = record.separation_level_score,
            street_class = record.street_classification_score,
            speed = record.maxspeed_int_score,
            w_separation = weights.separation,
            w_speed = weights.speed,
            w_busyness = weights.busyness,
            composite = record.composite_score,
            "sample calculation"
        );
    }
}

/// Counts events per kind. Cheap enough to leave on for whole runs.
#[derive(Default)]
pub struct DiagnosticTally {
    missing_attribute: AtomicU64,
    unknown_category: AtomicU64,
    unparseable_speed: AtomicU64,
    missing_default_category: AtomicU64,
    zero_total_weight: AtomicU64,
    scored: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticCounts {
    pub missing_attribute: u64,
    pub unknown_category: u64,
    pub unparseable_speed: u64,
    pub missing_default_category: u64,
    pub zero_total_weight: u64,
    pub scored: u64,
}

impl DiagnosticCounts {
    pub fn get(&self, kind: EventKind) -> u64 {
        match kind {
            EventKind::MissingAttribute => self.missing_attribute,
            EventKind::UnknownCategory => self.unknown_category,
            EventKind::UnparseableSpeed => self.unparseable_speed,
            EventKind::MissingDefaultCategory => self.missing_default_category,
            EventKind::ZeroTotalWeight => self.zero_total_weight,
        }
    }
}

impl DiagnosticTally {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, kind: EventKind) -> &AtomicU64 {
        match kind {
            EventKind::MissingAttribute => &self.missing_attribute,
            EventKind::UnknownCategory => &self.unknown_category,
            EventKind::UnparseableSpeed => &self.unparseable_speed,
            EventKind::MissingDefaultCategory => &self.missing_default_category,
            EventKind::ZeroTotalWeight => &self.zero_total_weight,
        }
    }

    pub fn snapshot(&self) -> DiagnosticCounts {
        DiagnosticCounts {
            missing_attribute: self.missing_attribute.load(Ordering::Relaxed),
            unknown_category: self.unknown_category.load(Ordering::Relaxed),
            unparseable_speed: self.unparseable_speed.load(Ordering::Relaxed),
            missing_default_category: self.missing_default_category.load(Ordering::Relaxed),
            zero_total_weight: self.zero_total_weight.load(Ordering::Relaxed),
            scored: self.scored.load(Ordering::Relaxed),
        }
    }
}

impl ScoreObserver for DiagnosticTally {
    fn on_event(&self, event: &ScoringEvent<'_>) {
        self.counter(event.kind()).fetch_add(1, Ordering::Relaxed);
    }

    fn on_scored(&self, _attrs: &FeatureAttributes, _weights: &NormalizedWeights, _record: &ScoreRecord) {
        self.scored.fetch_add(1, Ordering::Relaxed);
    }
}
