pub mod bands;
pub mod observer;
pub mod resolver;
pub mod speed;
pub mod types;
pub mod weights;

pub use self::bands::SpeedBand;
pub use self::observer::{
    DiagnosticCounts, DiagnosticTally, NullObserver, ScoreObserver, ScoringEvent, TracingObserver,
};
pub use self::types::{FeatureAttributes, ScoreRecord, SpeedValue};
pub use self::weights::NormalizedWeights;

use self::resolver::{CLASSIFICATION_RULE, SEPARATION_RULE};
use crate::config::{ModelWeights, ScoringModel};
use crate::features::FeatureCollection;
use rayon::prelude::*;
use tracing::debug;
use typed_builder::TypedBuilder;

/// Scores one feature: three sub-scores, then the weighted composite.
///
/// Pure apart from the observer callbacks; safe to call from many threads.
pub fn score_feature(
    attrs: &FeatureAttributes,
    model: &ScoringModel,
    weights: &ModelWeights,
    observer: &dyn ScoreObserver,
) -> ScoreRecord {
    let normalized = NormalizedWeights::normalize(weights);
    score_with_normalized(attrs, model, &normalized, observer)
}

fn score_with_normalized(
    attrs: &FeatureAttributes,
    model: &ScoringModel,
    normalized: &NormalizedWeights,
    observer: &dyn ScoreObserver,
) -> ScoreRecord {
    let separation = SEPARATION_RULE.resolve(
        attrs.separation_level.as_deref(),
        &model.separation_level,
        observer,
    );
    let street_class = CLASSIFICATION_RULE.resolve(
        attrs.street_classification.as_deref(),
        &model.street_classification,
        observer,
    );
    let speed = speed::speed_score(attrs.maxspeed_int.as_ref(), &model.speed_limit, observer);

    if normalized.is_zero() {
        observer.on_event(&ScoringEvent::ZeroTotalWeight);
    }
    let composite = weights::aggregate(separation, street_class, speed, normalized);

    let record = ScoreRecord {
        separation_level_score: separation,
        street_classification_score: street_class,
        maxspeed_int_score: speed,
        composite_score: composite,
    };
    observer.on_scored(attrs, normalized, &record);
    record
}

#[derive(TypedBuilder)]
pub struct ScorerBuildParams {
    #[builder(default)]
    pub model: ScoringModel,
    #[builder(default)]
    pub weights: ModelWeights,
}

impl ScorerBuildParams {
    pub fn build_scorer(self) -> Scorer {
        let normalized = NormalizedWeights::normalize(&self.weights);
        debug!(
            separation = normalized.separation,
            speed = normalized.speed,
            busyness = normalized.busyness,
            total = normalized.sum(),
            "normalized weights"
        );
        Scorer {
            model: self.model,
            weights: self.weights,
            normalized,
        }
    }
}

/// A model and weight set fixed for one scoring run. Weights are
/// normalized once up front.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub model: ScoringModel,
    pub weights: ModelWeights,
    pub normalized: NormalizedWeights,
}

impl Scorer {
    pub fn new(model: ScoringModel, weights: ModelWeights) -> Self {
        ScorerBuildParams::builder()
            .model(model)
            .weights(weights)
            .build()
            .build_scorer()
    }

    pub fn score(&self, attrs: &FeatureAttributes, observer: &dyn ScoreObserver) -> ScoreRecord {
        score_with_normalized(attrs, &self.model, &self.normalized, observer)
    }

    /// Scores a batch in parallel. Output order matches input order.
    pub fn score_all(
        &self,
        features: &[FeatureAttributes],
        observer: &dyn ScoreObserver,
    ) -> Vec<ScoreRecord> {
        features
            .par_iter()
            .map(|attrs| self.score(attrs, observer))
            .collect()
    }

    /// Scores every feature of a collection in parallel and writes the
    /// score fields back into each feature's properties.
    pub fn score_collection(
        &self,
        collection: &mut FeatureCollection,
        observer: &dyn ScoreObserver,
    ) -> Vec<ScoreRecord> {
        collection
            .features
            .par_iter_mut()
            .map(|feature| {
                let attrs = feature.attributes();
                let record = self.score(&attrs, observer);
                record.merge_into(&mut feature.properties);
                record
            })
            .collect()
    }
}
