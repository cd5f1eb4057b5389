use super::observer::{Dimension, ScoreObserver, ScoringEvent};
use crate::config::ScoringDimension;
use crate::consts::{
    CLASSIFICATION_DEFAULT_CATEGORY, CLASSIFICATION_FALLBACK_SCORE, SEPARATION_DEFAULT_CATEGORY,
    SEPARATION_FALLBACK_SCORE,
};

/// Default policy for one categorical dimension: which category stands in
/// for absent or unknown values, and the score used when even that
/// category is not configured.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub dimension: Dimension,
    pub default_key: &'static str,
    pub fallback: f64,
}

pub const SEPARATION_RULE: CategoryRule = CategoryRule {
    dimension: Dimension::SeparationLevel,
    default_key: SEPARATION_DEFAULT_CATEGORY,
    fallback: SEPARATION_FALLBACK_SCORE,
};

pub const CLASSIFICATION_RULE: CategoryRule = CategoryRule {
    dimension: Dimension::StreetClassification,
    default_key: CLASSIFICATION_DEFAULT_CATEGORY,
    fallback: CLASSIFICATION_FALLBACK_SCORE,
};

impl CategoryRule {
    /// Resolves a raw category value to a score. Always yields a number.
    /// Blank values count as absent.
    pub fn resolve(
        &self,
        raw: Option<&str>,
        dim: &ScoringDimension,
        observer: &dyn ScoreObserver,
    ) -> f64 {
        let default_key = dim.default_key(self.default_key);

        match raw.filter(|v| !v.trim().is_empty()) {
            None => observer.on_event(&ScoringEvent::MissingAttribute {
                dimension: self.dimension,
                default_key,
            }),
            Some(value) => {
                if let Some(score) = dim.score_of(value) {
                    return score;
                }
                observer.on_event(&ScoringEvent::UnknownCategory {
                    dimension: self.dimension,
                    value,
                    default_key,
                });
            }
        }

        self.resolve_default(dim, observer)
    }

    /// Score of the dimension's default category, or the hardcoded fallback.
    pub fn resolve_default(&self, dim: &ScoringDimension, observer: &dyn ScoreObserver) -> f64 {
        let default_key = dim.default_key(self.default_key);
        match dim.score_of(default_key) {
            Some(score) => score,
            None => {
                observer.on_event(&ScoringEvent::MissingDefaultCategory {
                    dimension: self.dimension,
                    default_key,
                    fallback: self.fallback,
                });
                self.fallback
            }
        }
    }
}
