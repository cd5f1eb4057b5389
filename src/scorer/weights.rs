use crate::config::ModelWeights;
use serde::Serialize;

/// Aggregation weights scaled to proportions of their total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NormalizedWeights {
    pub separation: f64,
    pub speed: f64,
    pub busyness: f64,
}

impl NormalizedWeights {
    /// Divides each weight by the total. A zero total yields all zeros,
    /// which makes every composite 0. Negative inputs pass through
    /// unchecked.
    pub fn normalize(weights: &ModelWeights) -> Self {
        let total = weights.total();
        if total == 0.0 {
            return Self::default();
        }
        Self {
            separation: weights.separation_level / total,
            speed: weights.speed / total,
            busyness: weights.busyness / total,
        }
    }

    #[inline]
    pub fn sum(&self) -> f64 {
        self.separation + self.speed + self.busyness
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.separation == 0.0 && self.speed == 0.0 && self.busyness == 0.0
    }
}

/// Weighted sum of the three sub-scores.
///
/// The `busyness` proportion applies to the street classification score.
#[inline]
pub fn aggregate(
    separation_score: f64,
    street_class_score: f64,
    speed_score: f64,
    weights: &NormalizedWeights,
) -> f64 {
    separation_score * weights.separation
        + speed_score * weights.speed
        + street_class_score * weights.busyness
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_is_all_zero() {
        let n = NormalizedWeights::normalize(&ModelWeights::new(0.0, 0.0, 0.0));
        assert!(n.is_zero());
        assert_eq!(aggregate(9.0, 2.0, 4.0, &n), 0.0);
    }

    #[test]
    fn busyness_slot_weighs_street_classification() {
        let only_busyness = NormalizedWeights {
            separation: 0.0,
            speed: 0.0,
            busyness: 1.0,
        };
        assert_eq!(aggregate(9.0, 2.0, 4.0, &only_busyness), 2.0);
    }
}
