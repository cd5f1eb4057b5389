use super::bands::SpeedBand;
use super::observer::{Dimension, ScoreObserver, ScoringEvent};
use super::types::SpeedValue;
use crate::config::ScoringDimension;
use crate::consts::{DEFAULT_SPEED_MPH, SPEED_FALLBACK_SCORE};
use std::str::FromStr;

/// Where the default speed band came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSpeedSource {
    /// `defaultCategory` named a band directly (`"30_mph"`).
    Band,
    /// `defaultCategory` was a number (`"30"`), classified onto the ladder.
    Numeric,
    /// Nothing usable was configured; the built-in speed was classified.
    Builtin,
}

/// Band used for features with no usable speed.
pub fn default_speed_band(dim: &ScoringDimension) -> (SpeedBand, DefaultSpeedSource) {
    if let Some(raw) = dim.default_category.as_deref().map(str::trim) {
        if let Ok(band) = SpeedBand::from_str(raw) {
            return (band, DefaultSpeedSource::Band);
        }
        if let Some(mph) = raw.parse::<f64>().ok().filter(|v| v.is_finite()) {
            return (SpeedBand::classify(mph), DefaultSpeedSource::Numeric);
        }
    }
    (
        SpeedBand::classify(DEFAULT_SPEED_MPH),
        DefaultSpeedSource::Builtin,
    )
}

fn default_speed_score(dim: &ScoringDimension, observer: &dyn ScoreObserver) -> f64 {
    let (band, _) = default_speed_band(dim);
    match dim.score_of(band.key()) {
        Some(score) => score,
        None => {
            observer.on_event(&ScoringEvent::MissingDefaultCategory {
                dimension: Dimension::SpeedLimit,
                default_key: band.key(),
                fallback: SPEED_FALLBACK_SCORE,
            });
            SPEED_FALLBACK_SCORE
        }
    }
}

/// Scores a raw speed against the `speed_limit` dimension.
///
/// Missing and unparseable speeds, as well as speeds whose band has no
/// configured category, all go through the default-speed path.
pub fn speed_score(
    raw: Option<&SpeedValue>,
    dim: &ScoringDimension,
    observer: &dyn ScoreObserver,
) -> f64 {
    let Some(raw) = raw else {
        let (band, _) = default_speed_band(dim);
        observer.on_event(&ScoringEvent::MissingAttribute {
            dimension: Dimension::SpeedLimit,
            default_key: band.key(),
        });
        return default_speed_score(dim, observer);
    };

    let Some(mph) = raw.as_mph() else {
        let raw = match raw {
            SpeedValue::Number(n) => n.to_string(),
            SpeedValue::Text(s) => s.clone(),
        };
        observer.on_event(&ScoringEvent::UnparseableSpeed { raw });
        return default_speed_score(dim, observer);
    };

    let band = SpeedBand::classify(mph);
    match dim.score_of(band.key()) {
        Some(score) => score,
        None => {
            let (default_band, _) = default_speed_band(dim);
            observer.on_event(&ScoringEvent::UnknownCategory {
                dimension: Dimension::SpeedLimit,
                value: band.key(),
                default_key: default_band.key(),
            });
            default_speed_score(dim, observer)
        }
    }
}
