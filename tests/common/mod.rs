#![allow(dead_code)]

use bikescore::config::{ModelWeights, ScoringDimension, ScoringModel};
use bikescore::scorer::observer::EventKind;
use bikescore::scorer::{FeatureAttributes, ScoreObserver, ScoringEvent, SpeedValue};
use std::sync::Mutex;

/// Category tables from the worked example: none/lane/track,
/// residential/medium-capacity, 25/30 mph.
pub fn example_model() -> ScoringModel {
    ScoringModel {
        separation_level: ScoringDimension::from_scores(
            1.0,
            None,
            [("none", 5.0), ("lane", 7.0), ("track", 9.0)],
        ),
        street_classification: ScoringDimension::from_scores(
            1.0,
            None,
            [("residential", 2.0), ("medium-capacity", 6.0)],
        ),
        speed_limit: ScoringDimension::from_scores(1.0, None, [("25_mph", 3.0), ("30_mph", 4.0)]),
    }
}

/// A model whose tables are empty, so every lookup hits a hardcoded fallback.
pub fn empty_model() -> ScoringModel {
    let empty = || ScoringDimension::from_scores(1.0, None, Vec::<(&str, f64)>::new());
    ScoringModel {
        separation_level: empty(),
        street_classification: empty(),
        speed_limit: empty(),
    }
}

pub fn example_weights() -> ModelWeights {
    ModelWeights::new(50.0, 30.0, 20.0)
}

pub fn attrs(sep: Option<&str>, class: Option<&str>, speed: Option<SpeedValue>) -> FeatureAttributes {
    FeatureAttributes::new(sep, class, speed)
}

/// Collects event kinds for assertions.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<EventKind>>,
}

impl RecordingObserver {
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.kinds().iter().filter(|k| **k == kind).count()
    }
}

impl ScoreObserver for RecordingObserver {
    fn on_event(&self, event: &ScoringEvent<'_>) {
        self.events.lock().unwrap().push(event.kind());
    }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
