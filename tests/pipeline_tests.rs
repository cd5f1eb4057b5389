use bikescore::config::{ModelWeights, ScoringModel};
use bikescore::scorer::observer::EventKind;
use bikescore::scorer::{
    score_feature, DiagnosticTally, NullObserver, Scorer, SpeedValue, TracingObserver,
};

mod common;
use common::{approx, attrs, empty_model, example_model, example_weights, RecordingObserver};

#[test]
fn test_worked_example() {
    let record = score_feature(
        &attrs(Some("track"), Some("residential"), Some(SpeedValue::Number(28.0))),
        &example_model(),
        &example_weights(),
        &NullObserver,
    );
    assert_eq!(record.separation_level_score, 9.0);
    assert_eq!(record.street_classification_score, 2.0);
    assert_eq!(record.maxspeed_int_score, 4.0);
    assert!(
        approx(record.composite_score, 6.1),
        "composite was {}",
        record.composite_score
    );
}

#[test]
fn test_everything_through_defaults() {
    let mut model = example_model();
    model.separation_level.default_category = Some("none".to_string());
    model.street_classification.default_category = Some("residential".to_string());
    model.speed_limit.default_category = Some("25_mph".to_string());

    let obs = RecordingObserver::default();
    let record = score_feature(
        &attrs(None, Some("unknown_value"), None),
        &model,
        &example_weights(),
        &obs,
    );
    assert_eq!(record.separation_level_score, 5.0);
    assert_eq!(record.street_classification_score, 2.0);
    assert_eq!(record.maxspeed_int_score, 3.0);
    assert_eq!(obs.count(EventKind::MissingAttribute), 2);
    assert_eq!(obs.count(EventKind::UnknownCategory), 1);
}

#[test]
fn test_everything_through_hardcoded_fallbacks() {
    let record = score_feature(
        &attrs(None, Some("unknown_value"), None),
        &empty_model(),
        &example_weights(),
        &NullObserver,
    );
    assert_eq!(record.separation_level_score, 5.0);
    assert_eq!(record.street_classification_score, 2.0);
    assert_eq!(record.maxspeed_int_score, 1.0);
    // 5*0.5 + 1*0.3 + 2*0.2
    assert!(approx(record.composite_score, 3.2));
}

#[test]
fn test_zero_weights_zero_composite() {
    let obs = RecordingObserver::default();
    let record = score_feature(
        &attrs(Some("track"), Some("medium-capacity"), Some(SpeedValue::Number(30.0))),
        &example_model(),
        &ModelWeights::new(0.0, 0.0, 0.0),
        &obs,
    );
    assert_eq!(record.composite_score, 0.0);
    assert_eq!(record.separation_level_score, 9.0);
    assert_eq!(obs.kinds(), vec![EventKind::ZeroTotalWeight]);
}

#[test]
fn test_scorer_matches_free_function() {
    let scorer = Scorer::new(example_model(), example_weights());
    let inputs = [
        attrs(Some("lane"), Some("medium-capacity"), Some(SpeedValue::Number(22.0))),
        attrs(None, None, Some(SpeedValue::Text("abc".to_string()))),
        attrs(Some("track"), None, Some(SpeedValue::Number(31.0))),
    ];
    for a in &inputs {
        assert_eq!(
            scorer.score(a, &NullObserver),
            score_feature(a, &example_model(), &example_weights(), &NullObserver)
        );
    }
}

#[test]
fn test_score_all_preserves_order() {
    let scorer = Scorer::new(example_model(), example_weights());
    let inputs: Vec<_> = (0..500)
        .map(|i| {
            let sep = if i % 2 == 0 { "track" } else { "lane" };
            attrs(Some(sep), Some("residential"), Some(SpeedValue::Number(i as f64 % 60.0)))
        })
        .collect();

    let parallel = scorer.score_all(&inputs, &NullObserver);
    let sequential: Vec<_> = inputs.iter().map(|a| scorer.score(a, &NullObserver)).collect();
    assert_eq!(parallel, sequential);
}

#[test]
fn test_observer_state_does_not_leak_into_scores() {
    // The sampling counter must not change results between early and late calls.
    let scorer = Scorer::new(example_model(), example_weights());
    let tracer = TracingObserver::new(2);
    let a = attrs(Some("lane"), Some("residential"), Some(SpeedValue::Number(25.0)));

    let first = scorer.score(&a, &tracer);
    for _ in 0..10 {
        scorer.score(&a, &tracer);
    }
    let last = scorer.score(&a, &tracer);
    assert_eq!(first, last);
    assert_eq!(tracer.sampled(), 2);
}

#[test]
fn test_tally_counts_across_threads() {
    let scorer = Scorer::new(example_model(), example_weights());
    let inputs: Vec<_> = (0..100).map(|_| attrs(None, Some("bogus"), None)).collect();
    let tally = DiagnosticTally::new();
    scorer.score_all(&inputs, &tally);

    let counts = tally.snapshot();
    assert_eq!(counts.scored, 100);
    assert_eq!(counts.get(EventKind::MissingAttribute), 200); // separation + speed
    assert_eq!(counts.get(EventKind::UnknownCategory), 100);
}

#[test]
fn test_dimension_weight_does_not_affect_composite() {
    let mut heavy = example_model();
    heavy.separation_level.weight = 1000.0;
    let a = attrs(Some("lane"), Some("residential"), Some(SpeedValue::Number(30.0)));
    assert_eq!(
        score_feature(&a, &heavy, &example_weights(), &NullObserver),
        score_feature(&a, &example_model(), &example_weights(), &NullObserver)
    );
}

#[test]
fn test_default_model_scores() {
    let scorer = Scorer::new(ScoringModel::default(), ModelWeights::default());
    let record = scorer.score(
        &attrs(Some("separate"), Some("high-capacity"), Some(SpeedValue::Number(55.0))),
        &NullObserver,
    );
    assert_eq!(record.separation_level_score, 10.0);
    assert_eq!(record.street_classification_score, 8.0);
    assert_eq!(record.maxspeed_int_score, 10.0);
}
