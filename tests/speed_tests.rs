use bikescore::config::ScoringDimension;
use bikescore::scorer::observer::EventKind;
use bikescore::scorer::speed::{default_speed_band, speed_score, DefaultSpeedSource};
use bikescore::scorer::{NullObserver, SpeedBand, SpeedValue};
use rstest::rstest;

mod common;
use common::{example_model, RecordingObserver};

fn full_ladder(default: Option<&str>) -> ScoringDimension {
    ScoringDimension::from_scores(
        1.0,
        default,
        [
            ("20_mph_or_less", 2.0),
            ("25_mph", 3.0),
            ("30_mph", 4.0),
            ("40_mph", 6.0),
            ("50_mph", 8.0),
            ("over_50_mph", 10.0),
        ],
    )
}

#[rstest]
#[case(SpeedValue::Number(28.0), 4.0)]
#[case(SpeedValue::Number(25.0), 3.0)]
#[case(SpeedValue::Text("30".to_string()), 4.0)]
#[case(SpeedValue::Text("25 mph".to_string()), 3.0)]
#[case(SpeedValue::Text("25.9".to_string()), 3.0)] // fraction dropped, stays in 25_mph
#[case(SpeedValue::Number(25.9), 4.0)] // numbers keep their fraction
fn test_valid_speeds(#[case] raw: SpeedValue, #[case] expected: f64) {
    let model = example_model();
    assert_eq!(speed_score(Some(&raw), &model.speed_limit, &NullObserver), expected);
}

#[test]
fn test_missing_speed_uses_25_band() {
    let model = example_model();
    assert_eq!(speed_score(None, &model.speed_limit, &NullObserver), 3.0);
}

#[test]
fn test_unparseable_speed_uses_default_path() {
    let model = example_model();
    let obs = RecordingObserver::default();
    let raw = SpeedValue::Text("signals".to_string());
    assert_eq!(speed_score(Some(&raw), &model.speed_limit, &obs), 3.0);
    assert_eq!(obs.kinds(), vec![EventKind::UnparseableSpeed]);
}

#[test]
fn test_unconfigured_band_uses_default_path() {
    // 45 mph -> 50_mph, which the example table lacks.
    let model = example_model();
    let obs = RecordingObserver::default();
    let raw = SpeedValue::Number(45.0);
    assert_eq!(speed_score(Some(&raw), &model.speed_limit, &obs), 3.0);
    assert_eq!(obs.count(EventKind::UnknownCategory), 1);
}

#[rstest]
#[case(None)]
#[case(Some(SpeedValue::Text("n/a".to_string())))]
#[case(Some(SpeedValue::Number(70.0)))]
fn test_fallback_is_one_when_default_band_missing(#[case] raw: Option<SpeedValue>) {
    let dim = ScoringDimension::from_scores(1.0, None, [("30_mph", 4.0)]);
    assert_eq!(speed_score(raw.as_ref(), &dim, &NullObserver), 1.0);
}

#[rstest]
#[case(None, SpeedBand::Mph25, DefaultSpeedSource::Builtin)]
#[case(Some("30_mph"), SpeedBand::Mph30, DefaultSpeedSource::Band)]
#[case(Some("40"), SpeedBand::Mph40, DefaultSpeedSource::Numeric)]
#[case(Some("20"), SpeedBand::UpTo20, DefaultSpeedSource::Numeric)]
#[case(Some("fast"), SpeedBand::Mph25, DefaultSpeedSource::Builtin)]
fn test_default_speed_band(
    #[case] default: Option<&str>,
    #[case] band: SpeedBand,
    #[case] source: DefaultSpeedSource,
) {
    assert_eq!(default_speed_band(&full_ladder(default)), (band, source));
}

#[test]
fn test_numeric_default_drives_missing_speed() {
    let dim = full_ladder(Some("45"));
    assert_eq!(speed_score(None, &dim, &NullObserver), 8.0);
}

#[rstest]
#[case("20.5", 2.0)]
#[case("20", 2.0)]
#[case("50.9", 8.0)]
#[case("51", 10.0)]
fn test_fractional_text_on_band_edges(#[case] raw: &str, #[case] expected: f64) {
    let dim = full_ladder(None);
    let obs = RecordingObserver::default();
    assert_eq!(speed_score(Some(&SpeedValue::from(raw)), &dim, &obs), expected);
    assert!(obs.kinds().is_empty());
}
