use bikescore::scorer::SpeedBand;
use rstest::rstest;
use std::str::FromStr;

// --- LADDER BOUNDARIES (inclusive on the lower band) ---
#[rstest]
#[case(-10.0, "20_mph_or_less")]
#[case(0.0, "20_mph_or_less")]
#[case(20.0, "20_mph_or_less")]
#[case(20.0001, "25_mph")]
#[case(25.0, "25_mph")]
#[case(25.5, "30_mph")]
#[case(28.0, "30_mph")]
#[case(30.0, "30_mph")]
#[case(35.0, "40_mph")]
#[case(40.0, "40_mph")]
#[case(45.0, "50_mph")]
#[case(50.0, "50_mph")]
#[case(50.0001, "over_50_mph")]
#[case(51.0, "over_50_mph")]
#[case(120.0, "over_50_mph")]
fn test_classify(#[case] speed: f64, #[case] expected: &str) {
    assert_eq!(
        SpeedBand::classify(speed).key(),
        expected,
        "speed {} landed in the wrong band",
        speed
    );
}

#[test]
fn test_infinities_hit_the_ends() {
    assert_eq!(SpeedBand::classify(f64::NEG_INFINITY), SpeedBand::UpTo20);
    assert_eq!(SpeedBand::classify(f64::INFINITY), SpeedBand::Over50);
}

#[rstest]
#[case("20_mph_or_less", SpeedBand::UpTo20)]
#[case("over_50_mph", SpeedBand::Over50)]
fn test_band_keys_parse(#[case] key: &str, #[case] band: SpeedBand) {
    assert_eq!(SpeedBand::from_str(key).unwrap(), band);
    assert_eq!(band.to_string(), key);
}

#[test]
fn test_band_serializes_as_key() {
    let json = serde_json::to_string(&SpeedBand::Mph30).unwrap();
    assert_eq!(json, "\"30_mph\"");
}

#[test]
fn test_unknown_key_rejected() {
    assert!(SpeedBand::from_str("35_mph").is_err());
}
