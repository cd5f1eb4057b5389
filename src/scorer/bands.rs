use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Discrete speed-limit bands, ordered slowest first.
///
/// The string form of each variant is the category key used in the
/// `speed_limit` table of a scoring model.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum SpeedBand {
    #[strum(serialize = "20_mph_or_less")]
    #[serde(rename = "20_mph_or_less")]
    UpTo20,
    #[strum(serialize = "25_mph")]
    #[serde(rename = "25_mph")]
    Mph25,
    #[strum(serialize = "30_mph")]
    #[serde(rename = "30_mph")]
    Mph30,
    #[strum(serialize = "40_mph")]
    #[serde(rename = "40_mph")]
    Mph40,
    #[strum(serialize = "50_mph")]
    #[serde(rename = "50_mph")]
    Mph50,
    #[strum(serialize = "over_50_mph")]
    #[serde(rename = "over_50_mph")]
    Over50,
}

// Upper bounds, inclusive. Anything above the last one is `Over50`.
const LADDER: [(f64, SpeedBand); 5] = [
    (20.0, SpeedBand::UpTo20),
    (25.0, SpeedBand::Mph25),
    (30.0, SpeedBand::Mph30),
    (40.0, SpeedBand::Mph40),
    (50.0, SpeedBand::Mph50),
];

impl SpeedBand {
    /// Buckets a speed (mph). First matching rung wins, so a value sitting
    /// exactly on a boundary lands in the lower band.
    pub fn classify(speed: f64) -> Self {
        LADDER
            .iter()
            .find(|(limit, _)| speed <= *limit)
            .map(|(_, band)| *band)
            .unwrap_or(SpeedBand::Over50)
    }

    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Inclusive upper bound of the band, `None` for the open-ended top band.
    #[cfg(test)]
    fn upper_bound(&self) -> Option<f64> {
        LADDER
            .iter()
            .find(|(_, band)| band == self)
            .map(|(limit, _)| *limit)
    }
}
