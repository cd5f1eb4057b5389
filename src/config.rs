use crate::consts::{
    CLASSIFICATION_DEFAULT_CATEGORY, CLASSIFICATION_FALLBACK_SCORE, SEPARATION_DEFAULT_CATEGORY,
    SEPARATION_FALLBACK_SCORE, SPEED_FALLBACK_SCORE,
};
use crate::error::{BikeScoreError, BsResult};
use crate::scorer::bands::SpeedBand;
use crate::scorer::speed::{default_speed_band, DefaultSpeedSource};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use strum::IntoEnumIterator;

/// One scored category inside a dimension. Only `score` takes part in
/// scoring; the rest is carried for the map front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CategoryEntry {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            display_label: None,
            img: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringDimension {
    #[serde(default)]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_category: Option<String>,
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ScoringDimension {
    /// Builds a dimension from `(key, score)` pairs with no display metadata.
    pub fn from_scores<'a, I>(weight: f64, default_category: Option<&str>, scores: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        Self {
            weight,
            default_category: default_category.map(str::to_string),
            categories: scores
                .into_iter()
                .map(|(k, s)| (k.to_string(), CategoryEntry::new(s)))
                .collect(),
            display_label: None,
            img: None,
            link: None,
            notes: None,
        }
    }

    #[inline]
    pub fn score_of(&self, key: &str) -> Option<f64> {
        self.categories.get(key).map(|c| c.score)
    }

    /// The configured default category, or `builtin` when none is set.
    pub fn default_key<'a>(&'a self, builtin: &'a str) -> &'a str {
        self.default_category.as_deref().unwrap_or(builtin)
    }
}

/// The three-dimension category model. Fixed shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringModel {
    pub separation_level: ScoringDimension,
    pub street_classification: ScoringDimension,
    pub speed_limit: ScoringDimension,
}

impl Default for ScoringModel {
    /// Starter model used when no model file is given.
    fn default() -> Self {
        Self {
            separation_level: ScoringDimension::from_scores(
                50.0,
                Some(SEPARATION_DEFAULT_CATEGORY),
                [
                    ("none", 5.0),
                    ("shared_lane", 6.0),
                    ("share_busway", 6.5),
                    ("lane", 7.0),
                    ("lane_buffered", 8.0),
                    ("track", 9.0),
                    ("separate", 10.0),
                ],
            ),
            street_classification: ScoringDimension::from_scores(
                20.0,
                Some(CLASSIFICATION_DEFAULT_CATEGORY),
                [
                    ("residential", 2.0),
                    ("medium-capacity", 6.0),
                    ("high-capacity", 8.0),
                ],
            ),
            speed_limit: ScoringDimension::from_scores(
                30.0,
                Some("25_mph"),
                [
                    ("20_mph_or_less", 2.0),
                    ("25_mph", 3.0),
                    ("30_mph", 4.0),
                    ("40_mph", 6.0),
                    ("50_mph", 8.0),
                    ("over_50_mph", 10.0),
                ],
            ),
        }
    }
}

impl ScoringModel {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BikeScoreError::Config(format!(
                "Failed to read model file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Lists every configuration problem at once. None of these stop
    /// scoring; they describe where scores will degrade to fallbacks.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        check_default_reachable(
            &mut issues,
            "separation_level",
            &self.separation_level,
            SEPARATION_DEFAULT_CATEGORY,
            SEPARATION_FALLBACK_SCORE,
        );
        check_default_reachable(
            &mut issues,
            "street_classification",
            &self.street_classification,
            CLASSIFICATION_DEFAULT_CATEGORY,
            CLASSIFICATION_FALLBACK_SCORE,
        );

        let speed = &self.speed_limit;
        let (default_band, source) = default_speed_band(speed);
        if source == DefaultSpeedSource::Builtin {
            if let Some(raw) = &speed.default_category {
                issues.push(format!(
                    "speed_limit.defaultCategory: '{}' is neither a band nor a number, using {}",
                    raw, default_band
                ));
            }
        }
        if speed.score_of(default_band.key()).is_none() {
            issues.push(format!(
                "speed_limit: default band '{}' has no category, missing speeds will score {}",
                default_band, SPEED_FALLBACK_SCORE
            ));
        }
        for band in SpeedBand::iter() {
            if speed.score_of(band.key()).is_none() {
                issues.push(format!(
                    "speed_limit.categories: no entry for band '{}'",
                    band
                ));
            }
        }
        for key in speed.categories.keys() {
            if SpeedBand::from_str(key).is_err() {
                issues.push(format!(
                    "speed_limit.categories: '{}' is not a speed band and is never used",
                    key
                ));
            }
        }

        for (name, dim) in self.dimensions() {
            for (key, entry) in &dim.categories {
                if !entry.score.is_finite() {
                    issues.push(format!("{}.categories[{}]: score is not finite", name, key));
                }
            }
        }

        issues
    }

    pub fn dimensions(&self) -> [(&'static str, &ScoringDimension); 3] {
        [
            ("separation_level", &self.separation_level),
            ("street_classification", &self.street_classification),
            ("speed_limit", &self.speed_limit),
        ]
    }
}

fn check_default_reachable(
    issues: &mut Vec<String>,
    name: &str,
    dim: &ScoringDimension,
    builtin: &str,
    fallback: f64,
) {
    let key = dim.default_key(builtin);
    if dim.score_of(key).is_none() {
        issues.push(format!(
            "{}: default category '{}' is not in categories, unresolved values will score {}",
            name, key, fallback
        ));
    }
}

/// Aggregation weights. These are distinct from each dimension's own
/// `weight` field. Note that `busyness` weighs the street classification.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelWeights {
    #[arg(long = "weight-separation", default_value_t = 50.0)]
    pub separation_level: f64,
    #[arg(long = "weight-speed", default_value_t = 30.0)]
    pub speed: f64,
    #[arg(long = "weight-busyness", default_value_t = 20.0)]
    pub busyness: f64,
}

impl Default for ModelWeights {
    fn default() -> Self {
        Self {
            separation_level: 50.0,
            speed: 30.0,
            busyness: 20.0,
        }
    }
}

impl ModelWeights {
    pub fn new(separation_level: f64, speed: f64, busyness: f64) -> Self {
        Self {
            separation_level,
            speed,
            busyness,
        }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.separation_level + self.speed + self.busyness
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BikeScoreError::Config(format!(
                "Failed to read weights file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overrides fields whose flag was typed on the command line, leaving
    /// file-provided values alone when the flag only carries its default.
    pub fn merge_from_cli(&mut self, cli_weights: &ModelWeights, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli_weights.$field;
                }
            };
        }

        update_if_present!(separation_level);
        update_if_present!(speed);
        update_if_present!(busyness);
    }

    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for (name, value) in [
            ("separation_level", self.separation_level),
            ("speed", self.speed),
            ("busyness", self.busyness),
        ] {
            if !value.is_finite() {
                issues.push(format!("weights.{}: must be finite", name));
            } else if value < 0.0 {
                issues.push(format!("weights.{}: must be non-negative", name));
            }
        }
        if self.total() == 0.0 {
            issues.push("weights: total is 0, every composite score will be 0".to_string());
        }
        issues
    }
}
