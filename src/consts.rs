// Default-resolution constants for each scoring dimension.

pub const SEPARATION_DEFAULT_CATEGORY: &str = "none";
pub const SEPARATION_FALLBACK_SCORE: f64 = 5.0;

pub const CLASSIFICATION_DEFAULT_CATEGORY: &str = "residential";
pub const CLASSIFICATION_FALLBACK_SCORE: f64 = 2.0;

/// Speed assumed when neither the feature nor the model supplies one.
pub const DEFAULT_SPEED_MPH: f64 = 25.0;

/// Used for missing, unparseable, and unconfigured speeds alike.
pub const SPEED_FALLBACK_SCORE: f64 = 1.0;

/// Number of scored features the tracing observer dumps in full.
pub const DEFAULT_SAMPLE_LIMIT: usize = 5;

// Property keys read from and written to GeoJSON features.
pub const KEY_SEPARATION_LEVEL: &str = "separation_level";
pub const KEY_STREET_CLASSIFICATION: &str = "street_classification";
pub const KEY_MAXSPEED: &str = "maxspeed_int";
pub const KEY_NAME: &str = "name";
