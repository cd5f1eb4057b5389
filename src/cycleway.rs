//! Derives a street's separation level from raw OpenStreetMap cycleway tags.

use serde_json::{Map, Value};
use strum_macros::{Display, EnumIter, EnumString};

const CYCLEWAY_TAGS: [&str; 4] = ["cycleway", "cycleway:both", "cycleway:left", "cycleway:right"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CyclewayType {
    No,
    SharedLane,
    ShareBusway,
    Lane,
    LaneBuffered,
    Track,
    Separate,
}

impl CyclewayType {
    /// Higher is more separated from motor traffic.
    pub fn ranking(self) -> f64 {
        match self {
            Self::No => 0.0,
            Self::SharedLane => 3.0,
            Self::ShareBusway => 5.0,
            Self::Lane => 7.0,
            Self::LaneBuffered => 7.5,
            Self::Track => 8.0,
            Self::Separate => 10.0,
        }
    }
}

/// Ranking of a raw tag value; unrecognised values rank 0.
pub fn rank_of(value: &str) -> f64 {
    value
        .parse::<CyclewayType>()
        .map(CyclewayType::ranking)
        .unwrap_or(0.0)
}

fn tag<'a>(tags: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    tags.get(key).and_then(Value::as_str)
}

/// Every cycleway value on the way, flattening array-valued tags and
/// skipping `no`.
pub fn collect_values(tags: &Map<String, Value>) -> Vec<String> {
    let mut values = Vec::new();
    for key in CYCLEWAY_TAGS {
        match tags.get(key) {
            Some(Value::String(s)) if s != "no" => values.push(s.clone()),
            Some(Value::Array(items)) => values.extend(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|s| *s != "no")
                    .map(str::to_string),
            ),
            _ => {}
        }
    }
    values
}

fn has_buffer(tags: &Map<String, Value>) -> bool {
    let buffer = match tags.get("cycleway:buffer") {
        Some(Value::Null) | None => tags.get("cycleway:separation"),
        present => present,
    };
    match buffer {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => s != "no",
        Some(_) => true,
    }
}

/// Applies the buffer upgrade and the flex-post downgrade in place.
pub fn adjust_values(values: &mut [String], tags: &Map<String, Value>) {
    if has_buffer(tags) {
        for v in values.iter_mut().filter(|v| *v == "lane") {
            *v = CyclewayType::LaneBuffered.to_string();
        }
    }

    // Posts and parked cars read as a buffered lane, not a track.
    let soft_separation = matches!(
        tag(tags, "cycleway:separation"),
        Some("flex_post") | Some("parking_lane")
    );
    if soft_separation && values.iter().any(|v| v == "track") {
        for v in values.iter_mut().filter(|v| *v == "track") {
            *v = CyclewayType::LaneBuffered.to_string();
        }
    }
}

/// Highest-ranked value; the earliest one wins a tie.
pub fn pick_best(values: &[String]) -> Option<&str> {
    values
        .iter()
        .fold(None, |best: Option<&String>, v| match best {
            Some(b) if rank_of(b) >= rank_of(v) => Some(b),
            _ => Some(v),
        })
        .map(String::as_str)
}

fn is_dedicated_path(tags: &Map<String, Value>) -> bool {
    match tag(tags, "highway") {
        Some("cycleway") => true,
        Some("path") => tag(tags, "bicycle") == Some("designated"),
        _ => false,
    }
}

/// Classifies a way's cycling separation from its tags, `None` when there
/// is no cycleway information at all.
///
/// Values that are not a known cycleway type still compete (ranked 0) and
/// are returned as `None` only if nothing recognisable beats them.
pub fn classify(tags: &Map<String, Value>) -> Option<CyclewayType> {
    if is_dedicated_path(tags) {
        return Some(CyclewayType::Separate);
    }
    let mut values = collect_values(tags);
    adjust_values(&mut values, tags);
    pick_best(&values).and_then(|v| v.parse().ok())
}
