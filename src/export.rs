use crate::error::BsResult;
use crate::features::FeatureCollection;
use crate::scorer::{ScoreRecord, SpeedValue};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
struct ScoreRow<'a> {
    name: &'a str,
    separation_level: Option<String>,
    street_classification: Option<String>,
    maxspeed_int: Option<String>,
    separation_level_score: f64,
    street_classification_score: f64,
    maxspeed_int_score: f64,
    composite_score: f64,
}

/// Writes one CSV row per feature: name, the raw scored attributes and the
/// four scores. `records` must be in the same order as the features.
pub fn write_scores<W: Write>(
    writer: W,
    collection: &FeatureCollection,
    records: &[ScoreRecord],
) -> BsResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (feature, record) in collection.features.iter().zip(records) {
        let attrs = feature.attributes();
        wtr.serialize(ScoreRow {
            name: feature.name().unwrap_or(""),
            separation_level: attrs.separation_level,
            street_classification: attrs.street_classification,
            maxspeed_int: attrs.maxspeed_int.map(|s| match s {
                SpeedValue::Number(n) => n.to_string(),
                SpeedValue::Text(t) => t,
            }),
            separation_level_score: record.separation_level_score,
            street_classification_score: record.street_classification_score,
            maxspeed_int_score: record.maxspeed_int_score,
            composite_score: record.composite_score,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_scores_to_file<P: AsRef<Path>>(
    path: P,
    collection: &FeatureCollection,
    records: &[ScoreRecord],
) -> BsResult<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_scores(file, collection, records)?;
    info!("Wrote {} score rows to {}", records.len(), path.display());
    Ok(())
}
