use crate::consts::{KEY_NAME, KEY_SEPARATION_LEVEL};
use crate::cycleway;
use crate::error::{BikeScoreError, BsResult};
use crate::scorer::types::category_value;
use crate::scorer::FeatureAttributes;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// A GeoJSON feature. Geometry and any foreign members are carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub geometry: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `"properties": null` is valid GeoJSON; it reads as an empty map.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Feature {
    pub fn attributes(&self) -> FeatureAttributes {
        FeatureAttributes::from_properties(&self.properties)
    }

    pub fn name(&self) -> Option<&str> {
        self.properties.get(KEY_NAME).and_then(Value::as_str)
    }

    /// Fills `separation_level` from the raw cycleway tags when the
    /// feature has none. Returns true if a value was written.
    pub fn derive_separation_level(&mut self) -> bool {
        if category_value(self.properties.get(KEY_SEPARATION_LEVEL)).is_some() {
            return false;
        }
        match cycleway::classify(&self.properties) {
            Some(kind) => {
                self.properties.insert(
                    KEY_SEPARATION_LEVEL.to_string(),
                    Value::String(kind.to_string()),
                );
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeatureCollection {
    pub fn from_reader<R: Read>(reader: R) -> BsResult<Self> {
        let collection: FeatureCollection = serde_json::from_reader(reader)?;
        if collection.kind != "FeatureCollection" {
            return Err(BikeScoreError::Validation(format!(
                "expected a FeatureCollection, found type '{}'",
                collection.kind
            )));
        }
        Ok(collection)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BsResult<Self> {
        let path = path.as_ref();
        debug!("Loading features from: {}", path.display());
        let file = File::open(path)?;
        let collection = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} features from {}",
            collection.features.len(),
            path.display()
        );
        Ok(collection)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> BsResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        info!("Wrote {} features to {}", self.features.len(), path.display());
        Ok(())
    }

    pub fn attributes(&self) -> Vec<FeatureAttributes> {
        self.features.iter().map(Feature::attributes).collect()
    }

    /// Runs cycleway derivation over every feature, returning how many
    /// features gained a `separation_level`.
    pub fn derive_separation_levels(&mut self) -> usize {
        let derived = self
            .features
            .iter_mut()
            .map(Feature::derive_separation_level)
            .filter(|&d| d)
            .count();
        debug!("Derived separation_level for {} features", derived);
        derived
    }
}
