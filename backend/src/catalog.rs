//! Static crop catalogs
//!
//! Crops, planting rules and harvest economics are loaded once at
//! startup from JSON files and never mutated afterwards; any number of
//! requests may read them concurrently without synchronization.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use shared::{Crop, CropEconomics, PlantingRule};

/// Immutable crop catalogs, shared process-wide behind an `Arc`
#[derive(Debug, Default)]
pub struct CropCatalog {
    pub crops: Vec<Crop>,
    pub rules: HashMap<String, PlantingRule>,
    pub economics: HashMap<String, CropEconomics>,
}

impl CropCatalog {
    /// Load all catalog files from a directory.
    ///
    /// A missing file yields an empty catalog section; a present but
    /// malformed file fails startup.
    pub fn load(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref();
        let catalog = Self {
            crops: load_json(dir.join("crops.json"))?,
            rules: load_json(dir.join("planting_rules.json"))?,
            economics: load_json(dir.join("crop_economics.json"))?,
        };

        for (crop_id, rule) in &catalog.rules {
            for (metric, band) in rule.bands() {
                if !band.is_coherent() {
                    tracing::warn!(
                        crop_id,
                        metric,
                        "optimal range is not inside the acceptable range"
                    );
                }
            }
        }

        Ok(catalog)
    }

    /// Look up a crop by id
    pub fn crop(&self, crop_id: &str) -> Option<&Crop> {
        self.crops.iter().find(|c| c.id == crop_id)
    }

    /// Look up a crop's planting rules
    pub fn rule(&self, crop_id: &str) -> Option<&PlantingRule> {
        self.rules.get(crop_id)
    }

    /// Look up a crop's harvest economics
    pub fn economics(&self, crop_id: &str) -> Option<&CropEconomics> {
        self.economics.get(crop_id)
    }
}

fn load_json<T: DeserializeOwned + Default>(path: PathBuf) -> anyhow::Result<T> {
    match std::fs::read_to_string(&path) {
        Ok(text) => serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "catalog file missing, section will be empty");
            Ok(T::default())
        }
        Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> CropCatalog {
        let crops: Vec<Crop> = serde_json::from_str(
            r#"[{"id": "padi", "name": "Padi"}, {"id": "jagung", "name": "Jagung"}]"#,
        )
        .unwrap();
        let rules: HashMap<String, PlantingRule> = serde_json::from_str(
            r#"{
                "padi": {
                    "temperature": {"optimal": {"min": 22, "max": 30}, "acceptable": {"min": 18, "max": 35}},
                    "rainfall": {"optimal": {"min": 20, "max": 60}, "acceptable": {"min": 10, "max": 100}},
                    "humidity": {"optimal": {"min": 60, "max": 85}, "acceptable": {"min": 50, "max": 95}},
                    "avoidConditions": {"maxConsecutiveDryDays": 5, "maxDailyRainfall": 50, "minTemperature": 15}
                }
            }"#,
        )
        .unwrap();

        CropCatalog {
            crops,
            rules,
            economics: HashMap::new(),
        }
    }

    #[test]
    fn crop_lookup_by_id() {
        let catalog = sample_catalog();
        assert_eq!(catalog.crop("padi").unwrap().name, "Padi");
        assert!(catalog.crop("durian").is_none());
    }

    #[test]
    fn missing_rule_is_none_not_error() {
        let catalog = sample_catalog();
        assert!(catalog.rule("padi").is_some());
        assert!(catalog.rule("jagung").is_none());
    }

    #[test]
    fn missing_files_load_as_empty_catalog() {
        let catalog = CropCatalog::load("nonexistent-dir").unwrap();
        assert!(catalog.crops.is_empty());
        assert!(catalog.rules.is_empty());
        assert!(catalog.economics.is_empty());
    }
}
