use std::{collections::BTreeMap, fs, path::Path};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    types::{Category, SplitTopology},
};

/// File written next to the part PNGs.
pub const PARTS_CATALOG_FILE: &str = "parts_catalog.json";

/// One extracted part as listed in `parts_catalog.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PartRecord {
    #[serde(rename = "char")]
    pub character: char,
    /// Sample actually rendered.
    pub sample: char,
    /// PNG file name, relative to the catalog.
    pub file: String,
    pub split: SplitTopology,
    /// Catalog default ratio.
    pub ratio: f32,
    /// Ratio actually used for the cut.
    pub detected_ratio: f32,
    pub category: Category,
}

/// The `parts_catalog.json` document: category, then part name, then record.
///
/// Part names repeat across categories, so records are never keyed by name
/// alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PartsCatalogFile {
    categories: BTreeMap<Category, BTreeMap<String, PartRecord>>,
}

impl PartsCatalogFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Missing file reads as an empty catalog.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() { Self::load(path) } else { Ok(Self::new()) }
    }

    /// Pretty-printed UTF-8 JSON, non-ASCII kept as is.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn insert(&mut self, name: impl Into<String>, record: PartRecord) -> Option<PartRecord> {
        self.categories
            .entry(record.category)
            .or_default()
            .insert(name.into(), record)
    }

    pub fn get(&self, category: Category, name: &str) -> Option<&PartRecord> {
        self.categories.get(&category)?.get(name)
    }

    pub fn remove(&mut self, category: Category, name: &str) -> Option<PartRecord> {
        let parts = self.categories.get_mut(&category)?;
        let removed = parts.remove(name);
        if parts.is_empty() {
            self.categories.remove(&category);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PartRecord)> {
        self.categories
            .values()
            .flat_map(|parts| parts.iter().map(|(name, record)| (name.as_str(), record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: Category, character: char, file: &str) -> PartRecord {
        PartRecord {
            character,
            sample: '凪',
            file: file.to_string(),
            split: SplitTopology::Frame,
            ratio: 0.5,
            detected_ratio: 0.5,
            category,
        }
    }

    #[test]
    fn test_same_name_in_two_categories() {
        let mut catalog = PartsCatalogFile::new();
        catalog.insert("かぜがまえ", record(Category::Kamae, '風', "kamae_かぜがまえ_風.png"));
        catalog.insert("かぜがまえ", record(Category::Tare, '几', "tare_かぜがまえ_几.png"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(Category::Kamae, "かぜがまえ").map(|r| r.character), Some('風'));
        assert_eq!(catalog.get(Category::Tare, "かぜがまえ").map(|r| r.character), Some('几'));

        assert!(catalog.remove(Category::Tare, "かぜがまえ").is_some());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.remove(Category::Tare, "かぜがまえ").is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join(PARTS_CATALOG_FILE);

        let mut catalog = PartsCatalogFile::new();
        catalog.insert("もんがまえ", record(Category::Kamae, '門', "kamae_もんがまえ_門.png"));
        catalog.save(&path).expect("Should save catalog");

        let text = fs::read_to_string(&path).expect("Should read catalog");
        assert!(text.contains("\"kamae\""));
        assert!(text.contains("もんがまえ"));
        assert!(text.contains("\"char\": \"門\""));

        let loaded = PartsCatalogFile::load(&path).expect("Should load catalog");
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let catalog = PartsCatalogFile::load_or_default(dir.path().join(PARTS_CATALOG_FILE))
            .expect("Missing file is not an error");
        assert!(catalog.is_empty());
    }
}
