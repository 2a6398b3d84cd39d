mod builtin;

use std::{fs, path::Path};

use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PartsError, Result},
    types::{Category, SplitSpec, SplitTopology},
};

/// Static descriptor of one radical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PartCatalogEntry {
    pub name: String,
    pub category: Category,
    /// The radical itself, used in file names.
    #[serde(rename = "char")]
    pub character: char,
    /// Host character rendered first.
    pub sample: char,
    /// Rendered in order when the font lacks `sample`.
    #[serde(default)]
    pub alternates: Vec<char>,
    pub split: SplitTopology,
    pub ratio: f32,
}

impl PartCatalogEntry {
    pub fn new(
        category: Category,
        name: impl Into<String>,
        character: char,
        sample: char,
        split: SplitTopology,
        ratio: f32,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            character,
            sample,
            alternates: Vec::new(),
            split,
            ratio,
        }
    }

    pub fn with_alternates(mut self, alternates: impl IntoIterator<Item = char>) -> Self {
        self.alternates = alternates.into_iter().collect();
        self
    }

    /// Primary sample followed by the alternates, duplicates dropped.
    pub fn candidates(&self) -> Vec<char> {
        let mut chars = vec![self.sample];
        for &ch in &self.alternates {
            if !chars.contains(&ch) {
                chars.push(ch);
            }
        }
        chars
    }

    pub fn split_spec(&self) -> SplitSpec {
        SplitSpec::new(self.split, self.ratio)
    }

    /// `{category}_{name}_{char}.png`
    pub fn file_name(&self) -> String {
        format!("{}_{}_{}.png", self.category, self.name, self.character)
    }
}

/// Ordered list of catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PartCatalog {
    entries: Vec<PartCatalogEntry>,
}

static BUILTIN: Lazy<PartCatalog> = Lazy::new(|| {
    PartCatalog::new(
        builtin::BUILTIN_ENTRIES
            .iter()
            .map(|&(category, name, character, sample, alternates, split, ratio)| {
                PartCatalogEntry::new(category, name, character, sample, split, ratio)
                    .with_alternates(alternates.iter().copied())
            })
            .collect(),
    )
});

impl PartCatalog {
    pub fn new(entries: Vec<PartCatalogEntry>) -> Self {
        Self { entries }
    }

    /// Every radical known to the extractor, grouped by category.
    pub fn builtin() -> &'static PartCatalog {
        &BUILTIN
    }

    pub fn entries(&self) -> &[PartCatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PartCatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &PartCatalogEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn find(&self, category: Category, name: &str) -> Option<&PartCatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.category == category && e.name == name)
    }

    /// Like [`find`](Self::find) but an unknown part is an error.
    pub fn get(&self, category: Category, name: &str) -> Result<&PartCatalogEntry> {
        self.find(category, name).ok_or_else(|| PartsError::UnknownPart {
            category: category.to_string(),
            name: name.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(PartCatalog)
    }
}

impl<'a> IntoIterator for &'a PartCatalog {
    type Item = &'a PartCatalogEntry;
    type IntoIter = std::slice::Iter<'a, PartCatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
