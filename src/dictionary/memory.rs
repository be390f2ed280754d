use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::{Dictionary, LookupError};

/// Definitions held in a map. Keys are stored lowercased.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDictionary {
    entries: HashMap<String, String>,
}

impl InMemoryDictionary {
    /// Build from `(word, definition)` pairs. A later pair replaces an
    /// earlier one whose word lowercases to the same key.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
                .collect(),
        }
    }

    /// Load from a JSON object of `"word": "definition"` pairs. Two words
    /// that differ only by case are rejected.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dictionary {}", path.display()))?;
        let parsed: BTreeMap<String, String> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse dictionary {}", path.display()))?;
        let entries = fold_keys(parsed)
            .with_context(|| format!("failed to load dictionary {}", path.display()))?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn fold_keys(parsed: BTreeMap<String, String>) -> Result<HashMap<String, String>> {
    let mut entries = HashMap::with_capacity(parsed.len());
    let mut originals: HashMap<String, String> = HashMap::with_capacity(parsed.len());
    for (key, definition) in parsed {
        let folded = key.to_lowercase();
        if let Some(first) = originals.get(&folded) {
            bail!("keys {first:?} and {key:?} differ only by case");
        }
        originals.insert(folded.clone(), key);
        entries.insert(folded, definition);
    }
    Ok(entries)
}

#[async_trait]
impl Dictionary for InMemoryDictionary {
    async fn define(&self, word: &str) -> Result<String> {
        self.entries
            .get(word)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(word.to_string()).into())
    }
}
