//! Pre-fitted label encoders for the categorical feature columns

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A fitted mapping from categorical string values to integer codes.
///
/// The artifact stores the ordered class list from fitting; a value's code is
/// its position in that list.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Forward transform. Returns `None` for values unseen during fitting.
    pub fn transform(&self, value: &str) -> Option<i64> {
        self.classes
            .iter()
            .position(|class| class == value)
            .map(|index| index as i64)
    }
}

/// Per-column encoders keyed by feature column name
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct EncoderSet {
    columns: HashMap<String, LabelEncoder>,
}

impl EncoderSet {
    /// Deserialize the encoder mapping artifact from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read encoder artifact {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse encoder artifact {}", path.display()))
    }

    /// Look up the fitted encoder for a column.
    pub fn column(&self, name: &str) -> Option<&LabelEncoder> {
        self.columns.get(name)
    }

    /// Number of encoded columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_set() -> EncoderSet {
        serde_json::from_value(serde_json::json!({
            "merchant": ["Acme", "Globex"],
            "category": ["gas", "grocery", "travel"],
            "gender": ["Female", "Male"]
        }))
        .unwrap()
    }

    #[test]
    fn test_transform_known_value() {
        let encoders = sample_set();
        let merchant = encoders.column("merchant").unwrap();
        assert_eq!(merchant.transform("Acme"), Some(0));
        assert_eq!(merchant.transform("Globex"), Some(1));
    }

    #[test]
    fn test_transform_unseen_value() {
        let encoders = sample_set();
        assert_eq!(encoders.column("merchant").unwrap().transform("Initech"), None);
    }

    #[test]
    fn test_missing_column() {
        let encoders = sample_set();
        assert!(encoders.column("city").is_none());
        assert_eq!(encoders.column_count(), 3);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"gender": ["Female", "Male"]}}"#).unwrap();

        let encoders = EncoderSet::from_file(file.path()).unwrap();
        assert_eq!(encoders.column("gender").unwrap().transform("Male"), Some(1));
    }

    #[test]
    fn test_from_file_missing() {
        assert!(EncoderSet::from_file("no/such/encoders.json").is_err());
    }
}
