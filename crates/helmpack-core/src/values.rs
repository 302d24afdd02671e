//! Values overlays with deep merge support

use serde_yaml::{Mapping, Value};
use std::path::Path;

use crate::error::{CoreError, Result};

/// A values document: always a mapping at the top level
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values(pub Mapping);

impl Values {
    /// Create empty values
    pub fn new() -> Self {
        Self(Mapping::new())
    }

    /// Load values from a YAML file
    ///
    /// An empty document counts as an empty mapping. Any other top level
    /// kind is rejected.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CoreError::ValuesFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let value = crate::yaml::parse(&content).map_err(|message| CoreError::ValuesParse {
            path: path.to_path_buf(),
            message,
        })?;

        match value {
            Value::Null => Ok(Self::new()),
            Value::Mapping(map) => Ok(Self(map)),
            _ => Err(CoreError::ValuesNotMapping {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Parse values from a YAML string
    #[cfg(test)]
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        match crate::yaml::parse(yaml) {
            Ok(Value::Mapping(map)) => Ok(Self(map)),
            Ok(_) => Ok(Self::new()),
            Err(message) => Err(CoreError::ValuesParse {
                path: "<inline>".into(),
                message,
            }),
        }
    }

    /// Deep merge another Values into this one
    ///
    /// Rules:
    /// - Mappings: recursive merge, existing keys keep their position
    /// - Scalars: overlay replaces base
    /// - Sequences: overlay replaces base (not appended)
    /// - Mismatched kinds: overlay replaces base
    pub fn merge(&mut self, overlay: &Values) {
        merge_mapping(&mut self.0, &overlay.0);
    }

    /// Merge multiple values in order, later entries winning
    #[cfg(test)]
    pub fn merge_all<I: IntoIterator<Item = Values>>(values: I) -> Self {
        let mut result = Values::new();
        for v in values {
            result.merge(&v);
        }
        result
    }

    /// Load and merge a list of files relative to `base`, in order
    pub fn merge_files<S: AsRef<str>>(base: &Path, files: &[S]) -> Result<Self> {
        let mut merged = Values::new();
        for rel in files {
            let path = crate::paths::normalize(&base.join(rel.as_ref()));
            tracing::debug!(file = %path.display(), "merging values file");
            merged.merge(&Values::from_file(&path)?);
        }
        Ok(merged)
    }

    /// Get a value by dotted path (e.g., "image.tag")
    #[cfg(test)]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        parts.try_fold(self.0.get(first)?, |current, key| match current {
            Value::Mapping(map) => map.get(key),
            _ => None,
        })
    }

    /// Check if values are empty
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize to a YAML document
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.0)?)
    }

    /// Write as YAML, replacing whatever the file held
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }
}

fn merge_mapping(base: &mut Mapping, overlay: &Mapping) {
    for (key, overlay_value) in overlay {
        match base.get_mut(key) {
            Some(base_value) => deep_merge(base_value, overlay_value),
            None => {
                base.insert(key.clone(), overlay_value.clone());
            }
        }
    }
}

/// Deep merge two YAML values
fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            merge_mapping(base_map, overlay_map);
        }
        (base, overlay) => {
            *base = overlay.clone();
        }
    }
}
