use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use super::fold_key;

/// Snapshot of environment variables in host order.
///
/// Keys are deduplicated with the comparison the snapshot was built with: the
/// first occurrence wins. Values are `None` when the host reports a value
/// that cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentVariables {
  case_sensitive: bool,
  entries: Vec<(String, Option<String>)>,
  index: HashMap<String, usize>,
}

impl EnvironmentVariables {
  /// Build a snapshot from raw `(key, value)` pairs.
  pub fn collect<I, K>(pairs: I, case_sensitive: bool) -> Self
  where
    I: IntoIterator<Item = (K, Option<String>)>,
    K: Into<String>,
  {
    let mut variables = Self {
      case_sensitive,
      entries: Vec::new(),
      index: HashMap::new(),
    };

    for (key, value) in pairs {
      let key = key.into();
      let folded = variables.fold(&key);
      if variables.index.contains_key(&folded) {
        debug!(key = %key, "dropping duplicate environment variable");
        continue;
      }
      variables.index.insert(folded, variables.entries.len());
      variables.entries.push((key, value));
    }

    variables
  }

  pub fn is_case_sensitive(&self) -> bool {
    self.case_sensitive
  }

  /// Value of `name`; `None` when missing or without a value.
  pub fn get(&self, name: &str) -> Option<&str> {
    let position = self.index.get(&self.fold(name))?;
    self.entries[*position].1.as_deref()
  }

  pub fn contains_key(&self, name: &str) -> bool {
    self.index.contains_key(&self.fold(name))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
  }

  fn fold(&self, key: &str) -> String {
    fold_key(key, self.case_sensitive)
  }
}

impl IntoIterator for EnvironmentVariables {
  type Item = (String, Option<String>);
  type IntoIter = std::vec::IntoIter<(String, Option<String>)>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.into_iter()
  }
}

impl Serialize for EnvironmentVariables {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.entries.len()))?;
    for (key, value) in &self.entries {
      map.serialize_entry(key, value)?;
    }
    map.end()
  }
}
