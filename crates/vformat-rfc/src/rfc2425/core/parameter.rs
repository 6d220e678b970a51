//! Attribute parameters (RFC 2425 §5.8.2).

use std::collections::BTreeMap;

use serde::Serialize;

/// Parameters of one attribute, keyed by uppercased name.
///
/// A name maps to one or more values (`TYPE=HOME,WORK`). Setting a name
/// that is already present replaces its values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, Vec<String>>);

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any existing values for the name.
    pub fn set(&mut self, name: &str, values: Vec<String>) {
        self.0.insert(name.to_ascii_uppercase(), values);
    }

    /// Appends a value to a parameter, creating it if missing.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.0
            .entry(name.to_ascii_uppercase())
            .or_default()
            .push(value.into());
    }

    /// Removes a parameter, returning its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.0.remove(&name.to_ascii_uppercase())
    }

    /// Returns all values of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(&name.to_ascii_uppercase()).map(Vec::as_slice)
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name)?.first().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&name.to_ascii_uppercase())
    }

    /// Returns whether the parameter has the given value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, name: &str, value: &str) -> bool {
        self.get(name)
            .is_some_and(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
