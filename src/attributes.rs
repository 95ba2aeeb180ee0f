//! Attribute bags.
//!
//! An [`AttributeBag`] is an ordered map of named values plus the list of
//! keys that must be present before the bag may be exported as XML. Offers
//! and category schemas are both built on top of it.
//!
//! Export filtering lives in [`filter_falsy`]. The array, JSON and XML
//! exports all go through it so the three shapes always agree.

use crate::error::{Error, Result};
use crate::value::{AttributeMap, Value};

/// A mapping of named values with a declared set of required keys.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBag {
    attributes: AttributeMap,
    required: &'static [&'static str],
}

impl AttributeBag {
    /// Creates an empty bag that requires the given keys.
    pub fn new(required: &'static [&'static str]) -> Self {
        Self {
            attributes: AttributeMap::new(),
            required,
        }
    }

    /// Stores `value` under `key`, overwriting any previous value.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.attributes.insert(key.into(), value.into());
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Whether `key` holds a non-null value.
    pub fn contains(&self, key: &str) -> bool {
        self.attributes.get(key).is_some_and(|v| !v.is_null())
    }

    /// Replaces the whole attribute map.
    pub fn replace(&mut self, attributes: AttributeMap) {
        self.attributes = attributes;
    }

    /// The unfiltered attribute map.
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// The keys that must be present, in declaration order.
    pub fn required_keys(&self) -> &'static [&'static str] {
        self.required
    }

    /// Checks that every required key is present.
    ///
    /// Fails on the first missing key in declaration order. A key holding
    /// `Value::Null` counts as missing.
    pub fn validate(&self) -> Result<()> {
        match self.required.iter().find(|key| !self.contains(key)) {
            Some(key) => Err(Error::missing_required(*key)),
            None => Ok(()),
        }
    }

    /// The attribute map with falsy values removed.
    pub fn export_map(&self) -> AttributeMap {
        filter_falsy(&self.attributes)
    }
}

/// Removes falsy entries from `map`, descending into nested maps.
///
/// A nested map that is empty after filtering is removed too, so a nested
/// structure never exports as an empty container.
pub fn filter_falsy(map: &AttributeMap) -> AttributeMap {
    map.iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Map(nested) => Value::Map(filter_falsy(nested)),
                other => other.clone(),
            };
            value.is_truthy().then(|| (key.clone(), value))
        })
        .collect()
}
