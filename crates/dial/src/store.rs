//! Key/value persistence boundary.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl StoredValue {
    /// The value as a settings-message string, so stored preferences decode
    /// through the same path as incoming settings.
    pub fn to_setting(&self) -> String {
        match self {
            Self::Bool(true) => "on".to_string(),
            Self::Bool(false) => "off".to_string(),
            Self::Int(n) => n.to_string(),
            Self::Str(s) => s.clone(),
        }
    }
}

impl From<bool> for StoredValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for StoredValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<String> for StoredValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for StoredValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Store encoding error: {0}")]
    Encoding(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub trait Store {
    fn get(&self, key: &str) -> Option<StoredValue>;

    fn set(&mut self, key: &str, value: StoredValue) -> Result<(), StoreError>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            StoredValue::Str(s) => Some(s),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            StoredValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            StoredValue::Int(n) => Some(n),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, StoredValue>,
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<StoredValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: StoredValue) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
