//! Website descriptor tree.
//!
//! The site set is owned by whoever manages websites; this crate only reads
//! it during a configuration pass. It is loaded from TOML or JSON.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A free-form backend parameter value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Integer(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Integer(i)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

/// Untyped backend directives, keyed by name. `None` is an explicit null.
pub type Params = BTreeMap<String, Option<ParamValue>>;

/// One worker-pool instance a location routes to.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BackendDescriptor {
    /// Unique pool id; used as file stem and pool section name.
    pub id: String,

    /// Backend type tag.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub params: Params,
}

impl BackendDescriptor {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            params: Params::new(),
        }
    }

    /// Builder-style parameter setter.
    pub fn with_param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.to_string(), Some(value.into()));
        self
    }
}

/// A site sub-route bound to exactly one backend.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LocationDescriptor {
    #[serde(default)]
    pub pattern: String,

    pub backend: BackendDescriptor,
}

/// A website and its ordered locations.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WebsiteDescriptor {
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub locations: Vec<LocationDescriptor>,
}

fn default_enabled() -> bool {
    true
}

impl WebsiteDescriptor {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
            locations: Vec::new(),
        }
    }

    /// Builder-style location append.
    pub fn with_location(mut self, pattern: &str, backend: BackendDescriptor) -> Self {
        self.locations.push(LocationDescriptor {
            pattern: pattern.to_string(),
            backend,
        });
        self
    }
}

/// Every website known to the host, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteSet {
    pub websites: Vec<WebsiteDescriptor>,
}
