//! The command catalog reported by `composer list --format=json`
//!
//! Only the fields the completion tree needs are modelled; everything else
//! in the document (application info, namespaces, usage, help) is ignored.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub commands: Vec<CatalogCommand>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogCommand {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub definition: Definition,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default, deserialize_with = "ordered_map")]
    pub arguments: IndexMap<String, CatalogArgument>,
    #[serde(default, deserialize_with = "ordered_map")]
    pub options: IndexMap<String, CatalogOption>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogArgument {
    pub name: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default: Value,
}

impl CatalogArgument {
    /// First element of a list default, a scalar as-is, nothing for
    /// null/false/empty values.
    pub fn default_value(&self) -> Option<String> {
        match &self.default {
            Value::Array(items) => items.first().and_then(scalar_to_string),
            other => scalar_to_string(other),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogOption {
    pub name: String,
    #[serde(default)]
    pub shortcut: String,
    #[serde(default)]
    pub accept_value: bool,
    #[serde(default)]
    pub is_value_required: bool,
    #[serde(default)]
    pub description: String,
}

/// PHP encodes an empty associative array as `[]`, so an empty definition
/// or dependency group arrives as a list rather than an object. `null`
/// also reads as empty.
pub(crate) fn ordered_map<'de, D, T>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrList<T> {
        Map(IndexMap<String, T>),
        List(Vec<Value>),
        Null(()),
    }

    match MapOrList::deserialize(deserializer)? {
        MapOrList::Map(map) => Ok(map),
        MapOrList::List(items) if items.is_empty() => Ok(IndexMap::new()),
        MapOrList::List(_) => Err(serde::de::Error::custom(
            "expected an object keyed by name, found a non-empty array",
        )),
        MapOrList::Null(()) => Ok(IndexMap::new()),
    }
}
