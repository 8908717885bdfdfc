//! Package names declared in a `composer.json` manifest

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::catalog::ordered_map;
use crate::error::Result;

/// The two dependency groups of a manifest. Other keys are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Manifest {
    #[serde(default, deserialize_with = "ordered_map")]
    pub require: IndexMap<String, String>,
    #[serde(default, rename = "require-dev", deserialize_with = "ordered_map")]
    pub require_dev: IndexMap<String, String>,
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// `require` overlaid with `require-dev`. A name pinned in both groups
    /// keeps its `require` position and takes the `require-dev` constraint.
    pub fn merged(&self) -> IndexMap<String, String> {
        let mut merged = self.require.clone();
        for (name, constraint) in &self.require_dev {
            merged.insert(name.clone(), constraint.clone());
        }
        merged
    }
}

fn package_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r".+/.+").expect("valid package regex"))
}

/// Names of the form `vendor/package`, in mapping order. Platform entries
/// such as `php` or `ext-json` are dropped.
pub fn extract_package_names(dependencies: &IndexMap<String, String>) -> Vec<String> {
    dependencies
        .keys()
        .filter(|name| package_pattern().is_match(name))
        .cloned()
        .collect()
}
