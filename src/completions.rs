//! Completion tree types
//!
//! The declarative structure handed to the completion host. Field names
//! serialize in the host's camelCase schema; unset and false fields are
//! left out, so an unconstrained argument placeholder serializes as `{}`.

use serde::{Deserialize, Serialize};

/// Icon shown next to every Composer subcommand
pub const COMPOSER_ICON: &str = "https://getcomposer.org/img/logo-composer-transparent5.png";

/// Icon shown next to package suggestions
pub const PACKAGE_ICON: &str = "📦";

/// Root of the completion tree
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionSpec {
    pub name: String,
    #[serde(default)]
    pub subcommands: Vec<Subcommand>,
}

impl CompletionSpec {
    pub fn new(name: impl Into<String>, subcommands: Vec<Subcommand>) -> Self {
        Self {
            name: name.into(),
            subcommands,
        }
    }

    /// Look a subcommand up by any of its names
    pub fn subcommand(&self, name: &str) -> Option<&Subcommand> {
        self.subcommands
            .iter()
            .find(|s| s.name.iter().any(|n| n == name))
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcommand {
    /// Names, primary first
    pub name: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSpec>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    /// e.g. `["--outdated", "-o"]`
    pub name: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<ArgSpec>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_dangerous: bool,
    /// Options that cannot be combined with this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusive_on: Vec<String>,
}

impl OptionSpec {
    pub fn flag<I, S>(names: I, description: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: names.into_iter().map(Into::into).collect(),
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    pub fn with_arg(mut self, arg: ArgSpec) -> Self {
        self.args = Some(arg);
        self
    }

    pub fn dangerous(mut self) -> Self {
        self.is_dangerous = true;
        self
    }

    pub fn exclusive_on(mut self, other: &str) -> Self {
        self.exclusive_on.push(other.to_string());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_variadic: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generators: Vec<Generator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
}

/// A value-suggestion source the host calls back into on demand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Generator {
    /// Packagist search for the token being typed
    PackageSearch,
    /// Packages declared in the local manifest
    ManifestDependencies,
}

/// Host-side completions the tree can delegate to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Folders,
}

/// A suggestion produced by a generator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Suggestion {
    pub fn package(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            icon: Some(PACKAGE_ICON.to_string()),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
