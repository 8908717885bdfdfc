//! Value generators attached to argument slots
//!
//! Both generators run lazily, one external call per invocation, and never
//! fail: anything unexpected becomes an empty suggestion list.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

use crate::completions::{Generator, Suggestion};
use crate::config::SpecConfig;
use crate::dependencies::{extract_package_names, Manifest};
use crate::error::Result;
use crate::executor::{Executor, ShellCommand};

/// Source of the project manifest text
#[async_trait]
pub trait ManifestReader: Send + Sync {
    async fn read_manifest(&self) -> Result<String>;
}

/// Reads the manifest from disk
#[derive(Clone, Debug)]
pub struct FileManifestReader {
    path: PathBuf,
}

impl FileManifestReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &SpecConfig) -> Self {
        Self::new(config.manifest_path())
    }
}

#[async_trait]
impl ManifestReader for FileManifestReader {
    async fn read_manifest(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

/// Everything a generator may touch
pub struct GeneratorContext<'a> {
    pub executor: &'a dyn Executor,
    pub manifest: &'a dyn ManifestReader,
    pub config: &'a SpecConfig,
}

impl Generator {
    /// Suggestions for `token`, the word currently being completed
    pub async fn suggest(&self, token: &str, ctx: &GeneratorContext<'_>) -> Vec<Suggestion> {
        match self {
            Generator::PackageSearch => search_packages(token, ctx.executor, ctx.config).await,
            Generator::ManifestDependencies => manifest_dependencies(ctx.manifest).await,
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    results: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

/// The registry query for `term`
pub fn search_command(term: &str, config: &SpecConfig) -> ShellCommand {
    let url = format!(
        "{}?q={}&per_page={}",
        config.search_endpoint,
        urlencoding::encode(term),
        config.search_page_size
    );
    ShellCommand::new("curl", ["-s", "-H", "Accept: application/json", url.as_str()])
}

/// Search the registry for packages matching `term`
pub async fn search_packages(
    term: &str,
    executor: &dyn Executor,
    config: &SpecConfig,
) -> Vec<Suggestion> {
    if term.is_empty() {
        return vec![];
    }

    let command = search_command(term, config);
    let body = match executor.execute(&command).await {
        Ok(output) => output.stdout,
        Err(e) => {
            tracing::debug!(error = %e, "package search failed");
            return vec![];
        }
    };

    parse_search_results(&body).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "discarding package search response");
        vec![]
    })
}

pub fn parse_search_results(body: &str) -> Result<Vec<Suggestion>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .results
        .into_iter()
        .map(|hit| Suggestion::package(hit.name, hit.description.filter(|d| !d.is_empty())))
        .collect())
}

/// Packages declared in the local manifest
pub async fn manifest_dependencies(reader: &dyn ManifestReader) -> Vec<Suggestion> {
    match reader.read_manifest().await {
        Ok(content) => parse_manifest_suggestions(&content),
        Err(e) => {
            tracing::debug!(error = %e, "no manifest to read");
            vec![]
        }
    }
}

pub fn parse_manifest_suggestions(content: &str) -> Vec<Suggestion> {
    if content.trim().is_empty() {
        return vec![];
    }

    match Manifest::from_json(content) {
        Ok(manifest) => extract_package_names(&manifest.merged())
            .into_iter()
            .map(|name| Suggestion::package(name, None))
            .collect(),
        Err(e) => {
            tracing::error!(error = %e, "failed to parse manifest");
            vec![]
        }
    }
}
