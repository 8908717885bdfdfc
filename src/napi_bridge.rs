/*!
 * N-API Bridge - Expose the completion spec to a Node.js completion host
 *
 * Provides Node.js bindings for:
 * - Building the completion tree for a working directory
 * - Running a generator for the token being completed
 *
 * Both return JSON strings so the host can hand them straight to its engine.
 */

use napi::bindgen_prelude::*;
use napi_derive::napi;
use std::path::PathBuf;

use crate::completions::Generator;
use crate::config::SpecConfig;
use crate::executor::SystemExecutor;
use crate::generators::{FileManifestReader, GeneratorContext};
use crate::loader::generate_spec;

fn config_for(working_dir: Option<String>) -> Result<SpecConfig> {
    let mut config = SpecConfig::default()
        .with_env_overrides()
        .map_err(|e| Error::from_reason(e.to_string()))?;
    if let Some(dir) = working_dir {
        config.working_dir = Some(PathBuf::from(dir));
    }
    Ok(config)
}

/// Completion tree for the project in `working_dir`
#[napi]
pub async fn generate_spec_js(working_dir: Option<String>) -> Result<String> {
    let config = config_for(working_dir)?;
    let executor = SystemExecutor::from_config(&config);
    let spec = generate_spec(&executor, &config).await;
    spec.to_json(false)
        .map_err(|e| Error::from_reason(format!("Failed to serialize spec: {}", e)))
}

/// Suggestions from the generator named by `kind`
/// (`package-search` or `manifest-dependencies`)
#[napi]
pub async fn suggest_js(
    kind: String,
    token: String,
    working_dir: Option<String>,
) -> Result<String> {
    let generator: Generator = serde_json::from_value(serde_json::json!({ "type": kind }))
        .map_err(|e| Error::from_reason(format!("Unknown generator {}: {}", kind, e)))?;

    let config = config_for(working_dir)?;
    let executor = SystemExecutor::from_config(&config);
    let manifest = FileManifestReader::from_config(&config);
    let ctx = GeneratorContext {
        executor: &executor,
        manifest: &manifest,
        config: &config,
    };

    let suggestions = generator.suggest(&token, &ctx).await;
    serde_json::to_string(&suggestions)
        .map_err(|e| Error::from_reason(format!("Failed to serialize suggestions: {}", e)))
}
