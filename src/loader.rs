//! Session entry point: ask Composer for its catalog and build the tree

use crate::catalog::Catalog;
use crate::completions::{CompletionSpec, Subcommand};
use crate::config::SpecConfig;
use crate::error::Result;
use crate::executor::{Executor, ShellCommand};
use crate::transform::build_subcommands;

pub const ROOT_NAME: &str = "composer";

const MISSING_FILE_MARKERS: &[&str] = &["No such file or directory", "(No such file or directory)"];

pub fn catalog_command(config: &SpecConfig) -> ShellCommand {
    ShellCommand::new(config.composer_binary.as_str(), ["list", "--format=json"])
}

pub fn lock_probe_command(config: &SpecConfig) -> ShellCommand {
    ShellCommand::new("ls", ["-lah", config.lock_file.as_str()])
}

/// The lock file counts as present unless the probe reported it missing
pub fn lock_file_present(probe_output: &str) -> bool {
    let trimmed = probe_output.trim_end();
    !MISSING_FILE_MARKERS.iter().any(|m| trimmed.ends_with(m))
}

/// Build the completion tree. Never fails: a broken catalog yields a root
/// with no subcommands.
pub async fn generate_spec(executor: &dyn Executor, config: &SpecConfig) -> CompletionSpec {
    let catalog_cmd = catalog_command(config);
    let probe_cmd = lock_probe_command(config);

    let (catalog_out, probe_out) = tokio::join!(
        executor.execute(&catalog_cmd),
        executor.execute(&probe_cmd)
    );

    let has_lock_file = match probe_out {
        Ok(output) => lock_file_present(&output.combined()),
        Err(e) => {
            tracing::debug!(error = %e, "lock file probe failed, assuming absent");
            false
        }
    };

    let subcommands = match catalog_out
        .and_then(|output| output.into_stdout(&catalog_cmd))
        .and_then(|json| subcommands_from_json(&json, has_lock_file))
    {
        Ok(subcommands) => subcommands,
        Err(e) => {
            tracing::error!(error = %e, command = %catalog_cmd, "could not load command catalog");
            vec![]
        }
    };

    tracing::info!(subcommands = subcommands.len(), has_lock_file, "built completion spec");
    CompletionSpec::new(ROOT_NAME, subcommands)
}

pub fn subcommands_from_json(json: &str, has_lock_file: bool) -> Result<Vec<Subcommand>> {
    let catalog = Catalog::from_json(json)?;
    Ok(build_subcommands(&catalog, has_lock_file))
}
