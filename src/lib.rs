//! composer_spec - dynamic shell-completion spec for the Composer CLI
//!
//! Asks the installed `composer` for its command catalog and turns it into a
//! declarative completion tree, with value generators for registry search
//! and locally declared dependencies.
//!
//! Modules:
//! - catalog: the `composer list --format=json` document
//! - completions: completion tree and suggestion types
//! - transform: catalog → completion tree
//! - dependencies: package names from a `composer.json` manifest
//! - generators: registry search and manifest generators
//! - loader: session entry point
//! - executor: external process calls
//! - config: runtime configuration
//! - logging: tracing setup for the CLI

pub mod catalog;
pub mod completions;
pub mod config;
pub mod dependencies;
pub mod error;
pub mod executor;
pub mod generators;
pub mod loader;
pub mod logging;
pub mod transform;

#[cfg(feature = "napi")]
pub mod napi_bridge;

// Re-export key types for convenience
pub use catalog::{Catalog, CatalogArgument, CatalogCommand, CatalogOption};

pub use completions::{
    ArgSpec, CompletionSpec, Generator, OptionSpec, Subcommand, Suggestion, Template,
};

pub use config::SpecConfig;

pub use error::{Result, SpecError};

pub use executor::{CommandOutput, Executor, ScriptedExecutor, ShellCommand, SystemExecutor};

pub use generators::{FileManifestReader, GeneratorContext, ManifestReader};

pub use loader::generate_spec;

pub use transform::build_subcommands;
