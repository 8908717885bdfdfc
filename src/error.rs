//! Error types for composer_spec
//!
//! None of these reach the completion host: the entry point and the
//! generators turn every variant into an empty result. They exist so each
//! failure is logged with its cause.

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("`{program}` exited with status {code:?}: {stderr}")]
    NonZeroExit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SpecError>;
