use std::{io, path::PathBuf, process::ExitStatus, time::Duration};

use avatar_tts::TtsError;
use thiserror::Error;

/// Failure while rendering audio and timing for one message
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("speech synthesis failed: {0}")]
    Synthesis(#[from] TtsError),

    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{tool} did not finish within {timeout:?}")]
    ToolTimeout { tool: String, timeout: Duration },

    #[error("timing data in {path} is not valid JSON: {source}")]
    InvalidTiming {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to create scratch directory: {0}")]
    Scratch(#[source] io::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure reading a pre-rendered fixture file
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("fixture file {0} does not exist")]
    Missing(PathBuf),

    #[error("fixture timing file {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read fixture file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FixtureError {
    /// Short label used in log fields
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Missing(_) => "missing",
            Self::Corrupt { .. } => "corrupt",
            Self::Io { .. } => "io",
        }
    }

    pub(crate) fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::Missing(path)
        } else {
            Self::Io { path, source }
        }
    }
}
