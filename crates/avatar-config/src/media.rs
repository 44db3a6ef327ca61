use std::{collections::BTreeMap, path::PathBuf, time::Duration};

use serde::Deserialize;

/// Placeholder replaced by the input file path in tool arguments
pub const INPUT_PLACEHOLDER: &str = "{input}";
/// Placeholder replaced by the output file path in tool arguments
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Fixtures, scratch space and the external lip-sync tool chain
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MediaConfig {
    /// Directory holding pre-rendered `<name>.wav` / `<name>.json` pairs
    pub fixture_dir: PathBuf,
    /// Root for request-scoped scratch directories (system temp dir if unset)
    pub work_dir: Option<PathBuf>,
    /// Audio transcoder producing the format the extractor reads
    pub transcoder: ToolConfig,
    /// Phonetic timing extractor
    pub extractor: ToolConfig,
    /// Upper bound for a single tool invocation, in seconds
    pub tool_timeout_secs: u64,
}

impl MediaConfig {
    pub const fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            fixture_dir: PathBuf::from("audios"),
            work_dir: None,
            transcoder: ToolConfig::ffmpeg(),
            extractor: ToolConfig::rhubarb(),
            tool_timeout_secs: 60,
        }
    }
}

/// External command invoked as an argv vector
///
/// `{input}` and `{output}` in `args` are substituted per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    pub program: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl ToolConfig {
    pub fn ffmpeg() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            args: ["-y", "-i", INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER].map(str::to_owned).to_vec(),
            env: BTreeMap::new(),
        }
    }

    pub fn rhubarb() -> Self {
        Self {
            program: PathBuf::from("rhubarb"),
            args: ["-f", "json", "-o", OUTPUT_PLACEHOLDER, INPUT_PLACEHOLDER, "-r", "phonetic"]
                .map(str::to_owned)
                .to_vec(),
            env: BTreeMap::new(),
        }
    }

    /// Whether the argument template references both file placeholders
    pub fn mentions_io(&self) -> bool {
        let mentions = |needle: &str| self.args.iter().any(|arg| arg.contains(needle));
        mentions(INPUT_PLACEHOLDER) && mentions(OUTPUT_PLACEHOLDER)
    }
}
