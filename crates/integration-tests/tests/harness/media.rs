//! Fixture directory and shell-free stand-ins for the lip-sync tool chain

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use avatar_config::ToolConfig;
use tempfile::TempDir;

/// Fixture names every canned response needs
pub const FIXTURES: [&str; 5] = ["intro_0", "intro_1", "api_0", "api_1", "error"];

/// Extractor stand-in: records the spoken audio as the only mouth cue
const EXTRACTOR_SCRIPT: &str = r#"#!/bin/sh
set -e
spoken=$(cat "$1")
printf '{"mouthCues":[{"start":0.0,"end":0.5,"value":"%s"}]}' "$spoken" > "$2"
"#;

/// Temporary fixtures, scratch root and tool scripts for one test
pub struct MediaKit {
    root: TempDir,
}

impl MediaKit {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();

        let fixtures = root.path().join("audios");
        std::fs::create_dir(&fixtures).unwrap();
        for name in FIXTURES {
            std::fs::write(fixtures.join(format!("{name}.wav")), format!("wav:{name}")).unwrap();
            std::fs::write(
                fixtures.join(format!("{name}.json")),
                format!(r#"{{"fixture": "{name}", "mouthCues": []}}"#),
            )
            .unwrap();
        }

        std::fs::create_dir(root.path().join("work")).unwrap();

        let script = root.path().join("extract.sh");
        std::fs::write(&script, EXTRACTOR_SCRIPT).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        Self { root }
    }

    pub fn fixture_dir(&self) -> PathBuf {
        self.root.path().join("audios")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.root.path().join("work")
    }

    /// Remove one file of a fixture pair
    pub fn remove_fixture_file(&self, file: &str) {
        std::fs::remove_file(self.fixture_dir().join(file)).unwrap();
    }

    /// `cp {input} {output}`
    pub fn transcoder(&self) -> ToolConfig {
        ToolConfig {
            program: PathBuf::from("cp"),
            args: vec!["{input}".to_owned(), "{output}".to_owned()],
            env: Default::default(),
        }
    }

    pub fn extractor(&self) -> ToolConfig {
        ToolConfig {
            program: self.root.path().join("extract.sh"),
            args: vec!["{input}".to_owned(), "{output}".to_owned()],
            env: Default::default(),
        }
    }

    /// Entries left in the scratch root
    pub fn scratch_entries(&self) -> usize {
        std::fs::read_dir(self.work_dir()).unwrap().count()
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }
}
