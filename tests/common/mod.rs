#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Working directory holding a `SourcePack/` tree and its manifest
pub struct TestPack {
    pub temp_dir: TempDir,
}

impl TestPack {
    /// Create a working directory with an empty `SourcePack/`
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        fs::create_dir_all(temp_dir.path().join(layersync::DEFAULT_SOURCE_ROOT))?;
        Ok(Self { temp_dir })
    }

    /// Get the working directory path
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the manifest the binary reads and writes
    pub fn manifest_path(&self) -> PathBuf {
        self.path().join(layersync::DEFAULT_MANIFEST_FILE)
    }

    /// Create an empty file under `SourcePack/`
    pub fn add_image(&self, relative: &str) -> Result<()> {
        let path = self.path().join(layersync::DEFAULT_SOURCE_ROOT).join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, b"")?;
        Ok(())
    }

    /// Delete a file under `SourcePack/`
    pub fn remove_image(&self, relative: &str) -> Result<()> {
        fs::remove_file(self.path().join(layersync::DEFAULT_SOURCE_ROOT).join(relative))?;
        Ok(())
    }

    /// Overwrite the manifest with raw text
    pub fn write_manifest(&self, content: &str) -> Result<()> {
        fs::write(self.manifest_path(), content)?;
        Ok(())
    }

    /// Read the manifest text
    pub fn manifest(&self) -> Result<String> {
        Ok(fs::read_to_string(self.manifest_path())?)
    }

    /// Parse the manifest as JSON
    pub fn manifest_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.manifest()?)?)
    }

    /// The binary, run inside the working directory with colors off
    pub fn cmd(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("layersync")?;
        cmd.current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("CLICOLOR_FORCE")
            .env_remove("RUST_LOG");
        Ok(cmd)
    }
}
