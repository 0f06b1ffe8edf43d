//! Config loading with an embedded fallback
//!
//! - If `CONFIG_FILE` is NOT set: use the embedded `config.yaml` only
//! - If `CONFIG_FILE` IS set and the file exists: read it from disk
//! - If `CONFIG_FILE` IS set and the file is missing: fall back to embedded

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

const CONFIG_NAME: &str = "config.yaml";

/// Outcome of writing the default config to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Written,
    Skipped,
}

/// Loads `config.yaml` from an optional external path with embedded fallback
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var or --config)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    /// Build from the `CONFIG_FILE` environment variable
    pub fn from_env() -> Self {
        Self::new(std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
            tracing::warn!(path = %path.display(), "Config file not found, using embedded config");
        }

        Self::embedded_config().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
        })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write the embedded config to `path` for customization
    pub fn write_default_config(path: &Path, force: bool) -> io::Result<InitOutcome> {
        if path.exists() && !force {
            return Ok(InitOutcome::Skipped);
        }
        let data = Self::embedded_config().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &*data)?;
        Ok(InitOutcome::Written)
    }

    fn embedded_config() -> Option<Cow<'static, [u8]>> {
        EmbeddedConfig::get(CONFIG_NAME).map(|f| {
            tracing::trace!("Loading config from embedded assets");
            f.data
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_is_present() {
        let loader = AssetLoader::new(None);
        let content = loader.read_config_string().unwrap();
        assert!(content.contains("tile:"));
        assert!(content.contains("sampling:"));
    }

    #[test]
    fn test_missing_external_falls_back_to_embedded() {
        let loader = AssetLoader::new(Some(PathBuf::from("/nonexistent/photomosaic.yaml")));
        assert!(loader.read_config_string().unwrap().contains("tile:"));
    }

    #[test]
    fn test_external_config_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "tile:\n  width: 8\n  height: 4\n").unwrap();

        let loader = AssetLoader::new(Some(path));
        assert_eq!(
            loader.read_config_string().unwrap(),
            "tile:\n  width: 8\n  height: 4\n"
        );
    }

    #[test]
    fn test_write_default_config_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        assert_eq!(
            AssetLoader::write_default_config(&path, false).unwrap(),
            InitOutcome::Written
        );
        fs::write(&path, "edited").unwrap();

        assert_eq!(
            AssetLoader::write_default_config(&path, false).unwrap(),
            InitOutcome::Skipped
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "edited");

        assert_eq!(
            AssetLoader::write_default_config(&path, true).unwrap(),
            InitOutcome::Written
        );
        assert!(fs::read_to_string(&path).unwrap().contains("tile:"));
    }
}
