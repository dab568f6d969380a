//! Configuration for the command line tool
//!
//! `defaults/examxml.default.toml` is embedded into the binary. On top of it
//! [`Loader`] layers, in order:
//!
//! 1. `examxml.toml` in the working directory, when there is one
//! 2. the file passed with `--config`
//! 3. command line overrides
//!
//! and then deserializes the result into [`ExamXmlConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../../defaults/examxml.default.toml");

/// Project file picked up from the working directory.
pub const LOCAL_CONFIG: &str = "examxml.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ExamXmlConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Compiled when no path is given.
    pub default_path: PathBuf,
}

/// How the compiled document is written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    pub xml_declaration: bool,
    pub pretty: bool,
    pub indent: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            xml_declaration: true,
            pretty: true,
            indent: "\t".to_string(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a file named explicitly by the user. It must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer `examxml.toml` from `dir`, if present.
    pub fn with_local_file(self, dir: impl AsRef<Path>) -> Self {
        self.layer(&dir.as_ref().join(LOCAL_CONFIG), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        tracing::debug!(path = %path.display(), required, "layering config file");
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. from a command line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<ExamXmlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
