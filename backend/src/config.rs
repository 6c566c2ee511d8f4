//! Server configuration.
//!
//! Values come from the environment (a `.env` file is loaded first):
//!
//! | Variable                    | Default        |
//! |-----------------------------|----------------|
//! | `POCDECK_PORT`              | `3000`         |
//! | `POCDECK_GENERATOR`         | `generate_poc` |
//! | `POCDECK_DEFAULT_TEMPLATE`  | unset          |
//! | `POCDECK_WORK_DIR`          | system temp    |
//! | `POCDECK_TIMEOUT_SECS`      | `120`          |
//! | `POCDECK_MAX_UPLOAD_MB`     | `50`           |
//!
//! `POCDECK_GENERATOR` names the program that renders the deck; nothing in
//! this crate does. It runs with the per-request work directory as its cwd,
//! reads `datasheet_imarc.xlsx` and `template.pptx` from there, and must
//! write `updated_poc.pptx` next to them before exiting with status 0. The
//! default `generate_poc` is expected on `PATH`. The value is split on
//! whitespace, e.g. `python3 /opt/poc/generate_poc.py`.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::generate::runner::GeneratorCommand;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_GENERATOR: &str = "generate_poc";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_UPLOAD_MB: usize = 50;

/// Where and how generations run.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// Program run inside each work directory.
    pub generator: GeneratorCommand,
    /// Template used when the upload carries none.
    pub default_template: Option<PathBuf>,
    /// Parent of the per-request work directories.
    pub work_root: PathBuf,
}

impl GenerationSettings {
    pub fn new(generator: GeneratorCommand) -> Self {
        Self {
            generator,
            default_template: None,
            work_root: env::temp_dir(),
        }
    }

    pub fn with_default_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_template = Some(path.into());
        self
    }

    pub fn with_work_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.work_root = path.into();
        self
    }
}

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Request body limit in bytes.
    pub max_upload_bytes: usize,
    pub generation: GenerationSettings,
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_var(&lookup, "POCDECK_PORT", DEFAULT_PORT)?;
        let timeout_secs = parse_var(&lookup, "POCDECK_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let max_upload_mb: usize =
            parse_var(&lookup, "POCDECK_MAX_UPLOAD_MB", DEFAULT_MAX_UPLOAD_MB)?;
        let max_upload_bytes = max_upload_mb.checked_mul(1024 * 1024).ok_or_else(|| {
            ConfigError::InvalidNumber {
                var: "POCDECK_MAX_UPLOAD_MB".to_string(),
                value: max_upload_mb.to_string(),
            }
        })?;

        let command_line =
            lookup("POCDECK_GENERATOR").unwrap_or_else(|| DEFAULT_GENERATOR.to_string());
        let generator = GeneratorCommand::parse(&command_line)?
            .with_timeout(Duration::from_secs(timeout_secs));

        let mut generation = GenerationSettings::new(generator);
        if let Some(path) = lookup("POCDECK_DEFAULT_TEMPLATE").filter(|p| !p.trim().is_empty()) {
            generation = generation.with_default_template(path);
        }
        if let Some(path) = lookup("POCDECK_WORK_DIR").filter(|p| !p.trim().is_empty()) {
            generation = generation.with_work_root(path);
        }

        Ok(Self {
            port,
            max_upload_bytes,
            generation,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &str, default: T) -> ConfigResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            var: var.to_string(),
            value,
        }),
    }
}
