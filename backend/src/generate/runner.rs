//! Runs the external deck generator.
//!
//! The generator is any program that reads `datasheet_imarc.xlsx` and
//! `template.pptx` from its working directory and writes `updated_poc.pptx`
//! next to them.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::api::logs::{log_info_indent, log_warning};
use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::{ConfigError, GeneratorError};

/// Program, arguments and time budget for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorCommand {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl GeneratorCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Split a whitespace-separated command line. No shell quoting.
    pub fn parse(command_line: &str) -> Result<Self, ConfigError> {
        let mut words = command_line.split_whitespace().map(str::to_string);
        let program = words.next().ok_or(ConfigError::EmptyGenerator)?;
        Ok(Self::new(program).with_args(words))
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run in `work_dir`, capturing output. The child is killed if the
    /// timeout elapses or the returned future is dropped.
    pub async fn run(&self, work_dir: &Path) -> Result<(), GeneratorError> {
        log_info_indent(format!("Running {} {}", self.program, self.args.join(" ")), 1);

        let child = Command::new(&self.program)
            .args(&self.args)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(GeneratorError::Spawn)?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(GeneratorError::Spawn)?,
            Err(_) => {
                log_warning(format!("Generator timed out after {:?}", self.timeout));
                return Err(GeneratorError::Timeout(self.timeout));
            }
        };

        if !output.status.success() {
            return Err(GeneratorError::Failed {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}
