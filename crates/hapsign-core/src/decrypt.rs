//! Password decryption
//!
//! Build profiles store passwords encrypted with a key kept next to the
//! profile. Decryption is delegated to an external helper that prints the
//! plaintext on stdout.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

use crate::config::DecryptConfig;
use crate::error::{DecryptError, HapsignError, Result};

/// Recovers plaintext passwords from a signing profile
pub trait DecryptionProvider {
    /// Name used in logs and error messages
    fn name(&self) -> &str;

    /// Decrypt `encrypted` using the material in `directory`
    fn decrypt(&self, directory: &Path, encrypted: &str) -> Result<Vec<u8>>;
}

/// Decrypts passwords by running a helper program found on PATH.
///
/// The helper is invoked as `<program> [args...] <directory> <encrypted>`.
#[derive(Debug, Clone)]
pub struct HelperDecryptor {
    program: String,
    args: Vec<String>,
}

impl HelperDecryptor {
    /// Create a decryptor for the given program and leading arguments
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Create a decryptor from configuration
    pub fn from_config(config: &DecryptConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    /// Leading arguments passed before the directory and password
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Resolve the helper program on PATH
    pub fn locate(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|_| {
            HapsignError::from(DecryptError::HelperNotFound {
                program: self.program.clone(),
                hint: self.install_hint(),
            })
        })
    }

    fn install_hint(&self) -> String {
        if self.program == "node" {
            "Install Node.js from https://nodejs.org/ and make sure it is on PATH".to_string()
        } else {
            format!("Make sure '{}' is installed and on PATH", self.program)
        }
    }
}

impl DecryptionProvider for HelperDecryptor {
    fn name(&self) -> &str {
        &self.program
    }

    fn decrypt(&self, directory: &Path, encrypted: &str) -> Result<Vec<u8>> {
        let program = self.locate()?;
        debug!(
            program = %program.display(),
            directory = %directory.display(),
            "running decryption helper"
        );

        let output = Command::new(&program)
            .args(&self.args)
            .arg(directory)
            .arg(encrypted)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| DecryptError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DecryptError::HelperFailed {
                program: self.program.clone(),
                status: output.status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            }
            .into());
        }

        info!(program = %self.program, "decryption helper succeeded");
        Ok(output.stdout.trim_ascii().to_vec())
    }
}
