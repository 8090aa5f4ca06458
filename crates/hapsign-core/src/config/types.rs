//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::{
    DEFAULT_HELPER_PROGRAM, DEFAULT_HELPER_SCRIPT, DEFAULT_OUTPUT, DEFAULT_SIGN_TOOL_JAR,
};

/// Main configuration for hapsign
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Password decryption helper
    pub decrypt: DecryptConfig,

    /// Emitted script settings
    pub script: ScriptConfig,
}

/// Password decryption helper configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecryptConfig {
    /// Program looked up on PATH
    pub program: String,

    /// Arguments passed before the profile directory and encrypted password
    pub args: Vec<String>,
}

impl Default for DecryptConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_HELPER_PROGRAM.to_string(),
            args: vec![DEFAULT_HELPER_SCRIPT.to_string()],
        }
    }
}

/// Emitted script configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Output path, relative to the working directory
    pub output: PathBuf,

    /// Absolute path of hap-sign-tool.jar on the host running the script
    pub sign_tool_jar: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            sign_tool_jar: DEFAULT_SIGN_TOOL_JAR.to_string(),
        }
    }
}
