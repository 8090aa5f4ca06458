//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_decrypt(config)?;
    validate_script(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_decrypt(config: &Config) -> Result<()> {
    if config.decrypt.program.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "decrypt.program".to_string(),
            message: "helper program cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_script(config: &Config) -> Result<()> {
    if config.script.output.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "script.output".to_string(),
            message: "output path cannot be empty".to_string(),
        }
        .into());
    }

    // The jar path is resolved on the signing host, so it must not depend on
    // the directory the script is run from.
    if !config.script.sign_tool_jar.starts_with('/') {
        return Err(ConfigError::InvalidValue {
            field: "script.sign_tool_jar".to_string(),
            message: "must be an absolute path".to_string(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HapsignError;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_program_rejected() {
        let mut config = Config::default();
        config.decrypt.program = "  ".to_string();

        let err = validate_config(&config).unwrap_err();
        match err {
            HapsignError::Config(ConfigError::InvalidValue { field, .. }) => {
                assert_eq!(field, "decrypt.program");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_output_rejected() {
        let mut config = Config::default();
        config.script.output = PathBuf::new();

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_relative_jar_rejected() {
        let mut config = Config::default();
        config.script.sign_tool_jar = "lib/hap-sign-tool.jar".to_string();

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("script.sign_tool_jar"));
    }
}
