//! Default configuration values

/// Default configuration file name
pub const DEFAULT_CONFIG_TOML: &str = "hapsign.toml";

/// Alternative (hidden) configuration file name
pub const ALT_CONFIG_TOML: &str = ".hapsign.toml";

/// Program used to decrypt profile passwords
pub const DEFAULT_HELPER_PROGRAM: &str = "node";

/// Script passed to the helper program ahead of the directory and password
pub const DEFAULT_HELPER_SCRIPT: &str = "sign.js";

/// Name of the emitted signing script
pub const DEFAULT_OUTPUT: &str = "sign.sh";

/// Location of the signing tool on CI runners
pub const DEFAULT_SIGN_TOOL_JAR: &str =
    "/data/commandline-tools/sdk/default/openharmony/toolchains/lib/hap-sign-tool.jar";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![DEFAULT_CONFIG_TOML, ALT_CONFIG_TOML]
}
