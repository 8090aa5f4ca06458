//! Signing script generation
//!
//! The emitted script runs `hap-sign-tool.jar sign-app` against key material
//! stored under `${HOME}/.ohos/config`, with the input and output artifacts
//! taken from the script's positional arguments.

use std::fmt;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::{ScriptConfig, DEFAULT_SIGN_TOOL_JAR};
use crate::error::{Result, ScriptError};

/// Directory holding the keystore, provisioning profile and certificate
pub const MATERIAL_DIR: &str = "${HOME}/.ohos/config";

/// Key alias used by DevEco debug signing material
pub const KEY_ALIAS: &str = "debugKey";

/// Signature algorithm passed to the signing tool
pub const SIGN_ALG: &str = "SHA256withECDSA";

/// Signing mode passed to the signing tool
pub const SIGN_MODE: &str = "localSign";

/// Permissions of the written script: owner read, write and execute
#[cfg(unix)]
const SCRIPT_MODE: u32 = 0o700;

/// Decrypted credentials for a single signing config
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Plaintext key password
    pub key_password: String,

    /// Plaintext keystore password
    pub store_password: String,

    /// Certificate file stem shared by the .p12, .p7b and .cer files
    pub key_base_name: String,
}

impl Credentials {
    /// Build credentials from decrypted passwords and the profile's certpath
    pub fn new(key_password: &str, store_password: &str, certpath: &str) -> Result<Self> {
        Ok(Self {
            key_password: key_password.trim().to_string(),
            store_password: store_password.trim().to_string(),
            key_base_name: key_base_name(certpath)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key_password", &"<redacted>")
            .field("store_password", &"<redacted>")
            .field("key_base_name", &self.key_base_name)
            .finish()
    }
}

/// Derive the key base name from a certificate path.
///
/// Takes the last path segment (either separator style) and keeps everything
/// before its first `.`, so `C:\keys\mykey.p12` yields `mykey`.
pub fn key_base_name(certpath: &str) -> Result<String> {
    let file_name = certpath
        .rsplit(|c: char| c == '\\' || c == '/')
        .next()
        .unwrap_or(certpath);
    let stem = file_name.split('.').next().unwrap_or(file_name);

    if stem.trim().is_empty() {
        return Err(ScriptError::InvalidKeyBaseName {
            certpath: certpath.to_string(),
        }
        .into());
    }

    Ok(stem.to_string())
}

/// Renders and writes the signing script
#[derive(Debug, Clone)]
pub struct SignScript {
    sign_tool_jar: String,
}

impl Default for SignScript {
    fn default() -> Self {
        Self {
            sign_tool_jar: DEFAULT_SIGN_TOOL_JAR.to_string(),
        }
    }
}

impl SignScript {
    /// Create a script generator with the default signing tool location
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a script generator from configuration
    pub fn from_config(config: &ScriptConfig) -> Self {
        Self::new().with_sign_tool_jar(config.sign_tool_jar.clone())
    }

    /// Set the signing tool jar path
    pub fn with_sign_tool_jar(mut self, jar: impl Into<String>) -> Self {
        self.sign_tool_jar = jar.into();
        self
    }

    /// Render the script content
    pub fn render(&self, credentials: &Credentials) -> String {
        warn_if_unsafe("keyPassword", &credentials.key_password);
        warn_if_unsafe("storePassword", &credentials.store_password);

        let base = &credentials.key_base_name;
        let mut script = String::new();
        script.push_str("#!/usr/bin/env bash\n");
        script.push_str("set -eu\n");
        script.push_str(&format!("key_base_name=\"{}\"\n", base));

        let args = [
            format!("java -jar {}", self.sign_tool_jar),
            "sign-app".to_string(),
            format!("-mode {}", SIGN_MODE),
            format!("-keyAlias {}", KEY_ALIAS),
            format!("-keystoreFile {}/{}.p12", MATERIAL_DIR, base),
            format!("-keystorePwd {}", credentials.store_password),
            format!("-keyPwd {}", credentials.key_password),
            format!("-signAlg {}", SIGN_ALG),
            format!("-profileFile {}/{}.p7b", MATERIAL_DIR, base),
            format!("-appCertFile {}/{}.cer", MATERIAL_DIR, base),
            "-inFile $1".to_string(),
            "-outFile $2".to_string(),
        ];
        script.push_str(&args.join(" "));
        script.push('\n');
        script
    }

    /// Render the script and write it to `path`, replacing any existing file
    pub fn write_to(&self, path: &Path, credentials: &Credentials) -> Result<()> {
        let content = self.render(credentials);
        let write_err = |source: std::io::Error| ScriptError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut open = std::fs::OpenOptions::new();
        open.write(true).create(true).truncate(true);
        // The script embeds plaintext passwords: owner-only from creation on
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            open.mode(SCRIPT_MODE);
        }
        let mut file = open.open(path).map_err(write_err)?;

        // `mode` only applies to new files; tighten a pre-existing one before
        // any secret is written into it.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(SCRIPT_MODE))
                .map_err(write_err)?;
        }

        file.write_all(content.as_bytes()).map_err(write_err)?;

        debug!(path = %path.display(), key_base_name = %credentials.key_base_name, "wrote signing script");
        Ok(())
    }
}

/// Passwords are embedded unquoted, so anything the shell would interpret
/// breaks the emitted command line.
fn warn_if_unsafe(field: &str, value: &str) {
    const SHELL_SPECIAL: &str = "$`\"'\\|&;<>()*?[]{}!#~";
    if value
        .chars()
        .any(|c| c.is_whitespace() || SHELL_SPECIAL.contains(c))
    {
        warn!(
            field,
            "decrypted password contains characters the shell will interpret"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HapsignError;
    use tempfile::TempDir;

    fn credentials() -> Credentials {
        Credentials::new("pass1", "pass2", "C:\\a\\b.p12").unwrap()
    }

    #[test]
    fn test_key_base_name_windows_path() {
        assert_eq!(key_base_name("C:\\keys\\mykey.p12").unwrap(), "mykey");
    }

    #[test]
    fn test_key_base_name_unix_path() {
        assert_eq!(
            key_base_name("/home/dev/.ohos/config/default_app_abc.cer").unwrap(),
            "default_app_abc"
        );
    }

    #[test]
    fn test_key_base_name_stops_at_first_dot() {
        assert_eq!(key_base_name("C:\\keys\\app.debug.p12").unwrap(), "app");
        assert_eq!(key_base_name("noext").unwrap(), "noext");
    }

    #[test]
    fn test_key_base_name_empty() {
        for certpath in ["", "C:\\keys\\", "C:\\keys\\.p12"] {
            let err = key_base_name(certpath).unwrap_err();
            assert!(matches!(
                err,
                HapsignError::Script(ScriptError::InvalidKeyBaseName { .. })
            ));
        }
    }

    #[test]
    fn test_credentials_trim_passwords() {
        let creds = Credentials::new(" pass1\n", "\tpass2\r\n", "C:\\a\\b.p12").unwrap();
        assert_eq!(creds.key_password, "pass1");
        assert_eq!(creds.store_password, "pass2");
    }

    #[test]
    fn test_credentials_debug_redacts() {
        let debug = format!("{:?}", credentials());
        assert!(!debug.contains("pass1"));
        assert!(!debug.contains("pass2"));
        assert!(debug.contains("\"b\""));
    }

    #[test]
    fn test_render_script() {
        let script = SignScript::new().render(&credentials());

        let expected = "#!/usr/bin/env bash\n\
            set -eu\n\
            key_base_name=\"b\"\n\
            java -jar /data/commandline-tools/sdk/default/openharmony/toolchains/lib/hap-sign-tool.jar \
            sign-app -mode localSign -keyAlias debugKey \
            -keystoreFile ${HOME}/.ohos/config/b.p12 \
            -keystorePwd pass2 -keyPwd pass1 -signAlg SHA256withECDSA \
            -profileFile ${HOME}/.ohos/config/b.p7b \
            -appCertFile ${HOME}/.ohos/config/b.cer \
            -inFile $1 -outFile $2\n";
        assert_eq!(script, expected);
    }

    #[test]
    fn test_render_custom_jar() {
        let script = SignScript::new()
            .with_sign_tool_jar("/opt/ohos/hap-sign-tool.jar")
            .render(&credentials());
        assert!(script.contains("java -jar /opt/ohos/hap-sign-tool.jar sign-app "));
    }

    #[test]
    fn test_write_is_deterministic() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sign.sh");
        let generator = SignScript::new();

        generator.write_to(&path, &credentials()).unwrap();
        let first = std::fs::read(&path).unwrap();
        generator.write_to(&path, &credentials()).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sign.sh");
        SignScript::new().write_to(&path, &credentials()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
        assert_eq!(mode & 0o077, 0, "script with passwords readable by others");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_tightens_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sign.sh");
        std::fs::write(&path, "old content that is longer than nothing").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        SignScript::new().write_to(&path, &credentials()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            SignScript::new().render(&credentials())
        );
    }

    #[test]
    fn test_write_to_missing_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("sign.sh");

        let err = SignScript::new().write_to(&path, &credentials()).unwrap_err();
        assert!(matches!(err, HapsignError::Script(ScriptError::Write { .. })));
    }
}
