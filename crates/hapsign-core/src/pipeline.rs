//! Sign script generation pipeline

use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::decrypt::DecryptionProvider;
use crate::error::{DecryptError, HapsignError, Result};
use crate::profile::load_profile;
use crate::script::{Credentials, SignScript};

/// Inputs for a generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Path to the JSON signing profile
    pub profile: PathBuf,

    /// Signing config to use; the first one when unset
    pub signing_config: Option<String>,

    /// Where to write the script
    pub output: PathBuf,

    /// Script renderer
    pub script: SignScript,
}

/// Summary of a completed run. Never carries passwords.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    /// Profile that was read
    pub profile: PathBuf,

    /// Signing config that was used
    pub signing_config: String,

    /// Key base name embedded in the script
    pub key_base_name: String,

    /// Path of the written script
    pub script: PathBuf,
}

/// Load the profile, decrypt both passwords and write the signing script.
///
/// The output file is only touched once both passwords have been decrypted.
pub fn generate(
    options: &GenerateOptions,
    decryptor: &dyn DecryptionProvider,
) -> Result<GenerateReport> {
    let profile = load_profile(&options.profile, options.signing_config.as_deref())?;
    let material = &profile.material;

    info!(helper = decryptor.name(), "decrypting key password");
    let key_password = decrypt_utf8(decryptor, &profile.directory, &material.key_password)?;

    info!(helper = decryptor.name(), "decrypting store password");
    let store_password = decrypt_utf8(decryptor, &profile.directory, &material.store_password)?;

    let credentials = Credentials::new(&key_password, &store_password, &material.certpath)?;
    options.script.write_to(&options.output, &credentials)?;

    info!(
        output = %options.output.display(),
        key_base_name = %credentials.key_base_name,
        "signing script generated"
    );

    Ok(GenerateReport {
        profile: profile.path.clone(),
        signing_config: profile.label(),
        key_base_name: credentials.key_base_name,
        script: options.output.clone(),
    })
}

fn decrypt_utf8(
    decryptor: &dyn DecryptionProvider,
    directory: &std::path::Path,
    encrypted: &str,
) -> Result<String> {
    let plain = decryptor.decrypt(directory, encrypted)?;
    String::from_utf8(plain).map_err(|_| {
        HapsignError::from(DecryptError::InvalidOutput {
            program: decryptor.name().to_string(),
        })
    })
}
