//! Signing profile loading
//!
//! A signing profile is the JSON form of an OpenHarmony `build_profile.json5`.
//! Only the `app.signingConfigs[].material` records are consumed; everything
//! else in the document is ignored.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{HapsignError, ProfileError, Result};

/// Parsed signing profile document
#[derive(Debug, Clone, Deserialize)]
pub struct SigningProfile {
    /// `app` section of the build profile
    pub app: AppSection,
}

/// `app` section of a build profile
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSection {
    /// Signing configurations, in declaration order
    pub signing_configs: Vec<SigningConfig>,
}

/// A single entry of `app.signingConfigs`
#[derive(Debug, Clone, Deserialize)]
pub struct SigningConfig {
    /// Config name (e.g. "default", "release")
    pub name: Option<String>,

    /// Key material and encrypted passwords
    pub material: SigningMaterial,
}

/// Key material section of a signing config.
///
/// Other material keys (`storeFile`, `profile`, `keyAlias`, `signAlg`) are
/// ignored: the script derives the material paths from `certpath` and uses a
/// fixed key alias and algorithm.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningMaterial {
    /// Path of the app certificate on the machine that exported the profile
    pub certpath: String,

    /// Encrypted key password
    pub key_password: String,

    /// Encrypted keystore password
    pub store_password: String,
}

impl SigningProfile {
    /// Parse a profile from a JSON string
    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Pick a signing config: by name if given, otherwise the first entry.
    ///
    /// Returns the index of the entry alongside it.
    pub fn select(&self, name: Option<&str>, path: &Path) -> Result<(usize, &SigningConfig)> {
        let configs = &self.app.signing_configs;
        if configs.is_empty() {
            return Err(ProfileError::NoSigningConfigs(path.to_path_buf()).into());
        }

        let Some(name) = name else {
            return Ok((0, &configs[0]));
        };

        configs
            .iter()
            .enumerate()
            .find(|(_, c)| c.name.as_deref() == Some(name))
            .ok_or_else(|| {
                let available: Vec<&str> =
                    configs.iter().filter_map(|c| c.name.as_deref()).collect();
                HapsignError::from(ProfileError::SigningConfigNotFound {
                    name: name.to_string(),
                    path: path.to_path_buf(),
                    available: if available.is_empty() {
                        "none named".to_string()
                    } else {
                        available.join(", ")
                    },
                })
            })
    }
}

/// A profile loaded from disk with its signing config selected
#[derive(Debug, Clone)]
pub struct LoadedProfile {
    /// Path the profile was read from
    pub path: PathBuf,

    /// Directory containing the profile, passed to the decryption helper
    pub directory: PathBuf,

    /// Index of the selected entry in `app.signingConfigs`
    pub index: usize,

    /// Name of the selected entry, if it has one
    pub name: Option<String>,

    /// Material of the selected entry
    pub material: SigningMaterial,
}

impl LoadedProfile {
    /// Human-readable label for the selected signing config
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("signingConfigs[{}]", self.index),
        }
    }
}

/// Load a signing profile and select a signing config from it
pub fn load_profile(path: &Path, config_name: Option<&str>) -> Result<LoadedProfile> {
    info!(path = %path.display(), "loading signing profile");

    let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let profile = SigningProfile::from_json(&content).map_err(|source| ProfileError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let (index, config) = profile.select(config_name, path)?;
    debug!(
        index,
        name = config.name.as_deref().unwrap_or("<unnamed>"),
        certpath = %config.material.certpath,
        "selected signing config"
    );

    Ok(LoadedProfile {
        path: path.to_path_buf(),
        directory: profile_directory(path),
        index,
        name: config.name.clone(),
        material: config.material.clone(),
    })
}

/// Directory containing the profile; a bare file name resolves to `.`
pub fn profile_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
