//! hapsign core - signing script generation for HAP packaging pipelines
//!
//! Reads the signing configuration out of an OpenHarmony build profile,
//! recovers its passwords through an external decryption helper and renders a
//! shell script that signs an artifact with `hap-sign-tool.jar`.

pub mod config;
pub mod decrypt;
pub mod error;
pub mod pipeline;
pub mod profile;
pub mod script;

pub use config::{Config, DecryptConfig, ScriptConfig};
pub use decrypt::{DecryptionProvider, HelperDecryptor};
pub use error::{
    ConfigError, DecryptError, ErrorCategory, HapsignError, ProfileError, Result, ScriptError,
};
pub use pipeline::{generate, GenerateOptions, GenerateReport};
pub use profile::{load_profile, LoadedProfile, SigningConfig, SigningMaterial, SigningProfile};
pub use script::{key_base_name, Credentials, SignScript};
