//! CLI definition and execution

pub mod output;

use clap::Parser;
use console::style;
use std::path::PathBuf;
use tracing::{debug, info};

use hapsign_core::config::{load_config, load_config_or_default, validate_config, Config};
use hapsign_core::{generate, GenerateOptions, GenerateReport, HelperDecryptor, SignScript};

/// hapsign - generate a HAP signing script from a build profile
#[derive(Debug, Parser)]
#[command(name = "hapsign")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Build profile (JSON) holding the signing configs
    pub profile: PathBuf,

    /// Where to write the signing script [default: sign.sh]
    #[arg(short, long, env = "HAPSIGN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Name of the signing config to use (default: the first one)
    #[arg(long)]
    pub signing_config: Option<String>,

    /// Decryption helper program, looked up on PATH [default: node]
    #[arg(long, env = "HAPSIGN_HELPER")]
    pub helper: Option<String>,

    /// Argument passed to the helper before the directory and password
    /// (repeatable; replaces the configured arguments)
    #[arg(long = "helper-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub helper_args: Vec<String>,

    /// Configuration file (default: hapsign.toml in this or a parent directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> anyhow::Result<()> {
        let config = self.resolve_config()?;
        let options = self.generate_options(&config);
        let decryptor = HelperDecryptor::from_config(&config.decrypt);

        info!(
            profile = %options.profile.display(),
            output = %options.output.display(),
            "generating signing script"
        );
        let report = generate(&options, &decryptor)?;
        self.print_report(&report)
    }

    /// Load the config file and apply command-line overrides
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => {
                let cwd = std::env::current_dir()?;
                let (config, path) = load_config_or_default(&cwd)?;
                if let Some(path) = path {
                    debug!(path = %path.display(), "using config file");
                }
                config
            }
        };

        if let Some(helper) = &self.helper {
            config.decrypt.program = helper.clone();
            config.decrypt.args = self.helper_args.clone();
        } else if !self.helper_args.is_empty() {
            config.decrypt.args = self.helper_args.clone();
        }

        if let Some(output) = &self.output {
            config.script.output = output.clone();
        }

        validate_config(&config)?;
        Ok(config)
    }

    fn generate_options(&self, config: &Config) -> GenerateOptions {
        GenerateOptions {
            profile: self.profile.clone(),
            signing_config: self.signing_config.clone(),
            output: config.script.output.clone(),
            script: SignScript::from_config(&config.script),
        }
    }

    fn print_report(&self, report: &GenerateReport) -> anyhow::Result<()> {
        if let Some(rendered) = self.render_report(report)? {
            print!("{rendered}");
        }
        Ok(())
    }

    /// Render the run summary; `None` when quiet text output is requested
    fn render_report(&self, report: &GenerateReport) -> anyhow::Result<Option<String>> {
        let rendered = match self.format {
            OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(report)?),
            OutputFormat::Text => {
                if self.quiet {
                    return Ok(None);
                }

                let lines = [
                    output::success(&format!(
                        "Signing script written to {}",
                        output::path_style().apply_to(report.script.display())
                    )),
                    output::key_value("Profile", &report.profile.display().to_string()),
                    output::key_value("Signing config", &report.signing_config),
                    output::key_value("Key base name", &report.key_base_name),
                    String::new(),
                    format!(
                        "Run {} to sign an artifact",
                        style(format!("{} <input.hap> <output.hap>", report.script.display()))
                            .bold()
                    ),
                ];
                lines.join("\n") + "\n"
            }
        };

        Ok(Some(rendered))
    }
}
