//! Configuration management for the CLI.

use crate::cli::{GenerateArgs, PresetArg, ProviderArg};
use crate::error::{CliError, Result};
use gazette_editor::EditorConfig;
use gazette_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Completion provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Chunking, scoring and pass settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Refinement and review settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,
}

/// Which completion service to call and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider kind
    #[serde(default)]
    pub kind: ProviderKind,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL override (OpenAI-compatible base or Ollama endpoint)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

/// Supported completion providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions API
    #[default]
    Openai,
    /// Local Ollama server
    Ollama,
    /// Canned responses
    Mock,
}

/// Global output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Directory the newsletter JSON is written to
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,

    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".gazette").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; the default path falls back to defaults
    /// when missing.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Apply command-line overrides from `generate`.
    pub fn apply_args(&mut self, args: &GenerateArgs) {
        if let Some(preset) = args.preset {
            let passes_and_chunks = match preset {
                PresetArg::Compact => ExtractorConfig::compact(),
                PresetArg::Standard => ExtractorConfig::default(),
                PresetArg::Thorough => ExtractorConfig::thorough(),
            };
            self.extractor = ExtractorConfig {
                keywords: self.extractor.keywords.clone(),
                ..passes_and_chunks
            };
        }
        if let Some(provider) = args.provider {
            self.provider.kind = provider.into();
        }
        if let Some(model) = &args.model {
            self.provider.model = model.clone();
        }
        if let Some(output) = &args.output {
            self.output.directory = output.clone();
        }
        if args.no_edit {
            self.editor = EditorConfig::disabled();
        }
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        if self.provider.model.trim().is_empty() {
            return Err(CliError::Config("provider.model must not be empty".into()));
        }
        self.extractor.validate()?;
        self.editor.validate()?;
        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            model: default_model(),
            base_url: None,
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            color: true,
        }
    }
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Openai => ProviderKind::Openai,
            ProviderArg::Ollama => ProviderKind::Ollama,
            ProviderArg::Mock => ProviderKind::Mock,
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    gazette_llm::openai::API_KEY_ENV.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

fn default_true() -> bool {
    true
}
