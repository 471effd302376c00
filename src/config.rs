//! Server configuration
//!
//! Every option can come from the command line or the environment
//! (`.env` is loaded first by the binary).

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

use crate::advisory::client::{is_usable_api_key, DEFAULT_GROQ_MODEL, DEFAULT_GROQ_URL};
use crate::advisory::GroqSettings;

#[derive(Debug, Clone, Parser)]
#[command(name = "farmai-server", about = "Crop yield prediction and AI crop advisory server")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "FARMAI_BIND_ADDR", default_value = "0.0.0.0:5000")]
    pub bind_addr: String,

    /// Directory that relative artifact paths resolve against
    #[arg(long, env = "FARMAI_ARTIFACTS_DIR", default_value = ".")]
    pub artifacts_dir: PathBuf,

    /// Regressor artifact (.json, or bincode for any other extension)
    #[arg(long, env = "FARMAI_MODEL_FILE", default_value = "model.json")]
    pub model_file: PathBuf,

    /// Fitted preprocessor artifact
    #[arg(long, env = "FARMAI_PREPROCESSOR_FILE", default_value = "preprocessor.json")]
    pub preprocessor_file: PathBuf,

    /// Areas and crops the model knows about
    #[arg(long, env = "FARMAI_VALID_INPUTS_FILE", default_value = "valid_inputs.json")]
    pub valid_inputs_file: PathBuf,

    /// Directory served under /static
    #[arg(long, env = "FARMAI_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// API key for the chat-completion upstream
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: Option<String>,

    #[arg(long, env = "GROQ_URL", default_value = DEFAULT_GROQ_URL)]
    pub groq_url: String,

    #[arg(long, env = "GROQ_MODEL", default_value = DEFAULT_GROQ_MODEL)]
    pub groq_model: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "FARMAI_ADVISORY_TIMEOUT_SECS", default_value_t = 30)]
    pub advisory_timeout_secs: u64,
}

impl Config {
    pub fn model_path(&self) -> PathBuf {
        self.resolve(&self.model_file)
    }

    pub fn preprocessor_path(&self) -> PathBuf {
        self.resolve(&self.preprocessor_file)
    }

    pub fn valid_inputs_path(&self) -> PathBuf {
        self.resolve(&self.valid_inputs_file)
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.artifacts_dir.join(file)
        }
    }

    /// Upstream settings, or `None` when no usable key is configured
    pub fn groq_settings(&self) -> Option<GroqSettings> {
        if !is_usable_api_key(self.groq_api_key.as_deref()) {
            return None;
        }
        let api_key = self.groq_api_key.as_deref()?.trim().to_string();
        Some(GroqSettings {
            api_key,
            url: self.groq_url.clone(),
            model: self.groq_model.clone(),
            timeout: Duration::from_secs(self.advisory_timeout_secs),
        })
    }
}
