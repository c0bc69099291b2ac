use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::client::ModelSelection;

/// webcheck: schema-constrained generation service for simulated site
/// audits, simulated test runs and small developer tools.
#[derive(Parser, Debug, Clone)]
#[command(name = "webcheck")]
pub struct CliArgs {
    /// HTTP port
    #[arg(long = "port", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory holding the settings file (defaults to the user data dir)
    #[arg(long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the Generative Language API
    #[arg(long = "api-base", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Model used for text and structured generation
    #[arg(long = "text-model", default_value = DEFAULT_TEXT_MODEL)]
    pub text_model: String,

    /// Model used for failure screenshots
    #[arg(long = "image-model", default_value = DEFAULT_IMAGE_MODEL)]
    pub image_model: String,

    /// Per-request timeout for generation calls
    #[arg(long = "timeout-secs", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// API key used when the settings file holds none
    #[arg(long = "api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WebCheckConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub api_base: String,
    pub text_model: String,
    pub image_model: String,
    pub request_timeout: Duration,
    pub canned_run_delay: Duration,
}

pub const DEFAULT_PORT: u16 = 9880;
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

// Image generation
pub const IMAGE_OUTPUT_MIME_TYPE: &str = "image/jpeg";
pub const IMAGE_ASPECT_RATIO: &str = "16:9";

// Sample suites answer after this delay instead of calling the model
pub const CANNED_RUN_DELAY_MS: u64 = 1000;

pub const SETTINGS_FILE_NAME: &str = "webcheck-settings.json";

impl WebCheckConfig {
    pub fn from_args(args: &CliArgs) -> Self {
        let data_dir = args.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("webcheck"))
                .unwrap_or_else(|| PathBuf::from(".webcheck"))
        });

        WebCheckConfig {
            port: args.port,
            data_dir,
            api_base: args.api_base.clone(),
            text_model: args.text_model.clone(),
            image_model: args.image_model.clone(),
            request_timeout: Duration::from_secs(args.timeout_secs),
            canned_run_delay: Duration::from_millis(CANNED_RUN_DELAY_MS),
        }
    }

    pub fn models(&self) -> ModelSelection {
        ModelSelection {
            text_model: self.text_model.clone(),
            image_model: self.image_model.clone(),
        }
    }

    /// Path of the JSON file holding the stored credential.
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE_NAME)
    }
}
