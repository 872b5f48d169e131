use anyhow::{Result, anyhow};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

fn default_model() -> String {
    "claude-3-5-haiku-20241022".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_history_file() -> PathBuf {
    PathBuf::from("history.json")
}

/// Process-wide configuration, constructed once at startup and passed by
/// reference into every component that needs it.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    /// Directory generated artifacts are written to, relative to the
    /// working directory unless absolute.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Backing file for the run history log.
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,
    #[serde(default)]
    pub use_mock: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            model: default_model(),
            output_dir: default_output_dir(),
            history_file: default_history_file(),
            use_mock: false,
        }
    }
}

impl Config {
    /// Load configuration from file, environment variables, or create default
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file().unwrap_or_else(|_| {
            info!("No config file found, using defaults");
            Self::default()
        });

        // Environment variables override config file
        if let Ok(api_key) = std::env::var("ANTHROPIC_API_KEY") {
            config.anthropic_api_key = Some(api_key);
        }

        if std::env::var("FIAT_USE_MOCK").is_ok() {
            config.use_mock = true;
        }

        Ok(config)
    }

    fn load_from_file() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            info!("Loaded config from: {}", config_path.display());
            Ok(config)
        } else {
            Err(anyhow!("Config file not found"))
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        info!("Saved config to: {}", config_path.display());
        Ok(())
    }

    fn get_config_path() -> Result<PathBuf> {
        let home = home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
        Ok(home.join(".fiat").join("config.toml"))
    }

    /// Set API key and save config
    pub fn set_api_key(&mut self, api_key: String) -> Result<()> {
        self.anthropic_api_key = Some(api_key);
        self.save()?;
        info!("API key saved to config file");
        Ok(())
    }

    /// Get API key from config or environment
    pub fn get_api_key(&self) -> Option<&String> {
        self.anthropic_api_key.as_ref()
    }

    pub fn is_mock_mode(&self) -> bool {
        self.use_mock
    }

    pub fn show_config_info() -> Result<()> {
        let config_path = Self::get_config_path()?;
        println!("Configuration file: {}", config_path.display());

        if config_path.exists() {
            println!("Status: Found");
            let config = Self::load_from_file()?;
            println!(
                "API Key: {}",
                if config.anthropic_api_key.is_some() { "Set" } else { "Not set" }
            );
            println!("Model: {}", config.model);
            println!("Output directory: {}", config.output_dir.display());
            println!("History file: {}", config.history_file.display());
            println!("Mock mode: {}", config.use_mock);
        } else {
            println!("Status: Not found (using defaults)");
        }

        println!("\nTo set API key:");
        println!("  fiat --set-api-key <your-key>");
        println!("\nOr set environment variable:");
        println!("  export ANTHROPIC_API_KEY=<your-key>");

        Ok(())
    }
}
