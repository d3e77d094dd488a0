use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Filename parsing settings
    pub parsing: ParsingConfig,

    /// Application settings
    pub app: AppConfig,

    /// JSON API server settings
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Two-digit year cutoff: 00..=cutoff maps to 2000+, the rest to 1900+
    pub year_cutoff: u32,

    /// Longest filename accepted by the parser
    pub max_filename_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Audio file extensions accepted for intake
    pub allowed_extensions: Vec<String>,

    /// Extension used when suggesting filenames without an explicit format
    pub default_suggest_format: String,

    /// Show catalog location; defaults next to the config file
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the JSON API
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parsing: ParsingConfig {
                year_cutoff: 30,
                max_filename_length: 512,
            },
            app: AppConfig {
                allowed_extensions: ["wav", "mp3", "aiff", "flac", "m4a"]
                    .iter()
                    .map(|e| e.to_string())
                    .collect(),
                default_suggest_format: "wav".to_string(),
                catalog_path: None,
            },
            server: ServerConfig {
                bind: "127.0.0.1:8080".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content =
                fs_err::read_to_string(&config_path).context("Failed to read config file")?;

            let config: Config =
                serde_yaml::from_str(&content).context("Failed to parse config file")?;

            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save().await?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        fs_err::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("aircheck").join("config.yaml"))
    }

    /// Where the show catalog lives: configured path, else next to the
    /// config file.
    pub fn catalog_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.app.catalog_path {
            return Ok(path.clone());
        }

        let config_path = Self::config_path()?;
        let dir = config_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(dir.join("shows.yaml"))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.parsing.year_cutoff > 99 {
            anyhow::bail!(
                "year_cutoff must be a two-digit value, got {}",
                self.parsing.year_cutoff
            );
        }

        if self.parsing.max_filename_length == 0 {
            anyhow::bail!("max_filename_length must be non-zero");
        }

        if self.app.allowed_extensions.is_empty() {
            anyhow::bail!("At least one allowed extension must be configured");
        }

        self.server
            .bind
            .parse::<std::net::SocketAddr>()
            .map_err(|_| anyhow::anyhow!("Invalid bind address: {}", self.server.bind))?;

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Year Cutoff: {}", self.parsing.year_cutoff);
        println!(
            "  Max Filename Length: {}",
            self.parsing.max_filename_length
        );
        println!(
            "  Allowed Extensions: {}",
            self.app.allowed_extensions.join(", ")
        );
        println!("  Suggest Format: {}", self.app.default_suggest_format);
        if let Some(path) = &self.app.catalog_path {
            println!("  Catalog Path: {}", path.display());
        }
        println!("  Server Bind: {}", self.server.bind);
    }
}
