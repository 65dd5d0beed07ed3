use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Region used when neither the CLI flag nor the config file provides one
pub const DEFAULT_REGION: &str = "ap-south-1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub region: String,
    pub email: Option<EmailConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Recipient of the cloud waste report
    pub to: String,
    /// Verified SES sender address
    pub from: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            email: None,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .reapctl.toml in current dir, then ~/.config/reapctl/config.toml
            let local = PathBuf::from(".reapctl.toml");
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("reapctl").join("config.toml"))
                    .unwrap_or_else(|| PathBuf::from(".reapctl.toml"))
            }
        };

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            toml::from_str::<Config>(&content).with_context(|| {
                format!(
                    "Failed to parse config: {}\n  Tip: Run 'reapctl init' to create a new config file",
                    config_path.display()
                )
            })?
        } else {
            if path.is_some() {
                eprintln!("WARNING: Config file not found: {}", config_path.display());
                eprintln!("   Using default configuration. Run 'reapctl init' to create a config file.");
            }
            Config::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Environment overrides for deployments where no config file ships
    /// (notably the Lambda entry point). `REAPCTL_EMAIL_FROM` defaults to the
    /// recipient address, matching SES same-address sending.
    fn apply_env(&mut self) {
        if let Ok(to) = std::env::var("REAPCTL_EMAIL_TO") {
            if !to.is_empty() {
                let from = std::env::var("REAPCTL_EMAIL_FROM")
                    .ok()
                    .filter(|f| !f.is_empty())
                    .unwrap_or_else(|| to.clone());
                self.email = Some(EmailConfig { to, from });
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

pub fn init_config(output: &Path) -> Result<()> {
    let config = Config::default();
    config.save(output)?;
    println!("Created config file: {}", output.display());
    Ok(())
}
