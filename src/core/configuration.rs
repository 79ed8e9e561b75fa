use serde::Deserialize;
use std::path::Path;
use tokio::{fs::File, io::AsyncReadExt};

pub mod sections;
mod tests;

use sections::{
    ControllerConfiguration, InventoryConfiguration, LogConfiguration, TagsConfiguration,
};

pub const DEFAULT_AP_ROLE: &str = "ap";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POLICY_TAG: &str = "default-policy-tag";
pub const DEFAULT_SITE_TAG: &str = "default-site-tag";
pub const DEFAULT_RF_TAG: &str = "default-rf-tag";

const NETBOX_TOKEN_VAR: &str = "NETBOX_TOKEN";
const WLC_USERNAME_VAR: &str = "WLC_USERNAME";
const WLC_PASSWORD_VAR: &str = "WLC_PASSWORD";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("configuration file {0} is missing")]
    Missing(String),
    #[error("cannot read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration file is corrupted: {0}")]
    Corrupted(#[from] toml::de::Error),
    #[error("{0} must be set")]
    MissingValue(&'static str),
}

#[derive(Deserialize, Clone, Debug)]
pub struct Configuration {
    pub inventory: InventoryConfiguration,
    pub controller: ControllerConfiguration,
    #[serde(default)]
    pub tags: TagsConfiguration,
    #[serde(default)]
    pub log: LogConfiguration,
}

impl Configuration {
    /// Secrets found in the environment take precedence over the file.
    pub fn apply_environment(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(NETBOX_TOKEN_VAR) {
            self.inventory.token = Some(token);
        }
        if let Some(username) = lookup(WLC_USERNAME_VAR) {
            self.controller.username = Some(username);
        }
        if let Some(password) = lookup(WLC_PASSWORD_VAR) {
            self.controller.password = Some(password);
        }
    }

    pub fn assert_inventory_is_reachable(&self) -> Result<(), ConfigurationError> {
        match self.inventory.url.as_deref().map(str::trim) {
            None | Some("") => Err(ConfigurationError::MissingValue("inventory.url")),
            _ => Ok(()),
        }
    }

    pub fn assert_controller_credentials(&self) -> Result<(), ConfigurationError> {
        if self.controller.username.as_deref().unwrap_or("").is_empty() {
            return Err(ConfigurationError::MissingValue("controller.username"));
        }

        if self.controller.password.is_none() {
            return Err(ConfigurationError::MissingValue("controller.password"));
        }

        Ok(())
    }
}

pub async fn get_configuration(file_path: String) -> Result<Configuration, ConfigurationError> {
    let path = Path::new(&file_path);

    if !path.exists() {
        return Err(ConfigurationError::Missing(file_path));
    }

    let mut file = File::open(path).await?;
    let mut content = String::new();

    file.read_to_string(&mut content).await?;

    let mut conf = toml::from_str::<Configuration>(&content)?;
    conf.apply_environment();

    Ok(conf)
}
