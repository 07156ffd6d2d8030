use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use khqr_api::merchant::MerchantProfile;
use serde::{Deserialize, Serialize};
use serde_json::{from_str, to_string_pretty};
use std::{fs, path::PathBuf};

use crate::settings::consts::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, SETTINGS_FILE};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub merchant_id: String,
    pub merchant_name: String,
    pub merchant_city: String,
    pub country_code: String,
    pub currency: String,
    pub account_number: String,
    /// Largest amount the generate endpoints accept, in the merchant currency.
    pub max_amount: f64,
    pub min_amount: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            merchant_id: "1234567890".to_string(),
            merchant_name: "ROTHA NANG".to_string(),
            merchant_city: "Phnom Penh".to_string(),
            country_code: "KH".to_string(),
            currency: "USD".to_string(),
            account_number: "0123456789".to_string(),
            max_amount: 10_000.0,
            min_amount: 0.01,
        }
    }
}

impl Settings {
    /// Build the immutable merchant profile handed to the codec.
    pub fn profile(&self) -> Result<MerchantProfile> {
        Ok(MerchantProfile {
            merchant_id: self.merchant_id.clone(),
            merchant_name: self.merchant_name.clone(),
            merchant_city: self.merchant_city.clone(),
            country_code: self.country_code.clone(),
            currency: self
                .currency
                .parse()
                .with_context(|| format!("Invalid configured currency: {}", self.currency))?,
            account_number: self.account_number.clone(),
        })
    }
}

pub trait SettingsStore {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
}

pub struct FileSettingsStore {
    directory: PathBuf, // platform config directory (from ProjectDirs)
    file: &'static str, // "settings.json"
}

impl FileSettingsStore {
    /// Build from ProjectDirs config directory:
    ///   - Windows:   %APPDATA%\<qualifier>\<org>\<app>\settings.json
    ///   - macOS:     ~/Library/Application Support/<app>/settings.json
    ///   - Linux:     ~/.config/<app>/settings.json
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .ok_or_else(|| anyhow!("Could not determine project directories"))?;

        Ok(Self {
            directory: project_dirs.config_dir().to_path_buf(),
            file: SETTINGS_FILE,
        })
    }

    fn path(&self) -> PathBuf {
        self.directory.join(self.file)
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Settings> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "Failed to create settings directory: {}",
                self.directory.display()
            )
        })?;
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => {
                let defaults = Settings::default();
                self.save(&defaults)?;
                return Ok(defaults);
            }
        };
        from_str(&content).context("Failed to deserialize settings")
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "Failed to create settings directory: {}",
                self.directory.display()
            )
        })?;
        fs::write(&self.path(), to_string_pretty(settings)?)
            .with_context(|| format!("Failed to persist settings file: {}", self.path().display()))
    }
}

#[cfg(test)]
mod tests {
    use khqr_api::merchant::Currency;

    use super::Settings;

    #[test]
    fn test_default_settings_build_a_profile() {
        let profile = Settings::default().profile().unwrap();
        assert_eq!(profile.merchant_name, "ROTHA NANG");
        assert_eq!(profile.merchant_city, "Phnom Penh");
        assert_eq!(profile.country_code, "KH");
        assert_eq!(profile.currency, Currency::Usd);
    }

    #[test]
    fn test_invalid_currency_is_rejected() {
        let settings = Settings {
            currency: "EUR".to_string(),
            ..Default::default()
        };
        assert!(settings.profile().is_err());
    }

    #[test]
    fn test_settings_serde_round_trip() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"merchantName\""));
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.merchant_name, settings.merchant_name);
        assert_eq!(back.max_amount, settings.max_amount);
    }
}
