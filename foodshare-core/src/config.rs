use anyhow::Result;
use dotenvy::dotenv;
use std::env;

use crate::error::ValidationError;

pub const DEFAULT_MERCHANT_NAME: &str = "FoodShare";
pub const DEFAULT_THEME_COLOR: &str = "#FACC15";
pub const DEFAULT_GEOCODE_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Public key id handed to the payment gateway. Only checkout needs it.
    pub razorpay_key_id: Option<String>,
    pub merchant_name: String,
    pub theme_color: String,
    pub geocode_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            razorpay_key_id: None,
            merchant_name: DEFAULT_MERCHANT_NAME.to_string(),
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, reading a `.env` file first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();
        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            razorpay_key_id: non_empty("RAZORPAY_KEY_ID"),
            merchant_name: non_empty("FOODSHARE_MERCHANT_NAME").unwrap_or(defaults.merchant_name),
            theme_color: non_empty("FOODSHARE_THEME_COLOR").unwrap_or(defaults.theme_color),
            geocode_url: non_empty("FOODSHARE_GEOCODE_URL").unwrap_or(defaults.geocode_url),
        }
    }

    pub fn payment_key(&self) -> Result<&str, ValidationError> {
        self.razorpay_key_id
            .as_deref()
            .ok_or(ValidationError::MissingPaymentKey)
    }
}

#[cfg(test)]
mod tests {
    use maplit::hashmap;

    use super::{Config, DEFAULT_GEOCODE_URL};
    use crate::error::ValidationError;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.merchant_name, "FoodShare");
        assert_eq!(config.geocode_url, DEFAULT_GEOCODE_URL);
        assert_eq!(config.payment_key(), Err(ValidationError::MissingPaymentKey));
    }

    #[test]
    fn test_overrides() {
        let vars = hashmap! {
            "RAZORPAY_KEY_ID" => "rzp_test_123",
            "FOODSHARE_MERCHANT_NAME" => "Leftovers",
            "FOODSHARE_THEME_COLOR" => "  ",
        };
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.payment_key(), Ok("rzp_test_123"));
        assert_eq!(config.merchant_name, "Leftovers");
        /* blank values fall back to the default */
        assert_eq!(config.theme_color, "#FACC15");
    }
}
