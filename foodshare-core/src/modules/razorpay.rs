use maplit::btreemap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{
    common::{Currency, Money},
    config::Config,
    error::{Result, ValidationError},
    models::Listing,
};

const LOGO: &str = "/logo.png";
const HQ_ADDRESS: &str = "FoodShare HQ";

/// Who is paying, pre-filled into the payment form.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Prefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

impl Default for Prefill {
    fn default() -> Self {
        Self {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            contact: "9999999999".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub color: String,
}

/// The options object handed to the Razorpay checkout widget.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOptions {
    pub key: String,
    /// In paise.
    pub amount: u64,
    pub currency: Currency,
    pub name: String,
    pub description: String,
    pub image: String,
    pub prefill: Prefill,
    pub notes: BTreeMap<String, String>,
    pub theme: Theme,
}

impl CheckoutOptions {
    /// Build the payment options for buying `listing`.
    ///
    /// # Errors
    /// [`ValidationError::MissingPaymentKey`] when no key id is configured and
    /// [`ValidationError::Unpriced`] when the listing's price could not be read.
    pub fn for_listing(config: &Config, listing: &Listing, prefill: Prefill) -> Result<Self> {
        let key = config.payment_key()?.to_string();
        let price = listing
            .price
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| ValidationError::Unpriced(listing.id.clone()))?;
        let money = Money::new(Currency::INR, price);

        Ok(Self {
            key,
            amount: money.in_minor_units(),
            currency: money.currency(),
            name: config.merchant_name.clone(),
            description: format!("Buying {}", listing.title),
            image: LOGO.to_string(),
            prefill,
            notes: btreemap! {
                "address".to_string() => HQ_ADDRESS.to_string(),
            },
            theme: Theme {
                color: config.theme_color.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{CheckoutOptions, Prefill};
    use crate::{config::Config, error::ValidationError, models::Listing};

    fn config() -> Config {
        Config {
            razorpay_key_id: Some("rzp_test_abc".into()),
            ..Default::default()
        }
    }

    fn listing(price: Option<f64>) -> Listing {
        Listing {
            id: "food_9".into(),
            title: "Gulab Jamun".into(),
            description: String::new(),
            price,
            location: String::new(),
            pickup_time: String::new(),
            image_url: String::new(),
            quantity: None,
            user_id: None,
            created_at: None,
        }
    }

    #[test]
    fn test_options() {
        let options =
            CheckoutOptions::for_listing(&config(), &listing(Some(49.5)), Prefill::default())
                .unwrap();
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({
                "key": "rzp_test_abc",
                "amount": 4950,
                "currency": "INR",
                "name": "FoodShare",
                "description": "Buying Gulab Jamun",
                "image": "/logo.png",
                "prefill": {
                    "name": "Test User",
                    "email": "test@example.com",
                    "contact": "9999999999"
                },
                "notes": { "address": "FoodShare HQ" },
                "theme": { "color": "#FACC15" }
            })
        );
    }

    #[test]
    fn test_amount_rounding() {
        let options =
            CheckoutOptions::for_listing(&config(), &listing(Some(19.99)), Prefill::default())
                .unwrap();
        assert_eq!(options.amount, 1999);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            CheckoutOptions::for_listing(&config(), &listing(None), Prefill::default()),
            Err(ValidationError::Unpriced("food_9".into()))
        );
        assert_eq!(
            CheckoutOptions::for_listing(&Config::default(), &listing(Some(10.0)), Prefill::default()),
            Err(ValidationError::MissingPaymentKey)
        );
    }
}
