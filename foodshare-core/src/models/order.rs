use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    common::{is_blank, random_id},
    error::{Result, ValidationError},
    models::{listing::Listing, session::ANONYMOUS},
    modules::geocode::GeocodedAddress,
};

/// Delivery details typed (or map-picked) by the buyer at checkout.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuyerDetails {
    pub name: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub pincode: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl BuyerDetails {
    /// Fill the address from a map pick.
    ///
    /// The street only replaces the first address line when the geocoder found one;
    /// everything else is overwritten.
    pub fn apply_geocode(&mut self, latitude: f64, longitude: f64, address: GeocodedAddress) {
        if !is_blank(&address.street) {
            self.address_line1 = address.street;
        }
        self.city = address.city;
        self.state = address.state;
        self.pincode = address.pincode;
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
    }

    pub fn validate(&self) -> Result<()> {
        let required: [(&'static str, &str); 4] = [
            ("name", self.name.as_str()),
            ("addressLine1", self.address_line1.as_str()),
            ("city", self.city.as_str()),
            ("pincode", self.pincode.as_str()),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| is_blank(value)) {
            return Err(ValidationError::MissingField(*field));
        }

        lazy_static! {
            static ref RE_PINCODE: Regex = Regex::new(r"^[1-9][0-9]{5}$").unwrap();
        }
        if !RE_PINCODE.is_match(self.pincode.trim()) {
            return Err(ValidationError::InvalidPincode(self.pincode.clone()));
        }
        Ok(())
    }
}

/// A confirmed purchase, written before the buyer is sent to the payment gateway.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub food_id: String,
    pub food_title: String,
    pub seller_name: String,
    pub buyer_name: String,
    pub buyer_address: BuyerDetails,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn place(
        listing: &Listing,
        seller_name: Option<&str>,
        buyer: BuyerDetails,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        buyer.validate()?;
        Ok(Self {
            id: random_id("order"),
            food_id: listing.id.clone(),
            food_title: listing.title.clone(),
            seller_name: seller_name
                .filter(|name| !is_blank(name))
                .unwrap_or(ANONYMOUS)
                .to_string(),
            buyer_name: buyer.name.trim().to_string(),
            buyer_address: buyer,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{BuyerDetails, Order};
    use crate::{error::ValidationError, models::listing::Listing, modules::geocode::GeocodedAddress};

    fn buyer() -> BuyerDetails {
        BuyerDetails {
            name: "Meera".into(),
            address_line1: "12 MG Road".into(),
            city: "Bengaluru".into(),
            pincode: "560001".into(),
            ..Default::default()
        }
    }

    fn listing() -> Listing {
        Listing {
            id: "food_1".into(),
            title: "Veg Pulao".into(),
            description: String::new(),
            price: Some(80.0),
            location: "Jayanagar".into(),
            pickup_time: "1 PM".into(),
            image_url: String::new(),
            quantity: None,
            user_id: None,
            created_at: None,
        }
    }

    #[test]
    fn test_validate() {
        assert_eq!(buyer().validate(), Ok(()));

        let mut missing = buyer();
        missing.city = " ".into();
        assert_eq!(missing.validate(), Err(ValidationError::MissingField("city")));

        for bad in &["56000", "0560001", "56OO01", "5600011"] {
            let mut details = buyer();
            details.pincode = bad.to_string();
            assert_eq!(
                details.validate(),
                Err(ValidationError::InvalidPincode(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_apply_geocode() {
        let mut details = buyer();
        details.apply_geocode(
            12.97,
            77.59,
            GeocodedAddress {
                city: "Bangalore".into(),
                state: "Karnataka".into(),
                pincode: "560025".into(),
                street: String::new(),
            },
        );
        assert_eq!(details.address_line1, "12 MG Road");
        assert_eq!(details.city, "Bangalore");
        assert_eq!(details.state, "Karnataka");
        assert_eq!(details.pincode, "560025");
        assert_eq!(details.latitude, Some(12.97));
        assert_eq!(details.longitude, Some(77.59));

        details.apply_geocode(
            12.9,
            77.6,
            GeocodedAddress {
                street: "Residency Road".into(),
                ..Default::default()
            },
        );
        assert_eq!(details.address_line1, "Residency Road");
        assert_eq!(details.city, "");
    }

    #[test]
    fn test_place() {
        let now = Utc::now();
        let order = Order::place(&listing(), None, buyer(), now).unwrap();
        assert!(order.id.starts_with("order_"));
        assert_eq!(order.food_id, "food_1");
        assert_eq!(order.food_title, "Veg Pulao");
        assert_eq!(order.seller_name, "Anonymous");
        assert_eq!(order.buyer_name, "Meera");

        let order = Order::place(&listing(), Some("Lakshmi"), buyer(), now).unwrap();
        assert_eq!(order.seller_name, "Lakshmi");

        let mut incomplete = buyer();
        incomplete.name.clear();
        assert_eq!(
            Order::place(&listing(), None, incomplete, now),
            Err(ValidationError::MissingField("name"))
        );
    }
}
