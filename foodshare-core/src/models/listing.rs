use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError, PickFirst};
use std::str::FromStr;

use crate::{
    common::{is_blank, random_id, Money, Rupees},
    error::{Result, ValidationError},
    models::session::Session,
};

/// A shared food item.
///
/// Listings are replaced whole, never patched, so every field is plain data.
#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `None` when the stored price is missing or not a number.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<PickFirst<(_, Option<Rupees>)>>")]
    pub price: Option<f64>,
    #[serde(default)]
    pub location: String,
    #[serde(default, alias = "time")]
    pub pickup_time: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    /// The seller's user id, when the listing was shared by a signed-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The "share food" form, as typed by the user.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub quantity: String,
    pub price: String,
    pub location: String,
    pub time: String,
    pub image_url: String,
}

impl ListingDraft {
    /// Validate the form and turn it into a new [`Listing`].
    ///
    /// # Errors
    /// [`ValidationError::MissingField`] for the first blank field, in form order,
    /// or [`ValidationError::InvalidPrice`] if the price cannot be read.
    pub fn submit(self, session: &Session, now: DateTime<Utc>) -> Result<Listing> {
        let fields: [(&'static str, &str); 7] = [
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("quantity", self.quantity.as_str()),
            ("price", self.price.as_str()),
            ("location", self.location.as_str()),
            ("time", self.time.as_str()),
            ("imageUrl", self.image_url.as_str()),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| is_blank(value)) {
            return Err(ValidationError::MissingField(*name));
        }

        let price = Money::from_str(&self.price)
            .map_err(|_| ValidationError::InvalidPrice(self.price.clone()))?
            .amount();

        Ok(Listing {
            id: random_id("food"),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: Some(price),
            location: self.location.trim().to_string(),
            pickup_time: self.time.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            quantity: Some(self.quantity.trim().to_string()),
            user_id: session.uid().map(str::to_string),
            created_at: Some(now),
        })
    }
}
