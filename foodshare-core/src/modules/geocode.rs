use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::common::Client;

/// The raw reverse-geocode response. Only the fields we read are listed.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawReverseGeocode {
    city: String,
    locality: String,
    principal_subdivision: String,
    postcode: String,
    street: String,
}

/// The parts of an address a map pick can fill in.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GeocodedAddress {
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub street: String,
}

impl From<RawReverseGeocode> for GeocodedAddress {
    fn from(raw: RawReverseGeocode) -> Self {
        Self {
            city: if raw.city.is_empty() {
                raw.locality
            } else {
                raw.city
            },
            state: raw.principal_subdivision,
            pincode: raw.postcode,
            street: raw.street,
        }
    }
}

impl GeocodedAddress {
    /// Look up the address at a coordinate.
    ///
    /// # Errors
    /// Errors if the request fails, the service answers with an error status,
    /// or the body is not JSON.
    pub async fn reverse(
        client: &Client,
        base_url: &str,
        latitude: f64,
        longitude: f64,
    ) -> anyhow::Result<Self> {
        tracing::debug!(latitude, longitude, "reverse geocoding");
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();
        let raw: RawReverseGeocode = client
            .0
            .get(base_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("localityLanguage", "en"),
            ])
            .send()
            .await
            .context("reverse geocode request failed")?
            .error_for_status()?
            .json()
            .await
            .context("could not parse reverse geocode response")?;
        Ok(raw.into())
    }
}
