use foodshare_core::{common::Client, modules::geocode::GeocodedAddress};
use structopt::StructOpt;

use crate::run_impl;

#[derive(StructOpt)]
pub struct Geocode {
    #[structopt(long, allow_hyphen_values = true)]
    lat: f64,
    #[structopt(long, allow_hyphen_values = true)]
    lng: f64,
}

run_impl!(Geocode, self, config, ser, {
    let client = Client::new()?;
    erased_serde::serialize(
        &GeocodedAddress::reverse(&client, &config.geocode_url, self.lat, self.lng).await?,
        ser,
    )?;
});
