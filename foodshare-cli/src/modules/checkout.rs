use structopt::StructOpt;

use crate::{common::Run, run_impl, run_impl_struct};

#[derive(StructOpt)]
pub struct Checkout {
    #[structopt(subcommand)]
    action: Action,
}

run_impl_struct!(Checkout, action);

#[derive(StructOpt)]
enum Action {
    Options(options::SubCommand),
    Order(order::SubCommand),
}

run_impl!(Action, self, config, ser, {
    match self {
        Self::Options(o) => o.run(config, ser).await?,
        Self::Order(o) => o.run(config, ser).await?,
    }
});

mod options {
    use foodshare_core::modules::razorpay::{CheckoutOptions, Prefill};
    use structopt::StructOpt;

    use crate::{
        common::{find_listing, SnapshotArg},
        run_impl,
    };

    /// Print the payment gateway options for buying a listing
    #[derive(StructOpt)]
    pub(super) struct SubCommand {
        #[structopt(flatten)]
        snapshot: SnapshotArg,
        #[structopt(long)]
        listing: String,
        #[structopt(long)]
        buyer_name: Option<String>,
        #[structopt(long)]
        email: Option<String>,
        #[structopt(long)]
        contact: Option<String>,
    }

    run_impl!(SubCommand, self, config, ser, {
        let snapshot = self.snapshot.load().await?;
        let listing = find_listing(&snapshot, &self.listing)?;

        let defaults = Prefill::default();
        let prefill = Prefill {
            name: self.buyer_name.clone().unwrap_or(defaults.name),
            email: self.email.clone().unwrap_or(defaults.email),
            contact: self.contact.clone().unwrap_or(defaults.contact),
        };
        erased_serde::serialize(&CheckoutOptions::for_listing(config, listing, prefill)?, ser)?;
    });
}

mod order {
    use foodshare_core::{
        chrono::Utc,
        common::Client,
        models::{BuyerDetails, Order},
        modules::geocode::GeocodedAddress,
    };
    use structopt::StructOpt;

    use crate::{
        common::{find_listing, SnapshotArg},
        run_impl,
    };

    /// Validate the buyer's details and print the order to be placed
    #[derive(StructOpt)]
    pub(super) struct SubCommand {
        #[structopt(flatten)]
        snapshot: SnapshotArg,
        #[structopt(long)]
        listing: String,
        /// Seller's display name, if known
        #[structopt(long)]
        seller: Option<String>,
        #[structopt(long, default_value = "")]
        name: String,
        #[structopt(long, default_value = "")]
        address_line1: String,
        #[structopt(long, default_value = "")]
        address_line2: String,
        #[structopt(long, default_value = "")]
        city: String,
        #[structopt(long, default_value = "")]
        state: String,
        #[structopt(long, default_value = "")]
        pincode: String,
        /// Fill the address from this point on the map (needs --lng too)
        #[structopt(long, allow_hyphen_values = true, requires = "lng")]
        lat: Option<f64>,
        #[structopt(long, allow_hyphen_values = true, requires = "lat")]
        lng: Option<f64>,
    }

    run_impl!(SubCommand, self, config, ser, {
        let snapshot = self.snapshot.load().await?;
        let listing = find_listing(&snapshot, &self.listing)?;

        let mut buyer = BuyerDetails {
            name: self.name.clone(),
            address_line1: self.address_line1.clone(),
            address_line2: self.address_line2.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            pincode: self.pincode.clone(),
            latitude: None,
            longitude: None,
        };
        if let (Some(lat), Some(lng)) = (self.lat, self.lng) {
            let client = Client::new()?;
            let address = GeocodedAddress::reverse(&client, &config.geocode_url, lat, lng).await?;
            buyer.apply_geocode(lat, lng, address);
        }

        let order = Order::place(listing, self.seller.as_deref(), buyer, Utc::now())?;
        tracing::info!(order = %order.id, food = %order.food_id, "order ready");
        erased_serde::serialize(&order, ser)?;
    });
}
