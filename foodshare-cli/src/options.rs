use crate::{
    common::Run,
    modules::{
        browse::{Browse, Locations},
        checkout::Checkout,
        geocode::Geocode,
        reviews::Reviews,
    },
    run_impl,
};
use clap::AppSettings;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "foodshare-cli", global_settings = &[AppSettings::ColoredHelp])]
pub enum Command {
    /// Search, filter and sort listings with their rating summaries
    Browse(Browse),
    /// List the distinct pickup locations
    Locations(Locations),
    /// Show a listing's reviews, newest first
    Reviews(Reviews),
    /// Build payment options or place an order
    Checkout(Checkout),
    /// Look up the address at a coordinate
    Geocode(Geocode),
}

run_impl!(Command, self, config, ser, {
    match self {
        Self::Browse(b) => b.run(config, ser).await?,
        Self::Locations(l) => l.run(config, ser).await?,
        Self::Reviews(r) => r.run(config, ser).await?,
        Self::Checkout(c) => c.run(config, ser).await?,
        Self::Geocode(g) => g.run(config, ser).await?,
    }
});
