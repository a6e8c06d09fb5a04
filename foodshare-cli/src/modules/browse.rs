use foodshare_core::pipeline::{self, Query, SortOrder};
use structopt::StructOpt;

use crate::{common::SnapshotArg, run_impl};

#[derive(StructOpt)]
pub struct Browse {
    #[structopt(flatten)]
    snapshot: SnapshotArg,
    /// Only listings whose title or description contains this (any case)
    #[structopt(long, default_value = "")]
    search: String,
    /// Only listings at exactly this location
    #[structopt(long, default_value = "")]
    location: String,
    /// Price order: `asc` or `desc`
    #[structopt(long, default_value = "asc")]
    sort: SortOrder,
}

run_impl!(Browse, self, _config, ser, {
    let snapshot = self.snapshot.load().await?;
    let query = Query {
        search_term: self.search.clone(),
        location_filter: self.location.clone(),
        sort_order: self.sort,
    };
    erased_serde::serialize(&snapshot.view(&query), ser)?;
});

#[derive(StructOpt)]
pub struct Locations {
    #[structopt(flatten)]
    snapshot: SnapshotArg,
}

run_impl!(Locations, self, _config, ser, {
    let snapshot = self.snapshot.load().await?;
    erased_serde::serialize(&pipeline::locations(&snapshot.listings), ser)?;
});
