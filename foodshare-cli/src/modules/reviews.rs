use foodshare_core::models::rating::newest_first;
use structopt::StructOpt;

use crate::{
    common::{find_listing, SnapshotArg},
    run_impl,
};

#[derive(StructOpt)]
pub struct Reviews {
    #[structopt(flatten)]
    snapshot: SnapshotArg,
    #[structopt(long)]
    listing: String,
}

run_impl!(Reviews, self, _config, ser, {
    let snapshot = self.snapshot.load().await?;
    let listing = find_listing(&snapshot, &self.listing)?;
    let ratings = snapshot
        .ratings
        .get(&listing.id)
        .map(|ratings| newest_first(ratings))
        .unwrap_or_default();
    erased_serde::serialize(&ratings, ser)?;
});
