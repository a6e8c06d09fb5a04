use async_trait::async_trait;
use erased_serde::Serializer;
use foodshare_core::{config::Config, feed::Snapshot, models::Listing};
use std::path::PathBuf;
use structopt::StructOpt;

#[async_trait]
pub trait Run {
    async fn run(
        &self,
        config: &Config,
        serializer: &mut (dyn Serializer + Send),
    ) -> anyhow::Result<()>;
}

/// Implement [`Run`] with a block, binding `self`, the config and the serializer to the given names.
#[macro_export]
macro_rules! run_impl {
    ($i:ident, $self:ident, $cfg:ident, $ser:ident, $b:block) => {
        #[async_trait::async_trait]
        impl $crate::common::Run for $i {
            async fn run(
                &$self,
                $cfg: &foodshare_core::config::Config,
                $ser: &mut (dyn erased_serde::Serializer + Send),
            ) -> anyhow::Result<()> {
                $b;

                Ok(())
            }
        }
    };
}

/// Implement [`Run`] by delegating to a field that is itself [`Run`].
#[macro_export]
macro_rules! run_impl_struct {
    ($i:ident, $b:ident) => {
        #[async_trait::async_trait]
        impl $crate::common::Run for $i {
            async fn run(
                &self,
                config: &foodshare_core::config::Config,
                serializer: &mut (dyn erased_serde::Serializer + Send),
            ) -> anyhow::Result<()> {
                self.$b.run(config, serializer).await
            }
        }
    };
}

#[derive(StructOpt)]
pub struct SnapshotArg {
    /// JSON file with `listings` and `ratings` (keyed by listing id)
    #[structopt(long, parse(from_os_str))]
    pub snapshot: PathBuf,
}

impl SnapshotArg {
    pub async fn load(&self) -> anyhow::Result<Snapshot> {
        Snapshot::read(&self.snapshot).await
    }
}

pub fn find_listing<'a>(snapshot: &'a Snapshot, id: &str) -> anyhow::Result<&'a Listing> {
    snapshot
        .listing(id)
        .ok_or_else(|| anyhow::anyhow!("no listing with id `{}`", id))
}
