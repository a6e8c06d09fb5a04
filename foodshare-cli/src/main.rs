pub(crate) mod common;
mod modules;
mod options;

use std::io::{stderr, stdout};

use erased_serde::Serializer;
use foodshare_core::config::Config;
use structopt::StructOpt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::common::Run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    /* logs go to stderr so stdout stays valid JSON */
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(stderr)
                .with_target(false),
        )
        .init();

    let opt = options::Command::from_args();
    let config = Config::from_env()?;

    opt.run(
        &config,
        &mut <dyn Serializer>::erase(&mut serde_json::Serializer::pretty(stdout())),
    )
    .await?;

    println!();
    Ok(())
}
