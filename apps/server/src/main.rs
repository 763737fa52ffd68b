use anyhow::Context;
use chub::domain::config::ApiConfig;
use chub::kernel::config::load_config;
use chub_logger::Logger;
use chub_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;

    // An explicit path must exist; without one `server.toml` is picked up if present.
    let cfg: ApiConfig =
        load_config(std::env::args().nth(1)).context("Critical: Configuration is malformed")?;

    Server::builder().config(cfg).build().await?.run().await
}
