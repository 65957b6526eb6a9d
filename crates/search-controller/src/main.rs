use crate::prelude::*;
use clap::Parser;

mod clients;
mod config;
mod error;
mod health;
mod prelude;
mod routes;
mod server;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Validates search requests, queries the search API and renders the search page"
)]
pub struct App {
    #[clap(flatten)]
    pub config: config::Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    server::run(app.config).await
}
