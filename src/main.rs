use anyhow::Result;

mod adapters;
mod cli;
mod config;
mod convert;
mod gateways;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    cli::run()
}
