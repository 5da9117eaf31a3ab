mod config;
mod localization;
mod notification;
mod pipeline;
mod sources;
mod utils;
mod weather;

use env_logger::Env;
use log::*;
use std::process::ExitCode;
use thiserror::Error;


// custom error type used throughout the project
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration incomplete: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Failed to fetch weather: {0}")]
    WeatherFetch(sources::common::ApiError),

    #[error("Failed to obtain access token: {0}")]
    TokenExchange(sources::common::ApiError),

    #[error("Failed to send notification: {0}")]
    Send(sources::common::ApiError),
}


#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Weather push for Zhifu District, Yantai");
    let now = sources::geo_time::now_at(&pipeline::REGION);

    match pipeline::execute(config::Config::from_env, now).await {
        Ok(_) => {
            info!("Done, the notification has been delivered");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            if let Error::Config(_) = e {
                error!("Provide the missing values as environment variables, e.g. as repository secrets of the scheduled job");
            }
            ExitCode::FAILURE
        }
    }
}
