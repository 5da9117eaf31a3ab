use crate::config::{Config, ConfigError};
use crate::localization::localize;
use crate::notification::{self, NotificationPayload};
use crate::sources::common::Coordinates;
use crate::sources::caiyun;
use crate::sources::wechat::{self, SendReceipt, TemplateMessage};
use crate::utils::formatting::one_decimal;
use crate::weather::WeatherRecord;
use crate::Error;
use chrono::DateTime;
use chrono_tz::Tz;
use log::*;

/// Zhifu District, Yantai
pub const REGION: Coordinates = Coordinates::new(37.5255, 121.3914);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));


/// Loads the configuration with `load` and runs one push. Nothing is requested
/// from the network unless the configuration is complete.
pub async fn execute<F>(load: F, now: DateTime<Tz>) -> Result<SendReceipt, Error>
where
    F: FnOnce() -> Result<Config, ConfigError>,
{
    info!("Validating environment variables...");
    let config = load()?;
    config.credentials.log_summary();
    info!("Display language: {}", config.language);

    run(&config, now).await
}

pub async fn run(config: &Config, now: DateTime<Tz>) -> Result<SendReceipt, Error> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout)
        .connection_verbose(config.verbose)
        .build()?;
    let credentials = &config.credentials;
    let lang = config.language;

    info!("Fetching weather from Caiyun...");
    let report = caiyun::get_realtime_weather(&client, &config.endpoints.weather,
                                              credentials.weather_api_token.expose(), &REGION, lang)
        .await
        .map_err(Error::WeatherFetch)?;
    let record = WeatherRecord::from_report(lang, &report);
    info!("Weather fetched: {} {:.1}℃ ~ {:.1}℃", record.condition, record.temperature_low, record.temperature_high);
    log_details(config, &record);

    let payload = notification::compose(lang, &record, &now);

    info!("Requesting WeChat access token...");
    let token = wechat::get_access_token(&client, &config.endpoints.messaging,
                                         &credentials.app_id, &credentials.app_secret)
        .await
        .map_err(Error::TokenExchange)?;
    info!("Access token received");
    if let Some(seconds) = token.expires_in {
        debug!("Access token expires in {}s", seconds);
    }

    info!("Sending template message...");
    let receipt = send(&client, config, &token, &payload).await?;
    info!("Message delivered, message id: {}",
          receipt.msgid.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()));

    Ok(receipt)
}

async fn send(client: &reqwest::Client, config: &Config, token: &wechat::AccessToken, payload: &NotificationPayload)
    -> Result<SendReceipt, Error>
{
    let message = TemplateMessage {
        touser: config.credentials.recipient_id.expose(),
        template_id: config.credentials.template_id.expose(),
        data: payload,
    };

    wechat::send_template_message(client, &config.endpoints.messaging, token, &message)
        .await
        .map_err(Error::Send)
}

fn log_details(config: &Config, record: &WeatherRecord) {
    let lang = config.language;
    info!("Weather details:");
    info!("  condition:   {}", record.condition);
    info!("  now:         {}", localize!(lang, "temp-now", temp: one_decimal(record.temperature_now)));
    info!("  wind:        {}", record.wind_summary(lang));
    info!("  humidity:    {}%", one_decimal(record.humidity));
    info!("  alert:       {}", record.alert_text);
}
