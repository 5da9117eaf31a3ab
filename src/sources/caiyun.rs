use super::common::{self, ApiError, Coordinates};
use crate::localization::Language;
use serde::Deserialize;

const UNIT: &str = "metric:v2";
const COMPASS_POINTS: [&str; 8] = ["north", "northeast", "east", "southeast", "south", "southwest", "west", "northwest"];


/// Current conditions plus today's temperature range, as reported by Caiyun.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub skycon: String,
    pub temperature: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub wind_speed: f64,
    /// Compass point the wind blows from, e.g. `northeast`
    pub wind_direction: String,
    /// Relative humidity as a fraction between 0 and 1
    pub humidity: f64,
    pub alert: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Status {
    status: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize, Debug)]
struct WeatherResponse {
    result: WeatherResult,
}

#[derive(Deserialize, Debug)]
struct WeatherResult {
    realtime: Realtime,
    daily: Daily,
    #[serde(default)]
    alert: Option<Alert>,
}

#[derive(Deserialize, Debug)]
struct Realtime {
    skycon: String,
    temperature: f64,
    humidity: f64,
    wind: Wind,
}

#[derive(Deserialize, Debug)]
struct Wind {
    speed: f64,
    direction: WindDirection,
}

/// Caiyun reports the direction in degrees, some proxies and fixtures use compass names instead.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum WindDirection {
    Degrees(f64),
    Compass(String),
}
impl WindDirection {
    fn compass_point(self) -> String {
        match self {
            WindDirection::Compass(name) => name,
            WindDirection::Degrees(degrees) => {
                let normalized = degrees.rem_euclid(360.0);
                let sector = ((normalized + 22.5) / 45.0).floor() as usize % COMPASS_POINTS.len();
                COMPASS_POINTS[sector].to_string()
            }
        }
    }
}

#[derive(Deserialize, Debug)]
struct Daily {
    temperature: Vec<TemperatureRange>,
}

#[derive(Deserialize, Debug)]
struct TemperatureRange {
    min: f64,
    max: f64,
}

#[derive(Deserialize, Debug)]
struct Alert {
    #[serde(default)]
    content: Vec<AlertContent>,
}

#[derive(Deserialize, Debug)]
struct AlertContent {
    title: String,
}

impl TryFrom<WeatherResponse> for WeatherReport {
    type Error = ApiError;

    fn try_from(response: WeatherResponse) -> Result<Self, Self::Error> {
        let WeatherResult { realtime, daily, alert } = response.result;
        let today = daily.temperature.into_iter()
            .next()
            .ok_or(ApiError::MissingField("result.daily.temperature[0]"))?;

        Ok(WeatherReport {
            skycon: realtime.skycon,
            temperature: realtime.temperature,
            temperature_min: today.min,
            temperature_max: today.max,
            wind_speed: realtime.wind.speed,
            wind_direction: realtime.wind.direction.compass_point(),
            humidity: realtime.humidity,
            alert: alert.and_then(|a| a.content.into_iter().next()).map(|c| c.title),
        })
    }
}


pub async fn get_realtime_weather(client: &reqwest::Client, base_url: &str, token: &str,
                                  point: &Coordinates, language: Language)
    -> Result<WeatherReport, ApiError>
{
    let mut url = reqwest::Url::parse(base_url)?;
    // the token is a path segment, so reserved characters in it are escaped
    url.path_segments_mut()
        .map_err(|_| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .push(token)
        .push(&format!("{},{}", point.longitude, point.latitude))
        .push("weather.json");
    url.query_pairs_mut()
        .append_pair("lang", language.provider_code())
        .append_pair("unit", UNIT)
        .append_pair("alert", "true");

    let payload = common::fetch_text(client.get(url)).await?;
    parse_weather(&payload)
}

fn parse_weather(payload: &str) -> Result<WeatherReport, ApiError> {
    let status = serde_json::from_str::<Status>(payload)
        .map_err(|_| ApiError::UnexpectedResponse { body: payload.to_string() })?;

    if status.status != "ok" {
        let reason = match status.error {
            Some(error) => format!("status '{}': {}", status.status, error),
            None => format!("status '{}'", status.status),
        };
        return Err(ApiError::BadRequest { reason });
    }

    serde_json::from_str::<WeatherResponse>(payload)?.try_into()
}
