use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Communication(reqwest::Error),

    #[error("Failed to construct URL and parameters: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to parse API response: {0}")]
    Parsing(#[from] serde_json::Error),

    #[error("Bad request: {reason}")]
    BadRequest {
        reason: String
    },

    #[error("API response lacks field `{0}`")]
    MissingField(&'static str),

    #[error("Unexpected API response: {body}")]
    UnexpectedResponse {
        body: String
    },

    #[error("Request rejected with code {code}: {body}")]
    Rejected {
        code: i64,
        body: String,
    },
}
impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        // request URLs carry API tokens in their path or query
        ApiError::Communication(error.without_url())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64
}
impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates {latitude, longitude}
    }
}


/// Sends the request and returns the raw response body. HTTP status codes are not interpreted,
/// the providers report failures inside the body.
pub async fn fetch_text(request: reqwest::RequestBuilder) -> Result<String, ApiError> {
    let response = request.send().await?;
    let payload = response.text().await?;

    Ok(payload)
}

pub async fn query_api<O, S, F>(client: &reqwest::Client, url: &str, params: impl IntoIterator<Item = (&str, String)>)
                                -> Result<O, ApiError>
where
    S: for<'de> Deserialize<'de> + Into<O>,
    F: for<'de> Deserialize<'de> + Into<ApiError>,
{
    let url = reqwest::Url::parse_with_params(url, params)?;
    let payload = fetch_text(client.get(url)).await?;

    parse_response::<O, S, F>(payload)
}

pub fn parse_response<O, S, F>(payload: String) -> Result<O, ApiError>
where
    S: for<'de> Deserialize<'de> + Into<O>,
    F: for<'de> Deserialize<'de> + Into<ApiError>,
{
    // try to parse the response body as the given success type S
    match serde_json::from_str::<S>(&payload) {
        Ok(result) => Ok(result.into()),
        Err(_) => {
            // If it fails, attempt to parse the body as the given failure type F
            match serde_json::from_str::<F>(&payload) {
                Ok(api_error) => Err(api_error.into()),
                Err(_) => Err(ApiError::UnexpectedResponse { body: payload }), // keep the body for diagnosis
            }
        }
    }
}
