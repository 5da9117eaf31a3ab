use super::common::{self, ApiError};
use crate::config::Secret;
use crate::notification::NotificationPayload;
use serde::{Deserialize, Serialize};

const GRANT_TYPE: &str = "client_credential";

#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: Secret,
    /// Lifetime in seconds as announced by the provider
    pub expires_in: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}
impl From<TokenResponse> for AccessToken {
    fn from(response: TokenResponse) -> Self {
        AccessToken {
            token: Secret::new(response.access_token),
            expires_in: response.expires_in,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct WechatError {
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
}
impl From<WechatError> for ApiError {
    fn from(error: WechatError) -> Self {
        ApiError::BadRequest { reason: format!("errcode {}, errmsg '{}'", error.errcode, error.errmsg) }
    }
}

/// Body of a template message: one recipient, one template and the values of its fields.
#[derive(Serialize, Debug)]
pub struct TemplateMessage<'a> {
    pub touser: &'a str,
    pub template_id: &'a str,
    pub data: &'a NotificationPayload,
}

#[derive(Deserialize, Debug)]
struct SendResponse {
    errcode: i64,
    #[serde(default)]
    msgid: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendReceipt {
    pub msgid: Option<i64>,
}


pub async fn get_access_token(client: &reqwest::Client, base_url: &str, app_id: &Secret, app_secret: &Secret)
    -> Result<AccessToken, ApiError>
{
    let params = [
        ("grant_type", GRANT_TYPE.to_string()),
        ("appid", app_id.expose().to_string()),
        ("secret", app_secret.expose().to_string()),
    ];

    let token = common::query_api::<AccessToken, TokenResponse, WechatError>
        (client, &format!("{}/token", base_url), params).await?;

    // a blank token counts as missing
    if token.token.expose().trim().is_empty() {
        return Err(ApiError::MissingField("access_token"));
    }

    Ok(token)
}

/// Delivers the message. The provider answers with HTTP 200 in any case and reports the
/// outcome as `errcode` in the body, where `0` means the message was accepted.
pub async fn send_template_message(client: &reqwest::Client, base_url: &str, token: &AccessToken,
                                   message: &TemplateMessage<'_>)
    -> Result<SendReceipt, ApiError>
{
    let params = [("access_token", token.token.expose())];
    let url = reqwest::Url::parse_with_params(&format!("{}/message/template/send", base_url), params)?;

    let payload = common::fetch_text(client.post(url).json(message)).await?;
    let response = match serde_json::from_str::<SendResponse>(&payload) {
        Ok(response) => response,
        Err(_) => return Err(ApiError::UnexpectedResponse { body: payload }),
    };

    match response.errcode {
        0 => Ok(SendReceipt { msgid: response.msgid }),
        code => Err(ApiError::Rejected { code, body: payload }),
    }
}
