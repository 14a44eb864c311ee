static API_BASE: &str = "https://slack.com/api/";

use super::SlackError;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use serde::ser::Serialize;
use serde_json::Value;

pub struct SlackHttpClient {
    client: Client,
}

impl SlackHttpClient {
    pub fn new(auth_token: &str) -> Result<SlackHttpClient, SlackError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&("Bearer ".to_string() + auth_token))
            .map_err(|_| SlackError::InvalidToken)?;
        headers.insert(header::AUTHORIZATION, bearer);

        let client = ClientBuilder::new().default_headers(headers).build()?;
        Ok(SlackHttpClient { client })
    }

    pub async fn api_call<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Value, SlackError> {
        let res = self
            .client
            .post(&(API_BASE.to_string() + endpoint))
            .form(params)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(SlackError::Status(res.status()));
        }
        let json: Value = res.json().await?;
        check_response(json)
    }
}

/// Slack answers 200 even on failure; the verdict lives in `ok` / `error`.
pub(super) fn check_response(json: Value) -> Result<Value, SlackError> {
    let obj = match json.as_object() {
        Some(obj) => obj,
        _ => return Err(SlackError::Decode("JSON response is not an object".to_owned())),
    };
    if let Some(err) = obj.get("error") {
        let code = err.as_str().map(str::to_owned).unwrap_or_else(|| err.to_string());
        return Err(SlackError::Api(code));
    }
    if obj.get("ok").and_then(Value::as_bool) == Some(false) {
        return Err(SlackError::Api("unknown_error".to_owned()));
    }
    Ok(json)
}
