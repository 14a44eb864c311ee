use super::http::SlackHttpClient;
use super::{Channel, ChannelPage, SlackError, UserInfo};
use async_trait::async_trait;
use serde_json::{self, Value};

/// The handful of Web API methods the report needs.
#[async_trait]
pub trait SlackApi: Send + Sync {
    /// One page of `conversations.list`. `cursor` is None for the first page.
    async fn conversations_list(
        &self,
        types: &str,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<ChannelPage, SlackError>;

    /// Member ids of a channel. Only the first page is returned.
    async fn conversations_members(&self, channel: &str) -> Result<Vec<String>, SlackError>;

    async fn users_info(&self, user: &str) -> Result<UserInfo, SlackError>;

    async fn conversations_info(&self, channel: &str) -> Result<Channel, SlackError>;
}

pub struct Slack {
    http_client: SlackHttpClient,
}

impl Slack {
    pub fn new(token: &str) -> Result<Slack, SlackError> {
        Ok(Slack {
            http_client: SlackHttpClient::new(token)?,
        })
    }
}

#[async_trait]
impl SlackApi for Slack {
    async fn conversations_list(
        &self,
        types: &str,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<ChannelPage, SlackError> {
        let params = [
            ("types", Value::from(types)),
            ("limit", Value::from(limit)),
            ("cursor", Value::from(cursor.unwrap_or(""))),
        ];
        let mut json = self.http_client.api_call("conversations.list", &params).await?;
        let channels = decode_list(json["channels"].take())?;
        Ok(ChannelPage {
            channels,
            next_cursor: next_cursor(&json),
        })
    }

    async fn conversations_members(&self, channel: &str) -> Result<Vec<String>, SlackError> {
        let params = [("channel", Value::from(channel))];
        let mut json = self.http_client.api_call("conversations.members", &params).await?;
        decode_list(json["members"].take())
    }

    async fn users_info(&self, user: &str) -> Result<UserInfo, SlackError> {
        let params = [("user", Value::from(user))];
        let mut json = self.http_client.api_call("users.info", &params).await?;
        Ok(serde_json::from_value(json["user"].take())?)
    }

    async fn conversations_info(&self, channel: &str) -> Result<Channel, SlackError> {
        let params = [("channel", Value::from(channel))];
        let mut json = self.http_client.api_call("conversations.info", &params).await?;
        Ok(serde_json::from_value(json["channel"].take())?)
    }
}

// A missing list field is an empty list, like Slack's own SDKs treat it
fn decode_list<T: serde::de::DeserializeOwned>(value: Value) -> Result<Vec<T>, SlackError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(value)?)
}

fn next_cursor(json: &Value) -> Option<String> {
    if let Some(meta) = json.get("response_metadata") {
        if let Some(Some(cursor)) = meta.get("next_cursor").map(|v| v.as_str()) {
            if !cursor.is_empty() {
                return Some(cursor.to_owned());
            }
        }
    }
    None
}
