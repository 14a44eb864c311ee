//! In-memory `SlackApi` for tests.

use super::user::UserProfile;
use super::{Channel, ChannelPage, SlackApi, SlackError, UserInfo};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeSlack {
    // each entry answers one conversations.list call, in order
    pub pages: Vec<Result<ChannelPage, String>>,
    pub members: HashMap<String, Vec<String>>,
    pub emails: HashMap<String, String>,
    pub connected: HashMap<String, Vec<String>>,
    pub failing_channels: HashSet<String>,
    pub failing_users: HashSet<String>,
    pub list_cursors: Mutex<Vec<Option<String>>>,
    pub member_lookups: AtomicUsize,
}

impl FakeSlack {
    pub fn channel(id: &str, name: &str) -> Channel {
        Channel {
            id: Some(id.to_owned()),
            name: Some(name.to_owned()),
            ..Default::default()
        }
    }

    pub fn page(channels: Vec<Channel>, next_cursor: Option<&str>) -> Result<ChannelPage, String> {
        Ok(ChannelPage {
            channels,
            next_cursor: next_cursor.map(str::to_owned),
        })
    }

    pub fn with_members(mut self, channel: &str, users: &[(&str, Option<&str>)]) -> Self {
        let ids = users.iter().map(|(id, _)| id.to_string()).collect();
        self.members.insert(channel.to_owned(), ids);
        for (id, email) in users {
            if let Some(email) = email {
                self.emails.insert(id.to_string(), email.to_string());
            }
        }
        self
    }
}

#[async_trait]
impl SlackApi for FakeSlack {
    async fn conversations_list(
        &self,
        _types: &str,
        _limit: u32,
        cursor: Option<&str>,
    ) -> Result<ChannelPage, SlackError> {
        let mut cursors = self.list_cursors.lock().unwrap();
        let call = cursors.len();
        cursors.push(cursor.map(str::to_owned));
        match self.pages.get(call) {
            Some(Ok(page)) => Ok(ChannelPage {
                channels: page.channels.clone(),
                next_cursor: page.next_cursor.clone(),
            }),
            Some(Err(code)) => Err(SlackError::Api(code.clone())),
            None => Err(SlackError::Api("invalid_cursor".to_owned())),
        }
    }

    async fn conversations_members(&self, channel: &str) -> Result<Vec<String>, SlackError> {
        self.member_lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing_channels.contains(channel) {
            return Err(SlackError::Api("channel_not_found".to_owned()));
        }
        Ok(self.members.get(channel).cloned().unwrap_or_default())
    }

    async fn users_info(&self, user: &str) -> Result<UserInfo, SlackError> {
        if self.failing_users.contains(user) {
            return Err(SlackError::Api("user_not_found".to_owned()));
        }
        Ok(UserInfo {
            id: user.to_owned(),
            name: user.to_lowercase(),
            profile: UserProfile {
                email: self.emails.get(user).cloned(),
            },
        })
    }

    async fn conversations_info(&self, channel: &str) -> Result<Channel, SlackError> {
        if self.failing_channels.contains(channel) {
            return Err(SlackError::Api("channel_not_found".to_owned()));
        }
        Ok(Channel {
            id: Some(channel.to_owned()),
            connected_team_ids: self.connected.get(channel).cloned().unwrap_or_default(),
            ..Default::default()
        })
    }
}
