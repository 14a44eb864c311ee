
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Channel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default)]
    pub connected_team_ids: Vec<String>,
}

/// One page of `conversations.list`.
#[derive(Debug)]
pub struct ChannelPage {
    pub channels: Vec<Channel>,
    // None once the listing is exhausted
    pub next_cursor: Option<String>,
}
