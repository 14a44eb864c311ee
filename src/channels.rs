use crate::slack::{Channel, SlackApi};
use tracing::{debug, error};

/// Walks `conversations.list` until the cursor runs out.
///
/// A failed page stops the walk; whatever was gathered before it is returned.
pub async fn list_all_channels(slack: &dyn SlackApi, types: &str, page_size: u32) -> Vec<Channel> {
    debug!("Fetching all channels...");
    let mut result = Vec::new();
    let mut next_cursor: Option<String> = None;

    loop {
        let page = match slack
            .conversations_list(types, page_size, next_cursor.as_deref())
            .await
        {
            Ok(page) => page,
            Err(err) => {
                error!(code = err.code(), "Error fetching channels: {}", err);
                break;
            }
        };

        let fetched = page.channels.len();
        let mut next_channels = page.channels;
        result.append(&mut next_channels);
        debug!("Fetched {} channels. Total so far: {}", fetched, result.len());

        match page.next_cursor {
            Some(cursor) if !cursor.is_empty() => next_cursor = Some(cursor),
            _ => break,
        }
    }

    result
}

/// Team ids of external workspaces connected to the channel. Empty on error.
pub async fn resolve_integrations(slack: &dyn SlackApi, channel_id: &str) -> Vec<String> {
    debug!("Fetching integrations for channel ID: {}", channel_id);
    match slack.conversations_info(channel_id).await {
        Ok(info) => {
            debug!(
                "Fetched integrations for channel ID: {}: {:?}",
                channel_id, info.connected_team_ids
            );
            info.connected_team_ids
        }
        Err(err) => {
            error!(
                code = err.code(),
                "Error fetching integrations for channel {}: {}", channel_id, err
            );
            Vec::new()
        }
    }
}
