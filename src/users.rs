use crate::slack::{SlackApi, SlackError, UserInfo};
use futures::stream::{self, StreamExt};
use tracing::{debug, error};

/// Emails of a channel's members, in member order.
///
/// Members without an email on file are skipped. On the first failed lookup
/// the emails gathered so far are returned.
pub async fn resolve_member_emails(slack: &dyn SlackApi, channel_id: &str, concurrency: usize) -> Vec<String> {
    debug!("Fetching users for channel ID: {}", channel_id);
    let mut user_emails = Vec::new();

    let user_ids = match slack.conversations_members(channel_id).await {
        Ok(user_ids) => user_ids,
        Err(err) => {
            log_lookup_error(channel_id, &err);
            return user_emails;
        }
    };

    // buffered() yields in input order, so the prefix before a failure is stable
    let mut lookups = stream::iter(user_ids.iter())
        .map(|user_id| slack.users_info(user_id))
        .buffered(concurrency.max(1));

    while let Some(lookup) = lookups.next().await {
        match lookup {
            Ok(user) => push_email(&mut user_emails, &user),
            Err(err) => {
                log_lookup_error(channel_id, &err);
                break;
            }
        }
    }

    debug!("Fetched {} emails for channel ID: {}", user_emails.len(), channel_id);
    user_emails
}

fn push_email(user_emails: &mut Vec<String>, user: &UserInfo) {
    match user.email() {
        Some(email) => user_emails.push(email.to_owned()),
        None => debug!("No email on file for {} ({})", user.id, user.name),
    }
}

fn log_lookup_error(channel_id: &str, err: &SlackError) {
    error!(
        code = err.code(),
        "Error fetching members for channel {}: {}", channel_id, err
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slack::fake::FakeSlack;

    #[tokio::test]
    async fn skips_members_without_email() {
        let slack = FakeSlack::default().with_members(
            "C1",
            &[("U1", Some("a@metabase.com")), ("U2", None), ("U3", Some("b@other.com"))],
        );
        let emails = resolve_member_emails(&slack, "C1", 1).await;
        assert_eq!(emails, vec!["a@metabase.com", "b@other.com"]);
    }

    #[tokio::test]
    async fn profile_failure_returns_partial_emails() {
        let mut slack = FakeSlack::default().with_members(
            "C1",
            &[("U1", Some("a@metabase.com")), ("U2", Some("b@other.com")), ("U3", Some("c@other.com"))],
        );
        slack.failing_users.insert("U2".to_owned());

        let emails = resolve_member_emails(&slack, "C1", 1).await;
        assert_eq!(emails, vec!["a@metabase.com"]);
    }

    #[tokio::test]
    async fn membership_failure_returns_nothing() {
        let mut slack = FakeSlack::default().with_members("C1", &[("U1", Some("a@metabase.com"))]);
        slack.failing_channels.insert("C1".to_owned());
        assert!(resolve_member_emails(&slack, "C1", 1).await.is_empty());
    }

    #[tokio::test]
    async fn concurrent_lookups_keep_member_order() {
        let mut slack = FakeSlack::default().with_members(
            "C1",
            &[
                ("U1", Some("a@metabase.com")),
                ("U2", Some("b@other.com")),
                ("U3", None),
                ("U4", Some("d@other.com")),
                ("U5", Some("e@other.com")),
            ],
        );
        let emails = resolve_member_emails(&slack, "C1", 4).await;
        assert_eq!(emails, vec!["a@metabase.com", "b@other.com", "d@other.com", "e@other.com"]);

        slack.failing_users.insert("U4".to_owned());
        let emails = resolve_member_emails(&slack, "C1", 4).await;
        assert_eq!(emails, vec!["a@metabase.com", "b@other.com"]);
    }
}
