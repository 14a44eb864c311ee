mod slack;
mod http;
mod channel;
mod user;
mod error;
#[cfg(test)]
pub mod fake;

pub use self::slack::{Slack, SlackApi};
pub use self::channel::{Channel, ChannelPage};
pub use self::user::UserInfo;
pub use self::error::SlackError;
