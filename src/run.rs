use crate::channels::{list_all_channels, resolve_integrations};
use crate::classify::Classifier;
use crate::report::{ReportError, ReportRow, ReportWriter};
use crate::settings::Settings;
use crate::slack::{Channel, SlackApi};
use crate::users::resolve_member_emails;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("no channels were fetched")]
    NoChannels,

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// One full pass over the workspace: list, resolve, classify, write.
pub async fn run(slack: &dyn SlackApi, settings: &Settings) -> Result<PathBuf, RunError> {
    debug!("Starting channel report...");
    let channels = list_all_channels(slack, &settings.channel_types, settings.page_size).await;

    if channels.is_empty() {
        error!("No channels were fetched. Exiting.");
        return Err(RunError::NoChannels);
    }

    let classifier = Classifier {
        external_prefix: &settings.external_prefix,
        internal_domain: &settings.internal_domain,
    };

    // Claim the output file before any per-channel lookups
    let mut report = ReportWriter::create(&settings.output_dir, &settings.output_base_name)?;
    for channel in &channels {
        if let Some(row) = build_row(slack, settings, &classifier, channel).await {
            report.write_row(&row)?;
        }
    }

    let path = report.finish()?;
    info!("Data written to {}", path.display());
    Ok(path)
}

async fn build_row(
    slack: &dyn SlackApi,
    settings: &Settings,
    classifier: &Classifier<'_>,
    channel: &Channel,
) -> Option<ReportRow> {
    let (channel_name, channel_id) = match (channel.name.as_deref(), channel.id.as_deref()) {
        (Some(name), Some(id)) if !name.is_empty() && !id.is_empty() => (name, id),
        _ => {
            warn!("Channel data incomplete for: {:?}. Skipping.", channel);
            return None;
        }
    };

    debug!(
        "Channel: {}, Type: {}",
        channel_name,
        if channel.is_shared { "shared" } else { "internal" }
    );

    let emails = resolve_member_emails(slack, channel_id, settings.member_concurrency).await;
    let integrations = resolve_integrations(slack, channel_id).await;
    let is_external = classifier.is_external(channel_name, &emails);

    info!(
        "Channel: {}, ID: {}, Users: {}, External: {}, Integrations: {:?}",
        channel_name,
        channel_id,
        emails.len(),
        is_external,
        integrations
    );

    Some(ReportRow {
        channel_name: channel_name.to_owned(),
        channel_id: channel_id.to_owned(),
        emails,
        is_external,
        integrations,
    })
}
