// src/update/mod.rs

//! Background update check.
//!
//! Runs on an independent tokio task so it can never block (or be blocked by)
//! the orchestrator. Fetches release JSON from the configured endpoint,
//! compares the tag against the running version, and logs/notifies when a
//! newer release exists. Every failure here is a logged warning; the session
//! lifecycle does not depend on this in any way.
//!
//! Mirror selection, update dialogs, and package installation are explicitly
//! out of scope: the check only reports.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::backend::Notifier;
use crate::config::UpdateSection;
use crate::errors::Result;

/// A release as returned by a GitHub-API-shaped endpoint. Only the fields
/// the check reports on are deserialized.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseInfo {
    pub tag_name: String,
    #[serde(default)]
    pub body: String,
}

/// Spawn the background update check. Returns immediately; the handle is
/// only useful for tests that want to await completion.
pub fn spawn_update_check(
    update: UpdateSection,
    notifier: Arc<dyn Notifier>,
    current_version: &str,
) -> tokio::task::JoinHandle<()> {
    let current_version = current_version.to_string();

    tokio::spawn(async move {
        if !update.enabled {
            debug!("update check disabled");
            return;
        }

        match check_for_update(&update, &current_version).await {
            Ok(Some(release)) => {
                let notes = strip_markdown_images(&release.body);
                info!(
                    current = %current_version,
                    latest = %release.tag_name,
                    "a newer release is available"
                );
                debug!(notes = %notes, "release notes");
                notifier.notify(&format!(
                    "Update available: {} -> {}",
                    current_version, release.tag_name
                ));
            }
            Ok(None) => {
                info!(current = %current_version, "running the latest release");
            }
            Err(e) => {
                warn!(error = %e, "update check failed; continuing without it");
            }
        }
    })
}

/// Fetch the latest release and return it when it is newer than
/// `current_version`.
async fn check_for_update(
    update: &UpdateSection,
    current_version: &str,
) -> Result<Option<ReleaseInfo>> {
    let url = update
        .releases_url
        .as_ref()
        .context("update check enabled without a releases URL")?;

    let release = fetch_latest_release(url, update).await?;

    if is_newer(&release.tag_name, current_version) {
        Ok(Some(release))
    } else {
        Ok(None)
    }
}

async fn fetch_latest_release(url: &str, update: &UpdateSection) -> Result<ReleaseInfo> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(update.timeout_secs))
        .user_agent(concat!("stagehand/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building update-check HTTP client")?;

    let response = client
        .get(url)
        .send()
        .await
        .context("requesting release info")?
        .error_for_status()
        .context("release endpoint returned an error status")?;

    // With prereleases the endpoint returns an array, newest first;
    // otherwise a single release object.
    if update.include_prereleases {
        let releases: Vec<ReleaseInfo> = response
            .json()
            .await
            .context("decoding release list JSON")?;
        releases
            .into_iter()
            .next()
            .context("release list was empty")
            .map_err(Into::into)
    } else {
        response
            .json()
            .await
            .context("decoding release JSON")
            .map_err(Into::into)
    }
}

/// Dotted numeric version comparison with a leading `v` stripped; missing
/// components count as zero, non-numeric components as zero.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    let a = parse_version(candidate);
    let b = parse_version(current);

    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        if x != y {
            return x > y;
        }
    }
    false
}

fn parse_version(version: &str) -> Vec<u64> {
    version
        .trim()
        .trim_start_matches('v')
        .trim_start_matches('V')
        .split('.')
        .map(|part| {
            part.chars()
                .take_while(|c| c.is_ascii_digit())
                .collect::<String>()
                .parse()
                .unwrap_or(0)
        })
        .collect()
}

/// Remove markdown image tags from release notes before logging them.
pub fn strip_markdown_images(markdown: &str) -> String {
    // Same shape the images carry in release bodies: ![alt](url)
    let re = Regex::new(r"!\[.*?\]\(.*?\)").expect("static regex");
    re.replace_all(markdown, "").into_owned()
}
