//! Contains the logic for listing the removable volumes a user can eject.
use crate::command::CommandRunner;
use crate::config::{Config, IgnoreList};
use crate::error::Result;
use crate::platform::Platform;
use crate::toast::Toast;
use crate::volume::Volume;
use tracing::{debug, warn};

/// Title of the toast raised when listing fails.
pub const FAILURE_TITLE: &str = "Error listing volumes";

/// Lists the currently mounted removable volumes.
///
/// Runs the platform's listing command through `runner`, normalizes its
/// output, and removes every volume the user asked to ignore in `config`.
///
/// Listing never fails. If the command cannot be run, times out, exits
/// unsuccessfully, or prints output that cannot be parsed, the error is
/// logged, passed to `on_failure` as a failure [`Toast`], and an empty list
/// is returned so the caller can still render.
///
/// # Arguments
///
/// * `platform` - The platform resolved at startup.
/// * `config` - Holds the ignore list to apply.
/// * `runner` - Executes the listing command.
/// * `on_failure` - Called at most once, with a toast describing the failure.
pub async fn run<R: CommandRunner>(
    platform: Platform,
    config: &Config,
    runner: &R,
    on_failure: impl FnOnce(Toast),
) -> Vec<Volume> {
    match query(platform, runner).await {
        Ok(volumes) => {
            let volumes = filter_ignored(platform, volumes, &config.ignored_volumes);
            debug!(count = volumes.len(), "listed removable volumes");
            volumes
        }
        Err(e) => {
            warn!(?platform, error = %e, "failed to list volumes");
            on_failure(Toast::failure(FAILURE_TITLE, e.to_string()));
            Vec::new()
        }
    }
}

async fn query<R: CommandRunner>(platform: Platform, runner: &R) -> Result<Vec<Volume>> {
    let output = runner.run(&platform.list_command()).await?;
    platform.parse_listing(&output)
}

/// Drops every volume whose name, or on Windows whose drive letter or label,
/// exactly equals an ignore-list entry. Order is preserved.
pub fn filter_ignored(platform: Platform, volumes: Vec<Volume>, ignored: &IgnoreList) -> Vec<Volume> {
    if ignored.is_empty() {
        return volumes;
    }
    volumes
        .into_iter()
        .filter(|volume| !ignored.matches_any(&platform.match_keys(volume)))
        .collect()
}
