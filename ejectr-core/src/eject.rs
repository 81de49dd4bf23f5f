//! Contains the logic for safely ejecting a listed volume.
use crate::command::CommandRunner;
use crate::config::Config;
use crate::error::Result;
use crate::platform::Platform;
use crate::volume::Volume;
use tracing::info;

/// Safely ejects `volume`.
///
/// On macOS this runs `diskutil eject` and waits for it however long it
/// takes. On Windows it recovers the drive letter from the volume name and
/// runs the bundled `RemoveDrive.exe` from `config.assets_dir`, bounded by a
/// timeout.
///
/// Unlike [`crate::list::run`], failures are returned rather than absorbed;
/// reporting them to the user is up to the caller.
///
/// # Errors
///
/// - [`crate::error::Error::InvalidVolume`] if a Windows volume name carries
///   no drive letter. No process is spawned in that case.
/// - Any error from `runner`, such as a non-zero exit or a timeout.
pub async fn run<R: CommandRunner>(
    platform: Platform,
    volume: &Volume,
    config: &Config,
    runner: &R,
) -> Result<()> {
    let command = platform.eject_command(volume, config)?;
    info!(?platform, volume = %volume, "ejecting volume");
    runner.run(&command).await?;
    info!(volume = %volume, "volume ejected");
    Ok(())
}
