use crate::command::Command;
use crate::volume::Volume;
use std::time::Duration;

/// Where macOS mounts every volume, removable or not.
pub const MOUNT_ROOT: &str = "/Volumes";

/// Substring that identifies Time Machine local snapshot mounts.
pub const SNAPSHOT_MARKER: &str = "TimeMachine.localsnapshots";

const DISKUTIL: &str = "/usr/sbin/diskutil";
const LIST_TIMEOUT: Duration = Duration::from_secs(5);

// Private token that stands in for line breaks while splitting `ls` output.
const LINE_SENTINEL: &str = "~~~~~~~~~";

/// `ls /Volumes`, bounded by a short timeout.
pub fn list_command() -> Command {
    Command::new("ls").arg(MOUNT_ROOT).timeout(LIST_TIMEOUT)
}

/// Parses the plain-text output of [`list_command`].
///
/// Every line is a volume name. Line breaks are swapped for a sentinel token
/// before splitting, and a stray `\r` from CRLF output is stripped from each
/// entry. Empty lines and snapshot mounts are dropped; order is preserved.
pub fn parse_listing(raw: &str) -> Vec<Volume> {
    raw.replace('\n', LINE_SENTINEL)
        .split(LINE_SENTINEL)
        .map(|entry| entry.strip_suffix('\r').unwrap_or(entry))
        .filter(|entry| !entry.is_empty())
        .filter(|entry| !entry.contains(SNAPSHOT_MARKER))
        .map(Volume::new)
        .collect()
}

/// `diskutil eject <name>`, with no timeout.
///
/// `diskutil` must never be killed while it is still flushing a busy volume.
pub fn eject_command(volume: &Volume) -> Command {
    Command::new(DISKUTIL).arg("eject").arg(volume.name.as_str())
}
