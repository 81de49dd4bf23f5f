//! Caller-supplied configuration threaded into every listing and eject call.
use std::path::PathBuf;

/// File name of the bundled safe-removal helper used on Windows.
pub const REMOVE_DRIVE_EXE: &str = "RemoveDrive.exe";

/// The set of volume names the user never wants offered for ejection.
///
/// Built from the comma-separated `ignoredVolumes` preference. Entries are
/// trimmed and empty entries are discarded, so `"Untitled, ,Backup"` yields
/// two entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IgnoreList {
    entries: Vec<String>,
}

impl IgnoreList {
    pub fn parse(raw: &str) -> Self {
        let entries = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    /// Same as [`IgnoreList::parse`], treating a missing preference as empty.
    pub fn from_preference(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns true if any entry is exactly equal to one of `keys`.
    pub fn matches_any(&self, keys: &[&str]) -> bool {
        self.entries
            .iter()
            .any(|entry| keys.iter().any(|key| key == entry))
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub ignored_volumes: IgnoreList,
    /// Directory holding bundled helper executables (see [`REMOVE_DRIVE_EXE`]).
    pub assets_dir: PathBuf,
}

impl Config {
    pub fn new(ignored_volumes: IgnoreList, assets_dir: Option<PathBuf>) -> Self {
        Self {
            ignored_volumes,
            assets_dir: assets_dir.unwrap_or_else(default_assets_dir),
        }
    }

    pub fn remove_drive_path(&self) -> PathBuf {
        self.assets_dir.join(REMOVE_DRIVE_EXE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(IgnoreList::default(), None)
    }
}

/// The directory of the running executable, falling back to the working directory.
fn default_assets_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_drops_empty_entries() {
        let list = IgnoreList::parse(" Untitled, ,Backup ,");
        assert_eq!(list.entries(), ["Untitled", "Backup"]);
    }

    #[test]
    fn missing_preference_is_empty() {
        assert!(IgnoreList::from_preference(None).is_empty());
        assert!(IgnoreList::from_preference(Some("")).is_empty());
    }

    #[test]
    fn matching_is_exact() {
        let list = IgnoreList::parse("Data");
        assert!(list.matches_any(&["Data"]));
        assert!(!list.matches_any(&["Database"]));
        assert!(!list.matches_any(&["data"]));
    }

    #[test]
    fn helper_path_is_inside_assets_dir() {
        let config = Config::new(IgnoreList::default(), Some(PathBuf::from("assets")));
        assert_eq!(
            config.remove_drive_path(),
            PathBuf::from("assets").join("RemoveDrive.exe")
        );
    }
}
