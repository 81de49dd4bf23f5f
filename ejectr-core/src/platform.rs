//! Provides platform-specific functionality.
//!
//! Each supported operating system gets a submodule that knows which external
//! command lists its removable volumes, how to normalize that command's output
//! into [`Volume`] values, and which command safely ejects one. The submodules
//! are plain builders and parsers with no side effects, so they compile (and
//! are tested) on every host; [`Platform`] picks the one that applies at
//! runtime.
//!
//! Adding a platform means adding a [`Platform`] variant, and every `match`
//! in this crate will refuse to compile until the new variant is handled.

pub mod macos;
pub mod windows;

use crate::command::Command;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::volume::Volume;

/// A supported operating system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    /// Volumes are directories under `/Volumes`.
    MacOs,
    /// Volumes are drive letters.
    Windows,
}

impl Platform {
    /// Resolves the platform the binary is running on.
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Resolves a platform from an OS identity as reported by
    /// [`std::env::consts::OS`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] for anything other than
    /// `macos` or `windows`.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "macos" => Ok(Platform::MacOs),
            "windows" => Ok(Platform::Windows),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }

    pub(crate) fn list_command(self) -> Command {
        match self {
            Platform::MacOs => macos::list_command(),
            Platform::Windows => windows::list_command(),
        }
    }

    /// Normalizes the raw output of [`Platform::list_command`] into volumes.
    pub(crate) fn parse_listing(self, raw: &str) -> Result<Vec<Volume>> {
        match self {
            Platform::MacOs => Ok(macos::parse_listing(raw)),
            Platform::Windows => windows::parse_query(raw),
        }
    }

    pub(crate) fn eject_command(self, volume: &Volume, config: &Config) -> Result<Command> {
        match self {
            Platform::MacOs => Ok(macos::eject_command(volume)),
            Platform::Windows => windows::eject_command(volume, &config.remove_drive_path()),
        }
    }

    /// The strings an ignore-list entry may equal in order to hide `volume`.
    pub(crate) fn match_keys(self, volume: &Volume) -> Vec<&str> {
        match self {
            Platform::MacOs => vec![volume.name.as_str()],
            Platform::Windows => windows::match_keys(volume),
        }
    }
}
