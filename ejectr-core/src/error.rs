//! The error taxonomy shared by the lister and the ejector.
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The running OS is neither macOS nor Windows.
    #[error("Unsupported environment: {0}")]
    UnsupportedPlatform(String),

    /// The external process could not be started or exited unsuccessfully.
    #[error("Command `{program}` failed: {reason}")]
    CommandExecution { program: String, reason: String },

    #[error("Command `{program}` timed out after {}s", .after.as_secs())]
    Timeout { program: String, after: Duration },

    /// Structured command output could not be decoded.
    #[error("Could not parse command output: {0}")]
    Parse(String),

    #[error("Volume '{0}' has no drive letter")]
    InvalidVolume(String),
}

impl Error {
    /// True for every failure that came from running an external command,
    /// including timeouts.
    pub fn is_command_failure(&self) -> bool {
        matches!(self, Error::CommandExecution { .. } | Error::Timeout { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
