use serde::Serialize;
use std::fmt;

/// Represents a mounted removable volume.
///
/// The name is the only identifier a volume carries. It is built by the
/// platform-specific listing code in [`crate::platform`] in a form that the
/// matching eject code can turn back into a mount name or drive letter, so a
/// listed `Volume` can always be handed straight to [`crate::eject::run`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Volume {
    /// The display name (e.g., `Untitled` on macOS, `E: (Kingston)` on Windows).
    pub name: String,
}

impl Volume {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
