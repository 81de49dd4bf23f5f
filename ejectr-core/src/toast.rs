//! The user-facing notification handed to front-ends.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastStyle {
    Success,
    Failure,
}

/// A short, non-fatal notification: a title plus a detail message.
///
/// The core never renders toasts itself. Operations that absorb their
/// failures (see [`crate::list::run`]) hand one to a caller-supplied callback
/// instead, and the front-end decides how to show it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub style: ToastStyle,
    pub title: String,
    pub message: String,
}

impl Toast {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Failure,
            title: title.into(),
            message: message.into(),
        }
    }
}
