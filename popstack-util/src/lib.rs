pub mod callbacks;
pub mod classes;
pub mod kind;
pub mod sanitizer;

pub use callbacks::{Callback, Callbacks, Hook, HookContext, ReadyCallback, callback};
pub use classes::StyleClasses;
pub use kind::NotificationKind;
pub use sanitizer::{has_rich_content, plain_text, sanitize_html, strip_html};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of one rendered notification, stable for its whole life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A message waiting to be shown or being shown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// `None` defers to the instance's `sticky` option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    #[serde(skip)]
    pub callbacks: Callbacks,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_sticky(mut self, sticky: bool) -> Self {
        self.sticky = Some(sticky);
        self
    }

    /// Override the instance default for `hook` on this notification only.
    pub fn on<F>(mut self, hook: Hook, f: F) -> Self
    where
        F: Fn(&HookContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.callbacks = std::mem::take(&mut self.callbacks).with(hook, f);
        self
    }

    pub fn resolve_sticky(&self, default: bool) -> bool {
        self.sticky.unwrap_or(default)
    }
}

/// Why a notification left the surface.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloseReason {
    Expired = 1,
    Dismissed = 2,
    ClosedAll = 3,
    /// Pushed out to make room for a newer one.
    Evicted = 4,
    Undefined = 5,
}
