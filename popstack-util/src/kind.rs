use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification type tag, drives the type style class and the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NotificationKind {
    #[default]
    Default,
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Icon identifier handed to the renderer. Default and info share one.
    pub fn icon_name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Default | Self::Info => "info",
        }
    }
}

impl From<&str> for NotificationKind {
    fn from(value: &str) -> Self {
        match value {
            "info" | "notice" => Self::Info,
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            "default" => Self::Default,
            other => {
                tracing::debug!("Unknown notification type {other:?}, using default");
                Self::Default
            }
        }
    }
}

impl From<String> for NotificationKind {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!(NotificationKind::from("info"), NotificationKind::Info);
        assert_eq!(NotificationKind::from("success"), NotificationKind::Success);
        assert_eq!(NotificationKind::from("warning"), NotificationKind::Warning);
        assert_eq!(NotificationKind::from("error"), NotificationKind::Error);
        assert_eq!(NotificationKind::from("default"), NotificationKind::Default);
    }

    #[test]
    fn test_notice_is_info() {
        assert_eq!(NotificationKind::from("notice"), NotificationKind::Info);
    }

    #[test]
    fn test_unknown_kind_defaults() {
        assert_eq!(NotificationKind::from("shout"), NotificationKind::Default);
        assert_eq!(NotificationKind::from(""), NotificationKind::Default);
    }

    #[test]
    fn test_icon_names() {
        assert_eq!(NotificationKind::Default.icon_name(), "info");
        assert_eq!(NotificationKind::Info.icon_name(), "info");
        assert_eq!(NotificationKind::Success.icon_name(), "success");
        assert_eq!(NotificationKind::Error.icon_name(), "error");
    }

    #[test]
    fn test_kind_serde() {
        let kind: NotificationKind = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(kind, NotificationKind::Warning);

        let kind: NotificationKind = serde_json::from_str("\"bogus\"").unwrap();
        assert_eq!(kind, NotificationKind::Default);

        assert_eq!(serde_json::to_string(&NotificationKind::Success).unwrap(), "\"success\"");
    }
}
