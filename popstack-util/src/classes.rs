use crate::NotificationKind;
use popstack_config::PopstackConfig;

/// BEM style classes for every part of a notification surface.
///
/// All names derive from the configured `block`, so two instances with
/// different blocks can be styled independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleClasses {
    pub block: String,
    pub block_position: String,
    pub block_theme: String,
    pub block_layout: String,
    pub block_open: String,
    pub header: String,
    pub header_inner: String,
    pub header_title: String,
    pub header_count: String,
    pub header_minimize: String,
    pub notifications: String,
    pub closer: String,
    pub closer_text: String,
    pub closer_count: String,
    pub notification: String,
    pub notification_progress: String,
    pub notification_progress_inner: String,
    pub notification_outer: String,
    pub notification_icon: String,
    pub notification_icon_inner: String,
    pub notification_inner: String,
    pub notification_title: String,
    pub notification_close: String,
    pub notification_content: String,
    notification_type_prefix: String,
}

impl StyleClasses {
    pub fn new(config: &PopstackConfig) -> Self {
        let block = config.block.as_str();
        let element = |name: &str| format!("{block}__{name}");

        Self {
            block: block.to_string(),
            block_position: format!("{block}_position_{}", config.position.as_str()),
            block_theme: format!("{block}_theme_{}", config.theme),
            block_layout: format!("{block}_layout_{}", config.layout.as_str()),
            block_open: format!("{block}_open"),
            header: element("header"),
            header_inner: element("header-inner"),
            header_title: element("header-title"),
            header_count: element("header-count"),
            header_minimize: element("header-minimize"),
            notifications: element("notifications"),
            closer: element("closer"),
            closer_text: element("closer-text"),
            closer_count: element("closer-count"),
            notification: element("notification"),
            notification_progress: element("notification-progress"),
            notification_progress_inner: element("notification-progress-inner"),
            notification_outer: element("notification-outer"),
            notification_icon: element("notification-icon"),
            notification_icon_inner: element("notification-icon-inner"),
            notification_inner: element("notification-inner"),
            notification_title: element("notification-title"),
            notification_close: element("notification-close"),
            notification_content: element("notification-content"),
            notification_type_prefix: element("notification_type_"),
        }
    }

    /// Classes of the surface root.
    pub fn surface(&self) -> [&str; 4] {
        [&self.block, &self.block_position, &self.block_theme, &self.block_layout]
    }

    pub fn notification_type(&self, kind: NotificationKind) -> String {
        format!("{}{}", self.notification_type_prefix, kind.as_str())
    }

    /// Classes of a notification element root.
    pub fn element(&self, kind: NotificationKind) -> Vec<String> {
        vec![self.notification.clone(), self.notification_type(kind)]
    }
}
