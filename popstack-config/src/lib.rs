use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Where the notification surface sits inside its host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    #[default]
    TopRight,
    Center,
    /// Flows with the host content; overflow is never checked.
    Inline,
    BottomLeft,
    BottomRight,
}

impl Position {
    /// The edge element offsets are measured from.
    pub fn edge(self) -> Edge {
        match self {
            Position::BottomLeft | Position::BottomRight => Edge::Bottom,
            _ => Edge::Top,
        }
    }

    /// The side slide animations enter from.
    pub fn side(self) -> Side {
        match self {
            Position::TopLeft | Position::BottomLeft => Side::Left,
            _ => Side::Right,
        }
    }

    pub fn is_inline(self) -> bool {
        self == Position::Inline
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopRight => "top-right",
            Position::Center => "center",
            Position::Inline => "inline",
            Position::BottomLeft => "bottom-left",
            Position::BottomRight => "bottom-right",
        }
    }
}

/// Anchor edge of the rendered sequence.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Edge {
    #[default]
    Top,
    Bottom,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Independent floating items separated by `spacing`.
    #[default]
    #[serde(alias = "popups")]
    Stacked,
    /// A single collapsible panel with a header.
    #[serde(alias = "panel")]
    Paneled,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Stacked => "stacked",
            Layout::Paneled => "paneled",
        }
    }
}

/// Which end of the rendered sequence new elements join.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Insert {
    #[serde(alias = "before")]
    Head,
    #[default]
    #[serde(alias = "after")]
    Tail,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Effect {
    #[default]
    Fade,
    Slide,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration of one notification instance.
///
/// Every field has a default, so partial files deserialize. The camelCase
/// names used by browser-side hosts are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopstackConfig {
    /// Host element the surface is attached to.
    #[serde(alias = "appendTo")]
    pub append_to: String,
    /// Prefix of every generated style class.
    pub block: String,
    pub position: Position,
    pub layout: Layout,
    pub theme: String,
    /// Whether notifications carry a kind icon.
    pub icons: bool,
    pub insert: Insert,
    /// Gap between stacked notifications.
    pub spacing: f32,
    /// Maximum number of notifications rendered at once. 0 means unlimited.
    pub pool: u32,
    /// Whether notifications are exempt from expiration unless they say otherwise.
    pub sticky: bool,
    /// Life span of a non-sticky notification in milliseconds.
    pub life: u64,
    pub progressbar: bool,
    #[serde(alias = "pauseOnHover")]
    pub pause_on_hover: bool,
    #[serde(alias = "headerText")]
    pub header_text: String,
    /// Whether the close-all affordance exists.
    pub closer: bool,
    #[serde(alias = "closeText")]
    pub close_text: String,
    #[serde(alias = "loadMoreText")]
    pub load_more_text: String,
    /// Collapse an empty panel to zero height.
    #[serde(alias = "hideEmpty")]
    pub hide_empty: bool,
    /// Tick interval of the scheduler in milliseconds.
    pub interval: u64,
    pub effect: Effect,
    pub easing: String,
    /// Animation duration in milliseconds.
    #[serde(alias = "effectDuration")]
    pub effect_duration: u64,
}

impl Default for PopstackConfig {
    fn default() -> Self {
        Self {
            append_to: String::from("body"),
            block: String::from("popstack"),
            position: Position::default(),
            layout: Layout::default(),
            theme: String::from("default"),
            icons: true,
            insert: Insert::default(),
            spacing: 10.0,
            pool: 0,
            sticky: false,
            life: 3000,
            progressbar: false,
            pause_on_hover: true,
            header_text: String::from("Messages"),
            closer: true,
            close_text: String::from("Close"),
            load_more_text: String::from("Load more"),
            hide_empty: false,
            interval: 250,
            effect: Effect::default(),
            easing: String::from("linear"),
            effect_duration: 250,
        }
    }
}

impl PopstackConfig {
    pub fn life(&self) -> Duration {
        Duration::from_millis(self.life)
    }

    /// Never zero, a zero period would spin the scheduler.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval.max(1))
    }

    pub fn effect_duration(&self) -> Duration {
        Duration::from_millis(self.effect_duration)
    }

    pub fn is_pooled(&self) -> bool {
        self.pool > 0
    }

    /// Gap inserted after each element. Panels stack without gaps.
    pub fn gap(&self) -> f32 {
        match self.layout {
            Layout::Stacked => self.spacing,
            Layout::Paneled => 0.0,
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path`, logging the failure and falling back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            tracing::error!("{err}");
            Self::default()
        })
    }
}
