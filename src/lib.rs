//! Scheduling and layout engine for transient notification popups.
//!
//! Notifications are queued with [`Popstack::add`], admitted one per tick
//! while pool capacity and available height allow, stacked against the
//! configured anchor edge and closed when their life runs out. Drawing is
//! delegated to a [`Renderer`].

pub(crate) mod constants;
pub mod engine;
pub mod error;
pub mod layout;
pub mod lifecycle;
pub mod options;
pub mod renderer;
pub mod rendering;
pub mod state;
pub mod subscriptions;

pub use engine::{CloserPhase, Popstack, Snapshot};
pub use error::{EngineError, RenderError};
pub use lifecycle::{Phase, Trigger};
pub use options::OptionValue;
pub use renderer::{
    Animation, AnimationSpec, AnimationTarget, CloserView, Direction, ElementStyle, HeaderView,
    Keyframe, Renderer,
};
pub use rendering::HeadlessRenderer;

pub use popstack_config as config;
pub use popstack_util as util;

/// Viewport height used by the demo binary.
pub const DEMO_VIEWPORT_HEIGHT: f32 = constants::DEMO_VIEWPORT_HEIGHT;
