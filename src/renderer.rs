//! The seam between the engine and whatever draws the notifications.

use crate::error::RenderError;
use popstack_config::{Edge, Effect, PopstackConfig, Side};
use popstack_util::{ElementId, Notification};
use std::time::Duration;

/// Presentation details the engine decides for a new element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    pub classes: Vec<String>,
    /// Set when icons are enabled.
    pub icon: Option<&'static str>,
    pub progressbar: bool,
    pub sticky: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTarget {
    Element(ElementId),
    Closer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    In,
    Out,
}

/// An animation the renderer was asked to run.
///
/// The renderer hands it back through
/// [`Popstack::animation_finished`](crate::Popstack::animation_finished)
/// once it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Animation {
    pub target: AnimationTarget,
    pub direction: Direction,
}

impl Animation {
    pub fn element(id: ElementId, direction: Direction) -> Self {
        Self {
            target: AnimationTarget::Element(id),
            direction,
        }
    }

    pub fn closer(direction: Direction) -> Self {
        Self {
            target: AnimationTarget::Closer,
            direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
    pub effect: Effect,
    /// Side a slide enters from.
    pub side: Side,
    pub easing: String,
    pub duration: Duration,
}

/// One keyframe: opacity and the horizontal slide offset in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub opacity: f32,
    pub slide: Option<f32>,
}

impl AnimationSpec {
    pub fn from_config(config: &PopstackConfig) -> Self {
        Self {
            effect: config.effect,
            side: config.position.side(),
            easing: config.easing.clone(),
            duration: config.effect_duration(),
        }
    }

    /// Start and end keyframes for `direction`.
    pub fn keyframes(&self, direction: Direction) -> [Keyframe; 2] {
        let hidden = Keyframe {
            opacity: 0.0,
            slide: (self.effect == Effect::Slide).then_some(-110.0),
        };
        let shown = Keyframe {
            opacity: 1.0,
            slide: (self.effect == Effect::Slide).then_some(0.0),
        };
        match direction {
            Direction::In => [hidden, shown],
            Direction::Out => [shown, hidden],
        }
    }
}

/// State of the "close all" / "load more" button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloserView {
    pub visible: bool,
    pub text: String,
    /// Queued count, shown only while more are waiting.
    pub count: Option<usize>,
}

/// State of the panel header in paneled layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub title: String,
    pub count: usize,
    pub minimize_visible: bool,
    pub open: bool,
}

/// Something that can build, place and animate notification elements.
///
/// All calls come from one thread. Animations run asynchronously; the
/// implementation reports each completion back to the engine exactly once.
/// The closer button is expected to call
/// [`Popstack::close_all`](crate::Popstack::close_all) when clicked.
pub trait Renderer {
    /// Height available to the surface.
    fn viewport_height(&self) -> f32;

    /// Distance between the surface and the anchor edge of the viewport.
    fn surface_distance(&self) -> f32;

    fn closer_height(&self) -> f32;

    fn header_height(&self) -> f32;

    /// Build a hidden element and return its measured height.
    fn create(&mut self, id: ElementId, notification: &Notification, style: &ElementStyle) -> Result<f32, RenderError>;

    fn show(&mut self, id: ElementId) -> Result<(), RenderError>;

    fn set_offset(&mut self, id: ElementId, edge: Edge, offset: f32) -> Result<(), RenderError>;

    fn set_progress(&mut self, id: ElementId, percent: u8) -> Result<(), RenderError>;

    fn animate(&mut self, animation: Animation, spec: &AnimationSpec) -> Result<(), RenderError>;

    fn remove(&mut self, id: ElementId) -> Result<(), RenderError>;

    fn set_surface_height(&mut self, height: f32) -> Result<(), RenderError>;

    fn update_closer(&mut self, view: &CloserView) -> Result<(), RenderError>;

    fn update_header(&mut self, view: &HeaderView) -> Result<(), RenderError>;

    /// Drop the render surface. Called once on teardown.
    fn release(&mut self);
}
