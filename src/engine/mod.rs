//! The notification engine: admission queue, lifecycle and layout of one
//! notification surface.
//!
//! [`Popstack`] is a plain synchronous state machine. Every entry point that
//! depends on time takes the current [`Instant`], and nothing happens between
//! calls. [`crate::subscriptions::driver`] wires it to a tokio interval.

mod chrome;
mod close;
mod open;
mod tick;

pub use chrome::CloserPhase;

use crate::{
    error::{EngineError, RenderError},
    lifecycle::Phase,
    options::{self, OptionValue},
    renderer::{Animation, AnimationTarget, Direction, Renderer},
    state::{InstanceState, Rendered},
};
use chrome::Chrome;
use popstack_config::{Layout, PopstackConfig};
use popstack_util::{
    CloseReason, Callbacks, ElementId, Hook, HookContext, Notification, StyleClasses,
};
use std::time::Instant;
use tracing::{debug, error, info, trace};

/// Counters of an instance at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub queued: usize,
    pub rendered: usize,
    pub wrapper_height: f32,
    pub surface_height: f32,
    pub overflow: bool,
    pub destroyed: bool,
}

pub struct Popstack<R: Renderer> {
    surface_id: String,
    config: PopstackConfig,
    /// Instance-wide defaults, shadowed by per-notification overrides.
    callbacks: Callbacks,
    classes: StyleClasses,
    /// `None` once destroyed.
    renderer: Option<R>,
    state: InstanceState,
    chrome: Chrome,
    next_id: u64,
    pending_resize: Option<Instant>,
}

impl<R: Renderer> Popstack<R> {
    /// Set up the surface and fire `ready`.
    pub fn new(
        surface_id: &str,
        config: PopstackConfig,
        callbacks: Callbacks,
        renderer: R,
    ) -> Result<Self, EngineError> {
        let surface_id: String = surface_id.chars().filter(|c| !c.is_whitespace()).collect();
        let chrome = Chrome::measure(&config, &renderer);

        let mut engine = Self {
            classes: StyleClasses::new(&config),
            state: InstanceState::new(config.pool),
            surface_id,
            config,
            callbacks,
            renderer: Some(renderer),
            chrome,
            next_id: 1,
            pending_resize: None,
        };

        engine.update_closer()?;
        engine.update_header()?;
        engine.sync_surface_height()?;

        info!(
            "Created notification surface {} ({}, {})",
            engine.surface_id,
            engine.config.position.as_str(),
            engine.config.layout.as_str()
        );

        if let Some(ready) = engine.callbacks.ready() {
            ready(&engine.surface_id);
        }

        Ok(engine)
    }

    /// Queue a notification. Rendering happens on a later tick.
    pub fn add(&mut self, notification: Notification) {
        if self.is_destroyed() {
            trace!("Ignoring add on a destroyed surface");
            return;
        }
        if self.state.disabled {
            debug!("Surface {} is disabled, dropping notification", self.surface_id);
            return;
        }

        self.dispatch(Hook::Add, &notification, None, None);
        self.state.enqueue(notification);

        if self.config.layout == Layout::Paneled {
            self.chrome.header_count += 1;
        }
        if let Err(err) = self.update_closer().and_then(|_| self.update_header()) {
            error!("Failed to refresh chrome after add: {}", err);
        }
    }

    pub fn enable(&mut self) {
        self.state.disabled = false;
    }

    pub fn disable(&mut self) {
        self.state.disabled = true;
    }

    /// Stop ticking. Expiry clocks freeze until [`Popstack::unpause`].
    pub fn pause(&mut self, now: Instant) {
        if self.state.paused {
            return;
        }
        self.state.paused = true;
        self.freeze_clocks(now);
    }

    pub fn unpause(&mut self, now: Instant) {
        if !self.state.paused {
            return;
        }
        self.state.paused = false;
        if !self.state.clocks_frozen() {
            self.thaw_clocks(now);
        }
    }

    pub fn pointer_enter(&mut self, now: Instant) {
        if !self.config.pause_on_hover || self.state.suspended || self.is_destroyed() {
            return;
        }
        self.state.suspended = true;
        self.freeze_clocks(now);
    }

    pub fn pointer_leave(&mut self, now: Instant) {
        if !self.state.suspended {
            return;
        }
        self.state.suspended = false;
        if !self.state.clocks_frozen() {
            self.thaw_clocks(now);
        }
    }

    /// Start closing every rendered notification.
    pub fn close_all(&mut self) {
        let ids: Vec<ElementId> = self.state.elements().iter().map(|e| e.id).collect();
        for id in ids {
            if let Err(err) = self.request_close(id, CloseReason::ClosedAll) {
                error!("Failed to close {}: {}", id, err);
            }
        }
    }

    /// Start closing one notification, as its close button does.
    pub fn close(&mut self, id: ElementId) {
        if let Err(err) = self.request_close(id, CloseReason::Dismissed) {
            error!("Failed to close {}: {}", id, err);
        }
    }

    pub fn click(&mut self, id: ElementId) {
        let Some(element) = self.state.get(id) else {
            trace!("Click on unknown element {}", id);
            return;
        };
        self.dispatch(Hook::Click, &element.notification, Some(id), None);
    }

    /// Drop every queued notification. Rendered ones are untouched.
    pub fn empty_queue(&mut self) {
        if self.is_destroyed() {
            return;
        }
        let dropped = self.state.clear_queue();
        debug!("Dropped {} queued notifications", dropped);
        if let Err(err) = self.update_closer() {
            error!("Failed to refresh closer: {}", err);
        }
    }

    pub fn get_option(&self, key: &str) -> Option<OptionValue> {
        options::get_option(&self.config, &self.callbacks, key)
    }

    pub fn set_option(&mut self, key: &str, value: OptionValue) {
        if self.is_destroyed() {
            trace!("Ignoring set_option on a destroyed surface");
            return;
        }
        if !options::set_option(&mut self.config, &mut self.callbacks, key, value) {
            return;
        }
        self.state.set_pool(self.config.pool);
        self.classes = StyleClasses::new(&self.config);
        if let Err(err) = self.update_closer() {
            error!("Failed to refresh closer: {}", err);
        }
    }

    /// Note a viewport resize. Overflow is re-checked once resizing settles.
    pub fn resize(&mut self, now: Instant) {
        if self.is_destroyed() || self.config.position.is_inline() {
            return;
        }
        self.pending_resize = Some(now);
    }

    /// Collapse the panel to its header, or restore it.
    pub fn toggle_panel(&mut self) {
        if self.config.layout != Layout::Paneled || self.is_destroyed() {
            return;
        }
        self.chrome.panel_open = !self.chrome.panel_open;
        if let Err(err) = self.update_header().and_then(|_| self.sync_surface_height()) {
            error!("Failed to toggle panel: {}", err);
        }
    }

    /// Route a finished animation to the transition waiting on it.
    pub fn animation_finished(&mut self, animation: Animation, now: Instant) {
        if self.is_destroyed() {
            trace!("Ignoring {:?} after teardown", animation);
            return;
        }

        let result = match (animation.target, animation.direction) {
            (AnimationTarget::Element(id), Direction::In) => self.finish_open(id, now),
            (AnimationTarget::Element(id), Direction::Out) => self.finish_close(id),
            (AnimationTarget::Closer, Direction::In) => {
                self.closer_shown();
                Ok(())
            }
            (AnimationTarget::Closer, Direction::Out) => self.closer_hidden(),
        };

        if let Err(err) = result {
            error!("Failed to complete {:?}: {}", animation, err);
        }
    }

    /// Stop everything and release the render surface.
    pub fn destroy(&mut self) {
        let Some(mut renderer) = self.renderer.take() else {
            return;
        };
        self.state.clear();
        self.pending_resize = None;
        renderer.release();
        info!("Destroyed notification surface {}", self.surface_id);
    }

    pub fn is_destroyed(&self) -> bool {
        self.renderer.is_none()
    }

    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    pub fn config(&self) -> &PopstackConfig {
        &self.config
    }

    pub fn classes(&self) -> &StyleClasses {
        &self.classes
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            queued: self.queue_len(),
            rendered: self.rendered_count(),
            wrapper_height: self.state.wrapper_height,
            surface_height: self.surface_height(),
            overflow: self.state.overflow,
            destroyed: self.is_destroyed(),
        }
    }

    pub fn queue_len(&self) -> usize {
        self.state.queue().len()
    }

    pub fn rendered_count(&self) -> usize {
        self.state.elements().len()
    }

    pub fn elements(&self) -> &[Rendered] {
        self.state.elements()
    }

    pub fn wrapper_height(&self) -> f32 {
        self.state.wrapper_height
    }

    pub fn overflow(&self) -> bool {
        self.state.overflow
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn is_disabled(&self) -> bool {
        self.state.disabled
    }

    pub fn is_suspended(&self) -> bool {
        self.state.suspended
    }

    pub fn phase_of(&self, id: ElementId) -> Option<Phase> {
        self.state.phase_of(id)
    }

    pub fn closer_phase(&self) -> CloserPhase {
        self.chrome.closer
    }

    pub fn header_count(&self) -> usize {
        self.chrome.header_count
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    /// Run the resolved handler for `hook`. Returns whether the transition
    /// may proceed.
    fn dispatch(
        &self,
        hook: Hook,
        notification: &Notification,
        element: Option<ElementId>,
        reason: Option<CloseReason>,
    ) -> bool {
        let Some(handler) = Callbacks::resolve(&notification.callbacks, &self.callbacks, hook) else {
            return true;
        };
        let ctx = HookContext {
            notification,
            element,
            reason,
        };
        let accepted = handler(&ctx);
        if !hook.is_cancellable() {
            return true;
        }
        if !accepted {
            debug!("{} handler declined on {:?}", hook.key(), element);
        }
        accepted
    }

    fn render(&mut self) -> Result<&mut R, RenderError> {
        self.renderer.as_mut().ok_or(RenderError::Released)
    }

    fn freeze_clocks(&mut self, now: Instant) {
        let life = self.config.life();
        for element in self.state.elements.iter_mut().filter(|e| e.phase == Phase::Settled) {
            element.freeze(now, life);
        }
    }

    fn thaw_clocks(&mut self, now: Instant) {
        for element in self.state.elements.iter_mut() {
            element.thaw(now);
        }
    }

    fn next_element_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Push the current offsets of `ids` to the renderer.
    fn push_offsets(&mut self, ids: &[ElementId]) -> Result<(), RenderError> {
        let edge = self.config.position.edge();
        let offsets: Vec<(ElementId, f32)> = ids
            .iter()
            .filter_map(|id| self.state.get(*id).map(|e| (*id, e.offset)))
            .collect();
        let renderer = self.render()?;
        for (id, offset) in offsets {
            renderer.set_offset(id, edge, offset)?;
        }
        Ok(())
    }
}

impl<R: Renderer> Drop for Popstack<R> {
    fn drop(&mut self) {
        self.destroy();
    }
}
