use crate::{constants::*, lifecycle::Phase};
use popstack_util::{CloseReason, ElementId, Notification};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

/// One notification that has an element in the rendered sequence.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub id: ElementId,
    pub notification: Notification,
    pub phase: Phase,
    pub extent: f32,
    /// Distance from the anchor edge.
    pub offset: f32,
    pub sticky: bool,
    /// Set once a close is accepted and never cleared.
    pub removing: bool,
    /// Set when the enter animation finishes.
    pub created: Option<Instant>,
    /// Life remaining, captured when the clocks froze.
    pub time_left: Option<Duration>,
    pub pause_started: Option<Instant>,
    pub progress: u8,
    pub close_reason: Option<CloseReason>,
}

impl Rendered {
    pub fn new(id: ElementId, notification: Notification, extent: f32, sticky: bool) -> Self {
        Self {
            id,
            notification,
            phase: Phase::Opening,
            extent,
            offset: 0.0,
            sticky,
            removing: false,
            created: None,
            time_left: None,
            pause_started: None,
            progress: 0,
            close_reason: None,
        }
    }

    /// Life consumed so far, not counting frozen intervals.
    pub fn elapsed(&self, now: Instant) -> Duration {
        let Some(created) = self.created else {
            return Duration::ZERO;
        };
        let until = self.pause_started.unwrap_or(now);
        until.saturating_duration_since(created)
    }

    pub fn freeze(&mut self, now: Instant, life: Duration) {
        if self.created.is_none() || self.pause_started.is_some() {
            return;
        }
        self.time_left = Some(life.saturating_sub(self.elapsed(now)));
        self.pause_started = Some(now);
    }

    pub fn thaw(&mut self, now: Instant) {
        let Some(started) = self.pause_started.take() else {
            return;
        };
        if let Some(created) = self.created.as_mut() {
            *created += now.saturating_duration_since(started);
        }
        self.time_left = None;
    }
}

/// Manages the mutable state of one notification instance
///
/// Holds the admission queue and the rendered sequence in visual order,
/// plus the aggregate height and instance flags.
#[derive(Debug)]
pub struct InstanceState {
    queue: VecDeque<Notification>,
    pub(crate) elements: Vec<Rendered>,
    retired: VecDeque<(ElementId, Phase)>,
    pub wrapper_height: f32,
    /// The last admission attempt did not fit.
    pub overflow: bool,
    pub paused: bool,
    pub disabled: bool,
    /// Pointer is over the surface with pause-on-hover enabled.
    pub suspended: bool,
    pool: u32,
}

impl InstanceState {
    pub fn new(pool: u32) -> Self {
        Self {
            queue: VecDeque::new(),
            elements: Vec::with_capacity(INITIAL_ELEMENTS_CAPACITY),
            retired: VecDeque::new(),
            wrapper_height: 0.0,
            overflow: false,
            paused: false,
            disabled: false,
            suspended: false,
            pool,
        }
    }

    pub fn queue(&self) -> &VecDeque<Notification> {
        &self.queue
    }

    pub fn elements(&self) -> &[Rendered] {
        &self.elements
    }

    pub fn enqueue(&mut self, notification: Notification) {
        self.queue.push_back(notification);
    }

    /// Put back a notification that did not fit so it is retried first.
    pub fn requeue_front(&mut self, notification: Notification) {
        self.queue.push_front(notification);
    }

    pub fn dequeue(&mut self) -> Option<Notification> {
        self.queue.pop_front()
    }

    pub fn clear_queue(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }

    pub fn pool(&self) -> u32 {
        self.pool
    }

    pub fn set_pool(&mut self, pool: u32) {
        self.pool = pool;
    }

    /// Whether the pool admits one more element.
    pub fn has_capacity(&self) -> bool {
        self.pool == 0 || self.elements.len() < self.pool as usize
    }

    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Rendered> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Rendered> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn clocks_frozen(&self) -> bool {
        self.paused || self.suspended
    }

    pub fn is_closing_any(&self) -> bool {
        self.elements.iter().any(|e| e.removing)
    }

    /// Remember the final phase of an element that left the sequence.
    ///
    /// Keeps the newest entries within [`RETIRED_HISTORY`].
    pub fn retire(&mut self, id: ElementId, phase: Phase) {
        debug_assert!(!phase.is_rendered(), "{id} retired while {phase}");
        self.retired.push_front((id, phase));
        self.retired.truncate(RETIRED_HISTORY);
    }

    pub fn phase_of(&self, id: ElementId) -> Option<Phase> {
        if let Some(element) = self.get(id) {
            return Some(element.phase);
        }
        self.retired
            .iter()
            .find(|(retired, _)| *retired == id)
            .map(|(_, phase)| *phase)
    }

    /// Drop everything, used on teardown.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.elements.clear();
        self.wrapper_height = 0.0;
        self.overflow = false;
    }
}

impl Default for InstanceState {
    fn default() -> Self {
        Self::new(0)
    }
}
