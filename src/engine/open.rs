use super::Popstack;
use crate::{
    error::RenderError,
    layout,
    lifecycle::{Phase, Trigger},
    renderer::{Animation, AnimationSpec, Direction, ElementStyle, Renderer},
    state::Rendered,
};
use popstack_config::Insert;
use popstack_util::{ElementId, Hook, Notification};
use std::time::Instant;
use tracing::{debug, trace};

impl<R: Renderer> Popstack<R> {
    /// Take the next queued notification if the pool allows it.
    pub(crate) fn admit_next(&mut self) -> Result<(), RenderError> {
        let inline = self.config.position.is_inline();
        if (self.state.overflow && !inline) || self.state.queue().is_empty() {
            return Ok(());
        }
        if !self.state.has_capacity() {
            return Ok(());
        }
        let Some(notification) = self.state.dequeue() else {
            return Ok(());
        };
        self.open(notification)
    }

    /// Build and insert one element, or put the notification back.
    fn open(&mut self, notification: Notification) -> Result<(), RenderError> {
        let id = self.next_element_id();
        let Some(phase) = Phase::Queued.on(Trigger::Admit) else {
            return Ok(());
        };

        let sticky = notification.resolve_sticky(self.config.sticky);
        let style = ElementStyle {
            classes: self.classes.element(notification.kind),
            icon: self.config.icons.then(|| notification.kind.icon_name()),
            progressbar: self.config.progressbar && !sticky,
            sticky,
        };
        let extent = self.render()?.create(id, &notification, &style)?;

        if !self.dispatch(Hook::BeforeOpen, &notification, Some(id), None) {
            let halted = phase.on(Trigger::OpenVetoed).unwrap_or(Phase::Halted);
            debug!("Opening {} suppressed", id);
            self.render()?.remove(id)?;
            self.state.retire(id, halted);
            return Ok(());
        }

        let footprint = layout::footprint(extent, self.config.gap());
        let others = self.state.elements().len();
        self.state.wrapper_height += footprint;

        if others > 0 && !self.config.position.is_inline() {
            let renderer = self.render()?;
            let viewport = renderer.viewport_height();
            let distance = renderer.surface_distance();

            if layout::overflows(self.full_height(), distance, viewport) {
                self.state.overflow = true;

                if self.config.is_pooled() {
                    return self.revert_open(id, notification, footprint, phase);
                }
            }
        }

        let Some(phase) = phase.on(Trigger::Inserted) else {
            return Ok(());
        };
        let index = match self.config.insert {
            Insert::Tail => others,
            Insert::Head => 0,
        };
        let mut element = Rendered::new(id, notification, extent, sticky);
        element.phase = phase;
        self.state.elements.insert(index, element);

        let changed = layout::place_inserted(
            &mut self.state.elements,
            index,
            self.config.position.edge(),
            self.config.gap(),
        );
        self.push_offsets(&changed)?;
        self.render()?.show(id)?;
        self.open_panel()?;
        self.sync_surface_height()?;

        if let Some(element) = self.state.get(id) {
            self.dispatch(Hook::Open, &element.notification, Some(id), None);
        }

        debug!("Opening {} at index {}", id, index);
        let spec = AnimationSpec::from_config(&self.config);
        self.render()?.animate(Animation::element(id, Direction::In), &spec)
    }

    /// Undo an insertion that did not fit and retry it first next time.
    fn revert_open(
        &mut self,
        id: ElementId,
        notification: Notification,
        footprint: f32,
        phase: Phase,
    ) -> Result<(), RenderError> {
        let queued = phase.on(Trigger::Overflowed).unwrap_or(Phase::Queued);
        self.state.wrapper_height = (self.state.wrapper_height - footprint).max(0.0);
        self.state.requeue_front(notification);
        self.state.retire(id, queued);
        debug!("{} does not fit, back to the front of the queue", id);

        self.render()?.remove(id)?;
        self.update_closer()
    }

    /// The enter animation of `id` finished.
    pub(crate) fn finish_open(&mut self, id: ElementId, now: Instant) -> Result<(), RenderError> {
        let frozen = self.state.clocks_frozen();
        let life = self.config.life();
        let progressbar = self.config.progressbar;

        let Some(element) = self.state.get_mut(id) else {
            trace!("Enter animation finished for unknown element {}", id);
            return Ok(());
        };
        let Some(phase) = element.phase.on(Trigger::OpenFinished) else {
            return Ok(());
        };
        element.phase = phase;
        element.created = Some(now);
        element.progress = 0;
        if frozen {
            element.freeze(now, life);
        }
        let show_progress = progressbar && !element.sticky;

        if show_progress {
            self.render()?.set_progress(id, 0)?;
        }
        self.update_closer()?;
        self.evict_if_overflowing()?;

        if let Some(element) = self.state.get(id) {
            self.dispatch(Hook::AfterOpen, &element.notification, Some(id), None);
        }
        debug!("{} settled", id);
        Ok(())
    }
}
