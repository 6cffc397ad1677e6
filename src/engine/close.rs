use super::Popstack;
use crate::{
    error::RenderError,
    layout,
    lifecycle::{Phase, Trigger},
    renderer::{Animation, AnimationSpec, Direction, Renderer},
};
use popstack_config::Layout;
use popstack_util::{CloseReason, ElementId, Hook};
use tracing::{debug, trace};

impl<R: Renderer> Popstack<R> {
    /// Ask to close `id`. Returns whether the exit animation started.
    pub(crate) fn request_close(&mut self, id: ElementId, reason: CloseReason) -> Result<bool, RenderError> {
        let Some(element) = self.state.get(id) else {
            trace!("Close requested for unknown element {}", id);
            return Ok(false);
        };
        if element.removing {
            trace!("{} is already closing", id);
            return Ok(false);
        }
        let Some(next) = element.phase.on(Trigger::CloseRequested) else {
            return Ok(false);
        };
        if !self.dispatch(Hook::BeforeClose, &element.notification, Some(id), Some(reason)) {
            return Ok(false);
        }

        if let Some(element) = self.state.get_mut(id) {
            element.removing = true;
            element.phase = next;
            element.close_reason = Some(reason);
        }
        debug!("Closing {} ({:?})", id, reason);

        let spec = AnimationSpec::from_config(&self.config);
        self.render()?.animate(Animation::element(id, Direction::Out), &spec)?;
        Ok(true)
    }

    /// The exit animation of `id` finished: detach it and close the gap.
    pub(crate) fn finish_close(&mut self, id: ElementId) -> Result<(), RenderError> {
        let Some(index) = self.state.position(id) else {
            trace!("Exit animation finished for unknown element {}", id);
            return Ok(());
        };
        let Some(removed_phase) = self.state.elements[index].phase.on(Trigger::CloseFinished) else {
            return Ok(());
        };

        let gap = self.config.gap();
        let removed = self.state.elements.remove(index);
        let footprint = layout::footprint(removed.extent, gap);
        let changed = layout::close_gap(
            &mut self.state.elements,
            index,
            footprint,
            self.config.position.edge(),
        );
        self.state.wrapper_height = (self.state.wrapper_height - footprint).max(0.0);
        self.state.retire(id, removed_phase);

        self.push_offsets(&changed)?;
        self.sync_surface_height()?;

        if self.dispatch(Hook::Close, &removed.notification, Some(id), removed.close_reason) {
            self.render()?.remove(id)?;
        } else {
            debug!("{} left in place by close handler", id);
        }

        self.state.overflow = false;
        self.update_closer()?;
        if self.config.layout == Layout::Paneled {
            self.chrome.header_count = self.chrome.header_count.saturating_sub(1);
            self.update_header()?;
        }

        self.evict_if_overflowing()
    }

    /// Close the oldest element while the surface reaches past the viewport.
    ///
    /// One element is evicted at a time. Its close completion calls back here,
    /// so the loop ends once everything fits.
    pub(crate) fn evict_if_overflowing(&mut self) -> Result<(), RenderError> {
        let len = self.state.elements().len();
        if self.config.position.is_inline() || len <= 1 {
            return Ok(());
        }

        let renderer = self.render()?;
        let viewport = renderer.viewport_height();
        let distance = renderer.surface_distance();
        if !layout::must_evict(self.full_height(), distance, viewport) {
            return Ok(());
        }
        if self.state.is_closing_any() {
            trace!("Eviction deferred until the pending close finishes");
            return Ok(());
        }

        let Some(index) = layout::eviction_index(len, self.config.insert) else {
            return Ok(());
        };
        let id = self.state.elements[index].id;
        if self.state.elements[index].phase != Phase::Settled {
            trace!("Oldest element {} has not settled yet", id);
            return Ok(());
        }
        debug!("Evicting {} to make room", id);
        self.request_close(id, CloseReason::Evicted).map(|_| ())
    }
}
