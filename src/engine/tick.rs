use super::Popstack;
use crate::{
    constants::RESIZE_SETTLE,
    error::{EngineError, RenderError},
    layout,
    lifecycle::Phase,
    renderer::Renderer,
};
use popstack_util::{CloseReason, ElementId};
use std::time::{Duration, Instant};
use tracing::{error, trace};

impl<R: Renderer> Popstack<R> {
    /// Run one scheduler step.
    ///
    /// A renderer fault part way through leaves the instance inconsistent, so
    /// it is destroyed before the error is returned.
    pub fn tick(&mut self, now: Instant) -> Result<(), EngineError> {
        if self.is_destroyed() {
            return Ok(());
        }

        match self.run_tick(now) {
            Ok(()) => Ok(()),
            Err(err) => {
                error!("Tick failed on {}, tearing down: {}", self.surface_id, err);
                self.destroy();
                Err(EngineError::Tick(err))
            }
        }
    }

    fn run_tick(&mut self, now: Instant) -> Result<(), RenderError> {
        self.recheck_after_resize(now)?;

        if self.state.paused {
            trace!("Tick skipped while paused");
            return Ok(());
        }

        self.expire(now)?;
        self.advance_progress(now)?;
        self.toggle_closer()?;
        self.admit_next()
    }

    fn recheck_after_resize(&mut self, now: Instant) -> Result<(), RenderError> {
        let Some(at) = self.pending_resize else {
            return Ok(());
        };
        if now.saturating_duration_since(at) < RESIZE_SETTLE {
            return Ok(());
        }
        self.pending_resize = None;
        self.state.overflow = false;
        self.state.wrapper_height = layout::aggregate_extent(self.state.elements(), self.config.gap());
        self.evict_if_overflowing()
    }

    fn expire(&mut self, now: Instant) -> Result<(), RenderError> {
        if self.state.suspended {
            return Ok(());
        }
        let life = self.config.life();
        let expired: Vec<ElementId> = self
            .state
            .elements()
            .iter()
            .filter(|e| e.phase == Phase::Settled && !e.sticky && e.pause_started.is_none())
            .filter(|e| e.elapsed(now) > life)
            .map(|e| e.id)
            .collect();

        for id in expired {
            self.request_close(id, CloseReason::Expired)?;
        }
        Ok(())
    }

    fn advance_progress(&mut self, now: Instant) -> Result<(), RenderError> {
        if !self.config.progressbar {
            return Ok(());
        }
        let life = self.config.life();
        let mut updates = Vec::new();

        for element in self.state.elements.iter_mut() {
            if element.phase != Phase::Settled || element.sticky {
                continue;
            }
            let percent = progress_percent(element.elapsed(now), life);
            if percent != element.progress {
                element.progress = percent;
                updates.push((element.id, percent));
            }
        }

        let renderer = self.render()?;
        for (id, percent) in updates {
            renderer.set_progress(id, percent)?;
        }
        Ok(())
    }
}

/// Share of `life` consumed, in whole percent.
pub(crate) fn progress_percent(elapsed: Duration, life: Duration) -> u8 {
    if life.is_zero() {
        return 100;
    }
    let percent = elapsed.as_millis().saturating_mul(100) / life.as_millis();
    percent.min(100) as u8
}
