use super::Popstack;
use crate::{
    error::RenderError,
    renderer::{Animation, AnimationSpec, CloserView, Direction, HeaderView, Renderer},
};
use popstack_config::{Layout, PopstackConfig};
use tracing::debug;

/// Visibility of the close-all button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloserPhase {
    Hidden,
    Showing,
    Shown,
    Hiding,
}

/// Surface parts that are not notifications: closer and panel header.
#[derive(Debug)]
pub(crate) struct Chrome {
    pub closer: CloserPhase,
    pub closer_height: f32,
    pub closer_text: String,
    pub closer_count: Option<usize>,
    pub header_height: f32,
    pub header_count: usize,
    pub panel_open: bool,
    pub minimize_visible: bool,
    /// Empty panel collapsed to nothing.
    pub collapsed: bool,
}

impl Chrome {
    pub fn measure<R: Renderer>(config: &PopstackConfig, renderer: &R) -> Self {
        let paneled = config.layout == Layout::Paneled;
        Self {
            closer: CloserPhase::Hidden,
            closer_height: if config.closer {
                renderer.closer_height() + config.gap()
            } else {
                0.0
            },
            closer_text: config.close_text.clone(),
            closer_count: None,
            header_height: if paneled { renderer.header_height() } else { 0.0 },
            header_count: 0,
            panel_open: false,
            minimize_visible: false,
            collapsed: paneled && config.hide_empty,
        }
    }

    /// Height the chrome adds on top of the notifications.
    pub fn extent(&self) -> f32 {
        let closer = match self.closer {
            CloserPhase::Hidden => 0.0,
            _ => self.closer_height,
        };
        closer + self.header_height
    }
}

impl<R: Renderer> Popstack<R> {
    /// Everything the surface holds, whether or not the panel is collapsed.
    pub(crate) fn full_height(&self) -> f32 {
        self.state.wrapper_height + self.chrome.extent()
    }

    /// Height the surface is drawn at.
    pub fn surface_height(&self) -> f32 {
        if self.config.layout == Layout::Stacked {
            return self.full_height();
        }
        if self.chrome.collapsed {
            0.0
        } else if !self.chrome.panel_open {
            self.chrome.header_height
        } else {
            self.full_height()
        }
    }

    pub(crate) fn sync_surface_height(&mut self) -> Result<(), RenderError> {
        let height = self.surface_height();
        self.render()?.set_surface_height(height)
    }

    /// Refresh the closer label from the queue and overflow state.
    pub(crate) fn update_closer(&mut self) -> Result<(), RenderError> {
        if !self.config.closer {
            return Ok(());
        }

        let queued = self.state.queue().len();
        let pool = self.state.pool() as usize;
        let pool_exceeded = pool > 0 && self.state.elements().len() == pool && queued > 0;

        if (pool_exceeded || self.state.overflow) && queued > 0 {
            self.chrome.closer_text = self.config.load_more_text.clone();
            self.chrome.closer_count = Some(queued);
        } else if queued == 0 {
            self.chrome.closer_text = self.config.close_text.clone();
            self.chrome.closer_count = None;
        }

        let view = CloserView {
            visible: self.chrome.closer != CloserPhase::Hidden,
            text: self.chrome.closer_text.clone(),
            count: self.chrome.closer_count,
        };
        self.render()?.update_closer(&view)
    }

    pub(crate) fn update_header(&mut self) -> Result<(), RenderError> {
        if self.config.layout != Layout::Paneled {
            return Ok(());
        }
        let view = HeaderView {
            title: self.config.header_text.clone(),
            count: self.chrome.header_count,
            minimize_visible: self.chrome.minimize_visible,
            open: self.chrome.panel_open,
        };
        self.render()?.update_header(&view)
    }

    /// A notification became visible in paneled layout.
    pub(crate) fn open_panel(&mut self) -> Result<(), RenderError> {
        if self.config.layout != Layout::Paneled {
            return Ok(());
        }
        self.chrome.minimize_visible = true;
        self.chrome.panel_open = true;
        self.chrome.collapsed = false;
        self.update_header()
    }

    /// Show or hide the closer depending on what is rendered and queued.
    pub(crate) fn toggle_closer(&mut self) -> Result<(), RenderError> {
        let rendered = self.state.elements().len();
        let queued = self.state.queue().len();

        if !self.config.closer {
            if rendered == 0 && queued == 0 && self.chrome.minimize_visible {
                return self.panel_emptied();
            }
            return Ok(());
        }

        match self.chrome.closer {
            CloserPhase::Hidden if rendered > 0 => {
                debug!("Showing closer on {}", self.surface_id);
                self.chrome.closer = CloserPhase::Showing;
                self.update_closer()?;
                self.sync_surface_height()?;
                let spec = AnimationSpec::from_config(&self.config);
                self.render()?.animate(Animation::closer(Direction::In), &spec)
            }
            CloserPhase::Showing | CloserPhase::Shown if rendered == 0 && queued == 0 => {
                debug!("Hiding closer on {}", self.surface_id);
                self.chrome.closer = CloserPhase::Hiding;
                let spec = AnimationSpec::from_config(&self.config);
                self.render()?.animate(Animation::closer(Direction::Out), &spec)
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn closer_shown(&mut self) {
        if self.chrome.closer == CloserPhase::Showing {
            self.chrome.closer = CloserPhase::Shown;
        }
    }

    pub(crate) fn closer_hidden(&mut self) -> Result<(), RenderError> {
        if self.chrome.closer != CloserPhase::Hiding {
            tracing::trace!("Stale closer exit animation");
            return Ok(());
        }
        self.chrome.closer = CloserPhase::Hidden;
        self.update_closer()?;
        if self.config.layout == Layout::Paneled {
            return self.panel_emptied();
        }
        self.sync_surface_height()
    }

    fn panel_emptied(&mut self) -> Result<(), RenderError> {
        self.chrome.minimize_visible = false;
        if self.config.hide_empty {
            self.chrome.collapsed = true;
        }
        self.update_header()?;
        self.sync_surface_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sizes;

    impl Renderer for Sizes {
        fn viewport_height(&self) -> f32 {
            600.0
        }
        fn surface_distance(&self) -> f32 {
            0.0
        }
        fn closer_height(&self) -> f32 {
            30.0
        }
        fn header_height(&self) -> f32 {
            40.0
        }
        fn create(
            &mut self,
            _: popstack_util::ElementId,
            _: &popstack_util::Notification,
            _: &crate::renderer::ElementStyle,
        ) -> Result<f32, RenderError> {
            Ok(0.0)
        }
        fn show(&mut self, _: popstack_util::ElementId) -> Result<(), RenderError> {
            Ok(())
        }
        fn set_offset(
            &mut self,
            _: popstack_util::ElementId,
            _: popstack_config::Edge,
            _: f32,
        ) -> Result<(), RenderError> {
            Ok(())
        }
        fn set_progress(&mut self, _: popstack_util::ElementId, _: u8) -> Result<(), RenderError> {
            Ok(())
        }
        fn animate(&mut self, _: Animation, _: &AnimationSpec) -> Result<(), RenderError> {
            Ok(())
        }
        fn remove(&mut self, _: popstack_util::ElementId) -> Result<(), RenderError> {
            Ok(())
        }
        fn set_surface_height(&mut self, _: f32) -> Result<(), RenderError> {
            Ok(())
        }
        fn update_closer(&mut self, _: &CloserView) -> Result<(), RenderError> {
            Ok(())
        }
        fn update_header(&mut self, _: &HeaderView) -> Result<(), RenderError> {
            Ok(())
        }
        fn release(&mut self) {}
    }

    #[test]
    fn test_stacked_closer_includes_spacing() {
        let chrome = Chrome::measure(&PopstackConfig::default(), &Sizes);
        assert_eq!(chrome.closer_height, 40.0);
        assert_eq!(chrome.header_height, 0.0);
        assert_eq!(chrome.extent(), 0.0, "hidden closer takes no space");
    }

    #[test]
    fn test_paneled_chrome() {
        let config = PopstackConfig {
            layout: Layout::Paneled,
            hide_empty: true,
            ..Default::default()
        };
        let mut chrome = Chrome::measure(&config, &Sizes);
        assert_eq!(chrome.closer_height, 30.0);
        assert!(chrome.collapsed);

        chrome.closer = CloserPhase::Shown;
        assert_eq!(chrome.extent(), 70.0);
    }

    #[test]
    fn test_no_closer() {
        let config = PopstackConfig {
            closer: false,
            ..Default::default()
        };
        let mut chrome = Chrome::measure(&config, &Sizes);
        chrome.closer = CloserPhase::Shown;
        assert_eq!(chrome.extent(), 0.0);
    }
}
