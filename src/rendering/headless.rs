use crate::{
    constants::*,
    error::RenderError,
    renderer::{Animation, AnimationSpec, CloserView, ElementStyle, HeaderView, Renderer},
};
use popstack_config::Edge;
use popstack_util::{ElementId, Notification, has_rich_content, plain_text, sanitize_html};
use std::collections::HashMap;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, trace};

/// What the headless renderer knows about one element.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessElement {
    pub title: String,
    pub content: String,
    /// Cleaned markup, kept only when the content has tags to render.
    pub markup: Option<String>,
    pub classes: Vec<String>,
    pub extent: f32,
    pub edge: Edge,
    pub offset: f32,
    pub visible: bool,
    pub progress: Option<u8>,
}

/// A renderer without a display.
///
/// Measures notifications from their text, keeps layout in memory and logs
/// every change. Animations complete after their duration on the current
/// tokio runtime, or immediately when there is none.
#[derive(Debug)]
pub struct HeadlessRenderer {
    viewport: f32,
    distance: f32,
    completions: UnboundedSender<Animation>,
    elements: HashMap<ElementId, HeadlessElement>,
    surface_height: f32,
    closer: Option<CloserView>,
    header: Option<HeaderView>,
    released: bool,
}

impl HeadlessRenderer {
    /// A renderer and the receiver its animation completions arrive on.
    pub fn channel(viewport: f32) -> (Self, UnboundedReceiver<Animation>) {
        let (tx, rx) = unbounded_channel();
        let renderer = Self {
            viewport,
            distance: 0.0,
            completions: tx,
            elements: HashMap::new(),
            surface_height: 0.0,
            closer: None,
            header: None,
            released: false,
        };
        (renderer, rx)
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn set_viewport(&mut self, viewport: f32) {
        self.viewport = viewport;
    }

    pub fn element(&self, id: ElementId) -> Option<&HeadlessElement> {
        self.elements.get(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn height(&self) -> f32 {
        self.surface_height
    }

    pub fn closer(&self) -> Option<&CloserView> {
        self.closer.as_ref()
    }

    pub fn header(&self) -> Option<&HeaderView> {
        self.header.as_ref()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn live(&self) -> Result<(), RenderError> {
        if self.released {
            return Err(RenderError::Released);
        }
        Ok(())
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut HeadlessElement, RenderError> {
        self.live()?;
        self.elements.get_mut(&id).ok_or(RenderError::UnknownElement(id))
    }
}

/// Height of a card showing `title` and `content`.
pub fn measure(title: &str, content: &str, style: &ElementStyle) -> f32 {
    let mut width = NOTIFICATION_WIDTH - 2.0 * CARD_PADDING;
    if style.icon.is_some() {
        width -= ICON_COLUMN_WIDTH;
    }
    let per_line = ((width / GLYPH_WIDTH).floor() as usize).max(1);

    let lines = |text: &str| -> usize {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.chars().count().div_ceil(per_line))
            .sum()
    };

    let mut height = 2.0 * CARD_PADDING;
    height += lines(title) as f32 * TITLE_LINE_HEIGHT;
    height += lines(content) as f32 * BODY_LINE_HEIGHT;
    if style.progressbar {
        height += PROGRESS_HEIGHT;
    }
    height
}

impl Renderer for HeadlessRenderer {
    fn viewport_height(&self) -> f32 {
        self.viewport
    }

    fn surface_distance(&self) -> f32 {
        self.distance
    }

    fn closer_height(&self) -> f32 {
        CLOSER_HEIGHT
    }

    fn header_height(&self) -> f32 {
        HEADER_HEIGHT
    }

    fn create(&mut self, id: ElementId, notification: &Notification, style: &ElementStyle) -> Result<f32, RenderError> {
        self.live()?;
        let title = plain_text(&notification.title);
        let content = plain_text(&notification.content);
        let markup = has_rich_content(&notification.content).then(|| sanitize_html(&notification.content));
        let extent = measure(&title, &content, style);
        debug!("Created {} {:?} ({}px)", id, title, extent);

        self.elements.insert(
            id,
            HeadlessElement {
                title,
                content,
                markup,
                classes: style.classes.clone(),
                extent,
                edge: Edge::Top,
                offset: 0.0,
                visible: false,
                progress: style.progressbar.then_some(0),
            },
        );
        Ok(extent)
    }

    fn show(&mut self, id: ElementId) -> Result<(), RenderError> {
        self.element_mut(id)?.visible = true;
        Ok(())
    }

    fn set_offset(&mut self, id: ElementId, edge: Edge, offset: f32) -> Result<(), RenderError> {
        let element = self.element_mut(id)?;
        element.edge = edge;
        element.offset = offset;
        trace!("{} at {:?} {}px", id, edge, offset);
        Ok(())
    }

    fn set_progress(&mut self, id: ElementId, percent: u8) -> Result<(), RenderError> {
        self.element_mut(id)?.progress = Some(percent);
        Ok(())
    }

    fn animate(&mut self, animation: Animation, spec: &AnimationSpec) -> Result<(), RenderError> {
        self.live()?;
        trace!("Animating {:?} over {:?}", animation, spec.duration);

        let tx = self.completions.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let duration = spec.duration;
                handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    _ = tx.send(animation);
                });
            }
            Err(_) => {
                _ = tx.send(animation);
            }
        }
        Ok(())
    }

    fn remove(&mut self, id: ElementId) -> Result<(), RenderError> {
        self.live()?;
        self.elements
            .remove(&id)
            .map(|_| debug!("Removed {}", id))
            .ok_or(RenderError::UnknownElement(id))
    }

    fn set_surface_height(&mut self, height: f32) -> Result<(), RenderError> {
        self.live()?;
        self.surface_height = height;
        Ok(())
    }

    fn update_closer(&mut self, view: &CloserView) -> Result<(), RenderError> {
        self.live()?;
        self.closer = Some(view.clone());
        Ok(())
    }

    fn update_header(&mut self, view: &HeaderView) -> Result<(), RenderError> {
        self.live()?;
        self.header = Some(view.clone());
        Ok(())
    }

    fn release(&mut self) {
        self.elements.clear();
        self.released = true;
        debug!("Released headless surface");
    }
}
