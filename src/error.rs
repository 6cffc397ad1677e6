use popstack_util::ElementId;

/// Faults a [`Renderer`](crate::Renderer) can report.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unknown element {0}")]
    UnknownElement(ElementId),
    #[error("render surface already released")]
    Released,
    #[error("render backend failed: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A tick failed part way; the instance has been torn down.
    #[error("tick failed, instance destroyed: {0}")]
    Tick(#[source] RenderError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("driver channel closed")]
    ChannelClosed,
}
