// Constants module for popstack
// Centralizes magic numbers shared by the engine and the headless renderer

use std::time::Duration;

// ============================================================================
// Engine Constants
// ============================================================================

/// Initial capacity for the rendered elements vector
pub(crate) const INITIAL_ELEMENTS_CAPACITY: usize = 16;

/// How many retired elements keep a queryable final phase
pub(crate) const RETIRED_HISTORY: usize = 64;

/// Quiet period after the last resize before overflow is re-checked
pub(crate) const RESIZE_SETTLE: Duration = Duration::from_millis(500);

// ============================================================================
// Channel and Buffer Constants
// ============================================================================

/// Buffer size for the driver command channel
pub(crate) const CHANNEL_BUFFER_SIZE: usize = 100;

// ============================================================================
// Headless Measurement Constants
// ============================================================================

/// Width of notification cards in pixels
pub(crate) const NOTIFICATION_WIDTH: f32 = 380.0;

/// Padding inside notification cards
pub(crate) const CARD_PADDING: f32 = 12.0;

/// Width taken by the type icon when icons are shown
pub(crate) const ICON_COLUMN_WIDTH: f32 = 40.0;

/// Line height of the title row
pub(crate) const TITLE_LINE_HEIGHT: f32 = 20.0;

/// Line height of the content rows
pub(crate) const BODY_LINE_HEIGHT: f32 = 18.0;

/// Average advance of one glyph
pub(crate) const GLYPH_WIDTH: f32 = 7.5;

/// Height of the progress strip
pub(crate) const PROGRESS_HEIGHT: f32 = 4.0;

/// Height of the closer button
pub(crate) const CLOSER_HEIGHT: f32 = 32.0;

/// Height of the panel header
pub(crate) const HEADER_HEIGHT: f32 = 40.0;

/// Viewport of the demo binary
pub(crate) const DEMO_VIEWPORT_HEIGHT: f32 = 720.0;
