// SPDX-License-Identifier: GPL-3.0-only

//! The overlay surface a preview is drawn into.
//!
//! [`Overlay`] is the seam between the popup logic and the windowing system.
//! Overlays track their own visibility; the popup has no state machine beyond
//! asking [`Overlay::is_showing`].
//!
//! Two implementations ship with the crate:
//!
//! - [`HeadlessOverlay`]: keeps everything in memory. Used for tests and the
//!   demo binary.
//! - [`crate::layer_overlay::LayerSurfaceOverlay`]: a Wayland layer-shell
//!   surface on the overlay layer.

use std::fmt;

use crate::app_settings;
use crate::content::PreviewContent;
use crate::geometry::{Frame, Point, Size};
use crate::theme::DrawableState;

/// The view a preview is positioned against.
///
/// Popup positions are relative to the parent's top-left corner; `origin` is
/// that corner in output coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParentView {
    /// Top-left corner of the parent in output coordinates.
    pub origin: Point,
    /// Name of the output the parent is on. `None` while the parent is not
    /// attached to any output.
    pub output: Option<String>,
}

impl ParentView {
    /// A parent attached to `output` at `origin`.
    pub fn attached(origin: Point, output: impl Into<String>) -> Self {
        Self {
            origin,
            output: Some(output.into()),
        }
    }

    /// Returns `true` if the parent is on an output.
    pub fn is_attached(&self) -> bool {
        self.output.is_some()
    }
}

/// Animation played when the overlay appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationStyle {
    /// Appear and disappear instantly.
    #[default]
    None,
    /// The key preview pop-in animation.
    KeyPreview,
}

impl AnimationStyle {
    /// Name of the animation, or `None` when nothing is played.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            AnimationStyle::None => None,
            AnimationStyle::KeyPreview => Some(app_settings::KEY_PREVIEW_ANIMATION),
        }
    }
}

/// Failure to display an overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    /// The parent view is not attached to an output.
    Detached,
    /// The windowing system refused the surface.
    Rejected {
        /// Description from the windowing system.
        reason: String,
    },
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::Detached => write!(f, "parent view is not attached to an output"),
            OverlayError::Rejected { reason } => write!(f, "overlay surface rejected: {}", reason),
        }
    }
}

impl std::error::Error for OverlayError {}

/// A floating surface that can be shown above a parent view.
pub trait Overlay {
    /// Returns `true` while the overlay is visible.
    fn is_showing(&self) -> bool;

    /// Sets the size used by the next [`Overlay::show_at`].
    fn set_size(&mut self, size: Size);

    /// Shows the overlay at `position` relative to `parent`.
    fn show_at(&mut self, parent: &ParentView, position: Point) -> Result<(), OverlayError>;

    /// Moves and resizes a visible overlay in place.
    fn update(&mut self, frame: Frame);

    /// Hides the overlay. Does nothing if it is hidden.
    fn dismiss(&mut self);

    /// Whether the overlay accepts pointer and touch input.
    fn set_touchable(&mut self, touchable: bool);

    /// Animation used when the overlay appears.
    fn set_animation(&mut self, animation: AnimationStyle);

    /// Replaces the displayed content.
    fn set_content(&mut self, content: PreviewContent);

    /// Shows or hides the content layout inside the overlay.
    fn set_content_visible(&mut self, visible: bool);

    /// Applies a state to the background drawable.
    fn set_background_state(&mut self, state: DrawableState);

    /// Asks for the content to be laid out and redrawn.
    fn request_layout(&mut self);
}

/// An overlay that lives entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct HeadlessOverlay {
    showing: bool,
    size: Size,
    position: Point,
    touchable: bool,
    animation: AnimationStyle,
    content: PreviewContent,
    content_visible: bool,
    background_state: DrawableState,
    fail_next_show: Option<OverlayError>,
    show_count: usize,
    update_count: usize,
    layout_requests: usize,
}

impl HeadlessOverlay {
    /// Creates a hidden overlay.
    pub fn new() -> Self {
        Self {
            touchable: true,
            ..Self::default()
        }
    }

    /// Makes the next [`Overlay::show_at`] fail with `error`.
    pub fn fail_next_show(&mut self, error: OverlayError) {
        self.fail_next_show = Some(error);
    }

    /// Current frame, relative to the parent view.
    pub fn frame(&self) -> Frame {
        Frame::new(self.position, self.size)
    }

    pub fn is_touchable(&self) -> bool {
        self.touchable
    }

    pub fn animation(&self) -> AnimationStyle {
        self.animation
    }

    pub fn content(&self) -> &PreviewContent {
        &self.content
    }

    pub fn is_content_visible(&self) -> bool {
        self.content_visible
    }

    pub fn background_state(&self) -> DrawableState {
        self.background_state
    }

    /// Number of successful shows.
    pub fn show_count(&self) -> usize {
        self.show_count
    }

    /// Number of in-place updates.
    pub fn update_count(&self) -> usize {
        self.update_count
    }

    pub fn layout_requests(&self) -> usize {
        self.layout_requests
    }
}

impl Overlay for HeadlessOverlay {
    fn is_showing(&self) -> bool {
        self.showing
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn show_at(&mut self, parent: &ParentView, position: Point) -> Result<(), OverlayError> {
        if let Some(error) = self.fail_next_show.take() {
            return Err(error);
        }
        if !parent.is_attached() {
            return Err(OverlayError::Detached);
        }
        self.position = position;
        self.showing = true;
        self.show_count += 1;
        Ok(())
    }

    fn update(&mut self, frame: Frame) {
        if !self.showing {
            return;
        }
        self.position = frame.origin;
        self.size = frame.size;
        self.update_count += 1;
    }

    fn dismiss(&mut self) {
        self.showing = false;
    }

    fn set_touchable(&mut self, touchable: bool) {
        self.touchable = touchable;
    }

    fn set_animation(&mut self, animation: AnimationStyle) {
        self.animation = animation;
    }

    fn set_content(&mut self, content: PreviewContent) {
        self.content = content;
    }

    fn set_content_visible(&mut self, visible: bool) {
        self.content_visible = visible;
    }

    fn set_background_state(&mut self, state: DrawableState) {
        self.background_state = state;
    }

    fn request_layout(&mut self) {
        self.layout_requests += 1;
    }
}
