// SPDX-License-Identifier: GPL-3.0-only

//! Layer-shell overlay for key previews.
//!
//! Previews are drawn on their own Wayland layer surface on the overlay layer
//! so they can extend above the keyboard surface. Surface commands are queued
//! as tasks while the popup runs; the application drains them with
//! [`LayerSurfaceOverlay::take_task`] from its `update` and renders the
//! surface with [`PreviewPopup::view`] when the compositor asks for
//! [`LayerSurfaceOverlay::surface_id`].
//!
//! ```rust,ignore
//! Message::KeyPressed(key, label, position) => {
//!     self.preview.show_text(&key, &label, position);
//!     return self.preview.overlay_mut().take_task();
//! }
//! Message::KeyReleased(_) => {
//!     self.preview.dismiss();
//!     return self.preview.overlay_mut().take_task();
//! }
//! ```
//!
//! Layer surfaces are positioned with margins from the top-left corner of the
//! output, so previews that would hang off the top or left edge are clamped to
//! the edge.

use cosmic::app::Task;
use cosmic::iced::window;
use cosmic::iced::Limits;
use cosmic::iced_runtime::platform_specific::wayland::layer_surface::{
    IcedMargin, IcedOutput, SctkLayerSurfaceSettings,
};
use cosmic::iced_winit::platform_specific::wayland::commands::layer_surface::{
    destroy_layer_surface, get_layer_surface, set_margin, set_size, Anchor,
    KeyboardInteractivity, Layer,
};
use cosmic::Element;

use crate::app_settings;
use crate::content::PreviewContent;
use crate::geometry::{Frame, Point, Size};
use crate::measure::ContentMeasure;
use crate::overlay::{AnimationStyle, Overlay, OverlayError, ParentView};
use crate::preview::PreviewPopup;
use crate::render::render_preview;
use crate::theme::DrawableState;

/// Overlay backed by a layer-shell surface.
pub struct LayerSurfaceOverlay<M> {
    /// Layer surface ID while visible.
    surface: Option<window::Id>,
    size: Size,
    /// Parent origin the surface was shown against.
    parent_origin: Point,
    /// Last sent output margins (left, top), for deduplication.
    last_margin: Option<(i32, i32)>,
    touchable: bool,
    animation: AnimationStyle,
    content: PreviewContent,
    content_visible: bool,
    background_state: DrawableState,
    tasks: Vec<Task<M>>,
}

impl<M> Default for LayerSurfaceOverlay<M> {
    fn default() -> Self {
        Self {
            surface: None,
            size: Size::default(),
            parent_origin: Point::default(),
            last_margin: None,
            touchable: true,
            animation: AnimationStyle::None,
            content: PreviewContent::Empty,
            content_visible: false,
            background_state: DrawableState::Empty,
            tasks: Vec::new(),
        }
    }
}

impl<M: Send + 'static> LayerSurfaceOverlay<M> {
    /// Creates an overlay with no surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// The layer surface ID while the preview is visible.
    pub fn surface_id(&self) -> Option<window::Id> {
        self.surface
    }

    /// Returns `true` if surface commands are waiting to be run.
    pub fn has_pending_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Drains the queued surface commands into a single task.
    pub fn take_task(&mut self) -> Task<M> {
        if self.tasks.is_empty() {
            return Task::none();
        }
        Task::batch(std::mem::take(&mut self.tasks))
    }

    /// Called when the compositor closed the surface on its own.
    pub fn surface_closed(&mut self, id: window::Id) {
        if self.surface == Some(id) {
            tracing::debug!("Preview surface closed externally: {:?}", id);
            self.surface = None;
            self.last_margin = None;
        }
    }

    pub fn animation(&self) -> AnimationStyle {
        self.animation
    }

    /// Output margins (left, top) for a popup at `position`.
    fn margins(&self, position: Point) -> (i32, i32) {
        let on_output = self.parent_origin.offset(position);
        (on_output.x.max(0), on_output.y.max(0))
    }

    fn surface_size(&self) -> (u32, u32) {
        (self.size.width.max(1) as u32, self.size.height.max(1) as u32)
    }
}

impl<M: Send + 'static> Overlay for LayerSurfaceOverlay<M> {
    fn is_showing(&self) -> bool {
        self.surface.is_some()
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn show_at(&mut self, parent: &ParentView, position: Point) -> Result<(), OverlayError> {
        if !parent.is_attached() {
            return Err(OverlayError::Detached);
        }

        self.parent_origin = parent.origin;
        let (left, top) = self.margins(position);
        let (width, height) = self.surface_size();
        let id = window::Id::unique();

        let settings = SctkLayerSurfaceSettings {
            id,
            layer: Layer::Overlay,
            keyboard_interactivity: KeyboardInteractivity::None,
            // An empty input region lets touches fall through to the keyboard.
            input_zone: if self.touchable { None } else { Some(Vec::new()) },
            anchor: Anchor::TOP | Anchor::LEFT,
            output: IcedOutput::Active,
            namespace: app_settings::PREVIEW_NAMESPACE.to_string(),
            margin: IcedMargin {
                top,
                right: 0,
                bottom: 0,
                left,
            },
            size: Some((Some(width), Some(height))),
            exclusive_zone: -1,
            size_limits: Limits::NONE,
        };

        tracing::debug!(
            "Creating preview surface {:?} at ({}, {}) {}x{} (animation: {})",
            id,
            left,
            top,
            width,
            height,
            self.animation.name().unwrap_or("none")
        );

        self.surface = Some(id);
        self.last_margin = Some((left, top));
        self.tasks.push(get_layer_surface(settings));
        Ok(())
    }

    fn update(&mut self, frame: Frame) {
        let Some(id) = self.surface else {
            return;
        };

        if self.size != frame.size {
            self.size = frame.size;
            let (width, height) = self.surface_size();
            self.tasks.push(set_size(id, Some(width), Some(height)));
        }

        let margin = self.margins(frame.origin);
        if self.last_margin != Some(margin) {
            self.last_margin = Some(margin);
            let (left, top) = margin;
            self.tasks.push(set_margin(id, top, 0, 0, left));
        }
    }

    fn dismiss(&mut self) {
        if let Some(id) = self.surface.take() {
            tracing::debug!("Destroying preview surface: {:?}", id);
            self.last_margin = None;
            self.tasks.push(destroy_layer_surface(id));
        }
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
        // The surface is redrawn from `view` after every update.
    }
}

impl<M: Send + 'static, Me: ContentMeasure> PreviewPopup<LayerSurfaceOverlay<M>, Me> {
    /// Renders the preview surface.
    pub fn view<'a>(&self) -> Element<'a, M>
    where
        M: 'a,
    {
        let overlay = self.overlay();
        let hidden = PreviewContent::Empty;
        let content = if overlay.content_visible {
            &overlay.content
        } else {
            &hidden
        };
        render_preview(content, overlay.size, self.theme(), overlay.background_state)
    }
}
