// SPDX-License-Identifier: GPL-3.0-only

//! What the preview bubble displays.

use crate::geometry::Size;
use crate::theme::{DrawableState, FontStyle, ThemeColor};

/// An icon shown in place of a glyph (shift, backspace, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewIcon {
    /// Freedesktop icon name.
    pub name: String,
    /// Intrinsic width in pixels.
    pub width: i32,
    /// Intrinsic height in pixels.
    pub height: i32,
    /// State the icon carries from the key that owns it. The preview keeps
    /// this state instead of resetting it.
    pub state: DrawableState,
}

impl PreviewIcon {
    /// Creates an icon with an empty drawable state.
    pub fn new(name: impl Into<String>, width: i32, height: i32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            state: DrawableState::Empty,
        }
    }

    /// Sets the drawable state.
    #[must_use]
    pub fn with_state(mut self, state: DrawableState) -> Self {
        self.state = state;
        self
    }

    /// Intrinsic size of the icon.
    pub fn intrinsic_size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Content currently assigned to the preview layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PreviewContent {
    /// Nothing assigned yet.
    #[default]
    Empty,
    /// A text glyph or label.
    Text {
        label: String,
        size: f32,
        color: ThemeColor,
        font: FontStyle,
    },
    /// An icon, with the text cleared.
    Icon(PreviewIcon),
}

impl PreviewContent {
    /// The text label, if this is text content.
    pub fn label(&self) -> Option<&str> {
        match self {
            PreviewContent::Text { label, .. } => Some(label),
            _ => None,
        }
    }

    /// The icon, if this is icon content.
    pub fn icon(&self) -> Option<&PreviewIcon> {
        match self {
            PreviewContent::Icon(icon) => Some(icon),
            _ => None,
        }
    }
}
