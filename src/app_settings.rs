// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Application ID in RDNN (reverse domain name notation) format.
pub const APP_ID: &str = "io.github.cosboard.KeyPreview";

/// Layer-shell namespace used for preview surfaces.
pub const PREVIEW_NAMESPACE: &str = "cosboard-key-preview";

/// Default key glyph text size in pixels.
pub const DEFAULT_KEY_TEXT_SIZE: f32 = 40.0;

/// Default text size in pixels for multi-character labels.
pub const DEFAULT_LABEL_TEXT_SIZE: f32 = 24.0;

/// Default padding in pixels of the preview content layout, applied on every side.
pub const DEFAULT_LAYOUT_PADDING: i32 = 4;

/// Name of the animation played when a preview appears.
pub const KEY_PREVIEW_ANIMATION: &str = "key-preview";
