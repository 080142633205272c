// SPDX-License-Identifier: GPL-3.0-only

//! Keypreview - Key preview popups for COSMIC soft keyboards
//!
//! When a key on the soft keyboard is pressed, a floating bubble shows the
//! key's glyph or icon above the touch point. This crate positions, sizes and
//! shows/dismisses that bubble; key hit testing and layouts stay with the
//! keyboard.
//!
//! # Modules
//!
//! - `preview`: The popup itself (`show_text`, `show_icon`, `dismiss`)
//! - `overlay`: The overlay surface seam and an in-memory implementation
//! - `layer_overlay`: Wayland layer-shell overlay surfaces
//! - `render`: Bubble rendering with libcosmic widgets
//! - `measure`: Unconstrained content measurement
//! - `theme`: Preview theme, background drawables and theme files
//! - `config`: User configuration with cosmic_config persistence
//! - `content`, `key`, `geometry`: Data passed between the above
//! - `app_settings`: Centralized application constants

pub mod app_settings;
pub mod config;
pub mod content;
pub mod geometry;
pub mod key;
pub mod layer_overlay;
pub mod measure;
pub mod overlay;
pub mod preview;
pub mod render;
pub mod theme;

pub use crate::config::PreviewConfig;
pub use crate::key::PreviewKey;
pub use crate::preview::PreviewPopup;
pub use crate::theme::PreviewTheme;

// ============================================================================
// Integration Tests
// ============================================================================
