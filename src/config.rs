// SPDX-License-Identifier: GPL-3.0-only

use cosmic::cosmic_config;
use cosmic::cosmic_config::{cosmic_config_derive::CosmicConfigEntry, CosmicConfigEntry};
use serde::{Deserialize, Serialize};

use crate::app_settings;
use crate::geometry::Insets;
use crate::overlay::AnimationStyle;

/// How much animation the keyboard plays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationsLevel {
    /// No animations at all.
    None,
    /// Only short feedback animations.
    Some,
    /// Every animation.
    #[default]
    Full,
}

/// User configuration for key previews that persists between runs.
#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq)]
#[version = 1]
pub struct PreviewConfig {
    /// Whether key previews are shown.
    pub enabled: bool,
    /// Animation level shared with the rest of the keyboard.
    pub animations_level: AnimationsLevel,
    /// Padding of the preview content layout on every side, in pixels.
    pub layout_padding: i32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            animations_level: AnimationsLevel::Full,
            layout_padding: app_settings::DEFAULT_LAYOUT_PADDING,
        }
    }
}

impl PreviewConfig {
    /// Loads the persisted configuration, falling back to defaults.
    pub fn load() -> Self {
        match cosmic_config::Config::new(app_settings::APP_ID, Self::VERSION) {
            Ok(config) => {
                let entry = Self::get_entry(&config).unwrap_or_else(|(errors, def)| {
                    for err in errors {
                        tracing::debug!("Preview config entry error: {:?}", err);
                    }
                    def
                });
                tracing::info!("Loaded preview config: {:?}", entry);
                entry
            }
            Err(e) => {
                tracing::warn!("Failed to open preview config: {}", e);
                Self::default()
            }
        }
    }

    /// Animation to use for the preview overlay.
    pub fn animation_style(&self) -> AnimationStyle {
        match self.animations_level {
            AnimationsLevel::None => AnimationStyle::None,
            AnimationsLevel::Some | AnimationsLevel::Full => AnimationStyle::KeyPreview,
        }
    }

    /// Padding of the content layout, never negative.
    pub fn layout_insets(&self) -> Insets {
        Insets::uniform(self.layout_padding.max(0))
    }
}
