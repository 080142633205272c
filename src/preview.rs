// SPDX-License-Identifier: GPL-3.0-only

//! The key preview popup.
//!
//! When a key is pressed the keyboard asks the popup to show a bubble with the
//! key's glyph (or icon) above the touch point. Every show call:
//!
//! 1. Measures the content and grows it to at least the key size.
//! 2. Adds the layout padding plus the background drawable padding.
//! 3. Grows the result to the background's minimum size.
//! 4. Centers the bubble horizontally on the touch point, resting on it.
//! 5. Moves a visible overlay in place, or sizes and shows a hidden one.
//!
//! # Usage
//!
//! ```rust,ignore
//! use keypreview::{PreviewPopup, PreviewKey, PreviewTheme, PreviewConfig};
//! use keypreview::overlay::{HeadlessOverlay, ParentView};
//! use keypreview::measure::GlyphMetricsMeasure;
//! use keypreview::geometry::Point;
//!
//! let mut popup = PreviewPopup::new(
//!     HeadlessOverlay::new(),
//!     GlyphMetricsMeasure::default(),
//!     ParentView::attached(Point::new(0, 720), "eDP-1"),
//!     PreviewTheme::default(),
//!     &PreviewConfig::default(),
//! );
//!
//! let key = PreviewKey::new(64, 80, 'q' as i32);
//! popup.show_text(&key, "q", Point::new(32, 0));
//! popup.dismiss();
//! ```

use crate::config::PreviewConfig;
use crate::content::{PreviewContent, PreviewIcon};
use crate::geometry::{Frame, Insets, Point, Size};
use crate::key::PreviewKey;
use crate::measure::ContentMeasure;
use crate::overlay::{Overlay, ParentView};
use crate::theme::{DrawableState, PreviewTheme};

/// Floating preview bubble for pressed keys.
///
/// `O` is the overlay surface the bubble is drawn into and `M` measures its
/// content. The popup is either hidden or visible, as reported by the overlay.
pub struct PreviewPopup<O: Overlay, M: ContentMeasure> {
    overlay: O,
    measure: M,
    parent: ParentView,
    theme: PreviewTheme,
    /// Padding of the content layout itself.
    layout_padding: Insets,
    /// Layout plus background padding, computed on the first show.
    total_padding: Option<Insets>,
    /// `false` when the theme or configuration turns previews off.
    enabled: bool,
}

impl<O: Overlay, M: ContentMeasure> PreviewPopup<O, M> {
    /// Creates a popup drawing into `overlay` above `parent`.
    ///
    /// The overlay is made non-touchable and gets the preview animation unless
    /// animations are disabled. A theme with a non-positive key text size, or a
    /// configuration with previews disabled, yields a popup whose show calls do
    /// nothing.
    pub fn new(
        mut overlay: O,
        measure: M,
        parent: ParentView,
        theme: PreviewTheme,
        config: &PreviewConfig,
    ) -> Self {
        let enabled = config.enabled && theme.previews_enabled();
        if !enabled {
            tracing::debug!(
                "Key previews disabled (config enabled: {}, key text size: {})",
                config.enabled,
                theme.key_text_size
            );
        }

        overlay.set_touchable(false);
        overlay.set_animation(config.animation_style());

        Self {
            overlay,
            measure,
            parent,
            theme,
            layout_padding: config.layout_insets(),
            total_padding: None,
            enabled,
        }
    }

    /// Returns `true` if show calls display anything.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` while the bubble is on screen.
    pub fn is_showing(&self) -> bool {
        self.overlay.is_showing()
    }

    /// The overlay the popup draws into.
    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Mutable access to the overlay, for draining queued surface commands.
    pub fn overlay_mut(&mut self) -> &mut O {
        &mut self.overlay
    }

    pub fn theme(&self) -> &PreviewTheme {
        &self.theme
    }

    /// Moves the popup to a different parent view. Takes effect on the next
    /// show of a hidden popup.
    pub fn set_parent(&mut self, parent: ParentView) {
        self.parent = parent;
    }

    /// Shows `label` for `key`, resting on `position` in parent coordinates.
    ///
    /// Multi-character labels on single-code keys ("shift", ".com") use the
    /// smaller label text size.
    pub fn show_text(&mut self, key: &PreviewKey, label: &str, position: Point) {
        if !self.enabled {
            tracing::trace!("Key previews disabled, not showing '{}'", label);
            return;
        }

        let size = if label.chars().count() > 1 && !key.is_multi_code() {
            self.theme.label_text_size
        } else {
            self.theme.key_text_size
        };

        let measured = self.measure.measure_text(label, size, self.theme.font);

        self.overlay.set_content(PreviewContent::Text {
            label: label.to_string(),
            size,
            color: self.theme.text_color,
            font: self.theme.font,
        });

        self.show_popup(key, measured.max(key.size()), position);
    }

    /// Shows `icon` for `key`, resting on `position` in parent coordinates.
    ///
    /// The icon keeps the drawable state it arrived with.
    pub fn show_icon(&mut self, key: &PreviewKey, icon: &PreviewIcon, position: Point) {
        if !self.enabled {
            tracing::trace!("Key previews disabled, not showing icon '{}'", icon.name);
            return;
        }

        let measured = self.measure.measure_icon(icon);

        self.overlay.set_content(PreviewContent::Icon(icon.clone()));

        self.show_popup(key, measured.max(key.size()), position);
    }

    /// Hides the bubble immediately.
    pub fn dismiss(&mut self) {
        self.overlay.dismiss();
    }

    /// Total padding around the content, computed once.
    fn padding(&mut self) -> Insets {
        if let Some(padding) = self.total_padding {
            return padding;
        }

        let mut padding = self.layout_padding;
        if let Some(background) = &self.theme.background {
            padding = padding + background.padding;
        }
        self.total_padding = Some(padding);
        padding
    }

    /// Frame of the bubble for `content` resting on `position`.
    fn frame_for(&mut self, content: Size, position: Point) -> Frame {
        let mut size = content.expand(self.padding());

        if let Some(background) = &self.theme.background {
            size = size.max(background.minimum_size());
        }

        Frame::above(position, size)
    }

    fn show_popup(&mut self, key: &PreviewKey, content: Size, position: Point) {
        let frame = self.frame_for(content, position);

        if self.overlay.is_showing() {
            self.overlay.update(frame);
        } else {
            self.overlay.set_size(frame.size);
            // Some compositors reject the first surface for a freshly mapped
            // parent. The next key press retries.
            if let Err(e) = self.overlay.show_at(&self.parent, frame.origin) {
                tracing::debug!("Ignoring key preview show failure: {}", e);
            }
        }

        tracing::debug!(
            "Key preview at ({}, {}) size {}x{}",
            frame.origin.x,
            frame.origin.y,
            frame.size.width,
            frame.size.height
        );

        self.overlay.set_content_visible(true);

        if self.theme.background.is_some() {
            self.overlay.set_background_state(if key.is_long_pressable() {
                DrawableState::LongPressable
            } else {
                DrawableState::Empty
            });
        }

        self.overlay.request_layout();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimationsLevel;
    use crate::overlay::{AnimationStyle, HeadlessOverlay, OverlayError};
    use crate::theme::{BackgroundDrawable, FontStyle, ThemeColor};

    /// Measures every glyph as 10x20 pixels and icons at their intrinsic size.
    struct FixedMeasure;

    impl ContentMeasure for FixedMeasure {
        fn measure_text(&self, text: &str, _size: f32, _font: FontStyle) -> Size {
            Size::new(10 * text.chars().count() as i32, 20)
        }

        fn measure_icon(&self, icon: &PreviewIcon) -> Size {
            icon.intrinsic_size()
        }
    }

    fn parent() -> ParentView {
        ParentView::attached(Point::new(0, 500), "eDP-1")
    }

    fn theme_without_background() -> PreviewTheme {
        PreviewTheme {
            key_text_size: 40.0,
            label_text_size: 24.0,
            text_color: ThemeColor::rgba(1, 2, 3, 255),
            font: FontStyle::Bold,
            background: None,
        }
    }

    fn theme_with_background() -> PreviewTheme {
        PreviewTheme {
            background: Some(BackgroundDrawable {
                padding: Insets::new(3, 2, 3, 6),
                min_width: 0,
                min_height: 0,
                corner_radius: 8.0,
                fill: ThemeColor::rgba(0, 0, 0, 255),
                long_press_border: None,
            }),
            ..theme_without_background()
        }
    }

    fn no_padding_config() -> PreviewConfig {
        PreviewConfig {
            layout_padding: 0,
            ..PreviewConfig::default()
        }
    }

    fn popup(theme: PreviewTheme, config: &PreviewConfig) -> PreviewPopup<HeadlessOverlay, FixedMeasure> {
        PreviewPopup::new(HeadlessOverlay::new(), FixedMeasure, parent(), theme, config)
    }

    /// Test: Construction configures the overlay.
    #[test]
    fn test_new_configures_overlay() {
        let popup = popup(theme_without_background(), &PreviewConfig::default());
        assert!(popup.is_enabled());
        assert!(!popup.is_showing());
        assert!(!popup.overlay().is_touchable());
        assert_eq!(popup.overlay().animation(), AnimationStyle::KeyPreview);

        let config = PreviewConfig {
            animations_level: AnimationsLevel::None,
            ..PreviewConfig::default()
        };
        let popup = self::popup(theme_without_background(), &config);
        assert_eq!(popup.overlay().animation(), AnimationStyle::None);
    }

    /// Test: Small glyphs are sized to the key and centered above the touch point.
    #[test]
    fn test_show_text_uses_key_size_as_minimum() {
        let mut popup = popup(theme_without_background(), &no_padding_config());
        let key = PreviewKey::new(40, 60, 'a' as i32);

        popup.show_text(&key, "a", Point::new(100, 200));

        let overlay = popup.overlay();
        assert!(overlay.is_showing());
        assert_eq!(overlay.frame(), Frame::new(Point::new(80, 140), Size::new(40, 60)));
        assert!(overlay.is_content_visible());
        assert_eq!(overlay.layout_requests(), 1);

        match overlay.content() {
            PreviewContent::Text {
                label,
                size,
                color,
                font,
            } => {
                assert_eq!(label, "a");
                assert_eq!(*size, 40.0);
                assert_eq!(*color, ThemeColor::rgba(1, 2, 3, 255));
                assert_eq!(*font, FontStyle::Bold);
            }
            other => panic!("Expected text content, got {:?}", other),
        }
    }

    /// Test: Long content grows the bubble beyond the key.
    #[test]
    fn test_show_text_content_larger_than_key() {
        let mut popup = popup(theme_without_background(), &no_padding_config());
        let key = PreviewKey::new(20, 10, 'x' as i32).with_codes(vec![1, 2]);

        popup.show_text(&key, "abcdef", Point::new(100, 100));

        assert_eq!(popup.overlay().frame().size, Size::new(60, 20));
    }

    /// Test: Multi-character labels on single-code keys use the label size.
    #[test]
    fn test_label_text_size_selection() {
        let mut popup = popup(theme_without_background(), &no_padding_config());
        let single = PreviewKey::new(40, 60, 'a' as i32);
        let multi = PreviewKey::new(40, 60, 'a' as i32).with_codes(vec![1, 2, 3]);

        let size_of = |popup: &PreviewPopup<HeadlessOverlay, FixedMeasure>| match popup.overlay().content() {
            PreviewContent::Text { size, .. } => *size,
            other => panic!("Expected text content, got {:?}", other),
        };

        popup.show_text(&single, ".com", Point::new(0, 0));
        assert_eq!(size_of(&popup), 24.0);

        popup.show_text(&multi, "abc", Point::new(0, 0));
        assert_eq!(size_of(&popup), 40.0);

        let two_codes = PreviewKey::new(40, 60, 'a' as i32).with_codes(vec![1, 2]);
        popup.show_text(&two_codes, "ab", Point::new(0, 0));
        assert_eq!(size_of(&popup), 40.0, "Multi-code keys keep the key text size");

        popup.show_text(&single, "é", Point::new(0, 0));
        assert_eq!(size_of(&popup), 40.0, "One character counts by chars, not bytes");
    }

    /// Test: Layout and background padding add up, then minimums apply.
    #[test]
    fn test_padding_and_minimum_size() {
        let mut popup = popup(theme_with_background(), &PreviewConfig::default());
        let key = PreviewKey::new(40, 60, 'a' as i32);

        popup.show_text(&key, "a", Point::new(100, 200));

        // 40 + 2*4 layout + 3+3 background, 60 + 2*4 layout + 2+6 background
        assert_eq!(popup.overlay().frame().size, Size::new(54, 76));

        let mut theme = theme_with_background();
        if let Some(background) = theme.background.as_mut() {
            background.min_width = 90;
            background.min_height = 50;
        }
        let mut popup = self::popup(theme, &PreviewConfig::default());
        popup.show_text(&key, "a", Point::new(100, 200));

        let frame = popup.overlay().frame();
        assert_eq!(frame.size, Size::new(90, 76));
        assert_eq!(frame.origin, Point::new(55, 124));
    }

    /// Test: A visible popup is moved in place rather than shown again.
    #[test]
    fn test_visible_popup_updates_in_place() {
        let mut popup = popup(theme_without_background(), &no_padding_config());
        let key = PreviewKey::new(40, 60, 'a' as i32);

        popup.show_text(&key, "a", Point::new(100, 200));
        popup.show_text(&key, "b", Point::new(300, 200));

        let overlay = popup.overlay();
        assert_eq!(overlay.show_count(), 1);
        assert_eq!(overlay.update_count(), 1);
        assert_eq!(overlay.frame().origin, Point::new(280, 140));
        assert_eq!(overlay.content().label(), Some("b"));
    }

    /// Test: Dismiss hides the popup and the next show creates it again.
    #[test]
    fn test_dismiss_then_show_again() {
        let mut popup = popup(theme_without_background(), &no_padding_config());
        let key = PreviewKey::new(40, 60, 'a' as i32);

        popup.show_text(&key, "a", Point::new(100, 200));
        popup.dismiss();
        assert!(!popup.is_showing());

        popup.dismiss();
        assert!(!popup.is_showing());

        popup.show_text(&key, "a", Point::new(100, 200));
        assert!(popup.is_showing());
        assert_eq!(popup.overlay().show_count(), 2);
        assert_eq!(popup.overlay().update_count(), 0);
    }

    /// Test: A failing first show is swallowed and the next press retries.
    #[test]
    fn test_show_failure_is_ignored() {
        let mut overlay = HeadlessOverlay::new();
        overlay.fail_next_show(OverlayError::Rejected {
            reason: "compositor quirk".to_string(),
        });
        let mut popup = PreviewPopup::new(
            overlay,
            FixedMeasure,
            parent(),
            theme_without_background(),
            &no_padding_config(),
        );
        let key = PreviewKey::new(40, 60, 'a' as i32);

        popup.show_text(&key, "a", Point::new(100, 200));
        assert!(!popup.is_showing());

        popup.show_text(&key, "a", Point::new(100, 200));
        assert!(popup.is_showing());
    }

    /// Test: Detached parents never panic.
    #[test]
    fn test_detached_parent_is_ignored() {
        let mut popup = PreviewPopup::new(
            HeadlessOverlay::new(),
            FixedMeasure,
            ParentView::default(),
            theme_without_background(),
            &no_padding_config(),
        );
        let key = PreviewKey::new(40, 60, 'a' as i32);

        popup.show_text(&key, "a", Point::new(10, 10));
        assert!(!popup.is_showing());

        popup.set_parent(parent());
        popup.show_text(&key, "a", Point::new(10, 10));
        assert!(popup.is_showing());
    }

    /// Test: Icons are measured at their intrinsic size and keep their state.
    #[test]
    fn test_show_icon() {
        let mut popup = popup(theme_without_background(), &no_padding_config());
        let key = PreviewKey::new(40, 30, -1);
        let icon = PreviewIcon::new("keyboard-shift-symbolic", 32, 48)
            .with_state(DrawableState::LongPressable);

        popup.show_text(&key, "a", Point::new(0, 0));
        popup.show_icon(&key, &icon, Point::new(100, 100));

        let overlay = popup.overlay();
        assert_eq!(overlay.frame(), Frame::new(Point::new(80, 52), Size::new(40, 48)));
        assert_eq!(overlay.content().label(), None, "Icon previews clear the text");
        assert_eq!(overlay.content().icon(), Some(&icon));
    }

    /// Test: The background state follows the key's long-press popup.
    #[test]
    fn test_background_state_tracks_popup_layout() {
        let mut popup = popup(theme_with_background(), &PreviewConfig::default());
        let plain = PreviewKey::new(40, 60, 'a' as i32);
        let accented = PreviewKey::new(40, 60, 'e' as i32).with_popup_layout("accents_e");

        popup.show_text(&accented, "e", Point::new(100, 200));
        assert_eq!(popup.overlay().background_state(), DrawableState::LongPressable);

        popup.show_text(&plain, "a", Point::new(100, 200));
        assert_eq!(popup.overlay().background_state(), DrawableState::Empty);
    }

    /// Test: Disabled previews never touch the overlay.
    #[test]
    fn test_disabled_previews_are_noops() {
        let theme = PreviewTheme {
            key_text_size: 0.0,
            ..theme_without_background()
        };
        let mut popup = popup(theme, &PreviewConfig::default());
        let key = PreviewKey::new(40, 60, 'a' as i32);

        assert!(!popup.is_enabled());
        popup.show_text(&key, "a", Point::new(100, 200));
        popup.show_icon(&key, &PreviewIcon::new("x", 1, 1), Point::new(100, 200));
        assert!(!popup.is_showing());
        assert_eq!(popup.overlay().content(), &PreviewContent::Empty);

        let config = PreviewConfig {
            enabled: false,
            ..PreviewConfig::default()
        };
        let popup = self::popup(theme_without_background(), &config);
        assert!(!popup.is_enabled());
    }

    /// Test: Keys with absurd geometry never overflow the layout math.
    #[test]
    fn test_extreme_key_size_does_not_overflow() {
        let mut popup = popup(theme_with_background(), &PreviewConfig::default());
        let key = PreviewKey::new(i32::MAX, i32::MAX, 'a' as i32);

        popup.show_text(&key, "a", Point::new(0, 0));

        let frame = popup.overlay().frame();
        assert_eq!(frame.size, Size::new(i32::MAX, i32::MAX));
        assert_eq!(frame.origin.y, -i32::MAX);
    }
}
