// SPDX-License-Identifier: GPL-3.0-only

//! Bubble rendering with libcosmic widgets.
//!
//! Overlays backed by a real surface draw the preview with
//! [`render_preview`]: a fixed-size container holding either the glyph text
//! or a named icon, on the theme's background drawable.

use cosmic::iced::{alignment, Length};
use cosmic::widget::{self, container, icon};
use cosmic::Element;

use crate::content::{PreviewContent, PreviewIcon};
use crate::geometry::Size;
use crate::theme::{DrawableState, PreviewTheme, ThemeColor};

/// Border width drawn around long-pressable previews.
const LONG_PRESS_BORDER_WIDTH: f32 = 2.0;

/// Renders the preview bubble.
///
/// # Arguments
///
/// * `content` - Glyph or icon to show
/// * `size` - Bubble size in pixels, as computed by the popup
/// * `theme` - Preview theme supplying colors and background
/// * `state` - Current background drawable state
pub fn render_preview<'a, M: 'a>(
    content: &PreviewContent,
    size: Size,
    theme: &PreviewTheme,
    state: DrawableState,
) -> Element<'a, M> {
    let inner: Element<'a, M> = match content {
        PreviewContent::Empty => widget::text::body("").into(),
        PreviewContent::Text {
            label,
            size: text_size,
            font,
            ..
        } => widget::text::body(label.clone())
            .size(*text_size)
            .font(font.to_font())
            .into(),
        PreviewContent::Icon(preview_icon) => {
            let edge = preview_icon.width.max(preview_icon.height).clamp(1, i32::from(u16::MAX));
            icon::from_name(preview_icon.name.clone())
                .size(edge as u16)
                .symbolic(true)
                .into()
        }
    };

    let text_color = match content {
        PreviewContent::Text { color, .. } => cosmic::iced::Color::from(*color),
        PreviewContent::Icon(preview_icon) => cosmic::iced::Color::from(icon_color(preview_icon, theme)),
        PreviewContent::Empty => cosmic::iced::Color::from(theme.text_color),
    };

    let (background, border) = match &theme.background {
        Some(drawable) => {
            let (border_color, border_width) = match (state, drawable.long_press_border) {
                (DrawableState::LongPressable, Some(color)) => {
                    (cosmic::iced::Color::from(color), LONG_PRESS_BORDER_WIDTH)
                }
                _ => (cosmic::iced::Color::TRANSPARENT, 0.0),
            };
            (
                Some(cosmic::iced::Background::Color(drawable.fill.into())),
                cosmic::iced::Border {
                    color: border_color,
                    width: border_width,
                    radius: drawable.corner_radius.into(),
                },
            )
        }
        None => (None, cosmic::iced::Border::default()),
    };

    container(inner)
        .width(Length::Fixed(size.width.max(0) as f32))
        .height(Length::Fixed(size.height.max(0) as f32))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .class(cosmic::style::Container::custom(move |_theme| {
            container::Style {
                background,
                border,
                icon_color: Some(text_color),
                text_color: Some(text_color),
                shadow: cosmic::iced::Shadow::default(),
            }
        }))
        .into()
}

/// Color of a symbolic icon in its own drawable state.
///
/// Long-pressable icons take the background's long-press border color when
/// the theme has one; everything else uses the text color.
pub fn icon_color(icon: &PreviewIcon, theme: &PreviewTheme) -> ThemeColor {
    let long_press = theme
        .background
        .as_ref()
        .and_then(|background| background.long_press_border);

    match (icon.state, long_press) {
        (DrawableState::LongPressable, Some(color)) => color,
        _ => theme.text_color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::FontStyle;

    /// Test: Text previews render without panicking.
    #[test]
    fn test_render_text_preview() {
        let theme = PreviewTheme::from_cosmic(&cosmic::Theme::dark());
        let content = PreviewContent::Text {
            label: "q".to_string(),
            size: theme.key_text_size,
            color: theme.text_color,
            font: FontStyle::Normal,
        };

        let _element: Element<'_, ()> =
            render_preview(&content, Size::new(60, 80), &theme, DrawableState::Empty);
    }

    /// Test: Icon previews on long-pressable keys render without panicking.
    #[test]
    fn test_render_icon_preview() {
        let theme = PreviewTheme::from_cosmic(&cosmic::Theme::light());
        let content = PreviewContent::Icon(PreviewIcon::new("keyboard-shift-symbolic", 24, 24));

        let _element: Element<'_, ()> = render_preview(
            &content,
            Size::new(60, 80),
            &theme,
            DrawableState::LongPressable,
        );
    }

    /// Test: Themes without a background and empty content still render.
    #[test]
    fn test_render_without_background() {
        let theme = PreviewTheme {
            text_color: ThemeColor::rgba(0, 0, 0, 255),
            ..PreviewTheme::default()
        };

        let _element: Element<'_, ()> =
            render_preview(&PreviewContent::Empty, Size::new(-5, 10), &theme, DrawableState::Empty);
    }

    /// Test: The icon's own drawable state picks its color.
    #[test]
    fn test_icon_color_follows_icon_state() {
        let theme = PreviewTheme::from_cosmic(&cosmic::Theme::dark());
        let border = theme
            .background
            .as_ref()
            .and_then(|background| background.long_press_border)
            .unwrap();
        let plain = PreviewIcon::new("keyboard-shift-symbolic", 24, 24);
        let pressable = plain.clone().with_state(DrawableState::LongPressable);

        assert_eq!(icon_color(&plain, &theme), theme.text_color);
        assert_eq!(icon_color(&pressable, &theme), border);
        assert_ne!(icon_color(&plain, &theme), icon_color(&pressable, &theme));

        let _element: Element<'_, ()> = render_preview(
            &PreviewContent::Icon(pressable.clone()),
            Size::new(60, 80),
            &theme,
            DrawableState::Empty,
        );

        // Without a long-press color the state has nothing to change
        let bare = PreviewTheme::default();
        assert_eq!(icon_color(&pressable, &bare), bare.text_color);
    }
}
