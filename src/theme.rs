// SPDX-License-Identifier: GPL-3.0-only

//! Visual parameters for the key preview bubble.
//!
//! A [`PreviewTheme`] is an opaque input to the popup: text sizes, text color,
//! font style and an optional background drawable. Themes come from one of
//! two places:
//!
//! - [`PreviewTheme::from_cosmic`] derives one from the current COSMIC theme
//!   so the bubble matches the desktop.
//! - [`load_theme_file`] / [`parse_theme`] read a JSON theme definition.
//!
//! # JSON format
//!
//! ```json
//! {
//!     "key_text_size": 40.0,
//!     "label_text_size": 24.0,
//!     "text_color": "#ffffffff",
//!     "font": "bold",
//!     "background": {
//!         "padding": { "left": 6, "top": 4, "right": 6, "bottom": 8 },
//!         "min_width": 48,
//!         "min_height": 64,
//!         "fill": "#303030f2",
//!         "long_press_border": "#63d0dfff"
//!     }
//! }
//! ```

use std::fmt;
use std::fs;

use cosmic::iced::Color;
use cosmic::Theme;
use serde::{Deserialize, Serialize};

use crate::app_settings;
use crate::geometry::{Insets, Size};

/// Corner radius of the default bubble background.
const DEFAULT_CORNER_RADIUS: f32 = 8.0;

// ============================================================================
// Colors and fonts
// ============================================================================

/// An 8-bit RGBA color, serialized as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThemeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ThemeColor {
    /// Creates a color from its components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();

        match digits.len() {
            6 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, 0xff)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl TryFrom<String> for ThemeColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color '{}'", value))
    }
}

impl From<ThemeColor> for String {
    fn from(color: ThemeColor) -> Self {
        color.to_string()
    }
}

impl From<ThemeColor> for Color {
    fn from(color: ThemeColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, f32::from(color.a) / 255.0)
    }
}

impl From<Color> for ThemeColor {
    fn from(color: Color) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgba(
            channel(color.r),
            channel(color.g),
            channel(color.b),
            channel(color.a),
        )
    }
}

/// Font style of the preview glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    /// The iced font for this style, on the default family.
    pub fn to_font(self) -> cosmic::iced::Font {
        use cosmic::iced::font::{Style, Weight};

        let (weight, style) = match self {
            FontStyle::Normal => (Weight::Normal, Style::Normal),
            FontStyle::Bold => (Weight::Bold, Style::Normal),
            FontStyle::Italic => (Weight::Normal, Style::Italic),
            FontStyle::BoldItalic => (Weight::Bold, Style::Italic),
        };

        cosmic::iced::Font {
            weight,
            style,
            ..cosmic::iced::Font::DEFAULT
        }
    }
}

// ============================================================================
// Background drawable
// ============================================================================

/// Drawable state applied to the preview background on each show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawableState {
    /// No state flags.
    #[default]
    Empty,
    /// The previewed key opens a popup keyboard on long press.
    LongPressable,
}

/// Background drawn behind the preview content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundDrawable {
    /// Padding the drawable adds around the content.
    #[serde(default)]
    pub padding: Insets,
    /// Minimum width in pixels.
    #[serde(default)]
    pub min_width: i32,
    /// Minimum height in pixels.
    #[serde(default)]
    pub min_height: i32,
    /// Corner radius in pixels.
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f32,
    /// Fill color.
    pub fill: ThemeColor,
    /// Border color used in the [`DrawableState::LongPressable`] state.
    #[serde(default)]
    pub long_press_border: Option<ThemeColor>,
}

fn default_corner_radius() -> f32 {
    DEFAULT_CORNER_RADIUS
}

impl BackgroundDrawable {
    /// Minimum size of the drawable.
    pub fn minimum_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }
}

// ============================================================================
// Preview theme
// ============================================================================

/// Theme-supplied visual parameters for the preview popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewTheme {
    /// Text size for single glyphs. Zero or less disables previews.
    pub key_text_size: f32,
    /// Text size for multi-character labels.
    pub label_text_size: f32,
    /// Glyph color.
    pub text_color: ThemeColor,
    /// Glyph font style.
    #[serde(default)]
    pub font: FontStyle,
    /// Bubble background.
    #[serde(default)]
    pub background: Option<BackgroundDrawable>,
}

impl Default for PreviewTheme {
    fn default() -> Self {
        Self {
            key_text_size: app_settings::DEFAULT_KEY_TEXT_SIZE,
            label_text_size: app_settings::DEFAULT_LABEL_TEXT_SIZE,
            text_color: ThemeColor::rgba(0xff, 0xff, 0xff, 0xff),
            font: FontStyle::Normal,
            background: None,
        }
    }
}

impl PreviewTheme {
    /// Derives a preview theme from the COSMIC desktop theme.
    ///
    /// Text uses the on-component color, the bubble fill uses the component
    /// background and long-pressable keys get an accent border.
    pub fn from_cosmic(theme: &Theme) -> Self {
        let cosmic = theme.cosmic();

        let text = Color::from(cosmic.on_bg_component_color());
        let fill = Color::from(cosmic.bg_component_color()).scale_alpha(0.95);
        let accent = Color::from(cosmic.accent_color());

        Self {
            text_color: text.into(),
            background: Some(BackgroundDrawable {
                padding: Insets::new(6, 4, 6, 8),
                min_width: 48,
                min_height: 64,
                corner_radius: DEFAULT_CORNER_RADIUS,
                fill: fill.into(),
                long_press_border: Some(accent.into()),
            }),
            ..Self::default()
        }
    }

    /// Returns `true` if this theme shows previews at all.
    pub fn previews_enabled(&self) -> bool {
        self.key_text_size > 0.0
    }

    /// Checks the theme for values the popup cannot lay out.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut issues = Vec::new();

        if !self.key_text_size.is_finite() {
            issues.push("key_text_size must be a finite number".to_string());
        }
        if self.previews_enabled() && !(self.label_text_size > 0.0 && self.label_text_size.is_finite()) {
            issues.push("label_text_size must be positive when previews are enabled".to_string());
        }
        if let Some(background) = &self.background {
            let padding = background.padding;
            if padding.left < 0 || padding.top < 0 || padding.right < 0 || padding.bottom < 0 {
                issues.push("background padding must not be negative".to_string());
            }
            if background.min_width < 0 || background.min_height < 0 {
                issues.push("background minimum size must not be negative".to_string());
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Error type for theme loading.
#[derive(Debug)]
pub enum ThemeError {
    /// I/O error while reading a theme file.
    IoError {
        source: std::io::Error,
        file_path: Option<String>,
    },
    /// Malformed theme JSON.
    JsonError {
        source: serde_json::Error,
        file_path: Option<String>,
        line_number: Option<usize>,
    },
    /// The theme parsed but contains unusable values.
    Invalid {
        issues: Vec<String>,
        file_path: Option<String>,
    },
}

impl ThemeError {
    fn with_path(self, path: &str) -> Self {
        let file_path = Some(path.to_string());
        match self {
            ThemeError::IoError { source, .. } => ThemeError::IoError { source, file_path },
            ThemeError::JsonError {
                source,
                line_number,
                ..
            } => ThemeError::JsonError {
                source,
                file_path,
                line_number,
            },
            ThemeError::Invalid { issues, .. } => ThemeError::Invalid { issues, file_path },
        }
    }
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::IoError { source, file_path } => {
                write!(f, "I/O error")?;
                if let Some(path) = file_path {
                    write!(f, " reading theme '{}'", path)?;
                }
                write!(f, ": {}", source)
            }
            ThemeError::JsonError {
                source,
                file_path,
                line_number,
            } => {
                write!(f, "Theme JSON error")?;
                if let Some(path) = file_path {
                    write!(f, " in file '{}'", path)?;
                }
                if let Some(line) = line_number {
                    write!(f, " at line {}", line)?;
                }
                write!(f, ": {}", source)
            }
            ThemeError::Invalid { issues, file_path } => {
                write!(f, "Invalid theme")?;
                if let Some(path) = file_path {
                    write!(f, " '{}'", path)?;
                }
                write!(f, ": {}", issues.join("; "))
            }
        }
    }
}

impl std::error::Error for ThemeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ThemeError::IoError { source, .. } => Some(source),
            ThemeError::JsonError { source, .. } => Some(source),
            ThemeError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ThemeError {
    fn from(source: std::io::Error) -> Self {
        Self::IoError {
            source,
            file_path: None,
        }
    }
}

impl From<serde_json::Error> for ThemeError {
    fn from(source: serde_json::Error) -> Self {
        let line_number = Some(source.line());
        Self::JsonError {
            source,
            file_path: None,
            line_number,
        }
    }
}

/// Parses and validates a theme from a JSON string.
pub fn parse_theme(json: &str) -> Result<PreviewTheme, ThemeError> {
    let theme: PreviewTheme = serde_json::from_str(json)?;
    theme
        .validate()
        .map_err(|issues| ThemeError::Invalid {
            issues,
            file_path: None,
        })?;
    Ok(theme)
}

/// Reads, parses and validates a theme file.
pub fn load_theme_file(path: &str) -> Result<PreviewTheme, ThemeError> {
    let json = fs::read_to_string(path).map_err(|e| ThemeError::from(e).with_path(path))?;
    let theme = parse_theme(&json).map_err(|e| e.with_path(path))?;
    tracing::info!("Loaded preview theme from {}", path);
    Ok(theme)
}

// ============================================================================
// Tests
// ============================================================================
