// SPDX-License-Identifier: GPL-3.0-only

//! Key preview demo
//!
//! Replays a short press sequence through a headless overlay and logs where
//! each preview bubble lands. Useful for checking a theme file's padding and
//! minimum sizes without a compositor.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=keypreview=debug cargo run --bin keypreview-demo -- [theme.json]
//! ```

use keypreview::config::PreviewConfig;
use keypreview::content::PreviewIcon;
use keypreview::geometry::Point;
use keypreview::key::PreviewKey;
use keypreview::measure::GlyphMetricsMeasure;
use keypreview::overlay::{HeadlessOverlay, ParentView};
use keypreview::preview::PreviewPopup;
use keypreview::theme::{load_theme_file, PreviewTheme, ThemeError};

/// Width of a key in the demo row, in pixels.
const KEY_WIDTH: i32 = 64;

/// Height of a key in the demo row, in pixels.
const KEY_HEIGHT: i32 = 80;

/// A preview the demo shows.
enum Press {
    Text(&'static str, PreviewKey),
    Icon(PreviewIcon, PreviewKey),
}

fn main() -> Result<(), ThemeError> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("keypreview=info".parse().unwrap()),
        )
        .init();

    let theme = match std::env::args().nth(1) {
        Some(path) => load_theme_file(&path)?,
        None => PreviewTheme::from_cosmic(&cosmic::Theme::dark()),
    };
    let config = PreviewConfig::load();

    let mut popup = PreviewPopup::new(
        HeadlessOverlay::new(),
        GlyphMetricsMeasure::default(),
        ParentView::attached(Point::new(0, 720), "demo-output"),
        theme,
        &config,
    );

    if !popup.is_enabled() {
        tracing::warn!("Key previews are disabled by the theme or configuration");
        return Ok(());
    }

    let key = |code: char| PreviewKey::new(KEY_WIDTH, KEY_HEIGHT, code as i32);
    let presses = [
        Press::Text("q", key('q')),
        Press::Text("e", key('e').with_popup_layout("accents_e")),
        Press::Text(".com", key('.')),
        Press::Text("abc", key('a').with_codes(vec!['a' as i32, 'b' as i32, 'c' as i32])),
        Press::Icon(PreviewIcon::new("keyboard-shift-symbolic", 32, 32), key('\u{21e7}')),
    ];

    for (column, press) in presses.iter().enumerate() {
        let touch = Point::new(column as i32 * KEY_WIDTH + KEY_WIDTH / 2, 0);

        let name = match press {
            Press::Text(label, key) => {
                popup.show_text(key, label, touch);
                label.to_string()
            }
            Press::Icon(icon, key) => {
                popup.show_icon(key, icon, touch);
                icon.name.clone()
            }
        };

        let overlay = popup.overlay();
        let frame = overlay.frame();
        tracing::info!(
            "{:>24}: origin ({}, {}) size {}x{} background {:?}",
            name,
            frame.origin.x,
            frame.origin.y,
            frame.size.width,
            frame.size.height,
            overlay.background_state()
        );
    }

    popup.dismiss();
    tracing::info!(
        "Dismissed after {} show(s) and {} in-place update(s)",
        popup.overlay().show_count(),
        popup.overlay().update_count()
    );

    Ok(())
}
