// SPDX-License-Identifier: GPL-3.0-only

//! Key descriptors as seen by the preview popup.
//!
//! The keyboard engine owns its keys; the popup only reads the geometry and
//! the handful of flags that influence the preview.

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Read-only view of a keyboard key for preview purposes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewKey {
    /// Key width in pixels.
    pub width: i32,
    /// Key height in pixels.
    pub height: i32,
    /// Key codes produced by this key. Keys cycling through several
    /// characters carry more than one.
    #[serde(default)]
    pub codes: Vec<i32>,
    /// Identifier of the long-press popup layout, if the key has one.
    #[serde(default)]
    pub popup_layout: Option<String>,
}

impl PreviewKey {
    /// Creates a key with a single code and no long-press popup.
    pub fn new(width: i32, height: i32, code: i32) -> Self {
        Self {
            width,
            height,
            codes: vec![code],
            popup_layout: None,
        }
    }

    /// Attaches a long-press popup layout.
    #[must_use]
    pub fn with_popup_layout(mut self, layout: impl Into<String>) -> Self {
        self.popup_layout = Some(layout.into());
        self
    }

    /// Replaces the key codes.
    #[must_use]
    pub fn with_codes(mut self, codes: Vec<i32>) -> Self {
        self.codes = codes;
        self
    }

    /// Key geometry as a size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns `true` if long-pressing this key opens a popup keyboard.
    pub fn is_long_pressable(&self) -> bool {
        self.popup_layout.is_some()
    }

    /// Returns `true` if the key produces more than one code.
    pub fn is_multi_code(&self) -> bool {
        self.codes.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_flags() {
        let key = PreviewKey::new(40, 60, 'a' as i32);
        assert!(!key.is_long_pressable());
        assert!(!key.is_multi_code());
        assert_eq!(key.size(), Size::new(40, 60));

        let key = key
            .with_popup_layout("accents_a")
            .with_codes(vec!['a' as i32, 'b' as i32]);
        assert!(key.is_long_pressable());
        assert!(key.is_multi_code());
    }

    /// Test: Keys deserialize with optional fields omitted.
    #[test]
    fn test_key_from_json() {
        let key: PreviewKey = serde_json::from_str(r#"{"width": 30, "height": 50}"#).unwrap();
        assert!(key.codes.is_empty());
        assert!(key.popup_layout.is_none());
    }
}
