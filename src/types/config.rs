//! Display configuration carried in the record file
//!
//! The ledger never interprets these values; it keeps them intact between
//! load and save so a front end can style itself from the same file. Values
//! are held as raw JSON, so a hand-edited entry of an unexpected type is
//! preserved as written instead of making the record file unreadable. The
//! typed accessors fall back to the built-in default for such entries.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Built-in string settings and their defaults.
const TEXT_DEFAULTS: [(&str, &str); 8] = [
    ("background_color", "#1a1a2e"),
    ("frame_color", "#0a0a1a"),
    ("highlight_color", "#ffb703"),
    ("pb_split_color", "#34d399"),
    ("dream_split_color", "#00ffff"),
    ("image_path", "issakis.jpg"),
    ("watermark_text", "Speed Tracker by White Claws LLC"),
    ("text_color", "#FFFFFF"),
];

/// Default background image opacity.
pub const DEFAULT_IMAGE_OPACITY: f64 = 0.2;

/// Default watermark font size in points.
pub const DEFAULT_WATERMARK_FONT_SIZE: u32 = 8;

/// Presentation settings stored alongside the records.
///
/// Keys missing from a loaded file take their built-in default one by one;
/// every key present in the file, known or not, is written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct DisplayConfig(Map<String, Value>);

impl Default for DisplayConfig {
    fn default() -> Self {
        let mut values: Map<String, Value> =
            TEXT_DEFAULTS.iter().map(|(key, value)| (key.to_string(), Value::from(*value))).collect();
        values.insert("image_opacity".to_string(), Value::from(DEFAULT_IMAGE_OPACITY));
        values.insert("watermark_font_size".to_string(), Value::from(DEFAULT_WATERMARK_FONT_SIZE));
        Self(values)
    }
}

impl<'de> Deserialize<'de> for DisplayConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl DisplayConfig {
    /// Merge a loaded config block over the defaults.
    ///
    /// A block that is not a JSON object is dropped with a warning and the
    /// defaults are used.
    pub fn from_value(value: Value) -> Self {
        let mut config = Self::default();
        match value {
            Value::Object(loaded) => config.0.extend(loaded),
            Value::Null => {}
            other => warn!(found = %other, "Ignoring display config that is not a JSON object"),
        }
        config
    }

    /// All settings as stored.
    pub fn values(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Raw value of one setting.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Replace one setting, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// A string setting, or its built-in default when absent or not a string.
    ///
    /// Keys without a built-in default read as `""`.
    pub fn text(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or_else(|| {
            TEXT_DEFAULTS.iter().find(|(name, _)| *name == key).map_or("", |(_, default)| *default)
        })
    }

    pub fn background_color(&self) -> &str {
        self.text("background_color")
    }

    pub fn frame_color(&self) -> &str {
        self.text("frame_color")
    }

    pub fn highlight_color(&self) -> &str {
        self.text("highlight_color")
    }

    pub fn pb_split_color(&self) -> &str {
        self.text("pb_split_color")
    }

    pub fn dream_split_color(&self) -> &str {
        self.text("dream_split_color")
    }

    pub fn image_path(&self) -> &str {
        self.text("image_path")
    }

    pub fn watermark_text(&self) -> &str {
        self.text("watermark_text")
    }

    pub fn text_color(&self) -> &str {
        self.text("text_color")
    }

    /// Background image opacity, defaulting when not a number.
    pub fn image_opacity(&self) -> f64 {
        self.0.get("image_opacity").and_then(Value::as_f64).unwrap_or(DEFAULT_IMAGE_OPACITY)
    }

    /// Watermark font size. Whole floats such as `8.0` are accepted.
    pub fn watermark_font_size(&self) -> u32 {
        self.0
            .get("watermark_font_size")
            .and_then(|value| {
                value.as_u64().and_then(|size| u32::try_from(size).ok()).or_else(|| {
                    value
                        .as_f64()
                        .filter(|size| size.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(size))
                        .map(|size| size as u32)
                })
            })
            .unwrap_or(DEFAULT_WATERMARK_FONT_SIZE)
    }
}
