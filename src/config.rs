//! Editor configuration supplied by the host page as JSON.

use serde::Deserialize;

use crate::consts::{
    CANVAS_HEIGHT, CANVAS_WIDTH, HANDLE_SIZE_PX, IMAGE_MIN_HEIGHT, IMAGE_MIN_WIDTH, MIN_HEIGHT, MIN_WIDTH,
    SETTLE_FRAMES,
};
use crate::session::{LockModifier, Modifiers};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Minimum width/height pair applied while resizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub min_width: f64,
    pub min_height: f64,
    pub image_min_width: f64,
    pub image_min_height: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub settle_frames: u32,
    pub handle_size: f64,
    pub aspect_lock: LockModifier,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
            image_min_width: IMAGE_MIN_WIDTH,
            image_min_height: IMAGE_MIN_HEIGHT,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            settle_frames: SETTLE_FRAMES,
            handle_size: HANDLE_SIZE_PX,
            aspect_lock: LockModifier::Shift,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config object. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON or unknown fields and `Invalid` when
    /// a value fails validation.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable by the engines.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("min_width", self.min_width)?;
        positive("min_height", self.min_height)?;
        positive("image_min_width", self.image_min_width)?;
        positive("image_min_height", self.image_min_height)?;
        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        positive("handle_size", self.handle_size)?;
        if self.settle_frames == 0 {
            return Err(ConfigError::Invalid { field: "settle_frames", reason: "must be at least 1".into() });
        }
        if self.min_width > self.canvas_width {
            return Err(ConfigError::Invalid { field: "min_width", reason: "exceeds canvas_width".into() });
        }
        if self.min_height > self.canvas_height {
            return Err(ConfigError::Invalid { field: "min_height", reason: "exceeds canvas_height".into() });
        }
        Ok(())
    }

    /// Minimum size for whole blocks.
    #[must_use]
    pub fn block_min(&self) -> MinSize {
        MinSize { width: self.min_width, height: self.min_height }
    }

    /// Minimum size for the image element inside an image block.
    #[must_use]
    pub fn image_min(&self) -> MinSize {
        MinSize { width: self.image_min_width, height: self.image_min_height }
    }

    /// Whether the configured aspect-lock modifier is held.
    #[must_use]
    pub fn aspect_locked(&self, modifiers: Modifiers) -> bool {
        self.aspect_lock.is_held(modifiers)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("must be a positive number, got {value}") })
    }
}
