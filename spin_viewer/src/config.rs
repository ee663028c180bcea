use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::controller::ControllerConfig;
use crate::input::GestureDirection;

/// Optional overrides loaded from a JSON preset file.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ViewerPreset {
    /// Duration of one full flyover rotation in milliseconds
    #[serde(default)]
    pub cycle_ms: Option<u64>,
    #[serde(default)]
    pub drag_threshold: Option<f32>,
    #[serde(default)]
    pub wheel_threshold: Option<f32>,
    #[serde(default)]
    pub gesture_direction: Option<GestureDirection>,
    #[serde(default)]
    pub max_zoom: Option<f32>,
    #[serde(default)]
    pub clear_selection_on_dismiss: Option<bool>,
}

impl ViewerPreset {
    pub fn validate(&self) -> Result<()> {
        if let Some(cycle) = self.cycle_ms {
            ensure!(cycle > 0, "cycle_ms must be positive");
        }
        if let Some(threshold) = self.drag_threshold {
            ensure!(threshold > 0.0, "drag_threshold must be positive (got {threshold})");
        }
        if let Some(threshold) = self.wheel_threshold {
            ensure!(threshold > 0.0, "wheel_threshold must be positive (got {threshold})");
        }
        if let Some(max_zoom) = self.max_zoom {
            ensure!(max_zoom >= 1.0, "max_zoom must be at least 1.0 (got {max_zoom})");
        }
        Ok(())
    }

    pub fn apply(&self, config: &mut ControllerConfig) {
        if let Some(cycle) = self.cycle_ms {
            config.playback.cycle_duration = Duration::from_millis(cycle);
        }
        if let Some(threshold) = self.drag_threshold {
            config.input.drag_threshold = threshold;
        }
        if let Some(threshold) = self.wheel_threshold {
            config.input.wheel_threshold = threshold;
        }
        if let Some(direction) = self.gesture_direction {
            config.input.gesture_direction = direction;
        }
        if let Some(max_zoom) = self.max_zoom {
            config.max_zoom = max_zoom;
        }
        if let Some(clear) = self.clear_selection_on_dismiss {
            config.clear_selection_on_dismiss = clear;
        }
    }
}

pub fn load_viewer_preset(path: &Path) -> Result<ViewerPreset> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading viewer preset {}", path.display()))?;
    let preset: ViewerPreset = serde_json::from_str(&data)
        .with_context(|| format!("parsing viewer preset {}", path.display()))?;
    preset
        .validate()
        .with_context(|| format!("validating viewer preset {}", path.display()))?;
    Ok(preset)
}
