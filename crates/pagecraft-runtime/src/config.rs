// crates/pagecraft-runtime/src/config.rs
use pagecraft_core::{KeyCode, KeyModifiers};
use pagecraft_layout::LayoutConfig;
use serde::{Deserialize, Serialize};

/// Modifier that turns snapping off for the rest of a drag while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapBypass {
    #[default]
    Alt,
    Shift,
    Ctrl,
    Meta,
}

impl SnapBypass {
    pub fn is_held(&self, modifiers: &KeyModifiers) -> bool {
        match self {
            SnapBypass::Alt => modifiers.alt,
            SnapBypass::Shift => modifiers.shift,
            SnapBypass::Ctrl => modifiers.ctrl,
            SnapBypass::Meta => modifiers.meta,
        }
    }

    pub fn key(&self) -> KeyCode {
        match self {
            SnapBypass::Alt => KeyCode::Alt,
            SnapBypass::Shift => KeyCode::Shift,
            SnapBypass::Ctrl => KeyCode::Control,
            SnapBypass::Meta => KeyCode::Meta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevicePreset {
    pub name: String,
    pub width: u32,
}

impl DevicePreset {
    pub fn new(name: &str, width: u32) -> Self {
        Self {
            name: name.to_string(),
            width,
        }
    }
}

/// Editor settings. Layout tunables live in `layout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub layout: LayoutConfig,
    pub snap_bypass: SnapBypass,
    pub devices: Vec<DevicePreset>,
    pub default_device: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            snap_bypass: SnapBypass::Alt,
            devices: vec![
                DevicePreset::new("Mobile", 375),
                DevicePreset::new("Tablet", 768),
                DevicePreset::new("Desktop", 1440),
            ],
            default_device: "Desktop".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn device(&self, name: &str) -> Option<&DevicePreset> {
        self.devices.iter().find(|device| device.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_partial_override() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"snap_bypass": "shift", "layout": {"snap_threshold": 5}}"#).unwrap();

        assert_eq!(config.snap_bypass, SnapBypass::Shift);
        assert_eq!(config.layout.snap_threshold, 5.0);
        assert_eq!(config.layout.grid_size, 10.0);
        assert_eq!(config.device("Tablet").map(|device| device.width), Some(768));
        assert!(config.device("watch").is_none());
    }

    #[test]
    fn test_bypass_reads_the_right_modifier() {
        assert!(SnapBypass::Alt.is_held(&KeyModifiers::alt()));
        assert!(!SnapBypass::Shift.is_held(&KeyModifiers::alt()));
        assert_eq!(SnapBypass::Ctrl.key(), KeyCode::Control);
    }
}
