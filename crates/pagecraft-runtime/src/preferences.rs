// crates/pagecraft-runtime/src/preferences.rs
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::EditorConfig;

pub const FULL_WIDTH_KEY: &str = "builder.fullWidth";
pub const DEVICE_KEY: &str = "builder.device";
pub const ZOOM_KEY: &str = "builder.zoom";
pub const SHOW_GRID_KEY: &str = "builder.showGrid";

pub const MIN_ZOOM: f64 = 50.0;
pub const MAX_ZOOM: f64 = 150.0;
pub const ZOOM_STEP: f64 = 10.0;
pub const DEFAULT_ZOOM: f64 = 100.0;

/// String key/value storage that outlives a session.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept in a flat JSON object on disk, rewritten on every change.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values: Map<String, Value> = if path.exists() {
            let source = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences from {}", path.display()))?;
            serde_json::from_str(&source)
                .with_context(|| format!("Preferences file {} is not a JSON object", path.display()))?
        } else {
            Map::new()
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(value) => Some(value.clone()),
            other => Some(other.to_string()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values.insert(key.to_string(), Value::String(value.to_string()));
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences to {}", self.path.display()))
    }
}

/// Canvas chrome settings, loaded from and persisted to a store.
pub struct CanvasPreferences {
    full_width: bool,
    device: String,
    zoom: f64,
    show_grid: bool,
    store: Box<dyn PreferenceStore>,
}

impl std::fmt::Debug for CanvasPreferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasPreferences")
            .field("full_width", &self.full_width)
            .field("device", &self.device)
            .field("zoom", &self.zoom)
            .field("show_grid", &self.show_grid)
            .finish_non_exhaustive()
    }
}

impl CanvasPreferences {
    /// Reads every setting from `store`. Missing or malformed values fall
    /// back to defaults: not full width, the default device, 100% zoom and
    /// the grid shown. A stored zoom outside the
    /// allowed range is clamped to it.
    pub fn load(store: Box<dyn PreferenceStore>, config: &EditorConfig) -> Self {
        let full_width = store.get(FULL_WIDTH_KEY).as_deref() == Some("true");
        let device = store
            .get(DEVICE_KEY)
            .filter(|device| !device.is_empty())
            .unwrap_or_else(|| config.default_device.clone());
        let zoom = store
            .get(ZOOM_KEY)
            .and_then(|zoom| zoom.trim().parse::<f64>().ok())
            .filter(|zoom| zoom.is_finite() && *zoom != 0.0)
            .map(|zoom| zoom.clamp(MIN_ZOOM, MAX_ZOOM))
            .unwrap_or(DEFAULT_ZOOM);
        let show_grid = store.get(SHOW_GRID_KEY).as_deref() != Some("false");

        debug!("Canvas preferences: full_width={} device={} zoom={} grid={}", full_width, device, zoom, show_grid);

        Self {
            full_width,
            device,
            zoom,
            show_grid,
            store,
        }
    }

    pub fn in_memory(config: &EditorConfig) -> Self {
        Self::load(Box::new(MemoryStore::new()), config)
    }

    pub fn full_width(&self) -> bool {
        self.full_width
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Scale factor for the canvas transform.
    pub fn scale(&self) -> f64 {
        self.zoom / 100.0
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }

    /// Canvas width in pixels, `None` when it fills the available space.
    /// Unknown device names use the default device.
    pub fn canvas_width(&self, config: &EditorConfig) -> Option<u32> {
        if self.full_width {
            return None;
        }
        config
            .device(&self.device)
            .or_else(|| config.device(&config.default_device))
            .map(|device| device.width)
    }

    pub fn set_full_width(&mut self, full_width: bool) {
        self.full_width = full_width;
        self.persist(FULL_WIDTH_KEY, &full_width.to_string());
    }

    pub fn set_device(&mut self, device: &str) {
        self.device = device.to_string();
        self.persist(DEVICE_KEY, device);
    }

    pub fn set_show_grid(&mut self, show_grid: bool) {
        self.show_grid = show_grid;
        self.persist(SHOW_GRID_KEY, &show_grid.to_string());
    }

    pub fn toggle_grid(&mut self) {
        self.set_show_grid(!self.show_grid);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.persist(ZOOM_KEY, &self.zoom.to_string());
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!("Could not persist {}: {:#}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_store() {
        let config = EditorConfig::default();
        let prefs = CanvasPreferences::in_memory(&config);

        assert!(!prefs.full_width());
        assert_eq!(prefs.device(), "Desktop");
        assert_eq!(prefs.zoom(), 100.0);
        assert!(prefs.show_grid());
        assert_eq!(prefs.canvas_width(&config), Some(1440));
    }

    #[test]
    fn test_stored_values_are_read_back() {
        let config = EditorConfig::default();
        let store = MemoryStore::new()
            .with(FULL_WIDTH_KEY, "true")
            .with(DEVICE_KEY, "Mobile")
            .with(ZOOM_KEY, "abc")
            .with(SHOW_GRID_KEY, "false");
        let prefs = CanvasPreferences::load(Box::new(store), &config);

        assert!(prefs.full_width());
        assert_eq!(prefs.device(), "Mobile");
        assert_eq!(prefs.zoom(), 100.0);
        assert!(!prefs.show_grid());
        assert_eq!(prefs.canvas_width(&config), None);
    }

    #[test]
    fn test_stored_zoom_is_clamped_on_load() {
        let config = EditorConfig::default();

        let high = CanvasPreferences::load(Box::new(MemoryStore::new().with(ZOOM_KEY, "900")), &config);
        assert_eq!(high.zoom(), MAX_ZOOM);

        let low = CanvasPreferences::load(Box::new(MemoryStore::new().with(ZOOM_KEY, "10")), &config);
        assert_eq!(low.zoom(), MIN_ZOOM);

        let negative = CanvasPreferences::load(Box::new(MemoryStore::new().with(ZOOM_KEY, "-75")), &config);
        assert_eq!(negative.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_zoom_steps_are_clamped_and_persisted() {
        let config = EditorConfig::default();
        let mut prefs = CanvasPreferences::in_memory(&config);

        for _ in 0..10 {
            prefs.zoom_in();
        }
        assert_eq!(prefs.zoom(), MAX_ZOOM);

        for _ in 0..20 {
            prefs.zoom_out();
        }
        assert_eq!(prefs.zoom(), MIN_ZOOM);
        assert_eq!(prefs.store().get(ZOOM_KEY).as_deref(), Some("50"));

        prefs.set_device("Tablet");
        assert_eq!(prefs.canvas_width(&config), Some(768));
        assert_eq!(prefs.store().get(DEVICE_KEY).as_deref(), Some("Tablet"));
    }

    #[test]
    fn test_json_file_store_survives_reopen() {
        let path = std::env::temp_dir().join(format!("pagecraft-prefs-{}.json", std::process::id()));
        let _ = fs::remove_file(&path);

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.set(SHOW_GRID_KEY, "false").unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(SHOW_GRID_KEY).as_deref(), Some("false"));
        assert!(store.get(ZOOM_KEY).is_none());

        fs::remove_file(&path).unwrap();
    }
}
