// crates/pagecraft-render/src/icons.rs
use std::collections::HashMap;

/// Name to SVG lookup for icon components.
///
/// The renderer never ships icon sets itself; hosts plug in whatever
/// libraries (`heroicons`, `lucide`, ...) they bundle.
pub trait IconLibrary {
    /// SVG markup for `name` in `library`, or `None` if unknown.
    fn lookup(&self, library: &str, name: &str) -> Option<String>;
}

/// Knows no icons; every lookup falls back to the placeholder.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIcons;

impl IconLibrary for NoIcons {
    fn lookup(&self, _library: &str, _name: &str) -> Option<String> {
        None
    }
}

/// In-memory icon registry.
#[derive(Debug, Default, Clone)]
pub struct StaticIcons {
    icons: HashMap<(String, String), String>,
}

impl StaticIcons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, library: impl Into<String>, name: impl Into<String>, svg: impl Into<String>) {
        self.icons.insert((library.into(), name.into()), svg.into());
    }

    pub fn with_icon(mut self, library: &str, name: &str, svg: &str) -> Self {
        self.insert(library, name, svg);
        self
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

impl IconLibrary for StaticIcons {
    fn lookup(&self, library: &str, name: &str) -> Option<String> {
        self.icons
            .get(&(library.to_string(), name.to_string()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_lookup_is_per_library() {
        let icons = StaticIcons::new().with_icon("lucide", "Home", "<svg/>");
        assert_eq!(icons.lookup("lucide", "Home").as_deref(), Some("<svg/>"));
        assert!(icons.lookup("heroicons", "Home").is_none());
        assert!(NoIcons.lookup("lucide", "Home").is_none());
    }
}
