// crates/pagecraft-core/src/dimension.rs
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Parsed view of a width/height string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutDimension {
    /// Fixed pixel value
    Pixels(f64),
    /// Percentage of parent size (0.0 to 1.0)
    Percentage(f64),
    /// Automatic sizing based on content
    Auto,
    /// Anything else the document carries (`calc(...)`, `20rem`, ...)
    Unknown,
}

impl LayoutDimension {
    /// Create from a string value (like "50%", "100px", "auto")
    pub fn from_string(value: &str) -> Self {
        let value = value.trim();

        if value.is_empty() || value == "auto" {
            return LayoutDimension::Auto;
        }

        if let Some(pct) = value.strip_suffix('%') {
            if let Ok(pct) = pct.trim().parse::<f64>() {
                return LayoutDimension::Percentage(pct / 100.0);
            }
        }

        if let Some(px) = value.strip_suffix("px") {
            if let Ok(px) = px.trim().parse::<f64>() {
                return LayoutDimension::Pixels(px);
            }
        }

        // Plain numbers are pixels
        if let Ok(px) = value.parse::<f64>() {
            return LayoutDimension::Pixels(px);
        }

        LayoutDimension::Unknown
    }

    pub fn as_pixels(&self) -> Option<f64> {
        match self {
            LayoutDimension::Pixels(px) => Some(*px),
            _ => None,
        }
    }

    /// Check if this dimension is definite (not auto)
    pub fn is_definite(&self) -> bool {
        matches!(self, LayoutDimension::Pixels(_) | LayoutDimension::Percentage(_))
    }
}

/// A `width`/`height` value exactly as the document stores it.
///
/// The raw string is kept so that a document read and written back without
/// edits is byte-for-byte identical; geometry code goes through
/// [`Dimension::kind`] or [`Dimension::to_pixels`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dimension(String);

impl Dimension {
    pub fn auto() -> Self {
        Self("auto".to_string())
    }

    /// A whole-pixel length, rounded the way the editor writes sizes.
    pub fn pixels(value: f64) -> Self {
        Self(format!("{}px", round_half_up(value) as i64))
    }

    pub fn raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> LayoutDimension {
        LayoutDimension::from_string(&self.0)
    }

    pub fn is_auto(&self) -> bool {
        self.kind() == LayoutDimension::Auto
    }

    /// Numeric pixel length, `None` for auto, percentages and unknown units.
    pub fn to_pixels(&self) -> Option<f64> {
        self.kind().as_pixels()
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::auto()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Dimension {
    fn from(value: &str) -> Self {
        Dimension::raw(value)
    }
}

/// Rounds halves towards positive infinity, matching how the builder has
/// always rounded pixel values (`-2.5` becomes `-2`, `2.5` becomes `3`).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Serializes whole coordinates as JSON integers so `{"x": 80}` survives a
/// load/save cycle unchanged.
pub(crate) fn serialize_coordinate<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_parsing() {
        assert_eq!(LayoutDimension::from_string("50%"), LayoutDimension::Percentage(0.5));
        assert_eq!(LayoutDimension::from_string("100px"), LayoutDimension::Pixels(100.0));
        assert_eq!(LayoutDimension::from_string("auto"), LayoutDimension::Auto);
        assert_eq!(LayoutDimension::from_string("200"), LayoutDimension::Pixels(200.0));
        assert_eq!(LayoutDimension::from_string("20rem"), LayoutDimension::Unknown);
    }

    #[test]
    fn test_pixels_only_for_px_lengths() {
        assert_eq!(Dimension::raw("300px").to_pixels(), Some(300.0));
        assert_eq!(Dimension::auto().to_pixels(), None);
        assert_eq!(Dimension::raw("100%").to_pixels(), None);
    }

    #[test]
    fn test_pixels_constructor_rounds() {
        assert_eq!(Dimension::pixels(109.5).as_str(), "110px");
        assert_eq!(Dimension::pixels(50.0).as_str(), "50px");
        assert_eq!(Dimension::pixels(49.4).as_str(), "49px");
    }

    #[test]
    fn test_raw_string_is_preserved() {
        let dimension: Dimension = serde_json::from_str("\"300.0px\"").unwrap();
        assert_eq!(serde_json::to_string(&dimension).unwrap(), "\"300.0px\"");
        assert_eq!(dimension.to_pixels(), Some(300.0));
    }
}
