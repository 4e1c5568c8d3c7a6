// crates/pagecraft-core/src/styles.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open style mapping attached to a component.
///
/// Keys are whatever the style editor writes (`backgroundColor`, `padding`,
/// `boxShadow`, ...). Values are strings, numbers, or spacing records; unknown
/// keys are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Styles(Map<String, Value>);

/// A `{all}` or `{top,right,bottom,left}` spacing record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spacing {
    pub all: Option<String>,
    pub top: Option<String>,
    pub right: Option<String>,
    pub bottom: Option<String>,
    pub left: Option<String>,
}

impl Spacing {
    fn from_value(value: &Value) -> Option<Self> {
        let record = value.as_object()?;
        let side = |key: &str| record.get(key).and_then(style_value_to_css);
        Some(Self {
            all: side("all"),
            top: side("top"),
            right: side("right"),
            bottom: side("bottom"),
            left: side("left"),
        })
    }
}

// (style key, css property)
const PASSTHROUGH_KEYS: &[(&str, &str)] = &[
    ("backgroundColor", "background-color"),
    ("color", "color"),
    ("fontSize", "font-size"),
    ("fontWeight", "font-weight"),
    ("fontFamily", "font-family"),
    ("lineHeight", "line-height"),
    ("letterSpacing", "letter-spacing"),
    ("borderWidth", "border-width"),
    ("borderStyle", "border-style"),
    ("borderColor", "border-color"),
    ("borderRadius", "border-radius"),
    ("boxShadow", "box-shadow"),
    ("display", "display"),
    ("flexDirection", "flex-direction"),
    ("justifyContent", "justify-content"),
    ("alignItems", "align-items"),
    ("gap", "gap"),
    ("gridTemplateColumns", "grid-template-columns"),
];

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn spacing(&self, key: &str) -> Option<Spacing> {
        self.0.get(key).and_then(Spacing::from_value)
    }

    /// CSS declarations for the keys the renderer understands, in a stable order.
    /// Empty strings, `false` and `null` are skipped.
    pub fn inline_declarations(&self) -> Vec<(String, String)> {
        let mut declarations = Vec::new();

        for (key, property) in PASSTHROUGH_KEYS {
            if let Some(value) = self.0.get(*key).and_then(style_value_to_css) {
                declarations.push((property.to_string(), value));
            }
        }

        for (key, property) in [("padding", "padding"), ("margin", "margin")] {
            let Some(spacing) = self.spacing(key) else {
                continue;
            };
            if let Some(all) = spacing.all {
                declarations.push((property.to_string(), all));
                continue;
            }
            let sides = [
                ("top", spacing.top),
                ("right", spacing.right),
                ("bottom", spacing.bottom),
                ("left", spacing.left),
            ];
            for (side, value) in sides {
                if let Some(value) = value {
                    declarations.push((format!("{property}-{side}"), value));
                }
            }
        }

        declarations
    }

    /// `inline_declarations` joined into a `style` attribute value.
    pub fn to_css(&self) -> String {
        self.inline_declarations()
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn style_value_to_css(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn styles(value: Value) -> Styles {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_passthrough_keys_become_css() {
        let styles = styles(json!({
            "backgroundColor": "#ff0000",
            "fontWeight": 700,
            "boxShadow": "",
            "unknownKey": "kept"
        }));

        assert_eq!(
            styles.inline_declarations(),
            vec![
                ("background-color".to_string(), "#ff0000".to_string()),
                ("font-weight".to_string(), "700".to_string()),
            ]
        );
        assert_eq!(styles.get_str("unknownKey"), Some("kept"));
    }

    #[test]
    fn test_spacing_all_wins_over_sides() {
        let styles = styles(json!({
            "padding": { "all": "16px", "top": "4px" },
            "margin": { "top": "8px", "left": "2px" }
        }));

        assert_eq!(
            styles.to_css(),
            "padding: 16px; margin-top: 8px; margin-left: 2px;"
        );
    }
}
