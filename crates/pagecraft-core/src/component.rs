// crates/pagecraft-core/src/component.rs
use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

use crate::dimension::serialize_coordinate;
use crate::{Dimension, Styles};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    Heading,
    Text,
    Button,
    Image,
    Columns,
    Container,
    Divider,
    Spacer,
    Html,
    Icon,
    Embed,
    FormContainer,
    FormInput,
    FormTextarea,
    FormSelect,
    FormCheckbox,
    FormRadioGroup,
    FormFile,
    FormDate,
    FormSubmit,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// May own `children`.
        const CONTAINER = 1 << 0;
        /// Content can be edited inline.
        const TEXT_EDITABLE = 1 << 1;
        /// Inline editor is multi-line; Enter inserts a newline.
        const MULTILINE_TEXT = 1 << 2;
        /// Renders a form control.
        const FORM_FIELD = 1 << 3;
    }
}

/// Geometry and payload a freshly added component starts with.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefaults {
    pub width: Dimension,
    pub height: Dimension,
    pub attributes: Map<String, Value>,
}

impl ComponentType {
    pub const ALL: [ComponentType; 20] = [
        ComponentType::Heading,
        ComponentType::Text,
        ComponentType::Button,
        ComponentType::Image,
        ComponentType::Columns,
        ComponentType::Container,
        ComponentType::Divider,
        ComponentType::Spacer,
        ComponentType::Html,
        ComponentType::Icon,
        ComponentType::Embed,
        ComponentType::FormContainer,
        ComponentType::FormInput,
        ComponentType::FormTextarea,
        ComponentType::FormSelect,
        ComponentType::FormCheckbox,
        ComponentType::FormRadioGroup,
        ComponentType::FormFile,
        ComponentType::FormDate,
        ComponentType::FormSubmit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Heading => "heading",
            ComponentType::Text => "text",
            ComponentType::Button => "button",
            ComponentType::Image => "image",
            ComponentType::Columns => "columns",
            ComponentType::Container => "container",
            ComponentType::Divider => "divider",
            ComponentType::Spacer => "spacer",
            ComponentType::Html => "html",
            ComponentType::Icon => "icon",
            ComponentType::Embed => "embed",
            ComponentType::FormContainer => "form-container",
            ComponentType::FormInput => "form-input",
            ComponentType::FormTextarea => "form-textarea",
            ComponentType::FormSelect => "form-select",
            ComponentType::FormCheckbox => "form-checkbox",
            ComponentType::FormRadioGroup => "form-radio-group",
            ComponentType::FormFile => "form-file",
            ComponentType::FormDate => "form-date",
            ComponentType::FormSubmit => "form-submit",
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            ComponentType::Heading | ComponentType::Button => Capabilities::TEXT_EDITABLE,
            ComponentType::Text => Capabilities::TEXT_EDITABLE | Capabilities::MULTILINE_TEXT,
            ComponentType::Columns | ComponentType::Container => Capabilities::CONTAINER,
            ComponentType::FormContainer => Capabilities::CONTAINER | Capabilities::FORM_FIELD,
            ComponentType::FormInput
            | ComponentType::FormTextarea
            | ComponentType::FormSelect
            | ComponentType::FormCheckbox
            | ComponentType::FormRadioGroup
            | ComponentType::FormFile
            | ComponentType::FormDate
            | ComponentType::FormSubmit => Capabilities::FORM_FIELD,
            ComponentType::Image
            | ComponentType::Divider
            | ComponentType::Spacer
            | ComponentType::Html
            | ComponentType::Icon
            | ComponentType::Embed => Capabilities::empty(),
        }
    }

    pub fn is_container(&self) -> bool {
        self.capabilities().contains(Capabilities::CONTAINER)
    }

    /// Heading, text and button: the types that have an inline text editor.
    pub fn is_text_editable(&self) -> bool {
        self.capabilities().contains(Capabilities::TEXT_EDITABLE)
    }

    pub fn is_multiline_text(&self) -> bool {
        self.capabilities().contains(Capabilities::MULTILINE_TEXT)
    }

    pub fn defaults(&self) -> TypeDefaults {
        let (width, height, attributes) = match self {
            ComponentType::Heading => (
                "auto",
                "auto",
                json!({ "content": "New Heading", "className": "text-3xl font-bold" }),
            ),
            ComponentType::Text => (
                "300px",
                "auto",
                json!({ "content": "New text content", "className": "text-base" }),
            ),
            ComponentType::Button => (
                "auto",
                "auto",
                json!({ "content": "Click Me", "href": "#", "className": "btn btn-primary" }),
            ),
            ComponentType::Image => (
                "400px",
                "300px",
                json!({
                    "content": "https://via.placeholder.com/400x300",
                    "className": "rounded-lg object-cover"
                }),
            ),
            ComponentType::Columns => (
                "600px",
                "auto",
                json!({ "className": "grid grid-cols-1 md:grid-cols-2 gap-4" }),
            ),
            ComponentType::Container => ("400px", "auto", json!({ "className": "p-4" })),
            ComponentType::Divider => ("100%", "auto", json!({ "className": "divider" })),
            ComponentType::Spacer => ("100%", "48px", json!({ "className": "h-12" })),
            ComponentType::Html => (
                "600px",
                "auto",
                json!({
                    "content": "<div class=\"p-4\"><h2>Custom HTML</h2></div>",
                    "rawHtml": true
                }),
            ),
            ComponentType::Icon => (
                "auto",
                "auto",
                json!({
                    "iconLibrary": "heroicons",
                    "iconName": "HomeIcon",
                    "customSvg": null,
                    "size": "24",
                    "color": "#000000",
                    "className": ""
                }),
            ),
            ComponentType::Embed => (
                "600px",
                "400px",
                json!({
                    "embedCode": "",
                    "embedType": "auto",
                    "url": "",
                    "className": "rounded-lg overflow-hidden"
                }),
            ),
            ComponentType::FormContainer => (
                "600px",
                "auto",
                json!({
                    "action": "",
                    "method": "POST",
                    "className": "space-y-4",
                    "successMessage": "Form submitted successfully!",
                    "errorMessage": "Failed to submit form"
                }),
            ),
            ComponentType::FormInput => (
                "400px",
                "auto",
                json!({
                    "label": "Input Field",
                    "placeholder": "Enter text...",
                    "name": "field",
                    "inputType": "text",
                    "required": false,
                    "className": "input input-bordered w-full"
                }),
            ),
            ComponentType::FormTextarea => (
                "400px",
                "auto",
                json!({
                    "label": "Message",
                    "placeholder": "Enter your message...",
                    "name": "message",
                    "required": false,
                    "rows": 4,
                    "className": "textarea textarea-bordered w-full"
                }),
            ),
            ComponentType::FormSelect => (
                "400px",
                "auto",
                json!({
                    "label": "Select Option",
                    "name": "select",
                    "required": false,
                    "options": ["Option 1", "Option 2", "Option 3"],
                    "className": "select select-bordered w-full"
                }),
            ),
            ComponentType::FormCheckbox => (
                "auto",
                "auto",
                json!({ "label": "I agree", "name": "checkbox", "required": false, "className": "checkbox" }),
            ),
            ComponentType::FormRadioGroup => (
                "400px",
                "auto",
                json!({
                    "label": "Choose One",
                    "name": "radio",
                    "required": false,
                    "options": ["Option 1", "Option 2"],
                    "className": ""
                }),
            ),
            ComponentType::FormFile => (
                "400px",
                "auto",
                json!({
                    "label": "Upload File",
                    "name": "file",
                    "required": false,
                    "accept": "*",
                    "className": "file-input file-input-bordered w-full"
                }),
            ),
            ComponentType::FormDate => (
                "400px",
                "auto",
                json!({
                    "label": "Select Date",
                    "name": "date",
                    "required": false,
                    "className": "input input-bordered w-full"
                }),
            ),
            ComponentType::FormSubmit => (
                "auto",
                "auto",
                json!({ "content": "Submit", "className": "btn btn-primary" }),
            ),
        };

        let attributes = match attributes {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        TypeDefaults {
            width: Dimension::raw(width),
            height: Dimension::raw(height),
            attributes,
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{x, y}` offset from the parent's content origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default, serialize_with = "serialize_coordinate")]
    pub x: f64,
    #[serde(default, serialize_with = "serialize_coordinate")]
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Position {
    fn from(value: DVec2) -> Self {
        Self::new(value.x, value.y)
    }
}

/// One node of the page document.
///
/// Only `id`, `type`, geometry, `styles` and `children` are interpreted by the
/// editor. Everything else (content, href, form field settings, icon names,
/// embed code, `className`, ...) lives in `attributes` and is carried through
/// untouched. Values survive a round trip, but key order is normalized: the
/// interpreted fields serialize first, then attributes in their source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Styles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Component>>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Partial attributes merged into a component by `ComponentTree::update`.
///
/// A patch has no way to express `id`, `type` or `children`, so applying one
/// can never change identity or tree shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentPatch {
    pub position: Option<Position>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub styles: Option<Styles>,
    pub attributes: Map<String, Value>,
}

impl ComponentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: impl Into<Position>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn width(mut self, width: Dimension) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: Dimension) -> Self {
        self.height = Some(height);
        self
    }

    pub fn styles(mut self, styles: Styles) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.styles.is_none()
            && self.attributes.is_empty()
    }
}

impl Component {
    /// A bare node with no geometry or payload.
    pub fn new(id: impl Into<ComponentId>, component_type: ComponentType) -> Self {
        Self {
            id: id.into(),
            component_type,
            position: None,
            width: None,
            height: None,
            styles: None,
            children: component_type.is_container().then(Vec::new),
            attributes: Map::new(),
        }
    }

    /// A node carrying the defaults the builder gives a freshly added component.
    pub fn with_defaults(id: ComponentId, component_type: ComponentType, position: Position) -> Self {
        let defaults = component_type.defaults();
        Self {
            id,
            component_type,
            position: Some(position),
            width: Some(defaults.width),
            height: Some(defaults.height),
            styles: Some(Styles::new()),
            children: component_type.is_container().then(Vec::new),
            attributes: defaults.attributes,
        }
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    pub fn with_size(mut self, width: &str, height: &str) -> Self {
        self.width = Some(Dimension::raw(width));
        self.height = Some(Dimension::raw(height));
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Appends a child; ignored for leaf types.
    pub fn with_child(mut self, child: Component) -> Self {
        if let Some(children) = self.children.as_mut() {
            children.push(child);
        }
        self
    }

    pub fn is_container(&self) -> bool {
        self.component_type.is_container()
    }

    pub fn position(&self) -> Position {
        self.position.unwrap_or_default()
    }

    pub fn width(&self) -> Dimension {
        self.width.clone().unwrap_or_default()
    }

    pub fn height(&self) -> Dimension {
        self.height.clone().unwrap_or_default()
    }

    /// Numeric size with `fallback` standing in for non-pixel lengths.
    pub fn size_or(&self, fallback: f64) -> DVec2 {
        DVec2::new(
            self.width.as_ref().and_then(Dimension::to_pixels).unwrap_or(fallback),
            self.height.as_ref().and_then(Dimension::to_pixels).unwrap_or(fallback),
        )
    }

    pub fn children(&self) -> &[Component] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|value| !value.is_null())
    }

    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attribute(key).and_then(Value::as_str)
    }

    pub fn attribute_bool(&self, key: &str) -> bool {
        self.attribute(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn content(&self) -> Option<&str> {
        self.attribute_str("content")
    }

    pub fn class_name(&self) -> Option<&str> {
        self.attribute_str("className").filter(|class| !class.is_empty())
    }

    pub fn styles(&self) -> Option<&Styles> {
        self.styles.as_ref()
    }

    pub fn apply(&mut self, patch: ComponentPatch) {
        let ComponentPatch {
            position,
            width,
            height,
            styles,
            attributes,
        } = patch;

        if let Some(position) = position {
            self.position = Some(position);
        }
        if let Some(width) = width {
            self.width = Some(width);
        }
        if let Some(height) = height {
            self.height = Some(height);
        }
        if let Some(styles) = styles {
            self.styles = Some(styles);
        }
        for (key, value) in attributes {
            // `type`/`id`/`children` are real fields; a stray attribute with
            // one of those names would shadow them on the wire.
            if matches!(key.as_str(), "id" | "type" | "children") {
                continue;
            }
            self.attributes.insert(key, value);
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children().iter().map(Component::subtree_len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_round_trip() {
        for component_type in ComponentType::ALL {
            let json = serde_json::to_string(&component_type).unwrap();
            assert_eq!(json, format!("\"{}\"", component_type.as_str()));
            let parsed: ComponentType = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, component_type);
        }
    }

    #[test]
    fn test_only_container_types_get_children() {
        for component_type in ComponentType::ALL {
            let component = Component::with_defaults("1".into(), component_type, Position::ORIGIN);
            assert_eq!(component.children.is_some(), component_type.is_container());
        }
        assert!(ComponentType::FormContainer.is_container());
        assert!(!ComponentType::FormInput.is_container());
    }

    #[test]
    fn test_defaults_for_heading() {
        let heading = Component::with_defaults("h".into(), ComponentType::Heading, Position::new(80.0, 80.0));
        assert_eq!(heading.content(), Some("New Heading"));
        assert!(heading.width().is_auto());
        assert_eq!(heading.styles().map(Styles::len), Some(0));
    }

    #[test]
    fn test_unknown_attributes_survive_round_trip() {
        let json = r#"{"id":"7","type":"button","position":{"x":10,"y":20.5},"content":"Go","href":"/next","data-track":{"event":"cta"}}"#;
        let component: Component = serde_json::from_str(json).unwrap();

        assert_eq!(component.position(), Position::new(10.0, 20.5));
        assert_eq!(component.attribute_str("href"), Some("/next"));
        assert_eq!(serde_json::to_string(&component).unwrap(), json);
    }

    #[test]
    fn test_interpreted_fields_serialize_before_attributes() {
        let json = r#"{"content":"Hi","id":"3","href":"/a","type":"button","width":"80px"}"#;
        let component: Component = serde_json::from_str(json).unwrap();

        assert_eq!(
            serde_json::to_string(&component).unwrap(),
            r#"{"id":"3","type":"button","width":"80px","content":"Hi","href":"/a"}"#
        );
        let reparsed: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_value(&component).unwrap(), reparsed);
    }

    #[test]
    fn test_patch_cannot_touch_identity() {
        let mut component = Component::new("a", ComponentType::Text);
        component.apply(
            ComponentPatch::new()
                .attribute("id", "b")
                .attribute("type", "image")
                .attribute("content", "hello"),
        );

        assert_eq!(component.id.as_str(), "a");
        assert_eq!(component.component_type, ComponentType::Text);
        assert_eq!(component.content(), Some("hello"));
    }

    #[test]
    fn test_size_fallback_for_auto() {
        let component = Component::new("a", ComponentType::Image).with_size("auto", "120px");
        assert_eq!(component.size_or(100.0), DVec2::new(100.0, 120.0));
    }
}
