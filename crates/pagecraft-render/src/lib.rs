// crates/pagecraft-render/src/lib.rs

use pagecraft_core::{Component, ComponentType, PageDocument, PagecraftError};
use serde_json::Value;
use tracing::debug;

pub mod forms;
pub mod icons;
pub mod markdown;
pub mod markup;

pub use forms::*;
pub use icons::*;
pub use markdown::*;
pub use markup::{escape, Tag};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to write markup: {0}")]
    Format(#[from] std::fmt::Error),
    #[error("Invalid page document: {0}")]
    Document(#[from] PagecraftError),
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

pub const EMPTY_PAGE_MESSAGE: &str = "Page content coming soon.";

const DRAFT_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="h-5 w-5" viewBox="0 0 20 20" fill="currentColor"><path fill-rule="evenodd" d="M8.257 3.099c.765-1.36 2.722-1.36 3.486 0l5.58 9.92c.75 1.334-.213 2.98-1.742 2.98H4.42c-1.53 0-2.493-1.646-1.743-2.98l5.58-9.92zM11 13a1 1 0 11-2 0 1 1 0 012 0zm-1-8a1 1 0 00-1 1v3a1 1 0 002 0V6a1 1 0 00-1-1z" clip-rule="evenodd"/></svg>"#;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub is_draft: bool,
    pub show_draft_banner: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            is_draft: false,
            show_draft_banner: true,
        }
    }
}

/// Read-only HTML renderer for page documents.
///
/// Walks the tree once and never mutates it. Markup for raw HTML, custom
/// SVG icons and embed codes is inserted as-is: sanitizing it is up to the
/// host.
pub struct HtmlRenderer {
    icons: Box<dyn IconLibrary>,
    markdown: Box<dyn MarkdownConverter>,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self {
            icons: Box::new(NoIcons),
            markdown: default_converter(),
        }
    }

    pub fn with_icons(mut self, icons: impl IconLibrary + 'static) -> Self {
        self.icons = Box::new(icons);
        self
    }

    pub fn with_markdown(mut self, markdown: impl MarkdownConverter + 'static) -> Self {
        self.markdown = Box::new(markdown);
        self
    }

    /// Full page: placeholder when empty, otherwise optional draft banner,
    /// title and the component list.
    pub fn render_page(&self, document: &PageDocument, options: &RenderOptions) -> RenderResult<String> {
        let mut out = String::new();
        let components = document.components.roots();

        if components.is_empty() {
            Tag::new("div")
                .attr("class", "container mx-auto px-4 py-12")
                .text(&mut out, EMPTY_PAGE_MESSAGE)?;
            return Ok(out);
        }

        Tag::new("div").attr("class", "min-h-screen py-12").wrap(&mut out, |out| {
            if options.is_draft && options.show_draft_banner {
                write_draft_banner(out)?;
            }
            Tag::new("div").attr("class", "container mx-auto px-4").wrap(out, |out| {
                if !document.page_name.is_empty() {
                    Tag::new("h1")
                        .attr("class", "text-4xl font-bold mb-8")
                        .text(out, &document.page_name)?;
                }
                Tag::new("div")
                    .attr("class", "space-y-4")
                    .wrap(out, |out| self.write_components(components, out))
            })
        })?;

        debug!("Rendered page '{}' ({} components)", document.page_name, document.components.len());
        Ok(out)
    }

    /// Parses a page document and renders it.
    pub fn render_json(&self, source: &str, options: &RenderOptions) -> RenderResult<String> {
        let document = PageDocument::from_json_str(source)?;
        self.render_page(&document, options)
    }

    pub fn render_component(&self, component: &Component) -> RenderResult<String> {
        let mut out = String::new();
        self.write_component(component, &mut out)?;
        Ok(out)
    }

    fn write_components(&self, components: &[Component], out: &mut String) -> RenderResult<()> {
        for component in components {
            self.write_component(component, out)?;
        }
        Ok(())
    }

    fn write_component(&self, component: &Component, out: &mut String) -> RenderResult<()> {
        let class = |fallback: &str| component.class_name().unwrap_or(fallback).to_string();
        let content = component.content().unwrap_or_default();
        let styles = style_css(component, Vec::new());

        match component.component_type {
            ComponentType::Heading => Tag::new("h2")
                .attr("class", class("text-3xl font-bold mb-4"))
                .style(styles)
                .text(out, content),
            ComponentType::Text => Tag::new("div")
                .attr("class", class("text-gray-600 mb-4"))
                .style(styles)
                .wrap(out, |out| {
                    Tag::new("div")
                        .attr("class", "prose prose-sm max-w-none")
                        .raw(out, &self.markdown.to_html(content))
                }),
            ComponentType::Button => Tag::new("a")
                .attr("href", component.attribute_str("href").filter(|href| !href.is_empty()).unwrap_or("#"))
                .attr("class", class("btn btn-primary"))
                .style(styles)
                .text(out, content),
            ComponentType::Image => {
                let mut sizing = Vec::new();
                if let Some(width) = component.width.as_ref().filter(|width| !width.is_auto()) {
                    sizing.push(("width".to_string(), width.to_string()));
                }
                if let Some(height) = component.height.as_ref().filter(|height| !height.is_auto()) {
                    sizing.push(("height".to_string(), height.to_string()));
                }
                Tag::void("img")
                    .attr("src", content)
                    .attr("alt", "")
                    .attr("class", class("w-full h-auto"))
                    .style(style_css(component, sizing))
                    .empty(out)
            }
            ComponentType::Divider => Tag::new("div")
                .attr("class", class("divider my-8"))
                .style(styles)
                .empty(out),
            ComponentType::Spacer => Tag::new("div")
                .attr("class", class("h-12"))
                .style(styles)
                .empty(out),
            ComponentType::Columns => Tag::new("div")
                .attr("class", class("grid grid-cols-1 md:grid-cols-2 gap-4 mb-4"))
                .style(styles)
                .wrap(out, |out| self.write_components(component.children(), out)),
            ComponentType::Container => Tag::new("div")
                .attr("class", class("p-4 mb-4"))
                .style(styles)
                .wrap(out, |out| self.write_components(component.children(), out)),
            ComponentType::Html => Tag::new("div").raw(out, content),
            ComponentType::Icon => self.write_icon(component, out),
            ComponentType::Embed => {
                let sizing = vec![
                    ("width".to_string(), component.width().to_string()),
                    ("height".to_string(), component.height().to_string()),
                ];
                Tag::new("div")
                    .attr_opt("class", component.class_name())
                    .style(style_css(component, sizing))
                    .raw(out, component.attribute_str("embedCode").unwrap_or_default())
            }
            ComponentType::FormContainer => {
                let settings = FormSettings::from_component(component);
                Tag::new("form")
                    .attr("action", settings.action)
                    .attr("method", settings.method)
                    .attr("data-success-message", settings.success_message)
                    .attr("data-error-message", settings.error_message)
                    .attr_opt("class", component.class_name())
                    .style(styles)
                    .wrap(out, |out| self.write_components(component.children(), out))
            }
            ComponentType::FormInput => write_field(component, out, |out| {
                Tag::void("input")
                    .attr("type", component.attribute_str("inputType").unwrap_or("text"))
                    .attr_opt("name", component.attribute_str("name"))
                    .attr_opt("placeholder", component.attribute_str("placeholder"))
                    .flag("required", component.attribute_bool("required"))
                    .attr("class", class("input input-bordered w-full"))
                    .empty(out)
            }),
            ComponentType::FormTextarea => write_field(component, out, |out| {
                let rows = component
                    .attribute("rows")
                    .and_then(Value::as_u64)
                    .filter(|rows| *rows > 0)
                    .unwrap_or(4);
                Tag::new("textarea")
                    .attr_opt("name", component.attribute_str("name"))
                    .attr_opt("placeholder", component.attribute_str("placeholder"))
                    .flag("required", component.attribute_bool("required"))
                    .attr("rows", rows.to_string())
                    .attr("class", class("textarea textarea-bordered w-full"))
                    .empty(out)
            }),
            ComponentType::FormSelect => write_field(component, out, |out| {
                Tag::new("select")
                    .attr_opt("name", component.attribute_str("name"))
                    .flag("required", component.attribute_bool("required"))
                    .attr("class", class("select select-bordered w-full"))
                    .wrap(out, |out| {
                        Tag::new("option").attr("value", "").text(out, "Select...")?;
                        for option in options(component) {
                            Tag::new("option").attr("value", option.clone()).text(out, &option)?;
                        }
                        Ok(())
                    })
            }),
            ComponentType::FormCheckbox => Tag::new("div").attr("class", "form-control mb-4").wrap(out, |out| {
                Tag::new("label")
                    .attr("class", "label cursor-pointer justify-start gap-2")
                    .wrap(out, |out| {
                        Tag::void("input")
                            .attr("type", "checkbox")
                            .attr_opt("name", component.attribute_str("name"))
                            .flag("required", component.attribute_bool("required"))
                            .attr("class", class("checkbox"))
                            .empty(out)?;
                        label_text(out, component.attribute_str("label").unwrap_or_default())
                    })
            }),
            ComponentType::FormRadioGroup => write_field(component, out, |out| {
                let required = component.attribute_bool("required");
                for (index, option) in options(component).into_iter().enumerate() {
                    Tag::new("label")
                        .attr("class", "label cursor-pointer justify-start gap-2")
                        .wrap(out, |out| {
                            Tag::void("input")
                                .attr("type", "radio")
                                .attr_opt("name", component.attribute_str("name"))
                                .attr("value", option.clone())
                                .attr("class", "radio")
                                .flag("required", required && index == 0)
                                .empty(out)?;
                            label_text(out, &option)
                        })?;
                }
                Ok(())
            }),
            ComponentType::FormFile => write_field(component, out, |out| {
                Tag::void("input")
                    .attr("type", "file")
                    .attr_opt("name", component.attribute_str("name"))
                    .attr_opt("accept", component.attribute_str("accept"))
                    .flag("required", component.attribute_bool("required"))
                    .attr("class", class("file-input file-input-bordered w-full"))
                    .empty(out)
            }),
            ComponentType::FormDate => write_field(component, out, |out| {
                Tag::void("input")
                    .attr("type", "date")
                    .attr_opt("name", component.attribute_str("name"))
                    .flag("required", component.attribute_bool("required"))
                    .attr("class", class("input input-bordered w-full"))
                    .empty(out)
            }),
            ComponentType::FormSubmit => Tag::new("button")
                .attr("type", "submit")
                .attr("class", class("btn btn-primary"))
                .text(out, content),
        }
    }

    fn write_icon(&self, component: &Component, out: &mut String) -> RenderResult<()> {
        let library = component.attribute_str("iconLibrary").unwrap_or_default();
        if library == "custom" {
            return Tag::new("div").raw(out, component.attribute_str("customSvg").unwrap_or_default());
        }

        let size = component
            .attribute("size")
            .map(|size| match size {
                Value::String(size) => size.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| "24".to_string());
        let color = component.attribute_str("color").unwrap_or("#000000");
        let class_name = component.attribute_str("className").unwrap_or_default();
        let name = component.attribute_str("iconName").unwrap_or_default();

        match self.icons.lookup(library, name) {
            Some(svg) => Tag::new("span")
                .attr_opt("class", component.class_name())
                .attr("style", format!("width: {size}px; height: {size}px; color: {color};"))
                .raw(out, &svg),
            None => Tag::new("div")
                .attr("class", format!("inline-flex items-center justify-center {class_name}").trim_end())
                .attr("style", format!("width: {size}px; height: {size}px; border: 1px dashed #ccc;"))
                .text(out, "?"),
        }
    }
}

fn write_draft_banner(out: &mut String) -> RenderResult<()> {
    Tag::new("div")
        .attr("class", "bg-warning text-warning-content py-2 px-4")
        .wrap(out, |out| {
            Tag::new("div")
                .attr("class", "container mx-auto flex items-center justify-between")
                .wrap(out, |out| {
                    Tag::new("div").attr("class", "flex items-center gap-2").wrap(out, |out| {
                        out.push_str(DRAFT_ICON);
                        Tag::new("span").attr("class", "font-semibold").text(out, "DRAFT MODE")?;
                        Tag::new("span")
                            .attr("class", "text-sm")
                            .text(out, "This page is only visible to admins")
                    })
                })
        })
}

/// Labelled form control wrapper shared by most field types.
fn write_field<F>(component: &Component, out: &mut String, control: F) -> RenderResult<()>
where
    F: FnOnce(&mut String) -> RenderResult<()>,
{
    Tag::new("div").attr("class", "form-control mb-4").wrap(out, |out| {
        Tag::new("label").attr("class", "label").wrap(out, |out| {
            label_text(out, component.attribute_str("label").unwrap_or_default())?;
            if component.attribute_bool("required") {
                Tag::new("span").attr("class", "text-error").text(out, "*")?;
            }
            Ok(())
        })?;
        control(out)
    })
}

fn label_text(out: &mut String, text: &str) -> RenderResult<()> {
    Tag::new("span").attr("class", "label-text").text(out, text)
}

fn options(component: &Component) -> Vec<String> {
    component
        .attribute("options")
        .and_then(Value::as_array)
        .map(|options| {
            options
                .iter()
                .map(|option| match option {
                    Value::String(option) => option.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Per-type declarations first, then the component's own styles.
fn style_css(component: &Component, mut declarations: Vec<(String, String)>) -> String {
    if let Some(styles) = component.styles() {
        declarations.extend(styles.inline_declarations());
    }
    declarations
        .iter()
        .map(|(property, value)| format!("{property}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_core::ComponentTree;

    fn renderer() -> HtmlRenderer {
        HtmlRenderer::new().with_markdown(PlainText)
    }

    fn page(components: Vec<Component>) -> PageDocument {
        PageDocument::new(ComponentTree::from_roots(components).unwrap())
    }

    #[test]
    fn test_empty_page_placeholder() {
        let html = renderer().render_page(&PageDocument::default(), &RenderOptions::default()).unwrap();
        insta::assert_snapshot!(html, @r#"<div class="container mx-auto px-4 py-12">Page content coming soon.</div>"#);
    }

    #[test]
    fn test_heading_and_button() {
        let heading = Component::new("h", ComponentType::Heading).with_attribute("content", "Hi & welcome");
        let button = Component::new("b", ComponentType::Button)
            .with_attribute("content", "Go")
            .with_attribute("className", "");

        insta::assert_snapshot!(renderer().render_component(&heading).unwrap(), @r#"<h2 class="text-3xl font-bold mb-4">Hi &amp; welcome</h2>"#);
        insta::assert_snapshot!(renderer().render_component(&button).unwrap(), @r##"<a href="#" class="btn btn-primary">Go</a>"##);
    }

    #[test]
    fn test_image_sizing_and_styles() {
        let mut image = Component::new("i", ComponentType::Image)
            .with_size("400px", "auto")
            .with_attribute("content", "/cat.png");
        image.styles = Some(serde_json::from_str(r#"{"borderRadius":"8px"}"#).unwrap());

        insta::assert_snapshot!(renderer().render_component(&image).unwrap(), @r#"<img src="/cat.png" alt="" class="w-full h-auto" style="width: 400px; border-radius: 8px;">"#);
    }

    #[test]
    fn test_text_goes_through_markdown() {
        let text = Component::new("t", ComponentType::Text).with_attribute("content", "a\nb");
        insta::assert_snapshot!(renderer().render_component(&text).unwrap(), @r#"<div class="text-gray-600 mb-4"><div class="prose prose-sm max-w-none"><p>a<br>b</p></div></div>"#);
    }

    #[test]
    fn test_form_fields() {
        let input = Component::new("e", ComponentType::FormInput)
            .with_attribute("label", "Email")
            .with_attribute("name", "email")
            .with_attribute("inputType", "email")
            .with_attribute("required", true);
        let form = Component::new("f", ComponentType::FormContainer).with_child(input);

        insta::assert_snapshot!(renderer().render_component(&form).unwrap(), @r#"<form action="/api/forms/submit" method="POST" data-success-message="Form submitted successfully!" data-error-message="Failed to submit form. Please try again."><div class="form-control mb-4"><label class="label"><span class="label-text">Email</span><span class="text-error">*</span></label><input type="email" name="email" required class="input input-bordered w-full"></div></form>"#);
    }

    #[test]
    fn test_radio_group_requires_first_option_only() {
        let radio = Component::new("r", ComponentType::FormRadioGroup)
            .with_attribute("name", "plan")
            .with_attribute("required", true)
            .with_attribute("options", serde_json::json!(["A", "B"]));
        let html = renderer().render_component(&radio).unwrap();

        assert_eq!(html.matches(" required").count(), 1);
        assert!(html.contains(r#"<input type="radio" name="plan" value="A" class="radio" required>"#));
    }

    #[test]
    fn test_icons() {
        let custom = Component::new("c", ComponentType::Icon)
            .with_attribute("iconLibrary", "custom")
            .with_attribute("customSvg", "<svg id=\"x\"/>");
        let known = Component::new("k", ComponentType::Icon)
            .with_attribute("iconLibrary", "lucide")
            .with_attribute("iconName", "Home")
            .with_attribute("size", "32");
        let unknown = Component::new("u", ComponentType::Icon)
            .with_attribute("iconLibrary", "lucide")
            .with_attribute("iconName", "Missing");

        let renderer = renderer().with_icons(StaticIcons::new().with_icon("lucide", "Home", "<svg/>"));

        insta::assert_snapshot!(renderer.render_component(&custom).unwrap(), @r#"<div><svg id="x"/></div>"#);
        insta::assert_snapshot!(renderer.render_component(&known).unwrap(), @r##"<span style="width: 32px; height: 32px; color: #000000;"><svg/></span>"##);
        insta::assert_snapshot!(renderer.render_component(&unknown).unwrap(), @r##"<div class="inline-flex items-center justify-center" style="width: 24px; height: 24px; border: 1px dashed #ccc;">?</div>"##);
    }

    #[test]
    fn test_draft_banner_toggle() {
        let document = page(vec![Component::new("d", ComponentType::Divider)]);
        let draft = RenderOptions {
            is_draft: true,
            show_draft_banner: true,
        };
        let hidden = RenderOptions {
            is_draft: true,
            show_draft_banner: false,
        };

        assert!(renderer().render_page(&document, &draft).unwrap().contains("DRAFT MODE"));
        assert!(!renderer().render_page(&document, &hidden).unwrap().contains("DRAFT MODE"));
        assert!(!renderer().render_page(&document, &RenderOptions::default()).unwrap().contains("DRAFT MODE"));
    }
}
