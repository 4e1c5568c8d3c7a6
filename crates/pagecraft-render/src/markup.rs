// crates/pagecraft-render/src/markup.rs
use std::fmt::Write;

use crate::RenderResult;

/// Escapes text for element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// One HTML element: name plus attributes in insertion order.
#[derive(Debug, Clone)]
pub struct Tag {
    name: &'static str,
    attributes: Vec<(&'static str, Option<String>)>,
    void: bool,
}

impl Tag {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            void: false,
        }
    }

    /// Element without content or closing tag (`img`, `input`).
    pub fn void(name: &'static str) -> Self {
        Self {
            void: true,
            ..Self::new(name)
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, Some(value.into())));
        self
    }

    /// Adds the attribute only when a value is present.
    pub fn attr_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Boolean attribute such as `required`.
    pub fn flag(mut self, name: &'static str, enabled: bool) -> Self {
        if enabled {
            self.attributes.push((name, None));
        }
        self
    }

    /// `style` attribute, skipped when there are no declarations.
    pub fn style(self, css: String) -> Self {
        if css.is_empty() {
            self
        } else {
            self.attr("style", css)
        }
    }

    pub fn open(&self, out: &mut String) -> RenderResult<()> {
        write!(out, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            match value {
                Some(value) => write!(out, " {}=\"{}\"", name, escape(value))?,
                None => write!(out, " {}", name)?,
            }
        }
        out.push('>');
        Ok(())
    }

    pub fn close(&self, out: &mut String) -> RenderResult<()> {
        if !self.void {
            write!(out, "</{}>", self.name)?;
        }
        Ok(())
    }

    /// Writes the element with `body` producing its content.
    pub fn wrap<F>(&self, out: &mut String, body: F) -> RenderResult<()>
    where
        F: FnOnce(&mut String) -> RenderResult<()>,
    {
        self.open(out)?;
        body(out)?;
        self.close(out)
    }

    /// Writes the element with escaped text content.
    pub fn text(&self, out: &mut String, text: &str) -> RenderResult<()> {
        self.wrap(out, |out| {
            out.push_str(&escape(text));
            Ok(())
        })
    }

    /// Writes the element with `html` inserted verbatim.
    pub fn raw(&self, out: &mut String, html: &str) -> RenderResult<()> {
        self.wrap(out, |out| {
            out.push_str(html);
            Ok(())
        })
    }

    pub fn empty(&self, out: &mut String) -> RenderResult<()> {
        self.wrap(out, |_| Ok(()))
    }
}
