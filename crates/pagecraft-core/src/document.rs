// crates/pagecraft-core/src/document.rs
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::{Component, ComponentTree, PagecraftError, Result};

/// A page as the host stores it: the component tree plus page identity.
///
/// Serializes to `{components, pageId, pageName, pageSlug}`, the shape handed
/// to the save callback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    pub components: ComponentTree,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<PageId>,
    #[serde(default)]
    pub page_name: String,
    #[serde(default)]
    pub page_slug: String,
}

/// Host-assigned page identifier. Hosts use both string and numeric ids; the
/// value is written back in the form it was read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageId {
    Number(Number),
    Text(String),
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageId::Number(number) => write!(f, "{}", number),
            PageId::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for PageId {
    fn from(value: &str) -> Self {
        PageId::Text(value.to_string())
    }
}

impl From<String> for PageId {
    fn from(value: String) -> Self {
        PageId::Text(value)
    }
}

impl From<u64> for PageId {
    fn from(value: u64) -> Self {
        PageId::Number(value.into())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentShape {
    Page(PageDocument),
    Components(Vec<Component>),
}

impl PageDocument {
    pub fn new(components: ComponentTree) -> Self {
        Self {
            components,
            ..Self::default()
        }
    }

    /// Parses either a full page object or a bare root component array.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let document = match serde_json::from_str::<DocumentShape>(source) {
            Ok(DocumentShape::Page(page)) => page,
            Ok(DocumentShape::Components(roots)) => Self::new(ComponentTree::from_roots(roots)?),
            Err(_) => {
                // Re-parse as a page so the error points at the real problem
                // instead of "did not match any variant".
                serde_json::from_str::<PageDocument>(source)?
            }
        };
        document.components.validate()?;
        Ok(document)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let document = Self::from_json_str(&source).map_err(|e| match e {
            PagecraftError::Json(json) => {
                PagecraftError::InvalidDocument(format!("{}: {}", path.display(), json))
            }
            other => other,
        })?;
        info!(
            "Loaded page '{}' from {} ({} components)",
            document.page_name,
            path.display(),
            document.components.len()
        );
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_pretty()?)?;
        info!("Saved page '{}' to {}", self.page_name, path.display());
        Ok(())
    }
}
