// crates/pagecraft-core/src/lib.rs
pub mod component;
pub mod dimension;
pub mod document;
pub mod events;
pub mod ids;
pub mod placement;
pub mod styles;
pub mod tree;

pub use component::*;
pub use dimension::*;
pub use document::*;
pub use events::*;
pub use ids::*;
pub use placement::*;
pub use styles::*;
pub use tree::*;

#[derive(Debug, thiserror::Error)]
pub enum PagecraftError {
    #[error("Invalid page document: {0}")]
    InvalidDocument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate component id: {0}")]
    DuplicateId(String),

    #[error("Component type {0} cannot hold children")]
    NotAContainer(String),
}

pub type Result<T> = std::result::Result<T, PagecraftError>;
