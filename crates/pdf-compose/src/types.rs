use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Failed to load source document: {0}")]
    DocumentLoad(String),
    #[error("Page index {index} out of range ({len} pages)")]
    PageIndex { index: usize, len: usize },
    #[error("Font embedding failed: {0}")]
    FontEmbed(String),
    #[error("No pages to assemble")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, ComposeError>;

/// Handle to a source document registered with a [`crate::SourceSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentId(pub u64);
