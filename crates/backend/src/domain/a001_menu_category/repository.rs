//! Menu content sources.
//!
//! The backend stands in for the CMS: it hands out raw categories exactly as
//! authored. Normalisation stays on the client.

use async_trait::async_trait;
use contracts::domain::a001_menu_category::RawCategory;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Demo menu compiled into the binary
const DEMO_MENU: &str = include_str!("../../../data/demo_menu.json");

static MENU_SOURCE: OnceCell<Box<dyn MenuContentSource>> = OnceCell::new();

/// Ошибки источника контента меню
#[derive(Debug, Error)]
pub enum MenuContentError {
    #[error("Cannot read menu content from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid menu content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Menu content source is not initialized")]
    NotInitialized,
}

#[async_trait]
pub trait MenuContentSource: Send + Sync {
    /// Raw categories in authoring order
    async fn load_categories(&self) -> Result<Vec<RawCategory>, MenuContentError>;

    /// Human-readable origin for logs
    fn describe(&self) -> String;
}

/// Categories read from a JSON file on every request, so edits show up
/// without a restart.
pub struct FileMenuSource {
    path: PathBuf,
}

impl FileMenuSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl MenuContentSource for FileMenuSource {
    async fn load_categories(&self) -> Result<Vec<RawCategory>, MenuContentError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| MenuContentError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        parse_content(&contents)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

pub struct EmbeddedMenuSource;

#[async_trait]
impl MenuContentSource for EmbeddedMenuSource {
    async fn load_categories(&self) -> Result<Vec<RawCategory>, MenuContentError> {
        parse_content(DEMO_MENU)
    }

    fn describe(&self) -> String {
        "embedded demo menu".to_string()
    }
}

/// CMS exports come either as a bare array or wrapped in `{ "categories": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum MenuDocument {
    List(Vec<RawCategory>),
    Wrapped { categories: Vec<RawCategory> },
}

pub fn parse_content(json: &str) -> Result<Vec<RawCategory>, MenuContentError> {
    let document: MenuDocument = serde_json::from_str(json)?;
    Ok(match document {
        MenuDocument::List(categories) => categories,
        MenuDocument::Wrapped { categories } => categories,
    })
}

/// Picks the content source once at startup.
///
/// A configured file that does not exist falls back to the demo menu with a
/// warning instead of failing startup.
pub fn initialize_source(content_path: Option<PathBuf>) {
    let source: Box<dyn MenuContentSource> = match content_path {
        Some(path) if path.exists() => Box::new(FileMenuSource::new(path)),
        Some(path) => {
            tracing::warn!(
                "Menu content file not found at {}, serving the demo menu",
                path.display()
            );
            Box::new(EmbeddedMenuSource)
        }
        None => Box::new(EmbeddedMenuSource),
    };

    tracing::info!("Menu content source: {}", source.describe());
    if MENU_SOURCE.set(source).is_err() {
        tracing::warn!("Menu content source already initialized, keeping the first one");
    }
}

pub fn get_source() -> Result<&'static dyn MenuContentSource, MenuContentError> {
    MENU_SOURCE
        .get()
        .map(|source| source.as_ref())
        .ok_or(MenuContentError::NotInitialized)
}
