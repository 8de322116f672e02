use super::NodeTypeDefinition;
use crate::error::CatalogError;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Where node-type definitions come from.
///
/// Implement this for whatever backs the catalog in your deployment (a static
/// JSON asset, an HTTP endpoint, a database table). The session calls it once
/// when the editor starts.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_definitions(&self) -> Result<Vec<NodeTypeDefinition>, CatalogError>;
}

/// Top-level shapes accepted for a catalog document.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped { functions: Vec<NodeTypeDefinition> },
    Bare(Vec<NodeTypeDefinition>),
}

/// Parses a catalog document, either `{"functions": [...]}` or a bare array.
pub fn parse_definitions(json: &str) -> Result<Vec<NodeTypeDefinition>, CatalogError> {
    let document: CatalogDocument =
        serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
    Ok(match document {
        CatalogDocument::Wrapped { functions } => functions,
        CatalogDocument::Bare(definitions) => definitions,
    })
}

/// Reads the catalog from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonCatalogFile {
    path: PathBuf,
}

impl JsonCatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for JsonCatalogFile {
    async fn load_definitions(&self) -> Result<Vec<NodeTypeDefinition>, CatalogError> {
        let content = fs::read_to_string(&self.path).map_err(|e| CatalogError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        parse_definitions(&content)
    }
}

/// A fixed, in-memory list of definitions.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    definitions: Vec<NodeTypeDefinition>,
}

impl StaticCatalog {
    pub fn new(definitions: Vec<NodeTypeDefinition>) -> Self {
        Self { definitions }
    }
}

#[async_trait::async_trait]
impl CatalogSource for StaticCatalog {
    async fn load_definitions(&self) -> Result<Vec<NodeTypeDefinition>, CatalogError> {
        Ok(self.definitions.clone())
    }
}
