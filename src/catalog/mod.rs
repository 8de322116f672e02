//! The catalog of node types an editor can offer.

use crate::error::CatalogError;
use ahash::AHashMap;

mod definition;
mod source;

pub use definition::*;
pub use source::*;

/// Tracing target for catalog operations.
pub const TRACING_TARGET: &str = "pipegraph::catalog";

/// An ordered, name-indexed set of `NodeTypeDefinition`s.
///
/// Immutable once built. An empty catalog is valid: the editor stays usable,
/// it just has no node types to offer.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    definitions: Vec<NodeTypeDefinition>,
    by_name: AHashMap<String, usize>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate type names.
    pub fn from_definitions(definitions: Vec<NodeTypeDefinition>) -> Result<Self, CatalogError> {
        let mut by_name = AHashMap::with_capacity(definitions.len());
        for (index, definition) in definitions.iter().enumerate() {
            if by_name.insert(definition.name.clone(), index).is_some() {
                return Err(CatalogError::DuplicateName(definition.name.clone()));
            }
        }
        Ok(Self {
            definitions,
            by_name,
        })
    }

    /// Parses and builds a catalog from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::from_definitions(parse_definitions(json)?)
    }

    /// Loads the catalog from `source`, falling back to an empty catalog on any failure.
    pub async fn load(source: &dyn CatalogSource) -> Self {
        match Self::try_load(source).await {
            Ok(catalog) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    node_types = catalog.len(),
                    "Node-type catalog loaded"
                );
                catalog
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    %error,
                    "Failed to load node-type catalog, continuing with an empty catalog"
                );
                Self::empty()
            }
        }
    }

    /// Loads the catalog from `source`, reporting failures to the caller.
    pub async fn try_load(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let definitions = source.load_definitions().await?;
        Self::from_definitions(definitions)
    }

    pub fn get(&self, name: &str) -> Option<&NodeTypeDefinition> {
        self.by_name.get(name).map(|&index| &self.definitions[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeTypeDefinition> {
        self.definitions.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
