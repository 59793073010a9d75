//! Template catalog.
//!
//! The catalog is loaded once at startup (built-in list or `[[templates]]`
//! from config) and never mutated afterwards.

mod builtin;
mod template;

pub use template::{TemplateDescriptor, TemplateId};

use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur when building a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Template '{name}' has reserved id 0")]
    ZeroId { name: String },

    #[error("Duplicate template id {id}")]
    DuplicateId { id: TemplateId },

    #[error("Template {id} has an empty name")]
    BlankName { id: TemplateId },
}

/// Ordered, immutable list of templates with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    templates: Vec<TemplateDescriptor>,
}

impl Catalog {
    /// Build a catalog, rejecting zero ids, duplicate ids and blank names.
    pub fn new(templates: Vec<TemplateDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(templates.len());
        for template in &templates {
            if !template.id.is_valid() {
                return Err(CatalogError::ZeroId {
                    name: template.name.clone(),
                });
            }
            if template.name.trim().is_empty() {
                return Err(CatalogError::BlankName { id: template.id });
            }
            if !seen.insert(template.id) {
                return Err(CatalogError::DuplicateId { id: template.id });
            }
        }
        Ok(Self { templates })
    }

    /// The eight default subtitle styles.
    pub fn builtin() -> Self {
        Self {
            templates: builtin::builtin_templates(),
        }
    }

    pub fn get(&self, id: TemplateId) -> Option<&TemplateDescriptor> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TemplateId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateDescriptor> {
        self.templates.iter()
    }

    pub fn as_slice(&self) -> &[TemplateDescriptor] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
