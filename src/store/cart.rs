use crate::catalog::{TemplateDescriptor, TemplateId};

/// Templates staged for purchase, in the order they were added.
///
/// The cart does not enforce uniqueness itself; `Store::add_to_cart` checks
/// before pushing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<TemplateDescriptor>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, template: TemplateDescriptor) {
        self.items.push(template);
    }

    /// Remove the entry with `id`, returning it.
    pub(crate) fn remove(&mut self, id: TemplateId) -> Option<TemplateDescriptor> {
        let index = self.items.iter().position(|t| t.id == id)?;
        Some(self.items.remove(index))
    }

    /// Empty the cart, returning what it held.
    pub(crate) fn take(&mut self) -> Vec<TemplateDescriptor> {
        std::mem::take(&mut self.items)
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, id: TemplateId) -> bool {
        self.items.iter().any(|t| t.id == id)
    }

    pub fn total(&self) -> u64 {
        self.items.iter().map(|t| t.cost).sum()
    }

    pub fn ids(&self) -> Vec<TemplateId> {
        self.items.iter().map(|t| t.id).collect()
    }

    pub fn items(&self) -> &[TemplateDescriptor] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
