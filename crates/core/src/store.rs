//! Entity list store.
//!
//! The authoritative in-memory collection behind one list screen. It never fails and never
//! validates: whatever the last fetch delivered is kept verbatim, in server order.

use crate::models::{Entity, EntityId};

#[derive(Clone, Debug)]
pub struct EntityListStore<E> {
    items: Vec<E>,
}

impl<E> Default for EntityListStore<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<E: Entity> EntityListStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current contents and keep `items` as given.
    pub fn replace_all(&mut self, items: Vec<E>) {
        self.items = items;
    }

    /// Remove the first entity whose id equals `id`.
    ///
    /// Returns the removed entity, or `None` (and leaves the store untouched) if no entity has
    /// that id. Remaining entities keep their relative order.
    pub fn remove_by_id(&mut self, id: &EntityId) -> Option<E> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn all(&self) -> &[E] {
        &self.items
    }

    pub fn get(&self, id: &EntityId) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
