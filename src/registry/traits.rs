//! Common trait for registries that store keyed items.

/// Common trait for registries that map keys to values.
///
/// This trait provides a unified interface for registries that store one
/// value per key. It defines common operations like checking existence,
/// retrieving items, and counting entries.
///
/// # Type Parameters
///
/// * `K` - The key type
/// * `V` - The type of value stored in the registry
///
/// # Example
///
/// ```
/// use beatloop::loops::LoopType;
/// use beatloop::registry::{ExecutorRegistry, Registry};
///
/// let registry = ExecutorRegistry::with_defaults();
/// assert!(registry.contains(&LoopType::StrictRotated));
/// assert!(!registry.contains(&LoopType::Rewound));
/// ```
pub trait Registry<K, V: ?Sized> {
    /// Check if an item with the given key exists in the registry.
    fn contains(&self, key: &K) -> bool;

    /// Get an item by key.
    ///
    /// Returns `None` if no item is registered under the key.
    fn get(&self, key: &K) -> Option<&V>;

    /// Get the number of items in the registry.
    fn len(&self) -> usize;

    /// Check if the registry is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all items from the registry.
    fn clear(&mut self);

    /// Get an iterator over all keys in the registry.
    fn keys(&self) -> Box<dyn Iterator<Item = &K> + '_>;
}
