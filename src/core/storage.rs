use std::collections::BTreeMap;

/// A handle type that can be minted from a monotonically increasing id
pub trait Handle: Copy + Ord + std::fmt::Debug {
    /// Builds a handle from a raw id
    fn from_raw(id: u32) -> Self;

    /// Returns the raw id of the handle
    fn raw(&self) -> u32;
}

/// Handle-keyed storage.
///
/// Ids start at 1 and are never reused, so a handle to a removed item stays
/// invalid forever; this is the liveness check for every handle in the crate.
/// Iteration follows handle order, which keeps stepping deterministic.
#[derive(Debug, Clone)]
pub struct HandleStorage<H: Handle, T> {
    items: BTreeMap<H, T>,
    next_id: u32,
}

impl<H: Handle, T> Default for HandleStorage<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle, T> HandleStorage<H, T> {
    /// Creates a new empty storage
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1, // Start at 1, so 0 can represent invalid handle
        }
    }

    /// Adds an item to the storage and returns its handle
    pub fn add(&mut self, item: T) -> H {
        let handle = H::from_raw(self.next_id);
        self.next_id += 1;
        self.items.insert(handle, item);
        handle
    }

    /// Gets a reference to an item by its handle
    pub fn get(&self, handle: H) -> Option<&T> {
        self.items.get(&handle)
    }

    /// Gets a mutable reference to an item by its handle
    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.items.get_mut(&handle)
    }

    /// Removes an item from the storage
    pub fn remove(&mut self, handle: H) -> Option<T> {
        self.items.remove(&handle)
    }

    /// Returns whether an item is stored under the handle
    pub fn contains(&self, handle: H) -> bool {
        self.items.contains_key(&handle)
    }

    /// Returns the number of items in the storage
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the storage is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clears all items from the storage. Handles are not recycled.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns all handles in ascending order
    pub fn handles(&self) -> Vec<H> {
        self.items.keys().copied().collect()
    }

    /// Returns an iterator over all items
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> + '_ {
        self.items.iter().map(|(h, item)| (*h, item))
    }

    /// Returns a mutable iterator over all items
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (H, &mut T)> + '_ {
        self.items.iter_mut().map(|(h, item)| (*h, item))
    }
}
