/// One-to-many relation collection that may not have been fetched yet
///
/// Entities read with a plain lookup carry `Unloaded`; a fetch join or an
/// explicit initialisation replaces it with `Loaded`. Builder-created
/// entities start with an empty `Loaded` collection since nothing in the
/// store can refer to them yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation<T> {
    Unloaded,
    Loaded(Vec<T>),
}

impl<T> Relation<T> {
    /// An initialised, empty collection
    pub fn empty() -> Self {
        Relation::Loaded(Vec::new())
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Relation::Loaded(_))
    }

    /// The loaded items, or `None` if the relation was never fetched
    pub fn get(&self) -> Option<&[T]> {
        match self {
            Relation::Loaded(items) => Some(items),
            Relation::Unloaded => None,
        }
    }

    /// Mutable access to the loaded items
    pub fn get_mut(&mut self) -> Option<&mut Vec<T>> {
        match self {
            Relation::Loaded(items) => Some(items),
            Relation::Unloaded => None,
        }
    }

    /// Number of loaded items, or `None` if the relation was never fetched
    pub fn len(&self) -> Option<usize> {
        self.get().map(<[T]>::len)
    }

    /// Replace the collection with freshly fetched items
    pub fn set(&mut self, items: Vec<T>) {
        *self = Relation::Loaded(items);
    }

    /// Append an item when the collection is loaded
    ///
    /// Returns whether the item was added. An unloaded relation is left
    /// untouched: it will reflect the store once fetched.
    pub fn push_if_loaded(&mut self, item: T) -> bool {
        match self {
            Relation::Loaded(items) => {
                items.push(item);
                true
            }
            Relation::Unloaded => false,
        }
    }

    /// Forget the fetched items so the next access must reload them
    pub fn unload(&mut self) {
        *self = Relation::Unloaded;
    }
}

impl<T> Default for Relation<T> {
    fn default() -> Self {
        Relation::Unloaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unloaded_has_no_items() {
        let rel: Relation<u32> = Relation::default();
        assert!(!rel.is_loaded());
        assert_eq!(rel.get(), None);
        assert_eq!(rel.len(), None);
    }

    #[test]
    fn test_push_only_when_loaded() {
        let mut rel = Relation::Unloaded;
        assert!(!rel.push_if_loaded(1));
        assert!(!rel.is_loaded());

        // Equal values are distinct items
        let mut rel = Relation::empty();
        assert!(rel.push_if_loaded(1));
        assert!(rel.push_if_loaded(1));
        assert_eq!(rel.get(), Some(&[1, 1][..]));
    }

    #[test]
    fn test_set_and_unload() {
        let mut rel = Relation::Unloaded;
        assert!(rel.get_mut().is_none());
        rel.set(vec!["a", "b"]);
        assert_eq!(rel.len(), Some(2));
        if let Some(items) = rel.get_mut() {
            items.retain(|item| *item != "a");
        }
        assert_eq!(rel.get(), Some(&["b"][..]));
        rel.unload();
        assert_eq!(rel, Relation::Unloaded);
    }
}
