/// Types that expose a comparable name.
pub trait HasName {
    fn get_name(&self) -> &str;
}

// Delegate HasName to references
impl<T: HasName + ?Sized> HasName for &T {
    fn get_name(&self) -> &str {
        (*self).get_name()
    }
}

/// Sorting helpers for slices of `T: HasName`.
pub trait SortByName {
    /// Stable, ascending sort by `get_name()`.
    fn sort_by_name(&mut self);
}

impl<T: HasName> SortByName for [T] {
    fn sort_by_name(&mut self) {
        self.sort_by(|a, b| a.get_name().cmp(b.get_name()));
    }
}

/// Position of the first item called `name`.
pub fn position_by_name<T: HasName>(items: &[T], name: &str) -> Option<usize> {
    items.iter().position(|x| x.get_name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(String);
    impl HasName for Named {
        fn get_name(&self) -> &str {
            &self.0
        }
    }

    #[test]
    fn test_sort_by_name() {
        let mut items = vec![
            Named("outlet".to_string()),
            Named("inlet".to_string()),
            Named("walls".to_string()),
        ];
        items.as_mut_slice().sort_by_name();
        assert_eq!(items[0].get_name(), "inlet");
        assert_eq!(items[1].get_name(), "outlet");
        assert_eq!(items[2].get_name(), "walls");
    }

    #[test]
    fn test_sort_references() {
        let a = Named("b".to_string());
        let b = Named("a".to_string());
        let mut refs = vec![&a, &b];
        refs.as_mut_slice().sort_by_name();
        assert_eq!(refs[0].get_name(), "a");
    }

    #[test]
    fn test_position_by_name() {
        let items = vec![Named("inlet".to_string()), Named("outlet".to_string())];
        assert_eq!(position_by_name(&items, "outlet"), Some(1));
        assert_eq!(position_by_name(&items, "walls"), None);
    }
}
