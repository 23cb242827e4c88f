//! Option items and selection values

use std::borrow::Cow;
use std::fmt;

/// An item that can be offered by a select field
///
/// The label is what the field shows and what default filtering matches
/// against. Membership in a selection is decided by `PartialEq`, so options
/// must carry stable, distinct values.
pub trait OptionItem: Clone + PartialEq {
    /// Text shown for this option
    fn label(&self) -> Cow<'_, str>;
}

/// The conventional `{ label, value }` option
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectOption<V> {
    pub label: String,
    pub value: V,
}

impl<V> SelectOption<V> {
    pub fn new(label: impl Into<String>, value: V) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl<V: Clone + PartialEq + fmt::Display> OptionItem for SelectOption<V> {
    /// The label, or the value's text when the label is empty
    fn label(&self) -> Cow<'_, str> {
        if self.label.is_empty() {
            Cow::Owned(self.value.to_string())
        } else {
            Cow::Borrowed(&self.label)
        }
    }
}

impl OptionItem for String {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl OptionItem for &str {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

/// A select field's value, owned by the caller
///
/// `Single` is used in single-select mode, `Multiple` in multi-select mode
/// (insertion order is selection order). The field never edits a value in
/// place; it builds a new one and hands it to `on_change`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Single(Option<T>),
    Multiple(Vec<T>),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::Single(None)
    }
}

impl<T> Selection<T> {
    /// The empty value for the given mode
    pub fn empty(multiple: bool) -> Self {
        if multiple {
            Selection::Multiple(Vec::new())
        } else {
            Selection::Single(None)
        }
    }

    /// Every selected item, whatever the mode
    pub fn items(&self) -> &[T] {
        match self {
            Selection::Single(Some(item)) => std::slice::from_ref(item),
            Selection::Single(None) => &[],
            Selection::Multiple(items) => items,
        }
    }

    /// The selected item in single mode
    pub fn single(&self) -> Option<&T> {
        match self {
            Selection::Single(item) => item.as_ref(),
            Selection::Multiple(_) => None,
        }
    }

    /// The selected items in multiple mode; empty for a single value
    pub fn multiple(&self) -> &[T] {
        match self {
            Selection::Multiple(items) => items,
            Selection::Single(_) => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

impl<T: Clone + PartialEq> Selection<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.items().contains(item)
    }

    /// Multiple-mode toggle: drop `item` if present, append it otherwise
    ///
    /// A non-`Multiple` value counts as an empty sequence.
    pub fn toggled(&self, item: &T) -> Vec<T> {
        let current = self.multiple();
        if current.contains(item) {
            self.without(item)
        } else {
            let mut next = current.to_vec();
            next.push(item.clone());
            next
        }
    }

    /// Multiple-mode removal of every entry equal to `item`, order kept
    pub fn without(&self, item: &T) -> Vec<T> {
        self.multiple()
            .iter()
            .filter(|v| *v != item)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit(label: &str, value: u32) -> SelectOption<u32> {
        SelectOption::new(label, value)
    }

    #[test]
    fn test_label_falls_back_to_value() {
        assert_eq!(fruit("Apple", 1).label(), "Apple");
        assert_eq!(fruit("", 7).label(), "7");
        assert_eq!("plain".label(), "plain");
        assert_eq!(String::from("owned").label(), "owned");
    }

    #[test]
    fn test_items_per_mode() {
        let single = Selection::Single(Some(fruit("Apple", 1)));
        assert_eq!(single.items().len(), 1);
        assert!(single.multiple().is_empty());
        assert_eq!(single.single(), Some(&fruit("Apple", 1)));

        let none: Selection<SelectOption<u32>> = Selection::empty(false);
        assert!(none.is_empty());

        let many = Selection::Multiple(vec![fruit("Apple", 1), fruit("Banana", 2)]);
        assert_eq!(many.items().len(), 2);
        assert_eq!(many.single(), None);
    }

    #[test]
    fn test_toggled_appends_then_removes() {
        let apple = fruit("Apple", 1);
        let banana = fruit("Banana", 2);
        let start = Selection::Multiple(vec![banana.clone()]);

        let once = Selection::Multiple(start.toggled(&apple));
        assert_eq!(once, Selection::Multiple(vec![banana.clone(), apple.clone()]));

        let twice = Selection::Multiple(once.toggled(&apple));
        assert_eq!(twice, start);
    }

    #[test]
    fn test_toggled_treats_single_value_as_empty() {
        let apple = fruit("Apple", 1);
        let stray = Selection::Single(Some(fruit("Banana", 2)));

        assert_eq!(stray.toggled(&apple), vec![apple]);
    }

    #[test]
    fn test_without_keeps_order() {
        let value = Selection::Multiple(vec![
            fruit("A", 1),
            fruit("B", 2),
            fruit("C", 3),
        ]);

        assert_eq!(value.without(&fruit("B", 2)), vec![fruit("A", 1), fruit("C", 3)]);
        assert_eq!(value.without(&fruit("Z", 9)).len(), 3);
    }
}
