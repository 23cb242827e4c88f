//! Option filtering

use crate::highlight::Highlighter;

/// Case-insensitive substring test used when no custom filter is supplied
///
/// Folds case the same way the menu highlights, so a kept label always shows
/// its match.
pub fn label_matches(label: &str, search: &str) -> bool {
    Highlighter::new(search).is_none_or(|h| h.is_match(label))
}

/// Indices of the options that stay visible for `search`
///
/// An empty search keeps everything. `filter` decides per option; callers pass
/// either their own predicate or one built on [`label_matches`].
pub fn filter_indices<T>(
    options: &[T],
    search: &str,
    mut filter: impl FnMut(&T, &str) -> bool,
) -> Vec<usize> {
    if search.is_empty() {
        return (0..options.len()).collect();
    }
    options
        .iter()
        .enumerate()
        .filter(|(_, opt)| filter(opt, search))
        .map(|(i, _)| i)
        .collect()
}
