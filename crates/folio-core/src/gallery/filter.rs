use crate::consts::FILTER_ALL;

/// Category ids currently selected in the filter bar.
///
/// Starts as `{"all"}` and is never empty: removing the last category
/// falls back to `{"all"}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveFilterSet {
    active: Vec<String>,
}

impl Default for ActiveFilterSet {
    fn default() -> Self {
        Self {
            active: vec![FILTER_ALL.to_string()],
        }
    }
}

impl ActiveFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one filter-button click.
    pub fn click(&mut self, filter: &str) {
        if filter == FILTER_ALL {
            self.reset();
            return;
        }

        self.active.retain(|f| f != FILTER_ALL);
        if let Some(pos) = self.active.iter().position(|f| f == filter) {
            self.active.remove(pos);
            if self.active.is_empty() {
                self.reset();
            }
        } else {
            self.active.push(filter.to_string());
        }
    }

    pub fn reset(&mut self) {
        self.active.clear();
        self.active.push(FILTER_ALL.to_string());
    }

    pub fn contains(&self, filter: &str) -> bool {
        self.active.iter().any(|f| f == filter)
    }

    pub fn is_all(&self) -> bool {
        self.contains(FILTER_ALL)
    }

    /// Selected ids in click order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Visibility predicate: "all" is selected, or any of `categories` is.
    pub fn matches<S: AsRef<str>>(&self, categories: &[S]) -> bool {
        self.is_all() || categories.iter().any(|c| self.contains(c.as_ref()))
    }
}
