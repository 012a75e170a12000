use std::collections::HashSet;

/// Returns the first path segment of an archive entry name, or `None` when
/// the name has no usable segment (empty, or only separators).
pub fn top_level_name(raw: &str) -> Option<&str> {
    if raw.is_empty() {
        return None;
    }
    let first = raw.trim_matches('/').split('/').next()?;
    (!first.is_empty()).then_some(first)
}

/// Distinct top-level names of an archive. Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopLevelItems {
    names: HashSet<String>,
}

impl TopLevelItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the top-level segment of `raw`, ignoring names without one.
    pub fn insert_entry(&mut self, raw: &str) {
        if let Some(name) = top_level_name(raw) {
            if !self.names.contains(name) {
                tracing::debug!(entry = raw, top_level = name, "new top-level item");
                self.names.insert(name.to_string());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for TopLevelItems {
    fn from_iter<I: IntoIterator<Item = S>>(entries: I) -> Self {
        let mut items = TopLevelItems::new();
        for entry in entries {
            items.insert_entry(entry.as_ref());
        }
        items
    }
}
