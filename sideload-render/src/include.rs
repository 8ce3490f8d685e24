//! Include paths requested by a client.
//!
//! A request carries a comma-separated list of dotted relationship paths in
//! wire naming, eg. `author,comments,comments.author`. Matching is by whole
//! path segments: `comments` never matches a request for `comments-extra`.

use indexmap::IndexSet;

/// Set of requested include paths, parsed once per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludePaths {
    paths: IndexSet<String>,
}

impl IncludePaths {
    /// Create an empty set (nothing is sideloaded).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw `include` query value.
    ///
    /// Entries are trimmed; empty entries are dropped.
    pub fn parse(raw: &str) -> Self {
        raw.split(',').collect()
    }

    /// Add a path, builder style.
    pub fn add(mut self, path: impl AsRef<str>) -> Self {
        self.insert(path);
        self
    }

    fn insert(&mut self, path: impl AsRef<str>) {
        let path = path.as_ref().trim();
        if !path.is_empty() {
            self.paths.insert(path.to_string());
        }
    }

    /// True iff `candidate` equals a requested path.
    pub fn is_directly_included(&self, candidate: &str) -> bool {
        self.paths.contains(candidate)
    }

    /// True iff some requested path continues below `candidate`.
    pub fn has_descendant_included(&self, candidate: &str) -> bool {
        self.paths.iter().any(|path| {
            path.strip_prefix(candidate)
                .is_some_and(|rest| rest.starts_with('.'))
        })
    }

    /// True iff `candidate` is requested itself or lies on a requested path.
    pub fn touches(&self, candidate: &str) -> bool {
        self.is_directly_included(candidate) || self.has_descendant_included(candidate)
    }

    /// Requested paths in request order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Check if nothing was requested.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of requested paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

impl<S: AsRef<str>> FromIterator<S> for IncludePaths {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut paths = Self::new();
        for path in iter {
            paths.insert(path);
        }
        paths
    }
}

impl From<&str> for IncludePaths {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<Option<&str>> for IncludePaths {
    fn from(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }
}
