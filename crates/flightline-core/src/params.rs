//! Insertion-ordered query parameter mapping.
//!
//! Upstream queries are assembled from three layers: the server-held
//! credential, fixed paging defaults, and caller-supplied parameters.
//! The two merge flavors below reproduce the observable layering rules:
//! `overlay` behaves like a record spread (a key wholly replaces the same
//! key), `merge` behaves like URL search params (single values are set,
//! multi-values are appended positionally).

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapping pre-seeded with the upstream paging defaults.
    pub fn page_defaults() -> Self {
        let mut params = Self::new();
        params.set("limit", "5");
        params.set("offset", "0");
        params
    }

    /// Replace the key's values with a single value. An existing key keeps
    /// its original position.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => {
                values.clear();
                values.push(value.to_string());
            }
            None => self
                .entries
                .push((key.to_string(), vec![value.to_string()])),
        }
    }

    /// Add a value to the key, creating the key at the end when absent.
    pub fn append(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value.to_string()),
            None => self
                .entries
                .push((key.to_string(), vec![value.to_string()])),
        }
    }

    /// First value recorded for the key, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record-spread semantics: every key group in `other` wholly replaces
    /// the same key here.
    pub fn overlay(&mut self, other: &QueryParams) {
        for (key, values) in &other.entries {
            match self.entries.iter_mut().find(|(k, _)| k == key) {
                Some((_, existing)) => *existing = values.clone(),
                None => self.entries.push((key.clone(), values.clone())),
            }
        }
    }

    /// URL-search-params semantics: a single-valued key in `other` is set,
    /// a multi-valued key has each value appended in order.
    pub fn merge(&mut self, other: &QueryParams) {
        for (key, values) in &other.entries {
            if let [value] = values.as_slice() {
                self.set(key, value);
            } else {
                for value in values {
                    self.append(key, value);
                }
            }
        }
    }

    /// Build a mapping from decoded query pairs. Repeated keys accumulate
    /// into a multi-valued group, matching how a query string carrying the
    /// same key twice reaches the proxy.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.append(key.as_ref(), value.as_ref());
        }
        params
    }

    /// Flattened `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(key, values)| {
            values.iter().map(move |value| (key.as_str(), value.as_str()))
        })
    }

    /// `&`-joined percent-encoded pairs in insertion order.
    pub fn encode(&self) -> String {
        self.iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
