//! Query parameter sets.
//!
//! [`QueryParams`] is the already-materialized input of a decode call: every
//! parameter name with its values, in the order they appeared in the query
//! string.

use url::Url;

/// Ordered multimap from parameter name to raw values.
///
/// Names are stored as given. Exact lookups use [`get`](Self::get); the
/// decoder matches names ignoring case through [`matching`](Self::matching).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        QueryParams::default()
    }

    /// Parses an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored. Names and values are percent-decoded and
    /// `+` decodes to a space.
    ///
    /// ```
    /// use qparams::QueryParams;
    ///
    /// let params = QueryParams::from_query_str("?embed=User,Order&embed=Discount&q=a+b");
    /// assert_eq!(params.get_all("embed"), ["User,Order", "Discount"]);
    /// assert_eq!(params.get("q"), Some("a b"));
    /// ```
    pub fn from_query_str(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        url::form_urlencoded::parse(query.as_bytes()).collect()
    }

    /// Collects the query component of a URL.
    pub fn from_url(url: &Url) -> Self {
        url.query_pairs().collect()
    }

    /// Adds a value under `name`, after any existing values.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// First value stored under exactly `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    /// All values stored under exactly `name`.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// Values of every parameter whose lower-cased name equals `name`.
    ///
    /// `name` must already be lower-cased. Parameters are visited in order of
    /// first appearance, values in the order they were added.
    pub fn matching<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(n, _)| n.to_lowercase() == name)
            .flat_map(|(_, values)| values.iter().map(String::as_str))
    }

    /// Parameter names, in order of first appearance.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for QueryParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.append(name, value);
        }
    }
}

impl From<&Url> for QueryParams {
    fn from(url: &Url) -> Self {
        QueryParams::from_url(url)
    }
}
