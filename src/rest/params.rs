//! Flat, possibly multi-valued request parameters.

use std::cell::RefCell;

use ahash::{AHashMap, AHashSet};

/// Parameter values meaning "everything" in list parameters.
const ALL_VALUES: &[&str] = &["_all", "*"];

/// Request parameters from the query string and path segments.
///
/// Each name maps to the values in the order they were supplied. Reads are
/// recorded so the caller can tell which parameters went unused.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    values: AHashMap<String, Vec<String>>,
    consumed: RefCell<AHashSet<String>>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a URL query string such as `text=foo&filter=lowercase`.
    ///
    /// A leading `?` is ignored; names and values are percent-decoded.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Add a value for `name`, keeping earlier values.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    /// Add a value captured from a path segment, e.g. `{index}`.
    pub fn with_path_param<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.insert(name, value);
        self
    }

    /// The last value supplied for `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.raw(name).and_then(|values| values.last()).map(String::as_str)
    }

    /// All values supplied for `name`, each split on commas.
    pub fn param_as_string_array(&self, name: &str, default: &[String]) -> Vec<String> {
        match self.raw(name) {
            Some(values) => split_values(values),
            None => default.to_vec(),
        }
    }

    /// Like [`param_as_string_array`](Self::param_as_string_array), but a
    /// request for all values (`_all` or `*`) yields an empty array.
    pub fn param_as_string_array_or_empty_if_all(&self, name: &str) -> Vec<String> {
        let values = self.param_as_string_array(name, &[]);
        if values.len() == 1 && ALL_VALUES.contains(&values[0].as_str()) {
            Vec::new()
        } else {
            values
        }
    }

    /// The value of `name` as a boolean.
    ///
    /// `false`, `0`, `off`, `no` and the empty string read as false; any other
    /// value reads as true.
    pub fn param_as_boolean(&self, name: &str, default: bool) -> bool {
        match self.param(name) {
            Some(value) => !matches!(value, "" | "false" | "0" | "off" | "no"),
            None => default,
        }
    }

    /// Names of supplied parameters that were never read.
    pub fn unconsumed(&self) -> Vec<String> {
        let consumed = self.consumed.borrow();
        let mut names: Vec<String> = self
            .values
            .keys()
            .filter(|name| !consumed.contains(name.as_str()))
            .cloned()
            .collect();
        names.sort();
        names
    }

    fn raw(&self, name: &str) -> Option<&Vec<String>> {
        self.consumed.borrow_mut().insert(name.to_string());
        self.values.get(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RequestParams::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

fn split_values(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
