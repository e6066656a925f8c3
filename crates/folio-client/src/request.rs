//! Content request description.

use std::collections::BTreeMap;
use std::fmt;

/// A scalar query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(s) => f.write_str(s),
            QueryValue::Int(n) => write!(f, "{}", n),
            QueryValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::Str(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::Str(s)
    }
}

impl From<i64> for QueryValue {
    fn from(n: i64) -> Self {
        QueryValue::Int(n)
    }
}

impl From<u32> for QueryValue {
    fn from(n: u32) -> Self {
        QueryValue::Int(n.into())
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        QueryValue::Bool(b)
    }
}

/// A `GET` against a logical Content API resource.
///
/// Parameters are passed to the transport verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    /// Resource path relative to the Content API root, e.g. `posts/`.
    pub endpoint: String,
    pub query: BTreeMap<String, QueryValue>,
}

impl ContentRequest {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            query: BTreeMap::new(),
        }
    }

    /// Add or replace a query parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Query parameters rendered as name/value pairs, ordered by name.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .iter()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect()
    }
}
