//! Search URL query parsing and validation
//!
//! Turns the raw query string of a `/search` request into validated
//! [`SearchUrlParams`]. Unknown filter values reject the whole request, while
//! malformed paging values quietly fall back to their defaults.

use crate::taxonomy::find_content_type;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_OFFSET: usize = 0;
pub const DEFAULT_SORT: &str = "relevance";

/// Error type for query validation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("filter not found: {0}")]
    NotFound(String),
}

/// Ordered, multi-valued URL query parameters
///
/// Keeps every `key=value` pair in the order it appeared so repeated keys such
/// as `filter` survive parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` query string
    pub fn parse(raw: &str) -> Self {
        Self(
            url::form_urlencoded::parse(raw.as_bytes())
                .into_owned()
                .collect(),
        )
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Replace all values for `key` with a single value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.0.retain(|(k, _)| *k != key);
        self.0.push((key, value.into()));
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize back to a form-urlencoded query string
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Filters selected by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<String>,
    #[serde(
        rename = "localise_key",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub localise_key_name: Vec<String>,
}

/// Validated parameters of a search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchUrlParams {
    pub query: String,
    pub filter: Filter,
    pub sort: String,
    pub limit: usize,
    pub offset: usize,
}

/// Validate the raw query parameters of a search request
pub fn review_query(params: &QueryParams) -> Result<SearchUrlParams, FilterError> {
    let filter = review_filters(params)?;

    Ok(SearchUrlParams {
        query: params.get("q").unwrap_or_default().to_string(),
        filter,
        sort: review_sort(params),
        limit: parse_limit(params),
        offset: parse_offset(params),
    })
}

/// Check every `filter` value against the taxonomy
///
/// Stops at the first unknown value.
pub fn review_filters(params: &QueryParams) -> Result<Filter, FilterError> {
    let mut filter = Filter::default();

    for value in params.get_all("filter") {
        let content_type =
            find_content_type(value).ok_or_else(|| FilterError::NotFound(value.to_string()))?;

        filter.query.push(content_type.content_type.clone());
        filter
            .localise_key_name
            .push(content_type.localise_key.clone());
    }

    Ok(filter)
}

/// Sort key, defaulting to relevance when absent or empty
pub fn review_sort(params: &QueryParams) -> String {
    match params.get("sort") {
        Some(sort) if !sort.is_empty() => sort.to_string(),
        _ => DEFAULT_SORT.to_string(),
    }
}

pub fn parse_limit(params: &QueryParams) -> usize {
    parse_or_default(params.get("limit"), DEFAULT_LIMIT)
}

pub fn parse_offset(params: &QueryParams) -> usize {
    parse_or_default(params.get("offset"), DEFAULT_OFFSET)
}

fn parse_or_default(value: Option<&str>, default: usize) -> usize {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
