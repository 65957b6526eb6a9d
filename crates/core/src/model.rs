//! Search API response model
//!
//! Mirrors the JSON returned by the search API's `/search` endpoint. Text and
//! number fields missing from the payload deserialize to empty strings and zero;
//! fields where absence carries meaning (flags, keyword lists, highlights) stay
//! optional.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub content_types: Vec<ContentTypeCount>,
    #[serde(default)]
    pub items: Vec<ContentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Number of results for a single search API sub-type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeCount {
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentItem {
    pub description: Description,
    #[serde(rename = "type")]
    pub item_type: String,
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<Matches>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Description {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dataset_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub edition: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub headline1: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub headline2: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub headline3: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_release: Option<bool>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub meta_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_statistic: Option<bool>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub next_release: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pre_unit: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub release_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub telephone: String,
    pub email: String,
}

/// Highlighted query matches within a result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matches {
    #[serde(default)]
    pub description: MatchDescription,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<MatchDetails>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<MatchDetails>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<Vec<MatchDetails>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<Vec<MatchDetails>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<MatchDetails>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_id: Option<Vec<MatchDetails>>,
}

/// Character range of a single highlighted match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDetails {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub end: u64,
}
