//! Search page view model
//!
//! Maps a search API [`Response`] and the request's query parameters onto the
//! page model the renderer turns into HTML.

use crate::model::{ContentTypeCount, Response};
use crate::query::{parse_limit, parse_offset, review_sort, QueryParams};
use crate::taxonomy::{category_localise_keys, filter_display_text, get_categories, Category};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const PAGE_TYPE: &str = "search";
pub const PAGE_TITLE: &str = "Search";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Page model handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(rename = "type")]
    pub page_type: String,
    pub metadata: Metadata,
    pub search_disabled: bool,
    pub language: String,
    pub data: SearchData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchData {
    pub query: String,
    pub filter: Vec<String>,
    pub filter_content: Vec<String>,
    pub categories: Vec<Category>,
    pub sort: String,
    pub sort_text: String,
    pub limit: usize,
    pub offset: usize,
    pub response: Response,
}

/// Build the search page model
///
/// Items and match highlights are carried over from the API response untouched.
pub fn create_search_page(params: &QueryParams, response: Response) -> SearchPage {
    let data = SearchData {
        query: params.get("q").unwrap_or_default().to_string(),
        filter: params
            .get_all("filter")
            .into_iter()
            .map(String::from)
            .collect(),
        filter_content: category_localise_keys(),
        categories: categories_with_counts(&response.content_types),
        sort: review_sort(params),
        sort_text: filter_sort_text(params),
        limit: parse_limit(params),
        offset: parse_offset(params),
        response,
    };

    SearchPage {
        page_type: PAGE_TYPE.to_string(),
        metadata: Metadata {
            title: PAGE_TITLE.to_string(),
        },
        search_disabled: true,
        language: DEFAULT_LANGUAGE.to_string(),
        data,
    }
}

/// Human readable summary of the selected filters
///
/// "articles", "articles and compendiums", "articles, compendiums and methodology".
/// Filters without display text are left out.
pub fn filter_sort_text(params: &QueryParams) -> String {
    let texts: Vec<&str> = params
        .get_all("filter")
        .into_iter()
        .filter_map(filter_display_text)
        .collect();

    join_with_and(&texts)
}

fn join_with_and(parts: &[&str]) -> String {
    match parts {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Categories with the API's per sub-type counts rolled up
///
/// A content type counts every result of its sub-types; a category counts every
/// result of its content types.
pub fn categories_with_counts(counts: &[ContentTypeCount]) -> Vec<Category> {
    let mut by_sub_type: HashMap<&str, u64> = HashMap::new();
    for count in counts {
        *by_sub_type.entry(count.content_type.as_str()).or_default() += count.count;
    }

    let mut categories = get_categories();
    for category in &mut categories {
        for content_type in &mut category.content_types {
            content_type.count = content_type
                .sub_types
                .iter()
                .filter_map(|sub_type| by_sub_type.get(sub_type.as_str()))
                .sum();
        }
        category.count = category.content_types.iter().map(|ct| ct.count).sum();
    }

    categories
}
