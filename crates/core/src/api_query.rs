//! Outgoing search API query construction
//!
//! The search page filters on content types, but the search API indexes finer
//! grained sub-types. Before a query leaves the controller every `content_type`
//! value is expanded into the sub-types it covers.

use crate::query::{QueryParams, SearchUrlParams};
use crate::taxonomy::find_content_type;

pub const CONTENT_TYPE_PARAM: &str = "content_type";

/// Build the search API query for a validated request
///
/// The `content_type` values are still UI-facing types at this point; pass the
/// result through [`update_query_with_api_filters`] before sending it.
pub fn build_api_query(params: &SearchUrlParams) -> QueryParams {
    let mut api_query = QueryParams::new();
    api_query.append("q", params.query.as_str());

    for filter in &params.filter.query {
        api_query.append(CONTENT_TYPE_PARAM, filter.as_str());
    }

    api_query.append("sort", params.sort.as_str());
    api_query.append("limit", params.limit.to_string());
    api_query.append("offset", params.offset.to_string());

    api_query
}

/// Replace the `content_type` values with a single comma-joined list of sub-types
///
/// Leaves the query untouched when it carries no `content_type`.
pub fn update_query_with_api_filters(api_query: &mut QueryParams) {
    let filters = api_query.get_all(CONTENT_TYPE_PARAM);

    if !filters.is_empty() {
        let sub_filters = get_sub_filters(&filters);
        api_query.set(CONTENT_TYPE_PARAM, sub_filters.join(","));
    }
}

/// All sub-types for the given content types, in filter order
///
/// Unknown content types contribute nothing.
pub fn get_sub_filters(filters: &[&str]) -> Vec<String> {
    filters
        .iter()
        .filter_map(|filter| find_content_type(filter))
        .flat_map(|content_type| content_type.sub_types.iter().cloned())
        .collect()
}
