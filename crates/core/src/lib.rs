//! Core library for search-controller
//!
//! This crate implements the **Functional Core** of the search frontend
//! controller, following the Functional Core - Imperative Shell architectural
//! pattern.
//!
//! # Architecture Overview
//!
//! The project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`search_controller_core`** (this crate): Pure transformation functions with zero I/O
//! - **`search-controller`**: HTTP server, downstream clients and orchestration
//!   (the Imperative Shell)
//!
//! Every function here is deterministic and side-effect free, so it can be tested
//! with plain fixture data and no mocking.
//!
//! # Request Pipeline
//!
//! A `/search` request flows through the modules in this order:
//!
//! 1. [`query`]: parse and validate the URL query into [`query::SearchUrlParams`]
//! 2. [`api_query`]: build the search API query and expand content types into sub-types
//! 3. *(shell)* call the search API, deserializing into [`model::Response`]
//! 4. [`mapper`]: build the [`mapper::SearchPage`] view model
//! 5. *(shell)* post the page model to the renderer
//!
//! [`taxonomy`] holds the static category / content type / sub-type tables the
//! other modules join against.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use search_controller_core::api_query::{build_api_query, update_query_with_api_filters};
//! use search_controller_core::query::{review_query, QueryParams};
//!
//! let params = QueryParams::parse("q=housing&filter=article");
//! let validated = review_query(&params)?;
//!
//! let mut api_query = build_api_query(&validated);
//! update_query_with_api_filters(&mut api_query);
//!
//! assert_eq!(api_query.get("content_type"), Some("article,article_download"));
//! ```

pub mod api_query;
pub mod mapper;
pub mod model;
pub mod query;
pub mod taxonomy;
