//! Search filter taxonomy
//!
//! The fixed set of search categories shown as facets on the search page, the
//! content types grouped under each category, and the search API sub-types each
//! content type expands to.
//!
//! The tables are built once on first access and are read-only afterwards.
//! Callers that need to mutate counts must go through [`get_categories`], which
//! hands out owned copies.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Static definition of a content type
#[derive(Debug, Clone, Copy)]
pub struct ContentTypeDef {
    pub localise_key: &'static str,
    pub content_type: &'static str,
    /// Plural text used when summarising the selected filters
    pub display_text: &'static str,
    pub sub_types: &'static [&'static str],
}

/// Static definition of a category
#[derive(Debug, Clone, Copy)]
pub struct CategoryDef {
    pub localise_key: &'static str,
    pub content_types: &'static [ContentTypeDef],
}

pub const BULLETIN: ContentTypeDef = ContentTypeDef {
    localise_key: "StatisticalBulletin",
    content_type: "bulletin",
    display_text: "statistical bulletins",
    sub_types: &["bulletin"],
};

pub const ARTICLE: ContentTypeDef = ContentTypeDef {
    localise_key: "Article",
    content_type: "article",
    display_text: "articles",
    sub_types: &["article", "article_download"],
};

pub const COMPENDIUM: ContentTypeDef = ContentTypeDef {
    localise_key: "Compendium",
    content_type: "compendia",
    display_text: "compendiums",
    sub_types: &["compendium_landing_page"],
};

pub const TIME_SERIES: ContentTypeDef = ContentTypeDef {
    localise_key: "TimeSeries",
    content_type: "time_series",
    display_text: "time series",
    sub_types: &["timeseries"],
};

pub const DATASETS: ContentTypeDef = ContentTypeDef {
    localise_key: "Datasets",
    content_type: "datasets",
    display_text: "datasets",
    sub_types: &["dataset_landing_page", "reference_tables"],
};

pub const USER_REQUESTED_DATA: ContentTypeDef = ContentTypeDef {
    localise_key: "UserRequestedData",
    content_type: "user_requested_data",
    display_text: "user requested data",
    sub_types: &["static_adhoc"],
};

pub const METHODOLOGY: ContentTypeDef = ContentTypeDef {
    localise_key: "Methodology",
    content_type: "methodology",
    display_text: "methodology",
    sub_types: &[
        "static_methodology",
        "static_methodology_download",
        "static_qmi",
    ],
};

pub const CORPORATE_INFORMATION: ContentTypeDef = ContentTypeDef {
    localise_key: "CorporateInformation",
    content_type: "corporate_information",
    display_text: "corporate information",
    sub_types: &[
        "static_foi",
        "static_page",
        "static_landing_page",
        "static_article",
    ],
};

pub const PUBLICATION: CategoryDef = CategoryDef {
    localise_key: "Publication",
    content_types: &[BULLETIN, ARTICLE, COMPENDIUM],
};

pub const DATA: CategoryDef = CategoryDef {
    localise_key: "Data",
    content_types: &[TIME_SERIES, DATASETS, USER_REQUESTED_DATA],
};

pub const OTHER: CategoryDef = CategoryDef {
    localise_key: "Other",
    content_types: &[METHODOLOGY, CORPORATE_INFORMATION],
};

/// All categories, in the order they appear on the search page
pub const CATEGORY_DEFS: [CategoryDef; 3] = [PUBLICATION, DATA, OTHER];

/// A content type together with its result count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    pub localise_key: String,
    pub count: u64,
    #[serde(rename = "type")]
    pub content_type: String,
    pub sub_types: Vec<String>,
}

/// A search category with its content types and result count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub localise_key: String,
    pub count: u64,
    pub content_types: Vec<ContentType>,
}

impl From<&ContentTypeDef> for ContentType {
    fn from(def: &ContentTypeDef) -> Self {
        Self {
            localise_key: def.localise_key.to_string(),
            count: 0,
            content_type: def.content_type.to_string(),
            sub_types: def.sub_types.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl From<&CategoryDef> for Category {
    fn from(def: &CategoryDef) -> Self {
        Self {
            localise_key: def.localise_key.to_string(),
            count: 0,
            content_types: def.content_types.iter().map(ContentType::from).collect(),
        }
    }
}

static CATEGORIES: LazyLock<Vec<Category>> =
    LazyLock::new(|| CATEGORY_DEFS.iter().map(Category::from).collect());

static FILTER_OPTIONS: LazyLock<HashMap<&'static str, ContentType>> = LazyLock::new(|| {
    CATEGORY_DEFS
        .iter()
        .flat_map(|category| category.content_types.iter())
        .map(|def| (def.content_type, ContentType::from(def)))
        .collect()
});

static DISPLAY_TEXTS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    CATEGORY_DEFS
        .iter()
        .flat_map(|category| category.content_types.iter())
        .map(|def| (def.content_type, def.display_text))
        .collect()
});

/// Look up a content type by the filter value used in search URLs
pub fn find_content_type(filter: &str) -> Option<&'static ContentType> {
    FILTER_OPTIONS.get(filter)
}

/// Plural display text for a filter value
pub fn filter_display_text(filter: &str) -> Option<&'static str> {
    DISPLAY_TEXTS.get(filter).copied()
}

/// Returns every category with all counts set to zero
///
/// The result is an owned deep copy: content types and sub-types can be mutated
/// freely without affecting later calls.
pub fn get_categories() -> Vec<Category> {
    let mut categories = CATEGORIES.clone();
    for category in &mut categories {
        category.count = 0;
        for content_type in &mut category.content_types {
            content_type.count = 0;
        }
    }
    categories
}

/// Localisation keys of the categories, in display order
pub fn category_localise_keys() -> Vec<String> {
    CATEGORY_DEFS
        .iter()
        .map(|category| category.localise_key.to_string())
        .collect()
}
