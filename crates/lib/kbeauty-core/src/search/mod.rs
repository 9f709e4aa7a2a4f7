//! Web search collaborator.
//!
//! Search output is opaque text appended after the catalog answer. Backends
//! never fail outward: errors degrade to a placeholder string.

mod duckduckgo;

use futures::future::{self, BoxFuture, FutureExt};
use thiserror::Error;

pub use duckduckgo::{DuckDuckGoSearch, InstantAnswer, RelatedTopic, render_instant_answer};

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.duckduckgo.com/";

const BRAND_TERMS: &[&str] = &[
    "sulwhasoo", "laneige", "cosrx", "innisfree", "etude house", "the face shop",
    "missha", "tony toly", "banila co", "dear klairs", "purito", "son & park",
    "heimish", "beauty of joseon", "dr jart", "mamonde", "iope", "hera",
    "whoo", "ohui", "sum37", "amorepacific", "skinfood", "nature republic",
];

const PRODUCT_TYPE_TERMS: &[&str] = &[
    "essence", "serum", "toner", "cleanser", "moisturizer", "sunscreen",
    "sleeping mask", "sheet mask", "eye cream", "lip balm", "bb cream",
    "cushion", "ampoule", "emulsion", "facial oil", "exfoliator",
];

const INGREDIENT_TERMS: &[&str] = &[
    "snail mucin", "ginseng", "niacinamide", "hyaluronic acid", "centella asiatica",
    "propolis", "honey", "green tea", "rice water", "fermented ingredients",
    "peptides", "retinol", "vitamin c", "aha", "bha", "ceramides",
];

const MAX_CONTEXT_TERMS: usize = 2;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search returned status {0}")]
    Status(u16),
}

/// What a search is about; backends use it to shape the outgoing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCategory {
    Brand,
    Product,
    Ingredient,
    Routine,
    General,
}

impl SearchCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Product => "product",
            Self::Ingredient => "ingredient",
            Self::Routine => "routine",
            Self::General => "general",
        }
    }

    /// Expands a query with category-specific context words.
    #[must_use]
    pub fn decorate(self, query: &str) -> String {
        match self {
            Self::Brand => format!("{query} K-Beauty Korean cosmetics brand products review"),
            Self::Product => {
                format!("{query} K-Beauty Korean skincare product review ingredients benefits")
            }
            Self::Ingredient => {
                format!("{query} skincare ingredient benefits safety K-Beauty Korean cosmetics")
            }
            Self::Routine => format!("Korean skincare routine {query} K-Beauty steps products"),
            Self::General => format!("{query} K-Beauty Korean beauty skincare"),
        }
    }
}

/// Text search collaborator. Implementations must not panic or error out;
/// failures come back as placeholder text.
pub trait SearchBackend: Send + Sync {
    fn search<'a>(&'a self, query: &'a str, category: SearchCategory) -> BoxFuture<'a, String>;
}

/// Backend used when web search is turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSearch;

impl SearchBackend for DisabledSearch {
    fn search<'a>(&'a self, _query: &'a str, _category: SearchCategory) -> BoxFuture<'a, String> {
        future::ready(String::new()).boxed()
    }
}

/// Appends up to two recognized K-Beauty terms to a query.
#[must_use]
pub fn enhance_query(query: &str) -> String {
    let lowered = query.to_lowercase();
    let additions: Vec<String> = BRAND_TERMS
        .iter()
        .filter(|term| lowered.contains(*term))
        .map(|term| format!("Korean beauty brand {term}"))
        .chain(
            PRODUCT_TYPE_TERMS
                .iter()
                .filter(|term| lowered.contains(*term))
                .map(|term| format!("K-Beauty {term}")),
        )
        .chain(
            INGREDIENT_TERMS
                .iter()
                .filter(|term| lowered.contains(*term))
                .map(|term| format!("Korean skincare ingredient {term}")),
        )
        .take(MAX_CONTEXT_TERMS)
        .collect();

    if additions.is_empty() {
        query.to_string()
    } else {
        format!("{query} {}", additions.join(" "))
    }
}

#[must_use]
pub fn status_placeholder(query: &str) -> String {
    format!("🔍 **Searching for '{query}'**\n\nSearch temporarily unavailable. Showing curated K-Beauty information only.")
}

#[must_use]
pub fn failure_placeholder(query: &str) -> String {
    format!("🔍 **Searching for '{query}'**\n\nSearch service temporarily unavailable. Showing curated K-Beauty information only.")
}

#[must_use]
pub fn timeout_placeholder(query: &str) -> String {
    format!("🔍 **Searching for '{query}'**\n\nSearch timed out. Showing curated K-Beauty information only.")
}
