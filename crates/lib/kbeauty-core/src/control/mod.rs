use std::{sync::Arc, time::Duration};

use kbeauty_store::Catalog;
use thiserror::Error;
use tracing::warn;

use crate::search::{
    DisabledSearch,
    SearchBackend,
    SearchCategory,
    enhance_query,
    timeout_placeholder,
};

pub mod lookup;
pub mod tools;

const SEARCH_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlError {
    #[error("{table} '{key}' not found")]
    NotFound { table: &'static str, key: String },
}

/// Whether tool responses are enriched with web search, and how long to wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    pub enabled: bool,
    pub timeout: Duration,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout: Duration::from_secs(5),
        }
    }
}

/// Shared entry point for lookups and tool calls. Cheap to clone.
#[derive(Clone)]
pub struct KBeautyControlPlane {
    catalog: Arc<Catalog>,
    search: Arc<dyn SearchBackend>,
    policy: SearchPolicy,
}

impl KBeautyControlPlane {
    /// Creates a control plane over a catalog with web search turned off.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            search: Arc::new(DisabledSearch),
            policy: SearchPolicy::default(),
        }
    }

    /// Enables web search through `backend`, bounded by `timeout` per query.
    #[must_use]
    pub fn with_search(mut self, backend: Arc<dyn SearchBackend>, timeout: Duration) -> Self {
        self.search = backend;
        self.policy = SearchPolicy {
            enabled: true,
            timeout,
        };
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn search_policy(&self) -> SearchPolicy {
        self.policy
    }

    /// Runs one search under the policy timeout. `None` means there is
    /// nothing to append.
    async fn search_text(&self, query: &str, category: SearchCategory) -> Option<String> {
        if !self.policy.enabled {
            return None;
        }

        let enhanced = enhance_query(query);
        match tokio::time::timeout(self.policy.timeout, self.search.search(&enhanced, category)).await
        {
            Ok(text) if text.trim().is_empty() => None,
            Ok(text) => Some(text),
            Err(_) => {
                warn!(
                    category = category.as_str(),
                    timeout_ms = self.policy.timeout.as_millis(),
                    "web search timed out"
                );
                Some(timeout_placeholder(&enhanced))
            }
        }
    }
}

impl std::fmt::Debug for KBeautyControlPlane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KBeautyControlPlane")
            .field("brands", &self.catalog.brands().len())
            .field("ingredients", &self.catalog.ingredients().len())
            .field("routines", &self.catalog.routines().len())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn append_search(core: String, search: Option<String>) -> String {
    match search {
        Some(search) => format!("{core}{SEARCH_SEPARATOR}{search}"),
        None => core,
    }
}
