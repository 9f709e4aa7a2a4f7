use std::sync::Arc;

use kbeauty_core::KBeautyControlPlane;
use kbeauty_core::search::{DuckDuckGoSearch, SearchError};
use kbeauty_store::{Catalog, CatalogError};
use thiserror::Error;
use tracing::info;

use crate::config::KBeautyConfig;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("built-in catalog is invalid: {0}")]
    Catalog(#[from] CatalogError),
    #[error("failed to build search client: {0}")]
    Search(#[from] SearchError),
}

pub fn build_control_plane(config: &KBeautyConfig) -> Result<KBeautyControlPlane, StartupError> {
    let catalog = Arc::new(Catalog::builtin()?);
    info!(
        brands = catalog.brands().len(),
        ingredients = catalog.ingredients().len(),
        routines = catalog.routines().len(),
        "catalog loaded"
    );

    let control = KBeautyControlPlane::new(catalog);
    if !config.web_search {
        info!("web search disabled");
        return Ok(control);
    }

    let search = DuckDuckGoSearch::new(config.search_endpoint.clone(), config.search_timeout)?;
    info!(endpoint = search.endpoint(), "web search enabled");
    Ok(control.with_search(Arc::new(search), config.search_timeout))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;

    use super::*;
    use crate::config::CliArgs;

    fn config(extra: &[&str]) -> KBeautyConfig {
        let mut argv = vec!["kbeauty-mcpd"];
        argv.extend_from_slice(extra);
        let args = CliArgs::try_parse_from(argv).expect("args should parse");
        KBeautyConfig::try_from(args).expect("config should parse")
    }

    #[test]
    fn search_can_be_disabled() {
        let control = build_control_plane(&config(&["--web-search", "false"])).expect("control plane");
        assert!(!control.search_policy().enabled);
        assert_eq!(control.catalog().brands().len(), 3);
    }

    #[test]
    fn search_uses_configured_timeout() {
        let control = build_control_plane(&config(&["--search-timeout-ms", "1500"]))
            .expect("control plane");
        let policy = control.search_policy();
        assert!(policy.enabled);
        assert_eq!(policy.timeout, Duration::from_millis(1500));
    }
}
