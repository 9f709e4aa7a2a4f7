//! MCP server implementation for kbeauty-mcp.
//!
//! This crate wires the control plane into rmcp tool handlers and exposes the
//! catalog tools over stdio and streamable HTTP.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use kbeauty_core::{KBeautyControlPlane, ToolName};
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use serde::Serialize;

pub use tools::catalog::{
    AnalyzeIngredientParams,
    CompareProductsParams,
    FindDupesParams,
    GetProductInfoParams,
    MatchConcernsParams,
    ProductRefParams,
    RecommendRoutineParams,
    SearchBrandsParams,
};

const SERVER_INSTRUCTIONS: &str = r"kbeauty-mcp answers questions about Korean skincare (K-Beauty) from a curated catalog of brands, ingredients and routines.

Tools:
- `search_brands` finds brands whose key, name or category contains the query. An empty result lists the known brand keys.
- `get_product_info` lists a brand's products (`brand` is a key such as `cosrx`). `product_name` narrows by name fragment.
- `analyze_ingredient` explains one ingredient. Spaces are treated as underscores (`hyaluronic acid` -> `hyaluronic_acid`). An optional `skin_type` adds a suitability line.
- `recommend_routine` returns a routine for a `skin_type`. Unknown `routine_type` values fall back to `basic_korean`.
- `compare_products` needs at least two `{brand, product_name}` entries.
- `match_concerns` maps concerns (acne, aging, pigmentation, dryness, sensitivity) to ingredients and a base routine.
- `find_dupes` lists cheaper products of the same type or with overlapping benefits. `max_price` caps the price in USD.
- `catalog_overview` lists everything in the catalog.

Notes:
- Responses are plain text. When web search is enabled, search results follow a `---` line after the catalog answer.
- `help` lists the tools; `health` returns `ok`.";

/// MCP server wrapper around the control plane and tool routers.
#[derive(Clone)]
pub struct KBeautyMcp {
    tool_router: ToolRouter<Self>,
    control: Arc<KBeautyControlPlane>,
}

impl KBeautyMcp {
    /// Creates a new server from a control plane by value.
    #[must_use]
    pub fn new(control: KBeautyControlPlane) -> Self {
        Self::with_control(Arc::new(control))
    }

    /// Creates a new server from a shared control plane handle.
    #[must_use]
    pub fn with_control(control: Arc<KBeautyControlPlane>) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_catalog()
            + Self::tool_router_context();
        Self {
            tool_router,
            control,
        }
    }

    #[must_use]
    pub fn control(&self) -> &KBeautyControlPlane {
        &self.control
    }

    /// Sends tool parameters through the dispatcher and wraps the text.
    pub(crate) async fn run_tool(
        &self,
        tool: ToolName,
        params: &impl Serialize,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = helpers::to_arguments(params)?;
        let text = self.control.call(tool.as_str(), &arguments).await;
        Ok(helpers::text_result(text))
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl KBeautyMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl ServerHandler for KBeautyMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
