use kbeauty_core::ToolName;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::KBeautyMcp;
use crate::helpers;

// Required fields stay `Option` so a missing value reaches the dispatcher
// and renders as "Missing required argument" text. `schemars(required)`
// still lists them as required in the published input schema.

/// Parameters for searching brands.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchBrandsParams {
    /// Brand key, name or category fragment (e.g. `luxury`).
    #[schemars(required)]
    pub query: Option<String>,
}

/// Parameters for listing a brand's products.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetProductInfoParams {
    /// Brand key such as `cosrx`, `sulwhasoo` or `laneige`.
    #[schemars(required)]
    pub brand: Option<String>,
    /// Product name fragment; all products are returned when omitted.
    pub product_name: Option<String>,
}

/// Parameters for analyzing an ingredient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeIngredientParams {
    /// Ingredient key or name (e.g. `niacinamide`, `snail`).
    #[schemars(required)]
    pub ingredient: Option<String>,
    /// Skin type to check the ingredient against (e.g. `oily`).
    pub skin_type: Option<String>,
}

/// Parameters for a routine recommendation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RecommendRoutineParams {
    /// Skin type: oily, dry, combination, sensitive, normal.
    #[schemars(required)]
    pub skin_type: Option<String>,
    /// Skin concerns such as acne, aging or dryness.
    pub concerns: Option<Vec<String>>,
    /// Routine key: `basic_korean`, `anti_aging` or `acne_prone`.
    pub routine_type: Option<String>,
}

/// One product to compare.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ProductRefParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

/// Parameters for comparing products.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CompareProductsParams {
    /// At least two products to compare.
    #[schemars(required)]
    pub products: Option<Vec<ProductRefParams>>,
}

/// Parameters for matching concerns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MatchConcernsParams {
    /// Skin concerns to look up.
    #[schemars(required)]
    pub concerns: Option<Vec<String>>,
    /// Severity label echoed in the answer; defaults to `moderate`.
    pub severity: Option<String>,
}

/// Parameters for finding cheaper alternatives.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FindDupesParams {
    /// Product name, optionally prefixed by its brand (e.g. `laneige water sleeping mask`).
    #[schemars(required)]
    pub target_product: Option<String>,
    /// Highest acceptable price in USD.
    pub max_price: Option<f64>,
}

#[tool_router(router = tool_router_catalog, vis = "pub")]
impl KBeautyMcp {
    #[tool(description = "Search K-Beauty brands by key, name or market category.")]
    async fn search_brands(
        &self,
        Parameters(params): Parameters<SearchBrandsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(ToolName::SearchBrands, &params).await
    }

    #[tool(description = "List a brand's products, optionally filtered by product name.")]
    async fn get_product_info(
        &self,
        Parameters(params): Parameters<GetProductInfoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(ToolName::GetProductInfo, &params).await
    }

    #[tool(
        description = "Explain a skincare ingredient and, given a skin type, whether it suits that skin."
    )]
    async fn analyze_ingredient(
        &self,
        Parameters(params): Parameters<AnalyzeIngredientParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(ToolName::AnalyzeIngredient, &params).await
    }

    #[tool(
        description = "Recommend a Korean skincare routine for a skin type and optional concerns."
    )]
    async fn recommend_routine(
        &self,
        Parameters(params): Parameters<RecommendRoutineParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(ToolName::RecommendRoutine, &params).await
    }

    #[tool(description = "Compare two or more K-Beauty products side by side.")]
    async fn compare_products(
        &self,
        Parameters(params): Parameters<CompareProductsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(ToolName::CompareProducts, &params).await
    }

    #[tool(description = "Match skin concerns to recommended ingredients and a base routine.")]
    async fn match_concerns(
        &self,
        Parameters(params): Parameters<MatchConcernsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(ToolName::MatchConcerns, &params).await
    }

    #[tool(
        description = "Find cheaper catalog alternatives to a product, optionally under a maximum price."
    )]
    async fn find_dupes(
        &self,
        Parameters(params): Parameters<FindDupesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(ToolName::FindDupes, &params).await
    }

    #[tool(description = "Summarize every brand, ingredient and routine in the catalog.")]
    async fn catalog_overview(&self) -> Result<CallToolResult, ErrorData> {
        Ok(helpers::text_result(self.control().catalog_overview()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kbeauty_core::KBeautyControlPlane;
    use kbeauty_store::Catalog;

    use super::*;

    fn server() -> KBeautyMcp {
        let catalog = Catalog::builtin().expect("builtin catalog");
        KBeautyMcp::new(KBeautyControlPlane::new(Arc::new(catalog)))
    }

    fn text_of(result: &CallToolResult) -> String {
        let json = serde_json::to_value(result).expect("serialize result");
        json["content"][0]["text"]
            .as_str()
            .unwrap_or_else(|| panic!("expected text content, got {json}"))
            .to_string()
    }

    #[tokio::test]
    async fn product_info_filters_by_name() {
        let result = server()
            .get_product_info(Parameters(GetProductInfoParams {
                brand: Some("cosrx".to_string()),
                product_name: Some("snail".to_string()),
            }))
            .await
            .expect("tool should succeed");

        let text = text_of(&result);
        assert!(text.contains("### Snail 96 Mucin Power Essence"));
        assert!(!text.contains("AHA/BHA"));
    }

    #[tokio::test]
    async fn missing_argument_is_text_not_protocol_error() {
        let result = server()
            .analyze_ingredient(Parameters(AnalyzeIngredientParams::default()))
            .await
            .expect("tool should succeed");
        assert_eq!(text_of(&result), "Missing required argument: ingredient");
    }

    #[tokio::test]
    async fn compare_keeps_partial_product_refs() {
        let result = server()
            .compare_products(Parameters(CompareProductsParams {
                products: Some(vec![
                    ProductRefParams {
                        brand: Some("laneige".to_string()),
                        product_name: None,
                    },
                    ProductRefParams {
                        brand: Some("cosrx".to_string()),
                        product_name: Some("toner".to_string()),
                    },
                ]),
            }))
            .await
            .expect("tool should succeed");

        let text = text_of(&result);
        assert!(text.contains("### Product 1: Laneige (라네즈) Water Sleeping Mask"));
        assert!(text.contains("### Product 1: Laneige (라네즈) Lip Sleeping Mask"));
        assert!(text.contains("### Product 2: COSRX AHA/BHA Clarifying Treatment Toner"));
    }

    #[tokio::test]
    async fn overview_lists_routines() {
        let result = server().catalog_overview().await.expect("tool should succeed");
        assert!(text_of(&result).contains("## Routines (3)"));
    }

    #[tokio::test]
    async fn dupes_accept_brand_prefixed_target() {
        let result = server()
            .find_dupes(Parameters(FindDupesParams {
                target_product: Some("Laneige Water Sleeping Mask".to_string()),
                max_price: Some(30.0),
            }))
            .await
            .expect("tool should succeed");

        let text = text_of(&result);
        assert!(text.contains("**Max Price:** $30 USD"));
        assert!(text.contains("### Laneige (라네즈) Lip Sleeping Mask"));
    }
}
