use futures::future::join_all;
use kbeauty_store::ConcernGuide;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::dispatch::{
    CompareArgs,
    ConcernArgs,
    DupesArgs,
    IngredientArgs,
    ProductInfoArgs,
    RoutineArgs,
    ToolCall,
};
use crate::format::{self, COMPARE_MINIMUM_MESSAGE, ComparedProduct};
use crate::search::SearchCategory;

use super::lookup::filter_products;
use super::{KBeautyControlPlane, append_search};

const DEFAULT_SEVERITY: &str = "moderate";

impl KBeautyControlPlane {
    /// Decodes and runs a named tool call. Dispatch errors come back as text.
    pub async fn call(&self, name: &str, arguments: &Map<String, Value>) -> String {
        match ToolCall::from_arguments(name, arguments) {
            Ok(call) => self.execute(call).await,
            Err(err) => {
                warn!(tool = name, error = %err, "rejected tool call");
                err.to_string()
            }
        }
    }

    /// Runs an already decoded tool call.
    pub async fn execute(&self, call: ToolCall) -> String {
        debug!(tool = %call.name(), "executing tool call");
        match call {
            ToolCall::SearchBrands(args) => self.search_brands(&args.query).await,
            ToolCall::GetProductInfo(ProductInfoArgs {
                brand,
                product_name,
            }) => self.get_product_info(&brand, product_name.as_deref()).await,
            ToolCall::AnalyzeIngredient(IngredientArgs {
                ingredient,
                skin_type,
            }) => self.analyze_ingredient(&ingredient, skin_type.as_deref()).await,
            ToolCall::RecommendRoutine(args) => self.recommend_routine(&args).await,
            ToolCall::CompareProducts(args) => self.compare_products(&args).await,
            ToolCall::MatchConcerns(args) => self.match_concerns(&args).await,
            ToolCall::FindDupes(args) => self.find_dupes(&args).await,
            ToolCall::CatalogOverview => self.catalog_overview(),
        }
    }

    pub async fn search_brands(&self, query: &str) -> String {
        let brands = self.find_brand(query);
        let core = if brands.is_empty() {
            format::brand_not_found(query, self.catalog.brands().keys())
        } else {
            format::brand_search_results(query.trim(), &brands)
        };
        append_search(core, self.search_text(query, SearchCategory::Brand).await)
    }

    pub async fn get_product_info(&self, brand: &str, product_name: Option<&str>) -> String {
        let core = match self.resolve_brand(brand) {
            Ok(record) => {
                let products = filter_products(record, product_name);
                format::product_list(record, &products, product_name)
            }
            Err(err) => {
                debug!(error = %err, "product lookup missed");
                format::unknown_brand(brand, self.catalog.brands().keys())
            }
        };

        let query = match product_name {
            Some(name) => format!("{brand} {name}"),
            None => format!("{brand} products"),
        };
        append_search(core, self.search_text(&query, SearchCategory::Product).await)
    }

    /// Ingredient report, plus a compatibility line when a skin type is given.
    pub async fn analyze_ingredient(&self, ingredient: &str, skin_type: Option<&str>) -> String {
        let skin_type = skin_type.filter(|value| !value.trim().is_empty());
        let core = match self.find_ingredient(ingredient) {
            Some(record) => {
                let report = format::ingredient_report(record);
                match skin_type {
                    Some(skin_type) => {
                        format!("{report}\n{}", format::skin_compatibility(record, skin_type))
                    }
                    None => report,
                }
            }
            None => format::ingredient_not_found(ingredient, self.catalog.ingredients().keys()),
        };
        append_search(core, self.search_text(ingredient, SearchCategory::Ingredient).await)
    }

    pub async fn recommend_routine(&self, args: &RoutineArgs) -> String {
        let routine = self.routine_or_default(args.routine_type.as_deref());
        let concerns = self.match_concern_list(&args.concerns);
        let core = format::routine_recommendation(routine, &args.skin_type, &concerns);

        let mut query = vec![format!("{} skin", args.skin_type.trim())];
        query.extend(args.concerns.iter().map(|concern| concern.trim().to_string()));
        query.push(routine.key.clone());
        query.retain(|part| !part.is_empty());
        append_search(core, self.search_text(&query.join(" "), SearchCategory::Routine).await)
    }

    /// Side-by-side comparison. Fewer than two entries short-circuits before
    /// any lookup or search.
    pub async fn compare_products(&self, args: &CompareArgs) -> String {
        if args.products.len() < 2 {
            return COMPARE_MINIMUM_MESSAGE.to_string();
        }

        let entries: Vec<ComparedProduct<'_>> = args
            .products
            .iter()
            .map(|requested| match self.resolve_brand(&requested.brand) {
                Ok(brand) => {
                    let products = filter_products(brand, Some(requested.product_name.as_str()));
                    if products.is_empty() {
                        ComparedProduct::NoMatchingProduct {
                            brand,
                            product_name: requested.product_name.clone(),
                        }
                    } else {
                        ComparedProduct::Found { brand, products }
                    }
                }
                Err(_) => ComparedProduct::UnknownBrand {
                    brand: requested.brand.clone(),
                },
            })
            .collect();
        let brand_keys: Vec<&str> = self.catalog.brands().keys().collect();
        let core = format::comparison(&entries, &brand_keys);

        let queries: Vec<String> = args
            .products
            .iter()
            .map(|requested| format!("{} {} review", requested.brand, requested.product_name))
            .collect();
        let results: Vec<String> = join_all(
            queries
                .iter()
                .map(|query| self.search_text(query, SearchCategory::Product)),
        )
        .await
        .into_iter()
        .flatten()
        .collect();

        let search = if results.is_empty() {
            None
        } else {
            Some(results.join("\n\n"))
        };
        append_search(core, search)
    }

    pub async fn match_concerns(&self, args: &ConcernArgs) -> String {
        let severity = args
            .severity
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_SEVERITY);
        let concerns = self.match_concern_list(&args.concerns);
        let core = format::concern_solutions(severity, &concerns);

        let query = format!("{} {severity} skin concerns", args.concerns.join(" "));
        append_search(core, self.search_text(query.trim(), SearchCategory::General).await)
    }

    /// Cheaper stand-ins for a catalog product.
    pub async fn find_dupes(&self, args: &DupesArgs) -> String {
        let core = match self.find_product(&args.target_product) {
            Some((brand, product)) => {
                let dupes = self.dupes_for(product, args.max_price);
                format::dupes_report(brand, product, args.max_price, &dupes)
            }
            None => {
                let names: Vec<&str> = self
                    .catalog
                    .brands()
                    .iter()
                    .flat_map(|brand| brand.products.iter().map(|product| product.name.as_str()))
                    .collect();
                format::product_not_found(&args.target_product, names)
            }
        };

        let query = format!("{} dupe", args.target_product.trim());
        append_search(core, self.search_text(&query, SearchCategory::Product).await)
    }

    /// Summary of the whole catalog. Never searches.
    #[must_use]
    pub fn catalog_overview(&self) -> String {
        format::catalog_overview(&self.catalog)
    }

    fn match_concern_list(&self, concerns: &[String]) -> Vec<(String, Option<&ConcernGuide>)> {
        concerns
            .iter()
            .map(|concern| concern.trim())
            .filter(|concern| !concern.is_empty())
            .map(|concern| (concern.to_string(), self.find_concern(concern)))
            .collect()
    }
}
