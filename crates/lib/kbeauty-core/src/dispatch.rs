//! Closed tool surface and argument decoding.

use std::{fmt, str::FromStr};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: ToolName, reason: String },
}

/// Every tool the catalog answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    SearchBrands,
    GetProductInfo,
    AnalyzeIngredient,
    RecommendRoutine,
    CompareProducts,
    MatchConcerns,
    FindDupes,
    CatalogOverview,
}

impl ToolName {
    pub const ALL: [Self; 8] = [
        Self::SearchBrands,
        Self::GetProductInfo,
        Self::AnalyzeIngredient,
        Self::RecommendRoutine,
        Self::CompareProducts,
        Self::MatchConcerns,
        Self::FindDupes,
        Self::CatalogOverview,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SearchBrands => "search_brands",
            Self::GetProductInfo => "get_product_info",
            Self::AnalyzeIngredient => "analyze_ingredient",
            Self::RecommendRoutine => "recommend_routine",
            Self::CompareProducts => "compare_products",
            Self::MatchConcerns => "match_concerns",
            Self::FindDupes => "find_dupes",
            Self::CatalogOverview => "catalog_overview",
        }
    }

    /// Argument names that must be present and non-null.
    #[must_use]
    pub const fn required_arguments(self) -> &'static [&'static str] {
        match self {
            Self::SearchBrands => &["query"],
            Self::GetProductInfo => &["brand"],
            Self::AnalyzeIngredient => &["ingredient"],
            Self::RecommendRoutine => &["skin_type"],
            Self::CompareProducts => &["products"],
            Self::MatchConcerns => &["concerns"],
            Self::FindDupes => &["target_product"],
            Self::CatalogOverview => &[],
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::SearchBrands => {
                "Search K-Beauty brands by key, name or market category."
            }
            Self::GetProductInfo => {
                "List a brand's products, optionally filtered by product name."
            }
            Self::AnalyzeIngredient => {
                "Explain a skincare ingredient and, given a skin type, whether it suits that skin."
            }
            Self::RecommendRoutine => {
                "Recommend a Korean skincare routine for a skin type and optional concerns."
            }
            Self::CompareProducts => "Compare two or more K-Beauty products side by side.",
            Self::MatchConcerns => {
                "Match skin concerns to recommended ingredients and a base routine."
            }
            Self::FindDupes => {
                "Find cheaper catalog alternatives to a product, optionally under a maximum price."
            }
            Self::CatalogOverview => "Summarize every brand, ingredient and routine in the catalog.",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = DispatchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == value)
            .ok_or_else(|| DispatchError::UnknownTool(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBrandsArgs {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfoArgs {
    pub brand: String,
    #[serde(default)]
    pub product_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientArgs {
    pub ingredient: String,
    #[serde(default)]
    pub skin_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineArgs {
    pub skin_type: String,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub routine_type: Option<String>,
}

/// One side of a comparison. Missing or null fields read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub brand: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub product_name: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareArgs {
    pub products: Vec<ProductRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcernArgs {
    pub concerns: Vec<String>,
    #[serde(default)]
    pub severity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DupesArgs {
    pub target_product: String,
    #[serde(default)]
    pub max_price: Option<f64>,
}

/// A decoded tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    SearchBrands(SearchBrandsArgs),
    GetProductInfo(ProductInfoArgs),
    AnalyzeIngredient(IngredientArgs),
    RecommendRoutine(RoutineArgs),
    CompareProducts(CompareArgs),
    MatchConcerns(ConcernArgs),
    FindDupes(DupesArgs),
    CatalogOverview,
}

impl ToolCall {
    #[must_use]
    pub const fn name(&self) -> ToolName {
        match self {
            Self::SearchBrands(_) => ToolName::SearchBrands,
            Self::GetProductInfo(_) => ToolName::GetProductInfo,
            Self::AnalyzeIngredient(_) => ToolName::AnalyzeIngredient,
            Self::RecommendRoutine(_) => ToolName::RecommendRoutine,
            Self::CompareProducts(_) => ToolName::CompareProducts,
            Self::MatchConcerns(_) => ToolName::MatchConcerns,
            Self::FindDupes(_) => ToolName::FindDupes,
            Self::CatalogOverview => ToolName::CatalogOverview,
        }
    }

    /// Decodes a named call from a JSON argument object.
    ///
    /// Null values count as absent.
    ///
    /// # Errors
    /// Returns `DispatchError` for unknown tools, missing required arguments,
    /// or arguments of the wrong shape.
    pub fn from_arguments(name: &str, arguments: &Map<String, Value>) -> Result<Self, DispatchError> {
        let tool = name.parse::<ToolName>()?;

        for &field in tool.required_arguments() {
            if arguments.get(field).is_none_or(Value::is_null) {
                return Err(DispatchError::MissingArgument(field));
            }
        }

        let present: Map<String, Value> = arguments
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(match tool {
            ToolName::SearchBrands => Self::SearchBrands(decode(tool, present)?),
            ToolName::GetProductInfo => Self::GetProductInfo(decode(tool, present)?),
            ToolName::AnalyzeIngredient => Self::AnalyzeIngredient(decode(tool, present)?),
            ToolName::RecommendRoutine => Self::RecommendRoutine(decode(tool, present)?),
            ToolName::CompareProducts => Self::CompareProducts(decode(tool, present)?),
            ToolName::MatchConcerns => Self::MatchConcerns(decode(tool, present)?),
            ToolName::FindDupes => Self::FindDupes(decode(tool, present)?),
            ToolName::CatalogOverview => Self::CatalogOverview,
        })
    }
}

fn decode<T: DeserializeOwned>(tool: ToolName, arguments: Map<String, Value>) -> Result<T, DispatchError> {
    serde_json::from_value(Value::Object(arguments)).map_err(|err| DispatchError::InvalidArguments {
        tool,
        reason: err.to_string(),
    })
}
