use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::Keyed;

/// Ordinal safety rating attached to an ingredient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SafetyGrade {
    A,
    B,
    C,
}

impl SafetyGrade {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl fmt::Display for SafetyGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product sold under a brand. Products have no identity outside their brand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub price_usd: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub benefits: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skin_types: Vec<String>,
}

/// Brand record with its ordered product line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Brand {
    pub key: String,
    pub name: String,
    pub origin: String,
    pub founded: u16,
    pub category: String,
    pub price_range: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_for: Option<String>,
}

impl Keyed for Brand {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Ingredient record with safety and usage guidance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    pub key: String,
    pub name: String,
    pub korean_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub benefits: Vec<String>,
    pub safety_grade: SafetyGrade,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suitable_for: Vec<String>,
    pub concentration: String,
    #[serde(default)]
    pub incompatible: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub also_known_as: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Keyed for Ingredient {
    fn key(&self) -> &str {
        &self.key
    }
}

/// A single numbered step in a routine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    pub number: u8,
    #[serde(rename = "type")]
    pub step_type: String,
    pub description: String,
}

/// Ordered skincare routine template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Routine {
    pub key: String,
    pub name: String,
    pub description: String,
    pub target_skin: String,
    pub steps: Vec<Step>,
}

impl Keyed for Routine {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Curated guidance for a named skin concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConcernGuide {
    pub key: String,
    pub ingredients: Vec<String>,
    pub avoid: String,
    pub routine: String,
}

impl Keyed for ConcernGuide {
    fn key(&self) -> &str {
        &self.key
    }
}
