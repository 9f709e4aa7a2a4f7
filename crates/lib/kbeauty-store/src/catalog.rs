use serde::Serialize;
use thiserror::Error;

use crate::data;
use crate::models::{Brand, ConcernGuide, Ingredient, Routine};
use crate::schema::{DEFAULT_ROUTINE, TABLE_BRAND, TABLE_CONCERN, TABLE_INGREDIENT, TABLE_ROUTINE};
use crate::table::Table;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate {table} key: {key}")]
    DuplicateKey { table: &'static str, key: String },
    #[error("routine {routine} has no steps")]
    EmptyRoutine { routine: String },
    #[error("routine {routine} step {position} is numbered {found}")]
    StepSequence {
        routine: String,
        position: usize,
        found: u8,
    },
    #[error("default routine {0} is missing")]
    MissingDefaultRoutine(&'static str),
}

/// Immutable knowledge base of brands, ingredients and routines.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    brands: Table<Brand>,
    ingredients: Table<Ingredient>,
    routines: Table<Routine>,
    concerns: Table<ConcernGuide>,
}

impl Catalog {
    /// Builds a catalog from records, checking table invariants.
    ///
    /// # Errors
    /// Returns `CatalogError` on duplicate keys, non-contiguous routine steps,
    /// or a missing default routine.
    pub fn new(
        brands: Vec<Brand>,
        ingredients: Vec<Ingredient>,
        routines: Vec<Routine>,
        concerns: Vec<ConcernGuide>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            brands: Table::from_records(brands).map_err(|key| CatalogError::DuplicateKey {
                table: TABLE_BRAND,
                key,
            })?,
            ingredients: Table::from_records(ingredients).map_err(|key| {
                CatalogError::DuplicateKey {
                    table: TABLE_INGREDIENT,
                    key,
                }
            })?,
            routines: Table::from_records(routines).map_err(|key| CatalogError::DuplicateKey {
                table: TABLE_ROUTINE,
                key,
            })?,
            concerns: Table::from_records(concerns).map_err(|key| CatalogError::DuplicateKey {
                table: TABLE_CONCERN,
                key,
            })?,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads the reference tables bundled with the crate.
    ///
    /// # Errors
    /// Returns `CatalogError` if the bundled tables violate an invariant.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(
            data::brands(),
            data::ingredients(),
            data::routines(),
            data::concerns(),
        )
    }

    /// Checks routine step numbering and the presence of the default routine.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for routine in &self.routines {
            if routine.steps.is_empty() {
                return Err(CatalogError::EmptyRoutine {
                    routine: routine.key.clone(),
                });
            }
            for (index, step) in routine.steps.iter().enumerate() {
                let position = index + 1;
                if usize::from(step.number) != position {
                    return Err(CatalogError::StepSequence {
                        routine: routine.key.clone(),
                        position,
                        found: step.number,
                    });
                }
            }
        }

        if !self.routines.contains_key(DEFAULT_ROUTINE) {
            return Err(CatalogError::MissingDefaultRoutine(DEFAULT_ROUTINE));
        }
        Ok(())
    }

    #[must_use]
    pub const fn brands(&self) -> &Table<Brand> {
        &self.brands
    }

    #[must_use]
    pub const fn ingredients(&self) -> &Table<Ingredient> {
        &self.ingredients
    }

    #[must_use]
    pub const fn routines(&self) -> &Table<Routine> {
        &self.routines
    }

    #[must_use]
    pub const fn concerns(&self) -> &Table<ConcernGuide> {
        &self.concerns
    }

    /// The routine served for unknown routine types.
    #[must_use]
    pub fn default_routine(&self) -> &Routine {
        self.routines
            .get(DEFAULT_ROUTINE)
            .expect("catalog validation guarantees the default routine")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SafetyGrade, Step};

    fn routine(key: &str, numbers: &[u8]) -> Routine {
        Routine {
            key: key.to_string(),
            name: key.to_string(),
            description: String::new(),
            target_skin: String::new(),
            steps: numbers
                .iter()
                .map(|number| Step {
                    number: *number,
                    step_type: "toner".to_string(),
                    description: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().expect("builtin catalog should validate");

        let brands: Vec<&str> = catalog.brands().keys().collect();
        assert_eq!(brands, ["sulwhasoo", "cosrx", "laneige"]);
        assert_eq!(catalog.routines().get(DEFAULT_ROUTINE).map(|r| r.steps.len()), Some(7));
        assert!(catalog.ingredients().len() >= 5);
        assert_eq!(
            catalog.ingredients().get("retinol").map(|i| i.safety_grade),
            Some(SafetyGrade::B)
        );
    }

    #[test]
    fn every_product_belongs_to_one_brand() {
        let catalog = Catalog::builtin().expect("builtin catalog should validate");
        let mut seen = std::collections::HashSet::new();
        for brand in catalog.brands() {
            for product in &brand.products {
                assert!(seen.insert(product.name.as_str()), "{} listed twice", product.name);
            }
        }
    }

    #[test]
    fn rejects_gap_in_step_numbers() {
        let err = Catalog::new(
            Vec::new(),
            Vec::new(),
            vec![routine(DEFAULT_ROUTINE, &[1, 2, 4])],
            Vec::new(),
        )
        .expect_err("gap should fail");

        assert_eq!(
            err,
            CatalogError::StepSequence {
                routine: DEFAULT_ROUTINE.to_string(),
                position: 3,
                found: 4,
            }
        );
    }

    #[test]
    fn requires_default_routine() {
        let err = Catalog::new(Vec::new(), Vec::new(), vec![routine("custom", &[1])], Vec::new())
            .expect_err("missing default should fail");
        assert_eq!(err, CatalogError::MissingDefaultRoutine(DEFAULT_ROUTINE));
    }

    #[test]
    fn rejects_duplicate_routine_keys() {
        let err = Catalog::new(
            Vec::new(),
            Vec::new(),
            vec![routine(DEFAULT_ROUTINE, &[1]), routine(DEFAULT_ROUTINE, &[1])],
            Vec::new(),
        )
        .expect_err("duplicate should fail");
        assert!(matches!(err, CatalogError::DuplicateKey { table: TABLE_ROUTINE, .. }));
    }

    #[test]
    fn serializes_product_type_as_type() {
        let catalog = Catalog::builtin().expect("builtin catalog should validate");
        let cosrx = catalog.brands().get("cosrx").expect("cosrx");
        let json = serde_json::to_value(&cosrx.products[0]).expect("serialize product");
        assert_eq!(json["type"], "essence");
        assert_eq!(json["price_usd"], 17);
    }
}
