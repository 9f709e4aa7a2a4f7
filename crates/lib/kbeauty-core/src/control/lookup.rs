use kbeauty_store::schema::{DEFAULT_ROUTINE, TABLE_BRAND};
use kbeauty_store::{Brand, ConcernGuide, Ingredient, Product, Routine};

use crate::format::Dupe;
use crate::normalize::{contains_normalized, normalize_key, normalize_query};

use super::{ControlError, KBeautyControlPlane};

// Benefit words shorter than this ("anti", "care", "skin") are too generic
// to call two products alike.
const MIN_BENEFIT_WORD: usize = 5;

impl KBeautyControlPlane {
    /// Brands whose key, name or category contains the query, in table order.
    #[must_use]
    pub fn find_brand(&self, query: &str) -> Vec<&Brand> {
        let needle = normalize_query(query);
        self.catalog
            .brands()
            .iter()
            .filter(|brand| {
                brand.key.contains(&needle)
                    || contains_normalized(&brand.name, &needle)
                    || contains_normalized(&brand.category, &needle)
            })
            .collect()
    }

    /// Exact key match first, then the first ingredient whose key or name
    /// contains the query.
    #[must_use]
    pub fn find_ingredient(&self, query: &str) -> Option<&Ingredient> {
        let needle = normalize_key(query);
        let ingredients = self.catalog.ingredients();
        ingredients.get(&needle).or_else(|| {
            ingredients.iter().find(|ingredient| {
                ingredient.key.contains(&needle) || contains_normalized(&ingredient.name, &needle)
            })
        })
    }

    /// Exact key match; unknown keys get the default routine.
    #[must_use]
    pub fn find_routine(&self, query_type: &str) -> &Routine {
        self.catalog
            .routines()
            .get(query_type)
            .unwrap_or_else(|| self.catalog.default_routine())
    }

    /// Looks up a brand by key, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    /// Returns `ControlError::NotFound` if no brand has that key.
    pub fn resolve_brand(&self, brand_key: &str) -> Result<&Brand, ControlError> {
        self.catalog
            .brands()
            .get(&normalize_query(brand_key))
            .ok_or_else(|| ControlError::NotFound {
                table: TABLE_BRAND,
                key: brand_key.to_string(),
            })
    }

    /// Products of a brand, optionally narrowed by a case-insensitive name
    /// fragment.
    ///
    /// # Errors
    /// Returns `ControlError::NotFound` if the brand does not exist.
    pub fn get_products(
        &self,
        brand_key: &str,
        product_name: Option<&str>,
    ) -> Result<Vec<&Product>, ControlError> {
        let brand = self.resolve_brand(brand_key)?;
        Ok(filter_products(brand, product_name))
    }

    /// First concern guide related to a free-text concern, matching in
    /// either direction.
    #[must_use]
    pub fn find_concern(&self, concern: &str) -> Option<&ConcernGuide> {
        let needle = normalize_query(concern);
        if needle.is_empty() {
            return None;
        }
        self.catalog
            .concerns()
            .iter()
            .find(|guide| needle.contains(guide.key.as_str()) || guide.key.contains(&needle))
    }

    /// First product in table order whose name contains the query, or whose
    /// name appears inside the query (`laneige water sleeping mask`).
    #[must_use]
    pub fn find_product(&self, query: &str) -> Option<(&Brand, &Product)> {
        let needle = normalize_query(query);
        if needle.is_empty() {
            return None;
        }
        self.catalog
            .brands()
            .iter()
            .flat_map(|brand| brand.products.iter().map(move |product| (brand, product)))
            .find(|(_, product)| {
                let name = product.name.to_lowercase();
                name.contains(&needle) || needle.contains(&name)
            })
    }

    /// Strictly cheaper products sharing the target's type or a benefit
    /// keyword, in table order, capped by `max_price` when given.
    #[must_use]
    pub fn dupes_for(&self, target: &Product, max_price: Option<f64>) -> Vec<Dupe<'_>> {
        self.catalog
            .brands()
            .iter()
            .flat_map(|brand| brand.products.iter().map(move |product| (brand, product)))
            .filter(|(_, product)| product.price_usd < target.price_usd)
            .filter(|(_, product)| max_price.is_none_or(|max| f64::from(product.price_usd) <= max))
            .filter_map(|(brand, product)| {
                let same_type = product.product_type == target.product_type;
                let shared_benefits: Vec<&str> = product
                    .benefits
                    .iter()
                    .filter(|benefit| {
                        target
                            .benefits
                            .iter()
                            .any(|wanted| shares_benefit_word(wanted, benefit))
                    })
                    .map(String::as_str)
                    .collect();
                (same_type || !shared_benefits.is_empty()).then_some(Dupe {
                    brand,
                    product,
                    same_type,
                    shared_benefits,
                })
            })
            .collect()
    }

    pub(crate) fn routine_or_default(&self, routine_type: Option<&str>) -> &Routine {
        self.find_routine(routine_type.unwrap_or(DEFAULT_ROUTINE))
    }
}

pub(crate) fn filter_products<'a>(brand: &'a Brand, product_name: Option<&str>) -> Vec<&'a Product> {
    match product_name.map(normalize_query) {
        Some(needle) => brand
            .products
            .iter()
            .filter(|product| contains_normalized(&product.name, &needle))
            .collect(),
        None => brand.products.iter().collect(),
    }
}

fn benefit_words(benefit: &str) -> Vec<String> {
    benefit
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= MIN_BENEFIT_WORD)
        .map(str::to_lowercase)
        .collect()
}

fn shares_benefit_word(left: &str, right: &str) -> bool {
    let words = benefit_words(left);
    benefit_words(right).iter().any(|word| words.contains(word))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kbeauty_store::Catalog;

    use super::*;

    fn control() -> KBeautyControlPlane {
        KBeautyControlPlane::new(Arc::new(Catalog::builtin().expect("builtin catalog")))
    }

    #[test]
    fn brand_matches_category() {
        let control = control();
        let keys: Vec<&str> = control.find_brand("LUXURY").iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, ["sulwhasoo"]);
    }

    #[test]
    fn empty_brand_query_matches_everything() {
        assert_eq!(control().find_brand("   ").len(), 3);
    }

    #[test]
    fn brand_lookup_does_not_match_key_inside_query() {
        assert!(control().find_brand("cosrx snail essence").is_empty());
    }

    #[test]
    fn ingredient_prefers_exact_key() {
        let control = control();
        let found = control.find_ingredient("Hyaluronic Acid").expect("exact");
        assert_eq!(found.key, "hyaluronic_acid");
    }

    #[test]
    fn ingredient_falls_back_to_partial_match() {
        let control = control();
        assert_eq!(control.find_ingredient("snail").map(|i| i.key.as_str()), Some("snail_secretion"));
        assert_eq!(control.find_ingredient("vitamin b3").map(|i| i.key.as_str()), None);
        assert_eq!(control.find_ingredient("Vitamin").map(|i| i.key.as_str()), Some("niacinamide"));
    }

    #[test]
    fn routine_lookup_is_exact() {
        let control = control();
        assert_eq!(control.find_routine("anti_aging").key, "anti_aging");
        assert_eq!(control.find_routine("Anti_Aging").key, DEFAULT_ROUTINE);
    }

    #[test]
    fn brand_key_resolution_ignores_case() {
        let control = control();
        assert_eq!(control.resolve_brand(" COSRX ").map(|b| b.key.as_str()), Ok("cosrx"));
    }

    #[test]
    fn concern_matches_both_directions() {
        let control = control();
        assert_eq!(control.find_concern("Severe acne").map(|g| g.key.as_str()), Some("acne"));
        assert_eq!(control.find_concern("dry").map(|g| g.key.as_str()), Some("dryness"));
        assert!(control.find_concern("").is_none());
        assert!(control.find_concern("freckles").is_none());
    }

    #[test]
    fn product_lookup_accepts_brand_prefixed_names() {
        let control = control();
        let (brand, product) = control
            .find_product("Laneige Water Sleeping Mask")
            .expect("water sleeping mask");
        assert_eq!(brand.key, "laneige");
        assert_eq!(product.name, "Water Sleeping Mask");

        let (_, product) = control.find_product("sleeping mask").expect("first sleeping mask");
        assert_eq!(product.name, "Water Sleeping Mask");
        assert!(control.find_product("  ").is_none());
    }

    #[test]
    fn dupes_share_benefit_keywords_and_stay_cheaper() {
        let control = control();
        let (_, cream) = control.find_product("ginseng renewing cream").expect("cream");
        let names: Vec<&str> = control
            .dupes_for(cream, None)
            .iter()
            .map(|dupe| dupe.product.name.as_str())
            .collect();
        assert_eq!(names, ["Snail 96 Mucin Power Essence"]);

        let (_, essence) = control.find_product("snail").expect("essence");
        assert!(control.dupes_for(essence, None).is_empty());
    }

    #[test]
    fn dupes_respect_max_price() {
        let control = control();
        let (_, mask) = control.find_product("water sleeping mask").expect("mask");
        let dupes = control.dupes_for(mask, None);
        assert_eq!(dupes.len(), 1);
        assert_eq!(dupes[0].product.name, "Lip Sleeping Mask");
        assert_eq!(dupes[0].shared_benefits, ["Lip hydration"]);
        assert!(!dupes[0].same_type);

        assert!(control.dupes_for(mask, Some(20.0)).is_empty());
    }

    #[test]
    fn generic_benefit_words_do_not_match() {
        assert!(!shares_benefit_word("Anti-aging", "Anti-wrinkle"));
        assert!(shares_benefit_word("Overnight hydration", "Lip hydration"));
    }
}
