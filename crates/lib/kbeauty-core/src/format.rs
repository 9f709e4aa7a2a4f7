//! Text rendering for catalog records.
//!
//! Every function here is pure: the same records always render to the same
//! bytes, so responses can be compared verbatim in tests.

use kbeauty_store::{Brand, Catalog, ConcernGuide, Ingredient, Product, Routine};

pub const COMPARE_MINIMUM_MESSAGE: &str = "Please provide at least 2 products to compare";

const GENERIC_TIPS: &[&str] = &[
    "Start with a gentle cleanser, toner and moisturizer",
    "Introduce one new product at a time",
    "Wear sunscreen every morning",
];

/// One requested entry of a product comparison after lookup.
#[derive(Debug, Clone)]
pub enum ComparedProduct<'a> {
    Found {
        brand: &'a Brand,
        products: Vec<&'a Product>,
    },
    NoMatchingProduct {
        brand: &'a Brand,
        product_name: String,
    },
    UnknownBrand {
        brand: String,
    },
}

/// A cheaper catalog product that can stand in for a target product.
#[derive(Debug, Clone)]
pub struct Dupe<'a> {
    pub brand: &'a Brand,
    pub product: &'a Product,
    pub same_type: bool,
    pub shared_benefits: Vec<&'a str>,
}

/// Turns an enum-like tag such as `sleeping_mask` into `Sleeping Mask`.
#[must_use]
pub fn title_case_tag(tag: &str) -> String {
    tag.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn join_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> String {
    keys.into_iter().collect::<Vec<_>>().join(", ")
}

#[must_use]
pub fn price(amount: u32) -> String {
    format!("${amount} USD")
}

#[must_use]
pub fn brand_summary(brand: &Brand) -> String {
    let mut lines = vec![
        format!("## {}", brand.name),
        format!("- **Key:** {}", brand.key),
        format!("- **Origin:** {} ({})", brand.origin, brand.founded),
        format!("- **Category:** {}", brand.category),
        format!("- **Price Range:** {} USD", brand.price_range),
        format!("- **Key Ingredients:** {}", join_or_none(&brand.key_ingredients)),
    ];
    if let Some(signature) = &brand.signature {
        lines.push(format!("- **Signature:** {signature}"));
    }
    if let Some(best_for) = &brand.best_for {
        lines.push(format!("- **Best For:** {best_for}"));
    }
    let products: Vec<String> = brand.products.iter().map(|p| p.name.clone()).collect();
    lines.push(format!("- **Popular Products:** {}", join_or_none(&products)));
    lines.join("\n")
}

#[must_use]
pub fn brand_search_results(query: &str, brands: &[&Brand]) -> String {
    let mut sections = vec![
        format!("# K-Beauty Brands matching '{query}'"),
        format!("Found {} brand(s).", brands.len()),
    ];
    sections.extend(brands.iter().map(|brand| brand_summary(brand)));
    sections.join("\n\n")
}

#[must_use]
pub fn brand_not_found<'a>(query: &str, keys: impl IntoIterator<Item = &'a str>) -> String {
    format!(
        "No K-Beauty brands found matching '{query}'. Try: {}",
        join_keys(keys)
    )
}

#[must_use]
pub fn unknown_brand<'a>(brand: &str, keys: impl IntoIterator<Item = &'a str>) -> String {
    format!("Brand '{brand}' not found. Available brands: {}", join_keys(keys))
}

#[must_use]
pub fn product_entry(product: &Product) -> String {
    [
        format!("### {}", product.name),
        product_details(product),
    ]
    .join("\n")
}

fn product_details(product: &Product) -> String {
    [
        format!("- **Type:** {}", title_case_tag(&product.product_type)),
        format!("- **Price:** {}", price(product.price_usd)),
        format!("- **Benefits:** {}", join_or_none(&product.benefits)),
        format!("- **Skin Types:** {}", join_or_none(&product.skin_types)),
    ]
    .join("\n")
}

#[must_use]
pub fn product_list(brand: &Brand, products: &[&Product], filter: Option<&str>) -> String {
    if products.is_empty() {
        let available: Vec<String> = brand.products.iter().map(|p| p.name.clone()).collect();
        return format!(
            "No products matching '{}' found for {}. Available products: {}",
            filter.unwrap_or_default(),
            brand.name,
            join_or_none(&available)
        );
    }

    let mut sections = vec![format!("## {} Products", brand.name)];
    sections.extend(products.iter().map(|product| product_entry(product)));
    sections.join("\n\n")
}

#[must_use]
pub fn ingredient_report(ingredient: &Ingredient) -> String {
    let incompatible = if ingredient.incompatible.is_empty() {
        "None known".to_string()
    } else {
        ingredient.incompatible.join(", ")
    };

    let mut lines = vec![
        format!("## {} ({})", ingredient.name, ingredient.korean_name),
        format!("- **Safety Grade:** {}", ingredient.safety_grade),
        format!("- **Benefits:** {}", join_or_none(&ingredient.benefits)),
        format!("- **Suitable For:** {}", join_or_none(&ingredient.suitable_for)),
        format!("- **Concentration:** {}", ingredient.concentration),
        format!("- **Incompatible With:** {incompatible}"),
    ];
    if !ingredient.also_known_as.is_empty() {
        lines.push(format!("- **Also Known As:** {}", ingredient.also_known_as.join(", ")));
    }
    if let Some(note) = &ingredient.note {
        lines.push(format!("- **Note:** {note}"));
    }
    lines.join("\n")
}

#[must_use]
pub fn ingredient_not_found<'a>(query: &str, keys: impl IntoIterator<Item = &'a str>) -> String {
    format!(
        "Ingredient '{query}' not found in the database. Try: {}",
        join_keys(keys)
    )
}

/// One line saying whether an ingredient's suitability list covers a skin type.
#[must_use]
pub fn skin_compatibility(ingredient: &Ingredient, skin_type: &str) -> String {
    let needle = skin_type.trim().to_lowercase();
    let listed = ingredient
        .suitable_for
        .iter()
        .find(|entry| entry.to_lowercase().contains(&needle));
    let verdict = match listed {
        Some(entry) => format!("Suitable (listed as {entry})"),
        None if ingredient
            .suitable_for
            .iter()
            .any(|entry| entry.to_lowercase().starts_with("all")) =>
        {
            "Suitable for all skin types".to_string()
        }
        None => "Not specifically listed, patch test first".to_string(),
    };
    format!("- **For {} Skin:** {verdict}", title_case_tag(&needle))
}

/// Tip lines for a skin type, matched on the trimmed lowercase value.
#[must_use]
pub fn skin_type_tips(skin_type: &str) -> &'static [&'static str] {
    match skin_type.trim().to_lowercase().as_str() {
        "oily" => &[
            "Use gel or water-based products",
            "Include BHA for pore care",
            "Don't skip moisturizer!",
        ],
        "dry" => &[
            "Layer hydrating essences",
            "Use cream-based moisturizers",
            "Add facial oils in winter",
        ],
        "sensitive" => &[
            "Patch test everything",
            "Avoid fragrances",
            "Focus on barrier repair ingredients",
        ],
        "combination" => &[
            "Use different products for T-zone and cheeks",
            "Lightweight moisturizer overall",
            "Spot treatments for oily areas",
        ],
        _ => GENERIC_TIPS,
    }
}

#[must_use]
pub fn routine_steps(routine: &Routine) -> String {
    routine
        .steps
        .iter()
        .map(|step| {
            format!(
                "{}. **{}**: {}",
                step.number,
                title_case_tag(&step.step_type),
                step.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn routine_recommendation(
    routine: &Routine,
    skin_type: &str,
    concerns: &[(String, Option<&ConcernGuide>)],
) -> String {
    let skin_label = title_case_tag(skin_type.trim());
    let mut header = vec![
        format!("**Target Skin:** {}", routine.target_skin),
        format!("**Your Skin Type:** {skin_label}"),
    ];
    if !concerns.is_empty() {
        let names: Vec<String> = concerns.iter().map(|(name, _)| name.clone()).collect();
        header.push(format!("**Concerns:** {}", names.join(", ")));
    }

    let tips = skin_type_tips(skin_type)
        .iter()
        .map(|tip| format!("- {tip}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut sections = vec![
        format!("## {}\n{}", routine.name, routine.description),
        header.join("\n"),
        format!("### Steps\n{}", routine_steps(routine)),
        format!("### Tips for {skin_label} Skin\n{tips}"),
    ];
    if !concerns.is_empty() {
        sections.push(concern_sections(concerns));
    }
    sections.join("\n\n")
}

fn concern_sections(concerns: &[(String, Option<&ConcernGuide>)]) -> String {
    let mut sections = Vec::new();
    let mut unmatched = Vec::new();
    for (name, guide) in concerns {
        match guide {
            Some(guide) => sections.push(
                [
                    format!("### {} Solutions", title_case_tag(name)),
                    format!("- **Recommended Ingredients:** {}", guide.ingredients.join(", ")),
                    format!("- **Avoid:** {}", guide.avoid),
                    format!("- **Base Routine:** {}", guide.routine),
                ]
                .join("\n"),
            ),
            None => unmatched.push(name.clone()),
        }
    }
    if !unmatched.is_empty() {
        sections.push(format!("No curated guidance for: {}", unmatched.join(", ")));
    }
    sections.join("\n\n")
}

#[must_use]
pub fn concern_solutions(severity: &str, concerns: &[(String, Option<&ConcernGuide>)]) -> String {
    let names: Vec<String> = concerns.iter().map(|(name, _)| name.clone()).collect();
    let mut sections = vec![
        "## K-Beauty Solutions by Concern".to_string(),
        format!(
            "**Concerns:** {}\n**Severity:** {severity}",
            join_or_none(&names)
        ),
    ];
    if !concerns.is_empty() {
        sections.push(concern_sections(concerns));
    }
    sections.join("\n\n")
}

#[must_use]
pub fn comparison(entries: &[ComparedProduct<'_>], brand_keys: &[&str]) -> String {
    let mut sections = vec!["## K-Beauty Product Comparison".to_string()];
    let mut priced: Vec<(String, u32)> = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let position = index + 1;
        match entry {
            ComparedProduct::Found { brand, products } => {
                for product in products {
                    sections.push(format!(
                        "### Product {position}: {} {}\n{}",
                        brand.name,
                        product.name,
                        product_details(product)
                    ));
                    priced.push((format!("{} {}", brand.name, product.name), product.price_usd));
                }
            }
            ComparedProduct::NoMatchingProduct {
                brand,
                product_name,
            } => sections.push(format!(
                "### Product {position}: {} {product_name}\nNo matching product in the catalog.",
                brand.name
            )),
            ComparedProduct::UnknownBrand { brand } => sections.push(format!(
                "### Product {position}: {brand}\n{}",
                unknown_brand(brand, brand_keys.iter().copied())
            )),
        }
    }

    // min_by_key keeps the first of equal prices, so ties follow request order.
    if let Some((name, amount)) = priced.iter().min_by_key(|(_, amount)| *amount) {
        let highest = priced.iter().map(|(_, amount)| *amount).max().unwrap_or(*amount);
        sections.push(format!(
            "**Budget Pick:** {name} ({})\n**Price Spread:** ${amount} - ${highest} USD",
            price(*amount)
        ));
    }

    sections.join("\n\n")
}

#[must_use]
pub fn product_not_found<'a>(query: &str, names: impl IntoIterator<Item = &'a str>) -> String {
    format!(
        "Product '{query}' not found in the catalog. Try: {}",
        join_keys(names)
    )
}

#[must_use]
pub fn dupes_report(
    brand: &Brand,
    target: &Product,
    max_price: Option<f64>,
    dupes: &[Dupe<'_>],
) -> String {
    let limit = max_price.map_or_else(|| "No limit".to_string(), |max| format!("${max} USD"));
    let mut sections = vec![
        format!("## Dupes for {} {}", brand.name, target.name),
        format!(
            "**Target Price:** {}\n**Max Price:** {limit}",
            price(target.price_usd)
        ),
    ];

    if dupes.is_empty() {
        let within = max_price.map_or_else(String::new, |max| format!(" within ${max} USD"));
        sections.push(format!(
            "No dupes found cheaper than {}{within}.",
            price(target.price_usd)
        ));
        return sections.join("\n\n");
    }

    for dupe in dupes {
        let reason = match (dupe.same_type, dupe.shared_benefits.is_empty()) {
            (true, true) => format!("Same type ({})", title_case_tag(&target.product_type)),
            (true, false) => format!(
                "Same type ({}), shared benefits: {}",
                title_case_tag(&target.product_type),
                dupe.shared_benefits.join(", ")
            ),
            (false, _) => format!("Shared benefits: {}", dupe.shared_benefits.join(", ")),
        };
        sections.push(format!(
            "### {} {}\n{}\n- **Match:** {reason}\n- **Saves:** {}",
            dupe.brand.name,
            dupe.product.name,
            product_details(dupe.product),
            price(target.price_usd - dupe.product.price_usd)
        ));
    }
    sections.join("\n\n")
}

#[must_use]
pub fn catalog_overview(catalog: &Catalog) -> String {
    let brands = catalog
        .brands()
        .iter()
        .map(|brand| {
            format!(
                "- {} ({}): founded {}, {}, {} product(s)",
                brand.name,
                brand.key,
                brand.founded,
                brand.category,
                brand.products.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let ingredients = catalog
        .ingredients()
        .iter()
        .map(|ingredient| format!("- {} (Safety: {})", ingredient.name, ingredient.safety_grade))
        .collect::<Vec<_>>()
        .join("\n");
    let routines = catalog
        .routines()
        .iter()
        .map(|routine| format!("- {} ({}): {} steps", routine.name, routine.key, routine.steps.len()))
        .collect::<Vec<_>>()
        .join("\n");

    [
        "# K-Beauty Catalog".to_string(),
        format!("## Brands ({})\n{brands}", catalog.brands().len()),
        format!("## Ingredients ({})\n{ingredients}", catalog.ingredients().len()),
        format!("## Routines ({})\n{routines}", catalog.routines().len()),
    ]
    .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().expect("builtin catalog")
    }

    #[test]
    fn title_case_replaces_underscores() {
        assert_eq!(title_case_tag("sleeping_mask"), "Sleeping Mask");
        assert_eq!(title_case_tag("eye_cream"), "Eye Cream");
        assert_eq!(title_case_tag("SERUM"), "Serum");
        assert_eq!(title_case_tag(""), "");
    }

    #[test]
    fn product_entry_uses_usd_suffix_and_title_case() {
        let catalog = catalog();
        let laneige = catalog.brands().get("laneige").expect("laneige");
        let text = product_entry(&laneige.products[0]);

        assert_eq!(
            text,
            "### Water Sleeping Mask\n\
             - **Type:** Sleeping Mask\n\
             - **Price:** $34 USD\n\
             - **Benefits:** Overnight hydration, Skin barrier repair\n\
             - **Skin Types:** Dry, Dehydrated, All"
        );
    }

    #[test]
    fn ingredient_report_marks_missing_incompatibles() {
        let catalog = catalog();
        let text = ingredient_report(catalog.ingredients().get("hyaluronic_acid").expect("ha"));
        assert!(text.starts_with("## Hyaluronic Acid (히알루론산)"));
        assert!(text.contains("- **Incompatible With:** None known"));
        assert!(!text.contains("Also Known As"));
    }

    #[test]
    fn tips_fall_back_for_unknown_skin_types() {
        assert_eq!(skin_type_tips(" OILY ")[1], "Include BHA for pore care");
        assert_eq!(skin_type_tips("alien"), GENERIC_TIPS);
    }

    #[test]
    fn routine_steps_keep_order() {
        let catalog = catalog();
        let text = routine_steps(catalog.default_routine());
        let numbers: Vec<&str> = text
            .lines()
            .map(|line| line.split('.').next().unwrap_or_default())
            .collect();
        assert_eq!(numbers, ["1", "2", "3", "4", "5", "6", "7"]);
        assert!(text.ends_with("7. **Sunscreen**: SPF 30+ (AM only)"));
    }

    #[test]
    fn comparison_picks_cheapest_first_on_ties() {
        let catalog = catalog();
        let cosrx = catalog.brands().get("cosrx").expect("cosrx");
        let sulwhasoo = catalog.brands().get("sulwhasoo").expect("sulwhasoo");
        let entries = vec![
            ComparedProduct::Found {
                brand: sulwhasoo,
                products: vec![&sulwhasoo.products[0]],
            },
            ComparedProduct::Found {
                brand: cosrx,
                products: cosrx.products.iter().collect(),
            },
        ];

        let keys: Vec<&str> = catalog.brands().keys().collect();
        let text = comparison(&entries, &keys);
        assert!(text.contains("### Product 1: Sulwhasoo (설화수) First Care Activating Serum"));
        assert!(text.contains("### Product 2: COSRX AHA/BHA Clarifying Treatment Toner"));
        assert!(text.contains("**Budget Pick:** COSRX Snail 96 Mucin Power Essence ($17 USD)"));
        assert!(text.contains("**Price Spread:** $17 - $90 USD"));
    }

    #[test]
    fn overview_counts_tables() {
        let text = catalog_overview(&catalog());
        assert!(text.contains("## Brands (3)"));
        assert!(text.contains("- COSRX (cosrx): founded 2013, Affordable/Effective, 2 product(s)"));
        assert!(text.contains("- Basic Korean Skincare Routine (basic_korean): 7 steps"));
    }

    #[test]
    fn skin_compatibility_prefers_the_listed_entry() {
        let catalog = catalog();
        let hyaluronic = catalog.ingredients().get("hyaluronic_acid").expect("hyaluronic");
        assert_eq!(
            skin_compatibility(hyaluronic, " Dry "),
            "- **For Dry Skin:** Suitable (listed as Especially dry)"
        );
        assert_eq!(
            skin_compatibility(hyaluronic, "oily"),
            "- **For Oily Skin:** Suitable for all skin types"
        );

        let retinol = catalog.ingredients().get("retinol").expect("retinol");
        assert_eq!(
            skin_compatibility(retinol, "sensitive"),
            "- **For Sensitive Skin:** Not specifically listed, patch test first"
        );
    }

    #[test]
    fn dupes_report_lists_savings_and_reason() {
        let catalog = catalog();
        let laneige = catalog.brands().get("laneige").expect("laneige");
        let (mask, lip) = (&laneige.products[0], &laneige.products[1]);
        let dupes = [Dupe {
            brand: laneige,
            product: lip,
            same_type: false,
            shared_benefits: vec!["Lip hydration"],
        }];

        let text = dupes_report(laneige, mask, None, &dupes);
        assert!(text.starts_with("## Dupes for Laneige (라네즈) Water Sleeping Mask"));
        assert!(text.contains("**Target Price:** $34 USD\n**Max Price:** No limit"));
        assert!(text.contains("### Laneige (라네즈) Lip Sleeping Mask"));
        assert!(text.contains("- **Match:** Shared benefits: Lip hydration"));
        assert!(text.ends_with("- **Saves:** $10 USD"));
    }

    #[test]
    fn empty_dupes_report_names_the_limit() {
        let catalog = catalog();
        let laneige = catalog.brands().get("laneige").expect("laneige");
        let text = dupes_report(laneige, &laneige.products[0], Some(19.5), &[]);
        assert!(text.contains("**Max Price:** $19.5 USD"));
        assert!(text.ends_with("No dupes found cheaper than $34 USD within $19.5 USD."));
    }
}
